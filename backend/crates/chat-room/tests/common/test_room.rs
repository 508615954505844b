#![allow(dead_code)]

use chat_core::ClientId;
use chat_db::{MessageStore, SqliteMessageStore, run_migrations};
use chat_room::{ChatCoordinator, RoomConfig, ShutdownCoordinator};

use std::sync::Arc;

use sqlx::SqlitePool;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use tokio::task::JoinHandle;
use tokio::time::{Duration, Instant, sleep};

/// Room wired over an in-memory store with a running dispatcher
pub struct TestRoom {
    pub coordinator: ChatCoordinator,
    pub shutdown: ShutdownCoordinator,
    pub dispatcher: JoinHandle<()>,
    pub pool: SqlitePool,
}

impl TestRoom {
    /// Stop the dispatcher and wait for it to exit
    pub async fn stop(self) {
        self.shutdown.shutdown();
        let _ = tokio::time::timeout(Duration::from_secs(1), self.dispatcher).await;
    }
}

pub async fn create_test_pool() -> SqlitePool {
    let options = SqliteConnectOptions::new()
        .filename(":memory:")
        .create_if_missing(true);

    let pool = SqlitePoolOptions::new()
        .max_connections(1) // In-memory needs single connection
        .connect_with(options)
        .await
        .expect("Failed to create test pool");

    run_migrations(&pool)
        .await
        .expect("Failed to run migrations");

    pool
}

pub async fn create_test_room() -> TestRoom {
    create_test_room_with_capacity(RoomConfig::default().client_queue_capacity).await
}

pub async fn create_test_room_with_capacity(client_queue_capacity: usize) -> TestRoom {
    create_test_room_on_pool(create_test_pool().await, client_queue_capacity)
}

pub fn create_test_room_on_pool(pool: SqlitePool, client_queue_capacity: usize) -> TestRoom {
    let store: Arc<dyn MessageStore> = Arc::new(SqliteMessageStore::new(pool.clone()));
    start_room(store, pool, client_queue_capacity)
}

pub fn start_room(
    store: Arc<dyn MessageStore>,
    pool: SqlitePool,
    client_queue_capacity: usize,
) -> TestRoom {
    let shutdown = ShutdownCoordinator::new();
    let (coordinator, dispatcher) = ChatCoordinator::start(
        store,
        RoomConfig {
            client_queue_capacity,
        },
        &shutdown,
    );

    TestRoom {
        coordinator,
        shutdown,
        dispatcher,
        pool,
    }
}

pub fn client_id(value: &str) -> ClientId {
    ClientId::parse(value).expect("valid client id")
}

/// Poll `client` until at least `count` lines have arrived or a second passes
pub async fn receive_lines(
    coordinator: &ChatCoordinator,
    client: &ClientId,
    count: usize,
) -> Vec<String> {
    let deadline = Instant::now() + Duration::from_secs(1);
    let mut lines = Vec::new();

    while lines.len() < count && Instant::now() < deadline {
        lines.extend(coordinator.poll(client).await.expect("poll should succeed"));
        if lines.len() < count {
            sleep(Duration::from_millis(5)).await;
        }
    }

    lines
}

/// Give the dispatcher time to process anything already posted
pub async fn settle() {
    sleep(Duration::from_millis(50)).await;
}
