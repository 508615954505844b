use chat_db::{SqliteMessageStore, run_migrations};

use sqlx::SqlitePool;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};

/// Creates an in-memory SQLite pool with migrations run
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

/// Creates a store over a fresh in-memory database
pub async fn create_test_store() -> SqliteMessageStore {
    SqliteMessageStore::new(create_test_pool().await)
}

/// Inserts a registration directly, bypassing the store
pub async fn insert_test_user(pool: &SqlitePool, client_id: &str) {
    // Use sqlx::query (not query!) to avoid offline mode issues in tests
    sqlx::query("INSERT INTO users (id, joined_at) VALUES (?, ?)")
        .bind(client_id)
        .bind(chrono::Utc::now().timestamp_micros())
        .execute(pool)
        .await
        .expect("Failed to create test user");
}
