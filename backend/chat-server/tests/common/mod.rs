#![allow(dead_code)]

//! Test infrastructure for chat-server API tests

use chat_core::Message;
use chat_db::{DbError, MessageStore, Result as DbErrorResult, SqliteMessageStore, run_migrations};
use chat_room::{ChatCoordinator, RoomConfig, ShutdownCoordinator};
use chat_server::{AppState, build_router};

use std::sync::Arc;

use async_trait::async_trait;
use axum::{
    body::Body,
    http::{Method, Request, StatusCode},
};
use http_body_util::BodyExt;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use tower::ServiceExt;

/// Create a store over a fresh in-memory database
pub async fn create_test_store() -> Arc<dyn MessageStore> {
    let options = SqliteConnectOptions::new()
        .filename(":memory:")
        .create_if_missing(true);

    let pool = SqlitePoolOptions::new()
        .max_connections(1) // In-memory needs single connection
        .connect_with(options)
        .await
        .expect("Failed to create test database");

    run_migrations(&pool)
        .await
        .expect("Failed to run migrations");

    Arc::new(SqliteMessageStore::new(pool))
}

/// Create AppState for testing, with a running dispatcher and no recorder
pub async fn create_test_app_state() -> AppState {
    create_app_state_with_store(create_test_store().await, 10)
}

pub fn create_app_state_with_store(
    store: Arc<dyn MessageStore>,
    client_queue_capacity: usize,
) -> AppState {
    let shutdown = ShutdownCoordinator::new();
    let (coordinator, _dispatcher) = ChatCoordinator::start(
        store,
        RoomConfig {
            client_queue_capacity,
        },
        &shutdown,
    );

    AppState {
        coordinator,
        shutdown,
        metrics: None,
    }
}

/// Send one request through a fresh router and decode the JSON body
pub async fn call(state: &AppState, method: Method, uri: &str) -> (StatusCode, serde_json::Value) {
    let (status, body) = call_raw(state, method, uri).await;
    let json = if body.is_empty() {
        serde_json::Value::Null
    } else {
        serde_json::from_slice(&body).expect("response body should be JSON")
    };
    (status, json)
}

pub async fn call_raw(state: &AppState, method: Method, uri: &str) -> (StatusCode, Vec<u8>) {
    let app = build_router(state.clone());

    let request = Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let body = response.into_body().collect().await.unwrap().to_bytes();

    (status, body.to_vec())
}

pub async fn get(state: &AppState, uri: &str) -> (StatusCode, serde_json::Value) {
    call(state, Method::GET, uri).await
}

/// Store whose every call fails the way a dead database does
pub struct FailingStore;

fn unavailable<T>() -> DbErrorResult<T> {
    Err(DbError::from(sqlx::Error::PoolClosed))
}

#[async_trait]
impl MessageStore for FailingStore {
    async fn register_identifier(&self, _client_id: &str) -> DbErrorResult<()> {
        unavailable()
    }

    async fn identifier_exists(&self, _client_id: &str) -> DbErrorResult<bool> {
        unavailable()
    }

    async fn unregister_identifier(&self, _client_id: &str) -> DbErrorResult<u64> {
        unavailable()
    }

    async fn append(&self, _sender_id: &str, _text: &str) -> DbErrorResult<()> {
        unavailable()
    }

    async fn list_ordered(&self) -> DbErrorResult<Vec<Message>> {
        unavailable()
    }

    async fn registered_identifiers(&self) -> DbErrorResult<Vec<String>> {
        unavailable()
    }

    async fn ping(&self) -> DbErrorResult<()> {
        unavailable()
    }

    async fn close(&self) {}
}
