#![allow(dead_code)]

use chat_core::Message;
use chat_db::{MessageStore, Result as DbErrorResult};

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use tokio::sync::Notify;

/// Wraps a store and parks the first `register_identifier` right after it
/// commits, until the test lets it continue.
pub struct GatedStore {
    inner: Arc<dyn MessageStore>,
    armed: AtomicBool,
    pub committed: Notify,
    pub resume: Notify,
}

impl GatedStore {
    pub fn new(inner: Arc<dyn MessageStore>) -> Self {
        Self {
            inner,
            armed: AtomicBool::new(true),
            committed: Notify::new(),
            resume: Notify::new(),
        }
    }
}

#[async_trait]
impl MessageStore for GatedStore {
    async fn register_identifier(&self, client_id: &str) -> DbErrorResult<()> {
        self.inner.register_identifier(client_id).await?;

        if self.armed.swap(false, Ordering::SeqCst) {
            self.committed.notify_one();
            self.resume.notified().await;
        }

        Ok(())
    }

    async fn identifier_exists(&self, client_id: &str) -> DbErrorResult<bool> {
        self.inner.identifier_exists(client_id).await
    }

    async fn unregister_identifier(&self, client_id: &str) -> DbErrorResult<u64> {
        self.inner.unregister_identifier(client_id).await
    }

    async fn append(&self, sender_id: &str, text: &str) -> DbErrorResult<()> {
        self.inner.append(sender_id, text).await
    }

    async fn list_ordered(&self) -> DbErrorResult<Vec<Message>> {
        self.inner.list_ordered().await
    }

    async fn registered_identifiers(&self) -> DbErrorResult<Vec<String>> {
        self.inner.registered_identifiers().await
    }

    async fn ping(&self) -> DbErrorResult<()> {
        self.inner.ping().await
    }

    async fn close(&self) {
        self.inner.close().await
    }
}
