use crate::{ChatError, Client, Result as ChatErrorResult};

use chat_core::ClientId;

use std::collections::HashMap;
use std::panic::Location;
use std::sync::Arc;

use error_location::ErrorLocation;
use log::{debug, info};
use tokio::sync::Mutex;

/// In-memory map of registered clients to their live-delivery queues.
///
/// Every operation takes the single registry lock for the duration of one map
/// operation only. Enqueueing onto a client's queue happens on the
/// [`Client`] handles returned by [`ClientRegistry::snapshot`], outside the
/// lock.
#[derive(Clone, Default)]
pub struct ClientRegistry {
    inner: Arc<Mutex<RegistryInner>>,
}

#[derive(Default)]
struct RegistryInner {
    clients: HashMap<ClientId, Arc<Client>>,
}

impl ClientRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a client with an empty queue of `queue_capacity` slots.
    pub async fn add(
        &self,
        client_id: ClientId,
        queue_capacity: usize,
    ) -> ChatErrorResult<Arc<Client>> {
        let location = ErrorLocation::from(Location::caller());

        if queue_capacity == 0 {
            return Err(ChatError::Validation {
                message: "Client queue capacity must be at least 1".to_string(),
                field: Some("queue_capacity".to_string()),
                location,
            });
        }

        let mut inner = self.inner.lock().await;

        if inner.clients.contains_key(&client_id) {
            return Err(ChatError::AlreadyPresent {
                client_id: client_id.into_inner(),
                location,
            });
        }

        let client = Arc::new(Client::new(client_id.clone(), queue_capacity));
        inner.clients.insert(client_id.clone(), Arc::clone(&client));
        info!("Added client {client_id} ({} total)", inner.clients.len());

        Ok(client)
    }

    /// Remove a client. Absent ids are not an error; returns whether one was
    /// removed.
    pub async fn remove(&self, client_id: &ClientId) -> bool {
        let mut inner = self.inner.lock().await;

        if inner.clients.remove(client_id).is_some() {
            info!(
                "Removed client {client_id} ({} total remaining)",
                inner.clients.len()
            );
            true
        } else {
            debug!("Remove of absent client {client_id} ignored");
            false
        }
    }

    /// Point-in-time view of every registered client
    pub async fn snapshot(&self) -> Vec<Arc<Client>> {
        let inner = self.inner.lock().await;
        inner.clients.values().cloned().collect()
    }

    pub async fn get(&self, client_id: &ClientId) -> Option<Arc<Client>> {
        let inner = self.inner.lock().await;
        inner.clients.get(client_id).cloned()
    }

    pub async fn contains(&self, client_id: &ClientId) -> bool {
        let inner = self.inner.lock().await;
        inner.clients.contains_key(client_id)
    }

    pub async fn total_count(&self) -> usize {
        let inner = self.inner.lock().await;
        inner.clients.len()
    }
}
