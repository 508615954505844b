//! Join/send/leave/history orchestration.
//!
//! Each identifier moves `UNREGISTERED -> REGISTERED -> UNREGISTERED`
//! independently. The store is the source of truth for that state; the
//! registry mirrors it for the lifetime of the process.

use crate::{
    BroadcastDispatcher, ChatError, ChatEvent, ClientRegistry, DispatcherHandle, MembershipLocks,
    Metrics, Result as ChatErrorResult, RoomConfig, ShutdownCoordinator,
};

use chat_core::{ClientId, Message};
use chat_db::MessageStore;

use std::panic::Location;
use std::sync::Arc;

use error_location::ErrorLocation;
use log::{debug, error, info, warn};
use tokio::sync::Mutex;
use tokio::task::JoinHandle;

#[derive(Clone)]
pub struct ChatCoordinator {
    store: Arc<dyn MessageStore>,
    registry: ClientRegistry,
    dispatcher: DispatcherHandle,
    metrics: Metrics,
    config: RoomConfig,
    /// Held across append + post so dispatch order equals append order.
    /// Sends from different identifiers therefore commit one at a time.
    send_sequencer: Arc<Mutex<()>>,
    /// Store call + registry change for one identifier run as a unit
    membership: MembershipLocks,
}

impl ChatCoordinator {
    pub fn new(
        store: Arc<dyn MessageStore>,
        registry: ClientRegistry,
        dispatcher: DispatcherHandle,
        metrics: Metrics,
        config: RoomConfig,
    ) -> Self {
        Self {
            store,
            registry,
            dispatcher,
            metrics,
            config,
            send_sequencer: Arc::new(Mutex::new(())),
            membership: MembershipLocks::new(),
        }
    }

    /// Wire a registry and a running dispatcher around `store`.
    pub fn start(
        store: Arc<dyn MessageStore>,
        config: RoomConfig,
        shutdown: &ShutdownCoordinator,
    ) -> (Self, JoinHandle<()>) {
        let registry = ClientRegistry::new();
        let metrics = Metrics::new();
        let (dispatcher, handle) =
            BroadcastDispatcher::new(registry.clone(), metrics.clone(), shutdown);
        let task = dispatcher.spawn();

        (Self::new(store, registry, handle, metrics, config), task)
    }

    pub fn registry(&self) -> &ClientRegistry {
        &self.registry
    }

    pub fn store(&self) -> &Arc<dyn MessageStore> {
        &self.store
    }

    /// Whether live delivery is still running
    pub fn is_dispatching(&self) -> bool {
        self.dispatcher.is_running()
    }

    /// Re-add every identifier the store still has registered, so the
    /// registry matches the store after a restart. Returns how many clients
    /// were added.
    pub async fn restore(&self) -> ChatErrorResult<usize> {
        let identifiers = self.store.registered_identifiers().await?;
        let mut restored = 0;

        for raw in identifiers {
            let client_id = match ClientId::parse(&raw) {
                Ok(client_id) => client_id,
                Err(e) => {
                    self.discard_unrestorable(&raw, e.to_string()).await?;
                    continue;
                }
            };

            let guard = self.membership.acquire(&client_id).await;
            let added = self
                .registry
                .add(client_id.clone(), self.config.client_queue_capacity)
                .await;
            self.membership.release(&client_id, guard).await;

            match added {
                Ok(_) => restored += 1,
                Err(ChatError::AlreadyPresent { client_id, .. }) => {
                    debug!("Client {} already restored", client_id);
                }
                Err(e) => return Err(e),
            }
        }

        self.metrics.clients_restored(self.registry.total_count().await);
        info!("Restored {} registered clients from store", restored);

        Ok(restored)
    }

    /// A stored identifier that can never get a live queue would leave the
    /// store and registry diverged; drop its registration instead.
    async fn discard_unrestorable(&self, raw: &str, reason: String) -> ChatErrorResult<()> {
        error!(
            "Unrestorable identifier {:?} registered in store ({}); unregistering it",
            raw, reason
        );

        match self.store.unregister_identifier(raw).await {
            Ok(_) => Ok(()),
            Err(e) => match ChatError::from(e) {
                // Already gone; nothing left to reconcile
                ChatError::NotFound { .. } => Ok(()),
                other => Err(self.record(other)),
            },
        }
    }

    /// Register `client_id` durably, then give it a live queue.
    pub async fn join(&self, client_id: &ClientId) -> ChatErrorResult<()> {
        let guard = self.membership.acquire(client_id).await;
        let result = self.join_locked(client_id).await;
        self.membership.release(client_id, guard).await;
        result
    }

    async fn join_locked(&self, client_id: &ClientId) -> ChatErrorResult<()> {
        self.store
            .register_identifier(client_id.as_str())
            .await
            .map_err(|e| self.record(ChatError::from(e)))?;

        match self
            .registry
            .add(client_id.clone(), self.config.client_queue_capacity)
            .await
        {
            Ok(_) => {
                self.metrics.client_joined();
                info!("Client {} joined the chat", client_id);
                Ok(())
            }
            Err(ChatError::AlreadyPresent { .. }) => {
                // Store accepted a registration the registry already had.
                // Needs manual cleanup.
                error!(
                    "Fatal inconsistency: {} registered in store but already present in registry",
                    client_id
                );
                Err(self.record(ChatError::Inconsistency {
                    message: format!(
                        "{} registered in store but already present in registry",
                        client_id
                    ),
                    location: ErrorLocation::from(Location::caller()),
                }))
            }
            Err(e) => Err(self.record(e)),
        }
    }

    /// Commit `text` to the log, then hand it to the dispatcher.
    ///
    /// A message reaching any live client is always already in history. The
    /// converse does not hold: a full queue drops it silently.
    pub async fn send(&self, client_id: &ClientId, text: &str) -> ChatErrorResult<()> {
        self.ensure_registered(client_id).await?;

        let _sequenced = self.send_sequencer.lock().await;

        self.store
            .append(client_id.as_str(), text)
            .await
            .map_err(|e| self.record(ChatError::from(e)))?;
        self.metrics.message_sent();

        if let Err(e) = self.dispatcher.post(ChatEvent::new(client_id.clone(), text)) {
            warn!(
                "Message from {} stored but not broadcast: {}",
                client_id, e
            );
        }

        Ok(())
    }

    /// Unregister durably, then drop the live queue if there is one.
    pub async fn leave(&self, client_id: &ClientId) -> ChatErrorResult<()> {
        let guard = self.membership.acquire(client_id).await;
        let result = self.leave_locked(client_id).await;
        self.membership.release(client_id, guard).await;
        result
    }

    async fn leave_locked(&self, client_id: &ClientId) -> ChatErrorResult<()> {
        self.store
            .unregister_identifier(client_id.as_str())
            .await
            .map_err(|e| self.record(ChatError::from(e)))?;

        if !self.registry.remove(client_id).await {
            warn!("Client {} left but had no live queue", client_id);
        }

        self.metrics.client_left();
        info!("Client {} left the chat", client_id);

        Ok(())
    }

    /// Full message log in insertion order.
    pub async fn history(&self, client_id: &ClientId) -> ChatErrorResult<Vec<Message>> {
        self.ensure_registered(client_id).await?;

        self.store
            .list_ordered()
            .await
            .map_err(|e| self.record(ChatError::from(e)))
    }

    /// Drain the live messages waiting in `client_id`'s queue.
    pub async fn poll(&self, client_id: &ClientId) -> ChatErrorResult<Vec<String>> {
        let guard = self.membership.acquire(client_id).await;
        let result = self.poll_locked(client_id).await;
        self.membership.release(client_id, guard).await;
        result
    }

    async fn poll_locked(&self, client_id: &ClientId) -> ChatErrorResult<Vec<String>> {
        self.ensure_registered(client_id).await?;

        match self.registry.get(client_id).await {
            Some(client) => Ok(client.drain().await),
            None => {
                error!(
                    "Inconsistency: {} registered in store but missing from registry",
                    client_id
                );
                Err(self.record(ChatError::Inconsistency {
                    message: format!(
                        "{} registered in store but missing from registry",
                        client_id
                    ),
                    location: ErrorLocation::from(Location::caller()),
                }))
            }
        }
    }

    async fn ensure_registered(&self, client_id: &ClientId) -> ChatErrorResult<()> {
        let exists = self
            .store
            .identifier_exists(client_id.as_str())
            .await
            .map_err(|e| self.record(ChatError::from(e)))?;

        if !exists {
            return Err(self.record(ChatError::Unauthorized {
                client_id: client_id.to_string(),
                location: ErrorLocation::from(Location::caller()),
            }));
        }

        Ok(())
    }

    fn record(&self, error: ChatError) -> ChatError {
        self.metrics.error_occurred(error.error_code());
        if error.is_retryable() {
            warn!("{}", error);
        } else {
            debug!("{}", error);
        }
        error
    }
}
