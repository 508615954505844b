use crate::Result as DbErrorResult;

use chat_core::Message;

use async_trait::async_trait;

/// Durable, ordered, append-only message log plus the set of registered
/// client identifiers.
///
/// Every method is atomic with respect to concurrent calls. Domain outcomes
/// come back as `DbError::Conflict`, `DbError::NotFound` and
/// `DbError::Unauthorized`; anything else is a storage fault
/// (see [`crate::DbError::is_storage_fault`]).
#[async_trait]
pub trait MessageStore: Send + Sync {
    /// Record `client_id` as registered. `Conflict` if it already is.
    async fn register_identifier(&self, client_id: &str) -> DbErrorResult<()>;

    /// Whether `client_id` is currently registered.
    async fn identifier_exists(&self, client_id: &str) -> DbErrorResult<bool>;

    /// Remove a registration. `NotFound` if absent, otherwise the number of
    /// rows removed.
    async fn unregister_identifier(&self, client_id: &str) -> DbErrorResult<u64>;

    /// Append a message from a registered sender. Returns once the write is
    /// committed. `Unauthorized` if the sender is not registered.
    async fn append(&self, sender_id: &str, text: &str) -> DbErrorResult<()>;

    /// Every message, ordered by insertion key ascending.
    async fn list_ordered(&self) -> DbErrorResult<Vec<Message>>;

    /// Every registered identifier, oldest registration first.
    async fn registered_identifiers(&self) -> DbErrorResult<Vec<String>>;

    /// Round-trip to the engine without touching any table.
    async fn ping(&self) -> DbErrorResult<()>;

    /// Release the underlying engine. Further calls fail with a storage fault.
    async fn close(&self);
}
