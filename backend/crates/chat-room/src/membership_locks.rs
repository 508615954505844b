use chat_core::ClientId;

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::{Mutex, OwnedMutexGuard};

/// One async lock per identifier, held across a store call and the matching
/// registry change so the two never interleave with another membership
/// change for the same identifier.
#[derive(Clone, Default)]
pub(crate) struct MembershipLocks {
    inner: Arc<Mutex<HashMap<ClientId, Arc<Mutex<()>>>>>,
}

impl MembershipLocks {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) async fn acquire(&self, client_id: &ClientId) -> OwnedMutexGuard<()> {
        let entry = {
            let mut locks = self.inner.lock().await;
            Arc::clone(locks.entry(client_id.clone()).or_default())
        };
        entry.lock_owned().await
    }

    /// Release `guard` and forget the entry if nobody else is waiting on it.
    pub(crate) async fn release(&self, client_id: &ClientId, guard: OwnedMutexGuard<()>) {
        let mut locks = self.inner.lock().await;
        drop(guard);

        // Waiters clone the entry under the map lock, so a count of one means
        // only the map still refers to it.
        if let Some(entry) = locks.get(client_id)
            && Arc::strong_count(entry) == 1
        {
            locks.remove(client_id);
        }
    }

    #[cfg(test)]
    pub(crate) async fn tracked(&self) -> usize {
        self.inner.lock().await.len()
    }
}
