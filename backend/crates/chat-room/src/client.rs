use chat_core::ClientId;

use std::time::Instant;

use tokio::sync::mpsc::error::TrySendError;
use tokio::sync::{Mutex, mpsc};

/// Result of a single non-blocking enqueue attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Delivery {
    Delivered,
    /// Queue full; the message is discarded for this client only
    DroppedFull,
    /// Receiving side is gone
    DroppedClosed,
}

impl Delivery {
    pub fn is_dropped(&self) -> bool {
        !matches!(self, Self::Delivered)
    }
}

/// A registered client and its bounded live-delivery queue.
///
/// Both ends of the queue live here: the dispatcher produces through
/// [`Client::try_deliver`], the transport consumes through [`Client::drain`].
#[derive(Debug)]
pub struct Client {
    id: ClientId,
    registered_at: Instant,
    capacity: usize,
    sender: mpsc::Sender<String>,
    receiver: Mutex<mpsc::Receiver<String>>,
}

impl Client {
    /// `capacity` must be non-zero; the registry checks this before calling.
    pub(crate) fn new(id: ClientId, capacity: usize) -> Self {
        let (sender, receiver) = mpsc::channel(capacity);
        Self {
            id,
            registered_at: Instant::now(),
            capacity,
            sender,
            receiver: Mutex::new(receiver),
        }
    }

    pub fn id(&self) -> &ClientId {
        &self.id
    }

    pub fn registered_at(&self) -> Instant {
        self.registered_at
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Messages waiting to be drained
    pub fn pending(&self) -> usize {
        self.capacity - self.sender.capacity()
    }

    /// Enqueue without waiting. Never blocks, never errors.
    pub fn try_deliver(&self, line: String) -> Delivery {
        match self.sender.try_send(line) {
            Ok(()) => Delivery::Delivered,
            Err(TrySendError::Full(_)) => Delivery::DroppedFull,
            Err(TrySendError::Closed(_)) => Delivery::DroppedClosed,
        }
    }

    /// Take everything currently queued, oldest first.
    pub async fn drain(&self) -> Vec<String> {
        let mut receiver = self.receiver.lock().await;
        let mut lines = Vec::with_capacity(self.pending());
        while let Ok(line) = receiver.try_recv() {
            lines.push(line);
        }
        lines
    }
}
