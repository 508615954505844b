use chat_core::{ClientId, Message};

use std::time::Instant;

/// A message that has been committed to the log and is waiting for fan-out.
#[derive(Debug, Clone)]
pub struct ChatEvent {
    pub sender_id: ClientId,
    pub text: String,
    /// When the event was handed to the dispatcher. Clients registered after
    /// this instant never receive it.
    pub posted_at: Instant,
}

impl ChatEvent {
    pub fn new(sender_id: ClientId, text: impl Into<String>) -> Self {
        Self {
            sender_id,
            text: text.into(),
            posted_at: Instant::now(),
        }
    }

    /// Line delivered to live clients
    pub fn line(&self) -> String {
        Message::format_line(self.sender_id.as_str(), &self.text)
    }
}
