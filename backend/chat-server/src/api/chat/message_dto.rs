use chat_core::Message;

use chrono::{DateTime, Utc};
use serde::Serialize;

/// One history entry as returned by `/messages`
#[derive(Debug, Clone, Serialize)]
pub struct MessageDto {
    pub client_id: String,
    pub message: String,
    pub timestamp: DateTime<Utc>,
}

impl From<Message> for MessageDto {
    fn from(m: Message) -> Self {
        Self {
            client_id: m.sender_id,
            message: m.text,
            timestamp: m.timestamp,
        }
    }
}
