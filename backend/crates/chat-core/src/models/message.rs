use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A chat message as recorded in the durable log. Never mutated after append.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    /// Monotonic insertion key assigned by the store
    pub sequence: i64,
    pub sender_id: String,
    pub text: String,
    /// Insertion-order timestamp assigned by the store at append time
    pub timestamp: DateTime<Utc>,
}

impl Message {
    /// Wire form used for live delivery: `"<sender_id>: <text>"`.
    pub fn format_line(sender_id: &str, text: &str) -> String {
        format!("{}: {}", sender_id, text)
    }

    pub fn line(&self) -> String {
        Self::format_line(&self.sender_id, &self.text)
    }
}
