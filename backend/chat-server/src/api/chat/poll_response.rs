use serde::Serialize;

/// Live lines drained from the caller's queue, oldest first
#[derive(Debug, Serialize)]
pub struct PollResponse {
    pub messages: Vec<String>,
}
