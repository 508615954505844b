use crate::{
    ConfigError, ConfigErrorResult, DEFAULT_CLIENT_QUEUE_CAPACITY, MAX_CLIENT_QUEUE_CAPACITY,
    MIN_CLIENT_QUEUE_CAPACITY,
};

use serde::Deserialize;

/// Chat room settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ChatConfig {
    /// Pending live messages held per client before new ones are dropped
    pub client_queue_capacity: usize,
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            client_queue_capacity: DEFAULT_CLIENT_QUEUE_CAPACITY,
        }
    }
}

impl ChatConfig {
    pub fn validate(&self) -> ConfigErrorResult<()> {
        if self.client_queue_capacity < MIN_CLIENT_QUEUE_CAPACITY
            || self.client_queue_capacity > MAX_CLIENT_QUEUE_CAPACITY
        {
            return Err(ConfigError::chat(format!(
                "chat.client_queue_capacity must be {}-{}, got {}",
                MIN_CLIENT_QUEUE_CAPACITY, MAX_CLIENT_QUEUE_CAPACITY, self.client_queue_capacity
            )));
        }

        Ok(())
    }
}
