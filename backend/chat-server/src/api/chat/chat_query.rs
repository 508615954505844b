use crate::{ApiError, ApiResult};

use chat_core::ClientId;

use serde::Deserialize;

/// Query-string parameters shared by every chat endpoint
#[derive(Debug, Default, Deserialize)]
pub struct ChatQuery {
    pub id: Option<String>,
    pub message: Option<String>,
}

impl ChatQuery {
    /// The `id` parameter as a validated identifier
    #[track_caller]
    pub fn client_id(&self) -> ApiResult<ClientId> {
        let raw = self
            .id
            .as_deref()
            .ok_or_else(|| ApiError::missing_parameter("id"))?;

        Ok(ClientId::parse(raw)?)
    }

    /// The `message` parameter; empty counts as missing
    #[track_caller]
    pub fn message(&self) -> ApiResult<&str> {
        match self.message.as_deref() {
            Some(text) if !text.is_empty() => Ok(text),
            _ => Err(ApiError::missing_parameter("message")),
        }
    }
}
