use crate::{CoreError, MAX_CLIENT_ID_LENGTH, Result as CoreErrorResult};

use std::panic::Location;

use error_location::ErrorLocation;
use serde::{Deserialize, Serialize};

/// Opaque identifier a client registers under.
///
/// Any non-blank token up to [`MAX_CLIENT_ID_LENGTH`] bytes is accepted; the
/// value is otherwise never interpreted.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ClientId(String);

impl ClientId {
    #[track_caller]
    pub fn parse(value: &str) -> CoreErrorResult<Self> {
        if value.trim().is_empty() {
            return Err(CoreError::Validation {
                message: "Client ID required".to_string(),
                field: Some("id".to_string()),
                location: ErrorLocation::from(Location::caller()),
            });
        }

        if value.len() > MAX_CLIENT_ID_LENGTH {
            return Err(CoreError::Validation {
                message: format!(
                    "Client ID exceeds {} bytes (got {})",
                    MAX_CLIENT_ID_LENGTH,
                    value.len()
                ),
                field: Some("id".to_string()),
                location: ErrorLocation::from(Location::caller()),
            });
        }

        Ok(Self(value.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl AsRef<str> for ClientId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ClientId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
