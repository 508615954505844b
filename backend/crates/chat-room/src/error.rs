use chat_core::CoreError;
use chat_db::DbError;

use std::panic::Location;

use error_location::ErrorLocation;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ChatError {
    #[error("Client ID already exists: {client_id} {location}")]
    Conflict {
        client_id: String,
        location: ErrorLocation,
    },

    #[error("Invalid client ID, access denied: {client_id} {location}")]
    Unauthorized {
        client_id: String,
        location: ErrorLocation,
    },

    #[error("Client not found: {client_id} {location}")]
    NotFound {
        client_id: String,
        location: ErrorLocation,
    },

    #[error("Storage fault: {source} {location}")]
    StorageFault {
        #[source]
        source: DbError,
        location: ErrorLocation,
    },

    #[error("Client already present in registry: {client_id} {location}")]
    AlreadyPresent {
        client_id: String,
        location: ErrorLocation,
    },

    #[error("Registry and store diverged: {message} {location}")]
    Inconsistency {
        message: String,
        location: ErrorLocation,
    },

    #[error("Validation failed: {message} {location}")]
    Validation {
        message: String,
        field: Option<String>,
        location: ErrorLocation,
    },

    #[error("Broadcast dispatcher is not running {location}")]
    DispatcherStopped { location: ErrorLocation },
}

impl ChatError {
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::Conflict { .. } => "CONFLICT",
            Self::Unauthorized { .. } => "UNAUTHORIZED",
            Self::NotFound { .. } => "NOT_FOUND",
            Self::StorageFault { .. } => "STORAGE_FAULT",
            Self::AlreadyPresent { .. } => "ALREADY_PRESENT",
            Self::Inconsistency { .. } => "INCONSISTENCY",
            Self::Validation { .. } => "VALIDATION_ERROR",
            Self::DispatcherStopped { .. } => "DISPATCHER_STOPPED",
        }
    }

    /// Storage faults may succeed if the caller tries again; everything else
    /// is caller misuse or a defect.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::StorageFault { .. })
    }
}

impl From<DbError> for ChatError {
    #[track_caller]
    fn from(source: DbError) -> Self {
        let location = ErrorLocation::from(Location::caller());
        match source {
            DbError::Conflict { client_id, .. } => Self::Conflict {
                client_id,
                location,
            },
            DbError::NotFound { client_id, .. } => Self::NotFound {
                client_id,
                location,
            },
            DbError::Unauthorized { client_id, .. } => Self::Unauthorized {
                client_id,
                location,
            },
            source => Self::StorageFault { source, location },
        }
    }
}

impl From<CoreError> for ChatError {
    #[track_caller]
    fn from(source: CoreError) -> Self {
        match source {
            CoreError::Validation { message, field, .. } => Self::Validation {
                message,
                field,
                location: ErrorLocation::from(Location::caller()),
            },
        }
    }
}

pub type Result<T> = std::result::Result<T, ChatError>;
