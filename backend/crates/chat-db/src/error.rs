use std::panic::Location;

use error_location::ErrorLocation;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DbError {
    #[error("SQLx error: {source} {location}")]
    Sqlx {
        source: sqlx::Error,
        location: ErrorLocation,
    },

    #[error("Migration error: {message} {location}")]
    Migration {
        message: String,
        location: ErrorLocation,
    },

    #[error("Invalid row in {table}: {message} {location}")]
    InvalidRow {
        table: &'static str,
        message: String,
        location: ErrorLocation,
    },

    #[error("Client ID already exists: {client_id} {location}")]
    Conflict {
        client_id: String,
        location: ErrorLocation,
    },

    #[error("Client ID not registered: {client_id} {location}")]
    NotFound {
        client_id: String,
        location: ErrorLocation,
    },

    #[error("Invalid client ID, access denied: {client_id} {location}")]
    Unauthorized {
        client_id: String,
        location: ErrorLocation,
    },
}

impl DbError {
    /// True for failures of the storage engine itself, as opposed to domain
    /// outcomes (`Conflict`, `NotFound`, `Unauthorized`).
    pub fn is_storage_fault(&self) -> bool {
        matches!(
            self,
            Self::Sqlx { .. } | Self::Migration { .. } | Self::InvalidRow { .. }
        )
    }
}

impl From<sqlx::Error> for DbError {
    #[track_caller]
    fn from(source: sqlx::Error) -> Self {
        Self::Sqlx {
            source,
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

impl From<sqlx::migrate::MigrateError> for DbError {
    #[track_caller]
    fn from(source: sqlx::migrate::MigrateError) -> Self {
        Self::Migration {
            message: source.to_string(),
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

pub type Result<T> = std::result::Result<T, DbError>;
