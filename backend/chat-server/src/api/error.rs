//! REST API error types
//!
//! Every failure becomes a `{"error": {"code", "message"}}` body with the
//! status the chat protocol assigns to it.

use chat_core::CoreError;
use chat_room::ChatError;

use std::panic::Location;

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use error_location::ErrorLocation;
use serde::Serialize;
use thiserror::Error;

/// JSON error response body
#[derive(Debug, Serialize)]
pub struct ApiErrorResponse {
    pub error: ApiErrorBody,
}

/// Inner error body with code, message, and optional field
#[derive(Debug, Serialize)]
pub struct ApiErrorBody {
    /// Machine-readable error code (e.g., "CONFLICT", "BAD_REQUEST")
    pub code: String,
    /// Human-readable error message
    pub message: String,
    /// Query parameter at fault, for request errors
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
}

/// API errors with associated HTTP status codes
#[derive(Debug, Error)]
pub enum ApiError {
    /// Missing or malformed query parameter (400)
    #[error("Bad request: {message} {location}")]
    BadRequest {
        message: String,
        field: Option<String>,
        location: ErrorLocation,
    },

    /// Identifier is not registered (401)
    #[error("Unauthorized: {message} {location}")]
    Unauthorized {
        message: String,
        location: ErrorLocation,
    },

    /// Identifier is not registered, on leave (404)
    #[error("Not found: {message} {location}")]
    NotFound {
        message: String,
        location: ErrorLocation,
    },

    /// Identifier already registered (409)
    #[error("Conflict: {message} {location}")]
    Conflict {
        message: String,
        location: ErrorLocation,
    },

    /// Storage fault or internal inconsistency (500)
    #[error("Internal error: {message} {location}")]
    Internal {
        message: String,
        location: ErrorLocation,
    },
}

impl ApiError {
    #[track_caller]
    pub fn missing_parameter(field: &str) -> Self {
        ApiError::BadRequest {
            message: format!("Missing required parameter: {}", field),
            field: Some(field.to_string()),
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if matches!(self, ApiError::Internal { .. }) {
            log::error!("{}", self);
        } else {
            log::warn!("{}", self);
        }

        let (status, body) = match self {
            ApiError::BadRequest { message, field, .. } => (
                StatusCode::BAD_REQUEST,
                ApiErrorBody {
                    code: "BAD_REQUEST".into(),
                    message,
                    field,
                },
            ),
            ApiError::Unauthorized { message, .. } => (
                StatusCode::UNAUTHORIZED,
                ApiErrorBody {
                    code: "UNAUTHORIZED".into(),
                    message,
                    field: None,
                },
            ),
            ApiError::NotFound { message, .. } => (
                StatusCode::NOT_FOUND,
                ApiErrorBody {
                    code: "NOT_FOUND".into(),
                    message,
                    field: None,
                },
            ),
            ApiError::Conflict { message, .. } => (
                StatusCode::CONFLICT,
                ApiErrorBody {
                    code: "CONFLICT".into(),
                    message,
                    field: None,
                },
            ),
            ApiError::Internal { message, .. } => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ApiErrorBody {
                    code: "INTERNAL_ERROR".into(),
                    message,
                    field: None,
                },
            ),
        };

        (status, Json(ApiErrorResponse { error: body })).into_response()
    }
}

/// Convert chat room errors to API errors
impl From<ChatError> for ApiError {
    #[track_caller]
    fn from(e: ChatError) -> Self {
        let location = ErrorLocation::from(Location::caller());
        match e {
            ChatError::Conflict { .. } => ApiError::Conflict {
                message: "Client ID already exists".into(),
                location,
            },
            ChatError::Unauthorized { .. } => ApiError::Unauthorized {
                message: "Invalid client ID, access denied".into(),
                location,
            },
            ChatError::NotFound { .. } => ApiError::NotFound {
                message: "Client ID not found".into(),
                location,
            },
            ChatError::Validation { message, field, .. } => ApiError::BadRequest {
                message,
                field,
                location,
            },
            other => {
                // Don't expose storage details to clients
                log::error!("Chat room failure: {}", other);
                ApiError::Internal {
                    message: "Internal server error".into(),
                    location,
                }
            }
        }
    }
}

/// Convert identifier validation errors to API errors
impl From<CoreError> for ApiError {
    #[track_caller]
    fn from(e: CoreError) -> Self {
        match e {
            CoreError::Validation { message, field, .. } => ApiError::BadRequest {
                message,
                field,
                location: ErrorLocation::from(Location::caller()),
            },
        }
    }
}

pub type Result<T> = std::result::Result<T, ApiError>;
