use crate::ApiError;

use chat_core::ClientId;
use chat_room::ChatError;

use std::panic::Location;

use axum::response::IntoResponse;
use error_location::ErrorLocation;
use http::StatusCode;
use http_body_util::BodyExt;

async fn body_json(error: ApiError) -> (StatusCode, serde_json::Value) {
    let response = error.into_response();
    let status = response.status();
    let body = response.into_body().collect().await.unwrap().to_bytes();
    (status, serde_json::from_slice(&body).unwrap())
}

#[tokio::test]
async fn given_conflict_when_rendered_then_409_with_json_body() {
    let error = ApiError::Conflict {
        message: "Client ID already exists".into(),
        location: ErrorLocation::from(Location::caller()),
    };

    let (status, json) = body_json(error).await;

    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(json["error"]["code"], "CONFLICT");
    assert_eq!(json["error"]["message"], "Client ID already exists");
    assert!(json["error"].get("field").is_none());
}

#[tokio::test]
async fn given_missing_parameter_when_rendered_then_400_with_field() {
    let (status, json) = body_json(ApiError::missing_parameter("message")).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["error"]["code"], "BAD_REQUEST");
    assert_eq!(json["error"]["field"], "message");
}

#[tokio::test]
async fn given_unauthorized_when_rendered_then_401() {
    let error = ApiError::Unauthorized {
        message: "Invalid client ID, access denied".into(),
        location: ErrorLocation::from(Location::caller()),
    };

    let (status, json) = body_json(error).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(json["error"]["code"], "UNAUTHORIZED");
}

#[tokio::test]
async fn given_not_found_when_rendered_then_404() {
    let error = ApiError::NotFound {
        message: "Client ID not found".into(),
        location: ErrorLocation::from(Location::caller()),
    };

    let (status, _) = body_json(error).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn given_internal_when_rendered_then_500() {
    let error = ApiError::Internal {
        message: "Internal server error".into(),
        location: ErrorLocation::from(Location::caller()),
    };

    let (status, json) = body_json(error).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(json["error"]["code"], "INTERNAL_ERROR");
}

#[test]
fn given_chat_errors_when_converted_then_mapped_to_protocol_statuses() {
    let location = || ErrorLocation::from(Location::caller());

    let conflict = ApiError::from(ChatError::Conflict {
        client_id: "alice".into(),
        location: location(),
    });
    let unauthorized = ApiError::from(ChatError::Unauthorized {
        client_id: "alice".into(),
        location: location(),
    });
    let not_found = ApiError::from(ChatError::NotFound {
        client_id: "alice".into(),
        location: location(),
    });
    let inconsistency = ApiError::from(ChatError::Inconsistency {
        message: "diverged".into(),
        location: location(),
    });

    assert!(matches!(conflict, ApiError::Conflict { .. }));
    assert!(matches!(unauthorized, ApiError::Unauthorized { .. }));
    assert!(matches!(not_found, ApiError::NotFound { .. }));
    assert!(matches!(inconsistency, ApiError::Internal { .. }));
}

#[test]
fn given_storage_fault_when_converted_then_internal_without_details() {
    let fault = ChatError::from(chat_db::DbError::from(sqlx::Error::PoolClosed));

    let error = ApiError::from(fault);

    match error {
        ApiError::Internal { message, .. } => assert_eq!(message, "Internal server error"),
        other => panic!("expected Internal, got {other:?}"),
    }
}

#[test]
fn given_invalid_client_id_when_converted_then_bad_request_on_id() {
    let core_error = ClientId::parse("   ").unwrap_err();

    let error = ApiError::from(core_error);

    match error {
        ApiError::BadRequest { field, .. } => assert_eq!(field.as_deref(), Some("id")),
        other => panic!("expected BadRequest, got {other:?}"),
    }
}
