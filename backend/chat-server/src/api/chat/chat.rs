//! Chat REST API handlers
//!
//! Parameters come from the query string and any HTTP method is accepted.

use crate::{
    ApiResult, AppState, ChatQuery, JoinResponse, LeaveResponse, MessageDto, PollResponse,
    SendResponse,
};

use axum::{
    Json,
    extract::{Query, State},
};

/// /join?id=
pub async fn join(
    State(state): State<AppState>,
    Query(query): Query<ChatQuery>,
) -> ApiResult<Json<JoinResponse>> {
    let client_id = query.client_id()?;

    state.coordinator.join(&client_id).await?;

    Ok(Json(JoinResponse::joined(client_id.into_inner())))
}

/// /send?id=&message=
pub async fn send(
    State(state): State<AppState>,
    Query(query): Query<ChatQuery>,
) -> ApiResult<Json<SendResponse>> {
    let client_id = query.client_id()?;
    let message = query.message()?;

    state.coordinator.send(&client_id, message).await?;

    log::debug!("Client {} sent a message via REST API", client_id);

    Ok(Json(SendResponse::sent()))
}

/// /leave?id=
pub async fn leave(
    State(state): State<AppState>,
    Query(query): Query<ChatQuery>,
) -> ApiResult<Json<LeaveResponse>> {
    let client_id = query.client_id()?;

    state.coordinator.leave(&client_id).await?;

    Ok(Json(LeaveResponse::left(client_id.into_inner())))
}

/// /messages?id=
pub async fn history(
    State(state): State<AppState>,
    Query(query): Query<ChatQuery>,
) -> ApiResult<Json<Vec<MessageDto>>> {
    let client_id = query.client_id()?;

    let messages = state.coordinator.history(&client_id).await?;

    Ok(Json(messages.into_iter().map(MessageDto::from).collect()))
}

/// /poll?id=
pub async fn poll(
    State(state): State<AppState>,
    Query(query): Query<ChatQuery>,
) -> ApiResult<Json<PollResponse>> {
    let client_id = query.client_id()?;

    let messages = state.coordinator.poll(&client_id).await?;

    Ok(Json(PollResponse { messages }))
}
