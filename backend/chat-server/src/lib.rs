pub mod api;
pub mod app_state;
pub mod error;
pub mod health;
pub mod logger;
pub mod metrics;
pub mod routes;

#[cfg(test)]
mod tests;

pub use api::{
    chat::{
        chat::{history, join, leave, poll, send},
        chat_query::ChatQuery,
        join_response::JoinResponse,
        leave_response::LeaveResponse,
        message_dto::MessageDto,
        poll_response::PollResponse,
        send_response::SendResponse,
    },
    error::ApiError,
    error::Result as ApiResult,
};
pub use app_state::AppState;

pub use crate::routes::build_router;
