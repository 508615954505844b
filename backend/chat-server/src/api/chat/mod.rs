#[allow(clippy::module_inception)]
pub mod chat;
pub mod chat_query;
pub mod join_response;
pub mod leave_response;
pub mod message_dto;
pub mod poll_response;
pub mod send_response;
