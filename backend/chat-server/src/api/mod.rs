pub mod chat;
pub mod error;
