pub mod error;
pub mod models;

#[cfg(test)]
mod tests;

pub use error::{CoreError, Result};
pub use models::client_id::ClientId;
pub use models::message::Message;

/// Upper bound for an identifier, in bytes.
pub const MAX_CLIENT_ID_LENGTH: usize = 128;
