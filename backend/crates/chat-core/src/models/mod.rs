pub mod client_id;
pub mod message;
