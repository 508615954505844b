mod client_id;
mod message;
