pub mod error;
pub mod message_store;
pub mod stores;


pub use error::{DbError, Result};
pub use message_store::MessageStore;
pub use stores::sqlite_message_store::{SqliteMessageStore, run_migrations};
