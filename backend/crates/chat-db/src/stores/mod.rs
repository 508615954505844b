pub mod sqlite_message_store;
