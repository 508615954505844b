mod chat_query;
mod error;
