mod chat_client;
mod search_service;

pub use chat_client::*;
pub use search_service::*;
