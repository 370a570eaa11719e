mod duckduckgo_client;
mod fallback_search;
mod http_search_client;
mod mock_chat_client;
mod mock_search;
mod openai_client;

pub use duckduckgo_client::DuckDuckGoClient;
pub use fallback_search::*;
pub use http_search_client::*;
pub use mock_chat_client::*;
pub use mock_search::*;
pub use openai_client::OpenAiClient;
