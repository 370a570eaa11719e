pub mod application;
pub mod cli;
pub mod connector;
pub mod domain;

pub use application::{ChatClient, ChatUseCase, SearchService};

pub use cli::Commands;

pub use connector::{
    app, ApiError, Container, ContainerConfig, DuckDuckGoClient, FallbackSearch, HttpSearchClient,
    MockChatClient, MockSearch, OpenAiClient,
};

pub use domain::{
    ChatMode, ChatRequest, ChatResponse, DomainError, PromptContext, Role, SearchResult, Turn,
};
