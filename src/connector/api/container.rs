use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, error, info};

use crate::application::{ChatClient, ChatUseCase, SearchService, DEFAULT_SEARCH_LIMIT};
use crate::connector::adapter::{
    DuckDuckGoClient, FallbackSearch, HttpSearchClient, MockChatClient, MockSearch, OpenAiClient,
};

/// Upstream timeout used when none is configured.
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

pub struct ContainerConfig {
    /// Use offline mock providers instead of the real LLM and search APIs.
    pub mock_providers: bool,
    /// Bound on each outbound provider call.
    pub timeout: Duration,
    /// Number of search results folded into web-mode prompts.
    pub search_limit: usize,
}

impl Default for ContainerConfig {
    fn default() -> Self {
        Self {
            mock_providers: false,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            search_limit: DEFAULT_SEARCH_LIMIT,
        }
    }
}

/// Wires provider adapters to the chat use case. Built once at startup and
/// read-only afterwards.
pub struct Container {
    chat_client: Arc<dyn ChatClient>,
    search_service: Arc<dyn SearchService>,
    config: ContainerConfig,
}

impl Container {
    /// Build the container from `config` plus the provider settings found in
    /// the process environment.
    pub fn new(config: ContainerConfig) -> Self {
        let (chat_client, search_service): (Arc<dyn ChatClient>, Arc<dyn SearchService>) =
            if config.mock_providers {
                debug!("Using mock chat and search providers");
                (Arc::new(MockChatClient::new()), Arc::new(MockSearch::new()))
            } else {
                let openai = OpenAiClient::from_env(config.timeout);
                if openai.has_api_key() {
                    info!("Using OpenAI-compatible model {}", openai.model_name());
                } else {
                    error!("OPENAI_API_KEY is not set; chat requests will fail until it is configured");
                }

                let mut providers: Vec<Arc<dyn SearchService>> = Vec::new();
                if let Some(http) = HttpSearchClient::from_env(config.timeout) {
                    if http.has_api_key() {
                        debug!("Primary search endpoint: {}", http.endpoint());
                    } else {
                        error!(
                            "SEARCH_API_ENDPOINT is set to {} but SEARCH_API_KEY is not; that provider will be skipped",
                            http.endpoint()
                        );
                    }
                    providers.push(Arc::new(http));
                }
                providers.push(Arc::new(HttpSearchClient::community_proxy(config.timeout)));
                providers.push(Arc::new(DuckDuckGoClient::with_default_url(config.timeout)));

                let search = FallbackSearch::new(providers);
                debug!("Search chain has {} providers", search.len());

                (Arc::new(openai), Arc::new(search))
            };

        Self::with_providers(chat_client, search_service, config)
    }

    /// Build a container around explicit providers.
    pub fn with_providers(
        chat_client: Arc<dyn ChatClient>,
        search_service: Arc<dyn SearchService>,
        config: ContainerConfig,
    ) -> Self {
        Self {
            chat_client,
            search_service,
            config,
        }
    }

    pub fn chat_use_case(&self) -> ChatUseCase {
        ChatUseCase::new(self.chat_client.clone())
            .with_search(self.search_service.clone())
            .with_search_limit(self.config.search_limit)
    }

    pub fn model_name(&self) -> &str {
        self.chat_client.model_name()
    }

    pub fn timeout(&self) -> Duration {
        self.config.timeout
    }
}
