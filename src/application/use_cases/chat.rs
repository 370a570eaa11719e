use std::sync::Arc;
use std::time::Instant;

use tracing::{info, warn};

use crate::application::{ChatClient, SearchService};
use crate::domain::{ChatRequest, ChatResponse, DomainError, PromptContext, SearchResult};

/// Number of search results folded into the prompt unless configured otherwise.
pub const DEFAULT_SEARCH_LIMIT: usize = 3;

/// Persona shared by both modes.
pub const SYSTEM_PROMPT: &str = "\
You are Boog, a sassy but helpful research cat. \
Provide concise, accurate answers. \
When the user's message includes web context, base your answer on it and cite facts \
inline as (source). If the web context is empty, say politely that you couldn't find \
current info.";

const NO_RESULTS_LINE: &str = "(No relevant results found.)";

/// Render the user turn for a web-mode request whose search succeeded.
///
/// The output depends only on `message` and `results`, in order.
pub fn grounded_user_turn(message: &str, results: &[SearchResult]) -> String {
    let context = if results.is_empty() {
        NO_RESULTS_LINE.to_string()
    } else {
        results
            .iter()
            .map(SearchResult::context_line)
            .collect::<Vec<_>>()
            .join("\n")
    };

    format!("Web context:\n{context}\n\nUser question: {message}")
}

/// Handles one chat exchange: optional web search, prompt assembly, completion.
pub struct ChatUseCase {
    chat_client: Arc<dyn ChatClient>,
    search_service: Option<Arc<dyn SearchService>>,
    search_limit: usize,
}

impl ChatUseCase {
    pub fn new(chat_client: Arc<dyn ChatClient>) -> Self {
        Self {
            chat_client,
            search_service: None,
            search_limit: DEFAULT_SEARCH_LIMIT,
        }
    }

    pub fn with_search(mut self, service: Arc<dyn SearchService>) -> Self {
        self.search_service = Some(service);
        self
    }

    pub fn with_search_limit(mut self, limit: usize) -> Self {
        self.search_limit = limit.max(1);
        self
    }

    pub fn search_limit(&self) -> usize {
        self.search_limit
    }

    pub async fn execute(&self, request: &ChatRequest) -> Result<ChatResponse, DomainError> {
        let (message, mode) = request.validate()?;

        info!("Chat request (mode={}, model={})", mode, self.chat_client.model_name());
        let start_time = Instant::now();

        let user_turn = if mode.uses_search() {
            match self.ground(message).await {
                Some(results) => {
                    info!("Grounding prompt with {} search results", results.len());
                    grounded_user_turn(message, &results)
                }
                None => message.to_string(),
            }
        } else {
            message.to_string()
        };

        let prompt = PromptContext::new()
            .with_system(SYSTEM_PROMPT)
            .with_user(user_turn);

        let text = self.chat_client.complete(&prompt).await?;
        let text = text.trim();
        if text.is_empty() {
            return Err(DomainError::upstream("language model returned an empty response"));
        }

        info!(
            "Chat response ready in {:.2}s",
            start_time.elapsed().as_secs_f64()
        );

        Ok(ChatResponse::new(text))
    }

    /// Search for grounding context. `None` means search was unavailable and
    /// the prompt goes out without any context block.
    async fn ground(&self, query: &str) -> Option<Vec<SearchResult>> {
        let Some(ref service) = self.search_service else {
            warn!("Web mode requested but no search provider is configured");
            return None;
        };

        match service.search(query, self.search_limit).await {
            Ok(mut results) => {
                results.truncate(self.search_limit);
                Some(results)
            }
            Err(e) => {
                warn!(
                    "Search via {} failed: {}. Continuing without web context.",
                    service.provider_name(),
                    e
                );
                None
            }
        }
    }
}
