use async_trait::async_trait;

use crate::application::ChatClient;
use crate::domain::{DomainError, PromptContext};

/// Offline stand-in for a real LLM: answers by quoting the user turn back.
///
/// Grounded prompts are answered with the first web-context line so the
/// whole web-mode path can be exercised without credentials.
pub struct MockChatClient;

impl MockChatClient {
    pub fn new() -> Self {
        Self
    }
}

impl Default for MockChatClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ChatClient for MockChatClient {
    async fn complete(&self, prompt: &PromptContext) -> Result<String, DomainError> {
        let user = prompt
            .user_text()
            .ok_or_else(|| DomainError::invalid_input("prompt has no user turn"))?;

        let context = user
            .strip_prefix("Web context:\n")
            .and_then(|rest| rest.lines().next());

        Ok(match context {
            Some(line) => format!("Meow. The web says: {}", line.trim_start_matches("- ")),
            None => format!("Meow. You said: {user}"),
        })
    }

    fn model_name(&self) -> &str {
        "mock-chat"
    }
}
