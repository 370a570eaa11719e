use async_trait::async_trait;

use crate::domain::{DomainError, PromptContext};

/// An interface for sending a role-tagged prompt to an LLM and receiving the
/// generated text.
///
/// Implementors encapsulate transport, serialization, and vendor-specific API
/// details so the chat use case stays decoupled from any provider.
#[async_trait]
pub trait ChatClient: Send + Sync {
    /// Send the turns and return the assistant's response text.
    ///
    /// Network failures, non-success statuses and bodies without text are
    /// reported as [`DomainError::Upstream`]. A missing credential is a
    /// [`DomainError::Configuration`] and must be raised before any I/O.
    async fn complete(&self, prompt: &PromptContext) -> Result<String, DomainError>;

    fn model_name(&self) -> &str;
}
