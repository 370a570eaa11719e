use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::domain::DomainError;

/// How a chat request is answered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatMode {
    /// Model only.
    Ai,
    /// Model grounded with web search results.
    Web,
}

impl ChatMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ChatMode::Ai => "ai",
            ChatMode::Web => "web",
        }
    }

    pub fn uses_search(&self) -> bool {
        matches!(self, ChatMode::Web)
    }
}

impl fmt::Display for ChatMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ChatMode {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "ai" => Ok(ChatMode::Ai),
            "web" => Ok(ChatMode::Web),
            _ => Err(DomainError::invalid_input("mode must be one of: ai, web")),
        }
    }
}

/// A chat message as submitted by the browser, before validation.
///
/// Both fields are optional so that a missing or `null` `message`, or an
/// unknown `mode`, surfaces as a descriptive [`DomainError::InvalidInput`]
/// from [`ChatRequest::validate`] instead of a generic decoding failure.
/// A missing `mode` means [`ChatMode::Ai`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatRequest {
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    mode: Option<String>,
}

impl ChatRequest {
    pub fn new(message: impl Into<String>, mode: ChatMode) -> Self {
        Self {
            message: Some(message.into()),
            mode: Some(mode.as_str().to_string()),
        }
    }

    pub fn with_raw_mode(mut self, mode: impl Into<String>) -> Self {
        self.mode = Some(mode.into());
        self
    }

    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    pub fn raw_mode(&self) -> &str {
        self.mode.as_deref().unwrap_or(ChatMode::Ai.as_str())
    }

    /// Check the request and return the trimmed message with its parsed mode.
    pub fn validate(&self) -> Result<(&str, ChatMode), DomainError> {
        let message = self.message.as_deref().map(str::trim).unwrap_or_default();
        if message.is_empty() {
            return Err(DomainError::invalid_input("message is required"));
        }
        let mode = self.raw_mode().parse::<ChatMode>()?;
        Ok((message, mode))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatResponse {
    response: String,
}

impl ChatResponse {
    pub fn new(response: impl Into<String>) -> Self {
        Self {
            response: response.into(),
        }
    }

    pub fn response(&self) -> &str {
        &self.response
    }

    pub fn into_response(self) -> String {
        self.response
    }
}
