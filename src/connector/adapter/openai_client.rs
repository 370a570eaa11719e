use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::application::ChatClient;
use crate::domain::{DomainError, PromptContext};

pub const DEFAULT_BASE_URL: &str = "https://api.openai.com";
const COMPLETIONS_PATH: &str = "/v1/chat/completions";
/// Small, fast model; override with `OPENAI_MODEL`.
pub const DEFAULT_MODEL: &str = "gpt-4o-mini";
pub const DEFAULT_TEMPERATURE: f32 = 0.2;
const MAX_LOGGED_BODY_CHARS: usize = 500;

#[derive(Serialize)]
struct ApiRequest<'a> {
    model: &'a str,
    messages: Vec<ApiMessage<'a>>,
    temperature: f32,
}

#[derive(Serialize)]
struct ApiMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Deserialize)]
struct ApiResponse {
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Deserialize)]
struct ResponseMessage {
    content: Option<String>,
}

/// Upstream error bodies can be arbitrarily large; only a prefix is logged.
fn log_excerpt(body: &str) -> String {
    body.chars().take(MAX_LOGGED_BODY_CHARS).collect()
}

fn to_api_messages(prompt: &PromptContext) -> Vec<ApiMessage<'_>> {
    prompt
        .turns()
        .iter()
        .map(|t| ApiMessage {
            role: t.role().as_str(),
            content: t.text(),
        })
        .collect()
}

/// HTTP client for the OpenAI Chat Completions API and compatible servers.
///
/// Implements [`ChatClient`]. Configuration comes from the environment once at
/// startup (see [`OpenAiClient::from_env`]); a missing API key is not an error
/// until the first call, which then fails with [`DomainError::Configuration`]
/// without touching the network.
pub struct OpenAiClient {
    client: reqwest::Client,
    api_key: Option<String>,
    model: String,
    temperature: f32,
    /// Full endpoint URL (base + COMPLETIONS_PATH).
    url: String,
}

impl OpenAiClient {
    pub fn new(
        api_key: Option<String>,
        model: impl Into<String>,
        base_url: impl Into<String>,
        timeout: Duration,
    ) -> Self {
        let base: String = base_url.into();
        let url = format!("{}{}", base.trim_end_matches('/'), COMPLETIONS_PATH);
        Self {
            client: reqwest::Client::builder()
                .timeout(timeout)
                .build()
                .unwrap_or_default(),
            api_key: api_key.filter(|k| !k.trim().is_empty()),
            model: model.into(),
            temperature: DEFAULT_TEMPERATURE,
            url,
        }
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    /// Construct from environment variables:
    ///
    /// | Variable             | Default                  |
    /// |----------------------|--------------------------|
    /// | `OPENAI_API_KEY`     | none (calls fail fast)   |
    /// | `OPENAI_BASE_URL`    | `https://api.openai.com` |
    /// | `OPENAI_MODEL`       | `gpt-4o-mini`            |
    /// | `OPENAI_TEMPERATURE` | `0.2`                    |
    pub fn from_env(timeout: Duration) -> Self {
        let key = std::env::var("OPENAI_API_KEY").ok();
        let base =
            std::env::var("OPENAI_BASE_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());
        let model = std::env::var("OPENAI_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.to_string());
        let temperature = std::env::var("OPENAI_TEMPERATURE")
            .ok()
            .and_then(|t| t.parse::<f32>().ok())
            .unwrap_or(DEFAULT_TEMPERATURE);
        Self::new(key, model, base, timeout).with_temperature(temperature)
    }

    pub fn has_api_key(&self) -> bool {
        self.api_key.is_some()
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait]
impl ChatClient for OpenAiClient {
    async fn complete(&self, prompt: &PromptContext) -> Result<String, DomainError> {
        let api_key = self.api_key.as_deref().ok_or_else(|| {
            DomainError::configuration("OPENAI_API_KEY is not set; AI mode is unavailable")
        })?;

        let request = ApiRequest {
            model: &self.model,
            messages: to_api_messages(prompt),
            temperature: self.temperature,
        };

        debug!("OpenAiClient: calling {} with {} turns", self.model, prompt.len());

        let response = self
            .client
            .post(&self.url)
            .bearer_auth(api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    DomainError::upstream(format!("OpenAiClient: request timed out: {e}"))
                } else {
                    DomainError::upstream(format!("OpenAiClient: request failed: {e}"))
                }
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            warn!(
                "OpenAiClient: API returned {status}: {}",
                log_excerpt(&body)
            );
            return Err(DomainError::upstream(format!(
                "OpenAiClient: API returned {status}"
            )));
        }

        let api_response: ApiResponse = response.json().await.map_err(|e| {
            DomainError::upstream(format!("OpenAiClient: failed to parse response: {e}"))
        })?;

        let content = api_response
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .map(|c| c.trim().to_string())
            .unwrap_or_default();

        if content.is_empty() {
            return Err(DomainError::upstream(format!(
                "OpenAiClient: model '{}' returned no content",
                self.model
            )));
        }

        Ok(content)
    }

    fn model_name(&self) -> &str {
        &self.model
    }
}
