use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;
use tracing::warn;

use crate::application::SearchService;
use crate::domain::{DomainError, SearchResult};

pub const DEFAULT_BASE_URL: &str = "https://api.duckduckgo.com/";
const MAX_TITLE_CHARS: usize = 80;
const TITLE_SEPARATOR: &str = " – ";

#[derive(Deserialize)]
#[serde(rename_all = "PascalCase")]
struct InstantAnswer {
    #[serde(default)]
    related_topics: Vec<Topic>,
}

/// A related topic is either a leaf (`Text` + `FirstURL`) or a named group
/// holding more leaves under `Topics`.
#[derive(Deserialize)]
struct Topic {
    #[serde(rename = "Text")]
    text: Option<String>,
    #[serde(rename = "FirstURL")]
    first_url: Option<String>,
    #[serde(rename = "Topics", default)]
    topics: Vec<Topic>,
}

impl Topic {
    fn to_result(&self) -> Option<SearchResult> {
        let text = self.text.as_deref()?;
        let url = self.first_url.as_deref()?;
        Some(SearchResult::new(title_from_text(text), url, text))
    }
}

fn title_from_text(text: &str) -> String {
    text.split(TITLE_SEPARATOR)
        .next()
        .unwrap_or(text)
        .chars()
        .take(MAX_TITLE_CHARS)
        .collect()
}

fn flatten_topics(answer: &InstantAnswer) -> Vec<SearchResult> {
    let mut results = Vec::new();
    for topic in &answer.related_topics {
        if let Some(result) = topic.to_result() {
            results.push(result);
        } else {
            results.extend(topic.topics.iter().filter_map(Topic::to_result));
        }
    }
    results
}

/// Keyless client for the DuckDuckGo Instant Answer API.
///
/// Only `RelatedTopics` are used; nested topic groups are flattened in order.
pub struct DuckDuckGoClient {
    client: reqwest::Client,
    base_url: String,
}

impl DuckDuckGoClient {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Self {
        Self {
            client: reqwest::Client::builder()
                .timeout(timeout)
                .build()
                .unwrap_or_default(),
            base_url: base_url.into(),
        }
    }

    pub fn with_default_url(timeout: Duration) -> Self {
        Self::new(DEFAULT_BASE_URL, timeout)
    }
}

#[async_trait]
impl SearchService for DuckDuckGoClient {
    async fn search(&self, query: &str, limit: usize) -> Result<Vec<SearchResult>, DomainError> {
        let params = [("q", query), ("format", "json"), ("no_html", "1")];

        let response = self
            .client
            .get(&self.base_url)
            .query(&params)
            .send()
            .await
            .map_err(|e| DomainError::upstream(format!("DuckDuckGoClient: request failed: {e}")))?;

        if !response.status().is_success() {
            let status = response.status();
            warn!("DuckDuckGoClient: API returned {status}");
            return Err(DomainError::upstream(format!(
                "DuckDuckGoClient: API returned {status}"
            )));
        }

        // The API answers with `application/x-javascript`, so decode the text
        // rather than relying on the content type.
        let body = response
            .text()
            .await
            .map_err(|e| DomainError::upstream(format!("DuckDuckGoClient: failed to read body: {e}")))?;
        let answer: InstantAnswer = serde_json::from_str(&body).map_err(|e| {
            DomainError::upstream(format!("DuckDuckGoClient: failed to parse response: {e}"))
        })?;

        let mut results = flatten_topics(&answer);
        results.truncate(limit);
        Ok(results)
    }

    fn provider_name(&self) -> &str {
        "duckduckgo"
    }
}
