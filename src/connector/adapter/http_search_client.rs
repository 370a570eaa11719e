use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;
use tracing::warn;

use crate::application::SearchService;
use crate::domain::{DomainError, SearchResult};

#[derive(Deserialize)]
struct ApiResponse {
    #[serde(default)]
    results: Vec<ApiResult>,
}

/// SearXNG-style endpoints name the excerpt `content`; others use `snippet`.
#[derive(Deserialize)]
struct ApiResult {
    #[serde(default)]
    title: String,
    #[serde(default, alias = "link", alias = "href")]
    url: String,
    #[serde(default, alias = "content", alias = "body")]
    snippet: String,
}

/// Community DuckDuckGo search proxy speaking the same JSON schema.
pub const COMMUNITY_PROXY_URL: &str = "https://ddg-webapp-search.vercel.app/api/search";

/// Client for a JSON search endpoint queried as
/// `GET {endpoint}?q=<query>&max_results=<n>` and answering
/// `{"results": [{"title", "url", "snippet"}]}`.
///
/// Endpoints built with [`HttpSearchClient::new`] require an API key and fail
/// with [`DomainError::Configuration`] without one; [`HttpSearchClient::keyless`]
/// endpoints are queried anonymously.
pub struct HttpSearchClient {
    client: reqwest::Client,
    name: &'static str,
    endpoint: String,
    api_key: Option<String>,
    requires_key: bool,
}

impl HttpSearchClient {
    pub fn new(endpoint: impl Into<String>, api_key: Option<String>, timeout: Duration) -> Self {
        Self {
            client: reqwest::Client::builder()
                .timeout(timeout)
                .build()
                .unwrap_or_default(),
            name: "http-search",
            endpoint: endpoint.into(),
            api_key: api_key.filter(|k| !k.trim().is_empty()),
            requires_key: true,
        }
    }

    pub fn keyless(endpoint: impl Into<String>, timeout: Duration) -> Self {
        Self {
            requires_key: false,
            ..Self::new(endpoint, None, timeout)
        }
    }

    pub fn community_proxy(timeout: Duration) -> Self {
        Self {
            name: "ddg-community-proxy",
            ..Self::keyless(COMMUNITY_PROXY_URL, timeout)
        }
    }

    /// Reads `SEARCH_API_ENDPOINT` and `SEARCH_API_KEY`. Returns `None` when no
    /// endpoint is configured.
    pub fn from_env(timeout: Duration) -> Option<Self> {
        let endpoint = std::env::var("SEARCH_API_ENDPOINT")
            .ok()
            .filter(|e| !e.trim().is_empty())?;
        let key = std::env::var("SEARCH_API_KEY").ok();
        Some(Self::new(endpoint, key, timeout))
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    pub fn has_api_key(&self) -> bool {
        self.api_key.is_some()
    }
}

#[async_trait]
impl SearchService for HttpSearchClient {
    async fn search(&self, query: &str, limit: usize) -> Result<Vec<SearchResult>, DomainError> {
        if self.requires_key && self.api_key.is_none() {
            return Err(DomainError::configuration(
                "SEARCH_API_KEY is not set for SEARCH_API_ENDPOINT",
            ));
        }

        let max_results = limit.to_string();
        let params = [("q", query), ("max_results", max_results.as_str())];

        let mut request = self.client.get(&self.endpoint).query(&params);
        if let Some(api_key) = &self.api_key {
            request = request.bearer_auth(api_key);
        }

        let response = request
            .send()
            .await
            .map_err(|e| DomainError::upstream(format!("HttpSearchClient: request failed: {e}")))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            warn!(
                "HttpSearchClient: {} returned {status}: {}",
                self.endpoint,
                body.chars().take(500).collect::<String>()
            );
            return Err(DomainError::upstream(format!(
                "HttpSearchClient: API returned {status}"
            )));
        }

        let api_response: ApiResponse = response.json().await.map_err(|e| {
            DomainError::upstream(format!("HttpSearchClient: failed to parse response: {e}"))
        })?;

        Ok(api_response
            .results
            .into_iter()
            .filter(|r| !r.url.is_empty() || !r.snippet.is_empty())
            .take(limit)
            .map(|r| SearchResult::new(r.title, r.url, r.snippet))
            .collect())
    }

    fn provider_name(&self) -> &str {
        self.name
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn api_result_accepts_searxng_field_names() {
        let json = r#"{"results": [{"title": "France", "url": "https://fr", "content": "Paris"}]}"#;
        let parsed: ApiResponse = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.results[0].snippet, "Paris");
    }

    #[test]
    fn missing_results_field_is_empty() {
        let parsed: ApiResponse = serde_json::from_str("{}").unwrap();
        assert!(parsed.results.is_empty());
    }

    #[tokio::test]
    async fn missing_api_key_is_configuration_error() {
        let client = HttpSearchClient::new("http://127.0.0.1:9/search", None, Duration::from_secs(1));
        assert!(!client.has_api_key());
        let err = client.search("anything", 3).await.unwrap_err();
        assert!(err.is_configuration());
    }

    #[test]
    fn community_proxy_needs_no_key() {
        let client = HttpSearchClient::community_proxy(Duration::from_secs(1));
        assert_eq!(client.endpoint(), COMMUNITY_PROXY_URL);
        assert_eq!(client.provider_name(), "ddg-community-proxy");
        assert!(!client.requires_key);
    }
}
