use serde::{Deserialize, Serialize};

/// A single ranked hit returned by a web search provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchResult {
    title: String,
    url: String,
    snippet: String,
}

impl SearchResult {
    pub fn new(
        title: impl Into<String>,
        url: impl Into<String>,
        snippet: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            url: url.into(),
            snippet: snippet.into(),
        }
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn snippet(&self) -> &str {
        &self.snippet
    }

    /// One line of grounding context, e.g. `- France: Paris is ... (source: https://...)`.
    pub fn context_line(&self) -> String {
        format!("- {}: {} (source: {})", self.title, self.snippet, self.url)
    }
}
