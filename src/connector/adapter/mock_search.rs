use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

use async_trait::async_trait;

use crate::application::SearchService;
use crate::domain::{DomainError, SearchResult};

/// Deterministic offline search provider. The same query always yields the
/// same results.
pub struct MockSearch;

impl MockSearch {
    pub fn new() -> Self {
        Self
    }
}

impl Default for MockSearch {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SearchService for MockSearch {
    async fn search(&self, query: &str, limit: usize) -> Result<Vec<SearchResult>, DomainError> {
        let query_hash = {
            let mut hasher = DefaultHasher::new();
            query.hash(&mut hasher);
            hasher.finish()
        };

        Ok((0..limit)
            .map(|i| {
                SearchResult::new(
                    format!("Result {} for {}", i + 1, query),
                    format!("https://example.com/{:x}/{}", query_hash, i + 1),
                    format!("Mock snippet {} about {}.", i + 1, query),
                )
            })
            .collect())
    }

    fn provider_name(&self) -> &str {
        "mock-search"
    }
}
