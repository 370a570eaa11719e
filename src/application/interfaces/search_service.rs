use async_trait::async_trait;

use crate::domain::{DomainError, SearchResult};

/// Looks up web results used to ground a chat answer.
#[async_trait]
pub trait SearchService: Send + Sync {
    /// Return at most `limit` results, best first.
    ///
    /// Zero matches is `Ok(vec![])`, never an error.
    async fn search(&self, query: &str, limit: usize) -> Result<Vec<SearchResult>, DomainError>;

    fn provider_name(&self) -> &str;
}
