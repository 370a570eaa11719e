use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, error, warn};

use crate::application::SearchService;
use crate::domain::{DomainError, SearchResult};

/// Tries search providers in priority order and stops at the first one that
/// returns at least one result.
///
/// A provider that errors is logged and skipped. When no provider has results:
/// a misconfigured provider's [`DomainError::Configuration`] is returned so it
/// is never mistaken for "no results"; otherwise, if every provider errored the
/// last error is returned, and if any answered with zero results the chain
/// answers with an empty list.
pub struct FallbackSearch {
    providers: Vec<Arc<dyn SearchService>>,
}

impl FallbackSearch {
    pub fn new(providers: Vec<Arc<dyn SearchService>>) -> Self {
        Self { providers }
    }

    pub fn len(&self) -> usize {
        self.providers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.providers.is_empty()
    }
}

#[async_trait]
impl SearchService for FallbackSearch {
    async fn search(&self, query: &str, limit: usize) -> Result<Vec<SearchResult>, DomainError> {
        let mut last_error = None;
        let mut config_error = None;
        let mut answered_empty = false;

        for provider in &self.providers {
            match provider.search(query, limit).await {
                Ok(results) if !results.is_empty() => {
                    debug!(
                        "{} returned {} results",
                        provider.provider_name(),
                        results.len()
                    );
                    return Ok(results);
                }
                Ok(_) => {
                    debug!("{} returned no results", provider.provider_name());
                    answered_empty = true;
                }
                Err(e) if e.is_configuration() => {
                    error!("Search provider {} is misconfigured: {}", provider.provider_name(), e);
                    config_error.get_or_insert(e);
                }
                Err(e) => {
                    warn!("Search error ({}): {}", provider.provider_name(), e);
                    last_error = Some(e);
                }
            }
        }

        if let Some(e) = config_error {
            return Err(e);
        }
        match last_error {
            Some(e) if !answered_empty => Err(e),
            _ => Ok(vec![]),
        }
    }

    fn provider_name(&self) -> &str {
        "fallback"
    }
}
