//! Passage retrieval over the configured vector search provider

use std::sync::Arc;

use crate::error::Result;
use crate::providers::VectorSearchProvider;
use crate::types::RetrievedPassage;

/// Thin facade over a [`VectorSearchProvider`]
#[derive(Clone)]
pub struct PassageRetriever {
    provider: Arc<dyn VectorSearchProvider>,
}

impl PassageRetriever {
    pub fn new(provider: Arc<dyn VectorSearchProvider>) -> Self {
        Self { provider }
    }

    /// Search and surface upstream failures to the caller
    pub async fn try_search(&self, query: &str, top_k: usize) -> Result<Vec<RetrievedPassage>> {
        self.provider.search(query, top_k).await
    }

    /// Search, treating any upstream failure as "no passages"
    ///
    /// The failure is logged at error level and otherwise dropped, so callers
    /// cannot tell an outage from an empty result.
    pub async fn search(&self, query: &str, top_k: usize) -> Vec<RetrievedPassage> {
        match self.try_search(query, top_k).await {
            Ok(passages) => passages,
            Err(e) => {
                tracing::error!(
                    provider = self.provider.name(),
                    error = %e,
                    "Error searching index"
                );
                Vec::new()
            }
        }
    }

    /// Name of the underlying index
    pub fn index_name(&self) -> &str {
        self.provider.index_name()
    }
}
