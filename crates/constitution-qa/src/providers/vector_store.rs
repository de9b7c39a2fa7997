//! Vector search provider trait

use async_trait::async_trait;

use crate::error::Result;
use crate::types::RetrievedPassage;

/// Trait for text-in similarity search over the passage index
///
/// The query is sent as raw text; embedding happens inside the search
/// service. Results come back in the service's rank order.
///
/// Implementations:
/// - `PineconeSearch`: Pinecone integrated-inference index
#[async_trait]
pub trait VectorSearchProvider: Send + Sync {
    /// Search for the `top_k` passages most similar to `query`
    async fn search(&self, query: &str, top_k: usize) -> Result<Vec<RetrievedPassage>>;

    /// Name of the index being searched
    fn index_name(&self) -> &str;

    /// Get provider name for logging
    fn name(&self) -> &str;
}
