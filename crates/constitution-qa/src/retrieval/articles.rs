//! Sample of article identifiers present in the index
//!
//! There is no listing endpoint on the index, so the sample is gathered from a
//! few fixed searches. It is not an exhaustive catalogue.

use std::collections::BTreeSet;

use super::search::PassageRetriever;

/// Queries issued for the sample
pub const SAMPLE_QUERIES: [&str; 3] = ["fundamental rights", "president powers", "supreme court"];

/// Passages requested per query
pub const SAMPLE_TOP_K: usize = 3;

/// Upper bound on returned identifiers
pub const MAX_ARTICLES: usize = 20;

/// Distinct non-empty article identifiers from the sample queries, sorted
/// lexicographically and capped at [`MAX_ARTICLES`]
///
/// Queries run one after another; a failed query contributes nothing.
pub async fn sample_articles(retriever: &PassageRetriever) -> Vec<String> {
    let mut articles = BTreeSet::new();

    for query in SAMPLE_QUERIES {
        let passages = retriever.search(query, SAMPLE_TOP_K).await;
        articles.extend(
            passages
                .into_iter()
                .map(|p| p.article)
                .filter(|article| !article.is_empty()),
        );
    }

    articles.into_iter().take(MAX_ARTICLES).collect()
}
