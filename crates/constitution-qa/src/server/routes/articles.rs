//! Article sample endpoint

use axum::{extract::State, Json};

use crate::retrieval::sample_articles;
use crate::server::state::AppState;
use crate::types::ArticlesResponse;

/// GET /articles - Sample of article identifiers present in the index
pub async fn list_articles(State(state): State<AppState>) -> Json<ArticlesResponse> {
    let available_articles = sample_articles(state.retriever()).await;
    tracing::debug!(count = available_articles.len(), "Sampled articles");

    Json(ArticlesResponse { available_articles })
}
