//! Question-answering endpoint

use std::time::Instant;

use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};

use crate::config::RetrievalFailureMode;
use crate::error::{Error, Result};
use crate::generation::assemble;
use crate::server::state::AppState;
use crate::types::{QueryRequest, QueryResponse};

/// POST /ask - Answer a question with citations
pub async fn ask(
    State(state): State<AppState>,
    payload: std::result::Result<Json<QueryRequest>, JsonRejection>,
) -> Result<Json<QueryResponse>> {
    let Json(request) = payload?;
    let start = Instant::now();

    let retrieval = &state.config().retrieval;
    let top_k = request.validate(retrieval.default_top_k, retrieval.max_top_k)?;

    tracing::info!(top_k, "Question: \"{}\"", request.question);

    let passages = match state.retriever().try_search(&request.question, top_k).await {
        Ok(passages) => passages,
        Err(e) => match retrieval.failure_mode {
            RetrievalFailureMode::NotFound => {
                tracing::error!(error = %e, "Error searching index");
                Vec::new()
            }
            RetrievalFailureMode::BadGateway => {
                return Err(match e {
                    Error::UpstreamStatus { .. } | Error::Http(_) | Error::VectorDb(_) => e,
                    other => Error::vector_db(other.to_string()),
                });
            }
        },
    };

    if passages.is_empty() {
        return Err(Error::not_found("No relevant articles found"));
    }

    let answer = state
        .generator()
        .answer(state.prompts(), &request.question, &passages)
        .await?;

    let response = assemble(&request.question, &passages, answer);

    tracing::info!(
        sources = response.num_sources,
        elapsed_ms = start.elapsed().as_millis() as u64,
        "Answered question"
    );

    Ok(Json(response))
}
