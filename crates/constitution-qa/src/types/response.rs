//! Response types for the HTTP API

use serde::{Deserialize, Serialize};

/// Citation of a retrieved passage shown alongside the answer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Citation {
    /// Ordinal tag in retrieval order, `"[1]"`, `"[2]"`, ...
    #[serde(rename = "ref")]
    pub reference: String,
    /// Article identifier, empty when the passage had none
    pub article: String,
    /// Title, at most 100 characters
    pub title: String,
    /// Similarity score rounded to 4 decimals
    pub score: f64,
    /// First 200 characters of the passage followed by `...`
    pub text_preview: String,
}

/// Response from `POST /ask`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QueryResponse {
    /// The question as received
    pub question: String,
    /// Generated answer (or the degraded failure text)
    pub answer: String,
    /// Citations in retrieval order
    pub citations: Vec<Citation>,
    /// Always equal to `citations.len()`
    pub num_sources: usize,
}

impl QueryResponse {
    /// Create a new query response
    pub fn new(question: impl Into<String>, answer: impl Into<String>, citations: Vec<Citation>) -> Self {
        Self {
            question: question.into(),
            answer: answer.into(),
            num_sources: citations.len(),
            citations,
        }
    }
}

/// Response from `GET /`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub index: String,
    pub model: String,
}

impl HealthResponse {
    pub fn healthy(index: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            status: "healthy".to_string(),
            index: index.into(),
            model: model.into(),
        }
    }
}

/// Response from `GET /articles`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArticlesResponse {
    pub available_articles: Vec<String>,
}

/// Error body, `{"detail": "..."}`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorBody {
    pub detail: String,
}
