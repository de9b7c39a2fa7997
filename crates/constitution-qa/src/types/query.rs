//! Query request types

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Body of `POST /ask`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct QueryRequest {
    /// The question to answer, echoed back exactly as received
    pub question: String,

    /// Number of passages to retrieve; `None` means the configured default
    #[serde(default)]
    pub top_k: Option<usize>,
}

impl QueryRequest {
    /// Create a new query
    pub fn new(question: impl Into<String>) -> Self {
        Self {
            question: question.into(),
            top_k: None,
        }
    }

    /// Set number of passages to retrieve
    pub fn with_top_k(mut self, top_k: usize) -> Self {
        self.top_k = Some(top_k);
        self
    }

    /// Check the request and resolve the effective `top_k`
    ///
    /// Runs before any upstream call, so a rejected request never reaches
    /// retrieval or generation.
    pub fn validate(&self, default_top_k: usize, max_top_k: usize) -> Result<usize> {
        if self.question.trim().is_empty() {
            return Err(Error::validation("Question cannot be empty"));
        }

        let top_k = self.top_k.unwrap_or(default_top_k);
        if top_k == 0 || top_k > max_top_k {
            return Err(Error::validation(format!(
                "top_k must be between 1 and {}",
                max_top_k
            )));
        }

        Ok(top_k)
    }
}
