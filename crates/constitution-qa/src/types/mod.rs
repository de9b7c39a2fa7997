//! Core types for the question-answering service

pub mod passage;
pub mod query;
pub mod response;

pub use passage::RetrievedPassage;
pub use query::QueryRequest;
pub use response::{ArticlesResponse, Citation, ErrorBody, HealthResponse, QueryResponse};
