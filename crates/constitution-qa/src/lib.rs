//! constitution-qa: question answering over a legal text with cited articles
//!
//! A question is sent as raw text to a managed vector index, the retrieved
//! passages are placed into a fixed prompt, and a hosted LLM writes the
//! answer. Responses carry one citation per retrieved passage.

pub mod config;
pub mod error;
pub mod generation;
pub mod providers;
pub mod retrieval;
pub mod server;
pub mod types;

pub use config::QaConfig;
pub use error::{Error, Result};
pub use types::{
    passage::RetrievedPassage,
    query::QueryRequest,
    response::{Citation, QueryResponse},
};
