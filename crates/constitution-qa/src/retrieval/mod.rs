//! Retrieval of passages from the vector index

pub mod articles;
pub mod search;

pub use articles::sample_articles;
pub use search::PassageRetriever;
