//! Provider abstractions for vector search and answer generation
//!
//! Both upstream services sit behind async traits so the HTTP layer can be
//! driven with in-process fakes.

pub mod gemini;
pub mod llm;
pub mod pinecone;
pub mod vector_store;

pub use gemini::GeminiClient;
pub use llm::LlmProvider;
pub use pinecone::PineconeSearch;
pub use vector_store::VectorSearchProvider;
