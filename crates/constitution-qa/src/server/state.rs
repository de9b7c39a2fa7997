//! Application state for the question-answering server

use std::sync::Arc;

use crate::config::QaConfig;
use crate::error::Result;
use crate::generation::{AnswerGenerator, PromptBuilder};
use crate::providers::{GeminiClient, LlmProvider, PineconeSearch, VectorSearchProvider};
use crate::retrieval::PassageRetriever;

/// Shared application state
///
/// Everything here is built once at startup and read-only afterwards.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    /// Configuration
    config: QaConfig,
    /// Vector search over the passage index
    retriever: PassageRetriever,
    /// LLM provider with the configured failure policy
    generator: AnswerGenerator,
    /// Prompt template bound to the corpus name
    prompts: PromptBuilder,
}

impl AppState {
    /// Create new application state, connecting to the upstream services
    pub async fn new(config: QaConfig) -> Result<Self> {
        tracing::info!("Initializing application state...");

        let vector: Arc<dyn VectorSearchProvider> =
            Arc::new(PineconeSearch::connect(&config.vector).await?);
        tracing::info!("Vector search ready (index: {})", vector.index_name());

        let llm: Arc<dyn LlmProvider> = Arc::new(GeminiClient::new(&config.llm)?);
        if config.llm.api_key.is_none() {
            tracing::warn!("GOOGLE_API_KEY is not set; answer generation will fail");
        }
        tracing::info!("LLM provider ready (model: {})", llm.model());

        Ok(Self::from_parts(config, vector, llm))
    }

    /// Assemble state from already-built providers
    pub fn from_parts(
        config: QaConfig,
        vector: Arc<dyn VectorSearchProvider>,
        llm: Arc<dyn LlmProvider>,
    ) -> Self {
        let retriever = PassageRetriever::new(vector);
        let generator = AnswerGenerator::new(llm, config.generation.failure_mode);
        let prompts = PromptBuilder::new(config.generation.corpus_name.clone());

        Self {
            inner: Arc::new(AppStateInner {
                config,
                retriever,
                generator,
                prompts,
            }),
        }
    }

    /// Get configuration
    pub fn config(&self) -> &QaConfig {
        &self.inner.config
    }

    /// Get passage retriever
    pub fn retriever(&self) -> &PassageRetriever {
        &self.inner.retriever
    }

    /// Get answer generator
    pub fn generator(&self) -> &AnswerGenerator {
        &self.inner.generator
    }

    /// Get prompt builder
    pub fn prompts(&self) -> &PromptBuilder {
        &self.inner.prompts
    }
}
