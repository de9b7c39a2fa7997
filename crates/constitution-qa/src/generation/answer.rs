//! Answer generation with a configurable failure policy

use std::sync::Arc;

use crate::config::GenerationFailureMode;
use crate::error::{Error, Result};
use crate::generation::prompt::{PromptBuilder, NO_CONTEXT_ANSWER};
use crate::providers::LlmProvider;
use crate::types::RetrievedPassage;

/// Prefix of the answer text produced when generation fails in
/// [`GenerationFailureMode::Embed`]
pub const GENERATION_ERROR_PREFIX: &str = "Error generating answer: ";

/// Wraps an [`LlmProvider`] and decides what a generation failure becomes
#[derive(Clone)]
pub struct AnswerGenerator {
    llm: Arc<dyn LlmProvider>,
    failure_mode: GenerationFailureMode,
}

impl AnswerGenerator {
    pub fn new(llm: Arc<dyn LlmProvider>, failure_mode: GenerationFailureMode) -> Self {
        Self { llm, failure_mode }
    }

    /// Generate an answer for an assembled prompt
    ///
    /// The model output is returned unmodified. On failure, `Embed` turns the
    /// error into answer text and `Propagate` returns [`Error::Llm`].
    pub async fn generate(&self, prompt: &str) -> Result<String> {
        match self.llm.generate(prompt).await {
            Ok(answer) => Ok(answer),
            Err(e) => {
                tracing::error!(
                    provider = self.llm.name(),
                    model = self.llm.model(),
                    error = %e,
                    "Answer generation failed"
                );
                let message = match e {
                    Error::Llm(message) => message,
                    other => other.to_string(),
                };
                match self.failure_mode {
                    GenerationFailureMode::Embed => {
                        Ok(format!("{}{}", GENERATION_ERROR_PREFIX, message))
                    }
                    GenerationFailureMode::Propagate => Err(Error::Llm(message)),
                }
            }
        }
    }

    /// Build the prompt for `passages` and generate an answer from it
    ///
    /// With no passages the model is not called and [`NO_CONTEXT_ANSWER`] is
    /// returned.
    pub async fn answer(
        &self,
        prompts: &PromptBuilder,
        question: &str,
        passages: &[RetrievedPassage],
    ) -> Result<String> {
        match prompts.build_prompt(question, passages) {
            Some(prompt) => self.generate(&prompt).await,
            None => Ok(NO_CONTEXT_ANSWER.to_string()),
        }
    }

    /// Model identifier of the underlying provider
    pub fn model(&self) -> &str {
        self.llm.model()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct FixedLlm(std::result::Result<&'static str, &'static str>);

    #[async_trait]
    impl LlmProvider for FixedLlm {
        async fn generate(&self, _prompt: &str) -> Result<String> {
            self.0.map(str::to_string).map_err(Error::llm)
        }

        fn name(&self) -> &str {
            "fixed"
        }

        fn model(&self) -> &str {
            "gemini-2.5-flash"
        }
    }

    #[derive(Default)]
    struct CountingLlm {
        calls: AtomicUsize,
    }

    #[async_trait]
    impl LlmProvider for CountingLlm {
        async fn generate(&self, prompt: &str) -> Result<String> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(format!("{} chars", prompt.chars().count()))
        }

        fn name(&self) -> &str {
            "counting"
        }

        fn model(&self) -> &str {
            "gemini-2.5-flash"
        }
    }

    #[tokio::test]
    async fn test_output_is_returned_unmodified() {
        let raw = "**Article 25** says:\n# equality";
        let generator = AnswerGenerator::new(Arc::new(FixedLlm(Ok(raw))), GenerationFailureMode::Embed);
        assert_eq!(generator.generate("p").await.unwrap(), raw);
        assert_eq!(generator.model(), "gemini-2.5-flash");
    }

    #[tokio::test]
    async fn test_embed_mode_returns_error_text() {
        let generator = AnswerGenerator::new(
            Arc::new(FixedLlm(Err("quota exceeded"))),
            GenerationFailureMode::Embed,
        );
        assert_eq!(
            generator.generate("p").await.unwrap(),
            "Error generating answer: quota exceeded"
        );
    }

    #[tokio::test]
    async fn test_propagate_mode_returns_llm_error() {
        let generator = AnswerGenerator::new(
            Arc::new(FixedLlm(Err("quota exceeded"))),
            GenerationFailureMode::Propagate,
        );
        let err = generator.generate("p").await.unwrap_err();
        assert!(matches!(err, Error::Llm(ref m) if m == "quota exceeded"));
        assert_eq!(err.status_code(), axum::http::StatusCode::SERVICE_UNAVAILABLE);
    }

    #[tokio::test]
    async fn test_answer_without_passages_skips_the_model() {
        let llm = Arc::new(CountingLlm::default());
        let generator = AnswerGenerator::new(llm.clone(), GenerationFailureMode::Embed);
        let prompts = PromptBuilder::new("the Constitution of Pakistan");

        let answer = generator.answer(&prompts, "What is Article 25?", &[]).await.unwrap();
        assert_eq!(answer, NO_CONTEXT_ANSWER);
        assert_eq!(llm.calls.load(Ordering::SeqCst), 0);

        let passages = [RetrievedPassage {
            article: "25".to_string(),
            text: "All citizens are equal before law.".to_string(),
            ..Default::default()
        }];
        let answer = generator.answer(&prompts, "What is Article 25?", &passages).await.unwrap();
        assert!(answer.ends_with(" chars"));
        assert_eq!(llm.calls.load(Ordering::SeqCst), 1);
    }
}
