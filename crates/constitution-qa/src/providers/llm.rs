//! LLM provider trait for generating answers

use async_trait::async_trait;

use crate::error::Result;

/// Trait for free-text generation from an assembled prompt
///
/// Implementations:
/// - `GeminiClient`: Google Generative Language API (gemini-2.5-flash)
#[async_trait]
pub trait LlmProvider: Send + Sync {
    /// Send the prompt and return the model's raw text output
    async fn generate(&self, prompt: &str) -> Result<String>;

    /// Get provider name for logging
    fn name(&self) -> &str;

    /// Get the model being used
    fn model(&self) -> &str;
}
