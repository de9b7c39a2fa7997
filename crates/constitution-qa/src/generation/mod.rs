//! Prompt assembly, answer generation, and citation handling

pub mod answer;
pub mod citation;
pub mod prompt;

pub use answer::{AnswerGenerator, GENERATION_ERROR_PREFIX};
pub use citation::assemble;
pub use prompt::{PromptBuilder, NO_CONTEXT_ANSWER};
