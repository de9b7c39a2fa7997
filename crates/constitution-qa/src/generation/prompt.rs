//! Prompt templates for answer generation

use crate::types::RetrievedPassage;

/// Answer used when there is no context to ground a prompt in
pub const NO_CONTEXT_ANSWER: &str =
    "I couldn't find relevant information in the Constitution to answer your question.";

/// Prompt builder for legal-text questions
#[derive(Debug, Clone)]
pub struct PromptBuilder {
    corpus_name: String,
}

impl PromptBuilder {
    /// `corpus_name` is the legal text's name as it reads mid-sentence,
    /// e.g. "the Constitution of Pakistan"; it only fills the opening line
    pub fn new(corpus_name: impl Into<String>) -> Self {
        Self {
            corpus_name: corpus_name.into(),
        }
    }

    /// Build context from retrieved passages, in retrieval order
    ///
    /// Each passage becomes `"\n<label>:\n<text>\n"`, where the label is
    /// `Article <article>` (or `Source <i>` when the article is unknown)
    /// followed by ` - <title>` when a title is present.
    pub fn build_context(passages: &[RetrievedPassage]) -> String {
        let mut context = String::new();

        for (i, passage) in passages.iter().enumerate() {
            let label = if passage.article.is_empty() {
                format!("Source {}", i + 1)
            } else {
                format!("Article {}", passage.article)
            };

            let title = if passage.title.is_empty() {
                String::new()
            } else {
                format!(" - {}", passage.title)
            };

            context.push_str(&format!("\n{}{}:\n{}\n", label, title, passage.text));
        }

        context
    }

    /// Build the full prompt, or `None` when there are no passages
    pub fn build_prompt(&self, question: &str, passages: &[RetrievedPassage]) -> Option<String> {
        if passages.is_empty() {
            return None;
        }

        let context = Self::build_context(passages);

        Some(format!(
            r#"You are a friendly legal expert assistant specializing in {corpus}.

QUESTION: {question}

CONTEXT FROM CONSTITUTION:
{context}

INSTRUCTIONS FOR YOUR RESPONSE:

1. Structure your answer clearly:
   - Start with a brief 1-2 sentence summary answering the question directly
   - Then provide details using bullet points
   - Keep it concise and easy to read

2. Formatting Rules:
   - Do NOT use any markdown formatting (no **, no *, no #, no headings)
   - Use simple bullet points with "•" for lists
   - Keep paragraphs short (2-3 sentences max)
   - Use plain text only
   - Mention Article numbers naturally (e.g., "Article 25 states that...")

3. Content Rules:
   - Primarily use the provided context from the Constitution
   - If the context doesn't fully answer the question, you may supplement with your general knowledge about Pakistan's Constitution
   - Do NOT use citation numbers like [1], [2], etc.

4. Example Format:
   Article 25 establishes the principle of equality before law.

   Key points:
   • All citizens are equal before law
   • No discrimination based on sex
   • State can make special provisions for women and children

Now provide a clear, plain-text answer:"#,
            corpus = self.corpus_name,
            question = question,
            context = context,
        ))
    }
}
