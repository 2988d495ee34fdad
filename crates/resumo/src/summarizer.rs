//! One-shot summarization of a source text.
//!
//! Runs the lexical analysis, builds the prompt and issues exactly one
//! generation request. The model's text is returned as-is; cleanup of
//! markdown residue happens at render time.

use tracing::{debug, info};

use crate::client::TextGenerator;
use crate::error::RemoteServiceError;
use crate::lexical::{self, LexicalSummary};
use crate::prompt::build_prompt;

/// Summarizes text through a [`TextGenerator`].
pub struct Summarizer<'a, G: TextGenerator + ?Sized> {
    generator: &'a G,
}

impl<'a, G: TextGenerator + ?Sized> Summarizer<'a, G> {
    pub fn new(generator: &'a G) -> Self {
        Self { generator }
    }

    /// Build the request prompt and the statistics it embeds.
    pub fn build_request(&self, source: &str) -> (String, LexicalSummary) {
        let stats = lexical::analyze(source);
        (build_prompt(source, &stats), stats)
    }

    /// Produce a structured summary of `source`.
    pub async fn summarize(&self, source: &str) -> Result<String, RemoteServiceError> {
        let (prompt, _) = self.build_request(source);
        info!(
            "Requesting summary from {} ({} chars of prompt)",
            self.generator.model(),
            prompt.chars().count()
        );

        let summary = self.generator.generate(&prompt).await?;
        if summary.trim().is_empty() {
            return Err(RemoteServiceError::EmptyResponse(
                "model returned blank text".to_string(),
            ));
        }

        debug!("Summary received: {} lines", summary.lines().count());
        Ok(summary)
    }
}
