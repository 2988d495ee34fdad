//! End-to-end run: load, analyze, summarize, render, save.

use std::path::PathBuf;
use std::time::Instant;

use tracing::info;

use crate::client::TextGenerator;
use crate::config::Config;
use crate::error::{RenderError, Result};
use crate::loader::read_source;
use crate::render::render_summary;
use crate::summarizer::Summarizer;

/// Outcome of a successful run.
#[derive(Debug, Clone)]
pub struct RunReport {
    /// Where the document was written.
    pub output_path: PathBuf,
    /// The model's text, as returned.
    pub summary: String,
    /// Paragraphs in the saved document.
    pub paragraphs: usize,
}

/// Summarize `<base>.txt` into `<base>.docx`.
///
/// Stages run strictly in order and the first failure aborts the run. A
/// failed save may leave a partial output file behind.
pub async fn run(config: &Config, generator: &dyn TextGenerator) -> Result<RunReport> {
    let start = Instant::now();
    let input_path = config.input_path();
    let output_path = config.output_path();

    info!("Reading {}", input_path.display());
    let source = read_source(&input_path)?;

    let summary = Summarizer::new(generator).summarize(&source).await?;

    let doc = render_summary(&summary)?;
    doc.save(&output_path).map_err(RenderError::from)?;
    info!(
        "Saved {} paragraph(s) to {} in {:.1}s",
        doc.paragraph_count(),
        output_path.display(),
        start.elapsed().as_secs_f64()
    );

    Ok(RunReport {
        output_path,
        summary,
        paragraphs: doc.paragraph_count(),
    })
}
