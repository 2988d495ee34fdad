//! Summarize a Portuguese text file into a styled Word document.
//!
//! `resumo` reads `<base>.txt`, computes a few lexical statistics (sentence
//! count, content tokens, top keywords), asks a Gemini model for a
//! structured summary in a single request, and renders the reply into
//! `<base>.docx` using four paragraph styles: `Normal`, `Titulo`,
//! `Marcador1` and `Marcador2`.
//!
//! ```ignore
//! use resumo::{Config, GeminiClient};
//!
//! let config = Config::load("config.json")?;
//! let client = GeminiClient::from_config(&config)?;
//! let report = resumo::pipeline::run(&config, &client).await?;
//! println!("{}", report.output_path.display());
//! ```
//!
//! # Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`config`] | JSON configuration file, input/output path derivation |
//! | [`loader`] | Reads the source text as UTF-8 |
//! | [`lexical`] | Sentence splitting, tokenization, stopwords, keyword frequency |
//! | [`prompt`] | The summarization instruction sent to the model |
//! | [`client`] | [`TextGenerator`] trait and the Gemini HTTP client |
//! | [`summarizer`] | Analysis + prompt + one generation request |
//! | [`render`] | Line classification and document styles |
//! | [`pipeline`] | The end-to-end run |
//! | [`logging`] | Console tracing layer |
//! | [`error`] | Error taxonomy |

pub mod client;
pub mod config;
pub mod error;
pub mod lexical;
pub mod loader;
pub mod logging;
pub mod pipeline;
pub mod prompt;
pub mod render;
pub mod summarizer;

/// Model used when the configuration does not name one.
pub const DEFAULT_MODEL: &str = "gemini-1.5-flash";

pub use client::{GEMINI_API_BASE, GeminiClient, TextGenerator};
pub use config::Config;
pub use error::{ConfigError, Error, FileAccessError, RemoteServiceError, RenderError, Result};
pub use lexical::{LexicalSummary, analyze};
pub use pipeline::{RunReport, run};
pub use render::render_summary;
pub use summarizer::Summarizer;
