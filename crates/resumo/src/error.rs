//! Error taxonomy for a summarization run.
//!
//! Each pipeline stage has its own error type; [`Error`] wraps them so the
//! binary can propagate everything with `?` and report a single message.

use std::path::PathBuf;

use resumo_docx::DocxError;
use thiserror::Error;

/// Result type for pipeline operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Configuration file is unreadable, malformed, or incomplete.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config file '{}': {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config file '{}': {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("required config field '{0}' is missing or empty")]
    MissingField(&'static str),
}

/// The source text could not be loaded.
#[derive(Error, Debug)]
pub enum FileAccessError {
    #[error("input file not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("input file '{}' is not valid UTF-8: {source}", .path.display())]
    Decode {
        path: PathBuf,
        #[source]
        source: std::string::FromUtf8Error,
    },

    #[error("failed to read input file '{}': {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// The remote summarization call failed or produced no usable text.
#[derive(Error, Debug)]
pub enum RemoteServiceError {
    #[error("failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),

    #[error("request failed: {0}")]
    Transport(#[source] reqwest::Error),

    #[error("Gemini API HTTP {status}: {message}")]
    Api { status: u16, message: String },

    #[error("failed to parse response: {0}")]
    Decode(#[source] serde_json::Error),

    #[error("model returned no usable text: {0}")]
    EmptyResponse(String),
}

/// Building or writing the output document failed.
#[derive(Error, Debug)]
#[error("failed to render summary document: {0}")]
pub struct RenderError(#[from] pub DocxError);

/// Any failure that aborts a run.
#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    FileAccess(#[from] FileAccessError),

    #[error(transparent)]
    Remote(#[from] RemoteServiceError),

    #[error(transparent)]
    Render(#[from] RenderError),
}
