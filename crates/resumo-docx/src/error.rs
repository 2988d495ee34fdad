//! Error types for document writing.

use thiserror::Error;

/// Result type for document writing operations.
pub type Result<T> = std::result::Result<T, DocxError>;

/// Errors raised while building or saving a document.
#[derive(Error, Debug)]
pub enum DocxError {
    /// A paragraph or style referenced a style id that is not registered.
    #[error("unknown style: {0}")]
    UnknownStyle(String),

    /// Base-style references form a cycle.
    #[error("style inheritance cycle at: {0}")]
    StyleCycle(String),

    /// XML serialization failed.
    #[error("XML error: {0}")]
    Xml(#[from] std::fmt::Error),

    /// Zip container error.
    #[error("zip error: {0}")]
    Zip(#[from] zip::result::ZipError),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
