//! Source text loading.

use std::io::ErrorKind;
use std::path::Path;

use tracing::debug;

use crate::error::FileAccessError;

/// Read the whole file at `path` as UTF-8 text, unmodified.
pub fn read_source(path: impl AsRef<Path>) -> Result<String, FileAccessError> {
    let path = path.as_ref();
    let bytes = std::fs::read(path).map_err(|source| match source.kind() {
        ErrorKind::NotFound => FileAccessError::NotFound(path.to_path_buf()),
        _ => FileAccessError::Io {
            path: path.to_path_buf(),
            source,
        },
    })?;
    let text = String::from_utf8(bytes).map_err(|source| FileAccessError::Decode {
        path: path.to_path_buf(),
        source,
    })?;
    debug!("Read {} bytes from {}", text.len(), path.display());
    Ok(text)
}
