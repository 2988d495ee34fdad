//! Run configuration loaded from a JSON file.
//!
//! ```json
//! {
//!   "GOOGLE_API_KEY": "...",
//!   "caminho_base": "documentos/relatorio",
//!   "model": "gemini-1.5-flash"
//! }
//! ```
//!
//! `caminho_base` is a filename stem: the input is read from
//! `<caminho_base>.txt` and the summary written to `<caminho_base>.docx`.

use std::fmt;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::debug;

use crate::DEFAULT_MODEL;
use crate::error::ConfigError;

pub const API_KEY_FIELD: &str = "GOOGLE_API_KEY";
pub const BASE_PATH_FIELD: &str = "caminho_base";

/// Extension appended to the base path for the source text.
pub const INPUT_EXTENSION: &str = "txt";
/// Extension appended to the base path for the rendered document.
pub const OUTPUT_EXTENSION: &str = "docx";

#[derive(Deserialize, Debug, Default)]
struct RawConfig {
    #[serde(rename = "GOOGLE_API_KEY")]
    api_key: Option<String>,
    #[serde(rename = "caminho_base")]
    base_path: Option<String>,
    #[serde(default)]
    model: Option<String>,
}

/// Settings for one run. Built once at the entry point and passed by
/// reference to the stages that need it.
#[derive(Clone)]
pub struct Config {
    /// Credential for the Gemini API.
    pub api_key: String,
    /// Filename stem shared by the input and output files.
    pub base_path: String,
    /// Gemini model id. Default: [`DEFAULT_MODEL`].
    pub model: String,
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("api_key", &"<redacted>")
            .field("base_path", &self.base_path)
            .field("model", &self.model)
            .finish()
    }
}

impl Config {
    /// Read and validate the configuration file at `path`.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::parse(&text, path)?;
        debug!(
            "Loaded config from {}: base_path={}, model={}",
            path.display(),
            config.base_path,
            config.model
        );
        Ok(config)
    }

    /// Parse configuration JSON. `origin` is only used in error messages.
    pub fn parse(json: &str, origin: &Path) -> Result<Self, ConfigError> {
        let raw: RawConfig = serde_json::from_str(json).map_err(|source| ConfigError::Parse {
            path: origin.to_path_buf(),
            source,
        })?;

        let api_key = non_empty(raw.api_key).ok_or(ConfigError::MissingField(API_KEY_FIELD))?;
        let base_path =
            non_empty(raw.base_path).ok_or(ConfigError::MissingField(BASE_PATH_FIELD))?;
        let model = non_empty(raw.model).unwrap_or_else(|| DEFAULT_MODEL.to_string());

        Ok(Self {
            api_key,
            base_path,
            model,
        })
    }

    /// Replace the model id (CLI override).
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// `<base_path>.txt`
    pub fn input_path(&self) -> PathBuf {
        self.path_with(INPUT_EXTENSION)
    }

    /// `<base_path>.docx`
    pub fn output_path(&self) -> PathBuf {
        self.path_with(OUTPUT_EXTENSION)
    }

    // Appended rather than `with_extension` so stems containing dots survive.
    fn path_with(&self, extension: &str) -> PathBuf {
        PathBuf::from(format!("{}.{extension}", self.base_path))
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}
