//! Remote text generation.
//!
//! [`TextGenerator`] is the seam between the summarizer and the network:
//! production code uses [`GeminiClient`], tests substitute a fake that
//! records prompts and returns canned text.

use std::future::Future;
use std::pin::Pin;
use std::time::Instant;

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::config::Config;
use crate::error::RemoteServiceError;

pub const GEMINI_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Boxed future returned by [`TextGenerator::generate`].
pub type GenerateFuture<'a> =
    Pin<Box<dyn Future<Output = Result<String, RemoteServiceError>> + Send + 'a>>;

/// A single-shot text generation backend.
pub trait TextGenerator: Send + Sync {
    /// Send `prompt` and return the model's text, unmodified.
    fn generate<'a>(&'a self, prompt: &'a str) -> GenerateFuture<'a>;

    /// Model identifier, for logging.
    fn model(&self) -> &str;
}

// ── Request types ──────────────────────────────────────────────────

/// `generateContent` request body.
#[derive(Serialize, Debug)]
pub struct GenerateContentRequest {
    pub contents: Vec<Content>,
}

impl GenerateContentRequest {
    /// A single user turn holding `prompt`.
    pub fn from_prompt(prompt: impl Into<String>) -> Self {
        Self {
            contents: vec![Content {
                role: Some("user".to_string()),
                parts: vec![Part {
                    text: Some(prompt.into()),
                }],
            }],
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct Content {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(default)]
    pub parts: Vec<Part>,
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct Part {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

// ── Response types ─────────────────────────────────────────────────

/// Raw API response (internal deserialization target).
#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
struct RawGenerateResponse {
    candidates: Option<Vec<RawCandidate>>,
    prompt_feedback: Option<PromptFeedback>,
    usage_metadata: Option<UsageMetadata>,
    error: Option<ApiErrorResponse>,
}

#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
struct RawCandidate {
    content: Option<Content>,
    finish_reason: Option<String>,
}

#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
struct PromptFeedback {
    block_reason: Option<String>,
}

#[derive(Deserialize, Debug)]
struct ApiErrorResponse {
    message: String,
}

/// Token usage statistics.
#[derive(Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct UsageMetadata {
    pub prompt_token_count: Option<u32>,
    pub candidates_token_count: Option<u32>,
    pub total_token_count: Option<u32>,
}

/// Extract the generated text from a response body.
///
/// The text is the concatenation of the first candidate's text parts. A
/// blocked prompt, a missing candidate or a candidate without text is an
/// [`RemoteServiceError::EmptyResponse`].
fn extract_text(status: u16, body: &str) -> Result<String, RemoteServiceError> {
    let parsed: RawGenerateResponse =
        serde_json::from_str(body).map_err(RemoteServiceError::Decode)?;

    if let Some(err) = parsed.error {
        return Err(RemoteServiceError::Api {
            status,
            message: err.message,
        });
    }

    if let Some(ref usage) = parsed.usage_metadata {
        debug!(
            "Token usage: prompt={}, completion={}, total={}",
            usage.prompt_token_count.unwrap_or(0),
            usage.candidates_token_count.unwrap_or(0),
            usage.total_token_count.unwrap_or(0),
        );
    }

    if let Some(reason) = parsed.prompt_feedback.and_then(|f| f.block_reason) {
        return Err(RemoteServiceError::EmptyResponse(format!(
            "prompt blocked ({reason})"
        )));
    }

    let Some(candidate) = parsed.candidates.and_then(|c| c.into_iter().next()) else {
        return Err(RemoteServiceError::EmptyResponse(
            "no candidates".to_string(),
        ));
    };

    let text: String = candidate
        .content
        .map(|c| c.parts.into_iter().filter_map(|p| p.text).collect())
        .unwrap_or_default();

    if text.is_empty() {
        let reason = candidate
            .finish_reason
            .unwrap_or_else(|| "no text parts".to_string());
        return Err(RemoteServiceError::EmptyResponse(format!(
            "candidate has no text (finish reason: {reason})"
        )));
    }

    Ok(text)
}

// ── Client ─────────────────────────────────────────────────────────

/// Async HTTP client for the Gemini `generateContent` endpoint.
pub struct GeminiClient {
    client: reqwest::Client,
    api_key: String,
    model: String,
    base_url: String,
}

impl GeminiClient {
    /// Create a client for `model` against the public Gemini API.
    pub fn new(
        api_key: impl Into<String>,
        model: impl Into<String>,
    ) -> Result<Self, RemoteServiceError> {
        Self::with_base_url(api_key, model, GEMINI_API_BASE)
    }

    /// Create a client against a custom API base URL.
    pub fn with_base_url(
        api_key: impl Into<String>,
        model: impl Into<String>,
        base_url: impl Into<String>,
    ) -> Result<Self, RemoteServiceError> {
        let client = reqwest::Client::builder()
            .user_agent(concat!("resumo/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(RemoteServiceError::Client)?;
        Ok(Self {
            client,
            api_key: api_key.into(),
            model: model.into(),
            base_url: base_url.into(),
        })
    }

    /// Create a client from the run configuration.
    pub fn from_config(config: &Config) -> Result<Self, RemoteServiceError> {
        Self::new(config.api_key.clone(), config.model.clone())
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/models/{}:generateContent",
            self.base_url.trim_end_matches('/'),
            self.model
        )
    }

    /// Send a `generateContent` request and return the generated text.
    pub async fn generate_content(
        &self,
        body: &GenerateContentRequest,
    ) -> Result<String, RemoteServiceError> {
        debug!(
            "LLM request: model={}, parts={}",
            self.model,
            body.contents.iter().map(|c| c.parts.len()).sum::<usize>()
        );
        trace!(
            "Request payload size: {} bytes",
            serde_json::to_string(body).map_or(0, |s| s.len())
        );

        let start = Instant::now();

        let resp = self
            .client
            .post(self.endpoint())
            .header("x-goog-api-key", &self.api_key)
            .json(body)
            .send()
            .await
            .map_err(RemoteServiceError::Transport)?;

        let status = resp.status();
        let text = resp
            .text()
            .await
            .map_err(RemoteServiceError::Transport)?;

        debug!(
            "LLM response: HTTP {} in {:.1}s ({} bytes)",
            status,
            start.elapsed().as_secs_f64(),
            text.len()
        );

        if !status.is_success() {
            let message = serde_json::from_str::<RawGenerateResponse>(&text)
                .ok()
                .and_then(|r| r.error)
                .map_or(text, |e| e.message);
            return Err(RemoteServiceError::Api {
                status: status.as_u16(),
                message,
            });
        }

        extract_text(status.as_u16(), &text)
    }
}

impl TextGenerator for GeminiClient {
    fn generate<'a>(&'a self, prompt: &'a str) -> GenerateFuture<'a> {
        Box::pin(async move {
            let body = GenerateContentRequest::from_prompt(prompt);
            self.generate_content(&body).await
        })
    }

    fn model(&self) -> &str {
        &self.model
    }
}
