//! Gemini API client implementation.

use std::sync::Arc;
use std::time::Duration;

use reqwest::Client;

use crate::chat::ChatRequest;
use crate::error::{LlmError, Result};
use crate::message::Part;

use super::config::GeminiConfig;
use super::types::{GeminiErrorResponse, GenerateContentRequest, SystemInstruction};

/// Gemini API client.
#[derive(Debug, Clone)]
pub struct Gemini {
    pub(crate) config: Arc<GeminiConfig>,
    pub(crate) client: Client,
}

impl Gemini {
    /// Create a new Gemini client with the given configuration.
    ///
    /// # Errors
    ///
    /// Returns an `Auth` error if the API key is empty, or an `Internal`
    /// error if the HTTP client cannot be built.
    pub fn new(config: GeminiConfig) -> Result<Self> {
        if config.api_key.is_empty() {
            return Err(LlmError::auth("gemini", "API key is required").into());
        }

        let mut builder = Client::builder();
        if let Some(timeout) = config.timeout_secs {
            builder = builder.timeout(Duration::from_secs(timeout));
        }

        let client = builder
            .build()
            .map_err(|e| LlmError::internal(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self {
            config: Arc::new(config),
            client,
        })
    }

    /// Create a client from environment variables.
    ///
    /// # Errors
    ///
    /// See [`GeminiConfig::from_env`] and [`Gemini::new`].
    pub fn from_env() -> Result<Self> {
        let config = GeminiConfig::from_env()?;
        Self::new(config)
    }

    /// Get the base URL.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.config.base_url
    }

    /// Get the default model.
    #[must_use]
    pub fn model(&self) -> &str {
        &self.config.model
    }

    /// Resolve the model for a request, accepting both `gemini-x` and
    /// `models/gemini-x`.
    pub(crate) fn resolve_model<'a>(&'a self, request: &'a ChatRequest) -> &'a str {
        let model = if request.model.is_empty() {
            self.config.model.as_str()
        } else {
            request.model.as_str()
        };
        model.strip_prefix("models/").unwrap_or(model)
    }

    /// Build the single-shot URL.
    pub(crate) fn generate_url(&self, model: &str) -> String {
        format!(
            "{}/models/{model}:generateContent",
            self.config.base_url.trim_end_matches('/')
        )
    }

    /// Build the streaming URL.
    pub(crate) fn stream_url(&self, model: &str) -> String {
        format!(
            "{}/models/{model}:streamGenerateContent?alt=sse",
            self.config.base_url.trim_end_matches('/')
        )
    }

    /// Build a POST request carrying the API key.
    pub(crate) fn build_request(&self, url: &str) -> reqwest::RequestBuilder {
        self.client
            .post(url)
            .header("x-goog-api-key", &self.config.api_key)
            .header("Content-Type", "application/json")
    }

    /// Build the request body.
    pub(crate) fn build_body(request: &ChatRequest) -> GenerateContentRequest {
        GenerateContentRequest {
            contents: request.contents.clone(),
            system_instruction: request
                .system_instruction
                .as_ref()
                .map(|text| SystemInstruction {
                    parts: vec![Part::text(text.clone())],
                }),
            generation_config: request.generation.clone(),
        }
    }

    /// Parse an error response from Gemini.
    pub(crate) fn parse_error(status: u16, body: &str) -> LlmError {
        if let Ok(error_response) = serde_json::from_str::<GeminiErrorResponse>(body) {
            let error = error_response.error;

            if error.is_invalid_key() {
                return LlmError::auth("gemini", error.message);
            }

            return match (status, error.status.as_deref()) {
                (401 | 403, _) | (_, Some("UNAUTHENTICATED" | "PERMISSION_DENIED")) => {
                    LlmError::auth("gemini", error.message)
                }
                (429, _) | (_, Some("RESOURCE_EXHAUSTED")) => {
                    LlmError::rate_limited("gemini", error.message)
                }
                (400, _) => LlmError::invalid_request(error.message),
                (_, Some(code)) => LlmError::provider_code("gemini", code, error.message),
                (_, None) => LlmError::provider("gemini", error.message),
            };
        }

        LlmError::http_status(status, body.to_owned())
    }
}
