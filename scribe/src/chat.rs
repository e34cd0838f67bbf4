//! Chat request/response types and the provider seam.
//!
//! This module provides:
//! - [`ChatRequest`]: the conversation and generation settings for one call
//! - [`ChatResponse`]: the complete reply of a single-shot call
//! - [`ChatProvider`]: the remote capability, in single-shot and streaming form
//!
//! # Example
//!
//! ```rust,ignore
//! use scribe::prelude::*;
//!
//! let request = ChatRequest::new("gemini-1.5-flash")
//!     .turn(Turn::user("Doc content"))
//!     .user("Summarize")
//!     .temperature(0.2);
//!
//! let response = provider.chat(&request).await?;
//! println!("{}", response.text);
//! ```

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::message::Turn;
use crate::stream::{ChunkStream, FinishReason};
use crate::usage::Usage;

/// Sampling and length settings.
///
/// Serializes to Gemini's `generationConfig` object; unset fields are omitted
/// so the service applies its own defaults.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationConfig {
    /// Sampling temperature.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,

    /// Nucleus sampling parameter.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub top_p: Option<f32>,

    /// Top-k sampling parameter.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub top_k: Option<u32>,

    /// Maximum tokens to generate.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_output_tokens: Option<u32>,

    /// Stop sequences.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stop_sequences: Option<Vec<String>>,
}

impl GenerationConfig {
    /// Whether every field is unset.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.temperature.is_none()
            && self.top_p.is_none()
            && self.top_k.is_none()
            && self.max_output_tokens.is_none()
            && self.stop_sequences.is_none()
    }
}

/// A request for one model reply.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ChatRequest {
    /// Model identifier (e.g., "gemini-1.5-flash").
    pub model: String,

    /// Conversation so far; the last turn is the one being answered.
    pub contents: Vec<Turn>,

    /// Optional system instruction.
    pub system_instruction: Option<String>,

    /// Sampling settings.
    pub generation: GenerationConfig,
}

impl ChatRequest {
    /// Creates an empty request for `model`.
    #[must_use]
    pub fn new(model: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            ..Default::default()
        }
    }

    /// Creates a request with the given contents.
    #[must_use]
    pub fn with_contents(model: impl Into<String>, contents: Vec<Turn>) -> Self {
        Self {
            model: model.into(),
            contents,
            ..Default::default()
        }
    }

    /// Appends a turn.
    #[must_use]
    pub fn turn(mut self, turn: Turn) -> Self {
        self.contents.push(turn);
        self
    }

    /// Appends a user turn.
    #[must_use]
    pub fn user(self, text: impl Into<String>) -> Self {
        self.turn(Turn::user(text))
    }

    /// Sets the system instruction.
    #[must_use]
    pub fn system(mut self, text: impl Into<String>) -> Self {
        self.system_instruction = Some(text.into());
        self
    }

    /// Sets the sampling temperature.
    #[must_use]
    pub const fn temperature(mut self, temperature: f32) -> Self {
        self.generation.temperature = Some(temperature);
        self
    }

    /// Sets the output token limit.
    #[must_use]
    pub const fn max_output_tokens(mut self, max: u32) -> Self {
        self.generation.max_output_tokens = Some(max);
        self
    }

    /// Replaces the sampling settings.
    #[must_use]
    pub fn generation(mut self, generation: GenerationConfig) -> Self {
        self.generation = generation;
        self
    }
}

/// The complete reply of a single-shot call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatResponse {
    /// Reply text.
    pub text: String,
    /// Why the model stopped.
    pub finish_reason: FinishReason,
    /// Token usage, if reported.
    pub usage: Option<Usage>,
    /// Model version that served the call, if reported.
    pub model_version: Option<String>,
}

impl ChatResponse {
    /// Creates a response that finished normally.
    #[must_use]
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            finish_reason: FinishReason::Stop,
            usage: None,
            model_version: None,
        }
    }

    /// Attaches usage.
    #[must_use]
    pub const fn with_usage(mut self, usage: Usage) -> Self {
        self.usage = Some(usage);
        self
    }
}

/// The remote text-generation capability.
///
/// Implementations are expected to be cheap to share; the responders only
/// ever hold a shared reference.
#[async_trait]
pub trait ChatProvider: Send + Sync {
    /// Send a request and wait for the complete reply.
    ///
    /// # Errors
    ///
    /// Returns an error if the remote call fails or the reply carries no text.
    async fn chat(&self, request: &ChatRequest) -> Result<ChatResponse>;

    /// Send a request and receive the reply as a stream of chunks, in
    /// arrival order.
    ///
    /// # Errors
    ///
    /// Returns an error if the call cannot be started. Failures after the
    /// stream is open arrive as `Err` items.
    async fn chat_stream(&self, request: &ChatRequest) -> Result<ChunkStream>;

    /// Provider name, used in logs and errors.
    fn provider_name(&self) -> &'static str;

    /// Model used when a call does not name one.
    fn default_model(&self) -> &str;
}

/// Type alias for an Arc-wrapped provider.
pub type SharedChatProvider = std::sync::Arc<dyn ChatProvider>;

#[async_trait]
impl<P: ChatProvider + ?Sized> ChatProvider for std::sync::Arc<P> {
    async fn chat(&self, request: &ChatRequest) -> Result<ChatResponse> {
        (**self).chat(request).await
    }

    async fn chat_stream(&self, request: &ChatRequest) -> Result<ChunkStream> {
        (**self).chat_stream(request).await
    }

    fn provider_name(&self) -> &'static str {
        (**self).provider_name()
    }

    fn default_model(&self) -> &str {
        (**self).default_model()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    mod chat_request {
        use super::*;

        #[test]
        fn test_new_creates_with_model() {
            let req = ChatRequest::new("gemini-1.5-flash");
            assert_eq!(req.model, "gemini-1.5-flash");
            assert!(req.contents.is_empty());
            assert!(req.generation.is_empty());
        }

        #[test]
        fn test_builder_appends_turns_in_order() {
            let req = ChatRequest::new("m")
                .turn(Turn::model("earlier"))
                .user("question")
                .system("be brief")
                .temperature(0.3)
                .max_output_tokens(256);

            assert_eq!(req.contents.len(), 2);
            assert_eq!(req.contents[1].text(), "question");
            assert_eq!(req.system_instruction.as_deref(), Some("be brief"));
            assert_eq!(req.generation.temperature, Some(0.3));
            assert_eq!(req.generation.max_output_tokens, Some(256));
        }
    }

    mod generation_config {
        use super::*;

        #[test]
        fn test_empty_serializes_to_empty_object() {
            let json = serde_json::to_value(GenerationConfig::default()).unwrap();
            assert_eq!(json, serde_json::json!({}));
        }

        #[test]
        fn test_uses_camel_case() {
            let config = GenerationConfig {
                max_output_tokens: Some(10),
                stop_sequences: Some(vec!["END".into()]),
                ..Default::default()
            };
            let json = serde_json::to_value(config).unwrap();
            assert_eq!(
                json,
                serde_json::json!({ "maxOutputTokens": 10, "stopSequences": ["END"] })
            );
        }
    }

    #[test]
    fn test_response_defaults_to_stop() {
        let resp = ChatResponse::new("hi").with_usage(Usage::new(1, 1));
        assert_eq!(resp.finish_reason, FinishReason::Stop);
        assert_eq!(resp.usage, Some(Usage::new(1, 1)));
    }
}
