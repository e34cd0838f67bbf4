//! Gemini API request and response types.
//!
//! These map directly to the `generateContent` / `streamGenerateContent`
//! wire format and are internal to the client.

use serde::{Deserialize, Serialize};

use crate::chat::{ChatResponse, GenerationConfig};
use crate::error::LlmError;
use crate::message::{Part, Turn};
use crate::stream::FinishReason;
use crate::usage::Usage;

/// `generateContent` request body.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentRequest {
    pub contents: Vec<Turn>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub system_instruction: Option<SystemInstruction>,
    #[serde(skip_serializing_if = "GenerationConfig::is_empty")]
    pub generation_config: GenerationConfig,
}

/// System instruction content; carries parts but no role.
#[derive(Debug, Clone, Serialize)]
pub struct SystemInstruction {
    pub parts: Vec<Part>,
}

/// `generateContent` response body, also the payload of every SSE event.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
    #[serde(default)]
    pub prompt_feedback: Option<PromptFeedback>,
    #[serde(default)]
    pub usage_metadata: Option<Usage>,
    #[serde(default)]
    pub model_version: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Candidate {
    #[serde(default)]
    pub content: Option<CandidateContent>,
    #[serde(default)]
    pub finish_reason: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CandidateContent {
    #[serde(default)]
    pub parts: Vec<ResponsePart>,
}

/// A response part. Non-text parts (function calls, inline data) deserialize
/// with `text: None` and are ignored.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ResponsePart {
    #[serde(default)]
    pub text: Option<String>,
    /// Set on thinking-model reasoning parts, which are not reply text.
    #[serde(default)]
    pub thought: bool,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PromptFeedback {
    #[serde(default)]
    pub block_reason: Option<String>,
}

/// Google API error envelope.
#[derive(Debug, Clone, Deserialize)]
pub struct GeminiErrorResponse {
    pub error: GeminiError,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GeminiError {
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub details: Vec<GeminiErrorDetail>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GeminiErrorDetail {
    #[serde(default)]
    pub reason: Option<String>,
}

impl GeminiError {
    /// An invalid key is reported as a 400 `INVALID_ARGUMENT` whose details
    /// carry the `API_KEY_INVALID` reason.
    pub fn is_invalid_key(&self) -> bool {
        self.details
            .iter()
            .any(|d| d.reason.as_deref() == Some("API_KEY_INVALID"))
    }
}

impl GenerateContentResponse {
    /// Reply text of the first candidate.
    pub fn text(&self) -> String {
        self.candidates
            .first()
            .and_then(|c| c.content.as_ref())
            .map(|content| {
                content
                    .parts
                    .iter()
                    .filter(|p| !p.thought)
                    .filter_map(|p| p.text.as_deref())
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Finish reason of the first candidate, if it reported one.
    pub fn finish_reason(&self) -> Option<FinishReason> {
        self.candidates
            .first()
            .and_then(|c| c.finish_reason.as_deref())
            .map(FinishReason::parse)
    }

    /// Fails if the prompt was blocked outright or the candidate was stopped
    /// by a content filter. A filtered candidate fails even when it carries
    /// partial text.
    pub fn check_blocked(&self) -> Result<(), LlmError> {
        if self.candidates.is_empty()
            && let Some(reason) = self
                .prompt_feedback
                .as_ref()
                .and_then(|f| f.block_reason.as_deref())
        {
            return Err(LlmError::blocked(reason));
        }

        match self.finish_reason() {
            Some(reason) if reason.is_blocked() => Err(LlmError::blocked(reason.as_str())),
            _ => Ok(()),
        }
    }

    /// Converts a complete (non-streamed) response.
    pub fn into_chat_response(self) -> Result<ChatResponse, LlmError> {
        self.check_blocked()?;

        if self.candidates.is_empty() {
            return Err(LlmError::response_format(
                "at least one candidate",
                "empty candidates",
            ));
        }

        Ok(ChatResponse {
            text: self.text(),
            finish_reason: self.finish_reason().unwrap_or_default(),
            usage: self.usage_metadata,
            model_version: self.model_version,
        })
    }
}
