//! Streaming response types.
//!
//! A streaming call yields [`StreamChunk`]s in arrival order. Text chunks
//! concatenate to the full reply; [`StreamAggregator`] does that bookkeeping.

use std::pin::Pin;

use futures::Stream;
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::usage::Usage;

/// Boxed stream of chunks returned by providers.
pub type ChunkStream = Pin<Box<dyn Stream<Item = Result<StreamChunk>> + Send>>;

/// Why the model stopped generating.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[non_exhaustive]
pub enum FinishReason {
    /// Natural end of the reply.
    #[default]
    Stop,
    /// Output token limit reached.
    MaxTokens,
    /// Stopped by the safety filter.
    Safety,
    /// Stopped for reciting training data.
    Recitation,
    /// Stopped because of a blocklisted term.
    Blocklist,
    /// Stopped for prohibited content.
    ProhibitedContent,
    /// Stopped for sensitive personally identifiable information.
    Spii,
    /// Any other reason, verbatim.
    Other(String),
}

impl FinishReason {
    /// Parses the service's finish reason string.
    #[must_use]
    pub fn parse(s: &str) -> Self {
        match s {
            "STOP" | "FINISH_REASON_UNSPECIFIED" => Self::Stop,
            "MAX_TOKENS" => Self::MaxTokens,
            "SAFETY" => Self::Safety,
            "RECITATION" => Self::Recitation,
            "BLOCKLIST" => Self::Blocklist,
            "PROHIBITED_CONTENT" => Self::ProhibitedContent,
            "SPII" => Self::Spii,
            other => Self::Other(other.to_owned()),
        }
    }

    /// Wire name of the reason.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Stop => "STOP",
            Self::MaxTokens => "MAX_TOKENS",
            Self::Safety => "SAFETY",
            Self::Recitation => "RECITATION",
            Self::Blocklist => "BLOCKLIST",
            Self::ProhibitedContent => "PROHIBITED_CONTENT",
            Self::Spii => "SPII",
            Self::Other(other) => other,
        }
    }

    /// Whether the reply was cut off by a content filter rather than finishing.
    #[must_use]
    pub const fn is_blocked(&self) -> bool {
        matches!(
            self,
            Self::Safety | Self::Recitation | Self::Blocklist | Self::ProhibitedContent | Self::Spii
        )
    }
}

/// A piece of a streamed response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
#[non_exhaustive]
pub enum StreamChunk {
    /// Text fragment, in append order.
    Text {
        /// The fragment.
        text: String,
    },

    /// Token usage so far.
    Usage(Usage),

    /// The model finished.
    Done {
        /// Why it finished.
        finish_reason: FinishReason,
    },
}

impl StreamChunk {
    /// Creates a text chunk.
    #[inline]
    #[must_use]
    pub fn text(text: impl Into<String>) -> Self {
        Self::Text { text: text.into() }
    }

    /// Creates a done chunk.
    #[must_use]
    pub const fn done(finish_reason: FinishReason) -> Self {
        Self::Done { finish_reason }
    }

    /// Returns the text if this is a text chunk.
    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text { text } => Some(text),
            _ => None,
        }
    }
}

/// Rebuilds a full reply from streamed chunks.
#[derive(Debug, Clone, Default)]
pub struct StreamAggregator {
    text: String,
    chunks: usize,
    usage: Option<Usage>,
    finish_reason: Option<FinishReason>,
}

impl StreamAggregator {
    /// Creates an empty aggregator.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Applies one chunk.
    pub fn apply(&mut self, chunk: &StreamChunk) {
        match chunk {
            StreamChunk::Text { text } => {
                self.text.push_str(text);
                self.chunks += 1;
            }
            // Gemini reports cumulative usage on every event; keep the latest.
            StreamChunk::Usage(usage) => self.usage = Some(*usage),
            StreamChunk::Done { finish_reason } => {
                self.finish_reason = Some(finish_reason.clone());
            }
        }
    }

    /// Text accumulated so far.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Number of text chunks applied.
    #[must_use]
    pub const fn chunk_count(&self) -> usize {
        self.chunks
    }

    /// Latest usage seen.
    #[must_use]
    pub const fn usage(&self) -> Option<Usage> {
        self.usage
    }

    /// Finish reason, once the stream reported one.
    #[must_use]
    pub const fn finish_reason(&self) -> Option<&FinishReason> {
        self.finish_reason.as_ref()
    }

    /// Consumes the aggregator, returning the full text.
    #[must_use]
    pub fn into_text(self) -> String {
        self.text
    }
}
