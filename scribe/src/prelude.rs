//! Prelude module for convenient imports.
//!
//! # Usage
//!
//! ```rust,ignore
//! use scribe::prelude::*;
//! ```

#[cfg(feature = "gemini")]
pub use crate::llms::{Gemini, GeminiConfig};
#[cfg(feature = "gemini")]
pub use crate::responder::{generate_content, generate_content_stream};

pub use crate::chat::{
    ChatProvider, ChatRequest, ChatResponse, GenerationConfig, SharedChatProvider,
};
pub use crate::error::{Error, LlmError, Result};
pub use crate::history::ChatHistory;
pub use crate::llms::mock::{MockProvider, MockReply};
pub use crate::message::{PROMPT_MARKER, Part, Role, Turn};
pub use crate::notify::{
    FAILURE_NOTICE, LoggingNotifier, NoopNotifier, Notifier, SharedNotifier,
};
pub use crate::priming::{PrimingStyle, RULES};
pub use crate::responder::{ChatParams, Responder};
pub use crate::stream::{ChunkStream, FinishReason, StreamAggregator, StreamChunk};
pub use crate::usage::Usage;
