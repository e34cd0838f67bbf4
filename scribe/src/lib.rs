//! Scribe - document-grounded chat over the Gemini API
//!
//! This crate forwards a user's question, together with the document context
//! it is about, to a hosted generative-language model and relays the answer
//! back, either whole or as a stream of chunks. The conversation is kept in
//! a caller-owned [`ChatHistory`](history::ChatHistory) that every call
//! extends in place.

pub mod chat;
pub mod error;
pub mod history;
pub mod llms;
pub mod message;
pub mod notify;
pub mod prelude;
pub mod priming;
pub mod responder;
pub mod stream;
pub mod usage;

pub use error::{Error, LlmError, Result};
