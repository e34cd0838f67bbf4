//! Google Gemini API client.
//!
//! Talks to the `generateContent` and `streamGenerateContent` REST endpoints
//! of the Generative Language API, authenticating with an API key.

mod chat;
mod client;
mod config;
mod stream;
mod types;

pub use client::Gemini;
pub use config::GeminiConfig;
