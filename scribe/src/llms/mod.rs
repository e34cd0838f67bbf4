//! Remote model backends.
//!
//! # Available Backends
//!
//! - [`gemini`] - Google Gemini API (`generateContent` / `streamGenerateContent`)
//! - [`mock`] - Scripted in-process provider for tests and offline use

pub mod error;
#[cfg(feature = "gemini")]
pub mod gemini;
pub mod mock;

#[cfg(feature = "gemini")]
pub use gemini::{Gemini, GeminiConfig};
pub use mock::MockProvider;
