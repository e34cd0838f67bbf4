//! Turn types for the conversation exchanged with the model.
//!
//! A [`Turn`] is one entry of the conversation: a [`Role`] plus one or more
//! text [`Part`]s. The serialized form matches the `contents` entries of the
//! Gemini API, so a turn can be sent on the wire without conversion.

use serde::{Deserialize, Serialize};

/// Marker line that tags a turn as injected scaffolding rather than user text.
pub const PROMPT_MARKER: &str = ":::prompt:::";

/// Author of a turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// The end user, or this crate speaking on the user's behalf.
    User,
    /// The remote model.
    Model,
}

impl Role {
    /// Get the string representation of the role.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Model => "model",
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A text segment of a turn.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Part {
    /// The text content.
    pub text: String,
}

impl Part {
    /// Create a text part.
    #[must_use]
    pub fn text(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}

/// One entry in the conversation history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Turn {
    /// Who produced the turn.
    pub role: Role,
    /// Body segments, in order.
    pub parts: Vec<Part>,
}

impl Turn {
    /// Create a turn with a single text part.
    #[must_use]
    pub fn new(role: Role, text: impl Into<String>) -> Self {
        Self {
            role,
            parts: vec![Part::text(text)],
        }
    }

    /// Create a user turn.
    #[must_use]
    pub fn user(text: impl Into<String>) -> Self {
        Self::new(Role::User, text)
    }

    /// Create a model turn.
    #[must_use]
    pub fn model(text: impl Into<String>) -> Self {
        Self::new(Role::Model, text)
    }

    /// Append another text segment.
    #[must_use]
    pub fn with_part(mut self, text: impl Into<String>) -> Self {
        self.parts.push(Part::text(text));
        self
    }

    /// Concatenated text of all parts.
    #[must_use]
    pub fn text(&self) -> String {
        self.parts.iter().map(|p| p.text.as_str()).collect()
    }

    /// Whether the turn starts with the [`PROMPT_MARKER`] line.
    #[must_use]
    pub fn is_marked(&self) -> bool {
        self.parts
            .first()
            .is_some_and(|p| p.text.starts_with(PROMPT_MARKER))
    }
}
