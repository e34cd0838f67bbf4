//! Caller-owned conversation history.
//!
//! [`ChatHistory`] is an append-only buffer of [`Turn`]s. The responders take
//! it as `&mut ChatHistory`, so sharing one history between concurrent calls
//! is rejected at compile time; callers that need that must serialize the
//! calls themselves or hand each call its own copy.
//!
//! Nothing in this crate removes or rewrites a turn once pushed.

use serde::{Deserialize, Serialize};

use crate::message::Turn;

/// Ordered, append-only record of a conversation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ChatHistory {
    turns: Vec<Turn>,
}

impl ChatHistory {
    /// Creates an empty history.
    #[must_use]
    pub const fn new() -> Self {
        Self { turns: Vec::new() }
    }

    /// Creates a history pre-populated with `turns`.
    #[must_use]
    pub const fn with_turns(turns: Vec<Turn>) -> Self {
        Self { turns }
    }

    /// Appends one turn.
    pub fn push(&mut self, turn: Turn) {
        self.turns.push(turn);
    }

    /// Appends several turns, preserving their order.
    pub fn extend(&mut self, turns: impl IntoIterator<Item = Turn>) {
        self.turns.extend(turns);
    }

    /// Number of turns recorded.
    #[must_use]
    pub fn len(&self) -> usize {
        self.turns.len()
    }

    /// Whether no turn has been recorded yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }

    /// All turns in chronological order.
    #[must_use]
    pub fn turns(&self) -> &[Turn] {
        &self.turns
    }

    /// The most recent turn.
    #[must_use]
    pub fn last(&self) -> Option<&Turn> {
        self.turns.last()
    }

    /// Iterates turns in chronological order.
    pub fn iter(&self) -> std::slice::Iter<'_, Turn> {
        self.turns.iter()
    }

    /// Iterates turns a chat view should display, skipping marker-tagged
    /// priming turns.
    pub fn visible(&self) -> impl Iterator<Item = &Turn> {
        self.turns.iter().filter(|t| !t.is_marked())
    }

    /// Consumes the history, returning its turns.
    #[must_use]
    pub fn into_turns(self) -> Vec<Turn> {
        self.turns
    }
}

impl<'a> IntoIterator for &'a ChatHistory {
    type Item = &'a Turn;
    type IntoIter = std::slice::Iter<'a, Turn>;

    fn into_iter(self) -> Self::IntoIter {
        self.turns.iter()
    }
}

impl From<Vec<Turn>> for ChatHistory {
    fn from(turns: Vec<Turn>) -> Self {
        Self::with_turns(turns)
    }
}
