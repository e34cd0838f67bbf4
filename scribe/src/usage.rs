//! Token usage reported by the model.
//!
//! Gemini reports usage as `usageMetadata`:
//! ```json
//! { "promptTokenCount": 100, "candidatesTokenCount": 50, "totalTokenCount": 150 }
//! ```
//! [`Usage`] accepts that shape directly.

use serde::{Deserialize, Serialize};
use std::ops::{Add, AddAssign};

/// Token usage statistics for one call.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Usage {
    /// Number of tokens in the prompt (history plus query).
    #[serde(default, alias = "promptTokenCount")]
    pub input_tokens: u32,

    /// Number of tokens in the reply.
    #[serde(default, alias = "candidatesTokenCount")]
    pub output_tokens: u32,

    /// Total tokens reported by the service.
    #[serde(default, alias = "totalTokenCount")]
    pub total_tokens: u32,
}

impl Usage {
    /// Creates usage from input and output counts.
    #[must_use]
    pub const fn new(input_tokens: u32, output_tokens: u32) -> Self {
        Self {
            input_tokens,
            output_tokens,
            total_tokens: input_tokens + output_tokens,
        }
    }

    /// Whether nothing was counted.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.input_tokens == 0 && self.output_tokens == 0 && self.total_tokens == 0
    }
}

impl Add for Usage {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self {
            input_tokens: self.input_tokens + rhs.input_tokens,
            output_tokens: self.output_tokens + rhs.output_tokens,
            total_tokens: self.total_tokens + rhs.total_tokens,
        }
    }
}

impl AddAssign for Usage {
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_new_computes_total() {
        let usage = Usage::new(10, 5);
        assert_eq!(usage.total_tokens, 15);
        assert!(!usage.is_empty());
        assert!(Usage::default().is_empty());
    }

    #[test]
    fn test_parses_usage_metadata() {
        let usage: Usage = serde_json::from_str(
            r#"{"promptTokenCount":12,"candidatesTokenCount":3,"totalTokenCount":15}"#,
        )
        .unwrap();
        assert_eq!(usage, Usage::new(12, 3));
    }

    #[test]
    fn test_missing_counts_default_to_zero() {
        let usage: Usage = serde_json::from_str(r#"{"promptTokenCount":7}"#).unwrap();
        assert_eq!(usage.input_tokens, 7);
        assert_eq!(usage.output_tokens, 0);
    }

    #[test]
    fn test_add_assign_accumulates() {
        let mut total = Usage::new(1, 2);
        total += Usage::new(3, 4);
        assert_eq!(total, Usage::new(4, 6));
    }
}
