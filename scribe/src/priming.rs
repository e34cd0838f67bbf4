//! Priming turns injected ahead of the user's query.
//!
//! Three user turns steer the model before the real question is sent, in
//! this order: the document context, the usage rules, the prompt template
//! framing. The order sets priority: context over instructions over task.

use crate::history::ChatHistory;
use crate::message::{PROMPT_MARKER, Turn};

/// Fixed instruction block describing citation conventions and the
/// "current document" / "selected text" vocabulary.
pub const RULES: &str = "# rules\n\
- If you reference a document, be sure to provide the document's wiki link (e.g. [[path/to/document]]).\n\
# Info\n\
- \"Current Opened Document\" refers to the document that is currently open and being viewed by the user.\n\
- \"Selected Text\" refers to the text that currently selected by user\n\
---\n\
Using the documentation provided, answer the following questions in the appropriate language for questions.";

/// How the rules and prompt turns are framed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PrimingStyle {
    /// Rules verbatim, prompt turn as `prompt: {label}`.
    #[default]
    Labeled,
    /// Rules and prompt prefixed with the [`PROMPT_MARKER`] line so a chat
    /// view can hide them.
    Marked,
}

impl PrimingStyle {
    /// Text of the rules turn.
    #[must_use]
    pub fn rules_text(self) -> String {
        match self {
            Self::Labeled => RULES.to_owned(),
            Self::Marked => format!("{PROMPT_MARKER}\n{RULES}"),
        }
    }

    /// Text of the prompt-template turn for `label`.
    #[must_use]
    pub fn prompt_text(self, label: &str) -> String {
        match self {
            Self::Labeled => format!("prompt: {label}"),
            Self::Marked => format!("{PROMPT_MARKER}\n{label}"),
        }
    }
}

/// Builds the three priming turns for one call.
#[must_use]
pub fn priming_turns(context: &str, prompt_label: &str, style: PrimingStyle) -> [Turn; 3] {
    [
        Turn::user(context),
        Turn::user(style.rules_text()),
        Turn::user(style.prompt_text(prompt_label)),
    ]
}

/// Appends the priming turns to `history`.
pub fn prime(history: &mut ChatHistory, context: &str, prompt_label: &str, style: PrimingStyle) {
    history.extend(priming_turns(context, prompt_label, style));
}
