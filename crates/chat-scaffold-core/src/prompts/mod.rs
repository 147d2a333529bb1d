//! Prompt capability interface
//!
//! The resolver talks to the terminal through the [`Prompter`] trait so it can
//! be driven by a scripted implementation in tests. The real implementation
//! ([`TerminalPrompter`]) renders Charm-style inline prompts with cliclack.

mod scripted;
mod terminal;

pub use scripted::{PromptRecord, ScriptedAnswer, ScriptedPrompter};
pub use terminal::TerminalPrompter;

use thiserror::Error;

/// Error surfaced by a prompt
#[derive(Debug, Error)]
pub enum PromptError {
    /// The user aborted the prompt (Esc / Ctrl+C). The caller is expected to
    /// restore the terminal cursor and exit with status 1.
    #[error("prompt cancelled")]
    Cancelled,

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// One entry of a selection prompt
#[derive(Debug, Clone)]
pub struct SelectItem {
    /// Machine value returned when the entry is picked
    pub value: String,
    /// Label shown to the user
    pub label: String,
    /// Optional dimmed hint next to the label
    pub hint: String,
}

impl SelectItem {
    pub fn new(value: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            label: label.into(),
            hint: String::new(),
        }
    }
}

/// Interactive prompt capability: one method per prompt shape
pub trait Prompter {
    /// Pick one of `items`; returns the picked entry's value.
    /// `initial` is the index of the pre-selected entry.
    fn select(
        &mut self,
        message: &str,
        items: &[SelectItem],
        initial: usize,
    ) -> Result<String, PromptError>;

    /// Yes/No toggle
    fn toggle(&mut self, message: &str, initial: bool) -> Result<bool, PromptError>;

    /// Free-form text; an empty answer is allowed
    fn text(&mut self, message: &str) -> Result<String, PromptError>;
}
