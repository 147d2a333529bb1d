//! Scripted prompter for driving the resolver in tests

use super::{PromptError, Prompter, SelectItem};
use std::collections::VecDeque;

/// One scripted answer
#[derive(Debug, Clone)]
pub enum ScriptedAnswer {
    /// Answer a selection prompt with this value
    Select(String),
    /// Answer a toggle prompt
    Toggle(bool),
    /// Answer a text prompt
    Text(String),
    /// Abort the prompt, as if the user pressed Esc/Ctrl+C
    Cancel,
}

/// What a prompt looked like when it fired
#[derive(Debug, Clone)]
pub struct PromptRecord {
    pub message: String,
    /// Values offered by a selection prompt; empty for toggle/text
    pub offered: Vec<String>,
}

/// Deterministic [`Prompter`] fed from a fixed script.
///
/// Every prompt that fires is recorded in the transcript, so tests can assert
/// both which prompts ran and which choices they offered. Running out of
/// script counts as a cancellation; a prompter built with an empty script is
/// therefore also a "no prompts expected" assertion.
#[derive(Debug, Default)]
pub struct ScriptedPrompter {
    script: VecDeque<ScriptedAnswer>,
    transcript: Vec<PromptRecord>,
}

impl ScriptedPrompter {
    /// Prompter that cancels the first prompt it sees
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn with_script(script: impl IntoIterator<Item = ScriptedAnswer>) -> Self {
        Self {
            script: script.into_iter().collect(),
            transcript: Vec::new(),
        }
    }

    /// Everything that was asked, in order
    pub fn transcript(&self) -> &[PromptRecord] {
        &self.transcript
    }

    /// Messages of every prompt that fired
    pub fn messages(&self) -> Vec<&str> {
        self.transcript.iter().map(|r| r.message.as_str()).collect()
    }

    fn record(&mut self, message: &str, offered: Vec<String>) {
        self.transcript.push(PromptRecord {
            message: message.to_string(),
            offered,
        });
    }

    fn next_answer(&mut self) -> Result<ScriptedAnswer, PromptError> {
        match self.script.pop_front() {
            Some(ScriptedAnswer::Cancel) | None => Err(PromptError::Cancelled),
            Some(answer) => Ok(answer),
        }
    }
}

impl Prompter for ScriptedPrompter {
    fn select(
        &mut self,
        message: &str,
        items: &[SelectItem],
        _initial: usize,
    ) -> Result<String, PromptError> {
        self.record(message, items.iter().map(|i| i.value.clone()).collect());
        match self.next_answer()? {
            ScriptedAnswer::Select(value) => {
                assert!(
                    items.iter().any(|i| i.value == value),
                    "scripted answer '{}' not among offered values for '{}'",
                    value,
                    message
                );
                Ok(value)
            }
            other => panic!("expected Select answer for '{}', got {:?}", message, other),
        }
    }

    fn toggle(&mut self, message: &str, _initial: bool) -> Result<bool, PromptError> {
        self.record(message, Vec::new());
        match self.next_answer()? {
            ScriptedAnswer::Toggle(value) => Ok(value),
            other => panic!("expected Toggle answer for '{}', got {:?}", message, other),
        }
    }

    fn text(&mut self, message: &str) -> Result<String, PromptError> {
        self.record(message, Vec::new());
        match self.next_answer()? {
            ScriptedAnswer::Text(value) => Ok(value),
            other => panic!("expected Text answer for '{}', got {:?}", message, other),
        }
    }
}
