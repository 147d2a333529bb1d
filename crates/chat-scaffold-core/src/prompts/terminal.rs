//! Terminal prompts using cliclack (Charm-style inline prompts)

use super::{PromptError, Prompter, SelectItem};
use std::io;

/// Real prompter backed by cliclack
#[derive(Debug, Default)]
pub struct TerminalPrompter;

impl TerminalPrompter {
    pub fn new() -> Self {
        Self
    }
}

/// cliclack reports user abort as an Interrupted io::Error
fn map_interact_err(err: io::Error) -> PromptError {
    if err.kind() == io::ErrorKind::Interrupted {
        PromptError::Cancelled
    } else {
        PromptError::Io(err)
    }
}

impl Prompter for TerminalPrompter {
    fn select(
        &mut self,
        message: &str,
        items: &[SelectItem],
        initial: usize,
    ) -> Result<String, PromptError> {
        if items.is_empty() {
            return Err(PromptError::Io(io::Error::new(
                io::ErrorKind::InvalidInput,
                "selection prompt has no choices",
            )));
        }

        let mut select = cliclack::select(message);
        for item in items {
            select = select.item(item.value.clone(), &item.label, &item.hint);
        }
        if let Some(item) = items.get(initial) {
            select = select.initial_value(item.value.clone());
        }

        select.interact().map_err(map_interact_err)
    }

    fn toggle(&mut self, message: &str, initial: bool) -> Result<bool, PromptError> {
        cliclack::confirm(message)
            .initial_value(initial)
            .interact()
            .map_err(map_interact_err)
    }

    fn text(&mut self, message: &str) -> Result<String, PromptError> {
        let answer: String = cliclack::input(message)
            .default_input("")
            .interact()
            .map_err(map_interact_err)?;
        Ok(answer)
    }
}
