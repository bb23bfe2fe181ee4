//! ui::prompts
//!
//! Interactive prompts behind a capability trait.
//!
//! # Design
//!
//! Resolvers take a [`Prompter`] by reference, so resolution logic is
//! testable without a terminal. Prompts are only shown in interactive
//! mode; in non-interactive mode, operations requiring input must
//! either have the value as a flag or fail with a clear error.
//!
//! A user-initiated cancellation (interrupt or escape) is
//! [`PromptError::Cancelled`], which aborts the whole invocation - it
//! is never substituted with a default or an empty value.

use std::io::Write;

use dialoguer::theme::ColorfulTheme;
use dialoguer::{Input, Select};
use thiserror::Error;

/// Errors from prompts.
#[derive(Debug, Error)]
pub enum PromptError {
    #[error("prompt cancelled by user")]
    Cancelled,

    #[error("not in interactive mode")]
    NotInteractive,

    #[error("IO error: {0}")]
    Io(String),
}

/// Capability interface for interactive input.
pub trait Prompter {
    /// Pick one option by index.
    fn select(&self, message: &str, options: &[String]) -> Result<usize, PromptError>;

    /// Free-form text input.
    fn text(&self, message: &str, default: Option<&str>) -> Result<String, PromptError>;

    /// Masked input for secrets; never echoed.
    fn password(&self, message: &str) -> Result<String, PromptError>;
}

fn map_dialoguer(err: dialoguer::Error) -> PromptError {
    match err {
        dialoguer::Error::IO(io_err) if io_err.kind() == std::io::ErrorKind::Interrupted => {
            PromptError::Cancelled
        }
        other => PromptError::Io(other.to_string()),
    }
}

/// Terminal-backed prompter.
pub struct TerminalPrompter {
    interactive: bool,
}

impl TerminalPrompter {
    pub fn new(interactive: bool) -> Self {
        Self { interactive }
    }
}

impl Prompter for TerminalPrompter {
    fn select(&self, message: &str, options: &[String]) -> Result<usize, PromptError> {
        if !self.interactive {
            return Err(PromptError::NotInteractive);
        }
        Select::with_theme(&ColorfulTheme::default())
            .with_prompt(message)
            .items(options)
            .default(0)
            .interact_opt()
            .map_err(map_dialoguer)?
            // Escape means cancel, not "first option".
            .ok_or(PromptError::Cancelled)
    }

    fn text(&self, message: &str, default: Option<&str>) -> Result<String, PromptError> {
        if !self.interactive {
            return Err(PromptError::NotInteractive);
        }
        let theme = ColorfulTheme::default();
        let mut input = Input::<String>::with_theme(&theme)
            .with_prompt(message)
            .allow_empty(true);
        if let Some(value) = default {
            input = input.default(value.to_string());
        }
        input.interact_text().map_err(map_dialoguer)
    }

    fn password(&self, message: &str) -> Result<String, PromptError> {
        if !self.interactive {
            return Err(PromptError::NotInteractive);
        }
        print!("{}: ", message);
        std::io::stdout()
            .flush()
            .map_err(|e| PromptError::Io(e.to_string()))?;
        rpassword::read_password().map_err(|e| {
            if e.kind() == std::io::ErrorKind::Interrupted {
                PromptError::Cancelled
            } else {
                PromptError::Io(e.to_string())
            }
        })
    }
}

/// Scripted prompter for deterministic tests.
///
/// Answers are queued ahead of time; running out of answers is an IO
/// error so a test fails loudly instead of hanging. The
/// [`cancelled`](ScriptedPrompter::cancelled) constructor makes every
/// prompt behave as if the user interrupted it.
#[derive(Debug, Default)]
pub struct ScriptedPrompter {
    selections: std::sync::Mutex<std::collections::VecDeque<usize>>,
    lines: std::sync::Mutex<std::collections::VecDeque<String>>,
    cancel: bool,
}

impl ScriptedPrompter {
    pub fn new() -> Self {
        Self::default()
    }

    /// A prompter whose every prompt reports user cancellation.
    pub fn cancelled() -> Self {
        Self {
            cancel: true,
            ..Self::default()
        }
    }

    /// Queue an answer for the next `select`.
    pub fn push_selection(&self, index: usize) {
        self.selections.lock().unwrap().push_back(index);
    }

    /// Queue an answer for the next `text` or `password`.
    pub fn push_line(&self, line: impl Into<String>) {
        self.lines.lock().unwrap().push_back(line.into());
    }

    fn next_line(&self) -> Result<String, PromptError> {
        self.lines
            .lock()
            .unwrap()
            .pop_front()
            .ok_or_else(|| PromptError::Io("no scripted line queued".to_string()))
    }
}

impl Prompter for ScriptedPrompter {
    fn select(&self, _message: &str, options: &[String]) -> Result<usize, PromptError> {
        if self.cancel {
            return Err(PromptError::Cancelled);
        }
        let index = self
            .selections
            .lock()
            .unwrap()
            .pop_front()
            .ok_or_else(|| PromptError::Io("no scripted selection queued".to_string()))?;
        if index >= options.len() {
            return Err(PromptError::Io(format!(
                "scripted selection {} out of range ({} options)",
                index,
                options.len()
            )));
        }
        Ok(index)
    }

    fn text(&self, _message: &str, _default: Option<&str>) -> Result<String, PromptError> {
        if self.cancel {
            return Err(PromptError::Cancelled);
        }
        self.next_line()
    }

    fn password(&self, _message: &str) -> Result<String, PromptError> {
        if self.cancel {
            return Err(PromptError::Cancelled);
        }
        self.next_line()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn non_interactive_prompter_refuses() {
        let prompter = TerminalPrompter::new(false);
        assert!(matches!(
            prompter.select("m", &["a".to_string()]),
            Err(PromptError::NotInteractive)
        ));
        assert!(matches!(
            prompter.text("m", None),
            Err(PromptError::NotInteractive)
        ));
        assert!(matches!(
            prompter.password("m"),
            Err(PromptError::NotInteractive)
        ));
    }

    #[test]
    fn scripted_answers_replay_in_order() {
        let prompter = ScriptedPrompter::new();
        prompter.push_selection(1);
        prompter.push_line("first");
        prompter.push_line("second");

        let options = vec!["a".to_string(), "b".to_string()];
        assert_eq!(prompter.select("m", &options).unwrap(), 1);
        assert_eq!(prompter.text("m", None).unwrap(), "first");
        assert_eq!(prompter.password("m").unwrap(), "second");
    }

    #[test]
    fn exhausted_script_errors_instead_of_hanging() {
        let prompter = ScriptedPrompter::new();
        assert!(matches!(prompter.text("m", None), Err(PromptError::Io(_))));
    }

    #[test]
    fn out_of_range_selection_is_an_error() {
        let prompter = ScriptedPrompter::new();
        prompter.push_selection(5);
        let options = vec!["only".to_string()];
        assert!(matches!(
            prompter.select("m", &options),
            Err(PromptError::Io(_))
        ));
    }

    #[test]
    fn cancelled_prompter_cancels_everything() {
        let prompter = ScriptedPrompter::cancelled();
        assert!(matches!(
            prompter.select("m", &["a".to_string()]),
            Err(PromptError::Cancelled)
        ));
        assert!(matches!(
            prompter.text("m", None),
            Err(PromptError::Cancelled)
        ));
        assert!(matches!(
            prompter.password("m"),
            Err(PromptError::Cancelled)
        ));
    }
}
