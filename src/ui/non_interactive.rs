//! Non-interactive UI for CI/headless environments.
//!
//! Confirm prompts are answered from `METANET_PROMPT_<KEY>` environment
//! variables, falling back to the prompt's default. Select prompts can
//! only be answered by an override, and each override answers a single
//! select; after that the prompt fails with
//! [`MetanetError::NotInteractive`].

use std::collections::HashMap;

use crate::error::{MetanetError, Result};
use crate::shell::OutputLine;

use super::prompts::parse_bool;
use super::spinner::ProgressSpinner;
use super::theme::MetanetTheme;
use super::{OutputMode, Prompt, PromptResult, PromptType, SpinnerHandle, UserInterface};

const OVERRIDE_PREFIX: &str = "METANET_PROMPT_";

/// UI implementation for non-interactive mode.
pub struct NonInteractiveUI {
    mode: OutputMode,
    theme: MetanetTheme,
    env_overrides: HashMap<String, String>,
}

impl NonInteractiveUI {
    /// Create a new non-interactive UI.
    pub fn new(mode: OutputMode) -> Self {
        let env_overrides: HashMap<String, String> = std::env::vars()
            .filter(|(k, _)| k.starts_with(OVERRIDE_PREFIX))
            .collect();

        Self::with_overrides(mode, env_overrides)
    }

    /// Create with explicit overrides (for testing).
    pub fn with_overrides(mode: OutputMode, overrides: HashMap<String, String>) -> Self {
        Self {
            mode,
            theme: MetanetTheme::plain(),
            env_overrides: overrides,
        }
    }

    fn override_var(key: &str) -> String {
        format!("{}{}", OVERRIDE_PREFIX, key.to_uppercase())
    }

    fn override_for(&self, key: &str) -> Option<&String> {
        self.env_overrides.get(&Self::override_var(key))
    }

    fn take_override(&mut self, key: &str) -> Option<String> {
        self.env_overrides.remove(&Self::override_var(key))
    }
}

impl UserInterface for NonInteractiveUI {
    fn message(&mut self, msg: &str) {
        println!("{}", msg);
    }

    fn success(&mut self, msg: &str) {
        println!("{}", self.theme.format_success(msg));
    }

    fn warning(&mut self, msg: &str) {
        println!("{}", self.theme.format_warning(msg));
    }

    fn error(&mut self, msg: &str) {
        eprintln!("{}", self.theme.format_error(msg));
    }

    fn prompt(&mut self, prompt: &Prompt) -> Result<PromptResult> {
        match &prompt.prompt_type {
            PromptType::Confirm => {
                let answer = self.override_for(&prompt.key).or(prompt.default.as_ref());
                Ok(PromptResult::Bool(answer.is_some_and(|v| parse_bool(v))))
            }
            // Consumed so a menu asking again cannot replay it forever.
            PromptType::Select { options } => self
                .take_override(&prompt.key)
                .and_then(|value| options.iter().find(|o| o.value == value))
                .map(|o| PromptResult::String(o.value.clone()))
                .ok_or_else(|| MetanetError::NotInteractive {
                    prompt: prompt.question.clone(),
                }),
        }
    }

    fn start_spinner(&mut self, message: &str) -> Box<dyn SpinnerHandle> {
        println!("{}", message);
        Box::new(ProgressSpinner::hidden())
    }

    fn show_header(&mut self, name: &str, tagline: &str) {
        println!("{}", self.theme.format_header(name, tagline));
    }

    fn show_rule(&mut self, title: &str) {
        println!("{}", self.theme.format_rule(title, 60));
    }

    fn show_command(&mut self, command: &str) {
        if self.mode.shows_commands() {
            println!("{}", self.theme.format_command(command));
        }
    }

    fn command_output(&mut self, line: &OutputLine) {
        if !self.mode.shows_command_output() {
            return;
        }
        match line {
            OutputLine::Stdout(text) => println!("{}", text),
            OutputLine::Stderr(text) => eprintln!("{}", text),
        }
    }

    fn is_interactive(&self) -> bool {
        false
    }
}
