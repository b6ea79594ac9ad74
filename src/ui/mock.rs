//! Mock UI implementation for testing.
//!
//! `MockUI` implements the `UserInterface` trait and captures all
//! interactions for later assertion. It can be configured with
//! pre-determined prompt responses.
//!
//! # Example
//!
//! ```
//! use metanet::ui::{MockUI, UserInterface};
//!
//! let mut ui = MockUI::new();
//! ui.set_prompt_response("install_snitch", "yes");
//!
//! // Use ui in code under test...
//! ui.warning("Skipped installation.");
//! ui.success("Done!");
//!
//! // Assert on captured interactions
//! assert!(ui.has_warning("Skipped"));
//! assert!(ui.successes().contains(&"Done!".to_string()));
//! ```

use std::cell::RefCell;
use std::collections::{HashMap, VecDeque};
use std::rc::Rc;

use crate::error::{MetanetError, Result};
use crate::shell::OutputLine;

use super::prompts::parse_bool;
use super::{Prompt, PromptResult, PromptType, SpinnerHandle, UserInterface};

/// Mock UI implementation for testing.
///
/// Supports both single responses (via `set_prompt_response`) and queued
/// responses (via `queue_prompt_responses`) for keys asked repeatedly,
/// such as the main menu.
#[derive(Debug, Default)]
pub struct MockUI {
    interactive: bool,
    messages: Vec<String>,
    successes: Vec<String>,
    warnings: Vec<String>,
    errors: Vec<String>,
    headers: Vec<String>,
    rules: Vec<String>,
    commands: Vec<String>,
    output: Vec<OutputLine>,
    spinners: Vec<String>,
    spinner_log: SpinnerLog,
    prompt_responses: HashMap<String, String>,
    prompt_queues: HashMap<String, VecDeque<String>>,
    prompts_shown: Vec<String>,
}

impl MockUI {
    /// Create a new interactive MockUI.
    pub fn new() -> Self {
        Self {
            interactive: true,
            ..Default::default()
        }
    }

    /// Set a response for a prompt key.
    pub fn set_prompt_response(&mut self, key: &str, response: &str) {
        self.prompt_responses
            .insert(key.to_string(), response.to_string());
    }

    /// Queue multiple responses for the same prompt key.
    ///
    /// Responses are returned in order. After the queue is exhausted,
    /// falls back to `set_prompt_response`, then the prompt default.
    pub fn queue_prompt_responses(&mut self, key: &str, responses: Vec<&str>) {
        let queue = responses.into_iter().map(|s| s.to_string()).collect();
        self.prompt_queues.insert(key.to_string(), queue);
    }

    /// Set whether this mock behaves as interactive.
    pub fn set_interactive(&mut self, interactive: bool) {
        self.interactive = interactive;
    }

    /// Get all captured messages.
    pub fn messages(&self) -> &[String] {
        &self.messages
    }

    /// Get all captured success messages.
    pub fn successes(&self) -> &[String] {
        &self.successes
    }

    /// Get all captured warning messages.
    pub fn warnings(&self) -> &[String] {
        &self.warnings
    }

    /// Get all captured error messages.
    pub fn errors(&self) -> &[String] {
        &self.errors
    }

    /// Get all captured headers.
    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    /// Get all captured rule titles.
    pub fn rules(&self) -> &[String] {
        &self.rules
    }

    /// Get all echoed commands.
    pub fn commands(&self) -> &[String] {
        &self.commands
    }

    /// Get all relayed command output lines.
    pub fn output(&self) -> &[OutputLine] {
        &self.output
    }

    /// Get all spinner messages that were started.
    pub fn spinners(&self) -> &[String] {
        &self.spinners
    }

    /// How each spinner finished, in the order they finished.
    ///
    /// A spinner that was dropped without finishing is absent.
    pub fn finished_spinners(&self) -> Vec<(SpinnerStatus, Option<String>)> {
        self.spinner_log.borrow().clone()
    }

    /// Get all prompts that were shown (by key).
    pub fn prompts_shown(&self) -> &[String] {
        &self.prompts_shown
    }

    /// Check if a specific success was shown.
    pub fn has_success(&self, msg: &str) -> bool {
        self.successes.iter().any(|m| m.contains(msg))
    }

    /// Check if a specific warning was shown.
    pub fn has_warning(&self, msg: &str) -> bool {
        self.warnings.iter().any(|m| m.contains(msg))
    }

    /// Check if a specific error was shown.
    pub fn has_error(&self, msg: &str) -> bool {
        self.errors.iter().any(|m| m.contains(msg))
    }

    fn answer(&mut self, key: &str) -> Option<String> {
        if let Some(response) = self
            .prompt_queues
            .get_mut(key)
            .and_then(|queue| queue.pop_front())
        {
            return Some(response);
        }
        self.prompt_responses.get(key).cloned()
    }
}

impl UserInterface for MockUI {
    fn message(&mut self, msg: &str) {
        self.messages.push(msg.to_string());
    }

    fn success(&mut self, msg: &str) {
        self.successes.push(msg.to_string());
    }

    fn warning(&mut self, msg: &str) {
        self.warnings.push(msg.to_string());
    }

    fn error(&mut self, msg: &str) {
        self.errors.push(msg.to_string());
    }

    fn prompt(&mut self, prompt: &Prompt) -> Result<PromptResult> {
        self.prompts_shown.push(prompt.key.clone());

        let response = self.answer(&prompt.key).or_else(|| prompt.default.clone());

        match (&prompt.prompt_type, response) {
            (PromptType::Confirm, Some(value)) => Ok(PromptResult::Bool(parse_bool(&value))),
            (PromptType::Confirm, None) => Ok(PromptResult::Bool(false)),
            (PromptType::Select { .. }, Some(value)) => Ok(PromptResult::String(value)),
            // An unanswered select would loop forever in a menu; fail instead.
            (PromptType::Select { .. }, None) => Err(MetanetError::NotInteractive {
                prompt: prompt.question.clone(),
            }),
        }
    }

    fn start_spinner(&mut self, message: &str) -> Box<dyn SpinnerHandle> {
        self.spinners.push(message.to_string());
        Box::new(MockSpinner {
            log: Rc::clone(&self.spinner_log),
            ..MockSpinner::new()
        })
    }

    fn show_header(&mut self, name: &str, _tagline: &str) {
        self.headers.push(name.to_string());
    }

    fn show_rule(&mut self, title: &str) {
        self.rules.push(title.to_string());
    }

    fn show_command(&mut self, command: &str) {
        self.commands.push(command.to_string());
    }

    fn command_output(&mut self, line: &OutputLine) {
        self.output.push(line.clone());
    }

    fn is_interactive(&self) -> bool {
        self.interactive
    }
}

/// Finished spinners shared between a [`MockUI`] and the spinners it starts.
type SpinnerLog = Rc<RefCell<Vec<(SpinnerStatus, Option<String>)>>>;

/// Mock spinner that captures how it finished.
#[derive(Debug, Default)]
pub struct MockSpinner {
    finish_message: Option<String>,
    status: Option<SpinnerStatus>,
    log: SpinnerLog,
}

/// Status of a mock spinner when finished.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpinnerStatus {
    /// Finished with a success line.
    Success,
    /// Cleared without a message.
    Cleared,
}

impl MockSpinner {
    /// Create a new mock spinner.
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the final finish message.
    pub fn finish_message(&self) -> Option<&str> {
        self.finish_message.as_deref()
    }

    /// Get the finish status.
    pub fn status(&self) -> Option<SpinnerStatus> {
        self.status
    }

    fn finish(&mut self, status: SpinnerStatus, msg: Option<&str>) {
        self.status = Some(status);
        self.finish_message = msg.map(str::to_string);
        self.log
            .borrow_mut()
            .push((status, self.finish_message.clone()));
    }
}

impl SpinnerHandle for MockSpinner {
    fn finish_success(&mut self, msg: &str) {
        self.finish(SpinnerStatus::Success, Some(msg));
    }

    fn finish_and_clear(&mut self) {
        self.finish(SpinnerStatus::Cleared, None);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::PromptOption;

    #[test]
    fn mock_captures_messages() {
        let mut ui = MockUI::new();
        ui.message("hello");
        ui.success("done");
        ui.warning("careful");
        ui.error("broken");

        assert_eq!(ui.messages(), ["hello"]);
        assert!(ui.has_success("done"));
        assert!(ui.has_warning("careful"));
        assert!(ui.has_error("broken"));
    }

    #[test]
    fn mock_confirm_falls_back_to_default() {
        let mut ui = MockUI::new();
        let result = ui.prompt(&Prompt::confirm("install", "Install?", true)).unwrap();
        assert_eq!(result, PromptResult::Bool(true));
        assert_eq!(ui.prompts_shown(), ["install"]);
    }

    #[test]
    fn mock_queue_is_consumed_before_fixed_response() {
        let mut ui = MockUI::new();
        ui.queue_prompt_responses("action", vec!["search", "outdated"]);
        ui.set_prompt_response("action", "exit");
        let prompt = Prompt::select("action", "Select", vec![PromptOption::new("Exit", "exit")]);

        let answers: Vec<String> = (0..3)
            .map(|_| ui.prompt(&prompt).unwrap().as_string())
            .collect();
        assert_eq!(answers, vec!["search", "outdated", "exit"]);
    }

    #[test]
    fn mock_unanswered_select_fails() {
        let mut ui = MockUI::new();
        let prompt = Prompt::select("action", "Select", vec![]);
        assert!(ui.prompt(&prompt).is_err());
    }

    #[test]
    fn mock_records_output_lines_and_rules() {
        let mut ui = MockUI::new();
        ui.show_rule("snitch");
        ui.command_output(&OutputLine::Stderr("oops".to_string()));
        assert_eq!(ui.rules(), ["snitch"]);
        assert_eq!(ui.output(), [OutputLine::Stderr("oops".to_string())]);
    }

    #[test]
    fn mock_spinner_tracks_status() {
        let mut spinner = MockSpinner::new();
        spinner.finish_success("Snitch is installed.");
        assert_eq!(spinner.finish_message(), Some("Snitch is installed."));
        assert_eq!(spinner.status(), Some(SpinnerStatus::Success));
    }

    #[test]
    fn mock_ui_logs_finished_spinners() {
        let mut ui = MockUI::new();
        ui.start_spinner("Checking for snitch...").finish_and_clear();
        ui.start_spinner("Checking for snitch...")
            .finish_success("Snitch is installed.");
        let _unfinished = ui.start_spinner("Checking again...");

        assert_eq!(ui.spinners().len(), 3);
        assert_eq!(
            ui.finished_spinners(),
            vec![
                (SpinnerStatus::Cleared, None),
                (SpinnerStatus::Success, Some("Snitch is installed.".to_string())),
            ]
        );
    }
}
