//! Interactive terminal UI.

use console::Term;
use std::io::Write;

use crate::error::Result;
use crate::shell::OutputLine;

use super::{
    prompt_user, should_use_colors, MetanetTheme, NonInteractiveUI, OutputMode, ProgressSpinner,
    Prompt, PromptResult, SpinnerHandle, UserInterface,
};

/// Interactive terminal UI implementation.
pub struct TerminalUI {
    term: Term,
    theme: MetanetTheme,
    mode: OutputMode,
}

impl TerminalUI {
    /// Create a new terminal UI.
    pub fn new(mode: OutputMode, no_color: bool) -> Self {
        let theme = if should_use_colors(no_color) {
            MetanetTheme::new()
        } else {
            MetanetTheme::plain()
        };

        Self {
            term: Term::stdout(),
            theme,
            mode,
        }
    }

    fn width(&self) -> usize {
        usize::from(self.term.size().1)
    }
}

impl UserInterface for TerminalUI {
    fn message(&mut self, msg: &str) {
        writeln!(self.term, "{}", msg).ok();
    }

    fn success(&mut self, msg: &str) {
        writeln!(self.term, "{}", self.theme.format_success(msg)).ok();
    }

    fn warning(&mut self, msg: &str) {
        writeln!(self.term, "{}", self.theme.format_warning(msg)).ok();
    }

    fn error(&mut self, msg: &str) {
        writeln!(self.term, "{}", self.theme.format_error(msg)).ok();
    }

    fn prompt(&mut self, prompt: &Prompt) -> Result<PromptResult> {
        prompt_user(prompt, &self.term)
    }

    fn start_spinner(&mut self, message: &str) -> Box<dyn SpinnerHandle> {
        Box::new(ProgressSpinner::new(message, self.theme.clone()))
    }

    fn show_header(&mut self, name: &str, tagline: &str) {
        writeln!(self.term, "{}", self.theme.format_header(name, tagline)).ok();
    }

    fn show_rule(&mut self, title: &str) {
        let rule = self.theme.format_rule(title, self.width());
        writeln!(self.term, "{}", rule).ok();
    }

    fn show_command(&mut self, command: &str) {
        if self.mode.shows_commands() {
            writeln!(self.term, "{}", self.theme.format_command(command)).ok();
        }
    }

    fn command_output(&mut self, line: &OutputLine) {
        if self.mode.shows_command_output() {
            writeln!(self.term, "{}", self.theme.format_output_line(line)).ok();
        }
    }

    fn is_interactive(&self) -> bool {
        self.term.is_term()
    }
}

/// Create the appropriate UI based on environment.
pub fn create_ui(interactive: bool, mode: OutputMode, no_color: bool) -> Box<dyn UserInterface> {
    if interactive {
        Box::new(TerminalUI::new(mode, no_color))
    } else {
        Box::new(NonInteractiveUI::new(mode))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn terminal_ui_keeps_mode() {
        let ui = TerminalUI::new(OutputMode::Quiet, true);
        assert_eq!(ui.mode, OutputMode::Quiet);
    }

    #[test]
    fn terminal_ui_has_usable_width() {
        let ui = TerminalUI::new(OutputMode::Normal, true);
        assert!(ui.width() > 0);
    }

    #[test]
    fn create_ui_non_interactive() {
        let ui = create_ui(false, OutputMode::Normal, true);
        assert!(!ui.is_interactive());
    }
}
