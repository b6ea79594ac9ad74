//! Outdated package check.
//!
//! Makes sure the checker tool is installed, then runs it attached to the
//! terminal so its own table formatting and colors come through.

use crate::error::Result;
use crate::requirements::{DotnetTool, Installer};
use crate::shell::{ProcessRunner, RunFailure};
use crate::ui::UserInterface;

use super::dispatcher::{Command, CommandResult};

/// Runs an outdated-package checker such as Snitch.
pub struct OutdatedCommand<'a> {
    runner: &'a dyn ProcessRunner,
    tool: DotnetTool,
    assume_yes: bool,
}

impl<'a> OutdatedCommand<'a> {
    pub fn new(runner: &'a dyn ProcessRunner, tool: DotnetTool) -> Self {
        Self {
            runner,
            tool,
            assume_yes: false,
        }
    }

    /// Install the tool without asking if it is missing.
    pub fn assume_yes(mut self, yes: bool) -> Self {
        self.assume_yes = yes;
        self
    }

    /// Menu label for this action.
    pub fn label(&self) -> String {
        format!("Run {} (detect outdated packages)", self.tool.display_name)
    }
}

impl Command for OutdatedCommand<'_> {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let outcome = Installer::new(self.runner)
            .assume_yes(self.assume_yes)
            .ensure_installed(&self.tool, ui)?;
        if !outcome.is_ready() {
            return Ok(CommandResult::failure(1));
        }

        ui.show_rule(&self.tool.command);
        let spec = self.tool.run_spec();
        ui.show_command(&spec.to_string());
        let result = self.runner.run_passthrough(&spec);

        if result.success {
            ui.success(&format!("{} completed successfully.", self.tool.display_name));
            return Ok(CommandResult::success());
        }

        if let Some(RunFailure::LaunchFailed { reason, .. }) = &result.failure {
            ui.error(&format!("Could not start {}: {}", spec.program(), reason));
            ui.message("If it was just installed, restart your shell so it is on PATH.");
        }
        ui.error(&format!("{} finished with errors.", self.tool.display_name));
        Ok(CommandResult::failure(1))
    }
}
