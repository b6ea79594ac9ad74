//! Marker comment search.
//!
//! Runs `git grep` attached to the terminal so git applies its own colors
//! and pager, exactly as if the user had typed it.

use crate::error::Result;
use crate::shell::{CommandSpec, ProcessRunner, RunFailure};
use crate::ui::UserInterface;

use super::dispatcher::{Command, CommandResult};

/// `git grep` exits with 1 when nothing matched.
const GIT_GREP_NO_MATCH: i32 = 1;

/// Searches tracked files for a marker such as `TODO`.
pub struct SearchCommand<'a> {
    runner: &'a dyn ProcessRunner,
    pattern: String,
}

impl<'a> SearchCommand<'a> {
    pub fn new(runner: &'a dyn ProcessRunner, pattern: &str) -> Self {
        Self {
            runner,
            pattern: pattern.to_string(),
        }
    }

    /// Menu label for this action.
    pub fn label(&self) -> String {
        format!("Find all files with {} comments", self.pattern)
    }

    /// `git grep -n -i -e <pattern>`
    pub fn spec(&self) -> CommandSpec {
        CommandSpec::new("git").args(["grep", "-n", "-i", "-e", self.pattern.as_str()])
    }
}

impl Command for SearchCommand<'_> {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        ui.show_rule(&format!("{} search in repository", self.pattern));
        let spec = self.spec();
        ui.show_command(&spec.to_string());
        let result = self.runner.run_passthrough(&spec);

        if result.success {
            ui.success("Completed successfully.");
            return Ok(CommandResult::success());
        }

        match &result.failure {
            Some(RunFailure::NonZeroExit {
                code: Some(GIT_GREP_NO_MATCH),
            }) => {
                ui.warning(&format!("No matches for '{}'.", self.pattern));
                return Ok(CommandResult::success());
            }
            Some(RunFailure::LaunchFailed { reason, .. }) => {
                ui.error(&format!("Could not start {}: {}", spec.program(), reason));
            }
            _ => {}
        }
        ui.error("Finished with errors.");
        Ok(CommandResult::failure(1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shell::{ExecutionMode, MockResponse, MockRunner};
    use crate::ui::MockUI;

    #[test]
    fn label_and_spec_use_pattern() {
        let runner = MockRunner::new();
        let cmd = SearchCommand::new(&runner, "TODO");
        assert_eq!(cmd.label(), "Find all files with TODO comments");
        assert_eq!(cmd.spec().to_string(), "git grep -n -i -e TODO");
    }

    #[test]
    fn pattern_with_leading_dash_stays_an_argument() {
        let runner = MockRunner::new();
        let spec = SearchCommand::new(&runner, "--HACK").spec();
        assert_eq!(spec.get_args(), ["grep", "-n", "-i", "-e", "--HACK"]);
    }

    #[test]
    fn matches_report_success() {
        let runner = MockRunner::new();
        let mut ui = MockUI::new();

        let result = SearchCommand::new(&runner, "TODO").execute(&mut ui).unwrap();

        assert!(result.success);
        assert_eq!(runner.calls()[0].0, ExecutionMode::Passthrough);
        assert_eq!(ui.rules(), ["TODO search in repository"]);
        assert!(ui.has_success("Completed successfully."));
    }

    #[test]
    fn no_matches_is_a_warning() {
        let runner = MockRunner::new();
        runner.push(MockResponse::exit(1));
        let mut ui = MockUI::new();

        let result = SearchCommand::new(&runner, "FIXME").execute(&mut ui).unwrap();

        assert!(result.success);
        assert!(ui.has_warning("No matches for 'FIXME'."));
        assert!(ui.errors().is_empty());
    }

    #[test]
    fn git_error_is_reported() {
        let runner = MockRunner::new();
        runner.push(MockResponse::exit(128));
        let mut ui = MockUI::new();

        let result = SearchCommand::new(&runner, "TODO").execute(&mut ui).unwrap();

        assert_eq!(result, CommandResult::failure(1));
        assert!(ui.has_error("Finished with errors."));
    }

    #[test]
    fn missing_git_is_reported() {
        let runner = MockRunner::new();
        runner.push(MockResponse::launch_failure("No such file or directory"));
        let mut ui = MockUI::new();

        let result = SearchCommand::new(&runner, "TODO").execute(&mut ui).unwrap();

        assert!(!result.success);
        assert!(ui.has_error("Could not start git: No such file or directory"));
        assert!(ui.has_error("Finished with errors."));
    }
}
