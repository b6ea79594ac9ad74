//! Command dispatching.
//!
//! This module provides the core command infrastructure:
//! - [`Command`] trait for implementing commands
//! - [`CommandResult`] for uniform result reporting
//! - [`CommandDispatcher`] for routing CLI subcommands

use crate::cli::args::{Cli, Commands};
use crate::error::Result;
use crate::requirements::DotnetTool;
use crate::shell::ProcessRunner;
use crate::ui::UserInterface;

use super::menu::MenuCommand;
use super::outdated::OutdatedCommand;
use super::search::SearchCommand;

/// Trait for command implementations.
///
/// Each menu action and CLI subcommand implements this trait.
pub trait Command {
    /// Execute the command.
    ///
    /// Returns `Err` only when the UI can no longer be driven; tool
    /// failures are reported through the UI and the [`CommandResult`].
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult>;
}

/// Result of command execution.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommandResult {
    /// Whether the command succeeded.
    pub success: bool,

    /// Exit code to use (0 for success, non-zero for failure).
    pub exit_code: i32,
}

impl CommandResult {
    /// Create a successful result.
    pub fn success() -> Self {
        Self {
            success: true,
            exit_code: 0,
        }
    }

    /// Create a failure result.
    pub fn failure(exit_code: i32) -> Self {
        Self {
            success: false,
            exit_code,
        }
    }
}

/// Dispatches CLI commands to their implementations.
pub struct CommandDispatcher<'a> {
    runner: &'a dyn ProcessRunner,
}

impl<'a> CommandDispatcher<'a> {
    /// Create a dispatcher that launches tools through `runner`.
    pub fn new(runner: &'a dyn ProcessRunner) -> Self {
        Self { runner }
    }

    /// Dispatch and execute a command.
    ///
    /// No subcommand opens the interactive menu.
    pub fn dispatch(&self, cli: &Cli, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        match cli.command.unwrap_or(Commands::Menu) {
            Commands::Outdated => self.outdated(cli).execute(ui),
            Commands::Search => self.search(cli).execute(ui),
            Commands::Menu => {
                MenuCommand::new(self.outdated(cli), self.search(cli)).execute(ui)
            }
        }
    }

    fn outdated(&self, cli: &Cli) -> OutdatedCommand<'a> {
        OutdatedCommand::new(self.runner, DotnetTool::snitch()).assume_yes(cli.yes)
    }

    fn search(&self, cli: &Cli) -> SearchCommand<'a> {
        SearchCommand::new(self.runner, &cli.pattern)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shell::{MockResponse, MockRunner};
    use crate::ui::MockUI;
    use clap::Parser;

    #[test]
    fn command_result_constructors() {
        assert_eq!(CommandResult::success().exit_code, 0);
        assert!(CommandResult::success().success);
        let failed = CommandResult::failure(3);
        assert!(!failed.success);
        assert_eq!(failed.exit_code, 3);
    }

    #[test]
    fn dispatches_search_with_pattern() {
        let runner = MockRunner::new();
        let mut ui = MockUI::new();
        let cli = Cli::parse_from(["metanet", "search", "--pattern", "FIXME"]);

        let result = CommandDispatcher::new(&runner).dispatch(&cli, &mut ui).unwrap();

        assert!(result.success);
        assert_eq!(runner.commands(), vec!["git grep -n -i -e FIXME"]);
    }

    #[test]
    fn dispatches_outdated_with_assume_yes() {
        let runner = MockRunner::new();
        runner.push(MockResponse::success());
        let mut ui = MockUI::new();
        let cli = Cli::parse_from(["metanet", "outdated", "--yes"]);

        let result = CommandDispatcher::new(&runner).dispatch(&cli, &mut ui).unwrap();

        assert!(result.success);
        assert!(ui.prompts_shown().is_empty());
        assert_eq!(
            runner.commands(),
            vec!["dotnet tool list -g", "dotnet tool install -g snitch", "snitch"]
        );
    }

    #[test]
    fn no_subcommand_opens_menu() {
        let runner = MockRunner::new();
        let mut ui = MockUI::new();
        ui.set_prompt_response("action", "exit");
        let cli = Cli::parse_from(["metanet"]);

        let result = CommandDispatcher::new(&runner).dispatch(&cli, &mut ui).unwrap();

        assert_eq!(result, CommandResult::success());
        assert_eq!(ui.prompts_shown(), ["action"]);
        assert!(runner.calls().is_empty());
    }
}
