//! Interactive action menu.
//!
//! Loops until the user picks Exit. Each action reports its own status
//! line; a failed action never ends the loop. Only a prompt that cannot
//! be answered (no terminal, terminal closed) stops it early.
//!
//! Without a terminal the menu runs whatever scripted answers the UI has
//! and then stops, reporting the last action's result.

use tracing::debug;

use crate::error::{MetanetError, Result};
use crate::ui::{Prompt, PromptOption, UserInterface};

use super::dispatcher::{Command, CommandResult};
use super::outdated::OutdatedCommand;
use super::search::SearchCommand;

const PROMPT_KEY: &str = "action";

/// One entry of the menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    Outdated,
    Search,
    Exit,
}

impl MenuChoice {
    /// Stable value used for prompt answers and overrides.
    pub fn value(&self) -> &'static str {
        match self {
            Self::Outdated => "outdated",
            Self::Search => "search",
            Self::Exit => "exit",
        }
    }

    pub fn from_value(value: &str) -> Option<Self> {
        [Self::Outdated, Self::Search, Self::Exit]
            .into_iter()
            .find(|choice| choice.value() == value)
    }
}

/// The interactive menu.
pub struct MenuCommand<'a> {
    outdated: OutdatedCommand<'a>,
    search: SearchCommand<'a>,
}

impl<'a> MenuCommand<'a> {
    pub fn new(outdated: OutdatedCommand<'a>, search: SearchCommand<'a>) -> Self {
        Self { outdated, search }
    }

    fn prompt(&self) -> Prompt {
        Prompt::select(
            PROMPT_KEY,
            "Select an action:",
            vec![
                PromptOption::new(self.outdated.label(), MenuChoice::Outdated.value()),
                PromptOption::new(self.search.label(), MenuChoice::Search.value()),
                PromptOption::new("Exit", MenuChoice::Exit.value()),
            ],
        )
    }
}

impl Command for MenuCommand<'_> {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        ui.show_header("MetaNet", ".NET project tools center");
        let prompt = self.prompt();
        let mut last: Option<CommandResult> = None;

        loop {
            let answer = match (ui.prompt(&prompt), last) {
                (Ok(answer), _) => answer.as_string(),
                (Err(MetanetError::NotInteractive { .. }), Some(result))
                    if !ui.is_interactive() =>
                {
                    debug!("No more scripted menu answers; stopping with {:?}", result);
                    return Ok(result);
                }
                (Err(e), _) => return Err(e),
            };
            let result = match MenuChoice::from_value(&answer) {
                Some(MenuChoice::Outdated) => self.outdated.execute(ui)?,
                Some(MenuChoice::Search) => self.search.execute(ui)?,
                Some(MenuChoice::Exit) => return Ok(CommandResult::success()),
                None => {
                    ui.warning(&format!("Unknown action '{}'.", answer));
                    continue;
                }
            };
            debug!("Action '{}' finished with {:?}", answer, result);
            last = Some(result);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::requirements::DotnetTool;
    use crate::shell::{MockResponse, MockRunner};
    use crate::ui::{MockUI, PromptType};

    fn menu(runner: &MockRunner) -> MenuCommand<'_> {
        MenuCommand::new(
            OutdatedCommand::new(runner, DotnetTool::snitch()),
            SearchCommand::new(runner, "TODO"),
        )
    }

    #[test]
    fn choice_values_round_trip() {
        for choice in [MenuChoice::Outdated, MenuChoice::Search, MenuChoice::Exit] {
            assert_eq!(MenuChoice::from_value(choice.value()), Some(choice));
        }
        assert_eq!(MenuChoice::from_value("deploy"), None);
    }

    #[test]
    fn prompt_lists_actions_in_order() {
        let runner = MockRunner::new();
        let prompt = menu(&runner).prompt();
        assert_eq!(prompt.question, "Select an action:");
        let PromptType::Select { options } = prompt.prompt_type else {
            panic!("Expected Select variant");
        };
        let labels: Vec<_> = options.iter().map(|o| o.label.as_str()).collect();
        assert_eq!(
            labels,
            vec![
                "Run Snitch (detect outdated packages)",
                "Find all files with TODO comments",
                "Exit",
            ]
        );
    }

    #[test]
    fn exit_ends_the_loop_immediately() {
        let runner = MockRunner::new();
        let mut ui = MockUI::new();
        ui.set_prompt_response(PROMPT_KEY, "exit");

        let result = menu(&runner).execute(&mut ui).unwrap();

        assert_eq!(result, CommandResult::success());
        assert_eq!(ui.headers(), ["MetaNet"]);
        assert!(runner.calls().is_empty());
    }

    #[test]
    fn loop_continues_after_failures() {
        let runner = MockRunner::new();
        // search: git fails
        runner.push(MockResponse::exit(128));
        // outdated: probe finds snitch, snitch fails
        runner.push(MockResponse::success().with_stdout(["snitch 2.0.0 snitch"]));
        runner.push(MockResponse::exit(1));
        // search again: succeeds
        runner.push(MockResponse::success());

        let mut ui = MockUI::new();
        ui.queue_prompt_responses(PROMPT_KEY, vec!["search", "outdated", "search", "exit"]);

        let result = menu(&runner).execute(&mut ui).unwrap();

        assert!(result.success);
        assert_eq!(ui.prompts_shown().len(), 4);
        assert_eq!(
            runner.commands(),
            vec![
                "git grep -n -i -e TODO",
                "dotnet tool list -g",
                "snitch",
                "git grep -n -i -e TODO",
            ]
        );
        assert!(ui.has_error("Finished with errors."));
        assert!(ui.has_error("Snitch finished with errors."));
        assert!(ui.has_success("Completed successfully."));
    }

    #[test]
    fn unknown_answer_is_skipped() {
        let runner = MockRunner::new();
        let mut ui = MockUI::new();
        ui.queue_prompt_responses(PROMPT_KEY, vec!["dance", "exit"]);

        let result = menu(&runner).execute(&mut ui).unwrap();

        assert!(result.success);
        assert!(ui.has_warning("Unknown action 'dance'."));
    }

    #[test]
    fn unanswerable_prompt_stops_the_menu() {
        let runner = MockRunner::new();
        let mut ui = MockUI::new();

        let err = menu(&runner).execute(&mut ui).unwrap_err();

        assert!(matches!(err, MetanetError::NotInteractive { .. }));
    }

    #[test]
    fn interactive_menu_errors_when_answers_run_out() {
        let runner = MockRunner::new();
        let mut ui = MockUI::new();
        ui.queue_prompt_responses(PROMPT_KEY, vec!["search"]);

        let err = menu(&runner).execute(&mut ui).unwrap_err();

        assert!(matches!(err, MetanetError::NotInteractive { .. }));
        assert_eq!(runner.calls().len(), 1);
    }

    #[test]
    fn headless_menu_stops_after_scripted_action() {
        let runner = MockRunner::new();
        runner.push(MockResponse::exit(128));
        let mut ui = MockUI::new();
        ui.set_interactive(false);
        ui.queue_prompt_responses(PROMPT_KEY, vec!["search"]);

        let result = menu(&runner).execute(&mut ui).unwrap();

        assert_eq!(result, CommandResult::failure(1));
        assert_eq!(ui.prompts_shown().len(), 2);
        assert_eq!(ui.rules(), ["TODO search in repository"]);
        assert_eq!(runner.calls().len(), 1);
    }

    #[test]
    fn headless_menu_without_answers_still_fails() {
        let runner = MockRunner::new();
        let mut ui = MockUI::new();
        ui.set_interactive(false);

        let err = menu(&runner).execute(&mut ui).unwrap_err();

        assert!(matches!(err, MetanetError::NotInteractive { .. }));
    }
}
