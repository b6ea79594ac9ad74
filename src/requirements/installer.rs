//! Offer to install a missing global tool.
//!
//! The tool is probed first; only when it looks absent is the user asked.
//! The install command runs captured, with its output relayed through the
//! UI. On some systems a freshly installed tool is not on `PATH` for the
//! current process until the shell is restarted; that case surfaces later
//! as a launch failure of the tool itself.

use tracing::info;

use crate::error::Result;
use crate::shell::{ProcessRunner, RunFailure};
use crate::ui::{Prompt, UiRelay, UserInterface};

use super::probe::is_installed;
use super::tool::DotnetTool;

/// What happened when a tool was required.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InstallOutcome {
    /// The probe found the tool; nothing was installed.
    AlreadyInstalled,
    /// The tool was missing and installed successfully.
    Installed,
    /// The tool was missing and the user declined to install it.
    Declined,
    /// The install command could not start or did not succeed.
    Failed { reason: String },
}

impl InstallOutcome {
    /// Whether the tool can now be run.
    pub fn is_ready(&self) -> bool {
        matches!(self, Self::AlreadyInstalled | Self::Installed)
    }
}

/// Probes for and installs a [`DotnetTool`].
pub struct Installer<'a> {
    runner: &'a dyn ProcessRunner,
    assume_yes: bool,
}

impl<'a> Installer<'a> {
    pub fn new(runner: &'a dyn ProcessRunner) -> Self {
        Self {
            runner,
            assume_yes: false,
        }
    }

    /// Install without asking.
    pub fn assume_yes(mut self, yes: bool) -> Self {
        self.assume_yes = yes;
        self
    }

    /// Make sure `tool` is installed, asking before installing it.
    ///
    /// Only a prompt that cannot be answered is an error; every other
    /// problem is reported through the UI and the returned outcome.
    pub fn ensure_installed(
        &self,
        tool: &DotnetTool,
        ui: &mut dyn UserInterface,
    ) -> Result<InstallOutcome> {
        let mut spinner = ui.start_spinner(&format!("Checking for {}...", tool.command));
        if is_installed(self.runner, &DotnetTool::listing_spec(), &tool.command) {
            spinner.finish_success(&format!("{} is installed.", tool.display_name));
            return Ok(InstallOutcome::AlreadyInstalled);
        }
        spinner.finish_and_clear();

        if !self.confirm_install(tool, ui)? {
            ui.warning("Skipped installation.");
            return Ok(InstallOutcome::Declined);
        }

        let spec = tool.install_spec();
        ui.show_command(&spec.to_string());
        info!("Installing {} with '{}'", tool.package_id, spec);
        let result = self.runner.run_captured(&spec, &mut UiRelay::new(&mut *ui));

        if result.success {
            ui.success(&format!("Installed {}.", tool.package_id));
            return Ok(InstallOutcome::Installed);
        }

        let reason = match result.failure {
            Some(RunFailure::LaunchFailed { reason, .. }) => {
                ui.error(&format!("Could not start {}: {}", spec.program(), reason));
                reason
            }
            Some(failure) => failure.to_string(),
            None => "unknown failure".to_string(),
        };
        ui.error(&format!(
            "Failed to install {}. Please install it manually and try again.",
            tool.display_name
        ));
        Ok(InstallOutcome::Failed { reason })
    }

    fn confirm_install(&self, tool: &DotnetTool, ui: &mut dyn UserInterface) -> Result<bool> {
        if self.assume_yes {
            return Ok(true);
        }
        let prompt = Prompt::confirm(
            &format!("install_{}", tool.command.replace('-', "_")),
            &format!(
                "{} is not installed. Install {} as a global tool now?",
                tool.display_name, tool.package_id
            ),
            true,
        );
        Ok(ui.prompt(&prompt)?.as_bool().unwrap_or(false))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shell::{ExecutionMode, MockResponse, MockRunner, OutputLine};
    use crate::ui::{MockUI, SpinnerStatus};

    fn listing_without_snitch() -> MockResponse {
        MockResponse::success().with_stdout(["Package Id      Version      Commands"])
    }

    #[test]
    fn installed_tool_is_not_reinstalled() {
        let runner = MockRunner::new();
        runner.push(MockResponse::success().with_stdout(["snitch  2.0.0  snitch"]));
        let mut ui = MockUI::new();

        let outcome = Installer::new(&runner)
            .ensure_installed(&DotnetTool::snitch(), &mut ui)
            .unwrap();

        assert_eq!(outcome, InstallOutcome::AlreadyInstalled);
        assert!(ui.prompts_shown().is_empty());
        assert_eq!(runner.calls().len(), 1);
        assert_eq!(ui.spinners(), ["Checking for snitch..."]);
        assert_eq!(
            ui.finished_spinners(),
            vec![(SpinnerStatus::Success, Some("Snitch is installed.".to_string()))]
        );
    }

    #[test]
    fn declining_skips_installation() {
        let runner = MockRunner::new();
        runner.push(listing_without_snitch());
        let mut ui = MockUI::new();
        ui.set_prompt_response("install_snitch", "no");

        let outcome = Installer::new(&runner)
            .ensure_installed(&DotnetTool::snitch(), &mut ui)
            .unwrap();

        assert_eq!(outcome, InstallOutcome::Declined);
        assert!(!outcome.is_ready());
        assert!(ui.has_warning("Skipped installation."));
        assert_eq!(runner.calls().len(), 1);
        assert_eq!(ui.finished_spinners(), vec![(SpinnerStatus::Cleared, None)]);
    }

    #[test]
    fn accepting_installs_and_relays_output() {
        let runner = MockRunner::new();
        runner.push(listing_without_snitch());
        runner.push(MockResponse::success().with_stdout(["Tool 'snitch' was successfully installed."]));
        let mut ui = MockUI::new();
        ui.set_prompt_response("install_snitch", "yes");

        let outcome = Installer::new(&runner)
            .ensure_installed(&DotnetTool::snitch(), &mut ui)
            .unwrap();

        assert_eq!(outcome, InstallOutcome::Installed);
        assert!(outcome.is_ready());
        assert_eq!(
            runner.commands(),
            vec!["dotnet tool list -g", "dotnet tool install -g snitch"]
        );
        assert_eq!(runner.calls()[1].0, ExecutionMode::Captured);
        assert_eq!(
            ui.output(),
            [OutputLine::Stdout("Tool 'snitch' was successfully installed.".to_string())]
        );
        assert_eq!(ui.commands(), ["dotnet tool install -g snitch"]);
    }

    #[test]
    fn prompt_defaults_to_yes() {
        let runner = MockRunner::new();
        runner.push(listing_without_snitch());
        let mut ui = MockUI::new();

        let outcome = Installer::new(&runner)
            .ensure_installed(&DotnetTool::snitch(), &mut ui)
            .unwrap();

        assert_eq!(outcome, InstallOutcome::Installed);
        assert_eq!(ui.prompts_shown(), ["install_snitch"]);
    }

    #[test]
    fn assume_yes_skips_prompt() {
        let runner = MockRunner::new();
        runner.push(listing_without_snitch());
        let mut ui = MockUI::new();

        let outcome = Installer::new(&runner)
            .assume_yes(true)
            .ensure_installed(&DotnetTool::snitch(), &mut ui)
            .unwrap();

        assert_eq!(outcome, InstallOutcome::Installed);
        assert!(ui.prompts_shown().is_empty());
    }

    #[test]
    fn failed_install_reports_error() {
        let runner = MockRunner::new();
        runner.push(listing_without_snitch());
        runner.push(MockResponse::exit(1).with_stderr(["error NU1101: Unable to find package"]));
        let mut ui = MockUI::new();

        let outcome = Installer::new(&runner)
            .ensure_installed(&DotnetTool::snitch(), &mut ui)
            .unwrap();

        assert_eq!(
            outcome,
            InstallOutcome::Failed {
                reason: "exited with code 1".to_string()
            }
        );
        assert!(ui.has_error("Failed to install Snitch"));
        assert_eq!(ui.output().len(), 1);
    }

    #[test]
    fn missing_dotnet_is_reported() {
        let runner = MockRunner::new();
        runner.push(MockResponse::launch_failure("No such file or directory"));
        runner.push(MockResponse::launch_failure("No such file or directory"));
        let mut ui = MockUI::new();

        let outcome = Installer::new(&runner)
            .ensure_installed(&DotnetTool::snitch(), &mut ui)
            .unwrap();

        assert!(matches!(outcome, InstallOutcome::Failed { .. }));
        assert!(ui.has_error("Could not start dotnet"));
        assert!(ui.has_error("Failed to install Snitch"));
    }
}
