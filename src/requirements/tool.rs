//! .NET global tools MetaNet knows how to install and run.

use crate::shell::CommandSpec;

/// A tool distributed as a `dotnet` global tool.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DotnetTool {
    /// Human-facing name used in messages.
    pub display_name: String,
    /// Command the tool installs onto PATH.
    pub command: String,
    /// NuGet package id passed to `dotnet tool install`.
    pub package_id: String,
}

impl DotnetTool {
    pub fn new(display_name: &str, command: &str, package_id: &str) -> Self {
        Self {
            display_name: display_name.to_string(),
            command: command.to_string(),
            package_id: package_id.to_string(),
        }
    }

    /// Snitch, the transitive/outdated package reference checker.
    pub fn snitch() -> Self {
        Self::new("Snitch", "snitch", "snitch")
    }

    /// `dotnet tool list -g`
    pub fn listing_spec() -> CommandSpec {
        CommandSpec::new("dotnet").args(["tool", "list", "-g"])
    }

    /// `dotnet tool install -g <package>`
    pub fn install_spec(&self) -> CommandSpec {
        CommandSpec::new("dotnet").args(["tool", "install", "-g", self.package_id.as_str()])
    }

    /// Run the tool itself in the current directory.
    pub fn run_spec(&self) -> CommandSpec {
        CommandSpec::new(self.command.as_str())
    }
}
