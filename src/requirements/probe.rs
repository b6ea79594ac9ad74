//! Best-effort check for whether a global tool is installed.
//!
//! `dotnet tool list -g` prints a table; rather than parse it we look for
//! the tool name anywhere in the output, ignoring case. Unrelated text that
//! happens to contain the name can produce a false positive, and a changed
//! listing format can produce a false negative. Both are accepted.
//!
//! # Example
//!
//! ```
//! use metanet::requirements::probe::listing_mentions;
//!
//! let listing = "Package Id      Version      Commands\n\
//!                --------------------------------------\n\
//!                snitch          2.0.0        snitch";
//! assert!(listing_mentions(listing, "Snitch"));
//! assert!(!listing_mentions(listing, "dotnet-outdated"));
//! ```

use tracing::debug;

use crate::shell::{CommandSpec, ProcessRunner};

/// Whether `name` appears in `listing`, case-insensitively.
pub fn listing_mentions(listing: &str, name: &str) -> bool {
    listing.to_lowercase().contains(&name.to_lowercase())
}

/// Run `listing` and look for `name` in its output.
///
/// A listing command that cannot be started counts as "not installed".
pub fn is_installed(runner: &dyn ProcessRunner, listing: &CommandSpec, name: &str) -> bool {
    match runner.capture_output_only(listing) {
        Ok(output) => {
            let found = listing_mentions(&output, name);
            debug!("Probe for '{}' via '{}': found={}", name, listing, found);
            found
        }
        Err(e) => {
            debug!("Probe for '{}' via '{}' failed: {}", name, listing, e);
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shell::{ExecutionMode, MockResponse, MockRunner};

    const LISTING: &str = "Package Id      Version      Commands";

    #[test]
    fn mentions_is_case_insensitive() {
        assert!(listing_mentions("SNITCH 2.0.0 snitch", "snitch"));
        assert!(listing_mentions("snitch 2.0.0", "SnItCh"));
    }

    #[test]
    fn mentions_missing_name() {
        assert!(!listing_mentions(LISTING, "snitch"));
        assert!(!listing_mentions("", "snitch"));
    }

    #[test]
    fn mentions_matches_substrings() {
        // Accepted heuristic: a longer package containing the name matches.
        assert!(listing_mentions("snitch-extras 1.0.0", "snitch"));
    }

    #[test]
    fn probe_finds_tool_in_listing() {
        let runner = MockRunner::new();
        runner.push(MockResponse::success().with_stdout([LISTING, "snitch  2.0.0  snitch"]));

        let listing = CommandSpec::new("dotnet").args(["tool", "list", "-g"]);
        assert!(is_installed(&runner, &listing, "Snitch"));
        assert_eq!(runner.calls()[0].0, ExecutionMode::Captured);
        assert_eq!(runner.commands(), vec!["dotnet tool list -g"]);
    }

    #[test]
    fn probe_reports_absent_tool() {
        let runner = MockRunner::new();
        runner.push(MockResponse::success().with_stdout([LISTING]));
        assert!(!is_installed(&runner, &CommandSpec::new("dotnet"), "snitch"));
    }

    #[test]
    fn probe_searches_stderr_too() {
        let runner = MockRunner::new();
        runner.push(MockResponse::exit(1).with_stderr(["snitch is broken"]));
        assert!(is_installed(&runner, &CommandSpec::new("dotnet"), "snitch"));
    }

    #[test]
    fn probe_treats_launch_failure_as_absent() {
        let runner = MockRunner::new();
        runner.push(MockResponse::launch_failure("No such file or directory"));
        assert!(!is_installed(&runner, &CommandSpec::new("dotnet"), "snitch"));
    }
}
