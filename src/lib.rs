//! MetaNet - an interactive terminal menu for .NET project tools.
//!
//! MetaNet launches external developer tools (an outdated-package checker
//! and a marker-comment search) and either captures their output or hands
//! them the terminal directly.
//!
//! # Modules
//!
//! - [`cli`] - Argument parsing, the interactive menu, and actions
//! - [`error`] - Error types and result aliases
//! - [`requirements`] - Probing for and installing global tools
//! - [`shell`] - External command execution and output relay
//! - [`ui`] - Prompts, spinners, and terminal output
//!
//! # Example
//!
//! ```no_run
//! use metanet::shell::{CommandRunner, CommandSpec, ProcessRunner, RecordingSink};
//!
//! let runner = CommandRunner::new();
//! let mut sink = RecordingSink::new();
//! let result = runner.run_captured(&CommandSpec::new("git").arg("--version"), &mut sink);
//! if result.success {
//!     println!("{}", result.stdout_lines().join("\n"));
//! }
//! ```

pub mod cli;
pub mod error;
pub mod requirements;
pub mod shell;
pub mod ui;

pub use error::{MetanetError, Result};
