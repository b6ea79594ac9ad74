//! CLI command implementations.
//!
//! Each action implements the [`Command`] trait, which provides a uniform
//! interface for executing it and reporting results. The same commands
//! back both the interactive menu and the one-shot subcommands.

pub mod dispatcher;
pub mod menu;
pub mod outdated;
pub mod search;

pub use dispatcher::{Command, CommandDispatcher, CommandResult};
pub use menu::{MenuChoice, MenuCommand};
pub use outdated::OutdatedCommand;
pub use search::SearchCommand;
