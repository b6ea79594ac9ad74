//! Command-line interface for MetaNet.
//!
//! # Architecture
//!
//! - [`args`] - Argument definitions using clap derive macros
//! - [`commands`] - Menu and action implementations

pub mod args;
pub mod commands;

pub use args::{Cli, Commands};
pub use commands::{Command, CommandDispatcher, CommandResult};
