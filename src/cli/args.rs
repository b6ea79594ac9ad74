//! CLI argument definitions.
//!
//! This module defines all CLI arguments using clap's derive macros.
//! The main entry point is the [`Cli`] struct.

use clap::{Parser, Subcommand};

/// MetaNet - .NET project tools center.
#[derive(Debug, Parser)]
#[command(name = "metanet")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Marker to search for (case-insensitive)
    #[arg(
        long,
        global = true,
        env = "METANET_SEARCH_PATTERN",
        default_value = "TODO"
    )]
    pub pattern: String,

    /// Install missing tools without asking
    #[arg(short = 'y', long, global = true, env = "METANET_ASSUME_YES")]
    pub yes: bool,

    /// Echo each command before running it
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Hide output relayed from install commands
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Disable colored output (also for launched tools; implied by NO_COLOR)
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Enable debug logging
    #[arg(long, global = true)]
    pub debug: bool,

    /// Action to run; opens the interactive menu when omitted
    #[command(subcommand)]
    pub command: Option<Commands>,
}

impl Cli {
    /// Whether color is off for us and the tools we launch.
    ///
    /// `NO_COLOR` counts when present with any value, `NO_COLOR=0` included.
    pub fn color_disabled(&self) -> bool {
        self.color_disabled_with(|key| {
            std::env::var_os(key).map(|v| v.to_string_lossy().into_owned())
        })
    }

    /// Like [`Cli::color_disabled`], with a custom environment lookup.
    pub fn color_disabled_with<F>(&self, lookup: F) -> bool
    where
        F: Fn(&str) -> Option<String>,
    {
        self.no_color || lookup("NO_COLOR").is_some()
    }
}

/// Available subcommands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Subcommand)]
pub enum Commands {
    /// Detect outdated packages with Snitch (installs it if needed)
    Outdated,

    /// Find files containing the marker comment via `git grep`
    Search,

    /// Open the interactive menu (default)
    Menu,
}
