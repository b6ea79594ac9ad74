//! MetaNet CLI entry point.

use std::io::IsTerminal;
use std::process::ExitCode;

use clap::Parser;
use metanet::cli::{Cli, CommandDispatcher};
use metanet::shell::CommandRunner;
use metanet::ui::{create_ui, is_ci, OutputMode};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Filter used when neither `--debug` nor `RUST_LOG` is given.
const DEFAULT_LOG_FILTER: &str = "metanet=warn";

/// Initialize the tracing subscriber for logging.
///
/// Log level is controlled by:
/// 1. `--debug` flag sets level to DEBUG
/// 2. `RUST_LOG` environment variable (if set)
/// 3. Default is WARN, so logs stay out of the menu
fn init_tracing(debug: bool) {
    let filter = if debug {
        EnvFilter::new("metanet=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER))
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
        .with(filter)
        .init();
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.debug);

    tracing::debug!("MetaNet starting with args: {:?}", cli);

    let output_mode = OutputMode::from_flags(cli.verbose, cli.quiet);

    let is_interactive =
        std::io::stdin().is_terminal() && std::io::stdout().is_terminal() && !is_ci();

    let no_color = cli.color_disabled();
    let mut ui = create_ui(is_interactive, output_mode, no_color);

    let runner = CommandRunner::new().disable_color(no_color);
    let dispatcher = CommandDispatcher::new(&runner);

    match dispatcher.dispatch(&cli, ui.as_mut()) {
        Ok(result) => ExitCode::from(result.exit_code.clamp(0, 255) as u8),
        Err(e) => {
            ui.error(&format!("Error: {}", e));
            ExitCode::from(1)
        }
    }
}
