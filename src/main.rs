//! logmask CLI entry point.

use std::io;
use std::process::ExitCode;

use clap::Parser;
use logmask::cli::{Cli, CommandDispatcher};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Initialize the tracing subscriber for logging.
///
/// Log level is controlled by:
/// 1. `--debug` flag sets level to DEBUG
/// 2. `RUST_LOG` environment variable (if set)
/// 3. Default is INFO
///
/// Logs go to stderr; stdout carries the masked stream.
fn init_tracing(debug: bool) {
    let filter = if debug {
        EnvFilter::new("logmask=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("logmask=info"))
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false).with_writer(io::stderr))
        .with(filter)
        .init();
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.debug);

    tracing::debug!("logmask starting with args: {:?}", cli);

    let working_dir = std::env::current_dir().unwrap_or_default();
    let dispatcher = CommandDispatcher::new(working_dir);

    let stdout = io::stdout();
    let mut out = stdout.lock();

    match dispatcher.dispatch(&cli, &mut out) {
        Ok(result) => ExitCode::from(result.exit_code as u8),
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::from(1)
        }
    }
}
