//! Command dispatching.
//!
//! This module provides the core command infrastructure:
//! - [`Command`] trait for implementing commands
//! - [`CommandResult`] for uniform result reporting
//! - [`CommandDispatcher`] for routing CLI subcommands

use std::io::Write;
use std::path::{Path, PathBuf};

use crate::cli::args::{Cli, Commands, FilterArgs};
use crate::config::load_config;
use crate::error::Result;

/// Trait for command implementations.
///
/// Each CLI subcommand implements this trait to provide its execution logic.
pub trait Command {
    /// Execute the command.
    ///
    /// # Arguments
    ///
    /// * `out` - Destination for the command's primary output (stdout in
    ///   the binary)
    ///
    /// # Returns
    ///
    /// A [`CommandResult`] indicating success/failure and exit code.
    fn execute(&self, out: &mut dyn Write) -> Result<CommandResult>;
}

/// Result of command execution.
#[derive(Debug)]
pub struct CommandResult {
    /// Whether the command succeeded.
    pub success: bool,

    /// Exit code to use (0 for success, non-zero for failure).
    pub exit_code: i32,
}

impl CommandResult {
    /// Create a successful result.
    pub fn success() -> Self {
        Self {
            success: true,
            exit_code: 0,
        }
    }

    /// Create a failure result.
    pub fn failure(exit_code: i32) -> Self {
        Self {
            success: false,
            exit_code,
        }
    }
}

/// Dispatches CLI commands to their implementations.
pub struct CommandDispatcher {
    working_dir: PathBuf,
}

impl CommandDispatcher {
    /// Create a new dispatcher rooted at `working_dir`.
    ///
    /// The default config file and relative secrets files are resolved
    /// against this directory.
    pub fn new(working_dir: PathBuf) -> Self {
        Self { working_dir }
    }

    pub fn working_dir(&self) -> &Path {
        &self.working_dir
    }

    /// Dispatch and execute a command.
    ///
    /// Loads the config where needed, routes the CLI subcommand to the appropriate
    /// command implementation and executes it.
    pub fn dispatch(&self, cli: &Cli, out: &mut dyn Write) -> Result<CommandResult> {
        match &cli.command {
            Some(Commands::Filter(args)) => {
                let config = load_config(&self.working_dir, cli.config.as_deref())?;
                let cmd =
                    super::filter::FilterCommand::new(&self.working_dir, config, args.clone());
                cmd.execute(out)
            }
            Some(Commands::Check(args)) => {
                let config = load_config(&self.working_dir, cli.config.as_deref())?;
                let cmd = super::check::CheckCommand::new(&self.working_dir, config, args.clone());
                cmd.execute(out)
            }
            Some(Commands::Completions(args)) => {
                // Needs no config.
                let cmd = super::completions::CompletionsCommand::new(args.clone());
                cmd.execute(out)
            }
            None => {
                // Default to filter with default args
                let config = load_config(&self.working_dir, cli.config.as_deref())?;
                let cmd = super::filter::FilterCommand::new(
                    &self.working_dir,
                    config,
                    FilterArgs::default(),
                );
                cmd.execute(out)
            }
        }
    }
}
