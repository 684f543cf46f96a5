//! CLI argument definitions.
//!
//! This module defines all CLI arguments using clap's derive macros.
//! The main entry point is the [`Cli`] struct.

use clap::{Args, Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;

use crate::secrets::TrimPolicy;

/// logmask - Mask secrets in live log output.
#[derive(Debug, Parser)]
#[command(name = "logmask")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to config file (overrides default .logmask.yml)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(long, global = true)]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Copy input to output with secrets masked (default)
    Filter(FilterArgs),

    /// Compile the configured secrets and report what would be masked
    Check(CheckArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

/// Extra secret sources on top of the config file.
#[derive(Debug, Clone, Default, Args)]
pub struct SecretSourceArgs {
    /// Environment variable holding a secret (repeatable)
    #[arg(long = "secret-env", value_name = "NAME")]
    pub secret_env: Vec<String>,

    /// Dotenv-style file whose values are secrets (repeatable)
    #[arg(long = "env-file", value_name = "PATH")]
    pub env_files: Vec<PathBuf>,

    /// How secret lines are trimmed (overrides config)
    #[arg(long, value_enum)]
    pub trim: Option<TrimPolicy>,
}

/// Arguments for the `filter` command.
#[derive(Debug, Clone, Default, Args)]
pub struct FilterArgs {
    #[command(flatten)]
    pub sources: SecretSourceArgs,

    /// Read from this file instead of stdin
    #[arg(short, long)]
    pub input: Option<PathBuf>,

    /// Write to this file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Read size in bytes (overrides config)
    #[arg(long)]
    pub chunk_size: Option<usize>,
}

/// Arguments for the `check` command.
#[derive(Debug, Clone, Default, Args)]
pub struct CheckArgs {
    #[command(flatten)]
    pub sources: SecretSourceArgs,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the `completions` command.
#[derive(Debug, Clone, Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    pub shell: Shell,
}
