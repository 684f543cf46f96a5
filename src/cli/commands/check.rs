//! The `logmask check` command.
//!
//! Compiles the configured secrets and reports counts. Secret text is
//! never printed.

use serde::Serialize;
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::cli::args::CheckArgs;
use crate::config::MaskConfig;
use crate::error::Result;
use crate::secrets::{CompileStats, TrimPolicy};

use super::dispatcher::{Command, CommandResult};
use super::shared::{build_masker, trim_policy};

/// Report produced by `logmask check`.
#[derive(Debug, Serialize)]
pub struct CheckReport {
    pub trim: TrimPolicy,
    #[serde(flatten)]
    pub stats: CompileStats,
}

/// The check command implementation.
pub struct CheckCommand {
    working_dir: PathBuf,
    config: MaskConfig,
    args: CheckArgs,
}

impl CheckCommand {
    /// Create a new check command.
    pub fn new(working_dir: &Path, config: MaskConfig, args: CheckArgs) -> Self {
        Self {
            working_dir: working_dir.to_path_buf(),
            config,
            args,
        }
    }

    fn report(&self) -> Result<CheckReport> {
        let masker = build_masker(&self.config, &self.args.sources, &self.working_dir)?;
        Ok(CheckReport {
            trim: trim_policy(&self.config, &self.args.sources),
            stats: masker.stats(),
        })
    }
}

impl Command for CheckCommand {
    fn execute(&self, out: &mut dyn Write) -> Result<CommandResult> {
        let report = self.report()?;

        if self.args.json {
            let json = serde_json::to_string_pretty(&report).map_err(anyhow::Error::from)?;
            writeln!(out, "{}", json)?;
        } else {
            let stats = &report.stats;
            writeln!(out, "Secrets:             {}", stats.entries)?;
            writeln!(out, "Patterns:            {}", stats.patterns)?;
            writeln!(out, "Empty secrets:       {}", stats.empty_entries)?;
            writeln!(out, "Short lines skipped: {}", stats.short_lines)?;
            writeln!(out, "Trim policy:         {:?}", report.trim)?;
        }

        if report.stats.patterns == 0 {
            tracing::warn!("No maskable patterns; output would not be masked");
            return Ok(CommandResult::failure(1));
        }

        Ok(CommandResult::success())
    }
}
