//! Helpers shared by commands that compile secrets.

use std::path::Path;

use crate::cli::args::SecretSourceArgs;
use crate::config::{MaskConfig, SecretCatalog};
use crate::error::Result;
use crate::secrets::{OutputMasker, TrimPolicy};

/// Assemble the secret catalog and compile it into a masker.
pub fn build_masker(
    config: &MaskConfig,
    sources: &SecretSourceArgs,
    working_dir: &Path,
) -> Result<OutputMasker> {
    let catalog = SecretCatalog::from_config(
        config,
        &sources.secret_env,
        &sources.env_files,
        working_dir,
    )?;
    let masker = OutputMasker::with_policy(catalog.entries(), trim_policy(config, sources))?;

    tracing::debug!(
        "{} secret(s) compiled into {} pattern(s)",
        catalog.len(),
        masker.pattern_count()
    );

    Ok(masker)
}

/// The command-line trim policy wins over the config file.
pub fn trim_policy(config: &MaskConfig, sources: &SecretSourceArgs) -> TrimPolicy {
    sources.trim.unwrap_or(config.settings.trim)
}
