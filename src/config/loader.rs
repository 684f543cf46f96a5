//! Configuration file discovery and loading.

use crate::config::schema::MaskConfig;
use crate::error::{MaskError, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// Default config file name, looked up in the working directory.
pub const CONFIG_FILE_NAME: &str = ".logmask.yml";

/// Load a single config file and parse it into MaskConfig.
///
/// # Errors
///
/// Returns `ConfigNotFound` if the file doesn't exist.
/// Returns `ConfigParseError` if the YAML is invalid.
pub fn load_config_file(path: &Path) -> Result<MaskConfig> {
    let content = fs::read_to_string(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            MaskError::ConfigNotFound {
                path: path.to_path_buf(),
            }
        } else {
            MaskError::Io(e)
        }
    })?;

    parse_config(&content, path)
}

/// Parse YAML content into MaskConfig.
///
/// # Arguments
///
/// * `content` - The YAML content to parse
/// * `source_path` - Path for error reporting
pub fn parse_config(content: &str, source_path: &Path) -> Result<MaskConfig> {
    // An empty file is a valid, empty config.
    if content.trim().is_empty() {
        return Ok(MaskConfig::default());
    }

    serde_yaml::from_str(content).map_err(|e| MaskError::ConfigParseError {
        path: source_path.to_path_buf(),
        message: e.to_string(),
    })
}

/// Find the default config file in `dir`, if present.
pub fn find_config(dir: &Path) -> Option<PathBuf> {
    let path = dir.join(CONFIG_FILE_NAME);
    if path.is_file() {
        Some(path)
    } else {
        None
    }
}

/// Load config with optional path override.
///
/// If `config_override` is provided that file must exist. Otherwise the
/// default file in `dir` is used when present, and defaults when not.
pub fn load_config(dir: &Path, config_override: Option<&Path>) -> Result<MaskConfig> {
    if let Some(override_path) = config_override {
        return load_config_file(override_path);
    }

    match find_config(dir) {
        Some(path) => {
            tracing::debug!("Loading config from {}", path.display());
            load_config_file(&path)
        }
        None => Ok(MaskConfig::default()),
    }
}
