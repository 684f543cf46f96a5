//! Secret catalog assembly.
//!
//! Gathers secret values from the config file's inline `secrets`, from
//! environment variables named in `secret_env`, and from secrets files.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::config::env_file::EnvFileParser;
use crate::config::schema::MaskConfig;
use crate::error::Result;

/// Label → plaintext secret, ready for pattern compilation.
#[derive(Debug, Clone, Default)]
pub struct SecretCatalog {
    entries: HashMap<String, String>,
}

impl SecretCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a catalog from config plus extra sources given on the command
    /// line, reading environment variables from the process environment.
    ///
    /// Relative `env_files` paths are resolved against `base_dir`.
    pub fn from_config(
        config: &MaskConfig,
        extra_env: &[String],
        extra_files: &[PathBuf],
        base_dir: &Path,
    ) -> Result<Self> {
        Self::from_config_with(config, extra_env, extra_files, base_dir, |name| {
            std::env::var(name).ok()
        })
    }

    /// Like [`from_config`](Self::from_config) with an injectable env lookup.
    pub fn from_config_with<F>(
        config: &MaskConfig,
        extra_env: &[String],
        extra_files: &[PathBuf],
        base_dir: &Path,
        lookup: F,
    ) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut catalog = Self::new();

        for (name, value) in &config.secrets {
            catalog.insert(name.clone(), value.clone());
        }

        for name in config.secret_env.iter().chain(extra_env) {
            match lookup(name.as_str()) {
                Some(value) => catalog.insert(format!("env:{}", name), value),
                None => tracing::warn!("Secret environment variable '{}' is not set", name),
            }
        }

        for path in config.env_files.iter().chain(extra_files) {
            let path = if path.is_absolute() {
                path.clone()
            } else {
                base_dir.join(path)
            };
            let vars = EnvFileParser::load(&path)?;
            tracing::debug!("Loaded {} secret(s) from {}", vars.len(), path.display());
            for (name, value) in vars {
                catalog.insert(format!("file:{}", name), value);
            }
        }

        Ok(catalog)
    }

    /// Add or replace one entry.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.entries.insert(name.into(), value.into());
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &HashMap<String, String> {
        &self.entries
    }
}
