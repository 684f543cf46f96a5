//! Configuration schema definitions for logmask.
//!
//! This module contains the struct definitions that map to the YAML
//! configuration file format.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::PathBuf;

use crate::secrets::TrimPolicy;

/// Root configuration structure for `.logmask.yml`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct MaskConfig {
    /// Inline secrets, label → value
    #[serde(skip_serializing_if = "HashMap::is_empty")]
    pub secrets: HashMap<String, String>,

    /// Environment variables whose values are secrets
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub secret_env: Vec<String>,

    /// Dotenv-style files whose every value is a secret
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub env_files: Vec<PathBuf>,

    /// Global settings
    pub settings: Settings,
}

/// Settings that control pattern compilation and streaming.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// How secret lines are trimmed before matching
    pub trim: TrimPolicy,

    /// Read size used when filtering a stream
    #[serde(default = "default_chunk_size")]
    pub chunk_size: usize,
}

fn default_chunk_size() -> usize {
    8192
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            trim: TrimPolicy::default(),
            chunk_size: default_chunk_size(),
        }
    }
}
