//! Configuration loading for logmask.
//!
//! This module handles where secrets come from:
//! - Schema definitions in [`schema`]
//! - File discovery and loading in [`loader`]
//! - Dotenv-style secrets files in [`env_file`]
//! - Catalog assembly in [`catalog`]
//!
//! # Example
//!
//! ```
//! use logmask::config::{load_config, SecretCatalog};
//! use tempfile::TempDir;
//! use std::fs;
//!
//! let temp = TempDir::new().unwrap();
//! fs::write(temp.path().join(".logmask.yml"), "secrets:\n  token: abc123\n").unwrap();
//!
//! let config = load_config(temp.path(), None).unwrap();
//! let catalog = SecretCatalog::from_config(&config, &[], &[], temp.path()).unwrap();
//! assert_eq!(catalog.len(), 1);
//! ```

pub mod catalog;
pub mod env_file;
pub mod loader;
pub mod schema;

pub use catalog::SecretCatalog;
pub use env_file::EnvFileParser;
pub use loader::{find_config, load_config, load_config_file, parse_config, CONFIG_FILE_NAME};
pub use schema::{MaskConfig, Settings};
