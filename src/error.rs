//! Error types for logmask operations.
//!
//! This module defines [`MaskError`], the error type used by configuration
//! loading and masker construction, and a [`Result`] type alias.
//!
//! # Error Handling Strategy
//!
//! - Use `MaskError` for configuration and construction failures
//! - Sink failures while streaming are plain `std::io::Error` values and
//!   are returned through [`std::io::Write`] without any wrapping
//! - Use `anyhow::Error` (via `MaskError::Other`) for unexpected errors

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for logmask operations.
#[derive(Debug, Error)]
pub enum MaskError {
    /// Configuration file not found at expected location.
    #[error("Configuration not found: {path}")]
    ConfigNotFound { path: PathBuf },

    /// Failed to parse configuration file.
    #[error("Failed to parse config at {path}: {message}")]
    ConfigParseError { path: PathBuf, message: String },

    /// Failed to parse a dotenv-style secrets file.
    #[error("Failed to parse env file at {path}: {message}")]
    EnvFileParseError { path: PathBuf, message: String },

    /// The secret patterns could not be compiled into a matcher.
    #[error("Failed to compile secret patterns: {message}")]
    PatternCompile { message: String },

    /// IO error wrapper.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic wrapped error for anyhow interop.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Result type alias for logmask operations.
pub type Result<T> = std::result::Result<T, MaskError>;
