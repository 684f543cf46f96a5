//! Secrets file parsing.
//!
//! Secrets files use the dotenv `KEY=value` format. Every value in such a
//! file is treated as a secret.

use anyhow::{bail, Result};
use std::collections::HashMap;
use std::path::Path;

use crate::error::MaskError;

/// Parses dotenv-style secrets files into a map of label → value.
///
/// # Supported Formats
///
/// - Simple: `KEY=value`
/// - Quoted: `KEY="value with spaces"` or `KEY='single quoted'`
/// - Escaped newlines in double quotes: `KEY="line1\nline2"`
/// - Empty: `KEY=`
/// - Comments: `# This is a comment`
/// - Values with equals signs: `URL=https://example.com?foo=bar`
///
/// # Example
///
/// ```
/// use logmask::config::EnvFileParser;
///
/// let content = r#"
/// DATABASE_URL=postgres://user:pw@localhost/db
/// KEY="-----BEGIN KEY-----\nMIIC\n-----END KEY-----"
/// "#;
///
/// let vars = EnvFileParser::parse(content).unwrap();
/// assert_eq!(vars.get("DATABASE_URL"), Some(&"postgres://user:pw@localhost/db".to_string()));
/// assert_eq!(vars["KEY"].lines().count(), 3);
/// ```
pub struct EnvFileParser;

impl EnvFileParser {
    /// Parse an env file content string into a map of variables.
    ///
    /// # Errors
    ///
    /// Fails on a non-comment line without `=` or with an empty key.
    pub fn parse(content: &str) -> Result<HashMap<String, String>> {
        let mut vars = HashMap::new();

        for (line_num, line) in content.lines().enumerate() {
            let line = line.trim();

            // Skip empty lines and comments
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            let Some((key, value)) = line.split_once('=') else {
                bail!("line {}: expected KEY=value", line_num + 1);
            };
            let key = key.trim();
            if key.is_empty() {
                bail!("line {}: empty key", line_num + 1);
            }

            vars.insert(key.to_string(), Self::unquote(value.trim()));
        }

        Ok(vars)
    }

    fn unquote(value: &str) -> String {
        if value.len() >= 2 && value.starts_with('"') && value.ends_with('"') {
            value[1..value.len() - 1].replace("\\n", "\n")
        } else if value.len() >= 2 && value.starts_with('\'') && value.ends_with('\'') {
            value[1..value.len() - 1].to_string()
        } else {
            value.to_string()
        }
    }

    /// Load and parse a secrets file from a path.
    ///
    /// # Errors
    ///
    /// Returns `ConfigNotFound` if the file doesn't exist and
    /// `EnvFileParseError` for malformed content.
    pub fn load(path: &Path) -> crate::error::Result<HashMap<String, String>> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                MaskError::ConfigNotFound {
                    path: path.to_path_buf(),
                }
            } else {
                MaskError::Io(e)
            }
        })?;

        Self::parse(&content).map_err(|e| MaskError::EnvFileParseError {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }
}
