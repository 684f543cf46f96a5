//! logmask - Streaming secret redaction for live log output.
//!
//! logmask sits between a producer of text (a subprocess pipe, a log
//! tail) and a sink (file, uploader, terminal) and guarantees that no
//! registered secret value reaches the sink in plaintext, no matter how
//! the producer chunks its writes.
//!
//! # Modules
//!
//! - [`secrets`] - Pattern compilation, masking, and the masking writer
//! - [`config`] - Configuration and secret catalog loading
//! - [`cli`] - Command-line interface and argument parsing
//! - [`error`] - Error types and result aliases
//!
//! # Example
//!
//! ```
//! use logmask::secrets::{MaskingWriter, MASK_TOKEN};
//! use std::collections::HashMap;
//! use std::io::Write;
//!
//! let mut secrets = HashMap::new();
//! secrets.insert("cipher".to_string(), "lazy dog".to_string());
//!
//! let mut output = Vec::new();
//! {
//!     let mut writer = MaskingWriter::new(&mut output, &secrets).unwrap();
//!     writer.write_all(b"The quick brown fox jumps over the lazy dog").unwrap();
//!     writer.close().unwrap();
//! }
//! assert_eq!(
//!     String::from_utf8(output).unwrap(),
//!     format!("The quick brown fox jumps over the {}", MASK_TOKEN)
//! );
//! ```

pub mod cli;
pub mod config;
pub mod error;
pub mod secrets;

pub use error::{MaskError, Result};
