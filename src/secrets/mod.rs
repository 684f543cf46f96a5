//! Secret compilation and masking.
//!
//! This module provides the streaming redaction core:
//!
//! - [`compile_patterns`] - Turns a secret catalog into a [`PatternSet`]
//! - [`OutputMasker`] - Replaces pattern occurrences with [`MASK_TOKEN`]
//! - [`MaskingWriter`] - Masks a byte stream line by line on its way to a sink
//!
//! # Example
//!
//! ```
//! use logmask::secrets::{MaskingWriter, MASK_TOKEN};
//! use std::collections::HashMap;
//! use std::io::Write;
//!
//! let mut secrets = HashMap::new();
//! secrets.insert("key".to_string(), "-----BEGIN KEY-----\nMIICXAIBAAKBgQCq\n-----END KEY-----".to_string());
//!
//! let mut output = Vec::new();
//! {
//!     let mut writer = MaskingWriter::new(&mut output, &secrets).unwrap();
//!     writer.write_all(b"> MIICXAIBAAKBgQCq").unwrap();
//!     writer.close().unwrap();
//! }
//! assert_eq!(output, format!("> {}", MASK_TOKEN).into_bytes());
//! ```

pub mod mask;
pub mod pattern;
pub mod stream;

pub use mask::{OutputMasker, MASK_TOKEN};
pub use pattern::{compile_patterns, CompileStats, PatternSet, TrimPolicy, MIN_PATTERN_LEN};
pub use stream::MaskingWriter;
