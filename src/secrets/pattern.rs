//! Secret pattern compilation.
//!
//! This module turns a secret catalog (name → value) into the flat,
//! deduplicated set of literal patterns that the masker searches for.
//! Multi-line values contribute one pattern per line, so a single line of
//! a key or JSON blob is recognized on its own.

use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::cmp::Reverse;
use std::collections::BTreeSet;

/// Patterns shorter than this many bytes are never registered.
///
/// A one-character secret line would match all over unrelated output.
pub const MIN_PATTERN_LEN: usize = 2;

/// How each line of a secret value is trimmed before it becomes a pattern.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum TrimPolicy {
    /// Strip leading and trailing whitespace.
    #[default]
    Whitespace,
    /// Strip only the line terminator (`\n` or `\r\n`).
    LineEndings,
}

impl TrimPolicy {
    fn apply<'a>(&self, line: &'a str) -> &'a str {
        match self {
            TrimPolicy::Whitespace => line.trim(),
            TrimPolicy::LineEndings => line.strip_suffix('\r').unwrap_or(line),
        }
    }
}

/// Counters describing a compilation. Never contains secret text.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CompileStats {
    /// Catalog entries seen.
    pub entries: usize,
    /// Entries with an empty value.
    pub empty_entries: usize,
    /// Non-blank lines dropped for being shorter than [`MIN_PATTERN_LEN`].
    pub short_lines: usize,
    /// Distinct patterns registered.
    pub patterns: usize,
}

/// An immutable, ordered set of literal secret patterns.
///
/// Patterns are ordered longest first, then lexicographically. The matcher
/// relies on this order to prefer the longest pattern when two start at
/// the same offset.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PatternSet {
    patterns: Vec<String>,
    stats: CompileStats,
}

impl PatternSet {
    /// Patterns in match-priority order.
    pub fn patterns(&self) -> &[String] {
        &self.patterns
    }

    /// Number of distinct patterns.
    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    /// True when no secret produced a maskable pattern.
    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    /// Counts gathered while compiling this set.
    pub fn stats(&self) -> CompileStats {
        self.stats
    }
}

/// Compile a secret catalog into a [`PatternSet`].
///
/// Every non-empty value is split on `\n`; each line is trimmed according
/// to `policy` and kept if it is at least [`MIN_PATTERN_LEN`] bytes long.
/// Identical lines from different entries collapse into one pattern.
///
/// # Example
///
/// ```
/// use logmask::secrets::{compile_patterns, TrimPolicy};
/// use std::collections::HashMap;
///
/// let mut catalog = HashMap::new();
/// catalog.insert("token".to_string(), "{\n  \"token\":\"abc123\"\n}".to_string());
/// catalog.insert("pin".to_string(), "7".to_string());
///
/// let set = compile_patterns(&catalog, TrimPolicy::Whitespace);
/// assert_eq!(set.patterns(), &["\"token\":\"abc123\"".to_string()]);
/// ```
pub fn compile_patterns<I, K, V>(catalog: I, policy: TrimPolicy) -> PatternSet
where
    I: IntoIterator<Item = (K, V)>,
    K: AsRef<str>,
    V: AsRef<str>,
{
    let mut stats = CompileStats::default();
    let mut unique = BTreeSet::new();

    for (name, value) in catalog {
        stats.entries += 1;
        let value = value.as_ref();
        if value.is_empty() {
            stats.empty_entries += 1;
            continue;
        }

        let mut registered = 0usize;
        for line in value.split('\n') {
            let text = policy.apply(line);
            if text.is_empty() {
                continue;
            }
            if text.len() < MIN_PATTERN_LEN {
                stats.short_lines += 1;
                continue;
            }
            unique.insert(text.to_string());
            registered += 1;
        }

        tracing::debug!(
            "Secret '{}' contributed {} pattern line(s)",
            name.as_ref(),
            registered
        );
    }

    let mut patterns: Vec<String> = unique.into_iter().collect();
    // BTreeSet iteration is already lexicographic; a stable sort keeps that
    // as the tie-break.
    patterns.sort_by_key(|p| Reverse(p.len()));
    stats.patterns = patterns.len();

    PatternSet { patterns, stats }
}
