//! Output masking for secret values.
//!
//! [`OutputMasker`] holds a compiled [`PatternSet`] and replaces every
//! occurrence of a pattern with [`MASK_TOKEN`]. It is immutable once built
//! and can be shared by any number of [`MaskingWriter`]s.

use regex::bytes::{NoExpand, Regex, RegexBuilder};
use std::borrow::Cow;
use std::collections::HashMap;
use std::io::Write;

use super::pattern::{compile_patterns, CompileStats, PatternSet, TrimPolicy};
use super::stream::MaskingWriter;
use crate::error::{MaskError, Result};

/// Replacement for every match, independent of the secret's length.
pub const MASK_TOKEN: &str = "****************";

/// Upper bound for the compiled matcher. Large PEM bundles produce many
/// long literal alternatives.
const MATCHER_SIZE_LIMIT: usize = 64 * (1 << 20);

/// Masks secret values in output.
///
/// Matching is leftmost first: the earliest occurrence of any pattern is
/// masked, and when several patterns start at the same offset the longest
/// one wins. Scanning resumes after the masked span, so overlapping
/// occurrences are never masked twice.
///
/// # Example
///
/// ```
/// use logmask::secrets::{OutputMasker, MASK_TOKEN};
/// use std::collections::HashMap;
///
/// let mut secrets = HashMap::new();
/// secrets.insert("cipher".to_string(), "lazy dog".to_string());
///
/// let masker = OutputMasker::from_secrets(&secrets).unwrap();
/// let output = masker.mask("The quick brown fox jumps over the lazy dog");
/// assert_eq!(output, format!("The quick brown fox jumps over the {}", MASK_TOKEN));
/// ```
#[derive(Debug, Clone, Default)]
pub struct OutputMasker {
    patterns: PatternSet,
    /// `None` when there is nothing to mask.
    matcher: Option<Regex>,
}

impl OutputMasker {
    /// Build a masker from a secret catalog using the default trim policy.
    pub fn from_secrets(secrets: &HashMap<String, String>) -> Result<Self> {
        Self::with_policy(secrets, TrimPolicy::default())
    }

    /// Build a masker from a secret catalog with an explicit trim policy.
    pub fn with_policy(secrets: &HashMap<String, String>, policy: TrimPolicy) -> Result<Self> {
        Self::from_patterns(compile_patterns(secrets, policy))
    }

    /// Build a masker from an already compiled pattern set.
    ///
    /// # Errors
    ///
    /// Returns `PatternCompile` if the patterns exceed the matcher's size
    /// limit.
    pub fn from_patterns(patterns: PatternSet) -> Result<Self> {
        if patterns.is_empty() {
            return Ok(Self {
                patterns,
                matcher: None,
            });
        }

        // Alternatives are tried in order at each position, and the set is
        // ordered longest first, so the longest co-starting pattern wins.
        let alternation = patterns
            .patterns()
            .iter()
            .map(|p| regex::escape(p))
            .collect::<Vec<_>>()
            .join("|");

        let matcher = RegexBuilder::new(&alternation)
            .size_limit(MATCHER_SIZE_LIMIT)
            .build()
            .map_err(|e| MaskError::PatternCompile {
                message: e.to_string(),
            })?;

        tracing::debug!("Compiled matcher for {} secret pattern(s)", patterns.len());

        Ok(Self {
            patterns,
            matcher: Some(matcher),
        })
    }

    /// Mask any secret values in the given bytes.
    ///
    /// Returns the input unchanged (borrowed) when nothing matched.
    pub fn mask_bytes<'t>(&self, input: &'t [u8]) -> Cow<'t, [u8]> {
        match &self.matcher {
            Some(matcher) => matcher.replace_all(input, NoExpand(MASK_TOKEN.as_bytes())),
            None => Cow::Borrowed(input),
        }
    }

    /// Mask any secret values in the given string.
    pub fn mask(&self, input: &str) -> String {
        match self.mask_bytes(input.as_bytes()) {
            Cow::Borrowed(_) => input.to_string(),
            // Patterns and the token are valid UTF-8 and replacements happen
            // on whole-pattern boundaries, so the result is still UTF-8.
            Cow::Owned(bytes) => String::from_utf8_lossy(&bytes).into_owned(),
        }
    }

    /// Get the number of compiled patterns.
    pub fn pattern_count(&self) -> usize {
        self.patterns.len()
    }

    pub fn stats(&self) -> CompileStats {
        self.patterns.stats()
    }

    /// Create a writer that masks output line by line.
    ///
    /// The writer borrows this masker, so one masker can serve many
    /// streams at once.
    ///
    /// # Example
    ///
    /// ```
    /// use logmask::secrets::OutputMasker;
    /// use std::collections::HashMap;
    /// use std::io::Write;
    ///
    /// let mut secrets = HashMap::new();
    /// secrets.insert("token".to_string(), "secret-value".to_string());
    /// let masker = OutputMasker::from_secrets(&secrets).unwrap();
    ///
    /// let mut output = Vec::new();
    /// {
    ///     let mut writer = masker.writer(&mut output);
    ///     writeln!(writer, "The value is secret-value").unwrap();
    ///     writer.close().unwrap();
    /// }
    ///
    /// let result = String::from_utf8(output).unwrap();
    /// assert_eq!(result, "The value is ****************\n");
    /// ```
    pub fn writer<W: Write>(&self, inner: W) -> MaskingWriter<'_, W> {
        MaskingWriter::with_masker(inner, Cow::Borrowed(self))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn masker(entries: &[(&str, &str)]) -> OutputMasker {
        let secrets: HashMap<String, String> = entries
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        OutputMasker::from_secrets(&secrets).unwrap()
    }

    #[test]
    fn mask_token_is_sixteen_stars() {
        assert_eq!(MASK_TOKEN.len(), 16);
        assert!(MASK_TOKEN.chars().all(|c| c == '*'));
    }

    #[test]
    fn masks_single_secret() {
        let masker = masker(&[("cipher", "lazy dog")]);

        let output = masker.mask("The quick brown fox jumps over the lazy dog");

        assert_eq!(
            output,
            "The quick brown fox jumps over the ****************"
        );
    }

    #[test]
    fn mask_length_does_not_depend_on_secret_length() {
        let masker = masker(&[("short", "ab"), ("long", "a-much-longer-secret-value-here")]);

        assert_eq!(masker.mask("x ab y"), "x **************** y");
        assert_eq!(
            masker.mask("x a-much-longer-secret-value-here y"),
            "x **************** y"
        );
    }

    #[test]
    fn masks_multiple_occurrences() {
        let masker = masker(&[("t", "token")]);

        let output = masker.mask("token=token123, other_token=abc");

        assert_eq!(
            output,
            "****************=****************123, other_****************=abc"
        );
    }

    #[test]
    fn single_character_secret_is_never_masked() {
        let masker = masker(&[("cipher", "l")]);
        let input = "The quick brown fox jumps over the lazy dog";

        assert_eq!(masker.mask(input), input);
        assert_eq!(masker.pattern_count(), 0);
    }

    #[test]
    fn longest_pattern_wins_at_same_offset() {
        let masker = masker(&[("short", "secret"), ("long", "secret-extended")]);

        let output = masker.mask("value: secret-extended!");

        assert_eq!(output, "value: ****************!");
    }

    #[test]
    fn leftmost_occurrence_wins_over_longer_later_one() {
        // "abcdef" starts before "cdefghij"; the overlapping tail is consumed
        // by the first mask and "ghij" stays visible.
        let masker = masker(&[("a", "abcdef"), ("b", "cdefghij")]);

        let output = masker.mask("abcdefghij");

        assert_eq!(output, "****************ghij");
    }

    #[test]
    fn masks_adjacent_occurrences() {
        let masker = masker(&[("a", "xy")]);
        assert_eq!(masker.mask("xyxy"), "********************************");
    }

    #[test]
    fn regex_metacharacters_are_literal() {
        let masker = masker(&[("re", "a.b*c")]);

        assert_eq!(masker.mask("axbbbc"), "axbbbc");
        assert_eq!(masker.mask("[a.b*c]"), "[****************]");
    }

    #[test]
    fn mask_bytes_borrows_when_nothing_matches() {
        let masker = masker(&[("a", "needle")]);

        let output = masker.mask_bytes(b"haystack");

        assert!(matches!(output, Cow::Borrowed(_)));
    }

    #[test]
    fn mask_bytes_handles_invalid_utf8() {
        let masker = masker(&[("a", "needle")]);
        let input = [0xff, 0xfe, b'n', b'e', b'e', b'd', b'l', b'e', 0x80];

        let output = masker.mask_bytes(&input);

        let mut expected = vec![0xff, 0xfe];
        expected.extend_from_slice(MASK_TOKEN.as_bytes());
        expected.push(0x80);
        assert_eq!(output.as_ref(), expected.as_slice());
    }

    #[test]
    fn masks_non_ascii_secret() {
        let masker = masker(&[("a", "pässwörd")]);
        assert_eq!(masker.mask("key=pässwörd;"), "key=****************;");
    }

    #[test]
    fn no_masking_without_secrets() {
        let masker = OutputMasker::default();
        let input = "This has no secrets to mask";

        assert_eq!(masker.mask(input), input);
        assert_eq!(masker.pattern_count(), 0);
    }

    #[test]
    fn line_endings_policy_matches_indented_line() {
        let mut secrets = HashMap::new();
        secrets.insert("k".to_string(), "  indented value".to_string());
        let masker = OutputMasker::with_policy(&secrets, TrimPolicy::LineEndings).unwrap();

        assert_eq!(masker.mask("x indented value"), "x indented value");
        assert_eq!(masker.mask("x  indented value"), "x****************");
    }

    #[test]
    fn shared_masker_across_threads() {
        let masker = masker(&[("a", "shared-secret")]);

        std::thread::scope(|scope| {
            for i in 0..4 {
                let masker = &masker;
                scope.spawn(move || {
                    let output = masker.mask(&format!("{} shared-secret", i));
                    assert_eq!(output, format!("{} ****************", i));
                });
            }
        });
    }
}
