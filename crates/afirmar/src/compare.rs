//! Value comparison primitives shared by the assertion surface.
//!
//! Three disciplines live here:
//!
//! - case-insensitive substring containment, with a whitespace-normalizing
//!   variant for whole-page text,
//! - regex matching for patterns given in literal delimiter+flags notation
//!   (e.g. `/foo/i`), echoed verbatim in failure messages,
//! - loose equality for form field values: both operands are reduced to a
//!   canonical string and compared exactly, so `234` equals `"234"` but not
//!   `"23"` or `""`. No host weak-equality operator is involved.

use regex::Regex;
use serde_json::Value;

use crate::result::{AssertError, AssertResult};

/// Case-insensitive substring test.
#[must_use]
pub fn contains_ci(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

/// Collapse every run of whitespace (spaces, tabs, newlines) to a single
/// space and trim the ends.
#[must_use]
pub fn normalize_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Case-insensitive substring test over the whitespace-normalized haystack.
///
/// Used for whole-page text; failure messages must report the haystack in
/// the same normalized form (see [`normalize_whitespace`]).
#[must_use]
pub fn contains_normalized_ci(haystack: &str, needle: &str) -> bool {
    contains_ci(&normalize_whitespace(haystack), needle)
}

/// Canonical string form of a duck-typed field value.
///
/// `Null` is the empty string, numbers and booleans use their display form,
/// strings pass through unquoted. Compound values fall back to their JSON
/// rendering.
#[must_use]
pub fn stringify_value(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Loose equality: canonical string forms compared exactly.
#[must_use]
pub fn equals_loose(expected: &Value, actual: &Value) -> bool {
    stringify_value(expected) == stringify_value(actual)
}

/// A regex supplied in literal delimiter+flags notation, e.g. `/PA.E/i`.
///
/// The notation is parsed once and handed to the [`regex`] engine; the raw
/// form (delimiters and flags included) is kept for verbatim echo in
/// failure messages.
#[derive(Debug, Clone)]
pub struct Pattern {
    raw: String,
    regex: Regex,
}

impl Pattern {
    /// Parse a literal-notation pattern.
    ///
    /// The first character is the delimiter; everything up to its last
    /// occurrence is the pattern body; trailing characters are flags.
    /// Flags `i`, `m`, `s`, `x` map to the engine's inline flags; `u` is
    /// accepted and ignored (the engine is Unicode-aware by default).
    ///
    /// # Errors
    ///
    /// Returns [`AssertError::InvalidPattern`] for malformed notation,
    /// unknown flags, or a body the engine rejects. This is caller misuse
    /// and is never retried.
    pub fn parse(raw: &str) -> AssertResult<Self> {
        let invalid = |message: &str| AssertError::InvalidPattern {
            pattern: raw.to_string(),
            message: message.to_string(),
        };

        let mut chars = raw.chars();
        let delimiter = chars.next().ok_or_else(|| invalid("empty pattern"))?;
        if delimiter.is_alphanumeric() || delimiter.is_whitespace() || delimiter == '\\' {
            return Err(invalid("delimiter must be a punctuation character"));
        }

        let rest = &raw[delimiter.len_utf8()..];
        let closing = rest
            .rfind(delimiter)
            .ok_or_else(|| invalid("missing closing delimiter"))?;
        let body = &rest[..closing];
        let flags = &rest[closing + delimiter.len_utf8()..];

        let mut inline = String::new();
        for flag in flags.chars() {
            match flag {
                'i' | 'm' | 's' | 'x' => inline.push(flag),
                // The engine is Unicode by default.
                'u' => {}
                _ => return Err(invalid("unsupported flag")),
            }
        }

        let source = if inline.is_empty() {
            body.to_string()
        } else {
            format!("(?{inline}){body}")
        };

        let regex = Regex::new(&source).map_err(|e| AssertError::InvalidPattern {
            pattern: raw.to_string(),
            message: e.to_string(),
        })?;

        Ok(Self {
            raw: raw.to_string(),
            regex,
        })
    }

    /// Test the pattern against `text`.
    #[must_use]
    pub fn is_match(&self, text: &str) -> bool {
        self.regex.is_match(text)
    }

    /// The pattern exactly as supplied, for message interpolation.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.raw
    }
}

impl std::fmt::Display for Pattern {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    mod containment {
        use super::*;

        #[test]
        fn test_contains_ci() {
            assert!(contains_ci("element text", "TEXT"));
            assert!(contains_ci("ELEMENT TEXT", "text"));
            assert!(!contains_ci("element text", "html"));
        }

        #[test]
        fn test_normalize_whitespace_collapses_runs() {
            assert_eq!(normalize_whitespace("Some  page\n\ttext"), "Some page text");
            assert_eq!(normalize_whitespace("  padded  "), "padded");
            assert_eq!(normalize_whitespace(""), "");
        }

        #[test]
        fn test_contains_normalized_ci() {
            assert!(contains_normalized_ci("Some  page\n\ttext", "PAGE text"));
            assert!(!contains_normalized_ci("Some  page\n\ttext", "html text"));
        }
    }

    mod loose_equality {
        use super::*;

        #[test]
        fn test_number_equals_its_string_form() {
            assert!(equals_loose(&json!(234), &json!("234")));
            assert!(equals_loose(&json!("234"), &json!(234)));
        }

        #[test]
        fn test_prefix_and_empty_do_not_match() {
            assert!(!equals_loose(&json!(234), &json!("23")));
            assert!(!equals_loose(&json!(234), &json!("")));
        }

        #[test]
        fn test_null_stringifies_to_empty() {
            assert!(equals_loose(&Value::Null, &json!("")));
        }
    }

    mod pattern {
        use super::*;

        #[test]
        fn test_plain_pattern() {
            let pattern = Pattern::parse("/su.*rl/").unwrap();
            assert!(pattern.is_match("/sub/url"));
            assert!(!pattern.is_match("sub"));
            assert_eq!(pattern.as_str(), "/su.*rl/");
        }

        #[test]
        fn test_case_insensitive_flag() {
            let pattern = Pattern::parse("/PA.E/i").unwrap();
            assert!(pattern.is_match("Some page text"));
        }

        #[test]
        fn test_unicode_flag_is_accepted() {
            let pattern = Pattern::parse("/page/ui").unwrap();
            assert!(pattern.is_match("Some PAGE text"));
        }

        #[test]
        fn test_alternate_delimiter() {
            let pattern = Pattern::parse("#a/b#").unwrap();
            assert!(pattern.is_match("a/b"));
        }

        #[test]
        fn test_missing_closing_delimiter() {
            let err = Pattern::parse("/foo").unwrap_err();
            assert!(matches!(err, AssertError::InvalidPattern { .. }));
            assert!(!err.is_expectation());
        }

        #[test]
        fn test_unknown_flag_is_rejected() {
            let err = Pattern::parse("/foo/q").unwrap_err();
            assert!(matches!(err, AssertError::InvalidPattern { .. }));
        }

        #[test]
        fn test_bad_body_is_rejected() {
            let err = Pattern::parse("/b[unclosed/").unwrap_err();
            assert!(matches!(err, AssertError::InvalidPattern { .. }));
        }
    }

    mod properties {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn normalize_whitespace_is_idempotent(text in ".{0,64}") {
                let once = normalize_whitespace(&text);
                prop_assert_eq!(normalize_whitespace(&once), once);
            }

            #[test]
            fn normalized_text_contains_itself(text in "[a-zA-Z ]{1,32}") {
                let norm = normalize_whitespace(&text);
                prop_assert!(contains_normalized_ci(&text, &norm));
            }

            #[test]
            fn loose_equality_is_reflexive_for_strings(s in ".{0,32}") {
                prop_assert!(equals_loose(&json!(s.clone()), &json!(s)));
            }
        }
    }
}
