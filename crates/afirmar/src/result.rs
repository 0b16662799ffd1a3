//! Result and error types for Afirmar.

use thiserror::Error;

/// Result type for assertion operations
pub type AssertResult<T> = Result<T, AssertError>;

/// Failures raised by assertion operations.
///
/// The first four variants form the expectation taxonomy: they all mean "the
/// page did not satisfy the predicate" and are retried by the spin-wait
/// executor until the deadline. Callers can match a specific variant or use
/// [`AssertError::is_expectation`] to catch the whole taxonomy.
///
/// [`AssertError::InvalidPattern`] is caller misuse, not an expectation
/// failure; it is never retried.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AssertError {
    /// Generic expectation mismatch
    #[error("{message}")]
    Expectation {
        /// Formatted failure message
        message: String,
    },

    /// A required element or form field was absent
    #[error("{message}")]
    ElementNotFound {
        /// Formatted failure message
        message: String,
    },

    /// An element markup or attribute assertion failed
    #[error("{message}")]
    ElementHtml {
        /// Formatted failure message
        message: String,
    },

    /// A page text assertion failed
    #[error("{message}")]
    ResponseText {
        /// Formatted failure message
        message: String,
    },

    /// A literal-notation regex could not be parsed
    #[error("invalid pattern {pattern:?}: {message}")]
    InvalidPattern {
        /// The pattern as supplied by the caller
        pattern: String,
        /// Parse error detail
        message: String,
    },
}

impl AssertError {
    /// Create a generic expectation failure
    #[must_use]
    pub fn expectation(message: impl Into<String>) -> Self {
        Self::Expectation {
            message: message.into(),
        }
    }

    /// Create an element-not-found failure
    #[must_use]
    pub fn element_not_found(message: impl Into<String>) -> Self {
        Self::ElementNotFound {
            message: message.into(),
        }
    }

    /// Create an element markup failure
    #[must_use]
    pub fn element_html(message: impl Into<String>) -> Self {
        Self::ElementHtml {
            message: message.into(),
        }
    }

    /// Create a page text failure
    #[must_use]
    pub fn response_text(message: impl Into<String>) -> Self {
        Self::ResponseText {
            message: message.into(),
        }
    }

    /// Whether this failure belongs to the expectation taxonomy.
    ///
    /// Expectation failures are transient page states and safe to retry;
    /// anything else is caller misuse and must surface immediately.
    #[must_use]
    pub const fn is_expectation(&self) -> bool {
        !matches!(self, Self::InvalidPattern { .. })
    }

    /// The formatted failure message.
    #[must_use]
    pub fn message(&self) -> &str {
        match self {
            Self::Expectation { message }
            | Self::ElementNotFound { message }
            | Self::ElementHtml { message }
            | Self::ResponseText { message }
            | Self::InvalidPattern { message, .. } => message,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expectation_message_is_verbatim() {
        let err = AssertError::expectation("Cookie \"bar\" is not set, but should be.");
        assert_eq!(err.to_string(), "Cookie \"bar\" is not set, but should be.");
        assert_eq!(err.message(), "Cookie \"bar\" is not set, but should be.");
    }

    #[test]
    fn test_taxonomy_membership() {
        assert!(AssertError::expectation("x").is_expectation());
        assert!(AssertError::element_not_found("x").is_expectation());
        assert!(AssertError::element_html("x").is_expectation());
        assert!(AssertError::response_text("x").is_expectation());
        assert!(!AssertError::InvalidPattern {
            pattern: "/foo".into(),
            message: "missing closing delimiter".into(),
        }
        .is_expectation());
    }

    #[test]
    fn test_variants_are_distinguishable() {
        let not_found = AssertError::element_not_found("same text");
        let generic = AssertError::expectation("same text");
        assert_ne!(not_found, generic);
    }
}
