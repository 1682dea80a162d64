//! Error types for depset parsing

use std::fmt;
use std::ops::Range;

/// Error raised for any failure while parsing a depset expression.
///
/// Carries the original expression, a human-readable message, and, when the
/// failure is tied to a specific slice of the input, the offending token
/// text together with its byte span (so callers can underline it). Errors
/// not tied to a slice, such as a stray `|`, leave `token` and `span` unset.
///
/// Failures raised by an injected constructor are wrapped into this same
/// payload: the constructor's message is preserved and the span of the
/// token or group active at the time of failure is attached.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseError {
    /// The full expression that was being parsed.
    pub dep_str: String,
    /// What went wrong.
    pub message: String,
    /// The offending substring, when the error is tied to one.
    pub token: Option<String>,
    /// Byte span of `token` within `dep_str`.
    pub span: Option<Range<usize>>,
}

impl ParseError {
    pub(crate) fn new(dep_str: &str, message: impl Into<String>) -> Self {
        Self {
            dep_str: dep_str.to_string(),
            message: message.into(),
            token: None,
            span: None,
        }
    }

    pub(crate) fn with_span(dep_str: &str, message: impl Into<String>, span: Range<usize>) -> Self {
        Self {
            dep_str: dep_str.to_string(),
            message: message.into(),
            token: Some(dep_str[span.clone()].to_string()),
            span: Some(span),
        }
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.token {
            Some(token) => write!(
                f,
                "failed parsing '{}': {}, token '{}'",
                self.dep_str, self.message, token
            ),
            None => write!(f, "failed parsing '{}': {}", self.dep_str, self.message),
        }
    }
}

impl std::error::Error for ParseError {}
