//! Error codes and classifications.
//!
//! An [`ErrorCode`] is an opaque identifier used for programmatic dispatch. It is
//! compared, hashed and displayed but never parsed. Every code maps to an
//! [`ErrorClassification`] through an [`ErrorDictionary`](crate::ErrorDictionary).

use std::borrow::Cow;
use std::fmt::{self, Display};

/// An opaque, comparable error identifier such as `MIN` or `TYPE`.
///
/// Built-in codes are available as associated constants:
///
/// ```rust
/// use faultline::ErrorCode;
///
/// assert_eq!(ErrorCode::MIN.as_str(), "MIN");
/// assert_eq!(ErrorCode::new("CUSTOM"), ErrorCode::from("CUSTOM"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ErrorCode(Cow<'static, str>);

impl ErrorCode {
    /// The code could not be resolved; also the fallback for codes missing from a dictionary.
    pub const UNKNOWN: ErrorCode = ErrorCode::from_static("UNKNOWN");
    /// An unexpected failure inside the validator itself.
    pub const INTERNAL: ErrorCode = ErrorCode::from_static("INTERNAL");
    /// The value has the wrong type and could not be coerced.
    pub const TYPE: ErrorCode = ErrorCode::from_static("TYPE");
    /// The value is null where null is not allowed.
    pub const NULL: ErrorCode = ErrorCode::from_static("NULL");
    /// A required value is missing.
    pub const REQUIRED: ErrorCode = ErrorCode::from_static("REQUIRED");
    /// A value is present that was not expected.
    pub const UNEXPECTED: ErrorCode = ErrorCode::from_static("UNEXPECTED");
    /// The value is below the inclusive minimum.
    pub const MIN: ErrorCode = ErrorCode::from_static("MIN");
    /// The value is above the inclusive maximum.
    pub const MAX: ErrorCode = ErrorCode::from_static("MAX");
    /// The value is at or below the exclusive minimum.
    pub const MIN_EXCLUSIVE: ErrorCode = ErrorCode::from_static("MIN_EXCLUSIVE");
    /// The value is at or above the exclusive maximum.
    pub const MAX_EXCLUSIVE: ErrorCode = ErrorCode::from_static("MAX_EXCLUSIVE");
    /// The value is shorter than allowed.
    pub const MIN_LEN: ErrorCode = ErrorCode::from_static("MIN_LEN");
    /// The value is longer than allowed.
    pub const MAX_LEN: ErrorCode = ErrorCode::from_static("MAX_LEN");
    /// The value does not match the required pattern.
    pub const PATTERN: ErrorCode = ErrorCode::from_static("PATTERN");
    /// The value is not one of the allowed values.
    pub const NOT_ALLOWED: ErrorCode = ErrorCode::from_static("NOT_ALLOWED");
    /// The value is not correctly encoded.
    pub const ENCODING: ErrorCode = ErrorCode::from_static("ENCODING");
    /// The value conflicts with another value.
    pub const CONFLICT: ErrorCode = ErrorCode::from_static("CONFLICT");
    /// The caller is not permitted to set or read the value.
    pub const FORBIDDEN: ErrorCode = ErrorCode::from_static("FORBIDDEN");
    /// Validation did not finish in time.
    pub const TIMEOUT: ErrorCode = ErrorCode::from_static("TIMEOUT");
    /// Validation was cancelled before it finished.
    pub const CANCELLED: ErrorCode = ErrorCode::from_static("CANCELLED");

    /// Creates a code from any string.
    pub fn new(code: impl Into<String>) -> Self {
        Self(Cow::Owned(code.into()))
    }

    /// Creates a code from a static string without allocating.
    pub const fn from_static(code: &'static str) -> Self {
        Self(Cow::Borrowed(code))
    }

    /// Returns the code as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&'static str> for ErrorCode {
    fn from(code: &'static str) -> Self {
        Self::from_static(code)
    }
}

impl From<String> for ErrorCode {
    fn from(code: String) -> Self {
        Self::new(code)
    }
}

impl PartialEq<str> for ErrorCode {
    fn eq(&self, other: &str) -> bool {
        self.as_str() == other
    }
}

impl PartialEq<&str> for ErrorCode {
    fn eq(&self, other: &&str) -> bool {
        self.as_str() == *other
    }
}

/// How severe an error is and how much of it may be shown to an end user.
///
/// Variants are ordered by severity, so the classification of an aggregate is
/// simply the maximum over its members.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ErrorClassification {
    /// An ordinary input-shape problem. Safe to show to the end user.
    Validation,
    /// An authorization-shaped denial.
    Permission,
    /// A failure whose details must not be exposed to the end user.
    Internal,
}

impl ErrorClassification {
    /// Returns the most severe classification in `classifications`, or `None` when empty.
    pub fn most_severe<I>(classifications: I) -> Option<Self>
    where
        I: IntoIterator<Item = Self>,
    {
        classifications.into_iter().max()
    }
}

impl Display for ErrorClassification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ErrorClassification::Validation => "validation",
            ErrorClassification::Permission => "permission",
            ErrorClassification::Internal => "internal",
        };
        f.write_str(name)
    }
}
