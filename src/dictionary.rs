//! Error dictionary mapping codes to classifications and message templates.
//!
//! This module provides [`ErrorDictionary`], a chain of immutable layers. Lookup
//! starts at the most specific layer and walks outward to the process-wide
//! default dictionary. Overriding a code adds a one-entry layer on top of the
//! receiver and never copies or mutates the layers underneath, so a dictionary
//! can be shared freely between threads and scopes.

use std::collections::HashMap;
use std::sync::{Arc, OnceLock};

use crate::code::{ErrorClassification, ErrorCode};

/// Default classification and message templates for one error code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorDictionaryEntry {
    /// How errors with this code are classified.
    pub classification: ErrorClassification,
    /// Short label, e.g. `below minimum`.
    pub short_message: String,
    /// Long message template; may contain placeholders for the error params.
    pub message_pattern: String,
}

impl ErrorDictionaryEntry {
    /// Creates a new entry.
    pub fn new(
        classification: ErrorClassification,
        short_message: impl Into<String>,
        message_pattern: impl Into<String>,
    ) -> Self {
        Self {
            classification,
            short_message: short_message.into(),
            message_pattern: message_pattern.into(),
        }
    }

    /// Creates an entry classified as [`ErrorClassification::Validation`].
    pub fn validation(short_message: impl Into<String>, message_pattern: impl Into<String>) -> Self {
        Self::new(ErrorClassification::Validation, short_message, message_pattern)
    }
}

struct Layer {
    entries: HashMap<ErrorCode, ErrorDictionaryEntry>,
    parent: Option<ErrorDictionary>,
}

/// A chained, overridable lookup table from [`ErrorCode`] to [`ErrorDictionaryEntry`].
///
/// # Example
///
/// ```rust
/// use faultline::{ErrorClassification, ErrorCode, ErrorDictionary, ErrorDictionaryEntry};
///
/// let defaults = ErrorDictionary::default_dictionary();
/// let custom = defaults.with_code(
///     ErrorCode::MIN,
///     ErrorDictionaryEntry::validation("too small", "needs {} or more"),
/// );
///
/// assert_eq!(custom.entry(&ErrorCode::MIN).short_message, "too small");
/// assert_eq!(defaults.entry(&ErrorCode::MIN).short_message, "below minimum");
///
/// // Codes missing from every layer resolve to an internal "unknown" entry.
/// let entry = custom.entry(&ErrorCode::new("NO_SUCH_CODE"));
/// assert_eq!(entry.classification, ErrorClassification::Internal);
/// ```
#[derive(Clone)]
pub struct ErrorDictionary {
    layer: Arc<Layer>,
}

impl ErrorDictionary {
    /// Creates a root dictionary with no entries and no parent.
    ///
    /// Every lookup on an empty dictionary resolves to the unknown entry.
    pub fn empty() -> Self {
        Self::root(HashMap::new())
    }

    /// Returns the process-wide default dictionary.
    ///
    /// It is built once on first use and never changes afterwards.
    pub fn default_dictionary() -> Self {
        static DEFAULT: OnceLock<ErrorDictionary> = OnceLock::new();
        DEFAULT
            .get_or_init(|| ErrorDictionary::root(default_entries()))
            .clone()
    }

    fn root(entries: HashMap<ErrorCode, ErrorDictionaryEntry>) -> Self {
        Self {
            layer: Arc::new(Layer {
                entries,
                parent: None,
            }),
        }
    }

    /// Returns a new dictionary that overrides `code` and defers everything else to `self`.
    pub fn with_code(&self, code: impl Into<ErrorCode>, entry: ErrorDictionaryEntry) -> Self {
        self.with_codes([(code.into(), entry)])
    }

    /// Returns a new dictionary that overrides several codes in a single layer.
    pub fn with_codes<I>(&self, entries: I) -> Self
    where
        I: IntoIterator<Item = (ErrorCode, ErrorDictionaryEntry)>,
    {
        Self {
            layer: Arc::new(Layer {
                entries: entries.into_iter().collect(),
                parent: Some(self.clone()),
            }),
        }
    }

    /// Looks up `code`, falling back to the unknown entry when no layer defines it.
    pub fn entry(&self, code: &ErrorCode) -> &ErrorDictionaryEntry {
        match self.get(code) {
            Some(entry) => entry,
            None => {
                tracing::debug!(code = %code, "error code not found in dictionary, using unknown entry");
                unknown_entry()
            }
        }
    }

    /// Looks up `code` without falling back.
    pub fn get(&self, code: &ErrorCode) -> Option<&ErrorDictionaryEntry> {
        self.layers().find_map(|layer| layer.entries.get(code))
    }

    /// Returns true if any layer defines `code`.
    pub fn contains(&self, code: &ErrorCode) -> bool {
        self.get(code).is_some()
    }

    /// Returns the parent dictionary, or None for a root dictionary.
    pub fn parent(&self) -> Option<&ErrorDictionary> {
        self.layer.parent.as_ref()
    }

    fn layers(&self) -> impl Iterator<Item = &Layer> {
        std::iter::successors(Some(&*self.layer), |layer| {
            layer.parent.as_ref().map(|parent| &*parent.layer)
        })
    }
}

impl Default for ErrorDictionary {
    fn default() -> Self {
        Self::default_dictionary()
    }
}

impl std::fmt::Debug for ErrorDictionary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ErrorDictionary")
            .field("layers", &self.layers().count())
            .field("local_codes", &self.layer.entries.keys().collect::<Vec<_>>())
            .finish()
    }
}

fn unknown_entry() -> &'static ErrorDictionaryEntry {
    static UNKNOWN: OnceLock<ErrorDictionaryEntry> = OnceLock::new();
    UNKNOWN.get_or_init(|| {
        ErrorDictionaryEntry::new(
            ErrorClassification::Internal,
            "unknown error",
            "an unknown error occurred",
        )
    })
}

fn default_entries() -> HashMap<ErrorCode, ErrorDictionaryEntry> {
    use ErrorClassification::{Internal, Permission, Validation};

    let table = [
        (ErrorCode::UNKNOWN, Internal, "unknown error", "an unknown error occurred"),
        (ErrorCode::INTERNAL, Internal, "internal error", "an internal error occurred"),
        (ErrorCode::TYPE, Validation, "wrong type", "expected {} but got {}"),
        (ErrorCode::NULL, Validation, "null value", "value cannot be null"),
        (ErrorCode::REQUIRED, Validation, "required", "value is required"),
        (ErrorCode::UNEXPECTED, Validation, "unexpected value", "value was not expected"),
        (ErrorCode::MIN, Validation, "below minimum", "must be at least {}"),
        (ErrorCode::MAX, Validation, "above maximum", "must be at most {}"),
        (ErrorCode::MIN_EXCLUSIVE, Validation, "too small", "must be greater than {}"),
        (ErrorCode::MAX_EXCLUSIVE, Validation, "too large", "must be less than {}"),
        (ErrorCode::MIN_LEN, Validation, "too short", "must have a length of at least {}"),
        (ErrorCode::MAX_LEN, Validation, "too long", "must have a length of at most {}"),
        (ErrorCode::PATTERN, Validation, "invalid format", "must match the pattern {}"),
        (ErrorCode::NOT_ALLOWED, Validation, "not allowed", "value is not allowed"),
        (ErrorCode::ENCODING, Validation, "invalid encoding", "value is not correctly encoded"),
        (ErrorCode::CONFLICT, Validation, "conflict", "value conflicts with {}"),
        (
            ErrorCode::FORBIDDEN,
            Permission,
            "forbidden",
            "you do not have permission to perform this action",
        ),
        (ErrorCode::TIMEOUT, Internal, "timed out", "validation timed out before completing"),
        (ErrorCode::CANCELLED, Internal, "cancelled", "validation was cancelled before completing"),
    ];

    table
        .into_iter()
        .map(|(code, classification, short, pattern)| {
            (code, ErrorDictionaryEntry::new(classification, short, pattern))
        })
        .collect()
}

// Dictionaries are shared across threads through validation contexts.
const _: () = {
    const fn assert_send<T: Send>() {}
    const fn assert_sync<T: Sync>() {}
    assert_send::<ErrorDictionary>();
    assert_sync::<ErrorDictionary>();
};
