//! The atomic validation error record.

use std::fmt::{self, Display};

use indexmap::IndexMap;
use serde_json::Value;

use crate::code::{ErrorClassification, ErrorCode};
use crate::path::{Path, PathSerializer};
use crate::validation::ValidationContext;

/// A single validation failure with full context.
///
/// `Violation` captures all relevant information about one failure:
/// - **code**: machine-readable identifier for programmatic handling
/// - **path**: where in the data structure the failure occurred
/// - **short message**: a terse label such as `below minimum`
/// - **message**: the fully rendered, human-readable description
/// - **params**: the raw arguments the message was rendered from
/// - **classification**: validation, permission or internal
///
/// Violations are never mutated. The `with_*` builders consume the receiver and
/// return a new value. Inside a validator, prefer
/// [`ValidationError::errorf`](crate::ValidationError::errorf) and
/// [`ValidationError::from_code`](crate::ValidationError::from_code), which
/// honour the context's path, config and dictionary.
///
/// # Example
///
/// ```rust
/// use faultline::{ErrorCode, JsonPointer, Path, Violation};
/// use serde_json::json;
///
/// let violation = Violation::new(ErrorCode::MIN, Path::from_field("age"), "must be at least 18")
///     .with_short("below minimum")
///     .with_params(vec![json!(18)]);
///
/// assert_eq!(violation.code(), &ErrorCode::MIN);
/// assert_eq!(violation.path_as(&JsonPointer), "/age");
/// assert_eq!(violation.to_string(), "must be at least 18");
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Violation {
    code: ErrorCode,
    path: Path,
    short_message: String,
    message: String,
    docs_uri: Option<String>,
    trace_uri: Option<String>,
    metadata: IndexMap<String, Value>,
    params: Vec<Value>,
    classification: ErrorClassification,
}

impl Violation {
    /// Creates a validation-classified violation with the given code, path and message.
    ///
    /// The short message defaults to the message.
    pub fn new(code: impl Into<ErrorCode>, path: Path, message: impl Into<String>) -> Self {
        let message = message.into();
        Self {
            code: code.into(),
            path,
            short_message: message.clone(),
            message,
            docs_uri: None,
            trace_uri: None,
            metadata: IndexMap::new(),
            params: Vec::new(),
            classification: ErrorClassification::Validation,
        }
    }

    /// Builds a violation from `ctx`.
    ///
    /// Resolution order: the config's code overrides `code`; the config's short
    /// and long templates override `short` and `template`; both are rendered
    /// with the context formatter. Classification comes from the dictionary
    /// entry of the effective code, or of `code` when the override is unknown
    /// to the dictionary.
    pub(crate) fn from_context(
        code: ErrorCode,
        ctx: &ValidationContext,
        short: &str,
        template: &str,
        params: Vec<Value>,
    ) -> Self {
        let config = ctx.error_config();
        let dictionary = ctx.dictionary();
        let formatter = ctx.formatter();

        let effective = config.code().cloned().unwrap_or_else(|| code.clone());
        let classification = dictionary
            .get(&effective)
            .unwrap_or_else(|| dictionary.entry(&code))
            .classification;

        let short_message = formatter.format(config.short().unwrap_or(short), &params);
        let message = formatter.format(config.long().unwrap_or(template), &params);

        Self {
            code: effective,
            path: ctx.path().clone(),
            short_message,
            message,
            docs_uri: config.docs_uri().map(str::to_string),
            trace_uri: config.trace_uri().map(str::to_string),
            metadata: config.metadata().clone(),
            params,
            classification,
        }
    }

    /// Returns a copy with a different code.
    pub fn with_code(mut self, code: impl Into<ErrorCode>) -> Self {
        self.code = code.into();
        self
    }

    /// Returns a copy located at `path`.
    pub fn with_path(mut self, path: Path) -> Self {
        self.path = path;
        self
    }

    /// Returns a copy with a different short message.
    pub fn with_short(mut self, short: impl Into<String>) -> Self {
        self.short_message = short.into();
        self
    }

    /// Returns a copy with a different rendered message.
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    /// Returns a copy with a documentation URI.
    pub fn with_docs_uri(mut self, uri: impl Into<String>) -> Self {
        self.docs_uri = Some(uri.into());
        self
    }

    /// Returns a copy with a trace URI.
    pub fn with_trace_uri(mut self, uri: impl Into<String>) -> Self {
        self.trace_uri = Some(uri.into());
        self
    }

    /// Returns a copy with one metadata entry added or replaced.
    pub fn with_meta(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.metadata.insert(key.into(), value.into());
        self
    }

    /// Returns a copy with the given raw params.
    pub fn with_params(mut self, params: Vec<Value>) -> Self {
        self.params = params;
        self
    }

    /// Returns a copy with a different classification.
    pub fn with_classification(mut self, classification: ErrorClassification) -> Self {
        self.classification = classification;
        self
    }

    /// The error code.
    pub fn code(&self) -> &ErrorCode {
        &self.code
    }

    /// The path to the value that failed.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The path rendered with `serializer`. Not cached.
    pub fn path_as(&self, serializer: &dyn PathSerializer) -> String {
        self.path.to_string_as(serializer)
    }

    /// The rendered long message.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// The rendered short message.
    pub fn short_error(&self) -> &str {
        &self.short_message
    }

    /// Link to documentation about this error, if any.
    pub fn docs_uri(&self) -> Option<&str> {
        self.docs_uri.as_deref()
    }

    /// Link to a trace of the failing request, if any.
    pub fn trace_uri(&self) -> Option<&str> {
        self.trace_uri.as_deref()
    }

    /// Arbitrary metadata attached through the error config.
    pub fn meta(&self) -> &IndexMap<String, Value> {
        &self.metadata
    }

    /// The raw arguments the message was rendered from.
    pub fn params(&self) -> &[Value] {
        &self.params
    }

    /// The classification.
    pub fn classification(&self) -> ErrorClassification {
        self.classification
    }

    /// Returns true if this is an internal error.
    pub fn is_internal(&self) -> bool {
        self.classification == ErrorClassification::Internal
    }

    /// Returns true if this is a permission error.
    pub fn is_permission(&self) -> bool {
        self.classification == ErrorClassification::Permission
    }

    /// Returns true if this is an ordinary validation error.
    pub fn is_validation(&self) -> bool {
        self.classification == ErrorClassification::Validation
    }
}

impl Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for Violation {}

// Violation is Send + Sync since every field is owned or reference counted.
// These assertions keep it that way if the fields change.
const _: () = {
    const fn assert_send<T: Send>() {}
    const fn assert_sync<T: Sync>() {}
    assert_send::<Violation>();
    assert_sync::<Violation>();
};
