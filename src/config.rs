//! Per-call error customization.
//!
//! An [`ErrorConfig`] overrides how errors constructed inside a
//! [`ValidationContext`] render, without touching the code that constructs them.
//! Configs are immutable; every `with_*` method returns a new config merged over
//! the receiver with child-over-parent precedence:
//!
//! - scalar fields: the child's non-empty value wins, otherwise the parent's
//! - metadata: union of both maps, child keys override parent keys
//! - callback: the child's if set, otherwise the parent's

use std::fmt;
use std::sync::Arc;

use indexmap::IndexMap;
use serde_json::Value;

use crate::code::ErrorCode;
use crate::error::ValidationError;
use crate::validation::ValidationContext;

/// Rewrites a fully constructed error.
///
/// The context passed in is the one the error was built in, with the callback
/// already removed, so the callback may call the error constructors again.
pub type ErrorCallback =
    Arc<dyn Fn(&ValidationContext, ValidationError) -> ValidationError + Send + Sync>;

/// Overrides applied to errors built within a scope.
///
/// # Example
///
/// ```rust
/// use faultline::ErrorConfig;
///
/// let rule_set = ErrorConfig::new().with_docs_uri("https://docs.example.com/users");
/// let field = ErrorConfig::new().with_short("too young");
///
/// let merged = rule_set.merge(&field);
/// assert_eq!(merged.short(), Some("too young"));
/// assert_eq!(merged.docs_uri(), Some("https://docs.example.com/users"));
/// ```
#[derive(Clone, Default)]
pub struct ErrorConfig {
    short: Option<String>,
    long: Option<String>,
    docs_uri: Option<String>,
    trace_uri: Option<String>,
    code: Option<ErrorCode>,
    metadata: IndexMap<String, Value>,
    callback: Option<ErrorCallback>,
}

impl ErrorConfig {
    /// Creates an empty config that overrides nothing.
    pub fn new() -> Self {
        Self::default()
    }

    /// Merges `child` over `self` and returns the result.
    pub fn merge(&self, child: &ErrorConfig) -> ErrorConfig {
        let mut metadata = self.metadata.clone();
        metadata.extend(child.metadata.iter().map(|(k, v)| (k.clone(), v.clone())));

        ErrorConfig {
            short: pick(&self.short, &child.short),
            long: pick(&self.long, &child.long),
            docs_uri: pick(&self.docs_uri, &child.docs_uri),
            trace_uri: pick(&self.trace_uri, &child.trace_uri),
            code: child
                .code
                .clone()
                .filter(|c| !c.as_str().is_empty())
                .or_else(|| self.code.clone()),
            metadata,
            callback: child.callback.clone().or_else(|| self.callback.clone()),
        }
    }

    /// Merges two optional configs; a missing side behaves like an empty config.
    pub fn merge_optional(parent: Option<&ErrorConfig>, child: Option<&ErrorConfig>) -> ErrorConfig {
        match (parent, child) {
            (Some(parent), Some(child)) => parent.merge(child),
            (Some(only), None) | (None, Some(only)) => only.clone(),
            (None, None) => ErrorConfig::new(),
        }
    }

    /// Returns a config overriding the short message.
    pub fn with_short(&self, short: impl Into<String>) -> Self {
        self.merge(&ErrorConfig {
            short: Some(short.into()),
            ..ErrorConfig::default()
        })
    }

    /// Returns a config overriding the long message template.
    pub fn with_long(&self, long: impl Into<String>) -> Self {
        self.merge(&ErrorConfig {
            long: Some(long.into()),
            ..ErrorConfig::default()
        })
    }

    /// Returns a config overriding the documentation URI.
    pub fn with_docs_uri(&self, uri: impl Into<String>) -> Self {
        self.merge(&ErrorConfig {
            docs_uri: Some(uri.into()),
            ..ErrorConfig::default()
        })
    }

    /// Returns a config overriding the trace URI.
    pub fn with_trace_uri(&self, uri: impl Into<String>) -> Self {
        self.merge(&ErrorConfig {
            trace_uri: Some(uri.into()),
            ..ErrorConfig::default()
        })
    }

    /// Returns a config overriding the error code.
    pub fn with_code(&self, code: impl Into<ErrorCode>) -> Self {
        self.merge(&ErrorConfig {
            code: Some(code.into()),
            ..ErrorConfig::default()
        })
    }

    /// Returns a config with one metadata entry added or replaced.
    pub fn with_meta(&self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        let mut metadata = IndexMap::new();
        metadata.insert(key.into(), value.into());
        self.merge(&ErrorConfig {
            metadata,
            ..ErrorConfig::default()
        })
    }

    /// Returns a config with a post-construction callback.
    pub fn with_callback<F>(&self, callback: F) -> Self
    where
        F: Fn(&ValidationContext, ValidationError) -> ValidationError + Send + Sync + 'static,
    {
        self.merge(&ErrorConfig {
            callback: Some(Arc::new(callback)),
            ..ErrorConfig::default()
        })
    }

    /// Returns a copy of this config with the callback removed.
    pub fn without_callback(&self) -> Self {
        ErrorConfig {
            callback: None,
            ..self.clone()
        }
    }

    /// The short message override.
    pub fn short(&self) -> Option<&str> {
        self.short.as_deref()
    }

    /// The long message override.
    pub fn long(&self) -> Option<&str> {
        self.long.as_deref()
    }

    /// The documentation URI override.
    pub fn docs_uri(&self) -> Option<&str> {
        self.docs_uri.as_deref()
    }

    /// The trace URI override.
    pub fn trace_uri(&self) -> Option<&str> {
        self.trace_uri.as_deref()
    }

    /// The code override.
    pub fn code(&self) -> Option<&ErrorCode> {
        self.code.as_ref()
    }

    /// Metadata attached to every error built under this config.
    pub fn metadata(&self) -> &IndexMap<String, Value> {
        &self.metadata
    }

    /// The post-construction callback.
    pub fn callback(&self) -> Option<&ErrorCallback> {
        self.callback.as_ref()
    }

    /// Returns true if this config overrides nothing.
    pub fn is_empty(&self) -> bool {
        self.short.is_none()
            && self.long.is_none()
            && self.docs_uri.is_none()
            && self.trace_uri.is_none()
            && self.code.is_none()
            && self.metadata.is_empty()
            && self.callback.is_none()
    }
}

fn pick(parent: &Option<String>, child: &Option<String>) -> Option<String> {
    child
        .as_ref()
        .filter(|s| !s.is_empty())
        .or(parent.as_ref())
        .cloned()
}

impl fmt::Debug for ErrorConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ErrorConfig")
            .field("short", &self.short)
            .field("long", &self.long)
            .field("docs_uri", &self.docs_uri)
            .field("trace_uri", &self.trace_uri)
            .field("code", &self.code)
            .field("metadata", &self.metadata)
            .field("callback", &self.callback.as_ref().map(|_| "<callback>"))
            .finish()
    }
}
