//! Validation context carrying the ambient state for error construction.
//!
//! This module provides the [`ValidationContext`] type that is passed down the
//! validation call chain. It records the current traversal position and the
//! error configuration, dictionary and message formatter in effect, and is the
//! only source the error constructors read from.

use std::fmt;
use std::sync::Arc;

use crate::config::ErrorConfig;
use crate::dictionary::ErrorDictionary;
use crate::format::{MessageFormatter, PositionalFormatter};
use crate::path::Path;

/// Validation context carries path, error config, dictionary and formatter.
///
/// ValidationContext is passed through the validation call chain to enable:
/// - Path tracking, so errors know where they occurred
/// - Scoped error customization via [`ErrorConfig`]
/// - Scoped message defaults via [`ErrorDictionary`]
/// - Localized rendering via a [`MessageFormatter`]
///
/// Contexts are immutable. Every `with_*` method returns a child context; the
/// child inherits everything from its parent and may shadow it, never the
/// reverse. Each call path owns its own chain, so no synchronization is needed.
///
/// # Example
///
/// ```rust
/// use faultline::{ErrorConfig, ValidationContext};
///
/// let root = ValidationContext::new()
///     .with_error_config(ErrorConfig::new().with_docs_uri("https://docs.example.com"));
/// let field = root.with_field("users").with_index(0).with_field("age");
///
/// assert_eq!(field.path().to_string(), "/users/0/age");
/// assert_eq!(field.error_config().docs_uri(), Some("https://docs.example.com"));
/// assert!(root.path().is_root());
/// ```
#[derive(Clone)]
pub struct ValidationContext {
    path: Path,
    config: Arc<ErrorConfig>,
    dictionary: ErrorDictionary,
    formatter: Arc<dyn MessageFormatter>,
}

impl ValidationContext {
    /// Creates a root context: root path, empty config, default dictionary and
    /// the positional formatter.
    pub fn new() -> Self {
        Self {
            path: Path::root(),
            config: Arc::new(ErrorConfig::new()),
            dictionary: ErrorDictionary::default_dictionary(),
            formatter: Arc::new(PositionalFormatter),
        }
    }

    /// Creates a child context positioned at `path`.
    pub fn with_path(&self, path: Path) -> Self {
        Self {
            path,
            ..self.clone()
        }
    }

    /// Creates a child context one field deeper.
    pub fn with_field(&self, name: impl Into<String>) -> Self {
        self.with_path(self.path.push_field(name))
    }

    /// Creates a child context one array element deeper.
    pub fn with_index(&self, index: usize) -> Self {
        self.with_path(self.path.push_index(index))
    }

    /// Creates a child context whose config is `config` merged over the current one.
    pub fn with_error_config(&self, config: ErrorConfig) -> Self {
        Self {
            config: Arc::new(self.config.merge(&config)),
            ..self.clone()
        }
    }

    /// Creates a child context with the callback removed from its config.
    ///
    /// Error constructors hand this context to the callback they invoke.
    pub fn without_callback(&self) -> Self {
        if self.config.callback().is_none() {
            return self.clone();
        }
        Self {
            config: Arc::new(self.config.without_callback()),
            ..self.clone()
        }
    }

    /// Creates a child context using `dictionary` for default messages.
    pub fn with_dictionary(&self, dictionary: ErrorDictionary) -> Self {
        Self {
            dictionary,
            ..self.clone()
        }
    }

    /// Creates a child context rendering messages with `formatter`.
    pub fn with_formatter<F>(&self, formatter: F) -> Self
    where
        F: MessageFormatter + 'static,
    {
        Self {
            formatter: Arc::new(formatter),
            ..self.clone()
        }
    }

    /// Returns the current traversal position.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Returns the merged error config in effect.
    pub fn error_config(&self) -> &ErrorConfig {
        &self.config
    }

    /// Returns the dictionary in effect.
    pub fn dictionary(&self) -> &ErrorDictionary {
        &self.dictionary
    }

    /// Returns the message formatter in effect.
    pub fn formatter(&self) -> &dyn MessageFormatter {
        &*self.formatter
    }
}

impl Default for ValidationContext {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for ValidationContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ValidationContext")
            .field("path", &self.path)
            .field("config", &self.config)
            .field("dictionary", &self.dictionary)
            .finish_non_exhaustive()
    }
}
