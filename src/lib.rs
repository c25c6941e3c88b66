//! # Faultline
//!
//! Structured, path-addressed validation errors.
//!
//! ## Overview
//!
//! Faultline is the error-reporting core of a validation library. It models
//! the failures a validator produces while walking nested data: what went
//! wrong (an [`ErrorCode`]), where (a [`Path`]), how to describe it (short and
//! long messages rendered from an [`ErrorDictionary`] or explicit templates),
//! and how severe it is (an [`ErrorClassification`]). Errors from many rules
//! are combined with [`join`], inspected with [`unwrap`], and narrowed with
//! [`for_path`].
//!
//! ## Core Types
//!
//! - [`Path`]: where in a nested value an error occurred
//! - [`PathSerializer`]: renders a path as default (`/a/0`), [`JsonPointer`],
//!   [`JsonPathSerializer`] (`$.a[0]`) or [`DotNotation`] (`a[0]`)
//! - [`Violation`]: a single failure
//! - [`ValidationError`]: one violation or a flattened, non-empty list
//! - [`ErrorDictionary`]: default classification and messages per code
//! - [`ErrorConfig`]: scoped overrides for how errors render
//! - [`ValidationContext`]: the path, config, dictionary and formatter in effect
//!
//! ## Example
//!
//! ```rust
//! use faultline::{join, ErrorCode, ErrorConfig, JsonPointer, ValidationContext, ValidationError};
//! use serde_json::json;
//!
//! let ctx = ValidationContext::new()
//!     .with_error_config(ErrorConfig::new().with_docs_uri("https://docs.example.com/users"));
//! let user = ctx.with_field("user");
//!
//! let age = ValidationError::from_code(ErrorCode::MIN, &user.with_field("age"), vec![json!(18)]);
//! let name = ValidationError::from_code(ErrorCode::REQUIRED, &user.with_field("name"), vec![]);
//!
//! let err = join([age, name]).unwrap();
//! assert_eq!(err.to_string(), "must be at least 18 (and 1 more)");
//! assert!(err.is_validation());
//! assert_eq!(err.docs_uri(), Some("https://docs.example.com/users"));
//!
//! let name_only = err.for_path_as("/user/name", &JsonPointer).unwrap();
//! assert_eq!(name_only.code(), &ErrorCode::REQUIRED);
//! ```

pub mod code;
pub mod config;
pub mod dictionary;
pub mod error;
pub mod format;
pub mod path;
pub mod validation;

pub use code::{ErrorClassification, ErrorCode};
pub use config::{ErrorCallback, ErrorConfig};
pub use dictionary::{ErrorDictionary, ErrorDictionaryEntry};
pub use error::{
    for_path, for_path_as, join, join_foreign, unwrap, ErrorList, ForeignError, ValidationError,
    Violation, Violations,
};
pub use format::{MessageFormatter, PositionalFormatter};
pub use path::{
    DefaultSerializer, DotNotation, JsonPathSerializer, JsonPointer, Path, PathSegment,
    PathSerializer,
};
pub use validation::ValidationContext;

/// Type alias for validation results that accumulate a [`ValidationError`].
pub type ValidationResult<T> = stillwater::Validation<T, ValidationError>;
