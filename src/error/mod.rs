//! Error types for validation failures.
//!
//! This module provides [`Violation`], a single failure with code, path,
//! rendered messages and classification; [`ValidationError`], which is either
//! one violation or a flattened list of them; the composition functions
//! [`join`], [`unwrap`], [`for_path`] and [`for_path_as`]; and the legacy
//! [`ErrorList`].

mod collection;
mod validation_error;
mod violation;

pub use collection::ErrorList;
pub use validation_error::{
    for_path, for_path_as, join, join_foreign, unwrap, ForeignError, ValidationError, Violations,
};
pub use violation::Violation;
