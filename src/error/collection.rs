//! The legacy error list.

use std::fmt::{self, Display};

use super::validation_error::{join, ValidationError};
use crate::path::PathSerializer;

/// An ordered, append-only list of validation errors.
///
/// `ErrorList` predates [`join`] and is kept for callers that build results
/// incrementally. Unlike `join` it does not flatten: a joined error pushed
/// onto the list stays one item. New code should prefer [`join`] and
/// [`unwrap`](crate::unwrap).
///
/// [`push`](ErrorList::push) takes `&mut self`; a list shared between threads
/// needs external synchronization. Validators running in parallel should
/// build their own errors and combine them with `join` afterwards.
///
/// # Panics
///
/// Rendering an empty list with `Display` panics. An empty list stands for
/// "no errors" and must never be reported as an error.
///
/// # Example
///
/// ```rust
/// use faultline::{ErrorCode, ErrorList, Path, Violation};
///
/// let mut errors = ErrorList::new();
/// errors.push(Violation::new(ErrorCode::REQUIRED, Path::from_field("name"), "name is required"));
/// errors.push(Violation::new(ErrorCode::MIN, Path::from_field("age"), "must be at least 18"));
///
/// assert_eq!(errors.len(), 2);
/// assert_eq!(errors.to_string(), "name is required (and 1 more)");
/// assert_eq!(errors.for_path("/age").len(), 1);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ErrorList {
    errors: Vec<ValidationError>,
}

impl ErrorList {
    /// Creates an empty list.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends an error.
    pub fn push(&mut self, error: impl Into<ValidationError>) {
        self.errors.push(error.into());
    }

    /// Returns the number of items in the list.
    pub fn len(&self) -> usize {
        self.errors.len()
    }

    /// Returns true if the list has no items.
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// Returns the first item.
    pub fn first(&self) -> Option<&ValidationError> {
        self.errors.first()
    }

    /// Returns an iterator over the items.
    pub fn iter(&self) -> impl Iterator<Item = &ValidationError> {
        self.errors.iter()
    }

    /// Returns the items whose default-format path equals `path`.
    pub fn for_path(&self, path: &str) -> ErrorList {
        self.filter(|e| e.path().to_string() == path)
    }

    /// Returns the items whose path rendered with `serializer` equals `path`.
    pub fn for_path_as(&self, path: &str, serializer: &dyn PathSerializer) -> ErrorList {
        self.filter(|e| e.path_as(serializer) == path)
    }

    fn filter<F>(&self, predicate: F) -> ErrorList
    where
        F: Fn(&ValidationError) -> bool,
    {
        self.errors.iter().filter(|e| predicate(e)).cloned().collect()
    }

    /// Joins the items into a single error, or None if the list is empty.
    pub fn into_error(self) -> Option<ValidationError> {
        join(self.errors)
    }
}

impl Display for ErrorList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Some(first) = self.errors.first() else {
            tracing::error!("attempted to render an empty error list");
            panic!("cannot render an empty ErrorList: an empty list means no errors occurred");
        };
        write!(f, "{}", first)?;
        if self.errors.len() > 1 {
            write!(f, " (and {} more)", self.errors.len() - 1)?;
        }
        Ok(())
    }
}

impl std::error::Error for ErrorList {}

impl FromIterator<ValidationError> for ErrorList {
    fn from_iter<I: IntoIterator<Item = ValidationError>>(iter: I) -> Self {
        Self {
            errors: iter.into_iter().collect(),
        }
    }
}

impl IntoIterator for ErrorList {
    type Item = ValidationError;
    type IntoIter = std::vec::IntoIter<ValidationError>;

    fn into_iter(self) -> Self::IntoIter {
        self.errors.into_iter()
    }
}

impl<'a> IntoIterator for &'a ErrorList {
    type Item = &'a ValidationError;
    type IntoIter = std::slice::Iter<'a, ValidationError>;

    fn into_iter(self) -> Self::IntoIter {
        self.errors.iter()
    }
}
