//! The validation error contract and its composition operations.
//!
//! This module provides [`ValidationError`], a closed union of a single
//! [`Violation`] or a flattened, non-empty [`Violations`] list, together with
//! the free functions [`join`], [`unwrap`], [`for_path`] and [`for_path_as`].

use std::fmt::{self, Display};

use indexmap::IndexMap;
use serde_json::Value;
use stillwater::prelude::*;

use super::collection::ErrorList;
use super::violation::Violation;
use crate::code::{ErrorClassification, ErrorCode};
use crate::path::{Path, PathSerializer};
use crate::validation::ValidationContext;

/// One or more validation failures.
///
/// Every accessor except the member list and the classification predicates
/// delegates to the first violation. The classification predicates aggregate
/// over all members with precedence Internal > Permission > Validation.
///
/// A "no errors" outcome is always `None`, never an empty value: `Joined`
/// wraps a [`Violations`], which cannot be empty.
///
/// # Example
///
/// ```rust
/// use faultline::{ErrorCode, JsonPointer, ValidationContext, ValidationError};
/// use serde_json::json;
///
/// let ctx = ValidationContext::new().with_field("a").with_field("b");
/// let err = ValidationError::errorf(
///     ErrorCode::MIN,
///     &ctx,
///     "below minimum",
///     "must be at least {}",
///     vec![json!(10)],
/// );
///
/// assert_eq!(err.code(), &ErrorCode::MIN);
/// assert_eq!(err.path_as(&JsonPointer), "/a/b");
/// assert_eq!(err.to_string(), "must be at least 10");
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum ValidationError {
    /// A single violation.
    Single(Box<Violation>),
    /// Two or more violations in first-seen order.
    ///
    /// Build this through [`join`] or `From<Violations>`; both collapse a
    /// one-member list to [`ValidationError::Single`]. A one-member `Joined`
    /// written out by hand stays as written until it passes through `join`.
    Joined(Violations),
}

impl ValidationError {
    /// Builds an error with an explicit short label and message template.
    ///
    /// The path comes from `ctx`; config overrides from `ctx` replace the code
    /// and messages; the config callback, if any, runs last and its result is
    /// returned instead.
    pub fn errorf(
        code: impl Into<ErrorCode>,
        ctx: &ValidationContext,
        short: &str,
        template: &str,
        params: Vec<Value>,
    ) -> Self {
        let violation = Violation::from_context(code.into(), ctx, short, template, params);
        Self::finish(ctx, violation)
    }

    /// Builds an error whose short label and message template come from the
    /// context's dictionary entry for `code`.
    pub fn from_code(code: impl Into<ErrorCode>, ctx: &ValidationContext, params: Vec<Value>) -> Self {
        let code = code.into();
        let entry = ctx.dictionary().entry(&code);
        let violation = Violation::from_context(
            code.clone(),
            ctx,
            &entry.short_message,
            &entry.message_pattern,
            params,
        );
        Self::finish(ctx, violation)
    }

    fn finish(ctx: &ValidationContext, violation: Violation) -> Self {
        tracing::trace!(
            code = %violation.code(),
            path = %violation.path(),
            classification = %violation.classification(),
            "constructed validation error"
        );

        let err = Self::from(violation);
        match ctx.error_config().callback() {
            Some(callback) => {
                tracing::trace!(code = %err.code(), "applying error config callback");
                callback(&ctx.without_callback(), err)
            }
            None => err,
        }
    }

    /// The first violation.
    pub fn first(&self) -> &Violation {
        match self {
            ValidationError::Single(v) => v,
            ValidationError::Joined(vs) => vs.first(),
        }
    }

    /// Number of violations.
    pub fn len(&self) -> usize {
        match self {
            ValidationError::Single(_) => 1,
            ValidationError::Joined(vs) => vs.len(),
        }
    }

    /// Always false; an empty error is represented as `None`.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// All violations, in order. A single error yields itself.
    pub fn violations(&self) -> Vec<&Violation> {
        match self {
            ValidationError::Single(v) => vec![v.as_ref()],
            ValidationError::Joined(vs) => vs.iter().collect(),
        }
    }

    /// Converts into the owned list of violations.
    pub fn into_violations(self) -> Vec<Violation> {
        match self {
            ValidationError::Single(v) => vec![*v],
            ValidationError::Joined(vs) => vs.into_vec(),
        }
    }

    fn into_non_empty(self) -> NonEmptyVec<Violation> {
        match self {
            ValidationError::Single(v) => NonEmptyVec::singleton(*v),
            ValidationError::Joined(vs) => vs.0,
        }
    }

    /// Code of the first violation.
    pub fn code(&self) -> &ErrorCode {
        self.first().code()
    }

    /// Path of the first violation.
    pub fn path(&self) -> &Path {
        self.first().path()
    }

    /// Path of the first violation rendered with `serializer`.
    pub fn path_as(&self, serializer: &dyn PathSerializer) -> String {
        self.first().path_as(serializer)
    }

    /// Short message of the first violation.
    pub fn short_error(&self) -> &str {
        self.first().short_error()
    }

    /// Documentation URI of the first violation.
    pub fn docs_uri(&self) -> Option<&str> {
        self.first().docs_uri()
    }

    /// Trace URI of the first violation.
    pub fn trace_uri(&self) -> Option<&str> {
        self.first().trace_uri()
    }

    /// Metadata of the first violation.
    pub fn meta(&self) -> &IndexMap<String, Value> {
        self.first().meta()
    }

    /// Params of the first violation.
    pub fn params(&self) -> &[Value] {
        self.first().params()
    }

    /// The most severe classification among all violations.
    pub fn classification(&self) -> ErrorClassification {
        match self {
            ValidationError::Single(v) => v.classification(),
            ValidationError::Joined(vs) => vs.classification(),
        }
    }

    /// True if any violation is internal.
    pub fn is_internal(&self) -> bool {
        self.classification() == ErrorClassification::Internal
    }

    /// True if no violation is internal and at least one is a permission error.
    pub fn is_permission(&self) -> bool {
        self.classification() == ErrorClassification::Permission
    }

    /// True if every violation is an ordinary validation error.
    pub fn is_validation(&self) -> bool {
        self.classification() == ErrorClassification::Validation
    }

    /// Violations whose default-format path equals `path` exactly, or None.
    pub fn for_path(&self, path: &str) -> Option<ValidationError> {
        self.filter(|v| v.path().to_string() == path)
    }

    /// Violations whose path rendered with `serializer` equals `path` exactly, or None.
    pub fn for_path_as(&self, path: &str, serializer: &dyn PathSerializer) -> Option<ValidationError> {
        self.filter(|v| v.path_as(serializer) == path)
    }

    fn filter<F>(&self, predicate: F) -> Option<ValidationError>
    where
        F: Fn(&Violation) -> bool,
    {
        let matched = self
            .violations()
            .into_iter()
            .filter(|v| predicate(v))
            .cloned()
            .map(ValidationError::from);
        join(matched)
    }
}

impl From<Violation> for ValidationError {
    fn from(violation: Violation) -> Self {
        ValidationError::Single(Box::new(violation))
    }
}


impl From<Violations> for ValidationError {
    fn from(violations: Violations) -> Self {
        if violations.len() == 1 {
            ValidationError::Single(Box::new(violations.first().clone()))
        } else {
            ValidationError::Joined(violations)
        }
    }
}

impl Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationError::Single(v) => Display::fmt(v, f),
            ValidationError::Joined(vs) => Display::fmt(vs, f),
        }
    }
}

impl std::error::Error for ValidationError {}

/// Combining two errors joins them, so `Validation<T, ValidationError>`
/// accumulates failures.
impl Semigroup for ValidationError {
    fn combine(self, other: Self) -> Self {
        ValidationError::Joined(Violations(self.into_non_empty().combine(other.into_non_empty())))
    }
}

/// Conversion at the edge of the subsystem for errors arriving type-erased.
impl TryFrom<Box<dyn std::error::Error + Send + Sync>> for ValidationError {
    type Error = ForeignError;

    fn try_from(err: Box<dyn std::error::Error + Send + Sync>) -> Result<Self, Self::Error> {
        let err = match err.downcast::<ValidationError>() {
            Ok(validation) => return Ok(*validation),
            Err(other) => other,
        };
        let err = match err.downcast::<Violation>() {
            Ok(violation) => return Ok(ValidationError::from(*violation)),
            Err(other) => other,
        };
        match err.downcast::<ErrorList>() {
            Ok(list) => list.into_error().ok_or(ForeignError::Empty),
            Err(other) => Err(ForeignError::NotValidation(other)),
        }
    }
}

/// An error that could not be converted into a [`ValidationError`].
#[derive(Debug, thiserror::Error)]
pub enum ForeignError {
    /// The error does not carry validation details.
    #[error("error does not carry validation details: {0}")]
    NotValidation(Box<dyn std::error::Error + Send + Sync>),

    /// The error was a legacy list with no members.
    #[error("error list is empty")]
    Empty,
}

/// A non-empty, flattened list of violations.
///
/// `Violations` wraps a `NonEmptyVec<Violation>`, so a joined error with zero
/// members cannot be constructed. Its members are always atomic; joining never
/// nests.
#[derive(Debug, Clone, PartialEq)]
pub struct Violations(NonEmptyVec<Violation>);

impl Violations {
    /// Creates a list containing a single violation.
    pub(crate) fn single(violation: Violation) -> Self {
        Self(NonEmptyVec::singleton(violation))
    }

    /// Creates a list from a vec, or None if the vec is empty.
    pub fn from_vec(violations: Vec<Violation>) -> Option<Self> {
        let mut iter = violations.into_iter();
        let head = Self::single(iter.next()?);
        Some(iter.fold(head, |acc, v| acc.combine(Self::single(v))))
    }

    /// Returns the number of violations.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns false since this list is guaranteed non-empty.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Returns an iterator over the violations.
    pub fn iter(&self) -> impl Iterator<Item = &Violation> {
        self.0.iter()
    }

    /// Returns the first violation.
    pub fn first(&self) -> &Violation {
        self.0.head()
    }

    /// Converts this list into a `Vec<Violation>`.
    pub fn into_vec(self) -> Vec<Violation> {
        self.0.into_vec()
    }

    /// The most severe classification among the members.
    pub fn classification(&self) -> ErrorClassification {
        self.iter()
            .map(Violation::classification)
            .fold(self.first().classification(), Ord::max)
    }
}

impl Semigroup for Violations {
    fn combine(self, other: Self) -> Self {
        Violations(self.0.combine(other.0))
    }
}

/// Renders the first message, followed by ` (and N more)` for the rest.
impl Display for Violations {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.first())?;
        let more = self.len() - 1;
        if more > 0 {
            write!(f, " (and {} more)", more)?;
        }
        Ok(())
    }
}

impl std::error::Error for Violations {}

impl IntoIterator for Violations {
    type Item = Violation;
    type IntoIter = std::vec::IntoIter<Violation>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_vec().into_iter()
    }
}

impl<'a> IntoIterator for &'a Violations {
    type Item = &'a Violation;
    type IntoIter = Box<dyn Iterator<Item = &'a Violation> + 'a>;

    fn into_iter(self) -> Self::IntoIter {
        Box::new(self.0.iter())
    }
}

const _: () = {
    const fn assert_send<T: Send>() {}
    const fn assert_sync<T: Sync>() {}
    assert_send::<ValidationError>();
    assert_sync::<ValidationError>();
};

/// Joins errors into one, flattening any that are already joined.
///
/// `None` inputs are dropped. Returns `None` when nothing remains, the single
/// remaining error unchanged when there is exactly one, and otherwise a
/// [`ValidationError::Joined`] in first-seen order.
///
/// ```rust
/// use faultline::{join, ErrorCode, Path, ValidationError, Violation};
///
/// let a: ValidationError = Violation::new(ErrorCode::MIN, Path::from_field("a"), "a").into();
/// let b: ValidationError = Violation::new(ErrorCode::MAX, Path::from_field("b"), "b").into();
/// let c: ValidationError = Violation::new(ErrorCode::TYPE, Path::from_field("c"), "c").into();
///
/// let ab = join([Some(a.clone()), None, Some(b)]).unwrap();
/// let abc = join([ab, c]).unwrap();
/// assert_eq!(abc.len(), 3);
///
/// assert_eq!(join([a.clone()]), Some(a));
/// assert_eq!(join(Vec::<ValidationError>::new()), None);
/// ```
pub fn join<I, E>(errors: I) -> Option<ValidationError>
where
    I: IntoIterator<Item = E>,
    E: Into<Option<ValidationError>>,
{
    errors
        .into_iter()
        .filter_map(Into::<Option<ValidationError>>::into)
        .fold(None, |acc: Option<ValidationError>, err| {
            Some(match acc {
                Some(acc) => acc.combine(err),
                None => err,
            })
        })
        .map(|err| match err {
            ValidationError::Joined(vs) => ValidationError::from(vs),
            single => single,
        })
}

/// Joins type-erased errors, dropping any that are not validation errors.
pub fn join_foreign<I>(errors: I) -> Option<ValidationError>
where
    I: IntoIterator<Item = Box<dyn std::error::Error + Send + Sync>>,
{
    join(errors.into_iter().map(|err| match ValidationError::try_from(err) {
        Ok(validation) => Some(validation),
        Err(rejected) => {
            tracing::trace!(error = %rejected, "dropping non-validation error from join");
            None
        }
    }))
}

/// Returns every violation in `err`: none for `None`, itself for a single
/// error, the member list for a joined error.
pub fn unwrap(err: Option<&ValidationError>) -> Vec<&Violation> {
    err.map(ValidationError::violations).unwrap_or_default()
}

/// Violations in `err` whose default-format path equals `path`, or None.
pub fn for_path(err: Option<&ValidationError>, path: &str) -> Option<ValidationError> {
    err.and_then(|e| e.for_path(path))
}

/// Violations in `err` whose path rendered with `serializer` equals `path`, or None.
pub fn for_path_as(
    err: Option<&ValidationError>,
    path: &str,
    serializer: &dyn PathSerializer,
) -> Option<ValidationError> {
    err.and_then(|e| e.for_path_as(path, serializer))
}
