//! Textual renderings of a [`Path`](super::Path).
//!
//! Each serializer is a stateless, pure function of the root-to-leaf segment
//! sequence. They never consult error codes, configuration or dictionaries.
//!
//! | segments               | Default    | JSON Pointer | JSONPath     | Dot notation     |
//! |------------------------|------------|--------------|--------------|------------------|
//! | (none)                 | (empty)    | (empty)      | `$`          | (empty)          |
//! | `a`, `b`               | `/a/b`     | `/a/b`       | `$.a.b`      | `a.b`            |
//! | `0`, `1`               | `0/1`      | `/0/1`       | `$[0][1]`    | `[0][1]`         |
//! | `users`, `0`, `name`   | `/users/0/name` | `/users/0/name` | `$.users[0].name` | `users[0].name` |
//! | `field.name`           | `/field.name` | `/field.name` | `$['field.name']` | `['field.name']` |

use std::fmt::Write;

use super::PathSegment;

/// Renders an ordered segment sequence as text.
///
/// Closures with the matching signature are serializers too:
///
/// ```rust
/// use faultline::{Path, PathSegment};
///
/// let upper = |segments: &[&PathSegment]| {
///     segments
///         .iter()
///         .map(|s| match s {
///             PathSegment::Field(name) => name.to_uppercase(),
///             PathSegment::Index(i) => i.to_string(),
///         })
///         .collect::<Vec<_>>()
///         .join(">")
/// };
///
/// let path = Path::root().push_field("a").push_index(3);
/// assert_eq!(path.to_string_as(&upper), "A>3");
/// ```
pub trait PathSerializer {
    /// Serializes root-to-leaf ordered segments.
    fn serialize(&self, segments: &[&PathSegment]) -> String;
}

impl<F> PathSerializer for F
where
    F: Fn(&[&PathSegment]) -> String,
{
    fn serialize(&self, segments: &[&PathSegment]) -> String {
        self(segments)
    }
}

/// The library's native format: `/a/b/0`.
///
/// Every field segment is preceded by `/`. When the first segment is an index
/// no leading slash is written for the whole path (`0/1`).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DefaultSerializer;

impl PathSerializer for DefaultSerializer {
    fn serialize(&self, segments: &[&PathSegment]) -> String {
        let mut out = String::new();
        for (i, segment) in segments.iter().enumerate() {
            match segment {
                PathSegment::Field(name) => {
                    out.push('/');
                    out.push_str(name);
                }
                PathSegment::Index(idx) => {
                    if i > 0 {
                        out.push('/');
                    }
                    let _ = write!(out, "{}", idx);
                }
            }
        }
        out
    }
}

/// RFC 6901 JSON Pointer: `/a~1b/c~0d/0`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct JsonPointer;

impl PathSerializer for JsonPointer {
    fn serialize(&self, segments: &[&PathSegment]) -> String {
        let mut out = String::new();
        for segment in segments {
            out.push('/');
            match segment {
                PathSegment::Field(name) => out.push_str(&escape_pointer_token(name)),
                PathSegment::Index(idx) => {
                    let _ = write!(out, "{}", idx);
                }
            }
        }
        out
    }
}

/// Escapes one reference token. `~` must be replaced before `/`.
fn escape_pointer_token(token: &str) -> String {
    token.replace('~', "~0").replace('/', "~1")
}

/// JSONPath: `$.a.b[0]`, with bracket notation for names that need quoting.
///
/// The empty path renders as `$`, the whole document.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct JsonPathSerializer;

impl PathSerializer for JsonPathSerializer {
    fn serialize(&self, segments: &[&PathSegment]) -> String {
        let mut out = String::from("$");
        for segment in segments {
            match segment {
                PathSegment::Field(name) if needs_brackets(name) => push_bracketed(&mut out, name),
                PathSegment::Field(name) => {
                    out.push('.');
                    out.push_str(name);
                }
                PathSegment::Index(idx) => {
                    let _ = write!(out, "[{}]", idx);
                }
            }
        }
        out
    }
}

/// Dot notation: `users[0].name`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DotNotation;

impl PathSerializer for DotNotation {
    fn serialize(&self, segments: &[&PathSegment]) -> String {
        let mut out = String::new();
        for (i, segment) in segments.iter().enumerate() {
            match segment {
                PathSegment::Field(name) if needs_brackets(name) => push_bracketed(&mut out, name),
                PathSegment::Field(name) => {
                    if i > 0 {
                        out.push('.');
                    }
                    out.push_str(name);
                }
                PathSegment::Index(idx) => {
                    let _ = write!(out, "[{}]", idx);
                }
            }
        }
        out
    }
}

fn needs_brackets(name: &str) -> bool {
    name.contains(&['.', '[', ']'][..])
}

fn push_bracketed(out: &mut String, name: &str) {
    out.push_str("['");
    out.push_str(&name.replace('\'', "\\'"));
    out.push_str("']");
}
