//! Paths locating values in nested structures.
//!
//! This module provides [`Path`] and [`PathSegment`] for recording where in a
//! nested value an error occurred, and the [`serializers`] that render a path
//! in several textual conventions.
//!
//! A [`Path`] is a handle to the terminal (leaf) node of a singly linked,
//! parent-pointing chain. Pushing a segment allocates one node that shares its
//! parent with every other path built from the same prefix, so branching during
//! traversal never copies the chain.

pub mod serializers;

use std::fmt::{self, Debug, Display};
use std::hash::{Hash, Hasher};
use std::sync::Arc;

pub use serializers::{DefaultSerializer, DotNotation, JsonPathSerializer, JsonPointer, PathSerializer};

/// A segment of a path.
///
/// Paths are built from segments that represent either field access or array indexing.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PathSegment {
    /// A field/property access (e.g., `user`, `email`)
    Field(String),
    /// An array index access (e.g., `[0]`, `[42]`)
    Index(usize),
}

impl PathSegment {
    /// Creates a new field segment.
    pub fn field(name: impl Into<String>) -> Self {
        PathSegment::Field(name.into())
    }

    /// Creates a new index segment.
    pub fn index(idx: usize) -> Self {
        PathSegment::Index(idx)
    }

    /// Returns true if this is an index segment.
    pub fn is_index(&self) -> bool {
        matches!(self, PathSegment::Index(_))
    }
}

impl From<&str> for PathSegment {
    fn from(name: &str) -> Self {
        PathSegment::Field(name.to_string())
    }
}

impl From<String> for PathSegment {
    fn from(name: String) -> Self {
        PathSegment::Field(name)
    }
}

impl From<usize> for PathSegment {
    fn from(idx: usize) -> Self {
        PathSegment::Index(idx)
    }
}

struct Node {
    segment: PathSegment,
    parent: Path,
}

/// A path to a value in a nested structure.
///
/// `Path` represents locations like `/users/0/email` and provides methods for
/// building paths incrementally. Nodes are immutable once created.
///
/// # Example
///
/// ```rust
/// use faultline::{JsonPointer, Path};
///
/// let path = Path::root()
///     .push_field("users")
///     .push_index(0)
///     .push_field("email");
///
/// assert_eq!(path.to_string(), "/users/0/email");
/// assert_eq!(path.to_string_as(&JsonPointer), "/users/0/email");
/// ```
#[derive(Clone, Default)]
pub struct Path {
    leaf: Option<Arc<Node>>,
}

impl Path {
    /// Creates an empty path representing the root value.
    pub fn root() -> Self {
        Self::default()
    }

    /// Creates a path from a single field segment.
    pub fn from_field(name: impl Into<String>) -> Self {
        Self::root().push_field(name)
    }

    /// Creates a path from a single index segment.
    pub fn from_index(idx: usize) -> Self {
        Self::root().push_index(idx)
    }

    /// Creates a path from root-to-leaf ordered segments.
    ///
    /// ```rust
    /// use faultline::{Path, PathSegment};
    ///
    /// let path = Path::from_segments([PathSegment::from("a"), PathSegment::from(0)]);
    /// assert_eq!(path.to_string(), "/a/0");
    /// ```
    pub fn from_segments<I>(segments: I) -> Self
    where
        I: IntoIterator<Item = PathSegment>,
    {
        segments
            .into_iter()
            .fold(Self::root(), |path, segment| path.push(segment))
    }

    /// Returns a new path with `segment` appended.
    ///
    /// The receiver is untouched and shares its nodes with the result.
    pub fn push(&self, segment: PathSegment) -> Self {
        Self {
            leaf: Some(Arc::new(Node {
                segment,
                parent: self.clone(),
            })),
        }
    }

    /// Returns a new path with a field segment appended.
    pub fn push_field(&self, name: impl Into<String>) -> Self {
        self.push(PathSegment::Field(name.into()))
    }

    /// Returns a new path with an index segment appended.
    pub fn push_index(&self, index: usize) -> Self {
        self.push(PathSegment::Index(index))
    }

    /// Returns true if this is the root path (no segments).
    pub fn is_root(&self) -> bool {
        self.leaf.is_none()
    }

    /// Returns true if this path has no segments.
    pub fn is_empty(&self) -> bool {
        self.is_root()
    }

    /// Returns the number of segments in this path.
    pub fn len(&self) -> usize {
        self.nodes().count()
    }

    /// Returns the segments ordered from root to leaf.
    ///
    /// Walks the parent links once and reverses once.
    pub fn segments(&self) -> Vec<&PathSegment> {
        let mut segments: Vec<&PathSegment> = self.nodes().map(|node| &node.segment).collect();
        segments.reverse();
        segments
    }

    /// Returns the parent path (all segments except the last), or None if this is root.
    pub fn parent(&self) -> Option<Self> {
        self.leaf.as_ref().map(|node| node.parent.clone())
    }

    /// Returns the last segment, or None if this is root.
    pub fn last(&self) -> Option<&PathSegment> {
        self.leaf.as_deref().map(|node| &node.segment)
    }

    /// Renders this path with the given serializer.
    pub fn to_string_as(&self, serializer: &dyn PathSerializer) -> String {
        serializer.serialize(&self.segments())
    }

    /// Iterates nodes from leaf to root.
    fn nodes(&self) -> impl Iterator<Item = &Node> {
        std::iter::successors(self.leaf.as_deref(), |node| node.parent.leaf.as_deref())
    }
}

/// Unlinks the chain iteratively so dropping a deep path uses constant stack.
///
/// Stops at the first node still referenced by another path.
impl Drop for Path {
    fn drop(&mut self) {
        let mut next = self.leaf.take();
        while let Some(node) = next {
            next = match Arc::into_inner(node) {
                Some(mut node) => node.parent.leaf.take(),
                None => None,
            };
        }
    }
}

impl PartialEq for Path {
    fn eq(&self, other: &Self) -> bool {
        match (&self.leaf, &other.leaf) {
            (Some(a), Some(b)) if Arc::ptr_eq(a, b) => true,
            _ => self.nodes().map(|n| &n.segment).eq(other.nodes().map(|n| &n.segment)),
        }
    }
}

impl Eq for Path {}

impl Hash for Path {
    fn hash<H: Hasher>(&self, state: &mut H) {
        for node in self.nodes() {
            node.segment.hash(state);
        }
    }
}

impl Debug for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Path").field(&self.segments()).finish()
    }
}

/// Renders the path with [`DefaultSerializer`].
impl Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_string_as(&DefaultSerializer))
    }
}

// Paths are shared between errors built on different threads.
const _: () = {
    const fn assert_send<T: Send>() {}
    const fn assert_sync<T: Sync>() {}
    assert_send::<Path>();
    assert_sync::<Path>();
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_root_path_is_empty() {
        let path = Path::root();
        assert!(path.is_root());
        assert!(path.is_empty());
        assert_eq!(path.len(), 0);
        assert!(path.segments().is_empty());
        assert_eq!(path.to_string(), "");
    }

    #[test]
    fn test_drop_keeps_shared_prefix() {
        let base = Path::root().push_field("a").push_field("b");
        let branch = base.push_index(0).push_index(1);
        drop(branch);

        assert_eq!(base.to_string(), "/a/b");
        assert_eq!(base.parent().map(|p| p.to_string()), Some("/a".to_string()));
    }

    #[test]
    fn test_single_field() {
        let path = Path::root().push_field("user");
        assert_eq!(path.to_string(), "/user");
        assert_eq!(path.len(), 1);
    }

    #[test]
    fn test_single_index() {
        let path = Path::root().push_index(0);
        assert_eq!(path.to_string(), "0");
    }

    #[test]
    fn test_segments_are_root_to_leaf() {
        let path = Path::root()
            .push_field("a")
            .push_index(1)
            .push_field("b");

        let segments = path.segments();
        assert_eq!(segments.len(), 3);
        assert_eq!(segments[0], &PathSegment::Field("a".to_string()));
        assert_eq!(segments[1], &PathSegment::Index(1));
        assert_eq!(segments[2], &PathSegment::Field("b".to_string()));
    }

    #[test]
    fn test_path_immutability() {
        let base = Path::root().push_field("users");
        let path_a = base.push_index(0);
        let path_b = base.push_index(1);

        assert_eq!(base.to_string(), "/users");
        assert_eq!(path_a.to_string(), "/users/0");
        assert_eq!(path_b.to_string(), "/users/1");
    }

    #[test]
    fn test_branches_share_parent_nodes() {
        let base = Path::root().push_field("users");
        let child = base.push_index(0);

        let parent = child.parent().unwrap();
        match (&parent.leaf, &base.leaf) {
            (Some(a), Some(b)) => assert!(Arc::ptr_eq(a, b)),
            _ => panic!("expected non-root paths"),
        }
    }

    #[test]
    fn test_parent_path() {
        let path = Path::root()
            .push_field("users")
            .push_index(0)
            .push_field("email");

        let parent = path.parent().unwrap();
        assert_eq!(parent.to_string(), "/users/0");

        let grandparent = parent.parent().unwrap();
        assert_eq!(grandparent.to_string(), "/users");

        let root = grandparent.parent().unwrap();
        assert!(root.is_root());

        assert!(root.parent().is_none());
    }

    #[test]
    fn test_last_segment() {
        let path = Path::root().push_field("users").push_index(0);
        assert_eq!(path.last(), Some(&PathSegment::Index(0)));

        let root = Path::root();
        assert_eq!(root.last(), None);
    }

    #[test]
    fn test_from_segments_matches_push() {
        let built = Path::root().push_field("a").push_index(2);
        let collected = Path::from_segments(vec![PathSegment::field("a"), PathSegment::index(2)]);
        assert_eq!(built, collected);
    }

    #[test]
    fn test_equality_is_structural() {
        let path1 = Path::root().push_field("a").push_index(0);
        let path2 = Path::root().push_field("a").push_index(0);
        let path3 = Path::root().push_field("a").push_index(1);

        assert_eq!(path1, path2);
        assert_ne!(path1, path3);
        assert_ne!(path1, Path::root());
        assert_eq!(Path::root(), Path::root());
    }

    #[test]
    fn test_field_and_index_differ() {
        assert_ne!(Path::from_field("0"), Path::from_index(0));
    }

    #[test]
    fn test_debug_lists_segments() {
        let path = Path::root().push_field("test").push_index(0);
        let debug = format!("{:?}", path);
        assert!(debug.contains("Path"));
        assert!(debug.contains("Field"));
        assert!(debug.contains("Index"));
    }
}
