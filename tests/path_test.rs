//! Integration tests for Path and the path serializers.

use faultline::{
    DefaultSerializer, DotNotation, JsonPathSerializer, JsonPointer, Path, PathSegment,
    PathSerializer,
};

fn field(name: &str) -> PathSegment {
    PathSegment::field(name)
}

fn index(idx: usize) -> PathSegment {
    PathSegment::index(idx)
}

#[test]
fn test_path_construction_and_display() {
    // Root path
    assert_eq!(Path::root().to_string(), "");

    // Simple field
    assert_eq!(Path::root().push_field("name").to_string(), "/name");

    // Simple index
    assert_eq!(Path::root().push_index(0).to_string(), "0");

    // Complex nested path
    let path = Path::root()
        .push_field("users")
        .push_index(0)
        .push_field("address")
        .push_field("city");
    assert_eq!(path.to_string(), "/users/0/address/city");
}

#[test]
fn test_path_segments_preserved() {
    let path = Path::root()
        .push_field("data")
        .push_index(42)
        .push_field("value");

    let segments: Vec<&PathSegment> = path.segments();
    assert_eq!(segments.len(), 3);

    match segments[0] {
        PathSegment::Field(name) => assert_eq!(name, "data"),
        _ => panic!("Expected Field segment"),
    }

    match segments[1] {
        PathSegment::Index(idx) => assert_eq!(*idx, 42),
        _ => panic!("Expected Index segment"),
    }

    match segments[2] {
        PathSegment::Field(name) => assert_eq!(name, "value"),
        _ => panic!("Expected Field segment"),
    }
}

#[test]
fn test_path_is_immutable() {
    let base = Path::root().push_field("items");

    let path1 = base.push_index(0);
    let path2 = base.push_index(1);
    let path3 = base.push_field("count");

    // Base path unchanged
    assert_eq!(base.to_string(), "/items");

    // Each branch is independent
    assert_eq!(path1.to_string(), "/items/0");
    assert_eq!(path2.to_string(), "/items/1");
    assert_eq!(path3.to_string(), "/items/count");
}

#[test]
fn test_path_parent_chain() {
    let path = Path::root()
        .push_field("a")
        .push_field("b")
        .push_index(0);

    let parent1 = path.parent().expect("should have parent");
    assert_eq!(parent1.to_string(), "/a/b");

    let parent2 = parent1.parent().expect("should have parent");
    assert_eq!(parent2.to_string(), "/a");

    let parent3 = parent2.parent().expect("should have parent");
    assert!(parent3.is_root());

    assert!(parent3.parent().is_none());
}

#[test]
fn test_default_serializer_table() {
    let cases = [
        (Path::from_segments([field("a"), field("b")]), "/a/b"),
        (Path::from_segments([index(0), index(1)]), "0/1"),
        (Path::from_segments([field("a"), field("b"), index(0)]), "/a/b/0"),
        (Path::root(), ""),
    ];

    for (path, expected) in cases {
        assert_eq!(path.to_string_as(&DefaultSerializer), expected);
        assert_eq!(path.to_string(), expected);
    }
}

#[test]
fn test_json_pointer_table() {
    let two = Path::root().push_field("a/b").push_field("c~d");
    assert_eq!(two.to_string_as(&JsonPointer), "/a~1b/c~0d");
    assert_eq!(Path::from_field("m~n").to_string_as(&JsonPointer), "/m~0n");
    assert_eq!(Path::from_field("a/b").to_string_as(&JsonPointer), "/a~1b");
    assert_eq!(Path::from_index(0).to_string_as(&JsonPointer), "/0");
    assert_eq!(Path::root().to_string_as(&JsonPointer), "");
}

#[test]
fn test_json_path_table() {
    let ab = Path::root().push_field("a").push_field("b");
    assert_eq!(ab.to_string_as(&JsonPathSerializer), "$.a.b");
    assert_eq!(ab.push_index(0).to_string_as(&JsonPathSerializer), "$.a.b[0]");
    assert_eq!(
        Path::from_field("field.name").to_string_as(&JsonPathSerializer),
        "$['field.name']"
    );
}

#[test]
fn test_json_path_root_differs_from_other_formats() {
    let root = Path::root();
    assert_eq!(root.to_string_as(&JsonPathSerializer), "$");
    assert_eq!(root.to_string_as(&DefaultSerializer), "");
    assert_eq!(root.to_string_as(&JsonPointer), "");
    assert_eq!(root.to_string_as(&DotNotation), "");
}

#[test]
fn test_dot_notation_table() {
    let path = Path::root()
        .push_field("users")
        .push_index(0)
        .push_field("name");
    assert_eq!(path.to_string_as(&DotNotation), "users[0].name");
    assert_eq!(
        Path::from_field("field.name").to_string_as(&DotNotation),
        "['field.name']"
    );
}

#[test]
fn test_serializers_are_interchangeable_trait_objects() {
    let serializers = [
        (&DefaultSerializer as &dyn PathSerializer, "/users/3"),
        (&JsonPointer as &dyn PathSerializer, "/users/3"),
        (&JsonPathSerializer as &dyn PathSerializer, "$.users[3]"),
        (&DotNotation as &dyn PathSerializer, "users[3]"),
    ];
    let path = Path::root().push_field("users").push_index(3);

    for (serializer, expected) in serializers {
        assert_eq!(path.to_string_as(serializer), expected);
    }
}

#[test]
fn test_consecutive_indices() {
    let path = Path::root().push_index(0).push_index(1).push_index(2);
    assert_eq!(path.to_string(), "0/1/2");
    assert_eq!(path.to_string_as(&DotNotation), "[0][1][2]");
}

#[test]
fn test_path_hash() {
    use std::collections::HashSet;

    let mut set = HashSet::new();
    set.insert(Path::root().push_field("a"));
    set.insert(Path::root().push_field("b"));
    set.insert(Path::from_field("a")); // duplicate, built separately

    assert_eq!(set.len(), 2);
}

#[test]
fn test_deep_path_segments_are_linear() {
    let mut path = Path::root();
    for i in 0..1_000 {
        path = path.push_index(i);
    }
    let segments = path.segments();
    assert_eq!(segments.len(), 1_000);
    assert_eq!(segments[0], &PathSegment::Index(0));
    assert_eq!(segments[999], &PathSegment::Index(999));
}

#[test]
fn test_dropping_very_deep_path_does_not_overflow() {
    let mut path = Path::root();
    for i in 0..100_000 {
        path = path.push_index(i);
    }
    assert_eq!(path.len(), 100_000);
    drop(path);

    // A deep branch off a shared prefix leaves the prefix intact.
    let shared = Path::root().push_field("root");
    let mut deep = shared.clone();
    for i in 0..100_000 {
        deep = deep.push_index(i);
    }
    drop(deep);
    assert_eq!(shared.to_string(), "/root");
}
