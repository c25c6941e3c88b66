//! Integration tests for Violation and ValidationError.

use faultline::{
    ErrorClassification, ErrorCode, ErrorConfig, JsonPathSerializer, Path, ValidationContext,
    ValidationError, ValidationResult, Violation,
};
use serde_json::json;
use stillwater::prelude::*;
use stillwater::Validation;

fn violation(field: &str, message: &str) -> ValidationError {
    Violation::new(ErrorCode::REQUIRED, Path::from_field(field), message).into()
}

#[test]
fn test_violation_full_context() {
    let v = Violation::new("invalid_email", Path::from_field("email"), "invalid email format")
        .with_short("bad email")
        .with_docs_uri("https://docs.example.com/email")
        .with_trace_uri("https://trace.example.com/abc")
        .with_meta("got", "not-an-email")
        .with_params(vec![json!("not-an-email")]);

    assert_eq!(v.path().to_string(), "/email");
    assert_eq!(v.message(), "invalid email format");
    assert_eq!(v.short_error(), "bad email");
    assert_eq!(v.code(), "invalid_email");
    assert_eq!(v.docs_uri(), Some("https://docs.example.com/email"));
    assert_eq!(v.trace_uri(), Some("https://trace.example.com/abc"));
    assert_eq!(v.meta().get("got"), Some(&json!("not-an-email")));
    assert_eq!(v.params(), &[json!("not-an-email")]);
    assert!(v.is_validation());
}

#[test]
fn test_violation_short_defaults_to_message() {
    let v = Violation::new(ErrorCode::NULL, Path::root(), "value cannot be null");
    assert_eq!(v.short_error(), "value cannot be null");
    assert_eq!(v.classification(), ErrorClassification::Validation);
}

#[test]
fn test_errorf_renders_template_at_context_path() {
    let ctx = ValidationContext::new().with_field("a").with_field("b");
    let err = ValidationError::errorf(
        ErrorCode::MIN,
        &ctx,
        "below minimum",
        "must be at least {}",
        vec![json!(10)],
    );

    assert_eq!(err.code(), &ErrorCode::MIN);
    assert_eq!(err.path().to_string(), "/a/b");
    assert_eq!(err.short_error(), "below minimum");
    assert_eq!(err.to_string(), "must be at least 10");
    assert_eq!(err.params(), &[json!(10)]);
    assert_eq!(err.len(), 1);
}

#[test]
fn test_from_code_uses_dictionary() {
    let ctx = ValidationContext::new().with_field("tags").with_index(2);
    let err = ValidationError::from_code(ErrorCode::MAX_LEN, &ctx, vec![json!(16)]);

    assert_eq!(err.short_error(), "too long");
    assert_eq!(err.to_string(), "must have a length of at most 16");
    assert_eq!(err.path_as(&JsonPathSerializer), "$.tags[2]");
}

#[test]
fn test_from_code_with_string_params_renders_unquoted() {
    let ctx = ValidationContext::new().with_field("age");
    let err = ValidationError::from_code(
        ErrorCode::TYPE,
        &ctx,
        vec![json!("integer"), json!("string")],
    );
    assert_eq!(err.to_string(), "expected integer but got string");
}

#[test]
fn test_unknown_code_is_internal() {
    let ctx = ValidationContext::new();
    let err = ValidationError::from_code("SOMETHING_NEW", &ctx, vec![]);

    assert!(err.is_internal());
    assert_eq!(err.short_error(), "unknown error");
    assert_eq!(err.code(), "SOMETHING_NEW");
}

#[test]
fn test_config_overrides_apply() {
    let ctx = ValidationContext::new().with_field("age").with_error_config(
        ErrorConfig::new()
            .with_short("too young")
            .with_long("you must be {} or older")
            .with_docs_uri("https://docs.example.com/age")
            .with_meta("rule", "adult"),
    );
    let err = ValidationError::from_code(ErrorCode::MIN, &ctx, vec![json!(18)]);

    assert_eq!(err.short_error(), "too young");
    assert_eq!(err.to_string(), "you must be 18 or older");
    assert_eq!(err.docs_uri(), Some("https://docs.example.com/age"));
    assert_eq!(err.meta().get("rule"), Some(&json!("adult")));
    assert_eq!(err.code(), &ErrorCode::MIN);
}

#[test]
fn test_config_code_override_changes_classification() {
    let ctx = ValidationContext::new()
        .with_error_config(ErrorConfig::new().with_code(ErrorCode::FORBIDDEN));
    let err = ValidationError::from_code(ErrorCode::MIN, &ctx, vec![json!(1)]);

    assert_eq!(err.code(), &ErrorCode::FORBIDDEN);
    assert!(err.is_permission());
    // Messages still come from the original code's entry.
    assert_eq!(err.to_string(), "must be at least 1");
}

#[test]
fn test_callback_replaces_error() {
    let ctx = ValidationContext::new().with_field("x").with_error_config(
        ErrorConfig::new().with_callback(|ctx, _err| {
            ValidationError::errorf(ErrorCode::CONFLICT, ctx, "rewritten", "rewritten", vec![])
        }),
    );
    let err = ValidationError::from_code(ErrorCode::MIN, &ctx, vec![json!(5)]);

    assert_eq!(err.code(), &ErrorCode::CONFLICT);
    assert_eq!(err.to_string(), "rewritten");
    assert_eq!(err.path().to_string(), "/x");
}

#[test]
fn test_joined_accessors_delegate_to_first() {
    let first: ValidationError = Violation::new(ErrorCode::MIN, Path::from_field("a"), "first")
        .with_docs_uri("https://docs.example.com/a")
        .into();
    let second = violation("b", "second");
    let err = first.combine(second);

    assert_eq!(err.len(), 2);
    assert!(!err.is_empty());
    assert_eq!(err.code(), &ErrorCode::MIN);
    assert_eq!(err.path().to_string(), "/a");
    assert_eq!(err.docs_uri(), Some("https://docs.example.com/a"));
    assert_eq!(err.to_string(), "first (and 1 more)");
}

#[test]
fn test_classification_precedence() {
    let validation = violation("a", "a");
    let permission: ValidationError = Violation::new(ErrorCode::FORBIDDEN, Path::root(), "no")
        .with_classification(ErrorClassification::Permission)
        .into();
    let internal: ValidationError = Violation::new(ErrorCode::INTERNAL, Path::root(), "boom")
        .with_classification(ErrorClassification::Internal)
        .into();

    let vp = validation.clone().combine(permission.clone());
    assert!(vp.is_permission());
    assert!(!vp.is_validation());

    let all = vp.combine(internal);
    assert!(all.is_internal());
    assert!(!all.is_permission());

    assert!(validation.is_validation());
}

#[test]
fn test_errors_combine_via_semigroup() {
    let combined = violation("name", "name is required")
        .combine(violation("email", "email is invalid"))
        .combine(violation("age", "age must be positive"));

    assert_eq!(combined.len(), 3);

    let messages: Vec<&str> = combined.violations().iter().map(|v| v.message()).collect();
    assert_eq!(
        messages,
        vec!["name is required", "email is invalid", "age must be positive"]
    );
}

#[test]
fn test_validation_success() {
    let result: ValidationResult<i32> = Validation::Success(42);

    match result {
        Validation::Success(v) => assert_eq!(v, 42),
        Validation::Failure(_) => panic!("Expected success"),
    }
}

#[test]
fn test_validation_and_accumulates_errors() {
    let v1: ValidationResult<i32> = Validation::Failure(violation("a", "error a"));
    let v2: ValidationResult<i32> = Validation::Failure(violation("b", "error b"));

    let combined = v1.and(v2);

    match combined {
        Validation::Failure(errors) => {
            assert_eq!(errors.len(), 2);
            let paths: Vec<String> = errors
                .violations()
                .iter()
                .map(|v| v.path().to_string())
                .collect();
            assert_eq!(paths, vec!["/a", "/b"]);
        }
        Validation::Success(_) => panic!("Expected failure"),
    }
}

#[test]
fn test_validation_map() {
    let result: ValidationResult<i32> = Validation::Success(10);
    let mapped = result.map(|x| x * 2);

    match mapped {
        Validation::Success(v) => assert_eq!(v, 20),
        Validation::Failure(_) => panic!("Expected success"),
    }
}

#[test]
fn test_validation_error_is_std_error() {
    let err: Box<dyn std::error::Error + Send + Sync> = Box::new(violation("a", "boom"));
    assert_eq!(err.to_string(), "boom");

    let back = ValidationError::try_from(err).expect("should convert back");
    assert_eq!(back.path().to_string(), "/a");
}
