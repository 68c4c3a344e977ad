//! Integration tests for deserializing conditions and exclude lists.

#![cfg(feature = "serde")]

use filters::{Condition, Dimension, ExcludeList, evaluate};
use item::Item;
use std::path::Path;

// ============================================================================
// Condition Shapes
// ============================================================================

/// Verifies a bare boolean deserializes as a literal condition.
#[test]
fn boolean_is_literal() {
    let condition: Condition = serde_json::from_str("false").unwrap();
    assert!(matches!(condition, Condition::Literal(false)));
}

/// Verifies a table of dimensions deserializes as options.
#[test]
fn table_is_options() {
    let condition: Condition = serde_json::from_str(
        r#"{"extensions": ".md", "names_contains": ["guide", "intro"], "max_size": 10}"#,
    )
    .unwrap();
    let Condition::Options(options) = &condition else {
        panic!("expected options, got {condition:?}");
    };
    assert_eq!(options.extensions.as_deref(), Some(&[".md".to_owned()][..]));
    assert_eq!(options.names_contains.as_ref().map(Vec::len), Some(2));
    assert!(Dimension::MaxSize.is_set(options));
    assert!(!Dimension::Custom.is_set(options));

    let guide = Item::new("/d/guide.md", "guide.md").with_contents("short");
    assert!(evaluate(&guide, &condition));
}

/// Verifies date bounds accept both accepted formats.
#[test]
fn date_bounds_parse_from_strings() {
    let condition: Condition = serde_json::from_str(
        r#"{"modified_after": "2024-01-01", "created_before": "2024-06-01T12:00:00+02:00"}"#,
    )
    .unwrap();
    let Condition::Options(options) = condition else {
        panic!("expected options");
    };
    assert!(options.modified_after.is_some());
    assert!(options.created_before.is_some());
}

/// Verifies malformed dates and unknown keys are rejected.
#[test]
fn invalid_tables_are_rejected() {
    assert!(serde_json::from_str::<Condition>(r#"{"modified_after": "last week"}"#).is_err());
    assert!(serde_json::from_str::<Condition>(r#"{"extension": ["txt"]}"#).is_err());
    assert!(serde_json::from_str::<Condition>(r#"{"custom": true}"#).is_err());
}

// ============================================================================
// Exclude Lists
// ============================================================================

/// Verifies exclude lists deserialize and classify patterns.
#[test]
fn exclude_list_from_strings() {
    let list: ExcludeList = serde_json::from_str(r#"[".git", "*.tmp"]"#).unwrap();
    assert!(list.excludes(Path::new(".git/config")));
    assert!(list.excludes(Path::new("cache/x.tmp")));
    assert!(!list.excludes(Path::new("src/lib.rs")));
}

/// Verifies a bad glob surfaces as a deserialization error.
#[test]
fn exclude_list_rejects_bad_glob() {
    let error = serde_json::from_str::<ExcludeList>(r#"["a[b"]"#).unwrap_err();
    assert!(error.to_string().contains("a[b"));
}
