//! Unit tests for the small building blocks of nodewire.
mod common;
use nodewire::error::{AnalysisError, GenerationError, GraphError, SkipReason};
use nodewire::prelude::*;
use nodewire::registry::IntoDescriptor;
use nodewire::serializer::hcl::{comment, quote};
use serde_json::json;
use std::path::PathBuf;

#[test]
fn test_slugify() {
    assert_eq!(slugify("IF Node!"), "if-node");
    assert_eq!(slugify("--A--"), "a");
    assert_eq!(slugify(""), "");
    assert_eq!(slugify("Split In Batches"), "split-in-batches");
    assert_eq!(slugify("HTTP Request (v2)"), "http-request-v2");
    assert_eq!(slugify("!!!"), "");
}

#[test]
fn test_slugify_is_idempotent() {
    for text in ["Compare Datasets", "  Google Sheets  ", "a__b", "Ünïcode"] {
        let once = slugify(text);
        assert_eq!(slugify(&once), once);
    }
}

#[test]
fn test_category_parsing() {
    assert_eq!("Trigger".parse::<Category>(), Ok(Category::Trigger));
    assert_eq!("Database".parse::<Category>(), Ok(Category::Database));
    assert_eq!("trigger".parse::<Category>(), Err("trigger".to_string()));
    assert!(Category::Trigger.is_trigger());
    assert!(!Category::Core.is_trigger());
    assert_eq!(Category::Integration.to_string(), "Integration");
}

#[test]
fn test_descriptor_conversion() {
    let entry = json!({
        "name": "Postgres",
        "type": "postgres",
        "category": "Database",
        "inputs": ["main"],
        "outputs": ["main"],
        "description": "  ",
        "latest_version": 2
    });
    let descriptor = entry.into_descriptor().unwrap();
    assert_eq!(descriptor.name, "Postgres");
    assert_eq!(descriptor.node_type, "postgres");
    assert_eq!(descriptor.category, Category::Database);
    assert_eq!(descriptor.description, None);
    assert_eq!(descriptor.latest_version, Some(2));
}

#[test]
fn test_descriptor_conversion_skip_reasons() {
    let cases = [
        (json!([1, 2]), SkipReason::NotAnObject),
        (
            json!({"type": "x", "category": "Core", "inputs": [], "outputs": ["main"]}),
            SkipReason::MissingField("name"),
        ),
        (
            json!({"name": "X", "type": 3, "category": "Core", "inputs": [], "outputs": ["main"]}),
            SkipReason::InvalidField {
                field: "type",
                expected: "a string",
            },
        ),
        (
            json!({"name": "X", "type": "x", "category": "Other", "inputs": [], "outputs": ["main"]}),
            SkipReason::UnknownCategory("Other".to_string()),
        ),
        (
            json!({"name": "X", "type": "x", "category": "Core", "inputs": "main", "outputs": ["main"]}),
            SkipReason::InvalidField {
                field: "inputs",
                expected: "an array of strings",
            },
        ),
        (
            json!({"name": "X", "type": "x", "category": "Core", "inputs": [], "outputs": []}),
            SkipReason::Empty("outputs"),
        ),
        (
            json!({"name": " ", "type": "x", "category": "Core", "inputs": [], "outputs": ["main"]}),
            SkipReason::Empty("name"),
        ),
        (
            json!({"name": "X", "type": "x\ty", "category": "Core", "inputs": [], "outputs": ["main"]}),
            SkipReason::InvalidField {
                field: "type",
                expected: "a single line of text",
            },
        ),
    ];

    for (entry, expected) in cases {
        assert_eq!(entry.into_descriptor(), Err(expected));
    }
}

#[test]
fn test_quote_escapes_hcl_literals() {
    assert_eq!(quote("plain"), "\"plain\"");
    assert_eq!(quote("say \"hi\""), "\"say \\\"hi\\\"\"");
    assert_eq!(quote("a\\b"), "\"a\\\\b\"");
    assert_eq!(quote("line\nbreak"), "\"line\\nbreak\"");
    assert_eq!(quote("${var.x}"), "\"$${var.x}\"");
    assert_eq!(quote("%{ if }"), "\"%%{ if }\"");
}

#[test]
fn test_comment_stays_on_one_line() {
    assert_eq!(comment("IF"), "IF");
    assert_eq!(comment("IF\n# Type: x"), "IF # Type: x");
    assert_eq!(comment("a\r\tb"), "a  b");
}

#[test]
fn test_error_display() {
    let err = GraphError::PortWiring {
        direction: "output",
        index: 1,
        count: 0,
    };
    assert_eq!(
        err.to_string(),
        "output[1] is wired 0 times, expected exactly once"
    );

    let err = GenerationError::DuplicateTarget(PathBuf::from("out/core/if"));
    assert!(err.to_string().contains("out/core/if"));

    let err = GenerationError::from(GraphError::TestedNodeCount(2));
    assert!(err.to_string().contains("exactly one tested node, found 2"));

    assert_eq!(
        AnalysisError::MissingTypeHeader.to_string(),
        "Could not determine node type"
    );

    assert_eq!(
        SkipReason::UnknownCategory("Utility".to_string()).to_string(),
        "unknown category 'Utility'"
    );
}

#[test]
fn test_coverage_status_display() {
    assert_eq!(CoverageStatus::Ok.to_string(), "ok");
    assert_eq!(CoverageStatus::Complete.to_string(), "complete");
    assert_eq!(CoverageStatus::Incomplete.to_string(), "incomplete");
    assert!(CoverageStatus::Ok.is_covered());
    assert!(!CoverageStatus::Incomplete.is_covered());
}
