//! Property-based tests for the nested-document matcher using proptest
//!
//! These tests verify traversal determinism, the document-mode result bound,
//! case-insensitivity, and match soundness over randomized JSON documents.

use azq::query::{match_document, MatchMode, MatchResult, Predicate};
use proptest::prelude::*;
use serde_json::{json, Value};

/// Generate arbitrary scalar leaves (strings, numbers, booleans, null)
fn arb_scalar() -> impl Strategy<Value = Value> {
    prop_oneof![
        "[a-zA-Z0-9._-]{0,12}".prop_map(Value::String),
        any::<i32>().prop_map(|n| json!(n)),
        any::<bool>().prop_map(Value::Bool),
        Just(Value::Null),
    ]
}

/// Generate nested JSON values up to a bounded depth
fn arb_value() -> impl Strategy<Value = Value> {
    arb_scalar().prop_recursive(3, 24, 4, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..4).prop_map(Value::Array),
            prop::collection::btree_map("[a-z]{1,8}", inner, 0..4)
                .prop_map(|entries| Value::Object(entries.into_iter().collect())),
        ]
    })
}

/// Generate a resource-shaped document: always an object at the root
fn arb_document() -> impl Strategy<Value = Value> {
    prop::collection::btree_map("[a-z]{1,8}", arb_value(), 0..5)
        .prop_map(|entries| Value::Object(entries.into_iter().collect()))
}

fn field_paths(document: &Value, term: &str) -> Vec<String> {
    match_document(document, &Predicate::new(term), MatchMode::Field)
        .into_iter()
        .map(|result| match result {
            MatchResult::Field(field) => field.path,
            MatchResult::Document(_) => unreachable!("field mode yields field results"),
        })
        .collect()
}

proptest! {
    /// Running the matcher twice on the same tree yields identical output
    #[test]
    fn matching_is_deterministic(
        document in arb_document(),
        term in "[a-z0-9]{1,4}"
    ) {
        let first = match_document(&document, &Predicate::new(&term), MatchMode::Field);
        let second = match_document(&document, &Predicate::new(&term), MatchMode::Field);
        prop_assert_eq!(first, second);
    }

    /// Document mode never yields more than one result per document
    #[test]
    fn document_mode_yields_zero_or_one(
        document in arb_document(),
        term in "[a-z0-9]{0,4}"
    ) {
        let results = match_document(&document, &Predicate::new(&term), MatchMode::Document);
        prop_assert!(results.len() <= 1);
    }

    /// A document matches in Document mode exactly when Field mode finds
    /// at least one key or leaf
    #[test]
    fn document_and_field_modes_agree_on_presence(
        document in arb_document(),
        term in "[a-z0-9]{1,4}"
    ) {
        let doc_hit = !match_document(&document, &Predicate::new(&term), MatchMode::Document)
            .is_empty();
        let field_hits = !match_document(&document, &Predicate::new(&term), MatchMode::Field)
            .is_empty();
        prop_assert_eq!(doc_hit, field_hits);
    }

    /// Matching is case-insensitive: upper- and lowercase terms find the
    /// same set of paths
    #[test]
    fn matching_is_case_insensitive(
        document in arb_document(),
        term in "[a-zA-Z]{1,5}"
    ) {
        let lower = field_paths(&document, &term.to_lowercase());
        let upper = field_paths(&document, &term.to_uppercase());
        prop_assert_eq!(lower, upper);
    }

    /// Every Field-mode result really contains the term in its key or its
    /// stringified value, and paths are unique
    #[test]
    fn field_matches_are_sound_and_unique(
        document in arb_document(),
        term in "[a-z0-9]{1,3}"
    ) {
        let needle = term.to_lowercase();
        let results = match_document(&document, &Predicate::new(&term), MatchMode::Field);

        let mut seen_paths = std::collections::HashSet::new();
        for result in results {
            let MatchResult::Field(field) = result else {
                panic!("field mode yields field results");
            };
            prop_assert!(seen_paths.insert(field.path.clone()),
                "duplicate path {}", field.path);

            let value_text = match &field.value {
                Value::String(s) => Some(s.clone()),
                Value::Number(n) => Some(n.to_string()),
                Value::Bool(b) => Some(b.to_string()),
                _ => None,
            };
            let key_hit = field.key.to_lowercase().contains(&needle);
            let value_hit = value_text
                .map(|t| t.to_lowercase().contains(&needle))
                .unwrap_or(false);
            prop_assert!(key_hit || value_hit,
                "match at {} contains neither key nor value hit", field.path);
        }
    }

    /// A planted marker is always found, once, in both modes
    #[test]
    fn planted_marker_is_found(document in arb_document()) {
        let mut document = document;
        if let Value::Object(map) = &mut document {
            map.insert("zzmarker".to_string(), json!("needle-f1nd-me"));
        }

        let doc_results =
            match_document(&document, &Predicate::new("needle-f1nd-me"), MatchMode::Document);
        prop_assert_eq!(doc_results.len(), 1);

        let paths = field_paths(&document, "needle-f1nd-me");
        prop_assert_eq!(paths, vec!["zzmarker".to_string()]);
    }
}
