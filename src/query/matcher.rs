//! Nested-document matcher
//!
//! Walks a resource document (any JSON tree) depth-first and applies a
//! case-insensitive substring predicate to every object key and scalar leaf.
//! Two result granularities:
//!
//! - [`MatchMode::Document`] - "does the term appear anywhere?" Returns the
//!   whole document on the first hit and stops descending.
//! - [`MatchMode::Field`] - "show every place it appears." Exhaustive walk,
//!   one result per matching key or leaf, with its path from the root.
//!
//! Numbers and booleans are compared through their canonical text rendering,
//! so a query like "8006" finds a numeric port and "true" finds a flag; null
//! never matches. Traversal follows object entry order and array index order,
//! so output is deterministic for identical input.

use serde_json::Value;

/// Result granularity for [`match_document`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchMode {
    Document,
    Field,
}

/// Case-insensitive substring test over stringified nodes
#[derive(Debug, Clone)]
pub struct Predicate {
    needle: String,
}

impl Predicate {
    pub fn new(term: &str) -> Self {
        Self {
            needle: term.to_lowercase(),
        }
    }

    fn matches_text(&self, text: &str) -> bool {
        text.to_lowercase().contains(&self.needle)
    }

    /// Test an object key
    pub fn matches_key(&self, key: &str) -> bool {
        self.matches_text(key)
    }

    /// Test a scalar value through its canonical text rendering.
    /// Objects, arrays, and null never match directly.
    pub fn matches_scalar(&self, value: &Value) -> bool {
        match value {
            Value::String(s) => self.matches_text(s),
            Value::Number(n) => self.matches_text(&n.to_string()),
            Value::Bool(b) => self.matches_text(if *b { "true" } else { "false" }),
            Value::Null | Value::Array(_) | Value::Object(_) => false,
        }
    }
}

/// A single key/value hit from a Field-mode walk
#[derive(Debug, Clone, PartialEq)]
pub struct FieldMatch {
    /// Dotted/bracketed path from the document root, e.g. "nic.ipConfig.privateIp"
    /// or "ports[2]"
    pub path: String,
    /// The matched object key; empty when the hit is an array element
    pub key: String,
    pub value: Value,
}

/// One match from [`match_document`]
#[derive(Debug, Clone, PartialEq)]
pub enum MatchResult {
    /// The entire document (Document mode; at most one per document)
    Document(Value),
    /// A single matching key/value pair (Field mode)
    Field(FieldMatch),
}

/// Match a document against a predicate in the given mode.
///
/// Document mode yields zero or one result; Field mode yields one result per
/// matching key or leaf, in depth-first traversal order.
pub fn match_document(document: &Value, predicate: &Predicate, mode: MatchMode) -> Vec<MatchResult> {
    match mode {
        MatchMode::Document => {
            if document_contains(document, predicate) {
                vec![MatchResult::Document(document.clone())]
            } else {
                Vec::new()
            }
        }
        MatchMode::Field => {
            let mut matches = Vec::new();
            collect_field_matches(document, "", predicate, &mut matches);
            matches.into_iter().map(MatchResult::Field).collect()
        }
    }
}

/// Short-circuiting presence test: true as soon as any key or scalar matches
pub fn document_contains(value: &Value, predicate: &Predicate) -> bool {
    match value {
        Value::Object(map) => map
            .iter()
            .any(|(key, child)| predicate.matches_key(key) || document_contains(child, predicate)),
        Value::Array(items) => items.iter().any(|item| document_contains(item, predicate)),
        scalar => predicate.matches_scalar(scalar),
    }
}

/// Exhaustive walk collecting every matching key or leaf with its path.
///
/// An object entry whose key matches, or whose scalar value matches, yields
/// one result for the entry (not two). Array elements carry no key; their
/// path ends in the element index.
fn collect_field_matches(
    value: &Value,
    path: &str,
    predicate: &Predicate,
    matches: &mut Vec<FieldMatch>,
) {
    match value {
        Value::Object(map) => {
            for (key, child) in map {
                let child_path = if path.is_empty() {
                    key.clone()
                } else {
                    format!("{path}.{key}")
                };

                if predicate.matches_key(key) || predicate.matches_scalar(child) {
                    matches.push(FieldMatch {
                        path: child_path.clone(),
                        key: key.clone(),
                        value: child.clone(),
                    });
                }

                collect_field_matches(child, &child_path, predicate, matches);
            }
        }
        Value::Array(items) => {
            for (index, item) in items.iter().enumerate() {
                let child_path = format!("{path}[{index}]");

                if predicate.matches_scalar(item) {
                    matches.push(FieldMatch {
                        path: child_path.clone(),
                        key: String::new(),
                        value: item.clone(),
                    });
                }

                collect_field_matches(item, &child_path, predicate, matches);
            }
        }
        _ => {}
    }
}
