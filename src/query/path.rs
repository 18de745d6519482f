//! Nested path resolution
//!
//! Resolves dotted/bracketed paths against a resource document, using the
//! same syntax the sub-search emits ("nic.ipConfig.privateIp", "ports[2]"),
//! so a path printed by `subsearch` can be fed straight back to `get`.
//!
//! Resolution walks the document one segment at a time and reports exactly
//! where it stopped: the missing key or out-of-range index, the step number,
//! and the portion of the path walked so far.

use serde_json::Value;
use thiserror::Error;

/// Why a path could not be resolved
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PathError {
    #[error("empty path: path must contain at least one key or index")]
    Empty,
    #[error("invalid path segment '{segment}' at step {step}")]
    InvalidSegment { segment: String, step: usize },
    #[error("key '{key}' does not exist at step {step} (path: '{path}')")]
    KeyNotFound {
        key: String,
        step: usize,
        path: String,
    },
    #[error("index {index} is out of bounds at step {step} (path: '{path}')")]
    IndexOutOfBounds {
        index: usize,
        step: usize,
        path: String,
    },
    #[error("cannot traverse: expected {expected} at step {step}, but found {found} (path: '{path}')")]
    Traversal {
        expected: &'static str,
        found: &'static str,
        step: usize,
        path: String,
    },
}

/// One step of a parsed path: an object key or an array index
#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Key(String),
    Index(usize),
}

/// Resolve a dotted/bracketed path against a document.
///
/// Returns a reference to the value the path points at, or a [`PathError`]
/// describing the first step that failed.
pub fn resolve_path<'a>(document: &'a Value, path: &str) -> Result<&'a Value, PathError> {
    let segments = parse_path(path)?;
    if segments.is_empty() {
        return Err(PathError::Empty);
    }

    let mut current = document;
    let mut walked = String::new();

    for (step, segment) in segments.iter().enumerate() {
        let step = step + 1;
        match segment {
            Segment::Key(key) => {
                if !walked.is_empty() {
                    walked.push('.');
                }
                walked.push_str(key);

                match current {
                    Value::Object(map) => {
                        current = map.get(key).ok_or_else(|| PathError::KeyNotFound {
                            key: key.clone(),
                            step,
                            path: walked.clone(),
                        })?;
                    }
                    other => {
                        return Err(PathError::Traversal {
                            expected: "object",
                            found: value_type_name(other),
                            step,
                            path: walked.clone(),
                        })
                    }
                }
            }
            Segment::Index(index) => {
                walked.push_str(&format!("[{index}]"));

                match current {
                    Value::Array(items) => {
                        current =
                            items
                                .get(*index)
                                .ok_or_else(|| PathError::IndexOutOfBounds {
                                    index: *index,
                                    step,
                                    path: walked.clone(),
                                })?;
                    }
                    other => {
                        return Err(PathError::Traversal {
                            expected: "array",
                            found: value_type_name(other),
                            step,
                            path: walked.clone(),
                        })
                    }
                }
            }
        }
    }

    Ok(current)
}

/// Split a path into key and index segments.
/// Whitespace around dot-separated pieces is ignored.
fn parse_path(path: &str) -> Result<Vec<Segment>, PathError> {
    if path.trim().is_empty() {
        return Err(PathError::Empty);
    }

    let mut segments = Vec::new();

    for piece in path.split('.') {
        let piece = piece.trim();
        if piece.is_empty() {
            return Err(PathError::InvalidSegment {
                segment: piece.to_string(),
                step: segments.len() + 1,
            });
        }

        let (key_part, mut rest) = match piece.find('[') {
            Some(pos) => (&piece[..pos], &piece[pos..]),
            None => (piece, ""),
        };

        if !key_part.is_empty() {
            segments.push(Segment::Key(key_part.to_string()));
        }

        while !rest.is_empty() {
            let Some(close) = rest.find(']') else {
                return Err(PathError::InvalidSegment {
                    segment: piece.to_string(),
                    step: segments.len() + 1,
                });
            };
            let index: usize =
                rest[1..close]
                    .parse()
                    .map_err(|_| PathError::InvalidSegment {
                        segment: piece.to_string(),
                        step: segments.len() + 1,
                    })?;
            segments.push(Segment::Index(index));
            rest = &rest[close + 1..];

            if !rest.is_empty() && !rest.starts_with('[') {
                return Err(PathError::InvalidSegment {
                    segment: piece.to_string(),
                    step: segments.len() + 1,
                });
            }
        }
    }

    Ok(segments)
}

fn value_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample_nic() -> Value {
        json!({
            "name": "web-nic-01",
            "nic": {"ipConfig": {"privateIp": "192.168.0.1"}},
            "ports": [22, 443, 8006],
            "ipConfigurations": [
                {"privateIp": "10.0.0.4"},
                {"privateIp": "10.0.0.5"}
            ]
        })
    }

    #[test]
    fn top_level_key_resolves() {
        let document = sample_nic();
        assert_eq!(
            resolve_path(&document, "name").unwrap(),
            &json!("web-nic-01")
        );
    }

    #[test]
    fn dotted_path_resolves_nested_value() {
        let document = sample_nic();
        assert_eq!(
            resolve_path(&document, "nic.ipConfig.privateIp").unwrap(),
            &json!("192.168.0.1")
        );
    }

    #[test]
    fn bracketed_index_resolves_array_element() {
        let document = sample_nic();
        assert_eq!(resolve_path(&document, "ports[2]").unwrap(), &json!(8006));
    }

    #[test]
    fn mixed_path_resolves_object_inside_array() {
        let document = sample_nic();
        assert_eq!(
            resolve_path(&document, "ipConfigurations[1].privateIp").unwrap(),
            &json!("10.0.0.5")
        );
    }

    #[test]
    fn whitespace_around_segments_is_ignored() {
        let document = sample_nic();
        assert_eq!(
            resolve_path(&document, " nic . ipConfig . privateIp ").unwrap(),
            &json!("192.168.0.1")
        );
    }

    #[test]
    fn missing_key_reports_step_and_walked_path() {
        let document = sample_nic();
        let err = resolve_path(&document, "nic.ipConfig.publicIp").unwrap_err();
        assert_eq!(
            err,
            PathError::KeyNotFound {
                key: "publicIp".to_string(),
                step: 3,
                path: "nic.ipConfig.publicIp".to_string(),
            }
        );
    }

    #[test]
    fn out_of_range_index_is_reported() {
        let document = sample_nic();
        let err = resolve_path(&document, "ports[9]").unwrap_err();
        assert_eq!(
            err,
            PathError::IndexOutOfBounds {
                index: 9,
                step: 2,
                path: "ports[9]".to_string(),
            }
        );
    }

    #[test]
    fn descending_into_a_scalar_is_a_traversal_error() {
        let document = sample_nic();
        let err = resolve_path(&document, "name.deeper").unwrap_err();
        assert_eq!(
            err,
            PathError::Traversal {
                expected: "object",
                found: "string",
                step: 2,
                path: "name.deeper".to_string(),
            }
        );

        let err = resolve_path(&document, "nic[0]").unwrap_err();
        assert_eq!(
            err,
            PathError::Traversal {
                expected: "array",
                found: "object",
                step: 2,
                path: "nic[0]".to_string(),
            }
        );
    }

    #[test]
    fn empty_and_malformed_paths_are_rejected() {
        let document = sample_nic();
        assert_eq!(resolve_path(&document, "").unwrap_err(), PathError::Empty);
        assert_eq!(
            resolve_path(&document, "   ").unwrap_err(),
            PathError::Empty
        );
        assert!(matches!(
            resolve_path(&document, "a..b").unwrap_err(),
            PathError::InvalidSegment { .. }
        ));
        assert!(matches!(
            resolve_path(&document, "ports[x]").unwrap_err(),
            PathError::InvalidSegment { .. }
        ));
        assert!(matches!(
            resolve_path(&document, "ports[1").unwrap_err(),
            PathError::InvalidSegment { .. }
        ));
    }

    #[test]
    fn subsearch_paths_round_trip_into_resolution() {
        use crate::query::matcher::{match_document, MatchMode, MatchResult, Predicate};

        let document = sample_nic();
        let results = match_document(&document, &Predicate::new("10.0.0.5"), MatchMode::Field);
        for result in results {
            let MatchResult::Field(field) = result else {
                panic!("field mode yields field results");
            };
            let resolved = resolve_path(&document, &field.path).unwrap();
            assert_eq!(resolved, &field.value);
        }
    }
}
