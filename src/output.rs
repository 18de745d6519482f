//! Result presentation
//!
//! Renders a dispatch outcome as pretty-printed JSON on stdout. Notices and
//! per-type failures go to stderr so stdout stays pipeable.

use crate::query::{DispatchOutcome, Record};
use anyhow::Result;
use serde_json::{json, Value};

fn record_to_value(record: &Record) -> Value {
    match record {
        Record::Resource {
            resource_type,
            document,
        } => json!({
            "type": resource_type,
            "resource": document,
        }),
        Record::TypeCount {
            resource_type,
            count,
        } => json!({
            "type": resource_type,
            "count": count,
        }),
        Record::DocumentHit {
            resource_type,
            document,
        } => json!({
            "type": resource_type,
            "resource": document,
        }),
        Record::FieldHit {
            resource_type,
            field,
        } => json!({
            "type": resource_type,
            "path": field.path,
            "key": field.key,
            "value": field.value,
        }),
    }
}

/// Print an outcome: records as a JSON array on stdout, failures on stderr.
/// An empty result set prints `[]` plus a notice, and is not an error.
pub fn render(outcome: &DispatchOutcome, empty_note: &str) -> Result<()> {
    let records: Vec<Value> = outcome.records.iter().map(record_to_value).collect();
    println!("{}", serde_json::to_string_pretty(&Value::Array(records))?);

    if outcome.records.is_empty() && outcome.failures.is_empty() {
        eprintln!("{empty_note}");
    }

    for failure in &outcome.failures {
        eprintln!("warning: {}: {}", failure.resource_type, failure.error);
    }

    Ok(())
}

/// Print a single document (used by `get`)
pub fn render_document(document: &Value) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(document)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::FieldMatch;

    #[test]
    fn field_hits_carry_path_key_and_value() {
        let record = Record::FieldHit {
            resource_type: "Microsoft.Compute/virtualMachines",
            field: FieldMatch {
                path: "ports[2]".to_string(),
                key: String::new(),
                value: json!(8006),
            },
        };
        let value = record_to_value(&record);
        assert_eq!(value["path"], "ports[2]");
        assert_eq!(value["key"], "");
        assert_eq!(value["value"], 8006);
    }

    #[test]
    fn type_counts_render_type_and_count() {
        let record = Record::TypeCount {
            resource_type: "Microsoft.Storage/storageAccounts",
            count: 3,
        };
        let value = record_to_value(&record);
        assert_eq!(value["type"], "Microsoft.Storage/storageAccounts");
        assert_eq!(value["count"], 3);
    }
}
