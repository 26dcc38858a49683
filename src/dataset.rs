//! Dataset views and top-level structure analysis.
//!
//! A dataset is a `serde_json::Value`, usually an array of objects. The
//! helpers here expose the record view used by the profiler and the router,
//! and classify the top-level shape without touching per-column content.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// How the top level of a dataset is organized.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StructureKind {
    /// A single top-level value, typically one JSON object.
    SingleObject,
    /// A top-level array; elements are expected (not required) to be objects.
    ArrayOfObjects,
}

/// Top-level shape of a dataset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatasetStructure {
    pub kind: StructureKind,
    /// Array length, or 1 for a single top-level value.
    pub record_count: usize,
    /// Keys of the first record, when it is an object.
    pub sample_keys: Vec<String>,
}

/// The record view of a dataset: the elements of a top-level array.
///
/// Non-array input has no records. Downstream consumers skip elements that
/// are not objects, so a partially malformed array still profiles whatever
/// object records it contains.
pub fn records(data: &Value) -> &[Value] {
    match data {
        Value::Array(items) => items,
        _ => &[],
    }
}

/// The object fields of a record, when the record is an object.
pub fn fields(record: &Value) -> Option<&Map<String, Value>> {
    record.as_object()
}

/// Classifies the top-level shape of `data`.
pub fn analyze_structure(data: &Value) -> DatasetStructure {
    match data {
        Value::Array(items) => DatasetStructure {
            kind: StructureKind::ArrayOfObjects,
            record_count: items.len(),
            sample_keys: items
                .first()
                .and_then(Value::as_object)
                .map(|obj| obj.keys().cloned().collect())
                .unwrap_or_default(),
        },
        other => DatasetStructure {
            kind: StructureKind::SingleObject,
            record_count: 1,
            sample_keys: other
                .as_object()
                .map(|obj| obj.keys().cloned().collect())
                .unwrap_or_default(),
        },
    }
}

/// Lowercased column names across `records`, space-joined for keyword
/// membership tests.
///
/// Names are deduplicated in first-appearance order, mirroring how a
/// tabular view of the records would list its columns. Keyword matching is
/// a substring test on this joined string, so a term may in principle match
/// across a name boundary; the keyword tables accept that.
pub fn joined_column_names(records: &[Value]) -> String {
    let mut seen: Vec<String> = Vec::new();
    for record in records {
        if let Some(fields) = fields(record) {
            for name in fields.keys() {
                let lower = name.to_lowercase();
                if !seen.contains(&lower) {
                    seen.push(lower);
                }
            }
        }
    }
    seen.join(" ")
}

/// True for inputs carrying no analyzable content: null, the empty array,
/// the empty object, the empty string.
pub fn is_empty_input(data: &Value) -> bool {
    match data {
        Value::Null => true,
        Value::Array(items) => items.is_empty(),
        Value::Object(map) => map.is_empty(),
        Value::String(s) => s.is_empty(),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_records_of_array() {
        let data = json!([{"a": 1}, {"a": 2}]);
        assert_eq!(records(&data).len(), 2);
    }

    #[test]
    fn test_records_of_non_array() {
        assert!(records(&json!({"a": 1})).is_empty());
        assert!(records(&json!(null)).is_empty());
        assert!(records(&json!("text")).is_empty());
    }

    #[test]
    fn test_structure_of_object_array() {
        let data = json!([
            {"customer": "Acme", "revenue": 100},
            {"customer": "Beta", "revenue": 200}
        ]);
        let structure = analyze_structure(&data);

        assert_eq!(structure.kind, StructureKind::ArrayOfObjects);
        assert_eq!(structure.record_count, 2);
        assert_eq!(structure.sample_keys, vec!["customer", "revenue"]);
    }

    #[test]
    fn test_structure_of_empty_array() {
        let structure = analyze_structure(&json!([]));

        assert_eq!(structure.kind, StructureKind::ArrayOfObjects);
        assert_eq!(structure.record_count, 0);
        assert!(structure.sample_keys.is_empty());
    }

    #[test]
    fn test_structure_of_array_with_scalar_first_element() {
        let structure = analyze_structure(&json!([42, {"a": 1}]));

        assert_eq!(structure.kind, StructureKind::ArrayOfObjects);
        assert_eq!(structure.record_count, 2);
        assert!(structure.sample_keys.is_empty());
    }

    #[test]
    fn test_structure_of_single_object() {
        let structure = analyze_structure(&json!({"region": "EMEA", "total": 5}));

        assert_eq!(structure.kind, StructureKind::SingleObject);
        assert_eq!(structure.record_count, 1);
        assert_eq!(structure.sample_keys, vec!["region", "total"]);
    }

    #[test]
    fn test_structure_of_scalar() {
        let structure = analyze_structure(&json!("free text"));

        assert_eq!(structure.kind, StructureKind::SingleObject);
        assert_eq!(structure.record_count, 1);
        assert!(structure.sample_keys.is_empty());
    }

    #[test]
    fn test_empty_input_detection() {
        assert!(is_empty_input(&json!(null)));
        assert!(is_empty_input(&json!([])));
        assert!(is_empty_input(&json!({})));
        assert!(is_empty_input(&json!("")));

        assert!(!is_empty_input(&json!([{"a": 1}])));
        assert!(!is_empty_input(&json!({"a": 1})));
        assert!(!is_empty_input(&json!("text")));
        assert!(!is_empty_input(&json!(0)));
        assert!(!is_empty_input(&json!(false)));
    }

    #[test]
    fn test_joined_column_names_lowercases_and_dedups() {
        let data = json!([
            {"Customer Name": "Acme", "Revenue": 100},
            {"customer name": "Beta", "Region": "EMEA"}
        ]);
        let joined = joined_column_names(records(&data));

        assert_eq!(joined, "customer name revenue region");
    }

    #[test]
    fn test_joined_column_names_skips_non_object_records() {
        let data = json!([42, {"Month": "Jan"}, null]);
        let joined = joined_column_names(records(&data));

        assert_eq!(joined, "month");
    }

    #[test]
    fn test_joined_column_names_of_empty_slice() {
        assert_eq!(joined_column_names(&[]), "");
    }
}
