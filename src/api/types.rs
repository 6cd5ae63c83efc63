//! Wire format of the member list.
//!
//! The source serves a JSON array of flat objects, e.g.
//!
//! ```json
//! [{"id": "1", "name": "Aaron Miles", "email": "aaron@mailinator.com", "role": "member"}]
//! ```
//!
//! Values are stringified the way the table displays them; key order is kept.

use serde_json::Value;

use super::error::{ApiError, Result};
use crate::table::RecordFields;

/// Parse a response body into record fields.
pub fn parse_records(body: &str) -> Result<Vec<RecordFields>> {
    let value: Value = serde_json::from_str(body)
        .map_err(|e| ApiError::InvalidResponse(format!("Failed to parse response: {}", e)))?;

    let Value::Array(items) = value else {
        return Err(ApiError::InvalidResponse(
            "expected a JSON array of records".to_string(),
        ));
    };

    items
        .into_iter()
        .enumerate()
        .map(|(i, item)| match item {
            Value::Object(map) => Ok(map
                .into_iter()
                .map(|(key, value)| (key, value_to_string(value)))
                .collect()),
            other => Err(ApiError::InvalidResponse(format!(
                "record {} is not an object: {}",
                i, other
            ))),
        })
        .collect()
}

/// Display form of a JSON value.
///
/// Nested arrays and objects keep their compact JSON text so their contents
/// stay searchable.
fn value_to_string(value: Value) -> String {
    match value {
        Value::String(s) => s,
        Value::Null => "null".to_string(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_members() {
        let body = r#"[
            {"id": "1", "name": "Aaron Miles", "email": "aaron@mailinator.com", "role": "member"},
            {"id": "2", "name": "Aishwarya Naik", "email": "aishwarya@mailinator.com", "role": "admin"}
        ]"#;
        let records = parse_records(body).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[1][1], ("name".to_string(), "Aishwarya Naik".to_string()));
    }

    #[test]
    fn test_parse_keeps_key_order() {
        let body = r#"[{"zeta": "z", "alpha": "a", "mid": "m"}]"#;
        let records = parse_records(body).unwrap();
        let keys: Vec<&str> = records[0].iter().map(|(k, _)| k.as_str()).collect();
        assert_eq!(keys, vec!["zeta", "alpha", "mid"]);
    }

    #[test]
    fn test_parse_stringifies_scalars() {
        let body = r#"[{"id": 7, "active": true, "manager": null, "score": 1.5}]"#;
        let records = parse_records(body).unwrap();
        assert_eq!(
            records[0],
            vec![
                ("id".to_string(), "7".to_string()),
                ("active".to_string(), "true".to_string()),
                ("manager".to_string(), "null".to_string()),
                ("score".to_string(), "1.5".to_string()),
            ]
        );
    }

    #[test]
    fn test_parse_nested_values_as_compact_json() {
        let body = r#"[{"tags": [1, 2], "address": {"city": "Pune"}}]"#;
        let records = parse_records(body).unwrap();
        assert_eq!(records[0][0].1, "[1,2]");
        assert_eq!(records[0][1].1, r#"{"city":"Pune"}"#);
    }

    #[test]
    fn test_parse_empty_array() {
        assert!(parse_records("[]").unwrap().is_empty());
    }

    #[test]
    fn test_parse_rejects_non_array() {
        let err = parse_records(r#"{"members": []}"#).unwrap_err();
        assert!(matches!(err, ApiError::InvalidResponse(_)));
    }

    #[test]
    fn test_parse_rejects_non_object_item() {
        let err = parse_records(r#"[{"id": "1"}, 42]"#).unwrap_err();
        assert!(err.to_string().contains("record 1"));
    }

    #[test]
    fn test_parse_rejects_malformed_json() {
        let err = parse_records("[{").unwrap_err();
        assert!(matches!(err, ApiError::InvalidResponse(_)));
    }
}
