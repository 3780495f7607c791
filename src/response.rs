//! Decoding of upstream responses: tolerant list parsing and error messages.

use serde_json::{Map, Value};

/// One record of a list resource, keyed by field name.
pub type Row = Map<String, Value>;

/// Decode a list response into rows.
///
/// Accepts either a bare JSON array or an envelope of the form
/// `{"data": [...]}`. Any other shape (null, scalar, object without `data`)
/// decodes to an empty list so an unreachable or misconfigured endpoint
/// renders as an empty table instead of tearing the page down. Elements that
/// are not JSON objects are dropped.
pub fn parse_list_response(value: Value) -> Vec<Row> {
    let items = match value {
        Value::Array(arr) => arr,
        Value::Object(mut obj) => match obj.remove("data") {
            Some(Value::Array(arr)) => arr,
            _ => return Vec::new(),
        },
        _ => return Vec::new(),
    };
    items
        .into_iter()
        .filter_map(|item| match item {
            Value::Object(map) => Some(map),
            _ => None,
        })
        .collect()
}

/// Extract a human-readable message from an upstream error body.
///
/// Prefers `error.message`, then a top-level `message`, then the raw body if
/// it is short plain text, then a generic status line.
pub fn upstream_message(status: u16, body: &str) -> String {
    if let Ok(value) = serde_json::from_str::<Value>(body) {
        if let Some(msg) = value
            .get("error")
            .and_then(|e| e.get("message"))
            .and_then(Value::as_str)
        {
            return msg.to_string();
        }
        if let Some(msg) = value.get("message").and_then(Value::as_str) {
            return msg.to_string();
        }
    }
    let trimmed = body.trim();
    if !trimmed.is_empty() && trimmed.len() <= 200 && !trimmed.starts_with('<') {
        return trimmed.to_string();
    }
    format!("request failed with status {}", status)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn bare_array_decodes_in_order() {
        let rows = parse_list_response(json!([{"id": 1}, {"id": 2}]));
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0]["id"], json!(1));
        assert_eq!(rows[1]["id"], json!(2));
    }

    #[test]
    fn data_envelope_decodes() {
        let rows = parse_list_response(json!({"data": [{"id": "a"}], "meta": {"count": 1}}));
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0]["id"], json!("a"));
    }

    #[test]
    fn unexpected_shapes_decode_empty() {
        assert!(parse_list_response(json!(null)).is_empty());
        assert!(parse_list_response(json!(42)).is_empty());
        assert!(parse_list_response(json!("rows")).is_empty());
        assert!(parse_list_response(json!({"items": []})).is_empty());
        assert!(parse_list_response(json!({"data": "not a list"})).is_empty());
    }

    #[test]
    fn non_object_elements_are_dropped() {
        let rows = parse_list_response(json!([{"id": 1}, "stray", 7, {"id": 2}]));
        assert_eq!(rows.len(), 2);
    }

    #[test]
    fn upstream_message_prefers_error_envelope() {
        let msg = upstream_message(422, r#"{"error":{"code":"validation_error","message":"name is required"}}"#);
        assert_eq!(msg, "name is required");
        let msg = upstream_message(400, r#"{"message":"bad input"}"#);
        assert_eq!(msg, "bad input");
        let msg = upstream_message(500, "<html>Internal Server Error</html>");
        assert_eq!(msg, "request failed with status 500");
    }
}
