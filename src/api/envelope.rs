use axum::Json;
use serde_json::{Map, Value};

/// Build the standard success envelope and merge the payload's keys into it.
///
/// Every success body carries `success`, `status_code` and `message`;
/// collection payloads contribute their own top-level keys
/// (`questions`, `total_questions`, `drinks`, ...) alongside them.
pub fn ok(message: &str, payload: Value) -> Json<Value> {
    let mut body = Map::new();
    body.insert("success".into(), Value::Bool(true));
    body.insert("status_code".into(), Value::from(200));
    body.insert("message".into(), Value::String(message.to_string()));

    if let Value::Object(extra) = payload {
        for (key, value) in extra {
            body.insert(key, value);
        }
    }

    Json(Value::Object(body))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn payload_keys_are_merged_at_top_level() {
        let Json(body) = ok("GET Success", json!({ "total_questions": 3, "questions": [] }));
        assert_eq!(body["success"], true);
        assert_eq!(body["status_code"], 200);
        assert_eq!(body["message"], "GET Success");
        assert_eq!(body["total_questions"], 3);
        assert!(body["questions"].is_array());
    }

    #[test]
    fn empty_payload_keeps_fixed_keys_only() {
        let Json(body) = ok("DELETE Success", json!({}));
        assert_eq!(body.as_object().unwrap().len(), 3);
    }
}
