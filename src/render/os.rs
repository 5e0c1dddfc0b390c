// src/render/os.rs

use serde_json::Value;

pub(super) fn content(payload: &Value) -> Vec<String> {
    let field = |key: &str| payload.get(key).and_then(Value::as_str).unwrap_or("");
    vec![
        format!("Name: {}", field("name")),
        format!("Version: {}", field("version")),
        format!("Architecture: {}", field("architecture")),
    ]
}
