// src/render/generic.rs

//! Renderers for list payloads and anything without a dedicated layout

use serde_json::Value;

fn text<'a>(entry: &'a Value, key: &str) -> &'a str {
    entry.get(key).and_then(Value::as_str).unwrap_or("")
}

fn number(entry: &Value, key: &str) -> String {
    entry
        .get(key)
        .map(|v| v.to_string())
        .unwrap_or_default()
}

fn entries(payload: &Value) -> &[Value] {
    payload.as_array().map(Vec::as_slice).unwrap_or(&[])
}

pub(super) fn users(payload: &Value) -> Vec<String> {
    entries(payload)
        .iter()
        .map(|user| {
            format!(
                "* {} ({}, uid: {}, gid: {}, shell: {})",
                text(user, "name"),
                text(user, "comment"),
                number(user, "uid"),
                number(user, "gid"),
                text(user, "shell"),
            )
        })
        .collect()
}

pub(super) fn groups(payload: &Value) -> Vec<String> {
    entries(payload)
        .iter()
        .map(|group| {
            let members: Vec<&str> = group
                .get("users")
                .and_then(Value::as_array)
                .map(|users| users.iter().filter_map(Value::as_str).collect())
                .unwrap_or_default();
            format!(
                "* {} (gid: {}, users: {})",
                text(group, "name"),
                number(group, "gid"),
                members.join(",")
            )
        })
        .collect()
}

/// Pretty printed JSON, one output line per JSON line
pub(super) fn json(payload: &Value) -> Vec<String> {
    serde_json::to_string_pretty(payload)
        .unwrap_or_else(|_| payload.to_string())
        .lines()
        .map(str::to_string)
        .collect()
}
