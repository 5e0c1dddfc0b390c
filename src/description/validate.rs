// src/description/validate.rs

//! Structural checks of stored manifests
//!
//! Works on untyped JSON so that every problem of a broken manifest can be
//! reported at once, instead of stopping at the first deserialization
//! error.

use std::str::FromStr;

use serde_json::{Map, Value};

use super::FORMAT_VERSION;
use crate::scope::Scope;

const TARGET_KINDS: &[&str] = &["remote_host", "container", "local"];
const SCOPE_META_FIELDS: &[&str] = &["modified", "hostname", "inspected_by"];

/// Every problem found in a manifest; empty if it is valid
pub fn validate(raw: &Value) -> Vec<String> {
    let mut issues = Vec::new();

    let Some(root) = raw.as_object() else {
        issues.push("The manifest is not a JSON object.".to_string());
        return issues;
    };
    let empty = Map::new();
    let meta = match root.get("meta") {
        Some(Value::Object(meta)) => meta,
        Some(_) => {
            issues.push("The 'meta' section is not an object.".to_string());
            &empty
        }
        None => {
            issues.push("The 'meta' section is missing.".to_string());
            &empty
        }
    };

    check_format_version(meta, &mut issues);
    check_target(meta, &mut issues);
    check_filters(meta, &mut issues);

    let scope_meta = match meta.get("scopes") {
        Some(Value::Object(scopes)) => scopes,
        Some(_) => {
            issues.push("'meta.scopes' is not an object.".to_string());
            &empty
        }
        None => &empty,
    };

    match root.get("scopes") {
        Some(Value::Object(scopes)) => {
            for key in scopes.keys() {
                if Scope::from_str(key).is_err() {
                    issues.push(format!("Unknown scope '{}'.", key));
                    continue;
                }
                match scope_meta.get(key) {
                    Some(Value::Object(fields)) => check_scope_meta(key, fields, &mut issues),
                    Some(_) => issues.push(format!("Metadata of scope '{}' is not an object.", key)),
                    None => issues.push(format!("Scope '{}' has no metadata.", key)),
                }
            }
        }
        Some(_) => issues.push("The 'scopes' section is not an object.".to_string()),
        None => {}
    }

    issues
}

fn check_format_version(meta: &Map<String, Value>, issues: &mut Vec<String>) {
    match meta.get("format_version") {
        None => issues.push("'meta.format_version' is missing.".to_string()),
        Some(version) => match version.as_u64() {
            None => issues.push(format!(
                "'meta.format_version' is not a number: {}.",
                version
            )),
            Some(v) if v != u64::from(FORMAT_VERSION) => issues.push(format!(
                "Format version {} does not match the supported version {}.",
                v, FORMAT_VERSION
            )),
            Some(_) => {}
        },
    }
}

fn check_target(meta: &Map<String, Value>, issues: &mut Vec<String>) {
    match meta.get("target") {
        None => issues.push("'meta.target' is missing.".to_string()),
        Some(Value::String(target)) if TARGET_KINDS.contains(&target.as_str()) => {}
        Some(other) => issues.push(format!("'meta.target' is not a known target: {}.", other)),
    }
}

fn check_filters(meta: &Map<String, Value>, issues: &mut Vec<String>) {
    let Some(filters) = meta.get("filters") else {
        return;
    };
    let Some(phases) = filters.as_object() else {
        issues.push("'meta.filters' must be an object keyed by filter phase.".to_string());
        return;
    };
    for (phase, definitions) in phases {
        let Some(definitions) = definitions.as_array() else {
            issues.push(format!("Filter definitions of phase '{}' are not a list.", phase));
            continue;
        };
        for definition in definitions.iter().filter(|d| !d.is_string()) {
            issues.push(format!(
                "Filter definition {} of phase '{}' is not a string.",
                definition, phase
            ));
        }
    }
}

fn check_scope_meta(scope: &str, fields: &Map<String, Value>, issues: &mut Vec<String>) {
    for field in SCOPE_META_FIELDS {
        if !fields.get(*field).is_some_and(Value::is_string) {
            issues.push(format!("Metadata of scope '{}' lacks '{}'.", scope, field));
        }
    }
}
