// src/description/mod.rs

//! System descriptions
//!
//! A system description is the result of one inspection run: the payload
//! of every inspected scope plus metadata about when, where and by whom
//! each scope was inspected. Descriptions are stored as JSON manifests in
//! a [`DescriptionStore`].
//!
//! # Format
//!
//! ```json
//! {
//!   "meta": {
//!     "format_version": 2,
//!     "target": "remote_host",
//!     "filters": { "inspect": ["/unmanaged_files/files/name=/tmp"] },
//!     "scopes": {
//!       "os": { "modified": "2026-01-01T12:00:00Z", "hostname": "db01", "inspected_by": "alice" }
//!     }
//!   },
//!   "scopes": { "os": { "name": "openSUSE Leap 15.6", "version": "15.6", "architecture": "x86_64" } }
//! }
//! ```
//!
//! The description name is the store key and is not part of the manifest.

pub mod store;
pub mod upgrade;
pub mod validate;

pub use store::DescriptionStore;
pub use upgrade::{UpgradeOutcome, migrate, upgrade};
pub use validate::validate;

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{Error, Result};
use crate::scope::Scope;
use crate::target::TargetKind;

/// Manifest format written by this version of sysdesc
pub const FORMAT_VERSION: u32 = 2;

/// Check that `name` can be used as a description name
///
/// Valid names consist of `a-zA-Z0-9_:.-` and are not `.` or `..`.
pub fn validate_name(name: &str) -> Result<()> {
    let valid = !name.is_empty()
        && name != "."
        && name != ".."
        && name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | ':' | '.' | '-'));
    if valid {
        Ok(())
    } else {
        Err(Error::InvalidDescriptionName(name.to_string()))
    }
}

/// When filter criteria were applied
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterPhase {
    /// During inspection; persisted with the description
    Inspect,
    /// Before rendering with `show`; never persisted
    Show,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterDefinitions {
    #[serde(default)]
    pub inspect: Vec<String>,
    #[serde(skip)]
    pub show: Vec<String>,
}

/// Provenance of one inspected scope
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScopeMeta {
    pub modified: DateTime<Utc>,
    pub hostname: String,
    pub inspected_by: String,
}

impl ScopeMeta {
    pub fn now(hostname: impl Into<String>, inspected_by: impl Into<String>) -> Self {
        Self {
            modified: Utc::now(),
            hostname: hostname.into(),
            inspected_by: inspected_by.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DescriptionMeta {
    pub format_version: u32,
    pub target: TargetKind,
    #[serde(default)]
    pub filters: FilterDefinitions,
    #[serde(default)]
    pub scopes: BTreeMap<Scope, ScopeMeta>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SystemDescription {
    #[serde(skip)]
    pub name: String,
    pub meta: DescriptionMeta,
    #[serde(default)]
    pub scopes: BTreeMap<Scope, Value>,
}

impl SystemDescription {
    /// Create an empty description at the current format version
    pub fn new(name: impl Into<String>, target: TargetKind) -> Self {
        Self {
            name: name.into(),
            meta: DescriptionMeta {
                format_version: FORMAT_VERSION,
                target,
                filters: FilterDefinitions::default(),
                scopes: BTreeMap::new(),
            },
            scopes: BTreeMap::new(),
        }
    }

    /// Store the payload of an inspected scope with its metadata
    pub fn set_scope(&mut self, scope: Scope, payload: Value, meta: ScopeMeta) {
        self.scopes.insert(scope, payload);
        self.meta.scopes.insert(scope, meta);
    }

    pub fn scope(&self, scope: Scope) -> Option<&Value> {
        self.scopes.get(&scope)
    }

    pub fn scope_meta(&self, scope: Scope) -> Option<&ScopeMeta> {
        self.meta.scopes.get(&scope)
    }

    /// Scopes present in this description, sorted
    pub fn scope_list(&self) -> Vec<Scope> {
        self.scopes.keys().copied().collect()
    }

    pub fn filter_definitions(&self, phase: FilterPhase) -> &[String] {
        match phase {
            FilterPhase::Inspect => &self.meta.filters.inspect,
            FilterPhase::Show => &self.meta.filters.show,
        }
    }

    pub fn set_filter_definitions(&mut self, phase: FilterPhase, criteria: Vec<String>) {
        match phase {
            FilterPhase::Inspect => self.meta.filters.inspect = criteria,
            FilterPhase::Show => self.meta.filters.show = criteria,
        }
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_validate_name() {
        for name in ["db01", "web-1.example.com", "leap:15.6", "my_host"] {
            assert!(validate_name(name).is_ok(), "{name} should be valid");
        }
        for name in ["", "a/b", "has space", "ü", ".", ".."] {
            assert!(
                matches!(validate_name(name), Err(Error::InvalidDescriptionName(_))),
                "{name} should be invalid"
            );
        }
    }

    #[test]
    fn test_json_layout() {
        let mut description = SystemDescription::new("db01", TargetKind::RemoteHost);
        description.set_scope(
            Scope::Os,
            json!({"name": "Leap", "version": "15.6", "architecture": "x86_64"}),
            ScopeMeta::now("db01", "alice"),
        );
        description.set_filter_definitions(FilterPhase::Inspect, vec!["/os/name=x".to_string()]);
        description.set_filter_definitions(FilterPhase::Show, vec!["/os/version=y".to_string()]);

        let value: Value = serde_json::from_str(&description.to_json().unwrap()).unwrap();
        assert_eq!(value["meta"]["format_version"], 2);
        assert_eq!(value["meta"]["target"], "remote_host");
        assert_eq!(value["meta"]["filters"], json!({"inspect": ["/os/name=x"]}));
        assert_eq!(value["meta"]["scopes"]["os"]["hostname"], "db01");
        assert_eq!(value["meta"]["scopes"]["os"]["inspected_by"], "alice");
        assert_eq!(value["scopes"]["os"]["version"], "15.6");
        assert!(value.get("name").is_none());
    }

    #[test]
    fn test_scope_list_sorted() {
        let mut description = SystemDescription::new("d", TargetKind::Local);
        description.set_scope(Scope::Users, json!([]), ScopeMeta::now("h", "u"));
        description.set_scope(Scope::Groups, json!([]), ScopeMeta::now("h", "u"));
        assert_eq!(description.scope_list(), vec![Scope::Groups, Scope::Users]);
        assert!(description.scope_meta(Scope::Users).is_some());
        assert!(description.scope(Scope::Os).is_none());
    }
}
