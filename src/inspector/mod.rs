// src/inspector/mod.rs

//! Per-scope inspectors
//!
//! An [`Inspector`] knows how to collect one scope from a
//! [`TargetSystem`]. It returns the scope payload as JSON; the coordinator
//! applies the inspection filter to it and folds it into the description.
//!
//! Only `os`, `users` and `groups` are built in. Other scopes are skipped
//! unless an inspector for them is registered.

mod groups;
mod os;
mod users;

pub use groups::GroupsInspector;
pub use os::OsInspector;
pub use users::UsersInspector;

use std::collections::BTreeMap;

use serde_json::Value;

use crate::error::{Error, Result};
use crate::filter::Filter;
use crate::options::ExtractionOptions;
use crate::scope::Scope;
use crate::target::TargetSystem;
use crate::user::CurrentUser;

pub trait Inspector {
    fn scope(&self) -> Scope;

    /// Whether this inspector honors [`ExtractionOptions`]
    fn supports_extraction(&self) -> bool {
        false
    }

    fn inspect(
        &self,
        target: &dyn TargetSystem,
        user: &CurrentUser,
        filter: &Filter,
        options: &ExtractionOptions,
    ) -> Result<Value>;
}

/// Inspectors keyed by the scope they collect
#[derive(Default)]
pub struct InspectorRegistry {
    inspectors: BTreeMap<Scope, Box<dyn Inspector>>,
}

impl InspectorRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry with the inspectors shipped with sysdesc
    pub fn builtin() -> Self {
        let mut registry = Self::new();
        registry.register(Box::new(OsInspector));
        registry.register(Box::new(UsersInspector));
        registry.register(Box::new(GroupsInspector));
        registry
    }

    /// Add an inspector, replacing any previous one for its scope
    pub fn register(&mut self, inspector: Box<dyn Inspector>) {
        self.inspectors.insert(inspector.scope(), inspector);
    }

    pub fn get(&self, scope: Scope) -> Option<&dyn Inspector> {
        self.inspectors.get(&scope).map(|i| i.as_ref())
    }

    /// Scopes that have an inspector, sorted
    pub fn scopes(&self) -> Vec<Scope> {
        self.inspectors.keys().copied().collect()
    }
}

fn inspection_failed(scope: Scope, message: impl Into<String>) -> Error {
    Error::InspectionFailed {
        scope: scope.as_str().to_string(),
        message: message.into(),
    }
}

/// Split a colon separated database line such as `/etc/passwd` entries
///
/// Blank lines and comments are skipped; lines with the wrong number of
/// fields are reported with their line number.
fn colon_records(scope: Scope, content: &str, fields: usize) -> Result<Vec<Vec<&str>>> {
    let mut records = Vec::new();
    for (index, line) in content.lines().enumerate() {
        let line = line.trim_end();
        if line.trim().is_empty() || line.starts_with('#') {
            continue;
        }
        let parts: Vec<&str> = line.split(':').collect();
        if parts.len() != fields {
            return Err(inspection_failed(
                scope,
                format!(
                    "line {} has {} fields, expected {}: {}",
                    index + 1,
                    parts.len(),
                    fields,
                    line
                ),
            ));
        }
        records.push(parts);
    }
    Ok(records)
}

fn parse_id(scope: Scope, field: &str, value: &str) -> Result<u32> {
    value
        .parse()
        .map_err(|_| inspection_failed(scope, format!("invalid {} '{}'", field, value)))
}
