// src/description/upgrade.rs

//! Manifest format migrations
//!
//! | version | change |
//! |---|---|
//! | 1 | `meta.filters` is a flat list of inspection criteria |
//! | 2 | `meta.filters` is keyed by phase: `{"inspect": [...]}` |

use serde_json::{Value, json};
use tracing::info;

use super::{DescriptionStore, FORMAT_VERSION, validate};
use crate::error::{Error, Result};

/// Result of upgrading one description
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpgradeOutcome {
    AlreadyCurrent,
    Upgraded { from: u32 },
}

/// Migrate a manifest in place to [`FORMAT_VERSION`]
///
/// Returns the version it was migrated from, or `None` if it was current.
pub fn migrate(name: &str, raw: &mut Value) -> Result<Option<u32>> {
    let invalid = |issue: String| Error::InvalidDescription {
        name: name.to_string(),
        issues: vec![issue],
    };

    let found = raw
        .pointer("/meta/format_version")
        .and_then(Value::as_u64)
        .ok_or_else(|| invalid("'meta.format_version' is missing or not a number.".to_string()))?;
    let found = u32::try_from(found)
        .map_err(|_| invalid(format!("Format version {} is not supported.", found)))?;

    if found == FORMAT_VERSION {
        return Ok(None);
    }
    if found == 0 || found > FORMAT_VERSION {
        return Err(invalid(format!(
            "Format version {} cannot be upgraded to version {}.",
            found, FORMAT_VERSION
        )));
    }

    // Each step migrates to the next version
    if found == 1 {
        migrate_v1_to_v2(raw);
    }
    Ok(Some(found))
}

fn migrate_v1_to_v2(raw: &mut Value) {
    let Some(meta) = raw.get_mut("meta").and_then(Value::as_object_mut) else {
        return;
    };
    let inspect = meta.remove("filters").unwrap_or_else(|| json!([]));
    let filters = if inspect.is_array() {
        json!({ "inspect": inspect })
    } else {
        inspect
    };
    meta.insert("filters".to_string(), filters);
    meta.insert("format_version".to_string(), json!(2));
}

/// Upgrade a stored description
///
/// Without `force` a description that is still invalid after migration is
/// left untouched and reported as an error.
pub fn upgrade(store: &DescriptionStore, name: &str, force: bool) -> Result<UpgradeOutcome> {
    let mut raw = store.load_raw(name)?;
    let Some(from) = migrate(name, &mut raw)? else {
        return Ok(UpgradeOutcome::AlreadyCurrent);
    };

    let issues = validate(&raw);
    if !issues.is_empty() && !force {
        return Err(Error::InvalidDescription {
            name: name.to_string(),
            issues,
        });
    }

    store.save_raw(name, &raw)?;
    info!(
        "Upgraded system description '{}' from format version {} to {}",
        name, from, FORMAT_VERSION
    );
    Ok(UpgradeOutcome::Upgraded { from })
}
