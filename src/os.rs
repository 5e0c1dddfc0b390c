// src/os.rs

//! `/etc/os-release` parsing
//!
//! Used both for the `os` scope of an inspected system and for choosing
//! where the local operator should report unexpected errors.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

/// Locations checked, in order, for the local os-release file
const OS_RELEASE_PATHS: &[&str] = &["/etc/os-release", "/usr/lib/os-release"];

/// IDs of the SUSE Linux Enterprise family
const SLE_IDS: &[&str] = &["sles", "sled", "sles_sap", "sle-micro"];

/// Key/value pairs of an os-release file
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OsRelease {
    vars: HashMap<String, String>,
}

impl OsRelease {
    /// Parse os-release content; unknown or malformed lines are skipped
    pub fn parse(content: &str) -> Self {
        let mut vars = HashMap::new();
        for line in content.lines() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            if let Some((key, value)) = line.split_once('=') {
                let value = value.trim().trim_matches('"').trim_matches('\'');
                vars.insert(key.trim().to_string(), value.to_string());
            }
        }
        Self { vars }
    }

    /// Read the os-release file of the local machine
    ///
    /// Returns `None` if no os-release file is readable.
    pub fn local() -> Option<Self> {
        OS_RELEASE_PATHS
            .iter()
            .find_map(|path| Self::from_file(Path::new(path)))
    }

    fn from_file(path: &Path) -> Option<Self> {
        fs::read_to_string(path).ok().map(|s| Self::parse(&s))
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.vars.get(key).map(String::as_str)
    }

    pub fn id(&self) -> Option<&str> {
        self.get("ID")
    }

    /// Space separated `ID_LIKE` entries
    pub fn id_like(&self) -> Vec<&str> {
        self.get("ID_LIKE")
            .map(|s| s.split_whitespace().collect())
            .unwrap_or_default()
    }

    /// Human readable name, preferring `PRETTY_NAME`
    pub fn name(&self) -> Option<&str> {
        self.get("PRETTY_NAME").or_else(|| self.get("NAME"))
    }

    /// Version, preferring `VERSION_ID`
    pub fn version(&self) -> Option<&str> {
        self.get("VERSION_ID").or_else(|| self.get("VERSION"))
    }

    pub fn is_sle_family(&self) -> bool {
        self.id().is_some_and(|id| SLE_IDS.contains(&id)) || self.id_like().contains(&"sles")
    }
}
