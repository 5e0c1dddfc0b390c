// src/description/store.rs

//! On-disk store of system descriptions
//!
//! ```text
//! <base>/
//!   config.toml
//!   db01/
//!     manifest.json
//!   leap/
//!     manifest.json
//! ```
//!
//! Manifests are replaced atomically: the new content is written to a
//! temporary file next to the manifest, synced, and renamed over it. A
//! failed write never leaves a truncated manifest behind.

use std::ffi::OsString;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use serde_json::Value;
use tracing::{debug, info};
use walkdir::WalkDir;

use super::{FORMAT_VERSION, SystemDescription, validate_name};
use crate::error::{Error, Result};

/// Environment variable overriding the store location
pub const STORE_DIR_ENV: &str = "SYSDESC_DIR";

/// Manifest file inside each description directory
pub const MANIFEST_FILE: &str = "manifest.json";

/// Configuration file at the root of the store
pub const CONFIG_FILE: &str = "config.toml";

/// Write `content` to `path` via a synced temporary file and a rename
pub(crate) fn write_atomic(path: &Path, content: &[u8]) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    let mut temp_name = path.as_os_str().to_owned();
    temp_name.push(".tmp");
    let temp_path = PathBuf::from(temp_name);

    let mut file = fs::File::create(&temp_path)?;
    file.write_all(content)?;
    file.sync_all()?;

    fs::rename(&temp_path, path)?;
    Ok(())
}

/// Resolve the store location from the environment override and home dir
fn resolve_base(env: Option<OsString>, home: Option<PathBuf>) -> Result<PathBuf> {
    if let Some(dir) = env.filter(|d| !d.is_empty()) {
        return Ok(PathBuf::from(dir));
    }
    home.map(|home| home.join(".sysdesc")).ok_or_else(|| {
        Error::Config(format!(
            "Cannot determine the home directory. Set {} to choose a store location.",
            STORE_DIR_ENV
        ))
    })
}

#[derive(Debug, Clone)]
pub struct DescriptionStore {
    base: PathBuf,
}

impl DescriptionStore {
    pub fn new(base: impl Into<PathBuf>) -> Self {
        Self { base: base.into() }
    }

    /// `~/.sysdesc`, or the value of `SYSDESC_DIR` when set and non-empty
    pub fn default_path() -> Result<PathBuf> {
        resolve_base(std::env::var_os(STORE_DIR_ENV), dirs::home_dir())
    }

    /// Open the store at [`Self::default_path`]
    pub fn open_default() -> Result<Self> {
        Ok(Self::new(Self::default_path()?))
    }

    pub fn base(&self) -> &Path {
        &self.base
    }

    pub fn config_path(&self) -> PathBuf {
        self.base.join(CONFIG_FILE)
    }

    pub fn description_path(&self, name: &str) -> PathBuf {
        self.base.join(name)
    }

    pub fn manifest_path(&self, name: &str) -> PathBuf {
        self.description_path(name).join(MANIFEST_FILE)
    }

    pub fn exists(&self, name: &str) -> bool {
        self.manifest_path(name).is_file()
    }

    /// Persist a description, replacing any previous one of that name
    pub fn save(&self, description: &SystemDescription) -> Result<()> {
        validate_name(&description.name)?;
        let json = description.to_json()?;
        write_atomic(&self.manifest_path(&description.name), json.as_bytes())?;
        info!(
            "Saved system description '{}' to {}",
            description.name,
            self.description_path(&description.name).display()
        );
        Ok(())
    }

    /// Load a description at the current format version
    pub fn load(&self, name: &str) -> Result<SystemDescription> {
        let raw = self.load_raw(name)?;

        let found = raw
            .pointer("/meta/format_version")
            .and_then(Value::as_u64)
            .map(|v| v as u32);
        match found {
            Some(FORMAT_VERSION) => {}
            Some(found) if found < FORMAT_VERSION => {
                return Err(Error::IncompatibleFormat {
                    name: name.to_string(),
                    found,
                    expected: FORMAT_VERSION,
                });
            }
            _ => {
                return Err(Error::InvalidDescription {
                    name: name.to_string(),
                    issues: super::validate(&raw),
                });
            }
        }

        let mut description: SystemDescription =
            serde_json::from_value(raw).map_err(|e| Error::InvalidDescription {
                name: name.to_string(),
                issues: vec![e.to_string()],
            })?;
        description.name = name.to_string();
        debug!("Loaded system description '{}'", name);
        Ok(description)
    }

    /// Read a manifest as untyped JSON, for validation and upgrades
    pub fn load_raw(&self, name: &str) -> Result<Value> {
        validate_name(name)?;
        let path = self.manifest_path(name);
        if !path.is_file() {
            return Err(Error::DescriptionNotFound(name.to_string()));
        }
        let content = fs::read_to_string(&path)?;
        Ok(serde_json::from_str(&content)?)
    }

    /// Replace a manifest with untyped JSON
    pub fn save_raw(&self, name: &str, raw: &Value) -> Result<()> {
        validate_name(name)?;
        let json = serde_json::to_string_pretty(raw)?;
        write_atomic(&self.manifest_path(name), json.as_bytes())
    }

    /// Names of all stored descriptions, sorted
    pub fn list(&self) -> Result<Vec<String>> {
        if !self.base.is_dir() {
            return Ok(Vec::new());
        }
        let mut names = Vec::new();
        for entry in fs::read_dir(&self.base)? {
            let entry = entry?;
            let Some(name) = entry.file_name().to_str().map(str::to_string) else {
                continue;
            };
            if validate_name(&name).is_ok() && self.exists(&name) {
                names.push(name);
            }
        }
        names.sort();
        Ok(names)
    }

    /// Remove a description and everything stored with it
    pub fn delete(&self, name: &str) -> Result<()> {
        self.ensure_exists(name)?;
        fs::remove_dir_all(self.description_path(name))?;
        info!("Removed system description '{}'", name);
        Ok(())
    }

    /// Copy a description directory recursively
    pub fn copy(&self, from: &str, to: &str) -> Result<()> {
        self.ensure_exists(from)?;
        self.ensure_free(to)?;

        let source = self.description_path(from);
        let target = self.description_path(to);
        for entry in WalkDir::new(&source) {
            let entry = entry.map_err(|e| {
                e.into_io_error()
                    .unwrap_or_else(|| std::io::Error::other("directory walk failed"))
            })?;
            let relative = entry
                .path()
                .strip_prefix(&source)
                .map_err(std::io::Error::other)?;
            let destination = target.join(relative);
            if entry.file_type().is_dir() {
                fs::create_dir_all(&destination)?;
            } else {
                fs::copy(entry.path(), &destination)?;
            }
        }
        info!("Copied system description '{}' to '{}'", from, to);
        Ok(())
    }

    /// Rename a description
    pub fn rename(&self, from: &str, to: &str) -> Result<()> {
        self.ensure_exists(from)?;
        self.ensure_free(to)?;
        fs::rename(self.description_path(from), self.description_path(to))?;
        info!("Moved system description '{}' to '{}'", from, to);
        Ok(())
    }

    fn ensure_exists(&self, name: &str) -> Result<()> {
        validate_name(name)?;
        if !self.exists(name) {
            return Err(Error::DescriptionNotFound(name.to_string()));
        }
        Ok(())
    }

    fn ensure_free(&self, name: &str) -> Result<()> {
        validate_name(name)?;
        if self.description_path(name).exists() {
            return Err(Error::DescriptionExists(name.to_string()));
        }
        Ok(())
    }
}
