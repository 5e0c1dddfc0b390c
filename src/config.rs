// src/config.rs

//! Persisted user configuration
//!
//! Stored as TOML next to the descriptions (`<store>/config.toml`). A
//! missing file means every key has its default value.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::description::store::write_atomic;
use crate::error::{Error, Result};

/// Port of the HTTP viewer unless configured otherwise
pub const DEFAULT_HTTP_SERVER_PORT: u32 = 7585;

/// Every configuration key, in display order
pub const CONFIG_KEYS: &[&str] = &["remote_user", "hints", "http_server_port"];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// User for remote inspections
    pub remote_user: String,
    /// Show hints after commands
    pub hints: bool,
    /// Port of the HTTP viewer started by `serve`
    pub http_server_port: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            remote_user: "root".to_string(),
            hints: true,
            http_server_port: DEFAULT_HTTP_SERVER_PORT,
        }
    }
}

impl Config {
    /// Load the configuration, falling back to defaults if the file is absent
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            debug!("No configuration at {}, using defaults", path.display());
            return Ok(Self::default());
        }
        let content = fs::read_to_string(path)?;
        toml::from_str(&content)
            .map_err(|e| Error::Config(format!("Failed to parse {}: {}", path.display(), e)))
    }

    /// Load the configuration, or the defaults plus the error if it is broken
    ///
    /// Used by the `config` command so a bad file can still be rewritten.
    pub fn load_or_default(path: &Path) -> (Self, Option<Error>) {
        match Self::load(path) {
            Ok(config) => (config, None),
            Err(e) => {
                debug!("Ignoring unreadable configuration {}: {}", path.display(), e);
                (Self::default(), Some(e))
            }
        }
    }

    /// Write the configuration atomically
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| Error::Config(format!("Failed to serialize configuration: {}", e)))?;
        write_atomic(path, content.as_bytes())?;
        debug!("Saved configuration to {}", path.display());
        Ok(())
    }

    /// Value of `key` as text
    pub fn get(&self, key: &str) -> Result<String> {
        match normalize_key(key).as_str() {
            "remote_user" => Ok(self.remote_user.clone()),
            "hints" => Ok(self.hints.to_string()),
            "http_server_port" => Ok(self.http_server_port.to_string()),
            _ => Err(unknown_key(key)),
        }
    }

    /// Parse `value` for `key` and store it
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        match normalize_key(key).as_str() {
            "remote_user" => {
                if value.trim().is_empty() {
                    return Err(Error::Config("remote_user must not be empty".to_string()));
                }
                self.remote_user = value.to_string();
            }
            "hints" => {
                self.hints = match value {
                    "true" | "on" | "yes" => true,
                    "false" | "off" | "no" => false,
                    _ => {
                        return Err(Error::Config(format!(
                            "The value '{}' is not valid for key 'hints'. Expected true or false.",
                            value
                        )));
                    }
                };
            }
            "http_server_port" => {
                self.http_server_port = value.parse().map_err(|_| {
                    Error::Config(format!(
                        "The value '{}' is not valid for key 'http_server_port'. Expected an integer.",
                        value
                    ))
                })?;
            }
            _ => return Err(unknown_key(key)),
        }
        Ok(())
    }

    /// All keys with their current values
    pub fn entries(&self) -> Vec<(&'static str, String)> {
        CONFIG_KEYS
            .iter()
            .filter_map(|key| self.get(key).ok().map(|value| (*key, value)))
            .collect()
    }
}

/// Keys may be written with hyphens on the command line
fn normalize_key(key: &str) -> String {
    key.replace('-', "_")
}

fn unknown_key(key: &str) -> Error {
    Error::Config(format!(
        "Unknown configuration key: {}. Valid keys are: {}.",
        key,
        CONFIG_KEYS.join(", ")
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_gives_defaults() {
        let temp = TempDir::new().unwrap();
        let config = Config::load(&temp.path().join("config.toml")).unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.remote_user, "root");
        assert!(config.hints);
        assert_eq!(config.http_server_port, 7585);
    }

    #[test]
    fn test_save_and_load() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("config.toml");

        let mut config = Config::default();
        config.set("hints", "false").unwrap();
        config.set("remote-user", "machinist").unwrap();
        config.save(&path).unwrap();

        let loaded = Config::load(&path).unwrap();
        assert!(!loaded.hints);
        assert_eq!(loaded.remote_user, "machinist");
        assert_eq!(loaded.http_server_port, DEFAULT_HTTP_SERVER_PORT);
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("config.toml");
        fs::write(&path, "http_server_port = 8080\n").unwrap();

        let config = Config::load(&path).unwrap();
        assert_eq!(config.http_server_port, 8080);
        assert_eq!(config.remote_user, "root");
    }

    #[test]
    fn test_bad_values_rejected() {
        let mut config = Config::default();
        assert!(matches!(config.set("hints", "maybe"), Err(Error::Config(_))));
        assert!(matches!(
            config.set("http_server_port", "eighty"),
            Err(Error::Config(_))
        ));
        assert!(matches!(config.set("colour", "blue"), Err(Error::Config(_))));
        assert!(matches!(config.get("colour"), Err(Error::Config(_))));
    }

    #[test]
    fn test_unknown_file_keys_rejected() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("config.toml");
        fs::write(&path, "colour = \"blue\"\n").unwrap();
        assert!(matches!(Config::load(&path), Err(Error::Config(_))));
    }

    #[test]
    fn test_broken_file_can_be_repaired() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("config.toml");
        fs::write(&path, "colour = \"blue\"\n").unwrap();

        let (mut config, error) = Config::load_or_default(&path);
        assert!(matches!(error, Some(Error::Config(_))));
        assert_eq!(config, Config::default());

        config.set("hints", "false").unwrap();
        config.save(&path).unwrap();
        assert!(!Config::load(&path).unwrap().hints);
        assert!(Config::load_or_default(&path).1.is_none());
    }

    #[test]
    fn test_entries_in_key_order() {
        let keys: Vec<&str> = Config::default().entries().iter().map(|(k, _)| *k).collect();
        assert_eq!(keys, CONFIG_KEYS);
    }
}
