// src/commands/config.rs

//! The `config` command

use anyhow::{Context, Result};

use sysdesc::{Config, DescriptionStore, Ui};

/// List, read or change configuration values
///
/// Accepts `KEY VALUE` as well as `KEY=VALUE`. Without a key every entry is
/// printed as `key=value`.
pub fn cmd_config(
    store: &DescriptionStore,
    config: &Config,
    ui: &Ui,
    key: Option<&str>,
    value: Option<&str>,
) -> Result<()> {
    let (key, value) = match (key, value) {
        (Some(key), None) => match key.split_once('=') {
            Some((key, value)) => (Some(key), Some(value)),
            None => (Some(key), None),
        },
        other => other,
    };

    match (key, value) {
        (None, _) => {
            for (key, value) in config.entries() {
                ui.puts(&format!("{}={}", key, value));
            }
        }
        (Some(key), None) => {
            ui.puts(&format!("{}={}", key, config.get(key)?));
        }
        (Some(key), Some(value)) => {
            let mut updated = config.clone();
            updated.set(key, value)?;
            let path = store.config_path();
            updated
                .save(&path)
                .with_context(|| format!("Failed to write {}", path.display()))?;
        }
    }
    Ok(())
}
