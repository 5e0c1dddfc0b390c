// src/commands/store.rs

//! Description store management commands

use anyhow::{Context, Result};
use chrono::Local;

use sysdesc::{DescriptionStore, Error, Ui};

/// List descriptions with the scopes they contain
///
/// With `short` only the names are printed. Descriptions that cannot be
/// loaded are listed with the reason instead of aborting the listing.
pub fn cmd_list(
    store: &DescriptionStore,
    ui: &Ui,
    names: &[String],
    short: bool,
) -> Result<()> {
    let names = if names.is_empty() {
        store.list().context("Failed to list system descriptions")?
    } else {
        for name in names {
            if !store.exists(name) {
                return Err(Error::DescriptionNotFound(name.clone()).into());
            }
        }
        names.to_vec()
    };

    if names.is_empty() {
        ui.puts("There are no system descriptions.");
        return Ok(());
    }

    for name in &names {
        if short {
            ui.puts(name);
            continue;
        }

        let description = match store.load(name) {
            Ok(description) => description,
            Err(Error::IncompatibleFormat { found, .. }) => {
                ui.puts(&format!(
                    " {}:\n   needs to be upgraded (format version {}).\n",
                    name, found
                ));
                continue;
            }
            Err(e) => {
                ui.puts(&format!(" {}:\n   This description is broken: {}\n", name, e));
                continue;
            }
        };

        ui.puts(&format!(" {}:", name));
        for scope in description.scope_list() {
            let line = match description.scope_meta(scope) {
                Some(meta) if ui.verbose() => format!(
                    "   * {}  (inspected on {} by {} at {})",
                    scope.cli_name(),
                    meta.hostname,
                    meta.inspected_by,
                    meta.modified.with_timezone(&Local).format("%Y-%m-%d %H:%M:%S")
                ),
                _ => format!("   * {}", scope.cli_name()),
            };
            ui.puts(&line);
        }
        ui.puts("");
    }
    Ok(())
}

/// Remove the named descriptions, or all of them with `all`
pub fn cmd_remove(store: &DescriptionStore, ui: &Ui, names: &[String], all: bool) -> Result<()> {
    let names = match (all, names.is_empty()) {
        (true, true) => store.list().context("Failed to list system descriptions")?,
        (true, false) => {
            return Err(Error::InvalidCommandLine(
                "You cannot provide a system description name together with --all.".to_string(),
            )
            .into());
        }
        (false, true) => {
            return Err(Error::InvalidCommandLine(
                "You have to provide at least one system description name or --all.".to_string(),
            )
            .into());
        }
        (false, false) => names.to_vec(),
    };

    for name in &names {
        store
            .delete(name)
            .with_context(|| format!("Failed to remove system description '{}'", name))?;
        if ui.verbose() {
            ui.puts(&format!("Removed system description '{}'.", name));
        }
    }
    Ok(())
}

pub fn cmd_copy(store: &DescriptionStore, from: &str, to: &str) -> Result<()> {
    store
        .copy(from, to)
        .with_context(|| format!("Failed to copy system description '{}' to '{}'", from, to))?;
    Ok(())
}

pub fn cmd_move(store: &DescriptionStore, from: &str, to: &str) -> Result<()> {
    store
        .rename(from, to)
        .with_context(|| format!("Failed to move system description '{}' to '{}'", from, to))?;
    Ok(())
}
