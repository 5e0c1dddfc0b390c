// src/commands/validate.rs

//! Validation and format upgrade commands

use anyhow::{Context, Result};

use sysdesc::description::{UpgradeOutcome, upgrade, validate};
use sysdesc::{DescriptionStore, Error, FORMAT_VERSION, Ui};

/// Report every structural problem of a description
pub fn cmd_validate(store: &DescriptionStore, ui: &Ui, name: &str) -> Result<()> {
    let raw = store.load_raw(name)?;
    let issues = validate(&raw);
    if !issues.is_empty() {
        return Err(Error::InvalidDescription {
            name: name.to_string(),
            issues,
        }
        .into());
    }
    ui.puts(&format!("Validation of system description '{}' succeeded.", name));
    Ok(())
}

/// Upgrade one description, or every stored one with `all`
///
/// With `all`, every description is attempted; failures are reported as
/// they happen and the first one is returned at the end.
pub fn cmd_upgrade_format(
    store: &DescriptionStore,
    ui: &Ui,
    name: Option<&str>,
    all: bool,
    force: bool,
) -> Result<()> {
    let names = match (name, all) {
        (Some(name), false) => vec![name.to_string()],
        (None, true) => store.list().context("Failed to list system descriptions")?,
        (Some(_), true) => {
            return Err(Error::InvalidCommandLine(
                "You cannot provide a system description name together with --all.".to_string(),
            )
            .into());
        }
        (None, false) => {
            return Err(Error::InvalidCommandLine(
                "You have to provide a system description name or --all.".to_string(),
            )
            .into());
        }
    };

    let mut first_failure = None;
    for name in &names {
        match upgrade(store, name, force) {
            Ok(UpgradeOutcome::AlreadyCurrent) => {
                if !all {
                    ui.puts(&format!(
                        "The system description '{}' is up to date. No upgrade necessary.",
                        name
                    ));
                }
            }
            Ok(UpgradeOutcome::Upgraded { from }) => ui.puts(&format!(
                "Upgraded system description '{}' from format version {} to {}.",
                name, from, FORMAT_VERSION
            )),
            Err(e) if all => {
                ui.error(&format!("Upgrading '{}' failed: {}", name, e));
                first_failure.get_or_insert(e);
            }
            Err(e) => return Err(e.into()),
        }
    }

    if let Some(error) = first_failure {
        return Err(anyhow::Error::from(error).context("Not all system descriptions could be upgraded"));
    }
    if all {
        ui.puts("Upgraded all system descriptions.");
    }
    Ok(())
}
