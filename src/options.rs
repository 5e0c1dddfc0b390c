// src/options.rs

//! Helpers turning command line options into request values

use tracing::debug;

use crate::error::{Error, Result};
use crate::filter::{Filter, default_inspect_filter};
use crate::user::CurrentUser;

/// Lowest and highest port the HTTP viewer may bind to
const PORT_RANGE: std::ops::RangeInclusive<u32> = 2..=65535;
const FIRST_UNPRIVILEGED_PORT: u32 = 1024;

/// Which file contents inspectors should capture
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ExtractionOptions {
    pub extract_unmanaged_files: bool,
    pub extract_changed_managed_files: bool,
    pub extract_changed_config_files: bool,
}

impl ExtractionOptions {
    /// Combine the individual flags with `--extract-files`, which sets all
    pub fn from_flags(
        extract_files: bool,
        unmanaged_files: bool,
        changed_managed_files: bool,
        changed_config_files: bool,
    ) -> Self {
        Self {
            extract_unmanaged_files: extract_files || unmanaged_files,
            extract_changed_managed_files: extract_files || changed_managed_files,
            extract_changed_config_files: extract_files || changed_config_files,
        }
    }

    pub fn any(&self) -> bool {
        self.extract_unmanaged_files
            || self.extract_changed_managed_files
            || self.extract_changed_config_files
    }
}

/// Build the filter for an inspection
///
/// Default criteria come first, then one criterion per `--skip-files`
/// entry, then each `--exclude` criterion as given.
pub fn inspect_filter(skip_files: Option<&str>, excludes: &[String]) -> Result<Filter> {
    let mut filter = default_inspect_filter()?;

    if let Some(skip_files) = skip_files {
        for entry in skip_files.split(',').map(str::trim).filter(|e| !e.is_empty()) {
            filter.add_criterion(&format!("/unmanaged_files/files/name={}", entry))?;
        }
    }
    for exclude in excludes {
        filter.add_criterion(exclude)?;
    }

    debug!("Inspection filter has {} criteria", filter.criteria().len());
    Ok(filter)
}

/// Build the filter for `show --exclude`
pub fn show_filter(excludes: &[String]) -> Result<Filter> {
    Filter::parse(excludes)
}

/// Check that `user` may serve on `port`
pub fn check_port_validity(port: u32, user: &CurrentUser) -> Result<()> {
    if !PORT_RANGE.contains(&port) {
        return Err(Error::ServerPortError(
            "Please choose a port between 2 and 65535.".to_string(),
        ));
    }
    if port < FIRST_UNPRIVILEGED_PORT && !user.is_root() {
        return Err(Error::ServerPortError(
            "Only root can bind to ports below 1024.".to_string(),
        ));
    }
    Ok(())
}
