// src/filter/defaults.rs

//! Criteria every inspection starts with

use super::Filter;
use crate::error::Result;

/// Volatile or virtual trees that are never reported as unmanaged files
pub const DEFAULT_INSPECT_CRITERIA: &[&str] = &[
    "/unmanaged_files/files/name=/tmp",
    "/unmanaged_files/files/name=/var/tmp",
    "/unmanaged_files/files/name=/lost+found",
    "/unmanaged_files/files/name=/var/run",
    "/unmanaged_files/files/name=/var/lib/rpm",
    "/unmanaged_files/files/name=/.snapshots",
    "/unmanaged_files/files/name=/proc",
    "/unmanaged_files/files/name=/sys",
    "/unmanaged_files/files/name=/dev",
    "/unmanaged_files/files/name=/run",
];

/// A filter holding only [`DEFAULT_INSPECT_CRITERIA`]
pub fn default_inspect_filter() -> Result<Filter> {
    Filter::parse(DEFAULT_INSPECT_CRITERIA)
}
