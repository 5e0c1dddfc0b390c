// src/error.rs

//! Error types for sysdesc
//!
//! Every failure the library can produce is a variant of [`Error`]. The
//! variants line up with the categories the CLI distinguishes when it
//! reports a failure (see [`crate::classify`]).

use thiserror::Error;

/// Result type used throughout the library
pub type Result<T> = std::result::Result<T, Error>;

/// Why a requested scope was rejected
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnknownScopeKind {
    /// Token contains characters outside `[a-zA-Z0-9_-]`
    NotValid,
    /// Token is well-formed but names no known scope
    NotSupported,
}

#[derive(Debug, Error)]
pub enum Error {
    /// Contradictory or malformed command line input
    #[error("{0}")]
    InvalidCommandLine(String),

    /// One or more requested scopes are unknown
    #[error("{}", unknown_scope_message(.kind, .scopes, .valid))]
    UnknownScope {
        kind: UnknownScopeKind,
        scopes: Vec<String>,
        /// CLI names of all supported scopes, listed for `NotSupported`
        valid: Vec<String>,
    },

    /// Port for the HTTP viewer cannot be used
    #[error("{0}")]
    ServerPortError(String),

    /// A subprocess run against the target exited unsuccessfully
    #[error("Command `{command}` failed ({status})")]
    ExternalCommandFailed {
        command: String,
        status: String,
        stdout: String,
        stderr: String,
    },

    #[error("Invalid filter criterion '{0}': expected <path>=<value>")]
    InvalidFilter(String),

    #[error(
        "System description name '{0}' is invalid. Valid characters are 'a-zA-Z0-9_:.-'."
    )]
    InvalidDescriptionName(String),

    #[error("System description '{0}' does not exist.")]
    DescriptionNotFound(String),

    #[error("A system description with the name '{0}' already exists.")]
    DescriptionExists(String),

    #[error("System description '{name}' is invalid:\n{}", .issues.join("\n"))]
    InvalidDescription { name: String, issues: Vec<String> },

    #[error(
        "System description '{name}' has format version {found}, expected {expected}. \
         Run `sysdesc upgrade-format {name}` to upgrade it."
    )]
    IncompatibleFormat {
        name: String,
        found: u32,
        expected: u32,
    },

    /// An inspector could not make sense of what the target returned
    #[error("Inspection of scope '{scope}' failed: {message}")]
    InspectionFailed { scope: String, message: String },

    #[error("Required tool '{0}' was not found in PATH")]
    ToolNotFound(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Pick the singular or plural form depending on `count`
pub fn pluralize<'a>(count: usize, singular: &'a str, plural: &'a str) -> &'a str {
    if count == 1 { singular } else { plural }
}

fn unknown_scope_message(kind: &UnknownScopeKind, scopes: &[String], valid: &[String]) -> String {
    let subject = pluralize(scopes.len(), "scope is", "scopes are");
    match kind {
        UnknownScopeKind::NotValid => {
            let quoted: Vec<String> = scopes.iter().map(|s| format!("'{}'", s)).collect();
            format!("The following {} not valid: {}.", subject, quoted.join(", "))
        }
        UnknownScopeKind::NotSupported => format!(
            "The following {} not supported: {}. Valid scopes are: {}.",
            subject,
            scopes.join(", "),
            valid.join(", ")
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_scope_singular() {
        let err = Error::UnknownScope {
            kind: UnknownScopeKind::NotSupported,
            scopes: vec!["unknown-scope".to_string()],
            valid: vec!["os".to_string()],
        };
        assert_eq!(
            err.to_string(),
            "The following scope is not supported: unknown-scope. Valid scopes are: os."
        );
    }

    #[test]
    fn test_unknown_scope_not_valid_quotes_tokens() {
        let err = Error::UnknownScope {
            kind: UnknownScopeKind::NotValid,
            scopes: vec!["fd df".to_string(), "u*n".to_string()],
            valid: Vec::new(),
        };
        assert_eq!(
            err.to_string(),
            "The following scopes are not valid: 'fd df', 'u*n'."
        );
    }

    #[test]
    fn test_pluralize() {
        assert_eq!(pluralize(1, "scope is", "scopes are"), "scope is");
        assert_eq!(pluralize(2, "scope is", "scopes are"), "scopes are");
        assert_eq!(pluralize(0, "scope is", "scopes are"), "scopes are");
    }
}
