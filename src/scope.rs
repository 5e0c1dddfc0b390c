// src/scope.rs

//! Inspection scopes
//!
//! A scope is one facet of system state that can be inspected on its own
//! (packages, users, the operating system, ...). Internally scopes use
//! underscores (`changed_config_files`), on the command line they use
//! hyphens (`changed-config-files`).
//!
//! [`ScopeRegistry`] turns operator input into a sorted, deduplicated list
//! of [`Scope`] values and rejects anything it does not recognize.

use std::collections::BTreeSet;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use strum::IntoEnumIterator;
use strum_macros::{Display, EnumIter, EnumString, IntoStaticStr};
use tracing::debug;

use crate::error::{Error, Result, UnknownScopeKind};
use crate::ui::Ui;

/// Legacy CLI name that still resolves to `changed_config_files`
const LEGACY_CONFIG_FILES: &str = "config-files";

/// All known scopes
///
/// Variants are declared in alphabetical order of their identifiers, so
/// the derived `Ord` sorts scopes by name.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
    IntoStaticStr,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum Scope {
    ChangedConfigFiles,
    ChangedManagedFiles,
    Groups,
    Os,
    Packages,
    Patterns,
    Repositories,
    Services,
    UnmanagedFiles,
    Users,
}

impl Scope {
    /// Internal identifier, e.g. `changed_config_files`
    pub fn as_str(&self) -> &'static str {
        self.into()
    }

    /// Name used on the command line, e.g. `changed-config-files`
    pub fn cli_name(&self) -> String {
        self.as_str().replace('_', "-")
    }

    /// Heading used when rendering the scope
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::ChangedConfigFiles => "Changed Configuration Files",
            Self::ChangedManagedFiles => "Changed Managed Files",
            Self::Groups => "Groups",
            Self::Os => "Operating System",
            Self::Packages => "Packages",
            Self::Patterns => "Patterns",
            Self::Repositories => "Repositories",
            Self::Services => "Services",
            Self::UnmanagedFiles => "Unmanaged Files",
            Self::Users => "Users",
        }
    }

    /// Root of this scope's filter paths, e.g. `/users`
    pub fn filter_root(&self) -> String {
        format!("/{}", self.as_str())
    }

    /// Whether file contents of this scope can be extracted
    pub fn is_extractable(&self) -> bool {
        matches!(
            self,
            Self::ChangedConfigFiles | Self::ChangedManagedFiles | Self::UnmanagedFiles
        )
    }
}

/// Every known scope, sorted
pub fn all_scopes() -> Vec<Scope> {
    Scope::iter().collect()
}

fn is_well_formed(token: &str) -> bool {
    !token.is_empty()
        && token
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
}

/// Validates and normalizes scope names given by the operator
///
/// Borrows the invocation's [`Ui`] so the deprecation warning for the
/// legacy `config-files` name is printed at most once.
pub struct ScopeRegistry<'a> {
    ui: &'a Ui,
}

impl<'a> ScopeRegistry<'a> {
    pub fn new(ui: &'a Ui) -> Self {
        Self { ui }
    }

    /// Every known scope, sorted
    pub fn all_scopes(&self) -> Vec<Scope> {
        all_scopes()
    }

    /// Parse one CLI-facing scope name
    pub fn parse(&self, name: &str) -> Result<Scope> {
        if !is_well_formed(name) {
            return Err(Error::UnknownScope {
                kind: UnknownScopeKind::NotValid,
                scopes: vec![name.to_string()],
                valid: Vec::new(),
            });
        }
        self.lookup(name).ok_or_else(|| self.not_supported(vec![name.to_string()]))
    }

    /// Parse a comma separated list of scope names
    ///
    /// Fails with every malformed token if there are any, otherwise with
    /// every unknown one. The result is sorted and free of duplicates. A
    /// list without any token is a command line error.
    pub fn parse_scopes(&self, text: &str) -> Result<Vec<Scope>> {
        let tokens: Vec<&str> = text
            .split(',')
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .collect();
        if tokens.is_empty() {
            return Err(Error::InvalidCommandLine(
                "No scopes were provided.".to_string(),
            ));
        }

        let invalid: Vec<String> = tokens
            .iter()
            .filter(|t| !is_well_formed(t))
            .map(|t| t.to_string())
            .collect();
        if !invalid.is_empty() {
            return Err(Error::UnknownScope {
                kind: UnknownScopeKind::NotValid,
                scopes: invalid,
                valid: Vec::new(),
            });
        }

        let mut scopes = BTreeSet::new();
        let mut unknown = Vec::new();
        for token in tokens {
            match self.lookup(token) {
                Some(scope) => {
                    scopes.insert(scope);
                }
                None => unknown.push(token.to_string()),
            }
        }
        if !unknown.is_empty() {
            return Err(self.not_supported(unknown));
        }

        debug!("Parsed scopes: {:?}", scopes);
        Ok(scopes.into_iter().collect())
    }

    /// Combine the `--scope` and `--ignore-scope` options
    ///
    /// Giving both is a command line error. Giving neither selects every
    /// scope.
    pub fn process_scope_option(
        &self,
        included: Option<&str>,
        excluded: Option<&str>,
    ) -> Result<Vec<Scope>> {
        match (included, excluded) {
            (Some(_), Some(_)) => Err(Error::InvalidCommandLine(
                "You cannot provide the --scope and --ignore-scope option at the same time."
                    .to_string(),
            )),
            (Some(included), None) => self.parse_scopes(included),
            (None, Some(excluded)) => {
                let excluded = self.parse_scopes(excluded)?;
                Ok(all_scopes()
                    .into_iter()
                    .filter(|scope| !excluded.contains(scope))
                    .collect())
            }
            (None, None) => Ok(all_scopes()),
        }
    }

    fn lookup(&self, token: &str) -> Option<Scope> {
        if token == LEGACY_CONFIG_FILES {
            self.ui.warn_once(
                LEGACY_CONFIG_FILES,
                "The scope name `config-files` is deprecated. \
                 The new name is `changed-config-files`.",
            );
            return Some(Scope::ChangedConfigFiles);
        }
        Scope::from_str(&token.replace('-', "_")).ok()
    }

    fn not_supported(&self, scopes: Vec<String>) -> Error {
        Error::UnknownScope {
            kind: UnknownScopeKind::NotSupported,
            scopes,
            valid: all_scopes().iter().map(Scope::cli_name).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_scopes_sorted() {
        let names: Vec<&str> = all_scopes().iter().map(Scope::as_str).collect();
        let mut sorted = names.clone();
        sorted.sort();
        assert_eq!(names, sorted);
        assert_eq!(names.len(), 10);
        assert_eq!(names[0], "changed_config_files");
    }

    #[test]
    fn test_cli_name_uses_hyphens() {
        assert_eq!(Scope::UnmanagedFiles.cli_name(), "unmanaged-files");
        assert_eq!(Scope::Os.cli_name(), "os");
        assert_eq!(Scope::ChangedConfigFiles.to_string(), "changed_config_files");
    }

    #[test]
    fn test_parse_accepts_both_spellings() {
        let ui = Ui::capturing(false);
        let registry = ScopeRegistry::new(&ui);
        assert_eq!(registry.parse("unmanaged-files").unwrap(), Scope::UnmanagedFiles);
        assert_eq!(registry.parse("unmanaged_files").unwrap(), Scope::UnmanagedFiles);
    }

    #[test]
    fn test_process_scope_option_defaults_to_all() {
        let ui = Ui::capturing(false);
        let registry = ScopeRegistry::new(&ui);
        assert_eq!(registry.process_scope_option(None, None).unwrap(), all_scopes());
    }

    #[test]
    fn test_process_scope_option_sorts_included() {
        let ui = Ui::capturing(false);
        let registry = ScopeRegistry::new(&ui);
        let scopes = registry
            .process_scope_option(Some("packages,users,os"), None)
            .unwrap();
        assert_eq!(scopes, vec![Scope::Os, Scope::Packages, Scope::Users]);
    }

    #[test]
    fn test_process_scope_option_excluded() {
        let ui = Ui::capturing(false);
        let registry = ScopeRegistry::new(&ui);
        let scopes = registry
            .process_scope_option(None, Some("packages,os"))
            .unwrap();
        assert_eq!(scopes.len(), 8);
        assert!(!scopes.contains(&Scope::Packages));
        assert!(!scopes.contains(&Scope::Os));
    }

    #[test]
    fn test_process_scope_option_rejects_both() {
        let ui = Ui::capturing(false);
        let registry = ScopeRegistry::new(&ui);
        let err = registry
            .process_scope_option(Some("os"), Some("users"))
            .unwrap_err();
        assert!(matches!(err, Error::InvalidCommandLine(_)));
    }

    #[test]
    fn test_duplicates_collapse() {
        let ui = Ui::capturing(false);
        let registry = ScopeRegistry::new(&ui);
        assert_eq!(
            registry.parse_scopes("packages,packages").unwrap(),
            vec![Scope::Packages]
        );
    }

    #[test]
    fn test_empty_scope_list_rejected() {
        let ui = Ui::capturing(false);
        let registry = ScopeRegistry::new(&ui);
        for text in [",", " ", "", " , ,"] {
            assert!(
                matches!(registry.parse_scopes(text), Err(Error::InvalidCommandLine(_))),
                "{text:?} should be rejected"
            );
        }
        assert!(matches!(
            registry.process_scope_option(Some(","), None),
            Err(Error::InvalidCommandLine(_))
        ));
        assert!(matches!(
            registry.process_scope_option(None, Some(",")),
            Err(Error::InvalidCommandLine(_))
        ));
    }

    #[test]
    fn test_legacy_alias_warns_once() {
        let ui = Ui::capturing(false);
        let registry = ScopeRegistry::new(&ui);
        assert_eq!(
            registry.parse_scopes("config-files").unwrap(),
            vec![Scope::ChangedConfigFiles]
        );
        registry.parse_scopes("config-files,os").unwrap();

        let stderr = ui.captured().stderr;
        assert_eq!(
            stderr
                .matches("The scope name `config-files` is deprecated.")
                .count(),
            1
        );
        assert!(stderr.contains("The new name is `changed-config-files`."));
    }

    #[test]
    fn test_unknown_scope_wording() {
        let ui = Ui::capturing(false);
        let registry = ScopeRegistry::new(&ui);

        let single = registry.parse_scopes("unknown-scope").unwrap_err().to_string();
        assert!(single.starts_with("The following scope is not supported: unknown-scope."));
        assert!(single.contains("Valid scopes are: changed-config-files"));

        let plural = registry
            .parse_scopes("unknown-scope,unknown-scope2")
            .unwrap_err()
            .to_string();
        assert!(plural.starts_with(
            "The following scopes are not supported: unknown-scope, unknown-scope2."
        ));
    }

    #[test]
    fn test_malformed_tokens_reported_together() {
        let ui = Ui::capturing(false);
        let registry = ScopeRegistry::new(&ui);
        let err = registry.parse_scopes("fd df,u*n,os").unwrap_err();
        assert_eq!(
            err.to_string(),
            "The following scopes are not valid: 'fd df', 'u*n'."
        );
    }
}
