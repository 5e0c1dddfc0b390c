// src/inspect/mod.rs

//! Inspection runs
//!
//! An [`InspectionRequest`] bundles everything one run needs: the target,
//! an optional description name, the invoking user, the scopes, the filter
//! and the extraction options. The [`InspectionCoordinator`] takes the
//! request through these phases:
//!
//! ```text
//! Idle -> NameResolved -> Connected -> ScopesRunning -> Assembled -> Persisted
//!   \___________\______________\____________\______________\-----> Failed
//! ```
//!
//! The target is released on every path once it was connected, and a
//! description is only written after every scope succeeded. A request
//! without scopes fails before the target is touched. A failed run
//! leaves any stored description of the same name untouched.

mod session;

pub use session::TargetSession;

use tracing::{debug, warn};

use crate::description::{
    DescriptionStore, FilterPhase, ScopeMeta, SystemDescription, validate_name,
};
use crate::error::{Error, Result, pluralize};
use crate::filter::Filter;
use crate::inspector::InspectorRegistry;
use crate::options::ExtractionOptions;
use crate::scope::{Scope, all_scopes};
use crate::target::{TargetKind, TargetSystem};
use crate::ui::Ui;
use crate::user::CurrentUser;

/// Printed when filters touch the inspected scopes and `--verbose` is off
pub const FILTER_NOTE: &str = "Note: There are filters being applied during inspection. \
     (Use `--verbose` option to show the filters)";

/// Lifecycle of one inspection run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InspectionPhase {
    Idle,
    NameResolved,
    Connected,
    ScopesRunning,
    Assembled,
    Persisted,
    Failed,
}

impl InspectionPhase {
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Persisted | Self::Failed)
    }
}

/// Everything needed for one inspection
pub struct InspectionRequest {
    target: Box<dyn TargetSystem>,
    name: Option<String>,
    user: CurrentUser,
    scopes: Vec<Scope>,
    filter: Filter,
    options: ExtractionOptions,
}

impl InspectionRequest {
    /// Inspect every scope of `target` without filters or extraction
    pub fn new(target: Box<dyn TargetSystem>, user: CurrentUser) -> Self {
        Self {
            target,
            name: None,
            user,
            scopes: all_scopes(),
            filter: Filter::new(),
            options: ExtractionOptions::default(),
        }
    }

    /// Store the description under `name` instead of the target identifier
    pub fn with_name(mut self, name: Option<String>) -> Self {
        self.name = name;
        self
    }

    /// Restrict the run to `scopes`; they are sorted and deduplicated
    pub fn with_scopes(mut self, mut scopes: Vec<Scope>) -> Self {
        scopes.sort();
        scopes.dedup();
        self.scopes = scopes;
        self
    }

    pub fn with_filter(mut self, filter: Filter) -> Self {
        self.filter = filter;
        self
    }

    pub fn with_options(mut self, options: ExtractionOptions) -> Self {
        self.options = options;
        self
    }

    pub fn scopes(&self) -> &[Scope] {
        &self.scopes
    }

    pub fn filter(&self) -> &Filter {
        &self.filter
    }
}

/// Reject image names that cannot double as a description name
///
/// Only applies when no explicit name was given.
pub fn check_container_name(image: &str, name: Option<&str>) -> Result<()> {
    if name.is_none() && image.contains('/') {
        return Err(Error::InvalidCommandLine(format!(
            "System description name '{}' is invalid. By default sysdesc uses the image name \
             as description name if the parameter `--name` is not provided.\n\
             If the image name contains a slash the `--name=NAME` parameter is mandatory. \
             Valid characters are 'a-zA-Z0-9_:.-'.",
            image
        )));
    }
    Ok(())
}

/// Name the description will be stored under
pub fn resolve_name(target: &dyn TargetSystem, name: Option<&str>) -> Result<String> {
    if target.kind() == TargetKind::Container {
        check_container_name(target.identifier(), name)?;
    }
    let name = name.unwrap_or_else(|| target.identifier());
    validate_name(name)?;
    Ok(name.to_string())
}

pub struct InspectionCoordinator<'a> {
    store: &'a DescriptionStore,
    inspectors: &'a InspectorRegistry,
    ui: &'a Ui,
    phase: InspectionPhase,
}

impl<'a> InspectionCoordinator<'a> {
    pub fn new(store: &'a DescriptionStore, inspectors: &'a InspectorRegistry, ui: &'a Ui) -> Self {
        Self {
            store,
            inspectors,
            ui,
            phase: InspectionPhase::Idle,
        }
    }

    pub fn phase(&self) -> InspectionPhase {
        self.phase
    }

    /// Run an inspection and persist the resulting description
    pub fn inspect(&mut self, request: InspectionRequest) -> Result<SystemDescription> {
        let result = self.run(request);
        if let Err(e) = &result {
            debug!("Inspection failed in phase {:?}: {}", self.phase, e);
            self.transition(InspectionPhase::Failed);
        }
        result
    }

    fn run(&mut self, request: InspectionRequest) -> Result<SystemDescription> {
        let InspectionRequest {
            mut target,
            name,
            user,
            scopes,
            filter,
            options,
        } = request;

        if scopes.is_empty() {
            return Err(Error::InvalidCommandLine(
                "No scopes were selected for inspection.".to_string(),
            ));
        }
        let name = resolve_name(target.as_ref(), name.as_deref())?;
        self.transition(InspectionPhase::NameResolved);

        let session = TargetSession::open(target.as_mut())?;
        self.transition(InspectionPhase::Connected);

        let collected = self.collect(session.target(), &name, &user, &scopes, &filter, &options);
        let description = match collected {
            Ok(description) => description,
            Err(e) => {
                if let Err(release_error) = session.release() {
                    warn!("Failed to release target after error: {}", release_error);
                }
                return Err(e);
            }
        };

        let identifier = session.target().identifier().to_string();
        if let Err(e) = session.release() {
            warn!("Failed to release target {}: {}", identifier, e);
            self.ui.warn(&format!(
                "Could not cleanly disconnect from '{}': {}",
                identifier, e
            ));
        }

        self.store.save(&description)?;
        self.transition(InspectionPhase::Persisted);
        Ok(description)
    }

    fn collect(
        &mut self,
        target: &dyn TargetSystem,
        name: &str,
        user: &CurrentUser,
        scopes: &[Scope],
        filter: &Filter,
        options: &ExtractionOptions,
    ) -> Result<SystemDescription> {
        self.transition(InspectionPhase::ScopesRunning);

        let mut description = SystemDescription::new(name, target.kind());
        let mut inspected = Vec::new();
        let mut skipped = Vec::new();

        for &scope in scopes {
            let Some(inspector) = self.inspectors.get(scope) else {
                skipped.push(scope.cli_name());
                continue;
            };
            if options.any() && scope.is_extractable() && !inspector.supports_extraction() {
                debug!("Inspector for {} does not extract files", scope);
            }

            self.ui.puts(&format!("Inspecting {}...", scope.cli_name()));
            let mut payload = inspector.inspect(target, user, filter, options)?;
            filter.apply(scope, &mut payload);
            description.set_scope(
                scope,
                payload,
                ScopeMeta::now(target.identifier(), user.name.as_str()),
            );
            inspected.push(scope);
        }

        if !skipped.is_empty() {
            self.ui.warn(&format!(
                "No inspector is available for the following {}, skipping: {}.",
                pluralize(skipped.len(), "scope", "scopes"),
                skipped.join(", ")
            ));
        }

        let criteria = filter.criteria_for_scopes(&inspected);
        if !criteria.is_empty() && !self.ui.verbose() {
            self.ui.puts(FILTER_NOTE);
        }
        description.set_filter_definitions(FilterPhase::Inspect, criteria);

        self.transition(InspectionPhase::Assembled);
        Ok(description)
    }

    fn transition(&mut self, next: InspectionPhase) {
        debug!("Inspection phase {:?} -> {:?}", self.phase, next);
        self.phase = next;
    }
}
