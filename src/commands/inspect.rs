// src/commands/inspect.rs

//! Inspection commands
//!
//! Both commands build an [`InspectionRequest`] from the command line and
//! hand it to the [`InspectionCoordinator`].

use anyhow::{Context, Result};
use tracing::info;

use sysdesc::inspect::InspectionRequest;
use sysdesc::options::inspect_filter;
use sysdesc::target::{self, TargetSystem};
use sysdesc::{
    Config, CurrentUser, DescriptionStore, DockerSystem, InspectionCoordinator, InspectorRegistry,
    ScopeRegistry, Ui,
};

use crate::cli::InspectArgs;

/// Inspect a host over ssh, or the local machine for `localhost`
pub fn cmd_inspect(
    store: &DescriptionStore,
    config: &Config,
    ui: &Ui,
    host: &str,
    remote_user: Option<&str>,
    args: &InspectArgs,
) -> Result<()> {
    let user = CurrentUser::current().context("Failed to determine the current user")?;
    let remote_user = remote_user.unwrap_or(&config.remote_user);
    let target = target::for_host(host, remote_user, &user.name);
    run_inspection(store, ui, target, user, args)
}

/// Inspect a container started from `image`
pub fn cmd_inspect_container(
    store: &DescriptionStore,
    ui: &Ui,
    image: &str,
    args: &InspectArgs,
) -> Result<()> {
    let user = CurrentUser::current().context("Failed to determine the current user")?;
    run_inspection(store, ui, Box::new(DockerSystem::new(image)), user, args)
}

fn run_inspection(
    store: &DescriptionStore,
    ui: &Ui,
    target: Box<dyn TargetSystem>,
    user: CurrentUser,
    args: &InspectArgs,
) -> Result<()> {
    let scopes = ScopeRegistry::new(ui)
        .process_scope_option(args.scope.as_deref(), args.ignore_scope.as_deref())?;
    let filter = inspect_filter(args.skip_files.as_deref(), &args.exclude)?;

    if ui.verbose() && !filter.is_empty() {
        ui.puts("The following filters are applied during inspection:");
        for criterion in filter.criteria() {
            ui.puts(&criterion);
        }
        ui.puts("");
    }

    let identifier = target.identifier().to_string();
    ui.puts(&format!("Inspecting {}...", identifier));

    let request = InspectionRequest::new(target, user)
        .with_name(args.name.clone())
        .with_scopes(scopes)
        .with_filter(filter)
        .with_options(args.extract_options());

    let inspectors = InspectorRegistry::builtin();
    let mut coordinator = InspectionCoordinator::new(store, &inspectors, ui);
    let description = coordinator
        .inspect(request)
        .with_context(|| format!("Inspection of {} failed", identifier))?;

    info!(
        "Inspected {} scope(s) of {}",
        description.scope_list().len(),
        identifier
    );
    ui.puts(&format!(
        "Successfully inspected {}. The system description was saved as '{}'.",
        identifier, description.name
    ));
    ui.hint(&format!(
        "To show the data of the system you just inspected run:\n  sysdesc show {}",
        description.name
    ));
    Ok(())
}
