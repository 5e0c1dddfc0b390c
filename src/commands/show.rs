// src/commands/show.rs

//! `show` command

use anyhow::{Context, Result};

use sysdesc::options::show_filter;
use sysdesc::render::{RenderOptions, render};
use sysdesc::{DescriptionStore, FilterPhase, ScopeRegistry, Ui};

/// Render a stored description
pub fn cmd_show(
    store: &DescriptionStore,
    ui: &Ui,
    name: &str,
    scope: Option<&str>,
    ignore_scope: Option<&str>,
    exclude: &[String],
) -> Result<()> {
    let scopes = ScopeRegistry::new(ui).process_scope_option(scope, ignore_scope)?;
    let filter = show_filter(exclude)?;

    let mut description = store
        .load(name)
        .with_context(|| format!("Failed to load system description '{}'", name))?;
    description.set_filter_definitions(FilterPhase::Show, filter.criteria());

    let output = render(
        &description,
        &RenderOptions {
            scopes: &scopes,
            filter: &filter,
            verbose: ui.verbose(),
        },
    );
    ui.puts(output.trim_end());
    Ok(())
}
