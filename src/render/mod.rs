// src/render/mod.rs

//! Plain text rendering of descriptions for `show`
//!
//! Every scope becomes a section:
//!
//! ```text
//! # Operating System [db01] (2026-01-01 12:00:00)
//!
//!   Name: openSUSE Leap 15.6
//!   Version: 15.6
//!   Architecture: x86_64
//!
//! ```

mod generic;
mod os;

use chrono::Local;
use serde_json::Value;

use crate::description::{FilterPhase, SystemDescription};
use crate::filter::Filter;
use crate::scope::Scope;

/// What `show` should render
pub struct RenderOptions<'a> {
    pub scopes: &'a [Scope],
    /// Applied to copies of the payloads before rendering
    pub filter: &'a Filter,
    pub verbose: bool,
}

/// Render the selected scopes of `description`
pub fn render(description: &SystemDescription, options: &RenderOptions<'_>) -> String {
    let mut out = String::new();
    if options.verbose {
        render_verbose_header(description, &mut out);
    }

    let mut missing = Vec::new();
    for &scope in options.scopes {
        let Some(payload) = description.scope(scope) else {
            missing.push(scope.cli_name());
            continue;
        };
        let mut payload = payload.clone();
        options.filter.apply(scope, &mut payload);

        out.push_str(&heading(description, scope));
        out.push('\n');
        for line in content(scope, &payload) {
            if line.is_empty() {
                out.push('\n');
            } else {
                out.push_str("  ");
                out.push_str(&line);
                out.push('\n');
            }
        }
        out.push('\n');
    }

    if !missing.is_empty() {
        out.push_str(&format!(
            "# The following requested scopes were not inspected\n\n  * {}\n\n",
            missing.join("\n  * ")
        ));
    }
    out
}

fn heading(description: &SystemDescription, scope: Scope) -> String {
    match description.scope_meta(scope) {
        Some(meta) => format!(
            "# {} [{}] ({})\n",
            scope.display_name(),
            meta.hostname,
            meta.modified
                .with_timezone(&Local)
                .format("%Y-%m-%d %H:%M:%S")
        ),
        None => format!("# {}\n", scope.display_name()),
    }
}

fn content(scope: Scope, payload: &Value) -> Vec<String> {
    match scope {
        Scope::Os => os::content(payload),
        Scope::Users => generic::users(payload),
        Scope::Groups => generic::groups(payload),
        _ => generic::json(payload),
    }
}

fn render_verbose_header(description: &SystemDescription, out: &mut String) {
    out.push_str(&format!(
        "  Type of inspected system: {}\n",
        description.meta.target
    ));

    let sections = [
        (
            FilterPhase::Inspect,
            "The following filters were applied during inspection:",
        ),
        (
            FilterPhase::Show,
            "The following filters were applied before showing the description:",
        ),
    ];
    for (phase, title) in sections {
        let criteria = description.filter_definitions(phase);
        if criteria.is_empty() {
            continue;
        }
        out.push_str(&format!("  {}\n", title));
        for criterion in criteria {
            out.push_str(&format!("    * {}\n", criterion));
        }
    }
    out.push('\n');
}
