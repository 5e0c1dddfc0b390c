// src/commands/external.rs

//! Commands delegated to `sysdesc-<command>` plugins
//!
//! The description is loaded before the plugin runs, so a missing or
//! outdated description is reported the same way as for built-in commands.
//! Plugins find the store through `SYSDESC_DIR` and inherit the terminal.

use std::ffi::OsString;
use std::process::Command;

use anyhow::{Context, Result};
use tracing::{debug, info};

use sysdesc::description::store::STORE_DIR_ENV;
use sysdesc::target::{command_line, find_tool};
use sysdesc::{Config, CurrentUser, DescriptionStore, Error, check_port_validity};

use crate::cli::{
    AnalyzeArgs, AutoyastArgs, BuildArgs, DEFAULT_ANALYZE_OPERATION, KiwiArgs, ServeArgs,
};

fn run_plugin(store: &DescriptionStore, command: &str, args: Vec<OsString>) -> Result<()> {
    let program = find_tool(&format!("sysdesc-{}", command))?;
    let line = command_line(&program, &args);
    info!("Running plugin: {}", line);

    let status = Command::new(&program)
        .args(&args)
        .env(STORE_DIR_ENV, store.base())
        .status()
        .with_context(|| format!("Failed to start {}", program.display()))?;
    debug!("Plugin {} exited with {}", program.display(), status);

    if !status.success() {
        return Err(Error::ExternalCommandFailed {
            command: line,
            status: status.to_string(),
            stdout: String::new(),
            stderr: String::new(),
        }
        .into());
    }
    Ok(())
}

fn load_first(store: &DescriptionStore, name: &str) -> Result<()> {
    store
        .load(name)
        .with_context(|| format!("Failed to load system description '{}'", name))?;
    Ok(())
}

pub fn cmd_build(store: &DescriptionStore, args: &BuildArgs) -> Result<()> {
    load_first(store, &args.name)?;
    let mut plugin_args: Vec<OsString> = vec![
        args.name.clone().into(),
        "--image-dir".into(),
        args.image_dir.clone().into(),
    ];
    if args.enable_dhcp {
        plugin_args.push("--enable-dhcp".into());
    }
    if args.enable_ssh {
        plugin_args.push("--enable-ssh".into());
    }
    run_plugin(store, "build", plugin_args)
}

pub fn cmd_export_kiwi(store: &DescriptionStore, args: &KiwiArgs) -> Result<()> {
    load_first(store, &args.name)?;
    let mut plugin_args: Vec<OsString> = vec![
        args.name.clone().into(),
        "--kiwi-dir".into(),
        args.kiwi_dir.clone().into(),
    ];
    if args.force {
        plugin_args.push("--force".into());
    }
    run_plugin(store, "export-kiwi", plugin_args)
}

pub fn cmd_export_autoyast(store: &DescriptionStore, args: &AutoyastArgs) -> Result<()> {
    load_first(store, &args.name)?;
    let mut plugin_args: Vec<OsString> = vec![
        args.name.clone().into(),
        "--autoyast-dir".into(),
        args.autoyast_dir.clone().into(),
    ];
    if args.force {
        plugin_args.push("--force".into());
    }
    run_plugin(store, "export-autoyast", plugin_args)
}

pub fn cmd_analyze(store: &DescriptionStore, args: &AnalyzeArgs) -> Result<()> {
    if args.operation != DEFAULT_ANALYZE_OPERATION {
        return Err(Error::InvalidCommandLine(format!(
            "The operation '{}' is not supported.",
            args.operation
        ))
        .into());
    }
    load_first(store, &args.name)?;
    run_plugin(
        store,
        "analyze",
        vec![
            args.name.clone().into(),
            "--operation".into(),
            args.operation.clone().into(),
        ],
    )
}

/// Validate the port, then start the viewer plugin
pub fn cmd_serve(store: &DescriptionStore, config: &Config, args: &ServeArgs) -> Result<()> {
    let port = args.port.unwrap_or(config.http_server_port);
    let user = CurrentUser::current().context("Failed to determine the current user")?;
    check_port_validity(port, &user)?;

    if let Some(name) = &args.name {
        load_first(store, name)?;
    }

    let mut plugin_args: Vec<OsString> = vec!["--port".into(), port.to_string().into()];
    if args.public {
        plugin_args.push("--public".into());
    }
    if let Some(name) = &args.name {
        plugin_args.push(name.clone().into());
    }
    run_plugin(store, "serve", plugin_args)
}
