// src/main.rs

use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser};
use tracing::debug;
use tracing_subscriber::EnvFilter;

use sysdesc::{Config, DescriptionStore, ErrorClassifier, SupportChannel, Ui};

mod cli;
mod commands;

use cli::{Cli, Commands};

fn main() -> ExitCode {
    if std::env::var_os("RUST_LIB_BACKTRACE").is_none() {
        // SAFETY: no other threads exist yet
        unsafe { std::env::set_var("RUST_LIB_BACKTRACE", "1") };
    }

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) if !e.use_stderr() => e.exit(),
        Err(e) => return report(&e.into()),
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(if cli.debug { "debug" } else { "info" })),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => report(&e),
    }
}

fn report(error: &anyhow::Error) -> ExitCode {
    let classifier = ErrorClassifier::new("sysdesc", SupportChannel::detect());
    eprint!("{}", classifier.render(error));
    ExitCode::from(classifier.exit_code(error))
}

fn run(cli: Cli) -> Result<()> {
    let Some(command) = cli.command else {
        Cli::command().print_help()?;
        return Ok(());
    };

    let store = DescriptionStore::open_default()?;
    debug!("Using description store {}", store.base().display());
    let (config, broken) = match command {
        Commands::Config { .. } => Config::load_or_default(&store.config_path()),
        _ => (
            Config::load(&store.config_path()).context("Failed to load configuration")?,
            None,
        ),
    };
    let ui = Ui::new(command.verbose(), config.hints);
    if let Some(e) = broken {
        ui.warn(&format!("{} Using default values.", e.to_string().trim_end()));
    }

    match command {
        // =====================================================================
        // Inspection
        // =====================================================================
        Commands::Inspect {
            host,
            remote_user,
            args,
        } => commands::cmd_inspect(&store, &config, &ui, &host, remote_user.as_deref(), &args),
        Commands::InspectContainer { image, args } => {
            commands::cmd_inspect_container(&store, &ui, &image, &args)
        }

        // =====================================================================
        // Description store
        // =====================================================================
        Commands::Show {
            name,
            scope,
            ignore_scope,
            exclude,
            ..
        } => commands::cmd_show(
            &store,
            &ui,
            &name,
            scope.as_deref(),
            ignore_scope.as_deref(),
            &exclude,
        ),
        Commands::List { names, short, .. } => commands::cmd_list(&store, &ui, &names, short),
        Commands::Remove { names, all, .. } => commands::cmd_remove(&store, &ui, &names, all),
        Commands::Copy { from, to } => commands::cmd_copy(&store, &from, &to),
        Commands::Move { from, to } => commands::cmd_move(&store, &from, &to),
        Commands::Validate { name } => commands::cmd_validate(&store, &ui, &name),
        Commands::UpgradeFormat { name, all, force } => {
            commands::cmd_upgrade_format(&store, &ui, name.as_deref(), all, force)
        }
        Commands::Config { key, value } => {
            commands::cmd_config(&store, &config, &ui, key.as_deref(), value.as_deref())
        }
        Commands::Man => commands::cmd_man(),

        // =====================================================================
        // Plugins
        // =====================================================================
        Commands::Build(args) => commands::cmd_build(&store, &args),
        Commands::ExportKiwi(args) => commands::cmd_export_kiwi(&store, &args),
        Commands::ExportAutoyast(args) => commands::cmd_export_autoyast(&store, &args),
        Commands::Analyze(args) => commands::cmd_analyze(&store, &args),
        Commands::Serve(args) => commands::cmd_serve(&store, &config, &args),
    }
}
