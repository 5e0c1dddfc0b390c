// src/cli/mod.rs
//! CLI definitions for sysdesc
//!
//! This module contains all command-line interface definitions using clap.
//! The actual command implementations are in the `commands` module.
//!
//! Inspection:
//! - `inspect` - Inspect a remote host or the local machine
//! - `inspect-container` - Inspect a container image
//!
//! Description store:
//! - `show`, `list`, `remove`, `copy`, `move`
//! - `validate`, `upgrade-format`
//!
//! Delegated to `sysdesc-<command>` plugins:
//! - `build`, `export-kiwi`, `export-autoyast`, `analyze`, `serve`

use clap::{Parser, Subcommand};

mod export;
mod inspect;

pub use export::{
    AnalyzeArgs, AutoyastArgs, BuildArgs, DEFAULT_ANALYZE_OPERATION, KiwiArgs, ServeArgs,
};
pub use inspect::InspectArgs;

#[derive(Parser)]
#[command(name = "sysdesc")]
#[command(author, version)]
#[command(about = "Inspect systems into versioned, filterable system descriptions", long_about = None)]
pub struct Cli {
    /// Enable debug logging (RUST_LOG takes precedence)
    #[arg(long, global = true)]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    // =========================================================================
    // Inspection
    // =========================================================================
    /// Inspect a host over ssh (use `localhost` for this machine)
    Inspect {
        /// Host to inspect
        host: String,

        /// User to log in as (default: `remote_user` from the configuration)
        #[arg(short = 'r', long)]
        remote_user: Option<String>,

        #[command(flatten)]
        args: InspectArgs,
    },

    /// Inspect a container started from an image
    InspectContainer {
        /// Image to start the container from
        image: String,

        #[command(flatten)]
        args: InspectArgs,
    },

    // =========================================================================
    // Description store
    // =========================================================================
    /// Show a system description
    Show {
        /// Name of the description
        name: String,

        /// Show only these scopes (comma separated)
        #[arg(short, long)]
        scope: Option<String>,

        /// Show all scopes except these (comma separated)
        #[arg(short = 'e', long)]
        ignore_scope: Option<String>,

        /// Hide elements matching a filter criterion (repeatable)
        #[arg(long)]
        exclude: Vec<String>,

        /// Show the applied filters
        #[arg(long)]
        verbose: bool,
    },

    /// List stored system descriptions
    List {
        /// Descriptions to list (default: all)
        names: Vec<String>,

        /// Print only the names
        #[arg(long)]
        short: bool,

        /// Show when and by whom each scope was inspected
        #[arg(long)]
        verbose: bool,
    },

    /// Remove system descriptions
    Remove {
        /// Descriptions to remove
        names: Vec<String>,

        /// Remove every stored description
        #[arg(long)]
        all: bool,

        /// Report each removed description
        #[arg(long)]
        verbose: bool,
    },

    /// Copy a system description
    Copy {
        /// Existing description
        from: String,
        /// Name of the copy
        to: String,
    },

    /// Rename a system description
    Move {
        /// Existing description
        from: String,
        /// New name
        to: String,
    },

    /// Check a system description for structural problems
    Validate {
        /// Name of the description
        name: String,
    },

    /// Upgrade descriptions to the current format version
    UpgradeFormat {
        /// Description to upgrade
        name: Option<String>,

        /// Upgrade every stored description
        #[arg(long)]
        all: bool,

        /// Write the upgraded description even if it does not validate
        #[arg(long)]
        force: bool,
    },

    /// Show or change configuration values
    Config {
        /// Configuration key, or KEY=VALUE
        key: Option<String>,
        /// New value
        value: Option<String>,
    },

    /// Print the manual page
    Man,

    // =========================================================================
    // Plugins
    // =========================================================================
    /// Build an image from a system description
    Build(BuildArgs),

    /// Export a system description as KIWI image description
    ExportKiwi(KiwiArgs),

    /// Export a system description as AutoYaST profile
    ExportAutoyast(AutoyastArgs),

    /// Analyze a system description
    Analyze(AnalyzeArgs),

    /// Serve system descriptions over HTTP
    Serve(ServeArgs),
}

impl Commands {
    /// Whether the subcommand was given `--verbose`
    pub fn verbose(&self) -> bool {
        match self {
            Self::Inspect { args, .. } | Self::InspectContainer { args, .. } => args.verbose,
            Self::Show { verbose, .. } | Self::List { verbose, .. } | Self::Remove { verbose, .. } => {
                *verbose
            }
            _ => false,
        }
    }
}
