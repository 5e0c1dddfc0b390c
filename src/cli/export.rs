// src/cli/export.rs
//! Arguments of the commands handled by plugins

use std::path::PathBuf;

use clap::Args;

/// The only operation `analyze` supports
pub const DEFAULT_ANALYZE_OPERATION: &str = "changed-config-files-diffs";

#[derive(Args, Debug, Clone)]
pub struct BuildArgs {
    /// Name of the description
    pub name: String,

    /// Directory the image is written to
    #[arg(short, long)]
    pub image_dir: PathBuf,

    /// Configure the image to use DHCP
    #[arg(long)]
    pub enable_dhcp: bool,

    /// Enable the ssh service in the image
    #[arg(long)]
    pub enable_ssh: bool,
}

#[derive(Args, Debug, Clone)]
pub struct KiwiArgs {
    /// Name of the description
    pub name: String,

    /// Directory the KIWI description is written to
    #[arg(short, long)]
    pub kiwi_dir: PathBuf,

    /// Overwrite an existing export
    #[arg(long)]
    pub force: bool,
}

#[derive(Args, Debug, Clone)]
pub struct AutoyastArgs {
    /// Name of the description
    pub name: String,

    /// Directory the AutoYaST profile is written to
    #[arg(short, long)]
    pub autoyast_dir: PathBuf,

    /// Overwrite an existing export
    #[arg(long)]
    pub force: bool,
}

#[derive(Args, Debug, Clone)]
pub struct AnalyzeArgs {
    /// Name of the description
    pub name: String,

    /// Analysis to run
    #[arg(short, long, default_value = DEFAULT_ANALYZE_OPERATION)]
    pub operation: String,
}

#[derive(Args, Debug, Clone)]
pub struct ServeArgs {
    /// Description to open (default: the overview of all descriptions)
    pub name: Option<String>,

    /// Port to listen on (default: `http_server_port` from the configuration)
    #[arg(short, long)]
    pub port: Option<u32>,

    /// Listen on all interfaces instead of localhost only
    #[arg(long)]
    pub public: bool,
}
