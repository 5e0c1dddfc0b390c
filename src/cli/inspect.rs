// src/cli/inspect.rs
//! Options shared by `inspect` and `inspect-container`

use clap::Args;
use sysdesc::ExtractionOptions;

#[derive(Args, Debug, Clone)]
pub struct InspectArgs {
    /// Store the description under this name (default: host or image name)
    #[arg(short, long)]
    pub name: Option<String>,

    /// Inspect only these scopes (comma separated)
    #[arg(short, long)]
    pub scope: Option<String>,

    /// Inspect all scopes except these (comma separated)
    #[arg(short = 'e', long)]
    pub ignore_scope: Option<String>,

    /// Exclude elements matching a filter criterion (repeatable)
    #[arg(long)]
    pub exclude: Vec<String>,

    /// Do not report these unmanaged files (comma separated)
    #[arg(long)]
    pub skip_files: Option<String>,

    /// Show the applied filters
    #[arg(long)]
    pub verbose: bool,

    /// Extract changed configuration files, changed managed files and unmanaged files
    #[arg(short = 'x', long)]
    pub extract_files: bool,

    /// Extract changed configuration files
    #[arg(long)]
    pub extract_changed_config_files: bool,

    /// Extract changed managed files
    #[arg(long)]
    pub extract_changed_managed_files: bool,

    /// Extract unmanaged files
    #[arg(long)]
    pub extract_unmanaged_files: bool,
}

impl InspectArgs {
    pub fn extract_options(&self) -> ExtractionOptions {
        ExtractionOptions::from_flags(
            self.extract_files,
            self.extract_unmanaged_files,
            self.extract_changed_managed_files,
            self.extract_changed_config_files,
        )
    }
}
