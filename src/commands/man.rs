// src/commands/man.rs

use std::io;

use anyhow::{Context, Result};
use clap::CommandFactory;

use crate::cli::Cli;

/// Render the manual page to standard output
pub fn cmd_man() -> Result<()> {
    let man = clap_mangen::Man::new(Cli::command());
    man.render(&mut io::stdout())
        .context("Failed to render the manual page")?;
    Ok(())
}
