// src/target/command.rs

//! Subprocess helpers shared by the target implementations

use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use tracing::debug;

use crate::error::{Error, Result};

/// Captured output of a successful command
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandOutput {
    pub stdout: String,
    pub stderr: String,
}

/// Locate a client binary on `PATH`
pub fn find_tool(name: &str) -> Result<PathBuf> {
    which::which(name).map_err(|_| Error::ToolNotFound(name.to_string()))
}

/// Run `program` with `args` and capture its output
///
/// A non-zero exit status becomes [`Error::ExternalCommandFailed`].
pub fn run<S: AsRef<OsStr>>(program: &Path, args: &[S]) -> Result<CommandOutput> {
    let line = command_line(program, args);
    debug!("Running: {}", line);

    let output = Command::new(program)
        .args(args)
        .stdin(Stdio::null())
        .output()?;

    let stdout = String::from_utf8_lossy(&output.stdout).into_owned();
    let stderr = String::from_utf8_lossy(&output.stderr).into_owned();

    if !output.status.success() {
        let status = match output.status.code() {
            Some(code) => format!("exit status {}", code),
            None => "terminated by signal".to_string(),
        };
        return Err(Error::ExternalCommandFailed {
            command: line,
            status,
            stdout,
            stderr,
        });
    }

    Ok(CommandOutput { stdout, stderr })
}

/// Render a command for logs and error messages
pub fn command_line<S: AsRef<OsStr>>(program: &Path, args: &[S]) -> String {
    std::iter::once(program.as_os_str())
        .chain(args.iter().map(|arg| arg.as_ref()))
        .map(|part| shell_quote(&part.to_string_lossy()))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Quote `word` for a POSIX shell
pub fn shell_quote(word: &str) -> String {
    let safe = !word.is_empty()
        && word
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || "_-./:=@%+,".contains(c));
    if safe {
        word.to_string()
    } else {
        format!("'{}'", word.replace('\'', "'\\''"))
    }
}
