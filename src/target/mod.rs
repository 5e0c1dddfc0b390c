// src/target/mod.rs

//! Systems that can be inspected
//!
//! A [`TargetSystem`] is anything sysdesc can run commands on: a remote
//! host reached through `ssh`, a container started with `docker`, or the
//! local machine. Inspectors only talk to this trait and never know which
//! transport is behind it.
//!
//! Targets are acquired with [`TargetSystem::connect`] and must be
//! released with [`TargetSystem::disconnect`]. The inspection coordinator
//! wraps both calls in a guard so release always happens.

mod command;
mod container;
mod local;
mod remote;
#[cfg(test)]
pub(crate) mod scripted;

pub use command::{CommandOutput, command_line, find_tool, run, shell_quote};
pub use container::DockerSystem;
pub use local::LocalSystem;
pub use remote::RemoteSystem;

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Host name that selects the local machine instead of ssh
pub const LOCALHOST: &str = "localhost";

/// What kind of system a description was taken from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TargetKind {
    RemoteHost,
    Container,
    Local,
}

impl TargetKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::RemoteHost => "remote_host",
            Self::Container => "container",
            Self::Local => "local",
        }
    }
}

impl std::fmt::Display for TargetKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

pub trait TargetSystem {
    fn kind(&self) -> TargetKind;

    /// Host name or image name
    fn identifier(&self) -> &str;

    /// Acquire the system so commands can be run on it
    fn connect(&mut self) -> Result<()>;

    /// Release the system; calling this again is a no-op
    fn disconnect(&mut self) -> Result<()>;

    /// User commands run as on the target
    fn remote_user(&self) -> &str;

    /// Run a command and capture its output
    fn run_command(&self, program: &str, args: &[&str]) -> Result<CommandOutput>;
}

/// Pick the target for `inspect HOST`
pub fn for_host(host: &str, remote_user: &str, local_user: &str) -> Box<dyn TargetSystem> {
    if host == LOCALHOST {
        Box::new(LocalSystem::new(local_user))
    } else {
        Box::new(RemoteSystem::new(host, remote_user))
    }
}
