// src/target/remote.rs

//! Remote hosts reached through the `ssh` client
//!
//! `connect` starts a background ssh master connection with a control
//! socket in a private temporary directory. Every command afterwards is
//! multiplexed over that master, so authentication happens once.
//! `disconnect` asks the master to exit and removes the directory.

use std::path::PathBuf;

use tempfile::TempDir;
use tracing::debug;

use super::command::{self, CommandOutput, shell_quote};
use super::{TargetKind, TargetSystem};
use crate::error::Result;

/// An open ssh master connection
struct Master {
    ssh: PathBuf,
    /// Holds the control socket; removed when dropped
    dir: TempDir,
}

impl Master {
    fn control_path(&self) -> PathBuf {
        self.dir.path().join("control")
    }
}

pub struct RemoteSystem {
    host: String,
    remote_user: String,
    master: Option<Master>,
}

impl RemoteSystem {
    pub fn new(host: impl Into<String>, remote_user: impl Into<String>) -> Self {
        Self {
            host: host.into(),
            remote_user: remote_user.into(),
            master: None,
        }
    }

    fn destination(&self) -> String {
        format!("{}@{}", self.remote_user, self.host)
    }

    /// Command string executed by the remote shell
    fn remote_command(&self, program: &str, args: &[&str]) -> String {
        let mut words = Vec::with_capacity(args.len() + 3);
        if self.remote_user != "root" {
            words.push("sudo".to_string());
            words.push("-n".to_string());
        }
        words.push(shell_quote(program));
        words.extend(args.iter().map(|arg| shell_quote(arg)));
        words.join(" ")
    }

    fn not_connected(&self) -> std::io::Error {
        std::io::Error::new(
            std::io::ErrorKind::NotConnected,
            format!("Not connected to {}", self.host),
        )
    }
}

impl TargetSystem for RemoteSystem {
    fn kind(&self) -> TargetKind {
        TargetKind::RemoteHost
    }

    fn identifier(&self) -> &str {
        &self.host
    }

    fn connect(&mut self) -> Result<()> {
        if self.master.is_some() {
            return Ok(());
        }
        let ssh = command::find_tool("ssh")?;
        let dir = tempfile::Builder::new().prefix("sysdesc-ssh-").tempdir()?;
        let master = Master { ssh, dir };
        let control_path = format!("ControlPath={}", master.control_path().display());
        let destination = self.destination();

        command::run(
            &master.ssh,
            &[
                "-o",
                "BatchMode=yes",
                "-o",
                "ControlMaster=yes",
                "-o",
                control_path.as_str(),
                "-o",
                "ControlPersist=yes",
                "-fN",
                destination.as_str(),
            ],
        )?;

        debug!("Opened ssh master connection to {}", destination);
        self.master = Some(master);
        Ok(())
    }

    fn disconnect(&mut self) -> Result<()> {
        let Some(master) = self.master.take() else {
            return Ok(());
        };
        let control_path = format!("ControlPath={}", master.control_path().display());
        let destination = self.destination();

        let result = command::run(
            &master.ssh,
            &["-o", control_path.as_str(), "-O", "exit", destination.as_str()],
        );
        debug!("Closed ssh master connection to {}", destination);
        result.map(|_| ())
    }

    fn remote_user(&self) -> &str {
        &self.remote_user
    }

    fn run_command(&self, program: &str, args: &[&str]) -> Result<CommandOutput> {
        let master = self.master.as_ref().ok_or_else(|| self.not_connected())?;
        let control_path = format!("ControlPath={}", master.control_path().display());
        let destination = self.destination();
        let remote_command = self.remote_command(program, args);

        command::run(
            &master.ssh,
            &[
                "-o",
                "BatchMode=yes",
                "-o",
                control_path.as_str(),
                destination.as_str(),
                "--",
                remote_command.as_str(),
            ],
        )
    }
}
