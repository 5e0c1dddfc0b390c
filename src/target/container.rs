// src/target/container.rs

//! Containers run from an image with the `docker` client
//!
//! The container is started with a shell as its entrypoint so it stays up
//! while commands are executed in it, and is removed again on `stop`.

use std::path::PathBuf;

use tracing::debug;

use super::command::{self, CommandOutput};
use super::{TargetKind, TargetSystem};
use crate::error::{Error, Result};

/// Container started from an image
struct Running {
    docker: PathBuf,
    id: String,
}

pub struct DockerSystem {
    image: String,
    running: Option<Running>,
}

impl DockerSystem {
    pub fn new(image: impl Into<String>) -> Self {
        Self {
            image: image.into(),
            running: None,
        }
    }

    /// Start a container from the image
    pub fn start(&mut self) -> Result<()> {
        if self.running.is_some() {
            return Ok(());
        }
        let docker = command::find_tool("docker")?;
        let output = command::run(
            &docker,
            &[
                "run",
                "--rm",
                "-id",
                "--entrypoint",
                "/bin/sh",
                self.image.as_str(),
            ],
        )?;

        let id = output.stdout.trim().to_string();
        if id.is_empty() {
            return Err(Error::ExternalCommandFailed {
                command: format!("docker run {}", self.image),
                status: "no container id returned".to_string(),
                stdout: output.stdout,
                stderr: output.stderr,
            });
        }

        debug!("Started container {} from image {}", id, self.image);
        self.running = Some(Running { docker, id });
        Ok(())
    }

    /// Remove the container; a no-op if it is not running
    pub fn stop(&mut self) -> Result<()> {
        let Some(running) = self.running.take() else {
            return Ok(());
        };
        command::run(&running.docker, &["rm", "-f", running.id.as_str()])?;
        debug!("Removed container {}", running.id);
        Ok(())
    }

    /// Id of the running container
    pub fn container_id(&self) -> Option<&str> {
        self.running.as_ref().map(|r| r.id.as_str())
    }
}

impl TargetSystem for DockerSystem {
    fn kind(&self) -> TargetKind {
        TargetKind::Container
    }

    fn identifier(&self) -> &str {
        &self.image
    }

    fn connect(&mut self) -> Result<()> {
        self.start()
    }

    fn disconnect(&mut self) -> Result<()> {
        self.stop()
    }

    fn remote_user(&self) -> &str {
        "root"
    }

    fn run_command(&self, program: &str, args: &[&str]) -> Result<CommandOutput> {
        let running = self.running.as_ref().ok_or_else(|| {
            std::io::Error::new(
                std::io::ErrorKind::NotConnected,
                format!("Container for image {} is not running", self.image),
            )
        })?;

        let mut exec_args = vec!["exec", running.id.as_str(), program];
        exec_args.extend_from_slice(args);
        command::run(&running.docker, &exec_args)
    }
}
