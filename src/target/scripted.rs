// src/target/scripted.rs

//! Target answering commands from a fixed table, for unit tests

use std::collections::HashMap;

use super::{CommandOutput, TargetKind, TargetSystem};
use crate::error::{Error, Result};

#[derive(Default)]
pub(crate) struct ScriptedTarget {
    responses: HashMap<String, String>,
}

impl ScriptedTarget {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Answer `command` (program and args joined by spaces) with `stdout`
    pub(crate) fn respond(mut self, command: &str, stdout: &str) -> Self {
        self.responses.insert(command.to_string(), stdout.to_string());
        self
    }
}

impl TargetSystem for ScriptedTarget {
    fn kind(&self) -> TargetKind {
        TargetKind::RemoteHost
    }

    fn identifier(&self) -> &str {
        "scripted"
    }

    fn connect(&mut self) -> Result<()> {
        Ok(())
    }

    fn disconnect(&mut self) -> Result<()> {
        Ok(())
    }

    fn remote_user(&self) -> &str {
        "root"
    }

    fn run_command(&self, program: &str, args: &[&str]) -> Result<CommandOutput> {
        let line = std::iter::once(program)
            .chain(args.iter().copied())
            .collect::<Vec<_>>()
            .join(" ");
        match self.responses.get(&line) {
            Some(stdout) => Ok(CommandOutput {
                stdout: stdout.clone(),
                stderr: String::new(),
            }),
            None => Err(Error::ExternalCommandFailed {
                command: line,
                status: "exit status 127".to_string(),
                stdout: String::new(),
                stderr: "command not found".to_string(),
            }),
        }
    }
}
