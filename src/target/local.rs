// src/target/local.rs

//! The machine sysdesc runs on

use super::command::{self, CommandOutput};
use super::{LOCALHOST, TargetKind, TargetSystem};
use crate::error::Result;

pub struct LocalSystem {
    user: String,
}

impl LocalSystem {
    pub fn new(user: impl Into<String>) -> Self {
        Self { user: user.into() }
    }
}

impl TargetSystem for LocalSystem {
    fn kind(&self) -> TargetKind {
        TargetKind::Local
    }

    fn identifier(&self) -> &str {
        LOCALHOST
    }

    fn connect(&mut self) -> Result<()> {
        Ok(())
    }

    fn disconnect(&mut self) -> Result<()> {
        Ok(())
    }

    fn remote_user(&self) -> &str {
        &self.user
    }

    fn run_command(&self, program: &str, args: &[&str]) -> Result<CommandOutput> {
        let program = command::find_tool(program)?;
        command::run(&program, args)
    }
}
