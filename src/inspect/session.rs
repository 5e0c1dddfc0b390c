// src/inspect/session.rs

//! Scoped acquisition of a target system
//!
//! A [`TargetSession`] connects on creation and disconnects exactly once:
//! either explicitly through [`TargetSession::release`], which reports the
//! outcome, or on drop if the session is abandoned by an early return or
//! a panic.

use tracing::{debug, warn};

use crate::error::Result;
use crate::target::TargetSystem;

pub struct TargetSession<'a> {
    target: &'a mut dyn TargetSystem,
    released: bool,
}

impl<'a> TargetSession<'a> {
    /// Connect to `target`; nothing needs releasing if this fails
    pub fn open(target: &'a mut dyn TargetSystem) -> Result<Self> {
        target.connect()?;
        debug!("Acquired target {}", target.identifier());
        Ok(Self {
            target,
            released: false,
        })
    }

    pub fn target(&self) -> &dyn TargetSystem {
        &*self.target
    }

    /// Disconnect and report whether that worked
    pub fn release(mut self) -> Result<()> {
        self.released = true;
        debug!("Releasing target {}", self.target.identifier());
        self.target.disconnect()
    }
}

impl Drop for TargetSession<'_> {
    fn drop(&mut self) {
        if self.released {
            return;
        }
        self.released = true;
        if let Err(e) = self.target.disconnect() {
            warn!("Failed to release target {}: {}", self.target.identifier(), e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::target::{CommandOutput, TargetKind};

    #[derive(Default)]
    struct Counting {
        connects: usize,
        disconnects: usize,
        fail_connect: bool,
    }

    impl TargetSystem for Counting {
        fn kind(&self) -> TargetKind {
            TargetKind::Local
        }
        fn identifier(&self) -> &str {
            "counting"
        }
        fn connect(&mut self) -> Result<()> {
            self.connects += 1;
            if self.fail_connect {
                return Err(Error::ToolNotFound("ssh".to_string()));
            }
            Ok(())
        }
        fn disconnect(&mut self) -> Result<()> {
            self.disconnects += 1;
            Ok(())
        }
        fn remote_user(&self) -> &str {
            "root"
        }
        fn run_command(&self, _program: &str, _args: &[&str]) -> Result<CommandOutput> {
            Ok(CommandOutput::default())
        }
    }

    #[test]
    fn test_release_disconnects_once() {
        let mut target = Counting::default();
        let session = TargetSession::open(&mut target).unwrap();
        session.release().unwrap();
        assert_eq!((target.connects, target.disconnects), (1, 1));
    }

    #[test]
    fn test_drop_disconnects() {
        let mut target = Counting::default();
        {
            let _session = TargetSession::open(&mut target).unwrap();
        }
        assert_eq!(target.disconnects, 1);
    }

    #[test]
    fn test_failed_connect_needs_no_release() {
        let mut target = Counting {
            fail_connect: true,
            ..Default::default()
        };
        assert!(TargetSession::open(&mut target).is_err());
        assert_eq!(target.disconnects, 0);
    }
}
