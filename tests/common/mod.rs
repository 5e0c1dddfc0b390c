// tests/common/mod.rs

//! Shared test utilities and helpers for integration tests.

#![allow(dead_code)]

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use serde_json::Value;
use sysdesc::target::CommandOutput;
use sysdesc::{
    CurrentUser, DescriptionStore, Error, ExtractionOptions, Filter, Inspector, Result, Scope,
    TargetKind, TargetSystem,
};
use tempfile::TempDir;

/// Connect and disconnect calls seen by a [`FakeTarget`]
#[derive(Clone, Default)]
pub struct Calls {
    pub connects: Rc<Cell<usize>>,
    pub disconnects: Rc<Cell<usize>>,
}

impl Calls {
    pub fn connects(&self) -> usize {
        self.connects.get()
    }

    pub fn disconnects(&self) -> usize {
        self.disconnects.get()
    }
}

/// Target that records how often it was acquired and released
pub struct FakeTarget {
    kind: TargetKind,
    identifier: String,
    calls: Calls,
    fail_connect: bool,
}

impl FakeTarget {
    pub fn new(kind: TargetKind, identifier: &str) -> (Self, Calls) {
        let calls = Calls::default();
        let target = Self {
            kind,
            identifier: identifier.to_string(),
            calls: calls.clone(),
            fail_connect: false,
        };
        (target, calls)
    }

    pub fn remote(identifier: &str) -> (Self, Calls) {
        Self::new(TargetKind::RemoteHost, identifier)
    }

    pub fn failing_connect(mut self) -> Self {
        self.fail_connect = true;
        self
    }
}

impl TargetSystem for FakeTarget {
    fn kind(&self) -> TargetKind {
        self.kind
    }

    fn identifier(&self) -> &str {
        &self.identifier
    }

    fn connect(&mut self) -> Result<()> {
        self.calls.connects.set(self.calls.connects.get() + 1);
        if self.fail_connect {
            return Err(Error::ExternalCommandFailed {
                command: format!("ssh {}", self.identifier),
                status: "exit status 255".to_string(),
                stdout: String::new(),
                stderr: "Connection refused".to_string(),
            });
        }
        Ok(())
    }

    fn disconnect(&mut self) -> Result<()> {
        self.calls.disconnects.set(self.calls.disconnects.get() + 1);
        Ok(())
    }

    fn remote_user(&self) -> &str {
        "root"
    }

    fn run_command(&self, program: &str, _args: &[&str]) -> Result<CommandOutput> {
        Err(Error::ToolNotFound(program.to_string()))
    }
}

/// Extraction options seen by a [`FakeInspector`], one entry per call
pub type Received = Rc<RefCell<Vec<ExtractionOptions>>>;

/// Inspector returning a fixed payload, or failing
pub struct FakeInspector {
    scope: Scope,
    payload: Option<Value>,
    extracts: bool,
    received: Received,
}

impl FakeInspector {
    pub fn returning(scope: Scope, payload: Value) -> Box<Self> {
        Box::new(Self {
            scope,
            payload: Some(payload),
            extracts: false,
            received: Received::default(),
        })
    }

    pub fn failing(scope: Scope) -> Box<Self> {
        Box::new(Self {
            scope,
            payload: None,
            extracts: false,
            received: Received::default(),
        })
    }

    /// Inspector that records the extraction options it is called with
    pub fn recording(scope: Scope, payload: Value, extracts: bool) -> (Box<Self>, Received) {
        let received = Received::default();
        let inspector = Box::new(Self {
            scope,
            payload: Some(payload),
            extracts,
            received: received.clone(),
        });
        (inspector, received)
    }
}

impl Inspector for FakeInspector {
    fn scope(&self) -> Scope {
        self.scope
    }

    fn supports_extraction(&self) -> bool {
        self.extracts
    }

    fn inspect(
        &self,
        _target: &dyn TargetSystem,
        _user: &CurrentUser,
        _filter: &Filter,
        options: &ExtractionOptions,
    ) -> Result<Value> {
        self.received.borrow_mut().push(*options);
        self.payload.clone().ok_or_else(|| Error::InspectionFailed {
            scope: self.scope.as_str().to_string(),
            message: "simulated failure".to_string(),
        })
    }
}

/// Create an empty description store.
///
/// Returns (TempDir, store) - keep the TempDir alive to prevent cleanup.
pub fn temp_store() -> (TempDir, DescriptionStore) {
    let temp_dir = tempfile::tempdir().unwrap();
    let store = DescriptionStore::new(temp_dir.path().join("descriptions"));
    (temp_dir, store)
}

pub fn test_user() -> CurrentUser {
    CurrentUser::new(1000, "alice")
}
