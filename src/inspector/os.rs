// src/inspector/os.rs

use serde::Serialize;
use serde_json::Value;
use tracing::debug;

use super::{Inspector, inspection_failed};
use crate::error::Result;
use crate::filter::Filter;
use crate::options::ExtractionOptions;
use crate::os::OsRelease;
use crate::scope::Scope;
use crate::target::TargetSystem;
use crate::user::CurrentUser;

#[derive(Debug, Serialize)]
struct OsPayload {
    name: String,
    version: String,
    architecture: String,
}

/// Operating system name, version and architecture
pub struct OsInspector;

impl Inspector for OsInspector {
    fn scope(&self) -> Scope {
        Scope::Os
    }

    fn inspect(
        &self,
        target: &dyn TargetSystem,
        _user: &CurrentUser,
        _filter: &Filter,
        _options: &ExtractionOptions,
    ) -> Result<Value> {
        let release = target.run_command("cat", &["/etc/os-release"])?;
        let release = OsRelease::parse(&release.stdout);
        let name = release
            .name()
            .ok_or_else(|| inspection_failed(Scope::Os, "/etc/os-release has no NAME"))?;

        let architecture = target.run_command("uname", &["-m"])?.stdout.trim().to_string();
        if architecture.is_empty() {
            return Err(inspection_failed(Scope::Os, "`uname -m` printed nothing"));
        }

        let payload = OsPayload {
            name: name.to_string(),
            version: release.version().unwrap_or_default().to_string(),
            architecture,
        };
        debug!("Detected operating system {:?}", payload);
        Ok(serde_json::to_value(payload)?)
    }
}
