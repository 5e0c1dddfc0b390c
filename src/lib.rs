// src/lib.rs

//! sysdesc
//!
//! Inspects hosts, containers and the local machine into versioned system
//! descriptions and manages them in a local store.
//!
//! # Architecture
//!
//! - Filters: `path=value` criteria pruning inspected elements
//! - Scopes: independently inspectable facets of a system
//! - Targets: remote hosts over `ssh`, containers over `docker`, localhost
//! - Inspection: one request, one connection, one atomically stored result
//! - Classification: every failure maps to an operator-facing category

pub mod classify;
pub mod config;
pub mod description;
mod error;
pub mod filter;
pub mod inspect;
pub mod inspector;
pub mod options;
pub mod os;
pub mod render;
pub mod scope;
pub mod target;
pub mod ui;
pub mod user;

pub use classify::{ErrorCategory, ErrorClassifier, SupportChannel};
pub use config::Config;
pub use description::{
    DescriptionStore, FORMAT_VERSION, FilterPhase, ScopeMeta, SystemDescription,
};
pub use error::{Error, Result, UnknownScopeKind, pluralize};
pub use filter::{Criterion, ElementFilter, Filter, Operator};
pub use inspect::{InspectionCoordinator, InspectionPhase, InspectionRequest, check_container_name};
pub use inspector::{Inspector, InspectorRegistry};
pub use options::{ExtractionOptions, check_port_validity};
pub use scope::{Scope, ScopeRegistry, all_scopes};
pub use target::{DockerSystem, LocalSystem, RemoteSystem, TargetKind, TargetSystem};
pub use ui::Ui;
pub use user::CurrentUser;
