// src/commands/mod.rs
//! Command handlers for the sysdesc CLI

mod config;
mod external;
mod inspect;
mod man;
mod show;
mod store;
mod validate;

pub use config::cmd_config;
pub use external::{cmd_analyze, cmd_build, cmd_export_autoyast, cmd_export_kiwi, cmd_serve};
pub use inspect::{cmd_inspect, cmd_inspect_container};
pub use man::cmd_man;
pub use show::cmd_show;
pub use store::{cmd_copy, cmd_list, cmd_move, cmd_remove};
pub use validate::{cmd_upgrade_format, cmd_validate};
