// src/user.rs

//! The operator running sysdesc

use nix::unistd::{User, getuid};

use crate::error::Result;

/// Identity of the invoking user, captured once per request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CurrentUser {
    pub uid: u32,
    pub name: String,
}

impl CurrentUser {
    /// Look up the real user id of this process
    ///
    /// Users without a passwd entry are named after their numeric uid.
    pub fn current() -> Result<Self> {
        let uid = getuid();
        let name = User::from_uid(uid)
            .map_err(std::io::Error::from)?
            .map(|user| user.name)
            .unwrap_or_else(|| uid.as_raw().to_string());
        Ok(Self {
            uid: uid.as_raw(),
            name,
        })
    }

    pub fn new(uid: u32, name: impl Into<String>) -> Self {
        Self {
            uid,
            name: name.into(),
        }
    }

    pub fn is_root(&self) -> bool {
        self.uid == 0
    }
}
