// src/inspector/groups.rs

use serde::Serialize;
use serde_json::Value;

use super::{Inspector, colon_records, parse_id};
use crate::error::Result;
use crate::filter::Filter;
use crate::options::ExtractionOptions;
use crate::scope::Scope;
use crate::target::TargetSystem;
use crate::user::CurrentUser;

#[derive(Debug, Serialize)]
struct GroupEntry {
    name: String,
    password: String,
    gid: u32,
    users: Vec<String>,
}

/// Groups from `/etc/group`
pub struct GroupsInspector;

impl Inspector for GroupsInspector {
    fn scope(&self) -> Scope {
        Scope::Groups
    }

    fn inspect(
        &self,
        target: &dyn TargetSystem,
        _user: &CurrentUser,
        _filter: &Filter,
        _options: &ExtractionOptions,
    ) -> Result<Value> {
        let group = target.run_command("cat", &["/etc/group"])?;

        let mut groups = Vec::new();
        for fields in colon_records(Scope::Groups, &group.stdout, 4)? {
            groups.push(GroupEntry {
                name: fields[0].to_string(),
                password: fields[1].to_string(),
                gid: parse_id(Scope::Groups, "gid", fields[2])?,
                users: fields[3]
                    .split(',')
                    .filter(|u| !u.is_empty())
                    .map(str::to_string)
                    .collect(),
            });
        }
        groups.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(serde_json::to_value(groups)?)
    }
}
