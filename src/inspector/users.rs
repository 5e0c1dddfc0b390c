// src/inspector/users.rs

use serde::Serialize;
use serde_json::Value;

use super::{Inspector, colon_records, parse_id};
use crate::error::Result;
use crate::filter::Filter;
use crate::options::ExtractionOptions;
use crate::scope::Scope;
use crate::target::TargetSystem;
use crate::user::CurrentUser;

const NAME_PATH: &str = "/users/name";

#[derive(Debug, Serialize)]
struct UserEntry {
    name: String,
    password: String,
    uid: u32,
    gid: u32,
    comment: String,
    home: String,
    shell: String,
}

/// Accounts from `/etc/passwd`
pub struct UsersInspector;

impl Inspector for UsersInspector {
    fn scope(&self) -> Scope {
        Scope::Users
    }

    fn inspect(
        &self,
        target: &dyn TargetSystem,
        _user: &CurrentUser,
        filter: &Filter,
        _options: &ExtractionOptions,
    ) -> Result<Value> {
        let passwd = target.run_command("cat", &["/etc/passwd"])?;

        let mut users = Vec::new();
        for fields in colon_records(Scope::Users, &passwd.stdout, 7)? {
            if filter.matches(NAME_PATH, fields[0]) {
                continue;
            }
            users.push(UserEntry {
                name: fields[0].to_string(),
                password: fields[1].to_string(),
                uid: parse_id(Scope::Users, "uid", fields[2])?,
                gid: parse_id(Scope::Users, "gid", fields[3])?,
                comment: fields[4].to_string(),
                home: fields[5].to_string(),
                shell: fields[6].to_string(),
            });
        }
        users.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(serde_json::to_value(users)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::target::scripted::ScriptedTarget;
    use serde_json::json;

    const PASSWD: &str = "\
root:x:0:0:root:/root:/bin/bash
nobody:x:65534:65533:nobody:/var/lib/nobody:/bin/bash
games:x:12:100:Games account:/var/games:/usr/sbin/nologin
";

    fn inspect(passwd: &str, filter: &Filter) -> Result<Value> {
        let target = ScriptedTarget::new().respond("cat /etc/passwd", passwd);
        UsersInspector.inspect(
            &target,
            &CurrentUser::new(0, "root"),
            filter,
            &ExtractionOptions::default(),
        )
    }

    #[test]
    fn test_inspect_users() {
        let users = inspect(PASSWD, &Filter::new()).unwrap();
        let names: Vec<&str> = users
            .as_array()
            .unwrap()
            .iter()
            .map(|u| u["name"].as_str().unwrap())
            .collect();
        assert_eq!(names, vec!["games", "nobody", "root"]);
        assert_eq!(
            users[2],
            json!({
                "name": "root", "password": "x", "uid": 0, "gid": 0,
                "comment": "root", "home": "/root", "shell": "/bin/bash"
            })
        );
    }

    #[test]
    fn test_name_filter_honored() {
        let filter: Filter = "/users/name=games".parse().unwrap();
        let users = inspect(PASSWD, &filter).unwrap();
        assert_eq!(users.as_array().unwrap().len(), 2);
    }

    #[test]
    fn test_malformed_passwd() {
        assert!(matches!(
            inspect("root:x:0:0\n", &Filter::new()),
            Err(Error::InspectionFailed { .. })
        ));
        assert!(matches!(
            inspect("root:x:zero:0:root:/root:/bin/bash\n", &Filter::new()),
            Err(Error::InspectionFailed { .. })
        ));
    }
}
