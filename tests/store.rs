// tests/store.rs

//! Description store, upgrade and show workflows through the public API.

mod common;

use std::fs;

use common::temp_store;
use serde_json::json;
use sysdesc::description::{UpgradeOutcome, upgrade, validate};
use sysdesc::options::show_filter;
use sysdesc::render::{RenderOptions, render};
use sysdesc::{
    Config, Error, FORMAT_VERSION, FilterPhase, Scope, ScopeMeta, SystemDescription, TargetKind,
};

fn sample(name: &str) -> SystemDescription {
    let mut description = SystemDescription::new(name, TargetKind::RemoteHost);
    description.set_scope(
        Scope::Groups,
        json!([
            {"name": "audio", "password": "x", "gid": 17, "users": ["pulse"]},
            {"name": "root", "password": "x", "gid": 0, "users": []}
        ]),
        ScopeMeta::now(name, "root"),
    );
    description.set_filter_definitions(
        FilterPhase::Inspect,
        vec!["/unmanaged_files/files/name=/tmp".to_string()],
    );
    description
}

fn write_v1(store: &sysdesc::DescriptionStore, name: &str) {
    let manifest = json!({
        "meta": {
            "format_version": 1,
            "target": "remote_host",
            "filters": ["/unmanaged_files/files/name=/tmp"],
            "scopes": {
                "os": {"modified": "2026-01-01T00:00:00Z", "hostname": name, "inspected_by": "root"}
            }
        },
        "scopes": {"os": {"name": "Leap", "version": "15.6", "architecture": "x86_64"}}
    });
    let path = store.manifest_path(name);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, serde_json::to_string_pretty(&manifest).unwrap()).unwrap();
}

#[test]
fn test_store_lifecycle() {
    let (_temp, store) = temp_store();
    store.save(&sample("web01")).unwrap();
    store.save(&sample("db01")).unwrap();
    assert_eq!(store.list().unwrap(), vec!["db01", "web01"]);

    store.copy("db01", "db02").unwrap();
    store.rename("web01", "web02").unwrap();
    assert_eq!(store.list().unwrap(), vec!["db01", "db02", "web02"]);
    assert_eq!(store.load("db02").unwrap().name, "db02");

    assert!(matches!(
        store.copy("db01", "web02"),
        Err(Error::DescriptionExists(_))
    ));
    assert!(matches!(
        store.rename("missing", "other"),
        Err(Error::DescriptionNotFound(_))
    ));

    store.delete("db01").unwrap();
    assert_eq!(store.list().unwrap(), vec!["db02", "web02"]);
}

#[test]
fn test_saved_manifest_validates() {
    let (_temp, store) = temp_store();
    store.save(&sample("db01")).unwrap();

    let raw = store.load_raw("db01").unwrap();
    assert_eq!(raw["meta"]["format_version"], FORMAT_VERSION);
    assert!(validate(&raw).is_empty());
}

#[test]
fn test_old_format_requires_upgrade() {
    let (_temp, store) = temp_store();
    write_v1(&store, "legacy");

    assert!(matches!(
        store.load("legacy"),
        Err(Error::IncompatibleFormat {
            found: 1,
            expected: 2,
            ..
        })
    ));
    assert!(!validate(&store.load_raw("legacy").unwrap()).is_empty());

    assert_eq!(
        upgrade(&store, "legacy", false).unwrap(),
        UpgradeOutcome::Upgraded { from: 1 }
    );
    let description = store.load("legacy").unwrap();
    assert_eq!(
        description.filter_definitions(FilterPhase::Inspect),
        &["/unmanaged_files/files/name=/tmp".to_string()]
    );
    assert_eq!(
        upgrade(&store, "legacy", false).unwrap(),
        UpgradeOutcome::AlreadyCurrent
    );
}

#[test]
fn test_show_filter_does_not_touch_store() {
    let (_temp, store) = temp_store();
    store.save(&sample("db01")).unwrap();
    let before = fs::read(store.manifest_path("db01")).unwrap();

    let filter = show_filter(&["/groups/name=audio".to_string()]).unwrap();
    let mut description = store.load("db01").unwrap();
    description.set_filter_definitions(FilterPhase::Show, filter.criteria());
    let out = render(
        &description,
        &RenderOptions {
            scopes: &[Scope::Groups],
            filter: &filter,
            verbose: true,
        },
    );

    assert!(out.contains("  * root (gid: 0, users: )"));
    assert!(!out.contains("audio (gid"));
    assert!(out.contains("    * /groups/name=audio\n"));
    assert!(out.contains("    * /unmanaged_files/files/name=/tmp\n"));
    assert_eq!(fs::read(store.manifest_path("db01")).unwrap(), before);
}

#[test]
fn test_config_lives_in_store() {
    let (_temp, store) = temp_store();
    let path = store.config_path();
    assert_eq!(Config::load(&path).unwrap(), Config::default());

    let mut config = Config::default();
    config.set("http-server-port", "8080").unwrap();
    config.save(&path).unwrap();
    assert_eq!(Config::load(&path).unwrap().http_server_port, 8080);
    assert!(store.list().unwrap().is_empty());
}
