//! End-to-end tests for the `publish` command.
//!
//! These tests invoke the actual CLI binary and validate the behavior of the
//! `publish` subcommand from a user's perspective.

#![cfg(unix)]

mod common;
use common::prelude::*;

use std::fs;

#[test]
#[cfg_attr(not(feature = "integration-tests"), ignore)]
fn test_publish_success_text() {
    let fixture = PublishFixture::new();
    let manifest = fixture.manifest(
        vec![fixture.rpm("bash-4.1.rpm"), fixture.rpm("zsh-4.3.rpm")],
        vec![],
    );
    let path = fixture.write_manifest(&manifest);

    fixture
        .command()
        .args(["--color", "never", "publish", "--manifest"])
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::contains("[LINK] Publishing repository rhel-6-i386 (2 units)"))
        .stdout(predicate::str::contains("[OK] Published 2 of 2 units"));

    assert_eq!(
        fs::read_link(fixture.repo_publish_dir()).unwrap(),
        fixture.working_dir()
    );
    assert!(fixture.working_dir().join("bash-4.1.rpm").is_file());
}

#[test]
#[cfg_attr(not(feature = "integration-tests"), ignore)]
fn test_publish_json_report() {
    let fixture = PublishFixture::new();
    let manifest = fixture.manifest(vec![fixture.rpm("a.rpm")], vec![]);
    let path = fixture.write_manifest(&manifest);

    let output = fixture
        .command()
        .args(["publish", "--format", "json", "--manifest"])
        .arg(&path)
        .output()
        .unwrap();
    assert!(output.status.success());

    let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(report["success"], true);
    assert_eq!(report["summary"]["num_units_published"], 1);
    assert_eq!(report["details"]["errors"].as_array().unwrap().len(), 0);
}

#[test]
#[cfg_attr(not(feature = "integration-tests"), ignore)]
fn test_publish_failure_exits_nonzero() {
    let fixture = PublishFixture::new();
    let missing = repo_publisher::unit::ContentUnit::new("rpm", fixture.join("store/gone.rpm"));
    let manifest = fixture.manifest(vec![fixture.rpm("ok.rpm"), missing], vec![]);
    let path = fixture.write_manifest(&manifest);

    fixture
        .command()
        .args(["--color", "never", "publish", "--quiet", "--manifest"])
        .arg(&path)
        .assert()
        .failure()
        .stdout(predicate::str::contains("[ERR]"))
        .stdout(predicate::str::contains("gone.rpm is missing"))
        .stdout(predicate::str::contains("Published").not())
        .stderr(predicate::str::contains("finished with 1 errors"));

    // The good unit is still linked
    assert!(fixture.working_dir().join("ok.rpm").is_file());
}

#[test]
#[cfg_attr(not(feature = "integration-tests"), ignore)]
fn test_publish_progress_lines() {
    let fixture = PublishFixture::new();
    let manifest = fixture.manifest(vec![fixture.rpm("a.rpm")], vec![]);
    let path = fixture.write_manifest(&manifest);

    let output = fixture
        .command()
        .args(["publish", "--quiet", "--progress", "--manifest"])
        .arg(&path)
        .output()
        .unwrap();
    assert!(output.status.success());

    let stdout = String::from_utf8(output.stdout).unwrap();
    let snapshots: Vec<serde_json::Value> = stdout
        .lines()
        .map(|line| serde_json::from_str(line).unwrap())
        .collect();
    assert!(snapshots.len() >= 3);
    let last = snapshots.last().unwrap();
    assert_eq!(last["packages"]["state"], "FINISHED");
    assert_eq!(last["publish_https"]["state"], "FINISHED");
    assert_eq!(last["publish_http"]["state"], "NOT_STARTED");
}

#[test]
#[cfg_attr(not(feature = "integration-tests"), ignore)]
fn test_publish_rejects_invalid_config() {
    let fixture = PublishFixture::new();
    let manifest = fixture.manifest(vec![fixture.rpm("a.rpm")], vec![related("rhel-6", "rhel/6")]);
    let path = fixture.write_manifest(&manifest);

    fixture
        .command()
        .args(["--color", "never", "publish", "--manifest"])
        .arg(&path)
        .assert()
        .failure()
        .stdout(predicate::str::contains("Configuration rejected"));

    assert!(!fixture.working_dir().exists());
}

#[test]
#[cfg_attr(not(feature = "integration-tests"), ignore)]
fn test_publish_manifest_from_env() {
    let fixture = PublishFixture::new();
    let manifest = fixture.manifest(vec![fixture.rpm("a.rpm")], vec![]);
    let path = fixture.write_manifest(&manifest);

    fixture
        .command()
        .env("REPO_PUBLISHER_MANIFEST", &path)
        .arg("publish")
        .assert()
        .success();
}
