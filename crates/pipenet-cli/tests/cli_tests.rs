// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
#![allow(missing_docs)]

use assert_cmd::Command;
use pipenet_core::NodeKind;
use pipenet_dry_tests::SchemeBuilder;
use predicates::prelude::*;
use std::path::Path;

fn pipenet(config: &Path) -> Command {
    let mut cmd = Command::cargo_bin("pipenet").unwrap();
    cmd.arg("--config-dir").arg(config);
    cmd
}

fn write_scheme(dir: &Path) -> std::path::PathBuf {
    let path = dir.join("scheme.json");
    let json = SchemeBuilder::new(21)
        .node(NodeKind::Well, 1, [0.0, 0.0])
        .pipe(4, "Ввод", &[[0.0, 0.0], [0.01, 0.0]], 90.0)
        .to_json()
        .unwrap();
    std::fs::write(&path, json).unwrap();
    path
}

#[test]
fn inspect_reports_counts_as_json() {
    let dir = tempfile::tempdir().unwrap();
    let scheme = write_scheme(dir.path());
    let out = pipenet(dir.path())
        .arg("inspect")
        .arg(&scheme)
        .arg("--json")
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let v: serde_json::Value = serde_json::from_slice(&out).unwrap();
    assert_eq!(v["id_scheme"], 21);
    assert_eq!(v["polylines"][0]["name"], "Ввод");
    let pipes = v["counts"]
        .as_array()
        .unwrap()
        .iter()
        .find(|c| c["object_type"] == "Труба")
        .unwrap();
    assert_eq!(pipes["count"], 1);
}

#[test]
fn replay_prints_request_bodies() {
    let dir = tempfile::tempdir().unwrap();
    let scheme = write_scheme(dir.path());
    let ops = dir.path().join("ops.json");
    std::fs::write(
        &ops,
        r#"[{"op":"select_tool","tool":"edit"},
            {"op":"pointer_down","at":[0.0,0.0]},
            {"op":"pointer_move","at":[0.0,0.002]},
            {"op":"pointer_up","at":[0.0,0.002]}]"#,
    )
    .unwrap();
    let out = pipenet(dir.path())
        .arg("replay")
        .arg(&scheme)
        .arg(&ops)
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let v: serde_json::Value = serde_json::from_slice(&out).unwrap();
    assert!(v["delete_objects"].is_null());
    assert!(v["create_objects"].is_null());
    let features = v["update_objects"]["data"]["features"].as_array().unwrap();
    assert_eq!(features.len(), 2);
    assert!(v["update_objects"]["data"].get("id_scheme").is_none());
}

#[test]
fn prefs_set_then_show() {
    let dir = tempfile::tempdir().unwrap();
    pipenet(dir.path())
        .args(["prefs", "--set", "finish_radius_px=12"])
        .assert()
        .success()
        .stdout(predicate::str::contains("12"));
    assert!(dir.path().join("editor_prefs.json").exists());

    pipenet(dir.path())
        .args(["prefs", "--set", "finish_radius_px=-1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("finish_radius_px"));
}

#[test]
fn missing_scheme_file_fails_with_context() {
    let dir = tempfile::tempdir().unwrap();
    pipenet(dir.path())
        .args(["inspect", "nope.json"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("nope.json"));
}
