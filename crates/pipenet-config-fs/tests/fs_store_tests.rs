// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
#![allow(missing_docs)]

use pipenet_app_core::config::{ConfigError, ConfigService, ConfigStore};
use pipenet_app_core::{ConfigPort, EditorPrefs};
use pipenet_config_fs::FsConfigStore;

#[test]
fn missing_file_is_not_found() {
    let dir = tempfile::tempdir().unwrap();
    let store = FsConfigStore::at(dir.path()).unwrap();
    assert!(matches!(store.load_raw("editor_prefs"), Err(ConfigError::NotFound)));
}

#[test]
fn prefs_persist_as_pretty_json_files() {
    let dir = tempfile::tempdir().unwrap();
    let svc = ConfigService::new(FsConfigStore::at(dir.path().join("nested")).unwrap());
    let prefs = EditorPrefs {
        scheme_id: Some(9),
        ..EditorPrefs::default()
    };
    svc.save_prefs(&prefs).unwrap();

    let file = dir.path().join("nested").join("editor_prefs.json");
    let text = std::fs::read_to_string(&file).unwrap();
    assert!(text.contains("\"scheme_id\": 9"));
    assert!(!file.with_extension("json.tmp").exists());

    let reopened = ConfigService::new(FsConfigStore::at(dir.path().join("nested")).unwrap());
    assert_eq!(reopened.load_prefs(), Some(prefs));
}

#[test]
fn keys_cannot_escape_the_base_dir() {
    let dir = tempfile::tempdir().unwrap();
    let store = FsConfigStore::at(dir.path()).unwrap();
    for key in ["../x", "a/b", "", ".hidden"] {
        assert!(matches!(store.save_raw(key, b"{}"), Err(ConfigError::Other(_))));
    }
}
