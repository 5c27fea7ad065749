use assert_fs::prelude::*;
use fshelper::{create_default_file, read, write, DefaultsDir, NoDefaults};
use std::collections::HashMap;
use std::path::Path;

fn bundle_for(path: &Path, payload: &str) -> HashMap<String, String> {
    let mut m = HashMap::new();
    m.insert(path.to_string_lossy().into_owned(), payload.to_string());
    m
}

#[test]
fn default_file_gets_registered_payload() {
    let temp = assert_fs::TempDir::new().unwrap();
    let file = temp.child("test.txt");
    let defaults = bundle_for(file.path(), "abc\ndef");

    create_default_file(file.path(), &defaults).unwrap();

    assert_eq!(read(file.path()).unwrap(), "abc\ndef");
}

#[test]
fn default_file_without_payload_is_empty() {
    let temp = assert_fs::TempDir::new().unwrap();
    let file = temp.child("missing.txt");

    create_default_file(file.path(), &NoDefaults).unwrap();

    assert!(file.path().is_file());
    assert_eq!(read(file.path()).unwrap(), "");
}

#[test]
fn empty_payload_and_missing_payload_look_the_same() {
    let temp = assert_fs::TempDir::new().unwrap();
    let with_empty = temp.child("empty.txt");
    let without = temp.child("none.txt");

    create_default_file(with_empty.path(), &bundle_for(with_empty.path(), "")).unwrap();
    create_default_file(without.path(), &NoDefaults).unwrap();

    assert_eq!(read(with_empty.path()).unwrap(), read(without.path()).unwrap());
}

#[test]
fn existing_file_is_left_alone() {
    let temp = assert_fs::TempDir::new().unwrap();
    let file = temp.child("test.txt");
    write(file.path(), "keep").unwrap();
    let defaults = bundle_for(file.path(), "abc\ndef");

    create_default_file(file.path(), &defaults).unwrap();

    assert_eq!(read(file.path()).unwrap(), "keep");
}

#[test]
fn default_file_creates_parents_and_uses_closure_lookup() {
    let temp = assert_fs::TempDir::new().unwrap();
    let file = temp.child("conf").child("app.toml");
    let lookup = |key: &str| key.ends_with("app.toml").then(|| "name = \"app\"\n".to_string());

    create_default_file(file.path(), &lookup).unwrap();

    assert_eq!(read(file.path()).unwrap(), "name = \"app\"\n");
}

#[test]
fn defaults_dir_supplies_payload_by_path_key() {
    let temp = assert_fs::TempDir::new().unwrap();
    let target = temp.child("work").child("test.txt");

    // The key is the path's text; the bundle mirrors it below its root.
    let bundle = temp.child("bundle");
    let rel: std::path::PathBuf = target
        .path()
        .components()
        .filter(|c| matches!(c, std::path::Component::Normal(_)))
        .collect();
    bundle.child(&rel).write_str("test123\n2ndLine").unwrap();

    create_default_file(target.path(), &DefaultsDir::new(bundle.path())).unwrap();

    assert_eq!(read(target.path()).unwrap(), "test123\n2ndLine");
}

#[test]
fn defaults_dir_without_match_leaves_file_empty() {
    let temp = assert_fs::TempDir::new().unwrap();
    let bundle = temp.child("bundle");
    bundle.create_dir_all().unwrap();
    let target = temp.child("other.txt");

    create_default_file(target.path(), &DefaultsDir::new(bundle.path())).unwrap();

    assert_eq!(read(target.path()).unwrap(), "");
}
