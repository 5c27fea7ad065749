use serial_test::serial;
use std::fs;
use std::path::PathBuf;
use tempfile::tempdir;

use fshelper::config::{load_config_from_xml, CONFIG_ENV};
use fshelper::{default_config_path, LogLevel};

#[test]
#[serial]
fn env_override_points_at_config_file() {
    let td = tempdir().unwrap();
    let cfg = td.path().join("custom_config.xml");
    let defaults = td.path().join("defaults");
    fs::write(
        &cfg,
        format!(
            "<config>\n  <log_level>info</log_level>\n  <defaults_dir>{}</defaults_dir>\n</config>",
            defaults.display()
        ),
    )
    .unwrap();

    // Set env for this process; serialize to avoid cross-test interference
    unsafe {
        std::env::set_var(CONFIG_ENV, &cfg);
    }

    let resolved = default_config_path();
    let loaded = load_config_from_xml();

    unsafe {
        std::env::remove_var(CONFIG_ENV);
    }

    assert_eq!(resolved, Some(cfg));
    let loaded = loaded.unwrap().expect("config present");
    assert_eq!(loaded.log_level, LogLevel::Info);
    assert_eq!(loaded.defaults_dir, Some(defaults));
    assert_eq!(loaded.log_file, None);
}

#[test]
#[serial]
fn missing_config_file_means_defaults() {
    let td = tempdir().unwrap();
    let cfg: PathBuf = td.path().join("absent.xml");
    unsafe {
        std::env::set_var(CONFIG_ENV, &cfg);
    }
    let loaded = load_config_from_xml();
    unsafe {
        std::env::remove_var(CONFIG_ENV);
    }
    assert!(loaded.unwrap().is_none());
}

#[test]
#[serial]
fn malformed_config_is_an_error() {
    let td = tempdir().unwrap();
    let cfg = td.path().join("bad.xml");
    fs::write(&cfg, "<config><unknown_field>1</unknown_field></config>").unwrap();
    unsafe {
        std::env::set_var(CONFIG_ENV, &cfg);
    }
    let loaded = load_config_from_xml();
    unsafe {
        std::env::remove_var(CONFIG_ENV);
    }
    let err = loaded.unwrap_err();
    assert!(format!("{err:#}").contains("bad.xml"));
}
