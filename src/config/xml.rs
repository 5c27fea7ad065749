//! XML configuration support.
//! - Loads settings from config.xml (quick_xml + serde).
//! - A missing file is not an error: callers fall back to defaults.
//!
//! Notes:
//! - Unknown XML fields are rejected to surface typos early.
//! - Empty or whitespace-only values count as "not set".

use anyhow::{bail, Context, Result};
use quick_xml::de::from_str as from_xml_str;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

use super::paths::default_config_path;
use super::types::{Config, LogLevel};

/// Struct mirroring the XML config for deserialization.
#[derive(Debug, Deserialize)]
#[serde(rename = "config")]
#[serde(deny_unknown_fields)]
struct XmlConfig {
    #[serde(rename = "log_level")]
    log_level: Option<String>,
    #[serde(rename = "log_file")]
    log_file: Option<String>,
    #[serde(rename = "defaults_dir")]
    defaults_dir: Option<String>,
}

fn non_empty_path(v: Option<String>) -> Option<PathBuf> {
    v.and_then(|s| {
        let trimmed = s.trim();
        if trimmed.is_empty() { None } else { Some(PathBuf::from(trimmed)) }
    })
}

/// Parse config XML text into a Config. Unset fields keep their defaults.
pub fn parse_config_xml(content: &str) -> Result<Config> {
    let parsed: XmlConfig = from_xml_str(content).context("parse fshelper config")?;

    let log_level = match parsed.log_level.as_deref().map(str::trim) {
        None | Some("") => LogLevel::default(),
        Some(raw) => match LogLevel::parse(raw) {
            Some(l) => l,
            None => bail!("invalid log_level '{}' (expected quiet, normal, info or debug)", raw),
        },
    };

    Ok(Config {
        log_level,
        log_file: non_empty_path(parsed.log_file),
        defaults_dir: non_empty_path(parsed.defaults_dir),
    })
}

/// Read a config file from an explicit path.
pub fn load_config_file(path: &Path) -> Result<Config> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("read config '{}'", path.display()))?;
    parse_config_xml(&content).with_context(|| format!("in config '{}'", path.display()))
}

/// Load the config from `$FSHELPER_CONFIG` or the default location.
/// Returns Ok(None) when no config file exists.
pub fn load_config_from_xml() -> Result<Option<Config>> {
    let Some(cfg_path) = default_config_path() else {
        return Ok(None);
    };
    if !cfg_path.exists() {
        debug!(path = %cfg_path.display(), "no config file; using defaults");
        return Ok(None);
    }
    load_config_file(&cfg_path).map(Some)
}
