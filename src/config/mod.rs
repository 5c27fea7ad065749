//! Config module (modularized).
//! Provides configuration types, default paths and XML loading.

pub mod paths;
pub mod types;
pub mod xml;

pub use paths::{default_config_path, default_log_path, path_has_symlink_ancestor};
pub use types::{Config, LogLevel};
pub use xml::{load_config_file, load_config_from_xml, parse_config_xml};

/// Environment variable naming an explicit config file.
pub const CONFIG_ENV: &str = "FSHELPER_CONFIG";
