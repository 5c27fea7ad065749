//! CLI definition and parsing.
//! Defines Args and provides parse() for command-line handling.
//!
//! Notes:
//! - --debug is a shorthand for --log-level debug.
//! - Global flags override values from the XML config file.

use clap::{Parser, Subcommand, ValueHint};
use std::path::PathBuf;

use crate::config::types::{Config, LogLevel};

/// Idempotent file-tree helpers from the shell.
#[derive(Parser, Debug, Clone)]
#[command(author, version, about = "Idempotent file-tree helpers")]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Enable debug logging (equivalent to `--log-level debug`).
    #[arg(
        short = 'd',
        long,
        global = true,
        help = "Enable debug logging (shorthand for --log-level debug)"
    )]
    pub debug: bool,

    /// Set log level. One of: quiet, normal, info, debug.
    #[arg(long, global = true, help = "Set log level: quiet, normal, info, debug")]
    pub log_level: Option<String>,

    /// Also write logs to this file.
    #[arg(long, global = true, value_hint = ValueHint::FilePath)]
    pub log_file: Option<PathBuf>,

    /// Directory holding default payloads used by `default`.
    #[arg(long, global = true, value_hint = ValueHint::DirPath)]
    pub defaults_dir: Option<PathBuf>,

    /// Print where fshelper will look for the config file, then exit.
    #[arg(long, help = "Print the config file location used by fshelper and exit")]
    pub print_config: bool,

    /// Emit logs in structured JSON (includes timestamp, level, and structured fields).
    #[arg(long, global = true, help = "Emit logs in structured JSON")]
    pub json: bool,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Delete a file or a whole directory tree (no-op if absent).
    Delete {
        #[arg(value_hint = ValueHint::AnyPath)]
        path: PathBuf,
    },
    /// Create an empty file and its parent directories (no-op if it exists).
    Touch {
        #[arg(value_hint = ValueHint::FilePath)]
        path: PathBuf,
    },
    /// Create a directory and all missing ancestors.
    Mkdir {
        #[arg(value_hint = ValueHint::DirPath)]
        path: PathBuf,
    },
    /// Create the missing parent directories of a path.
    Mkparents {
        #[arg(value_hint = ValueHint::AnyPath)]
        path: PathBuf,
    },
    /// Create a file from its default payload unless it already exists.
    Default {
        #[arg(value_hint = ValueHint::FilePath)]
        path: PathBuf,
    },
    /// Replace a file's content with TEXT.
    Write {
        #[arg(value_hint = ValueHint::FilePath)]
        path: PathBuf,
        text: String,
    },
    /// Print a file's content.
    Read {
        #[arg(value_hint = ValueHint::FilePath)]
        path: PathBuf,
    },
    /// Print (or with --set, change) a path's modification time.
    Mtime {
        #[arg(value_hint = ValueHint::AnyPath)]
        path: PathBuf,
        /// New timestamp in RFC 3339 form, e.g. 2024-01-31T12:00:00Z
        #[arg(long, value_name = "RFC3339")]
        set: Option<String>,
    },
}

impl Args {
    /// Effective log level derived from flags.
    /// Precedence: --debug > --log-level value > None (use config default).
    pub fn effective_log_level(&self) -> Option<LogLevel> {
        if self.debug {
            return Some(LogLevel::Debug);
        }
        self.log_level.as_deref().and_then(LogLevel::parse)
    }

    /// Apply CLI overrides to a loaded Config (in-place). No-ops for unset flags.
    pub fn apply_overrides(&self, cfg: &mut Config) {
        if let Some(level) = self.effective_log_level() {
            cfg.log_level = level;
        }
        if let Some(lf) = &self.log_file {
            cfg.log_file = Some(lf.clone());
        }
        if let Some(dd) = &self.defaults_dir {
            cfg.defaults_dir = Some(dd.clone());
        }
    }
}

pub fn parse() -> Args {
    Args::parse()
}
