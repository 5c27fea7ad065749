//! Idempotent creation of files and directories.

use std::fs::{self, OpenOptions};
use std::path::Path;
use tracing::{debug, info};

use super::helpers::{io_error_with_help, require_path};
use crate::errors::Result;

/// Create an empty regular file, creating missing parent directories first.
/// No-op if `path` is already a regular file; fails if it is anything else.
pub fn create_file<P: AsRef<Path>>(path: P) -> Result<()> {
    let path = require_path(path.as_ref(), "path")?;

    if path.is_file() {
        debug!(path = %path.display(), "create_file: already a regular file");
        return Ok(());
    }

    create_parent_directories(path)?;
    // create_new: an existing directory (or anything else) at `path` is an error.
    OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(path)
        .map_err(io_error_with_help("create file", path))?;
    info!(path = %path.display(), "Created file");
    Ok(())
}

/// Ensure every ancestor of `path` exists as a directory.
/// No-op if `path` exists or has no parent.
pub fn create_parent_directories<P: AsRef<Path>>(path: P) -> Result<()> {
    let path = require_path(path.as_ref(), "path")?;

    if path.exists() {
        return Ok(());
    }

    // A bare relative name ("file.txt") has an empty parent; treat it like a root.
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => create_directories(parent),
        _ => Ok(()),
    }
}

/// Ensure `path` and all missing ancestors exist as directories.
pub fn create_directories<P: AsRef<Path>>(path: P) -> Result<()> {
    let path = require_path(path.as_ref(), "path")?;

    if path.is_dir() {
        return Ok(());
    }
    fs::create_dir_all(path).map_err(io_error_with_help("create directories", path))?;
    debug!(path = %path.display(), "Created directories");
    Ok(())
}
