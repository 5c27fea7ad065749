//! Modification timestamps.

use filetime::{set_file_mtime, FileTime};
use std::fs;
use std::path::Path;
use std::time::SystemTime;
use tracing::trace;

use super::helpers::{io_error_with_help, require_path};
use crate::errors::Result;

/// Last-modification time of `path` (follows symlinks).
pub fn get_last_modified<P: AsRef<Path>>(path: P) -> Result<SystemTime> {
    let path = require_path(path.as_ref(), "path")?;
    fs::metadata(path)
        .and_then(|m| m.modified())
        .map_err(io_error_with_help("read modification time", path))
}

/// Set the last-modification time of `path`; the access time is left alone.
pub fn set_last_modified<P: AsRef<Path>>(path: P, when: SystemTime) -> Result<()> {
    let path = require_path(path.as_ref(), "path")?;
    set_file_mtime(path, FileTime::from_system_time(when))
        .map_err(io_error_with_help("set modification time", path))?;
    trace!(path = %path.display(), "set mtime");
    Ok(())
}
