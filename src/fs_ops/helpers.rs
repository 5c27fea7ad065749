//! I/O helper utilities.
//!
//! Converts io::Error into FsHelperError::Io with the operation, the path and an
//! actionable hint derived from the OS error code, and guards against absent
//! (empty) path arguments.
//!
//! Usage:
//!   let path = require_path(path.as_ref(), "path")?;
//!   fs::create_dir_all(path).map_err(io_error_with_help("create directories", path))?;

use std::io;
use std::path::Path;

use crate::errors::{FsHelperError, Result};

/// Reject the empty path, which stands in for an absent argument.
#[inline]
pub(crate) fn require_path<'a>(path: &'a Path, name: &'static str) -> Result<&'a Path> {
    if path.as_os_str().is_empty() {
        return Err(FsHelperError::NullArgument(name));
    }
    Ok(path)
}

/// Format a human-friendly message with op/path plus platform-aware hints.
fn build_message(op: &str, path: &Path, e: &io::Error) -> String {
    let mut msg = format!("{} '{}': {}", op, path.display(), e);

    if let Some(code) = e.raw_os_error() {
        #[cfg(unix)]
        {
            match code {
                libc::EACCES | libc::EPERM => {
                    msg.push_str(" - permission denied; check ownership and permissions.");
                }
                libc::ENOENT => {
                    msg.push_str(" - path not found; verify it exists.");
                }
                libc::EEXIST => {
                    msg.push_str(" - already exists as a different kind of entry.");
                }
                libc::EISDIR => {
                    msg.push_str(" - is a directory; expected a regular file.");
                }
                libc::ENOTDIR => {
                    msg.push_str(" - a path component is not a directory.");
                }
                libc::ENOTEMPTY => {
                    msg.push_str(" - directory not empty; was the tree modified concurrently?");
                }
                libc::EBUSY => {
                    msg.push_str(" - resource busy; ensure no other process is using it.");
                }
                libc::ENOSPC => {
                    msg.push_str(" - insufficient space on device.");
                }
                libc::EROFS => {
                    msg.push_str(" - read-only filesystem; cannot write here.");
                }
                libc::ELOOP => {
                    msg.push_str(" - too many symbolic link levels (ELOOP); possible symlink cycle.");
                }
                libc::ENAMETOOLONG => {
                    msg.push_str(" - filename or path too long; shorten path segments.");
                }
                libc::EMFILE => {
                    msg.push_str(" - process file descriptor limit reached; close files or raise limits.");
                }
                _ => {}
            }
        }
        #[cfg(windows)]
        {
            match code {
                5 => msg.push_str(" - access denied; check permissions."), // ERROR_ACCESS_DENIED
                32 => msg.push_str(" - sharing violation; file is in use."), // ERROR_SHARING_VIOLATION
                2 | 3 => msg.push_str(" - path not found; verify it exists."), // FILE/PATH NOT FOUND
                80 | 183 => msg.push_str(" - already exists as a different kind of entry."), // FILE_EXISTS / ALREADY_EXISTS
                145 => msg.push_str(" - directory not empty; was the tree modified concurrently?"), // ERROR_DIR_NOT_EMPTY
                112 => msg.push_str(" - insufficient disk space."), // ERROR_DISK_FULL
                19 => msg.push_str(" - write protected / read-only media."), // ERROR_WRITE_PROTECT
                206 => msg.push_str(" - filename or path too long (MAX_PATH exceeded)."),
                _ => {}
            }
        }
        msg.push_str(&format!(" [os code: {}]", code));
    } else {
        match e.kind() {
            io::ErrorKind::PermissionDenied => {
                msg.push_str(" - permission denied; check ownership and permissions.");
            }
            io::ErrorKind::NotFound => {
                msg.push_str(" - path not found; verify it exists.");
            }
            io::ErrorKind::AlreadyExists => {
                msg.push_str(" - already exists as a different kind of entry.");
            }
            _ => {}
        }
    }

    msg
}

/// Returns a closure suitable for `.map_err(...)` that converts io::Error into
/// FsHelperError::Io, keeping the original error as the source.
pub(crate) fn io_error_with_help<'a>(
    op: &'static str,
    path: &'a Path,
) -> impl FnOnce(io::Error) -> FsHelperError + 'a {
    move |e: io::Error| FsHelperError::Io {
        op,
        path: path.to_path_buf(),
        message: build_message(op, path, &e),
        source: e,
    }
}
