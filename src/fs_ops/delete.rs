//! Recursive, idempotent deletion.
//! - Absent paths are a no-op, and so are symlinks whose target is absent.
//! - Files and symlinks are unlinked directly (links are never followed).
//! - Directories are removed with a post-order walk: children first, root last.
//!
//! Notes:
//! - The walk holds no locks. A concurrent writer in the same tree surfaces as
//!   an Io error on the step that trips over it; already removed entries stay removed.

use std::fs;
use std::io;
use std::path::Path;
use tracing::{debug, info, trace};
use walkdir::WalkDir;

use super::helpers::{io_error_with_help, require_path};
use crate::errors::Result;

/// Delete a file or a whole directory tree.
pub fn delete<P: AsRef<Path>>(path: P) -> Result<()> {
    let path = require_path(path.as_ref(), "path")?;

    // Existence is judged through links: a dangling symlink counts as absent.
    if let Err(e) = fs::metadata(path)
        && e.kind() == io::ErrorKind::NotFound
    {
        debug!(path = %path.display(), "delete: nothing to remove");
        return Ok(());
    }

    let meta = fs::symlink_metadata(path).map_err(io_error_with_help("stat", path))?;

    if !meta.is_dir() {
        fs::remove_file(path).map_err(io_error_with_help("remove file", path))?;
        info!(path = %path.display(), "Removed file");
        return Ok(());
    }

    let removed = delete_tree(path)?;
    info!(path = %path.display(), entries = removed, "Removed directory tree");
    Ok(())
}

/// Post-order removal of everything under (and including) `root`.
/// Returns the number of entries removed.
fn delete_tree(root: &Path) -> Result<usize> {
    let mut removed = 0usize;
    for entry in WalkDir::new(root).contents_first(true) {
        let entry = entry.map_err(|e| {
            let at = e.path().unwrap_or(root).to_path_buf();
            io_error_with_help("walk directory", &at)(io::Error::from(e))
        })?;
        let p = entry.path();
        if entry.file_type().is_dir() {
            fs::remove_dir(p).map_err(io_error_with_help("remove directory", p))?;
        } else {
            fs::remove_file(p).map_err(io_error_with_help("remove file", p))?;
        }
        trace!(path = %p.display(), "removed");
        removed += 1;
    }
    Ok(removed)
}
