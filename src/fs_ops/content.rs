//! Whole-content reads and writes.
//! - Text is UTF-8; reads decode lossily (malformed sequences become U+FFFD).
//! - Writes truncate: the file ends up holding exactly the given bytes.

use std::fs::{self, File};
use std::io::BufReader;
use std::path::Path;
use tracing::trace;

use super::helpers::{io_error_with_help, require_path};
use crate::errors::Result;

/// Write `contents` to `path`, creating or truncating the file.
/// Accepts text (`&str`, `String`) and bytes (`&[u8]`, `Vec<u8>`).
pub fn write<P: AsRef<Path>, C: AsRef<[u8]>>(path: P, contents: C) -> Result<()> {
    let path = require_path(path.as_ref(), "path")?;
    let bytes = contents.as_ref();
    fs::write(path, bytes).map_err(io_error_with_help("write", path))?;
    trace!(path = %path.display(), bytes = bytes.len(), "wrote file");
    Ok(())
}

/// Read the whole file as text.
pub fn read<P: AsRef<Path>>(path: P) -> Result<String> {
    let bytes = read_bytes(path)?;
    Ok(match String::from_utf8(bytes) {
        Ok(s) => s,
        Err(e) => String::from_utf8_lossy(e.as_bytes()).into_owned(),
    })
}

/// Read the whole file as raw bytes.
pub fn read_bytes<P: AsRef<Path>>(path: P) -> Result<Vec<u8>> {
    let path = require_path(path.as_ref(), "path")?;
    fs::read(path).map_err(io_error_with_help("read", path))
}

/// Open a buffered sequential reader over `path`.
/// The file handle is released when the reader is dropped.
pub fn new_buffered_reader<P: AsRef<Path>>(path: P) -> Result<BufReader<File>> {
    let path = require_path(path.as_ref(), "path")?;
    let file = File::open(path).map_err(io_error_with_help("open", path))?;
    Ok(BufReader::new(file))
}
