//! Default-content materialization.
//!
//! `create_default_file` creates a file that does not exist yet and fills it
//! with a payload looked up by the path's textual form. Where payloads come
//! from is up to the caller: anything implementing [`DefaultContent`] works,
//! including closures, maps and a [`DefaultsDir`] bundle on disk.
//!
//! A key with no payload leaves the file empty, exactly as an empty payload
//! would.

use std::collections::HashMap;
use std::fs;
use std::path::{Component, Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, info};

use super::content::write;
use super::create::create_file;
use super::helpers::require_path;
use crate::errors::Result;

/// Lookup of default text payloads by key.
pub trait DefaultContent {
    fn default_content(&self, key: &str) -> Option<String>;
}

impl<F> DefaultContent for F
where
    F: Fn(&str) -> Option<String>,
{
    fn default_content(&self, key: &str) -> Option<String> {
        self(key)
    }
}

impl DefaultContent for HashMap<String, String> {
    fn default_content(&self, key: &str) -> Option<String> {
        self.get(key).cloned()
    }
}

impl<T: DefaultContent + ?Sized> DefaultContent for Arc<T> {
    fn default_content(&self, key: &str) -> Option<String> {
        (**self).default_content(key)
    }
}

/// A lookup that never has a payload.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoDefaults;

impl DefaultContent for NoDefaults {
    fn default_content(&self, _key: &str) -> Option<String> {
        None
    }
}

/// Payloads stored as files under a root directory, addressed by key.
/// The key is interpreted as a path relative to the root; root and prefix
/// components are dropped and keys that climb out with `..` never match.
#[derive(Debug, Clone)]
pub struct DefaultsDir {
    root: PathBuf,
}

impl DefaultsDir {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn resolve(&self, key: &str) -> Option<PathBuf> {
        let mut rel = PathBuf::new();
        for comp in Path::new(key).components() {
            match comp {
                Component::Normal(part) => rel.push(part),
                Component::CurDir | Component::RootDir | Component::Prefix(_) => {}
                Component::ParentDir => return None,
            }
        }
        if rel.as_os_str().is_empty() {
            return None;
        }
        Some(self.root.join(rel))
    }
}

impl DefaultContent for DefaultsDir {
    fn default_content(&self, key: &str) -> Option<String> {
        let candidate = self.resolve(key)?;
        match fs::read_to_string(&candidate) {
            Ok(text) => Some(text),
            Err(e) => {
                debug!(key, candidate = %candidate.display(), error = %e, "no default payload");
                None
            }
        }
    }
}

/// Create `path` with its default payload, unless it already exists.
pub fn create_default_file<P, D>(path: P, defaults: &D) -> Result<()>
where
    P: AsRef<Path>,
    D: DefaultContent + ?Sized,
{
    let path = require_path(path.as_ref(), "path")?;

    if path.exists() {
        debug!(path = %path.display(), "create_default_file: already exists");
        return Ok(());
    }
    create_file(path)?;

    let key = path.to_string_lossy();
    let Some(payload) = defaults.default_content(&key) else {
        debug!(path = %path.display(), "no default payload; left empty");
        return Ok(());
    };

    write(path, &payload)?;
    info!(path = %path.display(), bytes = payload.len(), "Wrote default content");
    Ok(())
}
