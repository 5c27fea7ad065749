//! Typed error definitions for fshelper.
//! Provides a small set of well-known failure modes for better logs and tests.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Failure of a file-tree operation.
#[derive(Debug, Error)]
pub enum FsHelperError {
    /// A required argument was absent (an empty path). Never retried.
    #[error("required argument `{0}` is missing")]
    NullArgument(&'static str),

    /// Any failure reported by the filesystem or stream layer.
    #[error("{message}")]
    Io {
        op: &'static str,
        path: PathBuf,
        message: String,
        #[source]
        source: io::Error,
    },
}

impl FsHelperError {
    /// Stable numeric code, used for exit statuses and structured log fields.
    pub fn code(&self) -> i32 {
        match self {
            FsHelperError::Io { .. } => 1,
            FsHelperError::NullArgument(_) => 2,
        }
    }

    /// Kind of the wrapped io::Error, if this is an I/O failure.
    pub fn kind(&self) -> Option<io::ErrorKind> {
        match self {
            FsHelperError::Io { source, .. } => Some(source.kind()),
            FsHelperError::NullArgument(_) => None,
        }
    }

    pub fn is_null_argument(&self) -> bool {
        matches!(self, FsHelperError::NullArgument(_))
    }
}

/// Failure reported by an exit-hook registry.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum HookError {
    #[error("exit hook '{0}' is already registered")]
    AlreadyRegistered(String),

    #[error("exit hook '{0}' is not registered")]
    NotRegistered(String),

    #[error("process shutdown is in progress; exit hooks can no longer change")]
    ShutdownInProgress,
}

impl HookError {
    pub fn code(&self) -> i32 {
        match self {
            HookError::AlreadyRegistered(_) => 10,
            HookError::NotRegistered(_) => 11,
            HookError::ShutdownInProgress => 12,
        }
    }
}

pub type Result<T, E = FsHelperError> = std::result::Result<T, E>;
