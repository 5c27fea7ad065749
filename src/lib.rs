//! Core library for `fshelper`.
//!
//! Two independent pieces:
//! - [`fs_ops`]: idempotent, blocking file-tree helpers (recursive delete,
//!   create with parents, default-content files, whole-file read/write and
//!   modification times). All failures come back as [`FsHelperError`].
//! - [`hooks`]: [`ShutdownHook`], a handle that makes registering and
//!   unregistering one exit callback idempotent, over an injectable
//!   [`ExitHookRegistry`].
//!
//! The remaining modules back the `fshelper` binary.

pub mod cli;
pub mod config;
pub mod errors;
pub mod fs_ops;
pub mod hooks;
pub mod output;
pub mod platform;
pub mod shutdown;

pub use config::{
    default_config_path, default_log_path, path_has_symlink_ancestor, Config, LogLevel,
};
pub use errors::{FsHelperError, HookError};
pub use fs_ops::{
    create_default_file, create_directories, create_file, create_parent_directories, delete,
    get_last_modified, new_buffered_reader, read, read_bytes, set_last_modified, write,
    DefaultContent, DefaultsDir, NoDefaults,
};
pub use hooks::{run_exit_hooks, DeferredWork, ExitHookRegistry, ProcessExitHooks, ShutdownHook};
