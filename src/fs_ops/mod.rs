//! File-tree operations: modularized.
//!
//! Every operation is a blocking free function taking anything path-like.
//! The empty path is treated as a missing argument and rejected before any I/O.

mod content;
mod create;
mod defaults;
mod delete;
mod helpers;
mod times;

pub use content::{new_buffered_reader, read, read_bytes, write};
pub use create::{create_directories, create_file, create_parent_directories};
pub use defaults::{create_default_file, DefaultContent, DefaultsDir, NoDefaults};
pub use delete::delete;
pub use times::{get_last_modified, set_last_modified};
