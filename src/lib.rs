//! Core library for `fs_move`.
//!
//! Moves a file or directory tree to a destination path. When the destination
//! already exists the move can fail, overwrite it, or merge into it directory by
//! directory; leftovers at the source can optionally be purged, and a filter
//! decides which entries take part.
//!
//! ```no_run
//! use fs_move::{move_path, MoveOptions};
//! use std::path::Path;
//!
//! let opts = MoveOptions::new().merge(true).filter(|src, _| {
//!     src.extension().is_none_or(|ext| ext != "tmp")
//! });
//! move_path(Path::new("incoming/album"), Path::new("library/album"), &opts)?;
//! # Ok::<(), anyhow::Error>(())
//! ```

pub mod cli;
pub mod config;
pub mod errors;
pub mod fs_ops;
pub mod mover;
pub mod output;
pub mod platform;
#[cfg(any(test, feature = "test-helpers"))]
pub mod testing;

pub use config::{
    default_config_path, default_log_path, load_config, path_has_symlink_ancestor, Config,
    LogLevel,
};
pub use errors::FsMoveError;
pub use fs_ops::{EntryKind, Filesystem, StdFs};
#[cfg(feature = "async")]
pub use mover::move_path_async;
pub use mover::{move_path, move_with_callback, FilterFn, MoveOptions, Mover};

/// Convenience imports for library users.
pub mod prelude {
    pub use crate::config::{Config, LogLevel};
    pub use crate::errors::FsMoveError as Error;
    pub use crate::fs_ops::{EntryKind, Filesystem, StdFs};
    #[cfg(feature = "async")]
    pub use crate::mover::move_path_async;
    pub use crate::mover::{move_path, move_with_callback, MoveOptions, Mover};

    /// Library-wide result type.
    pub type FmResult<T> = anyhow::Result<T>;
}
