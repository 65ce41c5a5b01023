//! Recursive move/merge of files and directory trees.
//!
//! `move_path`, `move_with_callback` and `move_path_async` run against the real
//! filesystem (`StdFs`); build a [`Mover`] directly to use a different [`Filesystem`](crate::fs_ops::Filesystem).

mod background;
mod engine;
mod options;

pub use engine::Mover;
pub use options::{FilterFn, MoveOptions};

use anyhow::Result;
use std::path::{Path, PathBuf};
use std::thread::JoinHandle;

use crate::fs_ops::StdFs;

/// Move `src` to `dst` on the real filesystem.
pub fn move_path(src: &Path, dst: &Path, options: &MoveOptions) -> Result<()> {
    Mover::new(StdFs::new()).move_path(src, dst, options)
}

/// Callback flavour of [`move_path`]; see [`Mover::move_with_callback`].
pub fn move_with_callback<C>(
    src: impl Into<PathBuf>,
    dst: impl Into<PathBuf>,
    options: MoveOptions,
    callback: C,
) -> JoinHandle<()>
where
    C: FnOnce(Result<()>) + Send + 'static,
{
    Mover::new(StdFs::new()).move_with_callback(src, dst, options, callback)
}

#[cfg(feature = "async")]
pub async fn move_path_async(
    src: impl Into<PathBuf>,
    dst: impl Into<PathBuf>,
    options: MoveOptions,
) -> Result<()> {
    Mover::new(StdFs::new()).move_path_async(src, dst, options).await
}
