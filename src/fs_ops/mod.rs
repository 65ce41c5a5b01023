//! Filesystem primitives consumed by the mover.
//!
//! The engine only talks to the `Filesystem` trait; `StdFs` is the real implementation.
//! Tests swap in wrappers (for example a rename that always reports a cross-device error).

mod atomic;
mod copy;
mod helpers;
mod io_copy;
mod kind;
mod metadata;
mod remove;
mod std_fs;
mod util;

use std::ffi::OsString;
use std::io;
use std::path::{Path, PathBuf};

pub use copy::{copy_tree, CopyOptions};
pub use helpers::{io_error_with_help, io_error_with_help_io};
pub use io_copy::DurabilityMode;
pub use kind::{classify, EntryKind};
pub use metadata::preserve_metadata;
pub use remove::{remove_empty_dir, remove_tree};
pub use std_fs::StdFs;
pub use util::is_cross_device;

/// Low-level operations the mover is built on.
///
/// Implementations return raw `io::Error`s; in particular `rename` must surface a
/// cross-device failure in a way `is_cross_device` recognises.
pub trait Filesystem: Send + Sync {
    /// Non-dereferencing stat. A missing path is `Ok(EntryKind::Missing)`.
    fn lstat(&self, path: &Path) -> io::Result<EntryKind>;

    /// Atomic rename within one device.
    fn rename(&self, src: &Path, dst: &Path) -> io::Result<()>;

    /// Deep copy of a file, link or directory tree; links stay links.
    fn copy_tree(&self, src: &Path, dst: &Path) -> io::Result<()>;

    /// Delete a file, link or directory tree. Missing paths succeed.
    fn remove_tree(&self, path: &Path) -> io::Result<()>;

    /// Remove `path` only if it is an empty directory.
    fn remove_empty_dir(&self, path: &Path) -> io::Result<()>;

    /// Names of the immediate children of `path`, in no particular order.
    fn list_dir(&self, path: &Path) -> io::Result<Vec<OsString>>;

    /// Absolute path with every symlink resolved. Used to detect overlapping trees.
    fn canonicalize(&self, path: &Path) -> io::Result<PathBuf> {
        std::fs::canonicalize(path)
    }
}

impl<T: Filesystem + ?Sized> Filesystem for &T {
    fn lstat(&self, path: &Path) -> io::Result<EntryKind> {
        (**self).lstat(path)
    }
    fn rename(&self, src: &Path, dst: &Path) -> io::Result<()> {
        (**self).rename(src, dst)
    }
    fn copy_tree(&self, src: &Path, dst: &Path) -> io::Result<()> {
        (**self).copy_tree(src, dst)
    }
    fn remove_tree(&self, path: &Path) -> io::Result<()> {
        (**self).remove_tree(path)
    }
    fn remove_empty_dir(&self, path: &Path) -> io::Result<()> {
        (**self).remove_empty_dir(path)
    }
    fn list_dir(&self, path: &Path) -> io::Result<Vec<OsString>> {
        (**self).list_dir(path)
    }
    fn canonicalize(&self, path: &Path) -> io::Result<PathBuf> {
        (**self).canonicalize(path)
    }
}
