//! Test doubles for the `Filesystem` seam.
//!
//! Available to this crate's own tests and, with the `test-helpers` feature, to
//! downstream crates that want to exercise cross-device behavior on one disk.

use std::ffi::OsString;
use std::io;
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use crate::fs_ops::{EntryKind, Filesystem, StdFs};

/// Wraps a filesystem so every `rename` fails like a move across devices.
#[derive(Debug, Clone, Default)]
pub struct CrossDeviceFs<F = StdFs> {
    inner: F,
    renames: Arc<AtomicUsize>,
    copies: Arc<AtomicUsize>,
}

impl<F> CrossDeviceFs<F> {
    pub fn new(inner: F) -> Self {
        Self {
            inner,
            renames: Arc::default(),
            copies: Arc::default(),
        }
    }

    /// Rename attempts seen so far (all of them failed).
    pub fn rename_attempts(&self) -> usize {
        self.renames.load(Ordering::SeqCst)
    }

    /// `copy_tree` calls seen so far.
    pub fn copies(&self) -> usize {
        self.copies.load(Ordering::SeqCst)
    }
}

/// The error a rename across devices produces on this platform.
pub fn cross_device_error() -> io::Error {
    #[cfg(unix)]
    {
        io::Error::from_raw_os_error(libc::EXDEV)
    }
    #[cfg(windows)]
    {
        // ERROR_NOT_SAME_DEVICE
        io::Error::from_raw_os_error(17)
    }
    #[cfg(not(any(unix, windows)))]
    {
        io::Error::from(io::ErrorKind::CrossesDevices)
    }
}

impl<F: Filesystem> Filesystem for CrossDeviceFs<F> {
    fn lstat(&self, path: &Path) -> io::Result<EntryKind> {
        self.inner.lstat(path)
    }

    fn rename(&self, _src: &Path, _dst: &Path) -> io::Result<()> {
        self.renames.fetch_add(1, Ordering::SeqCst);
        Err(cross_device_error())
    }

    fn copy_tree(&self, src: &Path, dst: &Path) -> io::Result<()> {
        self.copies.fetch_add(1, Ordering::SeqCst);
        self.inner.copy_tree(src, dst)
    }

    fn remove_tree(&self, path: &Path) -> io::Result<()> {
        self.inner.remove_tree(path)
    }

    fn remove_empty_dir(&self, path: &Path) -> io::Result<()> {
        self.inner.remove_empty_dir(path)
    }

    fn list_dir(&self, path: &Path) -> io::Result<Vec<OsString>> {
        self.inner.list_dir(path)
    }
}

/// Wraps a filesystem so `rename` fails with a fixed, non cross-device error kind.
#[derive(Debug, Clone)]
pub struct FailingRenameFs<F = StdFs> {
    inner: F,
    kind: io::ErrorKind,
}

impl<F> FailingRenameFs<F> {
    pub fn new(inner: F, kind: io::ErrorKind) -> Self {
        Self { inner, kind }
    }
}

impl<F: Filesystem> Filesystem for FailingRenameFs<F> {
    fn lstat(&self, path: &Path) -> io::Result<EntryKind> {
        self.inner.lstat(path)
    }

    fn rename(&self, _src: &Path, _dst: &Path) -> io::Result<()> {
        Err(io::Error::new(self.kind, "injected rename failure"))
    }

    fn copy_tree(&self, src: &Path, dst: &Path) -> io::Result<()> {
        self.inner.copy_tree(src, dst)
    }

    fn remove_tree(&self, path: &Path) -> io::Result<()> {
        self.inner.remove_tree(path)
    }

    fn remove_empty_dir(&self, path: &Path) -> io::Result<()> {
        self.inner.remove_empty_dir(path)
    }

    fn list_dir(&self, path: &Path) -> io::Result<Vec<OsString>> {
        self.inner.list_dir(path)
    }
}

/// Fresh scratch directory, removed on drop.
pub fn scratch_dir() -> io::Result<tempfile::TempDir> {
    tempfile::Builder::new().prefix("fs_move-").tempdir()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fs_ops::is_cross_device;

    #[test]
    fn injected_error_is_recognised_as_cross_device() {
        assert!(is_cross_device(&cross_device_error()));
    }

    #[test]
    fn counters_track_calls() {
        let td = scratch_dir().unwrap();
        let src = td.path().join("a.txt");
        std::fs::write(&src, "x").unwrap();
        let fs = CrossDeviceFs::new(StdFs::new());

        assert!(fs.rename(&src, &td.path().join("b.txt")).is_err());
        fs.copy_tree(&src, &td.path().join("c.txt")).unwrap();
        assert_eq!(fs.rename_attempts(), 1);
        assert_eq!(fs.copies(), 1);
    }

    #[test]
    fn failing_rename_uses_requested_kind() {
        let fs = FailingRenameFs::new(StdFs::new(), io::ErrorKind::PermissionDenied);
        let err = fs.rename(Path::new("a"), Path::new("b")).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::PermissionDenied);
        assert!(!is_cross_device(&err));
    }
}
