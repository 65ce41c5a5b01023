//! `Filesystem` backed by `std::fs`.

use std::ffi::OsString;
use std::fs;
use std::io;
use std::path::Path;

use super::atomic::rename_durable;
use super::copy::{copy_tree, CopyOptions};
use super::io_copy::DurabilityMode;
use super::kind::{classify, EntryKind};
use super::remove::{remove_empty_dir, remove_tree};
use super::Filesystem;

/// The real filesystem. Cheap to clone; carries only copy settings.
#[derive(Debug, Clone, Copy, Default)]
pub struct StdFs {
    copy: CopyOptions,
}

impl StdFs {
    pub fn new() -> Self {
        Self::default()
    }

    /// Carry timestamps/permissions (and xattrs with the feature) across a cross-device copy.
    pub fn preserve_metadata(mut self, yes: bool) -> Self {
        self.copy.preserve_metadata = yes;
        self
    }

    pub fn durability(mut self, mode: DurabilityMode) -> Self {
        self.copy.durability = mode;
        self
    }

    pub fn copy_options(&self) -> CopyOptions {
        self.copy
    }
}

impl Filesystem for StdFs {
    fn lstat(&self, path: &Path) -> io::Result<EntryKind> {
        classify(path)
    }

    fn rename(&self, src: &Path, dst: &Path) -> io::Result<()> {
        rename_durable(src, dst)
    }

    fn copy_tree(&self, src: &Path, dst: &Path) -> io::Result<()> {
        copy_tree(src, dst, self.copy)
    }

    fn remove_tree(&self, path: &Path) -> io::Result<()> {
        remove_tree(path)
    }

    fn remove_empty_dir(&self, path: &Path) -> io::Result<()> {
        remove_empty_dir(path)
    }

    fn list_dir(&self, path: &Path) -> io::Result<Vec<OsString>> {
        fs::read_dir(path)?
            .map(|entry| entry.map(|e| e.file_name()))
            .collect()
    }
}
