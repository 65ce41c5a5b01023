//! Entry classification via a non-dereferencing stat.
//! Symlinks are reported by their own type; the target is only consulted to tell
//! link-to-file, link-to-directory and dangling links apart.

use std::fs;
use std::io;
use std::path::Path;

/// What lives at a path, as seen by `lstat`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    Missing,
    File,
    Directory,
    SymlinkToFile,
    SymlinkToDirectory,
    BrokenSymlink,
}

impl EntryKind {
    #[inline]
    pub fn exists(self) -> bool {
        !matches!(self, EntryKind::Missing)
    }

    /// True only for a real directory. Links to directories are leaves.
    #[inline]
    pub fn is_dir(self) -> bool {
        matches!(self, EntryKind::Directory)
    }

    #[inline]
    pub fn is_symlink(self) -> bool {
        matches!(
            self,
            EntryKind::SymlinkToFile | EntryKind::SymlinkToDirectory | EntryKind::BrokenSymlink
        )
    }
}

/// Classify `path` without following a final symlink.
/// `NotFound` maps to `Missing`; any other stat error is returned.
pub fn classify(path: &Path) -> io::Result<EntryKind> {
    let lmeta = match fs::symlink_metadata(path) {
        Ok(m) => m,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(EntryKind::Missing),
        Err(e) => return Err(e),
    };

    let ft = lmeta.file_type();
    if ft.is_dir() {
        return Ok(EntryKind::Directory);
    }
    if !ft.is_symlink() {
        // Regular files and special files (fifo, socket, device) are leaves.
        return Ok(EntryKind::File);
    }

    Ok(match fs::metadata(path) {
        Ok(target) if target.is_dir() => EntryKind::SymlinkToDirectory,
        Ok(_) => EntryKind::SymlinkToFile,
        Err(_) => EntryKind::BrokenSymlink,
    })
}
