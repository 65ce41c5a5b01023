//! Removal primitives.
//! - `remove_tree`: delete a file, link or whole directory; a missing path is a no-op.
//! - `remove_empty_dir`: plain rmdir; fails on non-empty directories and non-directories.

use std::fs;
use std::io;
use std::path::Path;

/// Delete whatever lives at `path` without following a final symlink.
pub fn remove_tree(path: &Path) -> io::Result<()> {
    let meta = match fs::symlink_metadata(path) {
        Ok(m) => m,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(()),
        Err(e) => return Err(e),
    };

    let ft = meta.file_type();
    let res = if ft.is_dir() {
        fs::remove_dir_all(path)
    } else {
        remove_leaf(path, &meta)
    };
    match res {
        // Raced with another remover; the end state is what we wanted.
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
        other => other,
    }
}

#[cfg(unix)]
fn remove_leaf(path: &Path, _meta: &fs::Metadata) -> io::Result<()> {
    fs::remove_file(path)
}

#[cfg(windows)]
fn remove_leaf(path: &Path, meta: &fs::Metadata) -> io::Result<()> {
    use std::os::windows::fs::FileTypeExt;
    // Directory symlinks and junctions are removed with RemoveDirectory on Windows.
    if meta.file_type().is_symlink_dir() {
        fs::remove_dir(path)
    } else {
        fs::remove_file(path)
    }
}

pub fn remove_empty_dir(path: &Path) -> io::Result<()> {
    fs::remove_dir(path)
}
