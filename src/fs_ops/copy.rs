//! Recursive copy used when an atomic rename crosses devices.
//!
//! - Works for a single file, a symlink or a whole directory tree rooted at `src`.
//! - Symlinks are recreated as links (never followed), including dangling ones.
//! - On Unix, fifos and device nodes are recreated with `mkfifo`/`mknod`; sockets are refused.
//! - Directories and links are created on the calling thread in walk order; regular
//!   files are then copied in parallel (rayon).
//! - Directory metadata is applied last, deepest first, so populating a directory does
//!   not clobber the mtime we just restored.
//! - On failure the partially written destination is removed (best-effort) before
//!   the error is returned.

use rayon::prelude::*;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};
use walkdir::WalkDir;

use super::helpers::io_error_with_help_io;
use super::io_copy::{copy_streaming, DurabilityMode};
use super::metadata::{preserve_metadata, preserve_xattrs};
use super::remove::remove_tree;

/// Knobs for a tree copy.
#[derive(Debug, Clone, Copy, Default)]
pub struct CopyOptions {
    pub preserve_metadata: bool,
    pub durability: DurabilityMode,
}

/// Copy `src` to `dst`. `dst` must not exist.
pub fn copy_tree(src: &Path, dst: &Path, opts: CopyOptions) -> io::Result<()> {
    if fs::symlink_metadata(dst).is_ok() {
        return Err(io::Error::new(
            io::ErrorKind::AlreadyExists,
            format!("copy destination '{}' already exists", dst.display()),
        ));
    }

    match copy_tree_inner(src, dst, opts) {
        Ok(files) => {
            debug!(src = %src.display(), dest = %dst.display(), files, "tree copy complete");
            Ok(())
        }
        Err(e) => {
            if let Err(cleanup) = remove_tree(dst) {
                warn!(dest = %dst.display(), error = %cleanup, "failed to remove partial copy");
            }
            Err(e)
        }
    }
}

fn copy_tree_inner(src: &Path, dst: &Path, opts: CopyOptions) -> io::Result<usize> {
    let root_meta = fs::symlink_metadata(src).map_err(io_error_with_help_io("stat copy source", src))?;

    if !root_meta.is_dir() {
        copy_leaf(src, dst, &root_meta, opts)?;
        return Ok(usize::from(root_meta.is_file()));
    }

    let mut files: Vec<(PathBuf, PathBuf)> = Vec::new();
    let mut dirs: Vec<(PathBuf, fs::Metadata)> = Vec::new();

    for entry in WalkDir::new(src).follow_links(false) {
        let entry = entry.map_err(io::Error::from)?;
        let rel = entry
            .path()
            .strip_prefix(src)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, e))?;
        let target = if rel.as_os_str().is_empty() {
            dst.to_path_buf()
        } else {
            dst.join(rel)
        };
        let ft = entry.file_type();

        if ft.is_dir() {
            fs::create_dir(&target).map_err(io_error_with_help_io("create directory", &target))?;
            let meta = entry.metadata().map_err(io::Error::from)?;
            dirs.push((target, meta));
        } else if ft.is_file() {
            files.push((entry.into_path(), target));
        } else {
            let meta = fs::symlink_metadata(entry.path())?;
            copy_leaf(entry.path(), &target, &meta, opts)?;
        }
    }

    files.par_iter().try_for_each(|(from, to)| -> io::Result<()> {
        let meta = fs::symlink_metadata(from)?;
        copy_leaf(from, to, &meta, opts)
    })?;

    if opts.preserve_metadata {
        for (path, meta) in dirs.iter().rev() {
            preserve_metadata(path, meta);
        }
    }

    Ok(files.len())
}

/// Copy a non-directory entry: regular file, symlink or special file.
fn copy_leaf(src: &Path, dst: &Path, meta: &fs::Metadata, opts: CopyOptions) -> io::Result<()> {
    let ft = meta.file_type();
    if ft.is_symlink() {
        copy_symlink(src, dst)?;
    } else if ft.is_file() {
        copy_streaming(src, dst, opts.durability).map_err(io_error_with_help_io("copy file", dst))?;
    } else {
        copy_special(src, dst, meta)?;
    }

    if opts.preserve_metadata {
        preserve_metadata(dst, meta);
        if !ft.is_symlink() {
            preserve_xattrs(src, dst);
        }
    }
    Ok(())
}

fn unsupported_special(src: &Path) -> io::Error {
    io::Error::new(
        io::ErrorKind::Unsupported,
        format!("cannot copy special file '{}' across devices", src.display()),
    )
}

#[cfg(unix)]
fn copy_special(src: &Path, dst: &Path, meta: &fs::Metadata) -> io::Result<()> {
    use std::ffi::CString;
    use std::os::unix::ffi::OsStrExt;
    use std::os::unix::fs::{FileTypeExt, MetadataExt};

    let ft = meta.file_type();
    let c_dst = CString::new(dst.as_os_str().as_bytes())
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, e))?;
    let mode = (meta.mode() & 0o7777) as libc::mode_t;

    let rc = if ft.is_fifo() {
        unsafe { libc::mkfifo(c_dst.as_ptr(), mode) }
    } else if ft.is_char_device() || ft.is_block_device() {
        let node = if ft.is_char_device() { libc::S_IFCHR } else { libc::S_IFBLK };
        // Usually needs CAP_MKNOD; EPERM is reported like any other failure.
        unsafe { libc::mknod(c_dst.as_ptr(), node | mode, meta.rdev() as libc::dev_t) }
    } else {
        return Err(unsupported_special(src));
    };

    if rc != 0 {
        return Err(io_error_with_help_io("create special file", dst)(io::Error::last_os_error()));
    }
    Ok(())
}

#[cfg(windows)]
fn copy_special(src: &Path, _dst: &Path, _meta: &fs::Metadata) -> io::Result<()> {
    Err(unsupported_special(src))
}

fn copy_symlink(src: &Path, dst: &Path) -> io::Result<()> {
    let target = fs::read_link(src).map_err(io_error_with_help_io("read link", src))?;

    #[cfg(unix)]
    {
        std::os::unix::fs::symlink(&target, dst).map_err(io_error_with_help_io("create symlink", dst))
    }
    #[cfg(windows)]
    {
        let resolved = src.parent().map(|p| p.join(&target)).unwrap_or_else(|| target.clone());
        if resolved.is_dir() {
            std::os::windows::fs::symlink_dir(&target, dst)
        } else {
            std::os::windows::fs::symlink_file(&target, dst)
        }
        .map_err(io_error_with_help_io("create symlink", dst))
    }
}
