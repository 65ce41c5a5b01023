//! I/O error enrichment.
//!
//! Small adapters that attach the operation, the path and a platform-aware hint to an
//! `io::Error`, usable with `map_err` in both anyhow and io::Result code paths.
//!
//! Usage:
//!   // in functions returning anyhow::Result<_>
//!   fs.remove_tree(dst).map_err(io_error_with_help("remove destination", dst))?;
//!
//!   // in functions returning io::Result<_>
//!   fs::create_dir(dir).map_err(io_error_with_help_io("create directory", dir))?;

use std::io;
use std::path::Path;

/// Hint keyed by raw OS code.
fn os_hint(code: i32) -> Option<&'static str> {
    #[cfg(unix)]
    {
        let hint = match code {
            libc::EACCES | libc::EPERM => "permission denied; check ownership and write permissions.",
            libc::EXDEV => "cross-filesystem; atomic rename not possible.",
            libc::EBUSY => "resource busy; ensure no other process is using it.",
            libc::ENOENT => "path not found; verify it exists.",
            libc::EEXIST => "already exists; remove the target or pass --overwrite.",
            libc::ENOTEMPTY => "directory not empty; use --merge or --overwrite.",
            libc::ENOTDIR => "a path component is not a directory.",
            libc::EISDIR => "target is a directory.",
            libc::ENOSPC => "insufficient space on device.",
            libc::EROFS => "read-only filesystem; cannot write here.",
            libc::ELOOP => "too many symbolic link levels (ELOOP); possible symlink cycle.",
            libc::ENAMETOOLONG => "filename or path too long; shorten path segments.",
            libc::EMFILE => "process file descriptor limit reached; close files or raise limits.",
            _ => return None,
        };
        Some(hint)
    }
    #[cfg(windows)]
    {
        let hint = match code {
            5 => "access denied; check permissions.",
            17 => "not same device; cross-filesystem move.",
            32 => "sharing violation; file is in use.",
            2 | 3 => "path not found; verify it exists.",
            80 | 183 => "already exists; remove the target or pass --overwrite.",
            112 => "insufficient disk space.",
            145 => "directory not empty; use --merge or --overwrite.",
            _ => return None,
        };
        Some(hint)
    }
}

/// Hint keyed by `ErrorKind` when no raw code is available (synthetic errors).
fn kind_hint(kind: io::ErrorKind) -> Option<&'static str> {
    match kind {
        io::ErrorKind::PermissionDenied => Some("permission denied; check ownership and write permissions."),
        io::ErrorKind::NotFound => Some("path not found; verify it exists."),
        io::ErrorKind::AlreadyExists => Some("already exists; remove the target or pass --overwrite."),
        io::ErrorKind::CrossesDevices => Some("cross-filesystem; atomic rename not possible."),
        io::ErrorKind::DirectoryNotEmpty => Some("directory not empty; use --merge or --overwrite."),
        _ => None,
    }
}

fn build_message(op: &str, path: &Path, e: &io::Error) -> String {
    let mut msg = format!("{} '{}'", op, path.display());
    let hint = match e.raw_os_error() {
        Some(code) => os_hint(code),
        None => kind_hint(e.kind()),
    };
    if let Some(h) = hint {
        msg.push_str(" — ");
        msg.push_str(h);
    }
    if let Some(code) = e.raw_os_error() {
        msg.push_str(&format!(" [os code: {}]", code));
    }
    msg
}

/// Adapter for anyhow::Result code. The io::Error stays in the chain as the source,
/// so `err.downcast_ref::<io::Error>()` still works on the result.
pub fn io_error_with_help<'a>(
    op: &'a str,
    path: &'a Path,
) -> impl FnOnce(io::Error) -> anyhow::Error + 'a {
    move |e: io::Error| {
        let msg = build_message(op, path, &e);
        anyhow::Error::new(e).context(msg)
    }
}

/// Adapter for io::Result code: keeps the original ErrorKind but folds the context
/// into the message.
pub fn io_error_with_help_io<'a>(
    op: &'a str,
    path: &'a Path,
) -> impl FnOnce(io::Error) -> io::Error + 'a {
    move |e: io::Error| {
        let msg = format!("{}: {}", build_message(op, path, &e), e);
        io::Error::new(e.kind(), msg)
    }
}
