//! Atomic rename helper.
//! - Plain `rename(2)`; the raw `io::Error` is returned untouched so callers can
//!   recognise cross-device failures.
//! - On Unix, best-effort fsync of the destination directory after rename.

use std::fs;
use std::io;
use std::path::Path;

pub(super) fn rename_durable(src: &Path, dst: &Path) -> io::Result<()> {
    fs::rename(src, dst)?;

    // Ignore fsync errors to avoid turning a successful rename into a failure.
    if let Some(parent) = dst.parent().filter(|p| !p.as_os_str().is_empty()) {
        let _ = super::util::fsync_dir(parent);
    }
    Ok(())
}
