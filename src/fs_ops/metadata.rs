//! Metadata preservation for copied entries.
//! - Copies timestamps (atime, mtime) and, on Unix, permission bits from source to dest.
//! - Symlinks only get their own timestamps; permissions on links are meaningless.
//! - Best-effort: failures are logged and ignored so a completed copy is never undone
//!   because a filesystem refuses utimes/chmod.

use filetime::{set_file_times, set_symlink_file_times, FileTime};
use std::fs;
use std::path::Path;
use tracing::{trace, warn};

fn times_of(meta: &fs::Metadata) -> (FileTime, FileTime) {
    (
        FileTime::from_last_access_time(meta),
        FileTime::from_last_modification_time(meta),
    )
}

/// Preserve metadata on `dest` using already-fetched, non-dereferenced `src_meta`.
pub fn preserve_metadata(dest: &Path, src_meta: &fs::Metadata) {
    let (at, mt) = times_of(src_meta);

    if src_meta.file_type().is_symlink() {
        if let Err(e) = set_symlink_file_times(dest, at, mt) {
            warn!(path = %dest.display(), error = %e, "failed to set symlink times on destination");
        }
        return;
    }

    // Permissions first: a read-only mode could otherwise block utimes on some platforms.
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        let src_mode = src_meta.permissions().mode() & 0o7777;
        if let Err(e) = fs::set_permissions(dest, fs::Permissions::from_mode(src_mode)) {
            warn!(path = %dest.display(), mode = format!("{:o}", src_mode), error = %e, "failed to set permissions on destination");
        } else {
            trace!(path = %dest.display(), mode = format!("{:o}", src_mode), "set permissions on destination");
        }
    }
    #[cfg(windows)]
    {
        if let Ok(meta) = fs::metadata(dest) {
            let mut perms = meta.permissions();
            perms.set_readonly(src_meta.permissions().readonly());
            let _ = fs::set_permissions(dest, perms);
        }
    }

    if let Err(e) = set_file_times(dest, at, mt) {
        warn!(path = %dest.display(), error = %e, "failed to set atime/mtime on destination");
    } else {
        trace!(path = %dest.display(), "set atime/mtime on destination");
    }
}

/// Preserve extended attributes from `src` to `dest` (requires the "xattrs" feature).
pub fn preserve_xattrs(src: &Path, dest: &Path) {
    #[cfg(feature = "xattrs")]
    {
        let names = match xattr::list(src) {
            Ok(names) => names,
            Err(e) => {
                warn!(src = %src.display(), error = %e, "failed to list xattrs; continuing");
                return;
            }
        };
        for name in names {
            let name_disp = name.to_string_lossy().into_owned();
            match xattr::get(src, &name) {
                Ok(value) => {
                    let value = value.unwrap_or_default();
                    if let Err(e) = xattr::set(dest, &name, &value) {
                        warn!(dest = %dest.display(), xattr = %name_disp, error = %e, "failed to set xattr on destination");
                    } else {
                        trace!(dest = %dest.display(), xattr = %name_disp, size = value.len(), "preserved xattr");
                    }
                }
                Err(e) => {
                    warn!(src = %src.display(), xattr = %name_disp, error = %e, "failed to read xattr from source");
                }
            }
        }
    }
    #[cfg(not(feature = "xattrs"))]
    {
        let _ = (src, dest);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn copies_mtime() {
        let td = tempdir().unwrap();
        let src = td.path().join("src");
        let dst = td.path().join("dst");
        fs::write(&src, "a").unwrap();
        fs::write(&dst, "a").unwrap();
        let past = FileTime::from_unix_time(1_000_000_000, 0);
        set_file_times(&src, past, past).unwrap();

        let meta = fs::symlink_metadata(&src).unwrap();
        preserve_metadata(&dst, &meta);

        let got = FileTime::from_last_modification_time(&fs::metadata(&dst).unwrap());
        assert_eq!(got, past);
    }

    #[cfg(unix)]
    #[test]
    fn copies_mode_bits() {
        use std::os::unix::fs::PermissionsExt;
        let td = tempdir().unwrap();
        let src = td.path().join("src");
        let dst = td.path().join("dst");
        fs::write(&src, "a").unwrap();
        fs::write(&dst, "a").unwrap();
        fs::set_permissions(&src, fs::Permissions::from_mode(0o640)).unwrap();

        preserve_metadata(&dst, &fs::symlink_metadata(&src).unwrap());
        let mode = fs::metadata(&dst).unwrap().permissions().mode() & 0o777;
        assert_eq!(mode, 0o640);
    }
}
