//! The move/merge decision engine.
//!
//! Each level of the recursion handles one (source, destination) pair:
//!   filter -> probe destination -> conflict check -> classify source
//!   -> pre-clear -> transfer | merge children -> post-cleanup
//!
//! Children of a merged directory are processed strictly one after another; the
//! first error stops the walk and leaves already-processed siblings in place.

use anyhow::{bail, Result};
use std::path::{Path, PathBuf};
use tracing::{debug, info, trace, warn};

use crate::errors::FsMoveError;
use crate::fs_ops::{is_cross_device, io_error_with_help, EntryKind, Filesystem, StdFs};

use super::options::MoveOptions;

/// Recursive mover over a `Filesystem`.
#[derive(Debug, Clone, Default)]
pub struct Mover<F = StdFs> {
    fs: F,
}

impl<F: Filesystem> Mover<F> {
    pub fn new(fs: F) -> Self {
        Self { fs }
    }

    pub fn filesystem(&self) -> &F {
        &self.fs
    }

    /// Move `src` to `dst` according to `options`.
    ///
    /// Fails with [`FsMoveError::DestinationExists`] (and touches nothing) when `dst`
    /// exists and neither overwrite nor merge is set. Other failures are the
    /// underlying I/O errors with path context attached.
    ///
    /// With overwrite or merge set, a destination that is the source itself, lies
    /// inside it, or contains it is refused before anything is touched.
    pub fn move_path(&self, src: &Path, dst: &Path, options: &MoveOptions) -> Result<()> {
        if options.tolerates_existing() {
            self.ensure_disjoint(src, dst)?;
        }
        self.move_level(src, dst, options)
    }

    fn ensure_disjoint(&self, src: &Path, dst: &Path) -> Result<()> {
        let (Some(s), Some(d)) = (self.resolve(src), self.resolve(dst)) else {
            return Ok(());
        };
        if s.starts_with(&d) || d.starts_with(&s) {
            bail!(
                "source '{}' and destination '{}' overlap; refusing to move a tree into itself",
                src.display(),
                dst.display()
            );
        }
        Ok(())
    }

    /// Resolve the parent and keep the final component as-is, so a symlink is
    /// identified by where it lives rather than where it points.
    /// `None` when the path cannot be resolved (nothing there to collide with).
    fn resolve(&self, path: &Path) -> Option<PathBuf> {
        match (path.parent(), path.file_name()) {
            (Some(parent), Some(name)) => {
                let parent = if parent.as_os_str().is_empty() { Path::new(".") } else { parent };
                self.fs.canonicalize(parent).ok().map(|p| p.join(name))
            }
            _ => self.fs.canonicalize(path).ok(),
        }
    }

    fn move_level(&self, src: &Path, dst: &Path, options: &MoveOptions) -> Result<()> {
        if !options.accepts(src, dst) {
            trace!(src = %src.display(), dest = %dst.display(), "filtered out; left in place");
            return Ok(());
        }

        let dest_kind = self.probe_destination(dst);
        if dest_kind.exists() && !options.tolerates_existing() {
            return Err(FsMoveError::DestinationExists(dst.to_path_buf()).into());
        }

        let src_kind = self
            .fs
            .lstat(src)
            .map_err(io_error_with_help("stat source", src))?;
        if !src_kind.exists() {
            return Err(FsMoveError::SourceMissing(src.to_path_buf()).into());
        }

        let both_dirs = src_kind.is_dir() && dest_kind.is_dir();
        debug!(
            src = %src.display(),
            dest = %dst.display(),
            ?src_kind,
            ?dest_kind,
            both_dirs,
            "classified move"
        );

        let mut dest_exists = dest_kind.exists();
        if options.overwrite && dest_exists && !(both_dirs && options.merge) {
            self.fs
                .remove_tree(dst)
                .map_err(io_error_with_help("remove existing destination", dst))?;
            debug!(dest = %dst.display(), ?dest_kind, "removed existing destination");
            dest_exists = false;
        }

        if !dest_exists {
            // The whole entry is consumed here; nothing is left behind for cleanup.
            return self.transfer(src, dst);
        }

        if both_dirs {
            self.merge_children(src, dst, options)?;
        } else if !src_kind.is_dir() {
            // Merge without overwrite onto an existing non-matching entry: the
            // destination wins and the superseded source leaf is dropped.
            self.fs
                .remove_tree(src)
                .map_err(io_error_with_help("remove superseded source", src))?;
            debug!(src = %src.display(), dest = %dst.display(), "kept existing destination; removed source entry");
            return Ok(());
        }

        self.cleanup_source(src, options)
    }

    /// Destination existence. A failed probe counts as "missing"; the rename that
    /// follows will surface any real problem with the path.
    fn probe_destination(&self, dst: &Path) -> EntryKind {
        match self.fs.lstat(dst) {
            Ok(kind) => kind,
            Err(e) => {
                debug!(dest = %dst.display(), error = %e, "destination probe failed; treating as missing");
                EntryKind::Missing
            }
        }
    }

    fn transfer(&self, src: &Path, dst: &Path) -> Result<()> {
        match self.fs.rename(src, dst) {
            Ok(()) => {
                info!(src = %src.display(), dest = %dst.display(), "Renamed atomically");
                Ok(())
            }
            Err(e) if is_cross_device(&e) => {
                warn!(error = %e, hint = "cross-filesystem; will copy instead", "Atomic rename failed, using copy+remove");
                self.fs
                    .copy_tree(src, dst)
                    .map_err(io_error_with_help("copy to destination", dst))?;
                self.fs
                    .remove_tree(src)
                    .map_err(io_error_with_help("remove original after copy", src))?;
                info!(src = %src.display(), dest = %dst.display(), "Copied across devices and removed source");
                Ok(())
            }
            Err(e) => {
                let err = io_error_with_help("rename", src)(e);
                Err(err.context(format!("move '{}' -> '{}'", src.display(), dst.display())))
            }
        }
    }

    fn merge_children(&self, src: &Path, dst: &Path, options: &MoveOptions) -> Result<()> {
        let children = self
            .fs
            .list_dir(src)
            .map_err(io_error_with_help("list source directory", src))?;
        info!(src = %src.display(), dest = %dst.display(), entries = children.len(), "Merging directory");

        for name in children {
            self.move_level(&src.join(&name), &dst.join(&name), options)?;
        }
        Ok(())
    }

    fn cleanup_source(&self, src: &Path, options: &MoveOptions) -> Result<()> {
        if options.purge {
            self.fs
                .remove_tree(src)
                .map_err(io_error_with_help("purge source", src))?;
            debug!(src = %src.display(), "purged source remnants");
        } else if let Err(e) = self.fs.remove_empty_dir(src) {
            // Expected when filtered or superseded entries remain.
            trace!(src = %src.display(), error = %e, "source left in place");
        }
        Ok(())
    }
}
