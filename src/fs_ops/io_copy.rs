//! Streaming file copy used by the tree copier.
//!
//! - The destination is created with `create_new(true)`; an existing file is never clobbered.
//! - `io::copy` between two `File`s lets std pick the in-kernel fast path
//!   (copy_file_range / sendfile on Linux) and falls back to a buffered loop elsewhere.
//! - Durability is selectable: `Data` only flushes, `Full` also fsyncs the new file.

use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::path::Path;

/// Durability mode controlling post-write flush behavior.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum DurabilityMode {
    /// Data reaches the OS page cache; no disk barrier.
    Data,
    /// Force data and metadata to stable storage (`sync_all`).
    #[default]
    Full,
}

/// Copy `src` -> `dst` and return the number of bytes written.
pub(super) fn copy_streaming(src: &Path, dst: &Path, mode: DurabilityMode) -> io::Result<u64> {
    let mut reader = File::open(src)?;
    let mut writer = OpenOptions::new().write(true).create_new(true).open(dst)?;

    let bytes = io::copy(&mut reader, &mut writer)?;
    writer.flush()?;
    if mode == DurabilityMode::Full {
        writer.sync_all()?;
    }
    Ok(bytes)
}
