//! Typed error definitions for fs_move.
//! Provides the small set of named failure modes; everything else travels as an opaque
//! `anyhow::Error` wrapping the original `io::Error`.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum FsMoveError {
    /// Destination exists and neither overwrite nor merge was requested.
    #[error("Destination directory already exists: {0}")]
    DestinationExists(PathBuf),

    #[error("Source path not found: {0}")]
    SourceMissing(PathBuf),
}

impl FsMoveError {
    /// Process exit code for this failure (1 is reserved for opaque errors).
    pub fn code(&self) -> u8 {
        match self {
            FsMoveError::DestinationExists(_) => 2,
            FsMoveError::SourceMissing(_) => 3,
        }
    }

    /// Stable label used in structured logs.
    pub fn kind(&self) -> &'static str {
        match self {
            FsMoveError::DestinationExists(_) => "destination_exists",
            FsMoveError::SourceMissing(_) => "source_missing",
        }
    }
}
