//! Core configuration types.
//! - Config holds runtime settings with sensible defaults.
//! - LogLevel represents verbosity with simple parsing helpers.

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use crate::fs_ops::StdFs;
use crate::mover::MoveOptions;

/// Program-defined verbosity levels exposed to users/config.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogLevel {
    /// Only errors
    Quiet,
    /// Informational output (default)
    #[default]
    Normal,
    /// More info (like verbose)
    Info,
    /// Debug/trace
    Debug,
}

impl LogLevel {
    /// Parse common string names into our LogLevel (case-insensitive).
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "quiet" | "error" | "none" => Some(LogLevel::Quiet),
            "normal" => Some(LogLevel::Normal),
            "info" | "verbose" | "detailed" => Some(LogLevel::Info),
            "debug" | "trace" => Some(LogLevel::Debug),
            _ => None,
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            LogLevel::Quiet => "quiet",
            LogLevel::Normal => "normal",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
        };
        f.write_str(s)
    }
}

impl FromStr for LogLevel {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| format!("invalid log level: '{s}'"))
    }
}

/// Settings for a CLI run: move policy plus logging.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Config {
    /// Replace existing destinations
    pub overwrite: bool,
    /// Merge directories entry by entry
    pub merge: bool,
    /// Remove source leftovers after the move
    pub purge: bool,
    /// Keep timestamps/permissions when a move falls back to copying
    pub preserve_metadata: bool,
    /// Console verbosity
    pub log_level: LogLevel,
    /// Optional path to a log file
    pub log_file: Option<PathBuf>,
}

impl Config {
    /// Per-call options derived from this config (accept-all filter).
    pub fn move_options(&self) -> MoveOptions {
        MoveOptions::new()
            .overwrite(self.overwrite)
            .merge(self.merge)
            .purge(self.purge)
    }

    /// Filesystem primitives configured from this config.
    pub fn filesystem(&self) -> StdFs {
        StdFs::new().preserve_metadata(self.preserve_metadata)
    }
}
