//! CLI definition and parsing.
//! Defines Args and provides parse() for command-line handling.
//!
//! Notes:
//! - The last positional path is the destination; every other one is a source.
//! - --debug is a shorthand for --log-level debug.
//! - Boolean flags only switch things on; they never turn off a config value.

use clap::{Parser, ValueHint};
use std::path::{Path, PathBuf};

use crate::config::types::{Config, LogLevel};

/// Move files and directories, optionally overwriting or merging into an existing destination.
/// CLI flags override config values (which are loaded from XML if present).
#[derive(Parser, Debug, Clone)]
#[command(author, version, about = "Move files and directories with merge/overwrite/purge semantics")]
pub struct Args {
    /// One or more sources followed by the destination.
    #[arg(
        value_name = "PATHS",
        num_args = 2..,
        required_unless_present = "print_config",
        value_hint = ValueHint::AnyPath,
        help = "<SOURCE>... <DESTINATION>"
    )]
    pub paths: Vec<PathBuf>,

    /// Merge source directories into existing destination directories.
    #[arg(long, help = "Merge directories into an existing destination")]
    pub merge: bool,

    /// Replace an existing destination.
    #[arg(long, help = "Overwrite an existing destination")]
    pub overwrite: bool,

    /// Remove whatever is left at the source afterwards.
    #[arg(long, help = "Delete leftover source content after moving")]
    pub purge: bool,

    /// Keep timestamps and permissions when a move has to copy across devices.
    #[arg(long, help = "Preserve timestamps/permissions (and xattrs when enabled) on cross-device copies")]
    pub preserve_metadata: bool,

    /// Enable debug logging (equivalent to `--log-level debug`).
    #[arg(short = 'd', long, help = "Enable debug logging (shorthand for --log-level debug)")]
    pub debug: bool,

    /// Set log level. One of: quiet, normal, info, debug.
    #[arg(long, value_parser = parse_log_level, help = "Set log level: quiet, normal, info, debug")]
    pub log_level: Option<LogLevel>,

    /// Also write logs to this file.
    #[arg(long, value_name = "PATH", value_hint = ValueHint::FilePath, help = "Append logs to this file")]
    pub log_file: Option<PathBuf>,

    /// Emit logs in structured JSON (includes timestamp, level, and structured fields).
    #[arg(long, help = "Emit logs in structured JSON")]
    pub json: bool,

    /// Print where fs_move will look for the config file (or FS_MOVE_CONFIG if set), then exit.
    #[arg(long, help = "Print the config file location used by fs_move and exit")]
    pub print_config: bool,
}

fn parse_log_level(s: &str) -> Result<LogLevel, String> {
    s.parse()
}

impl Args {
    /// Sources and destination. `None` when fewer than two paths were given.
    pub fn split_paths(&self) -> Option<(&[PathBuf], &Path)> {
        match self.paths.split_last() {
            Some((dest, sources)) if !sources.is_empty() => Some((sources, dest.as_path())),
            _ => None,
        }
    }

    /// Effective log level derived from flags.
    /// Precedence: --debug > --log-level value > None (use config default).
    pub fn effective_log_level(&self) -> Option<LogLevel> {
        if self.debug {
            return Some(LogLevel::Debug);
        }
        self.log_level
    }

    /// Apply CLI overrides to a loaded Config (in-place). No-ops for unset flags.
    pub fn apply_overrides(&self, cfg: &mut Config) {
        if self.merge {
            cfg.merge = true;
        }
        if self.overwrite {
            cfg.overwrite = true;
        }
        if self.purge {
            cfg.purge = true;
        }
        if self.preserve_metadata {
            cfg.preserve_metadata = true;
        }
        if let Some(level) = self.effective_log_level() {
            cfg.log_level = level;
        }
        if let Some(path) = &self.log_file {
            cfg.log_file = Some(path.clone());
        }
    }
}

pub fn parse() -> Args {
    Args::parse()
}
