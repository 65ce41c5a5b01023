//! Application orchestrator.
//! Loads/merges config, initializes logging, then moves each source to the destination in turn.

use anyhow::{bail, Result};
use std::env;
use std::path::Path;
use tracing::{debug, error, info};

use fs_move::cli::Args;
use fs_move::config::{default_config_path, load_config, LoadResult, CONFIG_ENV};
use fs_move::output as out;
use fs_move::{Filesystem, FsMoveError, MoveOptions, Mover};

use crate::logging::init_tracing;

/// Process exit status for a failed run.
pub fn exit_code(e: &anyhow::Error) -> u8 {
    e.downcast_ref::<FsMoveError>().map_or(1, FsMoveError::code)
}

/// Run the CLI application.
pub fn run(args: Args) -> Result<()> {
    // Handle --print-config before logging init
    if args.print_config {
        print_config_location();
        return Ok(());
    }

    let loaded = load_config()?;
    let cfg_source = match &loaded {
        LoadResult::Loaded(_, p) => format!("loaded from {}", p.display()),
        LoadResult::Missing(p) => format!("no file at {}; using defaults", p.display()),
    };
    let mut cfg = loaded.into_config();
    args.apply_overrides(&mut cfg);

    // Hold the guard until the end of the run so buffered file logs get flushed.
    let _guard = init_tracing(cfg.log_level, cfg.log_file.as_deref(), args.json).inspect_err(|e| {
        out::print_error(&format!("Failed to initialize logging: {e:#}"));
    })?;
    debug!(config = %cfg_source, ?cfg, "Starting fs_move");

    let Some((sources, dest)) = args.split_paths() else {
        bail!("expected at least one source and a destination");
    };

    let mover = Mover::new(cfg.filesystem());
    let options = cfg.move_options();
    for src in sources {
        move_one(&mover, src, dest, &options)?;
    }
    Ok(())
}

fn move_one<F: Filesystem>(mover: &Mover<F>, src: &Path, dest: &Path, options: &MoveOptions) -> Result<()> {
    match mover.move_path(src, dest, options) {
        Ok(()) => {
            info!(source = %src.display(), dest = %dest.display(), "Move completed");
            Ok(())
        }
        Err(e) => {
            if let Some(fe) = e.downcast_ref::<FsMoveError>() {
                let (code, kind) = (fe.code(), fe.kind());
                match fe {
                    FsMoveError::DestinationExists(path) => {
                        error!(code, kind, path = %path.display(), source = %src.display(), "Move failed")
                    }
                    FsMoveError::SourceMissing(path) => {
                        error!(code, kind, path = %path.display(), dest = %dest.display(), "Move failed")
                    }
                }
            } else {
                error!(code = 1, kind = "io", source = %src.display(), dest = %dest.display(), error = %format!("{e:#}"), "Move failed");
            }
            Err(e)
        }
    }
}

fn print_config_location() {
    if let Some(raw) = env::var_os(CONFIG_ENV) {
        out::print_info(&format!("Using {CONFIG_ENV} (explicit):\n  {}\n", raw.to_string_lossy()));
        out::print_info(&format!("To override, unset {CONFIG_ENV} or set it to another file."));
    }
    match default_config_path() {
        Ok(p) => {
            out::print_info(&format!("fs_move config path:\n  {}\n", p.display()));
            if p.exists() {
                out::print_info("A config file exists at that location.");
            } else {
                out::print_info(
                    "No config file exists there; built-in defaults apply. Example:\n\n<config>\n  <merge>true</merge>\n  <overwrite>false</overwrite>\n  <purge>false</purge>\n  <preserve_metadata>false</preserve_metadata>\n  <log_level>normal</log_level>\n  <log_file>/path/to/fs_move.log</log_file>\n</config>\n",
                );
            }
        }
        Err(e) => {
            out::print_error(&format!("Could not determine a config path: {e:#}"));
        }
    }
}
