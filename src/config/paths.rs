//! Default path helpers and symlink checks.
//! Determines OS-appropriate config/log paths and detects symlinked ancestors for safety.

use anyhow::{anyhow, Result};
use dirs::{config_dir, data_dir};
use std::env;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Environment variable naming an explicit config file (or a directory holding `config.xml`).
pub const CONFIG_ENV: &str = "FS_MOVE_CONFIG";

const APP_DIR: &str = "fs_move";
const CONFIG_FILE: &str = "config.xml";
const LOG_FILE: &str = "fs_move.log";

/// Config file location.
///
/// `FS_MOVE_CONFIG` wins when set: relative values are anchored at the current
/// directory and a directory value gets `config.xml` appended. Otherwise the
/// per-user config dir is used.
pub fn default_config_path() -> Result<PathBuf> {
    if let Some(raw) = env::var_os(CONFIG_ENV) {
        return resolve_env_path(PathBuf::from(raw));
    }
    config_dir()
        .map(|base| base.join(APP_DIR).join(CONFIG_FILE))
        .ok_or_else(|| anyhow!("could not determine a config directory for this user"))
}

fn resolve_env_path(p: PathBuf) -> Result<PathBuf> {
    let p = if p.is_relative() {
        env::current_dir()?.join(p)
    } else {
        p
    };
    Ok(if p.is_dir() { p.join(CONFIG_FILE) } else { p })
}

/// Suggested log file location. Sits next to the config when `FS_MOVE_CONFIG` is set,
/// else under the per-user data dir. Nothing is created.
pub fn default_log_path() -> Result<PathBuf> {
    if env::var_os(CONFIG_ENV).is_some() {
        let cfg = default_config_path()?;
        let dir = cfg.parent().unwrap_or_else(|| Path::new("."));
        return Ok(dir.join(LOG_FILE));
    }
    data_dir()
        .map(|base| base.join(APP_DIR).join(LOG_FILE))
        .ok_or_else(|| anyhow!("could not determine a data directory for this user"))
}

/// Return true if any existing ancestor of `path` is a symlink.
pub fn path_has_symlink_ancestor(path: &Path) -> io::Result<bool> {
    let mut p = path.parent();
    while let Some(anc) = p {
        if anc.as_os_str().is_empty() {
            break;
        }
        match fs::symlink_metadata(anc) {
            Ok(meta) if meta.file_type().is_symlink() => return Ok(true),
            Ok(_) => {}
            Err(e) if e.kind() == io::ErrorKind::NotFound => {}
            Err(e) => return Err(e),
        }
        p = anc.parent();
    }
    Ok(false)
}
