//! XML configuration support.
//! - Loads settings from config.xml (quick_xml + serde).
//! - A missing file means defaults; an unreadable or malformed file is an error.
//!
//! Notes:
//! - Unknown XML fields are rejected so typos surface instead of being ignored.
//! - Values are trimmed, so pretty-printed files with surrounding whitespace parse.

use anyhow::{Context, Result};
use quick_xml::de::from_str as from_xml_str;
use serde::Deserialize;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use super::paths::default_config_path;
use super::types::{Config, LogLevel};

/// Struct mirroring the XML config for deserialization.
#[derive(Debug, Default, Deserialize)]
#[serde(rename = "config")]
#[serde(deny_unknown_fields)]
struct XmlConfig {
    #[serde(default, deserialize_with = "de_bool_trimmed_opt")]
    overwrite: Option<bool>,
    #[serde(default, deserialize_with = "de_bool_trimmed_opt")]
    merge: Option<bool>,
    #[serde(default, deserialize_with = "de_bool_trimmed_opt")]
    purge: Option<bool>,
    #[serde(default, deserialize_with = "de_bool_trimmed_opt")]
    preserve_metadata: Option<bool>,
    #[serde(rename = "log_level")]
    log_level: Option<String>,
    #[serde(rename = "log_file")]
    log_file: Option<String>,
}

// Custom deserializer that trims surrounding whitespace for optional bools.
// Empty elements count as unset.
fn de_bool_trimmed_opt<'de, D>(deserializer: D) -> Result<Option<bool>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    use serde::de::Error;
    let opt: Option<String> = Option::deserialize(deserializer)?;
    match opt.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(s) => match s.to_ascii_lowercase().as_str() {
            "true" | "yes" | "1" => Ok(Some(true)),
            "false" | "no" | "0" => Ok(Some(false)),
            other => Err(D::Error::custom(format!("invalid boolean: '{other}'"))),
        },
    }
}

// Map XmlConfig -> Config; unset fields keep their defaults.
fn xml_to_config(parsed: XmlConfig) -> Result<Config> {
    let mut cfg = Config::default();

    cfg.overwrite = parsed.overwrite.unwrap_or(cfg.overwrite);
    cfg.merge = parsed.merge.unwrap_or(cfg.merge);
    cfg.purge = parsed.purge.unwrap_or(cfg.purge);
    cfg.preserve_metadata = parsed.preserve_metadata.unwrap_or(cfg.preserve_metadata);

    if let Some(s) = parsed.log_level.as_deref() {
        cfg.log_level = s.parse::<LogLevel>().map_err(anyhow::Error::msg)?;
    }
    if let Some(s) = parsed.log_file.as_deref() {
        let trimmed = s.trim();
        if !trimmed.is_empty() {
            cfg.log_file = Some(PathBuf::from(trimmed));
        }
    }

    Ok(cfg)
}

/// Load a Config from a specific XML file path (quick_xml).
pub fn load_config_from_xml_path(path: &Path) -> Result<Config> {
    let contents = fs::read_to_string(path)
        .with_context(|| format!("read config xml '{}'", path.display()))?;
    let parsed: XmlConfig = from_xml_str(&contents)
        .with_context(|| format!("parse config xml '{}'", path.display()))?;
    xml_to_config(parsed).with_context(|| format!("invalid value in config xml '{}'", path.display()))
}

/// Outcome of looking for the config file.
#[derive(Debug)]
pub enum LoadResult {
    /// File found and parsed.
    Loaded(Config, PathBuf),
    /// No file at the resolved location; defaults apply.
    Missing(PathBuf),
}

impl LoadResult {
    pub fn into_config(self) -> Config {
        match self {
            LoadResult::Loaded(cfg, _) => cfg,
            LoadResult::Missing(_) => Config::default(),
        }
    }
}

/// Resolve the config location (see [`default_config_path`]) and load it.
pub fn load_config() -> Result<LoadResult> {
    let path = default_config_path()?;
    match fs::metadata(&path) {
        Ok(_) => {
            let cfg = load_config_from_xml_path(&path)?;
            Ok(LoadResult::Loaded(cfg, path))
        }
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(LoadResult::Missing(path)),
        Err(e) => Err(e).with_context(|| format!("stat config xml '{}'", path.display())),
    }
}
