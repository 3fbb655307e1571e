use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::debug;

use crate::{fs_utils, paths};

#[derive(Debug, Serialize, Deserialize, Default, Clone, PartialEq)]
pub struct Config {
    /// Empty when no token has been stored yet.
    #[serde(default)]
    pub oauth: String,
    /// Keys we don't know about, kept so a save doesn't drop them.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Config {
    pub fn is_authenticated(&self) -> bool {
        !self.oauth.is_empty()
    }
}

pub(crate) fn config_path() -> Result<PathBuf> {
    let base = paths::config_dir()?;
    Ok(base.join("config.json"))
}

/// Loads the config at `path`, creating the directory and an empty file on
/// first use, and writes the defaulted shape back before returning it.
pub(crate) fn load_config(path: &Path) -> Result<Config> {
    let dir = path
        .parent()
        .context("config path should have a parent directory")?;
    fs_utils::ensure_dir(dir)?;

    if !path.exists() {
        fs::write(path, "{}")
            .with_context(|| format!("failed to create config at {}", path.display()))?;
        fs_utils::set_file_permissions(path)?;
        println!("Configuration file created at {}", path.display());
    }

    let raw = fs::read_to_string(path)
        .with_context(|| format!("failed to read config at {}", path.display()))?;
    let config: Config = serde_json::from_str(&raw)
        .with_context(|| format!("failed to parse config at {}", path.display()))?;
    debug!(path = %path.display(), authenticated = config.is_authenticated(), "loaded config");

    save_config(path, &config)?;
    Ok(config)
}

pub(crate) fn save_config(path: &Path, config: &Config) -> Result<()> {
    let dir = path
        .parent()
        .context("config path should have a parent directory")?;
    fs_utils::ensure_dir(dir)?;

    let json = to_pretty_json(config)?;
    fs_utils::write_replace(path, &json)
}

/// Sorted keys, four space indent.
fn to_pretty_json(config: &Config) -> Result<Vec<u8>> {
    // Going through `Value` sorts the keys, its map is ordered.
    let value = serde_json::to_value(config).context("failed to serialize config")?;
    let mut buf = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
    value
        .serialize(&mut ser)
        .context("failed to serialize config")?;
    Ok(buf)
}
