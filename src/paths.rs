use std::env;
use std::path::PathBuf;

use anyhow::{Context, Result};

const APP_DIR: &str = "twitch-cli";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Platform {
    Windows,
    Posix,
}

impl Platform {
    pub fn current() -> Self {
        if cfg!(windows) {
            Self::Windows
        } else {
            Self::Posix
        }
    }
}

pub fn config_dir() -> Result<PathBuf> {
    config_dir_for(Platform::current(), |key| env::var(key).ok())
}

/// Resolves the config directory from an environment lookup without touching
/// the process environment.
pub fn config_dir_for<F>(platform: Platform, var: F) -> Result<PathBuf>
where
    F: Fn(&str) -> Option<String>,
{
    match platform {
        Platform::Windows => {
            let appdata = var("APPDATA").context("APPDATA is not set")?;
            Ok(PathBuf::from(appdata).join(APP_DIR))
        }
        Platform::Posix => {
            if let Some(xdg) = var("XDG_CONFIG_HOME").filter(|value| !value.is_empty()) {
                return Ok(expand_home(&xdg, &var)?.join(APP_DIR));
            }

            let home = var("HOME").context("could not determine home directory")?;
            Ok(PathBuf::from(home).join(".config").join(APP_DIR))
        }
    }
}

fn expand_home<F>(path: &str, var: &F) -> Result<PathBuf>
where
    F: Fn(&str) -> Option<String>,
{
    let rest = match path.strip_prefix('~') {
        Some(rest) if rest.is_empty() || rest.starts_with('/') => rest.trim_start_matches('/'),
        _ => return Ok(PathBuf::from(path)),
    };

    let home = var("HOME").context("could not determine home directory")?;
    let home = PathBuf::from(home);
    Ok(if rest.is_empty() { home } else { home.join(rest) })
}
