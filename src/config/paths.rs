//! Location of the per-user configuration file

use log::info;
use std::ffi::OsString;
use std::fs;
use std::path::PathBuf;

use crate::error::{TinyDbError, TinyDbResult};

pub const APP_DIR_NAME: &str = "tinydb";
pub const CONFIG_FILE_NAME: &str = "config.toml";

/// Returns the config file path, creating its directory if missing.
///
/// Lookup order:
/// - platform config directory (`~/.config/tinydb`, `~/Library/Application Support/tinydb`, `%APPDATA%\tinydb`)
/// - `$XDG_CONFIG_HOME/tinydb`
/// - `~/.tinydb`
pub fn default_path() -> TinyDbResult<PathBuf> {
    let config_dir = config_dir_from(
        dirs::config_dir(),
        std::env::var_os("XDG_CONFIG_HOME"),
        dirs::home_dir(),
    )
    .ok_or(TinyDbError::NoConfigDirectory)?;

    if !config_dir.exists() {
        fs::create_dir_all(&config_dir).map_err(|source| TinyDbError::ConfigWrite {
            path: config_dir.clone(),
            source,
        })?;
        info!("Created config directory: {:?}", config_dir);
    }

    Ok(config_dir.join(CONFIG_FILE_NAME))
}

fn config_dir_from(
    platform_dir: Option<PathBuf>,
    xdg_config_home: Option<OsString>,
    home_dir: Option<PathBuf>,
) -> Option<PathBuf> {
    if let Some(dir) = platform_dir {
        return Some(dir.join(APP_DIR_NAME));
    }
    if let Some(xdg) = xdg_config_home.filter(|v| !v.is_empty()) {
        return Some(PathBuf::from(xdg).join(APP_DIR_NAME));
    }
    home_dir.map(|home| home.join(format!(".{}", APP_DIR_NAME)))
}
