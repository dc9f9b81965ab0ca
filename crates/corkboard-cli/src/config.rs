//! Persistent CLI configuration.
//!
//! Lives at `<data_dir>/config.toml`. A missing file is the default config.

use std::{
    fs,
    path::{Path, PathBuf},
};

use serde::{Deserialize, Serialize};

use crate::CliError;

/// Data directory name under the home directory
pub const APP_DIR_NAME: &str = ".corkboard";

/// Config file name inside the data directory
pub const CONFIG_FILE_NAME: &str = "config.toml";

/// Default local board file name inside the data directory
pub const BOARD_FILE_NAME: &str = "board.redb";

/// Key store root inside the data directory, one subdirectory per identity
pub const KEYS_DIR_NAME: &str = "keys";

/// Saved settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Identity used when `--name` is not given
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_name: Option<String>,

    /// Board file, if not the default inside the data directory
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub board: Option<PathBuf>,
}

impl Config {
    /// Load the config from `path`, or the default if the file is absent.
    pub fn load(path: &Path) -> Result<Self, CliError> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let text = fs::read_to_string(path)?;
        toml::from_str(&text).map_err(|e| CliError::Config(e.to_string()))
    }

    /// Write the config to `path`, creating parent directories.
    pub fn save(&self, path: &Path) -> Result<(), CliError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let text = toml::to_string_pretty(self).map_err(|e| CliError::Config(e.to_string()))?;
        fs::write(path, text)?;
        Ok(())
    }
}

/// Data directory: `custom` if given, otherwise `~/.corkboard`.
pub fn data_dir(custom: Option<PathBuf>) -> Result<PathBuf, CliError> {
    if let Some(path) = custom {
        return Ok(path);
    }

    let home = dirs::home_dir()
        .ok_or_else(|| CliError::Config("cannot locate home directory".to_string()))?;
    Ok(home.join(APP_DIR_NAME))
}
