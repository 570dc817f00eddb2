use directories::BaseDirs;
use serde::{Deserialize, Serialize};
use std::{
    fs, io,
    path::{Path, PathBuf},
};

use crate::error::{Result, WoozyError};

const CONFIG_FILE_NAME: &str = ".woozy";
const PLACEHOLDER_PLACE: &str = "Sweden/Västerbotten/Estersmark";
const PLACEHOLDER_DAYS: i64 = 3;

/// User settings stored as JSON in `~/.woozy`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Configuration {
    /// yr.no place path, e.g. `Norway/Oslo/Oslo/Oslo`.
    pub place: String,

    /// Days to show; 0 or less defers to the command line.
    #[serde(default)]
    pub days: i64,
}

impl Default for Configuration {
    fn default() -> Self {
        Self {
            place: PLACEHOLDER_PLACE.to_string(),
            days: PLACEHOLDER_DAYS,
        }
    }
}

/// Outcome of loading the configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigStatus {
    Loaded(Configuration),
    /// No file existed; a placeholder was written here and must be edited.
    Bootstrapped(PathBuf),
}

impl Configuration {
    /// Path to the config file in the user's home directory.
    pub fn config_file_path() -> Result<PathBuf> {
        let dirs = BaseDirs::new().ok_or(WoozyError::NoHomeDir)?;
        Ok(dirs.home_dir().join(CONFIG_FILE_NAME))
    }

    /// Load the config from `path`, writing a placeholder if it does not exist.
    pub fn load_or_bootstrap(path: &Path) -> Result<ConfigStatus> {
        let contents = match fs::read_to_string(path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                Self::default().save(path)?;
                tracing::info!(path = %path.display(), "Wrote placeholder configuration");
                return Ok(ConfigStatus::Bootstrapped(path.to_path_buf()));
            }
            Err(source) => {
                return Err(WoozyError::ConfigIo {
                    path: path.to_path_buf(),
                    source,
                });
            }
        };

        let cfg = serde_json::from_str(&contents).map_err(|source| WoozyError::ConfigFormat {
            path: path.to_path_buf(),
            source,
        })?;

        Ok(ConfigStatus::Loaded(cfg))
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self).map_err(|source| WoozyError::ConfigFormat {
            path: path.to_path_buf(),
            source,
        })?;

        fs::write(path, json).map_err(|source| WoozyError::ConfigIo {
            path: path.to_path_buf(),
            source,
        })?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            fs::set_permissions(path, fs::Permissions::from_mode(0o600)).map_err(|source| {
                WoozyError::ConfigIo {
                    path: path.to_path_buf(),
                    source,
                }
            })?;
        }

        Ok(())
    }

    /// Days to display: the configured value, or `cli_days` when it is 0 or negative.
    pub fn effective_days(&self, cli_days: u32) -> u32 {
        if self.days <= 0 {
            return cli_days;
        }
        u32::try_from(self.days).unwrap_or(u32::MAX)
    }
}
