use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

const APP_DIR_NAME: &str = "chrome-profiles";
const CONFIG_FILE_NAME: &str = "config.toml";
pub const DEFAULT_BROWSER_COMMAND: &str = "google-chrome";
pub const DEFAULT_FALLBACK_ICON: &str = "images/icon.png";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("io error for '{}': {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid config file: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),
    #[error("{0}")]
    Invalid(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Chrome user-data directory holding `Default` and `Profile *` folders.
    pub profiles_dir: PathBuf,
    /// Executable name looked up on `PATH` at startup.
    pub browser_command: String,
    /// Icon shown when a profile has no picture, and for the empty-state item.
    pub fallback_icon: String,
    #[serde(skip)]
    pub config_path: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            profiles_dir: default_profiles_dir(),
            browser_command: DEFAULT_BROWSER_COMMAND.to_string(),
            fallback_icon: DEFAULT_FALLBACK_ICON.to_string(),
            config_path: default_config_path(),
        }
    }
}

pub fn stable_app_data_dir() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(std::env::temp_dir)
        .join(APP_DIR_NAME)
}

pub fn default_config_path() -> PathBuf {
    stable_app_data_dir().join(CONFIG_FILE_NAME)
}

pub fn default_profiles_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_default()
        .join(".config")
        .join("google-chrome")
}

/// Reads the config at `path` (or the default location). A missing file yields defaults.
pub fn load(path: Option<&Path>) -> Result<Config, ConfigError> {
    let config_path = path.map(Path::to_path_buf).unwrap_or_else(default_config_path);
    if !config_path.exists() {
        return Ok(Config {
            config_path,
            ..Config::default()
        });
    }

    let raw = std::fs::read_to_string(&config_path).map_err(|source| ConfigError::Io {
        path: config_path.clone(),
        source,
    })?;
    let mut config: Config = toml::from_str(&raw)?;
    config.config_path = config_path;
    validate(&config).map_err(ConfigError::Invalid)?;
    Ok(config)
}

pub fn save(cfg: &Config) -> Result<(), ConfigError> {
    validate(cfg).map_err(ConfigError::Invalid)?;
    if let Some(parent) = cfg.config_path.parent() {
        std::fs::create_dir_all(parent).map_err(|source| ConfigError::Io {
            path: parent.to_path_buf(),
            source,
        })?;
    }

    let encoded = toml::to_string_pretty(cfg)?;
    std::fs::write(&cfg.config_path, encoded).map_err(|source| ConfigError::Io {
        path: cfg.config_path.clone(),
        source,
    })
}

pub fn validate(cfg: &Config) -> Result<(), String> {
    if cfg.profiles_dir.as_os_str().is_empty() {
        return Err("profiles_dir is required".into());
    }

    let browser = cfg.browser_command.trim();
    if browser.is_empty() {
        return Err("browser_command is required".into());
    }
    if browser.chars().any(char::is_whitespace) {
        return Err("browser_command must be a single executable name".into());
    }

    if cfg.fallback_icon.trim().is_empty() {
        return Err("fallback_icon is required".into());
    }

    Ok(())
}
