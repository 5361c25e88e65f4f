//! YanShell configuration system
//!
//! User-level configuration with defaulted fields.
//!
//! # Configuration hierarchy
//!
//! ```text
//! Priority (high -> low):
//! 1. CLI arguments
//! 2. User-level (~/.config/yanshell/config.toml)
//! 3. Default values
//! ```
//!
//! # Usage
//!
//! ```rust,no_run
//! use yanshell::util::config::load_user_config;
//!
//! let config = load_user_config().unwrap();
//! ```

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

/// User-level configuration for YanShell
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct UserConfig {
    /// Shell settings
    #[serde(default)]
    pub repl: ReplConfig,
}

/// Shell configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReplConfig {
    /// Prompt string
    #[serde(default = "default_prompt")]
    pub prompt: String,
    /// Prompt shown while a multi-line chunk is open
    #[serde(default = "default_continuation_prompt")]
    pub continuation_prompt: String,
    /// Maximum history size
    #[serde(default = "default_history_size")]
    pub history_size: usize,
    /// History file path
    #[serde(default)]
    pub history_file: Option<PathBuf>,
    /// Colour scheme applied at start-up
    #[serde(default = "default_colour_scheme")]
    pub colour_scheme: String,
}

fn default_prompt() -> String {
    "ys> ".to_string()
}

fn default_continuation_prompt() -> String {
    ".. ".to_string()
}

fn default_history_size() -> usize {
    1000
}

fn default_colour_scheme() -> String {
    "plain".to_string()
}

impl Default for ReplConfig {
    fn default() -> Self {
        Self {
            prompt: default_prompt(),
            continuation_prompt: default_continuation_prompt(),
            history_size: 1000,
            history_file: None,
            colour_scheme: default_colour_scheme(),
        }
    }
}

/// Get the user config directory
pub fn get_config_dir() -> Option<PathBuf> {
    // Try XDG config directory on Unix
    if let Ok(xdg_config) = std::env::var("XDG_CONFIG_HOME") {
        return Some(PathBuf::from(xdg_config).join("yanshell"));
    }

    // Fallback to ~/.config/yanshell
    if let Ok(home) = std::env::var("HOME") {
        return Some(PathBuf::from(home).join(".config").join("yanshell"));
    }

    // On Windows, try %APPDATA%
    if let Ok(appdata) = std::env::var("APPDATA") {
        return Some(PathBuf::from(appdata).join("yanshell"));
    }

    None
}

/// Get the user config file path (~/.config/yanshell/config.toml)
pub fn get_config_path() -> Option<PathBuf> {
    get_config_dir().map(|dir| dir.join("config.toml"))
}

/// Load user-level configuration
///
/// Returns the default config if the file doesn't exist.
pub fn load_user_config() -> Result<UserConfig, ConfigError> {
    let path = match get_config_path() {
        Some(p) => p,
        None => return Ok(UserConfig::default()),
    };

    if !path.exists() {
        return Ok(UserConfig::default());
    }

    let content = fs::read_to_string(&path).map_err(ConfigError::IoError)?;

    toml::from_str(&content).map_err(ConfigError::ParseError)
}

/// Save user-level configuration
pub fn save_user_config(config: &UserConfig) -> Result<(), ConfigError> {
    let dir = get_config_dir().ok_or(ConfigError::NoConfigDir)?;
    let path = dir.join("config.toml");

    if !dir.exists() {
        fs::create_dir_all(&dir).map_err(ConfigError::IoError)?;
    }

    let content = toml::to_string_pretty(config).map_err(ConfigError::SerializeError)?;
    fs::write(&path, content).map_err(ConfigError::IoError)?;

    Ok(())
}

/// Configuration errors
#[derive(Debug)]
pub enum ConfigError {
    IoError(std::io::Error),
    ParseError(toml::de::Error),
    SerializeError(toml::ser::Error),
    NoConfigDir,
}

impl std::fmt::Display for ConfigError {
    fn fmt(
        &self,
        f: &mut std::fmt::Formatter<'_>,
    ) -> std::fmt::Result {
        match self {
            ConfigError::IoError(e) => write!(f, "IO error: {}", e),
            ConfigError::ParseError(e) => write!(f, "Config parse error: {}", e),
            ConfigError::SerializeError(e) => write!(f, "Config serialize error: {}", e),
            ConfigError::NoConfigDir => write!(f, "Cannot determine config directory"),
        }
    }
}

impl std::error::Error for ConfigError {}
