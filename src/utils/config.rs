// Configuration loading and layering

use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::models::settings::{Settings, SettingsFile};
use crate::utils::error::{BotenvError, Result};

/// Project-level settings file, next to pyproject.toml
pub const PROJECT_CONFIG_FILE: &str = "botenv.toml";

/// Configuration parsing and layering utilities
pub struct ConfigParser;

impl ConfigParser {
    /// Build effective settings for a project.
    ///
    /// Layers, later wins: built-in defaults, the user config file, then
    /// `botenv.toml` in the project root (or `explicit`, when given).
    /// The result is not validated; command-line overrides still apply.
    pub fn load_settings(project_root: &Path, explicit: Option<&Path>) -> Result<Settings> {
        let mut settings = Settings::default();

        if let Some(user_config) = get_user_config_path() {
            if user_config.is_file() {
                debug!(path = %user_config.display(), "applying user config");
                settings.apply_file(Self::load_settings_file(&user_config)?);
            }
        }

        match explicit {
            Some(path) => {
                if !path.is_file() {
                    return Err(BotenvError::ConfigError(format!(
                        "Configuration file not found: {}",
                        path.display()
                    )));
                }
                debug!(path = %path.display(), "applying explicit config");
                settings.apply_file(Self::load_settings_file(path)?);
            }
            None => {
                let project_config = project_root.join(PROJECT_CONFIG_FILE);
                if project_config.is_file() {
                    debug!(path = %project_config.display(), "applying project config");
                    settings.apply_file(Self::load_settings_file(&project_config)?);
                }
            }
        }

        Ok(settings)
    }

    /// Read and parse one settings file
    pub fn load_settings_file(path: &Path) -> Result<SettingsFile> {
        let content = fs::read_to_string(path).map_err(|e| {
            BotenvError::ConfigError(format!("Failed to read {}: {e}", path.display()))
        })?;

        Self::parse_settings(&content).map_err(|e| match e {
            BotenvError::ConfigError(msg) => {
                BotenvError::ConfigError(format!("{}: {msg}", path.display()))
            }
            other => other,
        })
    }

    pub fn parse_settings(content: &str) -> Result<SettingsFile> {
        toml::from_str(content)
            .map_err(|e| BotenvError::ConfigError(format!("Invalid TOML syntax: {e}")))
    }
}

/// User-level config file, e.g. `~/.config/botenv/config.toml`
pub fn get_user_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("botenv").join("config.toml"))
}
