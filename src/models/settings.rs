use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::models::package_manager::PackageManager;
use crate::utils::error::{BotenvError, Result};
use crate::utils::validation::{validate_env_var_name, validate_relative_dir};

/// Interpreter used when nothing else is configured
pub const DEFAULT_PYTHON: &str = "/usr/bin/python3";
/// Entry point launched by `botenv launch`
pub const DEFAULT_ENTRY_POINT: &str = "bots";
/// Source directory exported on the search path, relative to the project root
pub const DEFAULT_SOURCE_DIR: &str = "src";
/// Search-path variable the entry point resolves its modules from
pub const DEFAULT_PATH_VAR: &str = "PYTHONPATH";

/// On-disk layout of `botenv.toml` and the user-level config file
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SettingsFile {
    pub setup: SetupSection,
    pub launch: LaunchSection,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SetupSection {
    pub python: Option<PathBuf>,
    pub package_manager: Option<PackageManager>,
    pub package_manager_bin: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LaunchSection {
    pub entry_point: Option<String>,
    pub source_dir: Option<PathBuf>,
    pub path_var: Option<String>,
}

/// Effective settings after every layer has been applied
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Settings {
    pub python: PathBuf,
    pub package_manager: PackageManager,
    /// Explicit program for the package manager; `None` uses its default name
    pub package_manager_bin: Option<String>,
    pub entry_point: String,
    pub source_dir: PathBuf,
    pub path_var: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            python: PathBuf::from(DEFAULT_PYTHON),
            package_manager: PackageManager::default(),
            package_manager_bin: None,
            entry_point: DEFAULT_ENTRY_POINT.to_string(),
            source_dir: PathBuf::from(DEFAULT_SOURCE_DIR),
            path_var: DEFAULT_PATH_VAR.to_string(),
        }
    }
}

impl Settings {
    /// Overlay the values present in a settings file
    pub fn apply_file(&mut self, file: SettingsFile) {
        let SettingsFile { setup, launch } = file;

        if let Some(python) = setup.python {
            self.python = python;
        }
        if let Some(package_manager) = setup.package_manager {
            self.package_manager = package_manager;
        }
        if setup.package_manager_bin.is_some() {
            self.package_manager_bin = setup.package_manager_bin;
        }
        if let Some(entry_point) = launch.entry_point {
            self.entry_point = entry_point;
        }
        if let Some(source_dir) = launch.source_dir {
            self.source_dir = source_dir;
        }
        if let Some(path_var) = launch.path_var {
            self.path_var = path_var;
        }
    }

    /// Program used to invoke the package manager
    pub fn package_manager_program(&self) -> &str {
        self.package_manager_bin
            .as_deref()
            .unwrap_or_else(|| self.package_manager.default_program())
    }

    pub fn validate(&self) -> Result<()> {
        if self.python.as_os_str().is_empty() {
            return Err(BotenvError::ConfigError("python cannot be empty".to_string()));
        }
        if self.entry_point.trim().is_empty() {
            return Err(BotenvError::ConfigError("entry_point cannot be empty".to_string()));
        }
        if self
            .package_manager_bin
            .as_deref()
            .is_some_and(|bin| bin.trim().is_empty())
        {
            return Err(BotenvError::ConfigError(
                "package_manager_bin cannot be empty".to_string(),
            ));
        }
        validate_relative_dir("source_dir", &self.source_dir)?;
        validate_env_var_name(&self.path_var)?;
        Ok(())
    }
}
