use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::models::package_manager::PackageManager;
use crate::utils::error::{BotenvError, Result};

/// Directory under the project root holding botenv's own state
pub const STATE_DIR: &str = ".botenv";
/// Setup stamp file inside [`STATE_DIR`]
pub const STATE_FILE: &str = "state.json";

/// Record of the last successful `botenv setup`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SetupState {
    pub interpreter: PathBuf,
    pub python_version: String,
    pub package_manager: PackageManager,
    /// Extras that were requested; every declared extra when `all_extras`
    pub extras: Vec<String>,
    pub all_extras: bool,
    pub completed_at: DateTime<Utc>,
}

impl SetupState {
    pub fn path(project_root: &Path) -> PathBuf {
        project_root.join(STATE_DIR).join(STATE_FILE)
    }

    /// Read the stamp, `None` when setup never completed here
    pub fn load(project_root: &Path) -> Result<Option<Self>> {
        let path = Self::path(project_root);
        if !path.exists() {
            return Ok(None);
        }

        let content = fs::read_to_string(&path)?;
        let state = serde_json::from_str(&content).map_err(|e| {
            BotenvError::ConfigError(format!("Corrupted setup stamp {}: {e}", path.display()))
        })?;
        Ok(Some(state))
    }

    pub fn save(&self, project_root: &Path) -> Result<PathBuf> {
        let path = Self::path(project_root);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)
            .map_err(|e| BotenvError::ConfigError(format!("JSON serialization error: {e}")))?;
        fs::write(&path, content)?;
        Ok(path)
    }
}
