// Project root discovery

use std::env;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::models::manifest::MANIFEST_FILE;
use crate::utils::error::{BotenvError, Result};

/// Overrides launcher root discovery
pub const PROJECT_ROOT_ENV: &str = "BOTENV_PROJECT_ROOT";

/// Nearest directory at or above `start` that contains a manifest
pub fn find_manifest_dir(start: &Path) -> Option<PathBuf> {
    start
        .ancestors()
        .find(|dir| dir.join(MANIFEST_FILE).is_file())
        .map(Path::to_path_buf)
}

/// Directory holding the running executable, symlinks resolved
pub fn executable_dir() -> Result<PathBuf> {
    let exe = env::current_exe()?;
    let exe = exe.canonicalize().unwrap_or(exe);
    exe.parent().map(Path::to_path_buf).ok_or_else(|| {
        BotenvError::ConfigError(format!("Cannot determine directory of {}", exe.display()))
    })
}

/// Root the launcher works from, independent of the caller's working directory.
///
/// `BOTENV_PROJECT_ROOT` wins when set. Otherwise the executable's own
/// directory is searched upward for a manifest, falling back to that
/// directory itself.
pub fn launcher_root() -> Result<PathBuf> {
    match env::var_os(PROJECT_ROOT_ENV) {
        Some(root) if !root.is_empty() => {
            let root = PathBuf::from(root);
            debug!(root = %root.display(), "project root from {PROJECT_ROOT_ENV}");
            canonical_dir(&root)
        }
        _ => root_from_location(&executable_dir()?),
    }
}

/// Root derived from a launcher location
pub fn root_from_location(location: &Path) -> Result<PathBuf> {
    let location = canonical_dir(location)?;
    let root = find_manifest_dir(&location).unwrap_or(location);
    debug!(root = %root.display(), "project root from launcher location");
    Ok(root)
}

/// Absolute, canonical form of an existing directory
pub fn canonical_dir(path: &Path) -> Result<PathBuf> {
    let canonical = path.canonicalize().map_err(|e| {
        BotenvError::ConfigError(format!("Project directory {}: {e}", path.display()))
    })?;

    if !canonical.is_dir() {
        return Err(BotenvError::ConfigError(format!(
            "Project directory {} is not a directory",
            path.display()
        )));
    }

    Ok(canonical)
}

/// Normalize path for consistent display (always use forward slashes)
pub fn normalize_path_display(path: &Path) -> String {
    path.to_string_lossy().replace('\\', "/")
}
