use std::env;
use std::path::{Path, PathBuf};
use tokio::process::Command;
use tracing::debug;

use crate::utils::error::{BotenvError, Result};

/// Information about a Python installation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PythonInfo {
    /// Path to the Python executable
    pub executable: PathBuf,
    /// Python version, e.g. "3.11.9"
    pub version: String,
}

/// Locates and probes the interpreter a project environment is built on
#[derive(Debug, Clone, Default)]
pub struct InterpreterLocator;

impl InterpreterLocator {
    pub const fn new() -> Self {
        Self
    }

    /// Resolve a configured interpreter to an existing file.
    ///
    /// Relative paths are taken from the current directory. A bare name such
    /// as `python3.11` is looked up on `PATH`. The result is always absolute,
    /// since the package manager runs from the project directory.
    pub fn resolve(&self, python: &Path) -> Result<PathBuf> {
        let is_bare_name = python.components().count() == 1 && !python.is_absolute();

        let found = if is_bare_name {
            search_path(python)
        } else {
            Some(python.to_path_buf()).filter(|p| p.is_file())
        };
        let found = found.ok_or_else(|| BotenvError::InterpreterNotFound(python.to_path_buf()))?;

        let absolute = std::path::absolute(&found)?;
        debug!(python = %absolute.display(), "interpreter resolved");
        Ok(absolute)
    }

    /// Run `<python> --version` and parse the result
    pub async fn probe(&self, executable: &Path) -> Result<PythonInfo> {
        let output = Command::new(executable)
            .arg("--version")
            .output()
            .await
            .map_err(|e| BotenvError::InterpreterError {
                path: executable.to_path_buf(),
                message: e.to_string(),
            })?;

        if !output.status.success() {
            return Err(BotenvError::InterpreterError {
                path: executable.to_path_buf(),
                message: format!(
                    "'--version' exited with {}: {}",
                    output.status,
                    String::from_utf8_lossy(&output.stderr).trim()
                ),
            });
        }

        // Python 2 printed its version on stderr.
        let stdout = String::from_utf8_lossy(&output.stdout);
        let stderr = String::from_utf8_lossy(&output.stderr);
        let text = if stdout.trim().is_empty() { stderr } else { stdout };

        let version = parse_version(&text).ok_or_else(|| BotenvError::InterpreterError {
            path: executable.to_path_buf(),
            message: format!("unexpected version output '{}'", text.trim()),
        })?;

        Ok(PythonInfo {
            executable: executable.to_path_buf(),
            version,
        })
    }

    /// Resolve then probe in one go
    pub async fn locate(&self, python: &Path) -> Result<PythonInfo> {
        let executable = self.resolve(python)?;
        self.probe(&executable).await
    }
}

/// Extract "3.11.9" from "Python 3.11.9"
pub fn parse_version(output: &str) -> Option<String> {
    let version = output.trim().strip_prefix("Python ")?.trim();
    let starts_with_digit = version.chars().next().is_some_and(|c| c.is_ascii_digit());
    starts_with_digit.then(|| version.to_string())
}

fn search_path(name: &Path) -> Option<PathBuf> {
    let path_var = env::var_os("PATH")?;
    env::split_paths(&path_var)
        .map(|dir| dir.join(name))
        .find(|candidate| candidate.is_file())
}
