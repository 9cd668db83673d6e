// Common error types for botenv

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum BotenvError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Manifest not found: {} (run from the project directory)", .0.display())]
    ManifestNotFound(PathBuf),

    #[error("Invalid manifest {}: {message}", .path.display())]
    ManifestError { path: PathBuf, message: String },

    #[error("Python interpreter not found: {}", .0.display())]
    InterpreterNotFound(PathBuf),

    #[error("Python interpreter {} is not usable: {message}", .path.display())]
    InterpreterError { path: PathBuf, message: String },

    #[error("Extra '{name}' is not declared in the manifest (declared: {declared})")]
    UnknownExtra { name: String, declared: String },

    #[error("Entry point '{0}' is not registered in the manifest")]
    EntryPointNotRegistered(String),

    #[error("Failed to start '{program}': {source}")]
    SpawnError {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("{step} failed with exit code {code}")]
    ToolFailed { step: String, code: i32 },

    #[error("Validation error: {0}")]
    ValidationError(String),
}

pub type Result<T> = std::result::Result<T, BotenvError>;

/// Error as shown to the person at the terminal, with the process exit code
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserError {
    pub message: String,
    pub hint: Option<String>,
    pub exit_code: i32,
}

impl UserError {
    pub fn from_botenv_error(err: &BotenvError) -> Self {
        let (exit_code, hint) = match err {
            BotenvError::ConfigError(_) => (2, Some("Check botenv.toml and BOTENV_* variables.")),
            BotenvError::ManifestNotFound(_) | BotenvError::ManifestError { .. } => {
                (3, Some("botenv reads pyproject.toml from the project directory."))
            }
            BotenvError::InterpreterNotFound(_) | BotenvError::InterpreterError { .. } => {
                (4, Some("Pass --python <path> or set BOTENV_PYTHON."))
            }
            BotenvError::EntryPointNotRegistered(_) => {
                (5, Some("Register it under [tool.poetry.scripts] or [project.scripts]."))
            }
            // Tool output was already shown; keep its exit code.
            BotenvError::ToolFailed { code, .. } => (*code, None),
            BotenvError::SpawnError { .. } => {
                (127, Some("Is the package manager installed and on PATH?"))
            }
            _ => (1, None),
        };

        Self {
            message: err.to_string(),
            hint: hint.map(str::to_string),
            exit_code,
        }
    }

    pub fn print(&self) {
        eprintln!("Error: {}", self.message);
        if let Some(hint) = &self.hint {
            eprintln!("  {hint}");
        }
    }
}
