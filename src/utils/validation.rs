// Common validation utilities for botenv

use crate::utils::error::{BotenvError, Result};
use regex::Regex;
use std::path::{Component, Path};
use std::sync::OnceLock;

/// PEP 508 distribution / extra name
fn python_name_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^([A-Za-z0-9]|[A-Za-z0-9][A-Za-z0-9._-]*[A-Za-z0-9])$")
            .expect("static pattern is valid")
    })
}

/// Leading name of a PEP 508 requirement string such as `requests[socks]>=2.31`
fn requirement_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^\s*([A-Za-z0-9][A-Za-z0-9._-]*)\s*(.*)$").expect("static pattern is valid")
    })
}

/// Environment variable names accepted for the search-path export
fn env_var_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*$").expect("static pattern is valid"))
}

pub fn is_valid_python_name(name: &str) -> bool {
    python_name_pattern().is_match(name)
}

/// Validate a Python package or extra name according to PEP 508
pub fn validate_python_name(kind: &str, name: &str) -> Result<()> {
    if name.is_empty() {
        return Err(BotenvError::ValidationError(format!("{kind} name cannot be empty")));
    }

    if !is_valid_python_name(name) {
        return Err(BotenvError::ValidationError(format!(
            "Invalid {kind} name '{name}' - must start and end with a letter or digit and contain only letters, digits, '.', '-' or '_'"
        )));
    }

    Ok(())
}

/// Split a requirement string into its name and the remaining specifier
pub fn split_requirement(requirement: &str) -> Option<(String, String)> {
    let captures = requirement_pattern().captures(requirement)?;
    let name = captures.get(1)?.as_str().to_string();
    let rest = captures.get(2).map_or("", |m| m.as_str()).trim().to_string();
    Some((name, rest))
}

/// Validate the name of the exported search-path variable
pub fn validate_env_var_name(name: &str) -> Result<()> {
    if env_var_pattern().is_match(name) {
        Ok(())
    } else {
        Err(BotenvError::ConfigError(format!(
            "Invalid environment variable name '{name}'"
        )))
    }
}

/// Validate that a configured directory stays inside the project root
pub fn validate_relative_dir(kind: &str, path: &Path) -> Result<()> {
    if path.as_os_str().is_empty() {
        return Err(BotenvError::ConfigError(format!("{kind} cannot be empty")));
    }

    if path.is_absolute() {
        return Err(BotenvError::ConfigError(format!(
            "{kind} must be relative to the project root: {}",
            path.display()
        )));
    }

    if path.components().any(|c| matches!(c, Component::ParentDir)) {
        return Err(BotenvError::ConfigError(format!(
            "{kind} cannot contain '..' references: {}",
            path.display()
        )));
    }

    Ok(())
}
