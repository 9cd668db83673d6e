use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;

use crate::models::manifest::ExtrasSelection;

/// Manifest-driven Python package managers botenv can drive
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum PackageManager {
    /// Poetry (`poetry env use`, `poetry install`, `poetry run`)
    #[default]
    Poetry,
    /// uv (`uv venv`, `uv sync`, `uv run`)
    Uv,
}

impl PackageManager {
    /// Program invoked when no explicit binary is configured
    pub const fn default_program(self) -> &'static str {
        match self {
            Self::Poetry => "poetry",
            Self::Uv => "uv",
        }
    }

    /// Arguments that bind the project environment to `python`
    pub fn select_interpreter_args(self, python: &Path) -> Vec<String> {
        let python = python.to_string_lossy().into_owned();
        match self {
            Self::Poetry => vec!["env".to_string(), "use".to_string(), python],
            Self::Uv => vec!["venv".to_string(), "--python".to_string(), python],
        }
    }

    /// Arguments that install every dependency plus the selected extras
    pub fn install_args(self, extras: &ExtrasSelection) -> Vec<String> {
        let mut args = match self {
            Self::Poetry => vec!["install".to_string()],
            Self::Uv => vec!["sync".to_string()],
        };

        match extras {
            ExtrasSelection::All => args.push("--all-extras".to_string()),
            ExtrasSelection::Named(names) => {
                let flag = match self {
                    Self::Poetry => "--extras",
                    Self::Uv => "--extra",
                };
                for name in names {
                    args.push(flag.to_string());
                    args.push(name.clone());
                }
            }
        }

        args
    }

    /// Arguments that run a registered entry point inside the environment
    pub fn run_args(self, entry_point: &str, extra_args: &[String]) -> Vec<String> {
        let mut args = vec!["run".to_string(), entry_point.to_string()];
        args.extend(extra_args.iter().cloned());
        args
    }
}

impl fmt::Display for PackageManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.default_program())
    }
}
