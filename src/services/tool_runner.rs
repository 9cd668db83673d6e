use std::collections::BTreeMap;
use std::ffi::OsString;
use std::fmt;
use std::path::{Path, PathBuf};
use std::process::Stdio;
use tokio::process::Command;
use tracing::{debug, info};

use crate::utils::error::{BotenvError, Result};

/// One invocation of an external tool, with its output passed through
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolCommand {
    /// Short label used in progress and error messages
    pub step: String,
    pub program: String,
    pub args: Vec<String>,
    pub current_dir: PathBuf,
    /// Variables set for the child only
    pub env: BTreeMap<String, OsString>,
}

impl ToolCommand {
    pub fn new(
        step: impl Into<String>,
        program: impl Into<String>,
        args: Vec<String>,
        current_dir: &Path,
    ) -> Self {
        Self {
            step: step.into(),
            program: program.into(),
            args,
            current_dir: current_dir.to_path_buf(),
            env: BTreeMap::new(),
        }
    }

    #[must_use]
    pub fn with_env(mut self, key: impl Into<String>, value: impl Into<OsString>) -> Self {
        self.env.insert(key.into(), value.into());
        self
    }

    /// Run to completion with inherited stdio; non-zero exit is an error
    pub async fn run(&self) -> Result<()> {
        info!(step = %self.step, command = %self, "running");

        let status = Command::new(&self.program)
            .args(&self.args)
            .envs(&self.env)
            .current_dir(&self.current_dir)
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .status()
            .await
            .map_err(|source| BotenvError::SpawnError {
                program: self.program.clone(),
                source,
            })?;

        debug!(step = %self.step, %status, "finished");

        if status.success() {
            Ok(())
        } else {
            Err(BotenvError::ToolFailed {
                step: self.step.clone(),
                // Killed by a signal: no code, report a generic failure.
                code: status.code().unwrap_or(1),
            })
        }
    }

    /// Equivalent `std` command, for handing the process over on launch
    pub fn to_std_command(&self) -> std::process::Command {
        let mut command = std::process::Command::new(&self.program);
        command
            .args(&self.args)
            .envs(&self.env)
            .current_dir(&self.current_dir);
        command
    }
}

impl fmt::Display for ToolCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (key, value) in &self.env {
            write!(f, "{key}={} ", shell_quote(&value.to_string_lossy()))?;
        }
        f.write_str(&shell_quote(&self.program))?;
        for arg in &self.args {
            write!(f, " {}", shell_quote(arg))?;
        }
        Ok(())
    }
}

/// Quote a word for display when it would not survive a POSIX shell as-is
fn shell_quote(word: &str) -> String {
    let plain = !word.is_empty()
        && word
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || "-_./=:@+,%".contains(c));
    if plain {
        word.to_string()
    } else {
        format!("'{}'", word.replace('\'', r"'\''"))
    }
}
