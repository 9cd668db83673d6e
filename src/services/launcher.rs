use std::collections::BTreeMap;
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

use crate::models::manifest::Manifest;
use crate::models::settings::Settings;
use crate::models::setup_state::SetupState;
use crate::services::tool_runner::ToolCommand;
use crate::utils::error::{BotenvError, Result};

/// Hands execution over to the project's entry point
#[derive(Debug, Clone)]
pub struct Launcher {
    settings: Settings,
    root: PathBuf,
}

impl Launcher {
    /// `root` must already be absolute; see [`crate::utils::paths::launcher_root`]
    pub fn new(settings: Settings, root: &Path) -> Self {
        Self {
            settings,
            root: root.to_path_buf(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Absolute source directory exported on the search path
    pub fn source_path(&self) -> PathBuf {
        self.root.join(&self.settings.source_dir)
    }

    /// Variables set for the entry point's process
    pub fn environment(&self) -> BTreeMap<String, OsString> {
        let mut env = BTreeMap::new();
        env.insert(
            self.settings.path_var.clone(),
            self.source_path().into_os_string(),
        );
        env
    }

    /// Package-manager invocation that runs the entry point
    pub fn command(&self, args: &[String]) -> ToolCommand {
        let pm = self.settings.package_manager;
        let mut command = ToolCommand::new(
            format!("{pm} run {}", self.settings.entry_point),
            self.settings.package_manager_program(),
            pm.run_args(&self.settings.entry_point, args),
            &self.root,
        );
        for (key, value) in self.environment() {
            command = command.with_env(key, value);
        }
        command
    }

    /// Fail early when the manifest does not register the entry point
    pub fn check_entry_point(&self) -> Result<Manifest> {
        let manifest = Manifest::load(&self.root)?;
        if manifest.has_script(&self.settings.entry_point) {
            Ok(manifest)
        } else {
            Err(BotenvError::EntryPointNotRegistered(
                self.settings.entry_point.clone(),
            ))
        }
    }

    /// Checks run before handing over; the package manager reports the rest
    pub fn prepare(&self, args: &[String]) -> Result<ToolCommand> {
        self.check_entry_point()?;

        let source = self.source_path();
        if !source.is_dir() {
            warn!(path = %source.display(), "source directory does not exist");
        }

        match SetupState::load(&self.root) {
            Ok(Some(state)) => info!(
                completed_at = %state.completed_at,
                "environment provisioned by botenv setup"
            ),
            Ok(None) => info!("no setup stamp found; relying on the package manager"),
            Err(e) => warn!(error = %e, "ignoring unreadable setup stamp"),
        }

        Ok(self.command(args))
    }

    /// Replace this process with the entry point.
    ///
    /// Only returns when the hand-over itself failed.
    #[cfg(unix)]
    pub fn launch(&self, args: &[String]) -> Result<i32> {
        use std::os::unix::process::CommandExt;

        let command = self.prepare(args)?;
        info!(command = %command, "exec");
        let source = command.to_std_command().exec();
        Err(BotenvError::SpawnError {
            program: command.program,
            source,
        })
    }

    /// Run the entry point and report its exit code
    #[cfg(not(unix))]
    pub fn launch(&self, args: &[String]) -> Result<i32> {
        let command = self.prepare(args)?;
        info!(command = %command, "spawn");
        let status = command
            .to_std_command()
            .status()
            .map_err(|source| BotenvError::SpawnError {
                program: command.program.clone(),
                source,
            })?;
        Ok(status.code().unwrap_or(1))
    }
}
