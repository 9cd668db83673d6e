use chrono::Utc;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

use crate::models::manifest::{ExtrasSelection, Manifest};
use crate::models::settings::Settings;
use crate::models::setup_state::SetupState;
use crate::services::interpreter::{InterpreterLocator, PythonInfo};
use crate::services::tool_runner::ToolCommand;
use crate::utils::error::Result;
use crate::utils::paths::normalize_path_display;

/// Everything setup is about to do, resolved before the first tool call
#[derive(Debug, Clone)]
pub struct ProvisionPlan {
    pub python: PythonInfo,
    pub manifest: Manifest,
    pub extras: ExtrasSelection,
    pub steps: Vec<ToolCommand>,
}

/// Result of a completed setup
#[derive(Debug, Clone)]
pub struct ProvisionReport {
    pub plan: ProvisionPlan,
    /// Setup stamp location; `None` for a dry run
    pub stamp: Option<PathBuf>,
}

/// Provisions the project environment through the configured package manager
#[derive(Debug, Clone)]
pub struct EnvironmentProvisioner {
    settings: Settings,
    project_dir: PathBuf,
    locator: InterpreterLocator,
}

impl EnvironmentProvisioner {
    pub fn new(settings: Settings, project_dir: &Path) -> Self {
        Self {
            settings,
            project_dir: project_dir.to_path_buf(),
            locator: InterpreterLocator::new(),
        }
    }

    /// Check interpreter, manifest and extras, then lay out the tool calls.
    ///
    /// Nothing is installed here, so every failure leaves the environment
    /// untouched.
    pub async fn plan(&self, requested_extras: &[String]) -> Result<ProvisionPlan> {
        let python = self.locator.locate(&self.settings.python).await?;
        println!(
            "Using Python {} ({})",
            python.version,
            normalize_path_display(&python.executable)
        );

        let manifest = Manifest::load(&self.project_dir)?;
        let extras = manifest.select_extras(requested_extras)?;
        println!(
            "Manifest {}: {} dependencies, extras: {}",
            normalize_path_display(&manifest.path),
            manifest.dependencies.len(),
            describe_extras(&extras, &manifest)
        );

        if !manifest.has_script(&self.settings.entry_point) {
            warn!(
                entry_point = %self.settings.entry_point,
                "entry point is not registered in the manifest; launch will fail"
            );
        }

        let pm = self.settings.package_manager;
        let program = self.settings.package_manager_program();
        let steps = vec![
            ToolCommand::new(
                format!("{pm} interpreter selection"),
                program,
                pm.select_interpreter_args(&python.executable),
                &self.project_dir,
            ),
            ToolCommand::new(
                format!("{pm} install"),
                program,
                pm.install_args(&extras),
                &self.project_dir,
            ),
        ];

        Ok(ProvisionPlan {
            python,
            manifest,
            extras,
            steps,
        })
    }

    /// Run setup end to end, stopping at the first failing step
    pub async fn provision(&self, requested_extras: &[String], dry_run: bool) -> Result<ProvisionReport> {
        let plan = self.plan(requested_extras).await?;

        if dry_run {
            for step in &plan.steps {
                println!("Would run: {step}");
            }
            return Ok(ProvisionReport { plan, stamp: None });
        }

        for (index, step) in plan.steps.iter().enumerate() {
            println!("[{}/{}] {step}", index + 1, plan.steps.len());
            step.run().await?;
        }

        let state = SetupState {
            interpreter: plan.python.executable.clone(),
            python_version: plan.python.version.clone(),
            package_manager: self.settings.package_manager,
            extras: plan
                .extras
                .names(&plan.manifest)
                .into_iter()
                .map(str::to_string)
                .collect(),
            all_extras: plan.extras == ExtrasSelection::All,
            completed_at: Utc::now(),
        };
        let stamp = state.save(&self.project_dir)?;
        info!(stamp = %stamp.display(), "setup stamp written");

        println!("Environment ready");
        Ok(ProvisionReport {
            plan,
            stamp: Some(stamp),
        })
    }
}

fn describe_extras(extras: &ExtrasSelection, manifest: &Manifest) -> String {
    let names = extras.names(manifest);
    match (extras, names.is_empty()) {
        (_, true) => "none declared".to_string(),
        (ExtrasSelection::All, false) => format!("all ({})", names.join(", ")),
        (ExtrasSelection::Named(_), false) => names.join(", "),
    }
}
