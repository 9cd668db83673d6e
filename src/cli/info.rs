use serde_json::json;
use std::path::PathBuf;

use crate::cli::GlobalOptions;
use crate::models::manifest::Manifest;
use crate::models::setup_state::SetupState;
use crate::services::interpreter::InterpreterLocator;
use crate::utils::error::{BotenvError, Result};
use crate::utils::paths::{canonical_dir, launcher_root, normalize_path_display};

/// Show project, manifest and setup status
#[derive(Debug, Clone)]
pub struct InfoCommand {
    pub project_dir: Option<PathBuf>,
    pub json: bool,
}

impl InfoCommand {
    pub async fn run(&self, global: &GlobalOptions) -> Result<()> {
        let root = match &self.project_dir {
            Some(dir) => canonical_dir(dir)?,
            None => launcher_root()?,
        };
        let settings = global.load_settings(&root)?;

        // Missing pieces are reported, not treated as failures.
        let manifest = Manifest::load(&root);
        let state = SetupState::load(&root);
        let python = InterpreterLocator::new().locate(&settings.python).await;

        if self.json {
            let manifest_json = match &manifest {
                Ok(m) => json!({
                    "path": normalize_path_display(&m.path),
                    "name": m.name,
                    "version": m.version,
                    "python": m.python,
                    "dependencies": m.dependencies,
                    "extras": m.extras,
                    "scripts": m.scripts,
                    "entry_point_registered": m.has_script(&settings.entry_point),
                }),
                Err(e) => json!({ "error": e.to_string() }),
            };
            let python_json = match &python {
                Ok(info) => json!({
                    "executable": normalize_path_display(&info.executable),
                    "version": info.version,
                }),
                Err(e) => json!({ "error": e.to_string() }),
            };
            let state_json = match &state {
                Ok(Some(s)) => json!(s),
                Ok(None) => serde_json::Value::Null,
                Err(e) => json!({ "error": e.to_string() }),
            };

            let response = json!({
                "project_root": normalize_path_display(&root),
                "settings": settings,
                "manifest": manifest_json,
                "python": python_json,
                "setup": state_json,
            });
            println!(
                "{}",
                serde_json::to_string_pretty(&response).map_err(|e| {
                    BotenvError::ConfigError(format!("JSON serialization error: {e}"))
                })?
            );
            return Ok(());
        }

        println!("Project: {}", normalize_path_display(&root));
        println!(
            "  Package manager: {} ({})",
            settings.package_manager,
            settings.package_manager_program()
        );
        match &python {
            Ok(info) => println!(
                "  Python: {} ({})",
                info.version,
                normalize_path_display(&info.executable)
            ),
            Err(e) => println!("  Python: unavailable - {e}"),
        }

        match &manifest {
            Ok(m) => {
                println!("Manifest: {}", normalize_path_display(&m.path));
                if let Some(name) = &m.name {
                    println!(
                        "  Name: {name} {}",
                        m.version.as_deref().unwrap_or_default()
                    );
                }
                println!("  Dependencies: {}", m.dependencies.len());
                if m.extras.is_empty() {
                    println!("  Extras: none");
                } else {
                    println!("  Extras:");
                    for (extra, members) in &m.extras {
                        println!("    {extra}: {}", members.join(", "));
                    }
                }
                let registered = if m.has_script(&settings.entry_point) {
                    "registered"
                } else {
                    "NOT registered"
                };
                println!("  Entry point '{}': {registered}", settings.entry_point);
            }
            Err(e) => println!("Manifest: unavailable - {e}"),
        }

        match &state {
            Ok(Some(s)) => println!(
                "Setup: completed {} with Python {} via {}",
                s.completed_at.format("%Y-%m-%d %H:%M:%S UTC"),
                s.python_version,
                s.package_manager
            ),
            Ok(None) => println!("Setup: not run yet (botenv setup)"),
            Err(e) => println!("Setup: unknown - {e}"),
        }

        Ok(())
    }
}
