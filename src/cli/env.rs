use serde_json::json;
use std::collections::BTreeMap;

use crate::cli::GlobalOptions;
use crate::services::launcher::Launcher;
use crate::utils::error::{BotenvError, Result};
use crate::utils::paths::{launcher_root, normalize_path_display};

/// Show what `botenv launch` would export and run
#[derive(Debug, Clone)]
pub struct EnvCommand {
    pub json: bool,
}

impl EnvCommand {
    pub fn run(&self, global: &GlobalOptions) -> Result<()> {
        let root = launcher_root()?;
        let settings = global.load_settings(&root)?;
        let launcher = Launcher::new(settings, &root);

        let command = launcher.command(&[]);
        let env_vars: BTreeMap<&str, String> = command
            .env
            .iter()
            .map(|(key, value)| (key.as_str(), value.to_string_lossy().into_owned()))
            .collect();

        if self.json {
            let mut argv = vec![command.program.clone()];
            argv.extend(command.args.iter().cloned());
            let response = json!({
                "project_root": normalize_path_display(launcher.root()),
                "entry_point": launcher.settings().entry_point,
                "environment": env_vars,
                "command": argv,
            });
            println!(
                "{}",
                serde_json::to_string_pretty(&response).map_err(|e| {
                    BotenvError::ConfigError(format!("JSON serialization error: {e}"))
                })?
            );
        } else {
            println!("Project root: {}", normalize_path_display(launcher.root()));
            println!("Environment:");
            for (key, value) in &env_vars {
                println!("  {key}={value}");
            }
            println!("Command: {command}");
        }

        Ok(())
    }
}
