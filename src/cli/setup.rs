use std::path::PathBuf;
use tracing::debug;

use crate::cli::GlobalOptions;
use crate::services::provisioner::EnvironmentProvisioner;
use crate::utils::error::Result;
use crate::utils::paths::canonical_dir;

/// Provision the project environment
#[derive(Debug, Clone)]
pub struct SetupCommand {
    /// Interpreter override from --python / BOTENV_PYTHON
    pub python: Option<PathBuf>,
    pub project_dir: PathBuf,
    pub extras: Vec<String>,
    pub dry_run: bool,
}

impl SetupCommand {
    /// Execute the setup command
    pub async fn run(&self, global: &GlobalOptions) -> Result<()> {
        let project_dir = canonical_dir(&self.project_dir)?;
        let mut settings = global.load_settings(&project_dir)?;
        if let Some(python) = &self.python {
            settings.python.clone_from(python);
        }
        debug!(?settings, project_dir = %project_dir.display(), "setup");

        let provisioner = EnvironmentProvisioner::new(settings, &project_dir);
        provisioner.provision(&self.extras, self.dry_run).await?;
        Ok(())
    }
}
