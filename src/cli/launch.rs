use crate::cli::GlobalOptions;
use crate::services::launcher::Launcher;
use crate::utils::error::Result;
use crate::utils::paths::launcher_root;

/// Hand over to the project's entry point
#[derive(Debug, Clone)]
pub struct LaunchCommand {
    /// Additional arguments to pass to the entry point
    pub args: Vec<String>,
}

impl LaunchCommand {
    /// Execute the launch command; on Unix this only returns on failure
    pub fn run(&self, global: &GlobalOptions) -> Result<i32> {
        let root = launcher_root()?;
        let settings = global.load_settings(&root)?;
        Launcher::new(settings, &root).launch(&self.args)
    }
}
