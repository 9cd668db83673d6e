// CLI module for command-line interface

pub mod env;
pub mod info;
pub mod launch;
pub mod setup;

use clap::{ArgAction, Args, Parser, Subcommand};
use std::path::{Path, PathBuf};

use crate::models::package_manager::PackageManager;
use crate::models::settings::Settings;
use crate::utils::config::ConfigParser;
use crate::utils::error::Result;

use self::env::EnvCommand;
use self::info::InfoCommand;
use self::launch::LaunchCommand;
use self::setup::SetupCommand;

/// Main CLI structure
#[derive(Debug, Parser)]
#[command(name = "botenv")]
#[command(about = "Provision the bots Python environment and launch its entry point")]
#[command(long_about = r#"botenv prepares and starts the bots project.

  setup    Bind the project environment to a Python interpreter and install
           every dependency declared in pyproject.toml, extras included
  launch   Export the project's src/ directory on PYTHONPATH and run the
           registered 'bots' entry point through the package manager

Run 'botenv setup' once from the project directory before the first launch.
'botenv launch' works from any directory: it locates the project from its
own location (or BOTENV_PROJECT_ROOT).

Examples:
  botenv setup                                  Use the default interpreter
  botenv setup --python /opt/py311/bin/python3  Pick the interpreter
  botenv launch                                 Start the bots
  botenv env --json                             Show what launch would export"#)]
#[command(version)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalOptions,

    #[command(subcommand)]
    pub command: Commands,
}

/// Options shared by every command
#[derive(Debug, Clone, Default, Args)]
pub struct GlobalOptions {
    /// Settings file to use instead of the project's botenv.toml
    #[arg(long, global = true, env = "BOTENV_CONFIG")]
    pub config: Option<PathBuf>,

    /// Package manager driving the environment
    #[arg(long, global = true, value_enum, env = "BOTENV_PACKAGE_MANAGER")]
    pub package_manager: Option<PackageManager>,

    /// Program to invoke for the package manager
    #[arg(long, global = true, env = "BOTENV_PACKAGE_MANAGER_BIN")]
    pub package_manager_bin: Option<String>,

    /// Increase diagnostic output on stderr (-v info, -vv debug)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,
}

impl GlobalOptions {
    /// Effective settings for a project root, command-line values last.
    /// Validated once, after every layer is applied.
    pub fn load_settings(&self, project_root: &Path) -> Result<Settings> {
        let mut settings = ConfigParser::load_settings(project_root, self.config.as_deref())?;

        if let Some(package_manager) = self.package_manager {
            settings.package_manager = package_manager;
        }
        if let Some(bin) = &self.package_manager_bin {
            settings.package_manager_bin = Some(bin.clone());
        }

        settings.validate()?;
        Ok(settings)
    }
}

/// All available CLI commands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Provision the project environment from pyproject.toml
    #[command(long_about = r#"Provision the isolated environment for the project.

Steps, stopping at the first failure:
  1. Check the Python interpreter exists and reports a version
  2. Read pyproject.toml from the project directory
  3. Bind the environment to the interpreter (poetry env use / uv venv)
  4. Install dependencies and extras (poetry install / uv sync)

All extras are installed unless --extra is given.

Examples:
  botenv setup
  botenv setup --python python3.11
  botenv setup --extra kalman --extra stream
  botenv setup --dry-run"#)]
    Setup {
        /// Python interpreter for the environment (path, or name on PATH)
        #[arg(long, env = "BOTENV_PYTHON")]
        python: Option<PathBuf>,

        /// Directory containing pyproject.toml
        #[arg(long, default_value = ".")]
        project_dir: PathBuf,

        /// Install only this extra (repeatable)
        #[arg(long = "extra", value_name = "NAME")]
        extras: Vec<String>,

        /// Print the package-manager commands without running them
        #[arg(long)]
        dry_run: bool,
    },

    /// Run the registered entry point with the source directory exported
    #[command(long_about = r#"Run the project's entry point through the package manager.

The project root is BOTENV_PROJECT_ROOT when set, otherwise the nearest
directory at or above the botenv executable that holds pyproject.toml.
<root>/src is exported as PYTHONPATH for the entry point only; its output
and exit code are passed through unchanged.

Examples:
  botenv launch
  botenv launch -- --symbol BNBUSDT     Forward arguments to the entry point"#)]
    Launch {
        /// Arguments forwarded to the entry point
        #[arg(last = true)]
        args: Vec<String>,
    },

    /// Show the environment and command launch would use
    Env {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show project, manifest and setup status
    Info {
        /// Project directory (default: the launcher's project root)
        #[arg(long)]
        project_dir: Option<PathBuf>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

/// CLI command dispatcher
pub struct CliDispatcher;

impl CliDispatcher {
    /// Execute a CLI command, returning the exit code to finish with
    pub async fn execute(cli: Cli) -> Result<i32> {
        let Cli { global, command } = cli;

        match command {
            Commands::Setup {
                python,
                project_dir,
                extras,
                dry_run,
            } => {
                let cmd = SetupCommand {
                    python,
                    project_dir,
                    extras,
                    dry_run,
                };
                cmd.run(&global).await.map(|()| 0)
            }

            Commands::Launch { args } => {
                let cmd = LaunchCommand { args };
                cmd.run(&global)
            }

            Commands::Env { json } => {
                let cmd = EnvCommand { json };
                cmd.run(&global).map(|()| 0)
            }

            Commands::Info { project_dir, json } => {
                let cmd = InfoCommand { project_dir, json };
                cmd.run(&global).await.map(|()| 0)
            }
        }
    }
}
