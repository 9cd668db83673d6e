// Shared fixtures for the CLI tests: a throwaway project, a fake Python
// interpreter and a fake package manager that records its calls.
#![allow(dead_code)]

use assert_cmd::Command;
use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

pub const MANIFEST: &str = r#"
[tool.poetry]
name = "binance-bots"
version = "0.1.0"

[tool.poetry.dependencies]
python = "^3.11"
python-binance = "^1.0.19"
loguru = "^0.7"
nest_asyncio = "^1.5"
pykalman = { version = "^0.9", optional = true }
websockets = { version = "^12.0", optional = true }

[tool.poetry.extras]
kalman = ["pykalman"]
stream = ["websockets"]

[tool.poetry.scripts]
bots = "bot_models.async_main:run_system"
"#;

/// Stands in for poetry / uv. State lives in `.fake-venv/` under the
/// directory it is run from.
const FAKE_PACKAGE_MANAGER: &str = r#"#!/bin/sh
mkdir -p .fake-venv
echo "$*" >> .fake-venv/calls.log
if [ -n "$FAKE_FAIL_STEP" ] && [ "$1" = "$FAKE_FAIL_STEP" ]; then
  echo "fake failure in $1" >&2
  exit 9
fi
case "$1" in
  env|venv)
    exit 0
    ;;
  install|sync)
    touch .fake-venv/installed
    exit 0
    ;;
  run)
    if [ ! -f .fake-venv/installed ]; then
      echo "Command not found: $2" >&2
      exit 1
    fi
    echo "ENTRY=$2"
    echo "SEARCH_PATH=$PYTHONPATH"
    shift 2
    echo "ARGS=$*"
    exit "${FAKE_EXIT_CODE:-0}"
    ;;
esac
echo "unexpected call: $*" >&2
exit 2
"#;

const FAKE_PYTHON: &str = "#!/bin/sh\necho 'Python 3.11.9'\n";

pub struct TestProject {
    pub dir: TempDir,
    /// Canonical project root
    pub root: PathBuf,
    pub python: PathBuf,
    pub package_manager: PathBuf,
    /// Somewhere else to run commands from
    pub elsewhere: TempDir,
}

impl TestProject {
    pub fn new() -> Self {
        Self::with_manifest(Some(MANIFEST))
    }

    pub fn with_manifest(manifest: Option<&str>) -> Self {
        let dir = TempDir::new().unwrap();
        let root = dir.path().canonicalize().unwrap();
        fs::create_dir_all(root.join("src").join("bot_models")).unwrap();
        if let Some(manifest) = manifest {
            fs::write(root.join("pyproject.toml"), manifest).unwrap();
        }

        let tools = root.join("tools");
        fs::create_dir_all(&tools).unwrap();
        let python = write_script(&tools.join("python3.11"), FAKE_PYTHON);
        let package_manager = write_script(&tools.join("fake-pm"), FAKE_PACKAGE_MANAGER);

        Self {
            dir,
            root,
            python,
            package_manager,
            elsewhere: TempDir::new().unwrap(),
        }
    }

    /// `botenv` with a clean environment pointing at the fakes
    pub fn botenv(&self) -> Command {
        let mut cmd = self.command(&assert_cmd::cargo::cargo_bin("botenv"));
        cmd.env("BOTENV_PROJECT_ROOT", &self.root);
        cmd
    }

    /// `binary` with the inherited botenv variables cleared
    fn command(&self, binary: &Path) -> Command {
        let mut cmd = Command::new(binary);
        for var in [
            "BOTENV_PROJECT_ROOT",
            "BOTENV_PYTHON",
            "BOTENV_CONFIG",
            "BOTENV_PACKAGE_MANAGER",
            "BOTENV_LOG",
            "PYTHONPATH",
            "FAKE_FAIL_STEP",
            "FAKE_EXIT_CODE",
        ] {
            cmd.env_remove(var);
        }
        cmd.env("XDG_CONFIG_HOME", self.root.join("xdg"))
            .env("BOTENV_PACKAGE_MANAGER_BIN", &self.package_manager);
        cmd
    }

    /// `botenv setup` run from the project directory with the fake interpreter
    pub fn setup(&self) -> Command {
        let mut cmd = self.botenv();
        cmd.current_dir(&self.root)
            .arg("setup")
            .arg("--python")
            .arg(&self.python);
        cmd
    }

    /// `botenv launch` run from an unrelated directory
    pub fn launch(&self) -> Command {
        let mut cmd = self.botenv();
        cmd.current_dir(self.elsewhere.path()).arg("launch");
        cmd
    }

    /// Package-manager calls recorded so far, one per line
    pub fn calls(&self) -> Vec<String> {
        fs::read_to_string(self.root.join(".fake-venv").join("calls.log"))
            .map(|log| log.lines().map(str::to_string).collect())
            .unwrap_or_default()
    }

    pub fn mark_installed(&self) {
        let venv = self.root.join(".fake-venv");
        fs::create_dir_all(&venv).unwrap();
        fs::write(venv.join("installed"), "").unwrap();
    }

    pub fn write_config(&self, content: &str) {
        fs::write(self.root.join("botenv.toml"), content).unwrap();
    }

    pub fn source_dir(&self) -> PathBuf {
        self.root.join("src")
    }

    /// Copy the built binary into `<root>/bin`, the way it is deployed
    pub fn install_binary(&self) -> PathBuf {
        let bin_dir = self.root.join("bin");
        fs::create_dir_all(&bin_dir).unwrap();
        let installed = bin_dir.join("botenv");
        fs::copy(assert_cmd::cargo::cargo_bin("botenv"), &installed).unwrap();
        fs::set_permissions(&installed, fs::Permissions::from_mode(0o755)).unwrap();
        installed
    }

    /// Launch through an installed copy, which has to find the project from
    /// its own location
    pub fn installed_launch(&self, binary: &Path, from: &Path) -> Command {
        let mut cmd = self.command(binary);
        cmd.current_dir(from).arg("launch");
        cmd
    }
}

fn write_script(path: &Path, content: &str) -> PathBuf {
    fs::write(path, content).unwrap();
    fs::set_permissions(path, fs::Permissions::from_mode(0o755)).unwrap();
    path.to_path_buf()
}
