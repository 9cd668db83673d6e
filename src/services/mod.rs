// Services that drive the interpreter and the package manager

pub mod interpreter;
pub mod launcher;
pub mod provisioner;
pub mod tool_runner;

pub use interpreter::{InterpreterLocator, PythonInfo};
pub use launcher::Launcher;
pub use provisioner::{EnvironmentProvisioner, ProvisionPlan, ProvisionReport};
pub use tool_runner::ToolCommand;
