// Data models for botenv

pub mod manifest;
pub mod package_manager;
pub mod settings;
pub mod setup_state;

pub use manifest::{ExtrasSelection, Manifest, MANIFEST_FILE};
pub use package_manager::PackageManager;
pub use settings::{Settings, SettingsFile};
pub use setup_state::SetupState;
