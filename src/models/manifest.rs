use serde::Deserialize;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use crate::utils::error::{BotenvError, Result};
use crate::utils::validation::{split_requirement, validate_python_name};

/// File name of the dependency manifest
pub const MANIFEST_FILE: &str = "pyproject.toml";

/// Version specification for a dependency (e.g., "^1.26", ">=0.7")
pub type VersionSpec = String;

/// Dependencies, extras and entry points declared by a project's pyproject.toml
///
/// Both the Poetry layout (`[tool.poetry]`) and the PEP 621 layout
/// (`[project]`) are understood. When a file carries both, `[project]` wins
/// for name and version and the tables are merged otherwise.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Manifest {
    /// Where the manifest was read from
    pub path: PathBuf,
    pub name: Option<String>,
    pub version: Option<String>,
    /// Interpreter constraint (`python` in Poetry, `requires-python` in PEP 621)
    pub python: Option<String>,
    /// Required dependencies (name → version spec)
    pub dependencies: BTreeMap<String, VersionSpec>,
    /// Optional extras (extra name → member package names)
    pub extras: BTreeMap<String, Vec<String>>,
    /// Registered entry points (script name → callable reference)
    pub scripts: BTreeMap<String, String>,
}

/// Which extras an install should request
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExtrasSelection {
    /// Every extra the manifest declares
    All,
    /// Only the named extras
    Named(Vec<String>),
}

impl ExtrasSelection {
    /// Names this selection covers for the given manifest
    pub fn names<'a>(&'a self, manifest: &'a Manifest) -> Vec<&'a str> {
        match self {
            Self::All => manifest.extras.keys().map(String::as_str).collect(),
            Self::Named(names) => names.iter().map(String::as_str).collect(),
        }
    }
}

// Raw TOML layout

#[derive(Debug, Default, Deserialize)]
struct PyProjectToml {
    project: Option<ProjectTable>,
    tool: Option<ToolTable>,
}

#[derive(Debug, Default, Deserialize)]
struct ProjectTable {
    name: Option<String>,
    version: Option<String>,
    #[serde(rename = "requires-python")]
    requires_python: Option<String>,
    #[serde(default)]
    dependencies: Vec<String>,
    #[serde(default, rename = "optional-dependencies")]
    optional_dependencies: BTreeMap<String, Vec<String>>,
    #[serde(default)]
    scripts: BTreeMap<String, String>,
}

#[derive(Debug, Default, Deserialize)]
struct ToolTable {
    poetry: Option<PoetryTable>,
}

#[derive(Debug, Default, Deserialize)]
struct PoetryTable {
    name: Option<String>,
    version: Option<String>,
    #[serde(default)]
    dependencies: BTreeMap<String, toml::Value>,
    #[serde(default)]
    extras: BTreeMap<String, Vec<String>>,
    #[serde(default)]
    scripts: BTreeMap<String, toml::Value>,
}

impl Manifest {
    /// Load the manifest from a project directory
    pub fn load(project_dir: &Path) -> Result<Self> {
        let path = project_dir.join(MANIFEST_FILE);
        if !path.is_file() {
            return Err(BotenvError::ManifestNotFound(path));
        }

        let content = fs::read_to_string(&path).map_err(|e| BotenvError::ManifestError {
            path: path.clone(),
            message: e.to_string(),
        })?;

        Self::parse(&content, &path)
    }

    /// Parse manifest content; `path` is used for error messages
    pub fn parse(content: &str, path: &Path) -> Result<Self> {
        let invalid = |message: String| BotenvError::ManifestError {
            path: path.to_path_buf(),
            message,
        };

        let raw: PyProjectToml =
            toml::from_str(content).map_err(|e| invalid(format!("Invalid TOML syntax: {e}")))?;

        let poetry = raw.tool.and_then(|t| t.poetry);
        if raw.project.is_none() && poetry.is_none() {
            return Err(invalid(
                "neither [project] nor [tool.poetry] is declared".to_string(),
            ));
        }

        let mut manifest = Self {
            path: path.to_path_buf(),
            ..Self::default()
        };

        if let Some(poetry) = poetry {
            manifest.merge_poetry(poetry).map_err(invalid)?;
        }
        if let Some(project) = raw.project {
            manifest.merge_project(project).map_err(invalid)?;
        }

        manifest.validate().map_err(|e| invalid(e.to_string()))?;
        Ok(manifest)
    }

    fn merge_poetry(&mut self, poetry: PoetryTable) -> std::result::Result<(), String> {
        self.name = poetry.name;
        self.version = poetry.version;

        for (name, value) in poetry.dependencies {
            let spec = match &value {
                toml::Value::String(s) => s.clone(),
                toml::Value::Table(t) => t
                    .get("version")
                    .and_then(toml::Value::as_str)
                    .unwrap_or("*")
                    .to_string(),
                // Multiple-constraint dependencies are a list of tables.
                toml::Value::Array(_) => "*".to_string(),
                other => {
                    return Err(format!(
                        "dependency '{name}' has unsupported value type {}",
                        other.type_str()
                    ))
                }
            };

            if name.eq_ignore_ascii_case("python") {
                self.python = Some(spec);
            } else {
                self.dependencies.insert(name, spec);
            }
        }

        self.extras.extend(poetry.extras);

        for (name, value) in poetry.scripts {
            let reference = match &value {
                toml::Value::String(s) => s.clone(),
                toml::Value::Table(t) => t
                    .get("reference")
                    .or_else(|| t.get("callable"))
                    .and_then(toml::Value::as_str)
                    .ok_or_else(|| format!("script '{name}' has no reference"))?
                    .to_string(),
                other => {
                    return Err(format!(
                        "script '{name}' has unsupported value type {}",
                        other.type_str()
                    ))
                }
            };
            self.scripts.insert(name, reference);
        }

        Ok(())
    }

    fn merge_project(&mut self, project: ProjectTable) -> std::result::Result<(), String> {
        if project.name.is_some() {
            self.name = project.name;
        }
        if project.version.is_some() {
            self.version = project.version;
        }
        if project.requires_python.is_some() {
            self.python = project.requires_python;
        }

        for requirement in &project.dependencies {
            let (name, spec) = split_requirement(requirement)
                .ok_or_else(|| format!("invalid requirement '{requirement}'"))?;
            let spec = if spec.is_empty() { "*".to_string() } else { spec };
            self.dependencies.insert(name, spec);
        }

        for (extra, requirements) in project.optional_dependencies {
            let members = requirements
                .iter()
                .map(|r| {
                    split_requirement(r)
                        .map(|(name, _)| name)
                        .ok_or_else(|| format!("invalid requirement '{r}' in extra '{extra}'"))
                })
                .collect::<std::result::Result<Vec<_>, _>>()?;
            self.extras.entry(extra).or_default().extend(members);
        }

        self.scripts.extend(project.scripts);
        Ok(())
    }

    fn validate(&self) -> Result<()> {
        for name in self.dependencies.keys() {
            validate_python_name("dependency", name)?;
        }
        for (extra, members) in &self.extras {
            validate_python_name("extra", extra)?;
            for member in members {
                validate_python_name("dependency", member)?;
            }
        }
        Ok(())
    }

    /// Whether `name` is a registered entry point
    pub fn has_script(&self, name: &str) -> bool {
        self.scripts.contains_key(name)
    }

    /// Check a requested set of extras against the declared ones
    ///
    /// An empty request selects every declared extra.
    pub fn select_extras(&self, requested: &[String]) -> Result<ExtrasSelection> {
        if requested.is_empty() {
            return Ok(ExtrasSelection::All);
        }

        let mut names = Vec::with_capacity(requested.len());
        for name in requested {
            if !self.extras.contains_key(name) {
                let declared: Vec<&str> = self.extras.keys().map(String::as_str).collect();
                return Err(BotenvError::UnknownExtra {
                    name: name.clone(),
                    declared: if declared.is_empty() {
                        "none".to_string()
                    } else {
                        declared.join(", ")
                    },
                });
            }
            if !names.contains(name) {
                names.push(name.clone());
            }
        }

        Ok(ExtrasSelection::Named(names))
    }
}
