//! Configuration management for starterkit
//!
//! Runtime settings come from environment variables with defaults; the
//! project to generate is described by a request file in YAML or JSON.
//!
//! # Environment Variables
//!
//! - `STARTERKIT_LOG_LEVEL`: Logging level - default: "info"
//! - `STARTERKIT_TEMPLATE_DIR`: Directory whose `*.jinja` files replace the
//!   embedded templates - default: unset
//! - `STARTERKIT_OUTPUT_DIR`: Directory projects are generated into - default: "."
//! - `STARTERKIT_FORCE`: Generate into a non-empty output directory
//!   (true|false) - default: "false"
//!
//! # Request file
//!
//! ```yaml
//! server: quarkus
//! mp_version: "3.0"
//! specs: [config, jwt_auth, metrics]
//! topology: main_plus_secondary
//! group_id: org.acme
//! artifact_id: shop
//! ```

use crate::model::{
    FeatureModel, MicroProfileVersion, MicroprofileSpec, SupportedServer, Topology,
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::env;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

const DEFAULT_LOG_LEVEL: &str = "info";
const DEFAULT_OUTPUT_DIR: &str = ".";
const DEFAULT_FORCE: bool = false;

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Configuration validation failed
    #[error("Configuration validation failed: {0}")]
    ValidationFailed(String),

    /// A request file could not be read
    #[error("Failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    /// A request file is not valid YAML or JSON for a request
    #[error("Failed to parse {field}: {error}")]
    ParseError { field: String, error: String },
}

/// Runtime settings of the generator
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StarterConfig {
    /// Logging level (trace, debug, info, warn, error)
    pub log_level: String,

    /// Override directory for templates
    pub template_dir: Option<PathBuf>,

    /// Directory projects are generated into
    pub output_dir: PathBuf,

    /// Allow generating into a non-empty directory
    pub force: bool,
}

impl Default for StarterConfig {
    /// Loads from `STARTERKIT_*` environment variables, falling back to defaults
    fn default() -> Self {
        let log_level = env::var("STARTERKIT_LOG_LEVEL")
            .unwrap_or_else(|_| DEFAULT_LOG_LEVEL.to_string())
            .to_lowercase();

        let template_dir = env::var("STARTERKIT_TEMPLATE_DIR")
            .ok()
            .filter(|v| !v.is_empty())
            .map(PathBuf::from);

        let output_dir = env::var("STARTERKIT_OUTPUT_DIR")
            .ok()
            .filter(|v| !v.is_empty())
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT_DIR));

        let force = env::var("STARTERKIT_FORCE")
            .ok()
            .and_then(|v| v.parse::<bool>().ok())
            .unwrap_or(DEFAULT_FORCE);

        Self {
            log_level,
            template_dir,
            output_dir,
            force,
        }
    }
}

impl StarterConfig {
    /// Checks the log level and that a configured template directory exists
    pub fn validate(&self) -> Result<(), ConfigError> {
        match self.log_level.as_str() {
            "trace" | "debug" | "info" | "warn" | "error" => {}
            _ => {
                return Err(ConfigError::ValidationFailed(format!(
                    "Invalid log level: {}. Valid options: trace, debug, info, warn, error",
                    self.log_level
                )))
            }
        }

        if let Some(dir) = &self.template_dir {
            if !dir.is_dir() {
                return Err(ConfigError::ValidationFailed(format!(
                    "Template directory {} does not exist",
                    dir.display()
                )));
            }
        }

        Ok(())
    }
}

impl fmt::Display for StarterConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Starterkit Configuration:")?;
        writeln!(f, "  Log Level: {}", self.log_level)?;
        if let Some(ref dir) = self.template_dir {
            writeln!(f, "  Template Dir: {}", dir.display())?;
        }
        writeln!(f, "  Output Dir: {}", self.output_dir.display())?;
        writeln!(f, "  Force: {}", self.force)?;
        Ok(())
    }
}

/// Directory names of the two projects of a main/secondary pair
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectNames {
    pub main: String,
    pub secondary: String,
}

/// What to generate, as read from a request file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GenerationRequest {
    pub server: SupportedServer,

    #[serde(default)]
    pub mp_version: MicroProfileVersion,

    #[serde(default)]
    pub specs: Vec<MicroprofileSpec>,

    #[serde(default)]
    pub topology: Topology,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group_id: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub artifact_id: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub java_package: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub projects: Option<ProjectNames>,

    #[serde(default)]
    pub variables: BTreeMap<String, String>,

    #[serde(default)]
    pub alternatives: Vec<String>,
}

impl GenerationRequest {
    pub fn new(server: SupportedServer) -> Self {
        Self {
            server,
            mp_version: MicroProfileVersion::default(),
            specs: Vec::new(),
            topology: Topology::default(),
            group_id: None,
            artifact_id: None,
            java_package: None,
            projects: None,
            variables: BTreeMap::new(),
            alternatives: Vec::new(),
        }
    }

    pub fn from_yaml(content: &str) -> Result<Self, ConfigError> {
        serde_yaml::from_str(content).map_err(|e| ConfigError::ParseError {
            field: "request".to_string(),
            error: e.to_string(),
        })
    }

    pub fn from_json(content: &str) -> Result<Self, ConfigError> {
        serde_json::from_str(content).map_err(|e| ConfigError::ParseError {
            field: "request".to_string(),
            error: e.to_string(),
        })
    }

    /// Reads a request file; `.json` files are parsed as JSON, anything else as YAML
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        let is_json = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.eq_ignore_ascii_case("json"))
            .unwrap_or(false);

        if is_json {
            Self::from_json(&content)
        } else {
            Self::from_yaml(&content)
        }
    }

    /// Builds the feature model for a generation rooted at `root_directory`
    pub fn to_model(&self, root_directory: impl Into<PathBuf>) -> crate::Result<FeatureModel> {
        let mut builder = FeatureModel::builder(self.server, root_directory)
            .target_version(self.mp_version)
            .specs(self.specs.iter().copied())
            .topology(self.topology);

        if let Some(group_id) = &self.group_id {
            builder = builder.group_id(group_id);
        }
        if let Some(artifact_id) = &self.artifact_id {
            builder = builder.artifact_id(artifact_id);
        }
        if let Some(java_package) = &self.java_package {
            builder = builder.java_package(java_package);
        }
        if let Some(projects) = &self.projects {
            builder = builder.project_names(&projects.main, &projects.secondary);
        }
        for (name, value) in &self.variables {
            builder = builder.variable(name, value);
        }
        for alternative in &self.alternatives {
            builder = builder.alternative(alternative);
        }

        builder.build()
    }
}
