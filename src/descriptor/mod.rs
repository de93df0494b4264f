//! In-memory build descriptor (a Maven project model) that addons mutate.
//!
//! Every type owns its nested data, so `clone()` yields a structurally
//! independent copy: editing a cloned [`Profile`] never reaches the original.

pub mod baseline;
pub mod config_node;
pub mod helper;
pub mod reader;
pub mod writer;

pub use baseline::baseline_descriptor;
pub use config_node::ConfigNode;
pub use helper::{DependencyHelper, MavenHelper};
pub use reader::parse_pom;
pub use writer::to_pom_xml;

use serde::Serialize;
use std::collections::BTreeMap;

pub const MODEL_VERSION: &str = "4.0.0";

/// Root of the build descriptor
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BuildDescriptor {
    pub parent: Option<Parent>,
    pub group_id: String,
    pub artifact_id: String,
    pub version: String,
    pub packaging: Option<String>,
    pub properties: BTreeMap<String, String>,
    /// Entries of `<dependencyManagement>`, such as a BOM import
    pub dependency_management: Vec<Dependency>,
    pub dependencies: Vec<Dependency>,
    pub build: Build,
    pub profiles: Vec<Profile>,
    /// Project children with no typed field (`<name>`, `<repositories>`, ...),
    /// written back verbatim after the profiles
    pub extra: Vec<ConfigNode>,
}

impl BuildDescriptor {
    pub fn new(
        group_id: impl Into<String>,
        artifact_id: impl Into<String>,
        version: impl Into<String>,
    ) -> Self {
        Self {
            group_id: group_id.into(),
            artifact_id: artifact_id.into(),
            version: version.into(),
            ..Default::default()
        }
    }

    /// Sets a property, replacing any previous value
    pub fn add_property(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.properties.insert(name.into(), value.into());
    }

    pub fn property(&self, name: &str) -> Option<&str> {
        self.properties.get(name).map(String::as_str)
    }

    pub fn add_profile(&mut self, profile: Profile) {
        self.profiles.push(profile);
    }

    pub fn profile(&self, id: &str) -> Option<&Profile> {
        self.profiles.iter().find(|p| p.id == id)
    }

    /// Number of dependencies matching `group_id:artifact_id`
    pub fn count_dependency(&self, group_id: &str, artifact_id: &str) -> usize {
        self.dependencies
            .iter()
            .filter(|d| d.group_id == group_id && d.artifact_id == artifact_id)
            .count()
    }

    pub fn has_dependency(&self, group_id: &str, artifact_id: &str) -> bool {
        self.count_dependency(group_id, artifact_id) > 0
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Parent {
    pub group_id: String,
    pub artifact_id: String,
    pub version: String,
    pub relative_path: Option<String>,
}

/// A `(groupId, artifactId, version)` dependency
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Dependency {
    pub group_id: String,
    pub artifact_id: String,
    pub version: Option<String>,
    /// `<type>`, e.g. `pom` for a BOM import
    pub dependency_type: Option<String>,
    pub scope: Option<String>,
}

impl Dependency {
    pub fn new(
        group_id: impl Into<String>,
        artifact_id: impl Into<String>,
        version: impl Into<String>,
    ) -> Self {
        Self {
            group_id: group_id.into(),
            artifact_id: artifact_id.into(),
            version: Some(version.into()),
            dependency_type: None,
            scope: None,
        }
    }

    /// `groupId:artifactId`
    pub fn key(&self) -> String {
        format!("{}:{}", self.group_id, self.artifact_id)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Build {
    pub final_name: Option<String>,
    pub plugins: Vec<Plugin>,
    pub extra: Vec<ConfigNode>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Activation {
    pub active_by_default: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Profile {
    pub id: String,
    pub activation: Activation,
    pub properties: BTreeMap<String, String>,
    pub dependencies: Vec<Dependency>,
    pub build: Build,
}

impl Profile {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Default::default()
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Plugin {
    pub group_id: String,
    pub artifact_id: String,
    pub version: Option<String>,
    pub executions: Vec<Execution>,
    pub configuration: Option<ConfigNode>,
    pub extra: Vec<ConfigNode>,
}

impl Plugin {
    pub fn new(group_id: impl Into<String>, artifact_id: impl Into<String>) -> Self {
        Self {
            group_id: group_id.into(),
            artifact_id: artifact_id.into(),
            ..Default::default()
        }
    }

    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = Some(version.into());
        self
    }

    pub fn with_execution(mut self, execution: Execution) -> Self {
        self.executions.push(execution);
        self
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Execution {
    pub id: Option<String>,
    pub phase: Option<String>,
    pub goals: Vec<String>,
}

impl Execution {
    pub fn with_goals<I, S>(goals: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            id: None,
            phase: None,
            goals: goals.into_iter().map(Into::into).collect(),
        }
    }
}
