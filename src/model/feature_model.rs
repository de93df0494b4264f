use super::ids::{MicroProfileVersion, MicroprofileSpec, SupportedServer};
use super::variant::{ProjectRole, VariantSet};
use crate::error::{GenerationError, Result};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::path::{Path, PathBuf};

const DEFAULT_GROUP_ID: &str = "com.example";
const DEFAULT_ARTIFACT_ID: &str = "demo";
const DEFAULT_MAIN_PROJECT: &str = "service-a";
const DEFAULT_SECONDARY_PROJECT: &str = "service-b";
const JAVA_PACKAGE_PATTERN: &str = r"^[A-Za-z_][A-Za-z0-9_]*(\.[A-Za-z_][A-Za-z0-9_]*)*$";
const MAVEN_ID_PATTERN: &str = r"^[A-Za-z0-9_.\-]+$";

/// Whether one project or a main/secondary pair is generated
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Topology {
    #[default]
    SingleProject,
    MainPlusSecondary,
}

/// Selections for one generation request.
///
/// Everything except the variables is fixed at construction; addons may add
/// variables through [`FeatureModel::variables_mut`].
#[derive(Debug, Clone)]
pub struct FeatureModel {
    server: SupportedServer,
    target_version: MicroProfileVersion,
    specs: BTreeSet<MicroprofileSpec>,
    alternatives: BTreeSet<String>,
    variables: BTreeMap<String, String>,
    topology: Topology,
    root_directory: PathBuf,
    main_project_name: String,
    secondary_project_name: String,
    group_id: String,
    artifact_id: String,
    java_package: String,
}

impl FeatureModel {
    pub fn builder(server: SupportedServer, root_directory: impl Into<PathBuf>) -> FeatureModelBuilder {
        FeatureModelBuilder::new(server, root_directory)
    }

    pub fn server(&self) -> SupportedServer {
        self.server
    }

    pub fn target_version(&self) -> MicroProfileVersion {
        self.target_version
    }

    pub fn selected_specs(&self) -> &BTreeSet<MicroprofileSpec> {
        &self.specs
    }

    pub fn has_spec(&self, spec: MicroprofileSpec) -> bool {
        self.specs.contains(&spec)
    }

    pub fn alternatives(&self) -> &BTreeSet<String> {
        &self.alternatives
    }

    pub fn variant_set(&self, role: ProjectRole) -> VariantSet {
        VariantSet::for_role(&self.alternatives, role)
    }

    pub fn variables(&self) -> &BTreeMap<String, String> {
        &self.variables
    }

    pub fn variables_mut(&mut self) -> &mut BTreeMap<String, String> {
        &mut self.variables
    }

    pub fn topology(&self) -> Topology {
        self.topology
    }

    pub fn has_main_and_secondary_project(&self) -> bool {
        self.topology == Topology::MainPlusSecondary
    }

    pub fn root_directory(&self) -> &Path {
        &self.root_directory
    }

    /// Root directory of the main (`is_main == true`) or secondary project.
    ///
    /// With a single project both roles resolve to the root directory.
    pub fn directory(&self, is_main: bool) -> PathBuf {
        match self.topology {
            Topology::SingleProject => self.root_directory.clone(),
            Topology::MainPlusSecondary if is_main => {
                self.root_directory.join(&self.main_project_name)
            }
            Topology::MainPlusSecondary => self.root_directory.join(&self.secondary_project_name),
        }
    }

    /// Roles present in this request, main first
    pub fn roles(&self) -> Vec<ProjectRole> {
        if self.has_main_and_secondary_project() {
            vec![ProjectRole::Main, ProjectRole::Secondary]
        } else {
            vec![ProjectRole::Main]
        }
    }

    pub fn project_name(&self, is_main: bool) -> &str {
        if is_main {
            &self.main_project_name
        } else {
            &self.secondary_project_name
        }
    }

    pub fn group_id(&self) -> &str {
        &self.group_id
    }

    pub fn artifact_id(&self) -> &str {
        &self.artifact_id
    }

    pub fn java_package(&self) -> &str {
        &self.java_package
    }

    /// `src/main/java/<package as path>`, relative to a project root
    pub fn java_root_package_path(&self) -> PathBuf {
        let mut path = PathBuf::from("src/main/java");
        for segment in self.java_package.split('.') {
            path.push(segment);
        }
        path
    }
}

/// Builder validating user input before it becomes a [`FeatureModel`]
#[derive(Debug, Clone)]
pub struct FeatureModelBuilder {
    server: SupportedServer,
    target_version: MicroProfileVersion,
    specs: BTreeSet<MicroprofileSpec>,
    extra_alternatives: BTreeSet<String>,
    variables: BTreeMap<String, String>,
    topology: Topology,
    root_directory: PathBuf,
    main_project_name: String,
    secondary_project_name: String,
    group_id: String,
    artifact_id: String,
    java_package: Option<String>,
}

impl FeatureModelBuilder {
    pub fn new(server: SupportedServer, root_directory: impl Into<PathBuf>) -> Self {
        Self {
            server,
            target_version: MicroProfileVersion::default(),
            specs: BTreeSet::new(),
            extra_alternatives: BTreeSet::new(),
            variables: BTreeMap::new(),
            topology: Topology::default(),
            root_directory: root_directory.into(),
            main_project_name: DEFAULT_MAIN_PROJECT.to_string(),
            secondary_project_name: DEFAULT_SECONDARY_PROJECT.to_string(),
            group_id: DEFAULT_GROUP_ID.to_string(),
            artifact_id: DEFAULT_ARTIFACT_ID.to_string(),
            java_package: None,
        }
    }

    pub fn target_version(mut self, version: MicroProfileVersion) -> Self {
        self.target_version = version;
        self
    }

    pub fn spec(mut self, spec: MicroprofileSpec) -> Self {
        self.specs.insert(spec);
        self
    }

    pub fn specs(mut self, specs: impl IntoIterator<Item = MicroprofileSpec>) -> Self {
        self.specs.extend(specs);
        self
    }

    pub fn topology(mut self, topology: Topology) -> Self {
        self.topology = topology;
        self
    }

    pub fn alternative(mut self, alternative: impl Into<String>) -> Self {
        self.extra_alternatives.insert(alternative.into());
        self
    }

    pub fn variable(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.variables.insert(name.into(), value.into());
        self
    }

    pub fn project_names(mut self, main: impl Into<String>, secondary: impl Into<String>) -> Self {
        self.main_project_name = main.into();
        self.secondary_project_name = secondary.into();
        self
    }

    pub fn group_id(mut self, group_id: impl Into<String>) -> Self {
        self.group_id = group_id.into();
        self
    }

    pub fn artifact_id(mut self, artifact_id: impl Into<String>) -> Self {
        self.artifact_id = artifact_id.into();
        self
    }

    pub fn java_package(mut self, java_package: impl Into<String>) -> Self {
        self.java_package = Some(java_package.into());
        self
    }

    pub fn build(self) -> Result<FeatureModel> {
        let maven_id = compile(MAVEN_ID_PATTERN)?;
        for (field, value) in [("group id", &self.group_id), ("artifact id", &self.artifact_id)] {
            if !maven_id.is_match(value) {
                return Err(GenerationError::InvalidModel(format!(
                    "{} '{}' is not a valid Maven identifier",
                    field, value
                )));
            }
        }

        let java_package = self
            .java_package
            .clone()
            .unwrap_or_else(|| default_package(&self.group_id, &self.artifact_id));
        if !compile(JAVA_PACKAGE_PATTERN)?.is_match(&java_package) {
            return Err(GenerationError::InvalidModel(format!(
                "'{}' is not a valid Java package name",
                java_package
            )));
        }

        if self.topology == Topology::MainPlusSecondary {
            validate_project_name(&self.main_project_name)?;
            validate_project_name(&self.secondary_project_name)?;
            if self.main_project_name == self.secondary_project_name {
                return Err(GenerationError::InvalidModel(format!(
                    "main and secondary project share the name '{}'",
                    self.main_project_name
                )));
            }
        }

        let mut alternatives: BTreeSet<String> =
            self.specs.iter().map(MicroprofileSpec::alternative).collect();
        alternatives.extend(self.extra_alternatives);

        let mut variables = self.variables;
        let defaults = [
            ("server", self.server.code().to_string()),
            ("mp_version", self.target_version.name().to_string()),
            ("group_id", self.group_id.clone()),
            ("artifact_id", self.artifact_id.clone()),
            ("java_package", java_package.clone()),
            ("main_project", self.main_project_name.clone()),
            ("secondary_project", self.secondary_project_name.clone()),
        ];
        for (name, value) in defaults {
            variables.entry(name.to_string()).or_insert(value);
        }

        Ok(FeatureModel {
            server: self.server,
            target_version: self.target_version,
            specs: self.specs,
            alternatives,
            variables,
            topology: self.topology,
            root_directory: self.root_directory,
            main_project_name: self.main_project_name,
            secondary_project_name: self.secondary_project_name,
            group_id: self.group_id,
            artifact_id: self.artifact_id,
            java_package,
        })
    }
}

fn compile(pattern: &str) -> Result<Regex> {
    Regex::new(pattern).map_err(|e| GenerationError::InvalidModel(e.to_string()))
}

fn default_package(group_id: &str, artifact_id: &str) -> String {
    let artifact: String = artifact_id
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == '_')
        .collect();
    if artifact.is_empty() {
        group_id.to_string()
    } else {
        format!("{}.{}", group_id, artifact.to_lowercase())
    }
}

fn validate_project_name(name: &str) -> Result<()> {
    let valid = !name.is_empty()
        && name != "."
        && name != ".."
        && !name.contains(['/', '\\']);
    if valid {
        Ok(())
    } else {
        Err(GenerationError::InvalidModel(format!(
            "'{}' is not a valid project directory name",
            name
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::SECONDARY_INDICATOR;

    fn builder() -> FeatureModelBuilder {
        FeatureModel::builder(SupportedServer::Quarkus, "/work")
    }

    #[test]
    fn test_defaults() {
        let model = builder().build().unwrap();

        assert_eq!(model.topology(), Topology::SingleProject);
        assert_eq!(model.target_version(), MicroProfileVersion::MP30);
        assert!(model.selected_specs().is_empty());
        assert!(model.alternatives().is_empty());
        assert_eq!(model.java_package(), "com.example.demo");
        assert_eq!(model.variables()["java_package"], "com.example.demo");
        assert_eq!(model.variables()["server"], "quarkus");
    }

    #[test]
    fn test_alternatives_follow_specs() {
        let model = builder()
            .spec(MicroprofileSpec::Metrics)
            .spec(MicroprofileSpec::JwtAuth)
            .alternative("custom")
            .build()
            .unwrap();

        let alternatives: Vec<&str> = model.alternatives().iter().map(String::as_str).collect();
        assert_eq!(alternatives, vec!["custom", "mp_jwt_auth", "mp_metrics"]);
    }

    #[test]
    fn test_directories_single_project() {
        let model = builder().build().unwrap();

        assert_eq!(model.directory(true), PathBuf::from("/work"));
        assert_eq!(model.directory(false), PathBuf::from("/work"));
        assert_eq!(model.roles(), vec![ProjectRole::Main]);
    }

    #[test]
    fn test_directories_main_plus_secondary() {
        let model = builder()
            .topology(Topology::MainPlusSecondary)
            .build()
            .unwrap();

        assert_eq!(model.directory(true), PathBuf::from("/work/service-a"));
        assert_eq!(model.directory(false), PathBuf::from("/work/service-b"));
        assert_eq!(
            model.roles(),
            vec![ProjectRole::Main, ProjectRole::Secondary]
        );
    }

    #[test]
    fn test_java_root_package_path() {
        let model = builder().java_package("org.acme.shop").build().unwrap();
        assert_eq!(
            model.java_root_package_path(),
            PathBuf::from("src/main/java/org/acme/shop")
        );
    }

    #[test]
    fn test_invalid_package_rejected() {
        let result = builder().java_package("org.1acme").build();
        assert!(matches!(result, Err(GenerationError::InvalidModel(_))));
    }

    #[test]
    fn test_invalid_group_id_rejected() {
        let result = builder().group_id("com example").build();
        assert!(matches!(result, Err(GenerationError::InvalidModel(_))));
    }

    #[test]
    fn test_same_project_names_rejected() {
        let result = builder()
            .topology(Topology::MainPlusSecondary)
            .project_names("svc", "svc")
            .build();
        assert!(matches!(result, Err(GenerationError::InvalidModel(_))));
    }

    #[test]
    fn test_user_variables_win_over_defaults() {
        let model = builder().variable("artifact_id", "custom").build().unwrap();
        assert_eq!(model.variables()["artifact_id"], "custom");
        assert_eq!(model.artifact_id(), "demo");
    }

    #[test]
    fn test_variant_set_per_role() {
        let model = builder().spec(MicroprofileSpec::Config).build().unwrap();

        assert!(!model.variant_set(ProjectRole::Main).contains(SECONDARY_INDICATOR));
        assert!(model
            .variant_set(ProjectRole::Secondary)
            .contains(SECONDARY_INDICATOR));
    }
}
