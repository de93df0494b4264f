//! Quarkus addon

use super::{
    java_source_directory, resource_directory, webapp_directory, Addon, META_INF_RESOURCES,
};
use crate::descriptor::{BuildDescriptor, ConfigNode, DependencyHelper, Profile};
use crate::error::{GenerationError, Result};
use crate::fs::FileSystem;
use crate::model::{FeatureModel, MicroProfileVersion, MicroprofileSpec, ProjectRole, SupportedServer};
use crate::template::TemplateEngine;
use std::sync::Arc;
use tracing::{debug, info};

const QUARKUS_GROUP_ID: &str = "io.quarkus";
const VERSION_PROPERTY: &str = "version.quarkus";
const VERSION_EXPRESSION: &str = "${version.quarkus}";
const NATIVE_PROFILE_ID: &str = "native";
const NATIVE_GOAL: &str = "native-image";

const APPLICATION_PROPERTIES: &str = "application.properties";
const INDEX_HTML: &str = "index.html";
const CONFIG_CONTROLLER: &str = "ConfigTestController.java";
const PUBLIC_KEY: &str = "publicKey.pem";

/// Quarkus release targeting a MicroProfile version; empty when unknown
pub fn quarkus_version(version: MicroProfileVersion) -> &'static str {
    match version {
        MicroProfileVersion::MP30 => "0.22.0",
        _ => "",
    }
}

/// Dependencies chosen so far while walking [`DEPENDENCY_RULES`]
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
struct PickState {
    jwt_picked: bool,
    rest_picked: bool,
}

#[derive(Debug, Clone, Copy)]
enum Trigger {
    NothingSelected,
    Selected(MicroprofileSpec),
    JwtWithoutRest,
}

#[derive(Debug, Clone, Copy)]
enum Pick {
    Jwt,
    Rest,
}

#[derive(Debug, Clone, Copy)]
struct Artifact {
    artifact_id: &'static str,
    main_only: bool,
}

const fn everywhere(artifact_id: &'static str) -> Artifact {
    Artifact {
        artifact_id,
        main_only: false,
    }
}

const fn main_only(artifact_id: &'static str) -> Artifact {
    Artifact {
        artifact_id,
        main_only: true,
    }
}

#[derive(Debug)]
struct DependencyRule {
    when: Trigger,
    artifacts: &'static [Artifact],
    picks: Option<Pick>,
}

/// Evaluated top to bottom; every matching rule contributes and nothing is
/// de-duplicated. Order matters: the last rule reads flags set above it.
const DEPENDENCY_RULES: &[DependencyRule] = &[
    DependencyRule {
        when: Trigger::NothingSelected,
        artifacts: &[everywhere("quarkus-core")],
        picks: None,
    },
    DependencyRule {
        when: Trigger::Selected(MicroprofileSpec::Config),
        artifacts: &[everywhere("quarkus-core")],
        picks: None,
    },
    DependencyRule {
        when: Trigger::Selected(MicroprofileSpec::FaultTolerance),
        artifacts: &[main_only("quarkus-smallrye-fault-tolerance")],
        picks: None,
    },
    DependencyRule {
        when: Trigger::Selected(MicroprofileSpec::JwtAuth),
        artifacts: &[everywhere("quarkus-smallrye-jwt")],
        picks: Some(Pick::Jwt),
    },
    DependencyRule {
        when: Trigger::Selected(MicroprofileSpec::Metrics),
        artifacts: &[main_only("quarkus-smallrye-metrics")],
        picks: None,
    },
    DependencyRule {
        when: Trigger::Selected(MicroprofileSpec::HealthChecks),
        artifacts: &[main_only("quarkus-smallrye-health")],
        picks: None,
    },
    DependencyRule {
        when: Trigger::Selected(MicroprofileSpec::OpenApi),
        artifacts: &[main_only("quarkus-smallrye-openapi")],
        picks: None,
    },
    DependencyRule {
        when: Trigger::Selected(MicroprofileSpec::OpenTracing),
        artifacts: &[everywhere("quarkus-smallrye-opentracing")],
        picks: None,
    },
    DependencyRule {
        when: Trigger::Selected(MicroprofileSpec::RestClient),
        artifacts: &[everywhere("quarkus-resteasy"), main_only("quarkus-rest-client")],
        picks: Some(Pick::Rest),
    },
    DependencyRule {
        when: Trigger::JwtWithoutRest,
        artifacts: &[everywhere("quarkus-resteasy"), main_only("quarkus-rest-client")],
        picks: None,
    },
];

impl Trigger {
    fn holds(&self, model: &FeatureModel, state: &PickState) -> bool {
        match self {
            Trigger::NothingSelected => model.selected_specs().is_empty(),
            Trigger::Selected(spec) => model.has_spec(*spec),
            Trigger::JwtWithoutRest => state.jwt_picked && !state.rest_picked,
        }
    }
}

impl PickState {
    fn mark(&mut self, pick: Pick) {
        match pick {
            Pick::Jwt => self.jwt_picked = true,
            Pick::Rest => self.rest_picked = true,
        }
    }
}

/// Addon for [`SupportedServer::Quarkus`]
pub struct QuarkusAddon {
    templates: Arc<dyn TemplateEngine>,
    fs: Arc<dyn FileSystem>,
    maven: Arc<dyn DependencyHelper>,
}

impl QuarkusAddon {
    pub fn new(
        templates: Arc<dyn TemplateEngine>,
        fs: Arc<dyn FileSystem>,
        maven: Arc<dyn DependencyHelper>,
    ) -> Self {
        Self {
            templates,
            fs,
            maven,
        }
    }

    /// Clone of the first profile, turned into the native-image profile
    fn native_profile(&self, descriptor: &BuildDescriptor, with_jwt_args: bool) -> Result<Profile> {
        let template = descriptor.profiles.first().ok_or_else(|| {
            GenerationError::DescriptorStructure(format!(
                "{} has no profile to derive the native profile from",
                descriptor.artifact_id
            ))
        })?;

        let mut native = template.clone();
        native.id = NATIVE_PROFILE_ID.to_string();
        native.activation.active_by_default = false;

        let plugin = native.build.plugins.first_mut().ok_or_else(|| {
            GenerationError::DescriptorStructure(format!(
                "profile '{}' declares no plugin",
                template.id
            ))
        })?;
        let execution = plugin.executions.first_mut().ok_or_else(|| {
            GenerationError::DescriptorStructure(format!(
                "plugin {}:{} in profile '{}' declares no execution",
                plugin.group_id, plugin.artifact_id, template.id
            ))
        })?;
        execution.goals = vec![NATIVE_GOAL.to_string()];

        let mut configuration = ConfigNode::new("configuration")
            .with_child(ConfigNode::new("enableHttpUrlHandler").with_value("true"));
        if with_jwt_args {
            configuration.add_child(
                ConfigNode::new("additionalBuildArgs").with_value("-H:Log=registerResource:"),
            );
            configuration.add_child(
                ConfigNode::new("additionalBuildArgs")
                    .with_value("-H:IncludeResources=privateKey.pem"),
            );
        }
        plugin.configuration = Some(configuration);

        Ok(native)
    }

    fn add_dependencies(
        &self,
        descriptor: &mut BuildDescriptor,
        model: &FeatureModel,
        is_main_project: bool,
    ) {
        let mut state = PickState::default();
        for rule in DEPENDENCY_RULES {
            if !rule.when.holds(model, &state) {
                continue;
            }
            if let Some(pick) = rule.picks {
                state.mark(pick);
            }
            for artifact in rule.artifacts {
                if artifact.main_only && !is_main_project {
                    continue;
                }
                self.maven.add_dependency(
                    descriptor,
                    QUARKUS_GROUP_ID,
                    artifact.artifact_id,
                    VERSION_EXPRESSION,
                );
            }
        }
    }
}

impl Addon for QuarkusAddon {
    fn addon_name(&self) -> &str {
        SupportedServer::Quarkus.code()
    }

    fn create_files(&self, model: &mut FeatureModel) -> Result<()> {
        info!(
            addon = self.addon_name(),
            root = %model.root_directory().display(),
            "Creating project files"
        );

        // Config is built into Quarkus
        model
            .variables_mut()
            .insert("mp_config".to_string(), "true".to_string());

        let pair = model.has_main_and_secondary_project();

        self.fs.remove_dir_all(&webapp_directory(model, true))?;
        if pair {
            self.fs.remove_dir_all(&webapp_directory(model, false))?;
        }

        let main_variants = model.variant_set(ProjectRole::Main);
        let variables = model.variables();

        self.templates.render(
            &resource_directory(model, true),
            APPLICATION_PROPERTIES,
            &main_variants,
            variables,
        )?;
        if pair {
            self.templates.render(
                &resource_directory(model, false),
                APPLICATION_PROPERTIES,
                &model.variant_set(ProjectRole::Secondary),
                variables,
            )?;
        }

        let web_directory = resource_directory(model, true).join(META_INF_RESOURCES);
        self.fs.create_dir_all(&web_directory)?;
        self.templates
            .render(&web_directory, INDEX_HTML, &main_variants, variables)?;

        self.templates.render(
            &java_source_directory(model, true).join("config"),
            CONFIG_CONTROLLER,
            &main_variants,
            variables,
        )?;

        if pair && model.has_spec(MicroprofileSpec::JwtAuth) {
            let key_directory = resource_directory(model, false).join(META_INF_RESOURCES);
            self.fs.create_dir_all(&key_directory)?;
            self.templates
                .render(&key_directory, PUBLIC_KEY, &main_variants, variables)?;
        }

        Ok(())
    }

    fn adapt_build_model(
        &self,
        descriptor: &mut BuildDescriptor,
        model: &FeatureModel,
        is_main_project: bool,
    ) -> Result<()> {
        let with_jwt_args = is_main_project && model.has_spec(MicroprofileSpec::JwtAuth);
        let native = self.native_profile(descriptor, with_jwt_args)?;

        let version = quarkus_version(model.target_version());
        debug!(
            artifact = %descriptor.artifact_id,
            main = is_main_project,
            version,
            "Adapting build descriptor"
        );

        descriptor.add_property(VERSION_PROPERTY, version);
        descriptor.add_profile(native);
        self.add_dependencies(descriptor, model, is_main_project);

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::descriptor::{baseline_descriptor, MavenHelper};
    use crate::fs::MockFileSystem;
    use crate::model::{Topology, SECONDARY_INDICATOR};
    use crate::template::MockTemplateEngine;
    use std::path::{Path, PathBuf};
    use std::sync::Mutex;

    /// (directory, template, secondary marker present)
    type Calls = Arc<Mutex<Vec<(PathBuf, String, bool)>>>;

    fn recording_engine(calls: &Calls) -> MockTemplateEngine {
        let calls = calls.clone();
        let mut engine = MockTemplateEngine::new();
        engine
            .expect_render()
            .returning(move |dir, name, alternatives, _| {
                calls.lock().unwrap().push((
                    dir.to_path_buf(),
                    name.to_string(),
                    alternatives.contains(SECONDARY_INDICATOR),
                ));
                Ok(())
            });
        engine
    }

    fn addon_with(engine: MockTemplateEngine, fs: Arc<MockFileSystem>) -> QuarkusAddon {
        QuarkusAddon::new(Arc::new(engine), fs, Arc::new(MavenHelper))
    }

    fn model(topology: Topology, specs: &[MicroprofileSpec]) -> FeatureModel {
        FeatureModel::builder(SupportedServer::Quarkus, "/mock/out")
            .topology(topology)
            .specs(specs.iter().copied())
            .build()
            .unwrap()
    }

    fn adapted(model: &FeatureModel, is_main: bool) -> BuildDescriptor {
        let fs = Arc::new(MockFileSystem::new());
        let addon = addon_with(MockTemplateEngine::new(), fs);
        let mut descriptor = baseline_descriptor(model, is_main);
        addon
            .adapt_build_model(&mut descriptor, model, is_main)
            .unwrap();
        descriptor
    }

    fn artifact_ids(descriptor: &BuildDescriptor) -> Vec<&str> {
        descriptor
            .dependencies
            .iter()
            .map(|d| d.artifact_id.as_str())
            .collect()
    }

    #[test]
    fn test_addon_name() {
        let addon = addon_with(MockTemplateEngine::new(), Arc::new(MockFileSystem::new()));
        assert_eq!(addon.addon_name(), "quarkus");
    }

    #[test]
    fn test_create_files_single_project() {
        let calls = Calls::default();
        let fs = Arc::new(MockFileSystem::new());
        fs.add_file("/mock/out/src/main/webapp/WEB-INF/web.xml", "<web-app/>");
        let addon = addon_with(recording_engine(&calls), fs.clone());
        let mut model = model(Topology::SingleProject, &[MicroprofileSpec::JwtAuth]);

        addon.create_files(&mut model).unwrap();

        assert_eq!(model.variables()["mp_config"], "true");
        assert!(!fs.exists(Path::new("/mock/out/src/main/webapp")));
        assert!(fs.is_dir(Path::new("/mock/out/src/main/resources/META-INF/resources")));

        let calls = calls.lock().unwrap();
        let names: Vec<&str> = calls.iter().map(|(_, n, _)| n.as_str()).collect();
        assert_eq!(
            names,
            vec!["application.properties", "index.html", "ConfigTestController.java"]
        );
        assert!(calls.iter().all(|(_, _, secondary)| !secondary));
        assert_eq!(
            calls[2].0,
            PathBuf::from("/mock/out/src/main/java/com/example/demo/config")
        );
    }

    #[test]
    fn test_create_files_pair_with_jwt() {
        let calls = Calls::default();
        let fs = Arc::new(MockFileSystem::new());
        let addon = addon_with(recording_engine(&calls), fs.clone());
        let mut model = model(Topology::MainPlusSecondary, &[MicroprofileSpec::JwtAuth]);

        addon.create_files(&mut model).unwrap();

        let calls = calls.lock().unwrap();
        assert_eq!(calls.len(), 5);
        assert_eq!(
            calls[1],
            (
                PathBuf::from("/mock/out/service-b/src/main/resources"),
                "application.properties".to_string(),
                true
            )
        );
        assert_eq!(
            calls[4],
            (
                PathBuf::from("/mock/out/service-b/src/main/resources/META-INF/resources"),
                "publicKey.pem".to_string(),
                false
            )
        );
        assert!(fs.is_dir(Path::new(
            "/mock/out/service-b/src/main/resources/META-INF/resources"
        )));
    }

    #[test]
    fn test_create_files_pair_without_jwt_skips_key() {
        let calls = Calls::default();
        let addon = addon_with(recording_engine(&calls), Arc::new(MockFileSystem::new()));
        let mut model = model(Topology::MainPlusSecondary, &[MicroprofileSpec::Metrics]);

        addon.create_files(&mut model).unwrap();

        let calls = calls.lock().unwrap();
        assert_eq!(calls.len(), 4);
        assert!(calls.iter().all(|(_, n, _)| n != "publicKey.pem"));
    }

    #[test]
    fn test_create_files_stops_on_render_failure() {
        let calls = Calls::default();
        let recorded = calls.clone();
        let mut engine = MockTemplateEngine::new();
        engine.expect_render().returning(move |_, name, _, _| {
            recorded.lock().unwrap().push((PathBuf::new(), name.to_string(), false));
            if name == "index.html" {
                Err(GenerationError::TemplateNotFound {
                    name: name.to_string(),
                })
            } else {
                Ok(())
            }
        });
        let addon = addon_with(engine, Arc::new(MockFileSystem::new()));
        let mut model = model(Topology::SingleProject, &[]);

        let result = addon.create_files(&mut model);

        assert!(matches!(result, Err(GenerationError::TemplateNotFound { .. })));
        assert_eq!(calls.lock().unwrap().len(), 2);
    }

    #[test]
    fn test_no_specs_adds_core_only() {
        let model = model(Topology::SingleProject, &[]);
        let descriptor = adapted(&model, true);

        assert_eq!(artifact_ids(&descriptor), vec!["quarkus-core"]);
        assert_eq!(descriptor.property("version.quarkus"), Some("0.22.0"));
        assert!(descriptor
            .dependencies
            .iter()
            .all(|d| d.group_id == "io.quarkus"
                && d.version.as_deref() == Some("${version.quarkus}")));
    }

    #[test]
    fn test_config_adds_core_once() {
        let model = model(Topology::SingleProject, &[MicroprofileSpec::Config]);
        let descriptor = adapted(&model, true);

        assert_eq!(artifact_ids(&descriptor), vec!["quarkus-core"]);
        assert_eq!(descriptor.profiles.len(), 2);
    }

    #[test]
    fn test_native_profile() {
        let model = model(Topology::SingleProject, &[MicroprofileSpec::Metrics]);
        let descriptor = adapted(&model, true);

        assert_eq!(descriptor.profiles.len(), 2);
        let jvm = &descriptor.profiles[0];
        assert_eq!(jvm.build.plugins[0].executions[0].goals, vec!["build"]);
        assert!(jvm.activation.active_by_default);
        assert!(jvm.build.plugins[0].configuration.is_none());

        let native = descriptor.profile("native").unwrap();
        assert!(!native.activation.active_by_default);
        assert_eq!(native.build.plugins[0].executions[0].goals, vec!["native-image"]);
        let configuration = native.build.plugins[0].configuration.as_ref().unwrap();
        assert_eq!(configuration.children().len(), 1);
        assert_eq!(
            configuration
                .child("enableHttpUrlHandler")
                .and_then(|c| c.value()),
            Some("true")
        );
    }

    #[test]
    fn test_jwt_build_args_main_only() {
        let model = model(Topology::MainPlusSecondary, &[MicroprofileSpec::JwtAuth]);

        let main = adapted(&model, true);
        let configuration = main.profiles[1].build.plugins[0]
            .configuration
            .clone()
            .unwrap();
        let args: Vec<&str> = configuration
            .children_named("additionalBuildArgs")
            .filter_map(|c| c.value())
            .collect();
        assert_eq!(
            args,
            vec!["-H:Log=registerResource:", "-H:IncludeResources=privateKey.pem"]
        );

        let secondary = adapted(&model, false);
        let configuration = secondary.profiles[1].build.plugins[0]
            .configuration
            .clone()
            .unwrap();
        assert_eq!(configuration.children().len(), 1);
    }

    #[test]
    fn test_jwt_without_rest_client_pulls_rest_stack() {
        let model = model(Topology::MainPlusSecondary, &[MicroprofileSpec::JwtAuth]);

        assert_eq!(
            artifact_ids(&adapted(&model, true)),
            vec!["quarkus-smallrye-jwt", "quarkus-resteasy", "quarkus-rest-client"]
        );
        assert_eq!(
            artifact_ids(&adapted(&model, false)),
            vec!["quarkus-smallrye-jwt", "quarkus-resteasy"]
        );
    }

    #[test]
    fn test_rest_client_not_duplicated_with_jwt() {
        let model = model(
            Topology::SingleProject,
            &[MicroprofileSpec::JwtAuth, MicroprofileSpec::RestClient],
        );
        let descriptor = adapted(&model, true);

        assert_eq!(
            descriptor.count_dependency("io.quarkus", "quarkus-resteasy"),
            1
        );
        assert_eq!(
            descriptor.count_dependency("io.quarkus", "quarkus-rest-client"),
            1
        );
    }

    #[test]
    fn test_main_only_specs_skipped_for_secondary() {
        let model = model(
            Topology::MainPlusSecondary,
            &[
                MicroprofileSpec::FaultTolerance,
                MicroprofileSpec::Metrics,
                MicroprofileSpec::HealthChecks,
                MicroprofileSpec::OpenApi,
                MicroprofileSpec::OpenTracing,
            ],
        );

        assert_eq!(
            artifact_ids(&adapted(&model, false)),
            vec!["quarkus-smallrye-opentracing"]
        );
        assert_eq!(
            artifact_ids(&adapted(&model, true)),
            vec![
                "quarkus-smallrye-fault-tolerance",
                "quarkus-smallrye-metrics",
                "quarkus-smallrye-health",
                "quarkus-smallrye-openapi",
                "quarkus-smallrye-opentracing"
            ]
        );
    }

    #[test]
    fn test_unmapped_version_is_empty() {
        let model = FeatureModel::builder(SupportedServer::Quarkus, "/mock/out")
            .target_version(MicroProfileVersion::MP22)
            .build()
            .unwrap();

        assert_eq!(adapted(&model, true).property("version.quarkus"), Some(""));
        assert_eq!(quarkus_version(MicroProfileVersion::None), "");
    }

    #[test]
    fn test_missing_profile_leaves_descriptor_untouched() {
        let addon = addon_with(MockTemplateEngine::new(), Arc::new(MockFileSystem::new()));
        let model = model(Topology::SingleProject, &[]);
        let mut descriptor = BuildDescriptor::new("com.example", "demo", "1.0-SNAPSHOT");

        let result = addon.adapt_build_model(&mut descriptor, &model, true);

        assert!(matches!(result, Err(GenerationError::DescriptorStructure(_))));
        assert!(descriptor.properties.is_empty());
        assert!(descriptor.dependencies.is_empty());
    }

    #[test]
    fn test_missing_execution_leaves_descriptor_untouched() {
        let addon = addon_with(MockTemplateEngine::new(), Arc::new(MockFileSystem::new()));
        let model = model(Topology::SingleProject, &[]);
        let mut descriptor = baseline_descriptor(&model, true);
        descriptor.profiles[0].build.plugins[0].executions.clear();
        let before = descriptor.clone();

        let result = addon.adapt_build_model(&mut descriptor, &model, true);

        assert!(matches!(result, Err(GenerationError::DescriptorStructure(_))));
        assert_eq!(descriptor, before);
    }
}
