//! Baseline descriptor a build-file generator hands to the server addons.

use super::{Build, BuildDescriptor, Execution, Plugin, Profile};
use crate::model::FeatureModel;

pub const DEFAULT_PROJECT_VERSION: &str = "1.0-SNAPSHOT";
pub const DEFAULT_PROFILE_ID: &str = "jvm";

/// Build a baseline descriptor for one project of `model`.
///
/// It carries a default-active profile holding the runtime's Maven plugin
/// with one execution, which addons clone to derive further profiles.
pub fn baseline_descriptor(model: &FeatureModel, is_main: bool) -> BuildDescriptor {
    let artifact_id = if model.has_main_and_secondary_project() {
        model.project_name(is_main).to_string()
    } else {
        model.artifact_id().to_string()
    };

    let mut descriptor =
        BuildDescriptor::new(model.group_id(), artifact_id.clone(), DEFAULT_PROJECT_VERSION);
    descriptor.packaging = Some("jar".to_string());
    descriptor.add_property("maven.compiler.source", "11");
    descriptor.add_property("maven.compiler.target", "11");
    descriptor.add_property("project.build.sourceEncoding", "UTF-8");
    descriptor.add_property("failOnMissingWebXml", "false");

    let server = model.server().code();
    let version_property = format!("${{version.{}}}", server);
    let runtime_plugin = || {
        Plugin::new(format!("io.{}", server), format!("{}-maven-plugin", server))
            .with_version(version_property.clone())
            .with_execution(Execution::with_goals(["build"]))
    };

    descriptor.build = Build {
        final_name: Some(artifact_id),
        plugins: vec![runtime_plugin()],
        ..Build::default()
    };

    let mut profile = Profile::new(DEFAULT_PROFILE_ID);
    profile.activation.active_by_default = true;
    profile.build.plugins.push(runtime_plugin());
    descriptor.add_profile(profile);

    descriptor
}
