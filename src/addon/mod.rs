//! Server addons.
//!
//! An addon knows which files and build dependencies one runtime needs for a
//! feature selection. The generator looks it up in the [`AddonRegistry`] by
//! server code, lets it write the project files and then adapts the build
//! descriptor of every project it generated.

pub mod quarkus;
pub mod registry;

pub use quarkus::QuarkusAddon;
pub use registry::AddonRegistry;

use crate::descriptor::BuildDescriptor;
use crate::error::Result;
use crate::model::FeatureModel;
use std::path::PathBuf;

pub const SRC_MAIN_RESOURCES: &str = "src/main/resources";
pub const SRC_MAIN_WEBAPP: &str = "src/main/webapp";
/// Static web content served by the runtime, relative to the resources dir
pub const META_INF_RESOURCES: &str = "META-INF/resources";

/// Per-runtime generation hooks
pub trait Addon: Send + Sync {
    /// Stable name, equal to the code of the server it handles
    fn addon_name(&self) -> &str;

    /// Writes the runtime-specific files of every project in the model.
    ///
    /// May add variables to the model; nothing else is changed.
    fn create_files(&self, model: &mut FeatureModel) -> Result<()>;

    /// Adds runtime-specific properties, profiles and dependencies to the
    /// descriptor of the main or the secondary project
    fn adapt_build_model(
        &self,
        descriptor: &mut BuildDescriptor,
        model: &FeatureModel,
        is_main_project: bool,
    ) -> Result<()>;
}

pub fn resource_directory(model: &FeatureModel, is_main: bool) -> PathBuf {
    model.directory(is_main).join(SRC_MAIN_RESOURCES)
}

pub fn webapp_directory(model: &FeatureModel, is_main: bool) -> PathBuf {
    model.directory(is_main).join(SRC_MAIN_WEBAPP)
}

/// Directory of the root Java package of a project
pub fn java_source_directory(model: &FeatureModel, is_main: bool) -> PathBuf {
    model.directory(is_main).join(model.java_root_package_path())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{SupportedServer, Topology};
    use std::path::Path;

    #[test]
    fn test_directories_per_role() {
        let model = FeatureModel::builder(SupportedServer::Quarkus, "/work")
            .topology(Topology::MainPlusSecondary)
            .java_package("org.acme")
            .build()
            .unwrap();

        assert_eq!(
            resource_directory(&model, true),
            Path::new("/work/service-a/src/main/resources")
        );
        assert_eq!(
            webapp_directory(&model, false),
            Path::new("/work/service-b/src/main/webapp")
        );
        assert_eq!(
            java_source_directory(&model, true),
            Path::new("/work/service-a/src/main/java/org/acme")
        );
    }
}
