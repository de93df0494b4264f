//! Runs the addon of the requested server over a feature model

use crate::addon::AddonRegistry;
use crate::descriptor::{baseline_descriptor, to_pom_xml, BuildDescriptor};
use crate::error::Result;
use crate::fs::FileSystem;
use crate::model::{FeatureModel, ProjectRole};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{debug, info};

pub const POM_FILE: &str = "pom.xml";

/// Result of one generation: the model as the addon left it and the adapted
/// descriptor of every project
#[derive(Debug, Clone)]
pub struct GenerationOutcome {
    pub model: FeatureModel,
    pub main: BuildDescriptor,
    pub secondary: Option<BuildDescriptor>,
}

impl GenerationOutcome {
    pub fn descriptor(&self, role: ProjectRole) -> Option<&BuildDescriptor> {
        match role {
            ProjectRole::Main => Some(&self.main),
            ProjectRole::Secondary => self.secondary.as_ref(),
        }
    }

    /// Descriptors with their project role, main first
    pub fn descriptors(&self) -> impl Iterator<Item = (ProjectRole, &BuildDescriptor)> {
        std::iter::once((ProjectRole::Main, &self.main)).chain(
            self.secondary
                .as_ref()
                .map(|d| (ProjectRole::Secondary, d)),
        )
    }
}

pub struct Generator {
    registry: AddonRegistry,
    fs: Arc<dyn FileSystem>,
}

impl Generator {
    pub fn new(registry: AddonRegistry, fs: Arc<dyn FileSystem>) -> Self {
        Self { registry, fs }
    }

    pub fn registry(&self) -> &AddonRegistry {
        &self.registry
    }

    /// Writes the project files and adapts a descriptor per project.
    ///
    /// Each project starts from its own copy of `baseline`, or from the
    /// built-in baseline when none is given.
    pub fn run(
        &self,
        mut model: FeatureModel,
        baseline: Option<&BuildDescriptor>,
    ) -> Result<GenerationOutcome> {
        let addon = self.registry.get(model.server())?;
        info!(
            addon = addon.addon_name(),
            specs = model.selected_specs().len(),
            topology = ?model.topology(),
            "Generating project"
        );

        addon.create_files(&mut model)?;

        let adapt = |role: ProjectRole| -> Result<BuildDescriptor> {
            let is_main = role.is_main();
            let mut descriptor = match baseline {
                Some(b) => b.clone(),
                None => baseline_descriptor(&model, is_main),
            };
            addon.adapt_build_model(&mut descriptor, &model, is_main)?;
            debug!(
                role = ?role,
                dependencies = descriptor.dependencies.len(),
                profiles = descriptor.profiles.len(),
                "Build descriptor adapted"
            );
            Ok(descriptor)
        };

        let main = adapt(ProjectRole::Main)?;
        let secondary = if model.has_main_and_secondary_project() {
            Some(adapt(ProjectRole::Secondary)?)
        } else {
            None
        };

        Ok(GenerationOutcome {
            model,
            main,
            secondary,
        })
    }

    /// Writes `pom.xml` into every project directory, returning the paths
    pub fn write_descriptors(&self, outcome: &GenerationOutcome) -> Result<Vec<PathBuf>> {
        let mut written = Vec::new();
        for (role, descriptor) in outcome.descriptors() {
            let dir = outcome.model.directory(role.is_main());
            self.fs.create_dir_all(&dir)?;
            let path = dir.join(POM_FILE);
            self.fs.write(&path, &to_pom_xml(descriptor))?;
            info!(file = %path.display(), "Wrote build descriptor");
            written.push(path);
        }
        Ok(written)
    }
}
