use super::{BuildDescriptor, Dependency};
use tracing::debug;

/// Inserts dependencies into a build descriptor
pub trait DependencyHelper: Send + Sync {
    /// Appends unconditionally; an existing identical dependency is not detected
    fn add_dependency(
        &self,
        descriptor: &mut BuildDescriptor,
        group_id: &str,
        artifact_id: &str,
        version: &str,
    );
}

/// Default helper appending plain compile-scope dependencies
#[derive(Debug, Default, Clone, Copy)]
pub struct MavenHelper;

impl DependencyHelper for MavenHelper {
    fn add_dependency(
        &self,
        descriptor: &mut BuildDescriptor,
        group_id: &str,
        artifact_id: &str,
        version: &str,
    ) {
        debug!(
            artifact = %descriptor.artifact_id,
            dependency = %format!("{}:{}:{}", group_id, artifact_id, version),
            "Adding dependency"
        );
        descriptor
            .dependencies
            .push(Dependency::new(group_id, artifact_id, version));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_dependency_appends_duplicates() {
        let mut descriptor = BuildDescriptor::default();
        let helper = MavenHelper;

        helper.add_dependency(&mut descriptor, "io.quarkus", "quarkus-core", "${version.quarkus}");
        helper.add_dependency(&mut descriptor, "io.quarkus", "quarkus-core", "${version.quarkus}");

        assert_eq!(descriptor.dependencies.len(), 2);
        assert_eq!(
            descriptor.dependencies[0].version.as_deref(),
            Some("${version.quarkus}")
        );
        assert_eq!(descriptor.dependencies[0].scope, None);
    }
}
