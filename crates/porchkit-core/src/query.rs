//! Queries over a derived resource list

use crate::error::{CoreError, Result};
use crate::layout::PackageLayout;
use crate::resource::PackageResource;

/// The package's root manifest (the `Kptfile` at the package root)
pub fn root_manifest(resources: &[PackageResource]) -> Result<&PackageResource> {
    root_manifest_with_layout(resources, &PackageLayout::default())
}

/// The root manifest according to `layout`
///
/// Manifests of nested packages (`sub/Kptfile`) do not count.
pub fn root_manifest_with_layout<'a>(
    resources: &'a [PackageResource],
    layout: &PackageLayout,
) -> Result<&'a PackageResource> {
    resources
        .iter()
        .find(|r| r.filename == layout.manifest_filename)
        .ok_or_else(|| CoreError::ManifestNotFound {
            filename: layout.manifest_filename.clone(),
        })
}

/// Resources of `kind` that are applied to a cluster
pub fn deployable_resources<'a>(
    resources: &'a [PackageResource],
    kind: &str,
) -> Vec<&'a PackageResource> {
    resources
        .iter()
        .filter(|r| r.kind == kind && !r.is_local_config_resource)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resource_map::ResourceMap;

    fn resources() -> Vec<PackageResource> {
        ResourceMap::new()
            .with_file("Kptfile", "apiVersion: kpt.dev/v1\nkind: Kptfile\nmetadata:\n  name: pkg\n")
            .with_file("sub/Kptfile", "apiVersion: kpt.dev/v1\nkind: Kptfile\nmetadata:\n  name: sub\n")
            .with_file(
                "cm.yaml",
                "kind: ConfigMap\nmetadata:\n  name: app\n---\nkind: ConfigMap\nmetadata:\n  name: setters\n  annotations:\n    config.kubernetes.io/local-config: \"true\"\n",
            )
            .resources()
            .unwrap()
    }

    #[test]
    fn test_root_manifest() {
        let resources = resources();
        let manifest = root_manifest(&resources).unwrap();
        assert_eq!(manifest.name, "pkg");
        assert_eq!(manifest.filename, "Kptfile");
    }

    #[test]
    fn test_root_manifest_ignores_nested_packages() {
        let resources: Vec<_> = resources()
            .into_iter()
            .filter(|r| r.filename != "Kptfile")
            .collect();

        let err = root_manifest(&resources).unwrap_err();
        assert!(matches!(err, CoreError::ManifestNotFound { ref filename } if filename == "Kptfile"));
    }

    #[test]
    fn test_deployable_resources_skip_local_config() {
        let resources = resources();
        let deployable = deployable_resources(&resources, "ConfigMap");
        assert_eq!(deployable.len(), 1);
        assert_eq!(deployable[0].name, "app");

        assert!(deployable_resources(&resources, "Deployment").is_empty());
    }
}
