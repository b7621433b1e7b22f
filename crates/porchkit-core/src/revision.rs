//! Package revisions as exposed by the package store
//!
//! Typed records for the store's `PackageRevision` and
//! `PackageRevisionResources` objects, plus the small helpers editors use to
//! create, label and order them.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::BTreeMap;

use crate::resource_map::ResourceMap;

/// API version of the package store objects
pub const PORCH_API_VERSION: &str = "porch.kpt.dev/v1alpha1";

/// Label set on the newest published revision of a package
pub const LATEST_REVISION_LABEL: &str = "kpt.dev/latest-revision";

/// Revision lifecycle
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum PackageRevisionLifecycle {
    #[default]
    Draft,
    Proposed,
    Published,
    DeletionProposed,
}

impl std::fmt::Display for PackageRevisionLifecycle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PackageRevisionLifecycle::Draft => write!(f, "Draft"),
            PackageRevisionLifecycle::Proposed => write!(f, "Proposed"),
            PackageRevisionLifecycle::Published => write!(f, "Published"),
            PackageRevisionLifecycle::DeletionProposed => write!(f, "DeletionProposed"),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ObjectMetadata {
    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub namespace: Option<String>,

    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub labels: BTreeMap<String, String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resource_version: Option<String>,
}

/// A versioned package in a repository
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PackageRevision {
    pub api_version: String,
    pub kind: String,
    pub metadata: ObjectMetadata,
    pub spec: PackageRevisionSpec,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PackageRevisionSpec {
    pub package_name: String,
    pub revision: String,
    pub repository: String,

    #[serde(default)]
    pub lifecycle: PackageRevisionLifecycle,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tasks: Vec<PackageRevisionTask>,
}

/// Task the store runs to seed a new revision
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum PackageRevisionTask {
    Init { init: InitTask },
    Clone { clone: CloneTask },
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InitTask {
    pub description: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub keywords: Option<Vec<String>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub site: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CloneTask {
    pub upstream_ref: UpstreamRef,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpstreamRef {
    pub upstream_ref: NamedRef,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NamedRef {
    pub name: String,
}

impl PackageRevision {
    /// A revision to be created by the store
    ///
    /// The store assigns the name, so it is left empty.
    pub fn new(
        repository: impl Into<String>,
        package_name: impl Into<String>,
        revision: impl Into<String>,
        lifecycle: PackageRevisionLifecycle,
        tasks: Vec<PackageRevisionTask>,
    ) -> Self {
        Self {
            api_version: PORCH_API_VERSION.to_string(),
            kind: "PackageRevision".to_string(),
            metadata: ObjectMetadata {
                namespace: Some("default".to_string()),
                ..ObjectMetadata::default()
            },
            spec: PackageRevisionSpec {
                package_name: package_name.into(),
                revision: revision.into(),
                repository: repository.into(),
                lifecycle,
                tasks,
            },
        }
    }

    /// `"<package> <revision>"`
    pub fn title(&self) -> String {
        format!("{} {}", self.spec.package_name, self.spec.revision)
    }

    pub fn is_published(&self) -> bool {
        self.spec.lifecycle == PackageRevisionLifecycle::Published
    }

    /// Any lifecycle other than `Published`, including `DeletionProposed`
    pub fn is_not_published(&self) -> bool {
        !self.is_published()
    }

    /// Published and labelled as the package's latest revision
    pub fn is_latest_published(&self) -> bool {
        self.is_published()
            && self
                .metadata
                .labels
                .get(LATEST_REVISION_LABEL)
                .is_some_and(|v| !v.is_empty())
    }

    /// Only the latest published revision may be cloned or deployed
    pub fn can_clone_or_deploy(&self) -> bool {
        self.is_latest_published()
    }
}

/// Build an init task
///
/// `keywords` is a comma separated list; blank keywords and an empty site
/// are omitted.
pub fn init_task(description: &str, keywords: &str, site: &str) -> PackageRevisionTask {
    let keywords: Vec<String> = keywords
        .split(',')
        .map(str::trim)
        .filter(|k| !k.is_empty())
        .map(String::from)
        .collect();

    PackageRevisionTask::Init {
        init: InitTask {
            description: description.to_string(),
            keywords: (!keywords.is_empty()).then_some(keywords),
            site: (!site.is_empty()).then(|| site.to_string()),
        },
    }
}

/// Build a clone task for an upstream revision name
pub fn clone_task(full_package_name: &str) -> PackageRevisionTask {
    PackageRevisionTask::Clone {
        clone: CloneTask {
            upstream_ref: UpstreamRef {
                upstream_ref: NamedRef {
                    name: full_package_name.to_string(),
                },
            },
        },
    }
}

/// Order by package name, newest revision first within a package
pub fn compare_by_package_name_and_revision(a: &PackageRevision, b: &PackageRevision) -> Ordering {
    a.spec
        .package_name
        .cmp(&b.spec.package_name)
        .then_with(|| b.spec.revision.cmp(&a.spec.revision))
}

/// The file contents of one package revision, as submitted to the store
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PackageRevisionResources {
    pub api_version: String,
    pub kind: String,
    pub metadata: ObjectMetadata,
    pub spec: PackageRevisionResourcesSpec,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PackageRevisionResourcesSpec {
    pub resources: ResourceMap,
}

impl PackageRevisionResources {
    pub fn new(
        full_package_name: impl Into<String>,
        resources: ResourceMap,
        resource_version: impl Into<String>,
    ) -> Self {
        Self {
            api_version: PORCH_API_VERSION.to_string(),
            kind: "PackageRevisionResources".to_string(),
            metadata: ObjectMetadata {
                name: full_package_name.into(),
                resource_version: Some(resource_version.into()),
                ..ObjectMetadata::default()
            },
            spec: PackageRevisionResourcesSpec { resources },
        }
    }
}

/// Find the resources object of a named package revision
pub fn find_package_revision_resources<'a>(
    all: &'a [PackageRevisionResources],
    name: &str,
) -> Option<&'a PackageRevisionResources> {
    all.iter().find(|r| r.metadata.name == name)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn revision(package: &str, rev: &str) -> PackageRevision {
        PackageRevision::new("blueprints", package, rev, PackageRevisionLifecycle::Draft, vec![])
    }

    #[test]
    fn test_new_revision_defaults() {
        let rev = revision("nginx", "v1");
        assert_eq!(rev.api_version, PORCH_API_VERSION);
        assert_eq!(rev.metadata.name, "");
        assert_eq!(rev.metadata.namespace.as_deref(), Some("default"));
        assert_eq!(rev.title(), "nginx v1");
    }

    #[test]
    fn test_latest_published() {
        let mut rev = revision("nginx", "v3");
        rev.spec.lifecycle = PackageRevisionLifecycle::Published;
        assert!(!rev.is_latest_published());

        rev.metadata
            .labels
            .insert(LATEST_REVISION_LABEL.to_string(), "true".to_string());
        assert!(rev.is_latest_published());
        assert!(rev.can_clone_or_deploy());

        rev.spec.lifecycle = PackageRevisionLifecycle::Proposed;
        assert!(!rev.can_clone_or_deploy());
        assert!(!rev.is_published());
    }

    #[test]
    fn test_not_published_lifecycles() {
        let mut rev = revision("nginx", "v1");
        for lifecycle in [
            PackageRevisionLifecycle::Draft,
            PackageRevisionLifecycle::Proposed,
            PackageRevisionLifecycle::DeletionProposed,
        ] {
            rev.spec.lifecycle = lifecycle;
            assert!(rev.is_not_published(), "{lifecycle}");
        }

        rev.spec.lifecycle = PackageRevisionLifecycle::Published;
        assert!(!rev.is_not_published());
    }

    #[test]
    fn test_init_task() {
        let task = init_task("my package", " web, ,frontend ", "");
        assert_eq!(
            task,
            PackageRevisionTask::Init {
                init: InitTask {
                    description: "my package".to_string(),
                    keywords: Some(vec!["web".to_string(), "frontend".to_string()]),
                    site: None,
                },
            }
        );

        let PackageRevisionTask::Init { init } = init_task("", "", "https://example.com") else {
            panic!("expected init task");
        };
        assert_eq!(init.keywords, None);
        assert_eq!(init.site.as_deref(), Some("https://example.com"));
    }

    #[test]
    fn test_task_wire_shape() {
        let value = serde_yaml::to_value(clone_task("blueprints-abc123")).unwrap();
        assert_eq!(value["type"], "clone");
        assert_eq!(
            value["clone"]["upstreamRef"]["upstreamRef"]["name"],
            "blueprints-abc123"
        );
    }

    #[test]
    fn test_sort_by_package_and_revision() {
        let mut revisions = vec![
            revision("b", "v1"),
            revision("a", "v1"),
            revision("b", "v2"),
            revision("a", "v3"),
        ];
        revisions.sort_by(compare_by_package_name_and_revision);

        let titles: Vec<_> = revisions.iter().map(PackageRevision::title).collect();
        assert_eq!(titles, vec!["a v3", "a v1", "b v2", "b v1"]);
    }

    #[test]
    fn test_package_revision_resources() {
        let map = ResourceMap::new().with_file("Kptfile", "kind: Kptfile\nmetadata:\n  name: p\n");
        let all = vec![
            PackageRevisionResources::new("repo-one", ResourceMap::new(), "1"),
            PackageRevisionResources::new("repo-two", map.clone(), "42"),
        ];

        let found = find_package_revision_resources(&all, "repo-two").unwrap();
        assert_eq!(found.spec.resources, map);
        assert_eq!(found.metadata.resource_version.as_deref(), Some("42"));
        assert_eq!(found.kind, "PackageRevisionResources");
        assert!(find_package_revision_resources(&all, "missing").is_none());

        let value = serde_yaml::to_value(found).unwrap();
        assert_eq!(value["metadata"]["resourceVersion"], "42");
        assert_eq!(value["spec"]["resources"]["Kptfile"], "kind: Kptfile\nmetadata:\n  name: p\n");
    }
}
