//! Individually addressable package resources

use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;

use crate::error::{CoreError, Result};
use crate::layout::PackageLayout;

/// One document of a resource-bearing package file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PackageResource {
    /// `kind:filename:index`, the key used to match resources across snapshots
    pub id: String,

    /// Directory of the owning file, empty at the package root
    pub component: String,

    pub kind: String,

    /// `metadata.name`, empty for documents such as a `Kustomization` that carry none
    #[serde(default)]
    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub namespace: Option<String>,

    /// Text of this single document
    pub yaml: String,

    /// Owning file, empty for a resource not yet placed in the map
    pub filename: String,

    /// Zero-based position of the document within its file
    pub resource_index: usize,

    /// Tooling-only input, excluded from deployable output
    pub is_local_config_resource: bool,
}

impl PackageResource {
    /// Decode the document at `resource_index` of `filename`
    pub fn decode(
        filename: &str,
        resource_index: usize,
        yaml: impl Into<String>,
        layout: &PackageLayout,
    ) -> Result<Self> {
        let yaml = yaml.into();
        let identity = ResourceIdentity::decode(&yaml)
            .map_err(|e| CoreError::malformed(filename, Some(resource_index), e))?;

        tracing::trace!(filename, resource_index, kind = %identity.kind, "decoded resource");

        Ok(Self {
            id: resource_id(&identity.kind, filename, resource_index),
            component: component_of(filename).to_string(),
            is_local_config_resource: identity.is_local_config(&layout.local_config_annotation),
            kind: identity.kind,
            name: identity.metadata.name,
            namespace: identity.metadata.namespace,
            yaml,
            filename: filename.to_string(),
            resource_index,
        })
    }

    /// A resource that has not been placed in a file yet
    ///
    /// The map allocates a filename when the draft is added, using
    /// `component` (if set) as the target directory.
    pub fn draft(yaml: impl Into<String>) -> Result<Self> {
        Self::decode("", 0, yaml, &PackageLayout::default())
    }

    /// Target a directory of the package
    pub fn with_component(mut self, component: impl Into<String>) -> Self {
        self.component = component.into();
        self
    }

    /// Target an explicit file of the package
    pub fn with_filename(mut self, filename: impl Into<String>) -> Self {
        self.filename = filename.into();
        self.component = component_of(&self.filename).to_string();
        self.id = resource_id(&self.kind, &self.filename, self.resource_index);
        self
    }

    /// `namespace/kind/name` style label for display
    pub fn display_name(&self) -> String {
        if self.name.is_empty() {
            return self.kind.clone();
        }
        match &self.namespace {
            Some(ns) => format!("{}/{}/{}", ns, self.kind, self.name),
            None => format!("{}/{}", self.kind, self.name),
        }
    }
}

/// Build the identity string of a resource
pub fn resource_id(kind: &str, filename: &str, resource_index: usize) -> String {
    format!("{kind}:{filename}:{resource_index}")
}

/// Directory portion of a package filename
pub fn component_of(filename: &str) -> &str {
    filename.rfind('/').map_or("", |i| &filename[..i])
}

/// Identity fields read from a resource document
///
/// Only `kind` is required; it is part of the resource id.
#[derive(Debug, Clone, Deserialize)]
pub struct ResourceIdentity {
    #[serde(deserialize_with = "non_empty_kind")]
    pub kind: String,

    #[serde(default)]
    pub metadata: IdentityMetadata,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct IdentityMetadata {
    #[serde(default)]
    pub name: String,

    #[serde(default)]
    pub namespace: Option<String>,

    #[serde(default)]
    pub annotations: BTreeMap<String, serde_yaml::Value>,
}

fn non_empty_kind<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let kind = String::deserialize(deserializer)?;
    if kind.trim().is_empty() {
        return Err(serde::de::Error::custom("`kind` must not be empty"));
    }
    Ok(kind)
}

impl ResourceIdentity {
    /// Decode identity fields from a single YAML document
    pub fn decode(yaml: &str) -> std::result::Result<Self, serde_yaml::Error> {
        serde_yaml::from_str(yaml)
    }

    /// Whether `annotation` marks this resource as local configuration
    ///
    /// Any value other than `false`, empty or null counts as set.
    pub fn is_local_config(&self, annotation: &str) -> bool {
        match self.metadata.annotations.get(annotation) {
            None | Some(serde_yaml::Value::Null) => false,
            Some(serde_yaml::Value::Bool(b)) => *b,
            Some(serde_yaml::Value::String(s)) => {
                !(s.is_empty() || s.eq_ignore_ascii_case("false"))
            }
            Some(_) => true,
        }
    }
}
