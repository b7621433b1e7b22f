//! Package layout conventions
//!
//! Describes which files of a package carry resources, which file is the
//! package manifest and which annotations are tooling bookkeeping. Packages
//! may override the defaults with a `.porchkit.yaml` file.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::{CoreError, Result};

/// Name of the optional per-package layout file
pub const LAYOUT_FILENAME: &str = ".porchkit.yaml";

/// Package layout configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PackageLayout {
    /// File name of the package manifest
    #[serde(default = "default_manifest_filename")]
    pub manifest_filename: String,

    /// Extensions of resource-bearing files
    #[serde(default = "default_resource_extensions")]
    pub resource_extensions: Vec<String>,

    /// Annotation marking tooling-only resources
    #[serde(default = "default_local_config_annotation")]
    pub local_config_annotation: String,

    /// Annotation prefixes owned by the package store
    #[serde(default = "default_internal_annotation_prefixes")]
    pub internal_annotation_prefixes: Vec<String>,

    /// Individual annotations owned by the package store
    #[serde(default = "default_internal_annotations")]
    pub internal_annotations: Vec<String>,
}

fn default_manifest_filename() -> String {
    "Kptfile".to_string()
}

fn default_resource_extensions() -> Vec<String> {
    vec![".yaml".to_string()]
}

fn default_local_config_annotation() -> String {
    "config.kubernetes.io/local-config".to_string()
}

fn default_internal_annotation_prefixes() -> Vec<String> {
    vec![
        "internal.config.kubernetes.io/".to_string(),
        "internal.kpt.dev/".to_string(),
    ]
}

fn default_internal_annotations() -> Vec<String> {
    vec![
        "config.kubernetes.io/index".to_string(),
        "config.kubernetes.io/path".to_string(),
        "config.k8s.io/id".to_string(),
    ]
}

impl Default for PackageLayout {
    fn default() -> Self {
        Self {
            manifest_filename: default_manifest_filename(),
            resource_extensions: default_resource_extensions(),
            local_config_annotation: default_local_config_annotation(),
            internal_annotation_prefixes: default_internal_annotation_prefixes(),
            internal_annotations: default_internal_annotations(),
        }
    }
}

impl PackageLayout {
    /// Load a layout from a YAML file
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    /// Parse a layout from YAML text
    pub fn from_yaml(content: &str) -> Result<Self> {
        let layout: Self = serde_yaml::from_str(content)?;
        layout.validate()?;
        Ok(layout)
    }

    /// Load `.porchkit.yaml` from a package root, falling back to the defaults
    pub fn discover(package_root: &Path) -> Result<Self> {
        let path = package_root.join(LAYOUT_FILENAME);
        if path.is_file() {
            Self::load_from(&path)
        } else {
            Ok(Self::default())
        }
    }

    fn validate(&self) -> Result<()> {
        if self.manifest_filename.is_empty() || self.manifest_filename.contains('/') {
            return Err(CoreError::InvalidLayout {
                message: format!(
                    "manifestFilename must be a bare file name, got '{}'",
                    self.manifest_filename
                ),
            });
        }
        if let Some(ext) = self.resource_extensions.iter().find(|e| e.is_empty()) {
            return Err(CoreError::InvalidLayout {
                message: format!("resourceExtensions contains an empty entry '{ext}'"),
            });
        }
        Ok(())
    }

    /// Whether a map key names a resource-bearing file
    ///
    /// Matches files with a resource extension, the root manifest, and
    /// manifests of nested packages (`sub/Kptfile`).
    pub fn is_resource_file(&self, filename: &str) -> bool {
        self.resource_extensions
            .iter()
            .any(|ext| filename.ends_with(ext.as_str()))
            || self.is_manifest_file(filename)
    }

    /// Whether `filename` is a package manifest at any depth
    pub fn is_manifest_file(&self, filename: &str) -> bool {
        filename == self.manifest_filename
            || filename
                .strip_suffix(self.manifest_filename.as_str())
                .is_some_and(|dir| dir.ends_with('/'))
    }

    /// Whether an annotation key belongs to the store's bookkeeping
    pub fn is_internal_annotation(&self, key: &str) -> bool {
        self.internal_annotations.iter().any(|a| a == key)
            || self
                .internal_annotation_prefixes
                .iter()
                .any(|prefix| key.starts_with(prefix.as_str()))
    }
}
