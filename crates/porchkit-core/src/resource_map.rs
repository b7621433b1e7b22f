//! Package resource map
//!
//! A [`ResourceMap`] is one snapshot of a package: an ordered mapping from
//! filename to file contents. Resource-bearing files are decomposed into
//! [`PackageResource`]s on demand; the map itself stays the source of truth.
//!
//! Every edit returns a new map and leaves `self` untouched. File contents are
//! reference counted, so snapshots share every file an edit did not touch.

use heck::ToKebabCase;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::sync::Arc;

use crate::codec::{join_documents, split_file};
use crate::error::{CoreError, Result};
use crate::layout::PackageLayout;
use crate::resource::PackageResource;

/// Filename to file contents for one package snapshot
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ResourceMap {
    files: IndexMap<String, Arc<str>>,
}

impl ResourceMap {
    /// Create an empty map
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace a file, builder style
    pub fn with_file(mut self, filename: impl Into<String>, contents: impl Into<Arc<str>>) -> Self {
        self.files.insert(filename.into(), contents.into());
        self
    }

    /// Contents of a file
    pub fn get(&self, filename: &str) -> Option<&str> {
        self.files.get(filename).map(|c| &**c)
    }

    pub fn contains(&self, filename: &str) -> bool {
        self.files.contains_key(filename)
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    /// Filenames in map order
    pub fn filenames(&self) -> impl Iterator<Item = &str> {
        self.files.keys().map(String::as_str)
    }

    /// Files and their contents in map order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.files.iter().map(|(k, v)| (k.as_str(), &**v))
    }

    /// Whether two maps hold the same allocation for `filename`
    pub fn shares_file(&self, other: &ResourceMap, filename: &str) -> bool {
        match (self.files.get(filename), other.files.get(filename)) {
            (Some(a), Some(b)) => Arc::ptr_eq(a, b),
            _ => false,
        }
    }

    /// The documents of one file, empty when the file is absent
    pub fn documents(&self, filename: &str) -> Result<Vec<String>> {
        match self.files.get(filename) {
            Some(contents) => split_file(filename, contents),
            None => Ok(Vec::new()),
        }
    }

    /// Derive the flat resource list using the default layout
    pub fn resources(&self) -> Result<Vec<PackageResource>> {
        self.resources_with_layout(&PackageLayout::default())
    }

    /// Derive the flat resource list
    ///
    /// Files the layout does not recognise are opaque payload and skipped.
    pub fn resources_with_layout(&self, layout: &PackageLayout) -> Result<Vec<PackageResource>> {
        let mut resources = Vec::new();

        for (filename, contents) in &self.files {
            if !layout.is_resource_file(filename) {
                continue;
            }

            for (index, doc) in split_file(filename, contents)?.into_iter().enumerate() {
                resources.push(PackageResource::decode(filename, index, doc, layout)?);
            }
        }

        Ok(resources)
    }

    /// Append a resource, using the default layout
    pub fn add_resource(&self, resource: &PackageResource) -> Result<ResourceMap> {
        self.add_resource_with_layout(resource, &PackageLayout::default())
    }

    /// Append a resource as the last document of its file
    ///
    /// A resource without a filename gets a fresh one from
    /// [`allocate_filename`](Self::allocate_filename).
    pub fn add_resource_with_layout(
        &self,
        resource: &PackageResource,
        layout: &PackageLayout,
    ) -> Result<ResourceMap> {
        let filename = if resource.filename.is_empty() {
            self.allocate_filename(&resource.kind, &resource.component)
        } else {
            resource.filename.clone()
        };

        let mut documents = self.documents(&filename)?;
        let document = single_document(&filename, documents.len(), &resource.yaml, layout)?;
        documents.push(document);

        tracing::debug!(
            filename = %filename,
            resource_index = documents.len() - 1,
            kind = %resource.kind,
            "adding resource"
        );

        Ok(self.with_documents(filename, &documents))
    }

    /// Replace a document, using the default layout
    pub fn update_resource(
        &self,
        original: &PackageResource,
        updated_yaml: &str,
    ) -> Result<ResourceMap> {
        self.update_resource_with_layout(original, updated_yaml, &PackageLayout::default())
    }

    /// Replace the document `original` was derived from
    ///
    /// The number of documents in the file and every other position stay
    /// the same.
    pub fn update_resource_with_layout(
        &self,
        original: &PackageResource,
        updated_yaml: &str,
        layout: &PackageLayout,
    ) -> Result<ResourceMap> {
        let filename = &original.filename;
        let index = original.resource_index;

        let mut documents = self.documents(filename)?;
        let slot = documents
            .get_mut(index)
            .ok_or_else(|| CoreError::ResourceNotFound {
                filename: filename.clone(),
                index,
            })?;
        *slot = single_document(filename, index, updated_yaml, layout)?;

        tracing::debug!(filename = %filename, resource_index = index, "updating resource");

        Ok(self.with_documents(filename.clone(), &documents))
    }

    /// Remove the document `resource` was derived from
    ///
    /// Later documents of the same file move down by one position, so
    /// resources derived before the removal must not be reused for that file.
    /// A file left without documents is dropped from the map.
    pub fn remove_resource(&self, resource: &PackageResource) -> Result<ResourceMap> {
        let filename = &resource.filename;
        let index = resource.resource_index;

        let mut documents = self.documents(filename)?;
        if index >= documents.len() {
            return Err(CoreError::ResourceNotFound {
                filename: filename.clone(),
                index,
            });
        }
        documents.remove(index);

        tracing::debug!(
            filename = %filename,
            resource_index = index,
            remaining = documents.len(),
            "removing resource"
        );

        Ok(self.with_documents(filename.clone(), &documents))
    }

    /// Apply a batch of edits, using the default layout
    pub fn apply_batch(
        &self,
        to_add: &[PackageResource],
        to_update: &[PackageResource],
        to_remove: &[PackageResource],
    ) -> Result<ResourceMap> {
        self.apply_batch_with_layout(to_add, to_update, to_remove, &PackageLayout::default())
    }

    /// Apply additions, then updates, then removals
    ///
    /// Updates carry their new text in `yaml` and address documents by their
    /// pre-batch `filename`/`resource_index`. Removals also use pre-batch
    /// positions: within a file they are applied from the highest index down
    /// so earlier removals never shift a later target. The batch fails as a
    /// whole; `self` is never partially edited.
    pub fn apply_batch_with_layout(
        &self,
        to_add: &[PackageResource],
        to_update: &[PackageResource],
        to_remove: &[PackageResource],
        layout: &PackageLayout,
    ) -> Result<ResourceMap> {
        let mut map = self.clone();

        for resource in to_add {
            map = map.add_resource_with_layout(resource, layout)?;
        }

        for resource in to_update {
            map = map.update_resource_with_layout(resource, &resource.yaml, layout)?;
        }

        let mut seen = HashSet::new();
        for resource in to_remove {
            if !seen.insert((resource.filename.as_str(), resource.resource_index)) {
                return Err(CoreError::DuplicateResourceId {
                    id: resource.id.clone(),
                });
            }
        }

        let mut removals: Vec<&PackageResource> = to_remove.iter().collect();
        removals.sort_by(|a, b| b.resource_index.cmp(&a.resource_index));
        for resource in removals {
            map = map.remove_resource(resource)?;
        }

        Ok(map)
    }

    /// Pick an unused filename for a new resource of `kind`
    ///
    /// `ConfigMap` maps to `config-map.yaml`, then `config-map.1.yaml`,
    /// `config-map.2.yaml` and so on until a name is free. A non-empty
    /// `component` is used as the directory.
    pub fn allocate_filename(&self, kind: &str, component: &str) -> String {
        let base = kind.to_kebab_case();
        let component = component.trim_end_matches('/');

        (0..)
            .map(|i| {
                let name = if i == 0 {
                    format!("{base}.yaml")
                } else {
                    format!("{base}.{i}.yaml")
                };
                if component.is_empty() {
                    name
                } else {
                    format!("{component}/{name}")
                }
            })
            .find(|candidate| !self.files.contains_key(candidate))
            .unwrap_or_default()
    }

    fn with_documents(&self, filename: String, documents: &[String]) -> ResourceMap {
        let mut map = self.clone();
        if documents.is_empty() {
            map.files.shift_remove(&filename);
        } else {
            map.files.insert(filename, join_documents(documents).into());
        }
        map
    }
}

impl<K, V> FromIterator<(K, V)> for ResourceMap
where
    K: Into<String>,
    V: Into<Arc<str>>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            files: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

/// Check that `yaml` holds exactly one decodable resource document
fn single_document(
    filename: &str,
    index: usize,
    yaml: &str,
    layout: &PackageLayout,
) -> Result<String> {
    let mut documents = split_file(filename, yaml)?;
    if documents.len() != 1 {
        return Err(CoreError::malformed(
            filename,
            Some(index),
            format!("expected exactly one document, found {}", documents.len()),
        ));
    }
    let document = documents.remove(0);
    PackageResource::decode(filename, index, document.as_str(), layout)?;
    Ok(document)
}
