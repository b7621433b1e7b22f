//! Diff engine for comparing two snapshots of a package
//!
//! Key features:
//! - Match resources across snapshots by id, not by position
//! - Ignore annotations the package store rewrites on every save
//! - Count added/removed lines of updated resources
//! - Render per-resource line diffs labelled with resource ids

use serde::{Deserialize, Serialize};
use similar::{ChangeTag, TextDiff};
use std::collections::{HashMap, HashSet};

use crate::error::{CoreError, Result};
use crate::layout::PackageLayout;
use crate::resource::PackageResource;

/// Diff engine for resource comparison
#[derive(Debug, Clone)]
pub struct DiffEngine {
    layout: PackageLayout,
}

impl DiffEngine {
    /// Create a new diff engine with the default layout
    pub fn new() -> Self {
        Self {
            layout: PackageLayout::default(),
        }
    }

    /// Use the internal annotations of `layout` during normalization
    pub fn with_layout(mut self, layout: PackageLayout) -> Self {
        self.layout = layout;
        self
    }

    /// Classify one resource across two snapshots
    pub fn diff_resource(
        &self,
        original: Option<&PackageResource>,
        current: Option<&PackageResource>,
    ) -> Result<PackageResourceDiff> {
        match (original, current) {
            (None, None) => Err(CoreError::InvalidComparison),
            (None, Some(current)) => Ok(PackageResourceDiff::Added {
                current_resource: current.clone(),
            }),
            (Some(original), None) => Ok(PackageResourceDiff::Removed {
                original_resource: original.clone(),
            }),
            (Some(original), Some(current)) => {
                let unchanged = || PackageResourceDiff::Unchanged {
                    original_resource: original.clone(),
                    current_resource: current.clone(),
                };

                if original.yaml == current.yaml {
                    return Ok(unchanged());
                }

                let old = self.normalize(original)?;
                let new = self.normalize(current)?;
                if old == new {
                    return Ok(unchanged());
                }

                let (lines_added, lines_removed) = count_changed_lines(&old, &new);
                if lines_added == 0 && lines_removed == 0 {
                    return Ok(unchanged());
                }

                Ok(PackageResourceDiff::Updated {
                    original_resource: original.clone(),
                    current_resource: current.clone(),
                    lines_added,
                    lines_removed,
                })
            }
        }
    }

    /// Compare two resource lists
    ///
    /// Yields one entry per current resource (in `current` order) followed by
    /// a removal for each original resource whose id no longer exists (in
    /// `original` order). A list repeating an id is rejected.
    pub fn diff_resources(
        &self,
        original: &[PackageResource],
        current: &[PackageResource],
    ) -> Result<Vec<PackageResourceDiff>> {
        let originals = index_by_id(original)?;
        let current_ids: HashSet<&str> = index_by_id(current)?.into_keys().collect();

        let mut diffs = Vec::with_capacity(current.len());

        for resource in current {
            let matched = originals.get(resource.id.as_str()).copied();
            diffs.push(self.diff_resource(matched, Some(resource))?);
        }

        for resource in original {
            if !current_ids.contains(resource.id.as_str()) {
                diffs.push(self.diff_resource(Some(resource), None)?);
            }
        }

        tracing::debug!(
            original = original.len(),
            current = current.len(),
            summary = %DiffSummary::from_diffs(&diffs),
            "compared resources"
        );

        Ok(diffs)
    }

    /// Canonical text of a resource with store bookkeeping removed
    pub fn normalize(&self, resource: &PackageResource) -> Result<String> {
        let mut value: serde_yaml::Value =
            serde_yaml::from_str(&resource.yaml).map_err(|e| {
                CoreError::malformed(&resource.filename, Some(resource.resource_index), e)
            })?;

        strip_internal_annotations(&mut value, &self.layout);

        Ok(serde_yaml::to_string(&value)?)
    }

    /// Line diff behind a classification, `None` for unchanged resources
    ///
    /// Updated resources are compared in normalized form, so the lines match
    /// what the classification was based on.
    pub fn text_diff(&self, diff: &PackageResourceDiff) -> Result<Option<ResourceTextDiff>> {
        let text_diff = match diff {
            PackageResourceDiff::Unchanged { .. } => return Ok(None),
            PackageResourceDiff::Added { current_resource } => {
                ResourceTextDiff::between(None, Some(current_resource), "", &current_resource.yaml)
            }
            PackageResourceDiff::Removed { original_resource } => {
                ResourceTextDiff::between(Some(original_resource), None, &original_resource.yaml, "")
            }
            PackageResourceDiff::Updated {
                original_resource,
                current_resource,
                ..
            } => ResourceTextDiff::between(
                Some(original_resource),
                Some(current_resource),
                &self.normalize(original_resource)?,
                &self.normalize(current_resource)?,
            ),
        };

        Ok(Some(text_diff))
    }

    /// Generate a human-readable summary
    pub fn summary(&self, diffs: &[PackageResourceDiff]) -> String {
        DiffSummary::from_diffs(diffs).to_string()
    }
}

impl Default for DiffEngine {
    fn default() -> Self {
        Self::new()
    }
}

fn index_by_id(resources: &[PackageResource]) -> Result<HashMap<&str, &PackageResource>> {
    let mut by_id = HashMap::with_capacity(resources.len());
    for resource in resources {
        if by_id.insert(resource.id.as_str(), resource).is_some() {
            return Err(CoreError::DuplicateResourceId {
                id: resource.id.clone(),
            });
        }
    }
    Ok(by_id)
}

fn strip_internal_annotations(value: &mut serde_yaml::Value, layout: &PackageLayout) {
    let Some(metadata) = value
        .get_mut("metadata")
        .and_then(serde_yaml::Value::as_mapping_mut)
    else {
        return;
    };

    let emptied = match metadata
        .get_mut("annotations")
        .and_then(serde_yaml::Value::as_mapping_mut)
    {
        Some(annotations) => {
            annotations.retain(|key, _| {
                !key.as_str()
                    .is_some_and(|key| layout.is_internal_annotation(key))
            });
            annotations.is_empty()
        }
        None => false,
    };

    if emptied {
        metadata.remove("annotations");
    }
}

fn count_changed_lines(old: &str, new: &str) -> (usize, usize) {
    TextDiff::from_lines(old, new)
        .iter_all_changes()
        .fold((0, 0), |(added, removed), change| match change.tag() {
            ChangeTag::Insert => (added + 1, removed),
            ChangeTag::Delete => (added, removed + 1),
            ChangeTag::Equal => (added, removed),
        })
}

/// Classification of one resource across two snapshots
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(
    tag = "diffStatus",
    rename_all = "lowercase",
    rename_all_fields = "camelCase"
)]
pub enum PackageResourceDiff {
    /// Only in the current snapshot
    Added { current_resource: PackageResource },

    /// Only in the original snapshot
    Removed { original_resource: PackageResource },

    /// In both, equal once bookkeeping annotations are ignored
    Unchanged {
        original_resource: PackageResource,
        current_resource: PackageResource,
    },

    /// In both, with real changes
    Updated {
        original_resource: PackageResource,
        current_resource: PackageResource,
        lines_added: usize,
        lines_removed: usize,
    },
}

impl PackageResourceDiff {
    pub fn status(&self) -> DiffStatus {
        match self {
            PackageResourceDiff::Added { .. } => DiffStatus::Added,
            PackageResourceDiff::Removed { .. } => DiffStatus::Removed,
            PackageResourceDiff::Unchanged { .. } => DiffStatus::Unchanged,
            PackageResourceDiff::Updated { .. } => DiffStatus::Updated,
        }
    }

    pub fn original(&self) -> Option<&PackageResource> {
        match self {
            PackageResourceDiff::Added { .. } => None,
            PackageResourceDiff::Removed { original_resource }
            | PackageResourceDiff::Unchanged {
                original_resource, ..
            }
            | PackageResourceDiff::Updated {
                original_resource, ..
            } => Some(original_resource),
        }
    }

    pub fn current(&self) -> Option<&PackageResource> {
        match self {
            PackageResourceDiff::Removed { .. } => None,
            PackageResourceDiff::Added { current_resource }
            | PackageResourceDiff::Unchanged {
                current_resource, ..
            }
            | PackageResourceDiff::Updated {
                current_resource, ..
            } => Some(current_resource),
        }
    }

    /// The resource this entry describes, preferring the current side
    pub fn resource(&self) -> &PackageResource {
        match self {
            PackageResourceDiff::Removed { original_resource } => original_resource,
            PackageResourceDiff::Added { current_resource }
            | PackageResourceDiff::Unchanged {
                current_resource, ..
            }
            | PackageResourceDiff::Updated {
                current_resource, ..
            } => current_resource,
        }
    }

    /// Added/removed line counts, only present for updates
    pub fn line_counts(&self) -> Option<(usize, usize)> {
        match self {
            PackageResourceDiff::Updated {
                lines_added,
                lines_removed,
                ..
            } => Some((*lines_added, *lines_removed)),
            _ => None,
        }
    }

    pub fn is_change(&self) -> bool {
        self.status() != DiffStatus::Unchanged
    }
}

/// Status of a resource diff
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DiffStatus {
    Added,
    Removed,
    Unchanged,
    Updated,
}

impl std::fmt::Display for DiffStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DiffStatus::Added => write!(f, "added"),
            DiffStatus::Removed => write!(f, "removed"),
            DiffStatus::Unchanged => write!(f, "unchanged"),
            DiffStatus::Updated => write!(f, "updated"),
        }
    }
}

/// Per-status counts of a diff
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiffSummary {
    pub added: usize,
    pub removed: usize,
    pub updated: usize,
    pub unchanged: usize,
}

impl DiffSummary {
    pub fn from_diffs(diffs: &[PackageResourceDiff]) -> Self {
        let mut summary = Self::default();
        for diff in diffs {
            match diff.status() {
                DiffStatus::Added => summary.added += 1,
                DiffStatus::Removed => summary.removed += 1,
                DiffStatus::Updated => summary.updated += 1,
                DiffStatus::Unchanged => summary.unchanged += 1,
            }
        }
        summary
    }

    /// Check if there are any changes
    pub fn has_changes(&self) -> bool {
        self.added + self.removed + self.updated > 0
    }
}

impl std::fmt::Display for DiffSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut parts = Vec::new();

        if self.added > 0 {
            parts.push(format!("{} added", self.added));
        }
        if self.updated > 0 {
            parts.push(format!("{} updated", self.updated));
        }
        if self.removed > 0 {
            parts.push(format!("{} removed", self.removed));
        }

        if parts.is_empty() {
            write!(f, "No changes")
        } else {
            write!(f, "{}", parts.join(", "))
        }
    }
}

/// Line diff of one resource, labelled with its id on each side
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceTextDiff {
    /// `None` for an added resource
    pub original_id: Option<String>,

    /// `None` for a removed resource
    pub current_id: Option<String>,

    pub lines: Vec<DiffLine>,
}

impl ResourceTextDiff {
    fn between(
        original: Option<&PackageResource>,
        current: Option<&PackageResource>,
        old: &str,
        new: &str,
    ) -> Self {
        let lines = TextDiff::from_lines(old, new)
            .iter_all_changes()
            .map(|change| DiffLine {
                change: match change.tag() {
                    ChangeTag::Insert => LineChange::Added,
                    ChangeTag::Delete => LineChange::Removed,
                    ChangeTag::Equal => LineChange::Unchanged,
                },
                text: change.value().trim_end_matches(['\n', '\r']).to_string(),
                original_line: change.old_index().map(|i| i + 1),
                current_line: change.new_index().map(|i| i + 1),
            })
            .collect();

        Self {
            original_id: original.map(|r| r.id.clone()),
            current_id: current.map(|r| r.id.clone()),
            lines,
        }
    }

    /// Render as a patch whose `---`/`+++` headers name the resource ids
    pub fn to_patch(&self) -> String {
        let label = |id: &Option<String>, side: &str| match id {
            Some(id) => format!("{side}/{id}"),
            None => "/dev/null".to_string(),
        };

        let mut output = format!(
            "--- {}\n+++ {}\n",
            label(&self.original_id, "a"),
            label(&self.current_id, "b")
        );
        for line in &self.lines {
            output.push(line.change.marker());
            output.push_str(&line.text);
            output.push('\n');
        }
        output
    }
}

/// One line of a [`ResourceTextDiff`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiffLine {
    pub change: LineChange,

    /// Line text without its terminator
    pub text: String,

    /// 1-based, `None` for an added line
    pub original_line: Option<usize>,

    /// 1-based, `None` for a removed line
    pub current_line: Option<usize>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LineChange {
    Added,
    Removed,
    Unchanged,
}

impl LineChange {
    /// Patch prefix of the line
    pub fn marker(self) -> char {
        match self {
            LineChange::Added => '+',
            LineChange::Removed => '-',
            LineChange::Unchanged => ' ',
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resource_map::ResourceMap;
    use pretty_assertions::assert_eq;

    fn resource(filename: &str, yaml: &str) -> PackageResource {
        PackageResource::decode(filename, 0, yaml, &PackageLayout::default()).unwrap()
    }

    fn statuses(diffs: &[PackageResourceDiff]) -> Vec<(String, DiffStatus)> {
        diffs
            .iter()
            .map(|d| (d.resource().id.clone(), d.status()))
            .collect()
    }

    const CM: &str = "apiVersion: v1\nkind: ConfigMap\nmetadata:\n  name: cm\ndata:\n  a: one\n";

    #[test]
    fn test_diff_both_missing_is_invalid() {
        let err = DiffEngine::new().diff_resource(None, None).unwrap_err();
        assert!(matches!(err, CoreError::InvalidComparison));
    }

    #[test]
    fn test_diff_added_and_removed() {
        let engine = DiffEngine::new();
        let cm = resource("cm.yaml", CM);

        let added = engine.diff_resource(None, Some(&cm)).unwrap();
        assert_eq!(added.status(), DiffStatus::Added);
        assert!(added.original().is_none());

        let removed = engine.diff_resource(Some(&cm), None).unwrap();
        assert_eq!(removed.status(), DiffStatus::Removed);
        assert!(removed.current().is_none());
        assert_eq!(removed.line_counts(), None);
    }

    #[test]
    fn test_diff_same_resource_is_unchanged() {
        let cm = resource("cm.yaml", CM);
        let diff = DiffEngine::new().diff_resource(Some(&cm), Some(&cm)).unwrap();
        assert_eq!(diff.status(), DiffStatus::Unchanged);
    }

    #[test]
    fn test_diff_updated_counts_lines() {
        let old = resource("cm.yaml", CM);
        let new = resource(
            "cm.yaml",
            "apiVersion: v1\nkind: ConfigMap\nmetadata:\n  name: cm\ndata:\n  a: two\n  b: three\n",
        );

        let diff = DiffEngine::new().diff_resource(Some(&old), Some(&new)).unwrap();
        assert_eq!(diff.status(), DiffStatus::Updated);
        assert_eq!(diff.line_counts(), Some((2, 1)));
    }

    #[test]
    fn test_diff_ignores_internal_annotation_rewrite() {
        let old = resource(
            "cm.yaml",
            "apiVersion: v1\nkind: ConfigMap\nmetadata:\n  name: cm\n  annotations:\n    internal.kpt.dev/upstream-identifier: a\n    config.kubernetes.io/index: '0'\n",
        );
        let new = resource(
            "cm.yaml",
            "apiVersion: v1\nkind: ConfigMap\nmetadata:\n  name: cm\n  annotations:\n    internal.kpt.dev/upstream-identifier: b\n",
        );

        let diff = DiffEngine::new().diff_resource(Some(&old), Some(&new)).unwrap();
        assert_eq!(diff.status(), DiffStatus::Unchanged);
        assert_eq!(diff.line_counts(), None);
    }

    #[test]
    fn test_diff_ignores_formatting_only_changes() {
        let old = resource("cm.yaml", CM);
        let new = resource(
            "cm.yaml",
            "# reformatted\napiVersion: v1\nkind: ConfigMap\nmetadata: {name: cm}\ndata:\n    a: \"one\"\n",
        );

        let diff = DiffEngine::new().diff_resource(Some(&old), Some(&new)).unwrap();
        assert_eq!(diff.status(), DiffStatus::Unchanged);
    }

    #[test]
    fn test_diff_keeps_user_annotations() {
        let old = resource("cm.yaml", CM);
        let new = resource(
            "cm.yaml",
            "apiVersion: v1\nkind: ConfigMap\nmetadata:\n  name: cm\n  annotations:\n    config.kubernetes.io/local-config: \"true\"\ndata:\n  a: one\n",
        );

        let diff = DiffEngine::new().diff_resource(Some(&old), Some(&new)).unwrap();
        assert_eq!(diff.status(), DiffStatus::Updated);
        assert_eq!(diff.line_counts(), Some((2, 0)));
    }

    #[test]
    fn test_diff_custom_layout_annotations() {
        let layout = PackageLayout {
            internal_annotation_prefixes: vec!["example.com/".to_string()],
            ..PackageLayout::default()
        };
        let engine = DiffEngine::new().with_layout(layout);

        let old = resource(
            "cm.yaml",
            "kind: ConfigMap\nmetadata:\n  name: cm\n  annotations:\n    example.com/rev: '1'\n",
        );
        let new = resource(
            "cm.yaml",
            "kind: ConfigMap\nmetadata:\n  name: cm\n  annotations:\n    example.com/rev: '2'\n",
        );

        let diff = engine.diff_resource(Some(&old), Some(&new)).unwrap();
        assert_eq!(diff.status(), DiffStatus::Unchanged);
    }

    #[test]
    fn test_diff_resources_reordered_match_by_id() {
        let a = resource("a.yaml", CM);
        let b = resource("b.yaml", "kind: Service\nmetadata:\n  name: svc\n");

        let diffs = DiffEngine::new()
            .diff_resources(&[a.clone(), b.clone()], &[b, a])
            .unwrap();

        assert_eq!(
            statuses(&diffs),
            vec![
                ("Service:b.yaml:0".to_string(), DiffStatus::Unchanged),
                ("ConfigMap:a.yaml:0".to_string(), DiffStatus::Unchanged),
            ]
        );
    }

    #[test]
    fn test_diff_resources_removed_file() {
        let original = ResourceMap::new()
            .with_file("svc.yaml", "apiVersion: v1\nkind: Service\nmetadata:\n  name: svc\n")
            .with_file("cm.yaml", CM);
        let current = ResourceMap::new().with_file("cm.yaml", CM);

        let diffs = DiffEngine::new()
            .diff_resources(&original.resources().unwrap(), &current.resources().unwrap())
            .unwrap();

        let summary = DiffSummary::from_diffs(&diffs);
        assert_eq!(
            summary,
            DiffSummary {
                added: 0,
                removed: 1,
                updated: 0,
                unchanged: 1,
            }
        );
        assert_eq!(diffs[1].resource().id, "Service:svc.yaml:0");
    }

    #[test]
    fn test_diff_resources_ordering() {
        let engine = DiffEngine::new();
        let original = ResourceMap::new()
            .with_file("gone.yaml", "kind: Secret\nmetadata:\n  name: s\n")
            .with_file("cm.yaml", CM)
            .resources()
            .unwrap();

        let edited = "apiVersion: v1\nkind: ConfigMap\nmetadata:\n  name: cm\ndata:\n  a: two\n";
        let current = ResourceMap::new()
            .with_file("new.yaml", "kind: Service\nmetadata:\n  name: svc\n")
            .with_file("cm.yaml", edited)
            .resources()
            .unwrap();

        let diffs = engine.diff_resources(&original, &current).unwrap();
        assert_eq!(
            statuses(&diffs),
            vec![
                ("Service:new.yaml:0".to_string(), DiffStatus::Added),
                ("ConfigMap:cm.yaml:0".to_string(), DiffStatus::Updated),
                ("Secret:gone.yaml:0".to_string(), DiffStatus::Removed),
            ]
        );
        assert_eq!(engine.summary(&diffs), "1 added, 1 updated, 1 removed");
    }

    #[test]
    fn test_diff_resources_rejects_duplicate_ids() {
        let a = resource("a.yaml", CM);
        let err = DiffEngine::new()
            .diff_resources(&[a.clone(), a.clone()], &[a])
            .unwrap_err();
        assert!(matches!(err, CoreError::DuplicateResourceId { ref id } if id == "ConfigMap:a.yaml:0"));
    }

    #[test]
    fn test_single_edit_keeps_id() {
        let map = ResourceMap::new().with_file("cm.yaml", CM);
        let before = map.resources().unwrap();
        let edited = map
            .update_resource(
                &before[0],
                "apiVersion: v1\nkind: ConfigMap\nmetadata:\n  name: cm\ndata:\n  a: changed\n",
            )
            .unwrap();
        let after = edited.resources().unwrap();

        let diffs = DiffEngine::new().diff_resources(&before, &after).unwrap();
        let changed: Vec<_> = diffs.iter().filter(|d| d.is_change()).collect();
        assert_eq!(changed.len(), 1);
        assert_eq!(changed[0].status(), DiffStatus::Updated);
        assert_eq!(changed[0].resource().id, before[0].id);
    }

    #[test]
    fn test_summary_no_changes() {
        assert_eq!(DiffEngine::new().summary(&[]), "No changes");
    }

    #[test]
    fn test_text_diff_updated() {
        let engine = DiffEngine::new();
        let old = resource("cm.yaml", CM);
        let new = resource(
            "cm.yaml",
            "apiVersion: v1\nkind: ConfigMap\nmetadata:\n  name: cm\ndata:\n  a: two\n",
        );

        let diff = engine.diff_resource(Some(&old), Some(&new)).unwrap();
        let text_diff = engine.text_diff(&diff).unwrap().unwrap();

        insta::assert_snapshot!(text_diff.to_patch(), @r"
        --- a/ConfigMap:cm.yaml:0
        +++ b/ConfigMap:cm.yaml:0
         apiVersion: v1
         kind: ConfigMap
         metadata:
           name: cm
         data:
        -  a: one
        +  a: two
        ");
    }

    #[test]
    fn test_text_diff_added_and_unchanged() {
        let engine = DiffEngine::new();
        let cm = resource("cm.yaml", CM);

        let added = engine.diff_resource(None, Some(&cm)).unwrap();
        let text_diff = engine.text_diff(&added).unwrap().unwrap();
        assert_eq!(text_diff.original_id, None);
        assert_eq!(text_diff.current_id.as_deref(), Some("ConfigMap:cm.yaml:0"));
        assert!(text_diff.lines.iter().all(|l| l.change == LineChange::Added));
        assert_eq!(text_diff.lines.len(), CM.lines().count());
        assert_eq!(text_diff.lines[0].current_line, Some(1));
        assert!(text_diff.to_patch().starts_with("--- /dev/null\n+++ b/ConfigMap:cm.yaml:0\n+apiVersion: v1\n"));

        let unchanged = engine.diff_resource(Some(&cm), Some(&cm)).unwrap();
        assert!(engine.text_diff(&unchanged).unwrap().is_none());
    }

    #[test]
    fn test_text_diff_removed_labels_original_id() {
        let engine = DiffEngine::new();
        let cm = resource("cm.yaml", CM);

        let removed = engine.diff_resource(Some(&cm), None).unwrap();
        let text_diff = engine.text_diff(&removed).unwrap().unwrap();
        assert_eq!(text_diff.current_id, None);
        assert!(text_diff.lines.iter().all(|l| l.change == LineChange::Removed && l.current_line.is_none()));
        assert!(text_diff.to_patch().starts_with("--- a/ConfigMap:cm.yaml:0\n+++ /dev/null\n-apiVersion: v1\n"));
    }

    #[test]
    fn test_diff_serializes_with_status_tag() {
        let cm = resource("cm.yaml", CM);
        let diff = PackageResourceDiff::Updated {
            original_resource: cm.clone(),
            current_resource: cm,
            lines_added: 1,
            lines_removed: 2,
        };

        let value = serde_yaml::to_value(&diff).unwrap();
        assert_eq!(value["diffStatus"], "updated");
        assert_eq!(value["linesAdded"], 1);
        assert_eq!(value["currentResource"]["resourceIndex"], 0);
    }
}
