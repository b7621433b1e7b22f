//! Directory-backed package store
//!
//! Loads every file under a package root into a [`ResourceMap`] keyed by its
//! `/`-separated relative path, and writes an edited map back.

use porchkit_core::{LAYOUT_FILENAME, ResourceMap};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use crate::error::{CliError, Result};

/// Files written and deleted by [`write_package`]
#[derive(Debug, Default)]
pub struct WriteSummary {
    pub written: Vec<String>,
    pub deleted: Vec<String>,
}

/// Read a package directory into a map
pub fn load_package(root: &Path) -> Result<ResourceMap> {
    if !root.is_dir() {
        return Err(CliError::package(format!(
            "package directory not found: {}",
            root.display()
        )));
    }

    let mut files = Vec::new();

    let walker = WalkDir::new(root)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|e| e.depth() == 0 || e.file_name() != ".git");

    for entry in walker {
        let entry = entry.map_err(|e| CliError::Io {
            message: e.to_string(),
        })?;
        if !entry.file_type().is_file() {
            continue;
        }

        let Some(key) = map_key(root, entry.path()) else {
            continue;
        };
        if key == LAYOUT_FILENAME {
            continue;
        }

        let bytes = std::fs::read(entry.path())?;
        match String::from_utf8(bytes) {
            Ok(contents) => files.push((key, contents)),
            Err(_) => tracing::warn!(file = %key, "skipping non UTF-8 file"),
        }
    }

    tracing::debug!(root = %root.display(), files = files.len(), "loaded package");
    Ok(files.into_iter().collect())
}

/// Write `after` to `root`, touching only files that differ from `before`
pub fn write_package(root: &Path, before: &ResourceMap, after: &ResourceMap) -> Result<WriteSummary> {
    let mut summary = WriteSummary::default();

    for (filename, contents) in after.iter() {
        if before.get(filename) == Some(contents) {
            continue;
        }
        let path = file_path(root, filename);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&path, contents)?;
        summary.written.push(filename.to_string());
    }

    for filename in before.filenames() {
        if !after.contains(filename) {
            std::fs::remove_file(file_path(root, filename))?;
            summary.deleted.push(filename.to_string());
        }
    }

    tracing::debug!(
        written = summary.written.len(),
        deleted = summary.deleted.len(),
        "wrote package"
    );
    Ok(summary)
}

fn map_key(root: &Path, path: &Path) -> Option<String> {
    let relative = path.strip_prefix(root).ok()?;
    let parts = relative
        .components()
        .map(|c| c.as_os_str().to_str())
        .collect::<Option<Vec<&str>>>()?;
    Some(parts.join("/"))
}

fn file_path(root: &Path, filename: &str) -> PathBuf {
    filename.split('/').fold(root.to_path_buf(), |path, part| path.join(part))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_load_package_keys() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("Kptfile"), "kind: Kptfile\n").unwrap();
        fs::create_dir_all(dir.path().join("app/nested")).unwrap();
        fs::write(dir.path().join("app/nested/cm.yaml"), "kind: ConfigMap\n").unwrap();
        fs::write(dir.path().join(LAYOUT_FILENAME), "{}\n").unwrap();
        fs::create_dir_all(dir.path().join(".git")).unwrap();
        fs::write(dir.path().join(".git/HEAD"), "ref\n").unwrap();

        let map = load_package(dir.path()).unwrap();
        let keys: Vec<_> = map.filenames().collect();
        assert_eq!(keys, vec!["Kptfile", "app/nested/cm.yaml"]);
        assert_eq!(map.get("app/nested/cm.yaml"), Some("kind: ConfigMap\n"));
    }

    #[test]
    fn test_load_missing_directory() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_package(&dir.path().join("nope")).unwrap_err();
        assert!(matches!(err, CliError::Package { .. }));
    }

    #[test]
    fn test_write_package_diffs_files() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("keep.yaml"), "a\n").unwrap();
        fs::write(dir.path().join("drop.yaml"), "b\n").unwrap();

        let before = load_package(dir.path()).unwrap();
        let after = ResourceMap::new()
            .with_file("keep.yaml", "a\n")
            .with_file("sub/new.yaml", "c\n");

        let summary = write_package(dir.path(), &before, &after).unwrap();
        assert_eq!(summary.written, vec!["sub/new.yaml"]);
        assert_eq!(summary.deleted, vec!["drop.yaml"]);
        assert!(!dir.path().join("drop.yaml").exists());
        assert_eq!(fs::read_to_string(dir.path().join("sub/new.yaml")).unwrap(), "c\n");
    }
}
