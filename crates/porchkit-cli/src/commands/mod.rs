//! CLI commands

use porchkit_core::PackageLayout;
use std::path::Path;

use crate::error::Result;

pub mod add;
pub mod diff;
pub mod manifest;
pub mod remove;
pub mod resources;

/// Layout from `--layout`, else the package's `.porchkit.yaml`, else defaults
pub fn resolve_layout(package: &Path, layout_file: Option<&Path>) -> Result<PackageLayout> {
    let layout = match layout_file {
        Some(path) => PackageLayout::load_from(path)?,
        None => PackageLayout::discover(package)?,
    };
    Ok(layout)
}
