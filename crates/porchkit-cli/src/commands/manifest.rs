//! Manifest command - print the package manifest

use porchkit_core::query;
use std::path::Path;

use crate::error::Result;
use crate::exit_codes;
use crate::store;

/// Run the manifest command
pub fn run(path: &Path, layout_file: Option<&Path>) -> Result<i32> {
    let layout = super::resolve_layout(path, layout_file)?;
    let map = store::load_package(path)?;
    let resources = map.resources_with_layout(&layout)?;

    let manifest = query::root_manifest_with_layout(&resources, &layout)?;
    print!("{}", manifest.yaml);

    Ok(exit_codes::SUCCESS)
}
