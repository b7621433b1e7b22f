//! Add command - add resources to a package

use console::style;
use porchkit_core::{PackageResource, split_documents};
use std::path::Path;

use crate::error::Result;
use crate::exit_codes;
use crate::store;

/// Run the add command
pub fn run(
    path: &Path,
    layout_file: Option<&Path>,
    input: &Path,
    filename: Option<&str>,
    component: Option<&str>,
) -> Result<i32> {
    let layout = super::resolve_layout(path, layout_file)?;
    let before = store::load_package(path)?;

    let content = std::fs::read_to_string(input)?;
    let mut to_add = Vec::new();
    for document in split_documents(&content)? {
        let mut resource = PackageResource::draft(document)?;
        if let Some(component) = component {
            resource = resource.with_component(component);
        }
        if let Some(filename) = filename {
            resource = resource.with_filename(filename);
        }
        to_add.push(resource);
    }

    if to_add.is_empty() {
        println!("No documents found in {}", input.display());
        return Ok(exit_codes::SUCCESS);
    }

    let after = before.apply_batch_with_layout(&to_add, &[], &[], &layout)?;
    let summary = store::write_package(path, &before, &after)?;

    println!(
        "{} Added {} resource(s)",
        style("✓").green(),
        to_add.len()
    );
    for file in &summary.written {
        println!("  {} {}", style("wrote").dim(), file);
    }

    Ok(exit_codes::SUCCESS)
}
