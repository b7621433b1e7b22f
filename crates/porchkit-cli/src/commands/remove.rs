//! Remove command - remove resources from a package by id

use console::style;
use porchkit_core::PackageResource;
use std::path::Path;

use crate::error::{CliError, Result};
use crate::exit_codes;
use crate::store;

/// Run the remove command
pub fn run(path: &Path, layout_file: Option<&Path>, ids: &[String]) -> Result<i32> {
    let layout = super::resolve_layout(path, layout_file)?;
    let before = store::load_package(path)?;
    let resources = before.resources_with_layout(&layout)?;

    let to_remove = ids
        .iter()
        .map(|id| {
            resources
                .iter()
                .find(|r| &r.id == id)
                .cloned()
                .ok_or_else(|| {
                    CliError::package_with_help(
                        format!("resource '{id}' not found"),
                        "Run `porchkit resources` to list the current resource ids",
                    )
                })
        })
        .collect::<Result<Vec<PackageResource>>>()?;

    let after = before.apply_batch_with_layout(&[], &[], &to_remove, &layout)?;
    let summary = store::write_package(path, &before, &after)?;

    println!(
        "{} Removed {} resource(s)",
        style("✓").green(),
        to_remove.len()
    );
    for file in &summary.written {
        println!("  {} {}", style("rewrote").dim(), file);
    }
    for file in &summary.deleted {
        println!("  {} {}", style("deleted").dim(), file);
    }

    Ok(exit_codes::SUCCESS)
}
