//! Resources command - list the resources of a package

use console::style;
use porchkit_core::{PackageResource, query};
use std::path::Path;

use crate::error::Result;
use crate::exit_codes;
use crate::store;

/// Run the resources command
pub fn run(
    path: &Path,
    layout_file: Option<&Path>,
    kind: Option<&str>,
    deployable: bool,
    output_json: bool,
) -> Result<i32> {
    let layout = super::resolve_layout(path, layout_file)?;
    let map = store::load_package(path)?;
    let all = map.resources_with_layout(&layout)?;

    let resources: Vec<&PackageResource> = match (kind, deployable) {
        (Some(kind), true) => query::deployable_resources(&all, kind),
        (Some(kind), false) => all.iter().filter(|r| r.kind == kind).collect(),
        (None, true) => all.iter().filter(|r| !r.is_local_config_resource).collect(),
        (None, false) => all.iter().collect(),
    };

    if output_json {
        println!("{}", serde_json::to_string_pretty(&resources)?);
        return Ok(exit_codes::SUCCESS);
    }

    if resources.is_empty() {
        println!("No resources found in {}", path.display());
        return Ok(exit_codes::SUCCESS);
    }

    println!(
        "{:<45} {:<20} {:<25} {:<15} {}",
        style("ID").bold(),
        style("KIND").bold(),
        style("NAME").bold(),
        style("NAMESPACE").bold(),
        style("FILE").bold()
    );

    for resource in resources {
        let name = if resource.is_local_config_resource {
            style(resource.name.as_str()).dim()
        } else {
            style(resource.name.as_str())
        };

        println!(
            "{:<45} {:<20} {:<25} {:<15} {}",
            resource.id,
            resource.kind,
            name,
            resource.namespace.as_deref().unwrap_or("-"),
            resource.filename
        );
    }

    Ok(exit_codes::SUCCESS)
}
