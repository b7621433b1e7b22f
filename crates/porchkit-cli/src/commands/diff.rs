//! Diff command - compare two snapshots of a package

use console::style;
use porchkit_core::{DiffEngine, DiffStatus, DiffSummary, LineChange, PackageResourceDiff};
use serde::Serialize;
use std::path::Path;

use crate::error::Result;
use crate::exit_codes;
use crate::store;

#[derive(Serialize)]
struct DiffReport<'a> {
    summary: DiffSummary,
    diffs: &'a [PackageResourceDiff],
}

/// Run the diff command
pub fn run(
    original: &Path,
    current: &Path,
    layout_file: Option<&Path>,
    output_json: bool,
    show_diff: bool,
    exit_code: bool,
) -> Result<i32> {
    let layout = super::resolve_layout(current, layout_file)?;

    let original_resources = store::load_package(original)?.resources_with_layout(&layout)?;
    let current_resources = store::load_package(current)?.resources_with_layout(&layout)?;

    let engine = DiffEngine::new().with_layout(layout);
    let diffs = engine.diff_resources(&original_resources, &current_resources)?;
    let summary = DiffSummary::from_diffs(&diffs);

    if output_json {
        let report = DiffReport {
            summary,
            diffs: &diffs,
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        for diff in diffs.iter().filter(|d| d.is_change()) {
            print_diff(&engine, diff, show_diff)?;
        }
        if summary.has_changes() {
            println!();
        }
        println!("{}", style(summary.to_string()).bold());
    }

    if exit_code && summary.has_changes() {
        Ok(exit_codes::CHANGES_DETECTED)
    } else {
        Ok(exit_codes::SUCCESS)
    }
}

fn print_diff(engine: &DiffEngine, diff: &PackageResourceDiff, show_diff: bool) -> Result<()> {
    let resource = diff.resource();
    let marker = match diff.status() {
        DiffStatus::Added => style("+").green(),
        DiffStatus::Removed => style("-").red(),
        DiffStatus::Updated => style("~").yellow(),
        DiffStatus::Unchanged => style(" ").dim(),
    };

    let counts = diff
        .line_counts()
        .map(|(added, removed)| format!(" (+{added} -{removed})"))
        .unwrap_or_default();

    println!(
        "{} {} {}{}",
        marker,
        style(&resource.id).bold(),
        style(resource.display_name()).dim(),
        counts
    );

    if show_diff {
        if let Some(text_diff) = engine.text_diff(diff)? {
            for line in &text_diff.lines {
                let text = format!("{}{}", line.change.marker(), line.text);
                let text = match line.change {
                    LineChange::Added => style(text).green(),
                    LineChange::Removed => style(text).red(),
                    LineChange::Unchanged => style(text).dim(),
                };
                println!("    {}", text);
            }
        }
    }

    Ok(())
}
