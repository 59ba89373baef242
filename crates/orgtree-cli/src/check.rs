//! `orgtree check`: forest check over the whole canonical graph.

use anyhow::{anyhow, Result};
use colored::Colorize;
use orgtree_core::{check_forest, HierarchyGraphs, RecordStore};
use std::path::Path;

use crate::run_config::RunConfig;

pub fn cmd_check(input: &Path, config: &RunConfig) -> Result<()> {
    let store = RecordStore::new(orgtree_ingest_json::load_records(input)?);
    let graphs = HierarchyGraphs::build(store.records());
    let report = check_forest(&graphs, &config.hierarchy);

    println!(
        "{} {} records, {} canonical edges, {} alternate edges",
        "Checked".green().bold(),
        store.len(),
        report.canonical_edges,
        report.alternate_edges
    );

    if store.is_empty() {
        println!("  {} no records found in {}", "warning:".yellow(), input.display());
    }

    for sentinel in [&config.hierarchy.government_root, &config.hierarchy.ministry_root] {
        if !store.contains(sentinel) {
            println!("  {} root sentinel `{sentinel}` is not in the export", "warning:".yellow());
        }
    }

    if report.is_ok() {
        println!("  {}", "canonical hierarchy is a forest".green());
        return Ok(());
    }

    for violation in &report.violations {
        println!("  {} {violation}", "error:".red().bold());
    }
    Err(anyhow!(
        "{} canonical hierarchy violation(s) in {}",
        report.violations.len(),
        input.display()
    ))
}
