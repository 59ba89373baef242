//! `orgtree tree`: load → graphs → walk → annotate → links → render.

use anyhow::{anyhow, Result};
use orgtree_core::{Annotator, HierarchyGraphs, HierarchyWalker, RecordStore};
use orgtree_xref::{ExternalLinks, HttpSparqlEndpoint, ReferenceResolver, SparqlEndpoint};
use std::io::{self, BufWriter, Write};
use std::path::Path;

use crate::render::{write_json, write_text_line, OutputFormat, TreeLine};
use crate::run_config::RunConfig;

pub fn cmd_tree(input: &Path, root: Option<&str>, format: OutputFormat, config: &RunConfig) -> Result<()> {
    let records = orgtree_ingest_json::load_records(input)?;
    let store = RecordStore::new(records);

    let links = if config.xref.enabled {
        let endpoint = HttpSparqlEndpoint::new(&config.xref)?;
        Some(ReferenceResolver::new(endpoint, config.xref.clone())?)
    } else {
        None
    };

    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    render_tree(&store, root, format, config, links.as_ref(), &mut out)?;
    out.flush()?;
    Ok(())
}

/// Render the tree under `root` (default: the ministry sentinel) into `out`.
///
/// External links are resolved per emitted line, right before it is written.
pub fn render_tree<E: SparqlEndpoint, W: Write>(
    store: &RecordStore,
    root: Option<&str>,
    format: OutputFormat,
    config: &RunConfig,
    links: Option<&ReferenceResolver<E>>,
    out: &mut W,
) -> Result<()> {
    let root = root.unwrap_or(&config.hierarchy.ministry_root);
    let graphs = HierarchyGraphs::build(store.records());
    let entries = HierarchyWalker::new(store).walk_from(root)?;
    tracing::info!(root = %root, entries = entries.len(), "resolved hierarchy");

    let annotator = Annotator::new(&graphs, &config.hierarchy);
    let mut json_lines = Vec::new();

    for entry in entries {
        let annotated = annotator.annotate(entry)?;
        let node_links = match links {
            Some(resolver) => {
                let code = store
                    .get(&annotated.entry.node_id)
                    .and_then(|r| r.external_code.as_deref());
                resolver.resolve_links(code).map_err(|e| {
                    anyhow!("while resolving links for `{}`: {e}", annotated.entry.node_id)
                })?
            }
            None => ExternalLinks::default(),
        };
        let line = TreeLine::new(annotated, store, node_links);

        match format {
            OutputFormat::Text => write_text_line(out, &line)?,
            OutputFormat::Json => json_lines.push(line),
        }
    }

    if format == OutputFormat::Json {
        write_json(out, &json_lines)?;
    }
    Ok(())
}
