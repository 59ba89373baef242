//! Text and JSON renderings of the annotated tree.

use clap::ValueEnum;
use colored::Colorize;
use orgtree_core::{AnnotatedEntry, RecordStore, RelationshipType};
use orgtree_xref::ExternalLinks;
use serde::Serialize;
use std::io::{self, Write};

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NodeRef {
    pub id: String,
    pub name: String,
}

impl NodeRef {
    fn resolve(store: &RecordStore, id: String) -> Self {
        let name = store.name_of(&id).to_string();
        Self { id, name }
    }
}

/// One rendered node with its display names resolved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TreeLine {
    pub depth: usize,
    pub id: String,
    pub name: String,
    pub relationship_type: RelationshipType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub declared_parent: Option<NodeRef>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub alternate_parents: Vec<NodeRef>,
    #[serde(skip_serializing_if = "ExternalLinks::is_empty")]
    pub links: ExternalLinks,
}

impl TreeLine {
    pub fn new(annotated: AnnotatedEntry, store: &RecordStore, links: ExternalLinks) -> Self {
        let AnnotatedEntry {
            entry,
            declared_parent,
            alternate_parents,
        } = annotated;
        Self {
            depth: entry.depth,
            id: entry.node_id,
            name: entry.name,
            relationship_type: entry.relationship_type,
            declared_parent: declared_parent.map(|id| NodeRef::resolve(store, id)),
            alternate_parents: alternate_parents
                .into_iter()
                .map(|id| NodeRef::resolve(store, id))
                .collect(),
            links,
        }
    }
}

fn indent(level: usize) -> String {
    format!("{}-", "  ".repeat(level))
}

/// `  - Name :: Service Fils`, non-canonical types starred (and bold).
pub fn write_text_line<W: Write>(out: &mut W, line: &TreeLine) -> io::Result<()> {
    let ty = if line.relationship_type.is_canonical() {
        line.relationship_type.label().normal()
    } else {
        format!("**{}**", line.relationship_type).bold()
    };
    writeln!(out, "{} {} :: {}", indent(line.depth), line.name, ty)?;

    let nested = indent(line.depth + 1);
    if let Some(parent) = &line.declared_parent {
        writeln!(out, "{nested} PARENT: {}", parent.name)?;
    }
    for parent in &line.alternate_parents {
        writeln!(out, "{nested} ALT PARENT: {}", parent.name)?;
    }
    if let Some(link) = &line.links.primary_link {
        writeln!(out, "{nested} LINK: {link}")?;
    }
    if let Some(link) = &line.links.secondary_link {
        writeln!(out, "{nested} XREF: {link}")?;
    }
    Ok(())
}

pub fn write_json<W: Write>(out: &mut W, lines: &[TreeLine]) -> anyhow::Result<()> {
    serde_json::to_writer_pretty(&mut *out, lines)?;
    writeln!(out)?;
    Ok(())
}
