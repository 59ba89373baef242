//! Cross-hierarchy context for walk output.
//!
//! - non-canonical entries get the canonical top-level ancestor of their node
//!   ("declared parent"),
//! - depth-0 entries get the reprojected alternate parents of their node.

use serde::Serialize;

use crate::ancestry::{AlternateResolver, AncestorResolver};
use crate::config::HierarchyConfig;
use crate::error::Result;
use crate::graph::HierarchyGraphs;
use crate::walker::HierarchyEntry;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AnnotatedEntry {
    #[serde(flatten)]
    pub entry: HierarchyEntry,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub declared_parent: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub alternate_parents: Vec<String>,
}

pub struct Annotator<'a> {
    ancestors: AncestorResolver<'a>,
    alternates: AlternateResolver<'a>,
}

impl<'a> Annotator<'a> {
    pub fn new(graphs: &'a HierarchyGraphs, config: &'a HierarchyConfig) -> Self {
        Self {
            ancestors: AncestorResolver::new(&graphs.canonical, config),
            alternates: AlternateResolver::new(&graphs.alternate, &graphs.canonical, config),
        }
    }

    pub fn annotate(&self, entry: HierarchyEntry) -> Result<AnnotatedEntry> {
        let declared_parent = if entry.is_canonical() {
            None
        } else {
            Some(self.ancestors.top_level_ancestor(&entry.node_id)?)
        };
        let alternate_parents = if entry.depth == 0 {
            self.alternates.top_level_alternate_parents(&entry.node_id)?
        } else {
            Vec::new()
        };
        Ok(AnnotatedEntry {
            entry,
            declared_parent,
            alternate_parents,
        })
    }

    pub fn annotate_all(&self, entries: Vec<HierarchyEntry>) -> Result<Vec<AnnotatedEntry>> {
        entries.into_iter().map(|e| self.annotate(e)).collect()
    }
}
