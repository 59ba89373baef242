//! Whole-graph forest check for the canonical hierarchy.

use std::collections::{BTreeSet, HashSet};

use crate::ancestry::AncestorResolver;
use crate::config::HierarchyConfig;
use crate::error::HierarchyError;
use crate::graph::HierarchyGraphs;

#[derive(Debug, Clone, Default)]
pub struct ForestReport {
    pub nodes: usize,
    pub canonical_edges: usize,
    pub alternate_edges: usize,
    pub violations: Vec<HierarchyError>,
}

impl ForestReport {
    pub fn is_ok(&self) -> bool {
        self.violations.is_empty()
    }
}

/// Collect every multi-parent node and every canonical cycle.
///
/// Violations are listed in record load order, multi-parent nodes first.
pub fn check_forest(graphs: &HierarchyGraphs, config: &HierarchyConfig) -> ForestReport {
    let canonical = &graphs.canonical;
    let mut violations = Vec::new();

    let mut seen_targets: HashSet<&str> = HashSet::new();
    for source in canonical.sources() {
        for child in canonical.children_of(source) {
            if !seen_targets.insert(child.as_str()) {
                continue;
            }
            let parents = canonical.parents_of(child);
            if parents.len() > 1 {
                violations.push(HierarchyError::MultipleParents {
                    node: child.clone(),
                    parents: parents.to_vec(),
                });
            }
        }
    }

    let resolver = AncestorResolver::new(canonical, config);
    let mut cycles: HashSet<BTreeSet<String>> = HashSet::new();
    for source in canonical.sources() {
        if let Err(HierarchyError::CanonicalCycle { node, path }) =
            resolver.top_level_ancestor(source)
        {
            let start = path.iter().position(|id| *id == node).unwrap_or(0);
            let members: BTreeSet<String> = path[start..].iter().cloned().collect();
            if cycles.insert(members) {
                violations.push(HierarchyError::CanonicalCycle { node, path });
            }
        }
    }

    ForestReport {
        nodes: canonical.node_count(),
        canonical_edges: canonical.edge_count(),
        alternate_edges: graphs.alternate.edge_count(),
        violations,
    }
}
