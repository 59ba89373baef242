//! Canonical ancestor and alternate-parent resolution.

use std::collections::HashSet;

use crate::config::HierarchyConfig;
use crate::error::{HierarchyError, Result};
use crate::graph::RelationshipGraph;

/// Climbs canonical parent links up to the top-level ancestor.
#[derive(Debug, Clone, Copy)]
pub struct AncestorResolver<'a> {
    canonical: &'a RelationshipGraph,
    config: &'a HierarchyConfig,
}

impl<'a> AncestorResolver<'a> {
    pub fn new(canonical: &'a RelationshipGraph, config: &'a HierarchyConfig) -> Self {
        Self { canonical, config }
    }

    /// Top-level ancestor of `id`.
    ///
    /// Returns the last node reached before running out of parents or
    /// hitting a root sentinel, which is `id` itself when it has no parent.
    pub fn top_level_ancestor(&self, id: &str) -> Result<String> {
        let mut current = id;
        let mut climbed: Vec<&str> = vec![id];
        let mut seen: HashSet<&str> = HashSet::from([id]);

        loop {
            let parent = match self.canonical.parents_of(current) {
                [] => return Ok(current.to_string()),
                [parent] => parent.as_str(),
                many => {
                    return Err(HierarchyError::MultipleParents {
                        node: current.to_string(),
                        parents: many.to_vec(),
                    })
                }
            };

            if self.config.is_sentinel(parent) {
                return Ok(current.to_string());
            }

            climbed.push(parent);
            if !seen.insert(parent) {
                return Err(HierarchyError::CanonicalCycle {
                    node: parent.to_string(),
                    path: climbed.into_iter().map(str::to_string).collect(),
                });
            }
            current = parent;
        }
    }
}

/// Finds alternate parents of a node and reprojects them onto the canonical tree.
#[derive(Debug, Clone, Copy)]
pub struct AlternateResolver<'a> {
    alternate: &'a RelationshipGraph,
    ancestors: AncestorResolver<'a>,
    config: &'a HierarchyConfig,
}

impl<'a> AlternateResolver<'a> {
    pub fn new(
        alternate: &'a RelationshipGraph,
        canonical: &'a RelationshipGraph,
        config: &'a HierarchyConfig,
    ) -> Self {
        Self {
            alternate,
            ancestors: AncestorResolver::new(canonical, config),
            config,
        }
    }

    /// Canonical top-level ancestors of every alternate parent of `id`.
    ///
    /// Alternate edges declared by the ministry root are skipped. Order
    /// follows the alternate graph's source order; duplicates are kept.
    pub fn top_level_alternate_parents(&self, id: &str) -> Result<Vec<String>> {
        self.alternate
            .parents_of(id)
            .iter()
            .filter(|parent| **parent != self.config.ministry_root)
            .map(|parent| self.ancestors.top_level_ancestor(parent))
            .collect()
    }
}
