//! Depth-first expansion of a record's declared relationships.

use serde::Serialize;
use std::borrow::Cow;

use crate::error::{HierarchyError, Result};
use crate::record::{Record, Relationship, RelationshipType};
use crate::store::RecordStore;

/// One line of the materialized tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HierarchyEntry {
    pub depth: usize,
    pub node_id: String,
    pub relationship_type: RelationshipType,
    pub name: String,
}

impl HierarchyEntry {
    pub fn is_canonical(&self) -> bool {
        self.relationship_type.is_canonical()
    }
}

struct Frame<'s> {
    record: Cow<'s, Record>,
    next: usize,
}

impl Frame<'_> {
    fn advance(&mut self) -> Option<Relationship> {
        let rel = self.record.relationships.get(self.next)?.clone();
        self.next += 1;
        Some(rel)
    }
}

/// Pre-order walker over all relationship types, in declaration order.
#[derive(Debug, Clone, Copy)]
pub struct HierarchyWalker<'s> {
    store: &'s RecordStore,
}

impl<'s> HierarchyWalker<'s> {
    pub fn new(store: &'s RecordStore) -> Self {
        Self { store }
    }

    /// Walk from a loaded record id.
    pub fn walk_from(&self, root_id: &str) -> Result<Vec<HierarchyEntry>> {
        let root = self
            .store
            .get(root_id)
            .ok_or_else(|| HierarchyError::UnknownRoot(root_id.to_string()))?;
        self.walk(root)
    }

    /// Every descendant of `root` reachable through declared relationships.
    ///
    /// Entries of `root`'s own relationships have depth 0. A relationship
    /// pointing back at a node on the current path is a
    /// [`HierarchyError::WalkCycle`]; reaching a node again through a
    /// different path is not, and expands it again.
    pub fn walk(&self, root: &Record) -> Result<Vec<HierarchyEntry>> {
        let mut entries = Vec::new();
        let mut stack: Vec<Frame<'_>> = vec![Frame {
            record: Cow::Owned(root.clone()),
            next: 0,
        }];

        while let Some(frame) = stack.last_mut() {
            let Some(rel) = frame.advance() else {
                stack.pop();
                continue;
            };

            let depth = stack.len() - 1;
            let target = self.store.lookup(&rel.target);

            if stack.iter().any(|f| f.record.id == target.id) {
                let mut path: Vec<String> = stack.iter().map(|f| f.record.id.clone()).collect();
                path.push(target.id.clone());
                return Err(HierarchyError::WalkCycle {
                    node: target.id.clone(),
                    path,
                });
            }

            entries.push(HierarchyEntry {
                depth,
                node_id: rel.target,
                relationship_type: rel.relationship_type,
                name: target.name.clone(),
            });

            if !target.relationships.is_empty() {
                stack.push(Frame {
                    record: target,
                    next: 0,
                });
            }
        }

        tracing::debug!(root = %root.id, entries = entries.len(), "walked hierarchy");
        Ok(entries)
    }
}
