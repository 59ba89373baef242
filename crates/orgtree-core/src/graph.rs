//! Typed adjacency graphs derived from record relationships.

use std::collections::HashMap;

use crate::record::{Record, RelationshipType};

/// Directed `source -> [children]` mapping restricted to one relationship type.
///
/// Every loaded record has an entry, even without matching edges. Sources
/// iterate in record load order and each child list keeps declaration order.
/// A reverse index answers "who declares `id` as a child" in that same
/// source order.
#[derive(Debug, Clone)]
pub struct RelationshipGraph {
    order: Vec<String>,
    children: HashMap<String, Vec<String>>,
    parents: HashMap<String, Vec<String>>,
}

impl RelationshipGraph {
    pub fn build<'a, I>(records: I, relationship_type: RelationshipType) -> Self
    where
        I: IntoIterator<Item = &'a Record>,
    {
        let mut order: Vec<String> = Vec::new();
        let mut children: HashMap<String, Vec<String>> = HashMap::new();

        for record in records {
            let entry = children.entry(record.id.clone()).or_insert_with(|| {
                order.push(record.id.clone());
                Vec::new()
            });
            entry.extend(
                record
                    .relationships
                    .iter()
                    .filter(|rel| rel.relationship_type == relationship_type)
                    .map(|rel| rel.target.clone()),
            );
        }

        let mut parents: HashMap<String, Vec<String>> = HashMap::new();
        for source in &order {
            for child in &children[source] {
                let claimed_by = parents.entry(child.clone()).or_default();
                if !claimed_by.contains(source) {
                    claimed_by.push(source.clone());
                }
            }
        }

        tracing::debug!(
            relationship = %relationship_type,
            nodes = order.len(),
            edges = children.values().map(Vec::len).sum::<usize>(),
            "built relationship graph"
        );

        Self {
            order,
            children,
            parents,
        }
    }

    /// Declared children of `id`, empty for unknown ids.
    pub fn children_of(&self, id: &str) -> &[String] {
        self.children.get(id).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Sources whose child list contains `id`, in source order.
    pub fn parents_of(&self, id: &str) -> &[String] {
        self.parents.get(id).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn contains(&self, id: &str) -> bool {
        self.children.contains_key(id)
    }

    /// Source ids in load order.
    pub fn sources(&self) -> impl Iterator<Item = &str> {
        self.order.iter().map(String::as_str)
    }

    pub fn node_count(&self) -> usize {
        self.order.len()
    }

    pub fn edge_count(&self) -> usize {
        self.children.values().map(Vec::len).sum()
    }
}

/// Canonical and alternate graphs of one run.
#[derive(Debug, Clone)]
pub struct HierarchyGraphs {
    pub canonical: RelationshipGraph,
    pub alternate: RelationshipGraph,
}

impl HierarchyGraphs {
    pub fn build(records: &[Record]) -> Self {
        Self {
            canonical: RelationshipGraph::build(records, RelationshipType::Child),
            alternate: RelationshipGraph::build(records, RelationshipType::Alternate),
        }
    }
}
