use thiserror::Error;

/// Consistency failures detected while resolving the hierarchy.
///
/// Unknown references are not errors: the store degrades them to stubs.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HierarchyError {
    #[error("node `{node}` has {} canonical parents: {}", .parents.len(), .parents.join(", "))]
    MultipleParents { node: String, parents: Vec<String> },

    #[error("canonical parent cycle at `{node}` (climbed: {})", .path.join(" -> "))]
    CanonicalCycle { node: String, path: Vec<String> },

    #[error("relationship cycle at `{node}` (path: {})", .path.join(" -> "))]
    WalkCycle { node: String, path: Vec<String> },

    #[error("root `{0}` is not present in the loaded records")]
    UnknownRoot(String),
}

pub type Result<T> = std::result::Result<T, HierarchyError>;
