//! Organizational records and their typed relationships.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Wire label of the canonical ("child service") relationship.
pub const LABEL_CHILD: &str = "Service Fils";
/// Wire label of the alternate-hierarchy relationship.
pub const LABEL_ALTERNATE: &str = "Autre hiérarchie";

/// Type of a declared relationship.
///
/// Only `Child` edges form the canonical tree. Any label outside the known
/// set is kept verbatim in `Other` and treated like an alternate edge.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum RelationshipType {
    Child,
    Alternate,
    Other(String),
}

impl RelationshipType {
    pub fn label(&self) -> &str {
        match self {
            Self::Child => LABEL_CHILD,
            Self::Alternate => LABEL_ALTERNATE,
            Self::Other(label) => label,
        }
    }

    pub fn is_canonical(&self) -> bool {
        matches!(self, Self::Child)
    }
}

impl From<&str> for RelationshipType {
    fn from(label: &str) -> Self {
        match label {
            LABEL_CHILD => Self::Child,
            LABEL_ALTERNATE => Self::Alternate,
            other => Self::Other(other.to_string()),
        }
    }
}

impl From<String> for RelationshipType {
    fn from(label: String) -> Self {
        match label.as_str() {
            LABEL_CHILD => Self::Child,
            LABEL_ALTERNATE => Self::Alternate,
            _ => Self::Other(label),
        }
    }
}

impl From<RelationshipType> for String {
    fn from(value: RelationshipType) -> Self {
        match value {
            RelationshipType::Other(label) => label,
            known => known.label().to_string(),
        }
    }
}

impl fmt::Display for RelationshipType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One declared edge: `source --relationship_type--> target`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Relationship {
    pub target: String,
    pub relationship_type: RelationshipType,
}

impl Relationship {
    pub fn new(target: impl Into<String>, relationship_type: RelationshipType) -> Self {
        Self {
            target: target.into(),
            relationship_type,
        }
    }

    pub fn child(target: impl Into<String>) -> Self {
        Self::new(target, RelationshipType::Child)
    }

    pub fn alternate(target: impl Into<String>) -> Self {
        Self::new(target, RelationshipType::Alternate)
    }
}

/// One organizational unit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub relationships: Vec<Relationship>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub external_code: Option<String>,
}

impl Record {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            relationships: Vec::new(),
            external_code: None,
        }
    }

    /// Placeholder for an identifier with no backing data.
    pub fn stub(id: &str) -> Self {
        Self::new(id, id)
    }

    pub fn with_relationship(mut self, relationship: Relationship) -> Self {
        self.relationships.push(relationship);
        self
    }

    pub fn with_external_code(mut self, code: impl Into<String>) -> Self {
        self.external_code = Some(code.into());
        self
    }
}
