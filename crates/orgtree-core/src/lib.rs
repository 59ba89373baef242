//! Hierarchy graph resolution for administrative organization records.
//!
//! Pipeline:
//!
//! ```text
//! RecordStore ──► HierarchyGraphs { canonical, alternate }
//!      │                 │
//!      ▼                 ▼
//! HierarchyWalker ──► Annotator (AncestorResolver, AlternateResolver)
//! ```
//!
//! - [`RecordStore`] never fails a lookup: unknown ids become stub records.
//! - The canonical ("child") graph must be a forest. A node claimed by two
//!   canonical parents is a [`HierarchyError::MultipleParents`].
//! - Alternate edges may have any multiplicity and are reprojected onto the
//!   canonical tree through their top-level ancestors.
//! - Walks and ancestor climbs are iterative and report cycles instead of
//!   looping.

pub mod ancestry;
pub mod annotate;
pub mod check;
pub mod config;
pub mod error;
pub mod graph;
pub mod record;
pub mod store;
pub mod walker;

pub use ancestry::{AlternateResolver, AncestorResolver};
pub use annotate::{AnnotatedEntry, Annotator};
pub use check::{check_forest, ForestReport};
pub use config::HierarchyConfig;
pub use error::HierarchyError;
pub use graph::{HierarchyGraphs, RelationshipGraph};
pub use record::{Record, Relationship, RelationshipType};
pub use store::RecordStore;
pub use walker::{HierarchyEntry, HierarchyWalker};
