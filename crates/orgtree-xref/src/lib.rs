//! External reference resolution against a public linked-data store.
//!
//! An organization's external code (its SIREN number) is mapped onto public
//! links in two dependent hops against the Wikidata Query Service:
//!
//! 1. code → Wikidata item (`?item wdt:P1616 "<code>"`), giving `primary_link`;
//! 2. item → cross-reference id (`wd:<Q> wdt:P214 ?xref`), giving `secondary_link`.
//!
//! Both hops are exact point lookups. Zero matches means "no link"; more than
//! one distinct match is [`XrefError::Ambiguous`], handled according to
//! [`AmbiguityPolicy`]. Endpoint failures never abort a run: they degrade to
//! absent links with a warning.

pub mod config;
pub mod error;
pub mod resolver;
pub mod sparql;

pub use config::{AmbiguityPolicy, XrefConfig};
pub use error::XrefError;
pub use resolver::{ExternalLinks, ReferenceResolver};
pub use sparql::{Binding, HttpSparqlEndpoint, SparqlEndpoint};
