use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum XrefError {
    /// More than one remote value for what must be a point lookup.
    #[error("ambiguous linked-data match for `{key}`: {}", .matches.join(", "))]
    Ambiguous { key: String, matches: Vec<String> },

    /// Transport, HTTP status, or response decoding failure.
    #[error("linked-data endpoint unavailable: {0}")]
    Unavailable(String),

    #[error("invalid external reference configuration: {0}")]
    InvalidConfig(String),
}
