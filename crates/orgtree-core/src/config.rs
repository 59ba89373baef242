//! Root sentinels.

use serde::{Deserialize, Serialize};

/// Top-level government node of the DILA export.
pub const DEFAULT_GOVERNMENT_ROOT: &str = "622a21da-ff27-4f5a-ae74-133aa03d905f";
/// Ministère de la Transition écologique.
pub const DEFAULT_MINISTRY_ROOT: &str = "05f90b6a-e3d9-4a41-a919-2e2f2d77e517";

/// Identifiers that stop canonical-ancestor climbing.
///
/// The ministry root doubles as the default walk root, and alternate edges
/// whose source is the ministry are not reported as cross-links.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HierarchyConfig {
    pub government_root: String,
    pub ministry_root: String,
}

impl Default for HierarchyConfig {
    fn default() -> Self {
        Self {
            government_root: DEFAULT_GOVERNMENT_ROOT.to_string(),
            ministry_root: DEFAULT_MINISTRY_ROOT.to_string(),
        }
    }
}

impl HierarchyConfig {
    pub fn new(government_root: impl Into<String>, ministry_root: impl Into<String>) -> Self {
        Self {
            government_root: government_root.into(),
            ministry_root: ministry_root.into(),
        }
    }

    pub fn is_sentinel(&self, id: &str) -> bool {
        id == self.government_root || id == self.ministry_root
    }
}
