//! Run configuration: root sentinels + external reference settings.
//!
//! Loaded from an optional JSON file, then overridden by command-line flags.
//! Every field has a default, so `{}` is a valid configuration file.

use anyhow::{Context, Result};
use orgtree_core::HierarchyConfig;
use orgtree_xref::XrefConfig;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RunConfig {
    pub hierarchy: HierarchyConfig,
    pub xref: XrefConfig,
}

impl RunConfig {
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config {}", path.display()))?;
        let config: Self = serde_json::from_str(&text)
            .with_context(|| format!("invalid config {}", path.display()))?;
        tracing::debug!(path = %path.display(), "loaded run configuration");
        Ok(config)
    }
}
