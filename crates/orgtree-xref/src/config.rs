use serde::{Deserialize, Serialize};

use crate::error::XrefError;

pub const DEFAULT_ENDPOINT: &str = "https://query.wikidata.org/sparql";

/// What to do when a lookup hop matches more than one remote value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AmbiguityPolicy {
    /// Propagate [`XrefError::Ambiguous`] and abort the run.
    #[default]
    Abort,
    /// Log a warning and treat the hop as "no match".
    Degrade,
}

impl AmbiguityPolicy {
    pub fn parse(s: &str) -> Result<Self, XrefError> {
        match s.trim().to_ascii_lowercase().as_str() {
            "abort" | "fail" => Ok(Self::Abort),
            "degrade" | "skip" => Ok(Self::Degrade),
            other => Err(XrefError::InvalidConfig(format!(
                "unknown ambiguity policy `{other}` (expected abort|degrade)"
            ))),
        }
    }
}

/// External reference chain settings.
///
/// Hop 1 finds the Wikidata item whose `code_property` equals the record's
/// external code; hop 2 reads that item's `crossref_property`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct XrefConfig {
    pub enabled: bool,
    pub endpoint: String,
    /// SIREN number.
    pub code_property: String,
    /// VIAF ID.
    pub crossref_property: String,
    pub entity_url_template: String,
    pub crossref_url_template: String,
    pub on_ambiguous: AmbiguityPolicy,
    pub timeout_secs: u64,
    pub user_agent: String,
}

impl Default for XrefConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            endpoint: DEFAULT_ENDPOINT.to_string(),
            code_property: "P1616".to_string(),
            crossref_property: "P214".to_string(),
            entity_url_template: "https://www.wikidata.org/wiki/{}".to_string(),
            crossref_url_template: "https://viaf.org/viaf/{}".to_string(),
            on_ambiguous: AmbiguityPolicy::Abort,
            timeout_secs: 20,
            user_agent: concat!("orgtree/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

impl XrefConfig {
    pub fn validate(&self) -> Result<(), XrefError> {
        for (field, value) in [
            ("code_property", &self.code_property),
            ("crossref_property", &self.crossref_property),
        ] {
            if !is_wikidata_id(value, 'P') {
                return Err(XrefError::InvalidConfig(format!(
                    "{field} must be a Wikidata property id like P1616, got `{value}`"
                )));
            }
        }
        for (field, value) in [
            ("entity_url_template", &self.entity_url_template),
            ("crossref_url_template", &self.crossref_url_template),
        ] {
            if !value.contains("{}") {
                return Err(XrefError::InvalidConfig(format!(
                    "{field} must contain a `{{}}` placeholder, got `{value}`"
                )));
            }
        }
        Ok(())
    }
}

/// `P123` / `Q456` style identifiers.
pub(crate) fn is_wikidata_id(s: &str, prefix: char) -> bool {
    let mut chars = s.chars();
    chars.next() == Some(prefix) && {
        let digits = chars.as_str();
        !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit())
    }
}
