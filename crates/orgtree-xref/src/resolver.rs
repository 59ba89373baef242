//! Two-hop external reference chain.

use serde::Serialize;
use std::cell::RefCell;
use std::collections::HashMap;

use crate::config::{is_wikidata_id, AmbiguityPolicy, XrefConfig};
use crate::error::XrefError;
use crate::sparql::{string_literal, SparqlEndpoint};

/// Public links for one organization.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ExternalLinks {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub primary_link: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub secondary_link: Option<String>,
}

impl ExternalLinks {
    pub fn is_empty(&self) -> bool {
        self.primary_link.is_none() && self.secondary_link.is_none()
    }
}

/// Maps an external code to `(primary_link, secondary_link)`.
///
/// Results are memoized per code. The resolver is meant to be driven by one
/// thread while the tree is rendered, so the cache is a plain `RefCell`.
pub struct ReferenceResolver<E> {
    endpoint: E,
    config: XrefConfig,
    cache: RefCell<HashMap<String, ExternalLinks>>,
}

impl<E: SparqlEndpoint> ReferenceResolver<E> {
    pub fn new(endpoint: E, config: XrefConfig) -> Result<Self, XrefError> {
        config.validate()?;
        Ok(Self {
            endpoint,
            config,
            cache: RefCell::new(HashMap::new()),
        })
    }

    /// Resolve links for `code`.
    ///
    /// A disabled resolver, or an absent/blank code, never reaches the
    /// endpoint. Endpoint failures degrade to empty links; ambiguous
    /// matches follow [`XrefConfig::on_ambiguous`].
    pub fn resolve_links(&self, code: Option<&str>) -> Result<ExternalLinks, XrefError> {
        let Some(code) = code.map(str::trim).filter(|c| !c.is_empty()) else {
            return Ok(ExternalLinks::default());
        };
        if !self.config.enabled {
            return Ok(ExternalLinks::default());
        }
        if let Some(links) = self.cache.borrow().get(code) {
            return Ok(links.clone());
        }

        let links = self.lookup_chain(code)?;
        self.cache
            .borrow_mut()
            .insert(code.to_string(), links.clone());
        Ok(links)
    }

    fn lookup_chain(&self, code: &str) -> Result<ExternalLinks, XrefError> {
        let entity = match self.entity_for_code(code) {
            Ok(entity) => entity,
            Err(e) => {
                self.degrade(code, e)?;
                None
            }
        };
        let Some(entity) = entity else {
            return Ok(ExternalLinks::default());
        };

        let crossref = match self.crossref_for_entity(&entity) {
            Ok(crossref) => crossref,
            Err(e) => {
                self.degrade(&entity, e)?;
                None
            }
        };

        Ok(ExternalLinks {
            primary_link: Some(self.config.entity_url_template.replace("{}", &entity)),
            secondary_link: crossref.map(|id| self.config.crossref_url_template.replace("{}", &id)),
        })
    }

    /// Hop 1: Wikidata item id (`Q…`) carrying `code`.
    fn entity_for_code(&self, code: &str) -> Result<Option<String>, XrefError> {
        let query = format!(
            "SELECT DISTINCT ?item WHERE {{ ?item wdt:{} {} . }} LIMIT 2",
            self.config.code_property,
            string_literal(code)
        );
        let Some(iri) = self.single_value(code, &query, "item")? else {
            return Ok(None);
        };
        let qid = iri.rsplit('/').next().unwrap_or(&iri).to_string();
        if !is_wikidata_id(&qid, 'Q') {
            return Err(XrefError::Unavailable(format!(
                "unexpected entity reference `{iri}` for code `{code}`"
            )));
        }
        Ok(Some(qid))
    }

    /// Hop 2: cross-reference identifier of `qid`.
    fn crossref_for_entity(&self, qid: &str) -> Result<Option<String>, XrefError> {
        let query = format!(
            "SELECT DISTINCT ?xref WHERE {{ wd:{qid} wdt:{} ?xref . }} LIMIT 2",
            self.config.crossref_property
        );
        self.single_value(qid, &query, "xref")
    }

    fn single_value(&self, key: &str, query: &str, var: &str) -> Result<Option<String>, XrefError> {
        let rows = self.endpoint.select(query)?;
        let mut values: Vec<String> = Vec::new();
        for mut row in rows {
            if let Some(value) = row.remove(var) {
                if !values.contains(&value) {
                    values.push(value);
                }
            }
        }
        match values.len() {
            0 | 1 => Ok(values.pop()),
            _ => Err(XrefError::Ambiguous {
                key: key.to_string(),
                matches: values,
            }),
        }
    }

    fn degrade(&self, key: &str, err: XrefError) -> Result<(), XrefError> {
        match (&err, self.config.on_ambiguous) {
            (XrefError::Ambiguous { .. }, AmbiguityPolicy::Abort) => Err(err),
            (XrefError::InvalidConfig(_), _) => Err(err),
            _ => {
                tracing::warn!(key = %key, error = %err, "external reference lookup degraded");
                Ok(())
            }
        }
    }
}
