//! Loader for the DILA "référentiel de l'organisation administrative de l'État".
//!
//! The export ships as a zip archive holding one JSON document shaped like
//! `{"service": [ {id, nom, hierarchie: [{service, type_hierarchie}], siren, ...} ]}`.
//! This crate only maps that document onto [`orgtree_core::Record`]s; every
//! other field of the export is ignored.

use anyhow::{anyhow, Context, Result};
use orgtree_core::{Record, Relationship, RelationshipType};
use serde::Deserialize;
use serde_json::Value;
use std::fs::File;
use std::io::{BufReader, Read, Seek};
use std::path::Path;

// ============================================================================
// Wire format
// ============================================================================

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ExportFileV1 {
    #[serde(default)]
    pub service: Vec<ServiceV1>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServiceV1 {
    pub id: String,
    #[serde(default)]
    pub nom: Option<String>,
    #[serde(default)]
    pub hierarchie: Option<Vec<HierarchieV1>>,
    #[serde(default)]
    pub siren: Option<Value>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct HierarchieV1 {
    pub service: String,
    pub type_hierarchie: String,
}

impl From<ServiceV1> for Record {
    fn from(service: ServiceV1) -> Self {
        let name = service
            .nom
            .filter(|n| !n.trim().is_empty())
            .unwrap_or_else(|| service.id.clone());
        let relationships = service
            .hierarchie
            .unwrap_or_default()
            .into_iter()
            .map(|h| Relationship::new(h.service, RelationshipType::from(h.type_hierarchie)))
            .collect();
        Record {
            id: service.id,
            name,
            relationships,
            external_code: service.siren.as_ref().and_then(external_code),
        }
    }
}

/// SIREN numbers appear as strings, occasionally as bare numbers, and
/// blank strings stand for "absent".
fn external_code(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => {
            let s = s.trim();
            (!s.is_empty()).then(|| s.to_string())
        }
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

// ============================================================================
// Loading
// ============================================================================

pub fn parse_export(text: &str) -> Result<Vec<Record>> {
    let export: ExportFileV1 =
        serde_json::from_str(text).map_err(|e| anyhow!("invalid organization export: {e}"))?;
    Ok(export.service.into_iter().map(Record::from).collect())
}

/// Records from the first `.json` member of a zip archive.
///
/// An archive without any `.json` member yields no records.
pub fn read_archive<R: Read + Seek>(reader: R) -> Result<Vec<Record>> {
    let mut archive = zip::ZipArchive::new(reader).context("failed to open zip archive")?;

    for i in 0..archive.len() {
        let mut file = archive.by_index(i)?;
        if !file.is_file() || !file.name().ends_with(".json") {
            continue;
        }
        let name = file.name().to_string();
        let mut text = String::new();
        file.read_to_string(&mut text)
            .with_context(|| format!("failed to read archive member `{name}` as UTF-8"))?;
        let records = parse_export(&text).with_context(|| format!("in archive member `{name}`"))?;
        tracing::info!(member = %name, records = records.len(), "loaded organization export");
        return Ok(records);
    }

    tracing::warn!("archive contains no .json member; no records loaded");
    Ok(Vec::new())
}

/// Load records from a `.zip` archive or a bare `.json` document.
pub fn load_records(path: &Path) -> Result<Vec<Record>> {
    let is_zip = path
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("zip"));

    if is_zip {
        let file =
            File::open(path).with_context(|| format!("failed to open {}", path.display()))?;
        read_archive(BufReader::new(file)).with_context(|| format!("loading {}", path.display()))
    } else {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        let records = parse_export(&text).with_context(|| format!("loading {}", path.display()))?;
        tracing::info!(path = %path.display(), records = records.len(), "loaded organization export");
        Ok(records)
    }
}
