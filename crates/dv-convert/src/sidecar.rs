//! Metadata sidecar JSON.
//!
//! The sidecar lands next to the output CSV as `<stem>_metadata.json` and
//! is the machine-readable record of what the standardization did: one
//! canonical metadata object per column, a review summary, and the
//! fingerprints of the standards files that were in effect.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::Utc;
use serde::Serialize;
use serde::ser::SerializeMap;

use dv_model::MeasurementCategory;
use dv_standards::sha256_file;

use crate::metadata::ColumnMetadata;

/// Column name to metadata, serialized as a JSON object in column order.
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnMap(pub Vec<(String, ColumnMetadata)>);

impl Serialize for ColumnMap {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (name, meta) in &self.0 {
            map.serialize_entry(name, meta)?;
        }
        map.end()
    }
}

/// Non-zero category tallies, serialized in category display order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CategoryCounts(pub Vec<(MeasurementCategory, usize)>);

impl Serialize for CategoryCounts {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (category, count) in &self.0 {
            map.serialize_entry(category.as_str(), count)?;
        }
        map.end()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SidecarSummary {
    pub total_columns: usize,
    pub needs_review: usize,
    pub categories: CategoryCounts,
}

impl SidecarSummary {
    pub fn from_columns(columns: &[(String, ColumnMetadata)]) -> Self {
        let mut categories = Vec::new();
        for category in MeasurementCategory::ALL {
            let count = columns
                .iter()
                .filter(|(_, c)| c.meta.category == category)
                .count();
            if count > 0 {
                categories.push((category, count));
            }
        }
        Self {
            total_columns: columns.len(),
            needs_review: columns.iter().filter(|(_, c)| c.meta.needs_review).count(),
            categories: CategoryCounts(categories),
        }
    }
}

/// Sha-256 fingerprint of a standards file at conversion time.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FileFingerprint {
    pub path: String,
    pub sha256: String,
}

impl FileFingerprint {
    pub fn for_file(path: &Path) -> Result<Self> {
        let sha256 = sha256_file(path)
            .with_context(|| format!("fingerprint standards file: {}", path.display()))?;
        Ok(Self {
            path: path.display().to_string(),
            sha256,
        })
    }
}

/// The full sidecar document. Field declaration order is the JSON key
/// order; keep it stable.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Sidecar {
    pub schema_version: String,
    pub inference_timestamp: String,
    pub columns: ColumnMap,
    pub summary: SidecarSummary,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub standards: Vec<FileFingerprint>,
}

impl Sidecar {
    pub fn new(
        schema_version: impl Into<String>,
        columns: Vec<(String, ColumnMetadata)>,
        standards: Vec<FileFingerprint>,
    ) -> Self {
        let summary = SidecarSummary::from_columns(&columns);
        Self {
            schema_version: schema_version.into(),
            inference_timestamp: Utc::now().to_rfc3339(),
            columns: ColumnMap(columns),
            summary,
            standards,
        }
    }

    pub fn needs_review_count(&self) -> usize {
        self.summary.needs_review
    }
}

/// Sidecar location for an output CSV: the extension is dropped and
/// `_metadata.json` appended, so `results.csv` pairs with
/// `results_metadata.json`.
pub fn sidecar_path(output: &Path) -> PathBuf {
    let mut stem = output.with_extension("").into_os_string();
    stem.push("_metadata.json");
    PathBuf::from(stem)
}

/// Write the sidecar next to `output` and return its path.
pub fn write_sidecar(output: &Path, sidecar: &Sidecar) -> Result<PathBuf> {
    let path = sidecar_path(output);
    let json = serde_json::to_string_pretty(sidecar)
        .with_context(|| format!("serialize sidecar: {}", path.display()))?;
    std::fs::write(&path, format!("{json}\n"))
        .with_context(|| format!("write sidecar: {}", path.display()))?;

    tracing::debug!(
        path = %path.display(),
        columns = sidecar.summary.total_columns,
        needs_review = sidecar.summary.needs_review,
        "wrote metadata sidecar"
    );

    Ok(path)
}
