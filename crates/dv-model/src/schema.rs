//! Standard DV schema types and the ground-truth measurement resolver.
//!
//! Two on-disk formats exist. The catalog format (version 2.1+) carries a
//! `dvs` list of entries with labels, clusters, and optional measurement
//! blocks. The legacy format is a flat mapping of standard name to alias
//! list. Both load into [`DvSchema`]; the format tag records which checks
//! and save shape apply.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::enums::{Direction, MeasurementCategory, ScaleType};
use crate::error::ModelError;
use crate::meta::MeasurementMeta;

/// On-disk schema flavor, auto-detected at load time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchemaFormat {
    /// Versioned format with a `dvs` entry list.
    Catalog,
    /// Flat `standard_name: [aliases]` mapping.
    Legacy,
}

impl SchemaFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            SchemaFormat::Catalog => "catalog",
            SchemaFormat::Legacy => "legacy",
        }
    }
}

impl fmt::Display for SchemaFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Raw measurement block as written in the schema file.
///
/// Values stay as plain strings until resolution so that structural
/// validation can report out-of-vocabulary entries by message instead of
/// the loader rejecting the whole file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MeasurementBlock {
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub primary_unit: String,
    #[serde(default)]
    pub allowed_units: Vec<String>,
    #[serde(default)]
    pub scale_type: String,
    #[serde(default)]
    pub direction: String,
}

impl MeasurementBlock {
    /// Resolve the raw block into typed ground-truth metadata.
    ///
    /// Fails when the block names a category, scale type, or direction
    /// outside the closed vocabularies. That is a configuration-integrity
    /// fault, not a recoverable miss.
    pub fn resolve(&self) -> Result<MeasurementMeta, ModelError> {
        let category: MeasurementCategory =
            self.category.parse().map_err(|_| ModelError::UnknownEnumValue {
                field: "category",
                value: self.category.clone(),
            })?;
        let scale_type: ScaleType =
            self.scale_type.parse().map_err(|_| ModelError::UnknownEnumValue {
                field: "scale_type",
                value: self.scale_type.clone(),
            })?;
        let direction: Direction =
            self.direction.parse().map_err(|_| ModelError::UnknownEnumValue {
                field: "direction",
                value: self.direction.clone(),
            })?;

        Ok(MeasurementMeta::schema_defined(
            category,
            self.primary_unit.clone(),
            self.allowed_units.clone(),
            scale_type,
            direction,
        ))
    }
}

/// One standardized dependent variable.
///
/// Fields are optional where the file may omit them; the validator, not
/// the loader, decides what counts as a defect.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DvEntry {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cluster: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub aliases: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub measurement: Option<MeasurementBlock>,
}

impl DvEntry {
    /// Entry id, or a placeholder naming the entry's position when the
    /// file omitted it.
    pub fn display_id(&self, index: usize) -> String {
        match &self.id {
            Some(id) => id.clone(),
            None => format!("<missing_id_at_index_{index}>"),
        }
    }
}

/// A loaded DV standardization schema.
///
/// Entry order matches the source file and is preserved through merges
/// and saves.
#[derive(Debug, Clone, PartialEq)]
pub struct DvSchema {
    pub version: Option<String>,
    pub format: SchemaFormat,
    pub entries: Vec<DvEntry>,
}

impl DvSchema {
    /// First entry whose id equals `id`.
    pub fn entry(&self, id: &str) -> Option<&DvEntry> {
        self.entries
            .iter()
            .find(|entry| entry.id.as_deref() == Some(id))
    }

    /// Ground-truth measurement lookup for a standardized id.
    ///
    /// Returns `Ok(None)` when the id is unknown or carries no
    /// measurement block; callers fall through to inference. An
    /// out-of-vocabulary block is an error, not a miss.
    pub fn resolve_measurement(&self, id: &str) -> Result<Option<MeasurementMeta>, ModelError> {
        let Some(entry) = self.entry(id) else {
            return Ok(None);
        };
        match &entry.measurement {
            Some(block) => block.resolve().map(Some),
            None => Ok(None),
        }
    }

    /// Alias to standardized-id mapping.
    ///
    /// In catalog schemas each id also maps to itself, so already
    /// standardized columns survive a second pass unchanged.
    pub fn alias_index(&self) -> BTreeMap<String, String> {
        let mut index = BTreeMap::new();
        for entry in &self.entries {
            let Some(id) = &entry.id else { continue };
            for alias in &entry.aliases {
                index.insert(alias.clone(), id.clone());
            }
            if self.format == SchemaFormat::Catalog {
                index.insert(id.clone(), id.clone());
            }
        }
        index
    }

    /// Fold proposed `(standard_name, aliases)` pairs into a new schema.
    ///
    /// Existing entries gain only aliases they do not already carry; new
    /// names are appended as fresh entries. The receiver is not mutated.
    pub fn merge_suggestions(&self, suggestions: &[(String, Vec<String>)]) -> DvSchema {
        let mut merged = self.clone();
        for (std_name, aliases) in suggestions {
            if let Some(entry) = merged
                .entries
                .iter_mut()
                .find(|entry| entry.id.as_deref() == Some(std_name.as_str()))
            {
                for alias in aliases {
                    if !entry.aliases.contains(alias) {
                        entry.aliases.push(alias.clone());
                    }
                }
            } else {
                merged.entries.push(DvEntry {
                    id: Some(std_name.clone()),
                    aliases: aliases.clone(),
                    ..DvEntry::default()
                });
            }
        }
        merged
    }

    /// Number of entries carrying a measurement block.
    pub fn measurement_count(&self) -> usize {
        self.entries
            .iter()
            .filter(|entry| entry.measurement.is_some())
            .count()
    }

    /// Total alias count across all entries.
    pub fn alias_count(&self) -> usize {
        self.entries.iter().map(|entry| entry.aliases.len()).sum()
    }
}
