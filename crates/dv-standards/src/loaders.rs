//! Loading and saving of the standard DV mapping and cluster files.
//!
//! Schema loading is deliberately lenient: entries with missing ids,
//! labels, or aliases still load so the structural validator can report
//! them by message. Only shape errors that make a file unreadable as a
//! schema at all (wrong root type, `dvs` not a list) fail the load.

use std::path::Path;

use serde::Deserialize;
use serde_yaml::Value;

use dv_model::{Cluster, ClusterSet, DvEntry, DvSchema, MeasurementBlock, SchemaFormat};

use crate::error::{Result, StandardsError};
use crate::yaml::scalar_str;

/// Load a DV schema, auto-detecting catalog vs legacy format.
pub fn load_schema(path: &Path) -> Result<DvSchema> {
    let text = std::fs::read_to_string(path).map_err(|e| StandardsError::io(path, e))?;
    let root: Value = serde_yaml::from_str(&text).map_err(|e| StandardsError::yaml(path, e))?;
    let Value::Mapping(root) = root else {
        return Err(StandardsError::invalid_schema(
            path,
            "schema root must be a mapping",
        ));
    };

    if let Some(dvs) = root.get("dvs") {
        let items = dvs.as_sequence().ok_or_else(|| {
            StandardsError::invalid_schema(path, "'dvs' must be a list of entries")
        })?;
        let mut entries = Vec::with_capacity(items.len());
        for (idx, item) in items.iter().enumerate() {
            entries.push(catalog_entry(item, idx, path)?);
        }
        return Ok(DvSchema {
            version: root.get("version").and_then(scalar_str),
            format: SchemaFormat::Catalog,
            entries,
        });
    }

    // Legacy format: flat `standard_name: [aliases]` mapping.
    let mut entries = Vec::with_capacity(root.len());
    for (key, value) in &root {
        let Some(id) = scalar_str(key) else {
            return Err(StandardsError::invalid_schema(
                path,
                "legacy schema keys must be strings",
            ));
        };
        // Non-list values load as empty alias lists; the validator
        // reports them rather than the loader rejecting the file.
        let aliases = match value.as_sequence() {
            Some(items) => items.iter().filter_map(scalar_str).collect(),
            None => Vec::new(),
        };
        entries.push(DvEntry {
            id: Some(id),
            aliases,
            ..DvEntry::default()
        });
    }
    Ok(DvSchema {
        version: None,
        format: SchemaFormat::Legacy,
        entries,
    })
}

fn catalog_entry(item: &Value, idx: usize, path: &Path) -> Result<DvEntry> {
    let mapping = item.as_mapping().ok_or_else(|| {
        StandardsError::invalid_schema(path, format!("dvs entry at index {idx} must be a mapping"))
    })?;

    let measurement = match mapping.get("measurement") {
        None | Some(Value::Null) => None,
        Some(value) => {
            let block: MeasurementBlock =
                serde_yaml::from_value(value.clone()).map_err(|_| {
                    StandardsError::invalid_schema(
                        path,
                        format!("dvs entry at index {idx}: measurement must be a mapping"),
                    )
                })?;
            Some(block)
        }
    };

    Ok(DvEntry {
        id: mapping.get("id").and_then(scalar_str),
        label: mapping.get("label").and_then(scalar_str),
        cluster: mapping.get("cluster").and_then(scalar_str),
        aliases: match mapping.get("aliases").and_then(Value::as_sequence) {
            Some(items) => items.iter().filter_map(scalar_str).collect(),
            None => Vec::new(),
        },
        measurement,
    })
}

#[derive(Debug, Deserialize)]
struct ClustersFile {
    #[serde(default)]
    clusters: Vec<Cluster>,
}

/// Load the thematic cluster catalog.
pub fn load_clusters(path: &Path) -> Result<ClusterSet> {
    let text = std::fs::read_to_string(path).map_err(|e| StandardsError::io(path, e))?;
    let file: ClustersFile =
        serde_yaml::from_str(&text).map_err(|e| StandardsError::yaml(path, e))?;
    Ok(ClusterSet {
        clusters: file.clusters,
    })
}

/// Write a schema back to YAML in its own format, preserving entry order.
pub fn save_schema(schema: &DvSchema, path: &Path) -> Result<()> {
    let root = match schema.format {
        SchemaFormat::Catalog => {
            let mut mapping = serde_yaml::Mapping::new();
            if let Some(version) = &schema.version {
                mapping.insert(
                    Value::String("version".to_string()),
                    Value::String(version.clone()),
                );
            }
            let entries = schema
                .entries
                .iter()
                .map(|entry| serde_yaml::to_value(entry).map_err(|e| StandardsError::yaml(path, e)))
                .collect::<Result<Vec<Value>>>()?;
            mapping.insert(Value::String("dvs".to_string()), Value::Sequence(entries));
            Value::Mapping(mapping)
        }
        SchemaFormat::Legacy => {
            let mut mapping = serde_yaml::Mapping::new();
            for entry in &schema.entries {
                let Some(id) = &entry.id else { continue };
                let aliases = entry
                    .aliases
                    .iter()
                    .map(|alias| Value::String(alias.clone()))
                    .collect();
                mapping.insert(Value::String(id.clone()), Value::Sequence(aliases));
            }
            Value::Mapping(mapping)
        }
    };

    let text = serde_yaml::to_string(&root).map_err(|e| StandardsError::yaml(path, e))?;
    std::fs::write(path, text).map_err(|e| StandardsError::WriteIo {
        path: path.to_path_buf(),
        source: e,
    })
}
