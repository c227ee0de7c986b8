//! Per-column measurement metadata for the sidecar.
//!
//! Schema-defined measurement blocks are ground truth and win outright;
//! only columns the schema says nothing about go through the inference
//! engine. The review flag on inferred columns reflects the caller's
//! confidence threshold, so tightening the threshold surfaces more
//! columns in the sidecar summary.

use anyhow::{Context, Result};
use serde::Serialize;

use dv_infer::infer;
use dv_model::{DvSchema, MeasurementMeta, SchemaFormat};
use dv_standards::RuleRepository;

/// Sidecar metadata for one output column.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ColumnMetadata {
    #[serde(flatten)]
    pub meta: MeasurementMeta,
    /// Source spellings that standardize to this column, or the column
    /// name itself when nothing maps to it.
    pub original_name: Vec<String>,
}

/// Build metadata for every output column, in column order.
///
/// Duplicate standardized names collapse to a single entry. Fails only
/// when the schema carries an out-of-vocabulary measurement block, which
/// is a configuration fault rather than something to paper over.
pub fn build_column_metadata(
    columns: &[String],
    schema: &DvSchema,
    rules: &RuleRepository,
    threshold: f32,
) -> Result<Vec<(String, ColumnMetadata)>> {
    let mut out: Vec<(String, ColumnMetadata)> = Vec::with_capacity(columns.len());

    for column in columns {
        if out.iter().any(|(name, _)| name == column) {
            continue;
        }
        let resolved = schema
            .resolve_measurement(column)
            .with_context(|| format!("resolve measurement for '{column}'"))?;
        let meta = match resolved {
            Some(meta) => meta,
            None => {
                let mut meta = infer(column, rules);
                meta.needs_review = meta.confidence < threshold;
                meta
            }
        };
        out.push((
            column.clone(),
            ColumnMetadata {
                meta,
                original_name: original_names(schema, column),
            },
        ));
    }

    Ok(out)
}

/// All source spellings the alias index maps to `column`.
///
/// For catalog schemas the id maps to itself, so it appears after the
/// aliases. Columns the schema does not know yield their own name.
fn original_names(schema: &DvSchema, column: &str) -> Vec<String> {
    let Some(entry) = schema.entry(column) else {
        return vec![column.to_string()];
    };
    let mut names: Vec<String> = Vec::new();
    for alias in &entry.aliases {
        if !names.contains(alias) {
            names.push(alias.clone());
        }
    }
    if schema.format == SchemaFormat::Catalog && !names.iter().any(|n| n == column) {
        names.push(column.to_string());
    }
    if names.is_empty() {
        return vec![column.to_string()];
    }
    names
}
