//! CSV header standardization.
//!
//! Rewrites the header row of a dataset by exact alias lookup and streams
//! the data rows through untouched. Renaming never looks at cell values.

use std::collections::BTreeMap;
use std::path::Path;

use anyhow::{Context, Result};
use csv::ReaderBuilder;

/// One header cell before and after standardization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderRename {
    pub original: String,
    pub standardized: String,
}

impl HeaderRename {
    pub fn changed(&self) -> bool {
        self.original != self.standardized
    }
}

/// Header row of a CSV file, in column order.
pub fn read_headers(path: &Path) -> Result<Vec<String>> {
    let mut reader = ReaderBuilder::new()
        .from_path(path)
        .with_context(|| format!("read csv: {}", path.display()))?;
    let headers = reader
        .headers()
        .with_context(|| format!("read csv header: {}", path.display()))?;
    Ok(headers.iter().map(str::to_string).collect())
}

/// Map raw header names through the alias index.
///
/// Unknown columns pass through unchanged. Lookup is exact; spelling
/// variants belong in the schema's alias lists, not in fuzzy matching
/// here.
pub fn plan_renames(headers: &[String], index: &BTreeMap<String, String>) -> Vec<HeaderRename> {
    headers
        .iter()
        .map(|raw| HeaderRename {
            original: raw.clone(),
            standardized: index.get(raw).cloned().unwrap_or_else(|| raw.clone()),
        })
        .collect()
}

/// Copy `input` to `output` with a standardized header row.
///
/// Returns the per-column rename outcomes in input column order. Data
/// rows are streamed record by record, never held in memory as a whole.
pub fn standardize_headers(
    input: &Path,
    output: &Path,
    index: &BTreeMap<String, String>,
) -> Result<Vec<HeaderRename>> {
    let mut reader = ReaderBuilder::new()
        .from_path(input)
        .with_context(|| format!("read csv: {}", input.display()))?;
    let headers = reader
        .headers()
        .with_context(|| format!("read csv header: {}", input.display()))?
        .clone();
    let header_row: Vec<String> = headers.iter().map(str::to_string).collect();
    let renames = plan_renames(&header_row, index);

    let mut writer = csv::Writer::from_path(output)
        .with_context(|| format!("write csv: {}", output.display()))?;
    writer
        .write_record(renames.iter().map(|r| r.standardized.as_str()))
        .with_context(|| format!("write csv header: {}", output.display()))?;

    let mut record = csv::StringRecord::new();
    let mut rows = 0u64;
    while reader
        .read_record(&mut record)
        .with_context(|| format!("read record: {}", input.display()))?
    {
        writer
            .write_record(&record)
            .with_context(|| format!("write record: {}", output.display()))?;
        rows += 1;
    }
    writer
        .flush()
        .with_context(|| format!("flush csv: {}", output.display()))?;

    tracing::debug!(
        input = %input.display(),
        output = %output.display(),
        rows,
        renamed = renames.iter().filter(|r| r.changed()).count(),
        "standardized csv headers"
    );

    Ok(renames)
}
