//! Dataset conversion pipeline behind the `convert` subcommand.
//!
//! The pipeline runs these stages in order:
//! 1. **Load**: read the DV schema and build the alias index
//! 2. **Standardize**: rewrite the CSV header row, streaming data rows
//! 3. **Metadata**: resolve or infer measurement metadata per column
//! 4. **Sidecar**: write the JSON sidecar next to the output
//!
//! A dry run stops after planning the header renames; nothing is written.

use std::path::PathBuf;
use std::time::Instant;

use anyhow::{Context, Result};
use tracing::{debug, info, info_span};

use dv_convert::{
    ColumnMetadata, FileFingerprint, HeaderRename, Sidecar, build_column_metadata, plan_renames,
    read_headers, standardize_headers, write_sidecar,
};
use dv_standards::{load_rules, load_schema};

/// Conversion inputs resolved from CLI flags.
#[derive(Debug, Clone)]
pub struct ConvertOptions {
    pub input: PathBuf,
    pub output: PathBuf,
    pub schema_path: PathBuf,
    pub rules_path: PathBuf,
    /// Write the measurement metadata sidecar next to the output.
    pub with_metadata: bool,
    /// Plan the header mapping without writing any file.
    pub dry_run: bool,
    /// Confidence below which an inferred column is flagged for review.
    pub confidence_threshold: f32,
}

/// Result of one dataset conversion.
#[derive(Debug)]
pub struct ConvertOutcome {
    /// Per-column rename outcomes in input column order.
    pub renames: Vec<HeaderRename>,
    /// Metadata per output column; empty without `--with-metadata`.
    pub columns: Vec<(String, ColumnMetadata)>,
    /// Path of the written sidecar, when one was written.
    pub metadata_path: Option<PathBuf>,
    /// Version declared by the schema file, when present.
    pub schema_version: Option<String>,
}

impl ConvertOutcome {
    /// Number of columns whose header actually changed.
    pub fn renamed_count(&self) -> usize {
        self.renames.iter().filter(|rename| rename.changed()).count()
    }

    /// Output columns flagged for manual review, in column order.
    pub fn review_columns(&self) -> Vec<&str> {
        self.columns
            .iter()
            .filter(|(_, column)| column.meta.needs_review)
            .map(|(name, _)| name.as_str())
            .collect()
    }
}

/// Run the conversion pipeline over one CSV dataset.
pub fn convert_dataset(options: &ConvertOptions) -> Result<ConvertOutcome> {
    let convert_span = info_span!("convert", input = %options.input.display());
    let _convert_guard = convert_span.enter();
    let convert_start = Instant::now();

    let schema = load_schema(&options.schema_path).context("load schema")?;
    let index = schema.alias_index();
    debug!(
        schema = %options.schema_path.display(),
        entries = schema.entries.len(),
        aliases = index.len(),
        "schema loaded"
    );

    if options.dry_run {
        let headers = read_headers(&options.input)?;
        let renames = plan_renames(&headers, &index);
        let renamed = renames.iter().filter(|rename| rename.changed()).count();
        info!(
            input = %options.input.display(),
            columns = renames.len(),
            renamed,
            duration_ms = convert_start.elapsed().as_millis(),
            "conversion skipped (dry run)"
        );
        return Ok(ConvertOutcome {
            renames,
            columns: Vec::new(),
            metadata_path: None,
            schema_version: schema.version,
        });
    }

    let renames = standardize_headers(&options.input, &options.output, &index)?;
    let renamed = renames.iter().filter(|rename| rename.changed()).count();

    let mut columns = Vec::new();
    let mut metadata_path = None;
    if options.with_metadata {
        let rules = load_rules(&options.rules_path).context("load rules")?;
        let standardized: Vec<String> = renames
            .iter()
            .map(|rename| rename.standardized.clone())
            .collect();
        columns = build_column_metadata(
            &standardized,
            &schema,
            &rules,
            options.confidence_threshold,
        )?;
        let standards = vec![
            FileFingerprint::for_file(&options.schema_path)?,
            FileFingerprint::for_file(&options.rules_path)?,
        ];
        let version = schema
            .version
            .clone()
            .unwrap_or_else(|| "unknown".to_string());
        let sidecar = Sidecar::new(version, columns.clone(), standards);
        metadata_path = Some(write_sidecar(&options.output, &sidecar)?);
    }

    info!(
        input = %options.input.display(),
        output = %options.output.display(),
        columns = renames.len(),
        renamed,
        needs_review = columns
            .iter()
            .filter(|(_, column)| column.meta.needs_review)
            .count(),
        duration_ms = convert_start.elapsed().as_millis(),
        "conversion complete"
    );

    Ok(ConvertOutcome {
        renames,
        columns,
        metadata_path,
        schema_version: schema.version,
    })
}
