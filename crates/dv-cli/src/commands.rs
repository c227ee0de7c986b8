use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use comfy_table::Table;
use tracing::warn;

use dv_cli::pipeline::{ConvertOptions, convert_dataset};
use dv_infer::{BatchItem, batch_infer};
use dv_standards::{
    default_rules_path, default_schema_path, load_clusters, load_rules, load_schema,
};
use dv_validate::{ValidationReport, validate_schema};

use crate::cli::{CatalogArgs, ConvertArgs, InferArgs, ValidateArgs};
use crate::summary::apply_table_style;
use crate::types::ConvertResult;

pub fn run_convert(args: &ConvertArgs) -> Result<ConvertResult> {
    let output = args
        .output
        .clone()
        .unwrap_or_else(|| default_output_path(&args.input));
    let options = ConvertOptions {
        input: args.input.clone(),
        output: output.clone(),
        schema_path: args.schema.clone().unwrap_or_else(default_schema_path),
        rules_path: args.rules.clone().unwrap_or_else(default_rules_path),
        with_metadata: args.with_metadata,
        dry_run: args.dry_run,
        confidence_threshold: args.confidence_threshold,
    };
    let outcome = convert_dataset(&options)?;
    for column in outcome.review_columns() {
        warn!(column = %column, "column flagged for review");
    }
    Ok(ConvertResult {
        input: args.input.clone(),
        output,
        dry_run: args.dry_run,
        outcome,
    })
}

pub fn run_infer(args: &InferArgs) -> Result<Vec<BatchItem>> {
    let rules_path = args.rules.clone().unwrap_or_else(default_rules_path);
    let rules = load_rules(&rules_path).context("load rules")?;
    Ok(batch_infer(&args.labels, args.threshold, &rules))
}

pub fn run_validate(args: &ValidateArgs) -> Result<ValidationReport> {
    let schema_path = args.schema.clone().unwrap_or_else(default_schema_path);
    let schema = load_schema(&schema_path).context("load schema")?;
    let clusters = match &args.clusters {
        Some(path) => Some(load_clusters(path).context("load clusters")?),
        None => None,
    };
    Ok(validate_schema(&schema, clusters.as_ref()))
}

pub fn run_catalog(args: &CatalogArgs) -> Result<()> {
    let schema_path = args.schema.clone().unwrap_or_else(default_schema_path);
    let schema = load_schema(&schema_path).context("load schema")?;
    let mut table = Table::new();
    table.set_header(vec!["Id", "Label", "Cluster", "Aliases", "Measurement"]);
    apply_table_style(&mut table);
    for (idx, entry) in schema.entries.iter().enumerate() {
        table.add_row(vec![
            entry.display_id(idx),
            entry.label.clone().unwrap_or_default(),
            entry.cluster.clone().unwrap_or_default(),
            entry.aliases.len().to_string(),
            if entry.measurement.is_some() {
                "yes".to_string()
            } else {
                "-".to_string()
            },
        ]);
    }
    println!("{table}");
    println!(
        "{} entries, {} aliases, {} with measurement definitions ({} format)",
        schema.entries.len(),
        schema.alias_count(),
        schema.measurement_count(),
        schema.format
    );
    Ok(())
}

/// Default output path: the input with `_standardized.csv` appended to
/// its stem, so `study.csv` becomes `study_standardized.csv`.
fn default_output_path(input: &Path) -> PathBuf {
    let mut stem = input.with_extension("").into_os_string();
    stem.push("_standardized.csv");
    PathBuf::from(stem)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_output_path() {
        assert_eq!(
            default_output_path(Path::new("study.csv")),
            PathBuf::from("study_standardized.csv")
        );
        assert_eq!(
            default_output_path(Path::new("data/run_2.csv")),
            PathBuf::from("data/run_2_standardized.csv")
        );
        assert_eq!(
            default_output_path(Path::new("plain")),
            PathBuf::from("plain_standardized.csv")
        );
    }
}
