//! Structural schema validation.
//!
//! Checks a loaded [`DvSchema`] for integrity defects: missing required
//! fields, duplicate ids, duplicate or reserved aliases, and malformed
//! measurement blocks. Catalog schemas get the full set; legacy schemas
//! only the checks their format supports. Every finding becomes an
//! [`Issue`] in the report; nothing here panics or short-circuits.

use std::collections::{BTreeMap, BTreeSet};

use serde::Serialize;

use dv_model::{ClusterSet, Direction, DvEntry, DvSchema, MeasurementBlock, MeasurementCategory,
    ScaleType, SchemaFormat};

/// Aliases that collide with null-ish spellings in survey exports.
const RESERVED_ALIAS_KEYWORDS: [&str; 5] = ["null", "none", "nan", "undefined", "n/a"];

/// Issue severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Severity {
    Error,
    Warning,
}

/// A single validation finding.
#[derive(Debug, Clone, Serialize)]
pub struct Issue {
    pub severity: Severity,
    pub category: String,
    /// The DV id (or placeholder) the finding belongs to, when it has one.
    pub entry: Option<String>,
    pub message: String,
}

/// Validation report for one schema file.
#[derive(Debug, Clone, Serialize)]
pub struct ValidationReport {
    pub format: String,
    pub issues: Vec<Issue>,
}

impl ValidationReport {
    pub fn new(format: SchemaFormat) -> Self {
        Self {
            format: format.as_str().to_string(),
            issues: Vec::new(),
        }
    }

    pub fn has_errors(&self) -> bool {
        self.issues.iter().any(|i| i.severity == Severity::Error)
    }

    pub fn error_count(&self) -> usize {
        self.issues
            .iter()
            .filter(|i| i.severity == Severity::Error)
            .count()
    }

    pub fn warning_count(&self) -> usize {
        self.issues
            .iter()
            .filter(|i| i.severity == Severity::Warning)
            .count()
    }
}

/// Validation context.
#[derive(Debug, Clone, Copy, Default)]
pub struct Validator<'a> {
    clusters: Option<&'a ClusterSet>,
}

impl<'a> Validator<'a> {
    pub fn new() -> Self {
        Self { clusters: None }
    }

    /// Supply the thematic cluster set so entry cluster references can be
    /// cross-checked. Without it those checks are skipped.
    pub fn with_clusters(mut self, clusters: &'a ClusterSet) -> Self {
        self.clusters = Some(clusters);
        self
    }

    pub fn validate(&self, schema: &DvSchema) -> ValidationReport {
        let mut report = ValidationReport::new(schema.format);
        match schema.format {
            SchemaFormat::Catalog => self.validate_catalog(schema, &mut report),
            SchemaFormat::Legacy => self.validate_legacy(schema, &mut report),
        }
        report
    }

    fn validate_catalog(&self, schema: &DvSchema, report: &mut ValidationReport) {
        let mut seen_ids: BTreeSet<String> = BTreeSet::new();
        let mut alias_counts: BTreeMap<String, usize> = BTreeMap::new();

        for (index, entry) in schema.entries.iter().enumerate() {
            let id = entry.display_id(index);

            // Without an id none of the other findings can be attributed,
            // so the entry is reported once and skipped.
            if entry.id.as_deref().is_none_or(|s| s.trim().is_empty()) {
                report.issues.push(error(
                    "Missing Field",
                    Some(&id),
                    format!("entry at index {index} is missing required field 'id'"),
                ));
                continue;
            }

            if !seen_ids.insert(id.clone()) {
                report.issues.push(error(
                    "Duplicate Id",
                    Some(&id),
                    format!("duplicate DV id '{id}'"),
                ));
            }

            if entry.label.as_deref().is_none_or(|s| s.trim().is_empty()) {
                report.issues.push(error(
                    "Missing Field",
                    Some(&id),
                    format!("DV '{id}' is missing required field 'label'"),
                ));
            }

            match &entry.cluster {
                None => report.issues.push(error(
                    "Missing Field",
                    Some(&id),
                    format!("DV '{id}' is missing required field 'cluster'"),
                )),
                Some(cluster) => {
                    if let Some(set) = self.clusters
                        && !set.contains(cluster)
                    {
                        report.issues.push(error(
                            "Unknown Cluster",
                            Some(&id),
                            format!("DV '{id}' references unknown cluster '{cluster}'"),
                        ));
                    }
                }
            }

            if entry.aliases.is_empty() {
                report.issues.push(error(
                    "Missing Field",
                    Some(&id),
                    format!("DV '{id}' has no aliases"),
                ));
            }
            collect_aliases(entry, &id, &mut alias_counts, report, true);

            if let Some(block) = &entry.measurement {
                check_measurement(&id, block, report);
            }
        }

        report_duplicate_aliases(&alias_counts, report);
    }

    fn validate_legacy(&self, schema: &DvSchema, report: &mut ValidationReport) {
        let mut alias_counts: BTreeMap<String, usize> = BTreeMap::new();

        for (index, entry) in schema.entries.iter().enumerate() {
            let id = entry.display_id(index);

            if entry.id.as_deref().is_none_or(|s| s.trim().is_empty()) {
                report.issues.push(error(
                    "Missing Field",
                    Some(&id),
                    format!("entry at index {index} has an empty standard name"),
                ));
            }

            if entry.aliases.is_empty() {
                report.issues.push(error(
                    "Missing Field",
                    Some(&id),
                    format!("'{id}' must map to a non-empty alias list"),
                ));
            }
            collect_aliases(entry, &id, &mut alias_counts, report, false);
        }

        report_duplicate_aliases(&alias_counts, report);
    }
}

/// Validate with an optional cluster set in one call.
pub fn validate_schema(schema: &DvSchema, clusters: Option<&ClusterSet>) -> ValidationReport {
    let mut validator = Validator::new();
    if let Some(set) = clusters {
        validator = validator.with_clusters(set);
    }
    validator.validate(schema)
}

fn collect_aliases(
    entry: &DvEntry,
    id: &str,
    alias_counts: &mut BTreeMap<String, usize>,
    report: &mut ValidationReport,
    check_reserved: bool,
) {
    for alias in &entry.aliases {
        let trimmed = alias.trim();
        if trimmed.is_empty() {
            report.issues.push(error(
                "Invalid Alias",
                Some(id),
                format!("DV '{id}' has an empty alias"),
            ));
        } else if check_reserved && is_reserved_alias(trimmed) {
            report.issues.push(error(
                "Invalid Alias",
                Some(id),
                format!("DV '{id}': alias '{alias}' is a reserved keyword"),
            ));
        } else {
            *alias_counts.entry(alias.clone()).or_insert(0) += 1;
        }
    }
}

fn report_duplicate_aliases(alias_counts: &BTreeMap<String, usize>, report: &mut ValidationReport) {
    for (alias, count) in alias_counts {
        if *count > 1 {
            report.issues.push(error(
                "Duplicate Alias",
                None,
                format!("alias '{alias}' appears {count} times across the schema"),
            ));
        }
    }
}

fn check_measurement(id: &str, block: &MeasurementBlock, report: &mut ValidationReport) {
    if block.category.trim().is_empty() {
        report.issues.push(error(
            "Measurement Metadata",
            Some(id),
            format!("DV '{id}' measurement block is missing 'category'"),
        ));
    } else if block.category.parse::<MeasurementCategory>().is_err() {
        report.issues.push(error(
            "Measurement Metadata",
            Some(id),
            format!(
                "DV '{id}' measurement block has unknown category '{}'",
                block.category
            ),
        ));
    }

    if block.scale_type.trim().is_empty() {
        report.issues.push(error(
            "Measurement Metadata",
            Some(id),
            format!("DV '{id}' measurement block is missing 'scale_type'"),
        ));
    } else if block.scale_type.parse::<ScaleType>().is_err() {
        report.issues.push(error(
            "Measurement Metadata",
            Some(id),
            format!(
                "DV '{id}' measurement block has unknown scale_type '{}'",
                block.scale_type
            ),
        ));
    }

    if block.direction.trim().is_empty() {
        report.issues.push(error(
            "Measurement Metadata",
            Some(id),
            format!("DV '{id}' measurement block is missing 'direction'"),
        ));
    } else if block.direction.parse::<Direction>().is_err() {
        report.issues.push(error(
            "Measurement Metadata",
            Some(id),
            format!(
                "DV '{id}' measurement block has unknown direction '{}'",
                block.direction
            ),
        ));
    }

    if block.primary_unit.trim().is_empty() {
        report.issues.push(error(
            "Measurement Metadata",
            Some(id),
            format!("DV '{id}' measurement block is missing 'primary_unit'"),
        ));
    }
    if block.allowed_units.is_empty() {
        report.issues.push(error(
            "Measurement Metadata",
            Some(id),
            format!("DV '{id}' measurement block has no allowed_units"),
        ));
    } else if !block.primary_unit.trim().is_empty()
        && !block.allowed_units.contains(&block.primary_unit)
    {
        report.issues.push(Issue {
            severity: Severity::Warning,
            category: "Measurement Metadata".to_string(),
            entry: Some(id.to_string()),
            message: format!(
                "DV '{id}': primary_unit '{}' is not listed in allowed_units",
                block.primary_unit
            ),
        });
    }
}

fn is_reserved_alias(alias: &str) -> bool {
    let lowered = alias.to_lowercase();
    RESERVED_ALIAS_KEYWORDS.contains(&lowered.as_str())
}

fn error(category: &str, entry: Option<&str>, message: String) -> Issue {
    Issue {
        severity: Severity::Error,
        category: category.to_string(),
        entry: entry.map(str::to_string),
        message,
    }
}
