use std::path::PathBuf;

use tempfile::TempDir;

use dv_model::{MeasurementCategory, SchemaFormat};
use dv_standards::{StandardsError, load_clusters, load_schema, save_schema, sha256_file};

const CATALOG_YAML: &str = r#"
version: "2.1"
dvs:
  - id: task_completion_time
    label: Task Completion Time
    cluster: performance
    aliases: [completion_time, task_time, time_on_task]
    measurement:
      category: Time
      primary_unit: s
      allowed_units: [s, ms, min]
      scale_type: ratio
      direction: lower_is_better
  - id: error_rate
    label: Error Rate
    cluster: performance
    aliases: [err_rate, error_pct]
  - label: Orphan Without Id
    aliases: [orphan]
"#;

const LEGACY_YAML: &str = r#"
task_completion_time: [completion_time, task_time]
error_rate: [err_rate]
sus_score: not_a_list
"#;

const CLUSTERS_YAML: &str = r#"
clusters:
  - id: performance
    label: Task Performance
    description: Speed and correctness of task execution.
  - id: workload
    label: Perceived Workload
"#;

fn write_file(dir: &TempDir, name: &str, contents: &str) -> PathBuf {
    let path = dir.path().join(name);
    std::fs::write(&path, contents).unwrap();
    path
}

#[test]
fn loads_catalog_schema_in_file_order() {
    let dir = TempDir::new().unwrap();
    let schema = load_schema(&write_file(&dir, "schema.yaml", CATALOG_YAML)).expect("load schema");

    assert_eq!(schema.format, SchemaFormat::Catalog);
    assert_eq!(schema.version.as_deref(), Some("2.1"));
    assert_eq!(schema.entries.len(), 3);
    assert_eq!(schema.entries[0].id.as_deref(), Some("task_completion_time"));
    assert_eq!(schema.entries[1].id.as_deref(), Some("error_rate"));
    assert!(schema.entries[2].id.is_none());
    assert_eq!(schema.entries[2].display_id(2), "<missing_id_at_index_2>");

    let block = schema.entries[0]
        .measurement
        .as_ref()
        .expect("measurement block");
    assert_eq!(block.category, "Time");
    assert_eq!(block.allowed_units, vec!["s", "ms", "min"]);

    let meta = schema
        .resolve_measurement("task_completion_time")
        .expect("vocabulary is valid")
        .expect("block present");
    assert_eq!(meta.category, MeasurementCategory::Time);
    assert_eq!(meta.confidence, 1.0);
}

#[test]
fn loads_legacy_schema_with_lenient_alias_lists() {
    let dir = TempDir::new().unwrap();
    let schema = load_schema(&write_file(&dir, "schema.yaml", LEGACY_YAML)).expect("load schema");

    assert_eq!(schema.format, SchemaFormat::Legacy);
    assert!(schema.version.is_none());
    assert_eq!(schema.entries.len(), 3);
    assert_eq!(
        schema.entries[0].aliases,
        vec!["completion_time", "task_time"]
    );
    // scalar instead of list loads as empty; the validator reports it
    assert_eq!(schema.entries[2].id.as_deref(), Some("sus_score"));
    assert!(schema.entries[2].aliases.is_empty());
}

#[test]
fn rejects_non_mapping_root() {
    let dir = TempDir::new().unwrap();
    let err = load_schema(&write_file(&dir, "schema.yaml", "- a\n- b\n")).unwrap_err();
    assert!(matches!(err, StandardsError::InvalidSchema { .. }));
    assert!(err.to_string().contains("root must be a mapping"));
}

#[test]
fn rejects_non_list_dvs() {
    let dir = TempDir::new().unwrap();
    let err = load_schema(&write_file(&dir, "schema.yaml", "dvs: 12\n")).unwrap_err();
    assert!(err.to_string().contains("'dvs' must be a list"));
}

#[test]
fn loads_clusters() {
    let dir = TempDir::new().unwrap();
    let clusters =
        load_clusters(&write_file(&dir, "clusters.yaml", CLUSTERS_YAML)).expect("load clusters");
    assert_eq!(clusters.len(), 2);
    assert!(clusters.contains("performance"));
    assert!(clusters.contains("workload"));
    assert_eq!(
        clusters.get("workload").and_then(|c| c.label.as_deref()),
        Some("Perceived Workload")
    );
    assert!(clusters.get("workload").unwrap().description.is_none());
}

#[test]
fn save_catalog_round_trips_entry_order() {
    let dir = TempDir::new().unwrap();
    let schema = load_schema(&write_file(&dir, "schema.yaml", CATALOG_YAML)).expect("load schema");

    let out = dir.path().join("saved.yaml");
    save_schema(&schema, &out).expect("save schema");
    let round = load_schema(&out).expect("reload saved schema");

    assert_eq!(round, schema);
}

#[test]
fn save_legacy_round_trips() {
    let dir = TempDir::new().unwrap();
    let schema = load_schema(&write_file(&dir, "schema.yaml", LEGACY_YAML)).expect("load schema");

    let out = dir.path().join("saved.yaml");
    save_schema(&schema, &out).expect("save schema");
    let round = load_schema(&out).expect("reload saved schema");

    assert_eq!(round.format, SchemaFormat::Legacy);
    let ids: Vec<_> = round.entries.iter().filter_map(|e| e.id.clone()).collect();
    assert_eq!(ids, vec!["task_completion_time", "error_rate", "sus_score"]);
}

#[test]
fn merge_then_save_appends_new_entries_last() {
    let dir = TempDir::new().unwrap();
    let schema = load_schema(&write_file(&dir, "schema.yaml", CATALOG_YAML)).expect("load schema");
    let merged = schema.merge_suggestions(&[(
        "sus_score".to_string(),
        vec!["sus".to_string(), "usability_score".to_string()],
    )]);

    let out = dir.path().join("merged.yaml");
    save_schema(&merged, &out).expect("save schema");
    let round = load_schema(&out).expect("reload merged schema");

    let last = round.entries.last().expect("appended entry");
    assert_eq!(last.id.as_deref(), Some("sus_score"));
    assert_eq!(last.aliases, vec!["sus", "usability_score"]);
}

#[test]
fn fingerprints_are_stable_per_content() {
    let dir = TempDir::new().unwrap();
    let a = write_file(&dir, "a.yaml", CLUSTERS_YAML);
    let b = write_file(&dir, "b.yaml", CLUSTERS_YAML);
    let c = write_file(&dir, "c.yaml", CATALOG_YAML);

    let hash_a = sha256_file(&a).unwrap();
    assert_eq!(hash_a, sha256_file(&b).unwrap());
    assert_ne!(hash_a, sha256_file(&c).unwrap());
    assert_eq!(hash_a.len(), 64);
}
