//! Schemas directory path resolution.

use std::path::PathBuf;

/// Environment variable for overriding the schemas directory.
pub const SCHEMAS_ENV_VAR: &str = "DV_SCHEMAS_DIR";

/// Get the schemas root directory.
///
/// Resolution order:
/// 1. `DV_SCHEMAS_DIR` environment variable
/// 2. `schemas/` directory relative to workspace root
pub fn schemas_root() -> PathBuf {
    if let Ok(root) = std::env::var(SCHEMAS_ENV_VAR) {
        return PathBuf::from(root);
    }
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../schemas")
}

/// Default inference rules file path.
pub fn default_rules_path() -> PathBuf {
    schemas_root().join("inference_rules.yaml")
}

/// Default standard DV mapping schema path.
pub fn default_schema_path() -> PathBuf {
    schemas_root().join("standard_dv_mapping.yaml")
}

/// Default thematic clusters file path.
pub fn default_clusters_path() -> PathBuf {
    schemas_root().join("thematic_clusters.yaml")
}
