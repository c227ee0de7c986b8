#![deny(unsafe_code)]

pub mod error;
pub mod hash;
pub mod loaders;
pub mod paths;
pub mod rules;
mod yaml;

pub use crate::error::StandardsError;
pub use crate::hash::{sha256_file, sha256_hex};
pub use crate::loaders::{load_clusters, load_schema, save_schema};
pub use crate::paths::{
    SCHEMAS_ENV_VAR, default_clusters_path, default_rules_path, default_schema_path, schemas_root,
};
pub use crate::rules::{
    CategoryRule, CompiledPattern, InstrumentSignature, RuleRepository, UnitRule, load_rules,
};
