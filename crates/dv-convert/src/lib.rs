//! Dataset conversion: header standardization plus the metadata sidecar.

#![deny(unsafe_code)]

pub mod headers;
pub mod metadata;
pub mod sidecar;

pub use headers::{HeaderRename, plan_renames, read_headers, standardize_headers};
pub use metadata::{ColumnMetadata, build_column_metadata};
pub use sidecar::{
    CategoryCounts, ColumnMap, FileFingerprint, Sidecar, SidecarSummary, sidecar_path,
    write_sidecar,
};
