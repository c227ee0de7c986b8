pub mod cluster;
pub mod enums;
pub mod error;
pub mod meta;
pub mod schema;

pub use cluster::{Cluster, ClusterSet};
pub use enums::{Direction, MeasurementCategory, ScaleType};
pub use error::{ModelError, Result};
pub use meta::{MeasurementMeta, MetaOrigin};
pub use schema::{DvEntry, DvSchema, MeasurementBlock, SchemaFormat};
