//! Thematic clusters grouping related dependent variables.

use serde::{Deserialize, Serialize};

/// One thematic cluster (e.g. performance, workload, usability).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Cluster {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// The cluster catalog, in source-file order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ClusterSet {
    pub clusters: Vec<Cluster>,
}

impl ClusterSet {
    pub fn contains(&self, id: &str) -> bool {
        self.clusters.iter().any(|cluster| cluster.id == id)
    }

    pub fn get(&self, id: &str) -> Option<&Cluster> {
        self.clusters.iter().find(|cluster| cluster.id == id)
    }

    pub fn len(&self) -> usize {
        self.clusters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.clusters.is_empty()
    }
}
