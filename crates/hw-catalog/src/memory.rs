//! In-memory catalog backed by a YAML/JSON snapshot
//!
//! Table-level lineage is kept in a petgraph graph whose edges point from
//! producer to consumer, so an upstream traversal walks incoming edges.

use crate::error::{CatalogError, CatalogResult};
use crate::traits::CatalogClient;
use crate::types::{
    ColumnLineage, ColumnLineageMapping, LineageDirection, LineageEdge, LineageNode,
    LineageResult, SchemaField, SchemaMetadata,
};
use async_trait::async_trait;
use hw_core::DatasetUrn;
use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::visit::EdgeRef;
use petgraph::Direction;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap, VecDeque};
use std::path::Path;

/// A dataset-level edge in a snapshot
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SnapshotEdge {
    pub upstream: String,
    pub downstream: String,
}

/// A column-level edge in a snapshot
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SnapshotColumnEdge {
    pub downstream_dataset: String,
    pub downstream_column: String,
    pub upstream_dataset: String,
    pub upstream_column: String,
}

/// Serialized form of a catalog
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CatalogSnapshot {
    #[serde(default)]
    pub datasets: BTreeMap<String, SchemaMetadata>,
    #[serde(default)]
    pub lineage: Vec<SnapshotEdge>,
    #[serde(default)]
    pub column_lineage: Vec<SnapshotColumnEdge>,
}

/// Catalog held entirely in memory
#[derive(Debug, Default)]
pub struct MemoryCatalog {
    schemas: HashMap<String, SchemaMetadata>,
    graph: DiGraph<String, ()>,
    node_map: HashMap<String, NodeIndex>,
    column_lineage: HashMap<String, Vec<ColumnLineageMapping>>,
}

impl MemoryCatalog {
    /// Create an empty catalog
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a snapshot file
    pub fn load(path: &Path) -> CatalogResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| CatalogError::SnapshotLoad {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        let snapshot: CatalogSnapshot =
            serde_yaml::from_str(&content).map_err(|e| CatalogError::SnapshotLoad {
                path: path.display().to_string(),
                message: e.to_string(),
            })?;
        Self::from_snapshot(snapshot)
    }

    /// Build a catalog from a parsed snapshot
    pub fn from_snapshot(snapshot: CatalogSnapshot) -> CatalogResult<Self> {
        let mut catalog = Self::new();
        for (urn, schema) in snapshot.datasets {
            DatasetUrn::parse(urn.as_str())
                .map_err(|e| CatalogError::InvalidSnapshot(e.to_string()))?;
            catalog.insert_dataset(urn, schema.fields);
        }
        for edge in snapshot.lineage {
            if edge.upstream == edge.downstream {
                return Err(CatalogError::InvalidSnapshot(format!(
                    "dataset '{}' is listed as its own upstream",
                    edge.upstream
                )));
            }
            catalog.add_lineage(&edge.upstream, &edge.downstream);
        }
        for edge in snapshot.column_lineage {
            catalog.add_column_lineage(
                &edge.downstream_dataset,
                &edge.downstream_column,
                &edge.upstream_dataset,
                &edge.upstream_column,
            );
        }
        Ok(catalog)
    }

    /// Register (or replace) a dataset schema
    pub fn insert_dataset(&mut self, urn: impl Into<String>, fields: Vec<SchemaField>) {
        let urn = urn.into();
        self.node(&urn);
        self.schemas.insert(urn, SchemaMetadata::new(fields));
    }

    /// Record that `downstream` is derived from `upstream`
    pub fn add_lineage(&mut self, upstream: &str, downstream: &str) {
        let up = self.node(upstream);
        let down = self.node(downstream);
        if self.graph.find_edge(up, down).is_none() {
            self.graph.add_edge(up, down, ());
        }
    }

    /// Record a column-to-column edge into `downstream_dataset`
    pub fn add_column_lineage(
        &mut self,
        downstream_dataset: &str,
        downstream_column: &str,
        upstream_dataset: &str,
        upstream_column: &str,
    ) {
        self.column_lineage
            .entry(downstream_dataset.to_string())
            .or_default()
            .push(ColumnLineageMapping {
                downstream_column: downstream_column.to_string(),
                upstream_dataset: upstream_dataset.to_string(),
                upstream_column: upstream_column.to_string(),
            });
    }

    /// Number of datasets with a registered schema
    pub fn dataset_count(&self) -> usize {
        self.schemas.len()
    }

    fn node(&mut self, urn: &str) -> NodeIndex {
        if let Some(&idx) = self.node_map.get(urn) {
            idx
        } else {
            let idx = self.graph.add_node(urn.to_string());
            self.node_map.insert(urn.to_string(), idx);
            idx
        }
    }

    fn knows(&self, urn: &str) -> bool {
        self.schemas.contains_key(urn)
            || self.node_map.contains_key(urn)
            || self.column_lineage.contains_key(urn)
    }

    /// Breadth-first walk recording each dataset's shortest hop distance
    fn traverse(&self, start: NodeIndex, direction: LineageDirection, depth: usize) -> LineageResult {
        let graph_dir = match direction {
            LineageDirection::Upstream => Direction::Incoming,
            LineageDirection::Downstream => Direction::Outgoing,
        };

        let mut levels: HashMap<NodeIndex, usize> = HashMap::new();
        let mut order = Vec::new();
        let mut edges = Vec::new();
        let mut queue = VecDeque::new();

        levels.insert(start, 0);
        order.push(start);
        queue.push_back(start);

        while let Some(current) = queue.pop_front() {
            let level = levels[&current];
            if level >= depth {
                continue;
            }
            for edge in self.graph.edges_directed(current, graph_dir) {
                let next = match direction {
                    LineageDirection::Upstream => edge.source(),
                    LineageDirection::Downstream => edge.target(),
                };
                edges.push(LineageEdge {
                    source: self.graph[edge.source()].clone(),
                    target: self.graph[edge.target()].clone(),
                });
                if !levels.contains_key(&next) {
                    levels.insert(next, level + 1);
                    order.push(next);
                    queue.push_back(next);
                }
            }
        }

        LineageResult {
            start: self.graph[start].clone(),
            direction,
            nodes: order
                .into_iter()
                .map(|idx| LineageNode {
                    urn: self.graph[idx].clone(),
                    level: levels[&idx],
                })
                .collect(),
            edges,
        }
    }
}

#[async_trait]
impl CatalogClient for MemoryCatalog {
    async fn get_schema(&self, urn: &str) -> CatalogResult<SchemaMetadata> {
        self.schemas
            .get(urn)
            .cloned()
            .ok_or_else(|| CatalogError::DatasetNotFound(urn.to_string()))
    }

    async fn get_lineage(
        &self,
        urn: &str,
        direction: LineageDirection,
        depth: usize,
    ) -> CatalogResult<LineageResult> {
        let start = self
            .node_map
            .get(urn)
            .copied()
            .ok_or_else(|| CatalogError::DatasetNotFound(urn.to_string()))?;
        Ok(self.traverse(start, direction, depth))
    }

    async fn get_column_lineage(&self, urn: &str) -> CatalogResult<ColumnLineage> {
        if !self.knows(urn) {
            return Err(CatalogError::DatasetNotFound(urn.to_string()));
        }
        Ok(ColumnLineage {
            dataset_urn: urn.to_string(),
            mappings: self.column_lineage.get(urn).cloned().unwrap_or_default(),
        })
    }

    fn catalog_type(&self) -> &'static str {
        "memory"
    }
}

#[cfg(test)]
#[path = "memory_test.rs"]
mod tests;
