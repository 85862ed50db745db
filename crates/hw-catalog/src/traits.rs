//! Catalog client trait definition

use crate::error::CatalogResult;
use crate::types::{ColumnLineage, LineageDirection, LineageResult, SchemaMetadata};
use async_trait::async_trait;
use futures::future::join_all;
use std::collections::HashMap;

/// Read-only catalog access used by lineage resolution
///
/// Implementations must be Send + Sync for async operation.
#[async_trait]
pub trait CatalogClient: Send + Sync {
    /// Fetch the schema of one dataset
    async fn get_schema(&self, urn: &str) -> CatalogResult<SchemaMetadata>;

    /// Fetch schemas for several datasets.
    ///
    /// URNs that cannot be fetched are simply absent from the result. The
    /// default implementation issues the single-dataset fetches concurrently.
    async fn get_schemas(&self, urns: &[String]) -> CatalogResult<HashMap<String, SchemaMetadata>> {
        let fetches = urns.iter().map(|urn| async move {
            let result = self.get_schema(urn).await;
            (urn, result)
        });

        let mut schemas = HashMap::with_capacity(urns.len());
        for (urn, result) in join_all(fetches).await {
            match result {
                Ok(schema) => {
                    schemas.insert(urn.clone(), schema);
                }
                Err(e) => log::debug!("Batch schema fetch skipped {}: {}", urn, e),
            }
        }
        Ok(schemas)
    }

    /// Fetch table-level lineage up to `depth` hops away
    async fn get_lineage(
        &self,
        urn: &str,
        direction: LineageDirection,
        depth: usize,
    ) -> CatalogResult<LineageResult>;

    /// Fetch fine-grained column lineage into a dataset
    async fn get_column_lineage(&self, urn: &str) -> CatalogResult<ColumnLineage>;

    /// Backend identifier for logging
    fn catalog_type(&self) -> &'static str;
}
