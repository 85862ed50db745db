//! Catalog doubles for resolver tests

use async_trait::async_trait;
use hw_catalog::{
    CatalogClient, CatalogError, CatalogResult, ColumnLineage, LineageDirection, LineageResult,
    MemoryCatalog, SchemaMetadata,
};
use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

/// Catalog method, for call counting and failure injection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CatalogCall {
    GetSchema,
    GetSchemas,
    GetLineage,
    GetColumnLineage,
}

/// Wraps a [`MemoryCatalog`], counting calls and optionally failing or
/// stalling selected methods.
#[derive(Debug, Default)]
pub struct RecordingCatalog {
    inner: MemoryCatalog,
    schema_calls: AtomicUsize,
    schemas_calls: AtomicUsize,
    lineage_calls: AtomicUsize,
    column_lineage_calls: AtomicUsize,
    failing: HashSet<CatalogCall>,
    delays: HashMap<CatalogCall, Duration>,
    lineage_override: Option<LineageResult>,
    fetched: Mutex<Vec<String>>,
}

impl RecordingCatalog {
    pub fn new(inner: MemoryCatalog) -> Self {
        Self {
            inner,
            ..Default::default()
        }
    }

    /// Make every call of `call` fail with a backend error
    pub fn failing(mut self, call: CatalogCall) -> Self {
        self.failing.insert(call);
        self
    }

    /// Sleep before answering `call`
    pub fn delayed(mut self, call: CatalogCall, delay: Duration) -> Self {
        self.delays.insert(call, delay);
        self
    }

    /// Answer lineage queries with a fixed result instead of walking the graph
    pub fn with_lineage(mut self, lineage: LineageResult) -> Self {
        self.lineage_override = Some(lineage);
        self
    }

    /// Number of calls made to `call`
    pub fn calls(&self, call: CatalogCall) -> usize {
        self.counter(call).load(Ordering::SeqCst)
    }

    /// Every URN requested through the batch schema fetch, in request order
    pub fn batch_fetched(&self) -> Vec<String> {
        self.fetched
            .lock()
            .map(|urns| urns.clone())
            .unwrap_or_default()
    }

    fn counter(&self, call: CatalogCall) -> &AtomicUsize {
        match call {
            CatalogCall::GetSchema => &self.schema_calls,
            CatalogCall::GetSchemas => &self.schemas_calls,
            CatalogCall::GetLineage => &self.lineage_calls,
            CatalogCall::GetColumnLineage => &self.column_lineage_calls,
        }
    }

    async fn enter(&self, call: CatalogCall) -> CatalogResult<()> {
        self.counter(call).fetch_add(1, Ordering::SeqCst);
        if let Some(delay) = self.delays.get(&call) {
            tokio::time::sleep(*delay).await;
        }
        if self.failing.contains(&call) {
            return Err(CatalogError::Backend(format!("{call:?} unavailable")));
        }
        Ok(())
    }
}

#[async_trait]
impl CatalogClient for RecordingCatalog {
    async fn get_schema(&self, urn: &str) -> CatalogResult<SchemaMetadata> {
        self.enter(CatalogCall::GetSchema).await?;
        self.inner.get_schema(urn).await
    }

    async fn get_schemas(&self, urns: &[String]) -> CatalogResult<HashMap<String, SchemaMetadata>> {
        self.enter(CatalogCall::GetSchemas).await?;
        if let Ok(mut fetched) = self.fetched.lock() {
            fetched.extend(urns.iter().cloned());
        }
        self.inner.get_schemas(urns).await
    }

    async fn get_lineage(
        &self,
        urn: &str,
        direction: LineageDirection,
        depth: usize,
    ) -> CatalogResult<LineageResult> {
        self.enter(CatalogCall::GetLineage).await?;
        match &self.lineage_override {
            Some(lineage) => Ok(lineage.clone()),
            None => self.inner.get_lineage(urn, direction, depth).await,
        }
    }

    async fn get_column_lineage(&self, urn: &str) -> CatalogResult<ColumnLineage> {
        self.enter(CatalogCall::GetColumnLineage).await?;
        self.inner.get_column_lineage(urn).await
    }

    fn catalog_type(&self) -> &'static str {
        "recording"
    }
}
