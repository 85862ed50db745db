//! Lineage resolution orchestrator

use crate::error::{LineageError, ResolverResult};
use crate::gaps;
use crate::inherit::MetadataApplier;
use hw_catalog::{leaf_name, CatalogClient};
use hw_core::config::DEFAULT_PLATFORM;
use hw_core::{ColumnContext, DatasetUrn, LineageConfig, Sanitizer};
use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;

/// Column map produced by one resolution, keyed by leaf column name
pub type ColumnMap = BTreeMap<String, ColumnContext>;

/// Fills undocumented columns from upstream datasets.
///
/// A resolver holds no per-table state, so one instance can serve
/// concurrent resolutions for different tables.
pub struct LineageResolver {
    pub(crate) client: Arc<dyn CatalogClient>,
    pub(crate) cfg: LineageConfig,
    pub(crate) sanitizer: Sanitizer,
    pub(crate) platform: String,
}

impl LineageResolver {
    /// Create a resolver over a catalog
    pub fn new(client: Arc<dyn CatalogClient>, cfg: LineageConfig, sanitizer: Sanitizer) -> Self {
        Self {
            client,
            cfg,
            sanitizer,
            platform: DEFAULT_PLATFORM.to_string(),
        }
    }

    /// Platform used when building alias source URNs
    pub fn with_platform(mut self, platform: impl Into<String>) -> Self {
        self.platform = platform.into();
        self
    }

    /// The configuration this resolver was built with
    pub fn config(&self) -> &LineageConfig {
        &self.cfg
    }

    /// The dataset platform used for URNs
    pub fn platform(&self) -> &str {
        &self.platform
    }

    pub(crate) fn applier(&self) -> MetadataApplier<'_> {
        MetadataApplier::new(&self.cfg, &self.sanitizer)
    }

    /// Resolve every column of a table, inheriting missing metadata from
    /// upstream where the configuration allows it.
    ///
    /// Only an invalid URN or a failure to fetch the table's own schema is
    /// an error. Anything that goes wrong while looking upstream leaves the
    /// affected columns as they were.
    pub async fn resolve_columns_with_lineage(
        &self,
        urn: &str,
        table_name: &str,
    ) -> ResolverResult<ColumnMap> {
        let urn = DatasetUrn::parse(urn)?;
        let schema = self
            .client
            .get_schema(&urn)
            .await
            .map_err(|source| LineageError::BaseSchema {
                urn: urn.to_string(),
                source,
            })?;

        let applier = self.applier();
        let mut columns = ColumnMap::new();
        for field in &schema.fields {
            let name = leaf_name(&field.field_path);
            columns.insert(
                name.to_string(),
                applier.field_to_column_context(&urn, field, name),
            );
        }

        let undocumented = gaps::find_undocumented(&self.cfg, &columns);
        if undocumented.is_empty() || !self.cfg.enabled {
            return Ok(columns);
        }

        log::debug!(
            "Resolving {} undocumented column(s) of {} via {} catalog",
            undocumented.len(),
            table_name,
            self.client.catalog_type()
        );

        let pass = self.resolve_undocumented(&mut columns, &undocumented, &urn, table_name);
        if tokio::time::timeout(self.cfg.timeout, pass).await.is_err() {
            log::warn!(
                "Lineage inheritance for {} timed out after {:?}; returning partial results",
                table_name,
                self.cfg.timeout
            );
        }

        Ok(columns)
    }

    async fn resolve_undocumented(
        &self,
        columns: &mut ColumnMap,
        undocumented: &BTreeSet<String>,
        urn: &DatasetUrn,
        table_name: &str,
    ) {
        if let Some(alias) = crate::alias::resolve_alias(&self.cfg.aliases, table_name) {
            // A matching alias is the only strategy tried, even if it
            // leaves gaps.
            self.inherit_from_alias(columns, undocumented, alias).await;
            return;
        }

        if self.cfg.prefer_column_lineage {
            let inherited = self.try_column_lineage(columns, undocumented, urn).await;
            if inherited > 0 {
                return;
            }
        }

        self.try_table_lineage(columns, undocumented, urn).await;
    }
}

#[cfg(test)]
#[path = "resolver_test.rs"]
mod tests;
