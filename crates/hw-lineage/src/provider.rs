//! Table-oriented entry point over the resolver

use crate::error::{LineageError, ResolverResult};
use crate::resolver::{ColumnMap, LineageResolver};
use hw_core::{ColumnContext, TableIdentifier};

/// Semantic column metadata for tables addressed by name
pub struct SemanticColumns {
    resolver: LineageResolver,
}

impl SemanticColumns {
    pub fn new(resolver: LineageResolver) -> Self {
        Self { resolver }
    }

    pub fn resolver(&self) -> &LineageResolver {
        &self.resolver
    }

    /// Context for every column of `table`
    pub async fn columns_context(&self, table: &TableIdentifier) -> ResolverResult<ColumnMap> {
        let urn = table.to_urn(self.resolver.platform());
        self.resolver
            .resolve_columns_with_lineage(&urn, &table.to_string())
            .await
    }

    /// Context for one column of `table`
    pub async fn column_context(
        &self,
        table: &TableIdentifier,
        column: &str,
    ) -> ResolverResult<ColumnContext> {
        let mut columns = self.columns_context(table).await?;
        columns
            .remove(column)
            .ok_or_else(|| LineageError::ColumnNotFound {
                table: table.to_string(),
                column: column.to_string(),
            })
    }
}
