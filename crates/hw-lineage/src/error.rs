//! Error types for hw-lineage

use hw_catalog::CatalogError;
use hw_core::CoreError;
use thiserror::Error;

/// Hard failures of column resolution.
///
/// Everything else (lineage, column lineage and upstream schema fetches)
/// degrades to "nothing inherited" and is only logged.
#[derive(Error, Debug)]
pub enum LineageError {
    /// L001: The table's own schema could not be fetched
    #[error("[L001] Failed to fetch schema for '{urn}': {source}")]
    BaseSchema {
        urn: String,
        #[source]
        source: CatalogError,
    },

    /// L002: The dataset URN or table identifier is malformed
    #[error("[L002] {0}")]
    InvalidUrn(#[from] CoreError),

    /// L003: Requested column does not exist in the table
    #[error("[L003] Column '{column}' not found in table '{table}'")]
    ColumnNotFound { table: String, column: String },
}

/// Result type alias for LineageError
pub type ResolverResult<T> = Result<T, LineageError>;
