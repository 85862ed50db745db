//! Error types for hw-catalog

use thiserror::Error;

/// Catalog access errors
#[derive(Error, Debug)]
pub enum CatalogError {
    /// Dataset not found (K001)
    #[error("[K001] Dataset not found: {0}")]
    DatasetNotFound(String),

    /// Snapshot could not be loaded (K002)
    #[error("[K002] Failed to load catalog snapshot '{path}': {message}")]
    SnapshotLoad { path: String, message: String },

    /// Snapshot content is inconsistent (K003)
    #[error("[K003] Invalid catalog snapshot: {0}")]
    InvalidSnapshot(String),

    /// Backend failure (K004)
    #[error("[K004] Catalog backend error: {0}")]
    Backend(String),
}

/// Result type alias for CatalogError
pub type CatalogResult<T> = Result<T, CatalogError>;
