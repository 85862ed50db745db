//! hw-catalog - Catalog contract for Headwater
//!
//! This crate defines the narrow, read-only view of the metadata catalog
//! that lineage resolution depends on (the `CatalogClient` trait and its
//! wire types), and `MemoryCatalog`, an implementation backed by a
//! YAML/JSON snapshot.

pub mod error;
pub mod memory;
pub mod traits;
pub mod types;

pub use error::{CatalogError, CatalogResult};
pub use memory::{CatalogSnapshot, MemoryCatalog, SnapshotColumnEdge, SnapshotEdge};
pub use traits::CatalogClient;
pub use types::{
    leaf_name, ColumnLineage, ColumnLineageMapping, LineageDirection, LineageEdge, LineageNode,
    LineageResult, SchemaField, SchemaMetadata, Tag, TermAssociation,
};
