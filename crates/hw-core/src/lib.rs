//! hw-core - Core library for Headwater
//!
//! This crate provides the shared semantic types (column context, glossary
//! terms, inheritance provenance), the lineage configuration and its total
//! parser, dataset URN handling, and the metadata sanitizer used by every
//! other Headwater component.

pub mod config;
pub mod error;
pub mod sanitize;
pub mod semantic;
pub(crate) mod serde_helpers;
pub mod table;

pub use config::{
    AliasConfig, ColumnTransform, ConflictResolution, HeadwaterConfig, LineageConfig,
    MetadataKind, RawLineageConfig, SemanticConfig, TargetPattern,
};
pub use error::{CoreError, CoreResult};
pub use sanitize::{SanitizeConfig, Sanitizer};
pub use semantic::{ColumnContext, GlossaryTerm, InheritedMetadata, MatchMethod};
pub use table::{DatasetUrn, TableIdentifier};
