//! hw-lineage - Lineage-aware column documentation
//!
//! Given a table, this crate fills in column descriptions, glossary terms
//! and tags the table itself lacks by tracing where its data came from.
//! Strategies are tried in a fixed order: a configured alias (exclusive
//! when it matches), then fine-grained column lineage, then table-level
//! lineage matched by column name, nearest hop first.

pub(crate) mod alias;
pub(crate) mod column_lineage;
pub mod error;
pub(crate) mod field_index;
pub(crate) mod gaps;
pub(crate) mod inherit;
pub mod provider;
pub mod resolver;
pub(crate) mod table_lineage;
pub(crate) mod transform;

#[cfg(any(test, feature = "test-support"))]
pub mod test_utils;

pub use error::{LineageError, ResolverResult};
pub use provider::SemanticColumns;
pub use resolver::{ColumnMap, LineageResolver};
