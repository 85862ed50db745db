//! Documentation gap detection

use hw_core::{ColumnContext, LineageConfig, MetadataKind};
use std::collections::{BTreeMap, BTreeSet};

/// Whether `column` is missing a kind that the config inherits
pub(crate) fn needs(cfg: &LineageConfig, column: &ColumnContext, kind: MetadataKind) -> bool {
    if !cfg.should_inherit(kind) {
        return false;
    }
    match kind {
        MetadataKind::Descriptions => column.description.is_empty(),
        MetadataKind::GlossaryTerms => column.glossary_terms.is_empty(),
        MetadataKind::Tags => column.tags.is_empty(),
    }
}

/// Whether `column` is missing at least one inherited kind
pub(crate) fn needs_documentation(cfg: &LineageConfig, column: &ColumnContext) -> bool {
    MetadataKind::ALL
        .iter()
        .any(|kind| needs(cfg, column, *kind))
}

/// Names of the columns that are candidates for inheritance
pub(crate) fn find_undocumented(
    cfg: &LineageConfig,
    columns: &BTreeMap<String, ColumnContext>,
) -> BTreeSet<String> {
    columns
        .iter()
        .filter(|(_, column)| needs_documentation(cfg, column))
        .map(|(name, _)| name.clone())
        .collect()
}

#[cfg(test)]
#[path = "gaps_test.rs"]
mod tests;
