//! Explicit alias resolution

use crate::field_index::FieldIndex;
use crate::resolver::{ColumnMap, LineageResolver};
use crate::transform::transform_column_name;
use hw_core::{AliasConfig, DatasetUrn, InheritedMetadata, MatchMethod};
use std::collections::BTreeSet;

/// First alias, in declaration order, with a target glob matching `table_name`
pub(crate) fn resolve_alias<'a>(aliases: &'a [AliasConfig], table_name: &str) -> Option<&'a AliasConfig> {
    aliases
        .iter()
        .find(|alias| alias.targets.iter().any(|target| target.matches(table_name)))
}

impl LineageResolver {
    /// Inherit from the alias source table.
    ///
    /// The explicit column mapping takes precedence; other columns are
    /// matched by their transformed name.
    pub(crate) async fn inherit_from_alias(
        &self,
        columns: &mut ColumnMap,
        undocumented: &BTreeSet<String>,
        alias: &AliasConfig,
    ) {
        if alias.source.split('.').count() < 2 {
            log::warn!(
                "Skipping alias with source '{}': expected schema.table",
                alias.source
            );
            return;
        }

        let source_urn = DatasetUrn::build(&self.platform, &alias.source);
        let schema = match self.client.get_schema(&source_urn).await {
            Ok(schema) => schema,
            Err(e) => {
                log::warn!("Alias source {} unavailable: {}", source_urn, e);
                return;
            }
        };

        let index = FieldIndex::build(&schema.fields);
        let applier = self.applier();
        for target_col in undocumented {
            let source_col = alias
                .column_mapping
                .get(target_col)
                .cloned()
                .unwrap_or_else(|| transform_column_name(target_col, &self.cfg.column_transforms));

            let (Some(source), Some(target)) = (index.by_leaf(&source_col), columns.get_mut(target_col))
            else {
                continue;
            };
            applier.inherit(
                target,
                source,
                InheritedMetadata {
                    source_urn: source_urn.to_string(),
                    source_column: source_col,
                    hops: 1,
                    match_method: MatchMethod::Alias,
                },
            );
        }
    }
}
