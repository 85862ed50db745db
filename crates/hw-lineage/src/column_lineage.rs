//! Inheritance along fine-grained column lineage

use crate::field_index::FieldIndex;
use crate::resolver::{ColumnMap, LineageResolver};
use hw_catalog::{leaf_name, ColumnLineageMapping};
use hw_core::{DatasetUrn, InheritedMetadata, MatchMethod};
use std::collections::{BTreeMap, BTreeSet};

/// Mappings into undocumented columns, grouped by upstream dataset
pub(crate) fn group_mappings_by_dataset<'a>(
    mappings: &'a [ColumnLineageMapping],
    undocumented: &BTreeSet<String>,
) -> BTreeMap<&'a str, Vec<&'a ColumnLineageMapping>> {
    let mut grouped: BTreeMap<&str, Vec<&ColumnLineageMapping>> = BTreeMap::new();
    for mapping in mappings {
        if undocumented.contains(leaf_name(&mapping.downstream_column)) {
            grouped
                .entry(mapping.upstream_dataset.as_str())
                .or_default()
                .push(mapping);
        }
    }
    grouped
}

impl LineageResolver {
    /// Inherit from the exact upstream columns named by column lineage.
    ///
    /// Returns the number of columns that inherited something.
    pub(crate) async fn try_column_lineage(
        &self,
        columns: &mut ColumnMap,
        undocumented: &BTreeSet<String>,
        urn: &DatasetUrn,
    ) -> usize {
        let lineage = match self.client.get_column_lineage(urn).await {
            Ok(lineage) => lineage,
            Err(e) => {
                log::warn!("Column lineage unavailable for {}: {}", urn, e);
                return 0;
            }
        };

        let grouped = group_mappings_by_dataset(&lineage.mappings, undocumented);
        if grouped.is_empty() {
            log::debug!("No column lineage into undocumented columns of {}", urn);
            return 0;
        }

        let upstream_urns: Vec<String> = grouped.keys().map(|u| u.to_string()).collect();
        let schemas = match self.client.get_schemas(&upstream_urns).await {
            Ok(schemas) => schemas,
            Err(e) => {
                log::warn!("Upstream schemas unavailable for {}: {}", urn, e);
                return 0;
            }
        };

        let applier = self.applier();
        let mut inherited = BTreeSet::new();
        for (upstream_urn, mappings) in &grouped {
            let Some(schema) = schemas.get(*upstream_urn) else {
                log::debug!("No schema for upstream {}", upstream_urn);
                continue;
            };
            let index = FieldIndex::build(&schema.fields);

            for mapping in mappings {
                let downstream = leaf_name(&mapping.downstream_column);
                let (Some(source), Some(target)) = (
                    index.by_path(&mapping.upstream_column),
                    columns.get_mut(downstream),
                ) else {
                    continue;
                };
                let provenance = InheritedMetadata {
                    source_urn: upstream_urn.to_string(),
                    source_column: mapping.upstream_column.clone(),
                    hops: 1,
                    match_method: MatchMethod::ColumnLineage,
                };
                if applier.inherit(target, source, provenance) {
                    inherited.insert(downstream);
                }
            }
        }

        inherited.len()
    }
}
