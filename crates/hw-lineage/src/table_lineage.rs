//! Inheritance along table-level lineage, matched by column name

use crate::field_index::FieldIndex;
use crate::resolver::{ColumnMap, LineageResolver};
use crate::transform::transform_column_name;
use hw_catalog::{LineageDirection, LineageNode};
use hw_core::{ConflictResolution, DatasetUrn, InheritedMetadata, MatchMethod};
use std::collections::{BTreeMap, BTreeSet};

/// Upstream datasets grouped by hop distance.
///
/// Level 0 (the table itself) and anything farther than `max_hops` are
/// dropped.
pub(crate) fn group_nodes_by_level(
    nodes: &[LineageNode],
    max_hops: usize,
) -> BTreeMap<usize, BTreeSet<&str>> {
    let mut levels: BTreeMap<usize, BTreeSet<&str>> = BTreeMap::new();
    for node in nodes {
        if (1..=max_hops).contains(&node.level) {
            levels.entry(node.level).or_default().insert(node.urn.as_str());
        }
    }
    levels
}

impl LineageResolver {
    /// Walk upstream levels nearest-first, matching columns by name
    pub(crate) async fn try_table_lineage(
        &self,
        columns: &mut ColumnMap,
        undocumented: &BTreeSet<String>,
        urn: &DatasetUrn,
    ) {
        let lineage = match self
            .client
            .get_lineage(urn, LineageDirection::Upstream, self.cfg.max_hops)
            .await
        {
            Ok(lineage) => lineage,
            Err(e) => {
                log::warn!("Lineage unavailable for {}: {}", urn, e);
                return;
            }
        };

        let levels = group_nodes_by_level(&lineage.nodes, self.cfg.max_hops);
        let upstream_urns: Vec<String> = levels
            .values()
            .flatten()
            .copied()
            .collect::<BTreeSet<&str>>()
            .into_iter()
            .map(str::to_string)
            .collect();
        if upstream_urns.is_empty() {
            log::debug!("No upstream datasets within {} hop(s) of {}", self.cfg.max_hops, urn);
            return;
        }

        let schemas = match self.client.get_schemas(&upstream_urns).await {
            Ok(schemas) => schemas,
            Err(e) => {
                log::warn!("Upstream schemas unavailable for {}: {}", urn, e);
                return;
            }
        };

        if self.cfg.conflict_resolution != ConflictResolution::Nearest {
            log::debug!(
                "conflict_resolution '{}': farther hops fill remaining gaps and replace provenance",
                self.cfg.conflict_resolution
            );
        }

        for (level, upstreams) in &levels {
            for upstream_urn in upstreams {
                let Some(schema) = schemas.get(*upstream_urn) else {
                    log::debug!("No schema for upstream {}", upstream_urn);
                    continue;
                };
                let index = FieldIndex::build(&schema.fields);
                log::debug!(
                    "Matching against {} (hop {}, {} field(s))",
                    upstream_urn,
                    level,
                    index.len()
                );
                self.match_and_inherit(columns, undocumented, &index, upstream_urn, *level);
            }
        }
    }

    fn match_and_inherit(
        &self,
        columns: &mut ColumnMap,
        undocumented: &BTreeSet<String>,
        index: &FieldIndex<'_>,
        upstream_urn: &str,
        level: usize,
    ) {
        let applier = self.applier();
        for target_col in undocumented {
            let Some(target) = columns.get_mut(target_col) else {
                continue;
            };
            if target.inherited_from.is_some()
                && self.cfg.conflict_resolution == ConflictResolution::Nearest
            {
                continue;
            }

            let source_col = transform_column_name(target_col, &self.cfg.column_transforms);
            let Some(source) = index.by_leaf(&source_col) else {
                continue;
            };
            let match_method = if source_col == *target_col {
                MatchMethod::NameExact
            } else {
                MatchMethod::NameTransformed
            };
            applier.inherit(
                target,
                source,
                InheritedMetadata {
                    source_urn: upstream_urn.to_string(),
                    source_column: source_col,
                    hops: level,
                    match_method,
                },
            );
        }
    }
}
