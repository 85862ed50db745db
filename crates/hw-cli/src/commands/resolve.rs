//! Resolve command implementation

use crate::commands::common::{self, load_catalog, load_config, resolve_target};
use anyhow::{Context, Result};
use hw_core::Sanitizer;
use hw_lineage::{ColumnMap, LineageResolver};
use std::sync::Arc;

use crate::cli::{GlobalArgs, ResolveArgs, ResolveOutput};

/// Execute the resolve command
pub async fn execute(args: &ResolveArgs, global: &GlobalArgs) -> Result<()> {
    let config = load_config(global)?;
    let catalog = load_catalog(&args.catalog)?;
    let (urn, table_name) = resolve_target(&args.table, &config.semantic.platform)?;

    let mut lineage_cfg = config.semantic.lineage;
    if args.enable_lineage {
        lineage_cfg.enabled = true;
    }

    let resolver = LineageResolver::new(Arc::new(catalog), lineage_cfg, Sanitizer::default())
        .with_platform(config.semantic.platform);
    let mut columns = resolver
        .resolve_columns_with_lineage(&urn, &table_name)
        .await
        .with_context(|| format!("Failed to resolve columns of {}", table_name))?;

    if let Some(column) = &args.column {
        let context = columns
            .remove(column)
            .with_context(|| format!("Column '{}' not found in {}", column, table_name))?;
        columns = ColumnMap::from([(column.clone(), context)]);
    }

    match args.output {
        ResolveOutput::Json => {
            let json = serde_json::to_string_pretty(&columns)
                .context("Failed to serialize columns")?;
            println!("{}", json);
        }
        ResolveOutput::Table => print!("{}", format_columns(&columns)),
    }
    Ok(())
}

/// One row per column: documentation plus where it came from
fn format_columns(columns: &ColumnMap) -> String {
    let rows: Vec<Vec<String>> = columns
        .values()
        .map(|column| {
            let (source, method) = match &column.inherited_from {
                Some(from) => (
                    format!("{}:{} ({} hop)", from.source_urn, from.source_column, from.hops),
                    from.match_method.to_string(),
                ),
                None => (String::new(), String::new()),
            };
            let mut flags = Vec::new();
            if column.is_pii {
                flags.push("pii");
            }
            if column.is_sensitive {
                flags.push("sensitive");
            }
            vec![
                column.name.clone(),
                common::truncate(&column.description, 48),
                column
                    .glossary_terms
                    .iter()
                    .map(|t| t.name.as_str())
                    .collect::<Vec<_>>()
                    .join(","),
                column.tags.join(","),
                flags.join(","),
                method,
                source,
            ]
        })
        .collect();

    common::render_table(
        &["COLUMN", "DESCRIPTION", "TERMS", "TAGS", "FLAGS", "MATCH", "SOURCE"],
        &rows,
    )
}

#[cfg(test)]
#[path = "resolve_test.rs"]
mod tests;
