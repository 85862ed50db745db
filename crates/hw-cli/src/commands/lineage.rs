//! Lineage command implementation

use crate::commands::common::{load_catalog, load_config, resolve_target};
use anyhow::{Context, Result};
use hw_catalog::{CatalogClient, LineageDirection, LineageResult};
use std::collections::BTreeMap;

use crate::cli::{GlobalArgs, LineageArgs, LineageDirectionArg, LineageOutput};

/// Execute the lineage command
pub async fn execute(args: &LineageArgs, global: &GlobalArgs) -> Result<()> {
    let config = load_config(global)?;
    let catalog = load_catalog(&args.catalog)?;
    let (urn, table_name) = resolve_target(&args.table, &config.semantic.platform)?;

    let depth = args.depth.unwrap_or(config.semantic.lineage.max_hops);
    let direction = match args.direction {
        LineageDirectionArg::Upstream => LineageDirection::Upstream,
        LineageDirectionArg::Downstream => LineageDirection::Downstream,
    };

    let lineage = catalog
        .get_lineage(&urn, direction, depth)
        .await
        .with_context(|| format!("Failed to fetch lineage of {}", table_name))?;

    match args.output {
        LineageOutput::Text => print!("{}", format_levels(&lineage)),
        LineageOutput::Json => {
            let json = serde_json::to_string_pretty(&lineage)
                .context("Failed to serialize lineage")?;
            println!("{}", json);
        }
    }
    Ok(())
}

/// Datasets grouped by hop distance, nearest first
fn format_levels(lineage: &LineageResult) -> String {
    let mut levels: BTreeMap<usize, Vec<&str>> = BTreeMap::new();
    for node in lineage.nodes.iter().filter(|n| n.level > 0) {
        levels.entry(node.level).or_default().push(node.urn.as_str());
    }

    let mut out = format!("{} lineage of {}\n", lineage.direction, lineage.start);
    if levels.is_empty() {
        out.push_str("  (none)\n");
        return out;
    }
    for (level, mut urns) in levels {
        urns.sort_unstable();
        out.push_str(&format!("hop {}:\n", level));
        for urn in urns {
            out.push_str(&format!("  {}\n", urn));
        }
    }
    out
}
