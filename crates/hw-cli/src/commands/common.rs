//! Shared utilities for CLI commands

use anyhow::{Context, Result};
use hw_catalog::MemoryCatalog;
use hw_core::{DatasetUrn, HeadwaterConfig, TableIdentifier};
use std::path::Path;

use crate::cli::GlobalArgs;

/// Load the config named by `--config`, or the defaults when none is given
pub(crate) fn load_config(global: &GlobalArgs) -> Result<HeadwaterConfig> {
    match &global.config {
        Some(path) => HeadwaterConfig::load(path)
            .with_context(|| format!("Failed to load config from {}", path.display())),
        None => {
            log::info!("No config file given; using defaults");
            Ok(HeadwaterConfig::default())
        }
    }
}

/// Load a catalog snapshot
pub(crate) fn load_catalog(path: &Path) -> Result<MemoryCatalog> {
    let catalog = MemoryCatalog::load(path)
        .with_context(|| format!("Failed to load catalog snapshot {}", path.display()))?;
    log::info!(
        "Loaded {} dataset(s) from {}",
        catalog.dataset_count(),
        path.display()
    );
    Ok(catalog)
}

/// Turn a table argument into its dataset URN and display name.
///
/// Accepts `schema.table`, `catalog.schema.table`, or a dataset URN. For a
/// URN the display name is the dataset name embedded in it.
pub(crate) fn resolve_target(table: &str, platform: &str) -> Result<(DatasetUrn, String)> {
    if table.starts_with("urn:") {
        let urn = DatasetUrn::parse(table).context("Invalid dataset URN")?;
        let name = urn.name().unwrap_or(urn.as_str()).to_string();
        return Ok((urn, name));
    }
    let ident = TableIdentifier::parse(table).context("Invalid table name")?;
    Ok((ident.to_urn(platform), ident.to_string()))
}

/// Render rows as an aligned text table with a header rule
pub(crate) fn render_table(headers: &[&str], rows: &[Vec<String>]) -> String {
    let mut widths: Vec<usize> = headers.iter().map(|h| h.len()).collect();
    for row in rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let line = |cells: Vec<String>| -> String {
        let parts: Vec<String> = cells
            .iter()
            .zip(&widths)
            .map(|(cell, &w)| format!("{:<width$}", cell, width = w))
            .collect();
        parts.join("  ").trim_end().to_string()
    };

    let mut out = String::new();
    out.push_str(&line(headers.iter().map(|h| h.to_string()).collect()));
    out.push('\n');
    out.push_str(&line(widths.iter().map(|&w| "-".repeat(w)).collect()));
    out.push('\n');
    for row in rows {
        out.push_str(&line(row.clone()));
        out.push('\n');
    }
    out
}

/// Shorten `text` to at most `max` characters, marking the cut
pub(crate) fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    let kept: String = text.chars().take(max.saturating_sub(3)).collect();
    format!("{kept}...")
}

#[cfg(test)]
#[path = "common_test.rs"]
mod tests;
