//! CLI argument definitions using clap derive API

use clap::{ArgAction, Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Headwater - fill in column documentation from upstream lineage
#[derive(Parser, Debug)]
#[command(name = "hw")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Global options
    #[command(flatten)]
    pub global: GlobalArgs,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Global arguments available to all commands
#[derive(Args, Debug, Clone)]
pub struct GlobalArgs {
    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    /// Path to a Headwater config file (YAML or JSON)
    #[arg(short, long, global = true, env = "HW_CONFIG")]
    pub config: Option<PathBuf>,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Resolve a table's columns, inheriting documentation from upstream
    Resolve(ResolveArgs),

    /// Validate a config file and print the effective settings
    Config(ConfigArgs),

    /// Show the datasets upstream or downstream of a table
    Lineage(LineageArgs),
}

/// Arguments for the resolve command
#[derive(Args, Debug)]
pub struct ResolveArgs {
    /// Catalog snapshot file
    #[arg(long)]
    pub catalog: PathBuf,

    /// Table as schema.table, catalog.schema.table, or a dataset URN
    pub table: String,

    /// Output format
    #[arg(short, long, value_enum, default_value = "json")]
    pub output: ResolveOutput,

    /// Turn lineage inheritance on regardless of the config file
    #[arg(long)]
    pub enable_lineage: bool,

    /// Only print the column with this name
    #[arg(long)]
    pub column: Option<String>,
}

/// Resolve output formats
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolveOutput {
    /// Column map as JSON
    Json,
    /// Aligned text table
    Table,
}

/// Arguments for the config command
#[derive(Args, Debug)]
pub struct ConfigArgs {
    /// Output format
    #[arg(short, long, value_enum, default_value = "yaml")]
    pub output: ConfigOutput,
}

/// Config output formats
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigOutput {
    Yaml,
    Json,
}

/// Arguments for the lineage command
#[derive(Args, Debug)]
pub struct LineageArgs {
    /// Catalog snapshot file
    #[arg(long)]
    pub catalog: PathBuf,

    /// Table as schema.table, catalog.schema.table, or a dataset URN
    pub table: String,

    /// Maximum hop distance (defaults to the configured max_hops)
    #[arg(short, long)]
    pub depth: Option<usize>,

    /// Traversal direction
    #[arg(long, value_enum, default_value = "upstream")]
    pub direction: LineageDirectionArg,

    /// Output format
    #[arg(short, long, value_enum, default_value = "text")]
    pub output: LineageOutput,
}

/// Lineage traversal direction
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineageDirectionArg {
    Upstream,
    Downstream,
}

/// Lineage output formats
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineageOutput {
    /// Datasets grouped by hop distance
    Text,
    /// Raw lineage result as JSON
    Json,
}

#[cfg(test)]
#[path = "cli_test.rs"]
mod tests;
