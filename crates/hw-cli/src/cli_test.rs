use super::*;
use clap::CommandFactory;

#[test]
fn verify_cli_args() {
    Cli::command().debug_assert();
}

#[test]
fn test_parse_resolve() {
    let cli = Cli::try_parse_from([
        "hw",
        "-vv",
        "resolve",
        "--catalog",
        "catalog.yml",
        "mart.users",
        "--output",
        "table",
    ])
    .unwrap();

    assert_eq!(cli.global.verbose, 2);
    match cli.command {
        Commands::Resolve(args) => {
            assert_eq!(args.table, "mart.users");
            assert_eq!(args.output, ResolveOutput::Table);
            assert!(!args.enable_lineage);
        }
        other => panic!("unexpected command: {other:?}"),
    }
}

#[test]
fn test_parse_lineage_defaults() {
    let cli = Cli::try_parse_from(["hw", "lineage", "--catalog", "c.yml", "mart.users"]).unwrap();
    match cli.command {
        Commands::Lineage(args) => {
            assert_eq!(args.depth, None);
            assert_eq!(args.direction, LineageDirectionArg::Upstream);
            assert_eq!(args.output, LineageOutput::Text);
        }
        other => panic!("unexpected command: {other:?}"),
    }
}

#[test]
fn test_resolve_requires_catalog() {
    assert!(Cli::try_parse_from(["hw", "resolve", "mart.users"]).is_err());
}
