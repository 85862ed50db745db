use super::*;
use crate::test_utils::{CatalogCall, RecordingCatalog};
use hw_catalog::{MemoryCatalog, SchemaField};
use std::time::Duration;

fn urn(name: &str) -> String {
    DatasetUrn::build("trino", name).into_inner()
}

fn catalog() -> MemoryCatalog {
    let mut catalog = MemoryCatalog::new();
    catalog.insert_dataset(
        urn("mart.users"),
        vec![
            SchemaField::new("user_id"),
            SchemaField::new("email").with_description("Authored email"),
        ],
    );
    catalog.insert_dataset(
        urn("raw.users"),
        vec![SchemaField::new("user_id").with_description("User identifier")],
    );
    catalog.add_lineage(&urn("raw.users"), &urn("mart.users"));
    catalog
}

fn build_resolver(recording: RecordingCatalog, yaml: &str) -> (Arc<RecordingCatalog>, LineageResolver) {
    let recording = Arc::new(recording);
    let cfg = LineageConfig::from_yaml(yaml).unwrap();
    let resolver = LineageResolver::new(recording.clone(), cfg, Sanitizer::default());
    (recording, resolver)
}

#[tokio::test]
async fn test_disabled_returns_base_columns_only() {
    let (recording, resolver) = build_resolver(RecordingCatalog::new(catalog()), "enabled: false");
    let columns = resolver
        .resolve_columns_with_lineage(&urn("mart.users"), "mart.users")
        .await
        .unwrap();

    assert_eq!(columns.len(), 2);
    assert!(columns["user_id"].description.is_empty());
    assert_eq!(columns["email"].description, "Authored email");
    assert_eq!(recording.calls(CatalogCall::GetSchema), 1);
    assert_eq!(recording.calls(CatalogCall::GetLineage), 0);
    assert_eq!(recording.calls(CatalogCall::GetColumnLineage), 0);
}

#[tokio::test]
async fn test_no_gaps_skips_lineage() {
    let (recording, resolver) = build_resolver(
        RecordingCatalog::new(catalog()),
        "enabled: true\ninherit: [descriptions]",
    );
    let columns = resolver
        .resolve_columns_with_lineage(&urn("raw.users"), "raw.users")
        .await
        .unwrap();

    assert_eq!(columns["user_id"].description, "User identifier");
    assert_eq!(recording.calls(CatalogCall::GetLineage), 0);
    assert_eq!(recording.calls(CatalogCall::GetColumnLineage), 0);
}

#[tokio::test]
async fn test_invalid_urn_is_an_error() {
    let (recording, resolver) = build_resolver(RecordingCatalog::new(catalog()), "enabled: true");
    let err = resolver
        .resolve_columns_with_lineage("mart.users", "mart.users")
        .await
        .unwrap_err();

    assert!(matches!(err, LineageError::InvalidUrn(_)));
    assert_eq!(recording.calls(CatalogCall::GetSchema), 0);
}

#[tokio::test]
async fn test_base_schema_failure_is_an_error() {
    let (_, resolver) = build_resolver(
        RecordingCatalog::new(catalog()).failing(CatalogCall::GetSchema),
        "enabled: true",
    );
    let err = resolver
        .resolve_columns_with_lineage(&urn("mart.users"), "mart.users")
        .await
        .unwrap_err();

    assert!(matches!(err, LineageError::BaseSchema { .. }));
    assert!(err.to_string().starts_with("[L001]"));
}

#[tokio::test]
async fn test_unknown_dataset_is_an_error() {
    let (_, resolver) = build_resolver(RecordingCatalog::new(catalog()), "enabled: true");
    let err = resolver
        .resolve_columns_with_lineage(&urn("mart.missing"), "mart.missing")
        .await
        .unwrap_err();
    assert!(matches!(err, LineageError::BaseSchema { .. }));
}

#[tokio::test(start_paused = true)]
async fn test_timeout_returns_base_columns() {
    let (recording, resolver) = build_resolver(
        RecordingCatalog::new(catalog()).delayed(CatalogCall::GetLineage, Duration::from_secs(30)),
        "enabled: true\ninherit: [descriptions]\ntimeout: 100ms",
    );
    let columns = resolver
        .resolve_columns_with_lineage(&urn("mart.users"), "mart.users")
        .await
        .unwrap();

    assert_eq!(recording.calls(CatalogCall::GetLineage), 1);
    assert_eq!(columns.len(), 2);
    assert!(columns["user_id"].description.is_empty());
    assert!(columns["user_id"].inherited_from.is_none());
    assert_eq!(columns["email"].description, "Authored email");
}

#[test]
fn test_platform_override() {
    let resolver = LineageResolver::new(
        Arc::new(MemoryCatalog::new()),
        LineageConfig::default(),
        Sanitizer::default(),
    );
    assert_eq!(resolver.platform(), "trino");
    assert_eq!(resolver.with_platform("postgres").platform(), "postgres");
}
