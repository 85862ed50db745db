//! End-to-end resolution scenarios against a recording in-memory catalog

use hw_catalog::{LineageDirection, LineageNode, LineageResult, MemoryCatalog, SchemaField};
use hw_core::{DatasetUrn, LineageConfig, MatchMethod, Sanitizer, TableIdentifier};
use hw_lineage::test_utils::{CatalogCall, RecordingCatalog};
use hw_lineage::{ColumnMap, LineageError, LineageResolver, SemanticColumns};
use std::sync::Arc;

fn urn(name: &str) -> String {
    DatasetUrn::build("trino", name).into_inner()
}

fn setup(catalog: RecordingCatalog, yaml: &str) -> (Arc<RecordingCatalog>, LineageResolver) {
    let catalog = Arc::new(catalog);
    let cfg = LineageConfig::from_yaml(yaml).unwrap();
    let resolver = LineageResolver::new(catalog.clone(), cfg, Sanitizer::default());
    (catalog, resolver)
}

async fn resolve(resolver: &LineageResolver, table: &str) -> ColumnMap {
    resolver
        .resolve_columns_with_lineage(&urn(table), table)
        .await
        .unwrap()
}

/// raw.users -> mart.users, with the upstream documenting user_id
fn user_id_catalog() -> MemoryCatalog {
    let mut catalog = MemoryCatalog::new();
    catalog.insert_dataset(urn("mart.users"), vec![SchemaField::new("user_id")]);
    catalog.insert_dataset(
        urn("raw.users"),
        vec![SchemaField::new("user_id")
            .with_description("User identifier")
            .with_tag("pii")],
    );
    catalog.add_lineage(&urn("raw.users"), &urn("mart.users"));
    catalog
}

/// far.users -> near.users -> mart.users
fn two_hop_catalog() -> MemoryCatalog {
    let mut catalog = MemoryCatalog::new();
    catalog.insert_dataset(urn("mart.users"), vec![SchemaField::new("user_id")]);
    catalog.insert_dataset(
        urn("near.users"),
        vec![SchemaField::new("user_id").with_description("Near description")],
    );
    catalog.insert_dataset(
        urn("far.users"),
        vec![SchemaField::new("user_id")
            .with_description("Far description")
            .with_term("urn:li:glossaryTerm:UserId", "UserId")],
    );
    catalog.add_lineage(&urn("near.users"), &urn("mart.users"));
    catalog.add_lineage(&urn("far.users"), &urn("near.users"));
    catalog
}

#[tokio::test]
async fn test_table_lineage_name_exact() {
    let (_, resolver) = setup(
        RecordingCatalog::new(user_id_catalog()),
        "enabled: true\ninherit: [descriptions]",
    );
    let columns = resolve(&resolver, "mart.users").await;

    let user_id = &columns["user_id"];
    assert_eq!(user_id.description, "User identifier");
    assert!(user_id.tags.is_empty());
    assert!(!user_id.is_pii);

    let provenance = user_id.inherited_from.as_ref().unwrap();
    assert_eq!(provenance.match_method, MatchMethod::NameExact);
    assert_eq!(provenance.hops, 1);
    assert_eq!(provenance.source_urn, urn("raw.users"));
    assert_eq!(provenance.source_column, "user_id");
}

#[tokio::test]
async fn test_alias_inherits_mapped_column() {
    let mut catalog = MemoryCatalog::new();
    catalog.insert_dataset(urn("target.events"), vec![SchemaField::new("amount")]);
    catalog.insert_dataset(
        urn("source.users"),
        vec![SchemaField::new("amount").with_description("Transaction amount")],
    );
    let yaml = r#"
enabled: true
aliases:
  - source: source.users
    targets: ["target.*"]
    column_mapping:
      amount: amount
"#;
    let (recording, resolver) = setup(RecordingCatalog::new(catalog), yaml);
    let columns = resolve(&resolver, "target.events").await;

    let amount = &columns["amount"];
    assert_eq!(amount.description, "Transaction amount");
    let provenance = amount.inherited_from.as_ref().unwrap();
    assert_eq!(provenance.match_method, MatchMethod::Alias);
    assert_eq!(provenance.hops, 1);
    assert_eq!(provenance.source_urn, urn("source.users"));
    assert_eq!(recording.calls(CatalogCall::GetSchema), 2);
}

#[tokio::test]
async fn test_alias_mapping_renames_column() {
    let mut catalog = MemoryCatalog::new();
    catalog.insert_dataset(urn("target.events"), vec![SchemaField::new("amt")]);
    catalog.insert_dataset(
        urn("source.payments"),
        vec![SchemaField::new("amount").with_description("Transaction amount")],
    );
    let yaml = r#"
enabled: true
aliases:
  - source: source.payments
    targets: ["target.*"]
    column_mapping:
      amt: amount
"#;
    let (_, resolver) = setup(RecordingCatalog::new(catalog), yaml);
    let columns = resolve(&resolver, "target.events").await;

    assert_eq!(columns["amt"].description, "Transaction amount");
    assert_eq!(
        columns["amt"].inherited_from.as_ref().unwrap().source_column,
        "amount"
    );
}

#[tokio::test]
async fn test_alias_match_is_exclusive() {
    let mut catalog = MemoryCatalog::new();
    catalog.insert_dataset(
        urn("target.events"),
        vec![SchemaField::new("amount"), SchemaField::new("currency")],
    );
    catalog.insert_dataset(
        urn("source.users"),
        vec![SchemaField::new("amount").with_description("Transaction amount")],
    );
    // Lineage could fill currency, but must never be consulted
    catalog.insert_dataset(
        urn("raw.events"),
        vec![SchemaField::new("currency").with_description("ISO currency")],
    );
    catalog.add_lineage(&urn("raw.events"), &urn("target.events"));
    catalog.add_column_lineage(&urn("target.events"), "currency", &urn("raw.events"), "currency");

    let yaml = r#"
enabled: true
aliases:
  - source: source.users
    targets: ["target.*"]
"#;
    let (recording, resolver) = setup(RecordingCatalog::new(catalog), yaml);
    let columns = resolve(&resolver, "target.events").await;

    assert_eq!(columns["amount"].description, "Transaction amount");
    assert!(columns["currency"].description.is_empty());
    assert!(columns["currency"].inherited_from.is_none());
    assert_eq!(recording.calls(CatalogCall::GetLineage), 0);
    assert_eq!(recording.calls(CatalogCall::GetColumnLineage), 0);
    assert_eq!(recording.calls(CatalogCall::GetSchemas), 0);
}

#[tokio::test]
async fn test_malformed_alias_source_is_skipped() {
    let yaml = r#"
enabled: true
aliases:
  - source: users
    targets: ["mart.*"]
"#;
    let (recording, resolver) = setup(RecordingCatalog::new(user_id_catalog()), yaml);
    let columns = resolve(&resolver, "mart.users").await;

    assert!(columns["user_id"].inherited_from.is_none());
    assert_eq!(recording.calls(CatalogCall::GetSchema), 1);
    assert_eq!(recording.calls(CatalogCall::GetLineage), 0);
}

#[tokio::test]
async fn test_column_lineage_uses_exact_upstream_path() {
    let mut catalog = MemoryCatalog::new();
    catalog.insert_dataset(urn("mart.orders"), vec![SchemaField::new("downstream_col")]);
    catalog.insert_dataset(
        urn("raw.orders"),
        vec![
            SchemaField::new("[version=2.0].[type=struct].upstream_col")
                .with_description("Upstream documentation"),
            SchemaField::new("downstream_col").with_description("Name-only decoy"),
        ],
    );
    catalog.add_lineage(&urn("raw.orders"), &urn("mart.orders"));
    catalog.add_column_lineage(
        &urn("mart.orders"),
        "downstream_col",
        &urn("raw.orders"),
        "[version=2.0].[type=struct].upstream_col",
    );

    let (recording, resolver) = setup(RecordingCatalog::new(catalog), "enabled: true");
    let columns = resolve(&resolver, "mart.orders").await;

    let column = &columns["downstream_col"];
    assert_eq!(column.description, "Upstream documentation");
    let provenance = column.inherited_from.as_ref().unwrap();
    assert_eq!(provenance.match_method, MatchMethod::ColumnLineage);
    assert_eq!(provenance.hops, 1);
    assert_eq!(provenance.source_column, "[version=2.0].[type=struct].upstream_col");
    assert_eq!(recording.calls(CatalogCall::GetLineage), 0);
}

#[tokio::test]
async fn test_unproductive_column_lineage_falls_back_to_table_lineage() {
    let mut catalog = user_id_catalog();
    catalog.add_column_lineage(&urn("mart.users"), "user_id", &urn("raw.users"), "no_such_column");

    let (recording, resolver) = setup(
        RecordingCatalog::new(catalog),
        "enabled: true\ninherit: [descriptions]",
    );
    let columns = resolve(&resolver, "mart.users").await;

    assert_eq!(recording.calls(CatalogCall::GetColumnLineage), 1);
    assert_eq!(recording.calls(CatalogCall::GetLineage), 1);
    assert_eq!(
        columns["user_id"].inherited_from.as_ref().unwrap().match_method,
        MatchMethod::NameExact
    );
}

#[tokio::test]
async fn test_column_lineage_not_preferred() {
    let mut catalog = user_id_catalog();
    catalog.add_column_lineage(&urn("mart.users"), "user_id", &urn("raw.users"), "user_id");

    let (recording, resolver) = setup(
        RecordingCatalog::new(catalog),
        "enabled: true\nprefer_column_lineage: false",
    );
    let columns = resolve(&resolver, "mart.users").await;

    assert_eq!(recording.calls(CatalogCall::GetColumnLineage), 0);
    assert_eq!(
        columns["user_id"].inherited_from.as_ref().unwrap().match_method,
        MatchMethod::NameExact
    );
}

#[tokio::test]
async fn test_transformed_name_match() {
    let mut catalog = MemoryCatalog::new();
    catalog.insert_dataset(urn("mart.users"), vec![SchemaField::new("raw_user_id")]);
    catalog.insert_dataset(
        urn("raw.users"),
        vec![SchemaField::new("user_id").with_description("User identifier")],
    );
    catalog.add_lineage(&urn("raw.users"), &urn("mart.users"));

    let yaml = r#"
enabled: true
column_transforms:
  - strip_prefix: "raw_"
"#;
    let (_, resolver) = setup(RecordingCatalog::new(catalog), yaml);
    let columns = resolve(&resolver, "mart.users").await;

    let provenance = columns["raw_user_id"].inherited_from.as_ref().unwrap();
    assert_eq!(provenance.match_method, MatchMethod::NameTransformed);
    assert_eq!(provenance.source_column, "user_id");
    assert_eq!(columns["raw_user_id"].description, "User identifier");
}

#[tokio::test]
async fn test_nearest_hop_wins() {
    let (_, resolver) = setup(
        RecordingCatalog::new(two_hop_catalog()),
        "enabled: true\nmax_hops: 2\ninherit: [descriptions, glossary_terms]",
    );
    let columns = resolve(&resolver, "mart.users").await;

    let user_id = &columns["user_id"];
    assert_eq!(user_id.description, "Near description");
    // Already inherited at hop 1, so hop 2 is not consulted at all
    assert!(user_id.glossary_terms.is_empty());
    let provenance = user_id.inherited_from.as_ref().unwrap();
    assert_eq!(provenance.hops, 1);
    assert_eq!(provenance.source_urn, urn("near.users"));
}

#[tokio::test]
async fn test_conflict_all_fills_from_farther_hops() {
    let (_, resolver) = setup(
        RecordingCatalog::new(two_hop_catalog()),
        "enabled: true\nmax_hops: 2\ninherit: [descriptions, glossary_terms]\nconflict_resolution: all",
    );
    let columns = resolve(&resolver, "mart.users").await;

    let user_id = &columns["user_id"];
    assert_eq!(user_id.description, "Near description");
    assert_eq!(user_id.glossary_terms.len(), 1);
    let provenance = user_id.inherited_from.as_ref().unwrap();
    assert_eq!(provenance.hops, 2);
    assert_eq!(provenance.source_urn, urn("far.users"));
}

#[tokio::test]
async fn test_hop_bound_from_catalog_depth() {
    let (recording, resolver) = setup(
        RecordingCatalog::new(two_hop_catalog()),
        "enabled: true\nmax_hops: 1\ninherit: [glossary_terms]",
    );
    let columns = resolve(&resolver, "mart.users").await;

    assert!(columns["user_id"].glossary_terms.is_empty());
    assert!(columns["user_id"].inherited_from.is_none());
    assert_eq!(recording.batch_fetched(), vec![urn("near.users")]);
}

#[tokio::test]
async fn test_hop_bound_ignores_overreaching_catalog() {
    // A catalog that answers beyond the requested depth
    let lineage = LineageResult {
        start: urn("mart.users"),
        direction: LineageDirection::Upstream,
        nodes: vec![
            LineageNode {
                urn: urn("mart.users"),
                level: 0,
            },
            LineageNode {
                urn: urn("far.users"),
                level: 3,
            },
        ],
        edges: vec![],
    };
    let (recording, resolver) = setup(
        RecordingCatalog::new(two_hop_catalog()).with_lineage(lineage),
        "enabled: true\nmax_hops: 2",
    );
    let columns = resolve(&resolver, "mart.users").await;

    assert!(columns["user_id"].inherited_from.is_none());
    assert_eq!(recording.calls(CatalogCall::GetSchemas), 0);
}

#[tokio::test]
async fn test_authored_values_never_overwritten() {
    let mut catalog = two_hop_catalog();
    catalog.insert_dataset(
        urn("mart.users"),
        vec![SchemaField::new("user_id").with_description("Authored")],
    );
    let (_, resolver) = setup(
        RecordingCatalog::new(catalog),
        "enabled: true\nmax_hops: 2\ninherit: [descriptions, glossary_terms]\nconflict_resolution: all",
    );
    let columns = resolve(&resolver, "mart.users").await;

    let user_id = &columns["user_id"];
    assert_eq!(user_id.description, "Authored");
    assert_eq!(user_id.glossary_terms[0].name, "UserId");
    assert_eq!(user_id.inherited_from.as_ref().unwrap().source_urn, urn("far.users"));
}

#[tokio::test]
async fn test_resolution_is_idempotent() {
    let (_, resolver) = setup(
        RecordingCatalog::new(two_hop_catalog()),
        "enabled: true\nmax_hops: 2\ninherit: [descriptions, glossary_terms, tags]",
    );
    let first = resolve(&resolver, "mart.users").await;
    let second = resolve(&resolver, "mart.users").await;
    assert_eq!(first, second);
}

#[tokio::test]
async fn test_lineage_failure_degrades() {
    let (_, resolver) = setup(
        RecordingCatalog::new(user_id_catalog()).failing(CatalogCall::GetLineage),
        "enabled: true",
    );
    let columns = resolve(&resolver, "mart.users").await;
    assert!(columns["user_id"].description.is_empty());
    assert!(columns["user_id"].inherited_from.is_none());
}

#[tokio::test]
async fn test_batch_fetch_failure_degrades() {
    let (_, resolver) = setup(
        RecordingCatalog::new(user_id_catalog()).failing(CatalogCall::GetSchemas),
        "enabled: true",
    );
    let columns = resolve(&resolver, "mart.users").await;
    assert!(columns["user_id"].inherited_from.is_none());
}

#[tokio::test]
async fn test_column_lineage_failure_falls_back() {
    let (recording, resolver) = setup(
        RecordingCatalog::new(user_id_catalog()).failing(CatalogCall::GetColumnLineage),
        "enabled: true",
    );
    let columns = resolve(&resolver, "mart.users").await;

    assert_eq!(recording.calls(CatalogCall::GetLineage), 1);
    assert_eq!(columns["user_id"].description, "User identifier");
}

#[tokio::test]
async fn test_alias_source_failure_degrades() {
    let yaml = r#"
enabled: true
aliases:
  - source: source.missing
    targets: ["mart.*"]
"#;
    let (recording, resolver) = setup(RecordingCatalog::new(user_id_catalog()), yaml);
    let columns = resolve(&resolver, "mart.users").await;

    assert!(columns["user_id"].inherited_from.is_none());
    assert_eq!(recording.calls(CatalogCall::GetLineage), 0);
}

#[tokio::test]
async fn test_qualified_base_field_uses_leaf_name() {
    let mut catalog = user_id_catalog();
    catalog.insert_dataset(
        urn("mart.users"),
        vec![SchemaField::new("[version=2.0].[type=struct].user_id")],
    );
    let (_, resolver) = setup(RecordingCatalog::new(catalog), "enabled: true");
    let columns = resolve(&resolver, "mart.users").await;

    assert!(columns.contains_key("user_id"));
    assert_eq!(columns["user_id"].description, "User identifier");
}

#[tokio::test]
async fn test_semantic_columns_by_table() {
    let (_, resolver) = setup(RecordingCatalog::new(user_id_catalog()), "enabled: true");
    let semantic = SemanticColumns::new(resolver);
    let table = TableIdentifier::new("mart", "users");

    let columns = semantic.columns_context(&table).await.unwrap();
    assert_eq!(columns.len(), 1);

    let user_id = semantic.column_context(&table, "user_id").await.unwrap();
    assert_eq!(user_id.description, "User identifier");

    let err = semantic.column_context(&table, "email").await.unwrap_err();
    assert!(matches!(err, LineageError::ColumnNotFound { .. }));
}
