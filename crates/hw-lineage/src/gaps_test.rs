use super::*;
use hw_core::GlossaryTerm;

fn cfg_with(kinds: &[MetadataKind]) -> LineageConfig {
    LineageConfig {
        inherit: kinds.iter().copied().collect(),
        ..Default::default()
    }
}

fn documented() -> ColumnContext {
    ColumnContext {
        description: "desc".into(),
        tags: vec!["pii".into()],
        glossary_terms: vec![GlossaryTerm {
            urn: "urn:li:glossaryTerm:x".into(),
            name: "X".into(),
            description: String::new(),
        }],
        ..ColumnContext::new("c")
    }
}

#[test]
fn test_only_configured_kinds_count() {
    let cfg = cfg_with(&[MetadataKind::Descriptions]);
    let mut column = ColumnContext::new("c");
    assert!(needs(&cfg, &column, MetadataKind::Descriptions));
    assert!(!needs(&cfg, &column, MetadataKind::Tags));
    assert!(!needs(&cfg, &column, MetadataKind::GlossaryTerms));

    column.description = "authored".into();
    assert!(!needs_documentation(&cfg, &column));
}

#[test]
fn test_partial_documentation_is_a_gap() {
    let cfg = cfg_with(&[MetadataKind::Descriptions, MetadataKind::GlossaryTerms]);
    let mut column = documented();
    assert!(!needs_documentation(&cfg, &column));

    column.glossary_terms.clear();
    assert!(needs_documentation(&cfg, &column));
    assert!(!needs(&cfg, &column, MetadataKind::Descriptions));
}

#[test]
fn test_empty_inherit_means_no_gaps() {
    let cfg = cfg_with(&[]);
    assert!(!needs_documentation(&cfg, &ColumnContext::new("c")));
}

#[test]
fn test_find_undocumented() {
    let cfg = cfg_with(&MetadataKind::ALL);
    let mut columns = BTreeMap::new();
    columns.insert("a".to_string(), documented());
    columns.insert("b".to_string(), ColumnContext::new("b"));
    columns.insert(
        "c".to_string(),
        ColumnContext {
            description: "only a description".into(),
            ..ColumnContext::new("c")
        },
    );

    let gaps = find_undocumented(&cfg, &columns);
    assert_eq!(
        gaps.into_iter().collect::<Vec<_>>(),
        vec!["b".to_string(), "c".to_string()]
    );
}
