//! Wire types returned by the catalog

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// A tag attached to a schema field.
///
/// Deserializes from either `{name: pii}` or the bare string `pii`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Tag {
    pub name: String,
}

impl Tag {
    /// Create a tag by name
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

impl<'de> Deserialize<'de> for Tag {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum TagRepr {
            Bare(String),
            Full { name: String },
        }

        Ok(match TagRepr::deserialize(deserializer)? {
            TagRepr::Bare(name) | TagRepr::Full { name } => Tag { name },
        })
    }
}

/// A glossary term associated with a schema field
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct TermAssociation {
    pub urn: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
}

/// One field of a dataset schema
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct SchemaField {
    /// Dot-separated path; may carry structural qualifiers such as
    /// `[version=2.0].[type=struct].user_id`
    pub field_path: String,

    #[serde(default)]
    pub description: String,

    #[serde(default)]
    pub tags: Vec<Tag>,

    #[serde(default)]
    pub glossary_terms: Vec<TermAssociation>,
}

impl SchemaField {
    /// Create an undocumented field
    pub fn new(field_path: impl Into<String>) -> Self {
        Self {
            field_path: field_path.into(),
            ..Default::default()
        }
    }

    /// Builder: set the description
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Builder: add a tag
    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tags.push(Tag::new(tag));
        self
    }

    /// Builder: add a glossary term
    pub fn with_term(mut self, urn: impl Into<String>, name: impl Into<String>) -> Self {
        self.glossary_terms.push(TermAssociation {
            urn: urn.into(),
            name: name.into(),
            description: String::new(),
        });
        self
    }

    /// Last dot-separated segment of the field path
    pub fn leaf_name(&self) -> &str {
        leaf_name(&self.field_path)
    }
}

/// Last dot-separated segment of a field path.
///
/// `[version=2.0].[type=struct].user_id` and `user.address.city` reduce to
/// `user_id` and `city` respectively.
pub fn leaf_name(field_path: &str) -> &str {
    field_path.rsplit('.').next().unwrap_or(field_path)
}

/// Schema of one dataset
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct SchemaMetadata {
    #[serde(default)]
    pub fields: Vec<SchemaField>,
}

impl SchemaMetadata {
    /// Create a schema from its fields
    pub fn new(fields: Vec<SchemaField>) -> Self {
        Self { fields }
    }
}

/// Direction of a lineage traversal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LineageDirection {
    /// Towards sources
    #[default]
    Upstream,
    /// Towards consumers
    Downstream,
}

impl fmt::Display for LineageDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LineageDirection::Upstream => write!(f, "upstream"),
            LineageDirection::Downstream => write!(f, "downstream"),
        }
    }
}

/// A dataset reached by a lineage traversal
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineageNode {
    pub urn: String,
    /// Hop distance from the queried dataset (0 = the dataset itself)
    pub level: usize,
}

/// A table-level lineage edge, pointing from producer to consumer
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LineageEdge {
    pub source: String,
    pub target: String,
}

/// Result of a table-level lineage query
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct LineageResult {
    pub start: String,
    pub direction: LineageDirection,
    pub nodes: Vec<LineageNode>,
    pub edges: Vec<LineageEdge>,
}

/// One fine-grained column lineage edge into the queried dataset
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ColumnLineageMapping {
    /// Column path in the queried dataset
    pub downstream_column: String,
    /// URN of the upstream dataset
    pub upstream_dataset: String,
    /// Column path in the upstream dataset
    pub upstream_column: String,
}

/// Column lineage of one dataset
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct ColumnLineage {
    pub dataset_urn: String,
    pub mappings: Vec<ColumnLineageMapping>,
}
