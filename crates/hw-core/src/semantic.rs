//! Semantic column metadata and inheritance provenance

use serde::{Deserialize, Serialize};
use std::fmt;

/// A business glossary term attached to a column
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct GlossaryTerm {
    /// Catalog URN of the term
    pub urn: String,
    /// Human-readable term name
    pub name: String,
    /// Term definition
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub description: String,
}

/// How an upstream column was matched to the target column
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchMethod {
    /// Configured alias (explicit mapping or transformed name)
    Alias,
    /// Fine-grained column-to-column lineage edge
    ColumnLineage,
    /// Same name at a table-level ancestor
    NameExact,
    /// Name equal after column transforms at a table-level ancestor
    NameTransformed,
}

impl fmt::Display for MatchMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MatchMethod::Alias => write!(f, "alias"),
            MatchMethod::ColumnLineage => write!(f, "column_lineage"),
            MatchMethod::NameExact => write!(f, "name_exact"),
            MatchMethod::NameTransformed => write!(f, "name_transformed"),
        }
    }
}

/// Provenance of metadata inherited from upstream
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InheritedMetadata {
    /// URN of the upstream dataset
    pub source_urn: String,
    /// Column name in the upstream dataset
    pub source_column: String,
    /// Distance from the target dataset (1 = direct upstream)
    pub hops: usize,
    /// How the column was matched
    pub match_method: MatchMethod,
}

/// Semantic context for one column
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct ColumnContext {
    /// Leaf column name
    pub name: String,

    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub description: String,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub glossary_terms: Vec<GlossaryTerm>,

    /// Set when any tag mentions PII
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub is_pii: bool,

    /// Set when any tag mentions sensitive or confidential data
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub is_sensitive: bool,

    /// Present only when at least one metadata kind was inherited
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub inherited_from: Option<InheritedMetadata>,
}

impl ColumnContext {
    /// Create an empty context for a column
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Whether the column carries anything worth reporting
    pub fn has_content(&self) -> bool {
        !self.description.is_empty()
            || !self.tags.is_empty()
            || !self.glossary_terms.is_empty()
            || self.is_pii
            || self.is_sensitive
            || self.inherited_from.is_some()
    }

    /// Set the PII and sensitivity flags from tag names
    pub fn classify_tags<'a>(&mut self, tags: impl IntoIterator<Item = &'a str>) {
        for tag in tags {
            let lower = tag.to_lowercase();
            if lower.contains("pii") {
                self.is_pii = true;
            }
            if lower.contains("sensitive") || lower.contains("confidential") {
                self.is_sensitive = true;
            }
        }
    }
}

#[cfg(test)]
#[path = "semantic_test.rs"]
mod tests;
