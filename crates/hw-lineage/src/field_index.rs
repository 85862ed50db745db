//! Lookup views over a dataset schema

use hw_catalog::{leaf_name, SchemaField};
use std::collections::HashMap;

/// Two lookup views over a schema's fields.
///
/// `by_leaf` keys on the last dot segment of each field path and is what
/// name-based matching uses. `by_path` keys on the unmodified path and is
/// what column lineage edges refer to. When two paths share a leaf, the
/// later field wins.
#[derive(Debug, Default)]
pub(crate) struct FieldIndex<'a> {
    by_leaf: HashMap<&'a str, &'a SchemaField>,
    by_path: HashMap<&'a str, &'a SchemaField>,
}

impl<'a> FieldIndex<'a> {
    pub(crate) fn build(fields: &'a [SchemaField]) -> Self {
        let mut index = Self {
            by_leaf: HashMap::with_capacity(fields.len()),
            by_path: HashMap::with_capacity(fields.len()),
        };
        for field in fields {
            index.by_leaf.insert(leaf_name(&field.field_path), field);
            index.by_path.insert(field.field_path.as_str(), field);
        }
        index
    }

    /// Field whose path ends in `name`
    pub(crate) fn by_leaf(&self, name: &str) -> Option<&'a SchemaField> {
        self.by_leaf.get(name).copied()
    }

    /// Field with exactly this path
    pub(crate) fn by_path(&self, path: &str) -> Option<&'a SchemaField> {
        self.by_path.get(path).copied()
    }

    pub(crate) fn len(&self) -> usize {
        self.by_leaf.len()
    }
}

#[cfg(test)]
#[path = "field_index_test.rs"]
mod tests;
