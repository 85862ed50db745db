//! Table identifiers and dataset URNs.
//!
//! Dataset URNs follow the catalog's
//! `urn:li:dataset:(urn:li:dataPlatform:<platform>,<name>,<env>)` shape.
//! Upstream URNs handed back by the catalog are treated as opaque, so
//! [`DatasetUrn::parse`] only insists on the `urn:li:dataset:` prefix;
//! the structured accessors return `None` for anything else.

use crate::error::{CoreError, CoreResult};
use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::fmt;
use std::ops::Deref;

const DATASET_PREFIX: &str = "urn:li:dataset:";
const PLATFORM_PREFIX: &str = "urn:li:dataPlatform:";
const DEFAULT_ENV: &str = "PROD";

/// Strongly-typed wrapper for a dataset URN
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DatasetUrn(String);

impl DatasetUrn {
    /// Validate and wrap a dataset URN
    pub fn parse(urn: impl Into<String>) -> CoreResult<Self> {
        let urn = urn.into();
        match urn.strip_prefix(DATASET_PREFIX) {
            Some(rest) if !rest.trim().is_empty() => Ok(Self(urn)),
            Some(_) => Err(CoreError::InvalidUrn {
                urn,
                reason: "missing dataset key".into(),
            }),
            None => Err(CoreError::InvalidUrn {
                urn,
                reason: format!("expected prefix '{DATASET_PREFIX}'"),
            }),
        }
    }

    /// Build the URN of a named dataset on a platform
    pub fn build(platform: &str, name: &str) -> Self {
        Self(format!(
            "{DATASET_PREFIX}({PLATFORM_PREFIX}{platform},{name},{DEFAULT_ENV})"
        ))
    }

    /// Split a structured URN into `(platform, name, env)`
    fn parts(&self) -> Option<(&str, &str, &str)> {
        let inner = self
            .0
            .strip_prefix(DATASET_PREFIX)?
            .strip_prefix('(')?
            .strip_suffix(')')?;
        let (platform, rest) = inner.split_once(',')?;
        let (name, env) = rest.rsplit_once(',')?;
        let platform = platform.strip_prefix(PLATFORM_PREFIX)?;
        if name.is_empty() {
            return None;
        }
        Some((platform, name, env))
    }

    /// Platform segment of a structured URN
    pub fn platform(&self) -> Option<&str> {
        self.parts().map(|(platform, _, _)| platform)
    }

    /// Dotted dataset name of a structured URN
    pub fn name(&self) -> Option<&str> {
        self.parts().map(|(_, name, _)| name)
    }

    /// Return the underlying URN as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consume the wrapper and return the inner `String`.
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for DatasetUrn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for DatasetUrn {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Deref for DatasetUrn {
    type Target = str;

    fn deref(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for DatasetUrn {
    fn borrow(&self) -> &str {
        &self.0
    }
}

/// A table addressed as `schema.table` or `catalog.schema.table`
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TableIdentifier {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub catalog: Option<String>,
    pub schema: String,
    pub table: String,
}

impl TableIdentifier {
    /// Create a two-part identifier
    pub fn new(schema: impl Into<String>, table: impl Into<String>) -> Self {
        Self {
            catalog: None,
            schema: schema.into(),
            table: table.into(),
        }
    }

    /// Attach a catalog
    pub fn with_catalog(mut self, catalog: impl Into<String>) -> Self {
        self.catalog = Some(catalog.into());
        self
    }

    /// Parse a dotted `schema.table` or `catalog.schema.table` name
    pub fn parse(name: &str) -> CoreResult<Self> {
        let parts: Vec<&str> = name.split('.').collect();
        if parts.iter().any(|p| p.is_empty()) {
            return Err(CoreError::InvalidTableIdentifier {
                name: name.to_string(),
            });
        }
        match parts.as_slice() {
            [schema, table] => Ok(Self::new(*schema, *table)),
            [catalog, schema, table] => Ok(Self::new(*schema, *table).with_catalog(*catalog)),
            _ => Err(CoreError::InvalidTableIdentifier {
                name: name.to_string(),
            }),
        }
    }

    /// Recover the table from a structured dataset URN
    pub fn from_urn(urn: &DatasetUrn) -> CoreResult<Self> {
        let name = urn.name().ok_or_else(|| CoreError::InvalidUrn {
            urn: urn.to_string(),
            reason: "expected (urn:li:dataPlatform:<platform>,<name>,<env>)".into(),
        })?;
        Self::parse(name)
    }

    /// Build this table's dataset URN on a platform
    pub fn to_urn(&self, platform: &str) -> DatasetUrn {
        DatasetUrn::build(platform, &self.to_string())
    }
}

impl fmt::Display for TableIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.catalog {
            Some(catalog) => write!(f, "{}.{}.{}", catalog, self.schema, self.table),
            None => write!(f, "{}.{}", self.schema, self.table),
        }
    }
}

#[cfg(test)]
#[path = "table_test.rs"]
mod tests;
