//! Configuration types and parsing for lineage-aware enrichment
//!
//! Configuration is read in two stages. [`RawLineageConfig`] mirrors the
//! document shape and tolerates loosely-typed values; [`LineageConfig::from_raw`]
//! is the only place defaults are substituted and values are validated, so
//! resolution code never sees a half-parsed config.

use crate::error::{CoreError, CoreResult};
use crate::serde_helpers::{serialize_duration, value_as_bool, value_as_duration, value_as_u64};
use glob::{MatchOptions, Pattern};
use serde::{Deserialize, Serialize, Serializer};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::path::Path;
use std::str::FromStr;
use std::time::Duration;

/// Smallest accepted `max_hops`
pub const MIN_HOPS: usize = 1;

/// Largest accepted `max_hops`
pub const MAX_HOPS: usize = 5;

/// Default platform used when building dataset URNs
pub const DEFAULT_PLATFORM: &str = "trino";

/// A kind of column metadata that can be inherited from upstream
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MetadataKind {
    /// Free-text column description
    Descriptions,
    /// Business glossary terms
    GlossaryTerms,
    /// Classification tags
    Tags,
}

impl MetadataKind {
    /// All kinds, in a stable order
    pub const ALL: [MetadataKind; 3] = [
        MetadataKind::Descriptions,
        MetadataKind::GlossaryTerms,
        MetadataKind::Tags,
    ];

    /// Config spelling of this kind
    pub fn as_str(&self) -> &'static str {
        match self {
            MetadataKind::Descriptions => "descriptions",
            MetadataKind::GlossaryTerms => "glossary_terms",
            MetadataKind::Tags => "tags",
        }
    }
}

impl fmt::Display for MetadataKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MetadataKind {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "descriptions" => Ok(MetadataKind::Descriptions),
            "glossary_terms" => Ok(MetadataKind::GlossaryTerms),
            "tags" => Ok(MetadataKind::Tags),
            other => Err(CoreError::invalid(
                "inherit",
                format!("unknown metadata kind '{other}' (expected descriptions, glossary_terms, or tags)"),
            )),
        }
    }
}

/// Policy for columns already filled by a nearer upstream hop
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ConflictResolution {
    /// Closest upstream wins; farther hops never touch an inherited column
    #[default]
    Nearest,
    /// Farther hops may still fill remaining gaps
    All,
    /// Accepted for compatibility; behaves like `All`
    Skip,
}

impl fmt::Display for ConflictResolution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConflictResolution::Nearest => write!(f, "nearest"),
            ConflictResolution::All => write!(f, "all"),
            ConflictResolution::Skip => write!(f, "skip"),
        }
    }
}

impl FromStr for ConflictResolution {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "nearest" => Ok(ConflictResolution::Nearest),
            "all" => Ok(ConflictResolution::All),
            "skip" => Ok(ConflictResolution::Skip),
            other => Err(CoreError::invalid(
                "conflict_resolution",
                format!("unknown value '{other}' (expected nearest, all, or skip)"),
            )),
        }
    }
}

/// A column-name normalization rule
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Default)]
pub struct ColumnTransform {
    /// Dataset glob this rule was declared for. Stored but not consulted:
    /// every rule applies to every column.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_pattern: Option<String>,

    /// Prefix removed from the column name (empty = no-op)
    #[serde(skip_serializing_if = "String::is_empty")]
    pub strip_prefix: String,

    /// Suffix removed from the column name (empty = no-op)
    #[serde(skip_serializing_if = "String::is_empty")]
    pub strip_suffix: String,
}

/// A compiled glob matched against fully-qualified table names.
///
/// Patterns use the filepath-match dialect: `**` is the same as `*`,
/// a class is negated with `[^...]` or `[!...]`, and `\` escapes the next
/// character outside a class.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TargetPattern {
    source: String,
    pattern: Pattern,
}

impl TargetPattern {
    /// Compile a glob pattern
    pub fn new(pattern: &str) -> CoreResult<Self> {
        Pattern::new(&to_glob_syntax(pattern))
            .map(|compiled| Self {
                source: pattern.to_string(),
                pattern: compiled,
            })
            .map_err(|e| CoreError::invalid("aliases.targets", format!("bad glob '{pattern}': {e}")))
    }

    /// Shell-style match: `*` and `?` never cross a `/`, dots are literal
    pub fn matches(&self, table_name: &str) -> bool {
        let opts = MatchOptions {
            case_sensitive: true,
            require_literal_separator: true,
            require_literal_leading_dot: false,
        };
        self.pattern.matches_with(table_name, opts)
    }

    /// The pattern as written in the config
    pub fn as_str(&self) -> &str {
        &self.source
    }
}

/// Rewrite a filepath-match pattern into the `glob` crate's syntax
fn to_glob_syntax(pattern: &str) -> String {
    let mut out = String::with_capacity(pattern.len());
    let mut chars = pattern.chars().peekable();
    let mut in_class = false;
    while let Some(c) = chars.next() {
        if in_class {
            out.push(c);
            if c == ']' {
                in_class = false;
            }
            continue;
        }
        match c {
            '*' => {
                while chars.peek() == Some(&'*') {
                    chars.next();
                }
                out.push('*');
            }
            '[' => {
                in_class = true;
                out.push('[');
                if chars.peek() == Some(&'^') {
                    chars.next();
                    out.push('!');
                }
                // A leading `]` is a literal member, not the end of the class
                if chars.peek() == Some(&']') {
                    chars.next();
                    out.push(']');
                }
            }
            '\\' => match chars.next() {
                Some(escaped @ ('*' | '?' | '[' | ']')) => {
                    out.push('[');
                    out.push(escaped);
                    out.push(']');
                }
                Some(other) => out.push(other),
                None => out.push('\\'),
            },
            other => out.push(other),
        }
    }
    out
}

impl fmt::Display for TargetPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for TargetPattern {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// An explicit documentation source for tables matching a set of globs
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AliasConfig {
    /// Fully-qualified source table name (e.g. `warehouse.users`)
    pub source: String,

    /// Globs matched against the target table name, in declaration order
    pub targets: Vec<TargetPattern>,

    /// Explicit target column -> source column names
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub column_mapping: BTreeMap<String, String>,
}

/// Lineage-aware enrichment settings, immutable once parsed
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LineageConfig {
    /// Whether inheritance is attempted at all
    pub enabled: bool,

    /// Upstream traversal depth, in [1, 5]
    pub max_hops: usize,

    /// Metadata kinds eligible for inheritance
    pub inherit: BTreeSet<MetadataKind>,

    /// Policy for columns already filled at a nearer hop
    pub conflict_resolution: ConflictResolution,

    /// Try column-level lineage before table-level
    pub prefer_column_lineage: bool,

    /// Ordered name normalization rules
    pub column_transforms: Vec<ColumnTransform>,

    /// Ordered explicit source overrides
    pub aliases: Vec<AliasConfig>,

    /// Lifetime of cached lineage graphs (consumed by cache layers, not the resolver)
    #[serde(serialize_with = "serialize_duration")]
    pub cache_ttl: Duration,

    /// Budget for one whole inheritance pass
    #[serde(serialize_with = "serialize_duration")]
    pub timeout: Duration,
}

impl Default for LineageConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            max_hops: 2,
            inherit: [MetadataKind::GlossaryTerms, MetadataKind::Descriptions]
                .into_iter()
                .collect(),
            conflict_resolution: ConflictResolution::Nearest,
            prefer_column_lineage: true,
            column_transforms: Vec::new(),
            aliases: Vec::new(),
            cache_ttl: Duration::from_secs(10 * 60),
            timeout: Duration::from_secs(5),
        }
    }
}

impl LineageConfig {
    /// Check whether a metadata kind is eligible for inheritance
    pub fn should_inherit(&self, kind: MetadataKind) -> bool {
        self.inherit.contains(&kind)
    }

    /// Parse from a YAML (or JSON) document holding just the lineage section
    pub fn from_yaml(yaml: &str) -> CoreResult<Self> {
        let raw: RawLineageConfig =
            serde_yaml::from_str(yaml).map_err(|e| CoreError::ConfigParseError {
                message: e.to_string(),
            })?;
        Self::from_raw(raw)
    }

    /// Build a validated config from its raw document form.
    ///
    /// Absent fields take their defaults; present fields must be valid.
    /// An absent or zero `max_hops` means "use the default".
    pub fn from_raw(raw: RawLineageConfig) -> CoreResult<Self> {
        let defaults = Self::default();

        let enabled = match raw.enabled {
            Some(v) => value_as_bool(&v).map_err(|e| CoreError::invalid("enabled", e))?,
            None => defaults.enabled,
        };

        let max_hops = match raw.max_hops {
            Some(v) => {
                let hops = value_as_u64(&v).map_err(|e| CoreError::invalid("max_hops", e))?;
                match usize::try_from(hops) {
                    Ok(0) => defaults.max_hops,
                    Ok(h) if (MIN_HOPS..=MAX_HOPS).contains(&h) => h,
                    _ => {
                        return Err(CoreError::invalid(
                            "max_hops",
                            format!("{hops} is outside the range {MIN_HOPS}-{MAX_HOPS}"),
                        ))
                    }
                }
            }
            None => defaults.max_hops,
        };

        let inherit = match raw.inherit {
            Some(kinds) => kinds
                .iter()
                .map(|k| k.parse::<MetadataKind>())
                .collect::<CoreResult<BTreeSet<_>>>()?,
            None => defaults.inherit,
        };

        let conflict_resolution = match raw.conflict_resolution.as_deref() {
            Some(s) if !s.trim().is_empty() => s.parse::<ConflictResolution>()?,
            _ => defaults.conflict_resolution,
        };

        let prefer_column_lineage = match raw.prefer_column_lineage {
            Some(v) => {
                value_as_bool(&v).map_err(|e| CoreError::invalid("prefer_column_lineage", e))?
            }
            None => defaults.prefer_column_lineage,
        };

        let column_transforms = raw
            .column_transforms
            .into_iter()
            .map(|t| ColumnTransform {
                target_pattern: t.target_pattern.filter(|p| !p.is_empty()),
                strip_prefix: t.strip_prefix.unwrap_or_default(),
                strip_suffix: t.strip_suffix.unwrap_or_default(),
            })
            .collect();

        let aliases = raw.aliases.into_iter().map(compile_alias).collect();

        let cache_ttl = match raw.cache_ttl {
            Some(v) => value_as_duration(&v).map_err(|e| CoreError::invalid("cache_ttl", e))?,
            None => defaults.cache_ttl,
        };

        // Zero falls back to the default, as with max_hops
        let timeout = match raw.timeout {
            Some(v) => match value_as_duration(&v).map_err(|e| CoreError::invalid("timeout", e))? {
                Duration::ZERO => defaults.timeout,
                t => t,
            },
            None => defaults.timeout,
        };

        Ok(Self {
            enabled,
            max_hops,
            inherit,
            conflict_resolution,
            prefer_column_lineage,
            column_transforms,
            aliases,
            cache_ttl,
            timeout,
        })
    }
}

/// Compile an alias's target globs. A glob that fails to compile can never
/// match, so it is dropped with a warning instead of failing the whole config.
fn compile_alias(raw: RawAliasConfig) -> AliasConfig {
    let targets = raw
        .targets
        .iter()
        .filter_map(|pattern| match TargetPattern::new(pattern) {
            Ok(p) => Some(p),
            Err(e) => {
                log::warn!("Ignoring alias target for source '{}': {}", raw.source, e);
                None
            }
        })
        .collect();
    AliasConfig {
        source: raw.source,
        targets,
        column_mapping: raw.column_mapping,
    }
}

/// Document shape of the lineage section, before validation
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RawLineageConfig {
    pub enabled: Option<serde_yaml::Value>,
    pub max_hops: Option<serde_yaml::Value>,
    pub inherit: Option<Vec<String>>,
    pub conflict_resolution: Option<String>,
    pub prefer_column_lineage: Option<serde_yaml::Value>,
    pub column_transforms: Vec<RawColumnTransform>,
    pub aliases: Vec<RawAliasConfig>,
    pub cache_ttl: Option<serde_yaml::Value>,
    pub timeout: Option<serde_yaml::Value>,
}

/// Document shape of one `column_transforms` entry
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RawColumnTransform {
    pub target_pattern: Option<String>,
    pub strip_prefix: Option<String>,
    pub strip_suffix: Option<String>,
}

/// Document shape of one `aliases` entry
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RawAliasConfig {
    pub source: String,
    #[serde(default)]
    pub targets: Vec<String>,
    #[serde(default)]
    pub column_mapping: BTreeMap<String, String>,
}

/// Semantic layer settings
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SemanticConfig {
    /// Platform name used when building dataset URNs
    pub platform: String,

    /// Lineage-aware enrichment settings
    pub lineage: LineageConfig,
}

impl Default for SemanticConfig {
    fn default() -> Self {
        Self {
            platform: DEFAULT_PLATFORM.to_string(),
            lineage: LineageConfig::default(),
        }
    }
}

/// Top-level Headwater configuration document
#[derive(Debug, Clone, PartialEq, Serialize, Default)]
pub struct HeadwaterConfig {
    /// Semantic layer settings
    pub semantic: SemanticConfig,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawHeadwaterConfig {
    semantic: RawSemanticConfig,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct RawSemanticConfig {
    platform: Option<String>,
    lineage: RawLineageConfig,
}

impl HeadwaterConfig {
    /// Load and validate a config file
    pub fn load(path: &Path) -> CoreResult<Self> {
        if !path.exists() {
            return Err(CoreError::ConfigNotFound {
                path: path.display().to_string(),
            });
        }
        let content = std::fs::read_to_string(path).map_err(|e| CoreError::IoWithPath {
            path: path.display().to_string(),
            source: e,
        })?;
        Self::from_yaml(&content)
    }

    /// Parse and validate a config document
    pub fn from_yaml(yaml: &str) -> CoreResult<Self> {
        let raw: RawHeadwaterConfig = if yaml.trim().is_empty() {
            RawHeadwaterConfig::default()
        } else {
            serde_yaml::from_str(yaml).map_err(|e| CoreError::ConfigParseError {
                message: e.to_string(),
            })?
        };

        let platform = raw
            .semantic
            .platform
            .map(|p| p.trim().to_string())
            .filter(|p| !p.is_empty())
            .unwrap_or_else(|| DEFAULT_PLATFORM.to_string());

        Ok(Self {
            semantic: SemanticConfig {
                platform,
                lineage: LineageConfig::from_raw(raw.semantic.lineage)?,
            },
        })
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
