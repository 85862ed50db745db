//! Copying metadata from upstream fields into column contexts

use hw_catalog::{SchemaField, TermAssociation};
use hw_core::{ColumnContext, GlossaryTerm, InheritedMetadata, LineageConfig, MetadataKind, Sanitizer};

/// Applies inherited metadata, one kind at a time
pub(crate) struct MetadataApplier<'a> {
    cfg: &'a LineageConfig,
    sanitizer: &'a Sanitizer,
}

impl<'a> MetadataApplier<'a> {
    pub(crate) fn new(cfg: &'a LineageConfig, sanitizer: &'a Sanitizer) -> Self {
        Self { cfg, sanitizer }
    }

    /// Convert one field of the table's own schema into its column context
    pub(crate) fn field_to_column_context(
        &self,
        urn: &str,
        field: &SchemaField,
        name: &str,
    ) -> ColumnContext {
        self.sanitizer
            .detect_and_log(urn, &field.field_path, &field.description);

        let mut column = ColumnContext::new(name);
        column.description = self.sanitizer.sanitize_description(&field.description);
        column.classify_tags(field.tags.iter().map(|t| t.name.as_str()));
        column.tags = self.sanitize_tags(field);
        column.glossary_terms = self.convert_terms(&field.glossary_terms);
        column
    }

    /// Fill the target's empty inherited kinds from `source`.
    ///
    /// Provenance is recorded only when at least one kind was copied.
    /// Returns whether anything was copied.
    pub(crate) fn inherit(
        &self,
        target: &mut ColumnContext,
        source: &SchemaField,
        provenance: InheritedMetadata,
    ) -> bool {
        let mut inherited = self.inherit_description(target, source, &provenance.source_urn);
        inherited |= self.inherit_glossary_terms(target, source);
        inherited |= self.inherit_tags(target, source);

        if inherited {
            log::debug!(
                "Column '{}' inherited from {}:{} ({}, {} hop(s))",
                target.name,
                provenance.source_urn,
                provenance.source_column,
                provenance.match_method,
                provenance.hops
            );
            target.inherited_from = Some(provenance);
        }
        inherited
    }

    fn inherit_description(&self, target: &mut ColumnContext, source: &SchemaField, urn: &str) -> bool {
        if !self.cfg.should_inherit(MetadataKind::Descriptions)
            || !target.description.is_empty()
            || source.description.is_empty()
        {
            return false;
        }
        self.sanitizer
            .detect_and_log(urn, &source.field_path, &source.description);
        target.description = self.sanitizer.sanitize_description(&source.description);
        true
    }

    fn inherit_glossary_terms(&self, target: &mut ColumnContext, source: &SchemaField) -> bool {
        if !self.cfg.should_inherit(MetadataKind::GlossaryTerms)
            || !target.glossary_terms.is_empty()
            || source.glossary_terms.is_empty()
        {
            return false;
        }
        target.glossary_terms = self.convert_terms(&source.glossary_terms);
        true
    }

    fn inherit_tags(&self, target: &mut ColumnContext, source: &SchemaField) -> bool {
        if !self.cfg.should_inherit(MetadataKind::Tags)
            || !target.tags.is_empty()
            || source.tags.is_empty()
        {
            return false;
        }
        target.tags = self.sanitize_tags(source);
        true
    }

    fn sanitize_tags(&self, field: &SchemaField) -> Vec<String> {
        let names: Vec<&str> = field.tags.iter().map(|t| t.name.as_str()).collect();
        self.sanitizer.sanitize_tags(&names)
    }

    fn convert_terms(&self, terms: &[TermAssociation]) -> Vec<GlossaryTerm> {
        terms
            .iter()
            .map(|term| GlossaryTerm {
                urn: term.urn.clone(),
                name: self.sanitizer.sanitize_string(&term.name),
                description: self.sanitizer.sanitize_description(&term.description),
            })
            .collect()
    }
}

#[cfg(test)]
#[path = "inherit_test.rs"]
mod tests;
