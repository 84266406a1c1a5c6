//! Public entry points used by the export/import workflow.
//!
//! A descriptor knows one attribute of one tag family: how to rewrite the
//! entity references it carries and how to enumerate them. Both operations
//! are all-or-nothing; failures come back as a single wrapped error.

use crate::core::TagConfig;
use crate::dependencies::{DependencyRegistry, collect_dependencies};
use crate::document::Document;
use crate::error::{DependencyError, MetadataError, Result, SubstitutionError};
use crate::schema::SchemaResolver;
use crate::substitution::{SubstitutionMap, SubstitutionReport, Substituter, substitute_tree};
use crate::types::{HtmlForm, PropertyRegistry};
use crate::walker::TreeWalker;

pub trait AttributeDescriptor {
    /// Name of the attribute whose value refers to an entity.
    fn attribute_name(&self) -> &str;

    /// Rewrites the form's entity references. On error the form is left
    /// exactly as it was.
    fn perform_substitutions(
        &self,
        form: &mut HtmlForm,
        substituter: &dyn Substituter,
        map: &SubstitutionMap,
    ) -> std::result::Result<SubstitutionReport, SubstitutionError>;

    /// Every entity the form depends on, grouped by type.
    fn dependencies(
        &self,
        form: &HtmlForm,
    ) -> std::result::Result<DependencyRegistry, DependencyError>;
}

/// Descriptor for `value` attributes of drug order tags.
///
/// Property typing always comes from [`PropertyRegistry::drug_order`], the
/// same table the schema resolver's answer lists mirror.
pub struct DrugOrderTagDescriptor {
    config: TagConfig,
    resolver: Box<dyn SchemaResolver>,
}

impl DrugOrderTagDescriptor {
    pub fn new(resolver: impl SchemaResolver + 'static) -> Self {
        Self {
            config: TagConfig::default(),
            resolver: Box::new(resolver),
        }
    }

    pub fn with_config(mut self, config: TagConfig) -> Self {
        self.config = config;
        self
    }

    pub fn config(&self) -> &TagConfig {
        &self.config
    }

    fn substitute_xml(
        &self,
        xml: &str,
        substituter: &dyn Substituter,
        map: &SubstitutionMap,
    ) -> Result<(String, SubstitutionReport)> {
        let mut document = Document::parse(xml)?;
        let walker = TreeWalker::new(PropertyRegistry::drug_order(), &self.config);

        let root = document.find_element_mut(&self.config.root_tag);
        if root.is_none() {
            tracing::warn!(root = %self.config.root_tag, "Form has no root element, nothing to substitute");
        }
        let report = substitute_tree(root, &walker, substituter, map)?;

        Ok((document.to_xml_string()?, report))
    }

    fn resolve_dependencies(&self, form: &HtmlForm) -> Result<DependencyRegistry> {
        let schema = self
            .resolver
            .resolve(form)
            .map_err(|source| match source.downcast::<MetadataError>() {
                Ok(err) => *err,
                Err(source) => {
                    MetadataError::schema_resolution_with_source("schema resolver failed", source)
                }
            })?;
        Ok(collect_dependencies(&schema))
    }
}

impl AttributeDescriptor for DrugOrderTagDescriptor {
    fn attribute_name(&self) -> &str {
        &self.config.value_attribute
    }

    fn perform_substitutions(
        &self,
        form: &mut HtmlForm,
        substituter: &dyn Substituter,
        map: &SubstitutionMap,
    ) -> std::result::Result<SubstitutionReport, SubstitutionError> {
        let (xml, report) = self
            .substitute_xml(&form.xml_data, substituter, map)
            .map_err(SubstitutionError::new)?;
        form.xml_data = xml;

        #[cfg(feature = "tracing")]
        tracing::info!(
            form = %form,
            changed = report.values_changed,
            seen = report.values_seen,
            "Performed drug order tag substitutions"
        );
        Ok(report)
    }

    fn dependencies(
        &self,
        form: &HtmlForm,
    ) -> std::result::Result<DependencyRegistry, DependencyError> {
        let registry = self.resolve_dependencies(form).map_err(DependencyError::new)?;
        #[cfg(feature = "tracing")]
        tracing::info!(
            form = %form,
            entities = registry.total(),
            "Collected drug order tag dependencies"
        );
        Ok(registry)
    }
}

impl std::fmt::Debug for DrugOrderTagDescriptor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DrugOrderTagDescriptor")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}
