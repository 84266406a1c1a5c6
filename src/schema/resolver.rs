use super::{Answer, AnswerList, DrugOrderField, EntityCatalog, HtmlFormField, HtmlFormSchema};
use crate::core::TagConfig;
use crate::document::{Document, Node};
use crate::error::{BoxError, MetadataError, Result};
use crate::types::{Entity, EntityType, HtmlForm, PropertyRegistry};
use crate::walker::TreeWalker;

/// Builds the logical field schema of a form.
pub trait SchemaResolver {
    fn resolve(&self, form: &HtmlForm) -> std::result::Result<HtmlFormSchema, BoxError>;
}

impl<F> SchemaResolver for F
where
    F: Fn(&HtmlForm) -> std::result::Result<HtmlFormSchema, BoxError>,
{
    fn resolve(&self, form: &HtmlForm) -> std::result::Result<HtmlFormSchema, BoxError> {
        self(form)
    }
}

/// Resolves drug order fields straight from the form's tags.
///
/// Every compound order element becomes one [`DrugOrderField`]. The values
/// of its property-declaring elements and of the options beneath them are
/// looked up in the catalog; a value the catalog does not know fails the
/// whole resolution.
#[derive(Debug, Clone)]
pub struct TagSchemaResolver<C> {
    catalog: C,
    config: TagConfig,
}

impl<C: EntityCatalog> TagSchemaResolver<C> {
    pub fn new(catalog: C) -> Self {
        Self {
            catalog,
            config: TagConfig::default(),
        }
    }

    pub fn with_config(mut self, config: TagConfig) -> Self {
        self.config = config;
        self
    }

    pub fn resolve_schema(&self, form: &HtmlForm) -> Result<HtmlFormSchema> {
        let document = Document::parse(&form.xml_data)?;
        let mut schema = HtmlFormSchema::new();

        let Some(root) = document.find_element(&self.config.root_tag) else {
            tracing::warn!(root = %self.config.root_tag, "Form has no root element, no fields resolved");
            return Ok(schema);
        };

        let walker = TreeWalker::new(PropertyRegistry::drug_order(), &self.config);
        walker.walk(Some(root), None, &mut |node: &Node, _| {
            if node.is_named(&self.config.compound_tag) {
                let field = self.drug_order_field(node, &walker)?;
                schema.add_field(HtmlFormField::DrugOrder(field));
            }
            Ok::<(), MetadataError>(())
        })?;

        tracing::debug!(fields = schema.fields.len(), "Resolved form schema");
        Ok(schema)
    }

    fn drug_order_field(&self, order: &Node, walker: &TreeWalker<'_>) -> Result<DrugOrderField> {
        let mut field = DrugOrderField::new();
        for child in &order.children {
            self.collect_answers(child, None, walker, &mut field)?;
        }
        Ok(field)
    }

    /// Mirrors the substitution pass: every value the pass would rewrite
    /// under `order` lands in the answer list of its nearest declaring
    /// ancestor (or of the declaring element itself).
    fn collect_answers(
        &self,
        node: &Node,
        inherited: Option<AnswerList>,
        walker: &TreeWalker<'_>,
        field: &mut DrugOrderField,
    ) -> Result<()> {
        let declared = walker.declared_property(node);
        let list = match declared {
            Some(property) => AnswerList::from_property(property),
            None => inherited,
        };

        if let Some(list) = list {
            if declared.is_some() && list == AnswerList::DiscontinueReason {
                if let Some(question) = non_blank(node.attribute(&self.config.question_attribute)) {
                    field.discontinued_reason_question =
                        Some(self.lookup(EntityType::Concept, question)?);
                }
            }
            if declared.is_some() || node.is_named(&self.config.option_tag) {
                self.add_answer(node, list, field)?;
            }
        }

        for child in &node.children {
            self.collect_answers(child, list, walker, field)?;
        }
        Ok(())
    }

    fn add_answer(&self, node: &Node, list: AnswerList, field: &mut DrugOrderField) -> Result<()> {
        let Some(value) = non_blank(node.attribute(&self.config.value_attribute)) else {
            return Ok(());
        };
        let entity = self.lookup(list.entity_type(), value)?;
        let label = non_blank(node.attribute(&self.config.label_attribute)).unwrap_or(value);
        field.answers_mut(list).push(Answer::new(label, entity));
        Ok(())
    }

    fn lookup(&self, entity_type: EntityType, value: &str) -> Result<Entity> {
        self.catalog.lookup(entity_type, value).ok_or_else(|| {
            MetadataError::schema_resolution(format!("Unable to find {entity_type} for '{value}'"))
        })
    }
}

impl<C: EntityCatalog> SchemaResolver for TagSchemaResolver<C> {
    fn resolve(&self, form: &HtmlForm) -> std::result::Result<HtmlFormSchema, BoxError> {
        Ok(self.resolve_schema(form)?)
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|value| !value.is_empty())
}
