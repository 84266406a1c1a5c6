//! Depth-first traversal with type-context threading.
//!
//! Every node is visited exactly once, pre-order, siblings in document
//! order. The "current expected entity type" is passed down by value: a
//! property-declaring element replaces it with the type its property name
//! maps to (or clears it when the name is unknown), every other node
//! inherits its parent's context unchanged.

use crate::core::TagConfig;
use crate::document::Node;
use crate::types::{EntityType, PropertyRegistry};

#[derive(Debug, Clone, Copy)]
pub struct TreeWalker<'a> {
    registry: &'a PropertyRegistry,
    config: &'a TagConfig,
}

impl<'a> TreeWalker<'a> {
    pub fn new(registry: &'a PropertyRegistry, config: &'a TagConfig) -> Self {
        Self { registry, config }
    }

    pub fn config(&self) -> &'a TagConfig {
        self.config
    }

    /// Property name declared by `node`, if it is a declaring element.
    /// A declaring element without the name attribute declares `""`.
    pub fn declared_property<'n>(&self, node: &'n Node) -> Option<&'n str> {
        if !node.is_named(&self.config.property_tag) {
            return None;
        }
        Some(
            node.attribute(&self.config.property_name_attribute)
                .unwrap_or_default(),
        )
    }

    pub fn effective_type(&self, node: &Node, inherited: Option<EntityType>) -> Option<EntityType> {
        match self.declared_property(node) {
            Some(property) => self.registry.entity_type_for(property),
            None => inherited,
        }
    }

    /// Visits `node` and its descendants. An absent node is a no-op; the
    /// first visitor error stops the traversal and is returned as is.
    pub fn walk<E, F>(
        &self,
        node: Option<&Node>,
        inherited: Option<EntityType>,
        visitor: &mut F,
    ) -> Result<(), E>
    where
        F: FnMut(&Node, Option<EntityType>) -> Result<(), E>,
    {
        let Some(node) = node else {
            return Ok(());
        };

        let context = self.effective_type(node, inherited);
        visitor(node, context)?;
        for child in &node.children {
            self.walk(Some(child), context, visitor)?;
        }
        Ok(())
    }

    /// Same traversal as [`walk`](Self::walk), handing out exclusive
    /// borrows so the visitor can rewrite attributes in place.
    pub fn walk_mut<E, F>(
        &self,
        node: Option<&mut Node>,
        inherited: Option<EntityType>,
        visitor: &mut F,
    ) -> Result<(), E>
    where
        F: FnMut(&mut Node, Option<EntityType>) -> Result<(), E>,
    {
        let Some(node) = node else {
            return Ok(());
        };

        let context = self.effective_type(node, inherited);
        visitor(&mut *node, context)?;
        for child in node.children.iter_mut() {
            self.walk_mut(Some(child), context, visitor)?;
        }
        Ok(())
    }
}
