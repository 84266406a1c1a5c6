use once_cell::sync::Lazy;
use std::collections::HashMap;

use super::EntityType;

static DRUG_ORDER_PROPERTIES: Lazy<PropertyRegistry> = Lazy::new(|| {
    PropertyRegistry::from_pairs([
        ("drug", EntityType::Drug),
        ("careSetting", EntityType::CareSetting),
        ("orderType", EntityType::OrderType),
        ("doseUnits", EntityType::Concept),
        ("route", EntityType::Concept),
        ("frequency", EntityType::OrderFrequency),
        ("durationUnits", EntityType::Concept),
        ("quantityUnits", EntityType::Concept),
        ("discontinueReason", EntityType::Concept),
    ])
});

/// Maps a declared property name to the entity type its values refer to.
///
/// Lookups are case-insensitive. Names that are not registered constrain
/// nothing and resolve to `None`.
#[derive(Debug, Clone, Default)]
pub struct PropertyRegistry {
    properties: HashMap<String, EntityType>,
    // original spelling, kept for listing
    names: Vec<String>,
}

impl PropertyRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Process-wide table for drug order tags.
    pub fn drug_order() -> &'static PropertyRegistry {
        &DRUG_ORDER_PROPERTIES
    }

    pub fn from_pairs<I, S>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (S, EntityType)>,
        S: Into<String>,
    {
        pairs
            .into_iter()
            .fold(Self::new(), |registry, (name, entity_type)| {
                registry.with_property(name, entity_type)
            })
    }

    pub fn with_property(mut self, name: impl Into<String>, entity_type: EntityType) -> Self {
        let name = name.into();
        let key = name.to_lowercase();
        if self.properties.insert(key, entity_type).is_none() {
            self.names.push(name);
        }
        self
    }

    pub fn entity_type_for(&self, property: &str) -> Option<EntityType> {
        self.properties.get(&property.to_lowercase()).copied()
    }

    pub fn contains(&self, property: &str) -> bool {
        self.entity_type_for(property).is_some()
    }

    /// Registered properties in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, EntityType)> + '_ {
        self.names.iter().filter_map(|name| {
            self.entity_type_for(name)
                .map(|entity_type| (name.as_str(), entity_type))
        })
    }

    pub fn len(&self) -> usize {
        self.properties.len()
    }

    pub fn is_empty(&self) -> bool {
        self.properties.is_empty()
    }
}
