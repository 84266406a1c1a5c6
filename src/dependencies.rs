//! Dependency collection: every reference-data entity a form's order
//! fields offer, grouped by entity type.

use serde::ser::{Serialize, Serializer};
use std::collections::{BTreeMap, HashMap, HashSet};

use crate::schema::HtmlFormSchema;
use crate::types::{Entity, EntityType};

/// Entities grouped by type. Buckets are sets, so adding an entity twice is
/// harmless.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DependencyRegistry {
    dependencies: HashMap<EntityType, HashSet<Entity>>,
}

impl DependencyRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `true` if the entity was not registered yet.
    pub fn add(&mut self, entity_type: EntityType, entity: Entity) -> bool {
        self.dependencies
            .entry(entity_type)
            .or_default()
            .insert(entity)
    }

    pub fn get(&self, entity_type: EntityType) -> Option<&HashSet<Entity>> {
        self.dependencies.get(&entity_type)
    }

    pub fn contains(&self, entity_type: EntityType, entity: &Entity) -> bool {
        self.get(entity_type)
            .is_some_and(|bucket| bucket.contains(entity))
    }

    pub fn entity_types(&self) -> impl Iterator<Item = EntityType> + '_ {
        self.dependencies.keys().copied()
    }

    /// Number of entities across all buckets.
    pub fn total(&self) -> usize {
        self.dependencies.values().map(HashSet::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.dependencies.is_empty()
    }

    pub fn merge(&mut self, other: DependencyRegistry) {
        for (entity_type, bucket) in other.dependencies {
            self.dependencies
                .entry(entity_type)
                .or_default()
                .extend(bucket);
        }
    }

    /// Buckets ordered by type, entities ordered by uuid.
    pub fn sorted(&self) -> BTreeMap<EntityType, Vec<&Entity>> {
        self.dependencies
            .iter()
            .map(|(entity_type, bucket)| {
                let mut entities: Vec<_> = bucket.iter().collect();
                entities.sort_by(|a, b| a.uuid.cmp(&b.uuid));
                (*entity_type, entities)
            })
            .collect()
    }
}

impl Serialize for DependencyRegistry {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.sorted().serialize(serializer)
    }
}

/// Registers every answer of every drug order field under its entity type.
/// Fields of other kinds and empty answer lists contribute nothing.
pub fn collect_dependencies(schema: &HtmlFormSchema) -> DependencyRegistry {
    let mut registry = DependencyRegistry::new();

    for field in schema.drug_order_fields() {
        for (list, answers) in field.answer_lists() {
            for answer in answers {
                registry.add(list.entity_type(), answer.entity.clone());
            }
        }
        if let Some(question) = &field.discontinued_reason_question {
            registry.add(EntityType::Concept, question.clone());
        }
    }

    tracing::debug!(
        types = registry.dependencies.len(),
        entities = registry.total(),
        "Collected form dependencies"
    );
    registry
}
