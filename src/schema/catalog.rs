use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::Result;
use crate::types::{Entity, EntityType};

/// Looks up reference data of the local installation by the text a form
/// uses to refer to it (uuid, numeric id or name).
pub trait EntityCatalog {
    fn lookup(&self, entity_type: EntityType, text: &str) -> Option<Entity>;
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MemoryCatalog {
    entities: Vec<Entity>,
}

impl MemoryCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, entity: Entity) -> Self {
        self.insert(entity);
        self
    }

    pub fn insert(&mut self, entity: Entity) {
        self.entities.push(entity);
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }
}

impl EntityCatalog for MemoryCatalog {
    fn lookup(&self, entity_type: EntityType, text: &str) -> Option<Entity> {
        self.entities
            .iter()
            .find(|entity| entity.entity_type == entity_type && entity.matches(text))
            .cloned()
    }
}

impl<C: EntityCatalog + ?Sized> EntityCatalog for &C {
    fn lookup(&self, entity_type: EntityType, text: &str) -> Option<Entity> {
        (**self).lookup(entity_type, text)
    }
}
