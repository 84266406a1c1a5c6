use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::types::{Entity, EntityType};

/// One source → replacement pair, the JSON shape of a [`SubstitutionMap`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SubstitutionEntry {
    pub source: Entity,
    pub target: Entity,
}

/// Previously resolved substitutions: entities of the exporting
/// installation mapped to their equivalents in the importing one.
///
/// The passes only read from the map.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "Vec<SubstitutionEntry>", into = "Vec<SubstitutionEntry>")]
pub struct SubstitutionMap {
    entries: IndexMap<Entity, Entity>,
}

impl SubstitutionMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, source: Entity, target: Entity) -> Self {
        self.insert(source, target);
        self
    }

    pub fn insert(&mut self, source: Entity, target: Entity) -> Option<Entity> {
        self.entries.insert(source, target)
    }

    pub fn get(&self, source: &Entity) -> Option<&Entity> {
        self.entries.get(source)
    }

    /// First entry whose source has `entity_type` and is referred to by `text`.
    pub fn find(&self, entity_type: EntityType, text: &str) -> Option<(&Entity, &Entity)> {
        self.entries
            .iter()
            .find(|(source, _)| source.entity_type == entity_type && source.matches(text))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl From<Vec<SubstitutionEntry>> for SubstitutionMap {
    fn from(entries: Vec<SubstitutionEntry>) -> Self {
        entries
            .into_iter()
            .fold(Self::new(), |map, entry| map.with(entry.source, entry.target))
    }
}

impl From<SubstitutionMap> for Vec<SubstitutionEntry> {
    fn from(map: SubstitutionMap) -> Self {
        map.entries
            .into_iter()
            .map(|(source, target)| SubstitutionEntry { source, target })
            .collect()
    }
}
