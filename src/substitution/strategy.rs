use std::collections::HashMap;

use super::SubstitutionMap;
use crate::error::BoxError;
use crate::types::EntityType;

/// Produces the replacement text for one typed value found in a form.
pub trait Substituter {
    fn substitute(
        &self,
        value: &str,
        entity_type: EntityType,
        map: &SubstitutionMap,
    ) -> Result<String, BoxError>;
}

impl<F> Substituter for F
where
    F: Fn(&str, EntityType, &SubstitutionMap) -> Result<String, BoxError>,
{
    fn substitute(
        &self,
        value: &str,
        entity_type: EntityType,
        map: &SubstitutionMap,
    ) -> Result<String, BoxError> {
        self(value, entity_type, map)
    }
}

/// Replaces a value with the uuid of its mapped target.
///
/// Values without a matching entry are returned unchanged, or rejected
/// when the substituter is strict.
#[derive(Debug, Clone, Copy, Default)]
pub struct MapSubstituter {
    strict: bool,
}

impl MapSubstituter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn strict() -> Self {
        Self { strict: true }
    }
}

impl Substituter for MapSubstituter {
    fn substitute(
        &self,
        value: &str,
        entity_type: EntityType,
        map: &SubstitutionMap,
    ) -> Result<String, BoxError> {
        match map.find(entity_type, value) {
            Some((_, target)) => Ok(target.uuid.clone()),
            None if self.strict => {
                Err(format!("no substitution for {entity_type} '{}'", value.trim()).into())
            }
            None => Ok(value.to_string()),
        }
    }
}

/// Picks a strategy by entity type at call time.
pub struct TypeDispatchSubstituter {
    strategies: HashMap<EntityType, Box<dyn Substituter>>,
    fallback: Box<dyn Substituter>,
}

impl TypeDispatchSubstituter {
    pub fn new(fallback: impl Substituter + 'static) -> Self {
        Self {
            strategies: HashMap::new(),
            fallback: Box::new(fallback),
        }
    }

    pub fn with_strategy(
        mut self,
        entity_type: EntityType,
        strategy: impl Substituter + 'static,
    ) -> Self {
        self.strategies.insert(entity_type, Box::new(strategy));
        self
    }

    fn strategy_for(&self, entity_type: EntityType) -> &dyn Substituter {
        match self.strategies.get(&entity_type) {
            Some(strategy) => strategy.as_ref(),
            None => self.fallback.as_ref(),
        }
    }
}

impl Substituter for TypeDispatchSubstituter {
    fn substitute(
        &self,
        value: &str,
        entity_type: EntityType,
        map: &SubstitutionMap,
    ) -> Result<String, BoxError> {
        self.strategy_for(entity_type)
            .substitute(value, entity_type, map)
    }
}

impl std::fmt::Debug for TypeDispatchSubstituter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut types: Vec<_> = self.strategies.keys().collect();
        types.sort();
        f.debug_struct("TypeDispatchSubstituter")
            .field("strategies", &types)
            .finish_non_exhaustive()
    }
}
