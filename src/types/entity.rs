use serde::{Deserialize, Serialize};
use std::fmt;
use std::hash::{Hash, Hasher};

/// Reference-data categories a form template can point at.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum EntityType {
    Drug,
    Concept,
    CareSetting,
    OrderType,
    OrderFrequency,
}

impl EntityType {
    pub fn as_str(&self) -> &'static str {
        match self {
            EntityType::Drug => "Drug",
            EntityType::Concept => "Concept",
            EntityType::CareSetting => "CareSetting",
            EntityType::OrderType => "OrderType",
            EntityType::OrderFrequency => "OrderFrequency",
        }
    }
}

impl fmt::Display for EntityType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A reference-data entity as known to one installation.
///
/// Identity is the pair (type, uuid). The numeric id and the name are
/// installation-local aliases used when matching text found in a form.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Entity {
    pub entity_type: EntityType,
    pub uuid: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl Entity {
    pub fn new(entity_type: EntityType, uuid: impl Into<String>) -> Self {
        Self {
            entity_type,
            uuid: uuid.into(),
            id: None,
            name: None,
        }
    }

    pub fn with_id(mut self, id: i64) -> Self {
        self.id = Some(id);
        self
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Whether `text` refers to this entity by uuid, numeric id or name.
    pub fn matches(&self, text: &str) -> bool {
        let text = text.trim();
        if text.is_empty() {
            return false;
        }
        if self.uuid == text {
            return true;
        }
        if let (Some(id), Ok(parsed)) = (self.id, text.parse::<i64>()) {
            if id == parsed {
                return true;
            }
        }
        self.name
            .as_deref()
            .is_some_and(|name| name.eq_ignore_ascii_case(text))
    }

    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or(&self.uuid)
    }
}

impl PartialEq for Entity {
    fn eq(&self, other: &Self) -> bool {
        self.entity_type == other.entity_type && self.uuid == other.uuid
    }
}

impl Eq for Entity {}

impl Hash for Entity {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.entity_type.hash(state);
        self.uuid.hash(state);
    }
}

impl fmt::Display for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({})", self.entity_type, self.uuid)?;
        if let Some(name) = &self.name {
            write!(f, " - {name}")?;
        }
        Ok(())
    }
}
