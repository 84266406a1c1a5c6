//! Logical field view of a form: which order fields it has and which
//! reference-data entities each field offers as answers.

mod catalog;
mod resolver;

pub use catalog::{EntityCatalog, MemoryCatalog};
pub use resolver::{SchemaResolver, TagSchemaResolver};

use serde::{Deserialize, Serialize};

use crate::types::{Entity, EntityType};

/// Answer-list properties of a drug order field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AnswerList {
    Drug,
    CareSetting,
    OrderType,
    DoseUnits,
    Route,
    Frequency,
    DurationUnits,
    QuantityUnits,
    DiscontinueReason,
}

impl AnswerList {
    pub const ALL: [AnswerList; 9] = [
        AnswerList::Drug,
        AnswerList::CareSetting,
        AnswerList::OrderType,
        AnswerList::DoseUnits,
        AnswerList::Route,
        AnswerList::Frequency,
        AnswerList::DurationUnits,
        AnswerList::QuantityUnits,
        AnswerList::DiscontinueReason,
    ];

    pub fn entity_type(self) -> EntityType {
        match self {
            AnswerList::Drug => EntityType::Drug,
            AnswerList::CareSetting => EntityType::CareSetting,
            AnswerList::OrderType => EntityType::OrderType,
            AnswerList::Frequency => EntityType::OrderFrequency,
            AnswerList::DoseUnits
            | AnswerList::Route
            | AnswerList::DurationUnits
            | AnswerList::QuantityUnits
            | AnswerList::DiscontinueReason => EntityType::Concept,
        }
    }

    /// Property name used by the declaring tag.
    pub fn property_name(self) -> &'static str {
        match self {
            AnswerList::Drug => "drug",
            AnswerList::CareSetting => "careSetting",
            AnswerList::OrderType => "orderType",
            AnswerList::DoseUnits => "doseUnits",
            AnswerList::Route => "route",
            AnswerList::Frequency => "frequency",
            AnswerList::DurationUnits => "durationUnits",
            AnswerList::QuantityUnits => "quantityUnits",
            AnswerList::DiscontinueReason => "discontinueReason",
        }
    }

    pub fn from_property(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|list| list.property_name().eq_ignore_ascii_case(name))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Answer {
    pub display_name: String,
    pub entity: Entity,
}

impl Answer {
    pub fn new(display_name: impl Into<String>, entity: Entity) -> Self {
        Self {
            display_name: display_name.into(),
            entity,
        }
    }
}

impl From<Entity> for Answer {
    fn from(entity: Entity) -> Self {
        Self::new(entity.display_name().to_string(), entity)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DrugOrderField {
    pub drug_answers: Vec<Answer>,
    pub care_setting_answers: Vec<Answer>,
    pub order_type_answers: Vec<Answer>,
    pub dose_unit_answers: Vec<Answer>,
    pub route_answers: Vec<Answer>,
    pub frequency_answers: Vec<Answer>,
    pub duration_unit_answers: Vec<Answer>,
    pub quantity_unit_answers: Vec<Answer>,
    pub discontinued_reason_question: Option<Entity>,
    pub discontinued_reason_answers: Vec<Answer>,
}

impl DrugOrderField {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_answer(mut self, list: AnswerList, answer: impl Into<Answer>) -> Self {
        self.answers_mut(list).push(answer.into());
        self
    }

    pub fn with_discontinued_reason_question(mut self, question: Entity) -> Self {
        self.discontinued_reason_question = Some(question);
        self
    }

    pub fn answers(&self, list: AnswerList) -> &[Answer] {
        match list {
            AnswerList::Drug => &self.drug_answers,
            AnswerList::CareSetting => &self.care_setting_answers,
            AnswerList::OrderType => &self.order_type_answers,
            AnswerList::DoseUnits => &self.dose_unit_answers,
            AnswerList::Route => &self.route_answers,
            AnswerList::Frequency => &self.frequency_answers,
            AnswerList::DurationUnits => &self.duration_unit_answers,
            AnswerList::QuantityUnits => &self.quantity_unit_answers,
            AnswerList::DiscontinueReason => &self.discontinued_reason_answers,
        }
    }

    pub fn answers_mut(&mut self, list: AnswerList) -> &mut Vec<Answer> {
        match list {
            AnswerList::Drug => &mut self.drug_answers,
            AnswerList::CareSetting => &mut self.care_setting_answers,
            AnswerList::OrderType => &mut self.order_type_answers,
            AnswerList::DoseUnits => &mut self.dose_unit_answers,
            AnswerList::Route => &mut self.route_answers,
            AnswerList::Frequency => &mut self.frequency_answers,
            AnswerList::DurationUnits => &mut self.duration_unit_answers,
            AnswerList::QuantityUnits => &mut self.quantity_unit_answers,
            AnswerList::DiscontinueReason => &mut self.discontinued_reason_answers,
        }
    }

    /// Every answer list paired with its kind, empty lists included.
    pub fn answer_lists(&self) -> impl Iterator<Item = (AnswerList, &[Answer])> + '_ {
        AnswerList::ALL
            .into_iter()
            .map(move |list| (list, self.answers(list)))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum HtmlFormField {
    DrugOrder(DrugOrderField),
    /// Any field kind that does not carry order metadata.
    Other { tag: String },
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HtmlFormSchema {
    pub fields: Vec<HtmlFormField>,
}

impl HtmlFormSchema {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_field(mut self, field: HtmlFormField) -> Self {
        self.fields.push(field);
        self
    }

    pub fn add_field(&mut self, field: HtmlFormField) {
        self.fields.push(field);
    }

    pub fn all_fields(&self) -> &[HtmlFormField] {
        &self.fields
    }

    pub fn drug_order_fields(&self) -> impl Iterator<Item = &DrugOrderField> {
        self.fields.iter().filter_map(|field| match field {
            HtmlFormField::DrugOrder(order) => Some(order),
            HtmlFormField::Other { .. } => None,
        })
    }
}
