use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::Result;

/// Tag and attribute names the passes look for in a form document.
///
/// Element names are compared case-insensitively; attribute names exactly.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default, deny_unknown_fields, rename_all = "camelCase")]
pub struct TagConfig {
    /// Element the traversal starts from.
    pub root_tag: String,
    /// Compound order element (a whole order record in one tag).
    pub compound_tag: String,
    /// Element declaring a typed property for its subtree.
    pub property_tag: String,
    /// Value-bearing option element.
    pub option_tag: String,
    pub property_name_attribute: String,
    pub value_attribute: String,
    pub label_attribute: String,
    pub question_attribute: String,
}

impl Default for TagConfig {
    fn default() -> Self {
        Self {
            root_tag: "htmlform".to_string(),
            compound_tag: "drugOrder".to_string(),
            property_tag: "orderProperty".to_string(),
            option_tag: "option".to_string(),
            property_name_attribute: "name".to_string(),
            value_attribute: "value".to_string(),
            label_attribute: "label".to_string(),
            question_attribute: "question".to_string(),
        }
    }
}

impl TagConfig {
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json_str(&content)
    }

    pub fn with_root_tag(mut self, tag: impl Into<String>) -> Self {
        self.root_tag = tag.into();
        self
    }

    pub fn with_compound_tag(mut self, tag: impl Into<String>) -> Self {
        self.compound_tag = tag.into();
        self
    }

    pub fn with_property_tag(mut self, tag: impl Into<String>) -> Self {
        self.property_tag = tag.into();
        self
    }

    pub fn with_option_tag(mut self, tag: impl Into<String>) -> Self {
        self.option_tag = tag.into();
        self
    }

    pub fn with_value_attribute(mut self, attribute: impl Into<String>) -> Self {
        self.value_attribute = attribute.into();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = TagConfig::default();
        assert_eq!(config.root_tag, "htmlform");
        assert_eq!(config.compound_tag, "drugOrder");
        assert_eq!(config.property_tag, "orderProperty");
        assert_eq!(config.value_attribute, "value");
    }

    #[test]
    fn test_partial_json_takes_defaults() {
        let config = TagConfig::from_json_str(r#"{"rootTag": "form"}"#).unwrap();
        assert_eq!(config, TagConfig::default().with_root_tag("form"));
    }

    #[test]
    fn test_unknown_keys_rejected() {
        assert!(TagConfig::from_json_str(r#"{"rootElement": "form"}"#).is_err());
    }

    #[test]
    fn test_from_json_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"optionTag": "choice"}}"#).unwrap();

        let config = TagConfig::from_json_file(file.path()).unwrap();
        assert_eq!(config.option_tag, "choice");
        assert_eq!(config.property_tag, "orderProperty");
    }
}
