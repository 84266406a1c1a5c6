use serde::{Deserialize, Serialize};
use std::fmt;

/// A form template as stored by the host: identifying metadata plus the
/// serialized XML document.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct HtmlForm {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uuid: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub xml_data: String,
}

impl HtmlForm {
    pub fn new(xml_data: impl Into<String>) -> Self {
        Self {
            uuid: None,
            name: None,
            xml_data: xml_data.into(),
        }
    }

    pub fn with_uuid(mut self, uuid: impl Into<String>) -> Self {
        self.uuid = Some(uuid.into());
        self
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }
}

impl fmt::Display for HtmlForm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "HtmlForm({})", self.name.as_deref().unwrap_or("unnamed"))?;
        if let Some(uuid) = &self.uuid {
            write!(f, " [{uuid}]")?;
        }
        Ok(())
    }
}
