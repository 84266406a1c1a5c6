use thiserror::Error;

use crate::types::EntityType;

/// Error type produced by pluggable collaborators (strategies, resolvers).
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

#[derive(Error, Debug)]
pub enum DocumentError {
    #[error("XML syntax error: {0}")]
    Xml(#[from] quick_xml::Error),

    #[error("Invalid attribute: {0}")]
    Attribute(#[from] quick_xml::events::attributes::AttrError),

    #[error("Invalid UTF-8 in document: {0}")]
    Utf8(#[from] std::str::Utf8Error),

    #[error("Invalid UTF-8 in serialized output: {0}")]
    Output(#[from] std::string::FromUtf8Error),

    #[error("Malformed document: {message}")]
    Structure { message: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl DocumentError {
    pub fn structure(message: impl Into<String>) -> Self {
        Self::Structure {
            message: message.into(),
        }
    }
}

#[derive(Error, Debug)]
pub enum MetadataError {
    #[error("Malformed input: {0}")]
    MalformedInput(#[from] DocumentError),

    #[error("Substitution of '{value}' as {entity_type} failed: {source}")]
    SubstitutionFailure {
        value: String,
        entity_type: EntityType,
        #[source]
        source: BoxError,
    },

    #[error("Schema resolution failed: {message}")]
    SchemaResolution {
        message: String,
        #[source]
        source: Option<BoxError>,
    },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl MetadataError {
    pub fn schema_resolution(message: impl Into<String>) -> Self {
        Self::SchemaResolution {
            message: message.into(),
            source: None,
        }
    }

    pub fn schema_resolution_with_source(message: impl Into<String>, source: BoxError) -> Self {
        Self::SchemaResolution {
            message: message.into(),
            source: Some(source),
        }
    }
}

/// Raised at the substitution boundary. The form is never partially updated.
#[derive(Error, Debug)]
#[error("{message}")]
pub struct SubstitutionError {
    pub message: String,
    #[source]
    pub source: MetadataError,
}

impl SubstitutionError {
    pub fn new(source: impl Into<MetadataError>) -> Self {
        Self {
            message: "Unable to perform drug order tag substitutions".to_string(),
            source: source.into(),
        }
    }
}

/// Raised at the dependency boundary. Partial registries are discarded.
#[derive(Error, Debug)]
#[error("{message}")]
pub struct DependencyError {
    pub message: String,
    #[source]
    pub source: MetadataError,
}

impl DependencyError {
    pub fn new(source: impl Into<MetadataError>) -> Self {
        Self {
            message: "Unable to get dependencies for form".to_string(),
            source: source.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, MetadataError>;
