//! # Form Metadata Sharing
//!
//! Moves form templates between installations whose reference data
//! (drugs, concepts, care settings, order types, order frequencies) have
//! different identities but the same meaning.
//!
//! ## Features
//!
//! - **Substitution**: rewrite every typed `value` attribute of drug order
//!   tags through a pluggable [`Substituter`]
//! - **Dependencies**: enumerate every entity a form's order fields offer,
//!   grouped by [`EntityType`]
//! - **Type context**: a depth-first [`TreeWalker`] threads the expected
//!   entity type from declaring tags down to their options
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use form_metadata_sharing::*;
//!
//! # fn example() -> std::result::Result<(), Box<dyn std::error::Error>> {
//! let catalog = MemoryCatalog::new()
//!     .with(Entity::new(EntityType::Concept, "oral-uuid").with_id(123));
//! let descriptor = DrugOrderTagDescriptor::new(TagSchemaResolver::new(catalog));
//!
//! let mut form = HtmlForm::new(std::fs::read_to_string("form.xml")?);
//! let dependencies = descriptor.dependencies(&form)?;
//! println!("{} dependencies", dependencies.total());
//!
//! let map = SubstitutionMap::new().with(
//!     Entity::new(EntityType::Concept, "oral-uuid").with_id(123),
//!     Entity::new(EntityType::Concept, "oral-uuid-on-target"),
//! );
//! descriptor.perform_substitutions(&mut form, &MapSubstituter::new(), &map)?;
//! # Ok(())
//! # }
//! ```

pub mod core;
pub mod dependencies;
pub mod descriptor;
pub mod document;
pub mod error;
pub mod schema;
pub mod substitution;
pub mod types;
pub mod walker;

pub use crate::core::TagConfig;
pub use dependencies::{DependencyRegistry, collect_dependencies};
pub use descriptor::{AttributeDescriptor, DrugOrderTagDescriptor};
pub use document::{Document, Node, NodeKind};
pub use error::Result;
pub use error::{BoxError, DependencyError, DocumentError, MetadataError, SubstitutionError};
pub use schema::{
    Answer, AnswerList, DrugOrderField, EntityCatalog, HtmlFormField, HtmlFormSchema,
    MemoryCatalog, SchemaResolver, TagSchemaResolver,
};
pub use substitution::{
    MapSubstituter, SubstitutionEntry, SubstitutionMap, SubstitutionReport, Substituter,
    TypeDispatchSubstituter, substitute_tree,
};
pub use types::{Entity, EntityType, HtmlForm, PropertyRegistry};
pub use walker::TreeWalker;
