pub mod entity;
pub mod form;
pub mod registry;

pub use entity::{Entity, EntityType};
pub use form::HtmlForm;
pub use registry::PropertyRegistry;
