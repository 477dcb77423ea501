//! Field catalog for lessonkit.
//!
//! Defines the host-supplied, read-only description of the authoring fields
//! a slide editor can show:
//! - [`FieldDescriptor`]: one field (key, label, UI type, required flag)
//! - [`FieldCatalog`]: the ordered field list plus per-type default layouts
//!
//! The presets engine only ever reads `key` and `required`. Everything else
//! is carried through for the host UI.

mod catalog;
mod descriptor;
mod error;

pub use catalog::FieldCatalog;
pub use descriptor::FieldDescriptor;
pub use error::{CatalogError, CatalogResult};
