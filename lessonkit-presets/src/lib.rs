//! Field-visibility presets for lessonkit.
//!
//! Decides which authoring fields the slide editor shows for each content
//! type, and how edits to the global preset propagate to per-type presets.
//!
//! # Model
//!
//! - The **root** preset (`"default"`) is a hidden-set: every catalog field
//!   is visible except the listed ones.
//! - Each **leaf** preset (one per content type) is an allow-list: only the
//!   listed fields are visible, and never one the root hides.
//! - Required fields are visible everywhere.
//!
//! # Modules
//!
//! - [`config`]: the persisted schema ([`PresetsConfig`], [`OverrideRecord`])
//! - [`migrate`]: conversion between the two record shapes, schema upgrade
//! - [`resolve`]: pure visibility resolution ([`resolve()`], [`VisibilityResult`])
//! - [`mutate`]: toggles and the root-to-leaf cascade ([`toggle`], [`cascade_hide`])
//!
//! # Example
//!
//! ```
//! use lessonkit_fields::{FieldCatalog, FieldDescriptor};
//! use lessonkit_presets::{PresetsConfig, resolve, toggle};
//!
//! let catalog = FieldCatalog::new(vec![
//!     FieldDescriptor::label_field("label", "Label"),
//!     FieldDescriptor::text("title", "Title"),
//! ])
//! .unwrap();
//!
//! let outcome = toggle(&PresetsConfig::new(), "default", "title", false, &catalog);
//! assert!(!outcome.is_rejected());
//!
//! let result = resolve("quiz-slide", &catalog, &outcome.config);
//! assert!(result.is_hidden("title"));
//! assert!(result.is_visible("label"));
//! ```

pub mod config;
pub mod migrate;
pub mod mutate;
pub mod resolve;

pub use config::{
    DEFAULT_TYPE_KEY, OverrideRecord, PRESETS_VERSION, PresetsConfig, RecordShape, is_root,
    normalize_type_key,
};
pub use migrate::{
    leaf_hidden_set, leaf_visible_set, root_hidden_set, to_hidden_record, to_hidden_set,
    to_visible_record, to_visible_set, upgrade,
};
pub use mutate::{Rejection, ToggleOutcome, cascade_hide, prune_unknown, reset_type, toggle};
pub use resolve::{KeyOrigin, UnknownKey, VisibilityResult, resolve, resolve_with};
