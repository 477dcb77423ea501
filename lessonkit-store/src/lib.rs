//! Preset persistence for lessonkit.
//!
//! The whole preset config is stored as one JSON blob. Loading validates
//! the blob and falls back to the host default config when it is missing
//! or malformed; saving is best-effort.
//!
//! - [`BlobStore`] with [`MemoryBlobStore`] and [`FsBlobStore`] backends
//! - [`PresetStore`]: load, validate, save, clear
//! - [`PresetEditor`]: load, mutate and persist in one call
//! - [`HostSettings`]: `lessonkit.toml`

pub mod blob;
pub mod codec;
pub mod editor;
pub mod error;
pub mod settings;
pub mod store;

pub use blob::{BlobStore, FsBlobStore, MemoryBlobStore};
pub use codec::{decode, encode};
pub use editor::PresetEditor;
pub use error::{SettingsError, SettingsResult, StoreError, StoreResult};
pub use settings::{
    DefaultSettings, HostSettings, SETTINGS_FILE, StoreSettings, TypeLayout, lessonkit_dir,
};
pub use store::{DEFAULT_BLOB_NAME, PresetStore};
