//! Editing session over a [`PresetStore`].
//!
//! Each operation loads the stored config, applies a pure transform from
//! `lessonkit_presets`, and persists the result before returning.

use crate::blob::BlobStore;
use crate::store::PresetStore;
use lessonkit_fields::FieldCatalog;
use lessonkit_presets::{
    PresetsConfig, ToggleOutcome, VisibilityResult, prune_unknown, reset_type, resolve, toggle,
    upgrade,
};
use tracing::{debug, info};

/// Binds a store to the catalog it is edited against.
pub struct PresetEditor<B: BlobStore> {
    store: PresetStore<B>,
    catalog: FieldCatalog,
}

impl<B: BlobStore> PresetEditor<B> {
    pub fn new(store: PresetStore<B>, catalog: FieldCatalog) -> Self {
        Self { store, catalog }
    }

    pub fn store(&self) -> &PresetStore<B> {
        &self.store
    }

    pub fn catalog(&self) -> &FieldCatalog {
        &self.catalog
    }

    /// The currently stored config, or the host default.
    pub fn current(&self) -> PresetsConfig {
        self.store.load()
    }

    /// Resolves the visible fields for `type_key` from the stored config.
    pub fn visibility(&self, type_key: &str) -> VisibilityResult {
        resolve(type_key, &self.catalog, &self.store.load())
    }

    /// Shows or hides a field and persists the result.
    ///
    /// Rejected toggles are returned without touching the store.
    pub fn toggle(&self, type_key: &str, field_key: &str, show: bool) -> ToggleOutcome {
        let config = self.store.load();
        let outcome = toggle(&config, type_key, field_key, show, &self.catalog);
        if !outcome.is_rejected() {
            self.store.save(&outcome.config);
        }
        outcome
    }

    /// Drops the override for one type and persists the result.
    pub fn reset_type(&self, type_key: &str) -> PresetsConfig {
        let next = reset_type(&self.store.load(), type_key);
        self.store.save(&next);
        next
    }

    /// Clears the stored config and returns the host default.
    pub fn reset(&self) -> PresetsConfig {
        self.store.clear();
        info!(blob = %self.store.blob_name(), "Presets reset to host defaults");
        self.store.load()
    }

    /// Removes keys the catalog no longer defines. Returns how many were removed.
    pub fn prune(&self) -> usize {
        let (next, removed) = prune_unknown(&self.store.load(), &self.catalog);
        if removed > 0 {
            self.store.save(&next);
        }
        removed
    }

    /// Rewrites every record into its canonical shape and persists it.
    pub fn migrate(&self) -> PresetsConfig {
        let config = self.store.load();
        let next = upgrade(&config, &self.catalog);
        if next == config {
            debug!("Presets already canonical");
        } else {
            self.store.save(&next);
        }
        next
    }
}
