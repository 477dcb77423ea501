//! Versioned preset persistence.
//!
//! `load` never fails: missing or malformed data is replaced by the host's
//! default config. `save` and `clear` are best-effort and only log failures.

use crate::blob::BlobStore;
use crate::codec;
use crate::error::StoreResult;
use lessonkit_presets::{PRESETS_VERSION, PresetsConfig};
use tracing::{debug, info, warn};

/// Blob name used when the host does not pick one.
pub const DEFAULT_BLOB_NAME: &str = "field-presets";

/// Reads and writes the preset config as a single named blob.
pub struct PresetStore<B: BlobStore> {
    backend: B,
    blob_name: String,
    defaults: PresetsConfig,
}

impl<B: BlobStore> PresetStore<B> {
    /// Creates a store over `backend` that falls back to `defaults`.
    pub fn new(backend: B, defaults: PresetsConfig) -> Self {
        Self {
            backend,
            blob_name: DEFAULT_BLOB_NAME.to_string(),
            defaults,
        }
    }

    /// Stores presets under a different blob name.
    #[must_use]
    pub fn with_blob_name(mut self, blob_name: &str) -> Self {
        self.blob_name = blob_name.to_string();
        self
    }

    /// Returns the host default config.
    pub fn defaults(&self) -> &PresetsConfig {
        &self.defaults
    }

    pub fn blob_name(&self) -> &str {
        &self.blob_name
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Loads the stored config, or the host default if there is none or it is invalid.
    pub fn load(&self) -> PresetsConfig {
        match self.try_load() {
            Ok(Some(config)) => config,
            Ok(None) => {
                debug!(blob = %self.blob_name, "No stored presets, using defaults");
                self.defaults.clone()
            }
            Err(e) => {
                warn!(blob = %self.blob_name, error = %e, "Failed to load presets, using defaults");
                self.defaults.clone()
            }
        }
    }

    /// Loads the stored config, surfacing read and validation errors.
    ///
    /// Configs written by an older schema are stamped with the current
    /// version; their records are normalized lazily when next touched.
    pub fn try_load(&self) -> StoreResult<Option<PresetsConfig>> {
        let Some(bytes) = self.backend.read(&self.blob_name)? else {
            return Ok(None);
        };
        let mut config = codec::decode(&bytes)?;

        if config.version < PRESETS_VERSION {
            info!(
                blob = %self.blob_name,
                from = config.version,
                to = PRESETS_VERSION,
                "Upgrading preset schema version"
            );
            config.version = PRESETS_VERSION;
        } else if config.version > PRESETS_VERSION {
            warn!(
                blob = %self.blob_name,
                version = config.version,
                supported = PRESETS_VERSION,
                "Presets were written by a newer version"
            );
        }
        Ok(Some(config))
    }

    /// Persists `config`, logging any failure.
    pub fn save(&self, config: &PresetsConfig) {
        if let Err(e) = self.try_save(config) {
            warn!(blob = %self.blob_name, error = %e, "Failed to save presets");
        }
    }

    /// Persists `config`, surfacing any failure.
    pub fn try_save(&self, config: &PresetsConfig) -> StoreResult<()> {
        let bytes = codec::encode(config)?;
        self.backend.write(&self.blob_name, &bytes)?;
        debug!(blob = %self.blob_name, presets = config.presets.len(), "Saved presets");
        Ok(())
    }

    /// Removes the stored config so the next `load` returns the defaults.
    pub fn clear(&self) {
        match self.backend.remove(&self.blob_name) {
            Ok(()) => info!(blob = %self.blob_name, "Cleared stored presets"),
            Err(e) => warn!(blob = %self.blob_name, error = %e, "Failed to clear presets"),
        }
    }
}
