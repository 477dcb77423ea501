//! Host settings, read from `~/.lessonkit/lessonkit.toml`.
//!
//! The settings file supplies where presets are stored and the host's
//! defaults: the root hidden-set used after a reset, and the default layout
//! of individual content types.

use crate::error::SettingsResult;
use crate::store::DEFAULT_BLOB_NAME;
use lessonkit_fields::FieldCatalog;
use lessonkit_presets::PresetsConfig;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Name of the settings file inside the lessonkit directory.
pub const SETTINGS_FILE: &str = "lessonkit.toml";

/// Where and under which name presets are persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreSettings {
    /// Directory for the filesystem blob store. `None` means the lessonkit directory.
    pub directory: Option<PathBuf>,
    pub blob: String,
}

impl Default for StoreSettings {
    fn default() -> Self {
        Self {
            directory: None,
            blob: DEFAULT_BLOB_NAME.to_string(),
        }
    }
}

/// Default layout for one content type.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeLayout {
    #[serde(default)]
    pub visible: Vec<String>,
}

/// Host-supplied preset defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DefaultSettings {
    /// Root hidden-set of the default config.
    pub hidden: Vec<String>,
    pub types: BTreeMap<String, TypeLayout>,
}

/// Parsed `lessonkit.toml`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HostSettings {
    pub store: StoreSettings,
    pub defaults: DefaultSettings,
}

impl HostSettings {
    /// Loads settings from `~/.lessonkit/lessonkit.toml` if it exists.
    pub fn load() -> Self {
        Self::load_from(lessonkit_dir().join(SETTINGS_FILE))
    }

    /// Loads settings from an explicit path.
    /// Falls back to built-in settings with a warning on read or parse errors.
    pub fn load_from(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        if !path.exists() {
            info!("No settings file found at {:?}, using built-in settings", path);
            return Self::default();
        }

        match Self::read(path) {
            Ok(settings) => {
                info!("Loaded settings from {:?}", path);
                settings
            }
            Err(e) => {
                warn!("{} ({:?}). Falling back to built-in settings.", e, path);
                Self::default()
            }
        }
    }

    /// Reads settings from `path`, surfacing errors.
    pub fn read(path: &Path) -> SettingsResult<Self> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    /// Parses settings from TOML.
    pub fn from_toml_str(contents: &str) -> SettingsResult<Self> {
        Ok(toml::from_str(contents)?)
    }

    /// The config a fresh or reset store starts from.
    pub fn default_config(&self) -> PresetsConfig {
        if self.defaults.hidden.is_empty() {
            PresetsConfig::new()
        } else {
            PresetsConfig::with_root_hidden(self.defaults.hidden.iter().cloned())
        }
    }

    /// Registers the configured type layouts on `catalog`.
    pub fn apply_type_defaults(&self, mut catalog: FieldCatalog) -> FieldCatalog {
        for (type_key, layout) in &self.defaults.types {
            catalog.set_type_default(type_key, layout.visible.iter().cloned());
        }
        catalog
    }

    /// Directory the filesystem blob store writes to.
    pub fn store_directory(&self) -> PathBuf {
        self.store
            .directory
            .clone()
            .unwrap_or_else(lessonkit_dir)
    }
}

/// Resolve the lessonkit config directory.
pub fn lessonkit_dir() -> PathBuf {
    dirs::home_dir()
        .map(|home| home.join(".lessonkit"))
        .unwrap_or_else(|| PathBuf::from(".lessonkit"))
}
