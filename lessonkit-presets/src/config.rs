//! Persisted preset schema.
//!
//! The wire format is
//! `{ "version": n, "presets": { "<typeKey>": { "hiddenFieldKeys"?: [..], "visibleFieldKeys"?: [..] } } }`.
//! The `"default"` entry is the root override; every other entry is a leaf
//! override for one content type.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// Type key of the root override.
pub const DEFAULT_TYPE_KEY: &str = "default";

/// Current schema version.
///
/// Version 1 configs predate the per-role canonical shapes: any record may
/// carry either shape. Version 2 stores the root as a hidden-set and every
/// leaf as a visible-set.
pub const PRESETS_VERSION: u32 = 2;

/// Collapses an empty type key to [`DEFAULT_TYPE_KEY`].
#[must_use]
pub fn normalize_type_key(type_key: &str) -> &str {
    if type_key.trim().is_empty() {
        DEFAULT_TYPE_KEY
    } else {
        type_key
    }
}

/// Returns true if `type_key` addresses the root override.
#[must_use]
pub fn is_root(type_key: &str) -> bool {
    normalize_type_key(type_key) == DEFAULT_TYPE_KEY
}

/// Which representation an override record carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordShape {
    /// Only `hiddenFieldKeys`: everything else is visible.
    Hidden,
    /// Only `visibleFieldKeys`: nothing else is visible.
    Visible,
    /// Both lists are present (legacy writers).
    Mixed,
    /// Neither list is present.
    Empty,
}

/// Visibility override for one type, in either of its two shapes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OverrideRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hidden_field_keys: Option<BTreeSet<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub visible_field_keys: Option<BTreeSet<String>>,
}

impl OverrideRecord {
    /// Creates a record in hidden-set shape.
    pub fn from_hidden<I, S>(keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            hidden_field_keys: Some(keys.into_iter().map(Into::into).collect()),
            visible_field_keys: None,
        }
    }

    /// Creates a record in visible-set shape.
    pub fn from_visible<I, S>(keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            hidden_field_keys: None,
            visible_field_keys: Some(keys.into_iter().map(Into::into).collect()),
        }
    }

    #[must_use]
    pub fn shape(&self) -> RecordShape {
        match (&self.hidden_field_keys, &self.visible_field_keys) {
            (Some(_), Some(_)) => RecordShape::Mixed,
            (Some(_), None) => RecordShape::Hidden,
            (None, Some(_)) => RecordShape::Visible,
            (None, None) => RecordShape::Empty,
        }
    }

    /// Returns true if the record carries no usable allow-list and no
    /// hidden-set.
    ///
    /// An empty allow-list cannot be told apart from "never configured", so
    /// it is never read as "hide everything".
    #[must_use]
    pub fn is_uninitialized(&self) -> bool {
        self.hidden_field_keys.is_none()
            && self.visible_field_keys.as_ref().is_none_or(BTreeSet::is_empty)
    }

    /// Iterates over every key mentioned by either list.
    pub fn keys(&self) -> impl Iterator<Item = &String> {
        self.hidden_field_keys
            .iter()
            .flatten()
            .chain(self.visible_field_keys.iter().flatten())
    }
}

/// The full persisted preset map.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PresetsConfig {
    pub version: u32,
    #[serde(default)]
    pub presets: BTreeMap<String, OverrideRecord>,
}

impl Default for PresetsConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl PresetsConfig {
    /// Creates an empty config stamped with the current version.
    #[must_use]
    pub fn new() -> Self {
        Self {
            version: PRESETS_VERSION,
            presets: BTreeMap::new(),
        }
    }

    /// Creates a config whose root hides `keys`.
    pub fn with_root_hidden<I, S>(keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new().with_override(DEFAULT_TYPE_KEY, OverrideRecord::from_hidden(keys))
    }

    /// Adds or replaces the override for `type_key`.
    #[must_use]
    pub fn with_override(mut self, type_key: &str, record: OverrideRecord) -> Self {
        self.presets
            .insert(normalize_type_key(type_key).to_string(), record);
        self
    }

    /// Returns the root override, if one has been created.
    #[must_use]
    pub fn root(&self) -> Option<&OverrideRecord> {
        self.presets.get(DEFAULT_TYPE_KEY)
    }

    /// Returns the leaf override for `type_key`. Always `None` for the root.
    #[must_use]
    pub fn leaf(&self, type_key: &str) -> Option<&OverrideRecord> {
        if is_root(type_key) {
            return None;
        }
        self.presets.get(type_key)
    }

    /// Iterates over every leaf override.
    pub fn leaves(&self) -> impl Iterator<Item = (&String, &OverrideRecord)> {
        self.presets.iter().filter(|(key, _)| !is_root(key))
    }

    /// Returns true if the root entry exists.
    #[must_use]
    pub fn has_root(&self) -> bool {
        self.presets.contains_key(DEFAULT_TYPE_KEY)
    }

    /// Inserts an empty hidden-set root if none exists.
    pub fn ensure_root(&mut self) -> &mut OverrideRecord {
        self.presets
            .entry(DEFAULT_TYPE_KEY.to_string())
            .or_insert_with(|| OverrideRecord::from_hidden(Vec::<String>::new()))
    }
}
