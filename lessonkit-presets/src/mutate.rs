//! Preset mutation and the root-to-leaf cascade.
//!
//! Every function here takes a config by reference and returns a new one.
//! Hiding a field at the root removes it from every leaf allow-list; showing
//! it again at the root leaves the leaves alone, so a leaf has to re-enable
//! the field explicitly.

use crate::config::{DEFAULT_TYPE_KEY, OverrideRecord, PresetsConfig, is_root, normalize_type_key};
use crate::migrate::{leaf_record, leaf_visible_set, root_hidden_set};
use lessonkit_fields::FieldCatalog;
use std::collections::BTreeSet;
use thiserror::Error;
use tracing::{debug, warn};

/// Why a toggle was refused. The config is left untouched.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Rejection {
    /// Required fields cannot be hidden at the root.
    #[error("\"{field_key}\" is required and cannot be hidden")]
    RequiredField { field_key: String },

    /// A leaf cannot show a field the root hides.
    #[error("\"{field_key}\" is hidden in the default preset and cannot be shown for \"{type_key}\"")]
    HiddenByDefault { type_key: String, field_key: String },
}

/// Result of [`toggle`]: the next config, or the unchanged one plus a reason.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToggleOutcome {
    pub config: PresetsConfig,
    pub rejection: Option<Rejection>,
}

impl ToggleOutcome {
    fn applied(config: PresetsConfig) -> Self {
        Self {
            config,
            rejection: None,
        }
    }

    fn rejected(config: &PresetsConfig, rejection: Rejection) -> Self {
        debug!(reason = %rejection, "Toggle rejected");
        Self {
            config: config.clone(),
            rejection: Some(rejection),
        }
    }

    #[must_use]
    pub fn is_rejected(&self) -> bool {
        self.rejection.is_some()
    }

    /// User-facing reason for a rejection.
    #[must_use]
    pub fn reason(&self) -> Option<String> {
        self.rejection.as_ref().map(ToString::to_string)
    }

    /// Converts into the next config, or the rejection.
    pub fn into_result(self) -> Result<PresetsConfig, Rejection> {
        match self.rejection {
            Some(rejection) => Err(rejection),
            None => Ok(self.config),
        }
    }
}

/// Shows or hides `field_key` for `type_key`.
///
/// An empty `type_key` addresses the root. The returned config is not
/// persisted; callers hand it to their store.
#[must_use]
pub fn toggle(
    config: &PresetsConfig,
    type_key: &str,
    field_key: &str,
    show: bool,
    catalog: &FieldCatalog,
) -> ToggleOutcome {
    let type_key = normalize_type_key(type_key);
    if !catalog.contains(field_key) {
        warn!(type_key = %type_key, field_key = %field_key, "Toggling a field that is not in the catalog");
    }

    if is_root(type_key) {
        toggle_root(config, field_key, show, catalog)
    } else {
        toggle_leaf(config, type_key, field_key, show, catalog)
    }
}

fn toggle_root(
    config: &PresetsConfig,
    field_key: &str,
    show: bool,
    catalog: &FieldCatalog,
) -> ToggleOutcome {
    if !show && catalog.is_required(field_key) {
        return ToggleOutcome::rejected(
            config,
            Rejection::RequiredField {
                field_key: field_key.to_string(),
            },
        );
    }

    let mut hidden = root_hidden_set(config, catalog);
    hidden.retain(|key| !catalog.is_required(key));
    if show {
        hidden.remove(field_key);
    } else {
        hidden.insert(field_key.to_string());
    }

    let mut next = config.clone();
    next.presets
        .insert(DEFAULT_TYPE_KEY.to_string(), OverrideRecord::from_hidden(hidden));
    debug!(field_key = %field_key, show, "Updated default preset");

    if show {
        ToggleOutcome::applied(next)
    } else {
        ToggleOutcome::applied(cascade_hide(&next, field_key, catalog))
    }
}

fn toggle_leaf(
    config: &PresetsConfig,
    type_key: &str,
    field_key: &str,
    show: bool,
    catalog: &FieldCatalog,
) -> ToggleOutcome {
    let required = catalog.is_required(field_key);
    let root_hidden = root_hidden_set(config, catalog);

    if show && !required && root_hidden.contains(field_key) {
        return ToggleOutcome::rejected(
            config,
            Rejection::HiddenByDefault {
                type_key: type_key.to_string(),
                field_key: field_key.to_string(),
            },
        );
    }
    if !show && required {
        debug!(type_key = %type_key, field_key = %field_key, "Required field stays visible");
        return ToggleOutcome::applied(config.clone());
    }

    let mut visible = leaf_visible_set(config.leaf(type_key), type_key, catalog);
    if show {
        visible.insert(field_key.to_string());
    } else {
        visible.remove(field_key);
    }

    let record = leaf_record(visible, &root_hidden, catalog);
    if record.is_uninitialized() {
        warn!(
            type_key = %type_key,
            "Allow-list is now empty; the type falls back to its host default layout"
        );
    }

    let mut next = config.clone();
    next.presets.insert(type_key.to_string(), record);
    debug!(type_key = %type_key, field_key = %field_key, show, "Updated type preset");
    ToggleOutcome::applied(next)
}

/// Removes `field_key` from every leaf allow-list.
///
/// Leaves are migrated to visible-set shape as they are rewritten. The root
/// entry is copied unchanged, and so are uninitialized leaves: they follow
/// the host default layout, which the root hide already gates.
#[must_use]
pub fn cascade_hide(config: &PresetsConfig, field_key: &str, catalog: &FieldCatalog) -> PresetsConfig {
    let root_hidden = root_hidden_set(config, catalog);
    let presets = config
        .presets
        .iter()
        .map(|(type_key, record)| {
            if is_root(type_key) || record.is_uninitialized() {
                return (type_key.clone(), record.clone());
            }
            let mut visible = leaf_visible_set(Some(record), type_key, catalog);
            if visible.remove(field_key) {
                debug!(type_key = %type_key, field_key = %field_key, "Cascaded hide into type preset");
            }
            (type_key.clone(), leaf_record(visible, &root_hidden, catalog))
        })
        .collect();

    PresetsConfig {
        version: config.version,
        presets,
    }
}

/// Drops the override for `type_key`.
///
/// A leaf returns to its host default layout. The root is replaced by an
/// empty hidden-set; leaves are not touched.
#[must_use]
pub fn reset_type(config: &PresetsConfig, type_key: &str) -> PresetsConfig {
    let type_key = normalize_type_key(type_key);
    let mut next = config.clone();
    if is_root(type_key) {
        next.presets.insert(
            DEFAULT_TYPE_KEY.to_string(),
            OverrideRecord::from_hidden(Vec::<String>::new()),
        );
    } else {
        next.presets.remove(type_key);
    }
    debug!(type_key = %type_key, "Reset preset");
    next
}

/// Drops keys the catalog no longer defines from every record.
///
/// Returns the compacted config and the number of keys removed. An
/// allow-list that would become empty keeps the required keys instead, and
/// is left untouched when the catalog has none.
#[must_use]
pub fn prune_unknown(config: &PresetsConfig, catalog: &FieldCatalog) -> (PresetsConfig, usize) {
    let mut removed = 0;
    let mut next = config.clone();

    for (type_key, record) in next.presets.iter_mut() {
        if let Some(hidden) = record.hidden_field_keys.as_mut() {
            removed += retain_known(hidden, catalog);
        }
        if let Some(visible) = record.visible_field_keys.as_mut() {
            let mut pruned = visible.clone();
            let count = retain_known(&mut pruned, catalog);
            if count == 0 {
                continue;
            }
            if pruned.is_empty() {
                pruned.extend(catalog.required_keys().iter().cloned());
                if pruned.is_empty() {
                    warn!(type_key = %type_key, "Kept stale allow-list: pruning would empty it");
                    continue;
                }
            }
            *visible = pruned;
            removed += count;
        }
    }

    if removed > 0 {
        debug!(removed, "Pruned unknown keys from presets");
    }
    (next, removed)
}

fn retain_known(keys: &mut BTreeSet<String>, catalog: &FieldCatalog) -> usize {
    let before = keys.len();
    keys.retain(|key| catalog.contains(key));
    before - keys.len()
}
