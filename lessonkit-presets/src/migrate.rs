//! Conversion between the hidden-set and visible-set override shapes.
//!
//! Records may arrive in either shape regardless of their role. Everything
//! outside this module works on canonical sets: the root as a hidden-set,
//! leaves as a visible-set. Both conversions complement against the
//! catalog's key set, so they need the catalog and cannot run at load time.

use crate::config::{OverrideRecord, PRESETS_VERSION, PresetsConfig, is_root};
use lessonkit_fields::FieldCatalog;
use std::collections::BTreeSet;
use tracing::debug;

/// Returns the record's allow-list, deriving it from the hidden-set if needed.
#[must_use]
pub fn to_visible_set(record: &OverrideRecord, catalog: &FieldCatalog) -> BTreeSet<String> {
    if let Some(visible) = record.visible_field_keys.as_ref().filter(|v| !v.is_empty()) {
        return visible.clone();
    }
    match &record.hidden_field_keys {
        Some(hidden) => catalog.keys().difference(hidden).cloned().collect(),
        None => catalog.keys().clone(),
    }
}

/// Returns the record's hidden-set, deriving it from the allow-list if needed.
///
/// Keys of a stored hidden-set are returned as-is, including keys the
/// catalog no longer defines.
#[must_use]
pub fn to_hidden_set(record: &OverrideRecord, catalog: &FieldCatalog) -> BTreeSet<String> {
    if let Some(hidden) = record.hidden_field_keys.as_ref().filter(|h| !h.is_empty()) {
        return hidden.clone();
    }
    match &record.visible_field_keys {
        Some(visible) => catalog.keys().difference(visible).cloned().collect(),
        None => BTreeSet::new(),
    }
}

/// Converts a record to canonical visible-set shape.
#[must_use]
pub fn to_visible_record(record: &OverrideRecord, catalog: &FieldCatalog) -> OverrideRecord {
    OverrideRecord::from_visible(to_visible_set(record, catalog))
}

/// Converts a record to canonical hidden-set shape.
#[must_use]
pub fn to_hidden_record(record: &OverrideRecord, catalog: &FieldCatalog) -> OverrideRecord {
    OverrideRecord::from_hidden(to_hidden_set(record, catalog))
}

/// Reads the root's hidden-set. An absent or uninitialized root hides nothing.
#[must_use]
pub fn root_hidden_set(config: &PresetsConfig, catalog: &FieldCatalog) -> BTreeSet<String> {
    match config.root() {
        Some(record) if !record.is_uninitialized() => to_hidden_set(record, catalog),
        _ => BTreeSet::new(),
    }
}

/// Reads a leaf's allow-list.
///
/// An absent or uninitialized leaf falls back to the host default layout for
/// the type, or to every catalog key when the host has none.
#[must_use]
pub fn leaf_visible_set(
    record: Option<&OverrideRecord>,
    type_key: &str,
    catalog: &FieldCatalog,
) -> BTreeSet<String> {
    match record {
        Some(record) if !record.is_uninitialized() => to_visible_set(record, catalog),
        _ => host_default_visible(type_key, catalog),
    }
}

/// Reads a leaf's hidden-set as the complement of [`leaf_visible_set`].
///
/// A leaf is always read through its allow-list, so a legacy record carrying
/// both lists means the same thing here as it does to the mutator. Keys the
/// catalog does not define are never returned.
#[must_use]
pub fn leaf_hidden_set(
    record: Option<&OverrideRecord>,
    type_key: &str,
    catalog: &FieldCatalog,
) -> BTreeSet<String> {
    let visible = leaf_visible_set(record, type_key, catalog);
    catalog.keys().difference(&visible).cloned().collect()
}

fn host_default_visible(type_key: &str, catalog: &FieldCatalog) -> BTreeSet<String> {
    catalog
        .type_default(type_key)
        .cloned()
        .unwrap_or_else(|| catalog.keys().clone())
}

/// Builds the canonical leaf record for an allow-list.
///
/// Keys in `root_hidden` are dropped and required keys are always written,
/// so a stored allow-list never holds a key the parent gate would refuse.
/// When dropping them would leave nothing (a catalog without required
/// fields), the list is written ungated rather than uninitialized.
#[must_use]
pub fn leaf_record(
    visible: BTreeSet<String>,
    root_hidden: &BTreeSet<String>,
    catalog: &FieldCatalog,
) -> OverrideRecord {
    let mut gated: BTreeSet<String> = visible.difference(root_hidden).cloned().collect();
    gated.extend(catalog.required_keys().iter().cloned());
    if gated.is_empty() {
        return OverrideRecord::from_visible(visible);
    }
    OverrideRecord::from_visible(gated)
}

/// Rewrites every record in its canonical shape and stamps the current version.
///
/// Uninitialized leaves are left alone so they keep following the host
/// default layout.
#[must_use]
pub fn upgrade(config: &PresetsConfig, catalog: &FieldCatalog) -> PresetsConfig {
    let mut next = PresetsConfig {
        version: PRESETS_VERSION,
        presets: Default::default(),
    };

    let root_hidden = root_hidden_set(config, catalog);
    for (type_key, record) in &config.presets {
        let canonical = if is_root(type_key) {
            OverrideRecord::from_hidden(root_hidden.clone())
        } else if record.is_uninitialized() {
            record.clone()
        } else {
            leaf_record(to_visible_set(record, catalog), &root_hidden, catalog)
        };
        if canonical != *record {
            debug!(type_key = %type_key, from = ?record.shape(), "Normalized override record");
        }
        next.presets.insert(type_key.clone(), canonical);
    }
    next.ensure_root();
    next
}
