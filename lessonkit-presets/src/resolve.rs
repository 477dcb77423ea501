//! Visibility resolution.
//!
//! Resolution is a pure function of `(type key, catalog, config)`. The root's
//! hidden-set always applies; a leaf can only hide more, never reveal a
//! field the root hides. Required keys are never reported as hidden.

use crate::config::{PresetsConfig, is_root, normalize_type_key};
use crate::migrate::{leaf_hidden_set, root_hidden_set};
use lessonkit_fields::FieldCatalog;
use serde::Serialize;
use std::collections::BTreeSet;
use tracing::warn;

/// Which fields an editor shows for one type, and why the rest are hidden.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VisibilityResult {
    pub visible_keys: BTreeSet<String>,
    /// Union of `default_hidden_keys` and `type_hidden_keys`.
    pub hidden_keys: BTreeSet<String>,
    /// Keys hidden by the root override.
    pub default_hidden_keys: BTreeSet<String>,
    /// Keys hidden by the type's own override and not already hidden at the root.
    pub type_hidden_keys: BTreeSet<String>,
}

impl VisibilityResult {
    #[must_use]
    pub fn is_visible(&self, key: &str) -> bool {
        self.visible_keys.contains(key)
    }

    #[must_use]
    pub fn is_hidden(&self, key: &str) -> bool {
        self.hidden_keys.contains(key)
    }
}

/// Where an unknown key was found.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyOrigin {
    /// In the root's hidden-set.
    RootHidden,
    /// In a leaf's hidden-set (legacy shape).
    LeafHidden,
    /// In a leaf's allow-list.
    LeafVisible,
}

/// A key referenced by an override but missing from the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UnknownKey<'a> {
    pub type_key: &'a str,
    pub field_key: &'a str,
    pub origin: KeyOrigin,
}

/// Resolves visibility for `type_key`, logging unknown keys as warnings.
#[must_use]
pub fn resolve(type_key: &str, catalog: &FieldCatalog, config: &PresetsConfig) -> VisibilityResult {
    resolve_with(type_key, catalog, config, |unknown| {
        warn!(
            type_key = %unknown.type_key,
            field_key = %unknown.field_key,
            origin = ?unknown.origin,
            "Override references a field that is not in the catalog"
        );
    })
}

/// Resolves visibility for `type_key`, handing every unknown key to `on_unknown`.
#[must_use]
pub fn resolve_with<F>(
    type_key: &str,
    catalog: &FieldCatalog,
    config: &PresetsConfig,
    mut on_unknown: F,
) -> VisibilityResult
where
    F: FnMut(UnknownKey<'_>),
{
    let type_key = normalize_type_key(type_key);
    let required = catalog.required_keys();

    let mut default_hidden = root_hidden_set(config, catalog);
    default_hidden.retain(|key| !required.contains(key));
    report_unknown(type_key, &default_hidden, KeyOrigin::RootHidden, catalog, &mut on_unknown);

    let mut type_hidden = BTreeSet::new();
    if !is_root(type_key) {
        let record = config.leaf(type_key);
        if let Some(record) = record.filter(|r| !r.is_uninitialized()) {
            if let Some(visible) = &record.visible_field_keys {
                report_unknown(type_key, visible, KeyOrigin::LeafVisible, catalog, &mut on_unknown);
            }
            if let Some(hidden) = &record.hidden_field_keys {
                report_unknown(type_key, hidden, KeyOrigin::LeafHidden, catalog, &mut on_unknown);
            }
        }

        type_hidden = leaf_hidden_set(record, type_key, catalog);
        type_hidden.retain(|key| !default_hidden.contains(key) && !required.contains(key));
    }

    let hidden_keys: BTreeSet<String> = default_hidden.union(&type_hidden).cloned().collect();
    let visible_keys = catalog.keys().difference(&hidden_keys).cloned().collect();

    VisibilityResult {
        visible_keys,
        hidden_keys,
        default_hidden_keys: default_hidden,
        type_hidden_keys: type_hidden,
    }
}

fn report_unknown<F>(
    type_key: &str,
    keys: &BTreeSet<String>,
    origin: KeyOrigin,
    catalog: &FieldCatalog,
    on_unknown: &mut F,
) where
    F: FnMut(UnknownKey<'_>),
{
    for key in keys.iter().filter(|key| !catalog.contains(key)) {
        on_unknown(UnknownKey {
            type_key,
            field_key: key,
            origin,
        });
    }
}
