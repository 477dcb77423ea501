//! Decoding and encoding of the persisted preset blob.
//!
//! Decoding validates structure by hand instead of deriving it, because a
//! stray non-string key in a list must be dropped rather than failing the
//! whole blob.

use crate::error::{StoreError, StoreResult};
use lessonkit_presets::{OverrideRecord, PresetsConfig};
use serde_json::{Map, Value};
use std::collections::{BTreeMap, BTreeSet};
use tracing::warn;

const HIDDEN_FIELD: &str = "hiddenFieldKeys";
const VISIBLE_FIELD: &str = "visibleFieldKeys";

/// Parses and validates a preset blob.
pub fn decode(bytes: &[u8]) -> StoreResult<PresetsConfig> {
    let value: Value = serde_json::from_slice(bytes)?;
    let root = value
        .as_object()
        .ok_or_else(|| StoreError::Invalid("config is not an object".into()))?;

    let version = root
        .get("version")
        .and_then(Value::as_u64)
        .and_then(|v| u32::try_from(v).ok())
        .ok_or_else(|| StoreError::Invalid("version is not a non-negative integer".into()))?;

    let entries = root
        .get("presets")
        .and_then(Value::as_object)
        .ok_or_else(|| StoreError::Invalid("presets is not an object".into()))?;

    let mut presets = BTreeMap::new();
    for (type_key, entry) in entries {
        if type_key.trim().is_empty() {
            warn!("Dropping preset with an empty type key");
            continue;
        }
        let entry = entry
            .as_object()
            .ok_or_else(|| StoreError::Invalid(format!("preset {type_key:?} is not an object")))?;
        let record = OverrideRecord {
            hidden_field_keys: key_list(type_key, entry, HIDDEN_FIELD)?,
            visible_field_keys: key_list(type_key, entry, VISIBLE_FIELD)?,
        };
        presets.insert(type_key.clone(), record);
    }

    Ok(PresetsConfig { version, presets })
}

/// Serializes a config into the persisted blob format.
pub fn encode(config: &PresetsConfig) -> StoreResult<Vec<u8>> {
    Ok(serde_json::to_vec_pretty(config)?)
}

fn key_list(
    type_key: &str,
    entry: &Map<String, Value>,
    field: &str,
) -> StoreResult<Option<BTreeSet<String>>> {
    let items = match entry.get(field) {
        None | Some(Value::Null) => return Ok(None),
        Some(Value::Array(items)) => items,
        Some(_) => {
            return Err(StoreError::Invalid(format!(
                "{field} of preset {type_key:?} is not an array"
            )));
        }
    };

    let mut keys = BTreeSet::new();
    for item in items {
        match item.as_str() {
            Some(key) => {
                keys.insert(key.to_string());
            }
            None => warn!(type_key = %type_key, field, value = %item, "Dropping non-string field key"),
        }
    }
    Ok(Some(keys))
}
