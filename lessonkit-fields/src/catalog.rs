//! Ordered, read-only field catalog.
//!
//! A catalog is built once from the host's field definitions and then passed
//! by reference into every resolve/toggle call. It also carries the host's
//! default layout for individual content types: the allow-list a type falls
//! back to when it has no usable override of its own.

use crate::descriptor::FieldDescriptor;
use crate::error::{CatalogError, CatalogResult};
use std::collections::{BTreeMap, BTreeSet};

/// The host-supplied list of authoring fields.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldCatalog {
    fields: Vec<FieldDescriptor>,
    keys: BTreeSet<String>,
    required: BTreeSet<String>,
    type_defaults: BTreeMap<String, BTreeSet<String>>,
}

impl FieldCatalog {
    /// Builds a catalog, rejecting empty and duplicate keys.
    ///
    /// Field order is preserved for rendering.
    pub fn new(fields: Vec<FieldDescriptor>) -> CatalogResult<Self> {
        let mut keys = BTreeSet::new();
        let mut required = BTreeSet::new();
        for field in &fields {
            if field.key.is_empty() {
                return Err(CatalogError::EmptyKey {
                    label: field.label.clone(),
                });
            }
            if !keys.insert(field.key.clone()) {
                return Err(CatalogError::DuplicateKey(field.key.clone()));
            }
            if field.required {
                required.insert(field.key.clone());
            }
        }

        Ok(Self {
            fields,
            keys,
            required,
            type_defaults: BTreeMap::new(),
        })
    }

    /// Parses a catalog from the host's JSON array of descriptors.
    pub fn from_json(json: &str) -> CatalogResult<Self> {
        let fields: Vec<FieldDescriptor> = serde_json::from_str(json)?;
        Self::new(fields)
    }

    /// Registers the host default layout for a content type.
    #[must_use]
    pub fn with_type_default<I, S>(mut self, type_key: &str, visible: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.set_type_default(type_key, visible);
        self
    }

    /// Registers (or replaces) the host default layout for a content type.
    pub fn set_type_default<I, S>(&mut self, type_key: &str, visible: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let visible: BTreeSet<String> = visible.into_iter().map(Into::into).collect();
        self.type_defaults.insert(type_key.to_string(), visible);
    }

    /// Returns the host default layout for a type, if one is registered and non-empty.
    #[must_use]
    pub fn type_default(&self, type_key: &str) -> Option<&BTreeSet<String>> {
        self.type_defaults
            .get(type_key)
            .filter(|visible| !visible.is_empty())
    }

    /// Returns the descriptors in host order.
    #[must_use]
    pub fn fields(&self) -> &[FieldDescriptor] {
        &self.fields
    }

    /// Looks up a descriptor by key.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&FieldDescriptor> {
        self.fields.iter().find(|f| f.key == key)
    }

    /// Returns true if the catalog defines `key`.
    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        self.keys.contains(key)
    }

    /// Returns every key in the catalog.
    #[must_use]
    pub fn keys(&self) -> &BTreeSet<String> {
        &self.keys
    }

    /// Returns the keys of required fields.
    #[must_use]
    pub fn required_keys(&self) -> &BTreeSet<String> {
        &self.required
    }

    #[must_use]
    pub fn is_required(&self, key: &str) -> bool {
        self.required.contains(key)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Returns the descriptors whose keys are in `visible`, in host order.
    pub fn select<'a>(
        &'a self,
        visible: &'a BTreeSet<String>,
    ) -> impl Iterator<Item = &'a FieldDescriptor> + 'a {
        self.fields.iter().filter(move |f| visible.contains(&f.key))
    }
}
