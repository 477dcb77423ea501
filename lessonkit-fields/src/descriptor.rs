use serde::{Deserialize, Serialize};

/// A single authoring field as supplied by the host application.
///
/// `ui_type` is opaque to the engine: visibility decisions are made over
/// `key` alone, never over the kind of widget a field renders as.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldDescriptor {
    /// Stable identity of the field. Unique within a catalog.
    pub key: String,
    pub label: String,
    pub ui_type: String,
    /// Required fields are always visible and cannot be hidden at the root.
    #[serde(default)]
    pub required: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub help_text: Option<String>,
}

impl FieldDescriptor {
    /// Creates an optional field.
    pub fn new(key: &str, label: &str, ui_type: &str) -> Self {
        Self {
            key: key.into(),
            label: label.into(),
            ui_type: ui_type.into(),
            required: false,
            help_text: None,
        }
    }

    /// Shorthand for a single-line text field.
    pub fn text(key: &str, label: &str) -> Self {
        Self::new(key, label, "text")
    }

    /// Shorthand for a rich-text body field.
    pub fn rich_text(key: &str, label: &str) -> Self {
        Self::new(key, label, "richtext")
    }

    /// Shorthand for a media (image/video/audio) picker.
    pub fn media(key: &str, label: &str) -> Self {
        Self::new(key, label, "media")
    }

    /// Shorthand for the required label field every slide carries.
    pub fn label_field(key: &str, label: &str) -> Self {
        Self::new(key, label, "text").required()
    }

    /// Marks the field as required.
    #[must_use]
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    /// Attaches editor help text.
    #[must_use]
    pub fn with_help(mut self, help: &str) -> Self {
        self.help_text = Some(help.into());
        self
    }
}
