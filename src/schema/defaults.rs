//! Form-wide defaults and layout options

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::{HashMap, HashSet};

/// Name-keyed fallbacks shared by every field of a form.
///
/// Any map may be empty; a missing entry is never an error.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct FormDefaults {
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub label: HashMap<String, String>,
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub placeholder: HashMap<String, String>,
    #[serde(default, alias = "helperText", skip_serializing_if = "HashMap::is_empty")]
    pub helper_text: HashMap<String, String>,
    /// Fields exempted from the required marker
    #[serde(default, alias = "optionalFields", skip_serializing_if = "HashSet::is_empty")]
    pub optional_fields: HashSet<String>,
}

impl FormDefaults {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn label_for(&self, name: &str) -> Option<&str> {
        self.label.get(name).map(String::as_str)
    }

    pub fn placeholder_for(&self, name: &str) -> Option<&str> {
        self.placeholder.get(name).map(String::as_str)
    }

    pub fn helper_text_for(&self, name: &str) -> Option<&str> {
        self.helper_text.get(name).map(String::as_str)
    }

    pub fn is_optional(&self, name: &str) -> bool {
        self.optional_fields.contains(name)
    }

    pub fn with_label(mut self, name: impl Into<String>, label: impl Into<String>) -> Self {
        self.label.insert(name.into(), label.into());
        self
    }

    pub fn with_placeholder(mut self, name: impl Into<String>, placeholder: impl Into<String>) -> Self {
        self.placeholder.insert(name.into(), placeholder.into());
        self
    }

    pub fn with_helper_text(mut self, name: impl Into<String>, helper_text: impl Into<String>) -> Self {
        self.helper_text.insert(name.into(), helper_text.into());
        self
    }

    pub fn with_optional(mut self, name: impl Into<String>) -> Self {
        self.optional_fields.insert(name.into());
        self
    }
}

/// Main axis of the outer form stack
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StackDirection {
    #[default]
    Column,
    Row,
}

/// Options for the outer stack container.
///
/// Opaque to the resolver: handed to the renderer as-is.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct StackOptions {
    #[serde(default)]
    pub direction: StackDirection,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub spacing: Option<f64>,
    /// Any other container props
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Everything the layout resolver needs besides the schema itself
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct FieldGroupConfig {
    /// Disables every field; there is no per-field override
    #[serde(default, alias = "isDisabled")]
    pub is_disabled: bool,
    #[serde(flatten)]
    pub defaults: FormDefaults,
    #[serde(default)]
    pub layout: StackOptions,
}

impl FieldGroupConfig {
    pub fn new(defaults: FormDefaults) -> Self {
        Self {
            defaults,
            ..Self::default()
        }
    }

    pub fn disabled(mut self, is_disabled: bool) -> Self {
        self.is_disabled = is_disabled;
        self
    }

    pub fn with_layout(mut self, layout: StackOptions) -> Self {
        self.layout = layout;
        self
    }
}
