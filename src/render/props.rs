//! Prop sets handed to widgets

use serde::{Serialize, Serializer};
use std::fmt;

use crate::schema::{ClickHandler, FieldKind, Transformation};

/// Percentage width of a cell inside a group row
#[derive(Clone, Copy, Debug, PartialEq, PartialOrd)]
pub struct Percent(pub f64);

impl Percent {
    pub fn value(&self) -> f64 {
        self.0
    }
}

impl fmt::Display for Percent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", self.0)
    }
}

impl Serialize for Percent {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Fully merged input of the field dispatcher.
///
/// `label` is still optional here: the dispatcher derives one from
/// `name` when neither the field nor the form defaults supplied it.
#[derive(Clone, Debug)]
pub struct ResolvedFieldProps {
    pub name: String,
    pub kind: FieldKind,
    pub label: Option<String>,
    pub required: bool,
    pub disabled: bool,
    pub placeholder: Option<String>,
    pub helper_text: Option<String>,
    pub max_length: Option<u32>,
    pub auto_focus: bool,
}

impl ResolvedFieldProps {
    /// Props for a standalone field: required, enabled, no focus
    pub fn new(name: impl Into<String>, kind: FieldKind) -> Self {
        Self {
            name: name.into(),
            kind,
            label: None,
            required: true,
            disabled: false,
            placeholder: None,
            helper_text: None,
            max_length: None,
            auto_focus: false,
        }
    }
}

/// Props every leaf widget receives
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct CommonProps {
    pub name: String,
    pub label: String,
    pub required: bool,
    pub disabled: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub placeholder: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub helper_text: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct PasswordInputProps {
    #[serde(flatten)]
    pub common: CommonProps,
    pub auto_focus: bool,
}

/// How a text input behaves
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TextMode {
    SingleLine,
    Multiline { rows: u32 },
    Numeric,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct TextInputProps {
    #[serde(flatten)]
    pub common: CommonProps,
    pub mode: TextMode,
    pub auto_focus: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_length: Option<u32>,
}

#[derive(Clone, Debug, Serialize)]
pub struct SelectInputProps {
    #[serde(flatten)]
    pub common: CommonProps,
    pub values: Vec<String>,
    pub transformation: Transformation,
    pub multiple: bool,
}

impl SelectInputProps {
    /// `(value, display text)` pairs in option order
    pub fn options(&self) -> Vec<(String, String)> {
        self.values
            .iter()
            .map(|value| (value.clone(), self.transformation.apply(value)))
            .collect()
    }
}

#[derive(Clone, Debug, Serialize)]
pub struct CheckboxInputProps {
    #[serde(flatten)]
    pub common: CommonProps,
    pub checked: bool,
    #[serde(skip)]
    pub on_click: Option<ClickHandler>,
}
