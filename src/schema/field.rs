//! Field descriptors: the discriminated union over field type

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;
use std::fmt;
use std::sync::Arc;

use crate::casing::{transform_string, LabelCase};

/// Default row count for multiline text fields
pub const DEFAULT_TEXT_ROWS: u32 = 5;

// ============================================================================
// Caller-owned callbacks
// ============================================================================

/// Click handler for checkbox fields.
///
/// Owned by the caller; the resolver only clones and forwards it.
#[derive(Clone)]
pub struct ClickHandler(Arc<dyn Fn() + Send + Sync>);

impl ClickHandler {
    pub fn new<F>(f: F) -> Self
    where
        F: Fn() + Send + Sync + 'static,
    {
        Self(Arc::new(f))
    }

    /// Invoke the handler
    pub fn call(&self) {
        (self.0)()
    }
}

impl fmt::Debug for ClickHandler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ClickHandler(..)")
    }
}

/// Display mapping for select options
#[derive(Clone)]
pub enum Transformation {
    /// One of the named label cases, usable from schema files
    Case(LabelCase),
    /// Arbitrary mapping supplied in code
    Custom(Arc<dyn Fn(&str) -> String + Send + Sync>),
}

impl Transformation {
    pub fn custom<F>(f: F) -> Self
    where
        F: Fn(&str) -> String + Send + Sync + 'static,
    {
        Transformation::Custom(Arc::new(f))
    }

    /// Map an option value to its display text
    pub fn apply(&self, value: &str) -> String {
        match self {
            Transformation::Case(case) => transform_string(value, *case),
            Transformation::Custom(f) => f(value),
        }
    }

    /// Name used when serializing; custom closures have no schema spelling
    pub fn name(&self) -> &'static str {
        match self {
            Transformation::Case(case) => case.as_str(),
            Transformation::Custom(_) => "custom",
        }
    }
}

impl Default for Transformation {
    fn default() -> Self {
        Transformation::Case(LabelCase::Identity)
    }
}

impl fmt::Debug for Transformation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Transformation::Case(case) => f.debug_tuple("Case").field(case).finish(),
            Transformation::Custom(_) => f.write_str("Custom(..)"),
        }
    }
}

impl Serialize for Transformation {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.name())
    }
}

impl<'de> Deserialize<'de> for Transformation {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        LabelCase::parse(&raw)
            .map(Transformation::Case)
            .ok_or_else(|| D::Error::custom(format!("unknown option transformation '{}'", raw)))
    }
}

// ============================================================================
// Field Kind
// ============================================================================

/// Field type tag plus the type-specific configuration
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum FieldKind {
    Password,
    Text,
    TextMulti {
        /// Visible rows, defaults to [`DEFAULT_TEXT_ROWS`]
        #[serde(default, skip_serializing_if = "Option::is_none")]
        rows: Option<u32>,
    },
    Select {
        values: Vec<String>,
        #[serde(default)]
        transformation: Transformation,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        multiple: Option<bool>,
    },
    Checkbox {
        #[serde(default)]
        checked: bool,
        #[serde(skip)]
        on_click: Option<ClickHandler>,
    },
    Rating,
    Number,
    Tags,
    Date,
    Range,
    /// Any tag this crate does not know; renders as nothing
    #[serde(other)]
    Unrecognized,
}

impl FieldKind {
    /// Schema tag for this kind
    pub fn type_name(&self) -> &'static str {
        match self {
            FieldKind::Password => "password",
            FieldKind::Text => "text",
            FieldKind::TextMulti { .. } => "text-multi",
            FieldKind::Select { .. } => "select",
            FieldKind::Checkbox { .. } => "checkbox",
            FieldKind::Rating => "rating",
            FieldKind::Number => "number",
            FieldKind::Tags => "tags",
            FieldKind::Date => "date",
            FieldKind::Range => "range",
            FieldKind::Unrecognized => "unrecognized",
        }
    }

    pub fn is_recognized(&self) -> bool {
        !matches!(self, FieldKind::Unrecognized)
    }

    pub fn text_multi() -> Self {
        FieldKind::TextMulti { rows: None }
    }

    pub fn select<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        FieldKind::Select {
            values: values.into_iter().map(Into::into).collect(),
            transformation: Transformation::default(),
            multiple: None,
        }
    }

    pub fn checkbox(checked: bool, on_click: Option<ClickHandler>) -> Self {
        FieldKind::Checkbox { checked, on_click }
    }
}

// ============================================================================
// Field Descriptor
// ============================================================================

/// One leaf form field
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct FieldDescriptor {
    /// Key into the target payload; also the stable identity of the field
    pub name: String,
    #[serde(flatten)]
    pub kind: FieldKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub placeholder: Option<String>,
    #[serde(default, alias = "helperText", skip_serializing_if = "Option::is_none")]
    pub helper_text: Option<String>,
    /// Forwarded to multiline text fields only
    #[serde(default, alias = "maxLength", skip_serializing_if = "Option::is_none")]
    pub max_length: Option<u32>,
}

impl FieldDescriptor {
    pub fn new(name: impl Into<String>, kind: FieldKind) -> Self {
        Self {
            name: name.into(),
            kind,
            label: None,
            placeholder: None,
            helper_text: None,
            max_length: None,
        }
    }

    pub fn text(name: impl Into<String>) -> Self {
        Self::new(name, FieldKind::Text)
    }

    pub fn password(name: impl Into<String>) -> Self {
        Self::new(name, FieldKind::Password)
    }

    pub fn number(name: impl Into<String>) -> Self {
        Self::new(name, FieldKind::Number)
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn with_placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = Some(placeholder.into());
        self
    }

    pub fn with_helper_text(mut self, helper_text: impl Into<String>) -> Self {
        self.helper_text = Some(helper_text.into());
        self
    }

    pub fn with_max_length(mut self, max_length: u32) -> Self {
        self.max_length = Some(max_length);
        self
    }
}

// ============================================================================
// Groups and schema entries
// ============================================================================

/// Several leaf fields laid out in one horizontal row
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct FieldGroup {
    /// Group identity, used as the row key
    pub name: String,
    #[serde(default)]
    pub items: Vec<FieldDescriptor>,
    /// Fractional widths, one per item; equal split when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sizes: Option<Vec<f64>>,
}

impl FieldGroup {
    pub fn new(name: impl Into<String>, items: Vec<FieldDescriptor>) -> Self {
        Self {
            name: name.into(),
            items,
            sizes: None,
        }
    }

    pub fn with_sizes(mut self, sizes: Vec<f64>) -> Self {
        self.sizes = Some(sizes);
        self
    }
}

/// A top-level schema entry: a leaf field or a group of leaf fields
#[derive(Clone, Debug)]
pub enum SchemaEntry {
    Field(FieldDescriptor),
    Group(FieldGroup),
}

impl SchemaEntry {
    /// Field or group name, used as the row key
    pub fn name(&self) -> &str {
        match self {
            SchemaEntry::Field(field) => &field.name,
            SchemaEntry::Group(group) => &group.name,
        }
    }

    /// Leaf fields of this entry in document order
    pub fn leaves(&self) -> &[FieldDescriptor] {
        match self {
            SchemaEntry::Field(field) => std::slice::from_ref(field),
            SchemaEntry::Group(group) => &group.items,
        }
    }
}

impl From<FieldDescriptor> for SchemaEntry {
    fn from(field: FieldDescriptor) -> Self {
        SchemaEntry::Field(field)
    }
}

impl From<FieldGroup> for SchemaEntry {
    fn from(group: FieldGroup) -> Self {
        SchemaEntry::Group(group)
    }
}

/// Ordered form schema; order decides render order and autofocus
pub type FormSchema = Vec<SchemaEntry>;

const GROUP_TAG: &str = "group";

#[derive(Serialize)]
struct GroupRepr<'a> {
    #[serde(rename = "type")]
    tag: &'static str,
    #[serde(flatten)]
    group: &'a FieldGroup,
}

impl Serialize for SchemaEntry {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            SchemaEntry::Field(field) => field.serialize(serializer),
            SchemaEntry::Group(group) => GroupRepr {
                tag: GROUP_TAG,
                group,
            }
            .serialize(serializer),
        }
    }
}

impl<'de> Deserialize<'de> for SchemaEntry {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        let is_group = value.get("type").and_then(Value::as_str) == Some(GROUP_TAG);

        if is_group {
            serde_json::from_value(value)
                .map(SchemaEntry::Group)
                .map_err(D::Error::custom)
        } else {
            serde_json::from_value(value)
                .map(SchemaEntry::Field)
                .map_err(D::Error::custom)
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn test_camel_case_descriptor_keys() {
        let schema: FormSchema = serde_json::from_str(
            r#"[{"type": "text-multi", "name": "bio", "maxLength": 200, "helperText": "hi"}]"#,
        )
        .unwrap();

        let SchemaEntry::Field(bio) = &schema[0] else {
            panic!("expected a field, got {:?}", schema[0]);
        };
        assert_eq!(bio.max_length, Some(200));
        assert_eq!(bio.helper_text.as_deref(), Some("hi"));
    }

    #[test]
    fn test_deserialize_leaf_kinds() {
        let schema: FormSchema = serde_json::from_str(
            r#"[
                {"type": "text", "name": "email"},
                {"type": "text-multi", "name": "bio", "rows": 3, "max_length": 200},
                {"type": "select", "name": "country", "values": ["fr", "de"], "transformation": "upper", "multiple": true},
                {"type": "checkbox", "name": "terms", "checked": true},
                {"type": "date", "name": "born"}
            ]"#,
        )
        .unwrap();

        assert_eq!(schema.len(), 5);
        let SchemaEntry::Field(bio) = &schema[1] else {
            panic!("expected a field");
        };
        assert!(matches!(bio.kind, FieldKind::TextMulti { rows: Some(3) }));
        assert_eq!(bio.max_length, Some(200));

        let SchemaEntry::Field(country) = &schema[2] else {
            panic!("expected a field");
        };
        match &country.kind {
            FieldKind::Select {
                values,
                transformation,
                multiple,
            } => {
                assert_eq!(values, &vec!["fr".to_string(), "de".to_string()]);
                assert_eq!(transformation.apply("fr"), "FR");
                assert_eq!(*multiple, Some(true));
            }
            other => panic!("unexpected kind {:?}", other),
        }
    }

    #[test]
    fn test_deserialize_group() {
        let entry: SchemaEntry = serde_json::from_str(
            r#"{"type": "group", "name": "nameGroup", "sizes": [0.5, 0.5],
                "items": [{"type": "text", "name": "first"}, {"type": "text", "name": "last"}]}"#,
        )
        .unwrap();

        let SchemaEntry::Group(group) = entry else {
            panic!("expected a group");
        };
        assert_eq!(group.name, "nameGroup");
        assert_eq!(group.items.len(), 2);
        assert_eq!(group.sizes, Some(vec![0.5, 0.5]));
    }

    #[test]
    fn test_unknown_type_is_unrecognized() {
        let entry: SchemaEntry =
            serde_json::from_str(r#"{"type": "color-wheel", "name": "hue"}"#).unwrap();
        let SchemaEntry::Field(field) = entry else {
            panic!("expected a field");
        };
        assert!(!field.kind.is_recognized());
        assert_eq!(field.name, "hue");
    }

    #[test]
    fn test_missing_type_is_an_error() {
        let result: Result<SchemaEntry, _> = serde_json::from_str(r#"{"name": "orphan"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_group_serializes_with_tag() {
        let entry = SchemaEntry::from(FieldGroup::new("pair", vec![FieldDescriptor::text("a")]));
        let json = serde_json::to_value(&entry).unwrap();
        assert_eq!(json["type"], "group");
        assert_eq!(json["items"][0]["type"], "text");
    }

    #[test]
    fn test_bad_transformation_name() {
        let result: Result<FieldDescriptor, _> = serde_json::from_str(
            r#"{"type": "select", "name": "s", "values": [], "transformation": "sparkly"}"#,
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_click_handler_is_shared() {
        let clicks = Arc::new(AtomicUsize::new(0));
        let counter = clicks.clone();
        let handler = ClickHandler::new(move || {
            counter.fetch_add(1, Ordering::SeqCst);
        });
        let forwarded = handler.clone();
        handler.call();
        forwarded.call();
        assert_eq!(clicks.load(Ordering::SeqCst), 2);
    }
}
