use std::collections::{BTreeSet, HashMap};
use thiserror::Error;

use super::form::FormDefinition;
use crate::schema::{FieldDescriptor, FieldGroup, FieldKind, SchemaEntry};

/// Allowed drift of a group's sizes from summing to exactly 1
const SIZE_SUM_TOLERANCE: f64 = 1e-3;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("Missing required field: {0}")]
    MissingField(String),

    #[error("Invalid value for {field}: {reason}")]
    InvalidValue { field: String, reason: String },

    #[error("Duplicate entry: {0}")]
    Duplicate(String),

    #[error("Unrecognized field type at {0}, the field will not be rendered")]
    UnrecognizedType(String),

    #[error("Cross-reference error: {0}")]
    CrossReference(String),
}

/// Opt-in lint for form definitions.
///
/// The resolver renders whatever it is given; this catches the shapes
/// that render surprisingly (dropped fields, key collisions, odd widths).
pub struct SchemaValidator;

impl SchemaValidator {
    pub fn validate(form: &FormDefinition) -> Result<(), Vec<ValidationError>> {
        let mut errors = Vec::new();

        if form.name.is_empty() {
            errors.push(ValidationError::MissingField("name".to_string()));
        }

        if let Err(e) = Self::validate_entries(&form.fields) {
            errors.extend(e);
        }

        if let Err(e) = Self::validate_cross_references(form) {
            errors.extend(e);
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    fn validate_entries(entries: &[SchemaEntry]) -> Result<(), Vec<ValidationError>> {
        let mut errors = Vec::new();
        let mut seen_names = HashMap::new();

        for (idx, entry) in entries.iter().enumerate() {
            let path = format!("fields[{}]", idx);

            if !entry.name().is_empty() {
                if let Some(prev_idx) = seen_names.insert(entry.name(), idx) {
                    errors.push(ValidationError::Duplicate(format!(
                        "Name '{}' appears at fields[{}] and fields[{}]",
                        entry.name(),
                        prev_idx,
                        idx
                    )));
                }
            }

            match entry {
                SchemaEntry::Field(field) => errors.extend(Self::validate_field(&path, field)),
                SchemaEntry::Group(group) => errors.extend(Self::validate_group(&path, group)),
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    fn validate_group(path: &str, group: &FieldGroup) -> Vec<ValidationError> {
        let mut errors = Vec::new();

        if group.name.is_empty() {
            errors.push(ValidationError::MissingField(format!("{}.name", path)));
        }

        if group.items.is_empty() {
            errors.push(ValidationError::InvalidValue {
                field: format!("{}.items", path),
                reason: "Group has no items and renders no row".to_string(),
            });
        }

        let mut seen_names = HashMap::new();
        for (idx, item) in group.items.iter().enumerate() {
            let item_path = format!("{}.items[{}]", path, idx);
            if !item.name.is_empty() {
                if let Some(prev_idx) = seen_names.insert(item.name.as_str(), idx) {
                    errors.push(ValidationError::Duplicate(format!(
                        "Name '{}' appears at {}.items[{}] and {}",
                        item.name, path, prev_idx, item_path
                    )));
                }
            }
            errors.extend(Self::validate_field(&item_path, item));
        }

        if let Some(sizes) = &group.sizes {
            if sizes.len() != group.items.len() {
                errors.push(ValidationError::InvalidValue {
                    field: format!("{}.sizes", path),
                    reason: format!(
                        "Expected {} sizes (one per item), found {}",
                        group.items.len(),
                        sizes.len()
                    ),
                });
            }

            if sizes.iter().any(|s| !s.is_finite() || *s < 0.0) {
                errors.push(ValidationError::InvalidValue {
                    field: format!("{}.sizes", path),
                    reason: "Sizes must be finite, non-negative fractions".to_string(),
                });
            } else if sizes.len() == group.items.len() && !sizes.is_empty() {
                let total: f64 = sizes.iter().sum();
                if (total - 1.0).abs() > SIZE_SUM_TOLERANCE {
                    errors.push(ValidationError::InvalidValue {
                        field: format!("{}.sizes", path),
                        reason: format!("Sizes sum to {}, expected 1", total),
                    });
                }
            }
        }

        errors
    }

    fn validate_field(path: &str, field: &FieldDescriptor) -> Vec<ValidationError> {
        let mut errors = Vec::new();

        if field.name.is_empty() {
            errors.push(ValidationError::MissingField(format!("{}.name", path)));
        }

        match &field.kind {
            FieldKind::Unrecognized => {
                errors.push(ValidationError::UnrecognizedType(path.to_string()));
            }
            FieldKind::Select { values, .. } if values.is_empty() => {
                errors.push(ValidationError::InvalidValue {
                    field: format!("{}.values", path),
                    reason: "Select has no options".to_string(),
                });
            }
            FieldKind::TextMulti { rows: Some(0) } => {
                errors.push(ValidationError::InvalidValue {
                    field: format!("{}.rows", path),
                    reason: "Rows must be greater than 0".to_string(),
                });
            }
            _ => {}
        }

        errors
    }

    fn validate_cross_references(form: &FormDefinition) -> Result<(), Vec<ValidationError>> {
        let leaf_names: BTreeSet<&str> = form
            .fields
            .iter()
            .flat_map(|entry| entry.leaves())
            .map(|field| field.name.as_str())
            .collect();

        let defaults = &form.config.defaults;
        let referenced = [
            ("label", defaults.label.keys().collect::<BTreeSet<_>>()),
            ("placeholder", defaults.placeholder.keys().collect()),
            ("helper_text", defaults.helper_text.keys().collect()),
            ("optional_fields", defaults.optional_fields.iter().collect()),
        ];

        let errors: Vec<ValidationError> = referenced
            .into_iter()
            .flat_map(|(map, keys)| {
                keys.into_iter()
                    .filter(|key| !leaf_names.contains(key.as_str()))
                    .map(move |key| {
                        ValidationError::CrossReference(format!("{} entry '{}' names no field", map, key))
                    })
                    .collect::<Vec<_>>()
            })
            .collect();

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{FieldGroupConfig, FormDefaults};

    fn form(fields: Vec<SchemaEntry>, defaults: FormDefaults) -> FormDefinition {
        FormDefinition::new("test", FieldGroupConfig::new(defaults), fields)
    }

    #[test]
    fn test_valid_form_passes() {
        let form = form(
            vec![
                FieldDescriptor::text("email").into(),
                FieldGroup::new(
                    "names",
                    vec![FieldDescriptor::text("first"), FieldDescriptor::text("last")],
                )
                .with_sizes(vec![0.5, 0.5])
                .into(),
            ],
            FormDefaults::new().with_optional("last").with_label("email", "E-mail"),
        );
        assert!(SchemaValidator::validate(&form).is_ok());
    }

    #[test]
    fn test_duplicate_sibling_names() {
        let form = form(
            vec![
                FieldDescriptor::text("email").into(),
                FieldDescriptor::text("email").into(),
                FieldGroup::new("pair", vec![FieldDescriptor::text("a"), FieldDescriptor::text("a")]).into(),
            ],
            FormDefaults::new(),
        );

        let errors = SchemaValidator::validate(&form).unwrap_err();
        let duplicates = errors
            .iter()
            .filter(|e| matches!(e, ValidationError::Duplicate(_)))
            .count();
        assert_eq!(duplicates, 2);
    }

    #[test]
    fn test_group_shape_problems() {
        let form = form(
            vec![
                FieldGroup::new("empty", vec![]).into(),
                FieldGroup::new("short", vec![FieldDescriptor::text("a"), FieldDescriptor::text("b")])
                    .with_sizes(vec![0.5])
                    .into(),
                FieldGroup::new("wide", vec![FieldDescriptor::text("c"), FieldDescriptor::text("d")])
                    .with_sizes(vec![0.75, 0.75])
                    .into(),
            ],
            FormDefaults::new(),
        );

        let errors = SchemaValidator::validate(&form).unwrap_err();
        let fields: Vec<&str> = errors
            .iter()
            .filter_map(|e| match e {
                ValidationError::InvalidValue { field, .. } => Some(field.as_str()),
                _ => None,
            })
            .collect();
        assert_eq!(fields, vec!["fields[0].items", "fields[1].sizes", "fields[2].sizes"]);
    }

    #[test]
    fn test_unrecognized_and_empty_select() {
        let form = form(
            vec![
                FieldDescriptor::new("hue", FieldKind::Unrecognized).into(),
                FieldDescriptor::new("size", FieldKind::select(Vec::<String>::new())).into(),
            ],
            FormDefaults::new(),
        );

        let errors = SchemaValidator::validate(&form).unwrap_err();
        assert_eq!(errors[0], ValidationError::UnrecognizedType("fields[0]".to_string()));
        assert!(matches!(&errors[1], ValidationError::InvalidValue { field, .. } if field == "fields[1].values"));
    }

    #[test]
    fn test_defaults_naming_unknown_fields() {
        let form = form(
            vec![FieldDescriptor::text("email").into()],
            FormDefaults::new()
                .with_label("emial", "Typo")
                .with_optional("phone"),
        );

        let errors = SchemaValidator::validate(&form).unwrap_err();
        assert_eq!(
            errors,
            vec![
                ValidationError::CrossReference("label entry 'emial' names no field".to_string()),
                ValidationError::CrossReference("optional_fields entry 'phone' names no field".to_string()),
            ]
        );
    }
}
