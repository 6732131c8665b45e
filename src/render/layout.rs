//! Layout resolution
//!
//! Walks the schema once, merges per-field overrides with the form-wide
//! defaults, expands groups into proportionally sized cells and decides
//! which field gets initial focus. Stateless: every call starts fresh.

use super::dispatch::render_field;
use super::props::{Percent, ResolvedFieldProps};
use super::renderer::{Cell, RenderNode, Renderer, TreeRenderer};
use crate::schema::{FieldDescriptor, FieldGroup, FieldGroupConfig, SchemaEntry, StackOptions};

// ============================================================================
// Resolved layout
// ============================================================================

/// A group item with its computed width
#[derive(Clone, Debug)]
pub struct ResolvedCell {
    pub width: Percent,
    pub field: ResolvedFieldProps,
}

/// One row of the form
#[derive(Clone, Debug)]
pub enum ResolvedRow {
    Single(ResolvedFieldProps),
    Group { key: String, cells: Vec<ResolvedCell> },
}

impl ResolvedRow {
    pub fn key(&self) -> &str {
        match self {
            ResolvedRow::Single(field) => &field.name,
            ResolvedRow::Group { key, .. } => key,
        }
    }

    /// Resolved fields of the row in document order
    pub fn fields(&self) -> Vec<&ResolvedFieldProps> {
        match self {
            ResolvedRow::Single(field) => vec![field],
            ResolvedRow::Group { cells, .. } => cells.iter().map(|cell| &cell.field).collect(),
        }
    }
}

/// The whole form after default resolution, before dispatch
#[derive(Clone, Debug)]
pub struct ResolvedLayout {
    pub options: StackOptions,
    pub rows: Vec<ResolvedRow>,
}

impl ResolvedLayout {
    /// Every resolved leaf field in document order
    pub fn fields(&self) -> impl Iterator<Item = &ResolvedFieldProps> {
        self.rows.iter().flat_map(ResolvedRow::fields)
    }
}

// ============================================================================
// Resolution rules
// ============================================================================

/// Per-field value wins over the form-wide one; `None` when neither exists
pub fn resolve_value(override_value: Option<&str>, form_default: Option<&str>) -> Option<String> {
    override_value.or(form_default).map(str::to_string)
}

/// Width of cell `index` in a row of `count` cells.
///
/// Uses `sizes[index]` as a fraction when present, else an equal share.
/// `None` only when the row has no cells.
pub fn cell_width(sizes: Option<&[f64]>, index: usize, count: usize) -> Option<Percent> {
    if let Some(size) = sizes.and_then(|s| s.get(index)) {
        return Some(Percent(size * 100.0));
    }
    if count == 0 {
        return None;
    }
    Some(Percent(100.0 / count as f64))
}

/// Merge one descriptor with the form-wide config
pub fn resolve_field(field: &FieldDescriptor, config: &FieldGroupConfig, auto_focus: bool) -> ResolvedFieldProps {
    let defaults = &config.defaults;
    let name = field.name.as_str();

    ResolvedFieldProps {
        name: field.name.clone(),
        kind: field.kind.clone(),
        label: resolve_value(field.label.as_deref(), defaults.label_for(name)),
        required: !defaults.is_optional(name),
        disabled: config.is_disabled,
        placeholder: resolve_value(field.placeholder.as_deref(), defaults.placeholder_for(name)),
        helper_text: resolve_value(field.helper_text.as_deref(), defaults.helper_text_for(name)),
        max_length: field.max_length,
        auto_focus,
    }
}

fn resolve_group(group: &FieldGroup, config: &FieldGroupConfig, first_entry: bool) -> Vec<ResolvedCell> {
    let count = group.items.len();
    let sizes = group.sizes.as_deref();

    if let Some(sizes) = sizes {
        if sizes.len() < count {
            tracing::debug!(
                group = %group.name,
                sizes = sizes.len(),
                items = count,
                "group has fewer sizes than items, using equal shares for the rest"
            );
        }
    }

    group
        .items
        .iter()
        .enumerate()
        .filter_map(|(index, item)| {
            let width = cell_width(sizes, index, count)?;
            let field = resolve_field(item, config, first_entry && index == 0);
            Some(ResolvedCell { width, field })
        })
        .collect()
}

/// Resolve every entry of `schema` into rows.
///
/// Only the first leaf of the first entry gets `auto_focus`. Groups
/// without items produce no row.
pub fn resolve_layout(config: &FieldGroupConfig, schema: &[SchemaEntry]) -> ResolvedLayout {
    let mut rows = Vec::with_capacity(schema.len());

    for (index, entry) in schema.iter().enumerate() {
        let first_entry = index == 0;
        match entry {
            SchemaEntry::Field(field) => {
                rows.push(ResolvedRow::Single(resolve_field(field, config, first_entry)));
            }
            SchemaEntry::Group(group) => {
                let cells = resolve_group(group, config, first_entry);
                if cells.is_empty() {
                    tracing::debug!(group = %group.name, "skipping empty group");
                    continue;
                }
                rows.push(ResolvedRow::Group {
                    key: group.name.clone(),
                    cells,
                });
            }
        }
    }

    tracing::trace!(entries = schema.len(), rows = rows.len(), "resolved form layout");

    ResolvedLayout {
        options: config.layout.clone(),
        rows,
    }
}

// ============================================================================
// Rendering
// ============================================================================

/// Render a resolved layout with `renderer`
pub fn render_layout<R>(renderer: &R, layout: ResolvedLayout) -> R::Node
where
    R: Renderer + ?Sized,
{
    let ResolvedLayout { options, rows } = layout;

    let children = rows
        .into_iter()
        .filter_map(|row| match row {
            ResolvedRow::Single(field) => render_field(renderer, field),
            ResolvedRow::Group { key, cells } => {
                let cells: Vec<Cell<R::Node>> = cells
                    .into_iter()
                    .filter_map(|cell| {
                        let key = cell.field.name.clone();
                        render_field(renderer, cell.field).map(|child| Cell {
                            key,
                            width: cell.width,
                            child,
                        })
                    })
                    .collect();
                // Every item was unrenderable: same as an empty group
                if cells.is_empty() {
                    tracing::debug!(group = %key, "skipping group with no renderable items");
                    return None;
                }
                Some(renderer.row(&key, cells))
            }
        })
        .collect();

    renderer.column(&options, children)
}

/// Resolve and render a whole form: the main entry point
pub fn render_field_group<R>(renderer: &R, config: &FieldGroupConfig, schema: &[SchemaEntry]) -> R::Node
where
    R: Renderer + ?Sized,
{
    render_layout(renderer, resolve_layout(config, schema))
}

/// [`render_field_group`] with the built-in [`TreeRenderer`]
pub fn render_form(config: &FieldGroupConfig, schema: &[SchemaEntry]) -> RenderNode {
    render_field_group(&TreeRenderer, config, schema)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{FieldKind, FormDefaults};

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_resolve_value_order() {
        assert_eq!(resolve_value(Some("field"), Some("form")), Some("field".to_string()));
        assert_eq!(resolve_value(None, Some("form")), Some("form".to_string()));
        assert_eq!(resolve_value(None, None), None);
    }

    #[test]
    fn test_equal_widths() {
        let widths: Vec<f64> = (0..3).map(|i| cell_width(None, i, 3).unwrap().value()).collect();
        for width in widths {
            assert!(approx(width, 100.0 / 3.0));
        }
    }

    #[test]
    fn test_sized_widths() {
        let sizes = [0.5, 0.25, 0.25];
        let widths: Vec<String> = (0..3)
            .map(|i| cell_width(Some(&sizes), i, 3).unwrap().to_string())
            .collect();
        assert_eq!(widths, vec!["50%", "25%", "25%"]);
    }

    #[test]
    fn test_short_sizes_fall_back_per_cell() {
        let sizes = [0.5];
        assert_eq!(cell_width(Some(&sizes), 0, 4), Some(Percent(50.0)));
        assert_eq!(cell_width(Some(&sizes), 1, 4), Some(Percent(25.0)));
        assert_eq!(cell_width(Some(&sizes), 3, 4), Some(Percent(25.0)));
    }

    #[test]
    fn test_zero_items_has_no_width() {
        assert_eq!(cell_width(None, 0, 0), None);
    }

    #[test]
    fn test_per_field_override_beats_form_default() {
        let config = FieldGroupConfig::new(
            FormDefaults::new()
                .with_label("email", "Form Label")
                .with_placeholder("email", "form@example.com")
                .with_helper_text("email", "form help"),
        );
        let field = FieldDescriptor::text("email")
            .with_label("Field Label")
            .with_placeholder("field@example.com");

        let resolved = resolve_field(&field, &config, false);
        assert_eq!(resolved.label.as_deref(), Some("Field Label"));
        assert_eq!(resolved.placeholder.as_deref(), Some("field@example.com"));
        assert_eq!(resolved.helper_text.as_deref(), Some("form help"));
    }

    #[test]
    fn test_required_and_disabled() {
        let config = FieldGroupConfig::new(FormDefaults::new().with_optional("middleName")).disabled(true);

        let middle = resolve_field(&FieldDescriptor::text("middleName"), &config, false);
        let first = resolve_field(&FieldDescriptor::text("firstName"), &config, false);
        assert!(!middle.required);
        assert!(first.required);
        assert!(middle.disabled && first.disabled);
    }

    #[test]
    fn test_autofocus_first_leaf_of_leading_group() {
        let schema: Vec<SchemaEntry> = vec![
            FieldGroup::new(
                "names",
                vec![FieldDescriptor::text("first"), FieldDescriptor::text("last")],
            )
            .into(),
            FieldDescriptor::text("email").into(),
        ];

        let layout = resolve_layout(&FieldGroupConfig::default(), &schema);
        let focused: Vec<&str> = layout
            .fields()
            .filter(|f| f.auto_focus)
            .map(|f| f.name.as_str())
            .collect();
        assert_eq!(focused, vec!["first"]);
    }

    #[test]
    fn test_empty_group_produces_no_row() {
        let schema: Vec<SchemaEntry> = vec![
            FieldGroup::new("empty", vec![]).into(),
            FieldDescriptor::text("email").into(),
        ];

        let layout = resolve_layout(&FieldGroupConfig::default(), &schema);
        assert_eq!(layout.rows.len(), 1);
        assert_eq!(layout.rows[0].key(), "email");
    }

    #[test]
    fn test_unrecognized_field_dropped_from_group_row() {
        let schema: Vec<SchemaEntry> = vec![FieldGroup::new(
            "mixed",
            vec![
                FieldDescriptor::text("kept"),
                FieldDescriptor::new("dropped", FieldKind::Unrecognized),
            ],
        )
        .into()];

        let tree = render_form(&FieldGroupConfig::default(), &schema);
        let row = &tree.children()[0];
        assert_eq!(row.key(), Some("mixed"));
        assert_eq!(row.children().len(), 1);
        assert_eq!(row.children()[0].key(), Some("kept"));
    }

    #[test]
    fn test_group_of_only_unrecognized_items_renders_no_row() {
        let schema: Vec<SchemaEntry> = serde_json::from_str(
            r#"[
                {"type": "group", "name": "g", "items": [{"type": "x", "name": "a"}]},
                {"type": "text", "name": "email"}
            ]"#,
        )
        .unwrap();

        let tree = render_form(&FieldGroupConfig::default(), &schema);
        let rows = tree.children();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].key(), Some("email"));
    }

    #[test]
    fn test_short_sizes_in_resolved_group() {
        let schema: Vec<SchemaEntry> = vec![FieldGroup::new(
            "abc",
            vec![
                FieldDescriptor::text("a"),
                FieldDescriptor::text("b"),
                FieldDescriptor::text("c"),
            ],
        )
        .with_sizes(vec![0.5])
        .into()];

        let layout = resolve_layout(&FieldGroupConfig::default(), &schema);
        let ResolvedRow::Group { cells, .. } = &layout.rows[0] else {
            panic!("expected a group row, got {:?}", layout.rows[0]);
        };
        let widths: Vec<f64> = cells.iter().map(|cell| cell.width.value()).collect();
        assert_eq!(widths.len(), 3);
        assert!(approx(widths[0], 50.0));
        assert!(approx(widths[1], 100.0 / 3.0));
        assert!(approx(widths[2], 100.0 / 3.0));

        let tree = render_form(&FieldGroupConfig::default(), &schema);
        let row = &tree.children()[0];
        let keys: Vec<Option<&str>> = row.children().iter().map(RenderNode::key).collect();
        assert_eq!(keys, vec![Some("a"), Some("b"), Some("c")]);
    }
}
