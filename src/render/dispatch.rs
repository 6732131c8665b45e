//! Field dispatch: one resolved field to one widget

use super::props::*;
use super::renderer::{RenderNode, Renderer, TreeRenderer};
use crate::casing::{transform_string, LabelCase};
use crate::schema::{FieldKind, DEFAULT_TEXT_ROWS};

/// Explicit label if given, else the field name as a capitalized phrase
pub fn resolve_label(label: Option<String>, name: &str) -> String {
    label.unwrap_or_else(|| transform_string(name, LabelCase::Pascal))
}

/// Instantiate the widget matching `props.kind`.
///
/// Returns `None` for unrecognized field types. That is not an error:
/// such fields are simply left out of the form.
pub fn render_field<R>(renderer: &R, props: ResolvedFieldProps) -> Option<R::Node>
where
    R: Renderer + ?Sized,
{
    let ResolvedFieldProps {
        name,
        kind,
        label,
        required,
        disabled,
        placeholder,
        helper_text,
        max_length,
        auto_focus,
    } = props;

    let common = CommonProps {
        label: resolve_label(label, &name),
        name,
        required,
        disabled,
        placeholder,
        helper_text,
    };

    let node = match kind {
        FieldKind::Password => renderer.password_input(PasswordInputProps { common, auto_focus }),
        FieldKind::Text => renderer.text_input(TextInputProps {
            common,
            mode: TextMode::SingleLine,
            auto_focus,
            max_length: None,
        }),
        FieldKind::TextMulti { rows } => renderer.text_input(TextInputProps {
            common,
            mode: TextMode::Multiline {
                rows: rows.unwrap_or(DEFAULT_TEXT_ROWS),
            },
            auto_focus,
            max_length,
        }),
        FieldKind::Select {
            values,
            transformation,
            multiple,
        } => renderer.select_input(SelectInputProps {
            common,
            values,
            transformation,
            multiple: multiple.unwrap_or(false),
        }),
        FieldKind::Checkbox { checked, on_click } => renderer.checkbox_input(CheckboxInputProps {
            common,
            checked,
            on_click,
        }),
        FieldKind::Rating => renderer.rating_input(common),
        FieldKind::Number => renderer.text_input(TextInputProps {
            common,
            mode: TextMode::Numeric,
            auto_focus: false,
            max_length: None,
        }),
        FieldKind::Tags => renderer.tags_input(common),
        FieldKind::Date => renderer.date_picker_input(common),
        FieldKind::Range => renderer.range_input(common),
        FieldKind::Unrecognized => {
            tracing::debug!(field = %common.name, "skipping field with unrecognized type");
            return None;
        }
    };

    Some(node)
}

/// [`render_field`] with the built-in [`TreeRenderer`]
pub fn render_field_tree(props: ResolvedFieldProps) -> Option<RenderNode> {
    render_field(&TreeRenderer, props)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::renderer::Widget;
    use crate::schema::{ClickHandler, Transformation};
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::Arc;

    fn widget(props: ResolvedFieldProps) -> Widget {
        match render_field_tree(props) {
            Some(RenderNode::Widget(widget)) => widget,
            other => panic!("expected a widget, got {:?}", other),
        }
    }

    #[test]
    fn test_dispatch_table() {
        let cases = [
            (FieldKind::Password, "password_input"),
            (FieldKind::Text, "text_input"),
            (FieldKind::text_multi(), "text_input"),
            (FieldKind::select(["a", "b"]), "select_input"),
            (FieldKind::checkbox(false, None), "checkbox_input"),
            (FieldKind::Rating, "rating_input"),
            (FieldKind::Number, "text_input"),
            (FieldKind::Tags, "tags_input"),
            (FieldKind::Date, "date_picker_input"),
            (FieldKind::Range, "range_input"),
        ];

        for (kind, expected) in cases {
            let type_name = kind.type_name();
            let rendered = widget(ResolvedFieldProps::new("field", kind));
            assert_eq!(rendered.widget_name(), expected, "type {}", type_name);
            assert_eq!(rendered.key(), "field");
        }
    }

    #[test]
    fn test_unrecognized_renders_nothing() {
        let props = ResolvedFieldProps::new("mystery", FieldKind::Unrecognized);
        assert!(render_field_tree(props.clone()).is_none());
        assert!(render_field_tree(props).is_none());
    }

    #[test]
    fn test_label_derived_from_name() {
        let rendered = widget(ResolvedFieldProps::new("firstName", FieldKind::Text));
        assert_eq!(rendered.common().label, "First Name");
    }

    #[test]
    fn test_explicit_label_used_verbatim() {
        let mut props = ResolvedFieldProps::new("firstName", FieldKind::Text);
        props.label = Some("Given Name".to_string());
        assert_eq!(widget(props).common().label, "Given Name");
    }

    #[test]
    fn test_text_multi_defaults_and_max_length() {
        let mut props = ResolvedFieldProps::new("bio", FieldKind::text_multi());
        props.max_length = Some(140);
        props.auto_focus = true;

        let Widget::TextInput(text) = widget(props) else {
            panic!("expected a text input");
        };
        assert_eq!(text.mode, TextMode::Multiline { rows: 5 });
        assert_eq!(text.max_length, Some(140));
        assert!(text.auto_focus);
    }

    #[test]
    fn test_single_line_text_ignores_max_length() {
        let mut props = ResolvedFieldProps::new("email", FieldKind::Text);
        props.max_length = Some(10);

        let Widget::TextInput(text) = widget(props) else {
            panic!("expected a text input");
        };
        assert_eq!(text.mode, TextMode::SingleLine);
        assert_eq!(text.max_length, None);
    }

    #[test]
    fn test_number_is_numeric_text_without_focus() {
        let mut props = ResolvedFieldProps::new("age", FieldKind::Number);
        props.auto_focus = true;

        let Widget::TextInput(text) = widget(props) else {
            panic!("expected a text input");
        };
        assert_eq!(text.mode, TextMode::Numeric);
        assert!(!text.auto_focus);
    }

    #[test]
    fn test_select_forwards_values_and_transformation() {
        let kind = FieldKind::Select {
            values: vec!["red".into(), "green".into()],
            transformation: Transformation::custom(|v| format!("<{}>", v)),
            multiple: None,
        };

        let Widget::SelectInput(select) = widget(ResolvedFieldProps::new("color", kind)) else {
            panic!("expected a select input");
        };
        assert!(!select.multiple);
        assert_eq!(
            select.options(),
            vec![
                ("red".to_string(), "<red>".to_string()),
                ("green".to_string(), "<green>".to_string()),
            ]
        );
    }

    #[test]
    fn test_checkbox_forwards_caller_state() {
        let clicked = Arc::new(AtomicBool::new(false));
        let flag = clicked.clone();
        let handler = ClickHandler::new(move || flag.store(true, Ordering::SeqCst));

        let mut props = ResolvedFieldProps::new("terms", FieldKind::checkbox(true, Some(handler)));
        props.disabled = true;

        let Widget::CheckboxInput(checkbox) = widget(props) else {
            panic!("expected a checkbox");
        };
        assert!(checkbox.checked);
        assert!(checkbox.common.disabled);

        checkbox.on_click.as_ref().unwrap().call();
        assert!(clicked.load(Ordering::SeqCst));
    }

    #[test]
    fn test_common_props_pass_through() {
        let mut props = ResolvedFieldProps::new("rating", FieldKind::Rating);
        props.required = false;
        props.placeholder = Some("pick".into());
        props.helper_text = Some("1 to 5".into());

        let rendered = widget(props);
        let common = rendered.common();
        assert!(!common.required);
        assert_eq!(common.placeholder.as_deref(), Some("pick"));
        assert_eq!(common.helper_text.as_deref(), Some("1 to 5"));
    }
}
