//! Plain-text outline of a render tree, one node per line

use std::fmt::Write;

use super::props::TextMode;
use super::renderer::{RenderNode, Widget};
use crate::schema::StackDirection;

/// Indented outline of `node`, e.g.
///
/// ```text
/// stack column
///   text_input email "Email" [required autofocus]
///   stack row key=nameGroup
///     cell first 50%
///       text_input first "First" [required]
/// ```
pub fn render_outline(node: &RenderNode) -> String {
    let mut out = String::new();
    write_node(&mut out, node, 0);
    out
}

fn write_node(out: &mut String, node: &RenderNode, depth: usize) {
    let indent = "  ".repeat(depth);
    match node {
        RenderNode::Stack {
            key,
            direction,
            spacing,
            children,
            ..
        } => {
            let direction = match direction {
                StackDirection::Column => "column",
                StackDirection::Row => "row",
            };
            let _ = write!(out, "{}stack {}", indent, direction);
            if let Some(key) = key {
                let _ = write!(out, " key={}", key);
            }
            if let Some(spacing) = spacing {
                let _ = write!(out, " spacing={}", spacing);
            }
            out.push('\n');
            for child in children {
                write_node(out, child, depth + 1);
            }
        }
        RenderNode::Cell { key, width, child } => {
            let _ = writeln!(out, "{}cell {} {}", indent, key, width);
            write_node(out, child, depth + 1);
        }
        RenderNode::Widget(widget) => {
            let _ = writeln!(out, "{}{}", indent, describe_widget(widget));
        }
    }
}

fn describe_widget(widget: &Widget) -> String {
    let common = widget.common();
    let mut line = format!("{} {} \"{}\"", widget.widget_name(), common.name, common.label);

    match widget {
        Widget::TextInput(text) => match text.mode {
            TextMode::SingleLine => {}
            TextMode::Multiline { rows } => {
                let _ = write!(line, " rows={}", rows);
            }
            TextMode::Numeric => line.push_str(" numeric"),
        },
        Widget::SelectInput(select) => {
            let labels: Vec<String> = select.options().into_iter().map(|(_, label)| label).collect();
            let _ = write!(line, " options=[{}]", labels.join(", "));
            if select.multiple {
                line.push_str(" multiple");
            }
        }
        Widget::CheckboxInput(checkbox) => {
            let _ = write!(line, " checked={}", checkbox.checked);
        }
        _ => {}
    }

    let mut flags = Vec::new();
    if common.required {
        flags.push("required");
    }
    if common.disabled {
        flags.push("disabled");
    }
    if widget.auto_focus() {
        flags.push("autofocus");
    }
    if !flags.is_empty() {
        let _ = write!(line, " [{}]", flags.join(" "));
    }
    if let Some(placeholder) = &common.placeholder {
        let _ = write!(line, " placeholder=\"{}\"", placeholder);
    }
    if let Some(helper_text) = &common.helper_text {
        let _ = write!(line, " help=\"{}\"", helper_text);
    }

    line
}
