//! Widget and layout constructors
//!
//! [`Renderer`] is the seam between the resolver and whatever draws the
//! form. [`TreeRenderer`] is the built-in implementation: it produces a
//! serializable [`RenderNode`] description of the form.

use serde::Serialize;
use serde_json::{Map, Value};

use super::props::*;
use crate::schema::{StackDirection, StackOptions};

/// One cell of a horizontal group row
#[derive(Clone, Debug)]
pub struct Cell<N> {
    /// Name of the field inside the cell
    pub key: String,
    pub width: Percent,
    pub child: N,
}

/// Constructors for the leaf widgets and the two layout primitives.
///
/// Implementations must be pure with respect to the resolver: it calls
/// them once per field per render pass and never caches the result.
pub trait Renderer {
    type Node;

    fn password_input(&self, props: PasswordInputProps) -> Self::Node;

    /// Single-line, multiline and numeric text boxes
    fn text_input(&self, props: TextInputProps) -> Self::Node;

    fn select_input(&self, props: SelectInputProps) -> Self::Node;

    fn checkbox_input(&self, props: CheckboxInputProps) -> Self::Node;

    fn rating_input(&self, props: CommonProps) -> Self::Node;

    fn tags_input(&self, props: CommonProps) -> Self::Node;

    fn date_picker_input(&self, props: CommonProps) -> Self::Node;

    fn range_input(&self, props: CommonProps) -> Self::Node;

    /// Horizontal sub-row of a group, keyed by the group name
    fn row(&self, key: &str, cells: Vec<Cell<Self::Node>>) -> Self::Node;

    /// Outer vertical stack of the whole form
    fn column(&self, options: &StackOptions, children: Vec<Self::Node>) -> Self::Node;
}

// ============================================================================
// Render tree
// ============================================================================

/// Instantiated leaf widget with its props
#[derive(Clone, Debug, Serialize)]
#[serde(tag = "widget", rename_all = "snake_case")]
pub enum Widget {
    PasswordInput(PasswordInputProps),
    TextInput(TextInputProps),
    SelectInput(SelectInputProps),
    CheckboxInput(CheckboxInputProps),
    RatingInput(CommonProps),
    TagsInput(CommonProps),
    DatePickerInput(CommonProps),
    RangeInput(CommonProps),
}

impl Widget {
    pub fn common(&self) -> &CommonProps {
        match self {
            Widget::PasswordInput(props) => &props.common,
            Widget::TextInput(props) => &props.common,
            Widget::SelectInput(props) => &props.common,
            Widget::CheckboxInput(props) => &props.common,
            Widget::RatingInput(common)
            | Widget::TagsInput(common)
            | Widget::DatePickerInput(common)
            | Widget::RangeInput(common) => common,
        }
    }

    /// Stable identity of the widget
    pub fn key(&self) -> &str {
        &self.common().name
    }

    pub fn widget_name(&self) -> &'static str {
        match self {
            Widget::PasswordInput(_) => "password_input",
            Widget::TextInput(_) => "text_input",
            Widget::SelectInput(_) => "select_input",
            Widget::CheckboxInput(_) => "checkbox_input",
            Widget::RatingInput(_) => "rating_input",
            Widget::TagsInput(_) => "tags_input",
            Widget::DatePickerInput(_) => "date_picker_input",
            Widget::RangeInput(_) => "range_input",
        }
    }

    /// Whether the widget received initial focus
    pub fn auto_focus(&self) -> bool {
        match self {
            Widget::PasswordInput(props) => props.auto_focus,
            Widget::TextInput(props) => props.auto_focus,
            _ => false,
        }
    }
}

/// Description of a rendered form
#[derive(Clone, Debug, Serialize)]
#[serde(tag = "node", rename_all = "snake_case")]
pub enum RenderNode {
    Stack {
        #[serde(skip_serializing_if = "Option::is_none")]
        key: Option<String>,
        direction: StackDirection,
        #[serde(skip_serializing_if = "Option::is_none")]
        spacing: Option<f64>,
        #[serde(skip_serializing_if = "Map::is_empty")]
        extra: Map<String, Value>,
        children: Vec<RenderNode>,
    },
    Cell {
        key: String,
        width: Percent,
        child: Box<RenderNode>,
    },
    Widget(Widget),
}

impl RenderNode {
    pub fn key(&self) -> Option<&str> {
        match self {
            RenderNode::Stack { key, .. } => key.as_deref(),
            RenderNode::Cell { key, .. } => Some(key),
            RenderNode::Widget(widget) => Some(widget.key()),
        }
    }

    pub fn children(&self) -> &[RenderNode] {
        match self {
            RenderNode::Stack { children, .. } => children,
            RenderNode::Cell { child, .. } => std::slice::from_ref(child.as_ref()),
            RenderNode::Widget(_) => &[],
        }
    }

    pub fn as_widget(&self) -> Option<&Widget> {
        match self {
            RenderNode::Widget(widget) => Some(widget),
            _ => None,
        }
    }

    /// All widgets below this node in document order
    pub fn widgets(&self) -> Vec<&Widget> {
        let mut out = Vec::new();
        self.collect_widgets(&mut out);
        out
    }

    fn collect_widgets<'a>(&'a self, out: &mut Vec<&'a Widget>) {
        match self {
            RenderNode::Widget(widget) => out.push(widget),
            _ => {
                for child in self.children() {
                    child.collect_widgets(out);
                }
            }
        }
    }
}

/// Renderer producing [`RenderNode`] trees
#[derive(Clone, Copy, Debug, Default)]
pub struct TreeRenderer;

impl Renderer for TreeRenderer {
    type Node = RenderNode;

    fn password_input(&self, props: PasswordInputProps) -> RenderNode {
        RenderNode::Widget(Widget::PasswordInput(props))
    }

    fn text_input(&self, props: TextInputProps) -> RenderNode {
        RenderNode::Widget(Widget::TextInput(props))
    }

    fn select_input(&self, props: SelectInputProps) -> RenderNode {
        RenderNode::Widget(Widget::SelectInput(props))
    }

    fn checkbox_input(&self, props: CheckboxInputProps) -> RenderNode {
        RenderNode::Widget(Widget::CheckboxInput(props))
    }

    fn rating_input(&self, props: CommonProps) -> RenderNode {
        RenderNode::Widget(Widget::RatingInput(props))
    }

    fn tags_input(&self, props: CommonProps) -> RenderNode {
        RenderNode::Widget(Widget::TagsInput(props))
    }

    fn date_picker_input(&self, props: CommonProps) -> RenderNode {
        RenderNode::Widget(Widget::DatePickerInput(props))
    }

    fn range_input(&self, props: CommonProps) -> RenderNode {
        RenderNode::Widget(Widget::RangeInput(props))
    }

    fn row(&self, key: &str, cells: Vec<Cell<RenderNode>>) -> RenderNode {
        let children = cells
            .into_iter()
            .map(|cell| RenderNode::Cell {
                key: cell.key,
                width: cell.width,
                child: Box::new(cell.child),
            })
            .collect();

        RenderNode::Stack {
            key: Some(key.to_string()),
            direction: StackDirection::Row,
            spacing: Some(1.0),
            extra: Map::new(),
            children,
        }
    }

    fn column(&self, options: &StackOptions, children: Vec<RenderNode>) -> RenderNode {
        RenderNode::Stack {
            key: None,
            direction: options.direction,
            spacing: options.spacing,
            extra: options.extra.clone(),
            children,
        }
    }
}
