//! Schema resolution and widget dispatch
//!
//! - [`layout`]: resolves defaults, expands groups, picks autofocus
//! - [`dispatch`]: maps one resolved field to its widget
//! - [`renderer`]: the widget/layout constructor seam and the built-in tree
//! - [`outline`]: text dump of a render tree

pub mod dispatch;
pub mod layout;
pub mod outline;
pub mod props;
pub mod renderer;

pub use dispatch::{render_field, render_field_tree, resolve_label};
pub use layout::*;
pub use outline::render_outline;
pub use props::*;
pub use renderer::*;
