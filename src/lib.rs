//! # Fieldset - declarative form rendering
//!
//! Fieldset turns a typed form schema into a tree of input widgets. Each
//! field's label, placeholder, helper text, required and disabled state
//! are resolved from per-field overrides and form-wide defaults; groups
//! become horizontal rows of proportionally sized cells.
//!
//! ## Quick Start
//!
//! ```rust
//! use fieldset::render::render_form;
//! use fieldset::schema::{FieldDescriptor, FieldGroup, FieldGroupConfig, FormDefaults, SchemaEntry};
//!
//! let schema: Vec<SchemaEntry> = vec![
//!     FieldDescriptor::text("email").into(),
//!     FieldGroup::new(
//!         "nameGroup",
//!         vec![FieldDescriptor::text("first"), FieldDescriptor::text("last")],
//!     )
//!     .into(),
//! ];
//! let config = FieldGroupConfig::new(FormDefaults::new().with_optional("last"));
//!
//! let tree = render_form(&config, &schema);
//! assert_eq!(tree.widgets().len(), 3);
//! ```
//!
//! ## Architecture
//!
//! - **Schema**: field descriptors, groups and form-wide defaults
//! - **Render**: layout resolution, field dispatch and the [`render::Renderer`] seam
//! - **Config**: settings, form definition files and the schema lint
//! - **App**: the commands behind the `fieldset` binary

pub mod app;
pub mod casing;
pub mod cli;
pub mod config;
pub mod error;
pub mod render;
pub mod schema;

pub use casing::{transform_string, LabelCase};
pub use error::FormError;
pub use render::{render_field, render_field_group, render_form, RenderNode, Renderer, TreeRenderer};
pub use schema::{FieldDescriptor, FieldGroup, FieldGroupConfig, FieldKind, FormDefaults, FormSchema, SchemaEntry};
