//! Declarative form schema
//!
//! Field descriptors, groups and the form-wide defaults that the
//! layout resolver merges into each field.

pub mod defaults;
pub mod field;

pub use defaults::*;
pub use field::*;
