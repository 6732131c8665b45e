//! Error types for loading form definitions

use std::path::PathBuf;
use thiserror::Error;

use crate::config::validator::ValidationError;

/// Errors raised while loading or checking form definitions.
///
/// Rendering itself never fails; these only come from the file and
/// lint layers around it.
#[derive(Debug, Error)]
pub enum FormError {
    /// Reading a form file failed
    #[error("Failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// File extension is not json, yaml, yml or toml
    #[error("Unsupported form file format: {}", .0.display())]
    UnsupportedFormat(PathBuf),

    /// Form file content could not be deserialized
    #[error("Failed to parse {}: {message}", .path.display())]
    Parse { path: PathBuf, message: String },

    /// No form with this name or path
    #[error("Form not found: '{0}'")]
    NotFound(String),

    /// Strict mode rejected a form
    #[error("Form '{form}' failed validation with {} issue(s)", .issues.len())]
    Invalid {
        form: String,
        issues: Vec<ValidationError>,
    },

    /// `check` found issues; `report` is the full per-form listing
    #[error("{failed} form(s) failed validation")]
    CheckFailed { failed: usize, report: String },

    /// Bad forms directory pattern
    #[error("Invalid forms directory pattern: {0}")]
    Pattern(#[from] glob::PatternError),
}

impl FormError {
    pub(crate) fn parse(path: impl Into<PathBuf>, err: impl std::fmt::Display) -> Self {
        FormError::Parse {
            path: path.into(),
            message: err.to_string(),
        }
    }
}
