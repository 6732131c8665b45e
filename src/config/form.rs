//! Form definition files
//!
//! A form definition bundles a schema with its form-wide defaults. Files
//! are JSON, YAML or TOML, picked by extension, and live in the forms
//! directory configured in [`Settings`](super::Settings).

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

use crate::error::FormError;
use crate::render::{render_form, RenderNode};
use crate::schema::{FieldGroupConfig, FormSchema};

/// Supported form file encodings
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FormFileFormat {
    Json,
    Yaml,
    Toml,
}

impl FormFileFormat {
    /// Format for a path, by extension
    pub fn from_path(path: &Path) -> Option<Self> {
        match path.extension().and_then(|e| e.to_str()) {
            Some("json") => Some(FormFileFormat::Json),
            Some("yaml") | Some("yml") => Some(FormFileFormat::Yaml),
            Some("toml") => Some(FormFileFormat::Toml),
            _ => None,
        }
    }
}

/// A named form: schema plus form-wide defaults
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct FormDefinition {
    /// Falls back to the file stem when empty
    #[serde(default)]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(flatten)]
    pub config: FieldGroupConfig,
    #[serde(default)]
    pub fields: FormSchema,
}

impl FormDefinition {
    pub fn new(name: impl Into<String>, config: FieldGroupConfig, fields: FormSchema) -> Self {
        Self {
            name: name.into(),
            description: None,
            config,
            fields,
        }
    }

    /// Parse a definition from text in the given format
    pub fn parse(content: &str, format: FormFileFormat) -> Result<Self, String> {
        match format {
            FormFileFormat::Json => serde_json::from_str(content).map_err(|e| e.to_string()),
            FormFileFormat::Yaml => serde_yaml::from_str(content).map_err(|e| e.to_string()),
            FormFileFormat::Toml => toml::from_str(content).map_err(|e| e.to_string()),
        }
    }

    /// Load a definition from a file
    pub fn from_path(path: &Path) -> Result<Self, FormError> {
        let format =
            FormFileFormat::from_path(path).ok_or_else(|| FormError::UnsupportedFormat(path.to_path_buf()))?;
        let content = std::fs::read_to_string(path).map_err(|source| FormError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let mut form = Self::parse(&content, format).map_err(|e| FormError::parse(path, e))?;
        if form.name.is_empty() {
            form.name = path
                .file_stem()
                .and_then(|s| s.to_str())
                .unwrap_or_default()
                .to_string();
        }
        Ok(form)
    }

    /// Number of leaf fields across all entries
    pub fn field_count(&self) -> usize {
        self.fields.iter().map(|entry| entry.leaves().len()).sum()
    }

    /// Render with the built-in tree renderer
    pub fn render(&self) -> RenderNode {
        render_form(&self.config, &self.fields)
    }
}

/// All form definitions found in a directory
#[derive(Clone, Debug, Default)]
pub struct FormCatalog {
    forms: Vec<FormDefinition>,
}

impl FormCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load every `*.json`, `*.yaml`, `*.yml` and `*.toml` file in `dir`.
    ///
    /// A missing directory yields an empty catalog. Files are read in
    /// path order; a later file replaces an earlier form with the same name.
    pub fn load_dir(dir: &Path) -> Result<Self, FormError> {
        let mut catalog = Self::new();
        if !dir.is_dir() {
            tracing::debug!(dir = %dir.display(), "forms directory does not exist");
            return Ok(catalog);
        }

        let pattern = format!("{}/*", dir.display());
        for entry in glob::glob(&pattern)? {
            match entry {
                Ok(path) => {
                    if FormFileFormat::from_path(&path).is_none() {
                        continue;
                    }
                    let form = FormDefinition::from_path(&path)?;
                    tracing::debug!(form = %form.name, path = %path.display(), "loaded form definition");
                    catalog.insert(form);
                }
                Err(e) => tracing::warn!("Failed to read glob entry: {}", e),
            }
        }

        tracing::info!(dir = %dir.display(), forms = catalog.len(), "loaded form catalog");
        Ok(catalog)
    }

    /// Add a form, replacing any form with the same name
    pub fn insert(&mut self, form: FormDefinition) {
        Self::merge_vec_by_key(&mut self.forms, vec![form], |f| f.name.clone());
    }

    /// Merge another catalog into this one; `other` wins on name clashes
    pub fn merge(&mut self, other: FormCatalog) {
        Self::merge_vec_by_key(&mut self.forms, other.forms, |f| f.name.clone());
    }

    pub fn get(&self, name: &str) -> Option<&FormDefinition> {
        self.forms.iter().find(|f| f.name == name)
    }

    pub fn forms(&self) -> &[FormDefinition] {
        &self.forms
    }

    pub fn len(&self) -> usize {
        self.forms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.forms.is_empty()
    }

    /// Look up `name_or_path` as a form file first, then as a form name
    pub fn resolve(&self, name_or_path: &str) -> Result<FormDefinition, FormError> {
        let path = Path::new(name_or_path);
        if path.is_file() {
            return FormDefinition::from_path(path);
        }
        self.get(name_or_path)
            .cloned()
            .ok_or_else(|| FormError::NotFound(name_or_path.to_string()))
    }

    fn merge_vec_by_key<T, K, F>(base: &mut Vec<T>, other: Vec<T>, key_fn: F)
    where
        K: Eq + std::hash::Hash,
        F: Fn(&T) -> K,
    {
        let mut key_to_index: HashMap<K, usize> = HashMap::new();
        for (i, item) in base.iter().enumerate() {
            key_to_index.insert(key_fn(item), i);
        }

        for item in other {
            let key = key_fn(&item);
            if let Some(&idx) = key_to_index.get(&key) {
                base[idx] = item;
            } else {
                key_to_index.insert(key, base.len());
                base.push(item);
            }
        }
    }
}
