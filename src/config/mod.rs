use config::{Config, File};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub mod form;
pub mod validator;

pub use form::{FormCatalog, FormDefinition, FormFileFormat};
pub use validator::{SchemaValidator, ValidationError};

use crate::cli::Cli;

/// How rendered forms are printed
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize, Serialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Indented plain-text tree
    #[default]
    Outline,
    /// Render tree as pretty-printed JSON
    Json,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct Settings {
    pub forms: FormsSettings,
    pub render: RenderSettings,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct FormsSettings {
    /// Directory scanned for form definition files
    pub dir: PathBuf,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct RenderSettings {
    pub format: OutputFormat,
    /// Refuse to render forms that fail the schema lint
    #[serde(default)]
    pub strict: bool,
}

impl Settings {
    pub fn new() -> Result<Self, anyhow::Error> {
        Self::from_file(Path::new("fieldset.toml"))
    }

    /// Create settings from CLI arguments (config file plus CLI overrides)
    pub fn new_with_cli(cli: &Cli) -> Result<Self, anyhow::Error> {
        let mut settings = Self::from_file(&cli.config)?;

        // CLI > env vars > config file
        settings.apply_cli_overrides(cli);

        Ok(settings)
    }

    /// Load settings from `path`; a missing file means all defaults.
    ///
    /// A relative `forms.dir` is taken relative to the file's directory.
    pub fn from_file(path: &Path) -> Result<Self, anyhow::Error> {
        let s = Config::builder()
            .add_source(File::from(path.to_path_buf()).required(false))
            .set_default("forms.dir", "forms")?
            .set_default("render.format", "outline")?
            .set_default("render.strict", false)?
            .build()?;

        let mut settings: Settings = s.try_deserialize()?;

        if settings.forms.dir.is_relative() {
            if let Some(root) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                settings.forms.dir = root.join(&settings.forms.dir);
            }
        }

        Ok(settings)
    }

    fn apply_cli_overrides(&mut self, cli: &Cli) {
        if let Some(dir) = &cli.forms_dir {
            self.forms.dir = dir.clone();
        }
    }

    /// Load the form catalog from the configured directory
    pub fn load_forms(&self) -> Result<FormCatalog, anyhow::Error> {
        Ok(FormCatalog::load_dir(&self.forms.dir)?)
    }
}
