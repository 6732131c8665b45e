use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::config::OutputFormat;

/// Render declarative form schemas into widget trees
#[derive(Parser, Debug, Clone)]
#[command(name = "fieldset", version, about, long_about = None)]
pub struct Cli {
    /// Path to the configuration file
    #[arg(short, long, env = "FIELDSET_CONFIG", default_value = "fieldset.toml")]
    pub config: PathBuf,

    /// Directory containing form definitions (overrides forms.dir)
    #[arg(long, env = "FIELDSET_FORMS_DIR")]
    pub forms_dir: Option<PathBuf>,

    /// Log filter used when RUST_LOG is not set
    #[arg(long, env = "FIELDSET_LOG", default_value = "warn")]
    pub log_level: String,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Render one form
    Render {
        /// Form name from the forms directory, or a path to a form file
        form: String,

        /// Output format (overrides render.format)
        #[arg(short, long, value_enum)]
        format: Option<OutputFormat>,

        /// Render every field disabled
        #[arg(long)]
        disabled: bool,

        /// Fail instead of warning when the form has lint issues
        #[arg(long)]
        strict: bool,
    },
    /// Lint forms; all forms when none are named
    Check {
        forms: Vec<String>,
    },
    /// List the forms in the forms directory
    List,
}
