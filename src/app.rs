//! Command implementations behind the `fieldset` binary

use anyhow::Context;
use std::fmt::Write;

use crate::cli::{Cli, Command};
use crate::config::{FormCatalog, FormDefinition, OutputFormat, SchemaValidator, Settings, ValidationError};
use crate::error::FormError;
use crate::render::render_outline;

/// Lint result for one form
#[derive(Debug)]
pub struct FormReport {
    pub form: String,
    pub issues: Vec<ValidationError>,
}

/// Run the parsed command line and return what should be printed.
///
/// A failing `check` returns [`FormError::CheckFailed`] carrying the report.
pub fn run(cli: &Cli) -> anyhow::Result<String> {
    let settings = Settings::new_with_cli(cli)?;
    let catalog = settings
        .load_forms()
        .with_context(|| format!("loading forms from {}", settings.forms.dir.display()))?;

    match &cli.command {
        Command::Render {
            form,
            format,
            disabled,
            strict,
        } => {
            let format = format.unwrap_or(settings.render.format);
            let strict = *strict || settings.render.strict;
            render_command(&catalog, form, format, *disabled, strict)
        }
        Command::Check { forms } => {
            let reports = check_command(&catalog, forms)?;
            let output = format_reports(&reports);
            let failed = reports.iter().filter(|r| !r.issues.is_empty()).count();
            if failed > 0 {
                return Err(FormError::CheckFailed {
                    failed,
                    report: output,
                }
                .into());
            }
            Ok(output)
        }
        Command::List => Ok(list_command(&catalog)),
    }
}

/// Resolve and render one form.
///
/// Lint issues are logged; in strict mode they abort the render.
pub fn render_command(
    catalog: &FormCatalog,
    form: &str,
    format: OutputFormat,
    disabled: bool,
    strict: bool,
) -> anyhow::Result<String> {
    let mut definition = catalog.resolve(form)?;

    if let Err(issues) = SchemaValidator::validate(&definition) {
        if strict {
            return Err(FormError::Invalid {
                form: definition.name.clone(),
                issues,
            }
            .into());
        }
        for issue in &issues {
            tracing::warn!(form = %definition.name, "{}", issue);
        }
    }

    if disabled {
        definition.config.is_disabled = true;
    }

    let tree = definition.render();
    let output = match format {
        OutputFormat::Outline => render_outline(&tree),
        OutputFormat::Json => {
            let mut json = serde_json::to_string_pretty(&tree).context("serializing render tree")?;
            json.push('\n');
            json
        }
    };

    Ok(output)
}

/// Lint the named forms, or every form in the catalog when `forms` is empty
pub fn check_command(catalog: &FormCatalog, forms: &[String]) -> anyhow::Result<Vec<FormReport>> {
    let definitions: Vec<FormDefinition> = if forms.is_empty() {
        catalog.forms().to_vec()
    } else {
        forms
            .iter()
            .map(|form| catalog.resolve(form))
            .collect::<Result<_, _>>()?
    };

    Ok(definitions
        .iter()
        .map(|definition| FormReport {
            form: definition.name.clone(),
            issues: SchemaValidator::validate(definition).err().unwrap_or_default(),
        })
        .collect())
}

/// One line per lint report
pub fn format_reports(reports: &[FormReport]) -> String {
    let mut out = String::new();
    for report in reports {
        if report.issues.is_empty() {
            let _ = writeln!(out, "{}: ok", report.form);
        } else {
            let _ = writeln!(out, "{}: {} issue(s)", report.form, report.issues.len());
            for issue in &report.issues {
                let _ = writeln!(out, "  - {}", issue);
            }
        }
    }
    out
}

/// Form names with their leaf field counts
pub fn list_command(catalog: &FormCatalog) -> String {
    let mut out = String::new();
    for form in catalog.forms() {
        let _ = write!(out, "{} ({} fields)", form.name, form.field_count());
        if let Some(description) = &form.description {
            let _ = write!(out, " - {}", description);
        }
        out.push('\n');
    }
    out
}
