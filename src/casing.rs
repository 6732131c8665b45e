//! Name-to-label string transformation
//!
//! Turns programmatic identifiers ("firstName", "postal_code") into
//! display strings. Used for derived field labels and for the named
//! option transformations of select fields.

use convert_case::{Case, Casing};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Output style for [`transform_string`]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LabelCase {
    /// Leave the input untouched
    #[serde(alias = "none")]
    Identity,
    /// Capitalized words separated by spaces: "firstName" -> "First Name"
    #[default]
    Pascal,
    /// Same output as `Pascal`, kept as a separate name for schema files
    Title,
    /// First word capitalized, rest lowercase: "firstName" -> "First name"
    Sentence,
    /// "firstName" -> "FIRST NAME"
    Upper,
    /// "firstName" -> "first name"
    Lower,
    /// "first_name" -> "firstName"
    Camel,
    /// "firstName" -> "first_name"
    Snake,
    /// "firstName" -> "first-name"
    Kebab,
}

impl LabelCase {
    /// Schema-file spelling of this case
    pub fn as_str(&self) -> &'static str {
        match self {
            LabelCase::Identity => "identity",
            LabelCase::Pascal => "pascal",
            LabelCase::Title => "title",
            LabelCase::Sentence => "sentence",
            LabelCase::Upper => "upper",
            LabelCase::Lower => "lower",
            LabelCase::Camel => "camel",
            LabelCase::Snake => "snake",
            LabelCase::Kebab => "kebab",
        }
    }

    /// Parse a schema-file spelling, case-insensitively
    pub fn parse(s: &str) -> Option<Self> {
        let case = match s.trim().to_ascii_lowercase().as_str() {
            "identity" | "none" => LabelCase::Identity,
            "pascal" => LabelCase::Pascal,
            "title" => LabelCase::Title,
            "sentence" => LabelCase::Sentence,
            "upper" => LabelCase::Upper,
            "lower" => LabelCase::Lower,
            "camel" => LabelCase::Camel,
            "snake" => LabelCase::Snake,
            "kebab" => LabelCase::Kebab,
            _ => return None,
        };
        Some(case)
    }
}

impl fmt::Display for LabelCase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Transform `raw` into the requested case.
///
/// Word boundaries are detected on lower-to-upper transitions, underscores,
/// hyphens, spaces and digit/letter changes. Deterministic and pure.
pub fn transform_string(raw: &str, style: LabelCase) -> String {
    match style {
        LabelCase::Identity => raw.to_string(),
        LabelCase::Pascal | LabelCase::Title => raw.to_case(Case::Title),
        LabelCase::Sentence => raw.to_case(Case::Sentence),
        LabelCase::Upper => raw.to_case(Case::Upper),
        LabelCase::Lower => raw.to_case(Case::Lower),
        LabelCase::Camel => raw.to_case(Case::Camel),
        LabelCase::Snake => raw.to_case(Case::Snake),
        LabelCase::Kebab => raw.to_case(Case::Kebab),
    }
}
