//! Output generators
//!
//! Each target format has its own module with a `render` function over a
//! [`TokenDocument`]. Output is deterministic: groups are written in
//! category order, tokens and modes in document order, and nothing depends
//! on the clock or the environment.
//!
//! Naming is shared by every target: a token `primary` in `colors` becomes
//! `<prefix>-color-primary`, its foreground `<prefix>-color-primary-foreground`.

mod css;
mod dtcg;
mod js;
mod json;
mod options;
mod scss;
mod tailwind;
mod typescript;

use std::fmt::{Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::debug;

pub use options::{GeneratorOptions, ModeSelector};

use crate::error::GeneratorError;
use crate::tokens::units::apply_default_unit;
use crate::tokens::{ColorValue, TokenCategory, TokenDocument, TokenSet};

/// Supported output formats
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// CSS custom properties
    Css,
    /// Tailwind `theme.extend` config
    Tailwind,
    /// SCSS variables
    Scss,
    /// Canonical LDL JSON
    Json,
    /// Typed `as const` object
    TypeScript,
    /// W3C design tokens
    Dtcg,
}

impl OutputFormat {
    pub fn all() -> &'static [OutputFormat] {
        const FORMATS: [OutputFormat; 6] = [
            OutputFormat::Css,
            OutputFormat::Tailwind,
            OutputFormat::Scss,
            OutputFormat::Json,
            OutputFormat::TypeScript,
            OutputFormat::Dtcg,
        ];
        &FORMATS
    }

    pub fn id(self) -> &'static str {
        match self {
            Self::Css => "css",
            Self::Tailwind => "tailwind",
            Self::Scss => "scss",
            Self::Json => "json",
            Self::TypeScript => "typescript",
            Self::Dtcg => "dtcg",
        }
    }

    /// Suggested file name for the output
    pub fn filename(self) -> &'static str {
        match self {
            Self::Css => "tokens.css",
            Self::Tailwind => "tailwind.config.js",
            Self::Scss => "_tokens.scss",
            Self::Json => "tokens.json",
            Self::TypeScript => "tokens.ts",
            Self::Dtcg => "tokens.dtcg.json",
        }
    }

    pub fn language(self) -> Language {
        match self {
            Self::Css => Language::Css,
            Self::Tailwind => Language::JavaScript,
            Self::Scss => Language::Scss,
            Self::Json | Self::Dtcg => Language::Json,
            Self::TypeScript => Language::TypeScript,
        }
    }
}

impl Display for OutputFormat {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for OutputFormat {
    type Err = GeneratorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "css" => Ok(Self::Css),
            "tailwind" | "javascript" | "js" => Ok(Self::Tailwind),
            "scss" | "sass" => Ok(Self::Scss),
            "json" | "ldl" => Ok(Self::Json),
            "typescript" | "ts" => Ok(Self::TypeScript),
            "dtcg" | "w3c" => Ok(Self::Dtcg),
            _ => Err(GeneratorError::UnsupportedFormat(s.to_string())),
        }
    }
}

/// Language of generated code
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    Css,
    JavaScript,
    Scss,
    Json,
    TypeScript,
}

impl Display for Language {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Language::Css => write!(f, "css"),
            Language::JavaScript => write!(f, "javascript"),
            Language::Scss => write!(f, "scss"),
            Language::Json => write!(f, "json"),
            Language::TypeScript => write!(f, "typescript"),
        }
    }
}

/// Generated code with its suggested file name
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct GeneratorResult {
    pub code: String,
    pub language: Language,
    pub filename: String,
}

/// Generate `format` output for a document
pub fn generate(
    document: &TokenDocument,
    format: OutputFormat,
    options: &GeneratorOptions,
) -> Result<GeneratorResult, GeneratorError> {
    debug!(%format, tokens = document.token_count(), modes = document.modes.len(), "generating tokens");
    let code = match format {
        OutputFormat::Css => css::render(document, options),
        OutputFormat::Tailwind => tailwind::render(document, options),
        OutputFormat::Scss => scss::render(document, options),
        OutputFormat::Json => json::render(document)?,
        OutputFormat::TypeScript => typescript::render(document, options),
        OutputFormat::Dtcg => dtcg::render(document)?,
    };
    Ok(GeneratorResult {
        code,
        language: format.language(),
        filename: format.filename().to_string(),
    })
}

/// Generate output for a format given by name (`css`, `tailwind`, ...)
pub fn generate_named(
    document: &TokenDocument,
    format: &str,
    options: &GeneratorOptions,
) -> Result<GeneratorResult, GeneratorError> {
    generate(document, format.parse()?, options)
}

pub fn to_css(document: &TokenDocument, options: &GeneratorOptions) -> String {
    css::render(document, options)
}

pub fn to_tailwind(document: &TokenDocument, options: &GeneratorOptions) -> String {
    tailwind::render(document, options)
}

pub fn to_scss(document: &TokenDocument, options: &GeneratorOptions) -> String {
    scss::render(document, options)
}

pub fn to_typescript(document: &TokenDocument, options: &GeneratorOptions) -> String {
    typescript::render(document, options)
}

pub fn to_json(document: &TokenDocument) -> Result<String, GeneratorError> {
    json::render(document)
}

/// Escape a name for use inside a CSS or SCSS identifier
pub(crate) fn css_ident(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    for c in name.chars() {
        if c.is_ascii_alphanumeric() || c == '-' || c == '_' || !c.is_ascii() {
            out.push(c);
        } else {
            out.push('\\');
            out.push(c);
        }
    }
    out
}

/// `<prefix>-<slug>-<name>`, without the leading `--` or `$`
fn identifier(options: &GeneratorOptions, scope: &[&str], category: TokenCategory, name: &str) -> String {
    let mut parts: Vec<&str> = Vec::with_capacity(scope.len() + 3);
    if !options.prefix.is_empty() {
        parts.push(&options.prefix);
    }
    parts.extend_from_slice(scope);
    parts.push(category.slug());
    parts.push(name);
    css_ident(&parts.join("-"))
}

/// Scalar value as emitted, with the default unit applied to bare numbers.
fn scalar_output(options: &GeneratorOptions, category: TokenCategory, value: &str) -> String {
    match options.default_unit(category) {
        Some((kind, unit)) => apply_default_unit(value, kind, unit),
        None => value.to_string(),
    }
}

/// Color value as a CSS expression; references become `var(...)`
fn color_var(options: &GeneratorOptions, value: &ColorValue) -> String {
    match value {
        ColorValue::Literal(literal) => literal.clone(),
        ColorValue::Reference(name) => format!(
            "var(--{})",
            identifier(options, &[], TokenCategory::Colors, name)
        ),
    }
}

/// Color value resolved to a literal when the reference chain allows it
fn color_literal(options: &GeneratorOptions, scope: &TokenSet, value: &ColorValue) -> String {
    match scope.resolve_value(value) {
        Some(literal) => literal.to_string(),
        None => color_var(options, value),
    }
}

fn header_text(document: &TokenDocument) -> String {
    match &document.name {
        Some(name) => format!("{name} design tokens. Generated by ldl, do not edit."),
        None => "Design tokens. Generated by ldl, do not edit.".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tokens::ColorToken;
    use pretty_assertions::assert_eq;

    #[test]
    fn parses_format_names() {
        assert_eq!("CSS".parse::<OutputFormat>().unwrap(), OutputFormat::Css);
        assert_eq!("ts".parse::<OutputFormat>().unwrap(), OutputFormat::TypeScript);
        assert!(matches!(
            "xml".parse::<OutputFormat>(),
            Err(GeneratorError::UnsupportedFormat(name)) if name == "xml"
        ));
    }

    #[test]
    fn unsupported_format_fails_the_call() {
        let doc = TokenDocument::new().with_color("primary", ColorToken::literal("#36f"));
        let err = generate_named(&doc, "xml", &GeneratorOptions::default()).unwrap_err();
        assert_eq!(err.to_string(), "unsupported output format `xml`");
    }

    #[test]
    fn results_carry_language_and_filename() {
        let doc = TokenDocument::new();
        for format in OutputFormat::all() {
            let result = generate(&doc, *format, &GeneratorOptions::default()).unwrap();
            assert_eq!(result.filename, format.filename());
            assert_eq!(result.language, format.language());
        }
    }

    #[test]
    fn builds_identifiers() {
        let options = GeneratorOptions::default();
        assert_eq!(
            identifier(&options, &[], TokenCategory::FontSizes, "sm"),
            "ldl-font-size-sm"
        );
        assert_eq!(
            identifier(&options.clone().with_prefix(""), &["dark"], TokenCategory::Spacing, "0.5"),
            "dark-spacing-0\\.5"
        );
    }
}
