//! Token document parser
//!
//! One entry point over four dialects. Each dialect has its own converter
//! module; [`parse`] picks one from the format hint or the detector and
//! falls back to trying them all in priority order.
//!
//! Parsing is permissive: anything that can be placed in the model is kept,
//! anything that cannot is dropped with a [`ParseWarning`]. Semantic checks
//! (references, names, units) belong to the validator.

mod dtcg;
mod figma;
mod ldl;
mod support;
mod tokens_studio;

use std::fmt::{Display, Formatter};

use serde_json::Value;
use tracing::debug;

use crate::detect::{detect_format, InputFormat};
use crate::error::ParseError;
use crate::raw::RawInput;
use crate::tokens::TokenDocument;
use support::Warnings;

/// A recoverable problem found while converting input
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseWarning {
    /// Dotted locator into the input
    pub path: String,
    pub message: String,
}

impl Display for ParseWarning {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        if self.path.is_empty() {
            write!(f, "{}", self.message)
        } else {
            write!(f, "{}: {}", self.path, self.message)
        }
    }
}

/// Result of a successful parse
#[derive(Debug, Clone, PartialEq)]
pub struct ParseResult {
    pub document: TokenDocument,
    /// Dialect the document was read as
    pub format: InputFormat,
    pub warnings: Vec<ParseWarning>,
}

/// Parse raw input into a token document.
///
/// With `hint`, the input is read as that dialect only. Without it the
/// detector decides; when detection is inconclusive every dialect is tried
/// in [`InputFormat::known`] order and the first one that yields at least
/// one token wins.
pub fn parse<'a>(
    raw: impl Into<RawInput<'a>>,
    hint: Option<InputFormat>,
) -> Result<ParseResult, ParseError> {
    let value = raw.into().to_value()?;
    if !value.is_object() {
        return Err(ParseError::InvalidInput(
            "token documents must be objects at the root".to_string(),
        ));
    }

    let format = match hint {
        Some(format) if format != InputFormat::Unknown => format,
        _ => detect_format(&value),
    };
    if format != InputFormat::Unknown {
        return convert(format, &value);
    }

    for candidate in InputFormat::known() {
        match convert(*candidate, &value) {
            Ok(result) if result.document.has_tokens() => {
                debug!(format = %candidate, "parsed by fallback");
                return Ok(result);
            }
            Ok(_) => debug!(format = %candidate, "fallback produced no tokens"),
            Err(error) => debug!(format = %candidate, %error, "fallback failed"),
        }
    }
    Err(ParseError::UnrecognizedFormat)
}

/// Parse and keep only the document, failing on unrecoverable input.
pub fn parse_document<'a>(
    raw: impl Into<RawInput<'a>>,
    hint: Option<InputFormat>,
) -> Result<TokenDocument, ParseError> {
    parse(raw, hint).map(|result| result.document)
}

/// Speculative parse: `None` instead of an error.
pub fn try_parse<'a>(raw: impl Into<RawInput<'a>>) -> Option<TokenDocument> {
    parse(raw, None).ok().map(|result| result.document)
}

fn convert(format: InputFormat, value: &Value) -> Result<ParseResult, ParseError> {
    let mut warnings = Warnings::default();
    let document = match format {
        InputFormat::Ldl => ldl::convert(value, &mut warnings)?,
        InputFormat::Dtcg => dtcg::convert(value, &mut warnings)?,
        InputFormat::FigmaVariables => figma::convert(value, &mut warnings)?,
        InputFormat::TokensStudio => tokens_studio::convert(value, &mut warnings)?,
        InputFormat::Unknown => return Err(ParseError::UnrecognizedFormat),
    };
    Ok(ParseResult {
        document,
        format,
        warnings: warnings.into_vec(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tokens::{ColorToken, TokenCategory};
    use serde_json::json;

    #[test]
    fn dtcg_color_example() {
        let input = json!({"color": {"primary": {"$value": "#3366ff", "$type": "color"}}});
        let result = parse(&input, None).unwrap();
        assert_eq!(result.format, InputFormat::Dtcg);
        assert_eq!(
            result.document.tokens.colors.get("primary"),
            Some(&ColorToken::literal("#3366ff"))
        );
        assert!(result.warnings.is_empty());
    }

    #[test]
    fn unknown_input_falls_back_to_first_plausible_dialect() {
        let input = json!({"spacing": {"1": "4px"}});
        let result = parse(&input, None).unwrap();
        assert_eq!(result.format, InputFormat::Ldl);
        assert_eq!(
            result
                .document
                .tokens
                .scalar_group(TokenCategory::Spacing)
                .and_then(|g| g.get("1"))
                .map(String::as_str),
            Some("4px")
        );
    }

    #[test]
    fn unrecognized_input_fails() {
        let input = json!({"hello": "world"});
        assert_eq!(parse(&input, None), Err(ParseError::UnrecognizedFormat));
        assert!(try_parse(&input).is_none());
    }

    #[test]
    fn non_object_roots_are_invalid() {
        assert!(matches!(
            parse(&json!([1, 2]), None),
            Err(ParseError::InvalidInput(_))
        ));
        assert!(matches!(
            parse("not tokens", None),
            Err(ParseError::InvalidInput(_))
        ));
    }

    #[test]
    fn hint_overrides_detection() {
        let input = json!({"color": {"primary": {"$value": "#3366ff", "$type": "color"}}});
        let result = parse(&input, Some(InputFormat::Ldl)).unwrap();
        assert_eq!(result.format, InputFormat::Ldl);
        assert!(result.document.tokens.colors.is_empty());
        assert!(result.document.extensions.contains_key("color"));
    }

    #[test]
    fn parses_text_input() {
        let doc = parse_document(r##"{"colors": {"primary": "#3366ff"}}"##, None).unwrap();
        assert_eq!(
            doc.tokens.colors.get("primary"),
            Some(&ColorToken::literal("#3366ff"))
        );
    }
}
