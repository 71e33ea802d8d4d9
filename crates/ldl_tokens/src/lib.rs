//! LDL Token Pipeline
//!
//! A format-agnostic design-token model with the pieces to get tokens in and
//! out of it.
//!
//! # Overview
//!
//! - **Model** ([`tokens`]): colors (optionally paired with a foreground),
//!   typography, spacing, radii, shadows, durations, easing and named modes
//! - **Detection** ([`detect`]): classify raw input as native LDL, W3C DTCG,
//!   Figma Variables or Tokens Studio
//! - **Parsing** ([`parser`]): convert any of those dialects into a
//!   [`TokenDocument`]
//! - **Validation** ([`validator`]): structural and semantic checks as an
//!   ordered issue list
//! - **Generation** ([`generator`]): CSS custom properties, Tailwind config,
//!   SCSS, JSON, TypeScript and DTCG output
//! - **Merging** ([`merge`]): cascade documents, later ones winning
//!
//! # Quick Start
//!
//! ```rust
//! use ldl_tokens::{generate, parse, validate, GeneratorOptions, OutputFormat};
//!
//! let input = r##"{"color": {"primary": {"$value": "#3366ff", "$type": "color"}}}"##;
//! let parsed = parse(input, None).unwrap();
//! assert!(validate(&parsed.document).valid);
//!
//! let css = generate(&parsed.document, OutputFormat::Css, &GeneratorOptions::default())
//!     .unwrap();
//! assert!(css.code.contains("--ldl-color-primary: #3366ff;"));
//! ```
//!
//! Every entry point is a pure function over borrowed input. Nothing here
//! performs I/O or prints; diagnostics go through `tracing` at `debug` and
//! `trace` level.

pub mod detect;
pub mod error;
pub mod generator;
pub mod merge;
pub mod parser;
pub mod raw;
pub mod tokens;
pub mod validator;

pub use detect::{detect_format, detect_format_str, detect_with_scores, Detection, FormatScores, InputFormat};
pub use error::{GeneratorError, LdlError, ParseError};
pub use generator::{
    generate, generate_named, to_css, to_json, to_scss, to_tailwind, to_typescript, GeneratorOptions,
    GeneratorResult, Language, ModeSelector, OutputFormat,
};
pub use merge::merge_documents;
pub use parser::{parse, parse_document, try_parse, ParseResult, ParseWarning};
pub use raw::RawInput;
pub use tokens::{
    ColorToken, ColorValue, TokenCategory, TokenDocument, TokenGroup, TokenSet, TypographyTokens,
    SCHEMA_VERSION,
};
pub use validator::{
    format_issues, get_errors, is_valid, validate, IssueCode, Severity, ValidationIssue, ValidationResult,
};
