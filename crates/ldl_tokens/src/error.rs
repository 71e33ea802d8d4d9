use thiserror::Error;

use crate::detect::InputFormat;

/// Input that cannot be turned into a token document
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// Not structured data at all, or a root that is not an object
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// No dialect produced a plausible document
    #[error("unrecognized token format")]
    UnrecognizedFormat,

    /// A Figma Variables export without its mode-id to mode-name table
    #[error("figma variables export has no mode table; cannot name modes")]
    MissingModeTable,

    /// A Figma variable refers to a mode the table does not list
    #[error("figma variables export references unknown mode id `{0}`")]
    UnknownModeId(String),

    /// A required structural element of the given dialect is missing
    #[error("{format} input: {message}")]
    Structure { format: InputFormat, message: String },
}

impl ParseError {
    pub(crate) fn structure(format: InputFormat, message: impl Into<String>) -> Self {
        Self::Structure {
            format,
            message: message.into(),
        }
    }
}

#[derive(Debug, Error)]
pub enum GeneratorError {
    #[error("unsupported output format `{0}`")]
    UnsupportedFormat(String),

    #[error("failed to serialize tokens: {0}")]
    Serialize(#[from] serde_json::Error),
}

#[derive(Debug, Error)]
pub enum LdlError {
    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    Generator(#[from] GeneratorError),
}
