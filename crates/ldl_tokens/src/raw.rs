//! Raw parser input

use std::borrow::Cow;

use serde_json::Value;

use crate::error::ParseError;

/// Input handed to the detector and parser: an already-parsed value or text.
#[derive(Clone, Copy, Debug)]
pub enum RawInput<'a> {
    Value(&'a Value),
    Text(&'a str),
}

impl<'a> From<&'a Value> for RawInput<'a> {
    fn from(value: &'a Value) -> Self {
        Self::Value(value)
    }
}

impl<'a> From<&'a str> for RawInput<'a> {
    fn from(text: &'a str) -> Self {
        Self::Text(text)
    }
}

impl<'a> From<&'a String> for RawInput<'a> {
    fn from(text: &'a String) -> Self {
        Self::Text(text.as_str())
    }
}

impl<'a> RawInput<'a> {
    /// Structured view of the input. Text is read as JSON, or as YAML when
    /// it looks like a YAML mapping.
    pub fn to_value(self) -> Result<Cow<'a, Value>, ParseError> {
        match self {
            Self::Value(value) => Ok(Cow::Borrowed(value)),
            Self::Text(text) => read_text(text).map(Cow::Owned),
        }
    }
}

fn read_text(text: &str) -> Result<Value, ParseError> {
    let trimmed = text.trim_start_matches('\u{feff}').trim();
    if trimmed.is_empty() {
        return Err(ParseError::InvalidInput("input is empty".to_string()));
    }

    match serde_json::from_str::<Value>(trimmed) {
        Ok(value) => Ok(value),
        Err(json_err) => {
            if !looks_like_yaml_mapping(trimmed) {
                return Err(ParseError::InvalidInput(format!("not valid JSON: {json_err}")));
            }
            serde_yaml::from_str::<Value>(trimmed)
                .map_err(|e| ParseError::InvalidInput(format!("not valid JSON or YAML: {e}")))
        }
    }
}

fn looks_like_yaml_mapping(src: &str) -> bool {
    src.lines()
        .map(str::trim)
        .find(|line| !line.is_empty() && !line.starts_with('#') && line != &"---")
        .is_some_and(|line| {
            line.find(':')
                .is_some_and(|colon| colon > 0 && !line.starts_with(['{', '[']))
        })
}
