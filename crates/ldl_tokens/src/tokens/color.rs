//! Color tokens

use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};
use serde_json::Value;

use super::category::TokenCategory;

/// A single color expression: a verbatim CSS value or a reference to
/// another color token by name.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum ColorValue {
    Literal(String),
    Reference(String),
}

impl ColorValue {
    pub fn literal(value: impl Into<String>) -> Self {
        Self::Literal(value.into())
    }

    pub fn reference(name: impl Into<String>) -> Self {
        Self::Reference(name.into())
    }

    /// Read a string, turning `{colors.name}` aliases into references.
    pub fn from_str_value(raw: &str) -> Self {
        match parse_alias(raw) {
            Some(name) => Self::Reference(name),
            None => Self::Literal(raw.to_string()),
        }
    }
}

impl Serialize for ColorValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Literal(value) => serializer.serialize_str(value),
            Self::Reference(name) => {
                let mut map = serializer.serialize_map(Some(1))?;
                map.serialize_entry("ref", name)?;
                map.end()
            }
        }
    }
}

/// A color token, optionally paired with a foreground color for content
/// drawn on top of it (`primary` + `primary-foreground`).
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum ColorToken {
    Value(ColorValue),
    WithForeground {
        value: ColorValue,
        foreground: Box<ColorToken>,
    },
}

impl ColorToken {
    /// A literal color (`#3366ff`, `hsl(0 0% 100%)`)
    pub fn literal(value: impl Into<String>) -> Self {
        Self::Value(ColorValue::literal(value))
    }

    /// A reference to another color token
    pub fn reference(name: impl Into<String>) -> Self {
        Self::Value(ColorValue::reference(name))
    }

    /// Pair `value` with a foreground token
    pub fn with_foreground(value: ColorValue, foreground: ColorToken) -> Self {
        Self::WithForeground {
            value,
            foreground: Box::new(foreground),
        }
    }

    pub fn value(&self) -> &ColorValue {
        match self {
            Self::Value(value) | Self::WithForeground { value, .. } => value,
        }
    }

    pub fn foreground(&self) -> Option<&ColorToken> {
        match self {
            Self::Value(_) => None,
            Self::WithForeground { foreground, .. } => Some(foreground),
        }
    }

    /// Every color value in the token with its locator suffix, outermost first.
    ///
    /// For a plain token the suffix is empty; for a pair it is `value`,
    /// then `foreground` (or `foreground.value`, ... for nested pairs).
    pub fn leaves(&self) -> Vec<(String, &ColorValue)> {
        let mut out = Vec::new();
        collect_leaves(self, String::new(), &mut out);
        out
    }

    /// Suffixes appended to the token name in generated identifiers,
    /// e.g. `["", "-foreground"]` for a pair.
    pub fn name_suffixes(&self) -> Vec<(String, &ColorValue)> {
        let mut out = Vec::new();
        let mut suffix = String::new();
        let mut current = self;
        loop {
            out.push((suffix.clone(), current.value()));
            match current.foreground() {
                Some(fg) => {
                    suffix.push_str("-foreground");
                    current = fg;
                }
                None => break,
            }
        }
        out
    }
}

fn collect_leaves<'a>(token: &'a ColorToken, prefix: String, out: &mut Vec<(String, &'a ColorValue)>) {
    match token {
        ColorToken::Value(value) => out.push((prefix, value)),
        ColorToken::WithForeground { value, foreground } => {
            out.push((join_path(&prefix, "value"), value));
            collect_foreground(foreground, join_path(&prefix, "foreground"), out);
        }
    }
}

// A plain foreground is addressed as `foreground`, not `foreground.value`.
fn collect_foreground<'a>(
    token: &'a ColorToken,
    prefix: String,
    out: &mut Vec<(String, &'a ColorValue)>,
) {
    match token {
        ColorToken::Value(value) => out.push((prefix, value)),
        pair => collect_leaves(pair, prefix, out),
    }
}

fn join_path(prefix: &str, segment: &str) -> String {
    if prefix.is_empty() {
        segment.to_string()
    } else {
        format!("{prefix}.{segment}")
    }
}

impl Serialize for ColorToken {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Value(value) => value.serialize(serializer),
            Self::WithForeground { value, foreground } => {
                let mut map = serializer.serialize_map(Some(2))?;
                map.serialize_entry("value", value)?;
                map.serialize_entry("foreground", foreground)?;
                map.end()
            }
        }
    }
}

/// Read a color token from its native JSON shape.
///
/// Accepts a string, `{"ref": name}`, or `{"value": ..., "foreground": ...}`.
pub fn color_token_from_json(value: &Value) -> Result<ColorToken, String> {
    match value {
        Value::String(s) => Ok(ColorToken::Value(ColorValue::from_str_value(s))),
        Value::Object(map) => {
            if let Some(reference) = map.get("ref") {
                let Some(name) = reference.as_str() else {
                    return Err("`ref` must be a string".to_string());
                };
                return Ok(ColorToken::reference(normalize_reference(name)));
            }
            let Some(inner) = map.get("value") else {
                return Err("color object needs a `value` or `ref` field".to_string());
            };
            let base = match color_token_from_json(inner)? {
                ColorToken::Value(v) => v,
                ColorToken::WithForeground { .. } => {
                    return Err("`value` cannot itself carry a foreground".to_string())
                }
            };
            match map.get("foreground") {
                None | Some(Value::Null) => Ok(ColorToken::Value(base)),
                Some(fg) => Ok(ColorToken::with_foreground(base, color_token_from_json(fg)?)),
            }
        }
        other => Err(format!("expected a color string or object, found {}", kind_of(other))),
    }
}

/// Name of a JSON value's kind, for diagnostics
pub fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Parse a `{group.path}` alias into a color token name.
///
/// The leading color category segment is dropped and the remaining
/// segments are joined with `-`: `{color.brand.primary}` → `brand-primary`.
pub fn parse_alias(raw: &str) -> Option<String> {
    let inner = raw.trim().strip_prefix('{')?.strip_suffix('}')?.trim();
    if inner.is_empty() || inner.contains(['{', '}']) {
        return None;
    }
    Some(alias_path_to_name(inner))
}

/// Turn a dotted alias path into a color token name.
pub fn alias_path_to_name(path: &str) -> String {
    let segments: Vec<&str> = path.split('.').filter(|s| !s.is_empty()).collect();
    let rest = match segments.split_first() {
        Some((first, rest))
            if !rest.is_empty() && TokenCategory::from_alias(first) == Some(TokenCategory::Colors) =>
        {
            rest
        }
        _ => &segments[..],
    };
    rest.join("-")
}

/// `{ref: "colors.primary"}` and `{ref: "primary"}` both name `primary`.
fn normalize_reference(name: &str) -> String {
    match name.split_once('.') {
        Some((group, rest)) if TokenCategory::from_alias(group) == Some(TokenCategory::Colors) => {
            rest.to_string()
        }
        _ => name.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn aliases_become_references() {
        assert_eq!(parse_alias("{colors.primary}"), Some("primary".to_string()));
        assert_eq!(
            parse_alias("{color.brand.primary}"),
            Some("brand-primary".to_string())
        );
        assert_eq!(parse_alias("{accent}"), Some("accent".to_string()));
        assert_eq!(parse_alias("#fff"), None);
    }

    #[test]
    fn reads_native_shapes() {
        assert_eq!(
            color_token_from_json(&json!("#3366ff")).unwrap(),
            ColorToken::literal("#3366ff")
        );
        assert_eq!(
            color_token_from_json(&json!({"ref": "colors.primary"})).unwrap(),
            ColorToken::reference("primary")
        );
        assert_eq!(
            color_token_from_json(&json!({"value": "#000", "foreground": {"ref": "white"}})).unwrap(),
            ColorToken::with_foreground(ColorValue::literal("#000"), ColorToken::reference("white"))
        );
        assert!(color_token_from_json(&json!(12)).is_err());
    }

    #[test]
    fn serializes_to_native_shape() {
        let token = ColorToken::with_foreground(
            ColorValue::literal("hsl(0, 0%, 0%)"),
            ColorToken::reference("surface"),
        );
        assert_eq!(
            serde_json::to_value(&token).unwrap(),
            json!({"value": "hsl(0, 0%, 0%)", "foreground": {"ref": "surface"}})
        );
    }

    #[test]
    fn leaves_are_addressed_by_sub_field() {
        let token = ColorToken::with_foreground(
            ColorValue::literal("#000"),
            ColorToken::reference("white"),
        );
        let paths: Vec<String> = token.leaves().into_iter().map(|(p, _)| p).collect();
        assert_eq!(paths, vec!["value".to_string(), "foreground".to_string()]);

        let plain = ColorToken::literal("#000");
        assert_eq!(plain.leaves()[0].0, "");
    }
}
