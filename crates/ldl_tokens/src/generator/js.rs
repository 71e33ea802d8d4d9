//! Object literal writer shared by the JavaScript and TypeScript targets

use super::options::GeneratorOptions;
use crate::tokens::{ColorToken, ColorValue, TokenCategory, TokenSet};

/// A JavaScript value: string leaves and ordered objects
#[derive(Clone, Debug, PartialEq, Eq)]
pub(super) enum JsValue {
    String(String),
    Object(Vec<(String, JsValue)>),
}

impl JsValue {
    pub fn string(value: impl Into<String>) -> Self {
        Self::String(value.into())
    }

    /// Render at the given indentation depth (two spaces per level)
    pub fn render(&self, depth: usize) -> String {
        let mut out = String::new();
        self.write(&mut out, depth);
        out
    }

    fn write(&self, out: &mut String, depth: usize) {
        match self {
            Self::String(value) => out.push_str(&quote(value)),
            Self::Object(entries) if entries.is_empty() => out.push_str("{}"),
            Self::Object(entries) => {
                out.push_str("{\n");
                let indent = "  ".repeat(depth + 1);
                for (key, value) in entries {
                    out.push_str(&indent);
                    out.push_str(&key_literal(key));
                    out.push_str(": ");
                    value.write(out, depth + 1);
                    out.push_str(",\n");
                }
                out.push_str(&"  ".repeat(depth));
                out.push('}');
            }
        }
    }
}

/// Single-quoted string literal
pub(super) fn quote(value: &str) -> String {
    let mut out = String::with_capacity(value.len() + 2);
    out.push('\'');
    for c in value.chars() {
        match c {
            '\'' => out.push_str("\\'"),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            c => out.push(c),
        }
    }
    out.push('\'');
    out
}

/// Object key, quoted unless it is a plain identifier
pub(super) fn key_literal(name: &str) -> String {
    let mut chars = name.chars();
    let bare = chars
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic() || c == '_' || c == '$')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$');
    if bare {
        name.to_string()
    } else {
        quote(name)
    }
}

/// A token set as a nested object in the native document shape, with
/// color references resolved against `scope`.
pub(super) fn token_set_object(set: &TokenSet, scope: &TokenSet, options: &GeneratorOptions) -> JsValue {
    JsValue::Object(token_set_entries(set, scope, options))
}

/// Top-level entries of [`token_set_object`]
pub(super) fn token_set_entries(
    set: &TokenSet,
    scope: &TokenSet,
    options: &GeneratorOptions,
) -> Vec<(String, JsValue)> {
    let mut entries = Vec::new();

    if !set.colors.is_empty() {
        let colors = set
            .colors
            .iter()
            .map(|(name, token)| (name.to_string(), color_object(token, scope, options)))
            .collect();
        entries.push(("colors".to_string(), JsValue::Object(colors)));
    }

    let groups = |typography: bool| -> Vec<(String, JsValue)> {
        TokenCategory::scalar()
            .iter()
            .filter(|c| c.is_typography() == typography)
            .filter_map(|category| {
                let group = set.scalar_group(*category).filter(|g| !g.is_empty())?;
                let values = group
                    .iter()
                    .map(|(name, value)| {
                        let value = super::scalar_output(options, *category, value);
                        (name.to_string(), JsValue::String(value))
                    })
                    .collect();
                Some((category.key().to_string(), JsValue::Object(values)))
            })
            .collect()
    };
    let typography = groups(true);
    if !typography.is_empty() {
        entries.push(("typography".to_string(), JsValue::Object(typography)));
    }
    entries.extend(groups(false));
    entries
}

fn color_object(token: &ColorToken, scope: &TokenSet, options: &GeneratorOptions) -> JsValue {
    let literal = |value: &ColorValue| JsValue::String(super::color_literal(options, scope, value));
    match token {
        ColorToken::Value(value) => literal(value),
        ColorToken::WithForeground { value, foreground } => JsValue::Object(vec![
            ("value".to_string(), literal(value)),
            ("foreground".to_string(), color_object(foreground, scope, options)),
        ]),
    }
}
