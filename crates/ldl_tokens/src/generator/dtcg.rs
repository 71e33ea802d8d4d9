//! W3C design tokens export
//!
//! One group per category with its `$type` declared on the group. Foreground
//! pairs and mode values ride in `$extensions` the same way the DTCG parser
//! reads them, so an export parses back into the same document.

use serde_json::{json, Map, Value};

use crate::error::GeneratorError;
use crate::tokens::{ColorValue, TokenCategory, TokenDocument};

/// Group key and `$type` for each category
fn group_of(category: TokenCategory) -> (&'static str, &'static str) {
    match category {
        TokenCategory::Colors => ("color", "color"),
        TokenCategory::FontFamilies => ("fontFamily", "fontFamily"),
        TokenCategory::FontSizes => ("fontSize", "dimension"),
        TokenCategory::FontWeights => ("fontWeight", "fontWeight"),
        TokenCategory::LineHeights => ("lineHeight", "number"),
        TokenCategory::LetterSpacing => ("letterSpacing", "dimension"),
        TokenCategory::Spacing => ("spacing", "dimension"),
        TokenCategory::Radii => ("borderRadius", "dimension"),
        TokenCategory::Shadows => ("shadow", "shadow"),
        TokenCategory::Durations => ("duration", "duration"),
        TokenCategory::Easing => ("easing", "cubicBezier"),
    }
}

pub(super) fn render(document: &TokenDocument) -> Result<String, GeneratorError> {
    let mut root = Map::new();
    if let Some(description) = &document.description {
        root.insert("$description".to_string(), json!(description));
    }
    if let Some(name) = &document.name {
        root.insert("$extensions".to_string(), json!({ "ldl": { "name": name } }));
    }

    for category in TokenCategory::all() {
        let tokens = category_tokens(document, *category)?;
        if tokens.is_empty() {
            continue;
        }
        let (key, kind) = group_of(*category);
        let mut group = Map::new();
        group.insert("$type".to_string(), json!(kind));
        group.extend(tokens);
        root.insert(key.to_string(), Value::Object(group));
    }

    let mut out = serde_json::to_string_pretty(&Value::Object(root))?;
    out.push('\n');
    Ok(out)
}

/// Tokens of one category: base tokens in order, then tokens that only
/// exist in modes, in mode order.
fn category_tokens(document: &TokenDocument, category: TokenCategory) -> Result<Map<String, Value>, GeneratorError> {
    let mut names: Vec<&str> = document.tokens.names(category);
    for mode in document.modes.values() {
        for name in mode.names(category) {
            if !names.contains(&name) {
                names.push(name);
            }
        }
    }

    let mut tokens = Map::new();
    for name in names {
        let mut token = Map::new();
        let mut extensions = Map::new();
        if category == TokenCategory::Colors {
            if let Some(color) = document.tokens.colors.get(name) {
                token.insert("$value".to_string(), color_value(color.value()));
                if let Some(foreground) = color.foreground() {
                    let foreground = serde_json::to_value(foreground)?;
                    extensions.insert("ldl".to_string(), json!({ "foreground": foreground }));
                }
            }
        } else if let Some(value) = document.tokens.scalar_group(category).and_then(|g| g.get(name)) {
            token.insert("$value".to_string(), json!(value));
        }

        let mut modes = Map::new();
        for (mode, set) in &document.modes {
            let value = if category == TokenCategory::Colors {
                set.colors.get(name).map(serde_json::to_value).transpose()?
            } else {
                set.scalar_group(category).and_then(|g| g.get(name)).map(|v| json!(v))
            };
            if let Some(value) = value {
                modes.insert(mode.clone(), value);
            }
        }
        if !modes.is_empty() {
            extensions.insert("mode".to_string(), Value::Object(modes));
        }
        if !extensions.is_empty() {
            token.insert("$extensions".to_string(), Value::Object(extensions));
        }
        tokens.insert(name.to_string(), Value::Object(token));
    }
    Ok(tokens)
}

fn color_value(value: &ColorValue) -> Value {
    match value {
        ColorValue::Literal(literal) => json!(literal),
        ColorValue::Reference(name) => json!(format!("{{color.{name}}}")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tokens::{ColorToken, TokenSet};
    use pretty_assertions::assert_eq;

    #[test]
    fn groups_tokens_with_types_and_extensions() {
        let mut dark = TokenSet::new();
        dark.insert_color("primary", ColorToken::literal("#99f"));
        dark.insert_color("glow", ColorToken::literal("#ff0"));
        let doc = TokenDocument::new()
            .with_name("Acme")
            .with_color(
                "primary",
                ColorToken::with_foreground(ColorValue::literal("#36f"), ColorToken::literal("#fff")),
            )
            .with_color("link", ColorToken::reference("primary"))
            .with_token(TokenCategory::Radii, "sm", "2px")
            .with_mode("dark", dark);

        let exported: Value = serde_json::from_str(&render(&doc).unwrap()).unwrap();
        assert_eq!(
            exported,
            json!({
                "$extensions": {"ldl": {"name": "Acme"}},
                "color": {
                    "$type": "color",
                    "primary": {
                        "$value": "#36f",
                        "$extensions": {
                            "ldl": {"foreground": "#fff"},
                            "mode": {"dark": "#99f"}
                        }
                    },
                    "link": {"$value": "{color.primary}"},
                    "glow": {"$extensions": {"mode": {"dark": "#ff0"}}}
                },
                "borderRadius": {
                    "$type": "dimension",
                    "sm": {"$value": "2px"}
                }
            })
        );
    }

    #[test]
    fn empty_documents_export_an_empty_object() {
        assert_eq!(render(&TokenDocument::new()).unwrap(), "{}\n");
    }
}
