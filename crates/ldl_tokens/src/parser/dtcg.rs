//! W3C Design Tokens Community Group converter
//!
//! Tokens are objects carrying `$value`; every other object is a group.
//! `$type` is inherited from the closest group that declares one. LDL-specific
//! data travels in `$extensions`: `ldl.foreground` for foreground pairs and
//! `mode` for per-mode values.

use indexmap::IndexMap;
use serde_json::{Map, Value};

use super::support::{
    color_value, insert_value, place, resolve_scalar_aliases, scalar_value, split_typography, Placement,
    TypeHint, Warnings,
};
use crate::detect::InputFormat;
use crate::error::ParseError;
use crate::tokens::{color_token_from_json, ColorToken, TokenCategory, TokenDocument, TokenSet};

const MAX_DEPTH: usize = 64;

struct Context<'w> {
    base: TokenSet,
    modes: IndexMap<String, TokenSet>,
    warnings: &'w mut Warnings,
}

pub(crate) fn convert(value: &Value, warnings: &mut Warnings) -> Result<TokenDocument, ParseError> {
    let Value::Object(root) = value else {
        return Err(ParseError::structure(InputFormat::Dtcg, "root must be an object"));
    };

    let mut ctx = Context {
        base: TokenSet::new(),
        modes: IndexMap::new(),
        warnings,
    };
    let root_type = root.get("$type").and_then(Value::as_str);
    walk_group(root, &mut Vec::new(), root_type, &mut ctx, 0);

    let mut document = TokenDocument::new();
    if let Some(description) = root.get("$description").and_then(Value::as_str) {
        document.description = Some(description.to_string());
    }
    if let Some(name) = root
        .get("$extensions")
        .and_then(|e| e.get("ldl"))
        .and_then(|l| l.get("name"))
        .and_then(Value::as_str)
    {
        document.name = Some(name.to_string());
    }
    let Context {
        mut base,
        mut modes,
        warnings,
    } = ctx;
    resolve_scalar_aliases(&mut base, None, "", warnings);
    for (mode, set) in &mut modes {
        resolve_scalar_aliases(set, Some(&base), &format!("modes.{mode}."), warnings);
    }
    document.tokens = base;
    document.modes = modes;
    Ok(document)
}

fn walk_group<'a>(
    group: &'a Map<String, Value>,
    path: &mut Vec<&'a str>,
    inherited_type: Option<&'a str>,
    ctx: &mut Context<'_>,
    depth: usize,
) {
    if depth > MAX_DEPTH {
        ctx.warnings.push(path.join("."), "group nesting too deep (dropped)");
        return;
    }
    for (key, child) in group {
        if key.starts_with('$') {
            continue;
        }
        path.push(key.as_str());
        match child {
            Value::Object(node) => {
                let node_type = node.get("$type").and_then(Value::as_str).or(inherited_type);
                if node.contains_key("$value") || mode_values(node).is_some() {
                    read_token(node, path, node_type, ctx);
                } else if is_valueless_token(node) {
                    ctx.warnings.push(path.join("."), "token has no `$value` (dropped)");
                } else {
                    walk_group(node, path, node_type, ctx, depth + 1);
                }
            }
            _ => ctx
                .warnings
                .push(path.join("."), "expected a token or group object (dropped)"),
        }
        path.pop();
    }
}

/// A node with token metadata but neither a `$value` nor child tokens
fn is_valueless_token(node: &Map<String, Value>) -> bool {
    node.keys().all(|k| k.starts_with('$'))
        && (node.contains_key("$type") || node.contains_key("$description"))
}

fn mode_values(node: &Map<String, Value>) -> Option<&Map<String, Value>> {
    node.get("$extensions")?.get("mode")?.as_object()
}

fn read_token(node: &Map<String, Value>, path: &[&str], kind: Option<&str>, ctx: &mut Context<'_>) {
    let location = path.join(".");
    let value = node.get("$value");

    if kind == Some("typography") || value.is_some_and(looks_like_typography) {
        let name = typography_name(path);
        match value {
            Some(Value::Object(composite)) => {
                split_typography(&mut ctx.base, &name, composite, &location, ctx.warnings)
            }
            _ => ctx.warnings.push(location, "typography token needs an object value"),
        }
        return;
    }

    let Some(placement) = place(path, TypeHint::from_type(kind)) else {
        ctx.warnings.push(
            location,
            format!("cannot place token of type `{}` (dropped)", kind.unwrap_or("none")),
        );
        return;
    };

    match value {
        Some(v) if placement.category == TokenCategory::Colors => {
            match read_color(v, node) {
                Ok(token) => ctx.base.insert_color(&placement.name, token),
                Err(e) => ctx.warnings.push(&location, e),
            }
        }
        Some(v) => insert_value(&mut ctx.base, &placement, v, &location, ctx.warnings),
        None => {}
    }

    match mode_values(node) {
        Some(modes) => read_mode_values(&placement, modes, &location, ctx),
        None if value.is_none() => ctx.warnings.push(location, "token has no `$value` (dropped)"),
        None => {}
    }
}

fn read_color(value: &Value, node: &Map<String, Value>) -> Result<ColorToken, String> {
    let base = color_value(value)?;
    let foreground = node
        .get("$extensions")
        .and_then(|e| e.get("ldl"))
        .and_then(|l| l.get("foreground"));
    match foreground {
        Some(fg) => Ok(ColorToken::with_foreground(base, color_token_from_json(fg)?)),
        None => Ok(ColorToken::Value(base)),
    }
}

fn read_mode_values(
    placement: &Placement,
    modes: &Map<String, Value>,
    location: &str,
    ctx: &mut Context<'_>,
) {
    for (mode, raw) in modes {
        let path = format!("{location}.$extensions.mode.{mode}");
        let set = ctx.modes.entry(mode.clone()).or_default();
        if placement.category == TokenCategory::Colors {
            match color_token_from_json(raw) {
                Ok(token) => set.insert_color(&placement.name, token),
                Err(e) => ctx.warnings.push(path, e),
            }
        } else {
            match scalar_value(placement.category, raw) {
                Ok(v) => {
                    set.insert_scalar(placement.category, &placement.name, v);
                }
                Err(e) => ctx.warnings.push(path, e),
            }
        }
    }
}

fn looks_like_typography(value: &Value) -> bool {
    value.as_object().is_some_and(|m| {
        m.contains_key("fontFamily") || m.contains_key("fontSize") || m.contains_key("fontWeight")
    })
}

fn typography_name(path: &[&str]) -> String {
    let rest: Vec<&str> = path
        .iter()
        .copied()
        .skip_while(|s| s.eq_ignore_ascii_case("typography") || s.eq_ignore_ascii_case("font"))
        .collect();
    if rest.is_empty() {
        path.join("-")
    } else {
        rest.join("-")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tokens::ColorValue;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn read(value: Value) -> (TokenDocument, Vec<String>) {
        let mut warnings = Warnings::default();
        let doc = convert(&value, &mut warnings).unwrap();
        let messages = warnings.into_vec().into_iter().map(|w| w.to_string()).collect();
        (doc, messages)
    }

    #[test]
    fn inherits_group_types() {
        let (doc, warnings) = read(json!({
            "brand": {
                "$type": "color",
                "primary": {"$value": "#3366ff"},
                "accent": {"$value": "{brand.primary}"}
            }
        }));
        assert!(warnings.is_empty(), "{warnings:?}");
        assert_eq!(
            doc.tokens.colors.get("brand-primary"),
            Some(&ColorToken::literal("#3366ff"))
        );
        assert_eq!(
            doc.tokens.colors.get("brand-accent"),
            Some(&ColorToken::reference("brand-primary"))
        );
    }

    #[test]
    fn converts_composites() {
        let (doc, warnings) = read(json!({
            "shadow": {
                "md": {
                    "$type": "shadow",
                    "$value": {"color": "#0000001a", "offsetX": "0px", "offsetY": "4px", "blur": "6px", "spread": "-1px"}
                }
            },
            "duration": {"fast": {"$type": "duration", "$value": {"value": 150, "unit": "ms"}}},
            "easing": {"standard": {"$type": "cubicBezier", "$value": [0.4, 0, 0.2, 1]}},
            "spacing": {"sm": {"$type": "dimension", "$value": "8px"}},
            "typography": {
                "heading": {
                    "$type": "typography",
                    "$value": {"fontFamily": ["Inter", "sans-serif"], "fontSize": "2rem", "fontWeight": 700, "lineHeight": 1.2}
                }
            }
        }));
        assert!(warnings.is_empty(), "{warnings:?}");
        assert_eq!(
            doc.tokens.shadows.get("md").map(String::as_str),
            Some("0px 4px 6px -1px #0000001a")
        );
        assert_eq!(doc.tokens.durations.get("fast").map(String::as_str), Some("150ms"));
        assert_eq!(
            doc.tokens.easing.get("standard").map(String::as_str),
            Some("cubic-bezier(0.4, 0, 0.2, 1)")
        );
        assert_eq!(doc.tokens.spacing.get("sm").map(String::as_str), Some("8px"));
        let typography = &doc.tokens.typography;
        assert_eq!(
            typography.font_families.get("heading").map(String::as_str),
            Some("Inter, sans-serif")
        );
        assert_eq!(typography.font_sizes.get("heading").map(String::as_str), Some("2rem"));
        assert_eq!(typography.font_weights.get("heading").map(String::as_str), Some("700"));
        assert_eq!(typography.line_heights.get("heading").map(String::as_str), Some("1.2"));
    }

    #[test]
    fn reads_ldl_extensions() {
        let (doc, warnings) = read(json!({
            "color": {
                "primary": {
                    "$type": "color",
                    "$value": "#3366ff",
                    "$extensions": {
                        "ldl": {"foreground": "#ffffff"},
                        "mode": {"dark": "#99aaff"}
                    }
                },
                "glow": {"$type": "color", "$extensions": {"mode": {"dark": "#ff0"}}}
            }
        }));
        assert!(warnings.is_empty(), "{warnings:?}");
        assert_eq!(
            doc.tokens.colors.get("primary"),
            Some(&ColorToken::with_foreground(
                ColorValue::literal("#3366ff"),
                ColorToken::literal("#ffffff")
            ))
        );
        let dark = doc.mode("dark").unwrap();
        assert_eq!(dark.colors.get("primary"), Some(&ColorToken::literal("#99aaff")));
        assert_eq!(dark.colors.get("glow"), Some(&ColorToken::literal("#ff0")));
        assert!(!doc.tokens.colors.contains("glow"));
    }

    #[test]
    fn reads_document_metadata() {
        let (doc, _) = read(json!({
            "$description": "Brand tokens",
            "$extensions": {"ldl": {"name": "Acme"}},
            "spacing": {"$type": "dimension", "sm": {"$value": "8px"}}
        }));
        assert_eq!(doc.name.as_deref(), Some("Acme"));
        assert_eq!(doc.description.as_deref(), Some("Brand tokens"));
        assert_eq!(doc.tokens.spacing.get("sm").map(String::as_str), Some("8px"));
    }

    #[test]
    fn resolves_scalar_aliases() {
        let (doc, warnings) = read(json!({
            "spacing": {
                "$type": "dimension",
                "sm": {"$value": "4px"},
                "md": {"$value": "{spacing.sm}", "$extensions": {"mode": {"compact": "{spacing.xs}"}}},
                "lg": {"$value": "{spacing.huge}"}
            }
        }));
        assert_eq!(doc.tokens.spacing.get("md").map(String::as_str), Some("4px"));
        assert!(!doc.tokens.spacing.contains("lg"));
        assert!(!doc.mode("compact").is_some_and(|m| m.spacing.contains("md")));
        assert_eq!(warnings.len(), 2, "{warnings:?}");
        assert!(warnings[0].starts_with("spacing.lg: alias `{spacing.huge}`"));
        assert!(warnings[1].starts_with("modes.compact.spacing.md"));
    }

    #[test]
    fn keeps_number_precision() {
        let (doc, warnings) = read(json!({
            "lineHeight": {"body": {"$type": "number", "$value": 1.33333}},
            "letterSpacing": {"tight": {"$type": "dimension", "$value": {"value": 0.00001, "unit": "em"}}}
        }));
        assert!(warnings.is_empty(), "{warnings:?}");
        let typography = &doc.tokens.typography;
        assert_eq!(typography.line_heights.get("body").map(String::as_str), Some("1.33333"));
        assert_eq!(typography.letter_spacing.get("tight").map(String::as_str), Some("0.00001em"));
    }

    #[test]
    fn incomplete_tokens_are_warnings() {
        let (doc, warnings) = read(json!({
            "color": {
                "primary": {"$type": "color", "$value": "#3366ff"},
                "broken": {"$type": "color", "$description": "no value yet"}
            },
            "misc": {"flag": {"$type": "boolean", "$value": true}}
        }));
        assert_eq!(doc.tokens.colors.len(), 1);
        assert_eq!(warnings.len(), 2);
        assert!(warnings[0].starts_with("color.broken"), "{warnings:?}");
        assert!(warnings[0].contains("no `$value`"));
        assert!(warnings[1].starts_with("misc.flag"));
    }
}
