//! Tokens Studio converter
//!
//! A Tokens Studio file is either one token set or, when `$metadata` or
//! `$themes` is present, several named sets. Leaves are `{value, type}`
//! objects; keys may be dotted (`color.primary`) or nested, and both are
//! split into the same group path.
//!
//! With multiple sets, the sets every theme enables form the base and each
//! theme's remaining sets become a mode named after the theme. Without
//! themes the first set is the base and every other set is a mode named
//! after the set.

use indexmap::IndexMap;
use serde_json::{Map, Value};

use super::support::{insert_value, place, resolve_scalar_aliases, split_typography, TypeHint, Warnings};
use crate::detect::InputFormat;
use crate::error::ParseError;
use crate::tokens::{kind_of, TokenDocument, TokenSet};

const MAX_DEPTH: usize = 64;

pub(crate) fn convert(value: &Value, warnings: &mut Warnings) -> Result<TokenDocument, ParseError> {
    let Value::Object(root) = value else {
        return Err(ParseError::structure(InputFormat::TokensStudio, "root must be an object"));
    };

    let mut document = read_document(root, warnings);
    resolve_scalar_aliases(&mut document.tokens, None, "", warnings);
    for (mode, set) in &mut document.modes {
        resolve_scalar_aliases(set, Some(&document.tokens), &format!("modes.{mode}."), warnings);
    }
    Ok(document)
}

fn read_document(root: &Map<String, Value>, warnings: &mut Warnings) -> TokenDocument {
    let mut document = TokenDocument::new();
    if !root.contains_key("$metadata") && !root.contains_key("$themes") {
        read_set(root, &mut document.tokens, "", warnings);
        return document;
    }

    let sets = token_sets(root, warnings);
    let Some((first, _)) = sets.first() else {
        return document;
    };

    match root.get("$themes").and_then(Value::as_array) {
        Some(themes) if !themes.is_empty() => {
            let themes = read_themes(themes, warnings);
            let base: Vec<&str> = sets
                .iter()
                .map(|(name, _)| *name)
                .filter(|name| themes.iter().all(|t| t.enables(name)))
                .collect();
            for (name, set) in sets.iter().filter(|(name, _)| base.contains(name)) {
                read_set(set, &mut document.tokens, name, warnings);
            }
            for theme in &themes {
                let mut mode = TokenSet::new();
                for (name, set) in &sets {
                    if theme.enables(name) && !base.contains(name) {
                        read_set(set, &mut mode, name, warnings);
                    }
                }
                if !mode.is_empty() {
                    document.modes.insert(theme.name.to_string(), mode);
                }
            }
        }
        _ => {
            for (name, set) in &sets {
                if name == first {
                    read_set(set, &mut document.tokens, name, warnings);
                } else {
                    let mut mode = TokenSet::new();
                    read_set(set, &mut mode, name, warnings);
                    document.modes.insert(name.to_string(), mode);
                }
            }
        }
    }
    document
}

/// Token sets in `$metadata.tokenSetOrder`, then any sets the order omits
fn token_sets<'a>(
    root: &'a Map<String, Value>,
    warnings: &mut Warnings,
) -> Vec<(&'a str, &'a Map<String, Value>)> {
    let available: IndexMap<&str, &Map<String, Value>> = root
        .iter()
        .filter(|(key, _)| !key.starts_with('$'))
        .filter_map(|(key, value)| match value {
            Value::Object(set) => Some((key.as_str(), set)),
            other => {
                warnings.push(key, format!("token set must be an object, found {}", kind_of(other)));
                None
            }
        })
        .collect();

    let mut ordered: Vec<(&str, &Map<String, Value>)> = Vec::with_capacity(available.len());
    let order = root
        .get("$metadata")
        .and_then(|m| m.get("tokenSetOrder"))
        .and_then(Value::as_array);
    for name in order.into_iter().flatten().filter_map(Value::as_str) {
        match available.get_key_value(name) {
            Some((key, set)) if !ordered.iter().any(|(n, _)| n == key) => ordered.push((*key, *set)),
            Some(_) => {}
            None => warnings.push("$metadata.tokenSetOrder", format!("no token set named `{name}`")),
        }
    }
    for (name, set) in available {
        if !ordered.iter().any(|(n, _)| *n == name) {
            ordered.push((name, set));
        }
    }
    ordered
}

struct Theme<'a> {
    name: &'a str,
    selected: &'a Map<String, Value>,
}

impl Theme<'_> {
    fn enables(&self, set: &str) -> bool {
        matches!(
            self.selected.get(set).and_then(Value::as_str),
            Some("enabled" | "source")
        )
    }
}

fn read_themes<'a>(themes: &'a [Value], warnings: &mut Warnings) -> Vec<Theme<'a>> {
    let mut out = Vec::new();
    for (index, theme) in themes.iter().enumerate() {
        match (
            theme.get("name").and_then(Value::as_str),
            theme.get("selectedTokenSets").and_then(Value::as_object),
        ) {
            (Some(name), Some(selected)) => out.push(Theme { name, selected }),
            _ => warnings.push(
                format!("$themes.{index}"),
                "theme needs `name` and `selectedTokenSets` (dropped)",
            ),
        }
    }
    out
}

fn read_set(set: &Map<String, Value>, target: &mut TokenSet, prefix: &str, warnings: &mut Warnings) {
    walk(set, &mut Vec::new(), prefix, target, warnings, 0);
}

fn walk<'a>(
    group: &'a Map<String, Value>,
    path: &mut Vec<&'a str>,
    prefix: &str,
    target: &mut TokenSet,
    warnings: &mut Warnings,
    depth: usize,
) {
    if depth > MAX_DEPTH {
        warnings.push(locate(prefix, path), "group nesting too deep (dropped)");
        return;
    }
    for (key, child) in group {
        if key.starts_with('$') {
            continue;
        }
        let pushed = key.split('.').filter(|s| !s.is_empty()).count();
        path.extend(key.split('.').filter(|s| !s.is_empty()));
        match child {
            Value::Object(node) if is_leaf(node) => read_leaf(node, path, prefix, target, warnings),
            Value::Object(node) if is_valueless_leaf(node) => {
                warnings.push(locate(prefix, path), "token has no `value` (dropped)")
            }
            Value::Object(node) => walk(node, path, prefix, target, warnings, depth + 1),
            other => warnings.push(
                locate(prefix, path),
                format!("expected a token or group, found {}", kind_of(other)),
            ),
        }
        path.truncate(path.len() - pushed);
    }
}

fn is_leaf(node: &Map<String, Value>) -> bool {
    node.contains_key("value")
        && (node.get("type").is_some_and(Value::is_string) || !node["value"].is_object())
}

/// A `{type, description}` leaf that never got a value
fn is_valueless_leaf(node: &Map<String, Value>) -> bool {
    !node.contains_key("value")
        && node.get("type").is_some_and(Value::is_string)
        && node.values().all(|v| !v.is_object())
}

fn locate(prefix: &str, path: &[&str]) -> String {
    match (prefix.is_empty(), path.is_empty()) {
        (true, _) => path.join("."),
        (false, true) => prefix.to_string(),
        (false, false) => format!("{prefix}.{}", path.join(".")),
    }
}

fn read_leaf(
    node: &Map<String, Value>,
    path: &[&str],
    prefix: &str,
    target: &mut TokenSet,
    warnings: &mut Warnings,
) {
    let location = locate(prefix, path);
    let kind = node.get("type").and_then(Value::as_str);
    let value = &node["value"];

    if kind == Some("typography") {
        match value {
            Value::Object(composite) => {
                let name = typography_name(path);
                split_typography(target, &name, composite, &location, warnings);
            }
            // a reference to another typography token has nothing to split
            other => warnings.push(
                location,
                format!("typography token needs an object value, found {}", kind_of(other)),
            ),
        }
        return;
    }

    match place(path, TypeHint::from_type(kind)) {
        Some(placement) => insert_value(target, &placement, value, &location, warnings),
        None => warnings.push(
            location,
            format!("cannot place token of type `{}` (dropped)", kind.unwrap_or("none")),
        ),
    }
}

fn typography_name(path: &[&str]) -> String {
    let rest: Vec<&str> = path
        .iter()
        .copied()
        .filter(|s| !s.eq_ignore_ascii_case("typography"))
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
    use crate::tokens::ColorToken;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn read(value: Value) -> (TokenDocument, Vec<String>) {
        let mut warnings = Warnings::default();
        let doc = convert(&value, &mut warnings).unwrap();
        let paths = warnings.into_vec().into_iter().map(|w| w.path).collect();
        (doc, paths)
    }

    #[test]
    fn reads_flat_dotted_set() {
        let (doc, warnings) = read(json!({
            "color.primary": {"value": "#3366ff", "type": "color"},
            "color.link": {"value": "{color.primary}", "type": "color"},
            "spacing.sm": {"value": "4", "type": "spacing"},
            "shadow.md": {
                "value": {"x": 0, "y": 4, "blur": 6, "spread": 0, "color": "#0000001a", "type": "dropShadow"},
                "type": "boxShadow"
            }
        }));
        assert!(warnings.is_empty(), "{warnings:?}");
        assert_eq!(doc.tokens.colors.get("primary"), Some(&ColorToken::literal("#3366ff")));
        assert_eq!(doc.tokens.colors.get("link"), Some(&ColorToken::reference("primary")));
        assert_eq!(doc.tokens.spacing.get("sm").map(String::as_str), Some("4"));
        assert_eq!(
            doc.tokens.shadows.get("md").map(String::as_str),
            Some("0 4px 6px 0 #0000001a")
        );
    }

    #[test]
    fn splits_nested_typography() {
        let (doc, warnings) = read(json!({
            "typography": {
                "heading": {
                    "value": {"fontFamily": "Inter", "fontSize": "32", "fontWeight": "Bold"},
                    "type": "typography"
                }
            },
            "misc": {"enabled": {"value": "true", "type": "boolean"}}
        }));
        assert_eq!(warnings, vec!["misc.enabled".to_string()]);
        let typography = &doc.tokens.typography;
        assert_eq!(typography.font_families.get("heading").map(String::as_str), Some("Inter"));
        assert_eq!(typography.font_sizes.get("heading").map(String::as_str), Some("32"));
        assert_eq!(typography.font_weights.get("heading").map(String::as_str), Some("Bold"));
    }

    #[test]
    fn incomplete_tokens_are_warnings() {
        let (doc, warnings) = read(json!({
            "color": {
                "primary": {"value": "#3366ff", "type": "color"},
                "pending": {"type": "color", "description": "picked later"}
            }
        }));
        assert_eq!(warnings, vec!["color.pending".to_string()]);
        assert_eq!(doc.tokens.colors.len(), 1);
    }

    #[test]
    fn resolves_scalar_aliases_and_keeps_numbers() {
        let (doc, warnings) = read(json!({
            "spacing": {
                "sm": {"value": 4, "type": "spacing"},
                "md": {"value": "{spacing.sm}", "type": "spacing"},
                "xl": {"value": "{spacing.unknown}", "type": "spacing"}
            },
            "lineHeights": {"body": {"value": 1.33333, "type": "lineHeights"}}
        }));
        assert_eq!(warnings, vec!["spacing.xl".to_string()]);
        assert_eq!(doc.tokens.spacing.get("md").map(String::as_str), Some("4"));
        assert!(!doc.tokens.spacing.contains("xl"));
        assert_eq!(
            doc.tokens.typography.line_heights.get("body").map(String::as_str),
            Some("1.33333")
        );
    }

    #[test]
    fn themes_select_base_and_modes() {
        let (doc, warnings) = read(json!({
            "global": {
                "color": {
                    "primary": {"value": "#3366ff", "type": "color"},
                    "surface": {"value": "#ffffff", "type": "color"}
                }
            },
            "dark": {"color": {"surface": {"value": "#111111", "type": "color"}}},
            "$themes": [
                {"name": "Light", "selectedTokenSets": {"global": "enabled"}},
                {"name": "Dark", "selectedTokenSets": {"global": "source", "dark": "enabled"}}
            ],
            "$metadata": {"tokenSetOrder": ["global", "dark"]}
        }));
        assert!(warnings.is_empty(), "{warnings:?}");
        assert_eq!(doc.tokens.colors.len(), 2);
        assert_eq!(doc.modes.keys().collect::<Vec<_>>(), vec!["Dark"]);
        assert_eq!(
            doc.mode("Dark").and_then(|m| m.colors.get("surface")),
            Some(&ColorToken::literal("#111111"))
        );
    }

    #[test]
    fn sets_without_themes_become_modes() {
        let (doc, warnings) = read(json!({
            "$metadata": {"tokenSetOrder": ["core", "brand-b", "missing"]},
            "brand-b": {"color": {"primary": {"value": "#ff3366", "type": "color"}}},
            "core": {"color": {"primary": {"value": "#3366ff", "type": "color"}}}
        }));
        assert_eq!(warnings, vec!["$metadata.tokenSetOrder".to_string()]);
        assert_eq!(doc.tokens.colors.get("primary"), Some(&ColorToken::literal("#3366ff")));
        assert_eq!(
            doc.mode("brand-b").and_then(|m| m.colors.get("primary")),
            Some(&ColorToken::literal("#ff3366"))
        );
    }
}
