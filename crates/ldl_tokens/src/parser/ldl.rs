//! Native LDL converter

use serde_json::{Map, Value};

use super::support::Warnings;
use crate::detect::InputFormat;
use crate::error::ParseError;
use crate::tokens::{color_token_from_json, kind_of, TokenCategory, TokenDocument, TokenSet};

pub(crate) fn convert(value: &Value, warnings: &mut Warnings) -> Result<TokenDocument, ParseError> {
    let Value::Object(root) = value else {
        return Err(ParseError::structure(InputFormat::Ldl, "root must be an object"));
    };

    let mut document = TokenDocument::new();
    for (key, value) in root {
        match key.as_str() {
            "version" => match value {
                Value::String(v) => document.version = v.clone(),
                Value::Number(n) => document.version = n.to_string(),
                other => warnings.push("version", format!("ignoring {} version", kind_of(other))),
            },
            "name" => document.name = metadata_string(value, "name", warnings),
            "description" => document.description = metadata_string(value, "description", warnings),
            "modes" => read_modes(value, &mut document, warnings),
            key if key.starts_with('$') => {}
            key if is_group_key(key) => read_group(&mut document.tokens, key, value, key, warnings),
            _ => {
                document.extensions.insert(key.clone(), value.clone());
            }
        }
    }
    Ok(document)
}

fn metadata_string(value: &Value, field: &str, warnings: &mut Warnings) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Null => None,
        other => {
            warnings.push(field, format!("expected a string, found {}", kind_of(other)));
            None
        }
    }
}

fn is_group_key(key: &str) -> bool {
    key == "colors"
        || key == "typography"
        || TokenCategory::scalar()
            .iter()
            .any(|c| !c.is_typography() && c.key() == key)
}

fn read_modes(value: &Value, document: &mut TokenDocument, warnings: &mut Warnings) {
    let Value::Object(modes) = value else {
        warnings.push("modes", format!("expected an object, found {}", kind_of(value)));
        return;
    };
    for (name, mode) in modes {
        let path = format!("modes.{name}");
        let Value::Object(groups) = mode else {
            warnings.push(path, format!("expected an object, found {}", kind_of(mode)));
            continue;
        };
        let set = read_set(groups, &path, warnings);
        if set.is_empty() {
            warnings.push(&path, "mode has no tokens");
        }
        document.modes.insert(name.clone(), set);
    }
}

fn read_set(groups: &Map<String, Value>, prefix: &str, warnings: &mut Warnings) -> TokenSet {
    let mut set = TokenSet::new();
    for (key, value) in groups {
        let path = format!("{prefix}.{key}");
        if is_group_key(key) {
            read_group(&mut set, key, value, &path, warnings);
        } else {
            warnings.push(path, "unrecognized group in mode (dropped)");
        }
    }
    set
}

fn read_group(set: &mut TokenSet, key: &str, value: &Value, path: &str, warnings: &mut Warnings) {
    let Value::Object(entries) = value else {
        warnings.push(path, format!("expected an object, found {}", kind_of(value)));
        return;
    };
    if entries.is_empty() {
        warnings.push(path, "empty group ignored");
        return;
    }

    match key {
        "colors" => {
            for (name, raw) in entries {
                match color_token_from_json(raw) {
                    Ok(token) => set.insert_color(name.clone(), token),
                    Err(e) => warnings.push(format!("{path}.{name}"), e),
                }
            }
        }
        "typography" => {
            for (sub, raw) in entries {
                let sub_path = format!("{path}.{sub}");
                match TokenCategory::from_alias(sub).filter(|c| c.is_typography()) {
                    Some(category) => read_scalars(set, category, raw, &sub_path, warnings),
                    None => warnings.push(sub_path, "unrecognized typography group (dropped)"),
                }
            }
        }
        _ => {
            if let Some(category) = TokenCategory::scalar().iter().find(|c| c.key() == key) {
                read_scalars(set, *category, value, path, warnings);
            }
        }
    }
}

fn read_scalars(
    set: &mut TokenSet,
    category: TokenCategory,
    value: &Value,
    path: &str,
    warnings: &mut Warnings,
) {
    let Value::Object(entries) = value else {
        warnings.push(path, format!("expected an object, found {}", kind_of(value)));
        return;
    };
    if entries.is_empty() {
        warnings.push(path, "empty group ignored");
        return;
    }
    for (name, raw) in entries {
        let converted = match raw {
            Value::String(s) => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            Value::Array(items) if category == TokenCategory::FontFamilies => items
                .iter()
                .map(Value::as_str)
                .collect::<Option<Vec<_>>>()
                .map(|names| names.join(", ")),
            _ => None,
        };
        match converted {
            Some(v) => {
                set.insert_scalar(category, name.clone(), v);
            }
            None => warnings.push(
                format!("{path}.{name}"),
                format!("expected a string or number, found {}", kind_of(raw)),
            ),
        }
    }
}
