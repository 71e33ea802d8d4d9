//! Figma Variables converter
//!
//! Reads both the REST API shape (`meta.variables` keyed by id plus
//! `meta.variableCollections`) and the flat plugin export (`variables` array
//! next to a root `modes` table). Every variable carries `valuesByMode`; the
//! value for its collection's default mode goes to the base document and
//! the other modes become overlays named after the mode, never its id.

use indexmap::IndexMap;
use rustc_hash::FxHashMap;
use serde_json::{Map, Value};

use super::support::{color_value, place, scalar_value_with_unit, Placement, TypeHint, Warnings};
use crate::detect::InputFormat;
use crate::error::ParseError;
use crate::tokens::{ColorToken, TokenCategory, TokenDocument, TokenSet};

const MAX_ALIAS_DEPTH: usize = 16;

struct Variable<'a> {
    id: Option<&'a str>,
    name: &'a str,
    resolved_type: &'a str,
    scopes: Vec<&'a str>,
    values: &'a Map<String, Value>,
    default_mode: &'a str,
    placement: Option<Placement>,
}

/// Mode id to mode name, plus the default mode of every collection
#[derive(Default)]
struct ModeTable<'a> {
    names: IndexMap<&'a str, &'a str>,
    defaults: FxHashMap<&'a str, &'a str>,
    root_default: Option<&'a str>,
}

impl<'a> ModeTable<'a> {
    fn read(scope: &'a Map<String, Value>) -> Result<Self, ParseError> {
        let mut table = ModeTable::default();

        for (key, collection) in entries(scope.get("variableCollections")) {
            let Some(modes) = collection.get("modes") else {
                continue;
            };
            let ids = table.add_modes(modes);
            let id = collection.get("id").and_then(Value::as_str).or(key);
            let default = collection
                .get("defaultModeId")
                .and_then(Value::as_str)
                .or_else(|| ids.first().copied());
            if let (Some(id), Some(default)) = (id, default) {
                table.defaults.insert(id, default);
            }
        }

        if let Some(modes) = scope.get("modes") {
            let ids = table.add_modes(modes);
            table.root_default = scope
                .get("defaultModeId")
                .and_then(Value::as_str)
                .or_else(|| ids.first().copied());
        }

        if table.names.is_empty() {
            return Err(ParseError::MissingModeTable);
        }
        for id in table.defaults.values().chain(table.root_default.iter()) {
            if !table.names.contains_key(id) {
                return Err(ParseError::UnknownModeId(id.to_string()));
            }
        }
        Ok(table)
    }

    /// `[{modeId, name}]` or `{modeId: name}`
    fn add_modes(&mut self, modes: &'a Value) -> Vec<&'a str> {
        let mut ids = Vec::new();
        match modes {
            Value::Array(items) => {
                for mode in items {
                    let id = mode
                        .get("modeId")
                        .or_else(|| mode.get("id"))
                        .and_then(Value::as_str);
                    if let (Some(id), Some(name)) = (id, mode.get("name").and_then(Value::as_str)) {
                        self.names.insert(id, name);
                        ids.push(id);
                    }
                }
            }
            Value::Object(map) => {
                for (id, name) in map {
                    if let Some(name) = name.as_str() {
                        self.names.insert(id.as_str(), name);
                        ids.push(id.as_str());
                    }
                }
            }
            _ => {}
        }
        ids
    }

    fn default_for(&self, collection: Option<&str>) -> Option<&'a str> {
        collection
            .and_then(|c| self.defaults.get(c).copied())
            .or(self.root_default)
            .or_else(|| self.names.keys().next().copied())
    }
}

/// Iterate an array or an id-keyed object, yielding the key when there is one
fn entries(value: Option<&Value>) -> Vec<(Option<&str>, &Value)> {
    match value {
        Some(Value::Array(items)) => items.iter().map(|v| (None, v)).collect(),
        Some(Value::Object(map)) => map.iter().map(|(k, v)| (Some(k.as_str()), v)).collect(),
        _ => Vec::new(),
    }
}

pub(crate) fn convert(value: &Value, warnings: &mut Warnings) -> Result<TokenDocument, ParseError> {
    let Value::Object(root) = value else {
        return Err(ParseError::structure(InputFormat::FigmaVariables, "root must be an object"));
    };
    let scope = match root.get("meta") {
        Some(Value::Object(meta)) if meta.contains_key("variables") => meta,
        _ => root,
    };
    if !scope.get("variables").is_some_and(|v| v.is_array() || v.is_object()) {
        return Err(ParseError::structure(
            InputFormat::FigmaVariables,
            "expected a `variables` list",
        ));
    }

    let table = ModeTable::read(scope)?;
    let variables = read_variables(scope, &table, warnings)?;
    let by_id: FxHashMap<&str, usize> = variables
        .iter()
        .enumerate()
        .filter_map(|(i, v)| v.id.map(|id| (id, i)))
        .collect();
    let converter = Converter {
        variables: &variables,
        by_id,
    };

    let mut base = TokenSet::new();
    let mut modes: IndexMap<String, TokenSet> = IndexMap::new();
    for variable in &variables {
        let Some(placement) = &variable.placement else {
            continue;
        };
        for (mode_id, raw) in variable.values {
            let path = format!("{}.{}", variable.name, mode_id);
            let set = if mode_id == variable.default_mode {
                &mut base
            } else {
                // every id was checked against the table in `read_variables`
                let name = table.names.get(mode_id.as_str()).copied().unwrap_or(mode_id.as_str());
                modes.entry(name.to_string()).or_default()
            };
            if placement.category == TokenCategory::Colors {
                match converter.color(raw) {
                    Ok(token) => set.insert_color(&placement.name, token),
                    Err(e) => warnings.push(path, e),
                }
            } else {
                match converter.scalar(placement.category, mode_id, raw, 0) {
                    Ok(v) => {
                        set.insert_scalar(placement.category, &placement.name, v);
                    }
                    Err(e) => warnings.push(path, e),
                }
            }
        }
    }

    let mut document = TokenDocument::new();
    document.tokens = base;
    document.modes = modes;
    Ok(document)
}

fn read_variables<'a>(
    scope: &'a Map<String, Value>,
    table: &ModeTable<'a>,
    warnings: &mut Warnings,
) -> Result<Vec<Variable<'a>>, ParseError> {
    let mut variables = Vec::new();
    for (index, (key, raw)) in entries(scope.get("variables")).into_iter().enumerate() {
        let location = key.map(str::to_string).unwrap_or_else(|| format!("variables.{index}"));
        let (Some(name), Some(values)) = (
            raw.get("name").and_then(Value::as_str),
            raw.get("valuesByMode").and_then(Value::as_object),
        ) else {
            warnings.push(location, "variable needs `name` and `valuesByMode` (dropped)");
            continue;
        };
        if let Some(unknown) = values.keys().find(|id| !table.names.contains_key(id.as_str())) {
            return Err(ParseError::UnknownModeId(unknown.clone()));
        }

        let collection = raw.get("variableCollectionId").and_then(Value::as_str);
        let Some(default_mode) = table.default_for(collection) else {
            return Err(ParseError::MissingModeTable);
        };
        let resolved_type = raw.get("resolvedType").and_then(Value::as_str).unwrap_or("");
        let scopes = raw
            .get("scopes")
            .and_then(Value::as_array)
            .map(|s| s.iter().filter_map(Value::as_str).collect())
            .unwrap_or_default();

        let mut variable = Variable {
            id: raw.get("id").and_then(Value::as_str).or(key),
            name,
            resolved_type,
            scopes,
            values,
            default_mode,
            placement: None,
        };
        if resolved_type == "BOOLEAN" {
            warnings.push(name, "boolean variables have no token category (dropped)");
        } else {
            variable.placement = placement_for(&variable);
            if variable.placement.is_none() {
                warnings.push(name, "cannot place variable in a token group (dropped)");
            }
        }
        variables.push(variable);
    }
    Ok(variables)
}

fn placement_for(variable: &Variable<'_>) -> Option<Placement> {
    let segments: Vec<&str> = variable.name.split('/').map(str::trim).collect();
    let hint = match variable.resolved_type {
        "COLOR" => TypeHint::Exact(TokenCategory::Colors),
        "FLOAT" => TypeHint::Number,
        _ => TypeHint::None,
    };
    place(&segments, hint).or_else(|| {
        let category = variable.scopes.iter().find_map(|s| scope_category(s))?;
        Some(Placement {
            category,
            name: segments.join("-"),
        })
    })
}

fn scope_category(scope: &str) -> Option<TokenCategory> {
    Some(match scope {
        "CORNER_RADIUS" => TokenCategory::Radii,
        "GAP" | "WIDTH_HEIGHT" => TokenCategory::Spacing,
        "FONT_SIZE" => TokenCategory::FontSizes,
        "FONT_FAMILY" => TokenCategory::FontFamilies,
        "FONT_WEIGHT" | "FONT_STYLE" => TokenCategory::FontWeights,
        "LINE_HEIGHT" => TokenCategory::LineHeights,
        "LETTER_SPACING" => TokenCategory::LetterSpacing,
        _ => return None,
    })
}

fn alias_target(value: &Value) -> Option<&str> {
    match value.get("type").and_then(Value::as_str) {
        Some("VARIABLE_ALIAS") => value.get("id").and_then(Value::as_str),
        _ => None,
    }
}

struct Converter<'v, 'a> {
    variables: &'v [Variable<'a>],
    by_id: FxHashMap<&'a str, usize>,
}

impl Converter<'_, '_> {
    fn target(&self, id: &str) -> Result<&Variable<'_>, String> {
        self.by_id
            .get(id)
            .map(|i| &self.variables[*i])
            .ok_or_else(|| format!("alias to unknown variable `{id}`"))
    }

    fn color(&self, raw: &Value) -> Result<ColorToken, String> {
        let Some(id) = alias_target(raw) else {
            return color_value(raw).map(ColorToken::Value);
        };
        let target = self.target(id)?;
        match &target.placement {
            Some(p) if p.category == TokenCategory::Colors => Ok(ColorToken::reference(&p.name)),
            _ => Err(format!("alias target `{}` is not a color", target.name)),
        }
    }

    /// Scalar aliases are resolved to the target's value in the same mode,
    /// or the target's default mode when it has no such mode.
    fn scalar(
        &self,
        category: TokenCategory,
        mode_id: &str,
        raw: &Value,
        depth: usize,
    ) -> Result<String, String> {
        let Some(id) = alias_target(raw) else {
            return scalar_value_with_unit(category, raw);
        };
        if depth >= MAX_ALIAS_DEPTH {
            return Err("alias chain too deep".to_string());
        }
        let target = self.target(id)?;
        let (next_mode, next) = match target.values.get(mode_id) {
            Some(v) => (mode_id, v),
            None => target
                .values
                .get(target.default_mode)
                .map(|v| (target.default_mode, v))
                .ok_or_else(|| format!("alias target `{}` has no value", target.name))?,
        };
        self.scalar(category, next_mode, next, depth + 1)
    }
}
