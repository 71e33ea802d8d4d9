//! Conversion helpers shared by the dialect converters

use rustc_hash::FxHashSet;
use serde_json::{Map, Number, Value};

use super::ParseWarning;
use crate::tokens::units::apply_default_unit;
use crate::tokens::{kind_of, ColorToken, ColorValue, TokenCategory, TokenSet, UnitKind};

/// Collects non-fatal conversion problems
#[derive(Debug, Default)]
pub(crate) struct Warnings {
    items: Vec<ParseWarning>,
}

impl Warnings {
    pub fn push(&mut self, path: impl Into<String>, message: impl Into<String>) {
        self.items.push(ParseWarning {
            path: path.into(),
            message: message.into(),
        });
    }

    pub fn into_vec(self) -> Vec<ParseWarning> {
        self.items
    }
}

/// What a dialect's `type` field says about a token's category
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum TypeHint {
    /// The type names exactly one category
    Exact(TokenCategory),
    /// A length whose category comes from the group (`dimension`, `sizing`)
    Dimension,
    /// A unitless number whose category comes from the group
    Number,
    /// No usable type information
    None,
}

impl TypeHint {
    /// Interpret a DTCG `$type` or Tokens Studio `type`
    pub fn from_type(kind: Option<&str>) -> Self {
        let Some(kind) = kind else {
            return Self::None;
        };
        if let Some(category) = TokenCategory::from_type(kind) {
            return Self::Exact(category);
        }
        match kind {
            "dimension" | "sizing" | "borderWidth" | "paragraphSpacing" => Self::Dimension,
            "number" | "opacity" => Self::Number,
            _ => Self::None,
        }
    }

    fn accepts(self, category: TokenCategory) -> bool {
        match self {
            Self::Exact(exact) => exact == category,
            Self::Dimension => matches!(
                category,
                TokenCategory::FontSizes
                    | TokenCategory::LetterSpacing
                    | TokenCategory::LineHeights
                    | TokenCategory::Spacing
                    | TokenCategory::Radii
            ),
            Self::Number => !matches!(
                category,
                TokenCategory::Colors
                    | TokenCategory::Shadows
                    | TokenCategory::FontFamilies
                    | TokenCategory::Easing
            ),
            Self::None => true,
        }
    }
}

/// Where a token lands: its category and name within that group
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct Placement {
    pub category: TokenCategory,
    pub name: String,
}

/// Place a token from its group path and type.
///
/// The first path segment (or pair of segments, so `font/size` works) that
/// names a category decides the group, and the segments after it form the
/// token name joined with `-`. Without such a segment an exact type decides
/// and the whole path is the name. `typography` segments are skipped as
/// pure containers.
pub(crate) fn place(segments: &[&str], hint: TypeHint) -> Option<Placement> {
    let segments: Vec<&str> = segments.iter().copied().filter(|s| !s.is_empty()).collect();
    let last = segments.len().checked_sub(1)?;

    for i in 0..last {
        if segments[i].eq_ignore_ascii_case("typography") {
            continue;
        }
        if i + 1 < last {
            let pair = format!("{}{}", segments[i], segments[i + 1]);
            if let Some(category) = TokenCategory::from_alias(&pair) {
                if hint.accepts(category) {
                    return Some(Placement {
                        category,
                        name: segments[i + 2..].join("-"),
                    });
                }
            }
        }
        if let Some(category) = TokenCategory::from_alias(segments[i]) {
            if hint.accepts(category) {
                return Some(Placement {
                    category,
                    name: segments[i + 1..].join("-"),
                });
            }
            break;
        }
    }

    let name = segments
        .iter()
        .copied()
        .filter(|s| !s.eq_ignore_ascii_case("typography"))
        .collect::<Vec<_>>()
        .join("-");
    match hint {
        TypeHint::Exact(category) if !name.is_empty() => Some(Placement { category, name }),
        _ => None,
    }
}

/// Default unit for unitless numbers of a category, if it has one
pub(crate) fn default_unit(category: TokenCategory) -> Option<&'static str> {
    match category.unit_kind() {
        Some(UnitKind::Length) => Some("px"),
        Some(UnitKind::Time) => Some("ms"),
        None => None,
    }
}

/// The dotted path inside a whole-value `{group.token}` alias
pub(crate) fn alias_path(raw: &str) -> Option<&str> {
    let inner = raw.trim().strip_prefix('{')?.strip_suffix('}')?.trim();
    if inner.is_empty() || inner.contains(['{', '}']) {
        return None;
    }
    Some(inner)
}

/// Replace whole-value aliases in the scalar groups of `set` with the
/// values they name.
///
/// Targets are looked up in `set`, then in `fallback` (the base set when
/// `set` is a mode). Aliases that never reach a value are dropped with a
/// warning located under `prefix`.
pub(crate) fn resolve_scalar_aliases(
    set: &mut TokenSet,
    fallback: Option<&TokenSet>,
    prefix: &str,
    warnings: &mut Warnings,
) {
    for &category in TokenCategory::scalar() {
        let Some(group) = set.scalar_group(category) else {
            continue;
        };
        let pending: Vec<(String, String)> = group
            .iter()
            .filter(|(_, value)| alias_path(value).is_some())
            .map(|(name, value)| (name.to_string(), value.clone()))
            .collect();
        for (name, alias) in pending {
            let resolved = follow_scalar_alias(set, fallback, &alias);
            let Some(group) = set.scalar_group_mut(category) else {
                continue;
            };
            match resolved {
                Some(value) => group.insert(name, value),
                None => {
                    group.remove(&name);
                    warnings.push(
                        format!("{prefix}{}.{name}", category.path()),
                        format!("alias `{alias}` does not resolve to a value (dropped)"),
                    );
                }
            }
        }
    }
}

fn follow_scalar_alias(set: &TokenSet, fallback: Option<&TokenSet>, alias: &str) -> Option<String> {
    let mut seen = FxHashSet::default();
    let mut current = alias.to_string();
    while let Some(path) = alias_path(&current) {
        if !seen.insert(path.to_string()) {
            return None;
        }
        let segments: Vec<&str> = path.split('.').collect();
        let target = place(&segments, TypeHint::None)?;
        let found = if target.category == TokenCategory::Colors {
            set.resolve_color(&target.name)
                .or_else(|| fallback.and_then(|base| base.resolve_color(&target.name)))
        } else {
            set.scalar_group(target.category)
                .and_then(|g| g.get(&target.name))
                .or_else(|| {
                    fallback
                        .and_then(|base| base.scalar_group(target.category))
                        .and_then(|g| g.get(&target.name))
                })
                .map(String::as_str)
        };
        current = found?.to_string();
    }
    Some(current)
}

/// Convert a scalar token value for `category` to its verbatim string form.
pub(crate) fn scalar_value(category: TokenCategory, value: &Value) -> Result<String, String> {
    match (category, value) {
        (_, Value::String(s)) => Ok(s.clone()),
        (_, Value::Number(n)) => Ok(n.to_string()),
        (TokenCategory::Shadows, Value::Object(_) | Value::Array(_)) => flatten_shadow(value),
        (TokenCategory::FontFamilies, Value::Array(items)) => {
            let names: Option<Vec<&str>> = items.iter().map(Value::as_str).collect();
            names
                .map(|n| n.join(", "))
                .ok_or_else(|| "font family list must contain strings".to_string())
        }
        (TokenCategory::Easing, Value::Array(items)) => cubic_bezier(items),
        (_, Value::Object(map)) if map.contains_key("value") && map.contains_key("unit") => {
            let number = match &map["value"] {
                Value::Number(n) => n.to_string(),
                Value::String(s) => s.clone(),
                other => return Err(format!("dimension value cannot be {}", kind_of(other))),
            };
            let unit = map["unit"].as_str().unwrap_or_default();
            Ok(format!("{number}{unit}"))
        }
        (_, other) => Err(format!(
            "unsupported {} value for {}",
            kind_of(other),
            category.path()
        )),
    }
}

/// Like [`scalar_value`], but numbers get the category's default unit.
pub(crate) fn scalar_value_with_unit(category: TokenCategory, value: &Value) -> Result<String, String> {
    let raw = scalar_value(category, value)?;
    match (value, category.unit_kind(), default_unit(category)) {
        (Value::Number(_), Some(kind), Some(unit)) => Ok(apply_default_unit(&raw, kind, unit)),
        _ => Ok(raw),
    }
}

fn cubic_bezier(items: &[Value]) -> Result<String, String> {
    let points: Option<Vec<&Number>> = items.iter().map(as_number).collect();
    match points {
        Some(p) if p.len() == 4 => Ok(format!("cubic-bezier({}, {}, {}, {})", p[0], p[1], p[2], p[3])),
        _ => Err("cubic bezier needs four numbers".to_string()),
    }
}

fn as_number(value: &Value) -> Option<&Number> {
    match value {
        Value::Number(n) => Some(n),
        _ => None,
    }
}

/// Flatten a composite shadow (object or list of objects) into a CSS
/// `box-shadow` string.
pub(crate) fn flatten_shadow(value: &Value) -> Result<String, String> {
    match value {
        Value::String(s) => Ok(s.clone()),
        Value::Array(layers) => {
            let parts: Result<Vec<String>, String> = layers.iter().map(flatten_shadow).collect();
            Ok(parts?.join(", "))
        }
        Value::Object(map) => {
            let length = |keys: &[&str]| -> Result<String, String> {
                let Some(v) = keys.iter().find_map(|k| map.get(*k)) else {
                    return Ok("0".to_string());
                };
                let raw = scalar_value(TokenCategory::Spacing, v)?;
                Ok(apply_default_unit(&raw, UnitKind::Length, "px"))
            };
            let x = length(&["offsetX", "x"])?;
            let y = length(&["offsetY", "y"])?;
            let blur = length(&["blur"])?;
            let spread = length(&["spread"])?;
            let color = match map.get("color") {
                Some(Value::String(s)) => s.clone(),
                Some(other) => color_object_literal(other)
                    .ok_or_else(|| "shadow color must be a string".to_string())?,
                None => "currentColor".to_string(),
            };
            let inset = map.get("inset").and_then(Value::as_bool).unwrap_or(false)
                || map.get("type").and_then(Value::as_str) == Some("innerShadow");
            let prefix = if inset { "inset " } else { "" };
            Ok(format!("{prefix}{x} {y} {blur} {spread} {color}"))
        }
        other => Err(format!("shadow cannot be {}", kind_of(other))),
    }
}

/// Convert a color value that is not a plain string (DTCG color objects,
/// Figma RGBA floats) into a CSS literal.
pub(crate) fn color_object_literal(value: &Value) -> Option<String> {
    let map = value.as_object()?;
    if let Some(hex) = map.get("hex").and_then(Value::as_str) {
        let alpha = map.get("alpha").and_then(Value::as_f64).unwrap_or(1.0);
        return Some(if alpha < 1.0 && hex.len() == 7 {
            format!("{hex}{:02x}", channel(alpha))
        } else {
            hex.to_string()
        });
    }
    if let (Some(r), Some(g), Some(b)) = (
        map.get("r").and_then(Value::as_f64),
        map.get("g").and_then(Value::as_f64),
        map.get("b").and_then(Value::as_f64),
    ) {
        let a = map.get("a").and_then(Value::as_f64).unwrap_or(1.0);
        let mut hex = format!("#{:02x}{:02x}{:02x}", channel(r), channel(g), channel(b));
        if a < 1.0 {
            hex.push_str(&format!("{:02x}", channel(a)));
        }
        return Some(hex);
    }
    let space = map.get("colorSpace").and_then(Value::as_str)?;
    let components: Vec<String> = map
        .get("components")?
        .as_array()?
        .iter()
        .map(|c| as_number(c).map_or_else(|| "none".to_string(), Number::to_string))
        .collect();
    let alpha = map.get("alpha").and_then(as_number);
    Some(match alpha {
        Some(a) if a.as_f64().is_some_and(|a| a < 1.0) => {
            format!("color({space} {} / {a})", components.join(" "))
        }
        _ => format!("color({space} {})", components.join(" ")),
    })
}

fn channel(unit: f64) -> u8 {
    (unit.clamp(0.0, 1.0) * 255.0).round() as u8
}

/// Read a color `$value`: strings (literals or aliases) or color objects
pub(crate) fn color_value(value: &Value) -> Result<ColorValue, String> {
    match value {
        Value::String(s) => Ok(ColorValue::from_str_value(s)),
        other => color_object_literal(other)
            .map(ColorValue::Literal)
            .ok_or_else(|| format!("unsupported color value ({})", kind_of(other))),
    }
}

/// Split a typography composite into the typography groups.
pub(crate) fn split_typography(
    set: &mut TokenSet,
    name: &str,
    composite: &Map<String, Value>,
    path: &str,
    warnings: &mut Warnings,
) {
    const FIELDS: [(&str, TokenCategory); 5] = [
        ("fontFamily", TokenCategory::FontFamilies),
        ("fontSize", TokenCategory::FontSizes),
        ("fontWeight", TokenCategory::FontWeights),
        ("lineHeight", TokenCategory::LineHeights),
        ("letterSpacing", TokenCategory::LetterSpacing),
    ];
    for (field, category) in FIELDS {
        let Some(value) = composite.get(field) else {
            continue;
        };
        match scalar_value(category, value) {
            Ok(v) => {
                set.insert_scalar(category, name, v);
            }
            Err(e) => warnings.push(format!("{path}.{field}"), e),
        }
    }
}

/// Insert a converted value into the right group of `set`.
pub(crate) fn insert_value(
    set: &mut TokenSet,
    placement: &Placement,
    value: &Value,
    path: &str,
    warnings: &mut Warnings,
) {
    if placement.category == TokenCategory::Colors {
        match color_value(value) {
            Ok(v) => set.insert_color(&placement.name, ColorToken::Value(v)),
            Err(e) => warnings.push(path, e),
        }
        return;
    }
    match scalar_value(placement.category, value) {
        Ok(v) => {
            set.insert_scalar(placement.category, &placement.name, v);
        }
        Err(e) => warnings.push(path, e),
    }
}
