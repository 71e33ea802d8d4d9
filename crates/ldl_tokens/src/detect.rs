//! Input dialect detection
//!
//! Detection is a heuristic: every dialect's structural fingerprints are
//! scored over the whole input and the best score wins, so no single
//! top-level key decides the outcome. Inputs where nothing scores at least
//! [`MIN_CONFIDENCE`] are reported as [`InputFormat::Unknown`].

use std::fmt::{Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::trace;

use crate::raw::RawInput;

/// Minimum score a fingerprint needs before it is trusted
pub const MIN_CONFIDENCE: u32 = 2;

const MAX_DEPTH: usize = 32;
const LEAF_SCORE_CAP: u32 = 10;

/// Supported input dialects
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum InputFormat {
    /// Native Living Design Library shape
    Ldl,
    /// W3C Design Tokens Community Group format
    Dtcg,
    /// Figma Variables export
    FigmaVariables,
    /// Tokens Studio (Figma plugin) export
    TokensStudio,
    Unknown,
}

impl InputFormat {
    /// Fixed priority order used for tie-breaks and fallback parsing
    pub fn known() -> &'static [InputFormat] {
        const FORMATS: [InputFormat; 4] = [
            InputFormat::Ldl,
            InputFormat::Dtcg,
            InputFormat::FigmaVariables,
            InputFormat::TokensStudio,
        ];
        &FORMATS
    }

    /// Stable id for config and command lines
    pub fn id(self) -> &'static str {
        match self {
            Self::Ldl => "ldl",
            Self::Dtcg => "dtcg",
            Self::FigmaVariables => "figma-variables",
            Self::TokensStudio => "tokens-studio",
            Self::Unknown => "unknown",
        }
    }
}

impl Display for InputFormat {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for InputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "ldl" | "native" => Ok(Self::Ldl),
            "dtcg" | "w3c" => Ok(Self::Dtcg),
            "figma" | "figma-variables" => Ok(Self::FigmaVariables),
            "tokens-studio" | "tokensstudio" | "studio" => Ok(Self::TokensStudio),
            other => Err(format!("unknown input format `{other}`")),
        }
    }
}

/// Per-dialect fingerprint scores
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FormatScores {
    pub ldl: u32,
    pub dtcg: u32,
    pub figma_variables: u32,
    pub tokens_studio: u32,
}

impl FormatScores {
    pub fn get(&self, format: InputFormat) -> u32 {
        match format {
            InputFormat::Ldl => self.ldl,
            InputFormat::Dtcg => self.dtcg,
            InputFormat::FigmaVariables => self.figma_variables,
            InputFormat::TokensStudio => self.tokens_studio,
            InputFormat::Unknown => 0,
        }
    }

    /// Best-scoring dialect, ties resolved by [`InputFormat::known`] order
    pub fn best(&self) -> InputFormat {
        let mut best = InputFormat::Unknown;
        let mut best_score = MIN_CONFIDENCE.saturating_sub(1);
        for format in InputFormat::known() {
            let score = self.get(*format);
            if score > best_score {
                best = *format;
                best_score = score;
            }
        }
        best
    }
}

/// Outcome of a detection run
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Detection {
    pub format: InputFormat,
    pub scores: FormatScores,
}

/// Classify a parsed value
pub fn detect_format(value: &Value) -> InputFormat {
    detect_with_scores(value).format
}

/// Classify raw text; unreadable text is [`InputFormat::Unknown`].
pub fn detect_format_str(text: &str) -> InputFormat {
    match RawInput::Text(text).to_value() {
        Ok(value) => detect_format(&value),
        Err(_) => InputFormat::Unknown,
    }
}

/// Classify a value and report every fingerprint score
pub fn detect_with_scores(value: &Value) -> Detection {
    let scores = match value {
        Value::Object(root) => FormatScores {
            ldl: score_ldl(root),
            dtcg: score_dtcg(value),
            figma_variables: score_figma(root),
            tokens_studio: score_tokens_studio(root),
        },
        _ => FormatScores::default(),
    };
    let format = scores.best();
    trace!(?scores, %format, "detected token format");
    Detection { format, scores }
}

/// An object shaped like a DTCG or Tokens Studio leaf token
fn is_dialect_leaf(value: &Value) -> bool {
    match value {
        Value::Object(map) => map.contains_key("$value") || is_studio_leaf(map),
        _ => false,
    }
}

fn is_studio_leaf(map: &Map<String, Value>) -> bool {
    map.contains_key("value")
        && map.get("type").is_some_and(Value::is_string)
        && !map.keys().any(|k| k.starts_with('$'))
}

const LDL_GROUPS: &[&str] = &[
    "colors",
    "typography",
    "spacing",
    "radii",
    "shadows",
    "durations",
    "easing",
];

fn score_ldl(root: &Map<String, Value>) -> u32 {
    let mut score = 0;
    for key in LDL_GROUPS {
        let Some(Value::Object(group)) = root.get(*key) else {
            continue;
        };
        if contains_dialect_leaf(group, 0) {
            continue;
        }
        score += if *key == "colors" { 2 } else { 1 };
    }
    if let Some(Value::Object(modes)) = root.get("modes") {
        if modes.values().all(Value::is_object) && !modes.is_empty() {
            score += 1;
        }
    }
    if root.get("version").is_some_and(Value::is_string) {
        score += 1;
    }
    score
}

fn contains_dialect_leaf(map: &Map<String, Value>, depth: usize) -> bool {
    if depth > MAX_DEPTH {
        return false;
    }
    map.values().any(|v| {
        is_dialect_leaf(v)
            || matches!(v, Value::Object(inner) if contains_dialect_leaf(inner, depth + 1))
    })
}

fn score_dtcg(value: &Value) -> u32 {
    let mut values = 0u32;
    let mut typed = false;
    walk(value, 0, &mut |map: &Map<String, Value>| {
        if map.contains_key("$value") {
            values += 1;
        }
        if map.get("$type").is_some_and(Value::is_string) {
            typed = true;
        }
    });
    (values * 2).min(LEAF_SCORE_CAP) + u32::from(typed && values > 0)
}

fn score_tokens_studio(root: &Map<String, Value>) -> u32 {
    let mut leaves = 0u32;
    let mut dotted = false;
    walk_map(root, 0, &mut |map: &Map<String, Value>| {
        if is_studio_leaf(map) {
            leaves += 1;
        }
    });
    for (key, value) in root {
        if key.contains('.') && is_dialect_leaf(value) {
            dotted = true;
        }
    }
    let mut score = (leaves * 2).min(LEAF_SCORE_CAP);
    if root.contains_key("$themes") || root.contains_key("$metadata") {
        score += 3;
    }
    if dotted {
        score += 1;
    }
    score
}

fn score_figma(root: &Map<String, Value>) -> u32 {
    let scope = match root.get("meta") {
        Some(Value::Object(meta)) if meta.contains_key("variables") => meta,
        _ => root,
    };

    let mut score = 0;
    let variables: Vec<&Value> = match scope.get("variables") {
        Some(Value::Array(items)) => items.iter().collect(),
        Some(Value::Object(items)) => items.values().collect(),
        _ => Vec::new(),
    };
    let by_mode = variables
        .iter()
        .filter(|v| v.get("valuesByMode").is_some_and(Value::is_object))
        .count();
    if by_mode > 0 {
        score += 4;
    }
    if scope.get("variableCollections").is_some_and(|c| c.is_object() || c.is_array()) {
        score += 2;
    }
    if scope.get("modes").is_some_and(is_mode_table) {
        score += 2;
    }
    score
}

/// `[{modeId, name}]` or `{modeId: name}`
fn is_mode_table(value: &Value) -> bool {
    match value {
        Value::Array(items) => {
            !items.is_empty()
                && items.iter().all(|m| {
                    (m.get("modeId").is_some() || m.get("id").is_some())
                        && m.get("name").is_some_and(Value::is_string)
                })
        }
        Value::Object(map) => !map.is_empty() && map.values().all(Value::is_string),
        _ => false,
    }
}

fn walk(value: &Value, depth: usize, visit: &mut impl FnMut(&Map<String, Value>)) {
    if depth > MAX_DEPTH {
        return;
    }
    match value {
        Value::Object(map) => walk_map(map, depth, visit),
        Value::Array(items) => items.iter().for_each(|v| walk(v, depth + 1, visit)),
        _ => {}
    }
}

fn walk_map(map: &Map<String, Value>, depth: usize, visit: &mut impl FnMut(&Map<String, Value>)) {
    visit(map);
    for value in map.values() {
        walk(value, depth + 1, visit);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn detects_dtcg() {
        let input = json!({"color": {"primary": {"$value": "#3366ff", "$type": "color"}}});
        assert_eq!(detect_format(&input), InputFormat::Dtcg);
    }

    #[test]
    fn detects_native() {
        let input = json!({
            "version": "1.0",
            "colors": {"primary": "#3366ff", "surface": {"value": "#fff", "foreground": "#000"}},
            "spacing": {"1": "4px"}
        });
        assert_eq!(detect_format(&input), InputFormat::Ldl);
    }

    #[test]
    fn native_groups_holding_dtcg_leaves_are_dtcg() {
        let input = json!({"colors": {"primary": {"$value": "#3366ff"}}});
        assert_eq!(detect_format(&input), InputFormat::Dtcg);
    }

    #[test]
    fn detects_figma_variables() {
        let input = json!({
            "modes": [{"modeId": "1:0", "name": "Light"}],
            "variables": [
                {"name": "color/primary", "resolvedType": "COLOR", "valuesByMode": {"1:0": {"r": 0, "g": 0, "b": 1, "a": 1}}}
            ]
        });
        assert_eq!(detect_format(&input), InputFormat::FigmaVariables);
    }

    #[test]
    fn detects_tokens_studio() {
        let input = json!({
            "color.primary": {"value": "#3366ff", "type": "color"},
            "spacing.sm": {"value": "4", "type": "spacing"}
        });
        assert_eq!(detect_format(&input), InputFormat::TokensStudio);
    }

    #[test]
    fn weak_inputs_are_unknown() {
        assert_eq!(detect_format(&json!({"hello": "world"})), InputFormat::Unknown);
        assert_eq!(detect_format(&json!([1, 2, 3])), InputFormat::Unknown);
        assert_eq!(detect_format(&json!({"spacing": {"1": "4px"}})), InputFormat::Unknown);
        assert_eq!(detect_format_str("not json"), InputFormat::Unknown);
    }

    #[test]
    fn detection_is_deterministic() {
        let input = json!({
            "color": {"primary": {"$value": "#3366ff", "$type": "color"}},
            "spacing": {"sm": {"value": "4px", "type": "spacing"}}
        });
        let first = detect_with_scores(&input);
        for _ in 0..10 {
            assert_eq!(detect_with_scores(&input), first);
        }
    }

    #[test]
    fn parses_format_ids() {
        assert_eq!("figma".parse::<InputFormat>(), Ok(InputFormat::FigmaVariables));
        assert_eq!(InputFormat::TokensStudio.to_string(), "tokens-studio");
        assert!("xml".parse::<InputFormat>().is_err());
    }
}
