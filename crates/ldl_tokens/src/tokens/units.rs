//! Unit handling for dimension-like token values
//!
//! Values are stored verbatim. These helpers only classify them, and apply
//! a default unit when a generator has to emit a unitless number.

use std::sync::OnceLock;

use regex::Regex;

use super::category::UnitKind;

const LENGTH_UNITS: &[&str] = &[
    "px", "rem", "em", "%", "vh", "vw", "vmin", "vmax", "dvh", "dvw", "svh", "svw", "lvh", "lvw",
    "ch", "ex", "cap", "ic", "lh", "rlh", "pt", "pc", "cm", "mm", "q", "in", "cqw", "cqh", "cqi",
    "cqb", "cqmin", "cqmax", "fr",
];

const TIME_UNITS: &[&str] = &["ms", "s"];

fn number_unit_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^([+-]?(?:\d+\.?\d*|\.\d+)(?:[eE][+-]?\d+)?)([A-Za-z%]*)$")
            .expect("number/unit pattern is valid")
    })
}

/// Split a numeric-looking value into its number and unit suffix.
///
/// Returns `None` for anything that is not a single number (`calc(...)`,
/// `var(--x)`, `auto`, `4px 8px`).
pub fn split_number_unit(value: &str) -> Option<(&str, &str)> {
    let caps = number_unit_regex().captures(value.trim())?;
    let number = caps.get(1)?.as_str();
    let unit = caps.get(2).map_or("", |m| m.as_str());
    Some((number, unit))
}

pub fn is_length_unit(unit: &str) -> bool {
    LENGTH_UNITS.contains(&unit.to_ascii_lowercase().as_str())
}

pub fn is_time_unit(unit: &str) -> bool {
    TIME_UNITS.contains(&unit.to_ascii_lowercase().as_str())
}

/// Whether `unit` is acceptable for the given unit class
pub fn unit_matches(kind: UnitKind, unit: &str) -> bool {
    match kind {
        UnitKind::Length => is_length_unit(unit),
        UnitKind::Time => is_time_unit(unit),
    }
}

/// Whether a bare zero is valid without a unit (CSS lengths only)
pub fn is_bare_zero(kind: UnitKind, number: &str) -> bool {
    kind == UnitKind::Length && number.parse::<f64>().is_ok_and(|n| n == 0.0)
}

/// Append `default_unit` to a unitless number, leaving everything else as-is.
pub fn apply_default_unit(value: &str, kind: UnitKind, default_unit: &str) -> String {
    match split_number_unit(value) {
        Some((number, "")) if !is_bare_zero(kind, number) => format!("{number}{default_unit}"),
        _ => value.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_numbers_and_units() {
        assert_eq!(split_number_unit("4px"), Some(("4", "px")));
        assert_eq!(split_number_unit("0.5rem"), Some(("0.5", "rem")));
        assert_eq!(split_number_unit("-2"), Some(("-2", "")));
        assert_eq!(split_number_unit("100%"), Some(("100", "%")));
        assert_eq!(split_number_unit("calc(1rem + 2px)"), None);
        assert_eq!(split_number_unit("4px 8px"), None);
    }

    #[test]
    fn default_unit_only_touches_unitless_numbers() {
        assert_eq!(apply_default_unit("4", UnitKind::Length, "px"), "4px");
        assert_eq!(apply_default_unit("0", UnitKind::Length, "px"), "0");
        assert_eq!(apply_default_unit("0", UnitKind::Time, "ms"), "0ms");
        assert_eq!(apply_default_unit("1rem", UnitKind::Length, "px"), "1rem");
        assert_eq!(apply_default_unit("auto", UnitKind::Length, "px"), "auto");
    }
}
