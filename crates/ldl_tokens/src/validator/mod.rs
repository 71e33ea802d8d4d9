//! Token document validator
//!
//! Validation never fails: every rule runs over the whole document and the
//! findings come back as an ordered list of [`ValidationIssue`]s. Issues are
//! ordered by location: the schema version first, then the base groups in
//! category order, then each mode in document order, then unrecognized
//! top-level groups. Within a group, entries are visited in key order.

mod color_syntax;
mod issue;

use std::borrow::Cow;
use std::sync::OnceLock;

use regex::Regex;
use rustc_hash::{FxHashMap, FxHashSet};

pub use color_syntax::is_css_color;
pub use issue::*;

use crate::tokens::units::{is_bare_zero, split_number_unit, unit_matches};
use crate::tokens::{parse_alias, ColorToken, ColorValue, TokenCategory, TokenDocument, TokenGroup, TokenSet, UnitKind};

const SUPPORTED_MAJOR: u32 = 1;

/// Names that collide with CSS-wide keywords or with words of the native
/// document shape. Compared case-insensitively.
const RESERVED_NAMES: &[&str] = &[
    "inherit",
    "initial",
    "unset",
    "revert",
    "revert-layer",
    "default",
    "ref",
    "modes",
    "version",
];

fn name_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^[A-Za-z0-9_.-]+$").expect("token name pattern is valid"))
}

/// Validate a document
pub fn validate(document: &TokenDocument) -> ValidationResult {
    let mut issues = Vec::new();
    check_version(&document.version, &mut issues);

    check_set(&document.tokens, None, "", &mut issues);
    for (mode, set) in &document.modes {
        let prefix = format!("modes.{mode}.");
        check_set(set, Some(&document.tokens), &prefix, &mut issues);
    }

    for key in document.extensions.keys() {
        issues.push(ValidationIssue::new(
            IssueCode::UnknownGroup,
            key.as_str(),
            format!("unrecognized group `{key}` is kept but not generated"),
        ));
    }
    ValidationResult::from_issues(issues)
}

/// Whether the document has no error-level issues
pub fn is_valid(document: &TokenDocument) -> bool {
    validate(document).valid
}

/// Only the error-level issues
pub fn get_errors(document: &TokenDocument) -> Vec<ValidationIssue> {
    validate(document)
        .issues
        .into_iter()
        .filter(ValidationIssue::is_error)
        .collect()
}

fn check_version(version: &str, issues: &mut Vec<ValidationIssue>) {
    let major = version
        .trim()
        .split('.')
        .next()
        .and_then(|m| m.parse::<u32>().ok());
    if major != Some(SUPPORTED_MAJOR) {
        issues.push(ValidationIssue::new(
            IssueCode::UnsupportedVersion,
            "version",
            format!("schema version `{version}` is not supported (expected {SUPPORTED_MAJOR}.x)"),
        ));
    }
}

fn check_set(set: &TokenSet, base: Option<&TokenSet>, prefix: &str, issues: &mut Vec<ValidationIssue>) {
    check_colors(set, base, prefix, issues);
    for category in TokenCategory::scalar() {
        let Some(group) = set.scalar_group(*category) else {
            continue;
        };
        let base_group = base.and_then(|b| b.scalar_group(*category));
        check_scalars(*category, group, base_group, prefix, issues);
    }
}

/// Reports duplicate and badly formed names. Returns `false` for entries
/// that repeat an earlier name; their values are not checked again.
fn check_name<'a>(
    name: &'a str,
    path: &str,
    seen: &mut FxHashSet<&'a str>,
    issues: &mut Vec<ValidationIssue>,
) -> bool {
    if !seen.insert(name) {
        issues.push(ValidationIssue::new(
            IssueCode::DuplicateName,
            path,
            format!("`{name}` is defined more than once in this group"),
        ));
        return false;
    }
    if !name_regex().is_match(name) {
        issues.push(ValidationIssue::new(
            IssueCode::InvalidName,
            path,
            format!("`{name}` cannot be used in a CSS identifier"),
        ));
    } else if RESERVED_NAMES.contains(&name.to_ascii_lowercase().as_str()) {
        issues.push(ValidationIssue::new(
            IssueCode::ReservedName,
            path,
            format!("`{name}` is a reserved word"),
        ));
    }
    true
}

fn check_override<T: PartialEq>(
    name: &str,
    value: &T,
    base: Option<&TokenGroup<T>>,
    path: &str,
    issues: &mut Vec<ValidationIssue>,
) {
    let Some(base) = base else {
        return;
    };
    match base.get(name) {
        None => issues.push(ValidationIssue::new(
            IssueCode::ModeNewKey,
            path,
            format!("mode defines `{name}`, which the base document does not"),
        )),
        Some(original) if original == value => issues.push(ValidationIssue::new(
            IssueCode::RedundantOverride,
            path,
            "same value as the base document",
        )),
        Some(_) => {}
    }
}

fn check_colors(set: &TokenSet, base: Option<&TokenSet>, prefix: &str, issues: &mut Vec<ValidationIssue>) {
    // references inside a mode may point at base tokens
    let scope: Cow<'_, TokenGroup<ColorToken>> = match base {
        Some(base) => Cow::Owned(base.colors.overlaid(&set.colors)),
        None => Cow::Borrowed(&set.colors),
    };
    let mut seen = FxHashSet::default();
    let mut generated: FxHashMap<String, &str> = FxHashMap::default();

    for (name, token) in set.colors.iter() {
        let path = format!("{prefix}colors.{name}");
        if !check_name(name, &path, &mut seen, issues) {
            continue;
        }

        for (suffix, value) in token.leaves() {
            let leaf_path = if suffix.is_empty() {
                path.clone()
            } else {
                format!("{path}.{suffix}")
            };
            check_color_value(value, &scope, base.is_some(), &leaf_path, issues);
        }
        check_override(name, token, base.map(|b| &b.colors), &path, issues);

        for (suffix, _) in token.name_suffixes() {
            let id = format!("{name}{suffix}");
            match generated.get(&id) {
                Some(owner) => issues.push(ValidationIssue::new(
                    IssueCode::NameCollision,
                    path.as_str(),
                    format!("`{id}` is also generated by `{owner}`"),
                )),
                None => {
                    generated.insert(id, name);
                }
            }
        }
    }
}

fn check_color_value(
    value: &ColorValue,
    scope: &TokenGroup<ColorToken>,
    in_mode: bool,
    path: &str,
    issues: &mut Vec<ValidationIssue>,
) {
    match value {
        ColorValue::Literal(literal) if literal.trim().is_empty() => issues.push(
            ValidationIssue::new(IssueCode::EmptyValue, path, "color value is empty"),
        ),
        ColorValue::Literal(literal) if parse_alias(literal).is_some() => {
            issues.push(ValidationIssue::new(
                IssueCode::AliasLiteral,
                path,
                format!("literal `{literal}` has alias syntax and would read back as a reference"),
            ))
        }
        ColorValue::Literal(literal) => {
            if !is_css_color(literal) {
                issues.push(ValidationIssue::new(
                    IssueCode::InvalidColor,
                    path,
                    format!("`{literal}` is not a recognized CSS color"),
                ));
            }
        }
        ColorValue::Reference(target) => match follow_reference(scope, target) {
            Some(IssueCode::CircularReference) => issues.push(ValidationIssue::new(
                IssueCode::CircularReference,
                path,
                format!("reference to `{target}` never reaches a color value"),
            )),
            Some(code) => {
                let message = if in_mode {
                    format!("`{target}` is not defined in the base document or in this mode")
                } else {
                    format!("`{target}` is not a color token")
                };
                issues.push(ValidationIssue::new(code, path, message));
            }
            None => {}
        },
    }
}

/// Follow a reference chain. A missing token further down the chain is
/// reported on the token that holds the broken reference, not here.
fn follow_reference<'a>(colors: &'a TokenGroup<ColorToken>, target: &'a str) -> Option<IssueCode> {
    let mut seen = FxHashSet::default();
    let mut current = target;
    loop {
        if !seen.insert(current) {
            return Some(IssueCode::CircularReference);
        }
        let Some(token) = colors.get(current) else {
            return (current == target).then_some(IssueCode::UnresolvedReference);
        };
        match token.value() {
            ColorValue::Literal(_) => return None,
            ColorValue::Reference(next) => current = next,
        }
    }
}

fn check_scalars(
    category: TokenCategory,
    group: &TokenGroup<String>,
    base: Option<&TokenGroup<String>>,
    prefix: &str,
    issues: &mut Vec<ValidationIssue>,
) {
    let mut seen = FxHashSet::default();
    for (name, value) in group.iter() {
        let path = format!("{prefix}{}.{name}", category.path());
        if !check_name(name, &path, &mut seen, issues) {
            continue;
        }
        if value.trim().is_empty() {
            issues.push(ValidationIssue::new(IssueCode::EmptyValue, path.as_str(), "value is empty"));
        } else if let Some(kind) = category.unit_kind() {
            check_unit(kind, value, &path, issues);
        }
        check_override(name, value, base, &path, issues);
    }
}

fn check_unit(kind: UnitKind, value: &str, path: &str, issues: &mut Vec<ValidationIssue>) {
    let expected = match kind {
        UnitKind::Length => "a length unit",
        UnitKind::Time => "a time unit",
    };
    match split_number_unit(value) {
        Some((number, "")) if !is_bare_zero(kind, number) => issues.push(ValidationIssue::new(
            IssueCode::MissingUnit,
            path,
            format!("`{value}` has no unit, expected {expected}"),
        )),
        Some((_, unit)) if !unit.is_empty() && !unit_matches(kind, unit) => {
            issues.push(ValidationIssue::new(
                IssueCode::UnknownUnit,
                path,
                format!("`{unit}` is not {expected}"),
            ))
        }
        _ => {}
    }
}
