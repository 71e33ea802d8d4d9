//! Tailwind CSS config
//!
//! Every value points at the custom property emitted by the CSS target, so
//! switching modes in CSS re-themes the utilities without regenerating the
//! config.

use super::js::JsValue;
use super::{header_text, identifier, GeneratorOptions};
use crate::tokens::{ColorToken, TokenCategory, TokenDocument, TokenSet};

/// `theme.extend` key for each category
fn theme_key(category: TokenCategory) -> &'static str {
    match category {
        TokenCategory::Colors => "colors",
        TokenCategory::FontFamilies => "fontFamily",
        TokenCategory::FontSizes => "fontSize",
        TokenCategory::FontWeights => "fontWeight",
        TokenCategory::LineHeights => "lineHeight",
        TokenCategory::LetterSpacing => "letterSpacing",
        TokenCategory::Spacing => "spacing",
        TokenCategory::Radii => "borderRadius",
        TokenCategory::Shadows => "boxShadow",
        TokenCategory::Durations => "transitionDuration",
        TokenCategory::Easing => "transitionTimingFunction",
    }
}

pub(super) fn render(document: &TokenDocument, options: &GeneratorOptions) -> String {
    // tokens only defined in a mode still need a utility
    let names = if options.include_modes {
        document
            .modes
            .values()
            .fold(document.tokens.clone(), |acc, mode| acc.overlaid(mode))
    } else {
        document.tokens.clone()
    };

    let mut out = String::new();
    if options.header {
        out.push_str(&format!("// {}\n", header_text(document)));
    }
    out.push_str("/** @type {import('tailwindcss').Config} */\n");
    out.push_str("module.exports = {\n  theme: {\n    extend: ");
    out.push_str(&extend_object(&names, options).render(2));
    out.push_str(",\n  },\n};\n");
    out
}

fn extend_object(set: &TokenSet, options: &GeneratorOptions) -> JsValue {
    let mut entries = Vec::new();
    if !set.colors.is_empty() {
        let colors = set
            .colors
            .iter()
            .map(|(name, token)| (name.to_string(), color_value(name, token, options)))
            .collect();
        entries.push((theme_key(TokenCategory::Colors).to_string(), JsValue::Object(colors)));
    }
    for category in TokenCategory::scalar() {
        let Some(group) = set.scalar_group(*category).filter(|g| !g.is_empty()) else {
            continue;
        };
        let values = group
            .names()
            .map(|name| (name.to_string(), var(options, *category, name)))
            .collect();
        entries.push((theme_key(*category).to_string(), JsValue::Object(values)));
    }
    JsValue::Object(entries)
}

/// Pairs become `{ DEFAULT, foreground }`, nesting for nested foregrounds
fn color_value(name: &str, token: &ColorToken, options: &GeneratorOptions) -> JsValue {
    match token.foreground() {
        None => var(options, TokenCategory::Colors, name),
        Some(foreground) => {
            let foreground_name = format!("{name}-foreground");
            JsValue::Object(vec![
                ("DEFAULT".to_string(), var(options, TokenCategory::Colors, name)),
                (
                    "foreground".to_string(),
                    color_value(&foreground_name, foreground, options),
                ),
            ])
        }
    }
}

fn var(options: &GeneratorOptions, category: TokenCategory, name: &str) -> JsValue {
    JsValue::string(format!("var(--{})", identifier(options, &[], category, name)))
}
