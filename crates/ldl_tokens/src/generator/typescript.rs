//! TypeScript `as const` token object with derived key types

use super::js::{token_set_entries, token_set_object, JsValue};
use super::{header_text, GeneratorOptions};
use crate::tokens::TokenDocument;

pub(super) fn render(document: &TokenDocument, options: &GeneratorOptions) -> String {
    let mut entries = token_set_entries(&document.tokens, &document.tokens, options);
    let with_modes = options.include_modes && !document.modes.is_empty();
    if with_modes {
        let modes = document
            .modes
            .iter()
            .map(|(mode, set)| {
                let scope = document.tokens.overlaid(set);
                (mode.clone(), token_set_object(set, &scope, options))
            })
            .collect();
        entries.push(("modes".to_string(), JsValue::Object(modes)));
    }

    let mut out = String::new();
    if options.header {
        out.push_str(&format!("// {}\n\n", header_text(document)));
    }
    out.push_str(&format!(
        "export const tokens = {} as const;\n\n",
        JsValue::Object(entries).render(0)
    ));
    out.push_str("export type Tokens = typeof tokens;\n");
    for category in document.tokens.populated_categories() {
        out.push_str(&format!(
            "export type {}Token = keyof typeof tokens.{};\n",
            pascal_case(category.slug()),
            category.path()
        ));
    }
    if with_modes {
        out.push_str("export type ModeName = keyof typeof tokens.modes;\n");
    } else {
        out.push_str("export type ModeName = never;\n");
    }
    out
}

fn pascal_case(slug: &str) -> String {
    slug.split('-')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_ascii_uppercase().to_string() + chars.as_str(),
                None => String::new(),
            }
        })
        .collect()
}
