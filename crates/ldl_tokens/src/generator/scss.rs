//! SCSS variables
//!
//! SCSS has no runtime cascade, so color references are resolved to
//! literals. Mode variables carry the mode name in the identifier and are
//! resolved against the base with the mode applied.

use super::{color_literal, header_text, identifier, scalar_output, GeneratorOptions};
use crate::tokens::{TokenCategory, TokenDocument, TokenSet};

pub(super) fn render(document: &TokenDocument, options: &GeneratorOptions) -> String {
    let mut out = String::new();
    if options.header {
        out.push_str(&format!("// {}\n\n", header_text(document)));
    }

    write_variables(&mut out, &[], &document.tokens, &document.tokens, options);
    if options.include_modes {
        for (mode, set) in &document.modes {
            let scope = document.tokens.overlaid(set);
            out.push_str(&format!("\n// {mode}\n"));
            write_variables(&mut out, &[mode.as_str()], set, &scope, options);
        }
    }
    out
}

fn write_variables(
    out: &mut String,
    prefix: &[&str],
    set: &TokenSet,
    scope: &TokenSet,
    options: &GeneratorOptions,
) {
    for (name, token) in set.colors.iter() {
        for (suffix, value) in token.name_suffixes() {
            let variable = identifier(options, prefix, TokenCategory::Colors, &format!("{name}{suffix}"));
            let value = color_literal(options, scope, value);
            out.push_str(&format!("${variable}: {value};\n"));
        }
    }
    for category in TokenCategory::scalar() {
        let Some(group) = set.scalar_group(*category) else {
            continue;
        };
        for (name, value) in group.iter() {
            let variable = identifier(options, prefix, *category, name);
            let value = scalar_output(options, *category, value);
            out.push_str(&format!("${variable}: {value};\n"));
        }
    }
}
