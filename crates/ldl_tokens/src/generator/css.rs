//! CSS custom properties

use super::{color_var, header_text, identifier, scalar_output, GeneratorOptions};
use crate::tokens::{TokenCategory, TokenDocument, TokenSet};

pub(super) fn render(document: &TokenDocument, options: &GeneratorOptions) -> String {
    let mut out = String::new();
    if options.header {
        out.push_str(&format!("/* {} */\n\n", header_text(document)));
    }

    write_rule(&mut out, ":root", &document.tokens, options);
    if options.include_modes {
        for (mode, set) in &document.modes {
            out.push('\n');
            write_rule(&mut out, &options.mode_selector.selector(mode), set, options);
        }
    }
    out
}

fn write_rule(out: &mut String, selector: &str, set: &TokenSet, options: &GeneratorOptions) {
    out.push_str(&format!("{selector} {{\n"));
    for (property, value) in declarations(set, options) {
        out.push_str(&format!("  --{property}: {value};\n"));
    }
    out.push_str("}\n");
}

/// Every custom property of a token set in output order
fn declarations(set: &TokenSet, options: &GeneratorOptions) -> Vec<(String, String)> {
    let mut out = Vec::new();
    for (name, token) in set.colors.iter() {
        for (suffix, value) in token.name_suffixes() {
            let property = identifier(options, &[], TokenCategory::Colors, &format!("{name}{suffix}"));
            out.push((property, color_var(options, value)));
        }
    }
    for category in TokenCategory::scalar() {
        let Some(group) = set.scalar_group(*category) else {
            continue;
        };
        for (name, value) in group.iter() {
            out.push((
                identifier(options, &[], *category, name),
                scalar_output(options, *category, value),
            ));
        }
    }
    out
}
