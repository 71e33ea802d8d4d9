//! Document cascade
//!
//! Overlays are applied in order on top of the base. Every group merges
//! leaf by leaf: a token in a later overlay replaces the token of the same
//! name and new names are appended, so the base keeps its ordering.

use tracing::debug;

use crate::tokens::{TokenDocument, SCHEMA_VERSION};

/// Merge `overlays` into `base`, later documents winning.
///
/// Modes are unioned; a mode present in several documents merges leaf by
/// leaf like the base. `name`, `description` and a non-default `version`
/// from later documents replace earlier ones, as do extension groups.
pub fn merge_documents<'a>(
    base: &TokenDocument,
    overlays: impl IntoIterator<Item = &'a TokenDocument>,
) -> TokenDocument {
    let mut merged = base.clone();
    for (index, overlay) in overlays.into_iter().enumerate() {
        debug!(
            overlay = index,
            tokens = overlay.token_count(),
            modes = overlay.modes.len(),
            "merging token document"
        );
        apply(&mut merged, overlay);
    }
    merged
}

fn apply(merged: &mut TokenDocument, overlay: &TokenDocument) {
    if overlay.version != SCHEMA_VERSION {
        merged.version = overlay.version.clone();
    }
    if overlay.name.is_some() {
        merged.name = overlay.name.clone();
    }
    if overlay.description.is_some() {
        merged.description = overlay.description.clone();
    }

    merged.tokens = merged.tokens.overlaid(&overlay.tokens);
    for (mode, set) in &overlay.modes {
        match merged.modes.get_mut(mode) {
            Some(existing) => *existing = existing.overlaid(set),
            None => {
                merged.modes.insert(mode.clone(), set.clone());
            }
        }
    }
    for (key, value) in &overlay.extensions {
        merged.extensions.insert(key.clone(), value.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tokens::{ColorToken, TokenCategory, TokenSet};
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn mode(color: &str, value: &str) -> TokenSet {
        let mut set = TokenSet::new();
        set.insert_color(color, ColorToken::literal(value));
        set
    }

    #[test]
    fn later_overlays_win_per_leaf() {
        let base = TokenDocument::new()
            .with_name("Base")
            .with_color("primary", ColorToken::literal("#00f"))
            .with_color("surface", ColorToken::literal("#fff"))
            .with_token(TokenCategory::Spacing, "1", "4px");
        let brand = TokenDocument::new()
            .with_color("primary", ColorToken::literal("#f00"))
            .with_color("accent", ColorToken::literal("#0f0"));
        let product = TokenDocument::new()
            .with_name("Product")
            .with_color("primary", ColorToken::literal("#f0f"));

        let merged = merge_documents(&base, [&brand, &product]);
        assert_eq!(merged.name.as_deref(), Some("Product"));
        assert_eq!(
            merged.tokens.colors.names().collect::<Vec<_>>(),
            vec!["primary", "surface", "accent"]
        );
        assert_eq!(merged.tokens.resolve_color("primary"), Some("#f0f"));
        assert_eq!(merged.tokens.spacing.get("1").map(String::as_str), Some("4px"));
    }

    #[test]
    fn modes_union_and_merge_by_leaf() {
        let base = TokenDocument::new()
            .with_color("surface", ColorToken::literal("#fff"))
            .with_mode("dark", mode("surface", "#111"));
        let mut dark = mode("surface", "#000");
        dark.insert_color("border", ColorToken::literal("#333"));
        let overlay = TokenDocument::new()
            .with_mode("dark", dark)
            .with_mode("contrast", mode("surface", "#fff"));

        let merged = merge_documents(&base, [&overlay]);
        assert_eq!(merged.modes.keys().collect::<Vec<_>>(), vec!["dark", "contrast"]);
        let dark = merged.mode("dark").unwrap();
        assert_eq!(dark.resolve_color("surface"), Some("#000"));
        assert_eq!(dark.resolve_color("border"), Some("#333"));
    }

    #[test]
    fn keeps_base_metadata_unless_overridden() {
        let mut base = TokenDocument::new().with_name("Base");
        base.version = "1.2".to_string();
        base.extensions.insert("brand".to_string(), json!({"tier": 1}));
        let mut overlay = TokenDocument::new();
        overlay.extensions.insert("brand".to_string(), json!({"tier": 2}));

        let merged = merge_documents(&base, [&overlay]);
        assert_eq!(merged.version, "1.2");
        assert_eq!(merged.name.as_deref(), Some("Base"));
        assert_eq!(merged.extensions["brand"], json!({"tier": 2}));
    }

    #[test]
    fn no_overlays_returns_a_copy() {
        let base = TokenDocument::new().with_color("primary", ColorToken::literal("#00f"));
        assert_eq!(merge_documents(&base, []), base);
    }
}
