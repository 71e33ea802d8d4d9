//! The canonical token document

use indexmap::IndexMap;
use rustc_hash::FxHashSet;
use serde::Serialize;
use serde_json::Value;

use super::category::TokenCategory;
use super::color::{ColorToken, ColorValue};
use super::group::TokenGroup;

/// Schema version written by this crate
pub const SCHEMA_VERSION: &str = "1.0";

/// Typography scales
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TypographyTokens {
    #[serde(skip_serializing_if = "TokenGroup::is_empty")]
    pub font_families: TokenGroup<String>,
    #[serde(skip_serializing_if = "TokenGroup::is_empty")]
    pub font_sizes: TokenGroup<String>,
    #[serde(skip_serializing_if = "TokenGroup::is_empty")]
    pub font_weights: TokenGroup<String>,
    #[serde(skip_serializing_if = "TokenGroup::is_empty")]
    pub line_heights: TokenGroup<String>,
    #[serde(skip_serializing_if = "TokenGroup::is_empty")]
    pub letter_spacing: TokenGroup<String>,
}

impl TypographyTokens {
    pub fn is_empty(&self) -> bool {
        self.font_families.is_empty()
            && self.font_sizes.is_empty()
            && self.font_weights.is_empty()
            && self.line_heights.is_empty()
            && self.letter_spacing.is_empty()
    }
}

/// The token groups of a document or of one of its modes
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct TokenSet {
    #[serde(skip_serializing_if = "TokenGroup::is_empty")]
    pub colors: TokenGroup<ColorToken>,
    #[serde(skip_serializing_if = "TypographyTokens::is_empty")]
    pub typography: TypographyTokens,
    #[serde(skip_serializing_if = "TokenGroup::is_empty")]
    pub spacing: TokenGroup<String>,
    #[serde(skip_serializing_if = "TokenGroup::is_empty")]
    pub radii: TokenGroup<String>,
    #[serde(skip_serializing_if = "TokenGroup::is_empty")]
    pub shadows: TokenGroup<String>,
    #[serde(skip_serializing_if = "TokenGroup::is_empty")]
    pub durations: TokenGroup<String>,
    #[serde(skip_serializing_if = "TokenGroup::is_empty")]
    pub easing: TokenGroup<String>,
}

impl TokenSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Group for a non-color category; `None` for [`TokenCategory::Colors`]
    pub fn scalar_group(&self, category: TokenCategory) -> Option<&TokenGroup<String>> {
        let group = match category {
            TokenCategory::Colors => return None,
            TokenCategory::FontFamilies => &self.typography.font_families,
            TokenCategory::FontSizes => &self.typography.font_sizes,
            TokenCategory::FontWeights => &self.typography.font_weights,
            TokenCategory::LineHeights => &self.typography.line_heights,
            TokenCategory::LetterSpacing => &self.typography.letter_spacing,
            TokenCategory::Spacing => &self.spacing,
            TokenCategory::Radii => &self.radii,
            TokenCategory::Shadows => &self.shadows,
            TokenCategory::Durations => &self.durations,
            TokenCategory::Easing => &self.easing,
        };
        Some(group)
    }

    pub(crate) fn scalar_group_mut(&mut self, category: TokenCategory) -> Option<&mut TokenGroup<String>> {
        let group = match category {
            TokenCategory::Colors => return None,
            TokenCategory::FontFamilies => &mut self.typography.font_families,
            TokenCategory::FontSizes => &mut self.typography.font_sizes,
            TokenCategory::FontWeights => &mut self.typography.font_weights,
            TokenCategory::LineHeights => &mut self.typography.line_heights,
            TokenCategory::LetterSpacing => &mut self.typography.letter_spacing,
            TokenCategory::Spacing => &mut self.spacing,
            TokenCategory::Radii => &mut self.radii,
            TokenCategory::Shadows => &mut self.shadows,
            TokenCategory::Durations => &mut self.durations,
            TokenCategory::Easing => &mut self.easing,
        };
        Some(group)
    }

    /// Insert a scalar token; colors go through [`TokenSet::insert_color`].
    ///
    /// Returns `false` (and does nothing) for [`TokenCategory::Colors`].
    pub(crate) fn insert_scalar(
        &mut self,
        category: TokenCategory,
        name: impl Into<String>,
        value: impl Into<String>,
    ) -> bool {
        match self.scalar_group_mut(category) {
            Some(group) => {
                group.insert(name, value.into());
                true
            }
            None => false,
        }
    }

    pub(crate) fn insert_color(&mut self, name: impl Into<String>, token: ColorToken) {
        self.colors.insert(name, token);
    }

    /// Token names of a category in document order
    pub fn names(&self, category: TokenCategory) -> Vec<&str> {
        match self.scalar_group(category) {
            Some(group) => group.names().collect(),
            None => self.colors.names().collect(),
        }
    }

    pub fn contains(&self, category: TokenCategory, name: &str) -> bool {
        match self.scalar_group(category) {
            Some(group) => group.contains(name),
            None => self.colors.contains(name),
        }
    }

    /// Categories with at least one token, in traversal order
    pub fn populated_categories(&self) -> Vec<TokenCategory> {
        TokenCategory::all()
            .iter()
            .copied()
            .filter(|c| !self.names(*c).is_empty())
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.token_count() == 0
    }

    pub fn token_count(&self) -> usize {
        self.colors.len()
            + TokenCategory::scalar()
                .iter()
                .filter_map(|c| self.scalar_group(*c))
                .map(TokenGroup::len)
                .sum::<usize>()
    }

    /// Leaf-level overlay of `other` on top of `self`
    pub fn overlaid(&self, other: &TokenSet) -> TokenSet {
        TokenSet {
            colors: self.colors.overlaid(&other.colors),
            typography: TypographyTokens {
                font_families: self
                    .typography
                    .font_families
                    .overlaid(&other.typography.font_families),
                font_sizes: self.typography.font_sizes.overlaid(&other.typography.font_sizes),
                font_weights: self
                    .typography
                    .font_weights
                    .overlaid(&other.typography.font_weights),
                line_heights: self
                    .typography
                    .line_heights
                    .overlaid(&other.typography.line_heights),
                letter_spacing: self
                    .typography
                    .letter_spacing
                    .overlaid(&other.typography.letter_spacing),
            },
            spacing: self.spacing.overlaid(&other.spacing),
            radii: self.radii.overlaid(&other.radii),
            shadows: self.shadows.overlaid(&other.shadows),
            durations: self.durations.overlaid(&other.durations),
            easing: self.easing.overlaid(&other.easing),
        }
    }

    /// Follow references from the color token `name` down to a literal.
    ///
    /// Returns `None` for unknown names and reference cycles.
    pub fn resolve_color(&self, name: &str) -> Option<&str> {
        self.resolve_value(self.colors.get(name)?.value())
    }

    /// Resolve a color value (literal or reference) to a literal.
    pub fn resolve_value<'a>(&'a self, value: &'a ColorValue) -> Option<&'a str> {
        let mut seen = FxHashSet::default();
        let mut current = value;
        loop {
            match current {
                ColorValue::Literal(literal) => return Some(literal),
                ColorValue::Reference(target) => {
                    if !seen.insert(target.as_str()) {
                        return None;
                    }
                    current = self.colors.get(target)?.value();
                }
            }
        }
    }
}

/// A complete design-token document.
///
/// Documents are plain values: every operation in this crate takes them by
/// reference and returns new documents. Builders consume `self`.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct TokenDocument {
    pub version: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(flatten)]
    pub tokens: TokenSet,
    #[serde(skip_serializing_if = "IndexMap::is_empty")]
    pub modes: IndexMap<String, TokenSet>,
    /// Top-level groups this crate does not recognize, kept verbatim
    #[serde(flatten)]
    pub extensions: IndexMap<String, Value>,
}

impl Default for TokenDocument {
    fn default() -> Self {
        Self {
            version: SCHEMA_VERSION.to_string(),
            name: None,
            description: None,
            tokens: TokenSet::default(),
            modes: IndexMap::new(),
            extensions: IndexMap::new(),
        }
    }
}

impl TokenDocument {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_color(mut self, name: impl Into<String>, token: ColorToken) -> Self {
        self.tokens.insert_color(name, token);
        self
    }

    /// Add a scalar token. Colors are ignored here; use [`TokenDocument::with_color`].
    pub fn with_token(
        mut self,
        category: TokenCategory,
        name: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        self.tokens.insert_scalar(category, name, value);
        self
    }

    /// Add or replace a mode overlay
    pub fn with_mode(mut self, name: impl Into<String>, tokens: TokenSet) -> Self {
        self.modes.insert(name.into(), tokens);
        self
    }

    pub fn mode(&self, name: &str) -> Option<&TokenSet> {
        self.modes.get(name)
    }

    /// Base tokens with the named mode applied on top
    pub fn resolve_mode(&self, name: &str) -> Option<TokenSet> {
        self.modes.get(name).map(|mode| self.tokens.overlaid(mode))
    }

    /// No tokens in the base, no modes and no unrecognized groups
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty() && self.modes.is_empty() && self.extensions.is_empty()
    }

    /// Whether any recognized group holds a token (base or modes)
    pub fn has_tokens(&self) -> bool {
        !self.tokens.is_empty() || self.modes.values().any(|m| !m.is_empty())
    }

    /// Number of tokens in the base document
    pub fn token_count(&self) -> usize {
        self.tokens.token_count()
    }
}
