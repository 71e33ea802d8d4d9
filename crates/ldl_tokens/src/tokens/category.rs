//! Token categories

use std::fmt::{Display, Formatter};

/// Unit class a category expects on numeric values
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum UnitKind {
    /// CSS lengths (`px`, `rem`, `%`, ...)
    Length,
    /// CSS times (`ms`, `s`)
    Time,
}

/// The fixed set of recognized token categories
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum TokenCategory {
    Colors,
    FontFamilies,
    FontSizes,
    FontWeights,
    LineHeights,
    LetterSpacing,
    Spacing,
    Radii,
    Shadows,
    Durations,
    Easing,
}

impl TokenCategory {
    /// Every category in document traversal order.
    pub fn all() -> &'static [TokenCategory] {
        const CATEGORIES: [TokenCategory; 11] = [
            TokenCategory::Colors,
            TokenCategory::FontFamilies,
            TokenCategory::FontSizes,
            TokenCategory::FontWeights,
            TokenCategory::LineHeights,
            TokenCategory::LetterSpacing,
            TokenCategory::Spacing,
            TokenCategory::Radii,
            TokenCategory::Shadows,
            TokenCategory::Durations,
            TokenCategory::Easing,
        ];
        &CATEGORIES
    }

    /// Every category except colors, which carry a richer value type.
    pub fn scalar() -> &'static [TokenCategory] {
        &Self::all()[1..]
    }

    /// Locator of the group inside a document (`colors`, `typography.fontSizes`)
    pub fn path(self) -> &'static str {
        match self {
            Self::Colors => "colors",
            Self::FontFamilies => "typography.fontFamilies",
            Self::FontSizes => "typography.fontSizes",
            Self::FontWeights => "typography.fontWeights",
            Self::LineHeights => "typography.lineHeights",
            Self::LetterSpacing => "typography.letterSpacing",
            Self::Spacing => "spacing",
            Self::Radii => "radii",
            Self::Shadows => "shadows",
            Self::Durations => "durations",
            Self::Easing => "easing",
        }
    }

    /// Key of the group in the native JSON shape (last path segment)
    pub fn key(self) -> &'static str {
        match self.path().rsplit_once('.') {
            Some((_, key)) => key,
            None => self.path(),
        }
    }

    /// Whether the group lives under `typography`
    pub fn is_typography(self) -> bool {
        self.path().starts_with("typography.")
    }

    /// Slug used in generated identifiers (`--ldl-<slug>-<key>`)
    pub fn slug(self) -> &'static str {
        match self {
            Self::Colors => "color",
            Self::FontFamilies => "font-family",
            Self::FontSizes => "font-size",
            Self::FontWeights => "font-weight",
            Self::LineHeights => "line-height",
            Self::LetterSpacing => "letter-spacing",
            Self::Spacing => "spacing",
            Self::Radii => "radius",
            Self::Shadows => "shadow",
            Self::Durations => "duration",
            Self::Easing => "easing",
        }
    }

    /// Unit class numeric values must carry, if any
    pub fn unit_kind(self) -> Option<UnitKind> {
        match self {
            Self::FontSizes | Self::Spacing | Self::Radii => Some(UnitKind::Length),
            Self::Durations => Some(UnitKind::Time),
            _ => None,
        }
    }

    /// Resolve a group name used by one of the input dialects.
    ///
    /// Matching ignores case, `-` and `_`, so `border-radius`, `borderRadius`
    /// and `border_radius` all map to [`TokenCategory::Radii`].
    pub fn from_alias(name: &str) -> Option<Self> {
        let normalized: String = name
            .chars()
            .filter(|c| *c != '-' && *c != '_' && *c != ' ')
            .flat_map(char::to_lowercase)
            .collect();

        let category = match normalized.as_str() {
            "color" | "colors" | "colour" | "colours" | "palette" => Self::Colors,
            "fontfamily" | "fontfamilies" | "font" | "fonts" => Self::FontFamilies,
            "fontsize" | "fontsizes" => Self::FontSizes,
            "fontweight" | "fontweights" => Self::FontWeights,
            "lineheight" | "lineheights" | "leading" => Self::LineHeights,
            "letterspacing" | "letterspacings" | "tracking" => Self::LetterSpacing,
            "spacing" | "space" | "spacings" | "gap" => Self::Spacing,
            "radius" | "radii" | "borderradius" | "borderradii" | "rounded" => Self::Radii,
            "shadow" | "shadows" | "boxshadow" | "boxshadows" | "elevation" => Self::Shadows,
            "duration" | "durations" | "transitionduration" => Self::Durations,
            "easing" | "easings" | "ease" | "cubicbezier" | "timingfunction" => Self::Easing,
            _ => return None,
        };
        Some(category)
    }

    /// Resolve a DTCG / Tokens Studio `type` value.
    ///
    /// Returns `None` for types whose category depends on the group they
    /// appear in (`dimension`, `number`, `sizing`).
    pub fn from_type(kind: &str) -> Option<Self> {
        match kind {
            "color" => Some(Self::Colors),
            "fontFamily" | "fontFamilies" => Some(Self::FontFamilies),
            "fontSize" | "fontSizes" => Some(Self::FontSizes),
            "fontWeight" | "fontWeights" => Some(Self::FontWeights),
            "lineHeight" | "lineHeights" => Some(Self::LineHeights),
            "letterSpacing" => Some(Self::LetterSpacing),
            "spacing" => Some(Self::Spacing),
            "borderRadius" => Some(Self::Radii),
            "shadow" | "boxShadow" => Some(Self::Shadows),
            "duration" => Some(Self::Durations),
            "cubicBezier" => Some(Self::Easing),
            _ => None,
        }
    }
}

impl Display for TokenCategory {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.path())
    }
}
