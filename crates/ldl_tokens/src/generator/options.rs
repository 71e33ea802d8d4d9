//! Generator options

use serde::{Deserialize, Serialize};

use crate::tokens::{TokenCategory, UnitKind};

/// Options shared by every output format
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct GeneratorOptions {
    /// Prefix of generated identifiers (`--ldl-color-primary`); empty for none
    #[serde(default = "default_prefix")]
    pub prefix: String,
    /// How CSS selects a mode
    #[serde(default)]
    pub mode_selector: ModeSelector,
    /// Emit mode overlays
    #[serde(default = "default_true")]
    pub include_modes: bool,
    /// Start output with a "generated" comment (formats that allow comments)
    #[serde(default = "default_true")]
    pub header: bool,
    /// Unit appended to unitless lengths
    #[serde(default = "default_length_unit")]
    pub length_unit: String,
    /// Unit appended to unitless durations
    #[serde(default = "default_time_unit")]
    pub time_unit: String,
}

fn default_prefix() -> String {
    "ldl".to_string()
}

fn default_true() -> bool {
    true
}

fn default_length_unit() -> String {
    "px".to_string()
}

fn default_time_unit() -> String {
    "ms".to_string()
}

impl Default for GeneratorOptions {
    fn default() -> Self {
        Self {
            prefix: default_prefix(),
            mode_selector: ModeSelector::default(),
            include_modes: true,
            header: true,
            length_unit: default_length_unit(),
            time_unit: default_time_unit(),
        }
    }
}

impl GeneratorOptions {
    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = prefix.into();
        self
    }

    pub fn with_mode_selector(mut self, selector: ModeSelector) -> Self {
        self.mode_selector = selector;
        self
    }

    pub fn without_header(mut self) -> Self {
        self.header = false;
        self
    }

    /// Default unit for a category's unitless numbers, if it takes one
    pub fn default_unit(&self, category: TokenCategory) -> Option<(UnitKind, &str)> {
        match category.unit_kind()? {
            UnitKind::Length => Some((UnitKind::Length, self.length_unit.as_str())),
            UnitKind::Time => Some((UnitKind::Time, self.time_unit.as_str())),
        }
    }
}

/// CSS selector strategy for mode rules
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum ModeSelector {
    /// `[data-theme="dark"]`
    Attribute {
        #[serde(default = "default_attribute")]
        name: String,
    },
    /// `.dark`, or `.theme-dark` with prefix `theme-`
    Class {
        #[serde(default)]
        prefix: String,
    },
}

fn default_attribute() -> String {
    "data-theme".to_string()
}

impl Default for ModeSelector {
    fn default() -> Self {
        Self::Attribute {
            name: default_attribute(),
        }
    }
}

impl ModeSelector {
    pub fn selector(&self, mode: &str) -> String {
        match self {
            Self::Attribute { name } => {
                format!("[{name}=\"{}\"]", mode.replace('\\', "\\\\").replace('"', "\\\""))
            }
            Self::Class { prefix } => format!(".{}", super::css_ident(&format!("{prefix}{mode}"))),
        }
    }
}
