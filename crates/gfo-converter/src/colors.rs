//! Caller-supplied color overrides for the page-level style variables.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::view::View;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ColorError {
    #[error("invalid color for {slot}: {value:?}")]
    InvalidColor { slot: &'static str, value: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorSlot {
    Highlight,
    Invalid,
    Primary,
    Secondary,
    Text,
}

impl ColorSlot {
    pub const ALL: [ColorSlot; 5] = [
        ColorSlot::Highlight,
        ColorSlot::Invalid,
        ColorSlot::Primary,
        ColorSlot::Secondary,
        ColorSlot::Text,
    ];

    /// Style variable on the document root.
    pub fn variable(self) -> &'static str {
        match self {
            ColorSlot::Highlight => "--highlight",
            ColorSlot::Invalid => "--invalid",
            ColorSlot::Primary => "--primary",
            ColorSlot::Secondary => "--secondary",
            ColorSlot::Text => "--text",
        }
    }

    /// Name of the global the hosting page declares before the converter starts.
    pub fn constant(self) -> &'static str {
        match self {
            ColorSlot::Highlight => "HIGHLIGHT_COLOR",
            ColorSlot::Invalid => "INVALID_COLOR",
            ColorSlot::Primary => "PRIMARY_COLOR",
            ColorSlot::Secondary => "SECONDARY_COLOR",
            ColorSlot::Text => "TEXT_COLOR",
        }
    }
}

/// Five optional colors. An empty value keeps the stylesheet default.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ColorConfig {
    pub highlight: String,
    pub invalid: String,
    pub primary: String,
    pub secondary: String,
    pub text: String,
}

impl ColorConfig {
    pub fn get(&self, slot: ColorSlot) -> &str {
        match slot {
            ColorSlot::Highlight => &self.highlight,
            ColorSlot::Invalid => &self.invalid,
            ColorSlot::Primary => &self.primary,
            ColorSlot::Secondary => &self.secondary,
            ColorSlot::Text => &self.text,
        }
    }

    pub fn set(&mut self, slot: ColorSlot, value: impl Into<String>) {
        let value = value.into();
        match slot {
            ColorSlot::Highlight => self.highlight = value,
            ColorSlot::Invalid => self.invalid = value,
            ColorSlot::Primary => self.primary = value,
            ColorSlot::Secondary => self.secondary = value,
            ColorSlot::Text => self.text = value,
        }
    }

    /// Rejects values that could not be a CSS color: hex notation, keywords
    /// and functional notations like `rgb(0 0 0 / 50%)` pass.
    pub fn validate(&self) -> Result<(), ColorError> {
        for slot in ColorSlot::ALL {
            let value = self.get(slot);
            if !value.is_empty() && !is_plausible_color(value) {
                return Err(ColorError::InvalidColor {
                    slot: slot.constant(),
                    value: value.to_string(),
                });
            }
        }
        Ok(())
    }

    /// The `var NAME = "value";` declarations for the hosting page. `var`
    /// keeps them readable as `window` properties.
    /// Call [`ColorConfig::validate`] first; values are emitted verbatim.
    pub fn page_constants_script(&self) -> String {
        ColorSlot::ALL
            .iter()
            .map(|slot| format!("var {} = \"{}\";\n", slot.constant(), self.get(*slot)))
            .collect()
    }
}

fn is_plausible_color(value: &str) -> bool {
    if let Some(hex) = value.strip_prefix('#') {
        return matches!(hex.len(), 3 | 4 | 6 | 8) && hex.chars().all(|c| c.is_ascii_hexdigit());
    }
    let first_ok = value.chars().next().is_some_and(|c| c.is_ascii_alphabetic());
    let rest_ok = value
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || matches!(c, '(' | ')' | ',' | '.' | '%' | ' ' | '-' | '/'));
    first_ok && rest_ok
}

/// Sets the style variable of every non-empty slot; empty slots stay untouched.
pub fn apply_color_overrides<V: View>(config: &ColorConfig, view: &mut V) {
    for slot in ColorSlot::ALL {
        let value = config.get(slot);
        if value.is_empty() {
            continue;
        }
        view.set_style_variable(slot.variable(), value);
    }
}
