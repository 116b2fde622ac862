//! Tab bar appearance, loadable from YAML.
//!
//! ```yaml
//! item_spacing: 4
//! max_rows: 2
//! icon_size: { width: 30, height: 30 }
//! selected_tint: "#3478f6"
//! animation_duration_ms: 250
//! animation_easing: cubic_out
//! ```
//!
//! Every field is optional; missing fields keep their defaults.

use crate::controller::DEFAULT_ANIMATION_DURATION;
use crate::error::ConfigError;
use crate::layout::ItemMetrics;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tabstrip_core::{Color, Easing, Size};

/// Visual and layout parameters of a [`crate::TabBar`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TabBarStyle {
    /// Spacing around every rendered item
    pub item_spacing: f32,
    /// Rows shown before trailing items fold behind the more entry
    pub max_rows: usize,
    /// Size icons are scaled to
    pub icon_size: Size,
    /// Title font size
    pub title_font_size: f32,
    /// Height reserved for the title line
    pub title_line_height: f32,
    /// Advance width of one title character
    pub glyph_width: f32,
    /// Bar background
    #[serde(with = "hex_color")]
    pub background: Color,
    /// Fill behind the selected entry when no background image is set
    #[serde(with = "hex_color")]
    pub selected_background: Color,
    /// Icon tint for idle entries
    #[serde(with = "hex_color")]
    pub normal_tint: Color,
    /// Icon tint for selected and highlighted entries
    #[serde(with = "hex_color")]
    pub selected_tint: Color,
    /// Title color for idle entries
    #[serde(with = "hex_color")]
    pub title_color: Color,
    /// Title color for selected and highlighted entries
    #[serde(with = "hex_color")]
    pub selected_title_color: Color,
    /// Badge fill
    #[serde(with = "hex_color")]
    pub badge_color: Color,
    /// Content cross-fade a controller runs after a tab tap
    pub animation_duration_ms: u64,
    /// Curve for item moves and content cross-fades
    pub animation_easing: Easing,
}

impl Default for TabBarStyle {
    fn default() -> Self {
        Self {
            item_spacing: 4.0,
            max_rows: 2,
            icon_size: Size::new(30.0, 30.0),
            title_font_size: 10.0,
            title_line_height: 12.0,
            glyph_width: 6.0,
            background: Color::new(0.1, 0.1, 0.1, 1.0),
            selected_background: Color::new(0.22, 0.22, 0.22, 1.0),
            normal_tint: Color::new(0.6, 0.6, 0.6, 1.0),
            selected_tint: Color::WHITE,
            title_color: Color::new(0.6, 0.6, 0.6, 1.0),
            selected_title_color: Color::WHITE,
            badge_color: Color::new(0.9, 0.22, 0.21, 1.0),
            animation_duration_ms: DEFAULT_ANIMATION_DURATION.as_millis() as u64,
            animation_easing: Easing::default(),
        }
    }
}

impl TabBarStyle {
    /// Parse and validate a style from YAML.
    ///
    /// # Errors
    ///
    /// Returns an error if the YAML is malformed or a value is unusable.
    pub fn from_yaml(yaml: &str) -> Result<Self, ConfigError> {
        let style: Self = serde_yaml_ng::from_str(yaml)?;
        style.validate()?;
        Ok(style)
    }

    /// Serialize to YAML.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_yaml(&self) -> Result<String, ConfigError> {
        Ok(serde_yaml_ng::to_string(self)?)
    }

    /// Check that every numeric field is usable for layout.
    ///
    /// # Errors
    ///
    /// Names the first offending field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.item_spacing.is_finite() || self.item_spacing < 0.0 {
            return Err(ConfigError::invalid(
                "item_spacing",
                format!("must be a non-negative number, got {}", self.item_spacing),
            ));
        }
        if self.max_rows == 0 {
            return Err(ConfigError::invalid("max_rows", "must be at least 1"));
        }
        if !(self.icon_size.width.is_finite() && self.icon_size.height.is_finite())
            || self.icon_size.width < 1.0
            || self.icon_size.height < 1.0
        {
            return Err(ConfigError::invalid(
                "icon_size",
                format!(
                    "must be at least 1x1, got {}x{}",
                    self.icon_size.width, self.icon_size.height
                ),
            ));
        }
        if !self.glyph_width.is_finite() || self.glyph_width <= 0.0 {
            return Err(ConfigError::invalid("glyph_width", "must be positive"));
        }
        if !self.title_line_height.is_finite() || self.title_line_height < 0.0 {
            return Err(ConfigError::invalid(
                "title_line_height",
                "must be a non-negative number",
            ));
        }
        if !self.title_font_size.is_finite() || self.title_font_size <= 0.0 {
            return Err(ConfigError::invalid("title_font_size", "must be positive"));
        }
        Ok(())
    }

    /// Measurements the layout engine sizes slots from.
    #[must_use]
    pub const fn metrics(&self) -> ItemMetrics {
        ItemMetrics {
            icon_size: self.icon_size,
            title_line_height: self.title_line_height,
            glyph_width: self.glyph_width,
        }
    }

    /// Duration of the content cross-fade.
    #[must_use]
    pub const fn animation_duration(&self) -> Duration {
        Duration::from_millis(self.animation_duration_ms)
    }
}

/// Colors as `#rrggbb` / `#rrggbbaa` strings.
mod hex_color {
    use serde::{de::Error as _, Deserialize, Deserializer, Serializer};
    use tabstrip_core::Color;

    pub(super) fn serialize<S: Serializer>(color: &Color, serializer: S) -> Result<S::Ok, S::Error> {
        let hex = if color.a < 1.0 {
            format!("{}{:02x}", color.to_hex(), color.to_rgba8()[3])
        } else {
            color.to_hex()
        };
        serializer.serialize_str(&hex)
    }

    pub(super) fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Color, D::Error> {
        let s = String::deserialize(deserializer)?;
        Color::from_hex(&s).map_err(|e| D::Error::custom(format!("color '{s}': {e}")))
    }
}
