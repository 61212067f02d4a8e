use eyre::{eyre, Result, WrapErr};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::warn;

use super::axis::AxisFormat;

/// RGBA colour, components in `0.0..=1.0`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    pub const BLACK: Self = Self::new(0.0, 0.0, 0.0, 1.0);
    pub const WHITE: Self = Self::new(1.0, 1.0, 1.0, 1.0);
    pub const BLUE: Self = Self::new(0.0, 0.0, 1.0, 1.0);

    pub fn with_alpha(self, a: f32) -> Self {
        Self { a, ..self }
    }

    pub fn to_array(self) -> [f32; 4] {
        [self.r, self.g, self.b, self.a]
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::BLACK
    }
}

/// Serialises a [`Color`] as `#rrggbb` or `#rrggbbaa`.
pub mod hex_color {
    use super::*;
    use serde::{Deserializer, Serializer};

    pub fn serialize<S>(color: &Color, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&to_hex_string(*color))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> std::result::Result<Color, D::Error>
    where
        D: Deserializer<'de>,
    {
        let text = String::deserialize(deserializer)?;
        parse_hex_str(&text).map_err(serde::de::Error::custom)
    }

    pub fn to_hex_string(color: Color) -> String {
        let channel = |v: f32| (v.clamp(0.0, 1.0) * 255.0).round() as u8;
        let (r, g, b, a) = (channel(color.r), channel(color.g), channel(color.b), channel(color.a));
        if a == u8::MAX {
            format!("#{r:02x}{g:02x}{b:02x}")
        } else {
            format!("#{r:02x}{g:02x}{b:02x}{a:02x}")
        }
    }

    pub fn parse_hex_str(hex: &str) -> Result<Color> {
        let digits = hex.trim().trim_start_matches('#');
        if digits.len() != 6 && digits.len() != 8 {
            return Err(eyre!("colour `{hex}` must have 6 or 8 hex digits"));
        }
        let mut channels = [u8::MAX; 4];
        for (i, channel) in channels.iter_mut().enumerate().take(digits.len() / 2) {
            let pair = digits
                .get(i * 2..i * 2 + 2)
                .ok_or_else(|| eyre!("colour `{hex}` is not ASCII"))?;
            *channel = u8::from_str_radix(pair, 16)
                .wrap_err_with(|| format!("invalid hex digits `{pair}` in colour `{hex}`"))?;
        }
        let [r, g, b, a] = channels.map(|c| c as f32 / 255.0);
        Ok(Color::new(r, g, b, a))
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CurveConfig {
    #[serde(with = "hex_color")]
    pub color: Color,
    pub line_width: f32,
}

impl Default for CurveConfig {
    fn default() -> Self {
        Self {
            color: Color::BLUE,
            line_width: 2.0,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CorridorConfig {
    #[serde(with = "hex_color")]
    pub fill_color: Color,
    #[serde(with = "hex_color")]
    pub border_color: Color,
    pub border_width: f32,
}

impl Default for CorridorConfig {
    fn default() -> Self {
        Self {
            fill_color: Color::BLUE.with_alpha(0.3),
            border_color: Color::BLUE,
            border_width: 1.0,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CursorConfig {
    #[serde(with = "hex_color")]
    pub line_color: Color,
    #[serde(with = "hex_color")]
    pub label_color: Color,
    /// Offset of a value label from its anchor point, in pixels.
    pub label_offset: [f32; 2],
    /// Box reserved for one label when clamping it into the canvas.
    pub label_size: [f32; 2],
}

impl Default for CursorConfig {
    fn default() -> Self {
        Self {
            line_color: Color::WHITE.with_alpha(0.6),
            label_color: Color::WHITE,
            label_offset: [6.0, -18.0],
            label_size: [64.0, 16.0],
        }
    }
}

/// View wide settings, loadable from JSON.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlotConfig {
    pub min_ticks: usize,
    pub max_ticks: usize,
    pub x_format: AxisFormat,
    pub y_format: AxisFormat,
    pub curve: CurveConfig,
    pub corridor: CorridorConfig,
    pub cursor: CursorConfig,
}

impl Default for PlotConfig {
    fn default() -> Self {
        Self {
            min_ticks: 4,
            max_ticks: 10,
            x_format: AxisFormat::Numeric,
            y_format: AxisFormat::Numeric,
            curve: CurveConfig::default(),
            corridor: CorridorConfig::default(),
            cursor: CursorConfig::default(),
        }
    }
}

impl PlotConfig {
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: PlotConfig =
            serde_json::from_str(json).wrap_err("failed to parse plot configuration")?;
        Ok(config.validated())
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)
            .wrap_err_with(|| format!("failed to read plot configuration {}", path.display()))?;
        Self::from_json_str(&json)
            .wrap_err_with(|| format!("invalid plot configuration {}", path.display()))
    }

    pub fn to_json_string(&self) -> Result<String> {
        serde_json::to_string_pretty(self).wrap_err("failed to serialise plot configuration")
    }

    /// Clamps tick counts into a usable range.
    pub fn validated(mut self) -> Self {
        if self.min_ticks == 0 {
            warn!("min_ticks must be at least 1, using 1");
            self.min_ticks = 1;
        }
        if self.max_ticks < self.min_ticks {
            warn!(
                min_ticks = self.min_ticks,
                max_ticks = self.max_ticks,
                "max_ticks below min_ticks, raising it"
            );
            self.max_ticks = self.min_ticks;
        }
        self
    }
}
