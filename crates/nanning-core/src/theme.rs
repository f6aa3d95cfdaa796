//! Theme model

pub mod presets;

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{NanningError, Result};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeMode {
    #[default]
    Light,
    Dark,
    Auto,
}

impl ThemeMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ThemeMode::Light => "light",
            ThemeMode::Dark => "dark",
            ThemeMode::Auto => "auto",
        }
    }
}

impl fmt::Display for ThemeMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ThemeMode {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "light" => Ok(ThemeMode::Light),
            "dark" => Ok(ThemeMode::Dark),
            "auto" => Ok(ThemeMode::Auto),
            other => Err(format!(
                "unknown theme mode '{}' (expected light, dark or auto)",
                other
            )),
        }
    }
}

/// One stop of a gradient; `position` is a percentage in `[0, 100]`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColorStop {
    pub color: String,
    pub position: f64,
}

/// How the gradient layer composites over the window background
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BlendMode {
    Normal,
    Multiply,
    Screen,
    Overlay,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct Gradient {
    /// Degrees, `[0, 360]`
    #[serde(default)]
    pub angle: f64,
    pub stops: Vec<ColorStop>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub blend_mode: Option<BlendMode>,
    /// `[0, 1]`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub intensity: Option<f64>,
}

/// The fixed set of color roles a theme defines
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ColorPalette {
    pub primary: String,
    pub secondary: String,
    pub accent: String,
    pub background: String,
    pub foreground: String,
    pub muted: String,
    pub border: String,
}

/// Frosted-glass surface parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Glass {
    /// `[0, 1]`
    pub opacity: f64,
    /// Blur radius in pixels
    pub blur: f64,
    /// `[0, 1]`
    pub border_opacity: f64,
}

/// A stored theme
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Theme {
    pub id: String,
    pub name: String,
    pub mode: ThemeMode,
    pub gradient: Gradient,
    pub colors: ColorPalette,
    pub glass: Glass,
    pub is_preset: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Input to `save_theme`. Timestamps are owned by the store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ThemeInput {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub mode: ThemeMode,
    pub gradient: Gradient,
    pub colors: ColorPalette,
    pub glass: Glass,
    #[serde(default)]
    pub is_preset: bool,
}

impl ThemeInput {
    pub(crate) fn validate(&self) -> Result<()> {
        if self.id.trim().is_empty() {
            return Err(NanningError::invalid_input("id", "theme id is required"));
        }
        if self.name.trim().is_empty() {
            return Err(NanningError::invalid_input("name", "theme name is required"));
        }
        if !(0.0..=360.0).contains(&self.gradient.angle) {
            return Err(NanningError::invalid_input(
                "gradient",
                format!("angle {} is outside [0, 360]", self.gradient.angle),
            ));
        }
        for stop in &self.gradient.stops {
            if !(0.0..=100.0).contains(&stop.position) {
                return Err(NanningError::invalid_input(
                    "gradient",
                    format!(
                        "stop {} has position {} outside [0, 100]",
                        stop.color, stop.position
                    ),
                ));
            }
        }
        if let Some(intensity) = self.gradient.intensity {
            if !(0.0..=1.0).contains(&intensity) {
                return Err(NanningError::invalid_input(
                    "gradient",
                    format!("intensity {} is outside [0, 1]", intensity),
                ));
            }
        }
        for (name, value) in [
            ("glass.opacity", self.glass.opacity),
            ("glass.borderOpacity", self.glass.border_opacity),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(NanningError::invalid_input(
                    "glass",
                    format!("{} {} is outside [0, 1]", name, value),
                ));
            }
        }
        if self.glass.blur < 0.0 || !self.glass.blur.is_finite() {
            return Err(NanningError::invalid_input(
                "glass",
                format!("blur {} must be a non-negative number", self.glass.blur),
            ));
        }
        Ok(())
    }
}

impl From<Theme> for ThemeInput {
    fn from(theme: Theme) -> Self {
        Self {
            id: theme.id,
            name: theme.name,
            mode: theme.mode,
            gradient: theme.gradient,
            colors: theme.colors,
            glass: theme.glass,
            is_preset: theme.is_preset,
        }
    }
}
