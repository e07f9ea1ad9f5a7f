//! Per-record style and timing configuration
//!
//! Mirrors a flat parameter document: every field is a recognized option,
//! and unknown keys are rejected at deserialization.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::scatter::ScatterParams;

/// A stroke color: a fixed value passed through verbatim, or the randomize
/// sentinel (`"0"` in parameter files), which tells the renderer to pick a
/// uniformly random hue at render time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Color {
    Hex(String),
    Randomize,
}

impl Color {
    pub fn hex(value: impl Into<String>) -> Self {
        Color::Hex(value.into())
    }
}

impl From<String> for Color {
    fn from(s: String) -> Self {
        if s == "0" { Color::Randomize } else { Color::Hex(s) }
    }
}

impl From<Color> for String {
    fn from(c: Color) -> String {
        match c {
            Color::Hex(s) => s,
            Color::Randomize => "0".to_string(),
        }
    }
}

/// Style and timing for one collision record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct Style {
    pub primary_color: Color,
    pub secondary_color: Color,
    pub background_color: String,
    pub box_color: String,
    pub primary_stroke_width: f64,
    pub secondary_stroke_width: f64,
    /// Absolute start offset of the first grow, seconds
    pub primary_begin: f64,
    /// Grow duration of the primary paths, seconds
    pub primary_duration: f64,
    /// Grow duration of the scatter rays, seconds
    pub secondary_duration: f64,
    pub fade_primary: f64,
    pub fade_secondary: f64,
    /// Hold before the scatter fade starts, seconds
    pub freeze_secondary: f64,
    /// Fraction of the arena kept as margin by the renderer, [0, 1)
    pub relative_margin: f64,
    pub scatter: ScatterParams,
}

impl Default for Style {
    fn default() -> Self {
        Self {
            primary_color: Color::hex("#eb6e21"),
            secondary_color: Color::hex("#c9801a"),
            background_color: "#a6480f".to_string(),
            box_color: "#3c3c3c".to_string(),
            primary_stroke_width: 3.5,
            secondary_stroke_width: 3.5,
            primary_begin: 0.0,
            primary_duration: 5.0,
            secondary_duration: 0.4,
            fade_primary: 0.5,
            fade_secondary: 0.5,
            freeze_secondary: 0.0,
            relative_margin: 0.05,
            scatter: ScatterParams::default(),
        }
    }
}

impl Style {
    pub fn validate(&self) -> Result<()> {
        for (name, value) in [
            ("primary_stroke_width", self.primary_stroke_width),
            ("secondary_stroke_width", self.secondary_stroke_width),
            ("primary_begin", self.primary_begin),
            ("freeze_secondary", self.freeze_secondary),
        ] {
            if !(value.is_finite() && value >= 0.0) {
                return Err(Error::config(format!(
                    "{name} must be non-negative, got {value}"
                )));
            }
        }
        // SMIL rejects zero-length animation durations
        for (name, value) in [
            ("primary_duration", self.primary_duration),
            ("secondary_duration", self.secondary_duration),
            ("fade_primary", self.fade_primary),
            ("fade_secondary", self.fade_secondary),
        ] {
            if !(value.is_finite() && value > 0.0) {
                return Err(Error::config(format!(
                    "{name} must be positive, got {value}"
                )));
            }
        }
        if !(self.relative_margin.is_finite() && (0.0..1.0).contains(&self.relative_margin)) {
            return Err(Error::config(format!(
                "relative_margin must lie in [0, 1), got {}",
                self.relative_margin
            )));
        }
        self.scatter.validate()
    }
}
