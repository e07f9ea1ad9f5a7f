//! Flat JSON parameter document
//!
//! A persisted key-value form of the recognized configuration options plus
//! the initial geometry. The document is optional input and output for the
//! CLI collaborator; the core never depends on it. Unknown keys are
//! rejected, not ignored, so typos surface instead of silently falling back
//! to defaults.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::geom::Rect;
use crate::scatter::ScatterParams;
use crate::style::{Color, Style};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct Params {
    // geometry
    pub width: f64,
    pub height: f64,
    pub initial_point: [f64; 2],
    pub seed: u64,
    // burst mode shape
    pub n_primaries: usize,
    pub n_bounces: usize,
    // scatter statistics
    pub n_secondaries: usize,
    pub alpha_std: f64,
    pub length_mean: f64,
    pub length_std: f64,
    // style and timing
    pub primary_color: Color,
    pub secondary_color: Color,
    pub background_color: String,
    pub box_color: String,
    pub primary_stroke_width: f64,
    pub secondary_stroke_width: f64,
    pub primary_begin: f64,
    pub primary_duration: f64,
    pub secondary_duration: f64,
    pub fade_primary: f64,
    pub fade_secondary: f64,
    pub freeze_secondary: f64,
    pub relative_margin: f64,
    // output
    pub output: String,
}

impl Default for Params {
    fn default() -> Self {
        Self {
            width: 800.0,
            height: 300.0,
            initial_point: [400.0, 150.0],
            seed: 0,
            n_primaries: 3,
            n_bounces: 15,
            n_secondaries: 30,
            alpha_std: 40.0,
            length_mean: 200.0,
            length_std: 100.0,
            primary_color: Color::hex("#ffffff"),
            secondary_color: Color::hex("#fff200"),
            background_color: "#c62100".to_string(),
            box_color: "#3c3c3c".to_string(),
            primary_stroke_width: 4.5,
            secondary_stroke_width: 2.5,
            primary_begin: 0.0,
            primary_duration: 3.0,
            secondary_duration: 0.3,
            fade_primary: 1.0,
            fade_secondary: 0.5,
            freeze_secondary: 1.5,
            relative_margin: 0.05,
            output: "rebound.svg".to_string(),
        }
    }
}

impl Params {
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| Error::config(format!("parameter document: {e}")))
    }

    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| Error::config(format!("parameter document: {e}")))
    }

    pub fn load(path: &Path) -> Result<Self> {
        let json = fs::read_to_string(path)
            .map_err(|e| Error::config(format!("read {}: {e}", path.display())))?;
        let params = Self::from_json(&json)?;
        log::info!("parameters loaded from {}", path.display());
        Ok(params)
    }

    pub fn store(&self, path: &Path) -> Result<()> {
        fs::write(path, self.to_json()?)
            .map_err(|e| Error::config(format!("write {}: {e}", path.display())))?;
        log::info!("parameters saved to {}", path.display());
        Ok(())
    }

    pub fn rect(&self) -> Result<Rect> {
        Rect::new(self.width, self.height)
    }

    /// The style these parameters describe
    pub fn style(&self) -> Style {
        Style {
            primary_color: self.primary_color.clone(),
            secondary_color: self.secondary_color.clone(),
            background_color: self.background_color.clone(),
            box_color: self.box_color.clone(),
            primary_stroke_width: self.primary_stroke_width,
            secondary_stroke_width: self.secondary_stroke_width,
            primary_begin: self.primary_begin,
            primary_duration: self.primary_duration,
            secondary_duration: self.secondary_duration,
            fade_primary: self.fade_primary,
            fade_secondary: self.fade_secondary,
            freeze_secondary: self.freeze_secondary,
            relative_margin: self.relative_margin,
            scatter: ScatterParams {
                count: self.n_secondaries,
                angle_std: self.alpha_std,
                length_mean: self.length_mean,
                length_std: self.length_std,
            },
        }
    }

    pub fn validate(&self) -> Result<()> {
        self.rect()?;
        self.style().validate()
    }
}
