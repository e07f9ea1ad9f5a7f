//! Decorative scatter rays radiating from a collision point
//!
//! Ray headings are normally distributed around the direction opposite the
//! dominant travel heading; lengths are normally distributed around a caller
//! mean. All draws come from a caller-seeded RNG so scenes reproduce
//! exactly.

use glam::DVec2;
use rand_distr::{Distribution, Normal};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::geom::Path;
use crate::{normalize_deg, unit_vec};

/// Statistics for one collision's scatter rays
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct ScatterParams {
    /// Number of rays
    pub count: usize,
    /// Standard deviation of ray headings, degrees
    pub angle_std: f64,
    /// Mean ray length
    pub length_mean: f64,
    /// Standard deviation of ray lengths
    pub length_std: f64,
}

impl Default for ScatterParams {
    fn default() -> Self {
        Self {
            count: 40,
            angle_std: 50.0,
            length_mean: 200.0,
            length_std: 100.0,
        }
    }
}

impl ScatterParams {
    pub fn validate(&self) -> Result<()> {
        if !(self.angle_std.is_finite() && self.angle_std >= 0.0) {
            return Err(Error::config(format!(
                "scatter angle_std must be non-negative, got {}",
                self.angle_std
            )));
        }
        if !(self.length_std.is_finite() && self.length_std >= 0.0) {
            return Err(Error::config(format!(
                "scatter length_std must be non-negative, got {}",
                self.length_std
            )));
        }
        if !self.length_mean.is_finite() {
            return Err(Error::config("scatter length_mean must be finite"));
        }
        Ok(())
    }
}

/// Generate scatter rays anchored at a collision point.
///
/// Headings center on `dominant_deg + 180` and are wrapped into [0, 360)
/// after sampling. Lengths may come out negative when `length_std` is large
/// relative to the mean; they are deliberately not clamped, and a negative
/// draw flips the ray through the anchor.
pub fn generate(
    anchor: DVec2,
    dominant_deg: f64,
    params: &ScatterParams,
    rng: &mut Pcg32,
) -> Result<Vec<Path>> {
    params.validate()?;
    let angle_dist = Normal::new(dominant_deg + 180.0, params.angle_std)
        .map_err(|e| Error::config(format!("scatter angle distribution: {e}")))?;
    let length_dist = Normal::new(params.length_mean, params.length_std)
        .map_err(|e| Error::config(format!("scatter length distribution: {e}")))?;

    let rays = (0..params.count)
        .map(|_| {
            let heading = normalize_deg(angle_dist.sample(rng));
            let length = length_dist.sample(rng);
            Path::segment(anchor, anchor + length * unit_vec(heading))
        })
        .collect();
    Ok(rays)
}
