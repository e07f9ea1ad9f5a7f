//! One collision event: primary routes, scatter rays, style

use glam::DVec2;
use serde::{Deserialize, Serialize};

use crate::geom::{Path, Traversal};
use crate::normalize_deg;
use crate::style::Style;

/// Everything belonging to one bounce event.
///
/// Records are immutable once built and identified by `index`, assigned in
/// append order; the timeline composer uses that index as its only handle
/// when chaining triggers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CollisionRecord {
    pub index: usize,
    /// The point all primary routes converge on
    pub contact: DVec2,
    /// Alternate primary routes, each ending at `contact`
    pub primaries: Vec<Traversal>,
    /// Decorative rays anchored at `contact`
    pub scatter: Vec<Path>,
    /// Headings out of the contact point back along each arriving route
    pub contact_headings: Vec<f64>,
    pub style: Style,
}

impl CollisionRecord {
    /// Arithmetic mean of the contact headings, used as the dominant heading
    /// for scatter generation. Plain mean, not a circular one; headings that
    /// straddle 0°/360° average accordingly.
    pub fn dominant_heading(&self) -> f64 {
        if self.contact_headings.is_empty() {
            return 0.0;
        }
        let sum: f64 = self.contact_headings.iter().sum();
        normalize_deg(sum / self.contact_headings.len() as f64)
    }

    /// The primary polylines, in the order their routes were requested
    pub fn primary_paths(&self) -> impl Iterator<Item = &Path> {
        self.primaries.iter().map(|t| &t.path)
    }
}
