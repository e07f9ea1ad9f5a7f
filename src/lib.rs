//! Rebound - billiard-style bounce animations as event-chained SVG
//!
//! Core modules:
//! - `geom`: Pure reflection geometry (wall intersections, forward simulation,
//!   inverse "unfold and aim" solve)
//! - `scatter`: Randomized decorative rays at a collision point
//! - `record`: One collision's primary/scatter paths plus style
//! - `scene`: Append-only collision sequence and timeline composition
//! - `timeline`: Relative-time event graph (grow, fade, reset)
//! - `render`: SVG/SMIL output
//! - `params`: Flat JSON parameter document

pub mod error;
pub mod geom;
pub mod params;
pub mod record;
pub mod render;
pub mod scatter;
pub mod scene;
pub mod style;
pub mod timeline;

pub use error::{Error, Result};
pub use geom::{Rect, Wall};
pub use params::Params;
pub use record::CollisionRecord;
pub use render::SvgRenderer;
pub use scene::Scene;
pub use style::{Color, Style};
pub use timeline::Timeline;

use glam::DVec2;

/// Shared animation constants
pub mod consts {
    /// Gap between a reset and the grow event it re-arms, in seconds
    pub const RESET_EPSILON: f64 = 0.001;
}

/// Normalize an angle in degrees to [0, 360)
#[inline]
pub fn normalize_deg(angle: f64) -> f64 {
    let a = angle.rem_euclid(360.0);
    // rem_euclid of a tiny negative can round up to exactly 360
    if a >= 360.0 { 0.0 } else { a }
}

/// Unit vector for a heading in degrees
#[inline]
pub fn unit_vec(deg: f64) -> DVec2 {
    let r = deg.to_radians();
    DVec2::new(r.cos(), r.sin())
}
