//! Forward simulation: where a travelling point strikes the arena next
//!
//! Quadrant dispatch on the heading narrows the candidate walls to two, then
//! a single crossing test picks the one struck first. The outgoing heading is
//! the mirror law: side walls map a to 180 - a (mod 360), top/bottom walls
//! map a to 360 - a.

use glam::DVec2;
use serde::{Deserialize, Serialize};

use super::kernel::wall_intersections;
use super::path::Path;
use super::rect::{Rect, Wall};
use crate::error::Result;
use crate::normalize_deg;

/// One reflection event
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounce {
    /// Point on the arena boundary where the wall is struck
    pub point: DVec2,
    /// Outgoing heading after reflection, in [0, 360)
    pub angle: f64,
    /// Which wall was struck
    pub wall: Wall,
}

/// A simulated multi-bounce run: the polyline plus the walls struck, in order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Traversal {
    pub path: Path,
    pub walls: Vec<Wall>,
    /// Outgoing heading after the final bounce (the initial heading if the
    /// traversal has no bounces)
    pub heading_out: f64,
}

/// Crossings within this relative distance of a corner count as exact corner
/// hits. An inverse solve whose unfolded line passes through a corner lands
/// here after the round trip through `atan2`/`tan`.
const CORNER_EPS: f64 = 1e-9;

#[inline]
fn near_corner(coord: f64, target: f64, rect: Rect) -> bool {
    (coord - target).abs() <= CORNER_EPS * rect.width.max(rect.height)
}

/// Compute the next wall strike for a point travelling at `angle_deg`.
///
/// A ray arriving at a corner (within `CORNER_EPS`) resolves to the
/// horizontal wall and the strike point snaps to the exact corner. Arbitrary,
/// but consistent.
pub fn next_bounce(p: DVec2, angle_deg: f64, rect: Rect) -> Result<Bounce> {
    let a = normalize_deg(angle_deg);

    // Axis-aligned headings bypass the tan()-based crossings: straight up or
    // down never reaches a side wall, and tan has no value there anyway;
    // straight left sits on the tan(180°) rounding artifact.
    if a == 90.0 {
        return Ok(Bounce {
            point: DVec2::new(p.x, rect.height),
            angle: 270.0,
            wall: Wall::Top,
        });
    }
    if a == 270.0 {
        return Ok(Bounce {
            point: DVec2::new(p.x, 0.0),
            angle: 90.0,
            wall: Wall::Bottom,
        });
    }
    if a == 180.0 {
        return Ok(Bounce {
            point: DVec2::new(0.0, p.y),
            angle: 0.0,
            wall: Wall::Left,
        });
    }

    let ix = wall_intersections(p, a, rect)?;
    let bounce = if a < 90.0 {
        // travelling up-right: right or top wall
        if near_corner(ix.top_x, rect.width, rect) {
            Bounce {
                point: DVec2::new(rect.width, rect.height),
                angle: 360.0 - a,
                wall: Wall::Top,
            }
        } else if ix.top_x > rect.width {
            Bounce {
                point: DVec2::new(rect.width, ix.right_y),
                angle: 180.0 - a,
                wall: Wall::Right,
            }
        } else {
            Bounce {
                point: DVec2::new(ix.top_x, rect.height),
                angle: 360.0 - a,
                wall: Wall::Top,
            }
        }
    } else if a < 180.0 {
        // travelling up-left: top or left wall
        if near_corner(ix.left_y, rect.height, rect) {
            Bounce {
                point: DVec2::new(0.0, rect.height),
                angle: 360.0 - a,
                wall: Wall::Top,
            }
        } else if ix.left_y > rect.height {
            Bounce {
                point: DVec2::new(ix.top_x, rect.height),
                angle: 360.0 - a,
                wall: Wall::Top,
            }
        } else {
            Bounce {
                point: DVec2::new(0.0, ix.left_y),
                angle: 180.0 - a,
                wall: Wall::Left,
            }
        }
    } else if a < 270.0 {
        // travelling down-left: left or bottom wall
        if near_corner(ix.bottom_x, 0.0, rect) {
            Bounce {
                point: DVec2::new(0.0, 0.0),
                angle: 360.0 - a,
                wall: Wall::Bottom,
            }
        } else if ix.bottom_x < 0.0 {
            Bounce {
                point: DVec2::new(0.0, ix.left_y),
                angle: 540.0 - a,
                wall: Wall::Left,
            }
        } else {
            Bounce {
                point: DVec2::new(ix.bottom_x, 0.0),
                angle: 360.0 - a,
                wall: Wall::Bottom,
            }
        }
    } else {
        // travelling down-right: right or bottom wall
        if near_corner(ix.bottom_x, rect.width, rect) {
            Bounce {
                point: DVec2::new(rect.width, 0.0),
                angle: 360.0 - a,
                wall: Wall::Bottom,
            }
        } else if ix.bottom_x > rect.width {
            Bounce {
                point: DVec2::new(rect.width, ix.right_y),
                angle: 540.0 - a,
                wall: Wall::Right,
            }
        } else {
            Bounce {
                point: DVec2::new(ix.bottom_x, 0.0),
                angle: 360.0 - a,
                wall: Wall::Bottom,
            }
        }
    };

    Ok(Bounce {
        angle: normalize_deg(bounce.angle),
        ..bounce
    })
}

/// Apply `next_bounce` n times from a start point and heading.
///
/// `n = 0` is a degenerate one-point traversal, not an error.
pub fn simulate(p: DVec2, angle_deg: f64, rect: Rect, n: usize) -> Result<Traversal> {
    let mut path = Path::new(p);
    let mut walls = Vec::with_capacity(n);
    let mut angle = normalize_deg(angle_deg);

    for _ in 0..n {
        let bounce = next_bounce(path.last(), angle, rect)?;
        path.push(angle, bounce.point);
        walls.push(bounce.wall);
        angle = bounce.angle;
    }

    Ok(Traversal {
        path,
        walls,
        heading_out: angle,
    })
}
