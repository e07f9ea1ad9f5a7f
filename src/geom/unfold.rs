//! Inverse solve: find the launch heading that strikes a prescribed wall
//! sequence before reaching a target point
//!
//! Classic billiard unfolding: mirroring the target across the requested
//! walls in reverse order turns the multi-bounce path into one straight line
//! aimed at a virtual point. The solved heading is then verified by running
//! the forward simulation; a sequence the geometry cannot realize is reported
//! instead of silently producing a path that strikes different walls.

use glam::DVec2;

use super::bounce::{Traversal, simulate};
use super::kernel::{heading_to, reflect_across};
use super::rect::{Rect, Wall};
use crate::error::{Error, Result};

/// Heading at `start` whose straight line reaches `end` unfolded across
/// `walls` (time-forward order).
///
/// This is the raw aim; it does not check that the folded path actually
/// strikes the requested walls. Use [`solve`] for the validated form.
pub fn aim(start: DVec2, end: DVec2, walls: &[Wall], rect: Rect) -> f64 {
    let mut virtual_end = end;
    for &wall in walls.iter().rev() {
        virtual_end = reflect_across(virtual_end, wall, rect);
    }
    heading_to(start, virtual_end)
}

/// Solve for the path from `start` that strikes exactly `walls` in order and
/// then reaches `end`.
///
/// The terminal point is appended as the path's last vertex; it is the
/// destination of the final leg, not itself a bounce. An empty wall sequence
/// yields the direct one-segment path.
pub fn solve(start: DVec2, end: DVec2, walls: &[Wall], rect: Rect) -> Result<Traversal> {
    let heading = aim(start, end, walls, rect);
    let mut traversal = simulate(start, heading, rect, walls.len())?;

    if traversal.walls != walls {
        return Err(Error::UnreachableBounceSequence {
            record: None,
            requested: walls.to_vec(),
            actual: traversal.walls,
        });
    }

    let heading_out = traversal.heading_out;
    traversal.path.push(heading_out, end);
    Ok(traversal)
}
