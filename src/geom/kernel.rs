//! Stateless geometry kernel: boundary-line crossings, mirror reflection,
//! and headings between points.

use glam::DVec2;

use super::rect::{Rect, Wall};
use crate::error::{Error, Result};
use crate::normalize_deg;

/// Crossings of a supporting line with the four boundary lines.
///
/// The line through the point at the given heading is extended both ways;
/// callers decide which crossing lies ahead of the ray.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WallIntersections {
    /// y at x = 0
    pub left_y: f64,
    /// y at x = width
    pub right_y: f64,
    /// x at y = 0
    pub bottom_x: f64,
    /// x at y = height
    pub top_x: f64,
}

/// True for headings travelling exactly vertically (90° or 270° mod 360)
#[inline]
pub fn is_vertical(angle_deg: f64) -> bool {
    let a = normalize_deg(angle_deg);
    a == 90.0 || a == 270.0
}

/// Intersect the supporting line of a ray with all four boundary lines.
///
/// Undefined for vertical headings: the bottom/top crossings come from a
/// division by `tan(angle)`, which has no value at 90°/270°. At exactly 0°
/// `tan` is zero and the unreachable top/bottom crossings come out infinite;
/// at 180° `tan` is a tiny negative rather than zero, so those crossings are
/// huge finite values on the wrong side of the arena. Callers filtering by
/// quadrant must not trust the top/bottom crossings near 180°.
pub fn wall_intersections(p: DVec2, angle_deg: f64, rect: Rect) -> Result<WallIntersections> {
    let a = normalize_deg(angle_deg);
    if is_vertical(a) {
        return Err(Error::geometry(format!(
            "heading {a}° is vertical and never crosses the side walls"
        )));
    }
    let t = a.to_radians().tan();
    Ok(WallIntersections {
        left_y: t * (0.0 - p.x) + p.y,
        right_y: t * (rect.width - p.x) + p.y,
        bottom_x: (0.0 - p.y) / t + p.x,
        top_x: (rect.height - p.y) / t + p.x,
    })
}

/// Mirror a point across one wall's supporting line
pub fn reflect_across(p: DVec2, wall: Wall, rect: Rect) -> DVec2 {
    match wall {
        Wall::Bottom => DVec2::new(p.x, -p.y),
        Wall::Top => DVec2::new(p.x, 2.0 * rect.height - p.y),
        Wall::Right => DVec2::new(2.0 * rect.width - p.x, p.y),
        Wall::Left => DVec2::new(-p.x, p.y),
    }
}

/// Heading of the vector b - a, in degrees wrapped to [0, 360)
pub fn heading_to(a: DVec2, b: DVec2) -> f64 {
    normalize_deg((b.y - a.y).atan2(b.x - a.x).to_degrees())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wall_intersections_diagonal() {
        // 45° line through (1,1) in a 10x10 arena
        let rect = Rect::new(10.0, 10.0).unwrap();
        let ix = wall_intersections(DVec2::new(1.0, 1.0), 45.0, rect).unwrap();
        assert!((ix.left_y - 0.0).abs() < 1e-9);
        assert!((ix.right_y - 10.0).abs() < 1e-9);
        assert!((ix.bottom_x - 0.0).abs() < 1e-9);
        assert!((ix.top_x - 10.0).abs() < 1e-9);
    }

    #[test]
    fn test_wall_intersections_vertical_rejected() {
        let rect = Rect::new(10.0, 10.0).unwrap();
        assert!(wall_intersections(DVec2::new(5.0, 5.0), 90.0, rect).is_err());
        assert!(wall_intersections(DVec2::new(5.0, 5.0), 270.0, rect).is_err());
        assert!(wall_intersections(DVec2::new(5.0, 5.0), 450.0, rect).is_err());
    }

    #[test]
    fn test_wall_intersections_horizontal() {
        // heading 0: side crossings at the point's own y, top/bottom unreachable
        let rect = Rect::new(10.0, 10.0).unwrap();
        let ix = wall_intersections(DVec2::new(2.0, 3.0), 0.0, rect).unwrap();
        assert_eq!(ix.left_y, 3.0);
        assert_eq!(ix.right_y, 3.0);
        assert!(ix.top_x.is_infinite());
    }

    #[test]
    fn test_wall_intersections_at_180_are_finite() {
        // tan(180°) in f64 is a tiny negative, not zero: the top/bottom
        // crossings are huge finite values, not the infinities of heading 0°
        let rect = Rect::new(10.0, 10.0).unwrap();
        let ix = wall_intersections(DVec2::new(2.0, 3.0), 180.0, rect).unwrap();
        assert!((ix.left_y - 3.0).abs() < 1e-12);
        assert!((ix.right_y - 3.0).abs() < 1e-12);
        assert!(ix.top_x.is_finite());
        assert!(ix.bottom_x.is_finite());
    }

    #[test]
    fn test_reflect_across() {
        let rect = Rect::new(800.0, 300.0).unwrap();
        let p = DVec2::new(100.0, 50.0);
        assert_eq!(reflect_across(p, Wall::Bottom, rect), DVec2::new(100.0, -50.0));
        assert_eq!(reflect_across(p, Wall::Top, rect), DVec2::new(100.0, 550.0));
        assert_eq!(reflect_across(p, Wall::Right, rect), DVec2::new(1500.0, 50.0));
        assert_eq!(reflect_across(p, Wall::Left, rect), DVec2::new(-100.0, 50.0));
    }

    #[test]
    fn test_reflect_across_is_involution() {
        let rect = Rect::new(800.0, 300.0).unwrap();
        let p = DVec2::new(123.0, 45.0);
        for wall in [Wall::Bottom, Wall::Right, Wall::Top, Wall::Left] {
            assert_eq!(reflect_across(reflect_across(p, wall, rect), wall, rect), p);
        }
    }

    #[test]
    fn test_heading_to() {
        let o = DVec2::ZERO;
        assert!((heading_to(o, DVec2::new(1.0, 0.0)) - 0.0).abs() < 1e-12);
        assert!((heading_to(o, DVec2::new(0.0, 1.0)) - 90.0).abs() < 1e-12);
        assert!((heading_to(o, DVec2::new(-1.0, 0.0)) - 180.0).abs() < 1e-12);
        assert!((heading_to(o, DVec2::new(0.0, -1.0)) - 270.0).abs() < 1e-12);
        assert!((heading_to(o, DVec2::new(1.0, 1.0)) - 45.0).abs() < 1e-12);
    }
}
