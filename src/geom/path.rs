//! Polyline paths with per-segment headings

use glam::DVec2;
use serde::{Deserialize, Serialize};

use super::kernel::heading_to;

/// Ordered polyline from an origin to a terminal point.
///
/// `headings[i]` is the outgoing heading of the segment from `points[i]` to
/// `points[i + 1]`, so `headings.len() == points.len() - 1` at all times.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Path {
    pub points: Vec<DVec2>,
    pub headings: Vec<f64>,
}

impl Path {
    /// Degenerate one-point path at the origin
    pub fn new(origin: DVec2) -> Self {
        Self {
            points: vec![origin],
            headings: Vec::new(),
        }
    }

    /// Two-point path from `a` to `b` with its heading derived
    pub fn segment(a: DVec2, b: DVec2) -> Self {
        Self {
            points: vec![a, b],
            headings: vec![heading_to(a, b)],
        }
    }

    /// Append a vertex reached by travelling along `heading`
    pub fn push(&mut self, heading: f64, point: DVec2) {
        self.headings.push(heading);
        self.points.push(point);
    }

    /// Last vertex of the path
    pub fn last(&self) -> DVec2 {
        // points is non-empty by construction
        self.points[self.points.len() - 1]
    }

    /// Number of segments
    pub fn segment_count(&self) -> usize {
        self.headings.len()
    }

    /// Piecewise Euclidean length of the polyline.
    ///
    /// Derived on demand; callers drawing the same path repeatedly may cache
    /// the value themselves.
    pub fn total_length(&self) -> f64 {
        self.points
            .windows(2)
            .map(|w| w[0].distance(w[1]))
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_one_point_path() {
        let p = Path::new(DVec2::new(3.0, 4.0));
        assert_eq!(p.segment_count(), 0);
        assert_eq!(p.total_length(), 0.0);
        assert_eq!(p.last(), DVec2::new(3.0, 4.0));
    }

    #[test]
    fn test_segment() {
        let p = Path::segment(DVec2::ZERO, DVec2::new(3.0, 4.0));
        assert_eq!(p.total_length(), 5.0);
        assert_eq!(p.segment_count(), 1);
    }

    #[test]
    fn test_push_keeps_headings_aligned() {
        let mut p = Path::new(DVec2::ZERO);
        p.push(0.0, DVec2::new(1.0, 0.0));
        p.push(90.0, DVec2::new(1.0, 2.0));
        assert_eq!(p.points.len(), 3);
        assert_eq!(p.headings.len(), 2);
        assert_eq!(p.total_length(), 3.0);
    }

    proptest! {
        // Polyline length is order-independent under vertex reversal
        #[test]
        fn prop_length_invariant_under_reversal(
            coords in proptest::collection::vec((-1e3f64..1e3, -1e3f64..1e3), 2..12)
        ) {
            let points: Vec<DVec2> = coords.iter().map(|&(x, y)| DVec2::new(x, y)).collect();
            let forward = Path {
                headings: points.windows(2).map(|w| heading_to(w[0], w[1])).collect(),
                points: points.clone(),
            };
            let mut rev_points = points;
            rev_points.reverse();
            let backward = Path {
                headings: rev_points.windows(2).map(|w| heading_to(w[0], w[1])).collect(),
                points: rev_points,
            };
            prop_assert!((forward.total_length() - backward.total_length()).abs() < 1e-9);
        }
    }
}
