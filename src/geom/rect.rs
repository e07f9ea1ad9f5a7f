//! Arena rectangle and wall labels

use std::fmt;

use glam::DVec2;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// One of the four arena walls.
///
/// Parameter files label walls with the single letters A (bottom, y = 0),
/// B (right, x = width), C (top, y = height) and D (left, x = 0).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Wall {
    Bottom,
    Right,
    Top,
    Left,
}

impl Wall {
    /// Single-letter label used by parameter files
    pub fn as_letter(&self) -> char {
        match self {
            Wall::Bottom => 'A',
            Wall::Right => 'B',
            Wall::Top => 'C',
            Wall::Left => 'D',
        }
    }

    pub fn from_letter(c: char) -> Option<Self> {
        match c.to_ascii_uppercase() {
            'A' => Some(Wall::Bottom),
            'B' => Some(Wall::Right),
            'C' => Some(Wall::Top),
            'D' => Some(Wall::Left),
            _ => None,
        }
    }

    /// True for the top/bottom walls, false for left/right
    pub fn is_horizontal(&self) -> bool {
        matches!(self, Wall::Bottom | Wall::Top)
    }

    /// Parse a wall sequence like "BAC" (travel order)
    pub fn parse_sequence(s: &str) -> Result<Vec<Wall>> {
        s.trim()
            .chars()
            .filter(|c| !c.is_whitespace())
            .map(|c| {
                Wall::from_letter(c)
                    .ok_or_else(|| Error::config(format!("unknown wall label '{c}'")))
            })
            .collect()
    }
}

impl fmt::Display for Wall {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Wall::Bottom => "bottom",
            Wall::Right => "right",
            Wall::Top => "top",
            Wall::Left => "left",
        };
        write!(f, "{name}")
    }
}

/// Axis-aligned arena rectangle with its bottom-left corner at the origin
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub width: f64,
    pub height: f64,
}

impl Rect {
    /// Both dimensions must be positive and finite
    pub fn new(width: f64, height: f64) -> Result<Self> {
        if !(width.is_finite() && width > 0.0) {
            return Err(Error::geometry(format!("width must be positive, got {width}")));
        }
        if !(height.is_finite() && height > 0.0) {
            return Err(Error::geometry(format!(
                "height must be positive, got {height}"
            )));
        }
        Ok(Self { width, height })
    }

    /// Whether a point lies inside the arena or on its boundary
    pub fn contains(&self, p: DVec2) -> bool {
        p.x >= 0.0 && p.x <= self.width && p.y >= 0.0 && p.y <= self.height
    }
}
