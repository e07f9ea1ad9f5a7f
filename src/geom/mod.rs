//! Pure reflection geometry
//!
//! Everything in this module is deterministic and stateless:
//! - No RNG, no I/O, no shared mutable state
//! - All angles are degrees in [0, 360)
//! - The arena is a fixed axis-aligned rectangle with its origin at the
//!   bottom-left corner

pub mod bounce;
pub mod kernel;
pub mod path;
pub mod rect;
pub mod unfold;

pub use bounce::{Bounce, Traversal, next_bounce, simulate};
pub use kernel::{WallIntersections, heading_to, reflect_across, wall_intersections};
pub use path::Path;
pub use rect::{Rect, Wall};
