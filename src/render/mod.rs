//! Rendering backends
//!
//! The core hands renderers a composed [`crate::timeline::Timeline`]; a
//! backend maps each event onto its format's delayed/triggered animation
//! primitive. SVG/SMIL is the only backend here.

pub mod svg;

pub use svg::SvgRenderer;
