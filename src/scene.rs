//! Append-only collision sequence
//!
//! A `Scene` owns the arena, a seeded RNG, and the growing list of collision
//! records. Each add operation either produces a fully-constructed immutable
//! record or fails without touching the sequence; records are never removed
//! or reordered. The timeline is rebuilt from the whole list on demand.

use glam::DVec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use crate::error::Result;
use crate::geom::{Rect, Traversal, Wall, simulate, unfold};
use crate::record::CollisionRecord;
use crate::scatter;
use crate::style::Style;
use crate::timeline::Timeline;
use crate::normalize_deg;

pub struct Scene {
    rect: Rect,
    seed: u64,
    rng: Pcg32,
    /// Where the next collision's routes start: the initial point, then the
    /// most recent contact point
    cursor: DVec2,
    records: Vec<CollisionRecord>,
    defaults: Style,
}

impl Scene {
    pub fn new(rect: Rect, initial_point: DVec2, seed: u64) -> Self {
        Self {
            rect,
            seed,
            rng: Pcg32::seed_from_u64(seed),
            cursor: initial_point,
            records: Vec::new(),
            defaults: Style::default(),
        }
    }

    /// Replace the scene-level default style (validated)
    pub fn with_defaults(mut self, style: Style) -> Result<Self> {
        style.validate()?;
        self.defaults = style;
        Ok(self)
    }

    pub fn rect(&self) -> Rect {
        self.rect
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn records(&self) -> &[CollisionRecord] {
        &self.records
    }

    /// The point the next collision's routes will start from
    pub fn cursor(&self) -> DVec2 {
        self.cursor
    }

    /// Append a collision at `target`, reached from the current cursor along
    /// one alternate route per wall sequence.
    ///
    /// Every sequence is solved by unfolding and verified against the forward
    /// simulation; scatter rays anchor at `target`, pointing away from the
    /// mean arrival direction. On success the cursor advances to `target`.
    /// All-or-nothing: any failure (unreachable sequence, bad style) leaves
    /// the scene unchanged, with the error tagged with this record's index.
    pub fn add_collision(
        &mut self,
        target: DVec2,
        sequences: &[Vec<Wall>],
        style: Option<Style>,
    ) -> Result<&CollisionRecord> {
        let index = self.records.len();
        let style = style.unwrap_or_else(|| self.defaults.clone());
        style.validate().map_err(|e| e.tag_record(index))?;

        let mut primaries = Vec::with_capacity(sequences.len());
        let mut contact_headings = Vec::with_capacity(sequences.len());
        for walls in sequences {
            let traversal = unfold::solve(self.cursor, target, walls, self.rect)
                .map_err(|e| e.tag_record(index))?;
            contact_headings.push(arrival_reversed(&traversal));
            primaries.push(traversal);
        }

        let record = self.build_record(index, target, primaries, contact_headings, style)?;
        self.cursor = target;
        self.records.push(record);
        Ok(&self.records[index])
    }

    /// Append a collision whose routes radiate out of the current cursor:
    /// one forward-simulated path of `bounces` reflections per heading.
    ///
    /// The cursor does not move; the scatter anchor is the cursor itself and
    /// the supplied headings drive the dominant direction directly.
    pub fn add_radial(
        &mut self,
        headings: &[f64],
        bounces: usize,
        style: Option<Style>,
    ) -> Result<&CollisionRecord> {
        let index = self.records.len();
        let style = style.unwrap_or_else(|| self.defaults.clone());
        style.validate().map_err(|e| e.tag_record(index))?;

        let mut primaries = Vec::with_capacity(headings.len());
        let mut contact_headings = Vec::with_capacity(headings.len());
        for &heading in headings {
            let traversal = simulate(self.cursor, heading, self.rect, bounces)
                .map_err(|e| e.tag_record(index))?;
            contact_headings.push(normalize_deg(heading));
            primaries.push(traversal);
        }

        let contact = self.cursor;
        let record = self.build_record(index, contact, primaries, contact_headings, style)?;
        self.records.push(record);
        Ok(&self.records[index])
    }

    fn build_record(
        &mut self,
        index: usize,
        contact: DVec2,
        primaries: Vec<Traversal>,
        contact_headings: Vec<f64>,
        style: Style,
    ) -> Result<CollisionRecord> {
        let mut record = CollisionRecord {
            index,
            contact,
            primaries,
            scatter: Vec::new(),
            contact_headings,
            style,
        };
        record.scatter = scatter::generate(
            contact,
            record.dominant_heading(),
            &record.style.scatter,
            &mut self.rng,
        )
        .map_err(|e| e.tag_record(index))?;

        log::debug!(
            "record {index}: {} primary route(s), {} scatter ray(s), contact ({:.1}, {:.1})",
            record.primaries.len(),
            record.scatter.len(),
            contact.x,
            contact.y,
        );

        Ok(record)
    }

    /// Compose a single-pass timeline over the current records
    pub fn compose(&self) -> Timeline {
        Timeline::compose(self.rect, self.defaults.clone(), self.records.clone(), false)
    }

    /// Compose a timeline that repeats: the first grow re-triggers when the
    /// cycle ends, and every record carries reset points
    pub fn compose_looped(&self) -> Timeline {
        Timeline::compose(self.rect, self.defaults.clone(), self.records.clone(), true)
    }
}

/// Heading out of the contact point back along the arriving segment
fn arrival_reversed(traversal: &Traversal) -> f64 {
    let arrival = traversal
        .path
        .headings
        .last()
        .copied()
        .unwrap_or(traversal.heading_out);
    normalize_deg(arrival + 180.0)
}
