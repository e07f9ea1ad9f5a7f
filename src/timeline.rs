//! Relative-time animation event graph
//!
//! The composer turns an ordered list of collision records into a chain of
//! grow/fade events and reset points. Events are triggered relative to each
//! other ("when X ends", optionally offset), never by absolute wall-clock
//! schedule beyond the very first grow. A renderer maps each event onto the
//! target format's own event-linking primitive.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::consts::RESET_EPSILON;
use crate::geom::Rect;
use crate::record::CollisionRecord;
use crate::style::Style;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Layer {
    Primary,
    Secondary,
}

/// Which visual attribute an event drives
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Attr {
    /// Stroke reveal progress (dash offset)
    Stroke,
    Opacity,
}

/// Identifier of one animation event: record index, layer, attribute
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EventId {
    pub record: usize,
    pub layer: Layer,
    pub attr: Attr,
}

impl EventId {
    pub fn new(record: usize, layer: Layer, attr: Attr) -> Self {
        Self {
            record,
            layer,
            attr,
        }
    }
}

impl fmt::Display for EventId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let layer = match self.layer {
            Layer::Primary => "primary",
            Layer::Secondary => "secondary",
        };
        let attr = match self.attr {
            Attr::Stroke => "stroke",
            Attr::Opacity => "opacity",
        };
        write!(f, "{layer}{}_{attr}", self.record)
    }
}

/// When an event starts
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Trigger {
    /// Absolute offset from timeline start, seconds
    At(f64),
    /// Relative to another event's end; `delay` may be negative (the reset
    /// epsilon)
    AfterEnd { event: EventId, delay: f64 },
}

/// A scheduled animation unit.
///
/// Stroke events reveal the path (dash offset runs from the path length down
/// to `terminal`); opacity events fade (1 down to `terminal`). The value
/// freezes at `terminal` until a reset re-arms it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    pub id: EventId,
    /// Any trigger starts the event; multiple triggers express looping
    pub triggers: Vec<Trigger>,
    pub duration: f64,
    pub terminal: f64,
}

/// Re-arms one attribute of a record's paths to its pre-grow value
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reset {
    pub record: usize,
    pub layer: Layer,
    pub attr: Attr,
    pub trigger: Trigger,
}

/// Immutable composition result: the ordered records plus their event graph.
///
/// Rebuilt in one pass from the record list whenever requested; holds nothing
/// that is not derivable from that list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Timeline {
    pub rect: Rect,
    /// Scene-level style (background, box, margin) for renderers
    pub defaults: Style,
    pub records: Vec<CollisionRecord>,
    pub events: Vec<Event>,
    pub resets: Vec<Reset>,
}

impl Timeline {
    /// Build the event graph over `records`.
    ///
    /// Trigger chain: `primary_grow(0)` starts at its style's absolute begin
    /// offset; every later `primary_grow(i)` starts when `primary_grow(i-1)`
    /// ends. A record's primary fade and secondary grow both start when its
    /// primary grow ends, and the secondary fade follows after the style's
    /// freeze hold.
    ///
    /// With `looped`, the first grow re-triggers on the cycle anchor (the
    /// last record's primary grow end; for a single record its secondary
    /// fade end, or its primary fade end if it has no scatter rays) and
    /// every record gets reset points just before
    /// the grow that re-draws it; without it, only records after the first
    /// are reset and the graph plays once.
    pub fn compose(
        rect: Rect,
        defaults: Style,
        records: Vec<CollisionRecord>,
        looped: bool,
    ) -> Self {
        let m = records.len();
        let mut events = Vec::with_capacity(4 * m);
        let mut resets = Vec::with_capacity(4 * m);

        // the event whose end closes one full cycle; a record without scatter
        // rays gives its secondary events no carrier element in rendered
        // output, so the primary fade anchors instead
        let cycle_anchor = if m == 1 {
            let layer = if records[0].scatter.is_empty() {
                Layer::Primary
            } else {
                Layer::Secondary
            };
            EventId::new(0, layer, Attr::Opacity)
        } else {
            EventId::new(m.saturating_sub(1), Layer::Primary, Attr::Stroke)
        };

        for (i, record) in records.iter().enumerate() {
            let style = &record.style;
            let grow = EventId::new(i, Layer::Primary, Attr::Stroke);

            let mut triggers = if i == 0 {
                vec![Trigger::At(style.primary_begin)]
            } else {
                vec![Trigger::AfterEnd {
                    event: EventId::new(i - 1, Layer::Primary, Attr::Stroke),
                    delay: 0.0,
                }]
            };
            if i == 0 && looped {
                triggers.push(Trigger::AfterEnd {
                    event: cycle_anchor,
                    delay: 0.0,
                });
            }

            events.push(Event {
                id: grow,
                triggers,
                duration: style.primary_duration,
                terminal: 0.0,
            });
            events.push(Event {
                id: EventId::new(i, Layer::Primary, Attr::Opacity),
                triggers: vec![Trigger::AfterEnd {
                    event: grow,
                    delay: 0.0,
                }],
                duration: style.fade_primary,
                terminal: 0.0,
            });
            events.push(Event {
                id: EventId::new(i, Layer::Secondary, Attr::Stroke),
                triggers: vec![Trigger::AfterEnd {
                    event: grow,
                    delay: 0.0,
                }],
                duration: style.secondary_duration,
                terminal: 0.0,
            });
            events.push(Event {
                id: EventId::new(i, Layer::Secondary, Attr::Opacity),
                triggers: vec![Trigger::AfterEnd {
                    event: grow,
                    delay: style.freeze_secondary,
                }],
                duration: style.fade_secondary,
                terminal: 0.0,
            });

            // reset this record's visuals just before the grow that will
            // re-draw it; for record 0 that grow belongs to the next cycle
            let predecessor = match (i, looped) {
                (0, false) => None,
                (0, true) => Some(cycle_anchor),
                (_, _) => Some(EventId::new(i - 1, Layer::Primary, Attr::Stroke)),
            };
            if let Some(anchor) = predecessor {
                for layer in [Layer::Primary, Layer::Secondary] {
                    for attr in [Attr::Stroke, Attr::Opacity] {
                        resets.push(Reset {
                            record: i,
                            layer,
                            attr,
                            trigger: Trigger::AfterEnd {
                                event: anchor,
                                delay: -RESET_EPSILON,
                            },
                        });
                    }
                }
            }
        }

        Self {
            rect,
            defaults,
            records,
            events,
            resets,
        }
    }

    pub fn event(&self, id: EventId) -> Option<&Event> {
        self.events.iter().find(|e| e.id == id)
    }

    pub fn resets_for(&self, record: usize) -> impl Iterator<Item = &Reset> {
        self.resets.iter().filter(move |r| r.record == record)
    }

    /// Length of one full grow chain, seconds (fades of the last record may
    /// still run past this point)
    pub fn cycle_duration(&self) -> f64 {
        self.records
            .iter()
            .map(|r| r.style.primary_duration)
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geom::Path;
    use glam::DVec2;

    fn synthetic_records(n: usize) -> Vec<CollisionRecord> {
        (0..n)
            .map(|index| CollisionRecord {
                index,
                contact: DVec2::ZERO,
                primaries: Vec::new(),
                scatter: vec![Path::segment(DVec2::ZERO, DVec2::new(1.0, 0.0))],
                contact_headings: vec![0.0],
                style: Style::default(),
            })
            .collect()
    }

    fn rect() -> Rect {
        Rect::new(800.0, 300.0).unwrap()
    }

    #[test]
    fn test_chain_ordering() {
        let tl = Timeline::compose(rect(), Style::default(), synthetic_records(4), false);
        for i in 1..4 {
            let grow = tl
                .event(EventId::new(i, Layer::Primary, Attr::Stroke))
                .unwrap();
            assert_eq!(
                grow.triggers,
                vec![Trigger::AfterEnd {
                    event: EventId::new(i - 1, Layer::Primary, Attr::Stroke),
                    delay: 0.0,
                }]
            );
        }
        // the first grow references only its absolute offset
        let first = tl
            .event(EventId::new(0, Layer::Primary, Attr::Stroke))
            .unwrap();
        assert_eq!(first.triggers, vec![Trigger::At(0.0)]);
    }

    #[test]
    fn test_record_internal_triggers() {
        let tl = Timeline::compose(rect(), Style::default(), synthetic_records(2), false);
        let grow = EventId::new(1, Layer::Primary, Attr::Stroke);
        let fade = tl
            .event(EventId::new(1, Layer::Primary, Attr::Opacity))
            .unwrap();
        assert_eq!(
            fade.triggers,
            vec![Trigger::AfterEnd { event: grow, delay: 0.0 }]
        );
        let sec_grow = tl
            .event(EventId::new(1, Layer::Secondary, Attr::Stroke))
            .unwrap();
        assert_eq!(
            sec_grow.triggers,
            vec![Trigger::AfterEnd { event: grow, delay: 0.0 }]
        );
        // secondary fade holds for the freeze duration after the grow ends
        let sec_fade = tl
            .event(EventId::new(1, Layer::Secondary, Attr::Opacity))
            .unwrap();
        assert_eq!(
            sec_fade.triggers,
            vec![Trigger::AfterEnd {
                event: grow,
                delay: Style::default().freeze_secondary,
            }]
        );
    }

    #[test]
    fn test_resets_single_pass() {
        let tl = Timeline::compose(rect(), Style::default(), synthetic_records(3), false);
        // record 0 is never reset in a single-pass composition
        assert_eq!(tl.resets_for(0).count(), 0);
        assert_eq!(tl.resets_for(1).count(), 4);
        for reset in tl.resets_for(2) {
            assert_eq!(
                reset.trigger,
                Trigger::AfterEnd {
                    event: EventId::new(1, Layer::Primary, Attr::Stroke),
                    delay: -RESET_EPSILON,
                }
            );
        }
    }

    #[test]
    fn test_looped_closes_cycle() {
        let tl = Timeline::compose(rect(), Style::default(), synthetic_records(3), true);
        let first = tl
            .event(EventId::new(0, Layer::Primary, Attr::Stroke))
            .unwrap();
        assert_eq!(first.triggers.len(), 2);
        assert!(first.triggers.contains(&Trigger::AfterEnd {
            event: EventId::new(2, Layer::Primary, Attr::Stroke),
            delay: 0.0,
        }));
        // record 0 resets just before the cycle restarts
        for reset in tl.resets_for(0) {
            assert_eq!(
                reset.trigger,
                Trigger::AfterEnd {
                    event: EventId::new(2, Layer::Primary, Attr::Stroke),
                    delay: -RESET_EPSILON,
                }
            );
        }
    }

    #[test]
    fn test_single_record_loop_anchors_on_fade() {
        let tl = Timeline::compose(rect(), Style::default(), synthetic_records(1), true);
        let anchor = EventId::new(0, Layer::Secondary, Attr::Opacity);
        let first = tl
            .event(EventId::new(0, Layer::Primary, Attr::Stroke))
            .unwrap();
        assert!(first
            .triggers
            .contains(&Trigger::AfterEnd { event: anchor, delay: 0.0 }));
        for reset in tl.resets_for(0) {
            assert_eq!(
                reset.trigger,
                Trigger::AfterEnd { event: anchor, delay: -RESET_EPSILON }
            );
        }
    }

    #[test]
    fn test_single_record_without_scatter_anchors_on_primary_fade() {
        // no scatter rays means no element ever carries the secondary ids;
        // the loop must close on the primary fade instead
        let mut records = synthetic_records(1);
        records[0].scatter.clear();
        let tl = Timeline::compose(rect(), Style::default(), records, true);
        let anchor = EventId::new(0, Layer::Primary, Attr::Opacity);
        let first = tl
            .event(EventId::new(0, Layer::Primary, Attr::Stroke))
            .unwrap();
        assert!(first
            .triggers
            .contains(&Trigger::AfterEnd { event: anchor, delay: 0.0 }));
        for reset in tl.resets_for(0) {
            assert_eq!(
                reset.trigger,
                Trigger::AfterEnd { event: anchor, delay: -RESET_EPSILON }
            );
        }
    }

    #[test]
    fn test_event_id_names() {
        assert_eq!(
            EventId::new(3, Layer::Primary, Attr::Stroke).to_string(),
            "primary3_stroke"
        );
        assert_eq!(
            EventId::new(0, Layer::Secondary, Attr::Opacity).to_string(),
            "secondary0_opacity"
        );
    }

    #[test]
    fn test_cycle_duration() {
        let tl = Timeline::compose(rect(), Style::default(), synthetic_records(3), false);
        assert!((tl.cycle_duration() - 15.0).abs() < 1e-12);
    }
}
