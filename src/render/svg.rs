//! SVG/SMIL renderer
//!
//! Maps the timeline's event graph to `<animate>`/`<set>` elements chained
//! with SMIL `begin="id.end"` expressions. Stroke growth is the usual
//! dash-offset trick: dasharray and initial dashoffset equal the polyline
//! length, and the grow event runs the offset down to zero.

use std::fmt::Write;

use rand::Rng;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use crate::geom::Path;
use crate::record::CollisionRecord;
use crate::style::Color;
use crate::timeline::{Attr, EventId, Layer, Timeline, Trigger};

pub struct SvgRenderer {
    rng: Pcg32,
}

impl SvgRenderer {
    /// The seed drives random-hue resolution only; a fixed seed reproduces
    /// the exact same document.
    pub fn new(seed: u64) -> Self {
        Self {
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    /// Render the whole timeline as a standalone SVG document
    pub fn render(&mut self, timeline: &Timeline) -> String {
        let rect = timeline.rect;
        let style = &timeline.defaults;
        let mut out = String::new();

        let _ = writeln!(
            out,
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}">"#,
            w = rect.width,
            h = rect.height,
        );

        let box_d = format!(
            "M0,0 L{w},0 L{w},{h} L0,{h} Z",
            w = rect.width,
            h = rect.height,
        );
        write_filled_path(&mut out, &box_d, &style.background_color);

        // center the drawing by shrinking it into the margin
        let margin = style.relative_margin;
        let scale_w = 1.0 - margin;
        let scale_h = round3(1.0 - rect.width * margin / rect.height);
        let translation = margin * rect.width / 2.0;
        let _ = writeln!(
            out,
            r#"<g transform="scale({scale_w},{scale_h}) translate({translation}, {translation})">"#,
        );
        write_filled_path(&mut out, &box_d, &style.box_color);

        for record in &timeline.records {
            for (i, traversal) in record.primaries.iter().enumerate() {
                let color = self.resolve(&record.style.primary_color);
                write_animated_path(
                    &mut out,
                    timeline,
                    record,
                    Layer::Primary,
                    &traversal.path,
                    &color,
                    record.style.primary_stroke_width,
                    i == 0,
                );
            }
            for (i, ray) in record.scatter.iter().enumerate() {
                let color = self.resolve(&record.style.secondary_color);
                write_animated_path(
                    &mut out,
                    timeline,
                    record,
                    Layer::Secondary,
                    ray,
                    &color,
                    record.style.secondary_stroke_width,
                    i == 0,
                );
            }
        }

        let _ = writeln!(out, "</g>");
        out.push_str("</svg>\n");
        out
    }

    /// Fixed colors pass through; the randomize sentinel draws a fresh hue
    fn resolve(&mut self, color: &Color) -> String {
        match color {
            Color::Hex(value) => value.clone(),
            Color::Randomize => hsl_to_hex(self.rng.random::<f64>(), 1.0, 0.5),
        }
    }
}

fn round3(v: f64) -> f64 {
    (v * 1000.0).round() / 1000.0
}

/// SVG path data for a polyline, in vertex order
fn path_data(path: &Path) -> String {
    let mut d = String::new();
    for (i, p) in path.points.iter().enumerate() {
        let cmd = if i == 0 { 'M' } else { 'L' };
        if i > 0 {
            d.push(' ');
        }
        let _ = write!(d, "{cmd}{:.3},{:.3}", p.x, p.y);
    }
    d
}

fn write_filled_path(out: &mut String, d: &str, color: &str) {
    let _ = writeln!(
        out,
        r#"<path d="{d}" stroke="{color}" stroke-width="0" fill="{color}"/>"#,
    );
}

/// SMIL begin expression for a set of triggers
fn begin_expr(triggers: &[Trigger]) -> String {
    triggers
        .iter()
        .map(|t| match t {
            Trigger::At(secs) => format!("{secs}s"),
            Trigger::AfterEnd { event, delay } => {
                if *delay > 0.0 {
                    format!("{event}.end+{delay}s")
                } else if *delay < 0.0 {
                    format!("{event}.end-{}s", -delay)
                } else {
                    format!("{event}.end")
                }
            }
        })
        .collect::<Vec<_>>()
        .join(";")
}

#[allow(clippy::too_many_arguments)]
fn write_animated_path(
    out: &mut String,
    timeline: &Timeline,
    record: &CollisionRecord,
    layer: Layer,
    path: &Path,
    color: &str,
    stroke_width: f64,
    emit_ids: bool,
) {
    let length = path.total_length();
    let _ = writeln!(
        out,
        r#"<path d="{d}" stroke="{color}" stroke-width="{stroke_width}" fill="none" stroke-dasharray="{length:.3}" stroke-dashoffset="{length:.3}">"#,
        d = path_data(path),
    );

    let grow_id = EventId::new(record.index, layer, Attr::Stroke);
    if let Some(event) = timeline.event(grow_id) {
        let id_attr = if emit_ids {
            format!(r#"id="{grow_id}" "#)
        } else {
            String::new()
        };
        let _ = writeln!(
            out,
            r#"  <animate {id_attr}attributeName="stroke-dashoffset" from="{length:.3}" to="{to}" begin="{begin}" dur="{dur}s" fill="freeze"/>"#,
            to = event.terminal,
            begin = begin_expr(&event.triggers),
            dur = event.duration,
        );
    }

    let fade_id = EventId::new(record.index, layer, Attr::Opacity);
    if let Some(event) = timeline.event(fade_id) {
        let id_attr = if emit_ids {
            format!(r#"id="{fade_id}" "#)
        } else {
            String::new()
        };
        let _ = writeln!(
            out,
            r#"  <animate {id_attr}attributeName="opacity" from="1" to="{to}" begin="{begin}" dur="{dur}s" fill="freeze"/>"#,
            to = event.terminal,
            begin = begin_expr(&event.triggers),
            dur = event.duration,
        );
    }

    for reset in timeline.resets_for(record.index) {
        if reset.layer != layer {
            continue;
        }
        let (attr_name, value) = match reset.attr {
            Attr::Stroke => ("stroke-dashoffset", format!("{length:.3}")),
            Attr::Opacity => ("opacity", "1".to_string()),
        };
        let _ = writeln!(
            out,
            r#"  <set attributeName="{attr_name}" to="{value}" begin="{begin}"/>"#,
            begin = begin_expr(std::slice::from_ref(&reset.trigger)),
        );
    }

    let _ = writeln!(out, "</path>");
}

/// HSL to `#rrggbb`, h/s/l all in [0, 1]
fn hsl_to_hex(h: f64, s: f64, l: f64) -> String {
    fn hue_to_rgb(p: f64, q: f64, mut t: f64) -> f64 {
        if t < 0.0 {
            t += 1.0;
        }
        if t > 1.0 {
            t -= 1.0;
        }
        if t < 1.0 / 6.0 {
            return p + (q - p) * 6.0 * t;
        }
        if t < 1.0 / 2.0 {
            return q;
        }
        if t < 2.0 / 3.0 {
            return p + (q - p) * (2.0 / 3.0 - t) * 6.0;
        }
        p
    }

    let (r, g, b) = if s == 0.0 {
        (l, l, l)
    } else {
        let q = if l < 0.5 { l * (1.0 + s) } else { l + s - l * s };
        let p = 2.0 * l - q;
        (
            hue_to_rgb(p, q, h + 1.0 / 3.0),
            hue_to_rgb(p, q, h),
            hue_to_rgb(p, q, h - 1.0 / 3.0),
        )
    };

    format!(
        "#{:02x}{:02x}{:02x}",
        (r * 255.0) as u8,
        (g * 255.0) as u8,
        (b * 255.0) as u8,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geom::{Rect, Wall};
    use crate::scene::Scene;
    use crate::style::Style;
    use glam::DVec2;

    fn demo_timeline(looped: bool) -> Timeline {
        let mut scene = Scene::new(
            Rect::new(800.0, 300.0).unwrap(),
            DVec2::new(100.0, 100.0),
            11,
        );
        scene
            .add_collision(DVec2::new(300.0, 100.0), &[vec![Wall::Bottom]], None)
            .unwrap();
        scene
            .add_collision(DVec2::new(500.0, 200.0), &[vec![Wall::Top]], None)
            .unwrap();
        if looped {
            scene.compose_looped()
        } else {
            scene.compose()
        }
    }

    #[test]
    fn test_hsl_to_hex_primaries() {
        assert_eq!(hsl_to_hex(0.0, 1.0, 0.5), "#ff0000");
        assert_eq!(hsl_to_hex(1.0 / 3.0, 1.0, 0.5), "#00ff00");
        assert_eq!(hsl_to_hex(2.0 / 3.0, 1.0, 0.5), "#0000ff");
        assert_eq!(hsl_to_hex(0.0, 0.0, 1.0), "#ffffff");
    }

    #[test]
    fn test_begin_expr() {
        let grow = EventId::new(0, Layer::Primary, Attr::Stroke);
        assert_eq!(begin_expr(&[Trigger::At(0.0)]), "0s");
        assert_eq!(
            begin_expr(&[Trigger::AfterEnd { event: grow, delay: 0.0 }]),
            "primary0_stroke.end"
        );
        assert_eq!(
            begin_expr(&[Trigger::AfterEnd { event: grow, delay: 1.5 }]),
            "primary0_stroke.end+1.5s"
        );
        assert_eq!(
            begin_expr(&[Trigger::AfterEnd { event: grow, delay: -0.001 }]),
            "primary0_stroke.end-0.001s"
        );
        assert_eq!(
            begin_expr(&[
                Trigger::At(0.0),
                Trigger::AfterEnd { event: grow, delay: 0.0 }
            ]),
            "0s;primary0_stroke.end"
        );
    }

    #[test]
    fn test_render_chains_records() {
        let svg = SvgRenderer::new(0).render(&demo_timeline(false));
        assert!(svg.contains(r#"viewBox="0 0 800 300""#));
        assert!(svg.contains(r#"id="primary0_stroke""#));
        assert!(svg.contains(r#"id="primary1_stroke""#));
        // record 1 grows when record 0's grow ends
        assert!(svg.contains(r#"begin="primary0_stroke.end""#));
        assert!(svg.contains("stroke-dasharray"));
        assert!(svg.ends_with("</svg>\n"));
    }

    #[test]
    fn test_render_looped_resets() {
        let svg = SvgRenderer::new(0).render(&demo_timeline(true));
        // cycle closure and the reset epsilon both reference the last grow
        assert!(svg.contains(r#"begin="0s;primary1_stroke.end""#));
        assert!(svg.contains("primary1_stroke.end-0.001s"));
        assert!(svg.contains(r#"<set attributeName="stroke-dashoffset""#));
        assert!(svg.contains(r#"<set attributeName="opacity" to="1""#));
    }

    #[test]
    fn test_looped_single_record_without_scatter_has_live_anchor() {
        // zero scatter rays: the loop must chain off an id some element
        // actually carries, not a secondary id that is never emitted
        let style = Style {
            scatter: crate::scatter::ScatterParams {
                count: 0,
                ..Default::default()
            },
            ..Style::default()
        };
        let mut scene = Scene::new(
            Rect::new(800.0, 300.0).unwrap(),
            DVec2::new(100.0, 100.0),
            5,
        )
        .with_defaults(style)
        .unwrap();
        scene
            .add_collision(DVec2::new(300.0, 100.0), &[vec![Wall::Bottom]], None)
            .unwrap();
        let svg = SvgRenderer::new(0).render(&scene.compose_looped());
        assert!(svg.contains(r#"id="primary0_opacity""#));
        assert!(svg.contains("primary0_opacity.end"));
        assert!(!svg.contains("secondary0_opacity.end"));
    }

    #[test]
    fn test_randomize_is_seed_deterministic() {
        let style = Style {
            primary_color: Color::Randomize,
            secondary_color: Color::Randomize,
            ..Style::default()
        };
        let build = || {
            let mut scene = Scene::new(
                Rect::new(800.0, 300.0).unwrap(),
                DVec2::new(100.0, 100.0),
                3,
            )
            .with_defaults(style.clone())
            .unwrap();
            scene
                .add_collision(DVec2::new(300.0, 100.0), &[vec![Wall::Bottom]], None)
                .unwrap();
            SvgRenderer::new(99).render(&scene.compose_looped())
        };
        assert_eq!(build(), build());
    }

    #[test]
    fn test_path_data_format() {
        let path = Path::segment(DVec2::new(0.0, 0.0), DVec2::new(1.5, 2.25));
        assert_eq!(path_data(&path), "M0.000,0.000 L1.500,2.250");
    }
}
