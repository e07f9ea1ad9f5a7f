//! Command-line entry point
//!
//! Loads an optional JSON parameter file, builds a scene, and writes the
//! animated SVG. Two modes:
//!
//! - default: one collision record whose routes radiate from the initial
//!   point at seeded random headings
//! - `--chain`: a fixed five-leg tour of an 800x400 arena, each leg aimed
//!   through a prescribed bounce sequence

use std::env;
use std::fs;
use std::path::Path;
use std::process;

use glam::DVec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use rebound::geom::Wall;
use rebound::{Params, Rect, Scene, SvgRenderer, Timeline};

fn main() {
    env_logger::init();
    if let Err(e) = run() {
        eprintln!("error: {e}");
        process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let mut params = Params::default();
    let mut chain = false;
    for arg in env::args().skip(1) {
        match arg.as_str() {
            "--chain" => chain = true,
            path => params = Params::load(Path::new(path))?,
        }
    }
    params.validate()?;

    let timeline = if chain {
        chain_scene(&params)?
    } else {
        burst_scene(&params)?
    };
    let svg = SvgRenderer::new(params.seed).render(&timeline);

    if let Some(dir) = Path::new(&params.output).parent() {
        if !dir.as_os_str().is_empty() {
            fs::create_dir_all(dir)?;
        }
    }
    fs::write(&params.output, &svg)?;
    log::info!("{} bytes written to {}", svg.len(), params.output);
    Ok(())
}

/// One record of forward-simulated routes radiating from the initial point.
fn burst_scene(params: &Params) -> rebound::Result<Timeline> {
    let rect = params.rect()?;
    let point = DVec2::new(params.initial_point[0], params.initial_point[1]);
    let mut rng = Pcg32::seed_from_u64(params.seed);
    let headings: Vec<f64> = (0..params.n_primaries)
        .map(|_| rng.random_range(0.0..360.0))
        .collect();

    let mut scene = Scene::new(rect, point, params.seed).with_defaults(params.style())?;
    scene.add_radial(&headings, params.n_bounces, None)?;
    Ok(scene.compose_looped())
}

/// Five chained collisions touring the arena, ending back at the start so
/// the looped animation closes seamlessly.
fn chain_scene(params: &Params) -> rebound::Result<Timeline> {
    use Wall::*;

    let rect = Rect::new(800.0, 400.0)?;
    let start = DVec2::new(300.0, 100.0);
    let mut scene = Scene::new(rect, start, params.seed).with_defaults(params.style())?;

    scene.add_collision(DVec2::new(402.0, 230.0), &[vec![Top], vec![Bottom]], None)?;
    scene.add_collision(DVec2::new(5.0, 10.0), &[vec![Left], vec![Bottom]], None)?;
    scene.add_collision(DVec2::new(751.0, 190.0), &[vec![Top], vec![Bottom]], None)?;
    scene.add_collision(DVec2::new(81.0, 320.0), &[vec![Top], vec![Left]], None)?;
    scene.add_collision(start, &[vec![Bottom], vec![Top, Right]], None)?;
    Ok(scene.compose_looped())
}
