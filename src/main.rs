/*
 * Headless Flocking Demo
 *
 * Drives the simulation core the way a rendering collaborator would: build
 * it once, tick it once per frame, read the positions. Instead of drawing,
 * this runner prints a population summary every second's worth of frames.
 *
 * Usage: boids3d [frames]
 */

use glam::Vec3;

use boids3d::{Simulation, SimulationConfig};

const REPORT_INTERVAL: u64 = 60;

fn main() {
    env_logger::init();

    let frames: u64 = std::env::args()
        .nth(1)
        .and_then(|arg| arg.parse().ok())
        .unwrap_or(600);

    let config = SimulationConfig {
        seed: Some(42),
        ..SimulationConfig::default()
    };

    let mut sim = match Simulation::new(config) {
        Ok(sim) => sim,
        Err(err) => {
            eprintln!("failed to start simulation: {err}");
            std::process::exit(1);
        }
    };

    println!(
        "simulating {} boids for {} frames",
        sim.boids().len(),
        frames
    );
    for _ in 0..frames {
        sim.tick();
        if sim.frame() % REPORT_INTERVAL == 0 {
            report(&sim);
        }
    }
    if frames % REPORT_INTERVAL != 0 {
        report(&sim);
    }
}

// Print the frame number, mean speed, and axis-aligned bounds of the flock
fn report(sim: &Simulation) {
    let mut min = Vec3::splat(f32::INFINITY);
    let mut max = Vec3::splat(f32::NEG_INFINITY);
    for position in sim.positions() {
        min = min.min(position);
        max = max.max(position);
    }
    println!(
        "frame {:>5}  mean speed {:.3}  bounds x [{:.1}, {:.1}]  y [{:.1}, {:.1}]  z [{:.1}, {:.1}]",
        sim.frame(),
        sim.mean_speed(),
        min.x,
        max.x,
        min.y,
        max.y,
        min.z,
        max.z
    );
}
