/*
 * Flocking Rules Module
 *
 * This module implements the per-particle velocity adjustments that produce
 * emergent flocking: attraction, distancing, and cohesion, applied in that
 * order, followed by the speed limiter and the soft boundary correction.
 *
 * Two frame semantics are supported. Sequential mode mutates velocities in
 * place while iterating, so boids later in the store read the already
 * updated velocities of earlier ones. Synchronous mode evaluates every rule
 * against a snapshot taken at frame start, which makes the result
 * independent of store order and safe to compute in parallel. In both modes
 * positions advance only after every velocity update (see Simulation::tick).
 */

use rayon::prelude::*;

use glam::Vec3;

use crate::boid::Boid;
use crate::neighbors;
use crate::params::SimulationConfig;

// Velocity delta steering boid `i` towards the centroid of all boids within
// visual range (the boid itself included, weighted like any neighbor)
pub fn attraction(boids: &[Boid], i: usize, config: &SimulationConfig) -> Vec3 {
    let found = neighbors::neighbors_within(boids, i, config.visual_range);
    if found.is_empty() {
        return Vec3::ZERO;
    }

    let mut center = Vec3::ZERO;
    for &j in &found {
        center += boids[j].position;
    }
    center /= found.len() as f32;

    (center - boids[i].position) * config.attraction_factor
}

// Velocity delta pushing boid `i` away from every other boid closer than the
// minimum social distance. The per-neighbor contribution is the raw position
// difference, so closer crowds push harder in aggregate
pub fn distancing(boids: &[Boid], i: usize, config: &SimulationConfig) -> Vec3 {
    let mut push = Vec3::ZERO;
    for j in neighbors::others_within(boids, i, config.min_social_distance) {
        push += boids[i].position - boids[j].position;
    }
    push * config.distancing_factor
}

// Velocity delta aligning boid `i` with the average velocity of all boids
// within visual range (again including itself)
pub fn cohesion(boids: &[Boid], i: usize, config: &SimulationConfig) -> Vec3 {
    let found = neighbors::neighbors_within(boids, i, config.visual_range);
    if found.is_empty() {
        return Vec3::ZERO;
    }

    let mut average = Vec3::ZERO;
    for &j in &found {
        average += boids[j].velocity;
    }
    average /= found.len() as f32;

    (average - boids[i].velocity) * config.cohesion_factor
}

// One frame of velocity updates with in-place sequential semantics. Each
// boid's velocity is rewritten before the next boid is processed, so the
// cohesion rule observes a mix of current-frame and previous-frame
// velocities depending on store order.
pub(crate) fn step_sequential(boids: &mut [Boid], config: &SimulationConfig) {
    for i in 0..boids.len() {
        let delta = attraction(boids, i, config);
        boids[i].velocity += delta;
        let delta = distancing(boids, i, config);
        boids[i].velocity += delta;
        let delta = cohesion(boids, i, config);
        boids[i].velocity += delta;

        let boid = &mut boids[i];
        boid.limit_speed(config.max_speed);
        boid.contain(config.boundary, config.turn_acceleration);
    }
}

// One frame of velocity updates with synchronous semantics: every rule reads
// `frame_start`, writes go to the live store. Optionally fans out over a
// thread pool; each task reads only the shared snapshot and writes only its
// own boid, so the parallel path is bit-identical to the serial one.
pub(crate) fn step_synchronous(
    boids: &mut [Boid],
    frame_start: &[Boid],
    config: &SimulationConfig,
) {
    if config.enable_parallel {
        // Process boids in chunks to reduce synchronization overhead
        let chunk_size = std::cmp::max(boids.len() / rayon::current_num_threads(), 1);
        boids
            .par_chunks_mut(chunk_size)
            .enumerate()
            .for_each(|(chunk_index, chunk)| {
                for (offset, boid) in chunk.iter_mut().enumerate() {
                    let i = chunk_index * chunk_size + offset;
                    update_from_snapshot(boid, frame_start, i, config);
                }
            });
    } else {
        for (i, boid) in boids.iter_mut().enumerate() {
            update_from_snapshot(boid, frame_start, i, config);
        }
    }
}

fn update_from_snapshot(boid: &mut Boid, frame_start: &[Boid], i: usize, config: &SimulationConfig) {
    boid.velocity = frame_start[i].velocity
        + attraction(frame_start, i, config)
        + distancing(frame_start, i, config)
        + cohesion(frame_start, i, config);
    boid.limit_speed(config.max_speed);
    boid.contain(config.boundary, config.turn_acceleration);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::SimulationConfig;

    fn test_config() -> SimulationConfig {
        SimulationConfig {
            visual_range: 2.0,
            min_social_distance: 1.25,
            attraction_factor: 0.1,
            cohesion_factor: 0.3,
            distancing_factor: 0.1,
            ..SimulationConfig::default()
        }
    }

    #[test]
    fn attraction_steers_towards_centroid() {
        let config = test_config();
        let boids = vec![
            Boid::new(Vec3::ZERO, Vec3::ZERO),
            Boid::new(Vec3::new(1.0, 0.0, 0.0), Vec3::ZERO),
        ];
        // Centroid of {(0,0,0), (1,0,0)} is (0.5,0,0)
        let delta = attraction(&boids, 0, &config);
        assert!((delta.x - 0.5 * config.attraction_factor).abs() < 1e-6);
        assert_eq!(delta.y, 0.0);
        assert_eq!(delta.z, 0.0);
    }

    #[test]
    fn attraction_alone_in_range_is_zero() {
        let config = test_config();
        let boids = vec![
            Boid::new(Vec3::ZERO, Vec3::ZERO),
            Boid::new(Vec3::new(100.0, 0.0, 0.0), Vec3::ZERO),
        ];
        // Only neighbor is the boid itself; centroid coincides with it
        assert_eq!(attraction(&boids, 0, &config), Vec3::ZERO);
    }

    #[test]
    fn distancing_accumulates_position_differences() {
        let config = test_config();
        let boids = vec![
            Boid::new(Vec3::ZERO, Vec3::ZERO),
            Boid::new(Vec3::new(0.5, 0.0, 0.0), Vec3::ZERO),
            Boid::new(Vec3::new(0.0, -1.0, 0.0), Vec3::ZERO),
        ];
        let delta = distancing(&boids, 0, &config);
        // (0,0,0)-(0.5,0,0) + (0,0,0)-(0,-1,0) = (-0.5, 1, 0), scaled by 0.1
        assert!((delta.x - -0.05).abs() < 1e-6);
        assert!((delta.y - 0.1).abs() < 1e-6);
        assert_eq!(delta.z, 0.0);
    }

    #[test]
    fn distancing_ignores_boids_outside_social_distance() {
        let config = test_config();
        let boids = vec![
            Boid::new(Vec3::ZERO, Vec3::ZERO),
            Boid::new(Vec3::new(1.3, 0.0, 0.0), Vec3::ZERO),
        ];
        assert_eq!(distancing(&boids, 0, &config), Vec3::ZERO);
    }

    #[test]
    fn cohesion_steers_towards_average_velocity() {
        let config = test_config();
        let boids = vec![
            Boid::new(Vec3::ZERO, Vec3::ZERO),
            Boid::new(Vec3::new(1.0, 0.0, 0.0), Vec3::new(0.4, 0.0, 0.0)),
        ];
        // Average of {0, 0.4} is 0.2; delta = (0.2 - 0) * 0.3
        let delta = cohesion(&boids, 0, &config);
        assert!((delta.x - 0.06).abs() < 1e-6);
    }

    #[test]
    fn cohesion_with_no_visible_neighbors_matches_own_velocity() {
        let config = test_config();
        let boids = vec![
            Boid::new(Vec3::ZERO, Vec3::new(0.3, 0.0, 0.0)),
            Boid::new(Vec3::new(100.0, 0.0, 0.0), Vec3::new(-0.3, 0.0, 0.0)),
        ];
        // The only neighbor is the boid itself, so the average equals its
        // own velocity and the delta vanishes
        assert_eq!(cohesion(&boids, 0, &config), Vec3::ZERO);
    }

    #[test]
    fn synchronous_step_is_order_independent() {
        let config = SimulationConfig {
            attraction_factor: 0.0,
            distancing_factor: 0.0,
            max_speed: 10.0,
            boundary: Vec3::splat(1000.0),
            ..test_config()
        };
        let start = vec![
            Boid::new(Vec3::ZERO, Vec3::new(1.0, 0.0, 0.0)),
            Boid::new(Vec3::new(1.0, 0.0, 0.0), Vec3::ZERO),
        ];

        let mut forward = start.clone();
        let snapshot = forward.clone();
        step_synchronous(&mut forward, &snapshot, &config);

        let mut reversed: Vec<Boid> = start.iter().rev().copied().collect();
        let snapshot: Vec<Boid> = reversed.clone();
        step_synchronous(&mut reversed, &snapshot, &config);

        assert_eq!(forward[0], reversed[1]);
        assert_eq!(forward[1], reversed[0]);
    }

    #[test]
    fn sequential_step_reads_updated_velocities() {
        // Same two-boid cohesion scenario in both modes; sequential lets
        // boid 1 observe boid 0's already-updated velocity, so they diverge
        let config = SimulationConfig {
            attraction_factor: 0.0,
            distancing_factor: 0.0,
            max_speed: 10.0,
            boundary: Vec3::splat(1000.0),
            ..test_config()
        };
        let start = vec![
            Boid::new(Vec3::ZERO, Vec3::new(1.0, 0.0, 0.0)),
            Boid::new(Vec3::new(1.0, 0.0, 0.0), Vec3::ZERO),
        ];

        let mut sequential = start.clone();
        step_sequential(&mut sequential, &config);

        let mut synchronous = start.clone();
        let snapshot = synchronous.clone();
        step_synchronous(&mut synchronous, &snapshot, &config);

        // Synchronous: boid 1 sees the frame-start average (0.5, 0, 0)
        assert!((synchronous[1].velocity.x - 0.15).abs() < 1e-6);
        // Sequential: boid 0 first slows towards the average, then boid 1
        // averages against the updated value 0.85
        assert!((sequential[0].velocity.x - 0.85).abs() < 1e-6);
        assert!((sequential[1].velocity.x - 0.1275).abs() < 1e-6);
        assert_ne!(sequential[1].velocity, synchronous[1].velocity);
    }

    #[test]
    fn parallel_synchronous_step_matches_serial() {
        let mut config = SimulationConfig {
            max_speed: 10.0,
            boundary: Vec3::splat(1000.0),
            ..test_config()
        };
        let start: Vec<Boid> = (0..64)
            .map(|i| {
                let offset = i as f32 * 0.1;
                Boid::new(
                    Vec3::new(offset, -offset, 0.5 * offset),
                    Vec3::new(0.01 * offset, 0.0, -0.01 * offset),
                )
            })
            .collect();

        let mut serial = start.clone();
        config.enable_parallel = false;
        step_synchronous(&mut serial, &start, &config);

        let mut parallel = start.clone();
        config.enable_parallel = true;
        step_synchronous(&mut parallel, &start, &config);

        assert_eq!(serial, parallel);
    }
}
