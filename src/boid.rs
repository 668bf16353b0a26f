/*
 * Boid Module
 *
 * This module defines the Boid struct and its per-particle primitives.
 * Each boid's velocity is adjusted every frame by three social rules:
 * 1. Attraction: Steer towards the center of visible neighbors
 * 2. Distancing: Steer away from neighbors that are too close
 * 3. Cohesion: Match the average velocity of visible neighbors
 *
 * The rules themselves live in the flocking module; this struct carries the
 * state plus the rule-independent steps (speed limit, boundary steering,
 * position integration).
 */

use glam::Vec3;
use rand::Rng;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Boid {
    pub position: Vec3,
    pub velocity: Vec3,
}

impl Boid {
    pub fn new(position: Vec3, velocity: Vec3) -> Self {
        Self { position, velocity }
    }

    // Sample a boid with position and velocity uniform per component in
    // [-range, range)
    pub fn random<R: Rng>(rng: &mut R, position_range: f32, speed_range: f32) -> Self {
        Self {
            position: random_vec3(rng, position_range),
            velocity: random_vec3(rng, speed_range),
        }
    }

    // Rescale the velocity to max_speed if it is faster than that. A
    // zero-length velocity has no direction to preserve and is left alone,
    // which also keeps the normalization from producing NaN.
    pub fn limit_speed(&mut self, max_speed: f32) {
        if self.velocity.length() > max_speed {
            self.velocity = self.velocity.normalize() * max_speed;
        }
    }

    // Steer back towards the interior when outside the containment cuboid.
    // Each axis is corrected independently with a constant nudge; positions
    // are never clamped, so a fast boid may overshoot for a few frames until
    // the accumulated correction turns it around.
    pub fn contain(&mut self, boundary: Vec3, turn_acceleration: f32) {
        for axis in 0..3 {
            if self.position[axis] > boundary[axis] {
                self.velocity[axis] -= turn_acceleration;
            } else if self.position[axis] < -boundary[axis] {
                self.velocity[axis] += turn_acceleration;
            }
        }
    }

    // Advance the position by one unit timestep of the current velocity
    pub fn integrate(&mut self) {
        self.position += self.velocity;
    }
}

fn random_vec3<R: Rng>(rng: &mut R, half_range: f32) -> Vec3 {
    // A zero range would make the sampling interval empty; it means "no
    // randomness on this quantity"
    if half_range <= 0.0 {
        return Vec3::ZERO;
    }
    Vec3::new(
        rng.gen_range(-half_range..half_range),
        rng.gen_range(-half_range..half_range),
        rng.gen_range(-half_range..half_range),
    )
}
