/*
 * Simulation Parameters Module
 *
 * This module defines the SimulationConfig struct that contains all the
 * parameters for the flocking simulation. The configuration is validated
 * once at construction and is immutable for the lifetime of a run.
 */

use glam::Vec3;

use crate::error::{Error, Result};

/// How particle velocities are updated within a frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdateMode {
    /// Velocities are mutated in place while the frame iterates, so a
    /// particle processed later in the frame reads the already-updated
    /// velocities of particles processed earlier. Positions still advance
    /// only after every velocity update. Order-dependent.
    Sequential,
    /// All rules read a snapshot of the population taken at frame start and
    /// write into a separate buffer, so every particle sees the same
    /// previous-frame state. Order-independent.
    Synchronous,
}

// Parameters for the simulation, fixed for the lifetime of a run
#[derive(Debug, Clone, PartialEq)]
pub struct SimulationConfig {
    /// Population size; fixed after construction.
    pub num_boids: usize,
    /// Initial positions are uniform per component in [-range, range).
    pub initial_position_range: f32,
    /// Initial velocities are uniform per component in [-range, range).
    pub initial_speed_range: f32,
    /// Radius within which another particle counts as a neighbor for
    /// attraction and cohesion.
    pub visual_range: f32,
    /// Radius within which particles steer apart.
    pub min_social_distance: f32,
    pub attraction_factor: f32,
    pub cohesion_factor: f32,
    pub distancing_factor: f32,
    /// Maximum velocity magnitude enforced by the speed limiter each frame.
    pub max_speed: f32,
    /// Per-axis steering correction applied while outside the boundary.
    pub turn_acceleration: f32,
    /// Per-axis half-extents of the soft containment cuboid.
    pub boundary: Vec3,
    pub update_mode: UpdateMode,
    /// Fan the per-particle velocity computation out over a thread pool.
    /// Only honored in synchronous mode; sequential mode is inherently
    /// order-dependent and always runs single-threaded.
    pub enable_parallel: bool,
    /// RNG seed for reproducible initialization; None seeds from entropy.
    pub seed: Option<u64>,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            num_boids: 700,
            initial_position_range: 1.0,
            initial_speed_range: 0.41,
            visual_range: 2.0,
            min_social_distance: 1.25,
            attraction_factor: 0.1,
            cohesion_factor: 0.3,
            distancing_factor: 0.1,
            max_speed: 0.405,
            turn_acceleration: 0.039,
            boundary: Vec3::new(14.0, 10.0, 10.0),
            update_mode: UpdateMode::Synchronous,
            enable_parallel: false,
            seed: None,
        }
    }
}

impl SimulationConfig {
    /// Check the configuration the same way construction does.
    ///
    /// Fails on a zero particle count or any non-finite or negative scalar.
    pub fn validate(&self) -> Result<()> {
        if self.num_boids == 0 {
            return Err(Error::InvalidConfig("num_boids must be > 0".into()));
        }

        let scalars = [
            ("initial_position_range", self.initial_position_range),
            ("initial_speed_range", self.initial_speed_range),
            ("visual_range", self.visual_range),
            ("min_social_distance", self.min_social_distance),
            ("attraction_factor", self.attraction_factor),
            ("cohesion_factor", self.cohesion_factor),
            ("distancing_factor", self.distancing_factor),
            ("max_speed", self.max_speed),
            ("turn_acceleration", self.turn_acceleration),
            ("boundary.x", self.boundary.x),
            ("boundary.y", self.boundary.y),
            ("boundary.z", self.boundary.z),
        ];
        for (name, value) in scalars {
            if !value.is_finite() || value < 0.0 {
                return Err(Error::InvalidConfig(format!(
                    "{name} must be finite and >= 0, got {value}"
                )));
            }
        }

        Ok(())
    }
}
