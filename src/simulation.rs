/*
 * Simulation Module
 *
 * This module owns the particle store and orchestrates one discrete frame:
 * for every boid, attraction -> distancing -> cohesion -> speed limit ->
 * boundary steering, then a single integration pass that advances all
 * positions. The population is created once at construction and mutated in
 * place for the lifetime of the simulation; no boid is ever added or
 * removed.
 */

use glam::Vec3;
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::boid::Boid;
use crate::error::Result;
use crate::flocking;
use crate::params::{SimulationConfig, UpdateMode};

pub struct Simulation {
    boids: Vec<Boid>,
    config: SimulationConfig,
    // Frame-start copy of the store, reused across ticks in synchronous mode
    snapshot: Vec<Boid>,
    rng: StdRng,
    frame: u64,
}

impl Simulation {
    /// Validate the configuration and populate the particle store with
    /// randomized positions and velocities.
    ///
    /// This is the only fallible operation in the crate; see
    /// [`SimulationConfig::validate`] for the rejection rules.
    pub fn new(config: SimulationConfig) -> Result<Self> {
        config.validate()?;

        let mut rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let boids = spawn_boids(&mut rng, &config);
        log::debug!(
            "initialized simulation with {} boids (seed: {:?}, mode: {:?})",
            boids.len(),
            config.seed,
            config.update_mode
        );

        Ok(Self {
            snapshot: Vec::with_capacity(boids.len()),
            boids,
            config,
            rng,
            frame: 0,
        })
    }

    /// Advance every boid by one frame. Calling this N times performs N
    /// discrete simulation steps; it never fails under a validated
    /// configuration.
    pub fn tick(&mut self) {
        match self.config.update_mode {
            UpdateMode::Sequential => {
                flocking::step_sequential(&mut self.boids, &self.config);
            }
            UpdateMode::Synchronous => {
                self.snapshot.clear();
                self.snapshot.extend_from_slice(&self.boids);
                flocking::step_synchronous(&mut self.boids, &self.snapshot, &self.config);
            }
        }

        // All velocities are settled; now advance positions
        for boid in &mut self.boids {
            boid.integrate();
        }

        self.frame += 1;
    }

    /// Snapshot of all particle positions, in stable store order (same index
    /// always refers to the same particle).
    pub fn positions(&self) -> Vec<Vec3> {
        self.boids.iter().map(|boid| boid.position).collect()
    }

    /// Snapshot of all particle velocities, in stable store order.
    pub fn velocities(&self) -> Vec<Vec3> {
        self.boids.iter().map(|boid| boid.velocity).collect()
    }

    pub fn boids(&self) -> &[Boid] {
        &self.boids
    }

    // Mutable access for staging scenarios; the slice keeps the population
    // size fixed
    pub fn boids_mut(&mut self) -> &mut [Boid] {
        &mut self.boids
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    /// Number of completed ticks since construction or the last reset.
    pub fn frame(&self) -> u64 {
        self.frame
    }

    /// Average velocity magnitude across the population (diagnostic).
    pub fn mean_speed(&self) -> f32 {
        let total: f32 = self.boids.iter().map(|boid| boid.velocity.length()).sum();
        total / self.boids.len() as f32
    }

    /// Re-randomize the whole population from the simulation's RNG stream,
    /// keeping the population size and configuration.
    pub fn reset(&mut self) {
        let config = self.config.clone();
        self.boids.clear();
        for _ in 0..config.num_boids {
            self.boids.push(Boid::random(
                &mut self.rng,
                config.initial_position_range,
                config.initial_speed_range,
            ));
        }
        self.frame = 0;
        log::debug!("reset population of {} boids", self.boids.len());
    }
}

fn spawn_boids(rng: &mut StdRng, config: &SimulationConfig) -> Vec<Boid> {
    let mut boids = Vec::with_capacity(config.num_boids);
    for _ in 0..config.num_boids {
        boids.push(Boid::random(
            rng,
            config.initial_position_range,
            config.initial_speed_range,
        ));
    }
    boids
}
