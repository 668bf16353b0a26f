/*
 * 3D Boid Flocking Simulation - Module Definitions
 *
 * This file defines the module structure for the flocking simulation core.
 * The crate simulates emergent flocking motion for a fixed population of
 * point particles in 3D space; rendering is left to the caller, which only
 * needs the per-frame positions and a tick call.
 */

// Re-export key components for easier access
pub use boid::Boid;
pub use error::{Error, Result};
pub use params::{SimulationConfig, UpdateMode};
pub use simulation::Simulation;

// Define modules
pub mod boid;
pub mod error;
pub mod flocking;
pub mod neighbors;
pub mod params;
pub mod simulation;
