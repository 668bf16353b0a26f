/*
 * Neighbor Query Module
 *
 * Brute-force all-pairs neighbor lookup. Every query scans the whole
 * population, so one frame of rule evaluation costs O(n^2); that is fine at
 * the population sizes this simulation targets (hundreds to ~1000). The
 * returned indices carry no ordering guarantee since the rules only
 * aggregate sums and averages over them.
 */

use crate::boid::Boid;

// Indices of all boids strictly within `radius` of boid `i`.
//
// The probe boid itself is at distance zero and therefore included whenever
// the radius is positive. The attraction and cohesion rules scan this way on
// purpose: the boid contributes its own position/velocity to the centroid
// and average like any other neighbor.
pub fn neighbors_within(boids: &[Boid], i: usize, radius: f32) -> Vec<usize> {
    let radius_sq = radius * radius;
    let position = boids[i].position;
    boids
        .iter()
        .enumerate()
        .filter(|(_, other)| position.distance_squared(other.position) < radius_sq)
        .map(|(j, _)| j)
        .collect()
}

// Indices of all *other* boids strictly within `radius` of boid `i`.
pub fn others_within(boids: &[Boid], i: usize, radius: f32) -> Vec<usize> {
    let radius_sq = radius * radius;
    let position = boids[i].position;
    boids
        .iter()
        .enumerate()
        .filter(|&(j, other)| j != i && position.distance_squared(other.position) < radius_sq)
        .map(|(j, _)| j)
        .collect()
}
