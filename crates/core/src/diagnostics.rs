//! Conserved-quantity diagnostics for a state and its masses.
//!
//! None of these feed back into integration. They exist so callers can watch
//! drift (energy, momentum, center of mass) while comparing methods.

use crate::{StateVector, gravity::G};

/// Returns the mass-weighted mean position.
///
/// # Panics
///
/// Panics if `masses` does not match the number of bodies in `state`.
#[must_use]
pub fn center_of_mass(state: &StateVector, masses: &[f64]) -> [f64; 2] {
    check_shape(state, masses);
    let total: f64 = masses.iter().sum();
    let (sx, sy) = state
        .positions()
        .zip(masses)
        .fold((0.0, 0.0), |(sx, sy), ([x, y], m)| (sx + m * x, sy + m * y));
    [sx / total, sy / total]
}

/// Returns the total linear momentum `Σ m·v`.
///
/// # Panics
///
/// Panics if `masses` does not match the number of bodies in `state`.
#[must_use]
pub fn momentum(state: &StateVector, masses: &[f64]) -> [f64; 2] {
    check_shape(state, masses);
    state
        .phases()
        .zip(masses)
        .fold([0.0, 0.0], |[px, py], (p, m)| [px + m * p.vx, py + m * p.vy])
}

/// Returns the total kinetic energy `Σ ½·m·|v|²`.
///
/// # Panics
///
/// Panics if `masses` does not match the number of bodies in `state`.
#[must_use]
pub fn kinetic_energy(state: &StateVector, masses: &[f64]) -> f64 {
    check_shape(state, masses);
    state
        .phases()
        .zip(masses)
        .map(|(p, m)| 0.5 * m * (p.vx * p.vx + p.vy * p.vy))
        .sum()
}

/// Returns the unsoftened gravitational potential energy `-Σ G·mᵢ·mⱼ / r`.
///
/// Coincident pairs contribute negative infinity.
///
/// # Panics
///
/// Panics if `masses` does not match the number of bodies in `state`.
#[must_use]
pub fn potential_energy(state: &StateVector, masses: &[f64]) -> f64 {
    check_shape(state, masses);
    let mut energy = 0.0;
    for i in 0..masses.len() {
        let [xi, yi] = state.position(i);
        for j in (i + 1)..masses.len() {
            let [xj, yj] = state.position(j);
            let r = (xj - xi).hypot(yj - yi);
            energy -= G * masses[i] * masses[j] / r;
        }
    }
    energy
}

/// Returns kinetic plus potential energy.
///
/// # Panics
///
/// Panics if `masses` does not match the number of bodies in `state`.
#[must_use]
pub fn total_energy(state: &StateVector, masses: &[f64]) -> f64 {
    kinetic_energy(state, masses) + potential_energy(state, masses)
}

fn check_shape(state: &StateVector, masses: &[f64]) {
    assert_eq!(
        state.body_count(),
        masses.len(),
        "state encodes {} bodies but {} masses were given",
        state.body_count(),
        masses.len(),
    );
}
