//! Forward Euler, the explicit first-order method.
//!
//! ```text
//! next = state + h · f(state)
//! ```
//!
//! One derivative evaluation per step. Cheap, but the local error is O(h²) and
//! orbits visibly spiral outward at the reference step size.

use nbody_core::{Dynamics, StepIntegrable};

/// Advances `state` by one forward Euler step of size `h`.
#[must_use]
pub fn step<S, D>(dynamics: &D, state: &S, h: f64) -> S
where
    S: StepIntegrable<f64>,
    D: Dynamics<S>,
{
    state.step(&dynamics.derivative(state), h)
}
