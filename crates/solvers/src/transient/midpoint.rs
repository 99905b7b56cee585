//! The explicit midpoint method (second-order Runge–Kutta).
//!
//! ```text
//! k1   = f(state)
//! k2   = f(state + h/2 · k1)
//! next = state + h · k2
//! ```

use nbody_core::{Dynamics, StepIntegrable};

/// Advances `state` by one midpoint step of size `h`.
#[must_use]
pub fn step<S, D>(dynamics: &D, state: &S, h: f64) -> S
where
    S: StepIntegrable<f64>,
    D: Dynamics<S>,
{
    let k1 = dynamics.derivative(state);
    let k2 = dynamics.derivative(&state.step(&k1, h / 2.0));
    state.step(&k2, h)
}
