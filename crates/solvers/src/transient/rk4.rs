//! Classical fourth-order Runge–Kutta.
//!
//! ```text
//! k1   = f(state)
//! k2   = f(state + h/2 · k1)
//! k3   = f(state + h/2 · k2)
//! k4   = f(state + h · k3)
//! next = state + h/6 · (k1 + 2·k2 + 2·k3 + k4)
//! ```
//!
//! Four derivative evaluations per step. The stage sum is accumulated left to
//! right before scaling by `h/6`.

use nbody_core::{Dynamics, StepIntegrable, WeightedSum};

/// Advances `state` by one RK4 step of size `h`.
#[must_use]
pub fn step<S, D>(dynamics: &D, state: &S, h: f64) -> S
where
    S: StepIntegrable<f64>,
    S::Derivative: WeightedSum,
    D: Dynamics<S>,
{
    let half = h / 2.0;

    let k1 = dynamics.derivative(state);
    let k2 = dynamics.derivative(&state.step(&k1, half));
    let k3 = dynamics.derivative(&state.step(&k2, half));
    let k4 = dynamics.derivative(&state.step(&k3, h));

    let slope = S::Derivative::weighted_sum(&[(1.0, &k1), (2.0, &k2), (2.0, &k3), (1.0, &k4)]);
    state.step(&slope, h / 6.0)
}
