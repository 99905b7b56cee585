//! A one-pass predictor–corrector that approximates backward Euler.
//!
//! ```text
//! predictor = state + h · f(state)
//! next      = state + h · f(predictor)
//! ```
//!
//! [`step`] is not an implicit solve. There is no fixed-point iteration and
//! no Newton step; the derivative is evaluated once at a forward Euler
//! predictor and applied from the original state. Trajectories computed under
//! [`Method::BackwardEulerApprox`](super::Method::BackwardEulerApprox) depend
//! on exactly this form.
//!
//! [`step_iterated`] repeats the corrector a fixed number of times:
//!
//! ```text
//! next = state + h · f(state)
//! repeat iterations times:
//!     next = state + h · f(next)
//! ```
//!
//! For small enough `h` this converges toward the true backward Euler step.
//! With one iteration it is identical to [`step`].

use nbody_core::{Dynamics, StepIntegrable};

/// Advances `state` by one predictor–corrector step of size `h`.
#[must_use]
pub fn step<S, D>(dynamics: &D, state: &S, h: f64) -> S
where
    S: StepIntegrable<f64>,
    D: Dynamics<S>,
{
    let predictor = state.step(&dynamics.derivative(state), h);
    state.step(&dynamics.derivative(&predictor), h)
}

/// Corrector passes used by the iterated form unless the caller chooses.
pub const DEFAULT_ITERATIONS: usize = 3;

/// Advances `state` by one step of size `h`, applying the fixed-point
/// corrector `iterations` times.
///
/// Performs `1 + iterations` derivative evaluations. With `iterations = 0`
/// the result is the forward Euler predictor.
#[must_use]
pub fn step_iterated<S, D>(dynamics: &D, state: &S, h: f64, iterations: usize) -> S
where
    S: StepIntegrable<f64>,
    D: Dynamics<S>,
{
    let mut next = state.step(&dynamics.derivative(state), h);
    for _ in 0..iterations {
        next = state.step(&dynamics.derivative(&next), h);
    }
    next
}
