use crate::{DerivativeOf, StepIntegrable};

/// Computes the instantaneous time derivative of a state.
///
/// This is the `f` in `dy/dt = f(y)` that every integrator evaluates one or
/// more times per step. Implementations must be pure: the same state always
/// yields the same derivative.
///
/// Closures of the form `Fn(&S) -> S::Derivative` implement `Dynamics`
/// automatically, which keeps test fixtures and one-off systems lightweight.
pub trait Dynamics<S: StepIntegrable<f64>> {
    /// Evaluates the derivative at `state`.
    fn derivative(&self, state: &S) -> DerivativeOf<S, f64>;
}

/// Blanket implementation for derivative closures.
impl<S, F> Dynamics<S> for F
where
    S: StepIntegrable<f64>,
    F: Fn(&S) -> DerivativeOf<S, f64>,
{
    fn derivative(&self, state: &S) -> DerivativeOf<S, f64> {
        self(state)
    }
}
