/// A trait for types that can be stepped using their derivative.
///
/// Implementing this trait lets the integrators in `nbody-solvers` advance the
/// type via `self + derivative * delta`, where the derivative is with respect
/// to `Delta`. The derivative is borrowed because multi-stage methods reuse a
/// stage both to build trial states and in the final weighted sum.
pub trait StepIntegrable<Delta> {
    /// The derivative of the type with respect to `Delta`.
    type Derivative;

    /// Returns the value after stepping with a derivative and step size.
    #[must_use]
    fn step(&self, derivative: &Self::Derivative, delta: Delta) -> Self;
}

/// Type alias for the derivative of a `StepIntegrable` type.
///
/// This is a convenience for accessing the [`StepIntegrable::Derivative`]
/// associated type without writing out the fully qualified syntax.
pub type DerivativeOf<T, Delta> = <T as StepIntegrable<Delta>>::Derivative;

impl StepIntegrable<f64> for f64 {
    type Derivative = f64;

    fn step(&self, derivative: &f64, delta: f64) -> Self {
        self + derivative * delta
    }
}

/// A derivative that can be linearly combined with others of the same shape.
///
/// Higher-order Runge–Kutta methods blend several stage derivatives before
/// taking the final step. Terms are accumulated in the order given, so
/// `weighted_sum(&[(1.0, &k1), (2.0, &k2)])` computes `k1 + 2·k2` left to right
/// and the floating-point result is reproducible.
pub trait WeightedSum: Sized {
    /// Returns `Σ weight·term` over `terms`.
    ///
    /// # Panics
    ///
    /// Panics if `terms` is empty or if the terms do not share a shape.
    #[must_use]
    fn weighted_sum(terms: &[(f64, &Self)]) -> Self;
}

impl WeightedSum for f64 {
    fn weighted_sum(terms: &[(f64, &Self)]) -> Self {
        let ((first_weight, first), rest) = terms
            .split_first()
            .expect("weighted_sum requires at least one term");
        rest.iter()
            .fold(first_weight * **first, |acc, (w, term)| acc + w * **term)
    }
}
