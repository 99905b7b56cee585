//! Energy-drift monitoring.

use nbody_core::{Observer, diagnostics};

use crate::traits::{CanStopEarly, HasState};

/// Stops a run once total energy drifts too far from its first observed value.
///
/// Fixed-step integrators do not conserve energy exactly, so a growing drift
/// is the usual sign that the step size is too coarse or that two bodies
/// passed close enough for the softening to dominate.
///
/// The first event observed sets the reference energy. Every later event
/// compares against it and requests a stop when
/// `|E - E₀| > tolerance × |E₀|`.
#[derive(Debug, Clone)]
pub struct DriftGuard {
    masses: Vec<f64>,
    tolerance: f64,
    reference: Option<f64>,
    worst: f64,
}

impl DriftGuard {
    /// Creates a guard for bodies with the given masses.
    ///
    /// # Panics
    ///
    /// Panics if `tolerance` is not finite and positive.
    #[must_use]
    pub fn new(masses: Vec<f64>, tolerance: f64) -> Self {
        assert!(
            tolerance.is_finite() && tolerance > 0.0,
            "drift tolerance must be finite and positive"
        );
        Self {
            masses,
            tolerance,
            reference: None,
            worst: 0.0,
        }
    }

    /// Returns the reference energy, once an event has been observed.
    #[must_use]
    pub fn reference(&self) -> Option<f64> {
        self.reference
    }

    /// Returns the largest relative drift seen so far.
    #[must_use]
    pub fn worst(&self) -> f64 {
        self.worst
    }

    fn relative_drift(&self, reference: f64, energy: f64) -> f64 {
        let diff = (energy - reference).abs();
        if reference == 0.0 { diff } else { diff / reference.abs() }
    }
}

impl<E: HasState, A: CanStopEarly> Observer<E, A> for DriftGuard {
    fn observe(&mut self, event: &E) -> Option<A> {
        let energy = diagnostics::total_energy(event.state(), &self.masses);

        let Some(reference) = self.reference else {
            self.reference = Some(energy);
            return None;
        };

        let drift = self.relative_drift(reference, energy);
        self.worst = self.worst.max(drift);
        (drift > self.tolerance).then(A::stop_early)
    }
}

impl<E: HasState, A: CanStopEarly> Observer<E, A> for &mut DriftGuard {
    fn observe(&mut self, event: &E) -> Option<A> {
        (**self).observe(event)
    }
}
