//! Pairwise softened Newtonian gravity.
//!
//! For every body `i` the model sums the pull of every other body `j`:
//!
//! ```text
//! dx = x_j - x_i,  dy = y_j - y_i
//! r  = sqrt(dx² + dy²)
//! a  = G · m_j / (r³ + ε)
//! ax_i += a · dx,  ay_i += a · dy
//! ```
//!
//! Both `i → j` and `j → i` are evaluated independently; no pair force is
//! shared between the two bodies. Each body's sum runs over `j` in index
//! order, which fixes the floating-point result.
//!
//! `r³` is computed with `powi(3)`, which rounds like the product `r·r·r`
//! rather than a general `pow`. Trajectories therefore agree with a
//! `pow`-based evaluation only to within rounding, not bit for bit.

use crate::{DerivativeVector, Dynamics, StateVector, state::SLOTS_PER_BODY};

/// Gravitational constant used by the reference trajectories.
pub const G: f64 = 1.0;

/// Softening added to `r³` so acceleration stays finite as `r → 0`.
pub const SOFTENING: f64 = 1e-10;

/// The derivative model for a fixed set of masses.
///
/// Masses are indexed identically to the bodies in the [`StateVector`] the
/// model is evaluated on.
#[derive(Debug, Clone, PartialEq)]
pub struct Gravity {
    masses: Vec<f64>,
    g: f64,
    softening: f64,
}

impl Gravity {
    /// Creates a model with the reference constants [`G`] and [`SOFTENING`].
    #[must_use]
    pub fn new(masses: Vec<f64>) -> Self {
        Self::with_constants(masses, G, SOFTENING)
    }

    /// Creates a model with a custom gravitational constant and softening.
    #[must_use]
    pub fn with_constants(masses: Vec<f64>, g: f64, softening: f64) -> Self {
        Self {
            masses,
            g,
            softening,
        }
    }

    #[must_use]
    pub fn masses(&self) -> &[f64] {
        &self.masses
    }

    #[must_use]
    pub fn g(&self) -> f64 {
        self.g
    }

    #[must_use]
    pub fn softening(&self) -> f64 {
        self.softening
    }

    /// Computes velocities and accelerations for every body.
    ///
    /// # Panics
    ///
    /// Panics if the state does not encode exactly one body per mass. This is
    /// a caller contract violation, not a recoverable condition.
    #[must_use]
    pub fn derivative(&self, state: &StateVector) -> DerivativeVector {
        let n = self.masses.len();
        assert_eq!(
            state.body_count() * SLOTS_PER_BODY,
            state.len(),
            "state vector length is not a multiple of {SLOTS_PER_BODY}"
        );
        assert_eq!(
            state.body_count(),
            n,
            "state encodes {} bodies but {n} masses were given",
            state.body_count(),
        );

        let y = state.as_slice();
        let mut out = vec![0.0; y.len()];

        for i in 0..n {
            let base = i * SLOTS_PER_BODY;
            let (xi, yi) = (y[base], y[base + 1]);
            let (mut ax, mut ay) = (0.0, 0.0);

            for (j, &mass) in self.masses.iter().enumerate() {
                if i == j {
                    continue;
                }
                let dx = y[j * SLOTS_PER_BODY] - xi;
                let dy = y[j * SLOTS_PER_BODY + 1] - yi;
                let r = (dx * dx + dy * dy).sqrt();
                let factor = self.g * mass / (r.powi(3) + self.softening);

                ax += factor * dx;
                ay += factor * dy;
            }

            out[base] = y[base + 2];
            out[base + 1] = y[base + 3];
            out[base + 2] = ax;
            out[base + 3] = ay;
        }

        DerivativeVector::from_vec(out)
    }
}

impl Dynamics<StateVector> for Gravity {
    fn derivative(&self, state: &StateVector) -> DerivativeVector {
        Gravity::derivative(self, state)
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;
    use crate::{Body, flatten};

    #[test]
    fn single_body_feels_no_force() {
        let state = flatten(&[Body::new(3.0, -2.0, 0.5, 0.25, 7.0)]);
        let gravity = Gravity::new(vec![7.0]);

        let d = gravity.derivative(&state);

        assert_eq!(d.as_slice(), &[0.5, 0.25, 0.0, 0.0]);
    }

    #[test]
    fn position_slots_carry_velocity() {
        let bodies = [
            Body::new(-1.0, 0.0, 0.0, -0.5, 1.0),
            Body::new(1.0, 0.0, 0.0, 0.5, 1.0),
        ];
        let d = Gravity::new(vec![1.0, 1.0]).derivative(&flatten(&bodies));

        assert_eq!(d.as_slice()[0..2], [0.0, -0.5]);
        assert_eq!(d.as_slice()[4..6], [0.0, 0.5]);
    }

    #[test]
    fn equal_masses_attract_with_opposite_accelerations() {
        let bodies = [
            Body::new(-1.0, 0.0, 0.0, 0.0, 1.0),
            Body::new(1.0, 0.0, 0.0, 0.0, 1.0),
        ];
        let d = Gravity::new(vec![1.0, 1.0]).derivative(&flatten(&bodies));

        // a = G·m / (r³ + ε) · dx = 1 / (8 + 1e-10) · 2
        let expected = 2.0 / (8.0 + SOFTENING);
        assert_relative_eq!(d.acceleration(0)[0], expected);
        assert_relative_eq!(d.acceleration(1)[0], -expected);
        assert_eq!(d.acceleration(0)[1], 0.0);
        assert_eq!(d.acceleration(1)[1], 0.0);
    }

    #[test]
    fn acceleration_scales_with_the_other_mass() {
        let bodies = [
            Body::new(0.0, 0.0, 0.0, 0.0, 1.0),
            Body::new(0.0, 2.0, 0.0, 0.0, 3.0),
        ];
        let d = Gravity::new(vec![1.0, 3.0]).derivative(&flatten(&bodies));

        // The light body is pulled three times harder than the heavy one.
        assert_relative_eq!(d.acceleration(0)[1], -3.0 * d.acceleration(1)[1]);
        assert_relative_eq!(d.acceleration(0)[1], 3.0 * 2.0 / (8.0 + SOFTENING));
    }

    #[test]
    fn coincident_bodies_stay_finite() {
        let bodies = [
            Body::new(0.5, 0.5, 1.0, 0.0, 1.0),
            Body::new(0.5, 0.5, -1.0, 0.0, 1.0),
        ];
        let d = Gravity::new(vec![1.0, 1.0]).derivative(&flatten(&bodies));

        assert!(d.as_slice().iter().all(|v| v.is_finite()));
        assert_eq!(d.acceleration(0), [0.0, 0.0]);
    }

    #[test]
    fn custom_constants_scale_the_pull() {
        let bodies = [
            Body::new(0.0, 0.0, 0.0, 0.0, 1.0),
            Body::new(1.0, 0.0, 0.0, 0.0, 1.0),
        ];
        let state = flatten(&bodies);

        let reference = Gravity::new(vec![1.0, 1.0]).derivative(&state);
        let doubled = Gravity::with_constants(vec![1.0, 1.0], 2.0, SOFTENING).derivative(&state);

        assert_relative_eq!(doubled.acceleration(0)[0], 2.0 * reference.acceleration(0)[0]);
    }

    #[test]
    #[should_panic(expected = "masses were given")]
    fn mismatched_masses_panic() {
        let state = flatten(&[Body::default(), Body::default()]);
        let _ = Gravity::new(vec![1.0]).derivative(&state);
    }
}
