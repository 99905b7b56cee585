//! Flattened encoding of body positions and velocities.
//!
//! A [`StateVector`] holds `4 × n` numbers grouped per body as
//! `[x, y, vx, vy]`. Mass is not part of the state; it is fixed context for
//! an integration run and lives in the derivative model, indexed identically.

use serde::{Deserialize, Serialize};

use crate::{Body, StepIntegrable, WeightedSum};

/// Number of state slots per body: `x`, `y`, `vx`, `vy`.
pub const SLOTS_PER_BODY: usize = 4;

/// The `(x, y, vx, vy)` phase of a single body.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Phase {
    pub x: f64,
    pub y: f64,
    pub vx: f64,
    pub vy: f64,
}

impl Phase {
    /// Combines this phase with a mass to form a [`Body`].
    #[must_use]
    pub fn with_mass(self, mass: f64) -> Body {
        Body::new(self.x, self.y, self.vx, self.vy, mass)
    }
}

impl From<&Body> for Phase {
    fn from(body: &Body) -> Self {
        Self {
            x: body.x,
            y: body.y,
            vx: body.vx,
            vy: body.vy,
        }
    }
}

/// Positions and velocities of every body, flattened.
///
/// Integrators never mutate a state vector in place; each step produces a new
/// one, so multi-stage methods can evaluate trial states freely.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StateVector(Vec<f64>);

/// Time derivative of a [`StateVector`].
///
/// Same shape as the state: position slots hold velocities and velocity slots
/// hold accelerations.
#[derive(Debug, Clone, PartialEq)]
pub struct DerivativeVector(Vec<f64>);

/// Flattens bodies into a state vector, dropping their masses.
#[must_use]
pub fn flatten(bodies: &[Body]) -> StateVector {
    StateVector(
        bodies
            .iter()
            .flat_map(|b| [b.x, b.y, b.vx, b.vy])
            .collect(),
    )
}

/// Splits a state vector back into `n` per-body phases.
///
/// # Panics
///
/// Panics if the state does not hold exactly `4 × n` values.
#[must_use]
pub fn unflatten(state: &StateVector, n: usize) -> Vec<Phase> {
    assert_eq!(
        state.0.len(),
        SLOTS_PER_BODY * n,
        "state vector of length {} cannot hold {n} bodies",
        state.0.len(),
    );
    state.phases().collect()
}

impl StateVector {
    /// Wraps raw values as a state vector.
    ///
    /// # Panics
    ///
    /// Panics if the length is not a multiple of four.
    #[must_use]
    pub fn from_vec(values: Vec<f64>) -> Self {
        assert!(
            values.len() % SLOTS_PER_BODY == 0,
            "state vector length {} is not a multiple of {SLOTS_PER_BODY}",
            values.len(),
        );
        Self(values)
    }

    /// Returns the number of bodies encoded.
    #[must_use]
    pub fn body_count(&self) -> usize {
        self.0.len() / SLOTS_PER_BODY
    }

    /// Returns the number of scalar slots (`4 × n`).
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` if the state encodes no bodies.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns the raw values.
    #[must_use]
    pub fn as_slice(&self) -> &[f64] {
        &self.0
    }

    /// Returns the phase of body `i`.
    ///
    /// # Panics
    ///
    /// Panics if `i` is out of range.
    #[must_use]
    pub fn phase(&self, i: usize) -> Phase {
        let s = &self.0[i * SLOTS_PER_BODY..(i + 1) * SLOTS_PER_BODY];
        Phase {
            x: s[0],
            y: s[1],
            vx: s[2],
            vy: s[3],
        }
    }

    /// Returns the position of body `i`.
    ///
    /// # Panics
    ///
    /// Panics if `i` is out of range.
    #[must_use]
    pub fn position(&self, i: usize) -> [f64; 2] {
        let base = i * SLOTS_PER_BODY;
        [self.0[base], self.0[base + 1]]
    }

    /// Iterates over per-body phases in body order.
    pub fn phases(&self) -> impl ExactSizeIterator<Item = Phase> + '_ {
        self.0.chunks_exact(SLOTS_PER_BODY).map(|s| Phase {
            x: s[0],
            y: s[1],
            vx: s[2],
            vy: s[3],
        })
    }

    /// Iterates over per-body positions in body order.
    pub fn positions(&self) -> impl ExactSizeIterator<Item = [f64; 2]> + '_ {
        self.0.chunks_exact(SLOTS_PER_BODY).map(|s| [s[0], s[1]])
    }

    /// Returns `true` if every value is finite.
    #[must_use]
    pub fn is_finite(&self) -> bool {
        self.0.iter().all(|v| v.is_finite())
    }
}

impl From<&[Body]> for StateVector {
    fn from(bodies: &[Body]) -> Self {
        flatten(bodies)
    }
}

impl DerivativeVector {
    /// Wraps raw values as a derivative vector.
    #[must_use]
    pub fn from_vec(values: Vec<f64>) -> Self {
        Self(values)
    }

    /// Returns the raw values.
    #[must_use]
    pub fn as_slice(&self) -> &[f64] {
        &self.0
    }

    /// Returns the acceleration of body `i`.
    ///
    /// # Panics
    ///
    /// Panics if `i` is out of range.
    #[must_use]
    pub fn acceleration(&self, i: usize) -> [f64; 2] {
        let base = i * SLOTS_PER_BODY;
        [self.0[base + 2], self.0[base + 3]]
    }
}

impl StepIntegrable<f64> for StateVector {
    type Derivative = DerivativeVector;

    /// Returns `state + derivative * h`, element by element.
    ///
    /// # Panics
    ///
    /// Panics if the derivative does not match the state's shape.
    fn step(&self, derivative: &DerivativeVector, h: f64) -> Self {
        assert_eq!(
            self.0.len(),
            derivative.0.len(),
            "derivative shape does not match state"
        );
        StateVector(
            self.0
                .iter()
                .zip(&derivative.0)
                .map(|(s, d)| s + d * h)
                .collect(),
        )
    }
}

impl WeightedSum for DerivativeVector {
    fn weighted_sum(terms: &[(f64, &Self)]) -> Self {
        let ((first_weight, first), rest) = terms
            .split_first()
            .expect("weighted_sum requires at least one term");

        let mut acc: Vec<f64> = first.0.iter().map(|v| first_weight * v).collect();
        for (weight, term) in rest {
            assert_eq!(acc.len(), term.0.len(), "derivative shapes differ");
            for (a, v) in acc.iter_mut().zip(&term.0) {
                *a += weight * v;
            }
        }
        DerivativeVector(acc)
    }
}
