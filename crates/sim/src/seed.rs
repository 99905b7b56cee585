//! Initial-condition strategies.

use nbody_core::Body;
use rand::{Rng, SeedableRng, rngs::StdRng};
use serde::{Deserialize, Serialize};

/// How a reset chooses its new bodies.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SeedStrategy {
    /// Draw every body at random.
    ///
    /// With `Some(seed)` the draw is reproducible. With `None` the simulation
    /// keeps drawing from its current generator.
    Random { seed: Option<u64> },

    /// Use these bodies as given, after validation.
    Explicit(Vec<Body>),
}

impl SeedStrategy {
    /// A reproducible random strategy.
    #[must_use]
    pub fn seeded(seed: u64) -> Self {
        Self::Random { seed: Some(seed) }
    }
}

impl Default for SeedStrategy {
    fn default() -> Self {
        Self::Random { seed: None }
    }
}

/// Builds the generator for an optional seed, falling back to entropy.
pub(crate) fn make_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    }
}

/// Draws one body from the default initialization ranges.
///
/// Positions fall in `x ∈ [-3, 3)`, `y ∈ [-2, 2)`; velocities in `[-1, 1)`;
/// mass in `[0.1, 1.0)`, then raised to at least `min_mass`.
pub fn random_body<R: Rng + ?Sized>(rng: &mut R, min_mass: f64) -> Body {
    Body {
        x: rng.gen_range(-3.0..3.0),
        y: rng.gen_range(-2.0..2.0),
        vx: rng.gen_range(-1.0..1.0),
        vy: rng.gen_range(-1.0..1.0),
        mass: rng.gen_range(0.1..1.0_f64).max(min_mass),
    }
}

/// Draws `n` bodies with [`random_body`].
pub fn random_bodies<R: Rng + ?Sized>(rng: &mut R, n: usize, min_mass: f64) -> Vec<Body> {
    (0..n).map(|_| random_body(rng, min_mass)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn random_bodies_stay_in_range() {
        let mut rng = make_rng(Some(42));

        for body in random_bodies(&mut rng, 500, 0.1) {
            assert!((-3.0..3.0).contains(&body.x));
            assert!((-2.0..2.0).contains(&body.y));
            assert!((-1.0..1.0).contains(&body.vx));
            assert!((-1.0..1.0).contains(&body.vy));
            assert!((0.1..1.0).contains(&body.mass));
        }
    }

    #[test]
    fn same_seed_same_bodies() {
        let a = random_bodies(&mut make_rng(Some(7)), 5, 0.1);
        let b = random_bodies(&mut make_rng(Some(7)), 5, 0.1);
        let c = random_bodies(&mut make_rng(Some(8)), 5, 0.1);

        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn min_mass_raises_light_bodies() {
        let mut rng = make_rng(Some(1));

        for body in random_bodies(&mut rng, 100, 0.5) {
            assert!(body.mass >= 0.5);
        }
    }

    #[test]
    fn strategy_serializes_with_snake_case_tags() {
        let json = serde_json::to_string(&SeedStrategy::seeded(9)).unwrap();
        assert_eq!(json, r#"{"random":{"seed":9}}"#);
    }
}
