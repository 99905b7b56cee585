use std::{fmt, str::FromStr};

use nbody_core::{Dynamics, StepIntegrable, WeightedSum};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::{backward_euler, euler, midpoint, rk4};

/// Selects which fixed-step integrator advances the state.
///
/// Every method shares the same signature and state format, so switching
/// between them mid-run never invalidates the current state. There is no
/// per-method state carried between steps.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Method {
    /// Classical fourth-order Runge–Kutta.
    #[default]
    #[serde(rename = "RK4", alias = "Rk4", alias = "rk4")]
    Rk4,

    /// Explicit midpoint (second-order Runge–Kutta).
    #[serde(rename = "Midpoint", alias = "midpoint")]
    Midpoint,

    /// Explicit first-order Euler.
    #[serde(rename = "ForwardEuler", alias = "Forward Euler")]
    ForwardEuler,

    /// One-pass predictor–corrector approximation of backward Euler.
    #[serde(rename = "BackwardEulerApprox", alias = "Backward Euler")]
    BackwardEulerApprox,
}

impl Method {
    /// Every method, highest order first.
    pub const ALL: [Method; 4] = [
        Method::Rk4,
        Method::Midpoint,
        Method::ForwardEuler,
        Method::BackwardEulerApprox,
    ];

    /// Returns the canonical name accepted by [`FromStr`] and serde.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Method::Rk4 => "RK4",
            Method::Midpoint => "Midpoint",
            Method::ForwardEuler => "ForwardEuler",
            Method::BackwardEulerApprox => "BackwardEulerApprox",
        }
    }

    /// Returns the number of derivative evaluations per step.
    #[must_use]
    pub fn evaluations(self) -> usize {
        match self {
            Method::Rk4 => 4,
            Method::Midpoint | Method::BackwardEulerApprox => 2,
            Method::ForwardEuler => 1,
        }
    }

    /// Returns the global order of accuracy.
    #[must_use]
    pub fn order(self) -> u32 {
        match self {
            Method::Rk4 => 4,
            Method::Midpoint => 2,
            Method::ForwardEuler | Method::BackwardEulerApprox => 1,
        }
    }

    /// Advances `state` by one step of size `h` using this method.
    #[must_use]
    pub fn step<S, D>(self, dynamics: &D, state: &S, h: f64) -> S
    where
        S: StepIntegrable<f64>,
        S::Derivative: WeightedSum,
        D: Dynamics<S>,
    {
        match self {
            Method::Rk4 => rk4::step(dynamics, state, h),
            Method::Midpoint => midpoint::step(dynamics, state, h),
            Method::ForwardEuler => euler::step(dynamics, state, h),
            Method::BackwardEulerApprox => backward_euler::step(dynamics, state, h),
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Error returned when a string does not name a [`Method`].
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error(
    "unknown integration method `{0}` (expected one of: RK4, Midpoint, ForwardEuler, BackwardEulerApprox)"
)]
pub struct ParseMethodError(pub String);

impl FromStr for Method {
    type Err = ParseMethodError;

    /// Parses a method name.
    ///
    /// Matching ignores case, spaces, underscores, and hyphens, so the
    /// canonical names and the display labels `Forward Euler` and
    /// `Backward Euler` are all accepted.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key: String = s
            .chars()
            .filter(|c| !matches!(c, ' ' | '_' | '-'))
            .flat_map(char::to_lowercase)
            .collect();

        match key.as_str() {
            "rk4" | "rungekutta4" => Ok(Method::Rk4),
            "midpoint" => Ok(Method::Midpoint),
            "forwardeuler" => Ok(Method::ForwardEuler),
            "backwardeuler" | "backwardeulerapprox" => Ok(Method::BackwardEulerApprox),
            _ => Err(ParseMethodError(s.to_owned())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_canonical_names() {
        for method in Method::ALL {
            assert_eq!(method.name().parse(), Ok(method));
            assert_eq!(method.to_string().parse(), Ok(method));
        }
    }

    #[test]
    fn parses_display_labels() {
        assert_eq!("Forward Euler".parse(), Ok(Method::ForwardEuler));
        assert_eq!("Backward Euler".parse(), Ok(Method::BackwardEulerApprox));
        assert_eq!("backward_euler_approx".parse(), Ok(Method::BackwardEulerApprox));
        assert_eq!("rk4".parse(), Ok(Method::Rk4));
    }

    #[test]
    fn rejects_unknown_names() {
        assert_eq!(
            "Verlet".parse::<Method>(),
            Err(ParseMethodError("Verlet".into()))
        );
    }

    #[test]
    fn serde_uses_canonical_names() {
        let json = serde_json::to_string(&Method::BackwardEulerApprox).unwrap();
        assert_eq!(json, "\"BackwardEulerApprox\"");

        let parsed: Method = serde_json::from_str("\"Forward Euler\"").unwrap();
        assert_eq!(parsed, Method::ForwardEuler);

        let parsed: Method = serde_json::from_str("\"RK4\"").unwrap();
        assert_eq!(parsed, Method::Rk4);
    }

    #[test]
    fn evaluation_counts() {
        let counts: Vec<_> = Method::ALL.iter().map(|m| m.evaluations()).collect();
        assert_eq!(counts, vec![4, 2, 1, 2]);
    }

    #[test]
    fn defaults_to_rk4() {
        assert_eq!(Method::default(), Method::Rk4);
    }
}
