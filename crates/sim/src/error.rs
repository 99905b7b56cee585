use nbody_core::{Field, ParseFieldError};
use nbody_solvers::transient::ParseMethodError;

use crate::ConfigError;

/// Errors returned by [`Simulation`](crate::Simulation) operations.
///
/// Every variant is a rejected boundary input. When an operation returns an
/// error the simulation is left exactly as it was.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("body index {index} is out of range for {count} bodies")]
    BodyIndex { index: usize, count: usize },

    #[error("{field} must be finite, got {value}")]
    NonFinite { field: Field, value: f64 },

    #[error(transparent)]
    UnknownMethod(#[from] ParseMethodError),

    #[error(transparent)]
    UnknownField(#[from] ParseFieldError),
}
