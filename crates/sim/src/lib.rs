//! Simulation driver for the n-body engine.
//!
//! [`Simulation`] ties the [`Gravity`](nbody_core::Gravity) model to a
//! selectable [`Method`](nbody_solvers::transient::Method) and advances the
//! bodies one fixed step per [`tick`](Simulation::tick). Runs are configured
//! with a [`Config`], reseeded with a [`SeedStrategy`], and observed frame by
//! frame through [`Simulation::run`].
//!
//! The [`protocol`] module holds the JSON echo used by clients that report
//! their bodies back to a server.

mod config;
mod error;
mod logging;
pub mod protocol;
mod seed;
mod simulation;

pub use config::{
    BODY_COUNT_RANGE, Config, ConfigError, DEFAULT_MIN_MASS, DEFAULT_STEP_SIZE, SCALE_RANGE,
    clamp_body_count, clamp_scale,
};
pub use error::Error;
pub use logging::init_tracing;
pub use seed::{SeedStrategy, random_bodies, random_body};
pub use simulation::{Control, Frame, RunStatus, RunSummary, Simulation};
