//! Reusable observers for the n-body engine.
//!
//! The observers here work with both [`transient::solve`] and
//! [`Simulation::run`], via the capability traits in [`traits`].
//!
//! - [`Trails`]: bounded per-body position history, reset on restart
//! - [`DriftGuard`]: stops a run when total energy drifts too far
//!
//! # Features
//!
//! - `plot`: Enables [`OrbitPlot`] for viewing trajectories via egui.
//!   This feature adds dependencies on `eframe` and `egui_plot`.
//!
//! [`transient::solve`]: nbody_solvers::transient::solve
//! [`Simulation::run`]: nbody_sim::Simulation::run

mod drift;
mod trail;
pub mod traits;

#[cfg(feature = "plot")]
mod plot;

pub use drift::DriftGuard;
pub use trail::{DEFAULT_TRAIL_LENGTH, Trails};

#[cfg(feature = "plot")]
pub use plot::{OrbitPlot, ShowConfig};
