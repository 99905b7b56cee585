//! Capability traits for observers shared by the solve loop and the driver.
//!
//! [`transient::solve`] emits [`Event`]s and accepts [`Action`]s, while
//! [`Simulation::run`] emits [`Frame`]s and accepts [`Control`]s. These traits
//! abstract over both so one observer can watch either loop.
//!
//! # Example
//!
//! ```rust
//! use nbody_core::Observer;
//! use nbody_observers::traits::{CanStopEarly, HasState};
//!
//! /// Stops once any body leaves a box around the origin.
//! struct Fence(f64);
//!
//! impl<E: HasState, A: CanStopEarly> Observer<E, A> for Fence {
//!     fn observe(&mut self, event: &E) -> Option<A> {
//!         let escaped = event
//!             .state()
//!             .positions()
//!             .any(|[x, y]| x.abs() > self.0 || y.abs() > self.0);
//!         escaped.then(A::stop_early)
//!     }
//! }
//! ```
//!
//! [`transient::solve`]: nbody_solvers::transient::solve
//! [`Simulation::run`]: nbody_sim::Simulation::run

use nbody_core::StateVector;
use nbody_sim::{Control, Frame};
use nbody_solvers::transient::{Action, Event};

/// An event that carries the full state at a point in time.
pub trait HasState {
    /// Returns the state for this event.
    fn state(&self) -> &StateVector;

    /// Returns the simulation time of this event.
    fn time(&self) -> f64;
}

/// An action type that can signal early termination.
pub trait CanStopEarly {
    /// Returns the action that stops the loop early.
    fn stop_early() -> Self;
}

impl HasState for Event<StateVector> {
    fn state(&self) -> &StateVector {
        &self.state
    }

    fn time(&self) -> f64 {
        self.time
    }
}

impl HasState for Frame {
    fn state(&self) -> &StateVector {
        &self.state
    }

    fn time(&self) -> f64 {
        self.time
    }
}

impl CanStopEarly for Action {
    fn stop_early() -> Self {
        Self::StopEarly
    }
}

impl CanStopEarly for Control {
    fn stop_early() -> Self {
        Self::Stop
    }
}
