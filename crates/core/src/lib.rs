//! Core types for a small gravitational n-body engine.
//!
//! This crate defines the shared data and abstractions that the solvers,
//! observers, and simulation driver build on:
//!
//! - [`Body`] and [`Field`]: a point mass and the names of its editable fields
//! - [`StateVector`] / [`DerivativeVector`]: the flattened `[x, y, vx, vy]`
//!   encoding and its time derivative, with [`flatten`] and [`unflatten`]
//! - [`Gravity`]: the pairwise softened gravity model
//! - [`StepIntegrable`], [`WeightedSum`], [`Dynamics`]: the seams that let
//!   integrators stay generic over the state type
//! - [`Observer`]: receives loop events and optionally returns control actions

mod body;
pub mod diagnostics;
mod dynamics;
pub mod gravity;
mod observer;
mod state;
mod step;

pub use body::{Body, Field, ParseFieldError};
pub use dynamics::Dynamics;
pub use gravity::Gravity;
pub use observer::Observer;
pub use state::{DerivativeVector, Phase, SLOTS_PER_BODY, StateVector, flatten, unflatten};
pub use step::{DerivativeOf, StepIntegrable, WeightedSum};
