//! Fixed-step time integrators.
//!
//! Every integrator is a pure function of `(dynamics, state, h) → next_state`:
//! it never mutates its input, keeps no state between calls, and returns
//! bit-identical results for identical inputs. They are generic over any
//! [`StepIntegrable`] state, so the same code advances the n-body
//! [`StateVector`] and the scalar fixtures used in tests.
//!
//! # Integrators
//!
//! | module             | order | evaluations | scheme                                  |
//! |--------------------|-------|-------------|-----------------------------------------|
//! | [`euler`]          | 1     | 1           | `y + h·f(y)`                            |
//! | [`midpoint`]       | 2     | 2           | `y + h·f(y + h/2·f(y))`                 |
//! | [`rk4`]            | 4     | 4           | classical Runge–Kutta                   |
//! | [`backward_euler`] | 1     | 2           | `y + h·f(y + h·f(y))`, one correction   |
//!
//! [`Method`] selects among them at runtime, and [`solve`] repeats a method
//! for a fixed number of steps while reporting each [`Event`] to an
//! [`Observer`].
//!
//! # Example
//!
//! ```
//! use nbody_core::{Body, Gravity, flatten};
//! use nbody_solvers::transient::{Method, solve_unobserved};
//!
//! let bodies = [
//!     Body::new(-1.0, 0.0, 0.0, -0.5, 1.0),
//!     Body::new(1.0, 0.0, 0.0, 0.5, 1.0),
//! ];
//! let gravity = Gravity::new(vec![1.0, 1.0]);
//!
//! let solution = solve_unobserved(Method::Rk4, &gravity, flatten(&bodies), 0.1, 10);
//!
//! assert_eq!(solution.history.len(), 11);
//! ```
//!
//! [`StepIntegrable`]: nbody_core::StepIntegrable
//! [`StateVector`]: nbody_core::StateVector
//! [`Observer`]: nbody_core::Observer

mod action;
mod event;
mod method;
mod solution;
mod solve;


pub mod backward_euler;
pub mod euler;
pub mod midpoint;
pub mod rk4;

pub use action::Action;
pub use event::Event;
pub use method::{Method, ParseMethodError};
pub use solution::{Solution, Status};
pub use solve::{solve, solve_unobserved};
