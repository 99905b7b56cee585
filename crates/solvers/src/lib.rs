//! Numerical integrators for the n-body engine.
//!
//! # Modules
//!
//! - [`transient`]: fixed-step time integrators ([`transient::euler`],
//!   [`transient::midpoint`], [`transient::rk4`],
//!   [`transient::backward_euler`]), the [`transient::Method`] selector, and
//!   an observed multi-step [`transient::solve`] loop

pub mod transient;
