//! The simulation driver.
//!
//! A [`Simulation`] owns the initial bodies, the fixed mass list, the current
//! [`StateVector`], the selected [`Method`], and the fixed step size. Each
//! call to [`Simulation::tick`] advances exactly one step; pacing, rendering,
//! and trail history belong to the caller.
//!
//! Every operation that replaces the bodies (a reset, a body edit, or a body
//! re-roll) restarts the run from the new initial conditions and bumps the
//! [generation](Simulation::generation). Collaborators that keep derived
//! history, such as position trails, compare generations to know when to
//! discard it.

use nbody_core::{Body, Field, Gravity, Observer, StateVector, flatten};
use nbody_solvers::transient::Method;
use rand::rngs::StdRng;
use tracing::{debug, info, warn};

use crate::{
    Config, Error,
    config::{check_bodies, check_body_count, check_scale},
    seed::{SeedStrategy, make_rng, random_body, random_bodies},
};

/// One tick's worth of output, handed to a [`Simulation::run`] observer.
#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    /// Generation of the bodies this frame was integrated from.
    pub generation: u64,

    /// Steps taken since the last restart.
    pub step: u64,

    /// Simulation time since the last restart, `step × h`.
    pub time: f64,

    /// The state after this tick.
    pub state: StateVector,
}

/// Control actions a [`Simulation::run`] observer can return.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
    /// Stop the loop after the current frame.
    Stop,
}

/// Indicates how a [`Simulation::run`] loop ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunStatus {
    /// Ran every requested frame.
    Complete,

    /// Stopped because the observer returned [`Control::Stop`].
    Stopped,
}

/// Summary of a [`Simulation::run`] loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunSummary {
    pub status: RunStatus,

    /// Number of ticks performed.
    pub frames: usize,
}

/// An n-body simulation advanced one fixed step at a time.
///
/// All mutating operations take `&mut self`, so ticks and edits are
/// serialized by construction. A failed operation leaves the simulation
/// unchanged.
#[derive(Debug, Clone)]
pub struct Simulation {
    bodies: Vec<Body>,
    gravity: Gravity,
    state: StateVector,
    method: Method,
    step_size: f64,
    scale: f64,
    min_mass: f64,
    steps: u64,
    generation: u64,
    rng: StdRng,
}

impl Simulation {
    /// Creates a simulation from a validated config.
    ///
    /// Uses the config's explicit bodies when present, otherwise draws
    /// `body_count` random bodies from the config's seed.
    ///
    /// # Errors
    ///
    /// Returns an error if the config fails validation.
    pub fn new(config: &Config) -> Result<Self, Error> {
        config.validate()?;

        let mut rng = make_rng(config.seed);
        let bodies = match &config.bodies {
            Some(bodies) => clamp_masses(bodies.clone(), config.min_mass),
            None => random_bodies(&mut rng, config.body_count, config.min_mass),
        };

        let state = flatten(&bodies);
        let gravity = Gravity::new(masses_of(&bodies));

        info!(
            bodies = bodies.len(),
            method = %config.method,
            step_size = config.step_size,
            seed = ?config.seed,
            "simulation created"
        );

        Ok(Self {
            bodies,
            gravity,
            state,
            method: config.method,
            step_size: config.step_size,
            scale: config.scale,
            min_mass: config.min_mass,
            steps: 0,
            generation: 0,
            rng,
        })
    }

    /// Advances the state by exactly one step and returns it.
    pub fn tick(&mut self) -> &StateVector {
        self.state = self.method.step(&self.gravity, &self.state, self.step_size);
        self.steps += 1;
        &self.state
    }

    /// Runs up to `frames` ticks, handing each resulting [`Frame`] to the
    /// observer.
    ///
    /// This is the caller-owned start/stop loop: returning [`Control::Stop`]
    /// from the observer cancels the remaining frames. No step is ever left
    /// half-applied.
    pub fn run<Obs>(&mut self, frames: usize, mut observer: Obs) -> RunSummary
    where
        Obs: Observer<Frame, Control>,
    {
        for done in 1..=frames {
            self.tick();
            let frame = self.frame();
            debug!(step = frame.step, time = frame.time, "frame");

            if let Some(Control::Stop) = observer.observe(&frame) {
                info!(frames = done, "run stopped by observer");
                return RunSummary {
                    status: RunStatus::Stopped,
                    frames: done,
                };
            }
        }

        info!(frames, steps = self.steps, "run complete");
        RunSummary {
            status: RunStatus::Complete,
            frames,
        }
    }

    /// Replaces every body and restarts the run.
    ///
    /// # Errors
    ///
    /// Returns an error if `body_count` is outside the allowed range, or if
    /// explicit bodies do not match `body_count` or contain non-finite values.
    pub fn reset(&mut self, body_count: usize, strategy: SeedStrategy) -> Result<(), Error> {
        check_body_count(body_count)?;

        let bodies = match strategy {
            SeedStrategy::Random { seed } => {
                if let Some(seed) = seed {
                    self.rng = make_rng(Some(seed));
                }
                random_bodies(&mut self.rng, body_count, self.min_mass)
            }
            SeedStrategy::Explicit(bodies) => {
                check_bodies(body_count, &bodies)?;
                clamp_masses(bodies, self.min_mass)
            }
        };

        self.install(bodies);
        info!(
            bodies = body_count,
            generation = self.generation,
            "simulation reset"
        );
        Ok(())
    }

    /// Switches the integration method.
    ///
    /// The current state is kept; only subsequent ticks use the new method.
    pub fn set_method(&mut self, method: Method) {
        if method != self.method {
            debug!(from = %self.method, to = %method, "method changed");
        }
        self.method = method;
    }

    /// Switches the integration method by name.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownMethod`] if `name` does not parse.
    pub fn set_method_by_name(&mut self, name: &str) -> Result<(), Error> {
        let method = name.parse()?;
        self.set_method(method);
        Ok(())
    }

    /// Edits one field of one body's initial condition and restarts the run.
    ///
    /// Mass edits below the minimum mass are clamped up to it.
    ///
    /// # Errors
    ///
    /// Returns an error if `index` is out of range or `value` is not finite.
    pub fn set_body(&mut self, index: usize, field: Field, value: f64) -> Result<(), Error> {
        self.check_index(index)?;
        if !value.is_finite() {
            return Err(Error::NonFinite { field, value });
        }

        let value = if field == Field::Mass && value < self.min_mass {
            warn!(
                index,
                requested = value,
                clamped = self.min_mass,
                "mass below minimum, clamping"
            );
            self.min_mass
        } else {
            value
        };

        let mut bodies = self.bodies.clone();
        bodies[index].set(field, value);
        self.install(bodies);
        debug!(index, %field, value, generation = self.generation, "body edited");
        Ok(())
    }

    /// Like [`set_body`](Self::set_body), with the field given by name.
    ///
    /// # Errors
    ///
    /// Returns an error if the field name is unknown, or for any reason
    /// [`set_body`](Self::set_body) would.
    pub fn set_body_by_name(&mut self, index: usize, field: &str, value: f64) -> Result<(), Error> {
        self.set_body(index, field.parse()?, value)
    }

    /// Redraws one body's initial condition at random and restarts the run.
    ///
    /// # Errors
    ///
    /// Returns [`Error::BodyIndex`] if `index` is out of range.
    pub fn randomize_body(&mut self, index: usize) -> Result<(), Error> {
        self.check_index(index)?;

        let mut bodies = self.bodies.clone();
        bodies[index] = random_body(&mut self.rng, self.min_mass);
        self.install(bodies);
        debug!(index, generation = self.generation, "body randomized");
        Ok(())
    }

    /// Sets the render scale.
    ///
    /// # Errors
    ///
    /// Returns an error if `scale` is outside the allowed range.
    pub fn set_scale(&mut self, scale: f64) -> Result<(), Error> {
        self.scale = check_scale(scale)?;
        Ok(())
    }

    /// Returns the current state.
    #[must_use]
    pub fn state(&self) -> &StateVector {
        &self.state
    }

    /// Returns the initial conditions the current run started from.
    #[must_use]
    pub fn bodies(&self) -> &[Body] {
        &self.bodies
    }

    /// Returns the bodies at the current state, paired with their masses.
    #[must_use]
    pub fn current_bodies(&self) -> Vec<Body> {
        self.state
            .phases()
            .zip(self.gravity.masses())
            .map(|(phase, &mass)| phase.with_mass(mass))
            .collect()
    }

    #[must_use]
    pub fn masses(&self) -> &[f64] {
        self.gravity.masses()
    }

    #[must_use]
    pub fn body_count(&self) -> usize {
        self.bodies.len()
    }

    #[must_use]
    pub fn method(&self) -> Method {
        self.method
    }

    #[must_use]
    pub fn step_size(&self) -> f64 {
        self.step_size
    }

    /// Returns the render scale. Display only; never used by the physics.
    #[must_use]
    pub fn scale(&self) -> f64 {
        self.scale
    }

    /// Returns the number of steps since the last restart.
    #[must_use]
    pub fn steps(&self) -> u64 {
        self.steps
    }

    /// Returns the simulation time since the last restart.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn time(&self) -> f64 {
        self.steps as f64 * self.step_size
    }

    /// Returns the generation counter, bumped on every restart.
    #[must_use]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Captures the current state as a [`Frame`].
    #[must_use]
    pub fn frame(&self) -> Frame {
        Frame {
            generation: self.generation,
            step: self.steps,
            time: self.time(),
            state: self.state.clone(),
        }
    }

    fn check_index(&self, index: usize) -> Result<(), Error> {
        if index < self.bodies.len() {
            Ok(())
        } else {
            Err(Error::BodyIndex {
                index,
                count: self.bodies.len(),
            })
        }
    }

    /// Installs new initial conditions and restarts from them.
    fn install(&mut self, bodies: Vec<Body>) {
        self.state = flatten(&bodies);
        self.gravity = Gravity::new(masses_of(&bodies));
        self.bodies = bodies;
        self.steps = 0;
        self.generation += 1;
    }
}

fn masses_of(bodies: &[Body]) -> Vec<f64> {
    bodies.iter().map(|b| b.mass).collect()
}

fn clamp_masses(mut bodies: Vec<Body>, min_mass: f64) -> Vec<Body> {
    for (index, body) in bodies.iter_mut().enumerate() {
        if body.mass < min_mass {
            warn!(
                index,
                requested = body.mass,
                clamped = min_mass,
                "mass below minimum, clamping"
            );
            body.mass = min_mass;
        }
    }
    bodies
}
