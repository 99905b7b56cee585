use std::ops::RangeInclusive;

use nbody_core::Body;
use nbody_solvers::transient::Method;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Allowed number of bodies.
pub const BODY_COUNT_RANGE: RangeInclusive<usize> = 2..=10;

/// Allowed render scale, in pixels per world unit.
pub const SCALE_RANGE: RangeInclusive<f64> = 10.0..=500.0;

/// Fixed step size used by the reference trajectories.
pub const DEFAULT_STEP_SIZE: f64 = 0.1;

/// Smallest mass a body may be edited down to.
pub const DEFAULT_MIN_MASS: f64 = 0.1;

/// Configuration for a [`Simulation`](crate::Simulation).
///
/// Every field has a default, so an empty TOML document is a valid config.
/// When a document lists `bodies` but omits `body_count`, the count is taken
/// from the list. The render `scale` is carried for display collaborators
/// and never touches the physics.
///
/// # Example
///
/// ```
/// use nbody_sim::Config;
/// use nbody_solvers::transient::Method;
///
/// let config = Config::from_toml_str(
///     r#"
///     body_count = 4
///     method = "Midpoint"
///     seed = 7
///     "#,
/// )
/// .unwrap();
///
/// assert_eq!(config.body_count, 4);
/// assert_eq!(config.method, Method::Midpoint);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "ConfigFile")]
pub struct Config {
    pub body_count: usize,
    pub scale: f64,
    pub method: Method,
    pub step_size: f64,
    pub min_mass: f64,

    /// Seed for random initialization; entropy is used when absent.
    pub seed: Option<u64>,

    /// Explicit initial bodies; random ones are drawn when absent.
    pub bodies: Option<Vec<Body>>,
}

/// Errors that can occur when validating a [`Config`].
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("body count {0} is outside {min}..={max}", min = BODY_COUNT_RANGE.start(), max = BODY_COUNT_RANGE.end())]
    BodyCount(usize),

    #[error("scale {0} is outside {min}..={max}", min = SCALE_RANGE.start(), max = SCALE_RANGE.end())]
    Scale(f64),

    #[error("step size must be finite and positive, got {0}")]
    StepSize(f64),

    #[error("minimum mass must be finite and positive, got {0}")]
    MinMass(f64),

    #[error("expected {expected} bodies, found {found}")]
    BodiesLength { expected: usize, found: usize },

    #[error("body {0} has a non-finite field")]
    NonFiniteBody(usize),

    #[error("invalid TOML config: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("invalid JSON config: {0}")]
    Json(#[from] serde_json::Error),
}

impl Default for Config {
    fn default() -> Self {
        Self {
            body_count: 3,
            scale: 100.0,
            method: Method::Rk4,
            step_size: DEFAULT_STEP_SIZE,
            min_mass: DEFAULT_MIN_MASS,
            seed: None,
            bodies: None,
        }
    }
}

/// The on-disk shape of a [`Config`], where `body_count` may be omitted.
#[derive(Deserialize)]
#[serde(default, deny_unknown_fields)]
struct ConfigFile {
    body_count: Option<usize>,
    scale: f64,
    method: Method,
    step_size: f64,
    min_mass: f64,
    seed: Option<u64>,
    bodies: Option<Vec<Body>>,
}

impl Default for ConfigFile {
    fn default() -> Self {
        let config = Config::default();
        Self {
            body_count: None,
            scale: config.scale,
            method: config.method,
            step_size: config.step_size,
            min_mass: config.min_mass,
            seed: config.seed,
            bodies: config.bodies,
        }
    }
}

impl From<ConfigFile> for Config {
    fn from(file: ConfigFile) -> Self {
        let body_count = file
            .body_count
            .or(file.bodies.as_ref().map(Vec::len))
            .unwrap_or(Config::default().body_count);

        Self {
            body_count,
            scale: file.scale,
            method: file.method,
            step_size: file.step_size,
            min_mass: file.min_mass,
            seed: file.seed,
            bodies: file.bodies,
        }
    }
}

impl Config {
    /// Parses and validates a TOML config.
    ///
    /// # Errors
    ///
    /// Returns an error if the document does not parse or fails [`validate`].
    ///
    /// [`validate`]: Config::validate
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// Parses and validates a JSON config.
    ///
    /// # Errors
    ///
    /// Returns an error if the document does not parse or fails [`validate`].
    ///
    /// [`validate`]: Config::validate
    pub fn from_json_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// Checks every bound.
    ///
    /// Explicit bodies must match `body_count` and be finite. Their masses are
    /// not checked here; they are clamped to `min_mass` when installed.
    ///
    /// # Errors
    ///
    /// Returns the first violated bound.
    pub fn validate(&self) -> Result<(), ConfigError> {
        check_body_count(self.body_count)?;
        check_scale(self.scale)?;
        if !self.step_size.is_finite() || self.step_size <= 0.0 {
            return Err(ConfigError::StepSize(self.step_size));
        }
        if !self.min_mass.is_finite() || self.min_mass <= 0.0 {
            return Err(ConfigError::MinMass(self.min_mass));
        }
        if let Some(bodies) = &self.bodies {
            check_bodies(self.body_count, bodies)?;
        }
        Ok(())
    }
}

/// Checks that `n` is an allowed body count.
///
/// # Errors
///
/// Returns [`ConfigError::BodyCount`] if `n` is outside [`BODY_COUNT_RANGE`].
pub fn check_body_count(n: usize) -> Result<usize, ConfigError> {
    if BODY_COUNT_RANGE.contains(&n) {
        Ok(n)
    } else {
        Err(ConfigError::BodyCount(n))
    }
}

/// Checks that `scale` is an allowed render scale.
///
/// # Errors
///
/// Returns [`ConfigError::Scale`] if `scale` is outside [`SCALE_RANGE`] or NaN.
pub fn check_scale(scale: f64) -> Result<f64, ConfigError> {
    if SCALE_RANGE.contains(&scale) {
        Ok(scale)
    } else {
        Err(ConfigError::Scale(scale))
    }
}

/// Checks that `bodies` holds `expected` finite bodies.
///
/// # Errors
///
/// Returns an error on a length mismatch or a non-finite field.
pub fn check_bodies(expected: usize, bodies: &[Body]) -> Result<(), ConfigError> {
    if bodies.len() != expected {
        return Err(ConfigError::BodiesLength {
            expected,
            found: bodies.len(),
        });
    }
    match bodies.iter().position(|b| !b.is_finite()) {
        Some(index) => Err(ConfigError::NonFiniteBody(index)),
        None => Ok(()),
    }
}

/// Clamps a requested body count into [`BODY_COUNT_RANGE`].
#[must_use]
pub fn clamp_body_count(n: usize) -> usize {
    n.clamp(*BODY_COUNT_RANGE.start(), *BODY_COUNT_RANGE.end())
}

/// Clamps a requested render scale into [`SCALE_RANGE`].
///
/// NaN maps to the default scale of 100.
#[must_use]
pub fn clamp_scale(scale: f64) -> f64 {
    if scale.is_nan() {
        return Config::default().scale;
    }
    scale.clamp(*SCALE_RANGE.start(), *SCALE_RANGE.end())
}
