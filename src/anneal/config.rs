//! Annealer configuration.
//!
//! [`AnnealConfig`] holds every parameter of a run. Defaults reproduce the
//! reference 8-city run: 10 individuals, 24 generations, temperature
//! 10000 cooled by 0.9 with integer truncation down to a floor of 1000,
//! and a fixed 0.5 acceptance threshold.

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Rule for accepting a candidate that is worse than the current tour.
///
/// Better-or-equal candidates are always accepted regardless of the rule.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum AcceptanceRule {
    /// Accept when `p = base^(-Δ / T)` exceeds a fixed cutoff.
    ///
    /// This is deterministic for a given Δ and T: a worse candidate is
    /// either always or never accepted at a given temperature. It differs
    /// from textbook annealing, which compares `p` with a random draw.
    FixedThreshold {
        /// Cutoff in `[0, 1)`.
        threshold: f64,
    },

    /// Metropolis criterion: accept when a uniform draw in `[0, 1)` is
    /// below `p`.
    ///
    /// Reference: Kirkpatrick, Gelatt & Vecchi (1983)
    Metropolis,
}

impl Default for AcceptanceRule {
    fn default() -> Self {
        AcceptanceRule::FixedThreshold { threshold: 0.5 }
    }
}

/// What to do when no candidate is accepted within
/// [`AnnealConfig::max_attempts`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ExhaustionPolicy {
    /// Carry the current individual into the next generation unchanged.
    #[default]
    KeepCurrent,
    /// Abort the run with [`AnnealError::RetriesExhausted`](crate::AnnealError::RetriesExhausted).
    Fail,
}

/// Configuration for [`AnnealRunner`](super::AnnealRunner).
///
/// # Examples
///
/// ```
/// use tsp_anneal::anneal::{AcceptanceRule, AnnealConfig};
///
/// let config = AnnealConfig::default()
///     .with_population_size(20)
///     .with_max_generations(100)
///     .with_cooling_ratio(0.95)
///     .with_acceptance(AcceptanceRule::Metropolis)
///     .with_seed(42);
/// assert!(config.validate().is_ok());
/// ```
///
/// Loading from TOML; omitted fields keep their defaults:
///
/// ```
/// use tsp_anneal::anneal::AnnealConfig;
///
/// let config = AnnealConfig::from_toml_str(r#"
///     population_size = 16
///     min_temperature = 500.0
///
///     [acceptance]
///     type = "fixed_threshold"
///     threshold = 0.4
/// "#).unwrap();
/// assert_eq!(config.population_size, 16);
/// assert_eq!(config.max_generations, 24);
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct AnnealConfig {
    /// Individuals per generation. Must be at least 1.
    pub population_size: usize,

    /// Generation cap. The run stops after this many generations even if
    /// the temperature is still above the floor.
    pub max_generations: usize,

    /// Starting temperature.
    pub initial_temperature: f64,

    /// Multiplicative decay applied after every generation, in `(0, 1)`.
    pub cooling_ratio: f64,

    /// Round the temperature down to a whole number after each cooling
    /// step, as integer arithmetic would.
    pub truncate_temperature: bool,

    /// Stopping temperature. Generations run while `T > min_temperature`,
    /// so a floor at or above `initial_temperature` runs no generations.
    pub min_temperature: f64,

    /// Rule for accepting worse candidates.
    pub acceptance: AcceptanceRule,

    /// Base of the acceptance exponential `base^(-Δ / T)`.
    ///
    /// Defaults to 2.7 for compatibility with the reference run; use
    /// [`std::f64::consts::E`] for the textbook form.
    pub probability_base: f64,

    /// Maximum candidates drawn per individual per generation.
    ///
    /// 0 = no limit. With no limit, a [`FixedThreshold`](AcceptanceRule::FixedThreshold)
    /// run can loop forever on an individual whose every neighbor is worse
    /// by more than the threshold allows.
    pub max_attempts: usize,

    /// Behavior when `max_attempts` is reached.
    pub on_exhausted: ExhaustionPolicy,

    /// Random seed for reproducibility. `None` uses a random seed.
    pub seed: Option<u64>,
}

impl Default for AnnealConfig {
    fn default() -> Self {
        Self {
            population_size: 10,
            max_generations: 24,
            initial_temperature: 10_000.0,
            cooling_ratio: 0.9,
            truncate_temperature: true,
            min_temperature: 1_000.0,
            acceptance: AcceptanceRule::default(),
            probability_base: 2.7,
            max_attempts: 10_000,
            on_exhausted: ExhaustionPolicy::default(),
            seed: None,
        }
    }
}

impl AnnealConfig {
    /// Loads configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns error if the file can't be read or contains invalid TOML.
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    /// Parses configuration from a TOML string.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(s)?)
    }

    pub fn with_population_size(mut self, n: usize) -> Self {
        self.population_size = n;
        self
    }

    pub fn with_max_generations(mut self, n: usize) -> Self {
        self.max_generations = n;
        self
    }

    pub fn with_initial_temperature(mut self, t: f64) -> Self {
        self.initial_temperature = t;
        self
    }

    pub fn with_cooling_ratio(mut self, ratio: f64) -> Self {
        self.cooling_ratio = ratio;
        self
    }

    pub fn with_truncate_temperature(mut self, truncate: bool) -> Self {
        self.truncate_temperature = truncate;
        self
    }

    pub fn with_min_temperature(mut self, t: f64) -> Self {
        self.min_temperature = t;
        self
    }

    pub fn with_acceptance(mut self, rule: AcceptanceRule) -> Self {
        self.acceptance = rule;
        self
    }

    /// Shorthand for `.with_acceptance(AcceptanceRule::FixedThreshold { threshold })`.
    pub fn with_accept_threshold(self, threshold: f64) -> Self {
        self.with_acceptance(AcceptanceRule::FixedThreshold { threshold })
    }

    pub fn with_probability_base(mut self, base: f64) -> Self {
        self.probability_base = base;
        self
    }

    pub fn with_max_attempts(mut self, n: usize) -> Self {
        self.max_attempts = n;
        self
    }

    pub fn with_on_exhausted(mut self, policy: ExhaustionPolicy) -> Self {
        self.on_exhausted = policy;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Applies one cooling step to `temperature`.
    pub fn cool(&self, temperature: f64) -> f64 {
        let next = temperature * self.cooling_ratio;
        if self.truncate_temperature {
            next.floor()
        } else {
            next
        }
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.population_size == 0 {
            return Err(invalid("population_size must be at least 1"));
        }
        if self.max_generations == 0 {
            return Err(invalid("max_generations must be at least 1"));
        }
        if !self.initial_temperature.is_finite() || self.initial_temperature <= 0.0 {
            return Err(invalid("initial_temperature must be positive and finite"));
        }
        if !self.min_temperature.is_finite() || self.min_temperature < 0.0 {
            return Err(invalid("min_temperature must be non-negative and finite"));
        }
        if !(self.cooling_ratio > 0.0 && self.cooling_ratio < 1.0) {
            return Err(ConfigError::Invalid(format!(
                "cooling_ratio must be in (0, 1), got {}",
                self.cooling_ratio
            )));
        }
        if !(self.probability_base > 1.0 && self.probability_base.is_finite()) {
            return Err(ConfigError::Invalid(format!(
                "probability_base must be greater than 1, got {}",
                self.probability_base
            )));
        }
        if let AcceptanceRule::FixedThreshold { threshold } = self.acceptance {
            if !(0.0..1.0).contains(&threshold) {
                return Err(ConfigError::Invalid(format!(
                    "acceptance threshold must be in [0, 1), got {threshold}"
                )));
            }
        }
        Ok(())
    }
}

fn invalid(msg: &str) -> ConfigError {
    ConfigError::Invalid(msg.into())
}
