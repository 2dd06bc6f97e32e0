//! Stochastic weather process.
//!
//! Each traversed leg draws an independent weather condition that scales its
//! travel time. Draws are i.i.d.; the process holds no state between calls,
//! so one process is safely shared across vehicles and comparison runs. The
//! random source is passed explicitly to keep runs reproducible under a fixed
//! seed.

use rand::Rng;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A discrete weather condition with its travel-time multiplier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Condition {
    /// Clear weather, no slowdown.
    Sunny,
    /// Light rain, 25% slower travel.
    LightRain,
    /// Severe storm, 60% slower travel.
    SevereStorm,
}

impl Condition {
    /// Human-readable name.
    pub fn name(&self) -> &'static str {
        match self {
            Condition::Sunny => "Sunny",
            Condition::LightRain => "Light Rain",
            Condition::SevereStorm => "Severe Storm",
        }
    }

    /// Factor applied to base travel time under this condition.
    pub fn multiplier(&self) -> f64 {
        match self {
            Condition::Sunny => 1.0,
            Condition::LightRain => 1.25,
            Condition::SevereStorm => 1.60,
        }
    }
}

/// Error raised when weather probabilities are invalid.
#[derive(Debug, Error, PartialEq)]
pub enum ConfigurationError {
    /// A probability is negative or non-finite.
    #[error("probabilities must be finite and non-negative, got storm={storm}, rain={rain}")]
    InvalidProbability {
        /// Configured storm probability.
        storm: f64,
        /// Configured rain probability.
        rain: f64,
    },
    /// The probabilities sum above 1.0.
    #[error("storm + rain probability must not exceed 1.0, got {sum}")]
    ExcessiveMass {
        /// Sum of storm and rain probabilities.
        sum: f64,
    },
}

/// Draws i.i.d. weather conditions with configured storm and rain
/// probabilities; sunny weather takes the remaining mass.
///
/// Construction fails fast when the probabilities sum above 1.0 — they are
/// never silently clamped. A single uniform draw is resolved against
/// cumulative thresholds in first-match order storm, then rain, then sunny,
/// so boundary values are deterministic under a fixed random source.
///
/// # Examples
///
/// ```
/// use fleetsim::weather::{Condition, WeatherProcess};
/// use rand::{rngs::StdRng, SeedableRng};
///
/// let weather = WeatherProcess::new(0.1, 0.2).unwrap();
/// let mut rng = StdRng::seed_from_u64(7);
/// let draw = weather.draw(&mut rng);
/// assert!(draw.multiplier() >= 1.0);
///
/// assert!(WeatherProcess::new(0.6, 0.5).is_err());
/// ```
#[derive(Debug, Clone)]
pub struct WeatherProcess {
    storm_probability: f64,
    rain_probability: f64,
}

impl WeatherProcess {
    /// Creates a weather process with the given storm and rain probabilities.
    pub fn new(storm_probability: f64, rain_probability: f64) -> Result<Self, ConfigurationError> {
        if !storm_probability.is_finite()
            || !rain_probability.is_finite()
            || storm_probability < 0.0
            || rain_probability < 0.0
        {
            return Err(ConfigurationError::InvalidProbability {
                storm: storm_probability,
                rain: rain_probability,
            });
        }
        let sum = storm_probability + rain_probability;
        if sum > 1.0 {
            return Err(ConfigurationError::ExcessiveMass { sum });
        }
        Ok(Self {
            storm_probability,
            rain_probability,
        })
    }

    /// Always-sunny weather (zero storm and rain probability).
    pub fn clear() -> Self {
        Self {
            storm_probability: 0.0,
            rain_probability: 0.0,
        }
    }

    /// Configured storm probability.
    pub fn storm_probability(&self) -> f64 {
        self.storm_probability
    }

    /// Configured rain probability.
    pub fn rain_probability(&self) -> f64 {
        self.rain_probability
    }

    /// Draws one weather condition.
    pub fn draw<R: Rng + ?Sized>(&self, rng: &mut R) -> Condition {
        let r: f64 = rng.random();
        if r < self.storm_probability {
            Condition::SevereStorm
        } else if r < self.storm_probability + self.rain_probability {
            Condition::LightRain
        } else {
            Condition::Sunny
        }
    }
}
