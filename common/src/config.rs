use std::time::Duration;

use thiserror::Error;

const WEIGHT_TOLERANCE: f64 = 1e-9;

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("scoring weights must sum to 1.0, got {0}")]
    WeightSum(f64),
    #[error("scoring weight '{0}' must be a finite, non-negative number")]
    InvalidWeight(&'static str),
    #[error("maximum distance must be positive, got {0} km")]
    MaxDistance(f64),
    #[error("reference price must be positive, got {0}")]
    ReferencePrice(f64),
    #[error("candidate count must be at least 1")]
    TopN,
}

/// Relative importance of each scoring component.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Weights {
    pub availability: f64,
    pub distance: f64,
    pub traffic: f64,
    pub price: f64,
}

impl Weights {
    pub const fn new(availability: f64, distance: f64, traffic: f64, price: f64) -> Self {
        Self {
            availability,
            distance,
            traffic,
            price,
        }
    }

    pub fn sum(&self) -> f64 {
        self.availability + self.distance + self.traffic + self.price
    }

    /// Every weight must be non-negative and together they must sum to 1.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let named = [
            ("availability", self.availability),
            ("distance", self.distance),
            ("traffic", self.traffic),
            ("price", self.price),
        ];
        for (name, weight) in named {
            if !weight.is_finite() || weight < 0.0 {
                return Err(ConfigError::InvalidWeight(name));
            }
        }

        let sum = self.sum();
        if (sum - 1.0).abs() > WEIGHT_TOLERANCE {
            return Err(ConfigError::WeightSum(sum));
        }
        Ok(())
    }
}

impl Default for Weights {
    fn default() -> Self {
        Self::new(0.40, 0.30, 0.20, 0.10)
    }
}

/// Settings for the assignment engine.
#[derive(Clone, Debug, PartialEq)]
pub struct EngineConfig {
    pub weights: Weights,
    /// Distance at which the distance score reaches zero.
    pub max_distance_km: f64,
    /// Hourly price at which the price score reaches zero.
    pub reference_price: f64,
    /// How many ranked candidates `assign` considers.
    pub top_n: usize,
    /// Upper bound on a single confidence predictor call.
    pub predictor_timeout: Duration,
}

impl EngineConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.weights.validate()?;
        if !(self.max_distance_km > 0.0) {
            return Err(ConfigError::MaxDistance(self.max_distance_km));
        }
        if !(self.reference_price > 0.0) {
            return Err(ConfigError::ReferencePrice(self.reference_price));
        }
        if self.top_n == 0 {
            return Err(ConfigError::TopN);
        }
        Ok(())
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            weights: Weights::default(),
            max_distance_km: 5.0,
            reference_price: 10.0,
            top_n: 3,
            predictor_timeout: Duration::from_millis(500),
        }
    }
}

/// Settings for the recommendation ranker.
#[derive(Clone, Debug, PartialEq)]
pub struct RankerConfig {
    pub weights: Weights,
    /// Spots farther than this are dropped from the ranking.
    pub max_distance_km: f64,
}

impl RankerConfig {
    pub fn with_max_distance(max_distance_km: f64) -> Self {
        Self {
            max_distance_km,
            ..Self::default()
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.weights.validate()?;
        if !(self.max_distance_km > 0.0) {
            return Err(ConfigError::MaxDistance(self.max_distance_km));
        }
        Ok(())
    }
}

impl Default for RankerConfig {
    fn default() -> Self {
        Self {
            weights: Weights::default(),
            max_distance_km: 5.0,
        }
    }
}
