//! Match configuration
//!
//! Defines the weights, bonuses, thresholds and tolerances used by the
//! scorer and the classifier. Defaults reproduce the stock matching behaviour;
//! a JSON file may override any subset of fields.

use prodmatch_core::{DimensionTolerance, Error as CoreError};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Match configuration version 1
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct MatchConfig {
    /// Config version for future compatibility
    pub version: u32,

    /// Weights of the four similarity factors
    pub factors: FactorWeights,

    /// Weights inside the specs factor
    pub specs: SpecWeights,

    /// Multipliers applied on top of the weighted base
    pub bonuses: Bonuses,

    /// Minimum score for a match
    pub threshold: f32,

    /// Minimum score when either title is insulation material
    pub insulation_threshold: f32,

    /// Relative difference under which two numeric specs count as equal
    pub spec_tolerance: f64,

    /// Tolerances for dimension comparison
    pub dimensions: DimensionTolerance,

    /// Fan pairwise work out over the rayon pool
    pub parallel: bool,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            version: 1,
            factors: FactorWeights::default(),
            specs: SpecWeights::default(),
            bonuses: Bonuses::default(),
            threshold: 0.65,
            insulation_threshold: 0.60,
            spec_tolerance: 0.05,
            dimensions: DimensionTolerance::default(),
            parallel: true,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct FactorWeights {
    pub model: f32,
    pub brand: f32,
    pub specs: f32,
    pub words: f32,
}

impl Default for FactorWeights {
    fn default() -> Self {
        Self {
            model: 0.45,
            brand: 0.25,
            specs: 0.20,
            words: 0.10,
        }
    }
}

impl FactorWeights {
    fn named(&self) -> [(&'static str, f32); 4] {
        [
            ("model", self.model),
            ("brand", self.brand),
            ("specs", self.specs),
            ("words", self.words),
        ]
    }

    pub fn sum(&self) -> f32 {
        self.model + self.brand + self.specs + self.words
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SpecWeights {
    pub dimensions: f32,
    pub weight: f32,
    pub volume: f32,
    pub power: f32,
    pub storage: f32,
}

impl Default for SpecWeights {
    fn default() -> Self {
        Self {
            dimensions: 0.4,
            weight: 0.2,
            volume: 0.15,
            power: 0.15,
            storage: 0.1,
        }
    }
}

impl SpecWeights {
    fn named(&self) -> [(&'static str, f32); 5] {
        [
            ("dimensions", self.dimensions),
            ("weight", self.weight),
            ("volume", self.volume),
            ("power", self.power),
            ("storage", self.storage),
        ]
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Bonuses {
    /// Both models present and equal
    pub model_match: f32,
    /// Both brands present and equal
    pub brand_match: f32,
    /// Any numeric spec equal within tolerance
    pub spec_match: f32,
}

impl Default for Bonuses {
    fn default() -> Self {
        Self {
            model_match: 1.5,
            brand_match: 1.3,
            spec_match: 1.2,
        }
    }
}

impl MatchConfig {
    /// Validate the config
    /// - Checks that weights are non-negative and bonuses never penalize
    /// - Checks thresholds and tolerances are in range
    /// - Normalizes factor weights to sum to 1.0 if they don't
    pub fn validate_and_normalize(&mut self) -> Result<(), ConfigError> {
        for (name, weight) in self.factors.named() {
            if weight < 0.0 || !weight.is_finite() {
                return Err(ConfigError::NegativeWeight(name.to_string()));
            }
        }
        for (name, weight) in self.specs.named() {
            if weight < 0.0 || !weight.is_finite() {
                return Err(ConfigError::NegativeWeight(format!("specs.{name}")));
            }
        }

        for (name, bonus) in [
            ("model_match", self.bonuses.model_match),
            ("brand_match", self.bonuses.brand_match),
            ("spec_match", self.bonuses.spec_match),
        ] {
            if bonus < 1.0 || !bonus.is_finite() {
                return Err(ConfigError::InvalidBonus(name.to_string(), bonus));
            }
        }

        for (name, threshold) in [
            ("threshold", self.threshold),
            ("insulation_threshold", self.insulation_threshold),
        ] {
            if !(0.0..=1.0).contains(&threshold) {
                return Err(ConfigError::ThresholdOutOfRange(name.to_string(), threshold));
            }
        }

        if !(0.0..1.0).contains(&self.spec_tolerance) {
            return Err(ConfigError::InvalidTolerance("spec_tolerance".to_string()));
        }
        let dims = &self.dimensions;
        if dims.thickness_mm < 0.0
            || [dims.insulation_axis, dims.axis, dims.large_axis]
                .iter()
                .any(|t| *t <= 0.0 || *t >= 1.0)
        {
            return Err(ConfigError::InvalidTolerance("dimensions".to_string()));
        }

        let weight_sum = self.factors.sum();
        if weight_sum <= 0.0 {
            return Err(ConfigError::ZeroTotalWeight);
        }

        if (weight_sum - 1.0).abs() > 0.001 {
            tracing::debug!(weight_sum, "normalizing factor weights");
            self.factors.model /= weight_sum;
            self.factors.brand /= weight_sum;
            self.factors.specs /= weight_sum;
            self.factors.words /= weight_sum;
        }

        Ok(())
    }

    /// Load, validate and normalize a JSON config file
    pub fn from_json_file(path: impl AsRef<Path>) -> prodmatch_core::Result<Self> {
        let file = std::fs::File::open(path)?;
        let mut config: MatchConfig = serde_json::from_reader(std::io::BufReader::new(file))?;
        config
            .validate_and_normalize()
            .map_err(|e| CoreError::InvalidConfig(e.to_string()))?;
        Ok(config)
    }
}

/// Errors that can occur during config validation
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigError {
    #[error("Weight '{0}' must be a non-negative number")]
    NegativeWeight(String),

    #[error("Total factor weight cannot be zero")]
    ZeroTotalWeight,

    #[error("Bonus '{0}' must be at least 1.0, got {1}")]
    InvalidBonus(String, f32),

    #[error("Threshold '{0}' must be within [0, 1], got {1}")]
    ThresholdOutOfRange(String, f32),

    #[error("Tolerance '{0}' is out of range")]
    InvalidTolerance(String),
}
