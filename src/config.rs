//! Configuration for the Mnemosyne hypervector memory engine.

use crate::error::{MnemosyneError, Result};
use crate::generator::Interpolation;
use crate::vector::VectorKind;
use crate::{DEFAULT_DIMENSION, DEFAULT_NUM_CLASSES, DEFAULT_NUM_FEATURES, DEFAULT_NUM_LEVELS};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Main configuration for the engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    /// Memory bank configuration.
    pub memory: MemoryConfig,

    /// Quantization configuration.
    pub encoder: EncoderConfig,

    /// Training input configuration.
    pub training: TrainingConfig,
}

impl Config {
    /// Loads a configuration from a JSON file.
    ///
    /// Missing fields fall back to their defaults.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Serializes the configuration as pretty-printed JSON.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Checks every setting that would make a bank or the quantizer unusable.
    pub fn validate(&self) -> Result<()> {
        self.memory.validate()?;
        self.encoder.validate()?;
        self.training.validate()
    }
}

/// Memory bank configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MemoryConfig {
    /// Components per hypervector, shared by every bank.
    /// Default: 10,000.
    pub dimension: usize,

    /// Component kind of every bank.
    /// Default: bipolar.
    pub kind: VectorKind,

    /// Number of classes; sizes both the item and the associative memory.
    /// Default: 5.
    pub num_classes: usize,

    /// Random seed for reproducible bank seeding.
    /// Default: None (random).
    pub seed: Option<u64>,

    /// How continuous levels are interpolated between the two extremes.
    /// Default: with replacement.
    pub interpolation: Interpolation,
}

impl Default for MemoryConfig {
    fn default() -> Self {
        Self {
            dimension: DEFAULT_DIMENSION,
            kind: VectorKind::Bipolar,
            num_classes: DEFAULT_NUM_CLASSES,
            seed: None,
            interpolation: Interpolation::WithReplacement,
        }
    }
}

impl MemoryConfig {
    fn validate(&self) -> Result<()> {
        if self.dimension == 0 {
            return Err(MnemosyneError::Config(
                "dimension must be positive".to_string(),
            ));
        }
        if self.num_classes == 0 {
            return Err(MnemosyneError::Config(
                "num_classes must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

/// Quantization of scalar measurements onto continuous item memory levels.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EncoderConfig {
    /// Number of quantization levels; sizes the continuous item memory.
    /// Default: 61.
    pub num_levels: usize,

    /// Lower bound of the measurement range.
    /// Default: -2.0.
    pub min_level: f64,

    /// Upper bound of the measurement range.
    /// Default: 4.0.
    pub max_level: f64,
}

impl Default for EncoderConfig {
    fn default() -> Self {
        Self {
            num_levels: DEFAULT_NUM_LEVELS,
            min_level: -2.0,
            max_level: 4.0,
        }
    }
}

impl EncoderConfig {
    fn validate(&self) -> Result<()> {
        // Continuous seeding interpolates over num_levels - 1 steps.
        if self.num_levels < 2 {
            return Err(MnemosyneError::Config(
                "num_levels must be at least 2".to_string(),
            ));
        }
        if !self.min_level.is_finite() || !self.max_level.is_finite() {
            return Err(MnemosyneError::Config(
                "level range must be finite".to_string(),
            ));
        }
        if self.min_level >= self.max_level {
            return Err(MnemosyneError::Config(format!(
                "min_level ({}) must be below max_level ({})",
                self.min_level, self.max_level
            )));
        }
        Ok(())
    }
}

/// Training input configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrainingConfig {
    /// Feature values expected per sample row.
    /// Default: 32.
    pub num_features: usize,
}

impl Default for TrainingConfig {
    fn default() -> Self {
        Self {
            num_features: DEFAULT_NUM_FEATURES,
        }
    }
}

impl TrainingConfig {
    fn validate(&self) -> Result<()> {
        if self.num_features == 0 {
            return Err(MnemosyneError::Config(
                "num_features must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.memory.dimension, 10_000);
        assert_eq!(config.memory.num_classes, 5);
        assert_eq!(config.encoder.num_levels, 61);
        assert_eq!(config.training.num_features, 32);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_bad_settings() {
        let mut config = Config::default();
        config.encoder.num_levels = 1;
        assert!(matches!(config.validate(), Err(MnemosyneError::Config(_))));

        let mut config = Config::default();
        config.encoder.min_level = 4.0;
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.memory.dimension = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_partial_json() {
        let json = r#"{ "memory": { "dimension": 64, "kind": "binary", "seed": 9 } }"#;
        let config: Config = serde_json::from_str(json).unwrap();
        assert_eq!(config.memory.dimension, 64);
        assert_eq!(config.memory.kind, VectorKind::Binary);
        assert_eq!(config.memory.seed, Some(9));
        assert_eq!(config.memory.num_classes, 5);
        assert_eq!(config.encoder, EncoderConfig::default());
    }

    #[test]
    fn test_json_roundtrip_through_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");

        let mut config = Config::default();
        config.memory.interpolation = Interpolation::Exact;
        std::fs::write(&path, config.to_json().unwrap()).unwrap();

        assert_eq!(Config::from_file(&path).unwrap(), config);
    }
}
