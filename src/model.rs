//! The assembled classifier: three memory banks plus the operations that
//! drive them.

use crate::classifier::{self, Classification, Evaluation};
use crate::config::Config;
use crate::data::{FeatureRow, TrainingSample};
use crate::encoder::Encoder;
use crate::engine::{Trainer, TrainingReport};
use crate::error::{MnemosyneError, Result};
use crate::generator::VectorGenerator;
use crate::memory::{MemoryBank, ASSOCIATIVE_MEMORY, CONTINUOUS_MEMORY, ITEM_MEMORY};
use crate::storage::ModelFormat;
use crate::vector::Hypervector;
use log::{info, warn};
use std::path::Path;

/// A hyperdimensional classifier.
///
/// - **IM** holds one random vector per class label
/// - **CiM** holds one vector per quantization level, neighbours being close
/// - **AM** holds one trained prototype per class
///
/// Operations run synchronously to completion; callers serialize access.
#[derive(Debug, Clone)]
pub struct HdcModel {
    config: Config,
    trainer: Trainer,
    im: MemoryBank,
    cim: MemoryBank,
    am: MemoryBank,
}

impl HdcModel {
    /// Validates `config`, allocates the three banks and seeds IM and CiM.
    pub fn new(config: Config) -> Result<Self> {
        config.validate()?;
        let memory = &config.memory;

        let mut im = MemoryBank::new(ITEM_MEMORY, memory.num_classes, memory.dimension, memory.kind)?;
        let mut cim = MemoryBank::new(
            CONTINUOUS_MEMORY,
            config.encoder.num_levels,
            memory.dimension,
            memory.kind,
        )?;
        let am = MemoryBank::new(ASSOCIATIVE_MEMORY, memory.num_classes, memory.dimension, memory.kind)?;

        let mut generator = VectorGenerator::from_config(memory);
        generator.seed_discrete_bank(&mut im)?;
        generator.seed_continuous_bank(&mut cim)?;

        info!(
            "Initialized {} memories: D={}, {} classes, {} levels",
            memory.kind, memory.dimension, memory.num_classes, config.encoder.num_levels
        );

        Self::assemble(config, im, cim, am)
    }

    /// Rebuilds a model from stored banks, checking they fit `config`.
    pub fn from_parts(config: Config, im: MemoryBank, cim: MemoryBank, am: MemoryBank) -> Result<Self> {
        config.validate()?;
        let memory = &config.memory;

        for (bank, entries) in [
            (&im, memory.num_classes),
            (&cim, config.encoder.num_levels),
            (&am, memory.num_classes),
        ] {
            bank.validate()?;
            if bank.kind() != memory.kind {
                return Err(MnemosyneError::KindMismatch {
                    expected: memory.kind,
                    found: bank.kind(),
                });
            }
            if bank.dimension() != memory.dimension {
                return Err(MnemosyneError::DimensionMismatch {
                    expected: memory.dimension,
                    found: bank.dimension(),
                });
            }
            if bank.capacity() != entries {
                return Err(MnemosyneError::Config(format!(
                    "memory bank {} has {} entries, expected {}",
                    bank.name(),
                    bank.capacity(),
                    entries
                )));
            }
        }

        Self::assemble(config, im, cim, am)
    }

    fn assemble(config: Config, im: MemoryBank, cim: MemoryBank, am: MemoryBank) -> Result<Self> {
        let encoder = Encoder::from_config(&config.encoder)?;
        let trainer = Trainer::new(encoder, config.training.num_features);
        Ok(Self {
            config,
            trainer,
            im,
            cim,
            am,
        })
    }

    /// Loads a model snapshot.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        ModelFormat::read(path)
    }

    /// Saves a model snapshot.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        ModelFormat::write(path, self)
    }

    /// Returns the configuration.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Returns the item memory.
    pub fn item_memory(&self) -> &MemoryBank {
        &self.im
    }

    /// Returns the continuous item memory.
    pub fn continuous_memory(&self) -> &MemoryBank {
        &self.cim
    }

    /// Returns the associative memory.
    pub fn associative_memory(&self) -> &MemoryBank {
        &self.am
    }

    /// Returns the encoder.
    pub fn encoder(&self) -> &Encoder {
        self.trainer.encoder()
    }

    /// Recomputes every class prototype from `samples`.
    pub fn train(&mut self, samples: &[TrainingSample]) -> Result<TrainingReport> {
        self.trainer
            .train_pass(samples, &self.im, &self.cim, &mut self.am)
    }

    /// Bundles the level vectors of one feature row into a query vector.
    pub fn encode_query(&self, features: &[f64]) -> Result<Hypervector> {
        let expected = self.trainer.num_features();
        if features.len() != expected {
            return Err(MnemosyneError::LengthMismatch {
                left: features.len(),
                right: expected,
            });
        }
        self.encoder().encode_sample(features, &self.cim)
    }

    /// Classifies one feature row against the trained prototypes.
    pub fn predict(&self, features: &[f64]) -> Result<Classification> {
        let query = self.encode_query(features)?;
        classifier::classify_keyed(&query, &self.im, &self.am)
    }

    /// Predicts every row, skipping rows that cannot be classified.
    ///
    /// Each result carries the row's position in its table.
    pub fn predict_rows(&self, rows: &[FeatureRow]) -> Vec<(usize, Classification)> {
        rows.iter()
            .filter_map(|row| match self.predict(&row.values) {
                Ok(decision) => Some((row.row, decision)),
                Err(e) => {
                    warn!("Skipping feature row {}: {}", row.row, e);
                    None
                }
            })
            .collect()
    }

    /// Classifies a vector that already lives in prototype space.
    pub fn classify(&self, query: &Hypervector) -> Result<Classification> {
        classifier::classify(query, &self.am)
    }

    /// Predicts every sample and tallies accuracy.
    ///
    /// Samples with an unknown label or an unusable feature row are skipped
    /// with a warning.
    pub fn evaluate(&self, samples: &[TrainingSample]) -> Result<Evaluation> {
        let mut evaluation = Evaluation::new(self.am.capacity());

        for (row, sample) in samples.iter().enumerate() {
            let actual = match self.am.resolve_id(sample.label) {
                Ok(id) => id,
                Err(e) => {
                    warn!("Skipping evaluation sample {}: {}", row, e);
                    continue;
                }
            };
            match self.predict(&sample.features) {
                Ok(prediction) => evaluation.record(actual, prediction.class_id),
                Err(e) => warn!("Skipping evaluation sample {}: {}", row, e),
            }
        }

        info!(
            "Evaluated {} samples: accuracy {:.2}%",
            evaluation.total,
            evaluation.accuracy() * 100.0
        );
        Ok(evaluation)
    }
}
