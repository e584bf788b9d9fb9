//! # Mnemosyne - Hyperdimensional Classifier Core
//!
//! Mnemosyne implements the vector-memory engine of a Hyperdimensional
//! Computing (HDC) classifier: fixed-width hypervector memories and the
//! encode / bind / bundle / compare operations that turn sensor-like
//! samples into class prototypes and back into decisions.
//!
//! ## Overview
//!
//! Three banks of hypervectors cooperate:
//!
//! - **Item Memory (IM)**: one unrelated random vector per class label
//! - **Continuous Item Memory (CiM)**: one vector per quantization level,
//!   interpolated so neighbouring levels stay close
//! - **Associative Memory (AM)**: one trained prototype per class
//!
//! Training binds each label vector with the level vectors of that class's
//! feature values, bundles the results and thresholds them into a prototype.
//! Classification returns the prototype nearest in Hamming distance.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use mnemosyne::{load_samples, Config, HdcModel};
//!
//! let mut config = Config::default();
//! config.memory.seed = Some(42);
//!
//! let mut model = HdcModel::new(config)?;
//! let samples = load_samples("training_emg.csv", "training_labels.csv", 32)?;
//! model.train(&samples)?;
//!
//! let decision = model.predict(&samples[0].features)?;
//! println!("class {} at distance {}", decision.class_id, decision.distance);
//! model.save("emg.hdc")?;
//! ```
//!
//! ## Architecture
//!
//! - [`vector`] - Binary and bipolar hypervectors, binding, thresholding
//! - [`memory`] - Bounds-checked memory banks
//! - [`generator`] - Random, orthogonal and interpolated vector generation
//! - [`encoder`] - Quantization of labels and measurements to bank entries
//! - [`engine`] - Bind-bundle engine and training passes
//! - [`classifier`] - Hamming distance and nearest-prototype decisions
//! - [`data`] - Feature / label table readers
//! - [`storage`] - Model snapshots

#![warn(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::needless_return)]

pub mod classifier;
pub mod config;
pub mod data;
pub mod encoder;
pub mod engine;
pub mod error;
pub mod generator;
pub mod memory;
pub mod model;
pub mod storage;
pub mod vector;

// Re-export commonly used types
pub use classifier::{classify, classify_keyed, hamming_distance, rank, Classification, Evaluation};
pub use config::{Config, EncoderConfig, MemoryConfig, TrainingConfig};
pub use data::{load_samples, TrainingSample};
pub use encoder::{Encoder, Quantizer, Symbol};
pub use engine::{bind, bundle, bundle_and_store, Trainer, TrainingReport};
pub use error::{MnemosyneError, Result};
pub use generator::{Interpolation, VectorGenerator};
pub use memory::MemoryBank;
pub use model::HdcModel;
pub use storage::{ModelFormat, ModelHeader};
pub use vector::{Accumulator, Hypervector, VectorKind};

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Default hypervector dimension.
pub const DEFAULT_DIMENSION: usize = 10_000;

/// Default number of classes.
pub const DEFAULT_NUM_CLASSES: usize = 5;

/// Default number of quantization levels.
pub const DEFAULT_NUM_LEVELS: usize = 61;

/// Default number of features per sample.
pub const DEFAULT_NUM_FEATURES: usize = 32;
