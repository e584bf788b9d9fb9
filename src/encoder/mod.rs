//! Mapping of labels and scalar measurements onto stored hypervectors.
//!
//! Labels index the item memory directly. Measurements are quantized into
//! one of `num_levels` bins across `[min_level, max_level]` and index the
//! continuous item memory. Values outside the range clamp to the nearest
//! bin rather than reading past either end of the bank.

use crate::config::EncoderConfig;
use crate::error::{MnemosyneError, Result};
use crate::memory::MemoryBank;
use crate::vector::{Accumulator, Hypervector};

/// A value to encode, tagged with the bank lookup it needs.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Symbol {
    /// A discrete label; used directly as the item memory index.
    Label(i64),
    /// A scalar measurement; quantized into a continuous memory level.
    Level(f64),
}

/// Uniform quantizer over a bounded scalar range.
#[derive(Debug, Clone, PartialEq)]
pub struct Quantizer {
    min_level: f64,
    max_level: f64,
    num_levels: usize,
}

impl Quantizer {
    /// Creates a quantizer with `num_levels` equal-width bins.
    pub fn new(min_level: f64, max_level: f64, num_levels: usize) -> Result<Self> {
        if num_levels == 0 {
            return Err(MnemosyneError::Config(
                "quantizer needs at least one level".to_string(),
            ));
        }
        if !(min_level.is_finite() && max_level.is_finite()) || min_level >= max_level {
            return Err(MnemosyneError::Config(format!(
                "invalid quantization range [{}, {}]",
                min_level, max_level
            )));
        }

        Ok(Self {
            min_level,
            max_level,
            num_levels,
        })
    }

    /// Creates a quantizer from the encoder configuration.
    pub fn from_config(config: &EncoderConfig) -> Result<Self> {
        Self::new(config.min_level, config.max_level, config.num_levels)
    }

    /// Returns the number of levels.
    #[inline]
    pub fn num_levels(&self) -> usize {
        self.num_levels
    }

    /// Returns the `(min, max)` range.
    #[inline]
    pub fn range(&self) -> (f64, f64) {
        (self.min_level, self.max_level)
    }

    /// Maps `value` to `floor((value - min) / (max - min) * levels)`,
    /// clamped to `[0, levels - 1]`.
    pub fn quantize_index(&self, value: f64) -> Result<usize> {
        if !value.is_finite() {
            return Err(MnemosyneError::NonFiniteValue(value));
        }

        let scaled = (value - self.min_level) / (self.max_level - self.min_level)
            * self.num_levels as f64;
        let index = scaled.floor();
        if index <= 0.0 {
            Ok(0)
        } else {
            Ok((index as usize).min(self.num_levels - 1))
        }
    }
}

/// Looks up the hypervectors of labels and measurements.
#[derive(Debug, Clone)]
pub struct Encoder {
    quantizer: Quantizer,
}

impl Encoder {
    /// Creates an encoder around a quantizer.
    pub fn new(quantizer: Quantizer) -> Self {
        Self { quantizer }
    }

    /// Creates an encoder from the encoder configuration.
    pub fn from_config(config: &EncoderConfig) -> Result<Self> {
        Ok(Self::new(Quantizer::from_config(config)?))
    }

    /// Returns the quantizer.
    pub fn quantizer(&self) -> &Quantizer {
        &self.quantizer
    }

    /// Encodes a symbol using `bank` (item memory for labels, continuous
    /// item memory for levels).
    pub fn encode(&self, symbol: Symbol, bank: &MemoryBank) -> Result<Hypervector> {
        self.lookup(symbol, bank).cloned()
    }

    /// Borrows the stored vector a symbol maps to.
    pub fn lookup<'b>(&self, symbol: Symbol, bank: &'b MemoryBank) -> Result<&'b Hypervector> {
        match symbol {
            Symbol::Label(label) => bank.entry(bank.resolve_id(label)?),
            Symbol::Level(value) => {
                if bank.capacity() != self.quantizer.num_levels() {
                    return Err(MnemosyneError::Config(format!(
                        "continuous memory {} has {} entries but the quantizer has {} levels",
                        bank.name(),
                        bank.capacity(),
                        self.quantizer.num_levels()
                    )));
                }
                bank.entry(self.quantizer.quantize_index(value)?)
            }
        }
    }

    /// Encodes a label through the item memory.
    pub fn encode_label(&self, label: i64, im: &MemoryBank) -> Result<Hypervector> {
        self.encode(Symbol::Label(label), im)
    }

    /// Encodes a measurement through the continuous item memory.
    pub fn encode_level(&self, value: f64, cim: &MemoryBank) -> Result<Hypervector> {
        self.encode(Symbol::Level(value), cim)
    }

    /// Bundles the level vectors of every feature of one sample row.
    pub fn encode_sample(&self, features: &[f64], cim: &MemoryBank) -> Result<Hypervector> {
        if features.is_empty() {
            return Err(MnemosyneError::EmptyInput(
                "sample has no features".to_string(),
            ));
        }

        let mut acc = Accumulator::new(cim.dimension());
        for &value in features {
            acc.add(self.lookup(Symbol::Level(value), cim)?);
        }
        Ok(acc.threshold(cim.kind()))
    }
}
