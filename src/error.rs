//! Error types for the Mnemosyne hypervector memory engine.

use crate::vector::VectorKind;
use thiserror::Error;

/// The main error type for Mnemosyne operations.
#[derive(Error, Debug)]
pub enum MnemosyneError {
    /// Invalid configuration (dimension, bank size, quantization range).
    #[error("Configuration error: {0}")]
    Config(String),

    /// Index out of bounds for a memory bank or a quantization table.
    #[error("Index out of bounds: {index} not in [0, {max})")]
    IndexOutOfBounds {
        /// The index that was requested.
        index: i64,
        /// The number of valid entries.
        max: usize,
    },

    /// A vector of the wrong kind was handed to a bank or an operation.
    #[error("Vector kind mismatch: expected {expected}, found {found}")]
    KindMismatch {
        /// The kind the receiver holds.
        expected: VectorKind,
        /// The kind that was supplied.
        found: VectorKind,
    },

    /// A vector of the wrong dimension was handed to a bank or an operation.
    #[error("Dimension mismatch: expected {expected}, found {found}")]
    DimensionMismatch {
        /// The dimension the receiver holds.
        expected: usize,
        /// The dimension that was supplied.
        found: usize,
    },

    /// A component value outside the value set of its vector kind.
    #[error("Invalid component {value} for {kind} vector")]
    InvalidComponent {
        /// The offending value.
        value: i8,
        /// The kind being constructed.
        kind: VectorKind,
    },

    /// NaN or infinite measurement handed to the quantizer.
    #[error("Non-finite value cannot be quantized: {0}")]
    NonFiniteValue(f64),

    /// Paired inputs of different lengths.
    #[error("Length mismatch: {left} vs {right}")]
    LengthMismatch {
        /// Length of the first input.
        left: usize,
        /// Length of the second input.
        right: usize,
    },

    /// Empty input.
    #[error("Empty input: {0}")]
    EmptyInput(String),

    /// Unparsable token in training data.
    #[error("Parse error at row {row}: {message}")]
    Parse {
        /// Zero-based data row.
        row: usize,
        /// What went wrong.
        message: String,
    },

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization error.
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Invalid model snapshot.
    #[error("Invalid model format: {0}")]
    InvalidModelFormat(String),
}

/// Result type alias for Mnemosyne operations.
pub type Result<T> = std::result::Result<T, MnemosyneError>;

impl From<bincode::Error> for MnemosyneError {
    fn from(err: bincode::Error) -> Self {
        MnemosyneError::Serialization(err.to_string())
    }
}

impl From<serde_json::Error> for MnemosyneError {
    fn from(err: serde_json::Error) -> Self {
        MnemosyneError::Serialization(err.to_string())
    }
}
