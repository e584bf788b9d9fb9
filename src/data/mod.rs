//! Training data: labelled samples and the tabular readers that produce them.

mod table;

pub use table::{
    load_features, load_labels, load_samples, pair_samples, read_features, read_labels,
    FeatureRow, LabelRow,
};

use serde::{Deserialize, Serialize};

/// One row of feature values paired with its class label.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrainingSample {
    /// One scalar per feature channel.
    pub features: Vec<f64>,
    /// The class label (item memory index).
    pub label: i64,
}

impl TrainingSample {
    /// Creates a sample.
    pub fn new(features: Vec<f64>, label: i64) -> Self {
        Self { features, label }
    }
}
