//! Training passes over labelled samples.

use crate::data::TrainingSample;
use crate::encoder::{Encoder, Symbol};
use crate::engine::bundle;
use crate::error::Result;
use crate::memory::MemoryBank;
use crate::vector::Hypervector;
use log::{debug, info, warn};
use std::collections::BTreeMap;

/// Summary of one training pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TrainingReport {
    /// Samples that contributed to a prototype.
    pub samples_used: usize,
    /// Samples rejected (bad label, wrong width, non-finite value).
    pub samples_skipped: usize,
    /// Samples per trained class, in class order.
    pub class_counts: BTreeMap<usize, usize>,
}

impl TrainingReport {
    /// Class ids that received a prototype.
    pub fn trained_classes(&self) -> Vec<usize> {
        self.class_counts.keys().copied().collect()
    }
}

/// Runs training passes: groups samples by class and bundles one
/// prototype per class into the associative memory.
#[derive(Debug, Clone)]
pub struct Trainer {
    encoder: Encoder,
    num_features: usize,
}

impl Trainer {
    /// Creates a trainer expecting `num_features` values per sample.
    pub fn new(encoder: Encoder, num_features: usize) -> Self {
        Self {
            encoder,
            num_features,
        }
    }

    /// Returns the encoder.
    pub fn encoder(&self) -> &Encoder {
        &self.encoder
    }

    /// Returns the expected number of features per sample.
    pub fn num_features(&self) -> usize {
        self.num_features
    }

    /// Recomputes every class prototype from `samples`.
    ///
    /// The associative memory is cleared and rewritten once every prototype
    /// has been built; on error it is left as it was. Classes without samples
    /// keep the blank vector. Invalid samples are skipped with a warning. Item
    /// and continuous item memories are only read.
    pub fn train_pass(
        &self,
        samples: &[TrainingSample],
        im: &MemoryBank,
        cim: &MemoryBank,
        am: &mut MemoryBank,
    ) -> Result<TrainingReport> {
        let mut report = TrainingReport::default();
        let mut by_class: BTreeMap<usize, Vec<&TrainingSample>> = BTreeMap::new();

        for (row, sample) in samples.iter().enumerate() {
            if sample.features.len() != self.num_features {
                warn!(
                    "Skipping sample {}: expected {} features, got {}",
                    row,
                    self.num_features,
                    sample.features.len()
                );
                report.samples_skipped += 1;
                continue;
            }
            if sample.features.iter().any(|v| !v.is_finite()) {
                warn!("Skipping sample {}: non-finite feature value", row);
                report.samples_skipped += 1;
                continue;
            }
            let class_id = match im.resolve_id(sample.label) {
                Ok(id) if id < am.capacity() => id,
                _ => {
                    warn!(
                        "Skipping sample {}: label {} outside [0, {})",
                        row,
                        sample.label,
                        im.capacity().min(am.capacity())
                    );
                    report.samples_skipped += 1;
                    continue;
                }
            };
            by_class.entry(class_id).or_default().push(sample);
        }

        // AM stays untouched until every prototype is built.
        let mut prototypes: Vec<(usize, Hypervector)> = Vec::with_capacity(by_class.len());
        for (class_id, members) in &by_class {
            let key = im.entry(*class_id)?;
            key.ensure_compatible(am.entry(*class_id)?)?;
            let mut levels: Vec<&Hypervector> = Vec::with_capacity(members.len() * self.num_features);
            for sample in members {
                for &value in &sample.features {
                    levels.push(self.encoder.lookup(Symbol::Level(value), cim)?);
                }
            }

            let prototype = bundle(levels.iter().map(|&level| (key, level)))?;
            debug!(
                "Class {}: {} samples, {} bound pairs",
                class_id,
                members.len(),
                levels.len()
            );
            prototypes.push((*class_id, prototype));
        }

        am.clear();
        for (class_id, prototype) in &prototypes {
            am.write(*class_id, prototype)?;
        }
        for (class_id, members) in &by_class {
            report.samples_used += members.len();
            report.class_counts.insert(*class_id, members.len());
        }

        info!(
            "Training pass complete: {} classes from {} samples ({} skipped)",
            report.class_counts.len(),
            report.samples_used,
            report.samples_skipped
        );
        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::encoder::Quantizer;
    use crate::error::MnemosyneError;
    use crate::vector::VectorKind;

    fn bipolar(components: &[i8]) -> Hypervector {
        Hypervector::from_components(VectorKind::Bipolar, components.to_vec()).unwrap()
    }

    /// IM with two classes, CiM with two levels over [0, 2).
    fn banks() -> (MemoryBank, MemoryBank, MemoryBank) {
        let mut im = MemoryBank::new("IM", 2, 4, VectorKind::Bipolar).unwrap();
        im.write(0, &bipolar(&[1, 1, -1, -1])).unwrap();
        im.write(1, &bipolar(&[-1, -1, 1, 1])).unwrap();

        let mut cim = MemoryBank::new("CiM", 2, 4, VectorKind::Bipolar).unwrap();
        cim.write(0, &bipolar(&[1, -1, 1, -1])).unwrap();
        cim.write(1, &bipolar(&[1, 1, 1, 1])).unwrap();

        let am = MemoryBank::new("AM", 2, 4, VectorKind::Bipolar).unwrap();
        (im, cim, am)
    }

    fn trainer(num_features: usize) -> Trainer {
        Trainer::new(Encoder::new(Quantizer::new(0.0, 2.0, 2).unwrap()), num_features)
    }

    #[test]
    fn test_single_sample_prototype() {
        let (im, cim, mut am) = banks();
        let samples = vec![TrainingSample::new(vec![0.5], 0)];

        let report = trainer(1).train_pass(&samples, &im, &cim, &mut am).unwrap();
        assert_eq!(report.samples_used, 1);
        assert_eq!(report.trained_classes(), vec![0]);
        assert_eq!(am.read(0).unwrap(), bipolar(&[1, -1, -1, 1]));
        // Untrained class stays blank
        assert_eq!(am.read(1).unwrap(), bipolar(&[-1, -1, -1, -1]));
    }

    #[test]
    fn test_groups_samples_by_class() {
        let (im, cim, mut am) = banks();
        let samples = vec![
            TrainingSample::new(vec![1.5, 1.5], 1),
            TrainingSample::new(vec![0.5, 1.5], 1),
            TrainingSample::new(vec![0.5, 0.5], 0),
        ];

        let report = trainer(2).train_pass(&samples, &im, &cim, &mut am).unwrap();
        assert_eq!(report.samples_used, 3);
        assert_eq!(report.class_counts.get(&1), Some(&2));

        // Class 1: levels sum [4, 2, 4, 2] bound with [-1, -1, 1, 1]
        assert_eq!(am.read(1).unwrap(), bipolar(&[-1, -1, 1, 1]));
        // Class 0: level 0 twice bound with [1, 1, -1, -1]
        assert_eq!(am.read(0).unwrap(), bipolar(&[1, -1, -1, 1]));
    }

    #[test]
    fn test_skips_invalid_samples() {
        let (im, cim, mut am) = banks();
        let before_im = im.clone();
        let before_cim = cim.clone();
        let samples = vec![
            TrainingSample::new(vec![0.5], 7),
            TrainingSample::new(vec![0.5], -1),
            TrainingSample::new(vec![0.5, 0.5], 0),
            TrainingSample::new(vec![f64::NAN], 0),
            TrainingSample::new(vec![1.5], 1),
        ];

        let report = trainer(1).train_pass(&samples, &im, &cim, &mut am).unwrap();
        assert_eq!(report.samples_skipped, 4);
        assert_eq!(report.samples_used, 1);
        assert_eq!(report.trained_classes(), vec![1]);
        assert_eq!(im, before_im);
        assert_eq!(cim, before_cim);
    }

    #[test]
    fn test_retraining_starts_fresh() {
        let (im, cim, mut am) = banks();
        let t = trainer(1);
        t.train_pass(&[TrainingSample::new(vec![0.5], 0)], &im, &cim, &mut am)
            .unwrap();
        t.train_pass(&[TrainingSample::new(vec![0.5], 1)], &im, &cim, &mut am)
            .unwrap();
        assert_eq!(am.read(0).unwrap(), bipolar(&[-1, -1, -1, -1]));
    }

    #[test]
    fn test_failed_pass_leaves_am_untouched() {
        let (im, _, mut am) = banks();
        // Three levels where the quantizer expects two.
        let cim = MemoryBank::new("CiM", 3, 4, VectorKind::Bipolar).unwrap();
        am.write(0, &bipolar(&[1, 1, 1, 1])).unwrap();
        let before = am.clone();

        let result = trainer(1).train_pass(&[TrainingSample::new(vec![0.5], 1)], &im, &cim, &mut am);
        assert!(matches!(result, Err(MnemosyneError::Config(_))));
        assert_eq!(am, before);
    }

    #[test]
    fn test_mismatched_am_leaves_am_untouched() {
        let (im, cim, _) = banks();
        let mut am = MemoryBank::new("AM", 2, 8, VectorKind::Bipolar).unwrap();
        am.write(1, &Hypervector::filled(VectorKind::Bipolar, 8).complement()).unwrap();
        let before = am.clone();

        let result = trainer(1).train_pass(&[TrainingSample::new(vec![0.5], 0)], &im, &cim, &mut am);
        assert!(matches!(result, Err(MnemosyneError::DimensionMismatch { .. })));
        assert_eq!(am, before);
    }
}
