//! Nearest-prototype classification by Hamming distance.
//!
//! Ties are broken toward the lowest class id, so results are
//! deterministic for any query.

use crate::error::{MnemosyneError, Result};
use crate::memory::MemoryBank;
use crate::vector::Hypervector;
use serde::{Deserialize, Serialize};

/// The outcome of classifying one query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Classification {
    /// Index of the nearest prototype.
    pub class_id: usize,
    /// Hamming distance to that prototype.
    pub distance: usize,
}

/// **Hamming Distance** between two hypervectors of the same kind and dimension.
pub fn hamming_distance(v1: &Hypervector, v2: &Hypervector) -> Result<usize> {
    v1.ensure_compatible(v2)?;
    Ok(v1.hamming_distance(v2))
}

/// Returns the class whose stored prototype is nearest to `query`.
pub fn classify(query: &Hypervector, am: &MemoryBank) -> Result<Classification> {
    nearest(am.iter().enumerate().map(|(class_id, prototype)| {
        hamming_distance(query, prototype).map(|distance| Classification { class_id, distance })
    }))
}

/// Like [`classify`], but for prototypes bound to their item memory key.
///
/// Compares `query ⊗ IM[c]` with `AM[c]`. Binding is self-inverse and
/// preserves Hamming distance, so this equals the distance between `query`
/// and the unbound prototype `AM[c] ⊗ IM[c]`.
pub fn classify_keyed(query: &Hypervector, im: &MemoryBank, am: &MemoryBank) -> Result<Classification> {
    if im.capacity() < am.capacity() {
        return Err(MnemosyneError::Config(format!(
            "item memory has {} entries, associative memory {}",
            im.capacity(),
            am.capacity()
        )));
    }

    nearest(am.iter().enumerate().map(|(class_id, prototype)| {
        let key = im.entry(class_id)?;
        query.ensure_compatible(key)?;
        hamming_distance(&query.bind(key), prototype)
            .map(|distance| Classification { class_id, distance })
    }))
}

/// Every class with its distance, nearest first (ties by class id).
pub fn rank(query: &Hypervector, am: &MemoryBank) -> Result<Vec<Classification>> {
    let mut ranked = am
        .iter()
        .enumerate()
        .map(|(class_id, prototype)| {
            hamming_distance(query, prototype).map(|distance| Classification { class_id, distance })
        })
        .collect::<Result<Vec<_>>>()?;
    ranked.sort_by_key(|c| (c.distance, c.class_id));
    Ok(ranked)
}

fn nearest<I>(candidates: I) -> Result<Classification>
where
    I: Iterator<Item = Result<Classification>>,
{
    let mut best: Option<Classification> = None;
    for candidate in candidates {
        let candidate = candidate?;
        // Strict comparison keeps the first (lowest) class id on ties.
        if best.map_or(true, |b| candidate.distance < b.distance) {
            best = Some(candidate);
        }
    }
    best.ok_or_else(|| MnemosyneError::EmptyInput("associative memory is empty".to_string()))
}

/// Accuracy bookkeeping over labelled queries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Evaluation {
    /// Number of evaluated queries.
    pub total: usize,
    /// Number of correctly classified queries.
    pub correct: usize,
    /// `confusion[actual][predicted]` counts.
    pub confusion: Vec<Vec<usize>>,
}

impl Evaluation {
    /// Creates an empty evaluation over `num_classes` classes.
    pub fn new(num_classes: usize) -> Self {
        Self {
            total: 0,
            correct: 0,
            confusion: vec![vec![0; num_classes]; num_classes],
        }
    }

    /// Records one prediction.
    pub fn record(&mut self, actual: usize, predicted: usize) {
        self.total += 1;
        if actual == predicted {
            self.correct += 1;
        }
        if let Some(count) = self
            .confusion
            .get_mut(actual)
            .and_then(|row| row.get_mut(predicted))
        {
            *count += 1;
        }
    }

    /// Fraction of correct predictions (0 when nothing was evaluated).
    pub fn accuracy(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            self.correct as f64 / self.total as f64
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vector::VectorKind;

    fn bipolar(components: &[i8]) -> Hypervector {
        Hypervector::from_components(VectorKind::Bipolar, components.to_vec()).unwrap()
    }

    fn am_with(prototypes: &[&[i8]]) -> MemoryBank {
        let dim = prototypes[0].len();
        let mut am = MemoryBank::new("AM", prototypes.len(), dim, VectorKind::Bipolar).unwrap();
        for (i, p) in prototypes.iter().enumerate() {
            am.write(i, &bipolar(p)).unwrap();
        }
        am
    }

    #[test]
    fn test_exact_prototype_is_nearest() {
        let am = am_with(&[&[1, -1, -1, 1], &[-1, 1, 1, 1]]);
        let result = classify(&bipolar(&[1, -1, -1, 1]), &am).unwrap();
        assert_eq!(result, Classification { class_id: 0, distance: 0 });
    }

    #[test]
    fn test_complement_query() {
        let class0 = [1, -1, -1, 1];
        let class1 = [-1, -1, 1, 1];
        let am = am_with(&[&class0, &class1]);
        let query = bipolar(&class0).complement();

        let d0 = hamming_distance(&query, &am.read(0).unwrap()).unwrap();
        let d1 = hamming_distance(&query, &am.read(1).unwrap()).unwrap();
        assert_eq!(d0, 4);
        assert_eq!(d1, 2);

        let result = classify(&query, &am).unwrap();
        assert_eq!(result.class_id, 1);
        assert_eq!(result.distance, d0.min(d1));
    }

    #[test]
    fn test_ties_go_to_lowest_class() {
        let am = am_with(&[&[1, 1, -1, -1], &[-1, -1, -1, -1], &[1, 1, 1, 1]]);
        // Distances 1, 3, 1: classes 0 and 2 tie
        let query = bipolar(&[1, 1, 1, -1]);
        let ranked = rank(&query, &am).unwrap();
        assert_eq!(
            ranked,
            vec![
                Classification { class_id: 0, distance: 1 },
                Classification { class_id: 2, distance: 1 },
                Classification { class_id: 1, distance: 3 },
            ]
        );
        assert_eq!(
            classify(&query, &am).unwrap(),
            Classification { class_id: 0, distance: 1 }
        );

        let am = am_with(&[&[1, 1], &[1, 1]]);
        assert_eq!(classify(&bipolar(&[-1, -1]), &am).unwrap().class_id, 0);
    }

    #[test]
    fn test_rank_order() {
        let am = am_with(&[&[-1, -1, -1], &[1, 1, -1], &[1, 1, 1]]);
        let ranked = rank(&bipolar(&[1, 1, 1]), &am).unwrap();
        let order: Vec<usize> = ranked.iter().map(|c| c.class_id).collect();
        assert_eq!(order, vec![2, 1, 0]);
        assert_eq!(ranked[0].distance, 0);
    }

    #[test]
    fn test_classify_keyed_unbinds() {
        let mut im = MemoryBank::new("IM", 2, 4, VectorKind::Bipolar).unwrap();
        im.write(0, &bipolar(&[1, 1, -1, -1])).unwrap();
        im.write(1, &bipolar(&[-1, -1, 1, 1])).unwrap();

        let pattern0 = bipolar(&[1, -1, 1, -1]);
        let pattern1 = bipolar(&[1, 1, 1, -1]);
        let mut am = MemoryBank::new("AM", 2, 4, VectorKind::Bipolar).unwrap();
        am.write(0, &pattern0.bind(&im.read(0).unwrap())).unwrap();
        am.write(1, &pattern1.bind(&im.read(1).unwrap())).unwrap();

        assert_eq!(
            classify_keyed(&pattern0, &im, &am).unwrap(),
            Classification { class_id: 0, distance: 0 }
        );
        assert_eq!(classify_keyed(&pattern1, &im, &am).unwrap().class_id, 1);
    }

    #[test]
    fn test_mismatched_query_is_an_error() {
        let am = am_with(&[&[1, 1, 1]]);
        assert!(matches!(
            classify(&bipolar(&[1, 1]), &am),
            Err(MnemosyneError::DimensionMismatch { .. })
        ));
    }

    #[test]
    fn test_evaluation() {
        let mut eval = Evaluation::new(2);
        assert_eq!(eval.accuracy(), 0.0);
        eval.record(0, 0);
        eval.record(1, 0);
        eval.record(1, 1);
        eval.record(1, 1);
        assert_eq!(eval.total, 4);
        assert_eq!(eval.accuracy(), 0.75);
        assert_eq!(eval.confusion, vec![vec![1, 0], vec![1, 2]]);
    }
}
