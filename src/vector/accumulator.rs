//! Integer accumulator used for bundling.

use crate::vector::{Hypervector, VectorKind};

/// Component-wise integer sums of signed hypervectors.
///
/// Each added vector contributes `+1` or `-1` per position (see
/// [`VectorKind`]). Thresholding maps strictly positive sums to the high
/// value and everything else, including zero, to the low value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Accumulator {
    sums: Vec<i32>,
    count: usize,
}

impl Accumulator {
    /// Creates a zeroed accumulator.
    pub fn new(dimension: usize) -> Self {
        Self {
            sums: vec![0; dimension],
            count: 0,
        }
    }

    /// Wraps precomputed sums.
    pub fn from_sums(sums: Vec<i32>) -> Self {
        Self { sums, count: 0 }
    }

    /// Adds one hypervector.
    ///
    /// # Panics
    ///
    /// Panics if the vector's dimension differs from the accumulator's.
    pub fn add(&mut self, hv: &Hypervector) {
        assert_eq!(
            hv.dimension(),
            self.sums.len(),
            "accumulator dimension mismatch"
        );
        for (sum, v) in self.sums.iter_mut().zip(hv.signed()) {
            *sum += v;
        }
        self.count += 1;
    }

    /// Number of vectors added so far.
    #[inline]
    pub fn count(&self) -> usize {
        self.count
    }

    /// Returns the raw sums.
    #[inline]
    pub fn sums(&self) -> &[i32] {
        &self.sums
    }

    /// Returns the dimension.
    #[inline]
    pub fn dimension(&self) -> usize {
        self.sums.len()
    }

    /// Thresholds the sums into a vector of `kind`: `> 0` high, else low.
    pub fn threshold(&self, kind: VectorKind) -> Hypervector {
        let components = self.sums.iter().map(|&s| kind.from_sign(s > 0)).collect();
        Hypervector::from_valid(kind, components)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_threshold_rule() {
        let acc = Accumulator::from_sums(vec![3, 0, -2, 1, -1]);
        assert_eq!(
            acc.threshold(VectorKind::Bipolar).components(),
            &[1, -1, -1, 1, -1]
        );
        assert_eq!(
            acc.threshold(VectorKind::Binary).components(),
            &[1, 0, 0, 1, 0]
        );
    }

    #[test]
    fn test_threshold_idempotent() {
        let hv = Hypervector::from_components(VectorKind::Bipolar, vec![1, -1, -1, 1, 1]).unwrap();
        for copies in 1..=4 {
            let mut acc = Accumulator::new(hv.dimension());
            for _ in 0..copies {
                acc.add(&hv);
            }
            assert_eq!(acc.count(), copies);
            assert_eq!(acc.threshold(VectorKind::Bipolar), hv);
        }
    }

    #[test]
    fn test_binary_accumulates_signed() {
        let a = Hypervector::from_components(VectorKind::Binary, vec![1, 0, 1]).unwrap();
        let b = Hypervector::from_components(VectorKind::Binary, vec![1, 0, 0]).unwrap();
        let mut acc = Accumulator::new(3);
        acc.add(&a);
        acc.add(&b);
        assert_eq!(acc.sums(), &[2, -2, 0]);
        // The tie at position 2 maps low
        assert_eq!(acc.threshold(VectorKind::Binary).components(), &[1, 0, 0]);
    }
}
