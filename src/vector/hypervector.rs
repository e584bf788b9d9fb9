//! Dense hypervectors over binary or bipolar components.

use crate::error::{MnemosyneError, Result};
use crate::vector::VectorKind;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A dense hypervector of fixed dimension.
///
/// Every component belongs to the value set of the vector's [`VectorKind`];
/// the constructors enforce this, so operations never see a stray value.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Hypervector {
    /// The value set of the components.
    kind: VectorKind,
    /// One component per dimension.
    components: Vec<i8>,
}

impl Hypervector {
    /// Creates a vector with every component at the kind's low value.
    pub fn filled(kind: VectorKind, dimension: usize) -> Self {
        Self {
            kind,
            components: vec![kind.low(); dimension],
        }
    }

    /// Creates a vector from raw components, validating the value set.
    pub fn from_components(kind: VectorKind, components: Vec<i8>) -> Result<Self> {
        if let Some(&value) = components.iter().find(|&&v| !kind.is_valid(v)) {
            return Err(MnemosyneError::InvalidComponent { value, kind });
        }
        Ok(Self { kind, components })
    }

    /// Creates a vector whose components are already known to be valid.
    pub(crate) fn from_valid(kind: VectorKind, components: Vec<i8>) -> Self {
        debug_assert!(components.iter().all(|&v| kind.is_valid(v)));
        Self { kind, components }
    }

    /// Draws every component uniformly from the kind's value set.
    pub fn random<R: Rng + ?Sized>(kind: VectorKind, dimension: usize, rng: &mut R) -> Self {
        let components = (0..dimension)
            .map(|_| kind.from_sign(rng.gen::<bool>()))
            .collect();
        Self { kind, components }
    }

    /// Returns the component kind.
    #[inline]
    pub fn kind(&self) -> VectorKind {
        self.kind
    }

    /// Returns the number of components.
    #[inline]
    pub fn dimension(&self) -> usize {
        self.components.len()
    }

    /// Returns the raw components.
    #[inline]
    pub fn components(&self) -> &[i8] {
        &self.components
    }

    /// Returns the component at `index`, if any.
    #[inline]
    pub fn get(&self, index: usize) -> Option<i8> {
        self.components.get(index).copied()
    }

    /// Iterates over the components read as `+1` / `-1`.
    pub fn signed(&self) -> impl Iterator<Item = i32> + '_ {
        let kind = self.kind;
        self.components.iter().map(move |&v| kind.signed(v))
    }

    /// Checks that `other` has the same kind and dimension.
    pub fn ensure_compatible(&self, other: &Hypervector) -> Result<()> {
        if self.kind != other.kind {
            return Err(MnemosyneError::KindMismatch {
                expected: self.kind,
                found: other.kind,
            });
        }
        if self.dimension() != other.dimension() {
            return Err(MnemosyneError::DimensionMismatch {
                expected: self.dimension(),
                found: other.dimension(),
            });
        }
        Ok(())
    }

    // === HDC Operations ===

    /// **Binding**: elementwise product on the signed view.
    ///
    /// Bipolar vectors multiply directly; binary vectors use XNOR, which is
    /// the same product under the `1 ↔ +1`, `0 ↔ -1` mapping. Equal
    /// components yield the high value, differing components the low value.
    /// Binding is its own inverse: `a.bind(&k).bind(&k) == a`.
    ///
    /// # Panics
    ///
    /// Panics if the operands differ in kind or dimension.
    pub fn bind(&self, other: &Hypervector) -> Hypervector {
        self.assert_compatible(other);
        let kind = self.kind;
        let components = self
            .components
            .iter()
            .zip(&other.components)
            .map(|(&a, &b)| kind.from_sign(a == b))
            .collect();
        Hypervector::from_valid(kind, components)
    }

    /// Flips every component (NOT for binary, negation for bipolar).
    pub fn complement(&self) -> Hypervector {
        let kind = self.kind;
        let components = self
            .components
            .iter()
            .map(|&v| kind.from_sign(v != kind.high()))
            .collect();
        Hypervector::from_valid(kind, components)
    }

    /// **Hamming Distance**: number of positions where the vectors differ.
    ///
    /// Symmetric, in `[0, D]`, and zero exactly when the vectors are equal.
    ///
    /// # Panics
    ///
    /// Panics if the operands differ in kind or dimension.
    pub fn hamming_distance(&self, other: &Hypervector) -> usize {
        self.assert_compatible(other);
        self.components
            .iter()
            .zip(&other.components)
            .filter(|(a, b)| a != b)
            .count()
    }

    /// Normalized similarity `1 - 2·d/D` in `[-1, 1]`.
    ///
    /// 1 = identical, 0 = unrelated, -1 = complement.
    pub fn similarity(&self, other: &Hypervector) -> f64 {
        if self.components.is_empty() {
            return 1.0;
        }
        let d = self.hamming_distance(other) as f64;
        1.0 - 2.0 * d / self.dimension() as f64
    }

    fn assert_compatible(&self, other: &Hypervector) {
        assert_eq!(self.kind, other.kind, "hypervector kind mismatch");
        assert_eq!(
            self.dimension(),
            other.dimension(),
            "hypervector dimension mismatch"
        );
    }
}

impl fmt::Display for Hypervector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, v) in self.components.iter().enumerate() {
            if i > 0 {
                write!(f, " ")?;
            }
            write!(f, "{}", v)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn bipolar(components: &[i8]) -> Hypervector {
        Hypervector::from_components(VectorKind::Bipolar, components.to_vec()).unwrap()
    }

    fn binary(components: &[i8]) -> Hypervector {
        Hypervector::from_components(VectorKind::Binary, components.to_vec()).unwrap()
    }

    #[test]
    fn test_from_components_rejects_foreign_values() {
        let err = Hypervector::from_components(VectorKind::Bipolar, vec![1, 0, -1]).unwrap_err();
        assert!(matches!(
            err,
            MnemosyneError::InvalidComponent { value: 0, kind: VectorKind::Bipolar }
        ));
        assert!(Hypervector::from_components(VectorKind::Binary, vec![1, -1]).is_err());
    }

    #[test]
    fn test_random_stays_in_value_set() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        let hv = Hypervector::random(VectorKind::Binary, 1000, &mut rng);
        assert_eq!(hv.dimension(), 1000);
        assert!(hv.components().iter().all(|&v| v == 0 || v == 1));

        // Roughly balanced
        let ones = hv.components().iter().filter(|&&v| v == 1).count();
        assert!(ones > 400 && ones < 600);
    }

    #[test]
    fn test_bind_bipolar() {
        let im = bipolar(&[1, 1, -1, -1]);
        let cim = bipolar(&[1, -1, 1, -1]);
        assert_eq!(im.bind(&cim), bipolar(&[1, -1, -1, 1]));
    }

    #[test]
    fn test_bind_binary_is_xnor() {
        let a = binary(&[1, 1, 0, 0]);
        let b = binary(&[1, 0, 1, 0]);
        assert_eq!(a.bind(&b), binary(&[1, 0, 0, 1]));
    }

    #[test]
    fn test_bind_self_inverse() {
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        for kind in [VectorKind::Binary, VectorKind::Bipolar] {
            let a = Hypervector::random(kind, 256, &mut rng);
            let key = Hypervector::random(kind, 256, &mut rng);
            assert_eq!(a.bind(&key).bind(&key), a);
        }
    }

    #[test]
    #[should_panic(expected = "dimension mismatch")]
    fn test_bind_dimension_mismatch_panics() {
        let a = bipolar(&[1, 1]);
        let b = bipolar(&[1, 1, 1]);
        let _ = a.bind(&b);
    }

    #[test]
    fn test_hamming_distance_properties() {
        let mut rng = ChaCha8Rng::seed_from_u64(11);
        let a = Hypervector::random(VectorKind::Bipolar, 500, &mut rng);
        let b = Hypervector::random(VectorKind::Bipolar, 500, &mut rng);

        assert_eq!(a.hamming_distance(&a), 0);
        assert_eq!(a.hamming_distance(&b), b.hamming_distance(&a));
        assert!(a.hamming_distance(&b) <= 500);
        assert_eq!(a.hamming_distance(&a.complement()), 500);
    }

    #[test]
    fn test_similarity_range() {
        let a = binary(&[1, 0, 1, 0]);
        assert_eq!(a.similarity(&a), 1.0);
        assert_eq!(a.similarity(&a.complement()), -1.0);
        assert_eq!(a.similarity(&binary(&[1, 0, 0, 1])), 0.0);
    }

    #[test]
    fn test_ensure_compatible() {
        let a = bipolar(&[1, -1]);
        assert!(a.ensure_compatible(&bipolar(&[-1, -1])).is_ok());
        assert!(matches!(
            a.ensure_compatible(&binary(&[1, 0])),
            Err(MnemosyneError::KindMismatch { .. })
        ));
        assert!(matches!(
            a.ensure_compatible(&bipolar(&[1])),
            Err(MnemosyneError::DimensionMismatch { expected: 2, found: 1 })
        ));
    }

    #[test]
    fn test_display() {
        assert_eq!(bipolar(&[1, -1, 1]).to_string(), "1 -1 1");
    }
}
