//! Deterministic hypervector generation for seeding memory banks.
//!
//! Item memory entries are independent random vectors. Continuous item
//! memory entries walk from one random extreme to its exact complement:
//! level `i` of `n` starts as the low extreme and takes
//! `floor(D * i / (n - 1))` positions from the high extreme, so
//! neighbouring levels stay close while the two ends share nothing.

use crate::config::MemoryConfig;
use crate::error::{MnemosyneError, Result};
use crate::memory::MemoryBank;
use crate::vector::{Hypervector, VectorKind};
use log::debug;
use rand::seq::index;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

/// How interpolation picks the positions copied from the second vector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Interpolation {
    /// Draw `floor(D * ratio)` positions uniformly with replacement.
    ///
    /// Repeated draws collapse, so fewer positions may actually change.
    WithReplacement,
    /// Copy exactly `floor(D * ratio)` distinct positions.
    Exact,
}

/// Seeded source of random, orthogonal and interpolated hypervectors.
pub struct VectorGenerator {
    kind: VectorKind,
    dimension: usize,
    interpolation: Interpolation,
    rng: ChaCha8Rng,
}

impl VectorGenerator {
    /// Creates a generator; `seed = None` draws the seed from entropy.
    pub fn new(
        kind: VectorKind,
        dimension: usize,
        interpolation: Interpolation,
        seed: Option<u64>,
    ) -> Self {
        let rng = match seed {
            Some(s) => ChaCha8Rng::seed_from_u64(s),
            None => ChaCha8Rng::from_entropy(),
        };

        Self {
            kind,
            dimension,
            interpolation,
            rng,
        }
    }

    /// Creates a generator matching the memory configuration.
    pub fn from_config(config: &MemoryConfig) -> Self {
        Self::new(
            config.kind,
            config.dimension,
            config.interpolation,
            config.seed,
        )
    }

    /// Returns the kind of generated vectors.
    pub fn kind(&self) -> VectorKind {
        self.kind
    }

    /// Returns the dimension of generated vectors.
    pub fn dimension(&self) -> usize {
        self.dimension
    }

    /// Draws one uniformly random vector.
    pub fn random_vector(&mut self) -> Hypervector {
        Hypervector::random(self.kind, self.dimension, &mut self.rng)
    }

    /// Draws a random vector and its complement; they differ in every position.
    pub fn orthogonal_pair(&mut self) -> (Hypervector, Hypervector) {
        let v1 = self.random_vector();
        let v2 = v1.complement();
        (v1, v2)
    }

    /// Copies `v1` and overwrites `floor(D * ratio)` positions with `v2`'s.
    ///
    /// `ratio` must lie in `[0, 1]`.
    pub fn interpolate(&mut self, v1: &Hypervector, v2: &Hypervector, ratio: f64) -> Result<Hypervector> {
        v1.ensure_compatible(v2)?;
        if !(0.0..=1.0).contains(&ratio) {
            return Err(MnemosyneError::Config(format!(
                "interpolation ratio {} outside [0, 1]",
                ratio
            )));
        }

        let dimension = v1.dimension();
        let flips = flip_count(dimension, ratio);
        let mut components = v1.components().to_vec();
        let source = v2.components();

        match self.interpolation {
            Interpolation::WithReplacement => {
                for _ in 0..flips {
                    let i = self.rng.gen_range(0..dimension);
                    components[i] = source[i];
                }
            }
            Interpolation::Exact => {
                for i in index::sample(&mut self.rng, dimension, flips).iter() {
                    components[i] = source[i];
                }
            }
        }

        Ok(Hypervector::from_valid(v1.kind(), components))
    }

    /// Fills `bank` with levels interpolated between an orthogonal pair.
    ///
    /// Entry 0 equals the low extreme; the last entry approaches the high one.
    pub fn seed_continuous_bank(&mut self, bank: &mut MemoryBank) -> Result<()> {
        self.ensure_matches(bank)?;
        let entries = bank.capacity();
        if entries < 2 {
            return Err(MnemosyneError::Config(format!(
                "continuous memory {} needs at least 2 entries, has {}",
                bank.name(),
                entries
            )));
        }

        let (low, high) = self.orthogonal_pair();
        for i in 0..entries {
            let ratio = i as f64 / (entries - 1) as f64;
            let level = self.interpolate(&low, &high, ratio)?;
            bank.write(i, &level)?;
        }

        debug!(
            "Seeded continuous memory {}: {} levels, {:?} interpolation",
            bank.name(),
            entries,
            self.interpolation
        );
        Ok(())
    }

    /// Fills every entry of `bank` with an independent random vector.
    pub fn seed_discrete_bank(&mut self, bank: &mut MemoryBank) -> Result<()> {
        self.ensure_matches(bank)?;
        for i in 0..bank.capacity() {
            let hv = self.random_vector();
            bank.write(i, &hv)?;
        }

        debug!("Seeded item memory {}: {} entries", bank.name(), bank.capacity());
        Ok(())
    }

    fn ensure_matches(&self, bank: &MemoryBank) -> Result<()> {
        if bank.kind() != self.kind() {
            return Err(MnemosyneError::KindMismatch {
                expected: bank.kind(),
                found: self.kind(),
            });
        }
        if bank.dimension() != self.dimension() {
            return Err(MnemosyneError::DimensionMismatch {
                expected: bank.dimension(),
                found: self.dimension(),
            });
        }
        Ok(())
    }
}

/// Number of positions taken from the second vector at `ratio`.
#[inline]
pub(crate) fn flip_count(dimension: usize, ratio: f64) -> usize {
    (dimension as f64 * ratio) as usize
}
