//! Bind-bundle engine: turns (item, level) vector pairs into class prototypes.
//!
//! ```text
//! prototype[c] = threshold( Σ  IM[c] ⊗ CiM[q(x)] )
//!                          x ∈ features of samples labelled c
//! ```
//!
//! The associative memory is written only here; each call recomputes a
//! prototype from scratch and overwrites the previous one.

mod training;

pub use training::{Trainer, TrainingReport};

use crate::error::{MnemosyneError, Result};
use crate::memory::MemoryBank;
use crate::vector::{Accumulator, Hypervector};

/// **Binding**: elementwise product of an item vector and a level vector.
///
/// See [`Hypervector::bind`].
#[inline]
pub fn bind(im_vector: &Hypervector, cim_vector: &Hypervector) -> Hypervector {
    im_vector.bind(cim_vector)
}

/// **Bundling**: binds each pair, sums the results and thresholds the sum.
///
/// All vectors must share one kind and dimension.
pub fn bundle<'a, I>(pairs: I) -> Result<Hypervector>
where
    I: IntoIterator<Item = (&'a Hypervector, &'a Hypervector)>,
{
    let mut pairs = pairs.into_iter();
    let (first_im, first_cim) = pairs
        .next()
        .ok_or_else(|| MnemosyneError::EmptyInput("nothing to bundle".to_string()))?;

    first_im.ensure_compatible(first_cim)?;
    let mut acc = Accumulator::new(first_im.dimension());
    acc.add(&bind(first_im, first_cim));

    for (im_vector, cim_vector) in pairs {
        first_im.ensure_compatible(im_vector)?;
        first_im.ensure_compatible(cim_vector)?;
        acc.add(&bind(im_vector, cim_vector));
    }

    Ok(acc.threshold(first_im.kind()))
}

/// Bundles paired item and level vectors and stores the prototype in `am`
/// at `class_id`, replacing whatever was there.
///
/// On error the associative memory is left untouched.
pub fn bundle_and_store(
    class_id: usize,
    im_vectors: &[Hypervector],
    cim_vectors: &[Hypervector],
    am: &mut MemoryBank,
) -> Result<Hypervector> {
    if im_vectors.len() != cim_vectors.len() {
        return Err(MnemosyneError::LengthMismatch {
            left: im_vectors.len(),
            right: cim_vectors.len(),
        });
    }
    am.entry(class_id)?;

    let prototype = bundle(im_vectors.iter().zip(cim_vectors))?;
    am.write(class_id, &prototype)?;
    Ok(prototype)
}
