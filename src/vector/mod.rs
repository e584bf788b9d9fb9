//! Hypervector model: value sets, dense vectors and bundling accumulators.

mod accumulator;
mod hypervector;
mod kind;

pub use accumulator::Accumulator;
pub use hypervector::Hypervector;
pub use kind::VectorKind;
