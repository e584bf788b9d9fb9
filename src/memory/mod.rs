//! Memory banks: item memory (IM), continuous item memory (CiM) and
//! associative memory (AM) all share one bounds-checked container.

mod bank;

pub use bank::MemoryBank;

/// Conventional name of the item memory bank.
pub const ITEM_MEMORY: &str = "IM";

/// Conventional name of the continuous item memory bank.
pub const CONTINUOUS_MEMORY: &str = "CiM";

/// Conventional name of the associative memory bank.
pub const ASSOCIATIVE_MEMORY: &str = "AM";
