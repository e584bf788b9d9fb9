//! Component value sets for hypervectors.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The value set a hypervector draws its components from.
///
/// Both kinds share one mapping onto signs: the high value (`1` or `+1`)
/// reads as `+1`, the low value (`0` or `-1`) reads as `-1`. Binding,
/// bundling and thresholding are defined on that signed view, so binary
/// and bipolar banks behave identically up to representation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VectorKind {
    /// Components in {0, 1}.
    Binary,
    /// Components in {-1, +1}.
    Bipolar,
}

impl VectorKind {
    /// The component value that reads as `+1`.
    #[inline]
    pub fn high(self) -> i8 {
        1
    }

    /// The component value that reads as `-1`.
    #[inline]
    pub fn low(self) -> i8 {
        match self {
            VectorKind::Binary => 0,
            VectorKind::Bipolar => -1,
        }
    }

    /// Returns true if `value` belongs to this kind's value set.
    #[inline]
    pub fn is_valid(self, value: i8) -> bool {
        value == self.high() || value == self.low()
    }

    /// Maps a sign onto this kind's value set.
    #[inline]
    pub fn from_sign(self, positive: bool) -> i8 {
        if positive {
            self.high()
        } else {
            self.low()
        }
    }

    /// Reads a component of this kind as `+1` or `-1`.
    #[inline]
    pub fn signed(self, value: i8) -> i32 {
        if value == self.high() {
            1
        } else {
            -1
        }
    }
}

impl fmt::Display for VectorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VectorKind::Binary => write!(f, "binary"),
            VectorKind::Bipolar => write!(f, "bipolar"),
        }
    }
}

impl FromStr for VectorKind {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "binary" | "bit" => Ok(VectorKind::Binary),
            "bipolar" | "sign" => Ok(VectorKind::Bipolar),
            other => Err(format!("unknown vector kind '{}' (expected binary or bipolar)", other)),
        }
    }
}
