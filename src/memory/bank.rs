//! Fixed-capacity hypervector storage.

use crate::error::{MnemosyneError, Result};
use crate::vector::{Hypervector, VectorKind};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::io::{self, Write};

/// A fixed-capacity array of hypervectors of one kind and one dimension.
///
/// The bank owns its vectors for its whole lifetime. Capacity, kind and
/// dimension are fixed at construction. Every access is bounds-checked:
/// out-of-range ids and incompatible vectors are reported as errors and
/// leave the bank untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MemoryBank {
    /// Display name ("IM", "CiM", "AM").
    name: String,
    /// Component kind of every stored vector.
    kind: VectorKind,
    /// Dimension of every stored vector.
    dimension: usize,
    /// The stored vectors, one per entry.
    vectors: Vec<Hypervector>,
}

impl MemoryBank {
    /// Creates a bank of `entries` vectors, each at the kind's low value.
    pub fn new(name: impl Into<String>, entries: usize, dimension: usize, kind: VectorKind) -> Result<Self> {
        let name = name.into();
        if entries == 0 {
            return Err(MnemosyneError::Config(format!(
                "memory bank {} needs at least one entry",
                name
            )));
        }
        if dimension == 0 {
            return Err(MnemosyneError::Config(format!(
                "memory bank {} needs a positive dimension",
                name
            )));
        }

        Ok(Self {
            vectors: vec![Hypervector::filled(kind, dimension); entries],
            name,
            kind,
            dimension,
        })
    }

    /// Returns the bank name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the component kind.
    #[inline]
    pub fn kind(&self) -> VectorKind {
        self.kind
    }

    /// Returns the vector dimension.
    #[inline]
    pub fn dimension(&self) -> usize {
        self.dimension
    }

    /// Returns the number of entries.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.vectors.len()
    }

    /// Converts a signed id (e.g. a label read from input) into a bank index.
    pub fn resolve_id(&self, item_id: i64) -> Result<usize> {
        match usize::try_from(item_id) {
            Ok(index) if index < self.capacity() => Ok(index),
            _ => Err(MnemosyneError::IndexOutOfBounds {
                index: item_id,
                max: self.capacity(),
            }),
        }
    }

    /// Returns a copy of the vector at `item_id`.
    pub fn read(&self, item_id: usize) -> Result<Hypervector> {
        self.entry(item_id).cloned()
    }

    /// Borrows the vector at `item_id`, reporting out-of-range ids.
    pub fn entry(&self, item_id: usize) -> Result<&Hypervector> {
        self.get(item_id).ok_or(MnemosyneError::IndexOutOfBounds {
            index: item_id as i64,
            max: self.capacity(),
        })
    }

    /// Borrows the vector at `item_id`, if in range.
    #[inline]
    pub fn get(&self, item_id: usize) -> Option<&Hypervector> {
        self.vectors.get(item_id)
    }

    /// Replaces the vector at `item_id`.
    ///
    /// Fails without modifying the bank if the id is out of range or the
    /// vector's kind or dimension differ from the bank's.
    pub fn write(&mut self, item_id: usize, hv: &Hypervector) -> Result<()> {
        if hv.kind() != self.kind {
            return Err(MnemosyneError::KindMismatch {
                expected: self.kind,
                found: hv.kind(),
            });
        }
        if hv.dimension() != self.dimension {
            return Err(MnemosyneError::DimensionMismatch {
                expected: self.dimension,
                found: hv.dimension(),
            });
        }

        let capacity = self.capacity();
        let slot = self
            .vectors
            .get_mut(item_id)
            .ok_or(MnemosyneError::IndexOutOfBounds {
                index: item_id as i64,
                max: capacity,
            })?;
        slot.clone_from(hv);
        Ok(())
    }

    /// Iterates over the stored vectors in index order.
    pub fn iter(&self) -> impl Iterator<Item = &Hypervector> + '_ {
        self.vectors.iter()
    }

    /// Resets every entry to the kind's low value.
    pub fn clear(&mut self) {
        let blank = Hypervector::filled(self.kind, self.dimension);
        for slot in &mut self.vectors {
            slot.clone_from(&blank);
        }
    }

    /// Writes a human-readable dump: a header line, then one vector per line.
    pub fn dump<W: Write>(&self, mut writer: W) -> io::Result<()> {
        writeln!(writer, "{}", self.header())?;
        for hv in &self.vectors {
            writeln!(writer, "{}", hv)?;
        }
        Ok(())
    }

    /// Checks the invariants of a bank that did not come from [`MemoryBank::new`].
    pub(crate) fn validate(&self) -> Result<()> {
        if self.vectors.is_empty() || self.dimension == 0 {
            return Err(MnemosyneError::Config(format!(
                "memory bank {} is empty",
                self.name
            )));
        }
        for hv in &self.vectors {
            if hv.kind() != self.kind {
                return Err(MnemosyneError::KindMismatch {
                    expected: self.kind,
                    found: hv.kind(),
                });
            }
            if hv.dimension() != self.dimension {
                return Err(MnemosyneError::DimensionMismatch {
                    expected: self.dimension,
                    found: hv.dimension(),
                });
            }
            Hypervector::from_components(self.kind, hv.components().to_vec())?;
        }
        Ok(())
    }

    fn header(&self) -> String {
        format!(
            "{} memory contains {} vectors of dimension {} ({})",
            self.name,
            self.capacity(),
            self.dimension,
            self.kind
        )
    }
}

impl fmt::Display for MemoryBank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.header())?;
        for hv in &self.vectors {
            writeln!(f, "{}", hv)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bipolar(components: &[i8]) -> Hypervector {
        Hypervector::from_components(VectorKind::Bipolar, components.to_vec()).unwrap()
    }

    #[test]
    fn test_new_rejects_empty() {
        assert!(matches!(
            MemoryBank::new("AM", 0, 4, VectorKind::Bipolar),
            Err(MnemosyneError::Config(_))
        ));
        assert!(MemoryBank::new("AM", 2, 0, VectorKind::Bipolar).is_err());
    }

    #[test]
    fn test_new_is_filled_low() {
        let bank = MemoryBank::new("IM", 3, 4, VectorKind::Binary).unwrap();
        assert_eq!(bank.capacity(), 3);
        assert!(bank.iter().all(|hv| hv.components() == [0, 0, 0, 0]));
    }

    #[test]
    fn test_write_then_read() {
        let mut bank = MemoryBank::new("IM", 3, 4, VectorKind::Bipolar).unwrap();
        let hv = bipolar(&[1, -1, 1, 1]);
        for id in 0..3 {
            bank.write(id, &hv).unwrap();
            assert_eq!(bank.read(id).unwrap(), hv);
        }
    }

    #[test]
    fn test_out_of_range_is_reported_and_harmless() {
        let mut bank = MemoryBank::new("AM", 2, 4, VectorKind::Bipolar).unwrap();
        bank.write(0, &bipolar(&[1, 1, 1, 1])).unwrap();
        bank.write(1, &bipolar(&[1, -1, 1, -1])).unwrap();
        let before = bank.clone();

        for _ in 0..3 {
            assert!(matches!(
                bank.write(2, &bipolar(&[-1, -1, -1, -1])),
                Err(MnemosyneError::IndexOutOfBounds { index: 2, max: 2 })
            ));
            assert!(matches!(
                bank.read(2),
                Err(MnemosyneError::IndexOutOfBounds { index: 2, max: 2 })
            ));
            assert!(matches!(
                bank.resolve_id(-1),
                Err(MnemosyneError::IndexOutOfBounds { index: -1, max: 2 })
            ));
        }
        assert_eq!(bank, before);
    }

    #[test]
    fn test_write_rejects_incompatible_vectors() {
        let mut bank = MemoryBank::new("CiM", 2, 4, VectorKind::Bipolar).unwrap();
        let before = bank.clone();

        let binary = Hypervector::from_components(VectorKind::Binary, vec![1, 0, 1, 0]).unwrap();
        assert!(matches!(
            bank.write(0, &binary),
            Err(MnemosyneError::KindMismatch { .. })
        ));
        assert!(matches!(
            bank.write(0, &bipolar(&[1, 1])),
            Err(MnemosyneError::DimensionMismatch { expected: 4, found: 2 })
        ));
        assert_eq!(bank, before);
    }

    #[test]
    fn test_resolve_id() {
        let bank = MemoryBank::new("IM", 5, 2, VectorKind::Bipolar).unwrap();
        assert_eq!(bank.resolve_id(4).unwrap(), 4);
        assert!(bank.resolve_id(5).is_err());
    }

    #[test]
    fn test_clear() {
        let mut bank = MemoryBank::new("AM", 2, 3, VectorKind::Bipolar).unwrap();
        bank.write(1, &bipolar(&[1, 1, 1])).unwrap();
        bank.clear();
        assert_eq!(bank.read(1).unwrap(), bipolar(&[-1, -1, -1]));
    }

    #[test]
    fn test_dump_format() {
        let mut bank = MemoryBank::new("AM", 2, 3, VectorKind::Bipolar).unwrap();
        bank.write(0, &bipolar(&[1, -1, 1])).unwrap();

        let mut out = Vec::new();
        bank.dump(&mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert_eq!(
            text,
            "AM memory contains 2 vectors of dimension 3 (bipolar)\n1 -1 1\n-1 -1 -1\n"
        );
        assert_eq!(bank.to_string(), text);
    }
}
