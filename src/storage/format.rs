//! Binary snapshot format for trained models.
//!
//! ## Format Layout
//!
//! ```text
//! +------------------+
//! | Header (16 bytes)|
//! +------------------+
//! | Body (bincode)   |
//! | config, IM, CiM, |
//! | AM               |
//! +------------------+
//! ```
//!
//! ### Header (16 bytes)
//! - Magic number (4 bytes): "HDCM"
//! - Version (2 bytes)
//! - Vector kind (1 byte): 0 = binary, 1 = bipolar
//! - Reserved (1 byte)
//! - Dimension (8 bytes)

use crate::config::Config;
use crate::error::{MnemosyneError, Result};
use crate::memory::MemoryBank;
use crate::model::HdcModel;
use crate::vector::VectorKind;
use log::info;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;

/// Magic number for Mnemosyne model files.
const MAGIC: &[u8; 4] = b"HDCM";

/// Current format version.
const VERSION: u16 = 1;

/// Header size in bytes.
const HEADER_SIZE: usize = 16;

/// Model file header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ModelHeader {
    /// Format version.
    pub version: u16,
    /// Component kind of every bank.
    pub kind: VectorKind,
    /// Hypervector dimension.
    pub dimension: u64,
}

impl ModelHeader {
    /// Creates a header for the current format version.
    pub fn new(kind: VectorKind, dimension: u64) -> Self {
        Self {
            version: VERSION,
            kind,
            dimension,
        }
    }

    /// Writes the header to bytes.
    pub fn to_bytes(&self) -> [u8; HEADER_SIZE] {
        let mut bytes = [0u8; HEADER_SIZE];
        bytes[0..4].copy_from_slice(MAGIC);
        bytes[4..6].copy_from_slice(&self.version.to_le_bytes());
        bytes[6] = match self.kind {
            VectorKind::Binary => 0,
            VectorKind::Bipolar => 1,
        };
        bytes[8..16].copy_from_slice(&self.dimension.to_le_bytes());
        bytes
    }

    /// Reads a header from bytes.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        if bytes.len() < HEADER_SIZE {
            return Err(MnemosyneError::InvalidModelFormat(
                "Header too short".to_string(),
            ));
        }
        if &bytes[0..4] != MAGIC {
            return Err(MnemosyneError::InvalidModelFormat(
                "Invalid magic number".to_string(),
            ));
        }

        let version = u16::from_le_bytes([bytes[4], bytes[5]]);
        if version != VERSION {
            return Err(MnemosyneError::InvalidModelFormat(format!(
                "Unsupported version {}",
                version
            )));
        }

        let kind = match bytes[6] {
            0 => VectorKind::Binary,
            1 => VectorKind::Bipolar,
            other => {
                return Err(MnemosyneError::InvalidModelFormat(format!(
                    "Unknown vector kind tag {}",
                    other
                )))
            }
        };

        let mut dimension = [0u8; 8];
        dimension.copy_from_slice(&bytes[8..16]);

        Ok(Self {
            version,
            kind,
            dimension: u64::from_le_bytes(dimension),
        })
    }
}

#[derive(Serialize)]
struct SnapshotRef<'a> {
    config: &'a Config,
    im: &'a MemoryBank,
    cim: &'a MemoryBank,
    am: &'a MemoryBank,
}

#[derive(Deserialize)]
struct Snapshot {
    config: Config,
    im: MemoryBank,
    cim: MemoryBank,
    am: MemoryBank,
}

/// Binary format reader/writer for model files.
pub struct ModelFormat;

impl ModelFormat {
    /// Writes a model snapshot.
    pub fn write<P: AsRef<Path>>(path: P, model: &HdcModel) -> Result<()> {
        let file = File::create(path.as_ref())?;
        let mut writer = BufWriter::new(file);

        let config = model.config();
        let header = ModelHeader::new(config.memory.kind, config.memory.dimension as u64);
        writer.write_all(&header.to_bytes())?;

        let snapshot = SnapshotRef {
            config,
            im: model.item_memory(),
            cim: model.continuous_memory(),
            am: model.associative_memory(),
        };
        bincode::serialize_into(&mut writer, &snapshot)?;
        writer.flush()?;

        info!("Saved model to {}", path.as_ref().display());
        Ok(())
    }

    /// Reads a model snapshot, validating header and bank shapes.
    pub fn read<P: AsRef<Path>>(path: P) -> Result<HdcModel> {
        let file = File::open(path.as_ref())?;
        let mut reader = BufReader::new(file);

        let mut header_bytes = [0u8; HEADER_SIZE];
        reader.read_exact(&mut header_bytes).map_err(|e| {
            if e.kind() == std::io::ErrorKind::UnexpectedEof {
                MnemosyneError::InvalidModelFormat("Header too short".to_string())
            } else {
                MnemosyneError::Io(e)
            }
        })?;
        let header = ModelHeader::from_bytes(&header_bytes)?;

        let snapshot: Snapshot = bincode::deserialize_from(&mut reader)?;
        let memory = &snapshot.config.memory;
        if memory.kind != header.kind || memory.dimension as u64 != header.dimension {
            return Err(MnemosyneError::InvalidModelFormat(format!(
                "Header ({} x {}) disagrees with body ({} x {})",
                header.kind, header.dimension, memory.kind, memory.dimension
            )));
        }

        HdcModel::from_parts(snapshot.config, snapshot.im, snapshot.cim, snapshot.am)
    }
}
