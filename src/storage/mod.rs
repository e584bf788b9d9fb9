//! Storage module for model snapshots.

mod format;

pub use format::{ModelFormat, ModelHeader};
