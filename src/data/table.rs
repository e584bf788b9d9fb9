//! Comma-separated feature and label tables.

use crate::data::TrainingSample;
use crate::error::{MnemosyneError, Result};
use log::{info, warn};
use std::collections::HashMap;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

/// One parsed row of the feature table.
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureRow {
    /// Zero-based data row (header and blank lines excluded).
    pub row: usize,
    /// The feature values.
    pub values: Vec<f64>,
}

/// One parsed row of the label table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LabelRow {
    /// Zero-based data row (header and blank lines excluded).
    pub row: usize,
    /// The class label.
    pub label: i64,
}

/// Reads rows of exactly `width` comma-separated floats.
///
/// Rows with a different width or an unparsable or non-finite value are
/// skipped with a warning; their position still counts, so later rows keep their index.
pub fn read_features<R: BufRead>(reader: R, width: usize) -> Result<Vec<FeatureRow>> {
    let mut rows = Vec::new();

    for (row, line) in data_lines(reader)? {
        match parse_feature_line(&line, row) {
            Ok(values) if values.len() == width => rows.push(FeatureRow { row, values }),
            Ok(values) => warn!(
                "Skipping feature row {}: expected {} values, got {}",
                row,
                width,
                values.len()
            ),
            Err(e) => warn!("Skipping feature row {}: {}", row, e),
        }
    }

    Ok(rows)
}

/// Reads one integer label per line.
///
/// Unparsable labels are skipped with a warning; their position still counts.
pub fn read_labels<R: BufRead>(reader: R) -> Result<Vec<LabelRow>> {
    let mut rows = Vec::new();

    for (row, line) in data_lines(reader)? {
        match line.parse::<i64>() {
            Ok(label) => rows.push(LabelRow { row, label }),
            Err(e) => warn!("Skipping label row {}: invalid label '{}' ({})", row, line, e),
        }
    }

    Ok(rows)
}

/// Joins features and labels that share a data row.
///
/// A row missing from either table (skipped or absent) drops its partner.
pub fn pair_samples(features: Vec<FeatureRow>, labels: &[LabelRow]) -> Vec<TrainingSample> {
    let labels_by_row: HashMap<usize, i64> = labels.iter().map(|l| (l.row, l.label)).collect();
    let mut unmatched = 0usize;

    let samples: Vec<TrainingSample> = features
        .into_iter()
        .filter_map(|f| match labels_by_row.get(&f.row) {
            Some(&label) => Some(TrainingSample::new(f.values, label)),
            None => {
                unmatched += 1;
                None
            }
        })
        .collect();

    let orphaned_labels = labels.len() - samples.len();
    if unmatched > 0 || orphaned_labels > 0 {
        warn!(
            "{} feature rows without a label, {} labels without features",
            unmatched, orphaned_labels
        );
    }

    samples
}

/// Reads a feature table from a file.
pub fn load_features<P: AsRef<Path>>(path: P, width: usize) -> Result<Vec<FeatureRow>> {
    let file = File::open(path)?;
    read_features(BufReader::new(file), width)
}

/// Reads a label table from a file.
pub fn load_labels<P: AsRef<Path>>(path: P) -> Result<Vec<LabelRow>> {
    let file = File::open(path)?;
    read_labels(BufReader::new(file))
}

/// Reads and pairs a feature table and a label table.
pub fn load_samples<P: AsRef<Path>, Q: AsRef<Path>>(
    features_path: P,
    labels_path: Q,
    width: usize,
) -> Result<Vec<TrainingSample>> {
    let features = load_features(features_path, width)?;
    let labels = load_labels(labels_path)?;
    let samples = pair_samples(features, &labels);
    info!("Loaded {} training samples", samples.len());
    Ok(samples)
}

/// Trimmed, non-blank lines with their data-row index; a leading header is dropped.
fn data_lines<R: BufRead>(reader: R) -> Result<Vec<(usize, String)>> {
    let mut lines = Vec::new();
    let mut seen_first = false;

    for line in reader.lines() {
        let line = line?;
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }
        if !seen_first {
            seen_first = true;
            if is_header(trimmed) {
                info!("Skipping header line: {}", trimmed);
                continue;
            }
        }
        lines.push((lines.len(), trimmed.to_string()));
    }

    Ok(lines)
}

/// A header has at least one field and no numeric ones.
fn is_header(line: &str) -> bool {
    let mut fields = line
        .split(',')
        .map(str::trim)
        .filter(|field| !field.is_empty())
        .peekable();
    fields.peek().is_some() && fields.all(|field| field.parse::<f64>().is_err())
}

fn parse_feature_line(line: &str, row: usize) -> Result<Vec<f64>> {
    line.split(',')
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .map(|token| match token.parse::<f64>() {
            Ok(value) if value.is_finite() => Ok(value),
            Ok(_) => Err(MnemosyneError::Parse {
                row,
                message: format!("non-finite value '{}'", token),
            }),
            Err(e) => Err(MnemosyneError::Parse {
                row,
                message: format!("invalid value '{}' ({})", token, e),
            }),
        })
        .collect()
}
