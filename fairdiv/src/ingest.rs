//! CSV ingestion (§1 "external collaborators", elaborated in SPEC_FULL.md).
//!
//! Follows the `read_curve_from_csv`/`load_frequency_response` shape used
//! elsewhere in this workspace family: a `csv::ReaderBuilder` over a
//! header-bearing file, with per-field parsing against a sniffed header.

use std::collections::HashMap;
use std::path::Path;

use ndarray::Array2;
use thiserror::Error;

/// Errors raised while reading or normalizing a point set from CSV.
#[derive(Debug, Error)]
pub enum IngestError {
    #[error("failed to open or read {0}: {1}")]
    Io(String, #[source] std::io::Error),

    #[error("csv parse error in {0}: {1}")]
    Csv(String, #[source] csv::Error),

    #[error("color column {0:?} not found in header")]
    MissingColorColumn(String),

    #[error("feature column {0:?} not found in header")]
    MissingFeatureColumn(String),

    #[error("no feature columns remained after excluding the color column")]
    NoFeatureColumns,

    #[error("row {0} has non-finite value in column {1:?}")]
    NonFiniteValue(usize, String),

    #[error("row {0}: expected {1} fields, found {2}")]
    RaggedRow(usize, usize, usize),

    #[error("input has no data rows")]
    Empty,
}

/// Reads a point set from `path`.
///
/// `color_column` names the header field holding the color label.
/// `feature_columns`, when `Some`, restricts the d-vector to exactly those
/// header fields (in the given order); when `None`, every remaining column
/// is used, in header order.
///
/// Returns `(features, colors)` where `features` is N×d and `colors[i]` is
/// the color label of point i.
pub fn read_points_csv(
    path: &Path,
    color_column: &str,
    feature_columns: Option<&[String]>,
) -> Result<(Array2<f64>, Vec<String>), IngestError> {
    let path_display = path.display().to_string();
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_path(path)
        .map_err(|e| IngestError::Csv(path_display.clone(), e))?;

    let headers = reader
        .headers()
        .map_err(|e| IngestError::Csv(path_display.clone(), e))?
        .clone();

    let color_idx = headers
        .iter()
        .position(|h| h == color_column)
        .ok_or_else(|| IngestError::MissingColorColumn(color_column.to_string()))?;

    let feature_idx: Vec<usize> = match feature_columns {
        Some(names) => names
            .iter()
            .map(|name| {
                headers
                    .iter()
                    .position(|h| h == name)
                    .ok_or_else(|| IngestError::MissingFeatureColumn(name.clone()))
            })
            .collect::<Result<_, _>>()?,
        None => (0..headers.len()).filter(|&i| i != color_idx).collect(),
    };
    if feature_idx.is_empty() {
        return Err(IngestError::NoFeatureColumns);
    }

    let mut colors = Vec::new();
    let mut rows: Vec<Vec<f64>> = Vec::new();

    for (row_num, record) in reader.records().enumerate() {
        let record = record.map_err(|e| IngestError::Csv(path_display.clone(), e))?;
        if record.len() != headers.len() {
            return Err(IngestError::RaggedRow(row_num, headers.len(), record.len()));
        }

        colors.push(record[color_idx].to_string());

        let mut row = Vec::with_capacity(feature_idx.len());
        for &col in &feature_idx {
            let raw = &record[col];
            let value: f64 = raw
                .trim()
                .parse()
                .map_err(|_| IngestError::NonFiniteValue(row_num, headers[col].to_string()))?;
            if !value.is_finite() {
                return Err(IngestError::NonFiniteValue(row_num, headers[col].to_string()));
            }
            row.push(value);
        }
        rows.push(row);
    }

    if rows.is_empty() {
        return Err(IngestError::Empty);
    }

    let n = rows.len();
    let d = feature_idx.len();
    let mut features = Array2::<f64>::zeros((n, d));
    for (i, row) in rows.into_iter().enumerate() {
        for (j, value) in row.into_iter().enumerate() {
            features[[i, j]] = value;
        }
    }

    Ok((features, colors))
}

/// Z-score normalizes every column of `features` in place: subtract the
/// column mean, divide by the column standard deviation. Columns with zero
/// standard deviation are left untouched.
pub fn normalize_columns(features: &mut Array2<f64>) {
    let (n, d) = features.dim();
    if n == 0 {
        return;
    }
    for j in 0..d {
        let column = features.column(j);
        let mean = column.sum() / n as f64;
        let variance = column.iter().map(|&v| (v - mean).powi(2)).sum::<f64>() / n as f64;
        let std = variance.sqrt();
        if std == 0.0 {
            continue;
        }
        for i in 0..n {
            features[[i, j]] = (features[[i, j]] - mean) / std;
        }
    }
}

/// Returns the distinct labels in `colors`, in first-seen order, without
/// committing to a `ColorTable`.
pub fn observed_color_order(colors: &[String]) -> Vec<String> {
    let mut seen = HashMap::new();
    let mut order = Vec::new();
    for label in colors {
        if !seen.contains_key(label) {
            seen.insert(label.clone(), ());
            order.push(label.clone());
        }
    }
    order
}
