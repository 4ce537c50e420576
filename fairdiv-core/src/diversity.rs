//! §4.E diversity measurement.

use ndarray::Array2;

use crate::geom::euclidean;

/// The minimum pairwise Euclidean distance among the rows of `features`
/// named by `indices`. Returns `f64::INFINITY` for fewer than two indices
/// (the driver guarantees `|S| >= 2` in practice, per §4.E).
pub fn maxmin(features: &Array2<f64>, indices: &[usize]) -> f64 {
    if indices.len() <= 1 {
        return f64::INFINITY;
    }
    let mut min_d = f64::INFINITY;
    for a in 0..indices.len() {
        for b in (a + 1)..indices.len() {
            let d = euclidean(features.row(indices[a]), features.row(indices[b]));
            if d < min_d {
                min_d = d;
            }
        }
    }
    min_d
}
