//! Shared Euclidean-distance helper used by diversity measurement and the
//! default coreset's γ_upper estimate.

use ndarray::ArrayView1;

pub(crate) fn euclidean(a: ArrayView1<f64>, b: ArrayView1<f64>) -> f64 {
    a.iter()
        .zip(b.iter())
        .map(|(&x, &y)| (x - y) * (x - y))
        .sum::<f64>()
        .sqrt()
}
