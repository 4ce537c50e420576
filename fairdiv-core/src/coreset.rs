//! §4.F coreset contract. The full FMM-style coreset construction is out of
//! scope for this crate (§1 "Out of scope"); [`IdentityCoreset`] is the one
//! concrete implementation supplied so the driver can run end-to-end.
//! `original_source/fmmdmwu_nyoom.py`'s `CORESET.Coreset_FMM` is the origin
//! of this contract's shape (`compute()` / `compute_gamma_upper_bound()`) —
//! only the shape is carried over, not its body.

use ndarray::Array2;
use rand::rngs::StdRng;
use rand::seq::index::sample;
use rand::SeedableRng;

use crate::color::ColorId;
use crate::geom::euclidean;

/// Above this point count, γ_upper is estimated from a random sample rather
/// than the full O(N²) pairwise scan.
const MAX_POINTS_FOR_EXACT_BOUND: usize = 2000;
const GAMMA_UPPER_SAMPLE_SIZE: usize = 400;

/// Reduces the full point set to a representative candidate set and supplies
/// a starting γ_upper valid for the full set. The core's correctness does
/// not depend on the reduction's quality, only on γ_upper being a valid
/// starting gamma (§4.F).
pub trait Coreset {
    /// Returns `(core_features, core_colors, orig_index)`, where
    /// `orig_index[i]` maps core row `i` back to its index in the input.
    fn compute(
        &self,
        features: &Array2<f64>,
        colors: &[ColorId],
        k: usize,
    ) -> (Array2<f64>, Vec<ColorId>, Vec<usize>);

    fn gamma_upper_bound(&self, core_features: &Array2<f64>) -> f64;
}

/// Passes the input through unchanged and estimates γ_upper as the maximum
/// pairwise distance, sampled when the point count is large.
pub struct IdentityCoreset {
    seed: u64,
}

impl IdentityCoreset {
    pub fn new(seed: u64) -> Self {
        IdentityCoreset { seed }
    }
}

impl Default for IdentityCoreset {
    fn default() -> Self {
        IdentityCoreset::new(0)
    }
}

impl Coreset for IdentityCoreset {
    fn compute(
        &self,
        features: &Array2<f64>,
        colors: &[ColorId],
        _k: usize,
    ) -> (Array2<f64>, Vec<ColorId>, Vec<usize>) {
        let orig_index = (0..features.nrows()).collect();
        (features.clone(), colors.to_vec(), orig_index)
    }

    fn gamma_upper_bound(&self, core_features: &Array2<f64>) -> f64 {
        let n = core_features.nrows();
        if n <= 1 {
            return 0.0;
        }
        if n <= MAX_POINTS_FOR_EXACT_BOUND {
            let all: Vec<usize> = (0..n).collect();
            return max_pairwise_distance(core_features, &all);
        }
        let mut rng = StdRng::seed_from_u64(self.seed);
        let sample_size = GAMMA_UPPER_SAMPLE_SIZE.min(n);
        let idx = sample(&mut rng, n, sample_size).into_vec();
        max_pairwise_distance(core_features, &idx)
    }
}

fn max_pairwise_distance(features: &Array2<f64>, indices: &[usize]) -> f64 {
    let mut max_d = 0.0f64;
    for a in 0..indices.len() {
        for b in (a + 1)..indices.len() {
            let d = euclidean(features.row(indices[a]), features.row(indices[b]));
            if d > max_d {
                max_d = d;
            }
        }
    }
    max_d
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn identity_passes_input_through() {
        let features = array![[0.0, 0.0], [1.0, 1.0]];
        let colors = vec![ColorId(0), ColorId(1)];
        let coreset = IdentityCoreset::default();
        let (core_features, core_colors, orig_index) = coreset.compute(&features, &colors, 2);
        assert_eq!(core_features, features);
        assert_eq!(core_colors, colors);
        assert_eq!(orig_index, vec![0, 1]);
    }

    #[test]
    fn gamma_upper_bound_is_max_pairwise_distance_for_small_sets() {
        let features = array![[0.0, 0.0], [3.0, 4.0]];
        let coreset = IdentityCoreset::default();
        let bound = coreset.gamma_upper_bound(&features);
        assert!((bound - 5.0).abs() < 1e-9);
    }

    #[test]
    fn gamma_upper_bound_is_zero_for_degenerate_sets() {
        let features = array![[0.0, 0.0]];
        let coreset = IdentityCoreset::default();
        assert_eq!(coreset.gamma_upper_bound(&features), 0.0);
    }
}
