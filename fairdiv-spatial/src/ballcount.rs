//! §4.B Ball-count index: for a small set of centers, count how many lie
//! within a radius of each of many query points.
//!
//! `m` (the center count) is bounded by `k` across this workspace, so a
//! brute-force scan over centers per query point is the right primitive —
//! spec.md explicitly permits this ("brute-force when m is small").

use ndarray::{Array2, ArrayView2};
use rayon::prelude::*;

use crate::error::SpatialError;
use crate::kdtree::sqdist;

const PARALLEL_THRESHOLD: usize = 512;

/// Handle returned by [`BallCountIndex::build`].
pub struct BallCountIndex {
    centers: Array2<f64>,
}

impl BallCountIndex {
    /// Build over `centers` (m x d). `centers` may be empty, in which case
    /// every count query returns all zeros.
    pub fn build(centers: ArrayView2<f64>) -> Self {
        log::trace!("built ball-count index over {} centers", centers.nrows());
        BallCountIndex {
            centers: centers.to_owned(),
        }
    }

    pub fn num_centers(&self) -> usize {
        self.centers.nrows()
    }

    /// `c_i = |{j : ||q_i - center_j|| <= radius}|` for every row `q_i` of
    /// `query_points`.
    ///
    /// # Errors
    ///
    /// Returns [`SpatialError::DimensionMismatch`] if `query_points`'
    /// column count does not match the centers' dimension (only checked
    /// when there is at least one center; an empty center set has no fixed
    /// dimension to compare against).
    pub fn count(
        &self,
        query_points: ArrayView2<f64>,
        radius: f64,
    ) -> Result<Vec<u32>, SpatialError> {
        if self.centers.nrows() > 0 && query_points.ncols() != self.centers.ncols() {
            return Err(SpatialError::DimensionMismatch {
                got: query_points.ncols(),
                expected: self.centers.ncols(),
            });
        }
        let n = query_points.nrows();
        let rsq = radius * radius;
        let count_one = |i: usize| -> u32 {
            let q = query_points.row(i);
            self.centers
                .rows()
                .into_iter()
                .filter(|c| sqdist(q, c.view()) <= rsq)
                .count() as u32
        };

        let mut out = vec![0u32; n];
        if n >= PARALLEL_THRESHOLD {
            out.par_iter_mut()
                .enumerate()
                .for_each(|(i, slot)| *slot = count_one(i));
        } else {
            for (i, slot) in out.iter_mut().enumerate() {
                *slot = count_one(i);
            }
        }
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn counts_centers_within_radius() {
        let centers = array![[0.0, 0.0], [10.0, 10.0]];
        let idx = BallCountIndex::build(centers.view());
        let queries = array![[0.1, 0.0], [10.0, 10.1], [5.0, 5.0]];
        let counts = idx.count(queries.view(), 1.0).unwrap();
        assert_eq!(counts, vec![1, 1, 0]);
    }

    #[test]
    fn monotonic_in_centers() {
        let queries = array![[0.0, 0.0]];
        let few = BallCountIndex::build(array![[0.1, 0.0]].view());
        let more = BallCountIndex::build(array![[0.1, 0.0], [0.2, 0.0]].view());
        let c_few = few.count(queries.view(), 1.0).unwrap();
        let c_more = more.count(queries.view(), 1.0).unwrap();
        assert!(c_more[0] >= c_few[0]);
    }

    #[test]
    fn empty_centers_returns_zero() {
        let centers: Array2<f64> = Array2::zeros((0, 2));
        let idx = BallCountIndex::build(centers.view());
        let queries = array![[0.0, 0.0], [1.0, 1.0]];
        let counts = idx.count(queries.view(), 5.0).unwrap();
        assert_eq!(counts, vec![0, 0]);
    }
}
