//! §4.A Weighted spatial index: ball-sum queries over a fixed point set.

use ndarray::{Array2, ArrayView2};
use rayon::prelude::*;

use crate::error::SpatialError;
use crate::kdtree::KdTree;

/// Smallest query batch size at which per-point work is parallelized;
/// below this the thread-pool dispatch overhead is not worth it.
const PARALLEL_THRESHOLD: usize = 512;

/// Handle returned by [`WeightedIndex::build`]. Immutable w.r.t. the point
/// set it was built over; safe to share across threads and reused across
/// every MWU call for a solve (§9 "spatial-index ownership").
pub struct WeightedIndex {
    points: Array2<f64>,
    tree: KdTree,
}

impl WeightedIndex {
    /// Build the index. One-shot; `points` is copied in.
    ///
    /// # Errors
    ///
    /// Returns [`SpatialError::EmptyPointSet`] if `points` has zero rows.
    pub fn build(points: ArrayView2<f64>) -> Result<Self, SpatialError> {
        if points.nrows() == 0 {
            return Err(SpatialError::EmptyPointSet);
        }
        let owned = points.to_owned();
        let tree = KdTree::build(&owned);
        log::debug!(
            "built weighted index over {} points in {} dimensions",
            owned.nrows(),
            owned.ncols()
        );
        Ok(WeightedIndex {
            points: owned,
            tree,
        })
    }

    /// Number of indexed points.
    pub fn len(&self) -> usize {
        self.points.nrows()
    }

    pub fn is_empty(&self) -> bool {
        self.points.nrows() == 0
    }

    /// `r_i = sum_{j : ||p_i - p_j|| <= radius} weights[j]` for every indexed
    /// point `i`. Allocates a fresh output vector; prefer [`Self::query_into`]
    /// inside a hot loop (§5: iteration-scoped allocations must be reusable).
    pub fn query(&self, radius: f64, weights: &[f64]) -> Result<Vec<f64>, SpatialError> {
        let mut out = vec![0.0; self.points.nrows()];
        self.query_into(radius, weights, &mut out)?;
        Ok(out)
    }

    /// Same as [`Self::query`] but writes into a caller-owned, already
    /// correctly-sized buffer, avoiding a per-call allocation.
    ///
    /// # Errors
    ///
    /// Returns [`SpatialError::WeightsLenMismatch`] if `weights.len()` does
    /// not equal the indexed point count.
    pub fn query_into(
        &self,
        radius: f64,
        weights: &[f64],
        out: &mut [f64],
    ) -> Result<(), SpatialError> {
        let n = self.points.nrows();
        if weights.len() != n {
            return Err(SpatialError::WeightsLenMismatch {
                got: weights.len(),
                expected: n,
            });
        }
        if out.len() != n {
            return Err(SpatialError::WeightsLenMismatch {
                got: out.len(),
                expected: n,
            });
        }

        let fill_one = |i: usize| -> f64 {
            let mut sum = 0.0;
            self.tree
                .for_each_within(&self.points, self.points.row(i), radius, &mut |j| {
                    sum += weights[j as usize];
                });
            sum
        };

        if n >= PARALLEL_THRESHOLD {
            out.par_iter_mut()
                .enumerate()
                .for_each(|(i, slot)| *slot = fill_one(i));
        } else {
            for (i, slot) in out.iter_mut().enumerate() {
                *slot = fill_one(i);
            }
        }
        Ok(())
    }
}
