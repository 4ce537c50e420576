//! §4.C the multiplicative-weights fractional solver.

use ndarray::{Array1, Array2, Axis};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use fairdiv_spatial::{BallCountIndex, WeightedIndex};

use crate::color::ColorId;
use crate::error::CoreError;
use crate::quota::QuotaMap;

/// Below this, Σh is considered to have underflowed (§7 "Numerical
/// underflow").
const WEIGHT_FLOOR: f64 = 1e-300;

/// §9 "Random number source": both early-stop policies spec.md permits,
/// exposed as a tunable.
#[derive(Debug, Clone, Copy)]
pub enum EarlyStopCadence {
    /// Probe feasibility of X/(t+1) every `period` iterations, starting at
    /// t = 0.
    FixedEvery(u64),
    /// No probing during the first `warmup` iterations; afterwards, probe
    /// at intervals drawn uniformly from `[low, high]` (inclusive).
    StochasticAfterWarmup { warmup: u64, low: u64, high: u64 },
}

impl Default for EarlyStopCadence {
    fn default() -> Self {
        EarlyStopCadence::FixedEvery(50)
    }
}

impl EarlyStopCadence {
    fn initial_wait(&self, rng: &mut StdRng) -> u64 {
        match *self {
            EarlyStopCadence::FixedEvery(_) => 0,
            EarlyStopCadence::StochasticAfterWarmup { low, high, .. } => {
                rng.random_range(low..=high)
            }
        }
    }

    fn should_check(&self, t: u64, wait: &mut u64, rng: &mut StdRng) -> bool {
        match *self {
            EarlyStopCadence::FixedEvery(period) => period > 0 && t % period == 0,
            EarlyStopCadence::StochasticAfterWarmup { warmup, low, high } => {
                if t <= warmup {
                    false
                } else if *wait == 0 {
                    *wait = rng.random_range(low..=high);
                    true
                } else {
                    *wait -= 1;
                    false
                }
            }
        }
    }
}

/// Outcome of a §4.C solve attempt at a fixed γ.
#[derive(Debug, Clone)]
pub enum SolveStatus {
    /// The fractional solution `X / iterations_executed`.
    Feasible(Array1<f64>),
    /// No γ-feasible fractional solution exists; the driver should reduce γ.
    Infeasible,
}

/// Owns the seedable RNG backing the stochastic early-stop cadence (§9), so
/// repeated solves are reproducible.
pub struct MwuSolver {
    rng: StdRng,
}

impl MwuSolver {
    pub fn new(seed: u64) -> Self {
        MwuSolver {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn from_entropy() -> Self {
        MwuSolver {
            rng: StdRng::from_rng(&mut rand::rng()),
        }
    }

    /// Run the MWU loop at a fixed `gamma`. `weighted_index` is built once by
    /// the driver over `features` and borrowed here (§9 "Spatial-index
    /// ownership"); it must not be rebuilt per γ.
    #[allow(clippy::too_many_arguments)]
    pub fn solve(
        &mut self,
        gamma: f64,
        features: &Array2<f64>,
        color_index_lists: &[Vec<u32>],
        quotas: &QuotaMap,
        weighted_index: &WeightedIndex,
        epsilon: f64,
        percent_theoretical_limit: f64,
        cadence: EarlyStopCadence,
    ) -> Result<SolveStatus, CoreError> {
        if !(epsilon > 0.0 && epsilon < 1.0) {
            return Err(CoreError::EpsilonOutOfRange(epsilon));
        }

        let n = weighted_index.len();
        let k = quotas.total() as usize;
        let mu = (k - 1) as f64;
        let eps_scaled = epsilon / (1.0 + epsilon / 4.0);
        let t_limit = (((8.0 * mu) / (eps_scaled * eps_scaled)) * (n as f64).ln()).ceil()
            * percent_theoretical_limit;
        let t_limit = (t_limit.max(1.0)) as u64;
        let radius = gamma / 2.0;

        let mut h = vec![1.0f64 / n as f64; n];
        let mut x = vec![0.0f64; n];
        let mut w_sum = vec![0.0f64; n];
        let mut check_weights = vec![0.0f64; n];
        let mut check_out = vec![0.0f64; n];

        let mut wait = cadence.initial_wait(&mut self.rng);
        let mut last_t = 0u64;

        for t in 0..t_limit {
            last_t = t;
            weighted_index.query_into(radius, &h, &mut w_sum)?;

            let mut round_centers: Vec<usize> = Vec::with_capacity(k);
            let mut w = 0.0f64;
            for (color_idx, indices) in color_index_lists.iter().enumerate() {
                let quota = quotas.get(ColorId(color_idx as u16)) as usize;
                if quota == 0 || indices.is_empty() {
                    continue;
                }
                for i in smallest_k_by_index(indices, &w_sum, quota) {
                    x[i as usize] += 1.0;
                    w += w_sum[i as usize];
                    round_centers.push(i as usize);
                }
            }

            if w >= 1.0 {
                return Ok(SolveStatus::Infeasible);
            }

            let centers = features.select(Axis(0), &round_centers);
            let ball_count = BallCountIndex::build(centers.view());
            let counts = ball_count.count(features.view(), radius)?;

            for i in 0..n {
                let m_i = (1.0 - counts[i] as f64) / mu;
                h[i] *= 1.0 - (eps_scaled / 4.0) * m_i;
            }
            let sum: f64 = h.iter().sum();
            if sum < WEIGHT_FLOOR {
                return Err(CoreError::WeightUnderflow);
            }
            for hi in h.iter_mut() {
                *hi /= sum;
            }

            if cadence.should_check(t, &mut wait, &mut self.rng) {
                let denom = (t + 1) as f64;
                for i in 0..n {
                    check_weights[i] = x[i] / denom;
                }
                weighted_index.query_into(radius, &check_weights, &mut check_out)?;
                if check_out.iter().all(|&v| v <= 1.0 + epsilon) {
                    break;
                }
            }
        }

        let denom = (last_t + 1) as f64;
        let x_final: Vec<f64> = x.iter().map(|&xi| xi / denom).collect();
        Ok(SolveStatus::Feasible(Array1::from(x_final)))
    }
}

/// The `k` indices (from `indices`) with the smallest `values`, ties broken
/// by ascending index (§9 "Per-color partial sort"). Unordered within the
/// result.
fn smallest_k_by_index(indices: &[u32], values: &[f64], k: usize) -> Vec<u32> {
    let mut augmented: Vec<(f64, u32)> = indices.iter().map(|&i| (values[i as usize], i)).collect();
    let k = k.min(augmented.len());
    if k == 0 {
        return Vec::new();
    }
    augmented.select_nth_unstable_by(k - 1, |a, b| {
        a.0.partial_cmp(&b.0)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then(a.1.cmp(&b.1))
    });
    augmented[..k].iter().map(|&(_, i)| i).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn smallest_k_ties_broken_by_ascending_index() {
        let indices = vec![5, 2, 8, 1];
        let values = vec![0.0, 1.0, 1.0, 1.0, 1.0, 1.0, 1.0, 1.0, 1.0];
        // all candidates are tied at value 1.0 except index 1 -> value 1.0 too;
        // make index 1 distinctly smaller to test ordinary selection first.
        let mut values = values;
        values[1] = 0.1;
        let selected = smallest_k_by_index(&indices, &values, 2);
        assert_eq!(selected.len(), 2);
        assert!(selected.contains(&1));
    }

    #[test]
    fn smallest_k_breaks_exact_ties_by_index() {
        let indices = vec![5, 2, 8, 1];
        let values = vec![1.0; 9];
        let selected = smallest_k_by_index(&indices, &values, 2);
        let mut sorted = selected.clone();
        sorted.sort_unstable();
        assert_eq!(sorted, vec![1, 2]);
    }

    #[test]
    fn smallest_k_caps_at_available_count() {
        let indices = vec![0, 1];
        let values = vec![3.0, 1.0];
        let selected = smallest_k_by_index(&indices, &values, 5);
        let mut sorted = selected.clone();
        sorted.sort_unstable();
        assert_eq!(sorted, vec![0, 1]);
    }
}
