//! §4.D the gamma-falloff driver.

use std::time::Instant;

use ndarray::Array2;
use rand::rngs::StdRng;
use rand::SeedableRng;

use fairdiv_spatial::WeightedIndex;

use crate::color::ColorId;
use crate::diversity::maxmin;
use crate::error::CoreError;
use crate::mwu::{EarlyStopCadence, MwuSolver, SolveStatus};
use crate::quota::QuotaMap;
use crate::rounding::Rounder;

/// Tunables for one `run()` call, separated from the per-point data so a
/// caller can sweep ε values across the same input (§8 scenario E6).
#[derive(Debug, Clone, Copy)]
pub struct DriverConfig {
    pub epsilon_mwu: f64,
    pub epsilon_falloff: f64,
    pub percent_theoretical_limit: f64,
    pub cadence: EarlyStopCadence,
    pub seed: u64,
}

impl Default for DriverConfig {
    fn default() -> Self {
        DriverConfig {
            epsilon_mwu: 0.5,
            epsilon_falloff: 0.1,
            percent_theoretical_limit: 1.0,
            cadence: EarlyStopCadence::default(),
            seed: 0,
        }
    }
}

/// §6 driver-entry result: the selected indices, the achieved diversity and
/// the wall-clock time spent, plus the γ the driver certified feasible at.
#[derive(Debug, Clone)]
pub struct DriverResult {
    pub selected: Vec<usize>,
    pub diversity: f64,
    pub elapsed_seconds: f64,
    pub gamma_reached: f64,
}

/// Runs the gamma-falloff loop (§4.D): build the weighted index once, call
/// the MWU solver with a monotonically shrinking γ until feasible, then hand
/// the fractional solution to `rounder`.
pub fn run(
    features: &Array2<f64>,
    colors: &[ColorId],
    color_index_lists: &[Vec<u32>],
    quotas: &QuotaMap,
    gamma_upper: f64,
    config: &DriverConfig,
    rounder: &dyn Rounder,
) -> Result<DriverResult, CoreError> {
    validate_entry(features, gamma_upper, config.epsilon_falloff)?;

    let start = Instant::now();
    let weighted_index = WeightedIndex::build(features.view())?;
    let mut solver = MwuSolver::new(config.seed);

    let mut gamma = gamma_upper;
    let x = loop {
        log::info!("fairdiv: attempting gamma={gamma:.6}");
        match solver.solve(
            gamma,
            features,
            color_index_lists,
            quotas,
            &weighted_index,
            config.epsilon_mwu,
            config.percent_theoretical_limit,
            config.cadence,
        )? {
            SolveStatus::Feasible(x) => {
                log::info!("fairdiv: gamma={gamma:.6} feasible");
                break x;
            }
            SolveStatus::Infeasible => {
                log::debug!("fairdiv: gamma={gamma:.6} infeasible, reducing");
                gamma *= 1.0 - config.epsilon_falloff;
            }
        }
    };

    let k_map = quotas.to_map();
    let mut round_rng = StdRng::seed_from_u64(config.seed ^ 0xA5A5_A5A5_A5A5_A5A5);
    let selected = rounder.round(gamma / 2.0, &x, features, colors, &k_map, &mut round_rng);

    let diversity = maxmin(features, &selected);
    let elapsed_seconds = start.elapsed().as_secs_f64();

    Ok(DriverResult {
        selected,
        diversity,
        elapsed_seconds,
        gamma_reached: gamma,
    })
}

fn validate_entry(
    features: &Array2<f64>,
    gamma_upper: f64,
    epsilon_falloff: f64,
) -> Result<(), CoreError> {
    if features.nrows() == 0 {
        return Err(CoreError::EmptyPointSet);
    }
    for ((i, j), &v) in features.indexed_iter() {
        if !v.is_finite() {
            return Err(CoreError::NonFiniteFeature(i, j));
        }
    }
    if !(gamma_upper > 0.0) {
        return Err(CoreError::NonPositiveGamma(gamma_upper));
    }
    if !(epsilon_falloff > 0.0 && epsilon_falloff < 1.0) {
        return Err(CoreError::FalloffEpsilonOutOfRange(epsilon_falloff));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::{color_index_lists, intern_all, ColorTable};
    use crate::coreset::{Coreset, IdentityCoreset};
    use crate::rounding::WeightedSampleRounder;
    use ndarray::array;

    #[test]
    fn rejects_empty_point_set() {
        let features = Array2::<f64>::zeros((0, 2));
        let result = validate_entry(&features, 1.0, 0.1);
        assert!(matches!(result, Err(CoreError::EmptyPointSet)));
    }

    #[test]
    fn rejects_non_finite_features() {
        let features = array![[0.0, f64::NAN]];
        let result = validate_entry(&features, 1.0, 0.1);
        assert!(matches!(result, Err(CoreError::NonFiniteFeature(0, 1))));
    }

    #[test]
    fn e1_three_points_two_colors() {
        // §8 scenario E1
        let features = array![[0.0, 0.0], [1.0, 0.0], [0.0, 1.0]];
        let labels = vec!["red".to_string(), "blue".to_string(), "blue".to_string()];
        let mut table = ColorTable::new();
        let colors = intern_all(&mut table, &labels);
        let lists = color_index_lists(&colors, table.len());

        let mut k = std::collections::HashMap::new();
        k.insert(table.id_of("red").unwrap(), 1u32);
        k.insert(table.id_of("blue").unwrap(), 1u32);
        let quotas = QuotaMap::explicit(k, &lists, &table, 3).unwrap();

        let coreset = IdentityCoreset::default();
        let gamma_upper = coreset.gamma_upper_bound(&features).max(2.0);

        let config = DriverConfig {
            epsilon_mwu: 0.5,
            epsilon_falloff: 0.1,
            ..DriverConfig::default()
        };
        let rounder = WeightedSampleRounder;
        let result = run(
            &features,
            &colors,
            &lists,
            &quotas,
            gamma_upper,
            &config,
            &rounder,
        )
        .unwrap();

        assert_eq!(result.selected.len(), 2);
        assert!(result.diversity.is_finite());
    }
}
