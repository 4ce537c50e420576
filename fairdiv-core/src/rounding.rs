//! §4.F / §6 randomized rounding contract: converts a fractional `X` into an
//! integer selection whose per-color counts match `K` in expectation. The
//! paper's full rejection-sampling search is out of scope (§1 "exact
//! optimality"); [`WeightedSampleRounder`] is the concrete implementation
//! supplied here.

use std::collections::HashMap;

use ndarray::{Array1, Array2};
use rand::rngs::StdRng;
use rand::Rng;

use crate::color::ColorId;

/// Given `(radius, fractional X, features, colors, K)`, returns a set of
/// distinct indices with per-color counts matching `K` in expectation and
/// maxmin distance >= radius with high probability (§6).
pub trait Rounder {
    fn round(
        &self,
        radius: f64,
        x: &Array1<f64>,
        features: &Array2<f64>,
        colors: &[ColorId],
        k: &HashMap<ColorId, u32>,
        rng: &mut StdRng,
    ) -> Vec<usize>;
}

/// For each color independently, draws `K(c)` distinct indices from `I_c`
/// without replacement, weighted by `X[i]`, via the Efraimidis-Spirakis
/// weighted reservoir algorithm. Falls back to uniform weights when
/// `sum(X over I_c)` underflows to 0.
pub struct WeightedSampleRounder;

impl Rounder for WeightedSampleRounder {
    fn round(
        &self,
        _radius: f64,
        x: &Array1<f64>,
        _features: &Array2<f64>,
        colors: &[ColorId],
        k: &HashMap<ColorId, u32>,
        rng: &mut StdRng,
    ) -> Vec<usize> {
        let mut by_color: HashMap<ColorId, Vec<usize>> = HashMap::new();
        for (i, &c) in colors.iter().enumerate() {
            by_color.entry(c).or_default().push(i);
        }

        let mut selected = Vec::new();
        for (&color, &quota) in k {
            let Some(indices) = by_color.get(&color) else {
                continue;
            };
            selected.extend(weighted_sample_without_replacement(
                indices,
                x,
                quota as usize,
                rng,
            ));
        }
        selected
    }
}

/// Efraimidis-Spirakis A-ES algorithm: key_i = ln(u_i) / w_i for u_i ~
/// Uniform(0,1); the `count` items with the largest keys are the weighted
/// sample without replacement.
fn weighted_sample_without_replacement(
    indices: &[usize],
    x: &Array1<f64>,
    count: usize,
    rng: &mut StdRng,
) -> Vec<usize> {
    let count = count.min(indices.len());
    if count == 0 {
        return Vec::new();
    }
    let total: f64 = indices.iter().map(|&i| x[i].max(0.0)).sum();
    let uniform_fallback = !(total > 0.0) || !total.is_finite();

    let mut keyed: Vec<(f64, usize)> = indices
        .iter()
        .map(|&i| {
            let weight = if uniform_fallback {
                1.0
            } else {
                x[i].max(f64::MIN_POSITIVE)
            };
            let u: f64 = rng.random_range(f64::MIN_POSITIVE..1.0);
            (u.ln() / weight, i)
        })
        .collect();
    keyed.sort_unstable_by(|a, b| b.0.partial_cmp(&a.0).unwrap_or(std::cmp::Ordering::Equal));
    keyed.into_iter().take(count).map(|(_, i)| i).collect()
}
