//! §3 "Quota map": K : C -> positive integer, validated against the
//! color-index lists it will be used against for the rest of a solve.

use std::collections::HashMap;

use crate::color::{ColorId, ColorTable};
use crate::error::CoreError;

/// `mu = k - 1` (§4.C) is used as a divisor throughout the MWU loop, so a
/// quota map is required to carry a total k of at least 2.
const MIN_TOTAL_QUOTA: u32 = 2;

/// `K: ColorId -> u32`, with `k = sum K(c)` precomputed and validated.
#[derive(Debug, Clone)]
pub struct QuotaMap {
    quotas: HashMap<ColorId, u32>,
    total: u32,
}

impl QuotaMap {
    /// Build from explicit per-color counts, validating `K(c) <= |I_c|` for
    /// every c and `2 <= k <= N`.
    pub fn explicit(
        quotas: HashMap<ColorId, u32>,
        color_index_lists: &[Vec<u32>],
        table: &ColorTable,
        n: usize,
    ) -> Result<Self, CoreError> {
        let total: u32 = quotas.values().sum();
        if total < MIN_TOTAL_QUOTA {
            return Err(CoreError::QuotaBelowMinimum);
        }
        if total as usize > n {
            return Err(CoreError::QuotaExceedsTotal(total as usize, n));
        }
        for (&color, &want) in &quotas {
            let available = color_index_lists
                .get(color.0 as usize)
                .map(Vec::len)
                .unwrap_or(0);
            if want as usize > available {
                return Err(CoreError::QuotaExceedsAvailable(
                    table.label_of(color).to_string(),
                    want,
                    available,
                ));
            }
        }
        Ok(QuotaMap { quotas, total })
    }

    /// Distribute `k` as evenly as possible across every color present in
    /// `color_index_lists`, remainder assigned to ascending color ids first,
    /// then validated as in [`Self::explicit`].
    pub fn equal_split(
        k: u32,
        color_index_lists: &[Vec<u32>],
        table: &ColorTable,
        n: usize,
    ) -> Result<Self, CoreError> {
        let n_colors = color_index_lists.len();
        if n_colors == 0 {
            return Err(CoreError::QuotaBelowMinimum);
        }
        let base = k / n_colors as u32;
        let mut remainder = k % n_colors as u32;
        let mut quotas = HashMap::with_capacity(n_colors);
        for c in 0..n_colors {
            let mut q = base;
            if remainder > 0 {
                q += 1;
                remainder -= 1;
            }
            quotas.insert(ColorId(c as u16), q);
        }
        Self::explicit(quotas, color_index_lists, table, n)
    }

    pub fn get(&self, c: ColorId) -> u32 {
        self.quotas.get(&c).copied().unwrap_or(0)
    }

    pub fn total(&self) -> u32 {
        self.total
    }

    pub fn to_map(&self) -> HashMap<ColorId, u32> {
        self.quotas.clone()
    }

    pub fn iter(&self) -> impl Iterator<Item = (ColorId, u32)> + '_ {
        self.quotas.iter().map(|(&c, &q)| (c, q))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table_with(n: usize) -> ColorTable {
        let mut t = ColorTable::new();
        for i in 0..n {
            t.intern(&format!("c{i}"));
        }
        t
    }

    #[test]
    fn explicit_rejects_quota_over_available() {
        let table = table_with(1);
        let lists = vec![vec![0u32, 1]];
        let mut quotas = HashMap::new();
        quotas.insert(ColorId(0), 3);
        let result = QuotaMap::explicit(quotas, &lists, &table, 2);
        assert!(matches!(
            result,
            Err(CoreError::QuotaExceedsAvailable(_, 3, 2))
        ));
    }

    #[test]
    fn explicit_rejects_total_below_two() {
        let table = table_with(1);
        let lists = vec![vec![0u32]];
        let mut quotas = HashMap::new();
        quotas.insert(ColorId(0), 1);
        let result = QuotaMap::explicit(quotas, &lists, &table, 1);
        assert!(matches!(result, Err(CoreError::QuotaBelowMinimum)));
    }

    #[test]
    fn equal_split_distributes_remainder_to_low_ids_first() {
        let table = table_with(3);
        let lists = vec![vec![0u32, 1, 2], vec![3, 4], vec![5, 6, 7]];
        let quotas = QuotaMap::equal_split(5, &lists, &table, 8).unwrap();
        assert_eq!(quotas.total(), 5);
        assert_eq!(quotas.get(ColorId(0)), 2);
        assert_eq!(quotas.get(ColorId(1)), 2);
        assert_eq!(quotas.get(ColorId(2)), 1);
    }
}
