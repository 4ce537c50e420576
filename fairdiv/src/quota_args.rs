//! Quota map construction (§4.F, supplemented): turns the CLI's `--quota`
//! or `--quota-equal` flags into a `fairdiv_core::QuotaMap` over interned
//! colors.

use std::collections::HashMap;

use fairdiv_core::{ColorId, ColorTable, QuotaMap};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum QuotaArgError {
    #[error("--quota and --quota-equal are mutually exclusive")]
    BothSpecified,

    #[error("neither --quota nor --quota-equal was given")]
    NeitherSpecified,

    #[error("--quota references unknown color {0:?}")]
    UnknownColor(String),

    #[error(transparent)]
    Core(#[from] fairdiv_core::CoreError),
}

/// Builds a `QuotaMap` from the CLI's explicit `--quota NAME=COUNT` pairs or
/// its `--quota-equal K` shorthand, matching against colors already interned
/// into `table`.
pub fn build_quota_map(
    explicit: &[(String, u32)],
    quota_equal: Option<u32>,
    color_index_lists: &[Vec<u32>],
    table: &ColorTable,
    n: usize,
) -> Result<QuotaMap, QuotaArgError> {
    match (explicit.is_empty(), quota_equal) {
        (false, Some(_)) => Err(QuotaArgError::BothSpecified),
        (true, None) => Err(QuotaArgError::NeitherSpecified),
        (false, None) => {
            let mut quotas: HashMap<ColorId, u32> = HashMap::new();
            for (name, count) in explicit {
                let id = table
                    .id_of(name)
                    .ok_or_else(|| QuotaArgError::UnknownColor(name.clone()))?;
                quotas.insert(id, *count);
            }
            Ok(QuotaMap::explicit(quotas, color_index_lists, table, n)?)
        }
        (true, Some(k)) => Ok(QuotaMap::equal_split(k, color_index_lists, table, n)?),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fairdiv_core::intern_all;

    fn table_and_lists(labels: &[&str]) -> (ColorTable, Vec<ColorId>, Vec<Vec<u32>>) {
        let mut table = ColorTable::new();
        let labels: Vec<String> = labels.iter().map(|s| s.to_string()).collect();
        let colors = intern_all(&mut table, &labels);
        let lists = fairdiv_core::color_index_lists(&colors, table.len());
        (table, colors, lists)
    }

    #[test]
    fn rejects_both_flags_given() {
        let (table, _colors, lists) = table_and_lists(&["red", "blue"]);
        let explicit = vec![("red".to_string(), 1u32)];
        let result = build_quota_map(&explicit, Some(2), &lists, &table, 2);
        assert!(matches!(result, Err(QuotaArgError::BothSpecified)));
    }

    #[test]
    fn rejects_neither_flag_given() {
        let (table, _colors, lists) = table_and_lists(&["red", "blue"]);
        let result = build_quota_map(&[], None, &lists, &table, 2);
        assert!(matches!(result, Err(QuotaArgError::NeitherSpecified)));
    }

    #[test]
    fn rejects_unknown_color_name() {
        let (table, _colors, lists) = table_and_lists(&["red", "blue"]);
        let explicit = vec![("green".to_string(), 1u32)];
        let result = build_quota_map(&explicit, None, &lists, &table, 2);
        assert!(matches!(result, Err(QuotaArgError::UnknownColor(_))));
    }

    #[test]
    fn equal_split_builds_a_quota_map() {
        let (table, _colors, lists) = table_and_lists(&["red", "blue", "blue"]);
        let quotas = build_quota_map(&[], Some(2), &lists, &table, 3).unwrap();
        assert_eq!(quotas.total(), 2);
    }
}
