//! Command-line interface definitions for the `fairdiv` binary.

use std::path::PathBuf;

use clap::Parser;

/// Fair max-min diversification: select a per-color-quota-respecting subset
/// of points whose pairwise minimum distance is approximately maximized.
#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Path to the input CSV file (one row per point).
    #[arg(short, long)]
    pub input: PathBuf,

    /// Header name of the column holding each point's color label.
    #[arg(long, default_value = "color")]
    pub color_column: String,

    /// Comma-separated list of header names to use as the feature vector.
    /// If omitted, every column other than `--color-column` is used.
    #[arg(long, value_delimiter = ',')]
    pub feature_columns: Option<Vec<String>>,

    /// Z-score normalize every feature column before solving.
    #[arg(long, default_value_t = false)]
    pub normalize: bool,

    /// Explicit per-color quota, e.g. `--quota red=2 --quota blue=3`.
    /// Repeatable; mutually exclusive with `--quota-equal`.
    #[arg(long = "quota", value_parser = parse_quota_pair)]
    pub quotas: Vec<(String, u32)>,

    /// Distribute a total of `k` selections evenly across all colors
    /// observed in the input, ties broken by ascending interned color id.
    /// Mutually exclusive with `--quota`.
    #[arg(long)]
    pub quota_equal: Option<u32>,

    /// MWU additive error, in (0, 1).
    #[arg(long, default_value_t = 0.5, value_parser = parse_unit_interval)]
    pub epsilon_mwu: f64,

    /// Gamma falloff multiplier per rejected attempt, in (0, 1).
    #[arg(long, default_value_t = 0.1, value_parser = parse_unit_interval)]
    pub epsilon_falloff: f64,

    /// Fraction of the theoretical iteration-count bound to run, in (0, 1].
    #[arg(long, default_value_t = 1.0, value_parser = parse_percent_theoretical_limit)]
    pub percent_theoretical_limit: f64,

    /// Seed for the solver's reproducible RNG.
    #[arg(long, default_value_t = 0)]
    pub seed: u64,

    /// Write a JSON summary of the selection to this path.
    #[arg(long)]
    pub dump_json: Option<PathBuf>,
}

fn parse_quota_pair(s: &str) -> Result<(String, u32), String> {
    let (name, count) = s
        .split_once('=')
        .ok_or_else(|| format!("expected NAME=COUNT, got {s:?}"))?;
    let count: u32 = count
        .parse()
        .map_err(|_| format!("invalid quota count: {count:?}"))?;
    if name.is_empty() {
        return Err("quota color name must not be empty".to_string());
    }
    Ok((name.to_string(), count))
}

fn parse_unit_interval(s: &str) -> Result<f64, String> {
    let v: f64 = s.parse().map_err(|_| format!("invalid float: {s}"))?;
    if v > 0.0 && v < 1.0 {
        Ok(v)
    } else {
        Err("value must be strictly between 0 and 1".to_string())
    }
}

fn parse_percent_theoretical_limit(s: &str) -> Result<f64, String> {
    let v: f64 = s.parse().map_err(|_| format!("invalid float: {s}"))?;
    if v > 0.0 && v <= 1.0 {
        Ok(v)
    } else {
        Err("value must be in (0, 1]".to_string())
    }
}
