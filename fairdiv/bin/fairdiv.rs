//! CLI entry point: CSV load, color interning, quota construction, coreset,
//! gamma-falloff driver, diversity, report.

use clap::Parser;

use fairdiv::cli::Args;
use fairdiv::ingest::{normalize_columns, observed_color_order, read_points_csv};
use fairdiv::quota_args::build_quota_map;
use fairdiv::report::SolveReport;
use fairdiv_core::{
    color_index_lists, intern_all, run, ColorTable, Coreset, DriverConfig, IdentityCoreset,
    WeightedSampleRounder,
};

fn main() -> anyhow::Result<()> {
    fairdiv_env::init_logging();
    let args = Args::parse();

    let (mut features, colors_raw) =
        read_points_csv(&args.input, &args.color_column, args.feature_columns.as_deref())?;
    if args.normalize {
        normalize_columns(&mut features);
    }

    log::info!(
        "observed colors (first-seen order): {:?}",
        observed_color_order(&colors_raw)
    );

    let mut table = ColorTable::new();
    let colors = intern_all(&mut table, &colors_raw);
    let n = features.nrows();
    let lists = color_index_lists(&colors, table.len());

    let quotas = build_quota_map(&args.quotas, args.quota_equal, &lists, &table, n)?;

    let coreset = IdentityCoreset::new(args.seed);
    let (core_features, core_colors, orig_index) = coreset.compute(&features, &colors, quotas.total() as usize);
    let gamma_upper = coreset.gamma_upper_bound(&core_features);

    let config = DriverConfig {
        epsilon_mwu: args.epsilon_mwu,
        epsilon_falloff: args.epsilon_falloff,
        percent_theoretical_limit: args.percent_theoretical_limit,
        seed: args.seed,
        ..DriverConfig::default()
    };
    let rounder = WeightedSampleRounder;

    let result = run(
        &core_features,
        &core_colors,
        &lists,
        &quotas,
        gamma_upper,
        &config,
        &rounder,
    )?;

    let selected: Vec<usize> = result.selected.iter().map(|&i| orig_index[i]).collect();

    let report = SolveReport::new(
        selected,
        result.diversity,
        result.elapsed_seconds,
        result.gamma_reached,
        &colors_raw,
    );
    report.print_summary();

    if let Some(path) = &args.dump_json {
        let resolved = fairdiv_env::resolve_output_path(path)?;
        report.write_json(&resolved)?;
        log::info!("wrote json report to {}", resolved.display());
    }

    Ok(())
}
