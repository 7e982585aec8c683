//! Top-level application orchestration.
//!
//! `src/main.rs` is intentionally tiny; this module is the "real main" that:
//! - parses CLI arguments
//! - loads CSV columns
//! - runs the regression engine / stationarity tests
//! - prints reports
//! - writes optional exports

use clap::Parser;

use crate::cli::{AdfArgs, Cli, Command, DemoArgs, FitArgs, PairArgs};
use crate::data::{ar1_series, linear_dataset};
use crate::error::AppError;
use crate::io::ingest::{flatten_features, load_columns};
use crate::math::ols;
use crate::report;
use crate::stats::{adf, pairs};

/// Entry point for the `pstat` binary.
pub fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    match cli.command {
        Command::Fit(args) => handle_fit(args),
        Command::Adf(args) => handle_adf(args),
        Command::Pair(args) => handle_pair(args),
        Command::Demo(args) => handle_demo(args),
    }
}

fn handle_fit(args: FitArgs) -> Result<(), AppError> {
    let mut wanted: Vec<&str> = vec![args.target.as_str()];
    wanted.extend(args.features.iter().map(String::as_str));

    let table = load_columns(&args.csv, &wanted)?;
    print!("{}", report::format_row_errors(&table.row_errors));

    let y = &table.columns[0];
    let x_flat = flatten_features(&table.columns[1..]);
    let result = ols::fit(y, &x_flat, table.n_rows(), args.features.len())?;

    let names = coefficient_names(&args.features);
    println!("{}", report::format_regression(&result, &names));

    if let Some(path) = &args.export {
        crate::io::export::write_result_json(path, &result, &names)?;
        println!("Wrote {}", path.display());
    }
    Ok(())
}

fn handle_adf(args: AdfArgs) -> Result<(), AppError> {
    let table = load_columns(&args.csv, &[args.column.as_str()])?;
    print!("{}", report::format_row_errors(&table.row_errors));

    let result = adf::adf_test(&table.columns[0], args.max_lags)?;
    println!("{}", report::format_adf(&result, &args.column));
    Ok(())
}

fn handle_pair(args: PairArgs) -> Result<(), AppError> {
    let table = load_columns(&args.csv, &[args.col_a.as_str(), args.col_b.as_str()])?;
    print!("{}", report::format_row_errors(&table.row_errors));

    let a = &table.columns[0];
    let b = &table.columns[1];

    let hedge = pairs::hedge_ratio(a, b)?;
    let correlation = pairs::correlation(a, b)?;

    // The spread is built from rolling hedge ratios so early observations do
    // not look ahead at the full-sample fit.
    let rolling = pairs::rolling_hedge_ratios(a, b, args.window)?;
    let spread = pairs::spread_series(a, b, &rolling)?;

    let half_life = pairs::half_life(&spread)?;
    let spread_adf = adf::adf_test(&spread, args.max_lags)?;

    println!(
        "{}",
        report::format_pair_summary(&hedge, correlation, &half_life, &spread_adf, a.len())
    );
    Ok(())
}

fn handle_demo(args: DemoArgs) -> Result<(), AppError> {
    // A two-predictor regression with known coefficients...
    let truth = [2.0, 1.5, -0.75];
    let data = linear_dataset(args.seed, args.sample_count, &truth, args.noise)?;
    let result = ols::fit(&data.y, &data.x_flat, data.n_observations, data.n_predictors)?;

    let feature_names: Vec<String> = (1..=data.n_predictors).map(|i| format!("x{i}")).collect();
    let names = coefficient_names(&feature_names);
    println!("True coefficients: {truth:?}");
    println!("{}", report::format_regression(&result, &names));

    // ...and a mean-reverting spread with a known half-life.
    let phi = 0.9_f64;
    let spread = ar1_series(args.seed, args.sample_count, phi, 1.0)?;
    let half_life = pairs::half_life(&spread)?;
    let adf_result = adf::adf_test(&spread, None)?;

    println!(
        "Theoretical AR(1) half-life: {:.2} observations",
        std::f64::consts::LN_2 / -phi.ln()
    );
    if half_life.is_valid {
        println!("Estimated half-life: {:.2} observations", half_life.half_life);
    } else {
        println!("Estimated half-life: invalid for this draw");
    }
    println!();
    println!("{}", report::format_adf(&adf_result, "synthetic spread"));
    Ok(())
}

fn coefficient_names(features: &[String]) -> Vec<String> {
    let mut names = Vec::with_capacity(features.len() + 1);
    names.push("intercept".to_string());
    names.extend(features.iter().cloned());
    names
}
