//! Command-line parsing for the pair-statistics toolkit.
//!
//! The goal of this module is to keep **argument parsing** and **command
//! dispatch** separate from the modeling/math code.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(name = "pstat", version, about = "OLS regression and pair-stationarity diagnostics")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Fit an OLS regression from CSV columns and print the coefficient table.
    Fit(FitArgs),
    /// Run an Augmented Dickey-Fuller stationarity test on one CSV column.
    Adf(AdfArgs),
    /// Pair diagnostics: hedge ratio, spread half-life, correlation, spread ADF.
    Pair(PairArgs),
    /// Fit a seeded synthetic dataset (no input files needed).
    Demo(DemoArgs),
}

/// Options for `pstat fit`.
#[derive(Debug, Parser, Clone)]
pub struct FitArgs {
    /// Input CSV with a header row.
    pub csv: PathBuf,

    /// Target (response) column name.
    #[arg(short = 't', long)]
    pub target: String,

    /// Feature column names, comma separated.
    #[arg(short = 'f', long, value_delimiter = ',', required = true)]
    pub features: Vec<String>,

    /// Write the fit result as JSON to this path.
    #[arg(long)]
    pub export: Option<PathBuf>,
}

/// Options for `pstat adf`.
#[derive(Debug, Parser, Clone)]
pub struct AdfArgs {
    /// Input CSV with a header row.
    pub csv: PathBuf,

    /// Series column name.
    #[arg(short = 'c', long)]
    pub column: String,

    /// Maximum lag order to consider (default: Schwert's rule).
    #[arg(long)]
    pub max_lags: Option<usize>,
}

/// Options for `pstat pair`.
#[derive(Debug, Parser, Clone)]
pub struct PairArgs {
    /// Input CSV with a header row.
    pub csv: PathBuf,

    /// Column with the first leg's prices.
    #[arg(long)]
    pub col_a: String,

    /// Column with the second leg's prices.
    #[arg(long)]
    pub col_b: String,

    /// Trailing window (observations) for rolling hedge ratios.
    #[arg(short = 'w', long, default_value_t = 60)]
    pub window: usize,

    /// Maximum ADF lag order for the spread test (default: Schwert's rule).
    #[arg(long)]
    pub max_lags: Option<usize>,
}

/// Options for `pstat demo`.
#[derive(Debug, Parser, Clone)]
pub struct DemoArgs {
    /// Random seed for data generation.
    #[arg(long, default_value_t = 42)]
    pub seed: u64,

    /// Number of synthetic observations.
    #[arg(short = 'n', long, default_value_t = 250)]
    pub sample_count: usize,

    /// Noise standard deviation for the regression dataset.
    #[arg(long, default_value_t = 1.0)]
    pub noise: f64,
}
