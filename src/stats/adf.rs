//! Augmented Dickey-Fuller stationarity test.
//!
//! The test regresses the first difference of a series on its lagged level
//! (plus lagged differences and a constant) and asks whether the level
//! coefficient is significantly negative:
//!
//! ```text
//! Δy_t = α + ρ·y_{t-1} + Σ φ_i·Δy_{t-i} + ε_t
//! ```
//!
//! The test statistic is the t-ratio of `ρ̂`. Lag order is chosen by AIC over
//! a candidate grid (Schwert's rule bounds the grid by default); candidates
//! are scored on a common estimation sample so their AICs are comparable, and
//! the winner is refit on its full usable sample.
//!
//! p-values come from a lookup table with linear interpolation. The table is
//! for the constant-only model and is approximate; for trading-pair screens
//! that is enough resolution to rank spreads by mean-reversion strength.

use rayon::prelude::*;
use serde::Serialize;

use crate::error::FitError;
use crate::math::ols;

/// Minimum number of finite observations the test accepts.
const MIN_OBSERVATIONS: usize = 5;

/// Approximate p-values for the constant-only ADF distribution, as
/// `(statistic, p)` knots for linear interpolation.
const P_VALUE_KNOTS: &[(f64, f64)] = &[
    (-4.0, 0.01),
    (-3.5, 0.025),
    (-3.0, 0.05),
    (-2.5, 0.10),
    (-2.0, 0.20),
    (-1.5, 0.50),
    (-1.0, 0.75),
    (0.0, 0.99),
];

/// Critical values for the constant-only model (large-sample approximation).
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CriticalValues {
    #[serde(rename = "1%")]
    pub pct_1: f64,
    #[serde(rename = "5%")]
    pub pct_5: f64,
    #[serde(rename = "10%")]
    pub pct_10: f64,
}

pub const CRITICAL_VALUES: CriticalValues = CriticalValues {
    pct_1: -3.43,
    pct_5: -2.86,
    pct_10: -2.57,
};

/// Outcome of an ADF run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AdfResult {
    /// t-ratio of the lagged-level coefficient.
    pub statistic: f64,
    /// Interpolated p-value (clamped to the table range).
    pub p_value: f64,
    /// Lag order selected by AIC.
    pub optimal_lags: usize,
    /// AIC of the selected regression.
    pub aic: f64,
    pub critical_values: CriticalValues,
    /// Whether the statistic beats the 5% critical value.
    pub is_stationary: bool,
}

/// Run the ADF test on `series`.
///
/// Non-finite observations are dropped before testing (ingest layers upstream
/// can produce gaps). `max_lags` overrides the Schwert-rule default; in both
/// cases the grid is capped so every candidate regression keeps positive
/// degrees of freedom.
pub fn adf_test(series: &[f64], max_lags: Option<usize>) -> Result<AdfResult, FitError> {
    let y: Vec<f64> = series.iter().copied().filter(|v| v.is_finite()).collect();
    let n = y.len();
    if n < MIN_OBSERVATIONS {
        return Err(FitError::InsufficientObservations {
            nobs: n,
            nparams: 2,
        });
    }

    // First differences: d[t] = y[t+1] - y[t].
    let d: Vec<f64> = y.windows(2).map(|w| w[1] - w[0]).collect();

    // Largest lag that still leaves dof > 0 on the common sample:
    // rows = n - 1 - k, params = k + 2, so k <= (n - 4) / 2.
    let cap = n.saturating_sub(4) / 2;
    let max_lag = match max_lags {
        Some(k) => k.min(cap),
        None => schwert_max_lag(n).min(cap),
    };

    // Score every candidate lag on the common sample (rows max_lag..n-1).
    // Each evaluation is an independent pure OLS fit, so the grid runs in
    // parallel; selection below is deterministic.
    let candidates: Vec<(usize, Result<LagFit, FitError>)> = (0..max_lag + 1)
        .into_par_iter()
        .map(|k| (k, estimate_at_lag(&y, &d, k, max_lag)))
        .collect();

    let mut best: Option<(usize, LagFit)> = None;
    let mut first_err: Option<FitError> = None;
    for (k, outcome) in candidates {
        match outcome {
            Ok(fit) => {
                let better = match &best {
                    Some((_, b)) => fit.aic < b.aic,
                    None => true,
                };
                if better {
                    best = Some((k, fit));
                }
            }
            Err(e) => {
                if first_err.is_none() {
                    first_err = Some(e);
                }
            }
        }
    }

    let (optimal_lags, _) = match best {
        Some(b) => b,
        None => {
            return Err(first_err.unwrap_or(FitError::InsufficientObservations {
                nobs: n,
                nparams: 2,
            }));
        }
    };

    // Refit the winner on its full usable sample (rows optimal_lags..n-1).
    let fit = estimate_at_lag(&y, &d, optimal_lags, optimal_lags)?;

    let statistic = fit.t_stat;
    Ok(AdfResult {
        statistic,
        p_value: interpolate_p_value(statistic),
        optimal_lags,
        aic: fit.aic,
        critical_values: CRITICAL_VALUES,
        is_stationary: statistic < CRITICAL_VALUES.pct_5,
    })
}

#[derive(Debug, Clone)]
struct LagFit {
    t_stat: f64,
    aic: f64,
}

/// Fit the ADF regression with `k` lagged differences, using difference rows
/// `start..d.len()` as the estimation sample (`start >= k`).
fn estimate_at_lag(y: &[f64], d: &[f64], k: usize, start: usize) -> Result<LagFit, FitError> {
    debug_assert!(start >= k);
    let rows = d.len().saturating_sub(start);
    let n_predictors = k + 1;

    let mut target = Vec::with_capacity(rows);
    let mut x_flat = Vec::with_capacity(rows * n_predictors);
    for t in start..d.len() {
        target.push(d[t]);
        x_flat.push(y[t]); // lagged level
        for i in 1..=k {
            x_flat.push(d[t - i]);
        }
    }

    let res = ols::fit(&target, &x_flat, rows, n_predictors)?;

    // Intercept is coefficient 0; the lagged level is coefficient 1.
    let t_stat = res.t_ratio(1);
    let n = rows as f64;
    let aic = n * (res.ssr / n).ln() + 2.0 * res.nparams as f64;
    Ok(LagFit { t_stat, aic })
}

/// Schwert's rule of thumb: `floor(12 * (n/100)^(1/4))`.
fn schwert_max_lag(n: usize) -> usize {
    (12.0 * (n as f64 / 100.0).powf(0.25)).floor() as usize
}

/// Linear interpolation over the p-value knots, clamped at both ends.
fn interpolate_p_value(statistic: f64) -> f64 {
    let first = P_VALUE_KNOTS[0];
    let last = P_VALUE_KNOTS[P_VALUE_KNOTS.len() - 1];
    if statistic <= first.0 {
        return first.1;
    }
    if statistic >= last.0 {
        return last.1;
    }
    for pair in P_VALUE_KNOTS.windows(2) {
        let (x1, p1) = pair[0];
        let (x2, p2) = pair[1];
        if statistic >= x1 && statistic <= x2 {
            return p1 + (statistic - x1) * (p2 - p1) / (x2 - x1);
        }
    }
    0.5
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::prelude::*;
    use rand::rngs::StdRng;
    use rand_distr::Normal;

    #[test]
    fn p_value_clamps_at_table_ends() {
        assert_eq!(interpolate_p_value(-7.5), 0.01);
        assert_eq!(interpolate_p_value(1.2), 0.99);
    }

    #[test]
    fn p_value_interpolates_between_knots() {
        // Midway between (-3.5, 0.025) and (-3.0, 0.05).
        let p = interpolate_p_value(-3.25);
        assert!((p - 0.0375).abs() < 1e-12, "got {p}");
    }

    #[test]
    fn rejects_short_series() {
        let err = adf_test(&[1.0, 2.0, 3.0], None).unwrap_err();
        assert!(matches!(err, FitError::InsufficientObservations { .. }));
    }

    #[test]
    fn drops_non_finite_observations() {
        let mut series: Vec<f64> = (0..80).map(|i| (i as f64 * 0.7).sin()).collect();
        series[10] = f64::NAN;
        series[40] = f64::INFINITY;
        let res = adf_test(&series, Some(2)).unwrap();
        assert!(res.statistic.is_finite());
    }

    #[test]
    fn mean_reverting_series_is_stationary() {
        // AR(1) with strong pull to zero: the t-ratio should be deeply
        // negative for a few hundred observations.
        let mut rng = StdRng::seed_from_u64(42);
        let noise = Normal::new(0.0, 1.0).unwrap();
        let mut series = vec![0.0_f64];
        for _ in 1..300 {
            let prev = *series.last().unwrap();
            series.push(0.3 * prev + noise.sample(&mut rng));
        }

        let res = adf_test(&series, None).unwrap();
        assert!(res.statistic < CRITICAL_VALUES.pct_1, "t = {}", res.statistic);
        assert!(res.is_stationary);
        assert!(res.p_value <= 0.05);
    }

    #[test]
    fn random_walk_is_not_stationary() {
        let mut rng = StdRng::seed_from_u64(7);
        let noise = Normal::new(0.0, 1.0).unwrap();
        let mut series = vec![0.0_f64];
        for _ in 1..400 {
            let prev = *series.last().unwrap();
            series.push(prev + noise.sample(&mut rng));
        }

        let res = adf_test(&series, None).unwrap();
        assert!(!res.is_stationary, "t = {}", res.statistic);
    }

    #[test]
    fn identical_inputs_give_identical_results() {
        let series: Vec<f64> = (0..120).map(|i| (i as f64 * 0.37).sin() * 2.0).collect();
        let r1 = adf_test(&series, None).unwrap();
        let r2 = adf_test(&series, None).unwrap();
        assert_eq!(r1, r2);
    }

    #[test]
    fn max_lag_override_is_capped() {
        // Tiny series: the grid must shrink so every candidate keeps dof > 0.
        let series = [1.0, 0.4, 0.9, 0.2, 0.8, 0.3, 0.7, 0.1];
        let res = adf_test(&series, Some(50)).unwrap();
        assert!(res.optimal_lags <= 2);
    }
}
