//! Pair diagnostics: hedge ratios, spreads, half-life, correlation.
//!
//! Everything here is a thin statistical layer over the OLS engine; there is
//! no signal logic (entry/exit thresholds, sizing) in this crate.

use serde::Serialize;

use crate::error::FitError;
use crate::math::ols;

/// Half-lives longer than a trading year are treated as "not mean-reverting
/// in practice".
const MAX_VALID_HALF_LIFE: f64 = 252.0;

/// Minimum observations for a meaningful half-life regression.
const MIN_HALF_LIFE_OBS: usize = 20;

/// OLS hedge ratio for a pair: `a ≈ alpha + beta * b`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct HedgeRatio {
    pub alpha: f64,
    pub beta: f64,
    pub alpha_se: f64,
    pub beta_se: f64,
}

/// Mean-reversion half-life estimate for a spread series.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct HalfLife {
    /// Half-life in observations (trading days for daily data). Zero when
    /// the series shows no mean reversion (`ρ̂ >= 0`).
    pub half_life: f64,
    /// True when `0 < half_life < 252`.
    pub is_valid: bool,
}

/// Fit `a ≈ alpha + beta * b` over the full sample.
pub fn hedge_ratio(a: &[f64], b: &[f64]) -> Result<HedgeRatio, FitError> {
    if a.len() != b.len() {
        return Err(FitError::ShapeMismatch {
            what: "pair series",
            expected: a.len(),
            actual: b.len(),
        });
    }
    let res = ols::fit(a, b, a.len(), 1)?;
    Ok(HedgeRatio {
        alpha: res.coefficients[0],
        beta: res.coefficients[1],
        alpha_se: res.std_errors[0],
        beta_se: res.std_errors[1],
    })
}

/// Trailing-window hedge ratios, one per observation.
///
/// The window is clamped at the start of the series, so early entries use a
/// shorter history. Windows too short or too degenerate to regress fall back
/// to `beta = 1, alpha = 0`, mirroring how a ratio model would treat the
/// pair before enough history accumulates.
pub fn rolling_hedge_ratios(
    a: &[f64],
    b: &[f64],
    window: usize,
) -> Result<Vec<HedgeRatio>, FitError> {
    if a.len() != b.len() {
        return Err(FitError::ShapeMismatch {
            what: "pair series",
            expected: a.len(),
            actual: b.len(),
        });
    }
    let fallback = HedgeRatio {
        alpha: 0.0,
        beta: 1.0,
        alpha_se: f64::INFINITY,
        beta_se: f64::INFINITY,
    };
    let window = window.max(1);

    let mut out = Vec::with_capacity(a.len());
    for i in 0..a.len() {
        let start = (i + 1).saturating_sub(window);
        let wa = &a[start..=i];
        let wb = &b[start..=i];
        out.push(hedge_ratio(wa, wb).unwrap_or(fallback));
    }
    Ok(out)
}

/// Spread series `a_i - (alpha_i + beta_i * b_i)` from per-observation hedge
/// ratios.
pub fn spread_series(a: &[f64], b: &[f64], hedges: &[HedgeRatio]) -> Result<Vec<f64>, FitError> {
    if a.len() != b.len() || a.len() != hedges.len() {
        return Err(FitError::ShapeMismatch {
            what: "spread inputs",
            expected: a.len(),
            actual: b.len().min(hedges.len()),
        });
    }
    Ok(a.iter()
        .zip(b.iter())
        .zip(hedges.iter())
        .map(|((&ai, &bi), h)| ai - (h.alpha + h.beta * bi))
        .collect())
}

/// Mean-reversion half-life from the OLS regression `Δs_t = α + ρ·s_{t-1}`.
///
/// `HL = -ln(2) / ρ̂` when `ρ̂ < 0`. Series shorter than 20 observations, and
/// series where the regression is degenerate (constant spread), report an
/// invalid half-life rather than an error.
pub fn half_life(series: &[f64]) -> Result<HalfLife, FitError> {
    let invalid = HalfLife {
        half_life: 0.0,
        is_valid: false,
    };
    if series.len() < MIN_HALF_LIFE_OBS {
        return Ok(invalid);
    }

    let n = series.len();
    let target: Vec<f64> = series.windows(2).map(|w| w[1] - w[0]).collect();
    let lagged: Vec<f64> = series[..n - 1].to_vec();

    let res = match ols::fit(&target, &lagged, n - 1, 1) {
        Ok(r) => r,
        Err(FitError::SingularMatrix { .. }) => return Ok(invalid),
        Err(e) => return Err(e),
    };

    let rho = res.coefficients[1];
    if rho >= 0.0 {
        return Ok(invalid);
    }
    let hl = -std::f64::consts::LN_2 / rho;
    Ok(HalfLife {
        half_life: hl,
        is_valid: hl > 0.0 && hl < MAX_VALID_HALF_LIFE,
    })
}

/// Pearson correlation of two equal-length series. Returns 0 when either
/// series is degenerate (zero variance).
pub fn correlation(a: &[f64], b: &[f64]) -> Result<f64, FitError> {
    if a.len() != b.len() {
        return Err(FitError::ShapeMismatch {
            what: "pair series",
            expected: a.len(),
            actual: b.len(),
        });
    }
    let n = a.len() as f64;
    let (mut sa, mut sb, mut sab, mut sa2, mut sb2) = (0.0, 0.0, 0.0, 0.0, 0.0);
    for (&x, &y) in a.iter().zip(b.iter()) {
        sa += x;
        sb += y;
        sab += x * y;
        sa2 += x * x;
        sb2 += y * y;
    }
    let numer = n * sab - sa * sb;
    let denom = ((n * sa2 - sa * sa) * (n * sb2 - sb * sb)).sqrt();
    if denom == 0.0 || !denom.is_finite() {
        Ok(0.0)
    } else {
        Ok(numer / denom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOL: f64 = 1e-9;

    #[test]
    fn hedge_ratio_recovers_exact_relationship() {
        let b: Vec<f64> = (0..30).map(|i| 50.0 + i as f64).collect();
        let a: Vec<f64> = b.iter().map(|v| 2.0 + 1.5 * v).collect();
        let h = hedge_ratio(&a, &b).unwrap();
        assert!((h.alpha - 2.0).abs() < TOL);
        assert!((h.beta - 1.5).abs() < TOL);
    }

    #[test]
    fn hedge_ratio_rejects_length_mismatch() {
        let err = hedge_ratio(&[1.0, 2.0], &[1.0]).unwrap_err();
        assert!(matches!(err, FitError::ShapeMismatch { .. }));
    }

    #[test]
    fn rolling_hedge_falls_back_on_degenerate_windows() {
        // Constant B inside the window duplicates the intercept.
        let a = [1.0, 2.0, 3.0, 4.0, 5.0];
        let b = [2.0, 2.0, 2.0, 2.0, 2.0];
        let hedges = rolling_hedge_ratios(&a, &b, 3).unwrap();
        assert_eq!(hedges.len(), 5);
        for h in hedges {
            assert_eq!(h.beta, 1.0);
            assert_eq!(h.alpha, 0.0);
        }
    }

    #[test]
    fn rolling_hedge_converges_on_exact_pair() {
        let b: Vec<f64> = (0..40).map(|i| 10.0 + (i as f64) * 0.5).collect();
        let a: Vec<f64> = b.iter().map(|v| -1.0 + 0.8 * v).collect();
        let hedges = rolling_hedge_ratios(&a, &b, 10).unwrap();
        let last = hedges.last().unwrap();
        assert!((last.beta - 0.8).abs() < TOL);
        assert!((last.alpha + 1.0).abs() < TOL);

        let spreads = spread_series(&a, &b, &hedges).unwrap();
        assert!(spreads.last().unwrap().abs() < TOL);
    }

    #[test]
    fn half_life_of_pure_decay_is_exact() {
        // s_t = 0.9^t gives Δs_t = -0.1 s_{t-1} exactly, so ρ̂ = -0.1 and
        // HL = ln(2) / 0.1.
        let series: Vec<f64> = (0..60).map(|t| 0.9_f64.powi(t)).collect();
        let hl = half_life(&series).unwrap();
        assert!(hl.is_valid);
        let expected = std::f64::consts::LN_2 / 0.1;
        assert!((hl.half_life - expected).abs() < 1e-6, "hl = {}", hl.half_life);
    }

    #[test]
    fn half_life_invalid_for_short_or_trending_series() {
        let short = [1.0, 2.0, 3.0];
        assert!(!half_life(&short).unwrap().is_valid);

        // A steadily growing series has ρ̂ >= 0: no mean reversion.
        let trend: Vec<f64> = (0..50).map(|t| (t * t) as f64).collect();
        let hl = half_life(&trend).unwrap();
        assert!(!hl.is_valid);
        assert_eq!(hl.half_life, 0.0);
    }

    #[test]
    fn half_life_constant_series_is_invalid_not_error() {
        let flat = vec![3.0; 40];
        let hl = half_life(&flat).unwrap();
        assert!(!hl.is_valid);
    }

    #[test]
    fn correlation_bounds_and_degenerate_cases() {
        let a: Vec<f64> = (0..25).map(|i| i as f64).collect();
        let b: Vec<f64> = a.iter().map(|v| 3.0 * v + 1.0).collect();
        let c: Vec<f64> = a.iter().map(|v| -2.0 * v).collect();

        assert!((correlation(&a, &b).unwrap() - 1.0).abs() < TOL);
        assert!((correlation(&a, &c).unwrap() + 1.0).abs() < TOL);

        let flat = vec![5.0; 25];
        assert_eq!(correlation(&a, &flat).unwrap(), 0.0);
    }
}
