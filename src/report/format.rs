//! Plain-text report formatting.
//!
//! We keep formatting code in one place so:
//! - the math/stats code stays clean and testable
//! - output changes are localized (important for future snapshot tests)

use crate::io::ingest::RowError;
use crate::math::RegressionResult;
use crate::stats::adf::AdfResult;
use crate::stats::pairs::{HalfLife, HedgeRatio};

/// Format a regression fit as a coefficient table plus residual diagnostics.
///
/// `names` must be index-aligned with the result vectors (intercept first).
pub fn format_regression(result: &RegressionResult, names: &[String]) -> String {
    let mut out = String::new();

    out.push_str("=== OLS fit ===\n");
    out.push_str(&format!(
        "n={} | params={} | dof={}\n\n",
        result.nobs,
        result.nparams,
        result.dof()
    ));

    let name_width = names.iter().map(String::len).max().unwrap_or(9).max(9);
    out.push_str(&format!(
        "{:<name_width$}  {:>14}  {:>14}  {:>10}\n",
        "term", "coefficient", "std_error", "t"
    ));
    for (j, name) in names.iter().enumerate() {
        out.push_str(&format!(
            "{:<name_width$}  {:>14.6}  {:>14.6}  {:>10.3}\n",
            name,
            result.coefficients[j],
            result.std_errors[j],
            result.t_ratio(j)
        ));
    }

    out.push_str(&format!(
        "\nSSR={:.6} | residual variance={:.6}\n",
        result.ssr,
        result.residual_variance()
    ));
    out
}

/// Format an ADF test outcome.
pub fn format_adf(result: &AdfResult, label: &str) -> String {
    let mut out = String::new();
    out.push_str(&format!("=== ADF test ({label}) ===\n"));
    out.push_str(&format!(
        "statistic={:.4} | p-value={:.4} | lags={} | AIC={:.3}\n",
        result.statistic, result.p_value, result.optimal_lags, result.aic
    ));
    out.push_str(&format!(
        "critical values: 1%={:.2} 5%={:.2} 10%={:.2}\n",
        result.critical_values.pct_1, result.critical_values.pct_5, result.critical_values.pct_10
    ));
    out.push_str(if result.is_stationary {
        "verdict: stationary at the 5% level\n"
    } else {
        "verdict: cannot reject a unit root at the 5% level\n"
    });
    out
}

/// Format the pair-diagnostics summary.
pub fn format_pair_summary(
    hedge: &HedgeRatio,
    correlation: f64,
    half_life: &HalfLife,
    spread_adf: &AdfResult,
    n_obs: usize,
) -> String {
    let mut out = String::new();
    out.push_str("=== Pair diagnostics ===\n");
    out.push_str(&format!("observations: {n_obs}\n"));
    out.push_str(&format!(
        "hedge ratio: alpha={:.6} (se {:.6}) | beta={:.6} (se {:.6})\n",
        hedge.alpha, hedge.alpha_se, hedge.beta, hedge.beta_se
    ));
    out.push_str(&format!("correlation: {correlation:.4}\n"));
    if half_life.is_valid {
        out.push_str(&format!(
            "spread half-life: {:.2} observations\n",
            half_life.half_life
        ));
    } else {
        out.push_str("spread half-life: not mean-reverting within a trading year\n");
    }
    out.push('\n');
    out.push_str(&format_adf(spread_adf, "spread"));
    out
}

/// Format skipped-row diagnostics from ingest (empty string when clean).
pub fn format_row_errors(errors: &[RowError]) -> String {
    if errors.is_empty() {
        return String::new();
    }
    let mut out = String::new();
    out.push_str(&format!("Skipped {} row(s):\n", errors.len()));
    for e in errors.iter().take(10) {
        out.push_str(&format!("  line {}: {}\n", e.line, e.message));
    }
    if errors.len() > 10 {
        out.push_str(&format!("  ... and {} more\n", errors.len() - 10));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::ols;

    #[test]
    fn regression_report_names_every_term() {
        let x = [1.0, 2.0, 3.0, 4.0, 5.0];
        let y = [2.0, 4.0, 5.0, 4.0, 5.0];
        let res = ols::fit(&y, &x, 5, 1).unwrap();
        let names = vec!["intercept".to_string(), "x".to_string()];
        let report = format_regression(&res, &names);
        assert!(report.contains("intercept"));
        assert!(report.contains("SSR=2.4"));
    }

    #[test]
    fn row_error_report_truncates() {
        let errors: Vec<RowError> = (0..15)
            .map(|i| RowError {
                line: i + 2,
                message: "bad".to_string(),
            })
            .collect();
        let report = format_row_errors(&errors);
        assert!(report.contains("Skipped 15 row(s)"));
        assert!(report.contains("and 5 more"));
    }
}
