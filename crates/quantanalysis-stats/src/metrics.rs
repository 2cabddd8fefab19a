//! Pure metric kernels over periodic return slices.
//!
//! Every function here is a total computation: inputs that make a formula
//! undefined (too few observations, a zero denominator) produce a NaN or
//! signed-infinity sentinel instead of an error. [`ratio_or_sentinel`]
//! centralizes the division rule so all ratios degrade the same way.
//!
//! Annualization follows the usual conventions: means scale by the number
//! of periods per year, standard deviations by its square root. The annual
//! risk-free rate is deannualized arithmetically (`rf / periods_per_year`).

/// Divide, substituting a sentinel when the denominator is zero.
///
/// A positive numerator over zero yields `+∞`, a negative one `-∞`, and
/// `0/0` yields NaN. A NaN denominator propagates NaN.
pub fn ratio_or_sentinel(numerator: f64, denominator: f64) -> f64 {
    if denominator == 0.0 {
        if numerator > 0.0 {
            f64::INFINITY
        } else if numerator < 0.0 {
            f64::NEG_INFINITY
        } else {
            f64::NAN
        }
    } else {
        numerator / denominator
    }
}

/// Arithmetic mean. NaN for an empty slice.
pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return f64::NAN;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Sample variance (ddof = 1). NaN below two observations.
pub fn variance(values: &[f64]) -> f64 {
    let n = values.len();
    if n < 2 {
        return f64::NAN;
    }
    let m = mean(values);
    values.iter().map(|v| (v - m) * (v - m)).sum::<f64>() / (n - 1) as f64
}

/// Sample standard deviation (ddof = 1). NaN below two observations.
pub fn std_dev(values: &[f64]) -> f64 {
    variance(values).sqrt()
}

/// Sample covariance (ddof = 1) of two equal-length slices.
pub fn covariance(a: &[f64], b: &[f64]) -> f64 {
    let n = a.len().min(b.len());
    if n < 2 {
        return f64::NAN;
    }
    let (ma, mb) = (mean(&a[..n]), mean(&b[..n]));
    a.iter()
        .zip(b)
        .map(|(x, y)| (x - ma) * (y - mb))
        .sum::<f64>()
        / (n - 1) as f64
}

/// Cumulative compounded return, `prod(1 + r) - 1`.
pub fn compounded_return(values: &[f64]) -> f64 {
    values.iter().fold(1.0, |acc, r| acc * (1.0 + r)) - 1.0
}

/// Total return over the period: geometric when `compounded`, the plain
/// sum of periodic returns otherwise.
pub fn total_return(values: &[f64], compounded: bool) -> f64 {
    if compounded {
        compounded_return(values)
    } else {
        values.iter().sum()
    }
}

/// Compound annual growth rate.
///
/// With `compounded` the cumulative growth factor is raised to
/// `periods_per_year / n`; without it the mean periodic return is scaled
/// arithmetically. A series of all-zero returns yields exactly 0 in both
/// modes.
pub fn cagr(values: &[f64], periods_per_year: u32, compounded: bool) -> f64 {
    if values.is_empty() {
        return f64::NAN;
    }
    if compounded {
        let growth = 1.0 + compounded_return(values);
        growth.powf(f64::from(periods_per_year) / values.len() as f64) - 1.0
    } else {
        mean(values) * f64::from(periods_per_year)
    }
}

/// Annualized volatility, sample std × √periods.
pub fn annualized_volatility(values: &[f64], periods_per_year: u32) -> f64 {
    std_dev(values) * f64::from(periods_per_year).sqrt()
}

/// Drawdown series: cumulative growth over its running peak, minus one.
///
/// Every element is ≤ 0; a fresh peak reads exactly 0.
pub fn drawdown_series(values: &[f64]) -> Vec<f64> {
    let mut cum = 1.0_f64;
    let mut peak = 1.0_f64;
    values
        .iter()
        .map(|r| {
            cum *= 1.0 + r;
            peak = peak.max(cum);
            cum / peak - 1.0
        })
        .collect()
}

/// Maximum drawdown, the minimum of the drawdown series. 0 for an empty
/// or monotonically rising series.
pub fn max_drawdown(values: &[f64]) -> f64 {
    drawdown_series(values)
        .into_iter()
        .fold(0.0_f64, f64::min)
}

/// Ulcer Index: root-mean-square of drawdown depths. Always ≥ 0.
pub fn ulcer_index(values: &[f64]) -> f64 {
    let dd = drawdown_series(values);
    if dd.is_empty() {
        return f64::NAN;
    }
    (dd.iter().map(|d| d * d).sum::<f64>() / dd.len() as f64).sqrt()
}

/// Empirical quantile with linear interpolation between order statistics.
///
/// `q` is clamped to `[0, 1]`. NaN for an empty slice.
pub fn quantile(values: &[f64], q: f64) -> f64 {
    if values.is_empty() {
        return f64::NAN;
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));

    let q = q.clamp(0.0, 1.0);
    let position = q * (sorted.len() - 1) as f64;
    let lower = position.floor() as usize;
    let upper = position.ceil() as usize;
    if lower == upper {
        sorted[lower]
    } else {
        let weight = position - lower as f64;
        sorted[lower] * (1.0 - weight) + sorted[upper] * weight
    }
}

/// Value-at-Risk at the given confidence level, as the empirical quantile
/// of periodic returns (e.g. confidence 0.95 → the 5% quantile).
pub fn value_at_risk(values: &[f64], confidence: f64) -> f64 {
    quantile(values, 1.0 - confidence)
}

/// Conditional Value-at-Risk: mean of the returns at or below the VaR
/// threshold. NaN when the tail is empty.
pub fn conditional_value_at_risk(values: &[f64], confidence: f64) -> f64 {
    let threshold = value_at_risk(values, confidence);
    if threshold.is_nan() {
        return f64::NAN;
    }
    let tail: Vec<f64> = values.iter().copied().filter(|r| *r <= threshold).collect();
    mean(&tail)
}

/// Annualized Sharpe ratio: mean excess return over its standard
/// deviation, scaled by √periods. Zero volatility yields the signed
/// infinity sentinel.
pub fn sharpe(values: &[f64], risk_free_rate: f64, periods_per_year: u32) -> f64 {
    let rf_per_period = risk_free_rate / f64::from(periods_per_year);
    let excess: Vec<f64> = values.iter().map(|r| r - rf_per_period).collect();
    ratio_or_sentinel(mean(&excess), std_dev(&excess)) * f64::from(periods_per_year).sqrt()
}

/// Annualized Sortino ratio: mean excess return over the downside
/// deviation (RMS of negative excess returns).
pub fn sortino(values: &[f64], risk_free_rate: f64, periods_per_year: u32) -> f64 {
    if values.is_empty() {
        return f64::NAN;
    }
    let rf_per_period = risk_free_rate / f64::from(periods_per_year);
    let excess: Vec<f64> = values.iter().map(|r| r - rf_per_period).collect();
    let downside = (excess
        .iter()
        .map(|r| r.min(0.0).powi(2))
        .sum::<f64>()
        / excess.len() as f64)
        .sqrt();
    ratio_or_sentinel(mean(&excess), downside) * f64::from(periods_per_year).sqrt()
}

/// Calmar ratio: CAGR over the magnitude of the maximum drawdown.
pub fn calmar(values: &[f64], periods_per_year: u32, compounded: bool) -> f64 {
    ratio_or_sentinel(
        cagr(values, periods_per_year, compounded),
        max_drawdown(values).abs(),
    )
}

/// Omega ratio at the per-period risk-free threshold: sum of gains above
/// the threshold over sum of losses below it.
pub fn omega(values: &[f64], risk_free_rate: f64, periods_per_year: u32) -> f64 {
    let threshold = risk_free_rate / f64::from(periods_per_year);
    let gains: f64 = values.iter().map(|r| (r - threshold).max(0.0)).sum();
    let losses: f64 = values.iter().map(|r| (threshold - r).max(0.0)).sum();
    ratio_or_sentinel(gains, losses)
}

/// Adjusted Fisher-Pearson sample skewness. NaN below three observations
/// or at zero variance.
pub fn skewness(values: &[f64]) -> f64 {
    let n = values.len();
    if n < 3 {
        return f64::NAN;
    }
    let m = mean(values);
    let nf = n as f64;
    let m2 = values.iter().map(|v| (v - m).powi(2)).sum::<f64>() / nf;
    let m3 = values.iter().map(|v| (v - m).powi(3)).sum::<f64>() / nf;
    if m2 == 0.0 {
        return f64::NAN;
    }
    (nf * (nf - 1.0)).sqrt() / (nf - 2.0) * m3 / m2.powf(1.5)
}

/// Sample excess kurtosis (the normal distribution reads 0). NaN below
/// four observations or at zero variance.
pub fn kurtosis(values: &[f64]) -> f64 {
    let n = values.len();
    if n < 4 {
        return f64::NAN;
    }
    let m = mean(values);
    let s = std_dev(values);
    if s == 0.0 {
        return f64::NAN;
    }
    let nf = n as f64;
    let fourth: f64 = values.iter().map(|v| ((v - m) / s).powi(4)).sum();
    nf * (nf + 1.0) / ((nf - 1.0) * (nf - 2.0) * (nf - 3.0)) * fourth
        - 3.0 * (nf - 1.0).powi(2) / ((nf - 2.0) * (nf - 3.0))
}

/// Beta: covariance of returns with the benchmark over the benchmark
/// variance, computed on an already-aligned window.
pub fn beta(returns: &[f64], benchmark: &[f64]) -> f64 {
    ratio_or_sentinel(covariance(returns, benchmark), variance(benchmark))
}

/// Annualized alpha: per-period excess return of the portfolio beyond
/// what beta explains, scaled by the number of periods per year.
pub fn alpha(
    returns: &[f64],
    benchmark: &[f64],
    risk_free_rate: f64,
    periods_per_year: u32,
) -> f64 {
    let rf_per_period = risk_free_rate / f64::from(periods_per_year);
    let b = beta(returns, benchmark);
    ((mean(returns) - rf_per_period) - b * (mean(benchmark) - rf_per_period))
        * f64::from(periods_per_year)
}

/// Annualized information ratio: mean active return over the tracking
/// deviation, scaled by √periods.
pub fn information_ratio(returns: &[f64], benchmark: &[f64], periods_per_year: u32) -> f64 {
    let active: Vec<f64> = returns.iter().zip(benchmark).map(|(r, b)| r - b).collect();
    ratio_or_sentinel(mean(&active), std_dev(&active)) * f64::from(periods_per_year).sqrt()
}

/// Annualized tracking error: std of active returns × √periods.
pub fn tracking_error(returns: &[f64], benchmark: &[f64], periods_per_year: u32) -> f64 {
    let active: Vec<f64> = returns.iter().zip(benchmark).map(|(r, b)| r - b).collect();
    std_dev(&active) * f64::from(periods_per_year).sqrt()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use rstest::rstest;

    const SAMPLE: [f64; 8] = [0.01, -0.02, 0.015, 0.003, -0.007, 0.02, -0.012, 0.005];

    #[rstest]
    #[case(true)]
    #[case(false)]
    fn cagr_of_flat_series_is_zero(#[case] compounded: bool) {
        let zeros = vec![0.0; 100];
        assert_eq!(cagr(&zeros, 252, compounded), 0.0);
    }

    #[test]
    fn cagr_matches_geometric_compounding() {
        let returns = vec![0.001; 252];
        let expected = 1.001_f64.powi(252) - 1.0;
        assert_relative_eq!(cagr(&returns, 252, true), expected, epsilon = 1e-12);
    }

    #[test]
    fn max_drawdown_is_never_positive() {
        assert!(max_drawdown(&SAMPLE) <= 0.0);
        assert_eq!(max_drawdown(&[0.01, 0.02, 0.03]), 0.0);
    }

    #[test]
    fn max_drawdown_of_known_path() {
        // 1.0 -> 1.1 -> 0.88 -> 0.968: trough is 0.88 against peak 1.1.
        let dd = max_drawdown(&[0.1, -0.2, 0.1]);
        assert_relative_eq!(dd, -0.2, epsilon = 1e-12);
    }

    #[test]
    fn ulcer_index_is_never_negative() {
        assert!(ulcer_index(&SAMPLE) >= 0.0);
        assert_eq!(ulcer_index(&[0.01, 0.02]), 0.0);
    }

    #[test]
    fn sharpe_is_scale_invariant() {
        let scaled: Vec<f64> = SAMPLE.iter().map(|r| r * 3.5).collect();
        assert_relative_eq!(
            sharpe(&SAMPLE, 0.0, 252),
            sharpe(&scaled, 0.0, 252),
            epsilon = 1e-12
        );
    }

    #[test]
    fn sharpe_of_constant_returns_is_positive_infinity() {
        let gains = vec![0.001; 252];
        let losses = vec![-0.001; 252];
        assert_eq!(sharpe(&gains, 0.0, 252), f64::INFINITY);
        assert_eq!(sharpe(&losses, 0.0, 252), f64::NEG_INFINITY);
    }

    #[rstest]
    #[case(1.0, 0.0, f64::INFINITY)]
    #[case(-1.0, 0.0, f64::NEG_INFINITY)]
    #[case(6.0, 3.0, 2.0)]
    fn ratio_sentinels(#[case] num: f64, #[case] den: f64, #[case] expected: f64) {
        assert_eq!(ratio_or_sentinel(num, den), expected);
    }

    #[test]
    fn ratio_zero_over_zero_is_nan() {
        assert!(ratio_or_sentinel(0.0, 0.0).is_nan());
    }

    #[test]
    fn quantile_interpolates_linearly() {
        let values = [1.0, 2.0, 3.0, 4.0];
        assert_relative_eq!(quantile(&values, 0.5), 2.5, epsilon = 1e-12);
        assert_relative_eq!(quantile(&values, 0.0), 1.0, epsilon = 1e-12);
        assert_relative_eq!(quantile(&values, 1.0), 4.0, epsilon = 1e-12);
    }

    #[test]
    fn cvar_averages_the_tail() {
        let values = [-0.05, -0.04, -0.01, 0.0, 0.01, 0.02, 0.03, 0.04, 0.05, 0.06];
        let var = value_at_risk(&values, 0.95);
        let cvar = conditional_value_at_risk(&values, 0.95);
        assert!(cvar <= var);
    }

    #[test]
    fn omega_with_no_losses_is_positive_infinity() {
        assert_eq!(omega(&[0.01, 0.02, 0.03], 0.0, 252), f64::INFINITY);
    }

    #[test]
    fn skewness_of_symmetric_series_is_zero() {
        let symmetric = [-0.02, -0.01, 0.0, 0.01, 0.02];
        assert_relative_eq!(skewness(&symmetric), 0.0, epsilon = 1e-12);
    }

    #[test]
    fn skewness_of_flat_series_is_nan() {
        assert!(skewness(&[0.01, 0.01, 0.01, 0.01]).is_nan());
    }

    #[test]
    fn beta_of_identical_series_is_one() {
        assert_relative_eq!(beta(&SAMPLE, &SAMPLE), 1.0, epsilon = 1e-12);
    }

    #[test]
    fn beta_scales_with_leverage() {
        let leveraged: Vec<f64> = SAMPLE.iter().map(|r| r * 2.0).collect();
        assert_relative_eq!(beta(&leveraged, &SAMPLE), 2.0, epsilon = 1e-12);
    }

    #[test]
    fn tracking_error_of_identical_series_is_zero() {
        assert_relative_eq!(tracking_error(&SAMPLE, &SAMPLE, 252), 0.0, epsilon = 1e-12);
    }

    #[test]
    fn information_ratio_of_identical_series_is_nan() {
        // Zero active mean over zero active deviation.
        assert!(information_ratio(&SAMPLE, &SAMPLE, 252).is_nan());
    }

    #[test]
    fn variance_below_two_observations_is_nan() {
        assert!(variance(&[0.01]).is_nan());
        assert!(std_dev(&[]).is_nan());
    }
}
