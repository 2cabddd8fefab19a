//! Metrics aggregation.
//!
//! [`analyze`] orchestrates the kernels in [`crate::metrics`] into a
//! [`MetricsReport`] with four fixed categories: return, risk, performance,
//! and (benchmark-relative) relative metrics. The relative category is
//! populated exactly when a benchmark with at least one shared date was
//! supplied; its presence is part of the public contract.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::metrics;
use crate::series::ReturnSeries;

/// Session-wide analysis defaults, immutable after construction.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AnalysisConfig {
    /// Annualized risk-free rate (e.g. `0.02` for 2%).
    pub risk_free_rate: f64,

    /// Observation periods per year (252 for daily trading data, 365 for
    /// calendar-daily, 12 for monthly).
    pub periods_per_year: u32,

    /// Whether cumulative figures compound geometrically. When false,
    /// total return and CAGR scale arithmetically.
    pub compounded: bool,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            risk_free_rate: 0.0,
            periods_per_year: 252,
            compounded: true,
        }
    }
}

/// Errors for inputs that carry too little data to analyze.
///
/// Numeric degeneracies (zero volatility, short tails) are *not* errors;
/// they surface as NaN/±∞ sentinels inside the report.
#[derive(Debug, Error)]
pub enum InsufficientDataError {
    /// The returns series holds no observations.
    #[error("returns series has no observations")]
    EmptyReturns,

    /// A benchmark was supplied but shares no dates with the returns.
    #[error("benchmark shares no dates with the returns series")]
    DisjointBenchmark,
}

/// Distribution and growth statistics of the return stream itself.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ReturnMetrics {
    /// Cumulative return over the full period.
    pub total_return: f64,

    /// Compound annual growth rate.
    pub cagr: f64,

    /// Mean periodic return.
    pub mean_return: f64,

    /// Adjusted sample skewness of periodic returns.
    pub skewness: f64,

    /// Sample excess kurtosis of periodic returns.
    pub kurtosis: f64,
}

/// Dispersion and loss statistics.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RiskMetrics {
    /// Annualized volatility (sample std × √periods).
    pub volatility: f64,

    /// Maximum peak-to-trough drawdown, ≤ 0.
    pub max_drawdown: f64,

    /// Empirical 95% Value-at-Risk (5% quantile of periodic returns).
    pub var_95: f64,

    /// Empirical 99% Value-at-Risk (1% quantile of periodic returns).
    pub var_99: f64,

    /// Mean return at or below the 95% VaR threshold.
    pub cvar_95: f64,

    /// Mean return at or below the 99% VaR threshold.
    pub cvar_99: f64,

    /// Root-mean-square drawdown depth, ≥ 0.
    pub ulcer_index: f64,
}

/// Risk-adjusted performance ratios.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PerformanceMetrics {
    /// Annualized Sharpe ratio.
    pub sharpe: f64,

    /// Annualized Sortino ratio (downside deviation denominator).
    pub sortino: f64,

    /// Calmar ratio, CAGR over |max drawdown|.
    pub calmar: f64,

    /// Omega ratio at the per-period risk-free threshold.
    pub omega: f64,
}

/// Benchmark-relative metrics, computed over the aligned window.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RelativeMetrics {
    /// Market sensitivity: cov(returns, benchmark) / var(benchmark).
    pub beta: f64,

    /// Annualized excess return beyond what beta explains.
    pub alpha: f64,

    /// Annualized mean active return over tracking deviation.
    pub information_ratio: f64,

    /// Annualized standard deviation of active returns.
    pub tracking_error: f64,
}

/// The full four-category analysis result.
///
/// `relative_metrics` is `Some` exactly when a benchmark overlapping the
/// returns index was supplied, and is omitted from serialized output
/// otherwise. Reports are freshly computed per call and never cached.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MetricsReport {
    /// Growth and distribution statistics.
    pub return_metrics: ReturnMetrics,

    /// Dispersion and loss statistics.
    pub risk_metrics: RiskMetrics,

    /// Risk-adjusted ratios.
    pub performance_metrics: PerformanceMetrics,

    /// Benchmark-relative statistics, present only with a benchmark.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub relative_metrics: Option<RelativeMetrics>,
}

/// Compute the full metrics report for a return series.
///
/// # Errors
///
/// * [`InsufficientDataError::EmptyReturns`] when `returns` is empty;
/// * [`InsufficientDataError::DisjointBenchmark`] when a benchmark is
///   supplied but shares no dates with `returns`.
///
/// Any non-empty series otherwise produces a report; undefined formulas
/// degrade to NaN/±∞ sentinels rather than failing.
pub fn analyze(
    returns: &ReturnSeries,
    benchmark: Option<&ReturnSeries>,
    config: &AnalysisConfig,
) -> Result<MetricsReport, InsufficientDataError> {
    if returns.is_empty() {
        return Err(InsufficientDataError::EmptyReturns);
    }

    let values = returns.values();
    let ppy = config.periods_per_year;
    let rf = config.risk_free_rate;

    let return_metrics = ReturnMetrics {
        total_return: metrics::total_return(values, config.compounded),
        cagr: metrics::cagr(values, ppy, config.compounded),
        mean_return: metrics::mean(values),
        skewness: metrics::skewness(values),
        kurtosis: metrics::kurtosis(values),
    };

    let risk_metrics = RiskMetrics {
        volatility: metrics::annualized_volatility(values, ppy),
        max_drawdown: metrics::max_drawdown(values),
        var_95: metrics::value_at_risk(values, 0.95),
        var_99: metrics::value_at_risk(values, 0.99),
        cvar_95: metrics::conditional_value_at_risk(values, 0.95),
        cvar_99: metrics::conditional_value_at_risk(values, 0.99),
        ulcer_index: metrics::ulcer_index(values),
    };

    let performance_metrics = PerformanceMetrics {
        sharpe: metrics::sharpe(values, rf, ppy),
        sortino: metrics::sortino(values, rf, ppy),
        calmar: metrics::calmar(values, ppy, config.compounded),
        omega: metrics::omega(values, rf, ppy),
    };

    let relative_metrics = match benchmark {
        Some(bench) => Some(relative(returns, bench, config)?),
        None => None,
    };

    Ok(MetricsReport {
        return_metrics,
        risk_metrics,
        performance_metrics,
        relative_metrics,
    })
}

fn relative(
    returns: &ReturnSeries,
    benchmark: &ReturnSeries,
    config: &AnalysisConfig,
) -> Result<RelativeMetrics, InsufficientDataError> {
    let (aligned_returns, aligned_benchmark) = returns.align(benchmark);
    if aligned_returns.is_empty() {
        return Err(InsufficientDataError::DisjointBenchmark);
    }

    let r = aligned_returns.values();
    let b = aligned_benchmark.values();
    let ppy = config.periods_per_year;

    Ok(RelativeMetrics {
        beta: metrics::beta(r, b),
        alpha: metrics::alpha(r, b, config.risk_free_rate, ppy),
        information_ratio: metrics::information_ratio(r, b, ppy),
        tracking_error: metrics::tracking_error(r, b, ppy),
    })
}
