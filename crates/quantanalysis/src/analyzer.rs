//! The analysis session: configured once, reused across calls.

use quantanalysis_i18n::Language;
use quantanalysis_report::{
    FontResolver, ReportArtifact, ReportError, ReportOptions, ReportOutput, render_html,
};
use quantanalysis_stats::summary::{AnalysisConfig, InsufficientDataError, MetricsReport, analyze};
use quantanalysis_stats::series::ReturnSeries;
use thiserror::Error;

/// Top-level error type of the façade.
#[derive(Debug, Error)]
pub enum Error {
    /// The inputs carry too little data to analyze.
    #[error(transparent)]
    InsufficientData(#[from] InsufficientDataError),

    /// Producing the report artifact failed.
    #[error(transparent)]
    Report(#[from] ReportError),
}

/// A configured analysis session.
///
/// Construction is by builder; the session is immutable afterwards and
/// every call computes fresh from its inputs, so a single session can be
/// shared across portfolios.
///
/// ```
/// use quantanalysis::{Language, QuantAnalysis};
///
/// let qa = QuantAnalysis::new()
///     .risk_free_rate(0.02)
///     .periods_per_year(252)
///     .language(Language::En);
/// ```
#[derive(Debug, Clone, Default)]
pub struct QuantAnalysis {
    config: AnalysisConfig,
    language: Language,
    benchmark: Option<ReturnSeries>,
}

impl QuantAnalysis {
    /// A session with default settings: zero risk-free rate, 252 periods
    /// per year, geometric compounding, Chinese labels, no benchmark.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the annualized risk-free rate (e.g. `0.02` for 2%).
    #[must_use]
    pub const fn risk_free_rate(mut self, rate: f64) -> Self {
        self.config.risk_free_rate = rate;
        self
    }

    /// Set the number of observation periods per year.
    #[must_use]
    pub const fn periods_per_year(mut self, periods: u32) -> Self {
        self.config.periods_per_year = periods;
        self
    }

    /// Toggle geometric compounding of cumulative figures.
    #[must_use]
    pub const fn compounded(mut self, compounded: bool) -> Self {
        self.config.compounded = compounded;
        self
    }

    /// Set the report label language.
    #[must_use]
    pub const fn language(mut self, language: Language) -> Self {
        self.language = language;
        self
    }

    /// Set a session-wide benchmark, used whenever a call does not supply
    /// its own.
    #[must_use]
    pub fn benchmark(mut self, benchmark: ReturnSeries) -> Self {
        self.benchmark = Some(benchmark);
        self
    }

    /// The session's analysis configuration.
    pub const fn config(&self) -> &AnalysisConfig {
        &self.config
    }

    fn effective_benchmark<'a>(
        &'a self,
        benchmark: Option<&'a ReturnSeries>,
    ) -> Option<&'a ReturnSeries> {
        benchmark.or(self.benchmark.as_ref())
    }

    /// Compute the full metrics report for a return series.
    ///
    /// A `benchmark` given here takes precedence over the session-wide
    /// one; relative metrics are present exactly when either applies and
    /// overlaps the returns.
    ///
    /// # Errors
    ///
    /// [`Error::InsufficientData`] when `returns` is empty or the
    /// benchmark shares no dates with it.
    pub fn analyze(
        &self,
        returns: &ReturnSeries,
        benchmark: Option<&ReturnSeries>,
    ) -> Result<MetricsReport, Error> {
        let benchmark = self.effective_benchmark(benchmark);
        Ok(analyze(returns, benchmark, &self.config)?)
    }

    /// Render the HTML tearsheet as a string.
    ///
    /// # Errors
    ///
    /// [`Error::InsufficientData`] when the metrics cannot be computed.
    pub fn render_html(
        &self,
        returns: &ReturnSeries,
        benchmark: Option<&ReturnSeries>,
    ) -> Result<String, Error> {
        let benchmark = self.effective_benchmark(benchmark);
        let metrics = analyze(returns, benchmark, &self.config)?;
        Ok(render_html(
            returns,
            benchmark,
            &metrics,
            &self.report_options(returns),
        ))
    }

    /// Analyze and produce the tearsheet in the requested output mode.
    ///
    /// # Errors
    ///
    /// [`Error::InsufficientData`] when the metrics cannot be computed,
    /// [`Error::Report`] when writing or opening the report fails.
    pub fn generate_report(
        &self,
        returns: &ReturnSeries,
        benchmark: Option<&ReturnSeries>,
        output: ReportOutput,
    ) -> Result<ReportArtifact, Error> {
        let benchmark = self.effective_benchmark(benchmark);
        let metrics = analyze(returns, benchmark, &self.config)?;
        Ok(quantanalysis_report::generate_report(
            returns,
            benchmark,
            &metrics,
            &self.report_options(returns),
            output,
        )?)
    }

    /// Report options for this session, titled after the series name when
    /// it has one.
    fn report_options(&self, returns: &ReturnSeries) -> ReportOptions {
        let options = ReportOptions::default()
            .with_language(self.language)
            .with_fonts(FontResolver::default());
        match returns.name() {
            Some(name) => options.with_title(name),
            None => options,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn daily_series(values: Vec<f64>) -> ReturnSeries {
        let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let dates = (0..values.len() as i64)
            .map(|i| start + chrono::Duration::days(i))
            .collect();
        ReturnSeries::new(dates, values).unwrap()
    }

    #[test]
    fn builder_threads_settings_into_the_config() {
        let qa = QuantAnalysis::new()
            .risk_free_rate(0.03)
            .periods_per_year(12)
            .compounded(false);
        assert_eq!(qa.config().risk_free_rate, 0.03);
        assert_eq!(qa.config().periods_per_year, 12);
        assert!(!qa.config().compounded);
    }

    #[test]
    fn session_benchmark_applies_when_call_omits_one() {
        let returns = daily_series(vec![0.01, -0.005, 0.02, 0.003]);
        let benchmark = daily_series(vec![0.008, -0.002, 0.015, 0.001]);

        let qa = QuantAnalysis::new().benchmark(benchmark);
        let report = qa.analyze(&returns, None).unwrap();
        assert!(report.relative_metrics.is_some());
    }

    #[test]
    fn call_benchmark_overrides_the_session_one() {
        let returns = daily_series(vec![0.01, -0.005, 0.02, 0.003]);
        let disjoint = ReturnSeries::new(
            vec![NaiveDate::from_ymd_opt(2030, 1, 1).unwrap()],
            vec![0.01],
        )
        .unwrap();
        let overlapping = daily_series(vec![0.008, -0.002, 0.015, 0.001]);

        let qa = QuantAnalysis::new().benchmark(disjoint);
        let report = qa.analyze(&returns, Some(&overlapping)).unwrap();
        assert!(report.relative_metrics.is_some());
    }

    #[test]
    fn empty_returns_surface_the_typed_error() {
        let qa = QuantAnalysis::new();
        let err = qa.analyze(&daily_series(vec![]), None).unwrap_err();
        assert!(matches!(
            err,
            Error::InsufficientData(InsufficientDataError::EmptyReturns)
        ));
    }

    #[test]
    fn series_name_becomes_the_report_title() {
        let returns = daily_series(vec![0.01; 30]).with_name("成长组合");
        let qa = QuantAnalysis::new();
        let html = qa.render_html(&returns, None).unwrap();
        assert!(html.contains("成长组合"));
    }
}
