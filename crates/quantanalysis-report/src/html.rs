//! HTML report assembly.
//!
//! Substitutes metrics, localized labels, charts, and the resolved font
//! stack into an embedded template. Rendering is deterministic: the
//! generation timestamp is injectable through [`ReportOptions`], so the
//! saved file is byte-identical to the returned markup for the same
//! inputs.

use std::path::{Path, PathBuf};

use chrono::{Local, NaiveDateTime};
use quantanalysis_i18n::{
    Label, Language, format_date, format_datetime, format_percent, format_ratio,
};
use quantanalysis_stats::series::ReturnSeries;
use quantanalysis_stats::summary::MetricsReport;
use thiserror::Error;

use crate::charts::{self, ChartContext};
use crate::fonts::FontResolver;

const TEMPLATE: &str = include_str!("template.html");
const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Errors that can occur while producing a report artifact.
#[derive(Debug, Error)]
pub enum ReportError {
    /// Writing the report file or launching the viewer failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Where the rendered report should go.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReportOutput {
    /// Write to the temp directory and open the system viewer.
    Display,

    /// Return the markup as a string, no side effect.
    Html,

    /// Persist to the given path, or to a filename derived from the title
    /// and timestamp when `None`.
    Save(Option<PathBuf>),
}

/// The result of report generation, one variant per output mode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReportArtifact {
    /// Report was written here and handed to the system viewer.
    Displayed(PathBuf),

    /// The rendered markup.
    Html(String),

    /// Report was written here.
    Saved(PathBuf),
}

impl ReportArtifact {
    /// The rendered markup, when this artifact carries it.
    pub fn into_html(self) -> Option<String> {
        match self {
            Self::Html(html) => Some(html),
            Self::Displayed(_) | Self::Saved(_) => None,
        }
    }

    /// The written file path, when this artifact refers to one.
    pub fn path(&self) -> Option<&Path> {
        match self {
            Self::Displayed(path) | Self::Saved(path) => Some(path),
            Self::Html(_) => None,
        }
    }
}

/// Rendering options.
#[derive(Debug)]
pub struct ReportOptions {
    /// Label language.
    pub language: Language,

    /// Report title; the localized default when `None`.
    pub title: Option<String>,

    /// Generation timestamp; the current local time when `None`. Fixing
    /// it makes rendering reproducible.
    pub generated_at: Option<NaiveDateTime>,

    /// Font resolution inputs for chart and page text.
    pub fonts: FontResolver,
}

impl Default for ReportOptions {
    fn default() -> Self {
        Self {
            language: Language::default(),
            title: None,
            generated_at: None,
            fonts: FontResolver::default(),
        }
    }
}

impl ReportOptions {
    /// Set the label language.
    #[must_use]
    pub fn with_language(mut self, language: Language) -> Self {
        self.language = language;
        self
    }

    /// Set the report title.
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Pin the generation timestamp.
    #[must_use]
    pub fn with_generated_at(mut self, at: NaiveDateTime) -> Self {
        self.generated_at = Some(at);
        self
    }

    /// Override the font resolver.
    #[must_use]
    pub fn with_fonts(mut self, fonts: FontResolver) -> Self {
        self.fonts = fonts;
        self
    }
}

/// Minimal HTML/XML text escaping for user-supplied strings.
pub(crate) fn escape_html(input: &str) -> String {
    input
        .chars()
        .map(|c| match c {
            '&' => "&amp;".to_owned(),
            '<' => "&lt;".to_owned(),
            '>' => "&gt;".to_owned(),
            '"' => "&quot;".to_owned(),
            _ => c.to_string(),
        })
        .collect()
}

/// Render the full report markup. Pure with respect to its inputs; the
/// only ambient read is the current time when `generated_at` is unset.
pub fn render_html(
    returns: &ReturnSeries,
    benchmark: Option<&ReturnSeries>,
    metrics: &MetricsReport,
    options: &ReportOptions,
) -> String {
    let language = options.language;
    let fonts = options.fonts.resolve();
    let title = options.title.as_deref().map_or_else(
        || Label::ReportTitle.text(language).to_owned(),
        escape_html,
    );
    let generated_at = options
        .generated_at
        .unwrap_or_else(|| Local::now().naive_local());

    let period = returns.date_range().map_or_else(String::new, |(start, end)| {
        format!(
            "{}: {} {} {}",
            Label::AnalysisPeriod.text(language),
            format_date(language, start),
            Label::To.text(language),
            format_date(language, end),
        )
    });
    let generated_line = format!(
        "{}: {} {} | {}: {}",
        Label::TradingDays.text(language),
        returns.len(),
        Label::Days.text(language),
        Label::GeneratedOn.text(language),
        format_datetime(language, generated_at),
    );

    let ctx = ChartContext::new(language, fonts.family_stack());
    let charts_html = [
        charts::equity_curve(returns, benchmark, &ctx),
        charts::drawdown(returns, &ctx),
        charts::distribution(returns, &ctx),
        charts::monthly_returns(returns, &ctx),
    ]
    .join("\n");

    TEMPLATE
        .replace("{{lang}}", language.code())
        .replace("{{title}}", &title)
        .replace("{{font_face}}", &fonts.font_face_css())
        .replace("{{font_family}}", &fonts.family_stack())
        .replace("{{period}}", &period)
        .replace("{{generated_line}}", &generated_line)
        .replace(
            "{{summary_heading}}",
            Label::PerformanceSummary.text(language),
        )
        .replace("{{summary_cards}}", &summary_cards(metrics, language))
        .replace("{{charts_heading}}", Label::ChartAnalysis.text(language))
        .replace("{{charts}}", &charts_html)
        .replace("{{details_heading}}", Label::DetailedMetrics.text(language))
        .replace("{{metric_column}}", Label::Metric.text(language))
        .replace("{{value_column}}", Label::Value.text(language))
        .replace("{{metric_rows}}", &metric_rows(metrics, language))
        .replace("{{generated_by}}", Label::GeneratedBy.text(language))
        .replace(
            "{{generated_on}}",
            &format!(
                "{}: {}",
                Label::GeneratedOn.text(language),
                format_datetime(language, generated_at)
            ),
        )
        .replace("{{version}}", VERSION)
}

/// Produce the report in the requested output mode.
///
/// # Errors
///
/// [`ReportError::Io`] when writing the file or launching the system
/// viewer fails. `ReportOutput::Html` cannot fail.
pub fn generate_report(
    returns: &ReturnSeries,
    benchmark: Option<&ReturnSeries>,
    metrics: &MetricsReport,
    options: &ReportOptions,
    output: ReportOutput,
) -> Result<ReportArtifact, ReportError> {
    let html = render_html(returns, benchmark, metrics, options);

    match output {
        ReportOutput::Html => Ok(ReportArtifact::Html(html)),
        ReportOutput::Save(path) => {
            let path = path.unwrap_or_else(|| PathBuf::from(derived_filename(options)));
            std::fs::write(&path, &html)?;
            Ok(ReportArtifact::Saved(path))
        }
        ReportOutput::Display => {
            let path = std::env::temp_dir().join(derived_filename(options));
            std::fs::write(&path, &html)?;
            open::that(&path)?;
            Ok(ReportArtifact::Displayed(path))
        }
    }
}

/// Filename derived from the title (sanitized) and the generation
/// timestamp, matching the `portfolio_report_YYYYmmdd_HHMMSS.html` shape
/// of the original reports.
fn derived_filename(options: &ReportOptions) -> String {
    let stem: String = options
        .title
        .as_deref()
        .unwrap_or("portfolio_report")
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
        .collect();
    let stem = stem.trim_matches('_');
    let stem = if stem.is_empty() {
        "portfolio_report"
    } else {
        stem
    };
    let at = options
        .generated_at
        .unwrap_or_else(|| Local::now().naive_local());
    format!("{stem}_{}.html", at.format("%Y%m%d_%H%M%S"))
}

fn card(label: &str, value: String, tone: &str) -> String {
    format!(
        r#"<div class="metric-card {tone}"><div class="metric-title">{label}</div><div class="metric-value {tone}">{value}</div></div>"#
    )
}

fn sign_tone(value: f64) -> &'static str {
    if value > 0.0 {
        "positive"
    } else if value < 0.0 {
        "negative"
    } else {
        ""
    }
}

fn summary_cards(metrics: &MetricsReport, language: Language) -> String {
    let ret = &metrics.return_metrics;
    let risk = &metrics.risk_metrics;
    let perf = &metrics.performance_metrics;

    [
        card(
            Label::TotalReturn.text(language),
            format_percent(ret.total_return),
            sign_tone(ret.total_return),
        ),
        card(
            Label::Cagr.text(language),
            format_percent(ret.cagr),
            sign_tone(ret.cagr),
        ),
        card(
            Label::Sharpe.text(language),
            format_ratio(perf.sharpe),
            sign_tone(perf.sharpe),
        ),
        card(
            Label::MaxDrawdown.text(language),
            format_percent(risk.max_drawdown),
            "negative",
        ),
        card(
            Label::Volatility.text(language),
            format_percent(risk.volatility),
            "",
        ),
        card(
            Label::Sortino.text(language),
            format_ratio(perf.sortino),
            sign_tone(perf.sortino),
        ),
    ]
    .join("\n")
}

fn category_row(label: &str) -> String {
    format!(r#"<tr><td colspan="2" class="category-header">{label}</td></tr>"#)
}

fn metric_row(label: &str, value: String) -> String {
    format!(r#"<tr><td>{label}</td><td>{value}</td></tr>"#)
}

fn metric_rows(metrics: &MetricsReport, language: Language) -> String {
    let ret = &metrics.return_metrics;
    let risk = &metrics.risk_metrics;
    let perf = &metrics.performance_metrics;

    let mut rows = vec![
        category_row(Label::ReturnMetrics.text(language)),
        metric_row(
            Label::TotalReturn.text(language),
            format_percent(ret.total_return),
        ),
        metric_row(Label::Cagr.text(language), format_percent(ret.cagr)),
        metric_row(
            Label::MeanReturn.text(language),
            format_percent(ret.mean_return),
        ),
        metric_row(Label::Skewness.text(language), format_ratio(ret.skewness)),
        metric_row(Label::Kurtosis.text(language), format_ratio(ret.kurtosis)),
        category_row(Label::RiskMetrics.text(language)),
        metric_row(
            Label::Volatility.text(language),
            format_percent(risk.volatility),
        ),
        metric_row(
            Label::MaxDrawdown.text(language),
            format_percent(risk.max_drawdown),
        ),
        metric_row(Label::Var95.text(language), format_percent(risk.var_95)),
        metric_row(Label::Var99.text(language), format_percent(risk.var_99)),
        metric_row(Label::Cvar95.text(language), format_percent(risk.cvar_95)),
        metric_row(Label::Cvar99.text(language), format_percent(risk.cvar_99)),
        metric_row(
            Label::UlcerIndex.text(language),
            format_ratio(risk.ulcer_index),
        ),
        category_row(Label::PerformanceMetrics.text(language)),
        metric_row(Label::Sharpe.text(language), format_ratio(perf.sharpe)),
        metric_row(Label::Sortino.text(language), format_ratio(perf.sortino)),
        metric_row(Label::Calmar.text(language), format_ratio(perf.calmar)),
        metric_row(Label::Omega.text(language), format_ratio(perf.omega)),
    ];

    if let Some(relative) = &metrics.relative_metrics {
        rows.push(category_row(Label::RelativeMetrics.text(language)));
        rows.push(metric_row(
            Label::Beta.text(language),
            format_ratio(relative.beta),
        ));
        rows.push(metric_row(
            Label::Alpha.text(language),
            format_percent(relative.alpha),
        ));
        rows.push(metric_row(
            Label::InformationRatio.text(language),
            format_ratio(relative.information_ratio),
        ));
        rows.push(metric_row(
            Label::TrackingError.text(language),
            format_percent(relative.tracking_error),
        ));
    }

    rows.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, NaiveDateTime};
    use quantanalysis_stats::summary::{AnalysisConfig, analyze};

    fn sample_series(n: usize) -> ReturnSeries {
        let start = NaiveDate::from_ymd_opt(2023, 1, 2).unwrap();
        let dates: Vec<NaiveDate> = (0..n as i64)
            .map(|i| start + chrono::Duration::days(i))
            .collect();
        let values: Vec<f64> = (0..n)
            .map(|i| if i % 4 == 0 { -0.012 } else { 0.009 })
            .collect();
        ReturnSeries::new(dates, values).unwrap()
    }

    fn fixed_timestamp() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 6, 1)
            .unwrap()
            .and_hms_opt(9, 30, 0)
            .unwrap()
    }

    fn options(language: Language) -> ReportOptions {
        ReportOptions::default()
            .with_language(language)
            .with_title("Test Strategy")
            .with_generated_at(fixed_timestamp())
            .with_fonts(FontResolver::new(crate::fonts::Platform::Linux))
    }

    #[test]
    fn html_output_contains_the_title() {
        let returns = sample_series(120);
        let metrics = analyze(&returns, None, &AnalysisConfig::default()).unwrap();
        let artifact = generate_report(
            &returns,
            None,
            &metrics,
            &options(Language::En),
            ReportOutput::Html,
        )
        .unwrap();

        let html = artifact.into_html().unwrap();
        assert!(html.contains("Test Strategy"));
        assert!(html.contains("<!DOCTYPE html>"));
        assert!(html.contains("Performance Summary"));
    }

    #[test]
    fn chinese_report_localizes_labels_and_lang_attribute() {
        let returns = sample_series(120);
        let metrics = analyze(&returns, None, &AnalysisConfig::default()).unwrap();
        let html = render_html(&returns, None, &metrics, &options(Language::Zh));

        assert!(html.contains("lang=\"zh\""));
        assert!(html.contains("绩效摘要"));
        assert!(html.contains("最大回撤"));
        assert!(html.contains("生成时间"));
    }

    #[test]
    fn relative_section_appears_only_with_benchmark() {
        let returns = sample_series(120);
        let benchmark = sample_series(120);
        let config = AnalysisConfig::default();

        let without = analyze(&returns, None, &config).unwrap();
        let html = render_html(&returns, None, &without, &options(Language::En));
        assert!(!html.contains("Relative Metrics"));

        let with = analyze(&returns, Some(&benchmark), &config).unwrap();
        let html = render_html(
            &returns,
            Some(&benchmark),
            &with,
            &options(Language::En),
        );
        assert!(html.contains("Relative Metrics"));
        assert!(html.contains("Tracking Error"));
    }

    #[test]
    fn save_writes_bytes_identical_to_html_output() {
        let returns = sample_series(90);
        let metrics = analyze(&returns, None, &AnalysisConfig::default()).unwrap();
        let opts = options(Language::Zh);

        let html = generate_report(&returns, None, &metrics, &opts, ReportOutput::Html)
            .unwrap()
            .into_html()
            .unwrap();

        let path = std::env::temp_dir().join("quantanalysis-save-test.html");
        let artifact = generate_report(
            &returns,
            None,
            &metrics,
            &opts,
            ReportOutput::Save(Some(path.clone())),
        )
        .unwrap();

        assert_eq!(artifact.path(), Some(path.as_path()));
        let saved = std::fs::read_to_string(&path).unwrap();
        assert_eq!(saved, html);
        std::fs::remove_file(&path).ok();
    }

    #[test]
    fn derived_filename_sanitizes_the_title() {
        let opts = ReportOptions::default()
            .with_title("My Fund: 2024 / H1")
            .with_generated_at(fixed_timestamp());
        let name = derived_filename(&opts);
        assert_eq!(name, "My_Fund__2024___H1_20240601_093000.html");
    }

    #[test]
    fn derived_filename_defaults_when_title_is_unusable() {
        let opts = ReportOptions::default()
            .with_title("###")
            .with_generated_at(fixed_timestamp());
        assert_eq!(derived_filename(&opts), "portfolio_report_20240601_093000.html");
    }

    #[test]
    fn sentinel_metrics_render_as_text() {
        let returns = {
            let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
            let dates: Vec<NaiveDate> = (0..252)
                .map(|i| start + chrono::Duration::days(i))
                .collect();
            ReturnSeries::new(dates, vec![0.001; 252]).unwrap()
        };
        let metrics = analyze(&returns, None, &AnalysisConfig::default()).unwrap();
        assert_eq!(metrics.performance_metrics.sharpe, f64::INFINITY);

        let html = render_html(&returns, None, &metrics, &options(Language::En));
        assert!(html.contains('∞'));
        assert!(!html.contains("inf"));
    }
}
