//! Flat-file export of the metrics table.
//!
//! Flattens a [`MetricsReport`] into one row per metric, each tagged with
//! its category, and writes the rows as CSV or JSON. Identifiers are
//! stable `snake_case` strings, independent of the report language.

use std::io::Write;
use std::path::Path;

use quantanalysis_stats::summary::MetricsReport;
use serde::Serialize;
use thiserror::Error;

/// Errors that can occur during export.
#[derive(Debug, Error)]
pub enum ExportError {
    /// CSV serialization failed.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// JSON serialization failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Writing the output failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Supported export encodings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    /// Comma-separated values, one metric per row.
    Csv,
    /// Compact JSON array.
    Json,
    /// Pretty-printed JSON array.
    PrettyJson,
}

impl ExportFormat {
    /// Conventional file extension for this format.
    pub const fn extension(&self) -> &'static str {
        match self {
            Self::Csv => "csv",
            Self::Json | Self::PrettyJson => "json",
        }
    }
}

/// A single flattened metric.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MetricRow {
    /// Category identifier (`returns`, `risk`, `performance`, `relative`).
    pub category: &'static str,

    /// Metric identifier in `snake_case`.
    pub metric: &'static str,

    /// Raw value, sentinels included.
    pub value: f64,
}

/// Flattens and writes metrics reports.
#[derive(Debug, Clone, Copy)]
pub struct Exporter {
    format: ExportFormat,
}

impl Exporter {
    /// An exporter for the given format.
    pub const fn new(format: ExportFormat) -> Self {
        Self { format }
    }

    /// Flatten a report into rows, in a fixed category-then-metric order.
    /// Relative rows appear only when the report carries them.
    pub fn rows(report: &MetricsReport) -> Vec<MetricRow> {
        let ret = &report.return_metrics;
        let risk = &report.risk_metrics;
        let perf = &report.performance_metrics;

        let row = |category, metric, value| MetricRow {
            category,
            metric,
            value,
        };

        let mut rows = vec![
            row("returns", "total_return", ret.total_return),
            row("returns", "cagr", ret.cagr),
            row("returns", "mean_return", ret.mean_return),
            row("returns", "skewness", ret.skewness),
            row("returns", "kurtosis", ret.kurtosis),
            row("risk", "volatility", risk.volatility),
            row("risk", "max_drawdown", risk.max_drawdown),
            row("risk", "var_95", risk.var_95),
            row("risk", "var_99", risk.var_99),
            row("risk", "cvar_95", risk.cvar_95),
            row("risk", "cvar_99", risk.cvar_99),
            row("risk", "ulcer_index", risk.ulcer_index),
            row("performance", "sharpe", perf.sharpe),
            row("performance", "sortino", perf.sortino),
            row("performance", "calmar", perf.calmar),
            row("performance", "omega", perf.omega),
        ];

        if let Some(relative) = &report.relative_metrics {
            rows.push(row("relative", "beta", relative.beta));
            rows.push(row("relative", "alpha", relative.alpha));
            rows.push(row(
                "relative",
                "information_ratio",
                relative.information_ratio,
            ));
            rows.push(row("relative", "tracking_error", relative.tracking_error));
        }

        rows
    }

    /// Serialize a report into the exporter's format.
    ///
    /// # Errors
    ///
    /// Returns [`ExportError`] when serialization fails.
    pub fn to_string(&self, report: &MetricsReport) -> Result<String, ExportError> {
        let rows = Self::rows(report);
        match self.format {
            ExportFormat::Csv => {
                let mut writer = csv::Writer::from_writer(Vec::new());
                for row in &rows {
                    writer.serialize(row)?;
                }
                let bytes = writer.into_inner().map_err(|e| e.into_error())?;
                Ok(String::from_utf8_lossy(&bytes).into_owned())
            }
            ExportFormat::Json => Ok(serde_json::to_string(&rows)?),
            ExportFormat::PrettyJson => Ok(serde_json::to_string_pretty(&rows)?),
        }
    }

    /// Serialize a report and write it to `path`.
    ///
    /// # Errors
    ///
    /// Returns [`ExportError`] when serialization or the write fails.
    pub fn write(&self, report: &MetricsReport, path: impl AsRef<Path>) -> Result<(), ExportError> {
        let serialized = self.to_string(report)?;
        let mut file = std::fs::File::create(path)?;
        file.write_all(serialized.as_bytes())?;
        Ok(())
    }
}
