#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/quantanalysis/quantanalysis-rs/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod analyzer;

// Re-export the sub-crates under stable names.
pub use quantanalysis_i18n as i18n;
pub use quantanalysis_report as report;
pub use quantanalysis_stats as stats;

pub use analyzer::{Error, QuantAnalysis};
pub use quantanalysis_i18n::Language;
pub use quantanalysis_report::{ExportFormat, Exporter, ReportArtifact, ReportOutput};
pub use quantanalysis_stats::{
    AnalysisConfig, InsufficientDataError, MetricsReport, ReturnSeries, SeriesError,
};

/// Version information.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn version_is_populated() {
        assert!(!VERSION.is_empty());
    }
}
