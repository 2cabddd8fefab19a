#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/quantanalysis/quantanalysis-rs/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod metrics;
pub mod series;
pub mod summary;

pub use series::{ReturnSeries, SeriesError};
pub use summary::{
    AnalysisConfig, InsufficientDataError, MetricsReport, PerformanceMetrics, RelativeMetrics,
    ReturnMetrics, RiskMetrics, analyze,
};
