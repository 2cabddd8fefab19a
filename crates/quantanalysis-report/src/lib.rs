#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/quantanalysis/quantanalysis-rs/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod charts;
pub mod export;
pub mod fonts;
pub mod html;

pub use export::{ExportError, ExportFormat, Exporter, MetricRow};
pub use fonts::{EmbeddedFont, FontResolution, FontResolver, Platform};
pub use html::{ReportArtifact, ReportError, ReportOptions, ReportOutput, generate_report, render_html};
