//! Static label tables for every user-facing string of the report.

use crate::Language;

/// A localizable report label.
///
/// The `text` lookup is exhaustive over both dimensions, so a missing
/// translation is a compile error rather than a runtime fallback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Label {
    /// Default report title.
    ReportTitle,
    /// "Performance Summary" section heading.
    PerformanceSummary,
    /// "Chart Analysis" section heading.
    ChartAnalysis,
    /// "Detailed Metrics" section heading.
    DetailedMetrics,
    /// "Analysis Period" header line.
    AnalysisPeriod,
    /// Report generation timestamp caption.
    GeneratedOn,
    /// Footer attribution line.
    GeneratedBy,
    /// Trading-day count caption.
    TradingDays,
    /// Unit suffix for day counts.
    Days,
    /// Date-range separator ("to").
    To,
    /// Table header for the metric name column.
    Metric,
    /// Table header for the metric value column.
    Value,

    /// Return metrics category header.
    ReturnMetrics,
    /// Risk metrics category header.
    RiskMetrics,
    /// Performance metrics category header.
    PerformanceMetrics,
    /// Relative metrics category header.
    RelativeMetrics,

    /// Cumulative return over the period.
    TotalReturn,
    /// Compound annual growth rate.
    Cagr,
    /// Mean periodic return.
    MeanReturn,
    /// Sample skewness.
    Skewness,
    /// Sample excess kurtosis.
    Kurtosis,
    /// Annualized volatility.
    Volatility,
    /// Maximum drawdown.
    MaxDrawdown,
    /// 95% Value-at-Risk.
    Var95,
    /// 99% Value-at-Risk.
    Var99,
    /// 95% Conditional Value-at-Risk.
    Cvar95,
    /// 99% Conditional Value-at-Risk.
    Cvar99,
    /// Ulcer Index.
    UlcerIndex,
    /// Sharpe ratio.
    Sharpe,
    /// Sortino ratio.
    Sortino,
    /// Calmar ratio.
    Calmar,
    /// Omega ratio.
    Omega,
    /// Beta versus the benchmark.
    Beta,
    /// Alpha versus the benchmark.
    Alpha,
    /// Information ratio.
    InformationRatio,
    /// Tracking error.
    TrackingError,

    /// Equity-curve chart title.
    CumulativeReturns,
    /// Drawdown chart title.
    Drawdown,
    /// Histogram chart title.
    ReturnDistribution,
    /// Monthly-bars chart title.
    MonthlyReturns,
    /// Portfolio legend entry.
    Portfolio,
    /// Benchmark legend entry.
    Benchmark,
    /// Mean marker label on the histogram.
    Mean,
    /// Histogram y-axis label.
    Frequency,
    /// Histogram x-axis label.
    PeriodicReturn,
}

impl Label {
    /// The localized text for this label.
    pub const fn text(&self, language: Language) -> &'static str {
        match language {
            Language::Zh => self.zh(),
            Language::En => self.en(),
        }
    }

    const fn zh(&self) -> &'static str {
        match self {
            Self::ReportTitle => "投资组合分析报告",
            Self::PerformanceSummary => "绩效摘要",
            Self::ChartAnalysis => "图表分析",
            Self::DetailedMetrics => "详细指标",
            Self::AnalysisPeriod => "分析期间",
            Self::GeneratedOn => "生成时间",
            Self::GeneratedBy => "由 QuantAnalysis 生成",
            Self::TradingDays => "交易日",
            Self::Days => "天",
            Self::To => "至",
            Self::Metric => "指标",
            Self::Value => "数值",
            Self::ReturnMetrics => "收益指标",
            Self::RiskMetrics => "风险指标",
            Self::PerformanceMetrics => "绩效指标",
            Self::RelativeMetrics => "相对指标",
            Self::TotalReturn => "总收益率",
            Self::Cagr => "年化收益率",
            Self::MeanReturn => "平均收益率",
            Self::Skewness => "偏度",
            Self::Kurtosis => "峰度",
            Self::Volatility => "年化波动率",
            Self::MaxDrawdown => "最大回撤",
            Self::Var95 => "风险价值 (95%)",
            Self::Var99 => "风险价值 (99%)",
            Self::Cvar95 => "条件风险价值 (95%)",
            Self::Cvar99 => "条件风险价值 (99%)",
            Self::UlcerIndex => "溃疡指数",
            Self::Sharpe => "夏普比率",
            Self::Sortino => "索提诺比率",
            Self::Calmar => "卡玛比率",
            Self::Omega => "欧米伽比率",
            Self::Beta => "贝塔系数",
            Self::Alpha => "阿尔法系数",
            Self::InformationRatio => "信息比率",
            Self::TrackingError => "跟踪误差",
            Self::CumulativeReturns => "累计收益",
            Self::Drawdown => "回撤",
            Self::ReturnDistribution => "收益分布",
            Self::MonthlyReturns => "月度收益",
            Self::Portfolio => "投资组合",
            Self::Benchmark => "基准",
            Self::Mean => "均值",
            Self::Frequency => "频数",
            Self::PeriodicReturn => "周期收益率",
        }
    }

    const fn en(&self) -> &'static str {
        match self {
            Self::ReportTitle => "Portfolio Analysis Report",
            Self::PerformanceSummary => "Performance Summary",
            Self::ChartAnalysis => "Chart Analysis",
            Self::DetailedMetrics => "Detailed Metrics",
            Self::AnalysisPeriod => "Analysis Period",
            Self::GeneratedOn => "Generated",
            Self::GeneratedBy => "Generated by QuantAnalysis",
            Self::TradingDays => "Trading Days",
            Self::Days => "days",
            Self::To => "to",
            Self::Metric => "Metric",
            Self::Value => "Value",
            Self::ReturnMetrics => "Return Metrics",
            Self::RiskMetrics => "Risk Metrics",
            Self::PerformanceMetrics => "Performance Metrics",
            Self::RelativeMetrics => "Relative Metrics",
            Self::TotalReturn => "Total Return",
            Self::Cagr => "CAGR",
            Self::MeanReturn => "Mean Return",
            Self::Skewness => "Skewness",
            Self::Kurtosis => "Kurtosis",
            Self::Volatility => "Volatility (ann.)",
            Self::MaxDrawdown => "Max Drawdown",
            Self::Var95 => "VaR (95%)",
            Self::Var99 => "VaR (99%)",
            Self::Cvar95 => "CVaR (95%)",
            Self::Cvar99 => "CVaR (99%)",
            Self::UlcerIndex => "Ulcer Index",
            Self::Sharpe => "Sharpe Ratio",
            Self::Sortino => "Sortino Ratio",
            Self::Calmar => "Calmar Ratio",
            Self::Omega => "Omega Ratio",
            Self::Beta => "Beta",
            Self::Alpha => "Alpha",
            Self::InformationRatio => "Information Ratio",
            Self::TrackingError => "Tracking Error",
            Self::CumulativeReturns => "Cumulative Returns",
            Self::Drawdown => "Drawdown",
            Self::ReturnDistribution => "Return Distribution",
            Self::MonthlyReturns => "Monthly Returns",
            Self::Portfolio => "Portfolio",
            Self::Benchmark => "Benchmark",
            Self::Mean => "Mean",
            Self::Frequency => "Frequency",
            Self::PeriodicReturn => "Periodic Return",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: [Label; 45] = [
        Label::ReportTitle,
        Label::PerformanceSummary,
        Label::ChartAnalysis,
        Label::DetailedMetrics,
        Label::AnalysisPeriod,
        Label::GeneratedOn,
        Label::GeneratedBy,
        Label::TradingDays,
        Label::Days,
        Label::To,
        Label::Metric,
        Label::Value,
        Label::ReturnMetrics,
        Label::RiskMetrics,
        Label::PerformanceMetrics,
        Label::RelativeMetrics,
        Label::TotalReturn,
        Label::Cagr,
        Label::MeanReturn,
        Label::Skewness,
        Label::Kurtosis,
        Label::Volatility,
        Label::MaxDrawdown,
        Label::Var95,
        Label::Var99,
        Label::Cvar95,
        Label::Cvar99,
        Label::UlcerIndex,
        Label::Sharpe,
        Label::Sortino,
        Label::Calmar,
        Label::Omega,
        Label::Beta,
        Label::Alpha,
        Label::InformationRatio,
        Label::TrackingError,
        Label::CumulativeReturns,
        Label::Drawdown,
        Label::ReturnDistribution,
        Label::MonthlyReturns,
        Label::Portfolio,
        Label::Benchmark,
        Label::Mean,
        Label::Frequency,
        Label::PeriodicReturn,
    ];

    #[test]
    fn every_label_is_populated_in_both_languages() {
        for label in ALL {
            assert!(!label.text(Language::Zh).is_empty());
            assert!(!label.text(Language::En).is_empty());
        }
    }

    #[test]
    fn chinese_and_english_differ_for_metric_names() {
        assert_ne!(
            Label::Sharpe.text(Language::Zh),
            Label::Sharpe.text(Language::En)
        );
        assert_eq!(Label::MaxDrawdown.text(Language::Zh), "最大回撤");
    }
}
