//! Inline SVG charts for the HTML report.
//!
//! Chart geometry is assembled by hand into SVG markup; every chart is a
//! self-contained `<div>` the template drops into the report. Titles,
//! legends, and axis text come from the localization tables, and the
//! resolved font stack is baked into each SVG's style so CJK text renders
//! with the same fonts as the rest of the page.

use chrono::{Datelike, NaiveDate};
use quantanalysis_i18n::{Label, Language, format_percent};
use quantanalysis_stats::metrics::{drawdown_series, mean};
use quantanalysis_stats::series::ReturnSeries;

use crate::html::escape_html;

const WIDTH: f64 = 576.0;
const HEIGHT: f64 = 288.0;
const PAD_LEFT: f64 = 52.0;
const PAD_RIGHT: f64 = 16.0;
const PAD_TOP: f64 = 18.0;
const PAD_BOTTOM: f64 = 32.0;

const PRIMARY: &str = "#007aff";
const POSITIVE: &str = "#34c759";
const NEGATIVE: &str = "#ff3b30";
const AXIS_TEXT: &str = "#86868b";
const GRID: &str = "#e5e5ea";

/// Shared rendering inputs: language and the resolved CSS font stack.
#[derive(Debug, Clone)]
pub struct ChartContext {
    /// Label language.
    pub language: Language,

    /// CSS `font-family` stack for chart text.
    pub font_family: String,
}

impl ChartContext {
    /// Create a context.
    pub const fn new(language: Language, font_family: String) -> Self {
        Self {
            language,
            font_family,
        }
    }
}

const fn plot_width() -> f64 {
    WIDTH - PAD_LEFT - PAD_RIGHT
}

const fn plot_height() -> f64 {
    HEIGHT - PAD_TOP - PAD_BOTTOM
}

fn x_at(index: usize, len: usize) -> f64 {
    if len < 2 {
        return PAD_LEFT + plot_width() / 2.0;
    }
    PAD_LEFT + index as f64 / (len - 1) as f64 * plot_width()
}

/// Vertical scale mapping `[min, max]` onto the plot area. A degenerate
/// range is widened so flat series still draw mid-plot.
fn y_scaler(mut min: f64, mut max: f64) -> impl Fn(f64) -> f64 {
    if !(max - min).is_normal() {
        min -= 0.5;
        max += 0.5;
    }
    move |value: f64| PAD_TOP + (max - value) / (max - min) * plot_height()
}

fn svg_open(ctx: &ChartContext) -> String {
    format!(
        r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 {w:.0} {h:.0}" role="img"><style>text{{font-family:{family};font-size:10px;fill:{text}}}</style>"#,
        w = WIDTH,
        h = HEIGHT,
        family = ctx.font_family,
        text = AXIS_TEXT,
    )
}

fn wrap(title: &str, svg_body: String) -> String {
    format!(
        r#"<div class="chart"><div class="chart-title">{title}</div>{svg_body}</svg></div>"#
    )
}

fn polyline(points: &[(f64, f64)], color: &str, width: f64) -> String {
    let coords: Vec<String> = points
        .iter()
        .map(|(x, y)| format!("{x:.1},{y:.1}"))
        .collect();
    format!(
        r#"<polyline fill="none" stroke="{color}" stroke-width="{width}" points="{}"/>"#,
        coords.join(" ")
    )
}

fn text_el(x: f64, y: f64, anchor: &str, content: &str) -> String {
    format!(r#"<text x="{x:.1}" y="{y:.1}" text-anchor="{anchor}">{content}</text>"#)
}

/// Horizontal gridlines with percent labels at the bottom, middle, and top
/// of the value range.
fn y_axis(svg: &mut String, min: f64, max: f64, scale: &impl Fn(f64) -> f64) {
    for value in [min, (min + max) / 2.0, max] {
        let y = scale(value);
        svg.push_str(&format!(
            r#"<line x1="{x1:.1}" y1="{y:.1}" x2="{x2:.1}" y2="{y:.1}" stroke="{GRID}" stroke-width="0.5"/>"#,
            x1 = PAD_LEFT,
            x2 = WIDTH - PAD_RIGHT,
        ));
        svg.push_str(&text_el(
            PAD_LEFT - 6.0,
            y + 3.0,
            "end",
            &format_percent(value),
        ));
    }
}

/// First, middle, and last date labels along the bottom edge.
fn x_axis(svg: &mut String, dates: &[NaiveDate]) {
    if dates.is_empty() {
        return;
    }
    let ticks = [0, dates.len() / 2, dates.len() - 1];
    for index in ticks {
        svg.push_str(&text_el(
            x_at(index, dates.len()),
            HEIGHT - PAD_BOTTOM + 16.0,
            "middle",
            &dates[index].format("%Y-%m-%d").to_string(),
        ));
    }
}

fn legend(svg: &mut String, entries: &[(&str, &str)]) {
    let mut x = PAD_LEFT + 8.0;
    let y = PAD_TOP + 6.0;
    for (label, color) in entries {
        svg.push_str(&format!(
            r#"<line x1="{x:.1}" y1="{y:.1}" x2="{x2:.1}" y2="{y:.1}" stroke="{color}" stroke-width="2"/>"#,
            x2 = x + 16.0,
        ));
        svg.push_str(&text_el(x + 20.0, y + 3.0, "start", label));
        x += 24.0 + 7.0 * label.chars().count() as f64;
    }
}

fn cumulative_growth(values: &[f64]) -> Vec<f64> {
    let mut cum = 1.0;
    values
        .iter()
        .map(|r| {
            cum *= 1.0 + r;
            cum - 1.0
        })
        .collect()
}

/// Equity curve: cumulative return of the portfolio, benchmark overlaid
/// when present (both restricted to the shared window).
pub fn equity_curve(
    returns: &ReturnSeries,
    benchmark: Option<&ReturnSeries>,
    ctx: &ChartContext,
) -> String {
    let (portfolio, benchmark) = match benchmark {
        Some(bench) => {
            let (r, b) = returns.align(bench);
            if r.is_empty() {
                (returns.clone(), None)
            } else {
                (r, Some(b))
            }
        }
        None => (returns.clone(), None),
    };

    let cum_portfolio = cumulative_growth(portfolio.values());
    let cum_benchmark = benchmark.as_ref().map(|b| cumulative_growth(b.values()));

    let mut min = 0.0_f64;
    let mut max = 0.0_f64;
    for v in cum_portfolio
        .iter()
        .chain(cum_benchmark.iter().flatten())
    {
        min = min.min(*v);
        max = max.max(*v);
    }
    let scale = y_scaler(min, max);

    let mut svg = svg_open(ctx);
    y_axis(&mut svg, min, max, &scale);

    let points: Vec<(f64, f64)> = cum_portfolio
        .iter()
        .enumerate()
        .map(|(i, v)| (x_at(i, cum_portfolio.len()), scale(*v)))
        .collect();
    svg.push_str(&polyline(&points, PRIMARY, 1.6));

    if let Some(cum_bench) = &cum_benchmark {
        let points: Vec<(f64, f64)> = cum_bench
            .iter()
            .enumerate()
            .map(|(i, v)| (x_at(i, cum_bench.len()), scale(*v)))
            .collect();
        svg.push_str(&polyline(&points, NEGATIVE, 1.3));
    }

    x_axis(&mut svg, portfolio.dates());

    let portfolio_label = portfolio
        .name()
        .map_or_else(
            || Label::Portfolio.text(ctx.language).to_owned(),
            |name| escape_html(name),
        );
    let benchmark_label = benchmark.as_ref().map(|b| {
        b.name().map_or_else(
            || Label::Benchmark.text(ctx.language).to_owned(),
            |name| escape_html(name),
        )
    });
    let mut entries = vec![(portfolio_label.as_str(), PRIMARY)];
    if let Some(label) = &benchmark_label {
        entries.push((label.as_str(), NEGATIVE));
    }
    legend(&mut svg, &entries);

    wrap(Label::CumulativeReturns.text(ctx.language), svg)
}

/// Drawdown chart: filled area below the running peak, deepest point
/// marked.
pub fn drawdown(returns: &ReturnSeries, ctx: &ChartContext) -> String {
    let dd = drawdown_series(returns.values());
    let min = dd.iter().copied().fold(0.0_f64, f64::min);
    let scale = y_scaler(min, 0.0);

    let mut svg = svg_open(ctx);
    y_axis(&mut svg, min, 0.0, &scale);

    if !dd.is_empty() {
        let mut area: Vec<String> = Vec::with_capacity(dd.len() + 2);
        area.push(format!("{:.1},{:.1}", x_at(0, dd.len()), scale(0.0)));
        for (i, v) in dd.iter().enumerate() {
            area.push(format!("{:.1},{:.1}", x_at(i, dd.len()), scale(*v)));
        }
        area.push(format!(
            "{:.1},{:.1}",
            x_at(dd.len() - 1, dd.len()),
            scale(0.0)
        ));
        svg.push_str(&format!(
            r#"<polygon fill="{NEGATIVE}" fill-opacity="0.25" stroke="{NEGATIVE}" stroke-width="1.2" points="{}"/>"#,
            area.join(" ")
        ));

        // Mark the trough.
        if let Some(trough) = dd
            .iter()
            .enumerate()
            .min_by(|(_, a), (_, b)| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal))
            .map(|(i, v)| (x_at(i, dd.len()), scale(*v)))
        {
            svg.push_str(&format!(
                r##"<circle cx="{:.1}" cy="{:.1}" r="3" fill="{NEGATIVE}" stroke="#ffffff" stroke-width="1.5"/>"##,
                trough.0, trough.1
            ));
        }
    }

    x_axis(&mut svg, returns.dates());
    wrap(Label::Drawdown.text(ctx.language), svg)
}

/// Return distribution histogram with sign-colored bins and a dashed mean
/// marker.
pub fn distribution(returns: &ReturnSeries, ctx: &ChartContext) -> String {
    let values = returns.values();
    let mut svg = svg_open(ctx);

    if !values.is_empty() {
        let bins = (values.len() / 10).clamp(5, 50);
        let lo = values.iter().copied().fold(f64::INFINITY, f64::min);
        let hi = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        let span = if hi > lo { hi - lo } else { 1.0 };
        let bin_width = span / bins as f64;

        let mut counts = vec![0_usize; bins];
        for v in values {
            let index = (((v - lo) / bin_width) as usize).min(bins - 1);
            counts[index] += 1;
        }
        let peak = counts.iter().copied().max().unwrap_or(1).max(1);

        let bar_width = plot_width() / bins as f64;
        for (i, count) in counts.iter().enumerate() {
            let height = *count as f64 / peak as f64 * plot_height();
            let x = PAD_LEFT + i as f64 * bar_width;
            let midpoint = lo + (i as f64 + 0.5) * bin_width;
            let color = if midpoint < 0.0 { NEGATIVE } else { POSITIVE };
            svg.push_str(&format!(
                r##"<rect x="{x:.1}" y="{y:.1}" width="{w:.1}" height="{height:.1}" fill="{color}" fill-opacity="0.6" stroke="#ffffff" stroke-width="0.5"/>"##,
                y = PAD_TOP + plot_height() - height,
                w = bar_width.max(1.0),
            ));
        }

        // Dashed mean marker.
        let mean_value = mean(values);
        let mean_x = PAD_LEFT + (mean_value - lo) / span * plot_width();
        svg.push_str(&format!(
            r##"<line x1="{mean_x:.1}" y1="{y1:.1}" x2="{mean_x:.1}" y2="{y2:.1}" stroke="#1d1d1f" stroke-width="1.5" stroke-dasharray="4 3"/>"##,
            y1 = PAD_TOP,
            y2 = PAD_TOP + plot_height(),
        ));
        svg.push_str(&text_el(
            mean_x + 4.0,
            PAD_TOP + 10.0,
            "start",
            &format!(
                "{}: {}",
                Label::Mean.text(ctx.language),
                format_percent(mean_value)
            ),
        ));

        // X-axis extremes as percentages.
        svg.push_str(&text_el(
            PAD_LEFT,
            HEIGHT - PAD_BOTTOM + 16.0,
            "start",
            &format_percent(lo),
        ));
        svg.push_str(&text_el(
            WIDTH - PAD_RIGHT,
            HEIGHT - PAD_BOTTOM + 16.0,
            "end",
            &format_percent(hi),
        ));
    }

    wrap(Label::ReturnDistribution.text(ctx.language), svg)
}

/// Monthly returns bar chart: periodic returns compounded by calendar
/// month, most recent 24 months.
pub fn monthly_returns(returns: &ReturnSeries, ctx: &ChartContext) -> String {
    let mut months: Vec<((i32, u32), f64)> = Vec::new();
    for (date, value) in returns.dates().iter().zip(returns.values()) {
        let key = (date.year(), date.month());
        match months.last_mut() {
            Some((last_key, growth)) if *last_key == key => *growth *= 1.0 + value,
            _ => months.push((key, 1.0 + value)),
        }
    }
    let bars: Vec<((i32, u32), f64)> = months
        .into_iter()
        .map(|(key, growth)| (key, growth - 1.0))
        .collect();
    let bars = &bars[bars.len().saturating_sub(24)..];

    let mut min = 0.0_f64;
    let mut max = 0.0_f64;
    for (_, v) in bars {
        min = min.min(*v);
        max = max.max(*v);
    }
    let scale = y_scaler(min, max);

    let mut svg = svg_open(ctx);
    y_axis(&mut svg, min, max, &scale);

    if !bars.is_empty() {
        let slot = plot_width() / bars.len() as f64;
        let bar_width = (slot * 0.8).max(1.0);
        let zero_y = scale(0.0);

        for (i, ((year, month), value)) in bars.iter().enumerate() {
            let x = PAD_LEFT + i as f64 * slot + (slot - bar_width) / 2.0;
            let value_y = scale(*value);
            let (y, height) = if *value >= 0.0 {
                (value_y, zero_y - value_y)
            } else {
                (zero_y, value_y - zero_y)
            };
            let color = if *value >= 0.0 { POSITIVE } else { NEGATIVE };
            svg.push_str(&format!(
                r#"<rect x="{x:.1}" y="{y:.1}" width="{bar_width:.1}" height="{h:.1}" fill="{color}" fill-opacity="0.8"/>"#,
                h = height.max(0.5),
            ));

            // Label roughly every fourth month to keep the axis readable.
            if i % 4 == 0 || i + 1 == bars.len() {
                svg.push_str(&text_el(
                    x + bar_width / 2.0,
                    HEIGHT - PAD_BOTTOM + 16.0,
                    "middle",
                    &format!("{year}-{month:02}"),
                ));
            }
        }

        svg.push_str(&format!(
            r##"<line x1="{x1:.1}" y1="{zero_y:.1}" x2="{x2:.1}" y2="{zero_y:.1}" stroke="#1d1d1f" stroke-opacity="0.3" stroke-width="1"/>"##,
            x1 = PAD_LEFT,
            x2 = WIDTH - PAD_RIGHT,
        ));
    }

    wrap(Label::MonthlyReturns.text(ctx.language), svg)
}
