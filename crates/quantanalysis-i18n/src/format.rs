//! Locale-aware value formatting.
//!
//! Metric values may legitimately be NaN or ±∞ (the sentinels produced by
//! degenerate formulas); every formatter here renders them as text instead
//! of panicking or printing `inf`.

use chrono::{NaiveDate, NaiveDateTime};

use crate::Language;

/// Render of positive infinity.
const INF: &str = "∞";
/// Render of negative infinity.
const NEG_INF: &str = "-∞";
/// Render of NaN (undefined metric).
const UNDEFINED: &str = "—";

fn sentinel(value: f64) -> Option<&'static str> {
    if value.is_nan() {
        Some(UNDEFINED)
    } else if value == f64::INFINITY {
        Some(INF)
    } else if value == f64::NEG_INFINITY {
        Some(NEG_INF)
    } else {
        None
    }
}

/// Format a fraction as a percentage with two decimals (`0.1234` → `12.34%`).
pub fn format_percent(value: f64) -> String {
    sentinel(value)
        .map(str::to_owned)
        .unwrap_or_else(|| format!("{:.2}%", value * 100.0))
}

/// Format a dimensionless ratio with three decimals.
pub fn format_ratio(value: f64) -> String {
    sentinel(value)
        .map(str::to_owned)
        .unwrap_or_else(|| format!("{value:.3}"))
}

/// Format a plain decimal with four decimals.
pub fn format_decimal(value: f64) -> String {
    sentinel(value)
        .map(str::to_owned)
        .unwrap_or_else(|| format!("{value:.4}"))
}

/// Format a date in the locale convention.
pub fn format_date(language: Language, date: NaiveDate) -> String {
    match language {
        Language::Zh => date.format("%Y年%m月%d日").to_string(),
        Language::En => date.format("%Y-%m-%d").to_string(),
    }
}

/// Format a timestamp in the locale convention.
pub fn format_datetime(language: Language, datetime: NaiveDateTime) -> String {
    match language {
        Language::Zh => datetime.format("%Y年%m月%d日 %H:%M:%S").to_string(),
        Language::En => datetime.format("%Y-%m-%d %H:%M:%S").to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(0.1234, "12.34%")]
    #[case(-0.05, "-5.00%")]
    #[case(f64::INFINITY, "∞")]
    #[case(f64::NEG_INFINITY, "-∞")]
    #[case(f64::NAN, "—")]
    fn percent_formatting(#[case] value: f64, #[case] expected: &str) {
        assert_eq!(format_percent(value), expected);
    }

    #[rstest]
    #[case(1.23456, "1.235")]
    #[case(f64::INFINITY, "∞")]
    fn ratio_formatting(#[case] value: f64, #[case] expected: &str) {
        assert_eq!(format_ratio(value), expected);
    }

    #[test]
    fn decimal_formatting() {
        assert_eq!(format_decimal(0.123456), "0.1235");
        assert_eq!(format_decimal(f64::NAN), "—");
    }

    #[test]
    fn dates_follow_the_locale() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
        assert_eq!(format_date(Language::Zh, date), "2024年03月01日");
        assert_eq!(format_date(Language::En, date), "2024-03-01");
    }
}
