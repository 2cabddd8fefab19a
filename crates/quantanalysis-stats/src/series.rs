//! Date-indexed return series.
//!
//! `ReturnSeries` is the single data model shared by the metric kernels and
//! the report renderer: an ordered sequence of periodic returns indexed by
//! date. Construction normalizes the input so that every downstream
//! computation can assume a sorted, duplicate-free, finite series.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors that can occur when constructing a return series.
#[derive(Debug, Error)]
pub enum SeriesError {
    /// Dates and values have different lengths.
    #[error("series length mismatch: {dates} dates vs {values} values")]
    LengthMismatch {
        /// Number of dates supplied.
        dates: usize,
        /// Number of values supplied.
        values: usize,
    },
}

/// An ordered, date-indexed sequence of periodic returns.
///
/// Invariants enforced at construction:
///
/// * observations are sorted by date, ascending;
/// * duplicate dates are resolved deterministically (the last supplied
///   observation wins);
/// * non-finite values (NaN, ±∞) are dropped.
///
/// An empty series is constructible; [`analyze`](crate::summary::analyze)
/// rejects it with an explicit error so the contract stays observable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReturnSeries {
    dates: Vec<NaiveDate>,
    values: Vec<f64>,
    name: Option<String>,
}

impl ReturnSeries {
    /// Create a series from parallel date and value vectors.
    ///
    /// # Errors
    ///
    /// Returns [`SeriesError::LengthMismatch`] when the vectors differ in
    /// length.
    pub fn new(dates: Vec<NaiveDate>, values: Vec<f64>) -> Result<Self, SeriesError> {
        if dates.len() != values.len() {
            return Err(SeriesError::LengthMismatch {
                dates: dates.len(),
                values: values.len(),
            });
        }

        Ok(Self::from_pairs(
            dates.into_iter().zip(values).collect::<Vec<_>>(),
        ))
    }

    /// Create a series from `(date, value)` pairs.
    pub fn from_pairs(pairs: Vec<(NaiveDate, f64)>) -> Self {
        let mut paired: Vec<(NaiveDate, f64)> =
            pairs.into_iter().filter(|(_, v)| v.is_finite()).collect();

        // Stable sort keeps input order among equal dates, so after the
        // reverse the first occurrence of a date is the last one supplied.
        paired.sort_by_key(|(d, _)| *d);
        paired.reverse();
        paired.dedup_by_key(|(d, _)| *d);
        paired.reverse();

        let (dates, values) = paired.into_iter().unzip();
        Self {
            dates,
            values,
            name: None,
        }
    }

    /// Attach a display name (used as the chart legend label).
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Number of observations.
    pub fn len(&self) -> usize {
        self.dates.len()
    }

    /// Whether the series holds no observations.
    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }

    /// Sorted observation dates.
    pub fn dates(&self) -> &[NaiveDate] {
        &self.dates
    }

    /// Periodic return values, parallel to [`dates`](Self::dates).
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Optional display name.
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// First and last observation dates, or `None` when empty.
    pub fn date_range(&self) -> Option<(NaiveDate, NaiveDate)> {
        match (self.dates.first(), self.dates.last()) {
            (Some(first), Some(last)) => Some((*first, *last)),
            _ => None,
        }
    }

    /// Restrict two series to their shared dates (inner join).
    ///
    /// Both outputs carry exactly the intersection of the two date indices,
    /// in ascending order. The result may be empty when the indices are
    /// disjoint.
    pub fn align(&self, other: &Self) -> (Self, Self) {
        let mut left = Vec::new();
        let mut right = Vec::new();

        let (mut i, mut j) = (0, 0);
        while i < self.dates.len() && j < other.dates.len() {
            match self.dates[i].cmp(&other.dates[j]) {
                std::cmp::Ordering::Less => i += 1,
                std::cmp::Ordering::Greater => j += 1,
                std::cmp::Ordering::Equal => {
                    left.push((self.dates[i], self.values[i]));
                    right.push((other.dates[j], other.values[j]));
                    i += 1;
                    j += 1;
                }
            }
        }

        let mut aligned_left = Self::from_pairs(left);
        aligned_left.name = self.name.clone();
        let mut aligned_right = Self::from_pairs(right);
        aligned_right.name = other.name.clone();
        (aligned_left, aligned_right)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn construction_sorts_by_date() {
        let series = ReturnSeries::new(
            vec![date(2024, 1, 3), date(2024, 1, 1), date(2024, 1, 2)],
            vec![0.3, 0.1, 0.2],
        )
        .unwrap();

        assert_eq!(
            series.dates(),
            &[date(2024, 1, 1), date(2024, 1, 2), date(2024, 1, 3)]
        );
        assert_eq!(series.values(), &[0.1, 0.2, 0.3]);
    }

    #[test]
    fn duplicate_dates_resolve_last_wins() {
        let series = ReturnSeries::new(
            vec![date(2024, 1, 1), date(2024, 1, 2), date(2024, 1, 1)],
            vec![0.1, 0.2, 0.9],
        )
        .unwrap();

        assert_eq!(series.len(), 2);
        assert_eq!(series.values(), &[0.9, 0.2]);
    }

    #[test]
    fn non_finite_values_are_dropped() {
        let series = ReturnSeries::new(
            vec![date(2024, 1, 1), date(2024, 1, 2), date(2024, 1, 3)],
            vec![0.1, f64::NAN, f64::INFINITY],
        )
        .unwrap();

        assert_eq!(series.len(), 1);
        assert_eq!(series.values(), &[0.1]);
    }

    #[test]
    fn length_mismatch_is_rejected() {
        let err = ReturnSeries::new(vec![date(2024, 1, 1)], vec![0.1, 0.2]).unwrap_err();
        assert!(matches!(
            err,
            SeriesError::LengthMismatch {
                dates: 1,
                values: 2
            }
        ));
    }

    #[test]
    fn align_keeps_only_shared_dates() {
        let a = ReturnSeries::new(
            vec![date(2024, 1, 1), date(2024, 1, 2), date(2024, 1, 3)],
            vec![0.1, 0.2, 0.3],
        )
        .unwrap();
        let b = ReturnSeries::new(
            vec![date(2024, 1, 2), date(2024, 1, 3), date(2024, 1, 4)],
            vec![0.5, 0.6, 0.7],
        )
        .unwrap();

        let (left, right) = a.align(&b);
        assert_eq!(left.dates(), &[date(2024, 1, 2), date(2024, 1, 3)]);
        assert_eq!(left.values(), &[0.2, 0.3]);
        assert_eq!(right.values(), &[0.5, 0.6]);
    }

    #[test]
    fn align_of_disjoint_series_is_empty() {
        let a = ReturnSeries::new(vec![date(2024, 1, 1)], vec![0.1]).unwrap();
        let b = ReturnSeries::new(vec![date(2024, 2, 1)], vec![0.2]).unwrap();

        let (left, right) = a.align(&b);
        assert!(left.is_empty());
        assert!(right.is_empty());
    }
}
