//! Time-value series types.
//!
//! ## Purpose
//!
//! This module defines the raw input series handed over by the acquisition
//! collaborator ([`Series`]) and the cleaned, gap-free series consumed and
//! produced by the interpolation strategies ([`TimeSeries`]).
//!
//! ## Design notes
//!
//! * **Missing values**: `None` and non-finite readings are both treated as missing.
//! * **Time zones**: Constructors accept any `chrono::TimeZone` and normalise to UTC.
//! * **Axis check**: A raw series may carry an ordinal (integer) index; cleaning rejects it.
//!
//! ## Invariants
//!
//! * `TimeSeries` timestamps are strictly increasing.
//! * `TimeSeries` values are all finite.
//! * Index and value vectors always have the same length.
//!
//! ## Non-goals
//!
//! * This module does not sort or deduplicate input; unordered input is rejected.
//! * This module does not interpolate.

// External dependencies
use chrono::{DateTime, TimeZone, Utc};

// Internal dependencies
use crate::primitives::errors::DensifyError;

// ============================================================================
// Axis
// ============================================================================

/// Index of a raw series.
#[derive(Debug, Clone, PartialEq)]
pub enum Axis {
    /// Timestamps normalised to UTC.
    Temporal(Vec<DateTime<Utc>>),

    /// A plain integer index with no notion of time.
    Ordinal(Vec<i64>),
}

impl Axis {
    /// Number of index entries.
    pub fn len(&self) -> usize {
        match self {
            Axis::Temporal(ts) => ts.len(),
            Axis::Ordinal(idx) => idx.len(),
        }
    }

    /// Whether the index is empty.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Whether the index is a time axis.
    pub fn is_temporal(&self) -> bool {
        matches!(self, Axis::Temporal(_))
    }
}

// ============================================================================
// Raw Series
// ============================================================================

/// Raw time-value series as delivered by the acquisition collaborator.
#[derive(Debug, Clone, PartialEq)]
pub struct Series {
    axis: Axis,
    values: Vec<Option<f64>>,
}

impl Series {
    /// Create a series on a temporal axis.
    pub fn new<Tz: TimeZone>(
        timestamps: Vec<DateTime<Tz>>,
        values: Vec<Option<f64>>,
    ) -> Result<Self, DensifyError> {
        let timestamps = timestamps
            .into_iter()
            .map(|t| t.with_timezone(&Utc))
            .collect();
        Self::with_axis(Axis::Temporal(timestamps), values)
    }

    /// Create a series from `(timestamp, reading)` pairs.
    pub fn from_readings<Tz, I>(readings: I) -> Self
    where
        Tz: TimeZone,
        I: IntoIterator<Item = (DateTime<Tz>, Option<f64>)>,
    {
        let (timestamps, values): (Vec<_>, Vec<_>) = readings
            .into_iter()
            .map(|(t, v)| (t.with_timezone(&Utc), v))
            .unzip();
        Self {
            axis: Axis::Temporal(timestamps),
            values,
        }
    }

    /// Create a series indexed by plain integers.
    ///
    /// Such a series can be constructed but never cleaned or interpolated.
    pub fn ordinal(index: Vec<i64>, values: Vec<Option<f64>>) -> Result<Self, DensifyError> {
        Self::with_axis(Axis::Ordinal(index), values)
    }

    fn with_axis(axis: Axis, values: Vec<Option<f64>>) -> Result<Self, DensifyError> {
        if axis.len() != values.len() {
            return Err(DensifyError::MismatchedInputs {
                index_len: axis.len(),
                value_len: values.len(),
            });
        }
        Ok(Self { axis, values })
    }

    /// The series index.
    pub fn axis(&self) -> &Axis {
        &self.axis
    }

    /// Raw readings, `None` marking missing entries.
    pub fn values(&self) -> &[Option<f64>] {
        &self.values
    }

    /// Total number of entries, missing included.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether the series has no entries.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Number of non-missing, finite readings.
    pub fn valid_count(&self) -> usize {
        self.values.iter().filter(|v| is_valid(**v)).count()
    }

    /// Drop missing entries and check the time axis.
    ///
    /// # Errors
    ///
    /// * [`DensifyError::InvalidAxis`] if the index is ordinal, or if the
    ///   remaining timestamps are not strictly increasing.
    pub fn clean(&self) -> Result<TimeSeries, DensifyError> {
        let timestamps = match &self.axis {
            Axis::Temporal(ts) => ts,
            Axis::Ordinal(_) => {
                return Err(DensifyError::InvalidAxis(
                    "index is not temporal (found an ordinal integer index)".into(),
                ));
            }
        };

        let mut clean_ts = Vec::with_capacity(timestamps.len());
        let mut clean_vals = Vec::with_capacity(timestamps.len());
        for (&t, &v) in timestamps.iter().zip(self.values.iter()) {
            if let Some(v) = v.filter(|v| v.is_finite()) {
                clean_ts.push(t);
                clean_vals.push(v);
            }
        }

        check_strictly_increasing(&clean_ts)?;
        Ok(TimeSeries {
            timestamps: clean_ts,
            values: clean_vals,
        })
    }
}

impl From<&TimeSeries> for Series {
    fn from(series: &TimeSeries) -> Self {
        Self {
            axis: Axis::Temporal(series.timestamps.clone()),
            values: series.values.iter().copied().map(Some).collect(),
        }
    }
}

#[inline]
fn is_valid(v: Option<f64>) -> bool {
    v.is_some_and(f64::is_finite)
}

fn check_strictly_increasing(timestamps: &[DateTime<Utc>]) -> Result<(), DensifyError> {
    if let Some(pos) = timestamps.windows(2).position(|w| w[1] <= w[0]) {
        return Err(DensifyError::InvalidAxis(format!(
            "timestamps must be strictly increasing, but {} at position {} follows {}",
            timestamps[pos + 1].to_rfc3339(),
            pos + 1,
            timestamps[pos].to_rfc3339()
        )));
    }
    Ok(())
}

// ============================================================================
// Cleaned Series
// ============================================================================

/// Gap-free series with strictly increasing UTC timestamps.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct TimeSeries {
    timestamps: Vec<DateTime<Utc>>,
    values: Vec<f64>,
}

impl TimeSeries {
    /// Create a cleaned series, checking its invariants.
    pub fn new<Tz: TimeZone>(
        timestamps: Vec<DateTime<Tz>>,
        values: Vec<f64>,
    ) -> Result<Self, DensifyError> {
        if timestamps.len() != values.len() {
            return Err(DensifyError::MismatchedInputs {
                index_len: timestamps.len(),
                value_len: values.len(),
            });
        }
        if let Some(pos) = values.iter().position(|v| !v.is_finite()) {
            return Err(DensifyError::parameter(
                "values",
                format!("value at position {pos} is not finite"),
            ));
        }

        let timestamps: Vec<DateTime<Utc>> = timestamps
            .into_iter()
            .map(|t| t.with_timezone(&Utc))
            .collect();
        check_strictly_increasing(&timestamps)?;

        Ok(Self { timestamps, values })
    }

    /// Assemble a series whose invariants the caller already guarantees.
    pub(crate) fn from_parts(timestamps: Vec<DateTime<Utc>>, values: Vec<f64>) -> Self {
        debug_assert_eq!(timestamps.len(), values.len());
        debug_assert!(timestamps.windows(2).all(|w| w[0] < w[1]));
        Self { timestamps, values }
    }

    /// Timestamps in increasing order.
    pub fn timestamps(&self) -> &[DateTime<Utc>] {
        &self.timestamps
    }

    /// Values aligned with [`timestamps`](Self::timestamps).
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Number of points.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether the series has no points.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Iterate over `(timestamp, value)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (DateTime<Utc>, f64)> + '_ {
        self.timestamps
            .iter()
            .copied()
            .zip(self.values.iter().copied())
    }

    /// Earliest timestamp.
    pub fn start(&self) -> Option<DateTime<Utc>> {
        self.timestamps.first().copied()
    }

    /// Latest timestamp.
    pub fn end(&self) -> Option<DateTime<Utc>> {
        self.timestamps.last().copied()
    }

    /// Value stored at exactly `timestamp`, if any.
    pub fn value_at(&self, timestamp: DateTime<Utc>) -> Option<f64> {
        self.timestamps
            .binary_search(&timestamp)
            .ok()
            .map(|i| self.values[i])
    }

    /// Split into the points at `held_out` positions and all others.
    ///
    /// `held_out` must be sorted and in bounds. Returns `(kept, removed)`.
    pub(crate) fn partition(&self, held_out: &[usize]) -> (TimeSeries, TimeSeries) {
        let mut kept = (Vec::new(), Vec::new());
        let mut removed = (Vec::with_capacity(held_out.len()), Vec::new());
        let mut next = held_out.iter().peekable();

        for (i, (t, v)) in self.iter().enumerate() {
            if next.peek() == Some(&&i) {
                next.next();
                removed.0.push(t);
                removed.1.push(v);
            } else {
                kept.0.push(t);
                kept.1.push(v);
            }
        }

        (
            TimeSeries::from_parts(kept.0, kept.1),
            TimeSeries::from_parts(removed.0, removed.1),
        )
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{FixedOffset, TimeDelta};

    fn hours(n: i64) -> Vec<DateTime<Utc>> {
        let start = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        (0..n).map(|i| start + TimeDelta::hours(i)).collect()
    }

    #[test]
    fn clean_drops_missing_and_non_finite() {
        let series = Series::new(
            hours(5),
            vec![Some(1.0), None, Some(f64::NAN), Some(4.0), Some(f64::INFINITY)],
        )
        .unwrap();

        let clean = series.clean().unwrap();
        assert_eq!(series.valid_count(), 2);
        assert_eq!(clean.values(), &[1.0, 4.0]);
        assert_eq!(clean.timestamps(), &[hours(5)[0], hours(5)[3]]);
    }

    #[test]
    fn clean_rejects_ordinal_axis() {
        let series = Series::ordinal(vec![1, 2, 3], vec![Some(1.0), Some(2.0), Some(3.0)]).unwrap();
        assert!(matches!(series.clean(), Err(DensifyError::InvalidAxis(_))));
    }

    #[test]
    fn clean_rejects_duplicate_timestamps() {
        let mut ts = hours(3);
        ts[2] = ts[1];
        let series = Series::new(ts, vec![Some(1.0), Some(2.0), Some(3.0)]).unwrap();
        assert!(matches!(series.clean(), Err(DensifyError::InvalidAxis(_))));
    }

    #[test]
    fn duplicate_hidden_behind_missing_entry_is_accepted() {
        let mut ts = hours(3);
        ts[2] = ts[1];
        let series = Series::new(ts, vec![Some(1.0), None, Some(3.0)]).unwrap();
        assert_eq!(series.clean().unwrap().len(), 2);
    }

    #[test]
    fn mismatched_lengths_are_rejected() {
        let res = Series::new(hours(3), vec![Some(1.0)]);
        assert_eq!(
            res,
            Err(DensifyError::MismatchedInputs {
                index_len: 3,
                value_len: 1
            })
        );
    }

    #[test]
    fn offsets_are_normalised_to_utc() {
        let offset = FixedOffset::east_opt(2 * 3600).unwrap();
        let local = offset.with_ymd_and_hms(2024, 1, 1, 2, 0, 0).unwrap();
        let series = Series::from_readings([(local, Some(3.0))]);
        let clean = series.clean().unwrap();
        assert_eq!(clean.start(), Some(hours(1)[0]));
    }

    #[test]
    fn partition_splits_by_position() {
        let ts = TimeSeries::new(hours(5), vec![0.0, 1.0, 2.0, 3.0, 4.0]).unwrap();
        let (kept, removed) = ts.partition(&[1, 3]);
        assert_eq!(kept.values(), &[0.0, 2.0, 4.0]);
        assert_eq!(removed.values(), &[1.0, 3.0]);
    }
}
