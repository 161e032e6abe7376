//! Resampling grid construction and nearest-timestamp lookup.
//!
//! ## Purpose
//!
//! Builds the regular target timestamp sequence an interpolation strategy
//! must populate, and locates the grid point nearest to an arbitrary
//! timestamp.
//!
//! ## Design notes
//!
//! * **Clipped**: The grid runs from the first observed timestamp in whole
//!   steps and stops at the last step not beyond the final observation.
//! * **Exact arithmetic**: Grid points are accumulated with `TimeDelta`
//!   additions, never through floating point.
//! * **Lookup**: Nearest search is a binary search on the sorted grid.
//!
//! ## Invariants
//!
//! * Grid timestamps are strictly increasing and spaced exactly one step apart.
//! * `grid.start() == series.start()` and `grid.end() <= series.end()`.
//!
//! ## Non-goals
//!
//! * This module does not extrapolate or pad beyond the observed span.

// External dependencies
use chrono::{DateTime, TimeDelta, Utc};
use std::iter::successors;

// Internal dependencies
use crate::primitives::errors::DensifyError;
use crate::primitives::series::TimeSeries;
use crate::primitives::step::Step;

/// Upper bound on the number of grid points a single build may produce.
///
/// Five million points is about 9.5 years at one-minute spacing. With the
/// interpolated values that is roughly 100 MB for one densified series.
pub const MAX_GRID_POINTS: usize = 5_000_000;

// ============================================================================
// Grid
// ============================================================================

/// Regular, strictly increasing target timestamps.
#[derive(Debug, Clone, PartialEq)]
pub struct ResampleGrid {
    timestamps: Vec<DateTime<Utc>>,
    step: Step,
}

impl ResampleGrid {
    /// Build the grid spanning a cleaned series at the given step.
    ///
    /// # Errors
    ///
    /// * [`DensifyError::InsufficientData`] if the series has fewer than 2 points.
    /// * [`DensifyError::InvalidStep`] if the step would produce more than
    ///   [`MAX_GRID_POINTS`] points.
    pub fn build(series: &TimeSeries, step: Step) -> Result<Self, DensifyError> {
        let (start, end) = match (series.start(), series.end()) {
            (Some(s), Some(e)) if series.len() >= 2 => (s, e),
            _ => {
                return Err(DensifyError::InsufficientData {
                    got: series.len(),
                    min: 2,
                });
            }
        };

        let span = nanos(end - start);
        let stride = nanos(step.as_delta());
        let count = span / stride + 1;
        let count = usize::try_from(count)
            .ok()
            .filter(|&c| c <= MAX_GRID_POINTS)
            .ok_or_else(|| {
                DensifyError::InvalidStep(format!(
                    "step {step} over the observed span would produce {count} points (max {MAX_GRID_POINTS})"
                ))
            })?;

        let delta = step.as_delta();
        let timestamps: Vec<_> = successors(Some(start), |t| t.checked_add_signed(delta))
            .take(count)
            .collect();

        Ok(Self { timestamps, step })
    }

    /// Grid timestamps.
    pub fn timestamps(&self) -> &[DateTime<Utc>] {
        &self.timestamps
    }

    /// Grid spacing.
    pub fn step(&self) -> Step {
        self.step
    }

    /// Number of grid points.
    pub fn len(&self) -> usize {
        self.timestamps.len()
    }

    /// Whether the grid has no points.
    pub fn is_empty(&self) -> bool {
        self.timestamps.is_empty()
    }

    /// First grid timestamp.
    pub fn start(&self) -> Option<DateTime<Utc>> {
        self.timestamps.first().copied()
    }

    /// Last grid timestamp.
    pub fn end(&self) -> Option<DateTime<Utc>> {
        self.timestamps.last().copied()
    }

    /// Position of the grid point nearest to `t` (ties go to the earlier point).
    pub fn nearest(&self, t: DateTime<Utc>) -> Option<usize> {
        nearest_index(&self.timestamps, t)
    }
}

// ============================================================================
// Utilities
// ============================================================================

/// Total nanoseconds in a duration, without the `i64` overflow of
/// `TimeDelta::num_nanoseconds`.
#[inline]
pub fn nanos(delta: TimeDelta) -> i128 {
    i128::from(delta.num_seconds()) * 1_000_000_000 + i128::from(delta.subsec_nanos())
}

/// Duration in fractional seconds.
#[inline]
pub fn seconds_f64(delta: TimeDelta) -> f64 {
    delta.num_seconds() as f64 + f64::from(delta.subsec_nanos()) * 1e-9
}

/// Position of the timestamp in `sorted` nearest to `t`.
///
/// # Implementation notes
///
/// * Binary search via `partition_point`, O(log n).
/// * Equidistant neighbours resolve to the earlier timestamp.
pub fn nearest_index(sorted: &[DateTime<Utc>], t: DateTime<Utc>) -> Option<usize> {
    if sorted.is_empty() {
        return None;
    }

    let right = sorted.partition_point(|g| *g < t);
    if right == 0 {
        return Some(0);
    }
    if right == sorted.len() {
        return Some(sorted.len() - 1);
    }

    let left = right - 1;
    if t - sorted[left] <= sorted[right] - t {
        Some(left)
    } else {
        Some(right)
    }
}

// ============================================================================
// Tests
// ============================================================================
