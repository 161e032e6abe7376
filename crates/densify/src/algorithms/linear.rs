//! Piecewise linear interpolation kernels.
//!
//! ## Purpose
//!
//! Implements the two bounded strategies: linear on a numeric axis of
//! fractional seconds and linear weighted by exact elapsed nanoseconds between
//! bracketing knots.
//!
//! ## Design notes
//!
//! * **Sorted queries**: Grid timestamps are sorted, so brackets are found with a
//!   single forward scan, O(n_knots + n_queries), instead of a binary search per query.
//! * **Boundary handling**: Queries at or outside the ends take the endpoint value.
//! * **Exactness**: Neither kernel rounds elapsed time to whole seconds. The
//!   time-weighted kernel also returns stored values unchanged at knot timestamps.
//!
//! ## Invariants
//!
//! * Every output lies between the two bracketing knot values.

// External dependencies
use chrono::{DateTime, Utc};
use num_traits::Float;

// Internal dependencies
use crate::algorithms::grid::{nanos, seconds_f64};
use crate::primitives::series::TimeSeries;

// ============================================================================
// Numeric Axis Kernels
// ============================================================================

/// Linear interpolation of `(x_knots, y_knots)` at sorted `x_new` positions.
///
/// # Implementation notes
///
/// * Leverages the sorted order of `x_new` for an O(n_knots + n_new) scan.
pub fn interpolate_sorted<T: Float>(x_knots: &[T], y_knots: &[T], x_new: &[T], out: &mut [T]) {
    let n = x_knots.len();
    if n == 0 || x_new.is_empty() {
        return;
    }
    if n == 1 {
        out.fill(y_knots[0]);
        return;
    }

    let mut left = 0;
    for (xi, slot) in x_new.iter().zip(out.iter_mut()) {
        if *xi <= x_knots[0] {
            *slot = y_knots[0];
            continue;
        }
        if *xi >= x_knots[n - 1] {
            *slot = y_knots[n - 1];
            continue;
        }

        while left + 1 < n && x_knots[left + 1] <= *xi {
            left += 1;
        }
        *slot = blend(x_knots, y_knots, left, *xi);
    }
}

#[inline]
fn blend<T: Float>(x: &[T], y: &[T], left: usize, xi: T) -> T {
    let (x0, x1) = (x[left], x[left + 1]);
    let (y0, y1) = (y[left], y[left + 1]);
    let denom = x1 - x0;
    if denom <= T::zero() {
        return y0;
    }
    let alpha = (xi - x0) / denom;
    y0 + alpha * (y1 - y0)
}

// ============================================================================
// Series Strategies
// ============================================================================

/// Linear interpolation on a numeric axis of fractional seconds since the
/// first knot.
pub fn interpolate_linear_series(series: &TimeSeries, grid: &[DateTime<Utc>]) -> Vec<f64> {
    let origin = series.start().unwrap_or_default();
    let x_knots: Vec<f64> = series
        .timestamps()
        .iter()
        .map(|&t| seconds_f64(t - origin))
        .collect();
    let x_new: Vec<f64> = grid.iter().map(|&t| seconds_f64(t - origin)).collect();

    let mut out = vec![0.0; grid.len()];
    interpolate_sorted(&x_knots, series.values(), &x_new, &mut out);
    out
}

/// Linear interpolation weighted by exact elapsed time.
pub fn interpolate_time_weighted(series: &TimeSeries, grid: &[DateTime<Utc>]) -> Vec<f64> {
    let knots = series.timestamps();
    let values = series.values();
    let n = knots.len();
    if n == 0 {
        return Vec::new();
    }

    let mut out = Vec::with_capacity(grid.len());
    let mut left = 0;
    for &t in grid {
        if t <= knots[0] {
            out.push(values[0]);
            continue;
        }
        if t >= knots[n - 1] {
            out.push(values[n - 1]);
            continue;
        }

        while left + 1 < n && knots[left + 1] <= t {
            left += 1;
        }
        if knots[left] == t {
            out.push(values[left]);
            continue;
        }

        let elapsed = nanos(t - knots[left]) as f64;
        let span = nanos(knots[left + 1] - knots[left]) as f64;
        let (y0, y1) = (values[left], values[left + 1]);
        out.push(y0 + (elapsed / span) * (y1 - y0));
    }
    out
}

// ============================================================================
// Tests
// ============================================================================
