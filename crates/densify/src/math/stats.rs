//! Descriptive statistics over value slices.
//!
//! ## Purpose
//!
//! Small, allocation-free reductions used by the quality and validation
//! reports: mean, sample standard deviation, extrema and first differences.
//!
//! ## Invariants
//!
//! * Empty input yields `None`, never a fabricated zero.
//! * The standard deviation uses the n-1 denominator and needs two values.

// External dependencies
use num_traits::Float;

/// Arithmetic mean.
pub fn mean<T: Float>(vals: &[T]) -> Option<T> {
    if vals.is_empty() {
        return None;
    }
    let n = T::from(vals.len())?;
    let sum = vals.iter().fold(T::zero(), |acc, &v| acc + v);
    Some(sum / n)
}

/// Sample standard deviation (n-1 denominator).
pub fn sample_std<T: Float>(vals: &[T]) -> Option<T> {
    if vals.len() < 2 {
        return None;
    }
    let mean = mean(vals)?;
    let ss = vals.iter().fold(T::zero(), |acc, &v| {
        let d = v - mean;
        acc + d * d
    });
    let denom = T::from(vals.len() - 1)?;
    Some((ss / denom).sqrt())
}

/// Minimum and maximum.
pub fn min_max<T: Float>(vals: &[T]) -> Option<(T, T)> {
    let (&first, rest) = vals.split_first()?;
    Some(
        rest.iter()
            .fold((first, first), |(lo, hi), &v| (lo.min(v), hi.max(v))),
    )
}

/// Mean and maximum of `|v[i+1] - v[i]|`.
pub fn abs_diff_summary<T: Float>(vals: &[T]) -> Option<(T, T)> {
    if vals.len() < 2 {
        return None;
    }
    let (sum, max) = vals
        .windows(2)
        .map(|w| (w[1] - w[0]).abs())
        .fold((T::zero(), T::zero()), |(s, m), d| (s + d, m.max(d)));
    let n = T::from(vals.len() - 1)?;
    Some((sum / n, max))
}
