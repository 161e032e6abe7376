//! Affine rescaling of an axis onto the unit interval.
//!
//! The polynomial strategy fits on `u = (x - min) / (max - min)` so that the
//! Vandermonde columns stay within [0, 1] whatever the epoch offset.

// External dependencies
use num_traits::Float;

/// Maps `[min, max]` onto `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UnitScale<T> {
    min: T,
    span: T,
}

impl<T: Float> UnitScale<T> {
    /// Fit the scale to the extent of `vals`.
    ///
    /// Returns `None` for empty input or a zero-width extent.
    pub fn fit(vals: &[T]) -> Option<Self> {
        let (&first, rest) = vals.split_first()?;
        let (min, max) = rest
            .iter()
            .fold((first, first), |(lo, hi), &v| (lo.min(v), hi.max(v)));
        let span = max - min;
        if !(span > T::zero()) || !span.is_finite() {
            return None;
        }
        Some(Self { min, span })
    }

    /// Map a raw value onto the unit scale.
    #[inline]
    pub fn apply(&self, x: T) -> T {
        (x - self.min) / self.span
    }
}
