//! Range plausibility check for interpolated output.
//!
//! ## Purpose
//!
//! Flags interpolations whose values wander far outside what was observed.
//! Unbounded strategies (polynomial, spline) can overshoot; this check makes
//! the overshoot visible without rejecting the result.
//!
//! ## Key concepts
//!
//! * **Tolerance**: A fraction of the observed range. The interpolated extrema
//!   must stay within the observed range widened by `fraction × (max − min)` on
//!   both sides, and the means must differ by at most the same amount.
//!
//! ## Non-goals
//!
//! * This module does not alter or clip interpolated values.

// Internal dependencies
use crate::math::stats::{mean, min_max};
use crate::primitives::errors::DensifyError;
use crate::primitives::series::TimeSeries;

/// Default tolerance, as a fraction of the observed value range.
pub const DEFAULT_RANGE_TOLERANCE: f64 = 0.2;

/// Outcome of comparing an interpolated series with its source.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct RangeCheck {
    /// Both sub-checks passed.
    pub valid: bool,

    /// Interpolated extrema lie within the widened observed range.
    pub valid_range: bool,

    /// Mean difference is within tolerance.
    pub valid_mean: bool,

    /// Observed `(min, max)`.
    pub original_range: (f64, f64),

    /// Interpolated `(min, max)`.
    pub interpolated_range: (f64, f64),

    /// `|mean(original) − mean(interpolated)|`.
    pub mean_difference: f64,

    /// Absolute tolerance, `fraction × (max − min)`.
    pub tolerance: f64,
}

impl RangeCheck {
    /// Compare `interpolated` with `original` at the given tolerance fraction.
    ///
    /// # Errors
    ///
    /// * [`DensifyError::InvalidParameter`] if `fraction` is negative or not finite.
    /// * [`DensifyError::InsufficientData`] if either series is empty.
    pub fn evaluate(
        original: &TimeSeries,
        interpolated: &TimeSeries,
        fraction: f64,
    ) -> Result<Self, DensifyError> {
        if !fraction.is_finite() || fraction < 0.0 {
            return Err(DensifyError::parameter(
                "range_tolerance",
                format!("must be a finite non-negative fraction, got {fraction}"),
            ));
        }

        let empty = |s: &TimeSeries| DensifyError::InsufficientData {
            got: s.len(),
            min: 1,
        };
        let (o_min, o_max) = min_max(original.values()).ok_or_else(|| empty(original))?;
        let (i_min, i_max) = min_max(interpolated.values()).ok_or_else(|| empty(interpolated))?;
        let o_mean = mean(original.values()).ok_or_else(|| empty(original))?;
        let i_mean = mean(interpolated.values()).ok_or_else(|| empty(interpolated))?;

        let tolerance = (o_max - o_min) * fraction;
        let valid_range = i_min >= o_min - tolerance && i_max <= o_max + tolerance;
        let mean_difference = (o_mean - i_mean).abs();
        let valid_mean = mean_difference <= tolerance;

        Ok(Self {
            valid: valid_range && valid_mean,
            valid_range,
            valid_mean,
            original_range: (o_min, o_max),
            interpolated_range: (i_min, i_max),
            mean_difference,
            tolerance,
        })
    }
}
