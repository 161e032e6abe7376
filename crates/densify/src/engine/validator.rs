//! Configuration and input validation.
//!
//! ## Purpose
//!
//! Checks builder parameters and cleaned input before any work is done, so
//! that misconfiguration fails fast with a specific error.
//!
//! ## Design notes
//!
//! * **Fail-Fast**: Validation stops at the first error encountered.
//! * **Stateless**: Every check is an associated function on [`Validator`].
//!
//! ## Non-goals
//!
//! * This module does not clean, sort or repair input.

// Internal dependencies
use crate::algorithms::interpolation::MAX_POLYNOMIAL_ORDER;
use crate::primitives::errors::DensifyError;
use crate::primitives::series::TimeSeries;

/// Validation utility for densification configuration and input data.
pub struct Validator;

impl Validator {
    // ========================================================================
    // Input Validation
    // ========================================================================

    /// Require at least `min` points in a cleaned series.
    pub fn validate_min_points(series: &TimeSeries, min: usize) -> Result<(), DensifyError> {
        if series.len() < min {
            return Err(DensifyError::InsufficientData {
                got: series.len(),
                min,
            });
        }
        Ok(())
    }

    // ========================================================================
    // Parameter Validation
    // ========================================================================

    /// Holdout fraction must lie strictly between 0 and 1.
    pub fn validate_holdout_fraction(fraction: f64) -> Result<(), DensifyError> {
        if !(fraction > 0.0 && fraction < 1.0) {
            return Err(DensifyError::parameter(
                "holdout_fraction",
                format!("must be in (0, 1), got {fraction}"),
            ));
        }
        Ok(())
    }

    /// Polynomial order must not exceed [`MAX_POLYNOMIAL_ORDER`].
    pub fn validate_polynomial_order(order: usize) -> Result<(), DensifyError> {
        if order > MAX_POLYNOMIAL_ORDER {
            return Err(DensifyError::parameter(
                "polynomial_order",
                format!("must be at most {MAX_POLYNOMIAL_ORDER}, got {order}"),
            ));
        }
        Ok(())
    }

    /// Range tolerance must be finite and non-negative.
    pub fn validate_range_tolerance(tolerance: f64) -> Result<(), DensifyError> {
        if !tolerance.is_finite() || tolerance < 0.0 {
            return Err(DensifyError::parameter(
                "range_tolerance",
                format!("must be a finite non-negative fraction, got {tolerance}"),
            ));
        }
        Ok(())
    }

    /// A subset of methods, when given, must not be empty.
    pub fn validate_method_subset(methods: Option<&[String]>) -> Result<(), DensifyError> {
        if methods.is_some_and(<[String]>::is_empty) {
            return Err(DensifyError::parameter(
                "methods",
                "at least one method name is required",
            ));
        }
        Ok(())
    }

    // ========================================================================
    // Builder Validation
    // ========================================================================

    /// Reject a builder in which any parameter was set more than once.
    pub fn validate_no_duplicates(duplicate: Option<&'static str>) -> Result<(), DensifyError> {
        match duplicate {
            Some(parameter) => Err(DensifyError::DuplicateParameter { parameter }),
            None => Ok(()),
        }
    }
}
