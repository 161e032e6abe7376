//! Error types for densification operations.
//!
//! ## Purpose
//!
//! This module defines every failure the engine can report: input validation,
//! axis problems, method selection, numeric breakdowns inside a strategy and
//! builder misconfiguration.
//!
//! ## Design notes
//!
//! * **Contextual**: Variants carry the values needed for diagnosis (counts, names, reasons).
//! * **Deferred**: Builder errors are recorded while chaining and surfaced by `build()`.
//! * **Cloneable**: Errors are stored per method inside comparison and holdout reports.
//!
//! ## Key concepts
//!
//! 1. **Data errors**: Too few valid points, mismatched lengths.
//! 2. **Axis errors**: Non-temporal index, duplicate or decreasing timestamps.
//! 3. **Method errors**: Unknown method names, failed numeric fits.
//! 4. **Parameter errors**: Invalid step, fraction or polynomial order.
//!
//! ## Non-goals
//!
//! * This module does not perform the validation logic itself.
//! * This module does not provide error recovery or fallback strategies.

// External dependencies
use thiserror::Error;

// ============================================================================
// Error Type
// ============================================================================

/// Error type for densification operations.
#[derive(Debug, Clone, PartialEq, Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum DensifyError {
    /// Fewer valid (non-missing) points than the operation requires.
    #[error("Insufficient data: got {got} valid points, need at least {min}")]
    InsufficientData {
        /// Number of valid points available.
        got: usize,
        /// Minimum required points.
        min: usize,
    },

    /// The series index is not temporal, or is not strictly increasing.
    #[error("Invalid axis: {0}")]
    InvalidAxis(String),

    /// The requested method name is not among the known strategies.
    #[error("Unsupported interpolation method: '{0}'")]
    UnsupportedMethod(String),

    /// A strategy's internal fit failed.
    #[error("Numeric failure in {method} interpolation: {reason}")]
    NumericFailure {
        /// Name of the failing method.
        method: String,
        /// What went wrong.
        reason: String,
    },

    /// Index and value vectors must have the same number of elements.
    #[error("Length mismatch: index has {index_len} entries, values have {value_len}")]
    MismatchedInputs {
        /// Number of index entries.
        index_len: usize,
        /// Number of values.
        value_len: usize,
    },

    /// Resampling step is zero, negative or could not be parsed.
    #[error("Invalid step: {0}")]
    InvalidStep(String),

    /// A numeric parameter is outside its allowed range.
    #[error("Invalid {name}: {reason}")]
    InvalidParameter {
        /// Name of the parameter.
        name: &'static str,
        /// Constraint that was violated.
        reason: String,
    },

    /// Parameter was set multiple times in the builder.
    #[error(
        "Parameter '{parameter}' was set multiple times. Each parameter can only be configured once."
    )]
    DuplicateParameter {
        /// Name of the parameter that was set multiple times.
        parameter: &'static str,
    },
}

impl DensifyError {
    /// Shorthand for a numeric failure inside `method`.
    pub(crate) fn numeric(method: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::NumericFailure {
            method: method.into(),
            reason: reason.into(),
        }
    }

    /// Shorthand for an out-of-range parameter.
    pub(crate) fn parameter(name: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidParameter {
            name,
            reason: reason.into(),
        }
    }
}
