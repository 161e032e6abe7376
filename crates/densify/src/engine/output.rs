//! Output of a single densification run.
//!
//! ## Purpose
//!
//! This module defines [`DensifyResult`], which bundles the densified series
//! with its quality metrics, its range check and a before/after summary of
//! the observed values.
//!
//! ## Design notes
//!
//! * **Ergonomics**: Implements `Display` as a human-readable run summary.
//!
//! ## Non-goals
//!
//! * This module does not perform calculations beyond trivial ratios.

// External dependencies
use core::fmt::{Display, Formatter, Result as FmtResult};

// Internal dependencies
use crate::algorithms::interpolation::Method;
use crate::evaluation::plausibility::RangeCheck;
use crate::evaluation::quality::QualityReport;
use crate::primitives::series::TimeSeries;
use crate::primitives::step::Step;

// ============================================================================
// Result Structure
// ============================================================================

/// Minimum, maximum and mean of a value set.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ValueSummary {
    /// Smallest value.
    pub min: f64,
    /// Largest value.
    pub max: f64,
    /// Arithmetic mean.
    pub mean: f64,
}

/// Densified series with its diagnostics.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct DensifyResult {
    /// Strategy used.
    pub method: Method,

    /// Grid step used.
    pub step: Step,

    /// Entries in the raw input, missing included.
    pub raw_points: usize,

    /// Valid points after cleaning.
    pub original_points: usize,

    /// Summary of the cleaned input values.
    pub original: ValueSummary,

    /// The densified series.
    pub series: TimeSeries,

    /// Quality metrics of the densified series.
    pub quality: QualityReport,

    /// Range plausibility against the cleaned input.
    pub range_check: RangeCheck,
}

impl DensifyResult {
    /// Number of densified points.
    pub fn interpolated_points(&self) -> usize {
        self.series.len()
    }

    /// Densified count over cleaned count.
    pub fn improvement_ratio(&self) -> Option<f64> {
        self.quality.density_ratio
    }

    /// Summary of the densified values.
    pub fn interpolated(&self) -> ValueSummary {
        ValueSummary {
            min: self.quality.min,
            max: self.quality.max,
            mean: self.quality.mean,
        }
    }
}

impl Display for DensifyResult {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        writeln!(f, "Summary:")?;
        writeln!(f, "  Method:              {}", self.method)?;
        writeln!(f, "  Step:                {}", self.step)?;
        writeln!(f, "  Original points:     {}", self.original_points)?;
        writeln!(f, "  Interpolated points: {}", self.interpolated_points())?;
        if let Some(ratio) = self.improvement_ratio() {
            writeln!(f, "  Improvement ratio:   {ratio:.2}x")?;
        }
        writeln!(f)?;

        let interpolated = self.interpolated();
        for (label, s) in [("Original", self.original), ("Interpolated", interpolated)] {
            writeln!(f, "{label} values:")?;
            writeln!(f, "  Mean: {:.2}", s.mean)?;
            writeln!(f, "  Min:  {:.2}", s.min)?;
            writeln!(f, "  Max:  {:.2}", s.max)?;
        }

        if !self.range_check.valid {
            writeln!(
                f,
                "Warning: range check failed (tolerance {:.2})",
                self.range_check.tolerance
            )?;
        }
        Ok(())
    }
}
