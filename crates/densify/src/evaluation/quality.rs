//! Quality metrics for a densified series.
//!
//! ## Purpose
//!
//! Summarises an interpolated series: level and spread, a smoothness proxy
//! built from first differences, and how much denser the output is than the
//! cleaned input.
//!
//! ## Design notes
//!
//! * **Omission over zero**: Metrics that need two points are `None` for one
//!   point; a zero would read as "perfectly smooth".
//! * **Generics**: The underlying reductions live in `math::stats`.
//!
//! ## Invariants
//!
//! * `min <= mean <= max`.
//! * Smoothness metrics and the standard deviation are non-negative.
//!
//! ## Non-goals
//!
//! * This module does not compare against held-out observations (see `holdout`).

// External dependencies
use core::fmt::{Display, Formatter, Result as FmtResult};

// Internal dependencies
use crate::math::stats::{abs_diff_summary, mean, min_max, sample_std};
use crate::primitives::errors::DensifyError;
use crate::primitives::series::TimeSeries;

// ============================================================================
// Report Structures
// ============================================================================

/// First-difference smoothness proxy.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Smoothness {
    /// Mean of `|v[i+1] - v[i]|`.
    pub mean_abs_diff: f64,

    /// Maximum of `|v[i+1] - v[i]|`.
    pub max_abs_diff: f64,
}

/// Summary statistics of an interpolated series.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct QualityReport {
    /// Number of interpolated points.
    pub points: usize,

    /// Mean value.
    pub mean: f64,

    /// Sample standard deviation; `None` for a single point.
    pub std: Option<f64>,

    /// Minimum value.
    pub min: f64,

    /// Maximum value.
    pub max: f64,

    /// First-difference metrics; `None` for a single point.
    pub smoothness: Option<Smoothness>,

    /// Interpolated count over cleaned original count; `None` when the
    /// original count is zero.
    pub density_ratio: Option<f64>,
}

impl QualityReport {
    /// Compute the report for `interpolated`, whose input had
    /// `original_points` valid observations.
    ///
    /// # Errors
    ///
    /// * [`DensifyError::InsufficientData`] if `interpolated` is empty.
    pub fn compute(
        interpolated: &TimeSeries,
        original_points: usize,
    ) -> Result<Self, DensifyError> {
        let vals = interpolated.values();
        let (min, max) = min_max(vals).ok_or(DensifyError::InsufficientData { got: 0, min: 1 })?;
        let mean = mean(vals).ok_or(DensifyError::InsufficientData { got: 0, min: 1 })?;

        let smoothness = abs_diff_summary(vals).map(|(mean_abs_diff, max_abs_diff)| Smoothness {
            mean_abs_diff,
            max_abs_diff,
        });
        let density_ratio =
            (original_points > 0).then(|| vals.len() as f64 / original_points as f64);

        Ok(Self {
            points: vals.len(),
            mean,
            std: sample_std(vals),
            min,
            max,
            smoothness,
            density_ratio,
        })
    }
}

impl Display for QualityReport {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        writeln!(f, "Quality Report:")?;
        writeln!(f, "  Points:          {}", self.points)?;
        writeln!(f, "  Mean:            {:.4}", self.mean)?;
        if let Some(std) = self.std {
            writeln!(f, "  Std:             {std:.4}")?;
        }
        writeln!(f, "  Min:             {:.4}", self.min)?;
        writeln!(f, "  Max:             {:.4}", self.max)?;
        if let Some(s) = self.smoothness {
            writeln!(f, "  Mean |diff|:     {:.4}", s.mean_abs_diff)?;
            writeln!(f, "  Max |diff|:      {:.4}", s.max_abs_diff)?;
        }
        if let Some(ratio) = self.density_ratio {
            writeln!(f, "  Density ratio:   {ratio:.2}")?;
        }
        Ok(())
    }
}

// ============================================================================
// Tests
// ============================================================================
