//! Global least-squares polynomial strategy.
//!
//! ## Purpose
//!
//! Fits a single polynomial of a fixed order through all cleaned points and
//! evaluates it on the grid.
//!
//! ## Design notes
//!
//! * **Conditioning**: Time is rescaled onto [0, 1] before building the
//!   Vandermonde matrix; raw epoch seconds raised to the 12th power overflow.
//! * **Solver**: The least-squares problem is solved by SVD, and a numerical rank
//!   below `order + 1` is reported rather than silently regularised.
//!
//! ## Non-goals
//!
//! * The fit is not constrained to the observed value range and may overshoot.

// External dependencies
use chrono::{DateTime, Utc};
use nalgebra::{DMatrix, DVector};

// Internal dependencies
use crate::algorithms::grid::seconds_f64;
use crate::algorithms::interpolation::MAX_POLYNOMIAL_ORDER;
use crate::math::scaling::UnitScale;
use crate::primitives::errors::DensifyError;
use crate::primitives::series::TimeSeries;

/// Singular values below this fraction of the largest count as zero.
const RANK_TOLERANCE: f64 = 1e-10;

const NAME: &str = "polynomial";

// ============================================================================
// Fit
// ============================================================================

/// Fitted polynomial on a unit-scaled time axis.
#[derive(Debug, Clone, PartialEq)]
pub struct PolynomialFit {
    origin: DateTime<Utc>,
    scale: UnitScale<f64>,
    coefficients: Vec<f64>,
}

impl PolynomialFit {
    /// Least-squares fit of order `order` through `series`.
    ///
    /// # Errors
    ///
    /// * [`DensifyError::InvalidParameter`] if `order` exceeds [`MAX_POLYNOMIAL_ORDER`].
    /// * [`DensifyError::NumericFailure`] if fewer than `order + 1` points are
    ///   available or the design matrix is rank deficient.
    pub fn fit(series: &TimeSeries, order: usize) -> Result<Self, DensifyError> {
        if order > MAX_POLYNOMIAL_ORDER {
            return Err(DensifyError::parameter(
                "polynomial_order",
                format!("must be at most {MAX_POLYNOMIAL_ORDER}, got {order}"),
            ));
        }

        let n = series.len();
        let terms = order + 1;
        if n < terms {
            return Err(DensifyError::numeric(
                NAME,
                format!("order {order} needs at least {terms} distinct points, got {n}"),
            ));
        }

        let origin = series
            .start()
            .ok_or_else(|| DensifyError::numeric(NAME, "empty series"))?;
        let x: Vec<f64> = series
            .timestamps()
            .iter()
            .map(|&t| seconds_f64(t - origin))
            .collect();
        let scale = UnitScale::fit(&x)
            .ok_or_else(|| DensifyError::numeric(NAME, "time axis has zero extent"))?;

        let mut design = DMatrix::zeros(n, terms);
        for (i, &xi) in x.iter().enumerate() {
            let u = scale.apply(xi);
            let mut power = 1.0;
            for j in 0..terms {
                design[(i, j)] = power;
                power *= u;
            }
        }
        let rhs = DVector::from_column_slice(series.values());

        let svd = design.svd(true, true);
        let largest = svd.singular_values.max();
        let eps = largest * RANK_TOLERANCE;
        let rank = svd.rank(eps);
        if rank < terms {
            return Err(DensifyError::numeric(
                NAME,
                format!("design matrix is rank deficient (rank {rank} < {terms})"),
            ));
        }

        let beta = svd
            .solve(&rhs, eps)
            .map_err(|e| DensifyError::numeric(NAME, e))?;

        Ok(Self {
            origin,
            scale,
            coefficients: beta.iter().copied().collect(),
        })
    }

    /// Coefficients in increasing power of unit-scaled time.
    pub fn coefficients(&self) -> &[f64] {
        &self.coefficients
    }

    /// Evaluate at a timestamp (Horner's scheme).
    pub fn evaluate(&self, t: DateTime<Utc>) -> f64 {
        let u = self.scale.apply(seconds_f64(t - self.origin));
        self.coefficients
            .iter()
            .rev()
            .fold(0.0, |acc, &c| acc * u + c)
    }
}

/// Fit `series` and evaluate on `grid`.
pub fn interpolate_polynomial(
    series: &TimeSeries,
    grid: &[DateTime<Utc>],
    order: usize,
) -> Result<Vec<f64>, DensifyError> {
    let fit = PolynomialFit::fit(series, order)?;
    Ok(grid.iter().map(|&t| fit.evaluate(t)).collect())
}

// ============================================================================
// Tests
// ============================================================================
