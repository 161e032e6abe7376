//! Interpolating cubic spline strategy.
//!
//! ## Purpose
//!
//! Builds the C2 cubic spline through every cleaned point and evaluates it
//! on the grid.
//!
//! ## Design notes
//!
//! * **End conditions**: Not-a-knot (third derivative continuous across the
//!   second and penultimate knots). Two points give the straight line, three
//!   points give the interpolating parabola.
//! * **Solver**: Knot second derivatives come from a tridiagonal system after
//!   eliminating the two end unknowns with the not-a-knot relations.
//! * **Axis**: Knots are placed at fractional seconds since the first timestamp.
//!
//! ## Key concepts
//!
//! * **Second derivatives**: `M[i] = S''(x[i])` fully determine each cubic piece.
//! * **Extrapolation**: Queries outside the knot span follow
//!   [`SplineExtrapolation`]; grids built from the observed span never need it.
//!
//! ## Non-goals
//!
//! * The spline is not shape preserving and may overshoot between knots.

// External dependencies
use chrono::{DateTime, Utc};

// Internal dependencies
use crate::algorithms::grid::seconds_f64;
use crate::math::tridiagonal::solve_tridiagonal;
use crate::primitives::errors::DensifyError;
use crate::primitives::series::TimeSeries;

const NAME: &str = "spline";

// ============================================================================
// Extrapolation Policy
// ============================================================================

/// Behaviour for queries outside the knot span.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum SplineExtrapolation {
    /// Hold the endpoint value (default).
    #[default]
    Clamp,

    /// Continue along the endpoint tangent.
    Linear,
}

// ============================================================================
// Cubic Spline
// ============================================================================

/// Cubic spline in second-derivative form.
#[derive(Debug, Clone, PartialEq)]
pub struct CubicSpline {
    origin: DateTime<Utc>,
    x: Vec<f64>,
    y: Vec<f64>,
    m: Vec<f64>,
    extrapolation: SplineExtrapolation,
}

impl CubicSpline {
    /// Fit the not-a-knot spline through `series`.
    ///
    /// # Errors
    ///
    /// * [`DensifyError::InsufficientData`] for fewer than 2 points.
    /// * [`DensifyError::NumericFailure`] if the knot system cannot be solved.
    pub fn fit(
        series: &TimeSeries,
        extrapolation: SplineExtrapolation,
    ) -> Result<Self, DensifyError> {
        let n = series.len();
        let origin = match series.start() {
            Some(origin) if n >= 2 => origin,
            _ => return Err(DensifyError::InsufficientData { got: n, min: 2 }),
        };

        let x: Vec<f64> = series
            .timestamps()
            .iter()
            .map(|&t| seconds_f64(t - origin))
            .collect();
        let y = series.values().to_vec();
        let m = second_derivatives(&x, &y)?;

        Ok(Self {
            origin,
            x,
            y,
            m,
            extrapolation,
        })
    }

    /// Knot second derivatives.
    pub fn second_derivatives(&self) -> &[f64] {
        &self.m
    }

    /// Evaluate at a timestamp.
    pub fn evaluate(&self, t: DateTime<Utc>) -> f64 {
        self.evaluate_at(seconds_f64(t - self.origin))
    }

    fn evaluate_at(&self, xq: f64) -> f64 {
        let n = self.x.len();
        let (x, y, m) = (&self.x, &self.y, &self.m);

        if xq < x[0] {
            return match self.extrapolation {
                SplineExtrapolation::Clamp => y[0],
                SplineExtrapolation::Linear => y[0] + self.left_slope() * (xq - x[0]),
            };
        }
        if xq > x[n - 1] {
            return match self.extrapolation {
                SplineExtrapolation::Clamp => y[n - 1],
                SplineExtrapolation::Linear => y[n - 1] + self.right_slope() * (xq - x[n - 1]),
            };
        }

        let i = x.partition_point(|&k| k <= xq).saturating_sub(1).min(n - 2);
        let h = x[i + 1] - x[i];
        let a = x[i + 1] - xq;
        let b = xq - x[i];
        m[i] * a * a * a / (6.0 * h)
            + m[i + 1] * b * b * b / (6.0 * h)
            + (y[i] / h - m[i] * h / 6.0) * a
            + (y[i + 1] / h - m[i + 1] * h / 6.0) * b
    }

    fn left_slope(&self) -> f64 {
        let h = self.x[1] - self.x[0];
        (self.y[1] - self.y[0]) / h - h * (2.0 * self.m[0] + self.m[1]) / 6.0
    }

    fn right_slope(&self) -> f64 {
        let n = self.x.len();
        let h = self.x[n - 1] - self.x[n - 2];
        (self.y[n - 1] - self.y[n - 2]) / h + h * (self.m[n - 2] + 2.0 * self.m[n - 1]) / 6.0
    }
}

/// Not-a-knot second derivatives at every knot.
fn second_derivatives(x: &[f64], y: &[f64]) -> Result<Vec<f64>, DensifyError> {
    let n = x.len();
    let h: Vec<f64> = x.windows(2).map(|w| w[1] - w[0]).collect();
    let d: Vec<f64> = y
        .windows(2)
        .zip(&h)
        .map(|(w, &hi)| (w[1] - w[0]) / hi)
        .collect();

    match n {
        2 => return Ok(vec![0.0; 2]),
        3 => {
            let curvature = 2.0 * (d[1] - d[0]) / (x[2] - x[0]);
            return Ok(vec![curvature; 3]);
        }
        _ => {}
    }

    // Unknowns M[1..n-1]; M[0] and M[n-1] are eliminated below.
    let size = n - 2;
    let mut sub = Vec::with_capacity(size - 1);
    let mut diag = Vec::with_capacity(size);
    let mut sup = Vec::with_capacity(size - 1);
    let mut rhs = Vec::with_capacity(size);
    for i in 1..n - 1 {
        diag.push(2.0 * (h[i - 1] + h[i]));
        rhs.push(6.0 * (d[i] - d[i - 1]));
        if i > 1 {
            sub.push(h[i - 1]);
        }
        if i < n - 2 {
            sup.push(h[i]);
        }
    }

    let (h0, h1) = (h[0], h[1]);
    diag[0] = (h0 + h1) * (h0 + 2.0 * h1) / h1;
    sup[0] = (h1 - h0) * (h1 + h0) / h1;

    let (a, b) = (h[n - 3], h[n - 2]);
    diag[size - 1] = (a + b) * (2.0 * a + b) / a;
    sub[size - 2] = (a - b) * (a + b) / a;

    let inner = solve_tridiagonal(&sub, &diag, &sup, &rhs)
        .ok_or_else(|| DensifyError::numeric(NAME, "knot system is singular"))?;

    let mut m = Vec::with_capacity(n);
    m.push(((h0 + h1) * inner[0] - h0 * inner[1]) / h1);
    m.extend_from_slice(&inner);
    m.push(((a + b) * inner[size - 1] - b * inner[size - 2]) / a);

    if m.iter().any(|v| !v.is_finite()) {
        return Err(DensifyError::numeric(NAME, "non-finite second derivative"));
    }
    Ok(m)
}

/// Fit `series` and evaluate on `grid`.
pub fn interpolate_spline(
    series: &TimeSeries,
    grid: &[DateTime<Utc>],
    extrapolation: SplineExtrapolation,
) -> Result<Vec<f64>, DensifyError> {
    let spline = CubicSpline::fit(series, extrapolation)?;
    Ok(grid.iter().map(|&t| spline.evaluate(t)).collect())
}

// ============================================================================
// Tests
// ============================================================================
