//! Interpolation strategy selection and dispatch.
//!
//! ## Purpose
//!
//! This module defines the closed set of interpolation strategies as the
//! [`Method`] enum and dispatches a cleaned series plus a resampling grid to
//! the matching implementation.
//!
//! ## Design notes
//!
//! * **Closed variant**: Strategies are enum variants; the polynomial order is
//!   variant data rather than a loose side parameter.
//! * **Parsing**: Method names parse via `FromStr`; unknown names are an error,
//!   never a silent substitution.
//! * **Ordering**: Methods order by name, then polynomial order, so reports keyed
//!   by method are deterministic.
//!
//! ## Key concepts
//!
//! * **Linear**: Piecewise linear on a fractional-seconds axis.
//! * **TimeWeighted**: Piecewise linear weighted by exact elapsed time.
//! * **Polynomial**: Global least-squares polynomial on a [0, 1] time axis.
//! * **Spline**: Not-a-knot interpolating cubic spline.
//!
//! ## Invariants
//!
//! * Every strategy returns exactly one finite value per grid timestamp.
//!
//! ## Non-goals
//!
//! * This module does not clean input or build grids.

// External dependencies
use core::cmp::Ordering;
use core::fmt::{Display, Formatter, Result as FmtResult};
use core::str::FromStr;

// Internal dependencies
use crate::algorithms::grid::ResampleGrid;
use crate::algorithms::linear::{interpolate_linear_series, interpolate_time_weighted};
use crate::algorithms::polynomial::interpolate_polynomial;
use crate::algorithms::spline::{SplineExtrapolation, interpolate_spline};
use crate::primitives::errors::DensifyError;
use crate::primitives::series::TimeSeries;

/// Polynomial order used when none is given.
pub const DEFAULT_POLYNOMIAL_ORDER: usize = 2;

/// Highest accepted polynomial order.
pub const MAX_POLYNOMIAL_ORDER: usize = 12;

// ============================================================================
// Method
// ============================================================================

/// Interpolation strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Method {
    /// Piecewise linear on a fractional-seconds axis (default).
    #[default]
    Linear,

    /// Piecewise linear weighted by elapsed wall-clock time.
    TimeWeighted,

    /// Global least-squares polynomial of the given order.
    Polynomial {
        /// Polynomial degree.
        order: usize,
    },

    /// Interpolating cubic spline.
    Spline,
}

impl Method {
    /// Polynomial strategy of the default order.
    pub const POLYNOMIAL: Method = Method::Polynomial {
        order: DEFAULT_POLYNOMIAL_ORDER,
    };

    /// All strategies, the polynomial at `order`.
    pub fn all(order: usize) -> [Method; 4] {
        [
            Method::Linear,
            Method::TimeWeighted,
            Method::Polynomial { order },
            Method::Spline,
        ]
    }

    /// Canonical short name.
    pub fn name(&self) -> &'static str {
        match self {
            Method::Linear => "linear",
            Method::TimeWeighted => "time",
            Method::Polynomial { .. } => "polynomial",
            Method::Spline => "spline",
        }
    }

    /// Whether every output value is a convex combination of neighbouring
    /// observations, and therefore stays inside the observed value range.
    pub fn is_bounded(&self) -> bool {
        matches!(self, Method::Linear | Method::TimeWeighted)
    }

    /// Interpolate a cleaned series onto a grid.
    ///
    /// # Errors
    ///
    /// * [`DensifyError::InsufficientData`] for fewer than 2 points.
    /// * [`DensifyError::NumericFailure`] if a polynomial or spline fit breaks down.
    pub fn interpolate(
        &self,
        series: &TimeSeries,
        grid: &ResampleGrid,
    ) -> Result<TimeSeries, DensifyError> {
        self.interpolate_with(series, grid, SplineExtrapolation::default())
    }

    /// Interpolate with an explicit spline extrapolation policy.
    ///
    /// The policy only matters for queries outside the observed span, which a
    /// grid built by [`ResampleGrid::build`] never contains.
    pub fn interpolate_with(
        &self,
        series: &TimeSeries,
        grid: &ResampleGrid,
        extrapolation: SplineExtrapolation,
    ) -> Result<TimeSeries, DensifyError> {
        if series.len() < 2 {
            return Err(DensifyError::InsufficientData {
                got: series.len(),
                min: 2,
            });
        }

        let values = match *self {
            Method::Linear => interpolate_linear_series(series, grid.timestamps()),
            Method::TimeWeighted => interpolate_time_weighted(series, grid.timestamps()),
            Method::Polynomial { order } => {
                interpolate_polynomial(series, grid.timestamps(), order)?
            }
            Method::Spline => interpolate_spline(series, grid.timestamps(), extrapolation)?,
        };

        if let Some(pos) = values.iter().position(|v| !v.is_finite()) {
            return Err(DensifyError::numeric(
                self.name(),
                format!("non-finite value at grid position {pos}"),
            ));
        }

        Ok(TimeSeries::from_parts(grid.timestamps().to_vec(), values))
    }
}

impl Display for Method {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            Method::Polynomial { order } if *order != DEFAULT_POLYNOMIAL_ORDER => {
                write!(f, "polynomial:{order}")
            }
            other => f.write_str(other.name()),
        }
    }
}

impl FromStr for Method {
    type Err = DensifyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim().to_ascii_lowercase();
        match key.as_str() {
            "linear" => Ok(Method::Linear),
            "time" | "time_weighted" | "time-weighted" => Ok(Method::TimeWeighted),
            "polynomial" => Ok(Method::POLYNOMIAL),
            "spline" | "cubic" | "cubic_spline" => Ok(Method::Spline),
            _ => key
                .strip_prefix("polynomial:")
                .and_then(|k| k.parse::<usize>().ok())
                .map(|order| Method::Polynomial { order })
                .ok_or_else(|| DensifyError::UnsupportedMethod(s.to_string())),
        }
    }
}

impl PartialOrd for Method {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Method {
    fn cmp(&self, other: &Self) -> Ordering {
        let order = |m: &Method| match m {
            Method::Polynomial { order } => *order,
            _ => 0,
        };
        self.name()
            .cmp(other.name())
            .then_with(|| order(self).cmp(&order(other)))
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for Method {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for Method {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

// ============================================================================
// Tests
// ============================================================================
