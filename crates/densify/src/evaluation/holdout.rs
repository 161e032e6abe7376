//! Holdout validation of interpolation accuracy.
//!
//! ## Purpose
//!
//! Estimates how well each strategy recovers real observations by hiding a
//! random subset of the cleaned points, densifying the rest, and comparing
//! the hidden values with the nearest interpolated value.
//!
//! ## Design notes
//!
//! * **Reproducible**: The split is drawn from `StdRng::seed_from_u64(seed)`;
//!   the same series, fraction and seed always hide the same points.
//! * **Isolation**: A failing method is recorded in its own map entry and does
//!   not abort the others.
//! * **Nearest prediction**: Each hidden point is predicted by the grid point
//!   nearest in time, ties resolved toward the earlier point.
//!
//! ## Key concepts
//!
//! * **Test size**: `max(1, round(n × fraction))`.
//! * **Metrics**: MAE, RMSE and maximum absolute error per method.
//!
//! ## Invariants
//!
//! * `0 < fraction < 1`.
//! * At least two points remain for training.
//!
//! ## Non-goals
//!
//! * This module does not do k-fold or repeated cross-validation.

// External dependencies
use chrono::{DateTime, Utc};
use core::fmt::{Display, Formatter, Result as FmtResult};
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::index::sample;
use std::collections::BTreeMap;

// Internal dependencies
use crate::algorithms::grid::{ResampleGrid, nearest_index};
use crate::algorithms::interpolation::Method;
use crate::algorithms::spline::SplineExtrapolation;
use crate::primitives::errors::DensifyError;
use crate::primitives::observer::{Event, Observer};
use crate::primitives::series::TimeSeries;
use crate::primitives::step::Step;

/// Default fraction of points held out.
pub const DEFAULT_HOLDOUT_FRACTION: f64 = 0.1;

/// Default RNG seed for the split.
pub const DEFAULT_SEED: u64 = 42;

// ============================================================================
// Reports
// ============================================================================

/// Accuracy of one method on the held-out points.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ValidationReport {
    /// Mean absolute error.
    pub mae: f64,

    /// Root mean squared error.
    pub rmse: f64,

    /// Largest absolute error.
    pub max_error: f64,

    /// Number of held-out points evaluated.
    pub evaluated: usize,
}

impl ValidationReport {
    fn from_errors(abs_errors: &[f64]) -> Option<Self> {
        if abs_errors.is_empty() {
            return None;
        }
        let n = abs_errors.len() as f64;
        let mae = abs_errors.iter().sum::<f64>() / n;
        let mse = abs_errors.iter().map(|e| e * e).sum::<f64>() / n;
        let max_error = abs_errors.iter().copied().fold(0.0, f64::max);
        Some(Self {
            mae,
            rmse: mse.sqrt(),
            max_error,
            evaluated: abs_errors.len(),
        })
    }
}

/// Result of a holdout run across methods.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct HoldoutReport {
    /// Points used for training.
    pub train_points: usize,

    /// Points held out.
    pub test_points: usize,

    /// Timestamps of the held-out points, increasing.
    pub test_timestamps: Vec<DateTime<Utc>>,

    /// Seed the split was drawn with.
    pub seed: u64,

    /// Per-method accuracy or failure, keyed by method name.
    pub methods: BTreeMap<String, Result<ValidationReport, DensifyError>>,
}

impl HoldoutReport {
    /// Successful method with the lowest RMSE.
    ///
    /// Ties prefer `linear`, then name order.
    pub fn best_by_rmse(&self) -> Option<&str> {
        self.methods
            .iter()
            .filter_map(|(name, res)| res.as_ref().ok().map(|r| (name.as_str(), r.rmse)))
            .min_by(|(a_name, a), (b_name, b)| {
                a.total_cmp(b)
                    .then_with(|| (*a_name != "linear").cmp(&(*b_name != "linear")))
                    .then_with(|| a_name.cmp(b_name))
            })
            .map(|(name, _)| name)
    }
}

impl Display for HoldoutReport {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        writeln!(f, "Holdout Validation (seed {}):", self.seed)?;
        writeln!(f, "  Train points: {}", self.train_points)?;
        writeln!(f, "  Test points:  {}", self.test_points)?;
        for (name, res) in &self.methods {
            match res {
                Ok(r) => writeln!(
                    f,
                    "  {name:<12} MAE {:.3}  RMSE {:.3}  max {:.3}  (n={})",
                    r.mae, r.rmse, r.max_error, r.evaluated
                )?,
                Err(e) => writeln!(f, "  {name:<12} failed: {e}")?,
            }
        }
        Ok(())
    }
}

// ============================================================================
// Validator
// ============================================================================

/// Seeded holdout validator.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HoldoutValidator {
    fraction: f64,
    seed: u64,
    extrapolation: SplineExtrapolation,
}

impl Default for HoldoutValidator {
    fn default() -> Self {
        Self {
            fraction: DEFAULT_HOLDOUT_FRACTION,
            seed: DEFAULT_SEED,
            extrapolation: SplineExtrapolation::default(),
        }
    }
}

impl HoldoutValidator {
    /// Validator holding out `fraction` of the points with the given seed.
    ///
    /// # Errors
    ///
    /// * [`DensifyError::InvalidParameter`] unless `0 < fraction < 1`.
    pub fn new(fraction: f64, seed: u64) -> Result<Self, DensifyError> {
        if !(fraction > 0.0 && fraction < 1.0) {
            return Err(DensifyError::parameter(
                "holdout_fraction",
                format!("must be in (0, 1), got {fraction}"),
            ));
        }
        Ok(Self {
            fraction,
            seed,
            ..Self::default()
        })
    }

    /// Use the given spline extrapolation policy for the training fits.
    pub fn with_extrapolation(mut self, extrapolation: SplineExtrapolation) -> Self {
        self.extrapolation = extrapolation;
        self
    }

    /// Fraction of points held out.
    pub fn fraction(&self) -> f64 {
        self.fraction
    }

    /// Split seed.
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Number of points held out from a series of `n` points.
    pub fn test_size(&self, n: usize) -> usize {
        ((n as f64 * self.fraction).round() as usize).max(1)
    }

    /// Draw the sorted positions to hold out.
    ///
    /// # Errors
    ///
    /// * [`DensifyError::InsufficientData`] if fewer than two points would remain.
    pub fn split_indices(&self, n: usize) -> Result<Vec<usize>, DensifyError> {
        let test = self.test_size(n);
        if n < test + 2 {
            return Err(DensifyError::InsufficientData {
                got: n,
                min: test + 2,
            });
        }

        let mut rng = StdRng::seed_from_u64(self.seed);
        let mut picked = sample(&mut rng, n, test).into_vec();
        picked.sort_unstable();
        Ok(picked)
    }

    /// Validate each method on a cleaned series.
    ///
    /// # Errors
    ///
    /// Fails only if the split itself is impossible; per-method failures are
    /// stored in the report.
    pub fn validate(
        &self,
        series: &TimeSeries,
        step: Step,
        methods: &[Method],
        observer: &dyn Observer,
    ) -> Result<HoldoutReport, DensifyError> {
        let held_out = self.split_indices(series.len())?;
        let (train, test) = series.partition(&held_out);
        observer.observe(&Event::HoldoutSplit {
            train: train.len(),
            test: test.len(),
            seed: self.seed,
        });

        let grid = ResampleGrid::build(&train, step);
        let mut results = BTreeMap::new();
        for method in methods {
            let name = method.to_string();
            let res = grid
                .as_ref()
                .map_err(Clone::clone)
                .and_then(|grid| self.score(method, &train, grid, &test));
            if let Err(error) = &res {
                observer.observe(&Event::MethodFailed {
                    method: &name,
                    error,
                });
            }
            results.insert(name, res);
        }

        Ok(HoldoutReport {
            train_points: train.len(),
            test_points: test.len(),
            test_timestamps: test.timestamps().to_vec(),
            seed: self.seed,
            methods: results,
        })
    }

    fn score(
        &self,
        method: &Method,
        train: &TimeSeries,
        grid: &ResampleGrid,
        test: &TimeSeries,
    ) -> Result<ValidationReport, DensifyError> {
        let fitted = method.interpolate_with(train, grid, self.extrapolation)?;
        let errors: Vec<f64> = test
            .iter()
            .filter_map(|(t, truth)| {
                nearest_index(fitted.timestamps(), t).map(|i| (fitted.values()[i] - truth).abs())
            })
            .collect();
        ValidationReport::from_errors(&errors).ok_or(DensifyError::InsufficientData {
            got: 0,
            min: 1,
        })
    }
}

// ============================================================================
// Tests
// ============================================================================
