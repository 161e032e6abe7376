//! Side-by-side comparison of interpolation strategies.
//!
//! ## Purpose
//!
//! Runs the densification pipeline once per requested method on the same
//! input and collects quality metrics, range checks and wall-clock timings
//! into one report, optionally backed by a holdout validation.
//!
//! ## Design notes
//!
//! * **Deterministic**: Results are keyed by method name in a `BTreeMap`, so the
//!   report is identical whatever order the methods ran in.
//! * **Isolation**: Unknown names and failing strategies become error entries;
//!   the remaining methods still run. With linear fallback enabled an unknown
//!   name instead runs as `linear`, keyed under the name that was requested.
//! * **Parallelism**: With the `parallel` feature the per-method pipelines run on
//!   the `rayon` pool. Results are unaffected.
//!
//! ## Key concepts
//!
//! * **Recommendation**: `linear` unless a holdout validator is configured, in
//!   which case the method with the lowest holdout RMSE wins.
//!
//! ## Non-goals
//!
//! * Timings are indicative only; no warm-up or repetition is performed.

// External dependencies
use core::fmt::{Display, Formatter, Result as FmtResult};
use std::collections::BTreeMap;
use std::time::{Duration, Instant};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

// Internal dependencies
use crate::algorithms::grid::ResampleGrid;
use crate::algorithms::interpolation::{DEFAULT_POLYNOMIAL_ORDER, Method};
use crate::algorithms::spline::SplineExtrapolation;
use crate::evaluation::holdout::{HoldoutReport, HoldoutValidator};
use crate::evaluation::plausibility::{DEFAULT_RANGE_TOLERANCE, RangeCheck};
use crate::evaluation::quality::QualityReport;
use crate::primitives::errors::DensifyError;
use crate::primitives::observer::{Event, SharedObserver, default_observer};
use crate::primitives::series::{Series, TimeSeries};
use crate::primitives::step::Step;

// ============================================================================
// Reports
// ============================================================================

/// One method's pipeline outcome.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct MethodRun {
    /// Strategy that produced this run.
    pub method: Method,

    /// Densified series.
    pub series: TimeSeries,

    /// Quality metrics of the densified series.
    pub quality: QualityReport,

    /// Range plausibility against the cleaned input.
    pub range_check: RangeCheck,

    /// Wall-clock time of grid construction, interpolation and metrics.
    pub elapsed: Duration,
}

impl MethodRun {
    /// Number of densified points.
    pub fn interpolated_points(&self) -> usize {
        self.series.len()
    }
}

/// Comparison across methods.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ComparisonReport {
    /// Valid points in the cleaned input.
    pub original_points: usize,

    /// Grid step used for every method.
    pub step: Step,

    /// Per-method outcome, keyed by method name.
    pub methods: BTreeMap<String, Result<MethodRun, DensifyError>>,

    /// Holdout validation, when configured.
    pub holdout: Option<Result<HoldoutReport, DensifyError>>,

    /// Recommended method.
    pub recommended: Method,
}

impl ComparisonReport {
    /// Runs that succeeded, by name.
    pub fn successful(&self) -> impl Iterator<Item = (&str, &MethodRun)> {
        self.methods
            .iter()
            .filter_map(|(name, res)| res.as_ref().ok().map(|run| (name.as_str(), run)))
    }

    /// Runs that failed, by name.
    pub fn failed(&self) -> impl Iterator<Item = (&str, &DensifyError)> {
        self.methods
            .iter()
            .filter_map(|(name, res)| res.as_ref().err().map(|e| (name.as_str(), e)))
    }
}

impl Display for ComparisonReport {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        writeln!(f, "Method Comparison (step {}):", self.step)?;
        writeln!(f, "  Original points: {}", self.original_points)?;
        for (name, res) in &self.methods {
            match res {
                Ok(run) => writeln!(
                    f,
                    "  {name:<12} {:>8} pts  mean {:>8.3}  range [{:.3}, {:.3}]  {:>9.3} ms{}",
                    run.interpolated_points(),
                    run.quality.mean,
                    run.quality.min,
                    run.quality.max,
                    run.elapsed.as_secs_f64() * 1e3,
                    if run.range_check.valid { "" } else { "  (out of range)" }
                )?,
                Err(e) => writeln!(f, "  {name:<12} failed: {e}")?,
            }
        }
        writeln!(f, "  Recommended: {}", self.recommended)
    }
}

// ============================================================================
// Comparator
// ============================================================================

/// Runs several strategies over one input.
#[derive(Debug, Clone)]
pub struct MethodComparator {
    step: Step,
    methods: Option<Vec<String>>,
    polynomial_order: usize,
    extrapolation: SplineExtrapolation,
    range_tolerance: f64,
    holdout: Option<HoldoutValidator>,
    fallback_to_linear: bool,
    observer: SharedObserver,
}

impl Default for MethodComparator {
    fn default() -> Self {
        Self::new(Step::default())
    }
}

impl MethodComparator {
    /// Comparator over all four strategies at `step`.
    pub fn new(step: Step) -> Self {
        Self {
            step,
            methods: None,
            polynomial_order: DEFAULT_POLYNOMIAL_ORDER,
            extrapolation: SplineExtrapolation::default(),
            range_tolerance: DEFAULT_RANGE_TOLERANCE,
            holdout: None,
            fallback_to_linear: false,
            observer: default_observer(),
        }
    }

    /// Restrict the comparison to the named methods.
    pub fn with_methods<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.methods = Some(names.into_iter().map(Into::into).collect());
        self
    }

    /// Order used for a bare `polynomial` entry.
    pub fn with_polynomial_order(mut self, order: usize) -> Self {
        self.polynomial_order = order;
        self
    }

    /// Spline extrapolation policy.
    pub fn with_extrapolation(mut self, extrapolation: SplineExtrapolation) -> Self {
        self.extrapolation = extrapolation;
        self
    }

    /// Range-check tolerance as a fraction of the observed range.
    pub fn with_range_tolerance(mut self, tolerance: f64) -> Self {
        self.range_tolerance = tolerance;
        self
    }

    /// Base the recommendation on a holdout validation.
    pub fn with_holdout(mut self, validator: HoldoutValidator) -> Self {
        self.holdout = Some(validator);
        self
    }

    /// Run unknown method names as linear interpolation instead of failing them.
    pub fn with_fallback_to_linear(mut self, enabled: bool) -> Self {
        self.fallback_to_linear = enabled;
        self
    }

    /// Observer receiving pipeline events.
    pub fn with_observer(mut self, observer: SharedObserver) -> Self {
        self.observer = observer;
        self
    }

    /// Resolve the requested names, keeping unknown ones as errors.
    fn requested(&self) -> Vec<(String, Result<Method, DensifyError>)> {
        let Some(names) = &self.methods else {
            return Method::all(self.polynomial_order)
                .into_iter()
                .map(|m| (m.to_string(), Ok(m)))
                .collect();
        };

        names
            .iter()
            .map(|name| match name.parse::<Method>() {
                Ok(Method::Polynomial { .. }) if !name.contains(':') => {
                    let m = Method::Polynomial {
                        order: self.polynomial_order,
                    };
                    (m.to_string(), Ok(m))
                }
                Ok(m) => (m.to_string(), Ok(m)),
                Err(DensifyError::UnsupportedMethod(_)) if self.fallback_to_linear => {
                    self.observer
                        .observe(&Event::FallbackApplied { requested: name });
                    (name.clone(), Ok(Method::Linear))
                }
                Err(e) => (name.clone(), Err(e)),
            })
            .collect()
    }

    /// Compare the configured methods on a raw series.
    ///
    /// # Errors
    ///
    /// * [`DensifyError::InvalidAxis`] if the series cannot be cleaned.
    ///
    /// Every other failure is recorded against the method it concerns.
    pub fn compare(&self, series: &Series) -> Result<ComparisonReport, DensifyError> {
        let cleaned = series.clean()?;
        self.observer.observe(&Event::Cleaned {
            raw: series.len(),
            valid: cleaned.len(),
        });

        let requested = self.requested();

        #[cfg(feature = "parallel")]
        let runs: Vec<_> = requested
            .into_par_iter()
            .map(|(name, method)| {
                let res = method.and_then(|m| self.run_one(&cleaned, m));
                (name, res)
            })
            .collect();

        #[cfg(not(feature = "parallel"))]
        let runs: Vec<_> = requested
            .into_iter()
            .map(|(name, method)| {
                let res = method.and_then(|m| self.run_one(&cleaned, m));
                (name, res)
            })
            .collect();

        let mut methods = BTreeMap::new();
        for (name, res) in runs {
            if let Err(error) = &res {
                self.observer.observe(&Event::MethodFailed {
                    method: &name,
                    error,
                });
            }
            methods.insert(name, res);
        }

        let holdout = self.holdout.map(|validator| {
            let valid: Vec<Method> = methods
                .values()
                .filter_map(|r| r.as_ref().ok().map(|run| run.method))
                .collect();
            validator.validate(&cleaned, self.step, &valid, self.observer.as_ref())
        });

        let recommended = holdout
            .as_ref()
            .and_then(|h| h.as_ref().ok())
            .and_then(HoldoutReport::best_by_rmse)
            .and_then(|name| name.parse().ok())
            .unwrap_or_default();

        Ok(ComparisonReport {
            original_points: cleaned.len(),
            step: self.step,
            methods,
            holdout,
            recommended,
        })
    }

    fn run_one(&self, cleaned: &TimeSeries, method: Method) -> Result<MethodRun, DensifyError> {
        let started = Instant::now();
        let grid = ResampleGrid::build(cleaned, self.step)?;
        let series = method.interpolate_with(cleaned, &grid, self.extrapolation)?;
        let quality = QualityReport::compute(&series, cleaned.len())?;
        let range_check = RangeCheck::evaluate(cleaned, &series, self.range_tolerance)?;
        let elapsed = started.elapsed();

        self.observer.observe(&Event::Interpolated {
            method: method.name(),
            input: cleaned.len(),
            output: series.len(),
        });

        Ok(MethodRun {
            method,
            series,
            quality,
            range_check,
            elapsed,
        })
    }
}

// ============================================================================
// Tests
// ============================================================================
