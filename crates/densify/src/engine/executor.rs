//! Execution engine for densification runs.
//!
//! ## Purpose
//!
//! This module holds the run configuration and the [`Densifier`], which
//! drives the pipeline: clean the raw series, build the grid, interpolate,
//! then score the output. It also dispatches the comparison and holdout
//! entry points with the same configuration.
//!
//! ## Design notes
//!
//! * Configuration is plain data with defaults; validation happens once, when
//!   the densifier is constructed.
//! * Every pipeline stage reports to the configured observer.
//! * Per-method failures in comparison and holdout runs are stored, not raised.
//!
//! ## Invariants
//!
//! * A constructed `Densifier` always holds a validated configuration.
//!
//! ## Non-goals
//!
//! * This module does not install a logging subscriber.
//! * This module does not parse method names (handled by the API builder).

// External dependencies
use std::collections::BTreeMap;

// Internal dependencies
use crate::algorithms::grid::ResampleGrid;
use crate::algorithms::interpolation::{DEFAULT_POLYNOMIAL_ORDER, Method};
use crate::algorithms::spline::SplineExtrapolation;
use crate::engine::output::{DensifyResult, ValueSummary};
use crate::engine::validator::Validator;
use crate::evaluation::comparison::{ComparisonReport, MethodComparator};
use crate::evaluation::holdout::{
    DEFAULT_HOLDOUT_FRACTION, DEFAULT_SEED, HoldoutReport, HoldoutValidator,
};
use crate::evaluation::plausibility::{DEFAULT_RANGE_TOLERANCE, RangeCheck};
use crate::evaluation::quality::QualityReport;
use crate::math::stats::{mean, min_max};
use crate::primitives::errors::DensifyError;
use crate::primitives::observer::{Event, SharedObserver, default_observer};
use crate::primitives::series::{Series, TimeSeries};
use crate::primitives::step::Step;

// ============================================================================
// Configuration
// ============================================================================

/// Configuration for densification runs.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct DensifyConfig {
    /// Grid spacing.
    pub step: Step,

    /// Strategy used by single runs.
    pub method: Method,

    /// Order for polynomial entries named without an explicit order.
    pub polynomial_order: usize,

    /// Spline behaviour outside the observed span.
    pub extrapolation: SplineExtrapolation,

    /// Replace unknown method names with linear interpolation.
    pub fallback_to_linear: bool,

    /// Fraction of points held out during validation.
    pub holdout_fraction: f64,

    /// Seed for the holdout split.
    pub seed: u64,

    /// Range-check tolerance, as a fraction of the observed range.
    pub range_tolerance: f64,

    /// Methods for comparison and validation; `None` means all four.
    pub methods: Option<Vec<String>>,

    /// Recommend the comparison winner by holdout RMSE.
    pub rank_by_holdout: bool,
}

impl Default for DensifyConfig {
    fn default() -> Self {
        Self {
            step: Step::default(),
            method: Method::default(),
            polynomial_order: DEFAULT_POLYNOMIAL_ORDER,
            extrapolation: SplineExtrapolation::default(),
            fallback_to_linear: false,
            holdout_fraction: DEFAULT_HOLDOUT_FRACTION,
            seed: DEFAULT_SEED,
            range_tolerance: DEFAULT_RANGE_TOLERANCE,
            methods: None,
            rank_by_holdout: false,
        }
    }
}

impl DensifyConfig {
    /// Check every parameter bound.
    pub fn validate(&self) -> Result<(), DensifyError> {
        Validator::validate_polynomial_order(self.polynomial_order)?;
        if let Method::Polynomial { order } = self.method {
            Validator::validate_polynomial_order(order)?;
        }
        Validator::validate_holdout_fraction(self.holdout_fraction)?;
        Validator::validate_range_tolerance(self.range_tolerance)?;
        Validator::validate_method_subset(self.methods.as_deref())?;
        Ok(())
    }
}

// ============================================================================
// Densifier
// ============================================================================

/// Runs the densification pipeline with a fixed configuration.
#[derive(Debug, Clone)]
pub struct Densifier {
    config: DensifyConfig,
    observer: SharedObserver,
}

impl Densifier {
    /// Densifier reporting to the default tracing observer.
    pub fn from_config(config: DensifyConfig) -> Result<Self, DensifyError> {
        Self::with_observer(config, default_observer())
    }

    /// Densifier reporting to `observer`.
    pub fn with_observer(
        config: DensifyConfig,
        observer: SharedObserver,
    ) -> Result<Self, DensifyError> {
        config.validate()?;
        Ok(Self { config, observer })
    }

    /// The validated configuration.
    pub fn config(&self) -> &DensifyConfig {
        &self.config
    }

    // ========================================================================
    // Entry Points
    // ========================================================================

    /// Densify a raw series with the configured method.
    ///
    /// # Errors
    ///
    /// * [`DensifyError::InvalidAxis`] for an ordinal or unordered index.
    /// * [`DensifyError::InsufficientData`] for fewer than 2 valid points.
    /// * [`DensifyError::NumericFailure`] if the strategy's fit breaks down.
    pub fn run(&self, series: &Series) -> Result<DensifyResult, DensifyError> {
        let cleaned = self.clean(series)?;
        Validator::validate_min_points(&cleaned, 2)?;

        let grid = ResampleGrid::build(&cleaned, self.config.step)?;
        let step = self.config.step.to_string();
        self.observer.observe(&Event::GridBuilt {
            points: grid.len(),
            step: &step,
        });

        let method = self.config.method;
        let densified = method.interpolate_with(&cleaned, &grid, self.config.extrapolation)?;
        self.observer.observe(&Event::Interpolated {
            method: method.name(),
            input: cleaned.len(),
            output: densified.len(),
        });

        let quality = QualityReport::compute(&densified, cleaned.len())?;
        let range_check = RangeCheck::evaluate(&cleaned, &densified, self.config.range_tolerance)?;

        Ok(DensifyResult {
            method,
            step: self.config.step,
            raw_points: series.len(),
            original_points: cleaned.len(),
            original: summarise(&cleaned)?,
            series: densified,
            quality,
            range_check,
        })
    }

    /// Compare the configured methods on a raw series.
    pub fn compare(&self, series: &Series) -> Result<ComparisonReport, DensifyError> {
        let mut comparator = MethodComparator::new(self.config.step)
            .with_polynomial_order(self.config.polynomial_order)
            .with_extrapolation(self.config.extrapolation)
            .with_range_tolerance(self.config.range_tolerance)
            .with_fallback_to_linear(self.config.fallback_to_linear)
            .with_observer(self.observer.clone());
        if let Some(names) = &self.config.methods {
            comparator = comparator.with_methods(names.iter().cloned());
        }
        if self.config.rank_by_holdout {
            comparator = comparator.with_holdout(self.holdout()?);
        }
        comparator.compare(series)
    }

    /// Holdout-validate the configured methods on a raw series.
    ///
    /// Unknown method names are recorded as failures in the report, or
    /// validated as linear interpolation when fallback is enabled.
    pub fn validate(&self, series: &Series) -> Result<HoldoutReport, DensifyError> {
        let cleaned = self.clean(series)?;

        let mut failures = BTreeMap::new();
        let mut fallbacks = Vec::new();
        let methods: Vec<Method> = match &self.config.methods {
            None => Method::all(self.config.polynomial_order).to_vec(),
            Some(names) => names
                .iter()
                .filter_map(|name| match self.resolve(name) {
                    Ok(m) => Some(m),
                    Err(DensifyError::UnsupportedMethod(_)) if self.config.fallback_to_linear => {
                        self.observer
                            .observe(&Event::FallbackApplied { requested: name });
                        fallbacks.push(name.clone());
                        Some(Method::Linear)
                    }
                    Err(e) => {
                        failures.insert(name.clone(), e);
                        None
                    }
                })
                .collect(),
        };

        let validator = self.holdout()?;
        let mut report =
            validator.validate(&cleaned, self.config.step, &methods, self.observer.as_ref())?;
        for (name, error) in failures {
            self.observer.observe(&Event::MethodFailed {
                method: &name,
                error: &error,
            });
            report.methods.insert(name, Err(error));
        }
        if let Some(linear) = report.methods.get(Method::Linear.name()).cloned() {
            for name in fallbacks {
                report.methods.insert(name, linear.clone());
            }
        }
        Ok(report)
    }

    // ========================================================================
    // Helpers
    // ========================================================================

    fn clean(&self, series: &Series) -> Result<TimeSeries, DensifyError> {
        let cleaned = series.clean()?;
        self.observer.observe(&Event::Cleaned {
            raw: series.len(),
            valid: cleaned.len(),
        });
        Ok(cleaned)
    }

    fn holdout(&self) -> Result<HoldoutValidator, DensifyError> {
        Ok(
            HoldoutValidator::new(self.config.holdout_fraction, self.config.seed)?
                .with_extrapolation(self.config.extrapolation),
        )
    }

    fn resolve(&self, name: &str) -> Result<Method, DensifyError> {
        match name.parse::<Method>()? {
            Method::Polynomial { .. } if !name.contains(':') => Ok(Method::Polynomial {
                order: self.config.polynomial_order,
            }),
            m => Ok(m),
        }
    }
}

fn summarise(series: &TimeSeries) -> Result<ValueSummary, DensifyError> {
    let empty = || DensifyError::InsufficientData {
        got: series.len(),
        min: 1,
    };
    let (min, max) = min_max(series.values()).ok_or_else(empty)?;
    let mean = mean(series.values()).ok_or_else(empty)?;
    Ok(ValueSummary { min, max, mean })
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::primitives::observer::{FnObserver, NoopObserver};
    use chrono::{DateTime, TimeDelta, TimeZone, Utc};
    use std::sync::{Arc, Mutex};

    fn hourly(vals: &[Option<f64>]) -> Series {
        let t0 = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let ts: Vec<DateTime<Utc>> = (0..vals.len() as i64).map(|i| t0 + TimeDelta::hours(i)).collect();
        Series::new(ts, vals.to_vec()).unwrap()
    }

    fn quiet(config: DensifyConfig) -> Densifier {
        Densifier::with_observer(config, Arc::new(NoopObserver)).unwrap()
    }

    #[test]
    fn default_config_is_valid() {
        assert!(DensifyConfig::default().validate().is_ok());
    }

    #[test]
    fn invalid_config_is_rejected_at_construction() {
        let config = DensifyConfig {
            holdout_fraction: 0.0,
            ..DensifyConfig::default()
        };
        assert!(matches!(
            Densifier::from_config(config),
            Err(DensifyError::InvalidParameter { name: "holdout_fraction", .. })
        ));
    }

    #[test]
    fn run_reports_pipeline_events_in_order() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        let observer = FnObserver::new(move |e| {
            let tag = match e {
                Event::Cleaned { .. } => "cleaned",
                Event::GridBuilt { .. } => "grid",
                Event::Interpolated { .. } => "interpolated",
                _ => "other",
            };
            sink.lock().unwrap().push(tag);
        });
        let densifier = Densifier::with_observer(DensifyConfig::default(), Arc::new(observer)).unwrap();

        let result = densifier
            .run(&hourly(&[Some(10.0), None, Some(14.0)]))
            .unwrap();
        assert_eq!(result.raw_points, 3);
        assert_eq!(result.original_points, 2);
        assert_eq!(result.interpolated_points(), 25);
        assert_eq!(*seen.lock().unwrap(), ["cleaned", "grid", "interpolated"]);
    }

    #[test]
    fn validate_records_unknown_names() {
        let vals: Vec<_> = (0..24).map(|i| Some(f64::from(i))).collect();
        let config = DensifyConfig {
            methods: Some(vec!["linear".into(), "akima".into()]),
            ..DensifyConfig::default()
        };
        let report = quiet(config).validate(&hourly(&vals)).unwrap();
        assert!(report.methods["linear"].is_ok());
        assert_eq!(
            report.methods["akima"],
            Err(DensifyError::UnsupportedMethod("akima".into()))
        );
    }

    #[test]
    fn fallback_covers_unknown_names_in_compare_and_validate() {
        let fallbacks = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&fallbacks);
        let observer = FnObserver::new(move |e| {
            if let Event::FallbackApplied { requested } = e {
                sink.lock().unwrap().push(requested.to_string());
            }
        });
        let config = DensifyConfig {
            methods: Some(vec!["spline".into(), "akima".into()]),
            fallback_to_linear: true,
            ..DensifyConfig::default()
        };
        let densifier = Densifier::with_observer(config, Arc::new(observer)).unwrap();
        let vals: Vec<_> = (0..24).map(|i| Some(f64::from(i % 5))).collect();
        let series = hourly(&vals);

        let report = densifier.compare(&series).unwrap();
        assert_eq!(report.failed().count(), 0);
        let akima = report.methods["akima"].as_ref().unwrap();
        assert_eq!(akima.method, Method::Linear);
        assert!(report.methods["spline"].is_ok());

        let holdout = densifier.validate(&series).unwrap();
        assert!(holdout.methods["spline"].is_ok());
        assert_eq!(holdout.methods["akima"], holdout.methods["linear"]);
        assert!(holdout.methods["akima"].is_ok());

        assert_eq!(*fallbacks.lock().unwrap(), ["akima", "akima"]);
    }
}
